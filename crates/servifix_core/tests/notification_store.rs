use chrono::NaiveDate;
use rusqlite::Connection;
use servifix_core::db::open_db_in_memory;
use servifix_core::{
    Account, AccountRepository, Notification, NotificationRepository, RepoError,
    SqliteAccountRepository, SqliteNotificationRepository,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_account(conn: &Connection, username: &str) -> Account {
    SqliteAccountRepository::try_new(conn)
        .unwrap()
        .insert_account(username)
        .unwrap()
}

fn unsaved(account: &Account, title: &str, content: &str) -> Notification {
    Notification {
        id: None,
        title: title.to_string(),
        content: content.to_string(),
        date: date(2030, 5, 1),
        account_id: account.id,
        account: Some(account.clone()),
    }
}

#[test]
fn account_lookup_returns_none_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let accounts = SqliteAccountRepository::try_new(&conn).unwrap();

    let account = accounts.insert_account("alice").unwrap();
    assert_eq!(accounts.get_account_by_id(account.id).unwrap(), Some(account));
    assert_eq!(accounts.get_account_by_id(4242).unwrap(), None);
}

#[test]
fn save_assigns_id_and_find_joins_account() {
    let conn = open_db_in_memory().unwrap();
    let account = seed_account(&conn, "alice");
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();

    let saved = repo.save(&unsaved(&account, "Maintenance", "Pipes")).unwrap();
    let id = saved.id.unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.date, date(2030, 5, 1));
    assert_eq!(loaded.account.unwrap().username, "alice");
}

#[test]
fn save_with_existing_id_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let account = seed_account(&conn, "alice");
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();

    let mut saved = repo.save(&unsaved(&account, "Maintenance", "Pipes")).unwrap();
    saved.content = "Pipes and valves".to_string();
    let updated = repo.save(&saved).unwrap();
    assert_eq!(updated.id, saved.id);

    let loaded = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.content, "Pipes and valves");
}

#[test]
fn save_with_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let account = seed_account(&conn, "alice");
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();

    let mut ghost = unsaved(&account, "Ghost", "Nothing");
    ghost.id = Some(77);
    let err = repo.save(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(77)));
}

#[test]
fn existence_checks_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_account(&conn, "alice");
    let bob = seed_account(&conn, "bob");
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();

    repo.save(&unsaved(&alice, "Maintenance", "Pipes")).unwrap();

    assert!(repo.exists_by_title_and_content("Maintenance", "Pipes").unwrap());
    assert!(!repo.exists_by_title_and_content("Maintenance", "Wires").unwrap());
    assert!(repo.exists_by_account_id(alice.id).unwrap());
    assert!(!repo.exists_by_account_id(bob.id).unwrap());
    assert!(repo
        .exists_by_title_content_and_account("Maintenance", "Pipes", alice.id)
        .unwrap());
    assert!(!repo
        .exists_by_title_content_and_account("Maintenance", "Pipes", bob.id)
        .unwrap());
}

#[test]
fn unique_index_rejects_same_triple() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_account(&conn, "alice");
    let bob = seed_account(&conn, "bob");
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();

    repo.save(&unsaved(&alice, "Maintenance", "Pipes")).unwrap();
    let err = repo.save(&unsaved(&alice, "Maintenance", "Pipes")).unwrap_err();
    assert!(matches!(err, RepoError::Duplicate));

    repo.save(&unsaved(&bob, "Maintenance", "Pipes")).unwrap();
}

#[test]
fn delete_by_id_is_noop_for_absent_rows() {
    let conn = open_db_in_memory().unwrap();
    let account = seed_account(&conn, "alice");
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();

    repo.delete_by_id(12345).unwrap();

    let id = repo
        .save(&unsaved(&account, "Maintenance", "Pipes"))
        .unwrap()
        .id
        .unwrap();
    repo.delete_by_id(id).unwrap();
    repo.delete_by_id(id).unwrap();
    assert!(repo.find_by_id(id).unwrap().is_none());
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteNotificationRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("accounts")));
    let err = SqliteAccountRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("accounts")));
}
