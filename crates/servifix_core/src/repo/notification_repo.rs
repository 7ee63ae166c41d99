//! Notification storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Keyed storage for notifications plus the existence checks used by
//!   create-time validation.
//!
//! # Invariants
//! - `(account_id, title, content)` is unique at the storage level, so an
//!   account-scoped duplicate cannot slip in between validation and insert.
//! - `delete_by_id` on an absent id is a no-op.
//! - Reads always join the owning account; a row without one is rejected as
//!   invalid data.

use crate::model::account::{Account, AccountId};
use crate::model::notification::{Notification, NotificationId};
use crate::repo::{ensure_tables, RepoError, RepoResult};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

const NOTIFICATION_SELECT_SQL: &str = "SELECT
    n.id AS id,
    n.title AS title,
    n.content AS content,
    n.date AS date,
    n.account_id AS account_id,
    a.username AS username
FROM notifications n
LEFT JOIN accounts a ON a.id = n.account_id";

/// Durable keyed storage for notifications.
pub trait NotificationRepository {
    fn find_by_id(&self, id: NotificationId) -> RepoResult<Option<Notification>>;
    /// True when any notification, under any account, has this title and content.
    fn exists_by_title_and_content(&self, title: &str, content: &str) -> RepoResult<bool>;
    /// True when the account owns at least one notification.
    fn exists_by_account_id(&self, account_id: AccountId) -> RepoResult<bool>;
    /// True when this account already owns a notification with this title and content.
    fn exists_by_title_content_and_account(
        &self,
        title: &str,
        content: &str,
        account_id: AccountId,
    ) -> RepoResult<bool>;
    /// Inserts when `id` is `None` (assigning one), otherwise replaces the
    /// stored row. Returns the saved notification.
    fn save(&self, notification: &Notification) -> RepoResult<Notification>;
    fn delete_by_id(&self, id: NotificationId) -> RepoResult<()>;
}

/// SQLite-backed notification store.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["accounts", "notifications"])?;
        Ok(Self { conn })
    }

    fn insert(&self, notification: &Notification) -> RepoResult<NotificationId> {
        self.conn
            .execute(
                "INSERT INTO notifications (title, content, date, account_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    notification.title.as_str(),
                    notification.content.as_str(),
                    notification.date,
                    notification.account_id,
                ],
            )
            .map_err(map_write_error)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: NotificationId, notification: &Notification) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notifications
                 SET
                    title = ?1,
                    content = ?2,
                    date = ?3,
                    account_id = ?4
                 WHERE id = ?5;",
                params![
                    notification.title.as_str(),
                    notification.content.as_str(),
                    notification.date,
                    notification.account_id,
                    id,
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn exists(&self, sql: &str, args: impl rusqlite::Params) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(sql, args, |row| row.get(0))?;
        Ok(exists == 1)
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn find_by_id(&self, id: NotificationId) -> RepoResult<Option<Notification>> {
        let row = self
            .conn
            .query_row(
                &format!("{NOTIFICATION_SELECT_SQL} WHERE n.id = ?1;"),
                [id],
                read_row,
            )
            .optional()?;

        row.map(NotificationRow::into_notification).transpose()
    }

    fn exists_by_title_and_content(&self, title: &str, content: &str) -> RepoResult<bool> {
        self.exists(
            "SELECT EXISTS(
                SELECT 1 FROM notifications WHERE title = ?1 AND content = ?2
            );",
            params![title, content],
        )
    }

    fn exists_by_account_id(&self, account_id: AccountId) -> RepoResult<bool> {
        self.exists(
            "SELECT EXISTS(
                SELECT 1 FROM notifications WHERE account_id = ?1
            );",
            [account_id],
        )
    }

    fn exists_by_title_content_and_account(
        &self,
        title: &str,
        content: &str,
        account_id: AccountId,
    ) -> RepoResult<bool> {
        self.exists(
            "SELECT EXISTS(
                SELECT 1
                FROM notifications
                WHERE title = ?1 AND content = ?2 AND account_id = ?3
            );",
            params![title, content, account_id],
        )
    }

    fn save(&self, notification: &Notification) -> RepoResult<Notification> {
        let id = match notification.id {
            Some(id) => {
                self.update(id, notification)?;
                id
            }
            None => self.insert(notification)?,
        };

        let mut saved = notification.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    fn delete_by_id(&self, id: NotificationId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM notifications WHERE id = ?1;", [id])?;
        Ok(())
    }
}

struct NotificationRow {
    id: NotificationId,
    title: String,
    content: String,
    date: chrono::NaiveDate,
    account_id: AccountId,
    username: Option<String>,
}

impl NotificationRow {
    fn into_notification(self) -> RepoResult<Notification> {
        let username = self.username.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "notification {} references missing account {}",
                self.id, self.account_id
            ))
        })?;

        Ok(Notification {
            id: Some(self.id),
            title: self.title,
            content: self.content,
            date: self.date,
            account_id: self.account_id,
            account: Some(Account {
                id: self.account_id,
                username,
            }),
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<NotificationRow> {
    Ok(NotificationRow {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        date: row.get("date")?,
        account_id: row.get("account_id")?,
        username: row.get("username")?,
    })
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Duplicate
        }
        _ => err.into(),
    }
}
