//! Account lookup contract and SQLite implementation.
//!
//! The notification core only resolves accounts. `insert_account` exists on
//! the SQLite type for seeding and administration, not on the trait.

use crate::model::account::{Account, AccountId};
use crate::repo::{ensure_tables, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Resolves account ids to owning accounts.
pub trait AccountRepository {
    /// Returns `Ok(None)` when no account has this id.
    fn get_account_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;
}

/// SQLite-backed account lookup.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["accounts"])?;
        Ok(Self { conn })
    }

    /// Inserts a new account and returns it with its assigned id.
    pub fn insert_account(&self, username: &str) -> RepoResult<Account> {
        self.conn.execute(
            "INSERT INTO accounts (username) VALUES (?1);",
            params![username],
        )?;
        Ok(Account {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
        })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn get_account_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let account = self
            .conn
            .query_row(
                "SELECT id, username FROM accounts WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Account {
                        id: row.get("id")?,
                        username: row.get("username")?,
                    })
                },
            )
            .optional()?;
        Ok(account)
    }
}
