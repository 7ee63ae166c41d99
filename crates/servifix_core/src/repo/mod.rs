//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the two collaborators the notification service depends on:
//!   account lookup and notification storage.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Repository APIs report absence as `Ok(None)` or `Ok(false)`, never as
//!   an error.
//! - A unique-constraint violation on insert is surfaced as
//!   `RepoError::Duplicate`, distinct from transport errors.

use crate::db::DbError;
use crate::model::notification::NotificationId;
use rusqlite::Connection;
use thiserror::Error;

pub mod account_repo;
pub mod notification_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by account and notification stores.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("notification not found: {0}")]
    NotFound(NotificationId),
    #[error("notification with the same account, title and content already exists")]
    Duplicate,
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
