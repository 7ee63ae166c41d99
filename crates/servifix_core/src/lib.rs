//! Core domain logic for Servifix notifications.
//! This crate is the single source of truth for notification invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{DuplicateCheck, ServiceConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::account::{Account, AccountId, AccountSummary};
pub use model::notification::{
    Notification, NotificationId, NotificationRequest, NotificationResponse,
};
pub use model::response::{ApiResponse, ErrorKind, Status};
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
pub use repo::{RepoError, RepoResult};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::notification_service::{
    NotificationService, NotificationServiceError, ValidationError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
