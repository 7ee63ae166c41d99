//! Notification use-case service.
//!
//! # Responsibility
//! - Provide get/create/delete APIs over a notification store and an account
//!   lookup.
//! - Enforce create-time validation: duplicate rule, then date rule.
//!
//! # Invariants
//! - Every operation returns an `ApiResponse`; failures are `Status::Error`
//!   envelopes with an explicit `ErrorKind`, never panics.
//! - Validation runs before account resolution and stops at the first
//!   failed rule.
//! - Log events carry ids and outcome only, never title or content text.

use crate::config::{DuplicateCheck, ServiceConfig};
use crate::model::account::AccountId;
use crate::model::notification::{
    Notification, NotificationId, NotificationRequest, NotificationResponse,
};
use crate::model::response::{ApiResponse, ErrorKind};
use crate::repo::account_repo::AccountRepository;
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::RepoError;
use crate::service::clock::{Clock, SystemClock};
use chrono::NaiveDate;
use log::{error, info, warn};
use thiserror::Error;

pub const MSG_FETCHED: &str = "Notification fetched successfully";
pub const MSG_NOT_FOUND: &str = "Notification not found";
pub const MSG_CREATED: &str = "Notification created successfully";
pub const MSG_DELETED: &str = "Notification deleted successfully";
pub const MSG_INTERNAL: &str = "Internal storage error";

/// Create-time rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A notification with the same title and content already exists")]
    Duplicate,
    #[error("Notification date must be after the current date")]
    DateNotAfterToday { date: NaiveDate, today: NaiveDate },
}

/// Service error for notification use-cases.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    #[error("Notification not found")]
    NotFound(NotificationId),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("{0}")]
    Repo(RepoError),
    /// Write succeeded but the result cannot be projected.
    #[error("inconsistent notification state: {0}")]
    InconsistentState(&'static str),
}

impl NotificationServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) | Self::AccountNotFound(_) => ErrorKind::InvalidInput,
            Self::Repo(_) | Self::InconsistentState(_) => ErrorKind::Internal,
        }
    }

    /// Message exposed in the envelope. Internal details stay in the log.
    fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => MSG_INTERNAL.to_string(),
            _ => self.to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(ValidationError::Duplicate) => "duplicate",
            Self::Validation(ValidationError::DateNotAfterToday { .. }) => "date_not_after_today",
            Self::AccountNotFound(_) => "account_not_found",
            Self::Repo(_) => "repo_failed",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }
}

impl From<RepoError> for NotificationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Duplicate => Self::Validation(ValidationError::Duplicate),
            other => Self::Repo(other),
        }
    }
}

type ServiceResult<T> = Result<T, NotificationServiceError>;

/// Notification service composed explicitly from its collaborators.
pub struct NotificationService<N, A, C = SystemClock>
where
    N: NotificationRepository,
    A: AccountRepository,
    C: Clock,
{
    notifications: N,
    accounts: A,
    clock: C,
    config: ServiceConfig,
}

impl<N, A> NotificationService<N, A, SystemClock>
where
    N: NotificationRepository,
    A: AccountRepository,
{
    /// Creates a service that validates dates against the host's local date.
    pub fn new(notifications: N, accounts: A, config: ServiceConfig) -> Self {
        Self::with_clock(notifications, accounts, SystemClock, config)
    }
}

impl<N, A, C> NotificationService<N, A, C>
where
    N: NotificationRepository,
    A: AccountRepository,
    C: Clock,
{
    pub fn with_clock(notifications: N, accounts: A, clock: C, config: ServiceConfig) -> Self {
        Self {
            notifications,
            accounts,
            clock,
            config,
        }
    }

    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    /// Fetches one notification by id.
    ///
    /// A missing id yields an `ErrorKind::NotFound` envelope with message
    /// `"Notification not found"`.
    pub fn get_notification_by_id(
        &self,
        id: NotificationId,
    ) -> ApiResponse<NotificationResponse> {
        let outcome = self.fetch(id);
        respond("notification_get", outcome, |response| {
            info!(
                "event=notification_get module=service status=ok notification_id={}",
                response.id
            );
            ApiResponse::success(MSG_FETCHED, Some(response))
        })
    }

    /// Validates and persists a new notification.
    ///
    /// # Contract
    /// - Duplicate rule first, then date rule; first violation wins.
    /// - The account is resolved only after validation passes.
    /// - Rule violations and a missing account yield `ErrorKind::InvalidInput`.
    pub fn create_notification(
        &self,
        request: &NotificationRequest,
    ) -> ApiResponse<NotificationResponse> {
        let outcome = self.create(request);
        respond("notification_create", outcome, |response| {
            info!(
                "event=notification_create module=service status=ok notification_id={} account_id={}",
                response.id, response.account.id
            );
            ApiResponse::success(MSG_CREATED, Some(response))
        })
    }

    /// Deletes by id. Deleting an absent id still succeeds.
    pub fn delete_notification(&self, id: NotificationId) -> ApiResponse<()> {
        let outcome: ServiceResult<()> = self.notifications.delete_by_id(id).map_err(Into::into);
        respond("notification_delete", outcome, |()| {
            info!("event=notification_delete module=service status=ok notification_id={id}");
            ApiResponse::success(MSG_DELETED, None)
        })
    }

    fn fetch(&self, id: NotificationId) -> ServiceResult<NotificationResponse> {
        let notification = self
            .notifications
            .find_by_id(id)?
            .ok_or(NotificationServiceError::NotFound(id))?;
        notification
            .to_response()
            .ok_or(NotificationServiceError::InconsistentState(
                "stored notification has no id or account",
            ))
    }

    fn create(&self, request: &NotificationRequest) -> ServiceResult<NotificationResponse> {
        let mut candidate = Notification::candidate(request);
        self.validate(&candidate)?;

        let account = self
            .accounts
            .get_account_by_id(candidate.account_id)?
            .ok_or(NotificationServiceError::AccountNotFound(candidate.account_id))?;
        candidate.attach_account(account);

        let saved = self.notifications.save(&candidate)?;
        saved
            .to_response()
            .ok_or(NotificationServiceError::InconsistentState(
                "saved notification has no id or account",
            ))
    }

    fn validate(&self, candidate: &Notification) -> ServiceResult<()> {
        if self.is_duplicate(candidate)? {
            return Err(ValidationError::Duplicate.into());
        }

        let today = self.clock.today();
        if candidate.date <= today {
            return Err(ValidationError::DateNotAfterToday {
                date: candidate.date,
                today,
            }
            .into());
        }

        Ok(())
    }

    fn is_duplicate(&self, candidate: &Notification) -> ServiceResult<bool> {
        let title = candidate.title.as_str();
        let content = candidate.content.as_str();
        let duplicate = match self.config.duplicate_check {
            DuplicateCheck::Legacy => {
                self.notifications
                    .exists_by_title_and_content(title, content)?
                    && self.notifications.exists_by_account_id(candidate.account_id)?
            }
            DuplicateCheck::AccountScoped => self
                .notifications
                .exists_by_title_content_and_account(title, content, candidate.account_id)?,
        };
        Ok(duplicate)
    }
}

/// Converts an operation outcome into its envelope, logging failures by kind.
fn respond<T, U, F>(event: &str, outcome: ServiceResult<T>, on_ok: F) -> ApiResponse<U>
where
    F: FnOnce(T) -> ApiResponse<U>,
{
    match outcome {
        Ok(value) => on_ok(value),
        Err(err) => {
            let kind = err.kind();
            match kind {
                ErrorKind::Internal => error!(
                    "event={event} module=service status=error error_code={} error={err}",
                    err.error_code()
                ),
                ErrorKind::NotFound | ErrorKind::InvalidInput => warn!(
                    "event={event} module=service status=rejected error_code={}",
                    err.error_code()
                ),
            }
            ApiResponse::error(kind, err.public_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationServiceError, ValidationError};
    use crate::model::response::ErrorKind;
    use crate::repo::RepoError;

    #[test]
    fn store_duplicate_maps_to_validation_failure() {
        let err = NotificationServiceError::from(RepoError::Duplicate);
        assert!(matches!(
            err,
            NotificationServiceError::Validation(ValidationError::Duplicate)
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = NotificationServiceError::from(RepoError::InvalidData("bad row".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.public_message(), super::MSG_INTERNAL);
    }

    #[test]
    fn not_found_message_matches_envelope_contract() {
        let err = NotificationServiceError::NotFound(4);
        assert_eq!(err.public_message(), super::MSG_NOT_FOUND);
    }
}
