//! Notification entity and its request/response projections.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one and never changes afterward.
//! - `account` is resolved through account lookup, never trusted from the
//!   request beyond its id.

use crate::model::account::{Account, AccountId, AccountSummary};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned notification identifier.
pub type NotificationId = i64;

/// Notification entity as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Assigned on first save.
    pub id: Option<NotificationId>,
    pub title: String,
    pub content: String,
    /// Date the notification becomes effective.
    pub date: NaiveDate,
    /// Requested owner; always set, even before resolution.
    pub account_id: AccountId,
    /// Resolved owner. `None` only on an unsaved candidate.
    pub account: Option<Account>,
}

impl Notification {
    /// Builds an unsaved candidate from request fields. The account is not
    /// attached yet.
    pub fn candidate(request: &NotificationRequest) -> Self {
        Self {
            id: None,
            title: request.title.clone(),
            content: request.content.clone(),
            date: request.date,
            account_id: request.account_id,
            account: None,
        }
    }

    /// Attaches the resolved owner, keeping `account_id` in sync.
    pub fn attach_account(&mut self, account: Account) {
        self.account_id = account.id;
        self.account = Some(account);
    }

    /// Projects a persisted notification into its response shape.
    ///
    /// Returns `None` when the entity has no id or no resolved account, which
    /// only happens for unsaved candidates.
    pub fn to_response(&self) -> Option<NotificationResponse> {
        let id = self.id?;
        let account = self.account.as_ref()?;
        Some(NotificationResponse {
            id,
            title: self.title.clone(),
            content: self.content.clone(),
            date: self.date,
            account: AccountSummary::from(account),
        })
    }
}

/// Create request accepted by the notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    #[serde(rename = "accountId")]
    pub account_id: AccountId,
}

/// Response shape returned inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub account: AccountSummary,
}
