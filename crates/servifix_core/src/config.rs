//! Service configuration.
//!
//! # Invariants
//! - `ServiceConfig::default()` enforces account-scoped uniqueness.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Predicate used by the create-time duplicate rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Rejects when `(title, content)` exists under any account AND the target
    /// account owns at least one notification. Two independent checks.
    Legacy,
    /// Rejects when the target account already owns a notification with the
    /// same `(title, content)`.
    #[default]
    AccountScoped,
}

impl DuplicateCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::AccountScoped => "account_scoped",
        }
    }
}

impl Display for DuplicateCheck {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateCheck {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "account_scoped" | "account-scoped" | "scoped" => Ok(Self::AccountScoped),
            other => Err(format!(
                "unsupported duplicate check `{other}`; expected legacy|account_scoped"
            )),
        }
    }
}

/// Tunables for `NotificationService`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub duplicate_check: DuplicateCheck,
}
