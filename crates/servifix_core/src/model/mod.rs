//! Domain model for accounts and their notifications.
//!
//! # Responsibility
//! - Define the persisted entity shapes used by core business logic.
//! - Define request/response shapes and the explicit projections between them.
//!
//! # Invariants
//! - A persisted notification always has an id and an owning account.

pub mod account;
pub mod notification;
pub mod response;
