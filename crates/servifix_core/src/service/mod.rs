//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate account lookup and notification storage into the
//!   get/create/delete use-cases.
//! - Keep callers decoupled from storage details.

pub mod clock;
pub mod notification_service;
