//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers check access through `troupe_core::access`, delegate to the
//! repositories in `troupe_db` and map errors via [`AppError`](crate::error::AppError).

pub mod actor;
pub mod auth;
pub mod dashboard;
pub mod party;
