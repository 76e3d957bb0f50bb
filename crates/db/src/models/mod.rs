//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / update DTOs consumed by the matching repository

pub mod actor;
pub mod dashboard;
pub mod party;
pub mod session;
pub mod song;
pub mod user;
