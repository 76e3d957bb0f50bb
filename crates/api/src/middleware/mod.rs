//! Request extractors for authentication and identity.
//!
//! - [`auth::AuthUser`] -- the user id from a valid Bearer token.
//! - [`principal::CurrentUser`] -- the user, its actor profile and the
//!   resolved [`Principal`](troupe_core::principal::Principal), loaded fresh
//!   from the database.

pub mod auth;
pub mod principal;
