//! Startup seeding of the initial superadmin.
//!
//! A user with no actor profile passes every access check, so this is the
//! only code path that creates one.

use troupe_db::models::user::CreateUser;
use troupe_db::repositories::UserRepo;
use troupe_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Credentials for the superadmin created at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AdminSeed {
    /// Read `ADMIN_USERNAME` / `ADMIN_PASSWORD` / `ADMIN_EMAIL`.
    ///
    /// Returns `None` unless both username and password are set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty())?;
        let email = std::env::var("ADMIN_EMAIL").unwrap_or_default();
        Some(Self {
            username,
            password,
            email,
        })
    }
}

/// Create the superadmin unless a user with that username already exists.
///
/// Returns `true` when a user was created.
pub async fn ensure_superadmin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &seed.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %seed.username, "Superadmin already present");
        return Ok(false);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            is_staff: true,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Created initial superadmin");
    Ok(true)
}
