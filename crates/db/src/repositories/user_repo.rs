//! Repository for the `users` table.

use std::collections::HashMap;

use sqlx::PgPool;
use troupe_core::types::DbId;

use crate::models::user::{display_name, CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
                       is_staff, is_active, last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let user = Self::create_inner(&mut tx, input).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Keep the user's first / last name in step with the actor profile.
    pub(crate) async fn sync_names(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name)
             WHERE id = $1",
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Display names ("First Last", or the username) keyed by user ID.
    pub async fn display_names(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, String>, sqlx::Error> {
        let rows: Vec<(DbId, String, String, String)> = sqlx::query_as(
            "SELECT id, first_name, last_name, username FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, first, last, username)| (id, display_name(&first, &last, &username)))
            .collect())
    }

    /// Insert a user within an existing transaction.
    pub(crate) async fn create_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, is_staff)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.is_staff)
            .fetch_one(&mut **tx)
            .await
    }
}
