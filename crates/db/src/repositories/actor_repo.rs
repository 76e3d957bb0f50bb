//! Repository for the `actors` table.

use sqlx::PgPool;
use troupe_core::capabilities::Capability;
use troupe_core::types::DbId;

use crate::models::actor::{Actor, ActorSummary, CreateActor, UpdateActor};
use crate::models::user::CreateUser;
use crate::repositories::contains_pattern;
use crate::repositories::user_repo::UserRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, family, age, role, \
    can_view_upcoming_parties, can_view_completed_parties, can_view_all_actors, \
    can_manage_parties, can_manage_actors, \
    can_access_dashboard, can_access_actors, can_access_parties, can_access_schedule, \
    created_at, updated_at";

/// Select list producing [`ActorSummary`] rows over [`SUMMARY_FROM`].
pub(crate) const SUMMARY_COLUMNS: &str = "a.id, a.user_id, a.name, a.family, a.age, a.role, \
    a.can_view_upcoming_parties, a.can_view_completed_parties, a.can_view_all_actors, \
    a.can_manage_parties, a.can_manage_actors, \
    a.can_access_dashboard, a.can_access_actors, a.can_access_parties, a.can_access_schedule, \
    a.created_at, a.updated_at, u.username, \
    (SELECT COUNT(*) FROM party_actors pc WHERE pc.actor_id = a.id) AS parties_count";

pub(crate) const SUMMARY_FROM: &str = "actors a JOIN users u ON u.id = a.user_id";

/// Provides CRUD operations for actor profiles.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a user and its actor profile in one transaction.
    pub async fn create(
        pool: &PgPool,
        user: &CreateUser,
        input: &CreateActor,
    ) -> Result<Actor, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user = UserRepo::create_inner(&mut tx, user).await?;

        let query = format!(
            "INSERT INTO actors (user_id, name, family, age, role,
                can_view_upcoming_parties, can_view_completed_parties, can_view_all_actors,
                can_manage_parties, can_manage_actors,
                can_access_dashboard, can_access_actors, can_access_parties, can_access_schedule)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let caps = input.capabilities;
        let actor = sqlx::query_as::<_, Actor>(&query)
            .bind(user.id)
            .bind(&input.name)
            .bind(&input.family)
            .bind(input.age)
            .bind(&input.role)
            .bind(caps.contains(Capability::ViewUpcomingParties))
            .bind(caps.contains(Capability::ViewCompletedParties))
            .bind(caps.contains(Capability::ViewAllActors))
            .bind(caps.contains(Capability::ManageParties))
            .bind(caps.contains(Capability::ManageActors))
            .bind(caps.contains(Capability::AccessDashboard))
            .bind(caps.contains(Capability::AccessActors))
            .bind(caps.contains(Capability::AccessParties))
            .bind(caps.contains(Capability::AccessSchedule))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(actor)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The actor profile backed by `user_id`, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE user_id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an actor with its username and party count.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ActorSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM {SUMMARY_FROM} WHERE a.id = $1");
        sqlx::query_as::<_, ActorSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List actors ordered by name.
    ///
    /// `search` matches name, family or role, case-insensitively.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
    ) -> Result<Vec<ActorSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM {SUMMARY_FROM}
             WHERE $1::text IS NULL
                OR a.name ILIKE $1 OR a.family ILIKE $1 OR a.role ILIKE $1
             ORDER BY a.name, a.family, a.id"
        );
        sqlx::query_as::<_, ActorSummary>(&query)
            .bind(search.map(contains_pattern))
            .fetch_all(pool)
            .await
    }

    /// Update an actor. Only non-`None` fields in `input` are applied.
    ///
    /// Name and family are mirrored onto the backing user's first / last
    /// name. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActor,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE actors SET
                name = COALESCE($2, name),
                family = COALESCE($3, family),
                age = COALESCE($4, age),
                role = COALESCE($5, role),
                can_view_upcoming_parties = COALESCE($6, can_view_upcoming_parties),
                can_view_completed_parties = COALESCE($7, can_view_completed_parties),
                can_view_all_actors = COALESCE($8, can_view_all_actors),
                can_manage_parties = COALESCE($9, can_manage_parties),
                can_manage_actors = COALESCE($10, can_manage_actors),
                can_access_dashboard = COALESCE($11, can_access_dashboard),
                can_access_actors = COALESCE($12, can_access_actors),
                can_access_parties = COALESCE($13, can_access_parties),
                can_access_schedule = COALESCE($14, can_access_schedule)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let flags = &input.flags;
        let actor = sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.family)
            .bind(input.age)
            .bind(&input.role)
            .bind(flags.can_view_upcoming_parties)
            .bind(flags.can_view_completed_parties)
            .bind(flags.can_view_all_actors)
            .bind(flags.can_manage_parties)
            .bind(flags.can_manage_actors)
            .bind(flags.can_access_dashboard)
            .bind(flags.can_access_actors)
            .bind(flags.can_access_parties)
            .bind(flags.can_access_schedule)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref actor) = actor {
            if input.name.is_some() || input.family.is_some() {
                UserRepo::sync_names(
                    &mut tx,
                    actor.user_id,
                    input.name.as_deref(),
                    input.family.as_deref(),
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(actor)
    }

    /// Delete an actor by removing its backing user.
    ///
    /// The cascade takes the profile, its party assignments, the parties the
    /// user created and its sessions with it. Returns `true` if a row was
    /// deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM users WHERE id = (SELECT user_id FROM actors WHERE id = $1)")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM actors")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Which of `ids` do not name an existing actor, in input order.
    pub async fn find_missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT t.id FROM UNNEST($1::bigint[]) WITH ORDINALITY AS t(id, pos)
             WHERE NOT EXISTS (SELECT 1 FROM actors a WHERE a.id = t.id)
             ORDER BY t.pos",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
