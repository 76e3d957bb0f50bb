//! Read-only queries feeding the dashboard.
//!
//! Rows are kept slim; counting and bucketing happen in
//! `troupe_core::dashboard`.

use sqlx::PgPool;
use troupe_core::dashboard::{ActorPartyCount, PartySummary};
use troupe_core::types::DbId;

use crate::models::dashboard::{ActorPartyCountRow, PartySummaryRow};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Every party, as `(date, status)`.
    pub async fn party_summaries(pool: &PgPool) -> Result<Vec<PartySummary>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PartySummaryRow>(
            "SELECT date, status FROM parties ORDER BY date, id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The parties `actor_id` is assigned to, as `(date, status)`.
    pub async fn party_summaries_for_actor(
        pool: &PgPool,
        actor_id: DbId,
    ) -> Result<Vec<PartySummary>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PartySummaryRow>(
            "SELECT p.date, p.status
             FROM parties p JOIN party_actors pa ON pa.party_id = p.id
             WHERE pa.actor_id = $1
             ORDER BY p.date, p.id",
        )
        .bind(actor_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Assignment count for every actor, including those with none.
    pub async fn actor_party_counts(pool: &PgPool) -> Result<Vec<ActorPartyCount>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ActorPartyCountRow>(
            "SELECT a.id AS actor_id, a.name, a.family, COUNT(pa.party_id) AS party_count
             FROM actors a LEFT JOIN party_actors pa ON pa.actor_id = a.id
             GROUP BY a.id, a.name, a.family",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
