//! Repository for the `parties` table and its `party_actors` junction.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use troupe_core::types::DbId;

use crate::models::actor::ActorSummary;
use crate::models::party::{NewParty, Party, PartyDetail, PartyFilter, PartyPatch};
use crate::repositories::actor_repo::{SUMMARY_COLUMNS, SUMMARY_FROM};
use crate::repositories::contains_pattern;
use crate::repositories::song_repo::SongRepo;
use crate::repositories::user_repo::UserRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, day, date, time, duration_secs, place, event, number_of_actors, \
    meeting_time, meeting_date, meeting_place, transport_vehicle, notes, camera_man, \
    dress_details, status, created_by, created_at, updated_at";

/// Newest first. `id` breaks ties between parties at the same moment.
const ORDER: &str = "ORDER BY date DESC, time DESC, id DESC";

#[derive(FromRow)]
struct AssignedActorRow {
    assigned_party_id: DbId,
    #[sqlx(flatten)]
    actor: ActorSummary,
}

/// Provides CRUD operations for parties.
pub struct PartyRepo;

impl PartyRepo {
    /// Insert a party with its actor assignments and playlist.
    pub async fn create(
        pool: &PgPool,
        input: &NewParty,
        created_by: DbId,
    ) -> Result<Party, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO parties (day, date, time, duration_secs, place, event, number_of_actors,
                meeting_time, meeting_date, meeting_place, transport_vehicle, notes, camera_man,
                dress_details, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        let party = sqlx::query_as::<_, Party>(&query)
            .bind(&input.day)
            .bind(input.date)
            .bind(input.time)
            .bind(input.duration_secs)
            .bind(&input.place)
            .bind(&input.event)
            .bind(input.number_of_actors)
            .bind(input.meeting_time)
            .bind(input.meeting_date)
            .bind(&input.meeting_place)
            .bind(&input.transport_vehicle)
            .bind(&input.notes)
            .bind(&input.camera_man)
            .bind(&input.dress_details)
            .bind(input.status.unwrap_or_default().as_str())
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(ref actor_ids) = input.actor_ids {
            Self::set_actors_inner(&mut tx, party.id, actor_ids).await?;
        }
        if let Some(ref songs) = input.songs {
            SongRepo::replace_inner(&mut tx, party.id, songs).await?;
        }

        tx.commit().await?;
        Ok(party)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Party>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parties WHERE id = $1");
        sqlx::query_as::<_, Party>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a party with actors, songs and creator name loaded.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<PartyDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(party) => Ok(Self::load_details(pool, vec![party]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List parties newest first, narrowed by `filter`.
    pub async fn list(pool: &PgPool, filter: &PartyFilter) -> Result<Vec<Party>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parties p
             WHERE ($1::text IS NULL OR p.status = $1)
               AND ($2::text IS NULL
                    OR p.place ILIKE $2
                    OR p.camera_man ILIKE $2
                    OR p.day ILIKE $2
                    OR EXISTS (
                        SELECT 1 FROM party_actors pa JOIN actors a ON a.id = pa.actor_id
                        WHERE pa.party_id = p.id AND (a.name ILIKE $2 OR a.family ILIKE $2)))
             {ORDER}"
        );
        sqlx::query_as::<_, Party>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.search.as_deref().map(contains_pattern))
            .fetch_all(pool)
            .await
    }

    /// Parties `actor_id` is assigned to, newest first.
    pub async fn list_for_actor(pool: &PgPool, actor_id: DbId) -> Result<Vec<Party>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parties
             WHERE id IN (SELECT party_id FROM party_actors WHERE actor_id = $1)
             {ORDER}"
        );
        sqlx::query_as::<_, Party>(&query)
            .bind(actor_id)
            .fetch_all(pool)
            .await
    }

    /// Attach actors, songs and creator names to `parties`, keeping their order.
    ///
    /// Issues one query per relation regardless of how many parties are given.
    pub async fn load_details(
        pool: &PgPool,
        parties: Vec<Party>,
    ) -> Result<Vec<PartyDetail>, sqlx::Error> {
        if parties.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = parties.iter().map(|p| p.id).collect();
        let creator_ids: Vec<DbId> = parties.iter().map(|p| p.created_by).collect();

        let actor_query = format!(
            "SELECT pa.party_id AS assigned_party_id, {SUMMARY_COLUMNS}
             FROM {SUMMARY_FROM} JOIN party_actors pa ON pa.actor_id = a.id
             WHERE pa.party_id = ANY($1)
             ORDER BY a.name, a.family, a.id"
        );
        let assigned = sqlx::query_as::<_, AssignedActorRow>(&actor_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;
        let mut actors_by_party: HashMap<DbId, Vec<ActorSummary>> = HashMap::new();
        for row in assigned {
            actors_by_party
                .entry(row.assigned_party_id)
                .or_default()
                .push(row.actor);
        }

        let mut songs_by_party: HashMap<DbId, Vec<_>> = HashMap::new();
        for song in SongRepo::list_for_parties(pool, &ids).await? {
            songs_by_party.entry(song.party_id).or_default().push(song);
        }

        let names = UserRepo::display_names(pool, &creator_ids).await?;

        Ok(parties
            .into_iter()
            .map(|party| PartyDetail {
                actors: actors_by_party.remove(&party.id).unwrap_or_default(),
                songs: songs_by_party.remove(&party.id).unwrap_or_default(),
                created_by_name: names.get(&party.created_by).cloned().unwrap_or_default(),
                party,
            })
            .collect())
    }

    /// Apply a patch. Only `Some` fields are written; `actor_ids` and `songs`
    /// replace the stored sets when present.
    ///
    /// The `UPDATE` holds the party row lock until commit, so concurrent
    /// updates of the same party, including their playlist replacement,
    /// serialize. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &PartyPatch,
    ) -> Result<Option<Party>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE parties SET
                day = COALESCE($2, day),
                date = COALESCE($3, date),
                time = COALESCE($4, time),
                duration_secs = COALESCE($5, duration_secs),
                place = COALESCE($6, place),
                event = COALESCE($7, event),
                number_of_actors = COALESCE($8, number_of_actors),
                meeting_time = COALESCE($9, meeting_time),
                meeting_date = COALESCE($10, meeting_date),
                meeting_place = COALESCE($11, meeting_place),
                transport_vehicle = COALESCE($12, transport_vehicle),
                notes = COALESCE($13, notes),
                camera_man = COALESCE($14, camera_man),
                dress_details = COALESCE($15, dress_details),
                status = COALESCE($16, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let party = sqlx::query_as::<_, Party>(&query)
            .bind(id)
            .bind(&patch.day)
            .bind(patch.date)
            .bind(patch.time)
            .bind(patch.duration_secs)
            .bind(&patch.place)
            .bind(&patch.event)
            .bind(patch.number_of_actors)
            .bind(patch.meeting_time)
            .bind(patch.meeting_date)
            .bind(&patch.meeting_place)
            .bind(&patch.transport_vehicle)
            .bind(&patch.notes)
            .bind(&patch.camera_man)
            .bind(&patch.dress_details)
            .bind(patch.status.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref party) = party {
            if let Some(ref actor_ids) = patch.actor_ids {
                Self::set_actors_inner(&mut tx, party.id, actor_ids).await?;
            }
            if let Some(ref songs) = patch.songs {
                SongRepo::replace_inner(&mut tx, party.id, songs).await?;
            }
        }

        tx.commit().await?;
        Ok(party)
    }

    /// Delete a party. Assignments and songs go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// IDs of the actors assigned to a party.
    pub async fn assigned_actor_ids(
        pool: &PgPool,
        party_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT actor_id FROM party_actors WHERE party_id = $1 ORDER BY actor_id",
        )
        .bind(party_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace actor assignments within an existing transaction.
    async fn set_actors_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        party_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM party_actors WHERE party_id = $1")
            .bind(party_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO party_actors (party_id, actor_id)
             SELECT $1, UNNEST($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(party_id)
        .bind(actor_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
