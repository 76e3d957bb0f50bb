//! Repository for the `songs` table.

use sqlx::PgPool;
use troupe_core::playlist::SequencedSong;
use troupe_core::types::DbId;

use crate::models::song::Song;

const COLUMNS: &str = "id, party_id, title, sort_order";

/// Playlist storage. Songs are only ever written as a whole list.
pub struct SongRepo;

impl SongRepo {
    /// Songs of one party in playlist order.
    pub async fn list_for_party(pool: &PgPool, party_id: DbId) -> Result<Vec<Song>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM songs WHERE party_id = $1 ORDER BY sort_order");
        sqlx::query_as::<_, Song>(&query)
            .bind(party_id)
            .fetch_all(pool)
            .await
    }

    /// Songs of several parties, grouped by party and in playlist order.
    pub async fn list_for_parties(
        pool: &PgPool,
        party_ids: &[DbId],
    ) -> Result<Vec<Song>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM songs WHERE party_id = ANY($1) ORDER BY party_id, sort_order"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(party_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace a party's playlist.
    ///
    /// Locks the party row first so concurrent replacements of the same
    /// playlist apply one after the other. Returns `None` if the party does
    /// not exist.
    pub async fn replace_for_party(
        pool: &PgPool,
        party_id: DbId,
        songs: &[SequencedSong],
    ) -> Result<Option<Vec<Song>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM parties WHERE id = $1 FOR UPDATE")
                .bind(party_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let stored = Self::replace_inner(&mut tx, party_id, songs).await?;
        tx.commit().await?;
        Ok(Some(stored))
    }

    /// Delete the current playlist and insert `songs` within an existing
    /// transaction. The caller must hold the party row lock.
    pub(crate) async fn replace_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        party_id: DbId,
        songs: &[SequencedSong],
    ) -> Result<Vec<Song>, sqlx::Error> {
        let removed = sqlx::query("DELETE FROM songs WHERE party_id = $1")
            .bind(party_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        let insert = format!(
            "INSERT INTO songs (party_id, title, sort_order) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let mut stored = Vec::with_capacity(songs.len());
        for song in songs {
            let row = sqlx::query_as::<_, Song>(&insert)
                .bind(party_id)
                .bind(&song.title)
                .bind(song.order)
                .fetch_one(&mut **tx)
                .await?;
            stored.push(row);
        }

        tracing::debug!(party_id, removed, inserted = stored.len(), "Replaced playlist");
        Ok(stored)
    }
}
