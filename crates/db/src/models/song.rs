//! Playlist entries attached to a party.

use serde::Serialize;
use sqlx::FromRow;
use troupe_core::types::DbId;

/// A row from the `songs` table. `sort_order` is exposed as `order`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Song {
    pub id: DbId,
    #[serde(skip)]
    pub party_id: DbId,
    pub title: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
}
