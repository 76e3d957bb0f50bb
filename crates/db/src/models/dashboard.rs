//! Slim rows feeding the dashboard aggregation in `troupe_core::dashboard`.

use chrono::NaiveDate;
use sqlx::FromRow;
use troupe_core::dashboard::{ActorPartyCount, PartySummary};
use troupe_core::status::PartyStatus;
use troupe_core::types::DbId;

#[derive(Debug, Clone, FromRow)]
pub struct PartySummaryRow {
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: PartyStatus,
}

impl From<PartySummaryRow> for PartySummary {
    fn from(row: PartySummaryRow) -> Self {
        PartySummary {
            date: row.date,
            status: row.status,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ActorPartyCountRow {
    pub actor_id: DbId,
    pub name: String,
    pub family: String,
    pub party_count: i64,
}

impl From<ActorPartyCountRow> for ActorPartyCount {
    fn from(row: ActorPartyCountRow) -> Self {
        ActorPartyCount {
            actor_id: row.actor_id,
            name: row.name,
            family: row.family,
            party_count: row.party_count,
        }
    }
}
