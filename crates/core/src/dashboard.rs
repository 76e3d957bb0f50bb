//! Dashboard statistics.
//!
//! The store supplies slim party summaries and per-actor assignment counts;
//! this module turns them into the two dashboard shapes. Grouping and ordering
//! happen here so the output does not depend on database collation or the
//! order rows come back in.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::status::PartyStatus;
use crate::types::DbId;

/// Number of entries in the top-actors ranking.
pub const TOP_ACTORS_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The fields of a party the dashboard looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartySummary {
    pub date: NaiveDate,
    pub status: PartyStatus,
}

/// How many parties an actor is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorPartyCount {
    pub actor_id: DbId,
    pub name: String,
    pub family: String,
    pub party_count: i64,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopActor {
    pub name: String,
    pub family: String,
    pub party_count: i64,
}

/// Party count for one calendar month. `month` is the first day of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyActivity {
    pub month: NaiveDate,
    pub parties: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: PartyStatus,
    pub count: i64,
}

/// Global statistics for staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_actors: i64,
    pub total_parties: i64,
    pub upcoming_parties: i64,
    pub completed_parties: i64,
    pub top_actors: Vec<TopActor>,
    pub monthly_activity: Vec<MonthlyActivity>,
    pub status_distribution: Vec<StatusCount>,
}

/// Statistics over one actor's assigned parties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActorStats {
    pub my_total_parties: i64,
    pub my_upcoming_parties: i64,
    pub my_completed_parties: i64,
    pub monthly_activity: Vec<MonthlyActivity>,
    pub status_distribution: Vec<StatusCount>,
}

/// Either dashboard shape. Serialized without a tag so each variant keeps its
/// own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Admin(AdminStats),
    Actor(ActorStats),
}

impl ActorStats {
    /// All-zero statistics for an actor whose parties page is closed.
    pub fn empty() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

fn count_where(parties: &[PartySummary], pred: impl Fn(&PartySummary) -> bool) -> i64 {
    parties.iter().filter(|p| pred(p)).count() as i64
}

/// Parties dated today or later that are still pending or in progress.
pub fn count_upcoming(parties: &[PartySummary], today: NaiveDate) -> i64 {
    count_where(parties, |p| p.date >= today && p.status.is_upcoming())
}

/// Parties with status `done`, regardless of date.
pub fn count_completed(parties: &[PartySummary]) -> i64 {
    count_where(parties, |p| p.status == PartyStatus::Done)
}

/// Bucket parties by (year, month) of their event date, oldest first.
///
/// Months without parties are left out.
pub fn monthly_activity(parties: &[PartySummary]) -> Vec<MonthlyActivity> {
    let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for party in parties {
        *buckets
            .entry((party.date.year(), party.date.month()))
            .or_default() += 1;
    }

    buckets
        .into_iter()
        .filter_map(|((year, month), parties)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|month| MonthlyActivity { month, parties })
        })
        .collect()
}

/// Count parties per status, ordered by the stored status label.
pub fn status_distribution(parties: &[PartySummary]) -> Vec<StatusCount> {
    let mut counts: BTreeMap<&'static str, (PartyStatus, i64)> = BTreeMap::new();
    for party in parties {
        counts
            .entry(party.status.as_str())
            .or_insert((party.status, 0))
            .1 += 1;
    }

    counts
        .into_values()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

fn rank_order(a: &ActorPartyCount, b: &ActorPartyCount) -> Ordering {
    b.party_count
        .cmp(&a.party_count)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.family.cmp(&b.family))
        .then_with(|| a.actor_id.cmp(&b.actor_id))
}

/// The `limit` actors with the most assigned parties.
///
/// Ties are broken by name, then family name, then id, all ascending.
pub fn rank_top_actors(mut counts: Vec<ActorPartyCount>, limit: usize) -> Vec<TopActor> {
    counts.sort_by(rank_order);
    counts
        .into_iter()
        .take(limit)
        .map(|c| TopActor {
            name: c.name,
            family: c.family,
            party_count: c.party_count,
        })
        .collect()
}

/// Build the global statistics.
pub fn admin_stats(
    total_actors: i64,
    parties: &[PartySummary],
    actor_counts: Vec<ActorPartyCount>,
    today: NaiveDate,
) -> AdminStats {
    AdminStats {
        total_actors,
        total_parties: parties.len() as i64,
        upcoming_parties: count_upcoming(parties, today),
        completed_parties: count_completed(parties),
        top_actors: rank_top_actors(actor_counts, TOP_ACTORS_LIMIT),
        monthly_activity: monthly_activity(parties),
        status_distribution: status_distribution(parties),
    }
}

/// Build the statistics for one actor from that actor's parties.
pub fn actor_stats(parties: &[PartySummary], today: NaiveDate) -> ActorStats {
    ActorStats {
        my_total_parties: parties.len() as i64,
        my_upcoming_parties: count_upcoming(parties, today),
        my_completed_parties: count_completed(parties),
        monthly_activity: monthly_activity(parties),
        status_distribution: status_distribution(parties),
    }
}
