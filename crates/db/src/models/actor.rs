//! Actor profile model and DTOs.
//!
//! The nine `can_*` columns are the stored form of a
//! [`CapabilitySet`]; [`Actor::capabilities`] and [`PermissionFlags`]
//! convert between the two.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use troupe_core::capabilities::{Capability, CapabilitySet};
use troupe_core::principal::ActorAccess;
use troupe_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `actors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    #[serde(skip)]
    pub user_id: DbId,
    pub name: String,
    pub family: String,
    pub age: i32,
    pub role: String,
    pub can_view_upcoming_parties: bool,
    pub can_view_completed_parties: bool,
    pub can_view_all_actors: bool,
    pub can_manage_parties: bool,
    pub can_manage_actors: bool,
    pub can_access_dashboard: bool,
    pub can_access_actors: bool,
    pub can_access_parties: bool,
    pub can_access_schedule: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Actor {
    /// Value of the column backing `cap`.
    pub fn flag(&self, cap: Capability) -> bool {
        match cap {
            Capability::ViewUpcomingParties => self.can_view_upcoming_parties,
            Capability::ViewCompletedParties => self.can_view_completed_parties,
            Capability::ViewAllActors => self.can_view_all_actors,
            Capability::ManageParties => self.can_manage_parties,
            Capability::ManageActors => self.can_manage_actors,
            Capability::AccessDashboard => self.can_access_dashboard,
            Capability::AccessActors => self.can_access_actors,
            Capability::AccessParties => self.can_access_parties,
            Capability::AccessSchedule => self.can_access_schedule,
        }
    }

    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::from_predicate(|cap| self.flag(cap))
    }

    pub fn access(&self) -> ActorAccess {
        ActorAccess::new(self.id, self.capabilities())
    }
}

/// An actor joined with its login name and assignment count.
///
/// This is the shape returned by the actor endpoints and embedded in party
/// responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActorSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub actor: Actor,
    pub username: String,
    pub parties_count: i64,
}

/// Optional overrides for the nine capability flags, as sent by clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionFlags {
    pub can_view_upcoming_parties: Option<bool>,
    pub can_view_completed_parties: Option<bool>,
    pub can_view_all_actors: Option<bool>,
    pub can_manage_parties: Option<bool>,
    pub can_manage_actors: Option<bool>,
    pub can_access_dashboard: Option<bool>,
    pub can_access_actors: Option<bool>,
    pub can_access_parties: Option<bool>,
    pub can_access_schedule: Option<bool>,
}

impl PermissionFlags {
    pub fn get(&self, cap: Capability) -> Option<bool> {
        match cap {
            Capability::ViewUpcomingParties => self.can_view_upcoming_parties,
            Capability::ViewCompletedParties => self.can_view_completed_parties,
            Capability::ViewAllActors => self.can_view_all_actors,
            Capability::ManageParties => self.can_manage_parties,
            Capability::ManageActors => self.can_manage_actors,
            Capability::AccessDashboard => self.can_access_dashboard,
            Capability::AccessActors => self.can_access_actors,
            Capability::AccessParties => self.can_access_parties,
            Capability::AccessSchedule => self.can_access_schedule,
        }
    }

    /// Start from `base` and overwrite every flag that was supplied.
    pub fn apply_to(&self, base: CapabilitySet) -> CapabilitySet {
        let mut caps = base;
        for cap in Capability::ALL {
            if let Some(granted) = self.get(cap) {
                caps.set(cap, granted);
            }
        }
        caps
    }
}

/// DTO for inserting an actor profile alongside its user.
#[derive(Debug, Clone)]
pub struct CreateActor {
    pub name: String,
    pub family: String,
    pub age: i32,
    pub role: String,
    pub capabilities: CapabilitySet,
}

/// DTO for updating an actor. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActor {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub family: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub role: Option<String>,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}
