//! Page-level access control.
//!
//! Each protected resource is gated by one page-access capability. The gate
//! covers every verb on the resource; there is no per-verb split once the
//! page is open. Lists and the dashboard react differently to a closed gate:
//! lists come back empty, the dashboard is refused.

use crate::capabilities::Capability;
use crate::error::CoreError;
use crate::principal::Principal;
use crate::types::DbId;

/// A resource guarded by a page-access capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Actors,
    Parties,
}

impl Resource {
    /// Capability that opens this resource for an actor.
    pub fn gate(self) -> Capability {
        match self {
            Resource::Actors => Capability::AccessActors,
            Resource::Parties => Capability::AccessParties,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Actors => "actors",
            Resource::Parties => "parties",
        }
    }
}

/// What a list query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Apply the caller's filters to the full table.
    Everything,
    /// Return an empty list without touching the store.
    Nothing,
}

/// Which dashboard statistics the caller receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    /// Global statistics over every actor and party.
    Global,
    /// Statistics over the parties this actor is assigned to. When
    /// `include_parties` is false every figure is zero.
    Actor {
        actor_id: DbId,
        include_parties: bool,
    },
}

/// Whether `principal` may use `resource` at all.
pub fn can_access(principal: &Principal, resource: Resource) -> bool {
    match principal.actor() {
        None => true,
        Some(actor) => actor.can(resource.gate()),
    }
}

/// Like [`can_access`] but yields a `Forbidden` error for closed gates.
pub fn require_access(principal: &Principal, resource: Resource) -> Result<(), CoreError> {
    if can_access(principal, resource) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You don't have access to the {} page",
            resource.name()
        )))
    }
}

/// List endpoints degrade to an empty result instead of refusing.
pub fn list_scope(principal: &Principal, resource: Resource) -> ListScope {
    if can_access(principal, resource) {
        ListScope::Everything
    } else {
        ListScope::Nothing
    }
}

/// Resolve the dashboard variant for `principal`.
///
/// Non-staff actors without `AccessDashboard` are refused. Staff-equivalent
/// principals get the global variant, everyone else the actor variant.
pub fn dashboard_scope(principal: &Principal) -> Result<DashboardScope, CoreError> {
    match principal {
        Principal::SuperAdmin { .. } => Ok(DashboardScope::Global),
        Principal::Actor { is_staff: true, .. } => Ok(DashboardScope::Global),
        Principal::Actor { access, .. } => {
            if !access.can(Capability::AccessDashboard) {
                return Err(CoreError::Forbidden(
                    "You don't have access to the dashboard".into(),
                ));
            }
            Ok(DashboardScope::Actor {
                actor_id: access.actor_id,
                include_parties: access.can(Capability::AccessParties),
            })
        }
    }
}

/// Whether `principal` may list the parties of actor `target`.
///
/// Actors may always look at their own parties; looking at somebody else's
/// requires `ViewAllActors` or `ManageActors`.
pub fn can_view_actor_parties(principal: &Principal, target: DbId) -> bool {
    match principal.actor() {
        None => true,
        Some(actor) => {
            actor.actor_id == target
                || actor.can(Capability::ViewAllActors)
                || actor.can(Capability::ManageActors)
        }
    }
}
