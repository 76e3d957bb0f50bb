//! Row-level party visibility.
//!
//! Decides whether an actor may read a given party from its capability flags,
//! the party status, and whether the actor is assigned to it.

use crate::capabilities::Capability;
use crate::principal::{ActorAccess, Principal};
use crate::status::PartyStatus;
use crate::types::DbId;

/// Whether `actor` may see a party with the given status and assignments.
///
/// Rules, in order:
/// 1. `ManageParties` sees everything.
/// 2. Unassigned actors see nothing.
/// 3. Pending / in-progress parties need `ViewUpcomingParties`.
/// 4. Done parties need `ViewCompletedParties`.
/// 5. Cancelled parties are hidden.
pub fn is_party_visible(actor: &ActorAccess, status: PartyStatus, assigned: &[DbId]) -> bool {
    if actor.can(Capability::ManageParties) {
        return true;
    }

    if !assigned.contains(&actor.actor_id) {
        return false;
    }

    match status {
        PartyStatus::Pending | PartyStatus::InProgress => {
            actor.can(Capability::ViewUpcomingParties)
        }
        PartyStatus::Done => actor.can(Capability::ViewCompletedParties),
        PartyStatus::Cancelled => false,
    }
}

/// Visibility verdict for any principal. The superadmin sees every party.
pub fn is_visible_to(principal: &Principal, status: PartyStatus, assigned: &[DbId]) -> bool {
    match principal.actor() {
        None => true,
        Some(actor) => is_party_visible(actor, status, assigned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::CapabilitySet;

    const ACTOR: DbId = 10;

    fn actor_with(caps: CapabilitySet) -> ActorAccess {
        ActorAccess::new(ACTOR, caps)
    }

    fn viewer() -> ActorAccess {
        actor_with(
            CapabilitySet::empty()
                .with(Capability::ViewUpcomingParties)
                .with(Capability::ViewCompletedParties),
        )
    }

    #[test]
    fn manager_sees_every_status_without_assignment() {
        let manager = actor_with(CapabilitySet::empty().with(Capability::ManageParties));
        for status in PartyStatus::ALL {
            assert!(is_party_visible(&manager, status, &[]), "{status} should be visible");
            assert!(is_party_visible(&manager, status, &[99]));
        }
    }

    #[test]
    fn unassigned_actor_sees_nothing() {
        let actor = viewer();
        for status in PartyStatus::ALL {
            assert!(!is_party_visible(&actor, status, &[1, 2, 3]));
        }
    }

    #[test]
    fn upcoming_parties_follow_upcoming_flag() {
        let with_flag = viewer();
        let without_flag = actor_with(with_flag.capabilities.without(Capability::ViewUpcomingParties));

        for status in [PartyStatus::Pending, PartyStatus::InProgress] {
            assert!(is_party_visible(&with_flag, status, &[ACTOR]));
            assert!(!is_party_visible(&without_flag, status, &[ACTOR]));
        }
    }

    #[test]
    fn done_party_toggles_with_completed_flag_only() {
        let hidden = actor_with(viewer().capabilities.without(Capability::ViewCompletedParties));
        assert!(!is_party_visible(&hidden, PartyStatus::Done, &[ACTOR]));

        let mut caps = hidden.capabilities;
        caps.insert(Capability::ViewCompletedParties);
        let shown = actor_with(caps);
        assert!(is_party_visible(&shown, PartyStatus::Done, &[ACTOR]));
    }

    #[test]
    fn cancelled_is_hidden_even_when_assigned() {
        let actor = actor_with(
            CapabilitySet::all()
                .without(Capability::ManageParties),
        );
        assert!(!is_party_visible(&actor, PartyStatus::Cancelled, &[ACTOR]));
    }

    #[test]
    fn superadmin_sees_everything() {
        let principal = Principal::SuperAdmin { user_id: 1 };
        for status in PartyStatus::ALL {
            assert!(is_visible_to(&principal, status, &[]));
        }
    }

    #[test]
    fn actor_principal_delegates_to_actor_rules() {
        let principal = Principal::Actor {
            user_id: 2,
            is_staff: true,
            access: viewer(),
        };
        assert!(is_visible_to(&principal, PartyStatus::Pending, &[ACTOR]));
        assert!(!is_visible_to(&principal, PartyStatus::Pending, &[]));
    }
}
