//! The authenticated identity behind a request.

use crate::capabilities::{Capability, CapabilitySet};
use crate::types::DbId;

/// Permission-relevant view of an actor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorAccess {
    pub actor_id: DbId,
    pub capabilities: CapabilitySet,
}

impl ActorAccess {
    pub fn new(actor_id: DbId, capabilities: CapabilitySet) -> Self {
        Self {
            actor_id,
            capabilities,
        }
    }

    pub fn can(&self, cap: Capability) -> bool {
        self.capabilities.contains(cap)
    }
}

/// Who is making a request.
///
/// A user without an actor profile is the initial superadmin and passes every
/// access check. This is an explicit trust grant: creating a user row with no
/// actor attached hands out full access, so only the bootstrap path does it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    SuperAdmin {
        user_id: DbId,
    },
    Actor {
        user_id: DbId,
        /// Staff users see the global dashboard and bypass its page flag.
        is_staff: bool,
        access: ActorAccess,
    },
}

impl Principal {
    pub fn user_id(&self) -> DbId {
        match self {
            Principal::SuperAdmin { user_id } | Principal::Actor { user_id, .. } => *user_id,
        }
    }

    /// The actor profile, or `None` for the superadmin.
    pub fn actor(&self) -> Option<&ActorAccess> {
        match self {
            Principal::SuperAdmin { .. } => None,
            Principal::Actor { access, .. } => Some(access),
        }
    }

    /// Superadmins and staff-flagged users.
    pub fn is_staff_equivalent(&self) -> bool {
        match self {
            Principal::SuperAdmin { .. } => true,
            Principal::Actor { is_staff, .. } => *is_staff,
        }
    }
}
