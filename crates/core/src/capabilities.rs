//! Actor permission flags lifted into a typed capability set.
//!
//! The store keeps one boolean column per flag; everything above the store
//! works with [`CapabilitySet`] so checks are exhaustive over [`Capability`].

use serde::{Deserialize, Serialize};

/// A single permission an actor may hold.
///
/// The first five are data-scope capabilities (what records the actor may see
/// or change); the last four gate whole pages/resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewUpcomingParties,
    ViewCompletedParties,
    ViewAllActors,
    ManageParties,
    ManageActors,
    AccessDashboard,
    AccessActors,
    AccessParties,
    AccessSchedule,
}

impl Capability {
    /// Every capability, in column order.
    pub const ALL: [Capability; 9] = [
        Capability::ViewUpcomingParties,
        Capability::ViewCompletedParties,
        Capability::ViewAllActors,
        Capability::ManageParties,
        Capability::ManageActors,
        Capability::AccessDashboard,
        Capability::AccessActors,
        Capability::AccessParties,
        Capability::AccessSchedule,
    ];

    /// Whether a newly created actor holds this capability when the flag is
    /// not supplied.
    pub fn granted_by_default(self) -> bool {
        matches!(
            self,
            Capability::ViewUpcomingParties
                | Capability::ViewCompletedParties
                | Capability::AccessDashboard
        )
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of [`Capability`] values backed by a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CapabilitySet(u16);

impl CapabilitySet {
    /// The set holding no capability at all.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set a new actor receives when no flag is supplied.
    pub fn defaults() -> Self {
        Self::from_predicate(Capability::granted_by_default)
    }

    /// Every capability.
    pub fn all() -> Self {
        Self::from_predicate(|_| true)
    }

    /// Build a set by asking `granted` about each capability.
    pub fn from_predicate(granted: impl Fn(Capability) -> bool) -> Self {
        Capability::ALL
            .into_iter()
            .filter(|cap| granted(*cap))
            .collect()
    }

    pub fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    pub fn insert(&mut self, cap: Capability) {
        self.0 |= cap.bit();
    }

    pub fn remove(&mut self, cap: Capability) {
        self.0 &= !cap.bit();
    }

    /// Grant or revoke `cap` depending on `granted`.
    pub fn set(&mut self, cap: Capability, granted: bool) {
        if granted {
            self.insert(cap);
        } else {
            self.remove(cap);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, cap: Capability) -> Self {
        self.insert(cap);
        self
    }

    /// Builder-style [`remove`](Self::remove).
    pub fn without(mut self, cap: Capability) -> Self {
        self.remove(cap);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the held capabilities in column order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |cap| self.contains(*cap))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = CapabilitySet::empty();
        for cap in iter {
            set.insert(cap);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_actor_flags() {
        let set = CapabilitySet::defaults();
        let held: Vec<_> = set.iter().collect();
        assert_eq!(
            held,
            vec![
                Capability::ViewUpcomingParties,
                Capability::ViewCompletedParties,
                Capability::AccessDashboard,
            ]
        );
    }

    #[test]
    fn insert_and_remove_toggle_single_bit() {
        let mut set = CapabilitySet::empty();
        set.insert(Capability::ManageParties);
        assert!(set.contains(Capability::ManageParties));
        assert!(!set.contains(Capability::ManageActors));

        set.remove(Capability::ManageParties);
        assert!(set.is_empty());
    }

    #[test]
    fn set_follows_flag_value() {
        let mut set = CapabilitySet::all();
        set.set(Capability::AccessSchedule, false);
        assert!(!set.contains(Capability::AccessSchedule));
        assert_eq!(set.iter().count(), Capability::ALL.len() - 1);

        set.set(Capability::AccessSchedule, true);
        assert_eq!(set, CapabilitySet::all());
    }

    #[test]
    fn every_capability_owns_a_distinct_bit() {
        let all: CapabilitySet = Capability::ALL.into_iter().collect();
        assert_eq!(all, CapabilitySet::all());
        assert_eq!(all.iter().count(), Capability::ALL.len());
    }

    #[test]
    fn capability_serializes_snake_case() {
        let json = serde_json::to_string(&Capability::ViewCompletedParties).unwrap();
        assert_eq!(json, "\"view_completed_parties\"");
    }
}
