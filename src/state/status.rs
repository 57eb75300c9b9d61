//! Status ledger entries.
//!
//! A god carries at most one [`StatusEntry`] per [`StatusKind`]. Re-applying
//! a status accumulates stacks; a supplied duration refreshes the remaining
//! turns. Duration-bound entries tick once per EndTurn across every god of
//! both players and are purged when they reach zero.

use serde::{Deserialize, Serialize};

/// The status effects observed by the rules engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Absorbs damage before health, one point per stack.
    Shield,
    /// Damages the bearer whenever the bearer casts, one point per stack.
    Poison,
    /// Chargeable stacks, detonated later for bonus damage.
    Lightning,
    /// The bearer cannot cast.
    Stun,
    /// The bearer is the forced target of single-target enemy attacks.
    Provocation,
    /// Suppresses the weakness multiplier against the bearer.
    WeaknessImmunity,
}

/// One stacked, optionally duration-bound status on a god.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Which status this is.
    pub kind: StatusKind,
    /// Stack count (intensity). Always positive while the entry exists.
    pub stacks: i32,
    /// Remaining EndTurn ticks; `None` is permanent.
    pub remaining: Option<u32>,
}

impl StatusEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(kind: StatusKind, stacks: i32, remaining: Option<u32>) -> Self {
        Self {
            kind,
            stacks,
            remaining,
        }
    }

    /// Merge a re-application into this entry: stacks accumulate and a
    /// supplied duration refreshes the clock.
    pub fn merge(&mut self, stacks: i32, remaining: Option<u32>) {
        self.stacks += stacks;
        if remaining.is_some() {
            self.remaining = remaining;
        }
    }

    /// Tick one EndTurn. Returns true when the entry has expired.
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left.saturating_sub(1);
                self.remaining = Some(left);
                left == 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates_stacks() {
        let mut entry = StatusEntry::new(StatusKind::Poison, 2, None);
        entry.merge(3, None);
        assert_eq!(entry.stacks, 5);
        assert_eq!(entry.remaining, None);
    }

    #[test]
    fn test_merge_refreshes_duration() {
        let mut entry = StatusEntry::new(StatusKind::Stun, 1, Some(1));
        entry.merge(0, Some(2));
        assert_eq!(entry.remaining, Some(2));

        // No duration supplied: the clock is untouched.
        entry.merge(1, None);
        assert_eq!(entry.remaining, Some(2));
    }

    #[test]
    fn test_tick() {
        let mut entry = StatusEntry::new(StatusKind::WeaknessImmunity, 1, Some(2));
        assert!(!entry.tick());
        assert!(entry.tick());

        let mut permanent = StatusEntry::new(StatusKind::Shield, 3, None);
        for _ in 0..10 {
            assert!(!permanent.tick());
        }
    }
}
