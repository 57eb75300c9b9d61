//! Runtime god state and its status ledger operations.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Element, GodId};

use super::status::{StatusEntry, StatusKind};

/// A temporary replacement for a god's natural weakness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaknessOverride {
    /// The element the god is weak to while the override holds.
    pub element: Element,
    /// Remaining EndTurn ticks; `None` is permanent.
    pub remaining: Option<u32>,
}

/// Runtime state of one god.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodState {
    /// Template id; element, max health and natural weakness live on the
    /// [`GodCard`](crate::cards::GodCard) in the catalog.
    pub god: GodId,
    /// Current health, clamped to `0..=max_health`.
    pub health: i32,
    /// Ordered status ledger, at most one entry per kind.
    pub statuses: Vector<StatusEntry>,
    /// Set the instant health reaches zero. Dead gods take no further part
    /// in the match unless resurrected.
    pub dead: bool,
    /// Temporary weakness replacing the natural one while present.
    pub weakness_override: Option<WeaknessOverride>,
    /// Set when a resurrection effect brought this god back.
    pub zombie: bool,
}

impl GodState {
    /// Create a fresh god at full health.
    #[must_use]
    pub fn new(god: GodId, max_health: i32) -> Self {
        Self {
            god,
            health: max_health,
            statuses: Vector::new(),
            dead: false,
            weakness_override: None,
            zombie: false,
        }
    }

    /// Whether the god is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Get the status entry of a kind, if present.
    #[must_use]
    pub fn status(&self, kind: StatusKind) -> Option<&StatusEntry> {
        self.statuses.iter().find(|s| s.kind == kind)
    }

    /// Whether the god carries a status of this kind.
    #[must_use]
    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status(kind).is_some()
    }

    /// Stack count for a kind, zero when absent.
    #[must_use]
    pub fn status_stacks(&self, kind: StatusKind) -> i32 {
        self.status(kind).map_or(0, |s| s.stacks)
    }

    /// Apply a status: accumulate onto an existing entry or append a new
    /// one at the end of the ledger.
    pub fn apply_status(&mut self, kind: StatusKind, stacks: i32, remaining: Option<u32>) {
        if let Some(entry) = self.statuses.iter_mut().find(|s| s.kind == kind) {
            entry.merge(stacks, remaining);
            return;
        }
        self.statuses.push_back(StatusEntry::new(kind, stacks, remaining));
    }

    /// Remove the entry of a kind. Returns true if one was present.
    pub fn remove_status(&mut self, kind: StatusKind) -> bool {
        let before = self.statuses.len();
        self.statuses.retain(|s| s.kind != kind);
        self.statuses.len() != before
    }

    /// Absorb incoming damage with shield stacks.
    ///
    /// Returns the amount absorbed; the shield entry is dropped the moment
    /// it reaches zero stacks.
    pub fn absorb_with_shield(&mut self, damage: i32) -> i32 {
        let shield = self.status_stacks(StatusKind::Shield);
        if shield == 0 || damage <= 0 {
            return 0;
        }

        let absorbed = shield.min(damage);
        if absorbed == shield {
            self.remove_status(StatusKind::Shield);
        } else if let Some(entry) = self
            .statuses
            .iter_mut()
            .find(|s| s.kind == StatusKind::Shield)
        {
            entry.stacks -= absorbed;
        }
        absorbed
    }

    /// Tick every duration-bound status and the weakness override, purging
    /// whatever expired.
    pub fn tick_statuses(&mut self) {
        let mut expired = Vec::new();
        for entry in self.statuses.iter_mut() {
            if entry.tick() {
                expired.push(entry.kind);
            }
        }
        if !expired.is_empty() {
            self.statuses.retain(|s| !expired.contains(&s.kind));
        }

        if let Some(over) = &mut self.weakness_override {
            if let Some(left) = over.remaining {
                let left = left.saturating_sub(1);
                if left == 0 {
                    self.weakness_override = None;
                } else {
                    over.remaining = Some(left);
                }
            }
        }
    }

    /// Wipe the ledger and the weakness override. Used on resurrection.
    pub fn clear_statuses(&mut self) {
        self.statuses = Vector::new();
        self.weakness_override = None;
    }
}
