//! Effect descriptors carried by spell cards.
//!
//! A spell is an ORDERED list of [`EffectSpec`]s; the resolver walks them
//! strictly in list order. Each spec pairs an [`EffectKind`] with an
//! optional [`TargetKind`]; a spec without a target inherits the previous
//! effect's resolved single target within the same card.

use serde::{Deserialize, Serialize};

use crate::state::StatusKind;

/// Who an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// One living enemy god, chosen by the action's target ids.
    EnemyGod,
    /// One living allied god.
    AllyGod,
    /// One living god on either side.
    AnyGod,
    /// Every living enemy god.
    AllEnemies,
    /// Every living allied god.
    AllAllies,
    /// The casting god.
    Self_,
    /// One dead allied god (resurrection).
    DeadAllyGod,
    /// Every living god on both sides.
    AllGods,
}

impl TargetKind {
    /// Whether this kind resolves against a whole group, ignoring the
    /// action's target ids.
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(
            self,
            TargetKind::AllEnemies | TargetKind::AllAllies | TargetKind::Self_ | TargetKind::AllGods
        )
    }

    /// Whether this kind consumes one id from the action's target list.
    #[must_use]
    pub fn is_single(self) -> bool {
        !self.is_group()
    }
}

/// Identifier of a god-specific custom mechanic.
///
/// Keys the handler table in
/// [`CustomRegistry`](crate::effects::CustomRegistry).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomEffectId(String);

impl CustomEffectId {
    /// Create a custom effect id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomEffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an effect does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Deal damage, subject to the weakness multiplier and shields.
    Damage { amount: i32 },
    /// Strip poison and restore health, each up to `amount`.
    Heal { amount: i32 },
    /// Add shield stacks.
    Shield { amount: i32 },
    /// Apply a status.
    Status {
        status: StatusKind,
        stacks: i32,
        duration: Option<u32>,
    },
    /// Remove a status.
    RemoveStatus { status: StatusKind },
    /// Adjust the caster's energy pool.
    Energy { amount: i32 },
    /// Draw cards from the caster's deck.
    Draw { count: u32 },
    /// Move cards from the opponent's deck to their discard.
    Mill { count: u32 },
    /// Discard random cards from the opposing hand.
    Discard { count: u32 },
    /// Dispatch a god-specific handler with a numeric value.
    Custom { id: CustomEffectId, value: i32 },
}

/// One entry of a spell's ordered effect list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// What happens.
    pub kind: EffectKind,
    /// Who it happens to; `None` inherits the previous resolved target.
    pub target: Option<TargetKind>,
}

impl EffectSpec {
    /// Create a spec with no target kind.
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self { kind, target: None }
    }

    /// Attach a target kind.
    #[must_use]
    pub fn at(mut self, target: TargetKind) -> Self {
        self.target = Some(target);
        self
    }

    /// Damage effect.
    #[must_use]
    pub fn damage(amount: i32) -> Self {
        Self::new(EffectKind::Damage { amount })
    }

    /// Heal effect.
    #[must_use]
    pub fn heal(amount: i32) -> Self {
        Self::new(EffectKind::Heal { amount })
    }

    /// Shield effect.
    #[must_use]
    pub fn shield(amount: i32) -> Self {
        Self::new(EffectKind::Shield { amount })
    }

    /// Status effect.
    #[must_use]
    pub fn status(status: StatusKind, stacks: i32, duration: Option<u32>) -> Self {
        Self::new(EffectKind::Status {
            status,
            stacks,
            duration,
        })
    }

    /// Remove-status effect.
    #[must_use]
    pub fn remove_status(status: StatusKind) -> Self {
        Self::new(EffectKind::RemoveStatus { status })
    }

    /// Energy effect.
    #[must_use]
    pub fn energy(amount: i32) -> Self {
        Self::new(EffectKind::Energy { amount })
    }

    /// Draw effect.
    #[must_use]
    pub fn draw(count: u32) -> Self {
        Self::new(EffectKind::Draw { count })
    }

    /// Mill effect.
    #[must_use]
    pub fn mill(count: u32) -> Self {
        Self::new(EffectKind::Mill { count })
    }

    /// Random-discard effect.
    #[must_use]
    pub fn discard(count: u32) -> Self {
        Self::new(EffectKind::Discard { count })
    }

    /// Custom effect.
    #[must_use]
    pub fn custom(id: impl Into<String>, value: i32) -> Self {
        Self::new(EffectKind::Custom {
            id: CustomEffectId::new(id),
            value,
        })
    }
}
