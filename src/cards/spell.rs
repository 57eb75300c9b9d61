//! Static spell card templates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardId, Element, GodId};

use super::effect::EffectSpec;

/// The three card archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Resource cards; the AI leans on these while energy is short.
    Generator,
    /// Offense cards.
    Competence,
    /// Support cards.
    Utility,
}

/// Immutable template for one spell card.
///
/// Every spell belongs to exactly one god; when that god dies the card is
/// purged from its owner's hand, deck and discard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCard {
    /// Unique id.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Element the card attacks with.
    pub element: Element,
    /// The god whose spellbook this card is part of.
    pub god: GodId,
    /// Archetype, used by AI tiering.
    pub archetype: Archetype,
    /// Energy cost to play.
    pub cost: i32,
    /// Energy refunded when played.
    pub gain: i32,
    /// Ordered effect list, resolved strictly front to back.
    pub effects: SmallVec<[EffectSpec; 4]>,
}

impl SpellCard {
    /// Create a spell with no effects; chain [`SpellCard::with_effect`].
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        element: Element,
        god: GodId,
        archetype: Archetype,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            god,
            archetype,
            cost: 0,
            gain: 0,
            effects: SmallVec::new(),
        }
    }

    /// Set the energy cost.
    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the energy gain.
    #[must_use]
    pub fn with_gain(mut self, gain: i32) -> Self {
        self.gain = gain;
        self
    }

    /// Append an effect to the ordered list.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::effect::TargetKind;

    #[test]
    fn test_builder_keeps_effect_order() {
        let card = SpellCard::new(
            CardId::new(1),
            "Pyre Lash",
            Element::Fire,
            GodId::new(1),
            Archetype::Competence,
        )
        .with_cost(2)
        .with_gain(1)
        .with_effect(EffectSpec::damage(3).at(TargetKind::EnemyGod))
        .with_effect(EffectSpec::draw(1));

        assert_eq!(card.cost, 2);
        assert_eq!(card.gain, 1);
        assert_eq!(card.effects.len(), 2);
        assert_eq!(card.effects[0].target, Some(TargetKind::EnemyGod));
    }

    #[test]
    fn test_spell_serde() {
        let card = SpellCard::new(
            CardId::new(2),
            "Gale",
            Element::Air,
            GodId::new(1),
            Archetype::Utility,
        )
        .with_effect(EffectSpec::shield(2).at(TargetKind::AllyGod));

        let json = serde_json::to_string(&card).unwrap();
        let back: SpellCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
