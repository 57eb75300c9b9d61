//! The inbound action surface and its outcomes.
//!
//! A match advances one [`Action`] at a time. Every submission produces an
//! [`ActionOutcome`] — expected rule violations are reported there and never
//! panic. Custom effects that pause for an external decision describe what
//! they need with a [`ChoiceSpec`] and are completed with a [`Choice`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::element::Element;
use super::ids::{CardId, GodId};

/// How a lightning-toggle card should behave this cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightningMode {
    /// Add a lightning stack to the target.
    Charge,
    /// Detonate the target's stacks for bonus damage.
    Detonate,
}

/// One discrete player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand.
    PlayCard {
        /// The card to play.
        card: CardId,
        /// Primary target, used when the card has a single targeted effect.
        target: Option<GodId>,
        /// Ordered target list for cards addressing several single-target
        /// effects. When non-empty it takes precedence over `target`.
        targets: SmallVec<[GodId; 2]>,
        /// Charge-or-detonate selector for lightning-toggle cards.
        lightning: Option<LightningMode>,
        /// Element pick for chosen-weakness cards; omitting it leaves the
        /// effect awaiting a choice.
        element: Option<Element>,
    },
    /// Discard a card for energy. The first discard of a turn pays out.
    DiscardForEnergy { card: CardId },
    /// End the current player's turn.
    EndTurn,
}

impl Action {
    /// Play a card with no targets.
    #[must_use]
    pub fn play(card: CardId) -> Self {
        Action::PlayCard {
            card,
            target: None,
            targets: SmallVec::new(),
            lightning: None,
            element: None,
        }
    }

    /// Play a card at a single target.
    #[must_use]
    pub fn play_at(card: CardId, target: GodId) -> Self {
        Action::PlayCard {
            card,
            target: Some(target),
            targets: SmallVec::new(),
            lightning: None,
            element: None,
        }
    }

    /// Play a card addressing several single-target effects in order.
    #[must_use]
    pub fn play_at_many(card: CardId, targets: &[GodId]) -> Self {
        Action::PlayCard {
            card,
            target: targets.first().copied(),
            targets: SmallVec::from_slice(targets),
            lightning: None,
            element: None,
        }
    }
}

/// Result of submitting an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the action was accepted and applied.
    pub success: bool,
    /// Human-readable reason or confirmation.
    pub message: String,
}

impl ActionOutcome {
    /// An accepted action.
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A rejected action. The match state is unchanged.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// What a paused custom effect is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceSpec {
    /// Pick up to `count` cards from the caster's discard pile.
    PickDiscardCards { count: u32 },
    /// Pick an element.
    PickElement,
    /// Split `amount` healing among living allied gods.
    DistributeHealing { amount: i32 },
    /// Pick up to `count` cards from the opposing hand.
    PickOpposingHandCards { count: u32 },
}

/// The completion value for a paused custom effect.
///
/// Must match the shape of the pending [`ChoiceSpec`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    /// Cards picked from the caster's discard pile.
    DiscardCards(Vec<CardId>),
    /// The chosen element.
    Element(Element),
    /// Healing split as (god, amount) pairs.
    Healing(Vec<(GodId, i32)>),
    /// Cards picked from the opposing hand.
    OpposingHandCards(Vec<CardId>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_constructors() {
        let a = Action::play_at(CardId::new(1), GodId::new(2));
        match a {
            Action::PlayCard { card, target, targets, .. } => {
                assert_eq!(card, CardId::new(1));
                assert_eq!(target, Some(GodId::new(2)));
                assert!(targets.is_empty());
            }
            _ => panic!("expected PlayCard"),
        }

        let b = Action::play_at_many(CardId::new(1), &[GodId::new(2), GodId::new(3)]);
        match b {
            Action::PlayCard { target, targets, .. } => {
                assert_eq!(target, Some(GodId::new(2)));
                assert_eq!(targets.len(), 2);
            }
            _ => panic!("expected PlayCard"),
        }
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = ActionOutcome::accepted("played");
        assert!(ok.success);
        let no = ActionOutcome::rejected("card not in hand");
        assert!(!no.success);
        assert_eq!(no.message, "card not in hand");
    }

    #[test]
    fn test_action_serialization() {
        let a = Action::play_at_many(CardId::new(9), &[GodId::new(1)]);
        let json = serde_json::to_string(&a).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn test_choice_serialization() {
        let c = Choice::Healing(vec![(GodId::new(1), 2), (GodId::new(2), 1)]);
        let json = serde_json::to_string(&c).unwrap();
        let back: Choice = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
