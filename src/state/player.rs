//! Per-player runtime state.
//!
//! Hand, deck and discard are `im` persistent sequences so that snapshot
//! clones of the whole match share structure instead of deep-copying.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{CardId, GodId, PlayerId};

use super::god::GodState;

/// Runtime state of one side of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Which player this is.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Up to four gods, in roster order. Order is fixed for the match.
    pub gods: Vec<GodState>,
    /// Cards in hand.
    pub hand: Vector<CardId>,
    /// Cards in the deck; the top of the deck is the back of the sequence.
    pub deck: Vector<CardId>,
    /// Discard pile, oldest first.
    pub discard: Vector<CardId>,
    /// Energy pool. Never negative.
    pub energy: i32,
    /// Deck-recycle counter; each recycle costs every living god this much
    /// health.
    pub fatigue: u32,
    /// Set once a card has been played this turn.
    pub played_card: bool,
    /// Set once a card has been discarded for energy this turn.
    pub discarded_for_energy: bool,
    /// Hand cards whose identity is hidden from this player (blind redraw).
    pub hidden_cards: ImHashSet<CardId>,
    /// Hand cards whose identity has been revealed to the opponent.
    pub revealed_cards: ImHashSet<CardId>,
}

impl PlayerState {
    /// Create a player with an empty board; gods and deck are filled in by
    /// match construction.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gods: Vec::new(),
            hand: Vector::new(),
            deck: Vector::new(),
            discard: Vector::new(),
            energy: 0,
            fatigue: 0,
            played_card: false,
            discarded_for_energy: false,
            hidden_cards: ImHashSet::new(),
            revealed_cards: ImHashSet::new(),
        }
    }

    /// Get a god's state by id.
    #[must_use]
    pub fn god(&self, god: GodId) -> Option<&GodState> {
        self.gods.iter().find(|g| g.god == god)
    }

    /// Get a god's state mutably by id.
    pub fn god_mut(&mut self, god: GodId) -> Option<&mut GodState> {
        self.gods.iter_mut().find(|g| g.god == god)
    }

    /// Whether this player controls a god with the given id.
    #[must_use]
    pub fn has_god(&self, god: GodId) -> bool {
        self.god(god).is_some()
    }

    /// Iterate over living gods in roster order.
    pub fn living_gods(&self) -> impl Iterator<Item = &GodState> {
        self.gods.iter().filter(|g| g.is_alive())
    }

    /// Whether any god is still alive.
    #[must_use]
    pub fn has_living_gods(&self) -> bool {
        self.gods.iter().any(|g| g.is_alive())
    }

    /// Whether a card is in hand.
    #[must_use]
    pub fn hand_contains(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Remove a card from hand. Returns true if it was present.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Move a card from hand to the top of the discard pile.
    ///
    /// Returns true if the card was in hand.
    pub fn discard_from_hand(&mut self, card: CardId) -> bool {
        if self.remove_from_hand(card) {
            self.discard.push_back(card);
            true
        } else {
            false
        }
    }

    /// Add energy, clamping the pool at zero from below.
    pub fn gain_energy(&mut self, amount: i32) {
        self.energy = (self.energy + amount).max(0);
    }

    /// Forget any blind-card bookkeeping for a card. Called when a card is
    /// drawn normally or leaves the hand.
    pub fn clear_card_visibility(&mut self, card: CardId) {
        self.hidden_cards.remove(&card);
        self.revealed_cards.remove(&card);
    }

    /// Reset the per-turn flags. Called for the newly active player only.
    pub fn reset_turn_flags(&mut self) {
        self.played_card = false;
        self.discarded_for_energy = false;
    }
}
