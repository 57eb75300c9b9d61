//! Match construction inputs and tunables.
//!
//! The hosting layer builds a [`MatchSetup`] from matchmaking data and hands
//! it to [`MatchEngine::new`](crate::engine::MatchEngine::new) together with
//! the content catalog. Malformed setups are rejected at that boundary with
//! a [`SetupError`]; nothing past construction panics on caller input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{CardId, GodId, MatchId, PlayerId};

/// Maximum gods per roster.
pub const MAX_ROSTER: usize = 4;

/// Tunable match parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchParams {
    /// Cards a player is drawn up to at the start of each of their turns.
    pub hand_limit: usize,
    /// Energy each player starts the match with.
    pub starting_energy: i32,
    /// Energy granted by the first discard of a turn.
    pub first_discard_bonus: i32,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            hand_limit: 5,
            starting_energy: 1,
            first_discard_bonus: 1,
        }
    }
}

/// One side's roster and deck.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Display name.
    pub name: String,
    /// 1 to 4 god ids.
    pub roster: Vec<GodId>,
    /// The deck, as card ids. Shuffled at construction.
    pub deck: Vec<CardId>,
}

impl PlayerSetup {
    /// Create a player setup.
    #[must_use]
    pub fn new(name: impl Into<String>, roster: Vec<GodId>, deck: Vec<CardId>) -> Self {
        Self {
            name: name.into(),
            roster,
            deck,
        }
    }
}

/// Everything needed to start a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSetup {
    /// Match id assigned by the hosting layer.
    pub id: MatchId,
    /// Both sides, indexed by player.
    pub players: [PlayerSetup; 2],
    /// Who takes the first turn.
    pub starting_player: PlayerId,
    /// Seed for the match RNG.
    pub seed: u64,
    /// Tunables; `MatchParams::default()` for standard play.
    pub params: MatchParams,
}

/// Rejection reasons for match construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{player} has an empty roster")]
    EmptyRoster { player: PlayerId },

    #[error("{player} has {count} gods; the limit is {MAX_ROSTER}")]
    RosterTooLarge { player: PlayerId, count: usize },

    #[error("{player} lists the same god twice: {god}")]
    DuplicateGod { player: PlayerId, god: GodId },

    #[error("unknown god {god} in {player}'s roster")]
    UnknownGod { player: PlayerId, god: GodId },

    #[error("unknown card {card} in {player}'s deck")]
    UnknownCard { player: PlayerId, card: CardId },

    #[error("card {card} in {player}'s deck belongs to a god outside the roster")]
    SpellWithoutGod { player: PlayerId, card: CardId },

    #[error("starting player {player} is not part of this match")]
    InvalidStartingPlayer { player: PlayerId },
}
