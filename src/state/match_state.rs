//! The full match snapshot.
//!
//! `MatchState` is the sole observation surface of the engine: there is no
//! event stream, consumers diff snapshots. It is `Clone + Serialize` and
//! backed by persistent collections, so a snapshot copy is cheap and shares
//! structure with the live state.

use serde::{Deserialize, Serialize};

use crate::cards::CustomEffectId;
use crate::core::{CardId, ChoiceSpec, GodId, MatchId, PlayerId};

use super::player::PlayerState;

/// Whether the match is still accepting actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Playing,
    Finished,
}

/// A custom effect waiting for an external decision.
///
/// The cost is already paid and the card already discarded; nothing but
/// [`complete_choice`](crate::engine::MatchEngine::complete_choice) (or
/// surrender) can advance the match while this is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChoice {
    /// The player who must decide.
    pub player: PlayerId,
    /// The god that cast the paused card.
    pub caster_god: GodId,
    /// The paused card.
    pub card: CardId,
    /// Which custom effect paused.
    pub effect: CustomEffectId,
    /// The effect's numeric value, kept for completion.
    pub value: i32,
    /// Targets resolved before the pause, kept for completion.
    pub targets: Vec<GodId>,
    /// What is being asked.
    pub spec: ChoiceSpec,
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Match id assigned by the hosting layer.
    pub id: MatchId,
    /// Playing or finished.
    pub status: MatchStatus,
    /// Whose turn it is.
    pub active_player: PlayerId,
    /// Turn counter; increments each time play wraps back to player 0.
    pub turn_number: u32,
    /// Both sides, indexed by player.
    pub players: [PlayerState; 2],
    /// Set exactly once, when the match finishes.
    pub winner: Option<PlayerId>,
    /// A paused custom effect, if any.
    pub pending: Option<PendingChoice>,
}

impl MatchState {
    /// Create a playing match shell. Construction logic lives in
    /// [`MatchEngine::new`](crate::engine::MatchEngine::new).
    #[must_use]
    pub fn new(id: MatchId, players: [PlayerState; 2], starting_player: PlayerId) -> Self {
        Self {
            id,
            status: MatchStatus::Playing,
            active_player: starting_player,
            turn_number: 1,
            players,
            winner: None,
            pending: None,
        }
    }

    /// Get a player's state.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player.index()]
    }

    /// Get a player's state mutably.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player.index()]
    }

    /// Borrow a player and their opponent mutably at the same time.
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut PlayerState, &mut PlayerState) {
        let (first, second) = self.players.split_at_mut(1);
        if player.index() == 0 {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        }
    }

    /// Which player controls a god.
    #[must_use]
    pub fn owner_of(&self, god: GodId) -> Option<PlayerId> {
        for p in [PlayerId::FIRST, PlayerId::SECOND] {
            if self.player(p).has_god(god) {
                return Some(p);
            }
        }
        None
    }

    /// Whether the match is still in play.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == MatchStatus::Playing
    }

    /// Finish the match. The first winner sticks; later calls are no-ops.
    pub fn finish(&mut self, winner: PlayerId) {
        if self.status == MatchStatus::Finished {
            return;
        }
        self.status = MatchStatus::Finished;
        self.winner = Some(winner);
    }
}
