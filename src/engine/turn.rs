//! Turn switching, the hand-limit draw, deck recycling and status ticking.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{CardId, PlayerId};
use crate::effects::{check_victory, purge_dead_god_cards};

use super::MatchEngine;

impl MatchEngine {
    /// Switch the active player, reset the new active player's per-turn
    /// flags, bump the turn number when play wraps back to player 0, draw
    /// the new active player to the hand limit, then tick duration-bound
    /// statuses on every god of both players.
    pub(crate) fn advance_turn(&mut self) {
        if !self.state.is_playing() {
            return;
        }

        let next = self.state.active_player.opponent();
        self.state.active_player = next;
        self.state.player_mut(next).reset_turn_flags();
        if next == PlayerId::FIRST {
            self.state.turn_number += 1;
        }
        trace!(active = %next, turn = self.state.turn_number, "turn switched");

        self.draw_to_hand_limit(next);
        self.tick_all_statuses();
    }

    /// Draw a player up to the hand limit.
    ///
    /// A dead god's card found in the deck goes to discard instead of hand.
    /// An empty deck triggers exactly one recycle — fatigue up, every living
    /// god loses `fatigue` health, discard shuffled into the deck — before
    /// the draw retries; empty deck plus empty discard ends the draw.
    pub(crate) fn draw_to_hand_limit(&mut self, player: PlayerId) {
        let hand_limit = self.params.hand_limit;
        let catalog = Arc::clone(&self.catalog);
        let mut recycled = false;

        loop {
            let (hand_full, deck_empty, discard_empty) = {
                let p = self.state.player(player);
                (
                    p.hand.len() >= hand_limit,
                    p.deck.is_empty(),
                    p.discard.is_empty(),
                )
            };
            if hand_full {
                break;
            }
            if deck_empty {
                if recycled || discard_empty {
                    break;
                }
                self.recycle_deck(player);
                recycled = true;
                continue;
            }

            let Some(card) = self.state.player_mut(player).deck.pop_back() else {
                break;
            };
            let owner_dead = catalog
                .spell(card)
                .and_then(|s| self.state.player(player).god(s.god))
                .is_some_and(|g| g.dead);

            let p = self.state.player_mut(player);
            if owner_dead {
                p.discard.push_back(card);
            } else {
                p.clear_card_visibility(card);
                p.hand.push_back(card);
            }
        }
    }

    /// One deck recycle: fatigue up, attrition on every living god, then
    /// the discard pile shuffled in as the new deck.
    ///
    /// Fatigue is attrition, not an attack — it bypasses shields and the
    /// weakness multiplier, but deaths still purge and can finish the match.
    fn recycle_deck(&mut self, player: PlayerId) {
        let catalog = Arc::clone(&self.catalog);

        self.state.player_mut(player).fatigue += 1;
        let fatigue = self.state.player(player).fatigue as i32;
        debug!(%player, fatigue, "deck recycled");

        let living: Vec<_> = self
            .state
            .player(player)
            .living_gods()
            .map(|g| g.god)
            .collect();
        for god in living {
            let mut died = false;
            if let Some(god_state) = self.state.player_mut(player).god_mut(god) {
                god_state.health -= fatigue;
                if god_state.health <= 0 {
                    god_state.health = 0;
                    god_state.dead = true;
                    died = true;
                }
            }
            if died {
                debug!(%god, "god died to fatigue");
                purge_dead_god_cards(self.state.player_mut(player), &catalog, god);
                check_victory(&mut self.state);
            }
        }

        let mut cards: Vec<CardId> = {
            let p = self.state.player_mut(player);
            let cards = p.discard.iter().copied().collect();
            p.discard.clear();
            cards
        };
        self.rng.shuffle(&mut cards);
        self.state.player_mut(player).deck = cards.into_iter().collect();
    }

    /// Tick every duration-bound status and weakness override on all gods
    /// of both players, purging entries that reached zero.
    fn tick_all_statuses(&mut self) {
        for player in [PlayerId::FIRST, PlayerId::SECOND] {
            for god in self.state.player_mut(player).gods.iter_mut() {
                god.tick_statuses();
            }
        }
    }
}
