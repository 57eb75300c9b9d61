//! The match engine: the single entry point accepting actions.
//!
//! One [`MatchEngine`] value owns one match — state, catalog handle, custom
//! handler table and the match RNG. There are no ambient globals, so a
//! process can run any number of matches concurrently. The engine is a
//! synchronous transition function: one action in, one
//! [`ActionOutcome`] out, with the updated [`MatchState`] observable through
//! [`MatchEngine::state`].
//!
//! ## Determinism
//!
//! Two engines built from the same catalog and [`MatchSetup`] and fed the
//! identical action sequence reach bit-identical state. Keeping the action
//! order identical across copies is the transport layer's obligation.

mod turn;

use std::sync::Arc;

use tracing::debug;

use crate::cards::{CardCatalog, CustomEffectId, TargetKind};
use crate::core::{
    Action, ActionOutcome, CardId, Choice, Element, GodId, LightningMode, MatchParams, MatchRng,
    MatchRngState, MatchSetup, PlayerId, PlayerSetup, SetupError, MAX_ROSTER,
};
use crate::effects::{
    apply_damage, provoking_god, resolve_spell, CastContext, CustomHandler, CustomRegistry,
};
use crate::state::{GodState, MatchState, PlayerState, StatusKind};

/// Rules engine for one match.
pub struct MatchEngine {
    state: MatchState,
    catalog: Arc<CardCatalog>,
    customs: CustomRegistry,
    rng: MatchRng,
    params: MatchParams,
}

impl MatchEngine {
    /// Build a fresh match from two rosters and decks, performing each
    /// side's opening draw to the hand limit.
    ///
    /// Malformed setups (empty or oversized rosters, unknown ids, deck
    /// cards without a rostered god) are rejected here; nothing past
    /// construction returns an error.
    pub fn new(catalog: Arc<CardCatalog>, setup: MatchSetup) -> Result<Self, SetupError> {
        let MatchSetup {
            id,
            players: [first, second],
            starting_player,
            seed,
            params,
        } = setup;

        if starting_player.index() >= 2 {
            return Err(SetupError::InvalidStartingPlayer {
                player: starting_player,
            });
        }

        let mut rng = MatchRng::new(seed);
        let p0 = build_player(&catalog, PlayerId::FIRST, first, &params, &mut rng)?;
        let p1 = build_player(&catalog, PlayerId::SECOND, second, &params, &mut rng)?;

        let mut engine = Self {
            state: MatchState::new(id, [p0, p1], starting_player),
            catalog,
            customs: CustomRegistry::builtin(),
            rng,
            params,
        };

        engine.draw_to_hand_limit(PlayerId::FIRST);
        engine.draw_to_hand_limit(PlayerId::SECOND);

        debug!(id = %engine.state.id, "match created");
        Ok(engine)
    }

    /// The full match snapshot — the sole observation surface.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The content catalog this match reads from.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// The match tunables.
    #[must_use]
    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    /// Capture the RNG position for replay checkpointing.
    #[must_use]
    pub fn rng_state(&self) -> MatchRngState {
        self.rng.state()
    }

    /// Register an additional custom-effect handler. Content layers use
    /// this for mechanics beyond the built-in set.
    pub fn register_custom(&mut self, id: CustomEffectId, handler: CustomHandler) {
        self.customs.register(id, handler);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut MatchRng {
        &mut self.rng
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Submit one action for the active player.
    pub fn submit(&mut self, action: &Action) -> ActionOutcome {
        if !self.state.is_playing() {
            return ActionOutcome::rejected("the match is finished");
        }

        let outcome = match action {
            Action::PlayCard {
                card,
                target,
                targets,
                lightning,
                element,
            } => self.play_card(*card, *target, targets, *lightning, *element),
            Action::DiscardForEnergy { card } => self.discard_for_energy(*card),
            Action::EndTurn => self.end_turn(),
        };

        debug!(success = outcome.success, message = %outcome.message, "action submitted");
        outcome
    }

    /// Complete a paused custom effect with the missing decision.
    ///
    /// A rejected choice leaves the effect pending; a match stuck on an
    /// abandoned choice stays uncorrupted (cost paid, card discarded) and
    /// can still be ended by surrender.
    pub fn complete_choice(&mut self, choice: &Choice) -> ActionOutcome {
        if !self.state.is_playing() {
            return ActionOutcome::rejected("the match is finished");
        }
        let Some(pending) = self.state.pending.take() else {
            return ActionOutcome::rejected("no pending choice");
        };

        let complete = match self.customs.get(&pending.effect) {
            Some(handler) => handler.complete,
            None => None,
        };
        let Some(complete) = complete else {
            self.state.pending = Some(pending);
            return ActionOutcome::rejected("the pending effect cannot be completed");
        };

        let catalog = Arc::clone(&self.catalog);
        let outcome = complete(
            &mut self.state,
            &mut self.rng,
            &catalog,
            &self.params,
            &pending,
            choice,
        );
        if !outcome.success {
            self.state.pending = Some(pending);
        }
        outcome
    }

    /// Immediate terminal transition: the opponent wins. Requires no
    /// reconciliation of pending custom-effect state.
    pub fn surrender(&mut self, player: PlayerId) -> ActionOutcome {
        if !self.state.is_playing() {
            return ActionOutcome::rejected("the match is finished");
        }
        self.state.finish(player.opponent());
        debug!(%player, "surrendered");
        ActionOutcome::accepted(format!("{player} surrendered"))
    }

    fn play_card(
        &mut self,
        card: CardId,
        target: Option<GodId>,
        targets: &[GodId],
        lightning: Option<LightningMode>,
        element: Option<Element>,
    ) -> ActionOutcome {
        if self.state.pending.is_some() {
            return ActionOutcome::rejected("a choice is pending");
        }
        let player = self.state.active_player;
        if !self.state.player(player).hand_contains(card) {
            return ActionOutcome::rejected("card not in hand");
        }

        let catalog = Arc::clone(&self.catalog);
        let Some(spell) = catalog.spell(card) else {
            return ActionOutcome::rejected("unknown card");
        };

        {
            let p = self.state.player(player);
            let Some(god) = p.god(spell.god) else {
                return ActionOutcome::rejected("casting god is not in the roster");
            };
            if god.dead {
                return ActionOutcome::rejected("casting god is dead");
            }
            if god.has_status(StatusKind::Stun) {
                return ActionOutcome::rejected("casting god is stunned");
            }
            if p.played_card {
                return ActionOutcome::rejected("a card has already been played this turn");
            }
            if p.discarded_for_energy {
                return ActionOutcome::rejected("already discarded for energy this turn");
            }
            if p.energy < spell.cost {
                return ActionOutcome::rejected("insufficient energy");
            }
        }

        // Multi-target enemy cards must include a provoking god; the
        // single-target case is redirected during resolution instead.
        let single_enemy_effects = spell
            .effects
            .iter()
            .filter(|e| e.target == Some(TargetKind::EnemyGod))
            .count();
        if single_enemy_effects >= 2 {
            if let Some(provoker) = provoking_god(&self.state, player) {
                if !targets.contains(&provoker) {
                    return ActionOutcome::rejected("a provoking god must be among the targets");
                }
            }
        }

        // Poison detonates before the cost is paid.
        let caster_god = spell.god;
        let poison = self
            .state
            .player(player)
            .god(caster_god)
            .map_or(0, |g| g.status_stacks(StatusKind::Poison));
        if poison > 0 {
            apply_damage(&mut self.state, &catalog, None, caster_god, poison);
            let died = self
                .state
                .player(player)
                .god(caster_god)
                .map_or(true, |g| g.dead);
            if died {
                // The card still counts as played; the death purge has
                // already removed it from hand.
                self.state.player_mut(player).played_card = true;
                debug!(god = %caster_god, "caster died to poison mid-cast");
                self.advance_turn();
                return ActionOutcome::accepted("the casting god died to its poison; turn ended");
            }
        }

        {
            let p = self.state.player_mut(player);
            p.energy -= spell.cost;
            p.gain_energy(spell.gain);
        }

        let primary = target.or_else(|| targets.first().copied());
        let ctx = CastContext {
            catalog: &catalog,
            customs: &self.customs,
            hand_limit: self.params.hand_limit,
            caster: player,
            caster_god,
            spell,
            lightning,
            chosen_element: element,
        };
        resolve_spell(&mut self.state, &mut self.rng, &ctx, primary, targets);

        // The card moves to discard unless a mid-cast death purge already
        // removed it.
        {
            let p = self.state.player_mut(player);
            if p.discard_from_hand(card) {
                p.clear_card_visibility(card);
            }
            p.played_card = true;
        }

        ActionOutcome::accepted(format!("played {}", spell.name))
    }

    fn discard_for_energy(&mut self, card: CardId) -> ActionOutcome {
        if self.state.pending.is_some() {
            return ActionOutcome::rejected("a choice is pending");
        }
        let player = self.state.active_player;

        {
            let p = self.state.player(player);
            if p.played_card {
                return ActionOutcome::rejected("a card has already been played this turn");
            }
            if !p.hand_contains(card) {
                return ActionOutcome::rejected("card not in hand");
            }
        }

        let bonus = self.params.first_discard_bonus;
        let p = self.state.player_mut(player);
        p.discard_from_hand(card);
        p.clear_card_visibility(card);

        if p.discarded_for_energy {
            ActionOutcome::accepted("discarded")
        } else {
            p.discarded_for_energy = true;
            p.gain_energy(bonus);
            ActionOutcome::accepted(format!("discarded for {bonus} energy"))
        }
    }

    fn end_turn(&mut self) -> ActionOutcome {
        if self.state.pending.is_some() {
            return ActionOutcome::rejected("a choice must be completed before ending the turn");
        }
        self.advance_turn();
        ActionOutcome::accepted("turn ended")
    }
}

fn build_player(
    catalog: &CardCatalog,
    id: PlayerId,
    setup: PlayerSetup,
    params: &MatchParams,
    rng: &mut MatchRng,
) -> Result<PlayerState, SetupError> {
    if setup.roster.is_empty() {
        return Err(SetupError::EmptyRoster { player: id });
    }
    if setup.roster.len() > MAX_ROSTER {
        return Err(SetupError::RosterTooLarge {
            player: id,
            count: setup.roster.len(),
        });
    }

    let mut player = PlayerState::new(id, setup.name);
    for god in setup.roster {
        if player.has_god(god) {
            return Err(SetupError::DuplicateGod { player: id, god });
        }
        let Some(card) = catalog.god(god) else {
            return Err(SetupError::UnknownGod { player: id, god });
        };
        player.gods.push(GodState::new(god, card.max_health));
    }

    let mut deck = setup.deck;
    for &card in &deck {
        let Some(spell) = catalog.spell(card) else {
            return Err(SetupError::UnknownCard { player: id, card });
        };
        if !player.has_god(spell.god) {
            return Err(SetupError::SpellWithoutGod { player: id, card });
        }
    }
    rng.shuffle(&mut deck);
    player.deck = deck.into_iter().collect();
    player.energy = params.starting_energy;

    Ok(player)
}
