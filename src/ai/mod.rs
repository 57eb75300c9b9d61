//! The scripted AI opponent.
//!
//! [`AiPlayer`] is a stateless policy: given the engine, one call executes
//! at most one action — one play, or, only if no play is possible, one
//! discard for energy. It never ends the turn; the orchestrator driving it
//! decides when to submit `EndTurn`. All of its randomness (the easy
//! difficulty's picks, fallback discards) comes from the engine's match
//! RNG, so AI turns replay deterministically.
//!
//! [`ActingGuard`] is the check-and-set latch schedulers use to keep
//! delayed AI turns from re-entering the same engine.

use std::sync::atomic::{AtomicBool, Ordering};

use smallvec::SmallVec;
use tracing::trace;

use crate::cards::{Archetype, CardCatalog, EffectKind, SpellCard, TargetKind};
use crate::core::{
    Action, ActionOutcome, CardId, Choice, ChoiceSpec, Element, GodId, LightningMode, PlayerId,
};
use crate::effects::custom_ids;
use crate::engine::MatchEngine;
use crate::state::{MatchState, PendingChoice, StatusKind};

/// AI difficulty tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Uniform random over playable cards.
    Easy,
    /// Archetype tiering: generators while energy is short, then offense,
    /// then support.
    Medium,
    /// Scored selection with energy-curve preference.
    Hard,
}

/// Stateless per-call AI policy.
#[derive(Clone, Copy, Debug)]
pub struct AiPlayer {
    difficulty: Difficulty,
}

impl AiPlayer {
    /// Create a policy at the given difficulty.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// The configured difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Execute at most one action as the active player.
    ///
    /// A pending choice belonging to the active player is completed with a
    /// heuristic pick instead of acting.
    pub fn act(&self, engine: &mut MatchEngine) -> ActionOutcome {
        if !engine.state().is_playing() {
            return ActionOutcome::rejected("the match is finished");
        }
        let me = engine.state().active_player;

        if let Some(pending) = engine.state().pending.clone() {
            if pending.player != me {
                return ActionOutcome::rejected("waiting on the opponent's choice");
            }
            let choice = self.default_choice(engine, &pending);
            return engine.complete_choice(&choice);
        }

        let candidates = playable_cards(engine.state(), engine.catalog(), me);
        trace!(count = candidates.len(), "playable candidates");

        if let Some(card) = self.select(engine, me, &candidates) {
            let action = build_play(engine.state(), engine.catalog(), me, card);
            return engine.submit(&action);
        }

        // No play possible: one discard for energy, if still legal.
        let p = engine.state().player(me);
        if !p.played_card && !p.hand.is_empty() {
            if let Some(card) = self.discard_pick(engine, me) {
                return engine.submit(&Action::DiscardForEnergy { card });
            }
        }
        ActionOutcome::rejected("no available action")
    }

    fn select(
        &self,
        engine: &mut MatchEngine,
        me: PlayerId,
        candidates: &[CardId],
    ) -> Option<CardId> {
        if candidates.is_empty() {
            return None;
        }

        match self.difficulty {
            Difficulty::Easy => {
                let index = engine.rng_mut().gen_range_usize(0..candidates.len());
                Some(candidates[index])
            }
            Difficulty::Medium => {
                let tier = medium_tier(engine.state(), engine.catalog(), me, candidates);
                let index = engine.rng_mut().gen_range_usize(0..tier.len());
                Some(tier[index])
            }
            Difficulty::Hard => hard_pick(engine.state(), engine.catalog(), me, candidates),
        }
    }

    fn discard_pick(&self, engine: &mut MatchEngine, me: PlayerId) -> Option<CardId> {
        let hand: Vec<CardId> = engine.state().player(me).hand.iter().copied().collect();
        if hand.is_empty() {
            return None;
        }

        match self.difficulty {
            Difficulty::Easy | Difficulty::Medium => {
                let index = engine.rng_mut().gen_range_usize(0..hand.len());
                Some(hand[index])
            }
            Difficulty::Hard => {
                let state = engine.state();
                let catalog = engine.catalog();
                hand.into_iter().min_by(|&a, &b| {
                    let sa = card_score(state, catalog, me, a);
                    let sb = card_score(state, catalog, me, b);
                    sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
                })
            }
        }
    }

    fn default_choice(&self, engine: &MatchEngine, pending: &PendingChoice) -> Choice {
        let state = engine.state();
        match &pending.spec {
            ChoiceSpec::PickElement => {
                let element = engine
                    .catalog()
                    .god(pending.caster_god)
                    .map_or(Element::Fire, |g| g.element);
                Choice::Element(element)
            }
            ChoiceSpec::PickDiscardCards { count } => Choice::DiscardCards(
                state
                    .player(pending.player)
                    .discard
                    .iter()
                    .copied()
                    .take(*count as usize)
                    .collect(),
            ),
            ChoiceSpec::DistributeHealing { amount } => {
                match lowest_health_ally(state, pending.player) {
                    Some(god) => Choice::Healing(vec![(god, *amount)]),
                    None => Choice::Healing(vec![]),
                }
            }
            ChoiceSpec::PickOpposingHandCards { count } => Choice::OpposingHandCards(
                state
                    .player(pending.player.opponent())
                    .hand
                    .iter()
                    .copied()
                    .take(*count as usize)
                    .collect(),
            ),
        }
    }
}

/// Cards the active player could legally and sanely play right now:
/// affordable, caster alive and not stunned, neither per-turn flag set, and
/// never a card whose self-damage (including the caster's poison stacks)
/// would reach the casting god's current health.
fn playable_cards(state: &MatchState, catalog: &CardCatalog, me: PlayerId) -> Vec<CardId> {
    let p = state.player(me);
    if p.played_card || p.discarded_for_energy {
        return Vec::new();
    }

    let mut out = Vec::new();
    for &card in p.hand.iter() {
        let Some(spell) = catalog.spell(card) else {
            continue;
        };
        let Some(god) = p.god(spell.god) else {
            continue;
        };
        if god.dead || god.has_status(StatusKind::Stun) {
            continue;
        }
        if p.energy < spell.cost {
            continue;
        }
        let self_damage = card_self_damage(spell) + god.status_stacks(StatusKind::Poison);
        if self_damage >= god.health {
            continue;
        }
        out.push(card);
    }
    out
}

fn card_self_damage(spell: &SpellCard) -> i32 {
    spell
        .effects
        .iter()
        .map(|e| match &e.kind {
            EffectKind::Damage { amount } if e.target == Some(TargetKind::Self_) => *amount,
            EffectKind::Custom { id, value } if id.as_str() == custom_ids::BLOOD_PRICE => *value,
            _ => 0,
        })
        .sum()
}

/// Medium tiering: generators while energy ≤ 1, else competence, else
/// utility; whatever candidates remain when every tier is empty.
fn medium_tier(
    state: &MatchState,
    catalog: &CardCatalog,
    me: PlayerId,
    candidates: &[CardId],
) -> Vec<CardId> {
    let of_archetype = |archetype: Archetype| -> Vec<CardId> {
        candidates
            .iter()
            .copied()
            .filter(|&c| catalog.spell(c).is_some_and(|s| s.archetype == archetype))
            .collect()
    };

    if state.player(me).energy <= 1 {
        let generators = of_archetype(Archetype::Generator);
        if !generators.is_empty() {
            return generators;
        }
    }
    let competence = of_archetype(Archetype::Competence);
    if !competence.is_empty() {
        return competence;
    }
    let utility = of_archetype(Archetype::Utility);
    if !utility.is_empty() {
        return utility;
    }
    candidates.to_vec()
}

/// Hard selection: prefer the best of {generators, cards leaving ≥ 1 spare
/// energy}, else the globally best score.
fn hard_pick(
    state: &MatchState,
    catalog: &CardCatalog,
    me: PlayerId,
    candidates: &[CardId],
) -> Option<CardId> {
    let energy = state.player(me).energy;
    let best = |pool: &[CardId]| -> Option<CardId> {
        pool.iter()
            .copied()
            .max_by(|&a, &b| {
                let sa = card_score(state, catalog, me, a);
                let sb = card_score(state, catalog, me, b);
                sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
            })
    };

    let preferred: Vec<CardId> = candidates
        .iter()
        .copied()
        .filter(|&c| {
            catalog.spell(c).is_some_and(|s| {
                s.archetype == Archetype::Generator || energy - s.cost + s.gain >= 1
            })
        })
        .collect();

    if preferred.is_empty() {
        best(candidates)
    } else {
        best(&preferred)
    }
}

/// Score = Σdamage + 0.5·Σheal + 2·gain − cost.
fn card_score(state: &MatchState, catalog: &CardCatalog, me: PlayerId, card: CardId) -> f32 {
    let Some(spell) = catalog.spell(card) else {
        return f32::MIN;
    };

    let mut damage = 0i32;
    let mut heal = 0i32;
    for e in &spell.effects {
        match &e.kind {
            EffectKind::Damage { amount } if e.target != Some(TargetKind::Self_) => {
                damage += amount;
            }
            EffectKind::Heal { amount } => heal += amount,
            EffectKind::Custom { id, value } => match id.as_str() {
                custom_ids::LIFESTEAL | custom_ids::MILL_BURN | custom_ids::LIGHTNING_TOGGLE => {
                    damage += value;
                }
                custom_ids::DESPERATION => {
                    let max = catalog.god(spell.god).map_or(0, |g| g.max_health);
                    let current = state.player(me).god(spell.god).map_or(0, |g| g.health);
                    damage += (max - current).max(0);
                }
                custom_ids::MEND_SPREAD => heal += value,
                custom_ids::PLAGUE_HARVEST => {
                    heal += state
                        .player(me.opponent())
                        .living_gods()
                        .map(|g| g.status_stacks(StatusKind::Poison))
                        .sum::<i32>();
                }
                _ => {}
            },
            _ => {}
        }
    }

    damage as f32 + 0.5 * heal as f32 + 2.0 * spell.gain as f32 - spell.cost as f32
}

/// Build the play action for a chosen card: lowest-health living enemy for
/// enemy targets, lowest-health living ally for ally targets, first dead
/// ally for resurrections; detonate lightning when any enemy god holds a
/// stack, else charge; chosen elements default to the casting god's own.
fn build_play(state: &MatchState, catalog: &CardCatalog, me: PlayerId, card: CardId) -> Action {
    let Some(spell) = catalog.spell(card) else {
        return Action::play(card);
    };

    let mut targets: SmallVec<[GodId; 2]> = SmallVec::new();
    let mut lightning = None;
    let mut element = None;

    for e in &spell.effects {
        match e.target {
            Some(TargetKind::EnemyGod) => {
                if let Some(god) = lowest_health_enemy(state, me) {
                    targets.push(god);
                }
            }
            Some(TargetKind::AnyGod) => {
                let wants_ally = matches!(
                    e.kind,
                    EffectKind::Heal { .. } | EffectKind::Shield { .. }
                );
                let pick = if wants_ally {
                    lowest_health_ally(state, me)
                } else {
                    lowest_health_enemy(state, me)
                };
                if let Some(god) = pick {
                    targets.push(god);
                }
            }
            Some(TargetKind::AllyGod) => {
                if let Some(god) = lowest_health_ally(state, me) {
                    targets.push(god);
                }
            }
            Some(TargetKind::DeadAllyGod) => {
                if let Some(god) = first_dead_ally(state, me) {
                    targets.push(god);
                }
            }
            _ => {}
        }

        if let EffectKind::Custom { id, .. } = &e.kind {
            match id.as_str() {
                custom_ids::LIGHTNING_TOGGLE => match enemy_with_lightning(state, me) {
                    Some(charged) => {
                        lightning = Some(LightningMode::Detonate);
                        if e.target == Some(TargetKind::EnemyGod) {
                            match targets.last_mut() {
                                Some(last) => *last = charged,
                                None => targets.push(charged),
                            }
                        }
                    }
                    None => lightning = Some(LightningMode::Charge),
                },
                custom_ids::CHOSEN_WEAKNESS => {
                    element = catalog.god(spell.god).map(|g| g.element);
                }
                _ => {}
            }
        }
    }

    Action::PlayCard {
        card,
        target: targets.first().copied(),
        targets,
        lightning,
        element,
    }
}

fn lowest_health_enemy(state: &MatchState, me: PlayerId) -> Option<GodId> {
    state
        .player(me.opponent())
        .living_gods()
        .min_by_key(|g| g.health)
        .map(|g| g.god)
}

fn lowest_health_ally(state: &MatchState, me: PlayerId) -> Option<GodId> {
    state
        .player(me)
        .living_gods()
        .min_by_key(|g| g.health)
        .map(|g| g.god)
}

fn first_dead_ally(state: &MatchState, me: PlayerId) -> Option<GodId> {
    state.player(me).gods.iter().find(|g| g.dead).map(|g| g.god)
}

fn enemy_with_lightning(state: &MatchState, me: PlayerId) -> Option<GodId> {
    state
        .player(me.opponent())
        .living_gods()
        .filter(|g| g.status_stacks(StatusKind::Lightning) > 0)
        .max_by_key(|g| g.status_stacks(StatusKind::Lightning))
        .map(|g| g.god)
}

/// Atomic check-and-set latch for schedulers driving delayed AI turns.
///
/// Acquiring succeeds at most once until the token is dropped, so two
/// overlapping timers cannot both drive the same engine.
#[derive(Debug, Default)]
pub struct ActingGuard {
    busy: AtomicBool,
}

impl ActingGuard {
    /// Create an idle guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Try to mark the AI as acting. Returns a token on success; dropping
    /// the token releases the guard.
    #[must_use]
    pub fn try_acquire(&self) -> Option<ActingToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(ActingToken { guard: self })
    }

    /// Whether an AI turn is currently in flight.
    #[must_use]
    pub fn is_acting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII release for [`ActingGuard`].
#[derive(Debug)]
pub struct ActingToken<'a> {
    guard: &'a ActingGuard,
}

impl Drop for ActingToken<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
