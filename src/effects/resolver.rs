//! Effect resolution: applying a card's ordered effect list to the match.
//!
//! The resolver owns the shared damage/heal plumbing used by both built-in
//! effects and custom handlers, so shield absorption, the weakness
//! multiplier, the death purge and the win check behave identically on
//! every path.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cards::{CardCatalog, EffectKind, GodCard, SpellCard};
use crate::core::{calculate_damage, CardId, Element, GodId, LightningMode, MatchRng, PlayerId};
use crate::state::{GodState, MatchState, PendingChoice, PlayerState, StatusKind};

use super::custom::{CustomContext, CustomRegistry, Resolution};
use super::targeting::{provoking_god, resolve_targets, TargetCursor};
use crate::cards::TargetKind;

/// Everything a single cast needs, borrowed for the duration of resolution.
pub(crate) struct CastContext<'a> {
    pub catalog: &'a CardCatalog,
    pub customs: &'a CustomRegistry,
    pub hand_limit: usize,
    pub caster: PlayerId,
    pub caster_god: GodId,
    pub spell: &'a SpellCard,
    pub lightning: Option<LightningMode>,
    pub chosen_element: Option<Element>,
}

/// The weakness used for the multiplier check against a god.
///
/// Weakness-immunity substitutes the attack element's own weakness, which
/// never equals the attack element, so the multiplier cannot fire.
pub(crate) fn effective_weakness(god: &GodState, card: &GodCard, attack: Element) -> Element {
    if god.has_status(StatusKind::WeaknessImmunity) {
        return attack.weakness();
    }
    god.weakness_override
        .map(|o| o.element)
        .unwrap_or(card.weakness)
}

/// Deal damage to a god: weakness multiplier (when an attack element is
/// given), shield absorption, then health, then the death and win checks.
///
/// Returns the health actually lost. Dead or unknown targets take nothing.
pub(crate) fn apply_damage(
    state: &mut MatchState,
    catalog: &CardCatalog,
    attack: Option<Element>,
    target: GodId,
    base: i32,
) -> i32 {
    if base <= 0 {
        return 0;
    }
    let Some(owner) = state.owner_of(target) else {
        return 0;
    };

    let amount = {
        let Some(god_state) = state.player(owner).god(target) else {
            return 0;
        };
        if god_state.dead {
            return 0;
        }
        match (attack, catalog.god(target)) {
            (Some(att), Some(card)) => {
                calculate_damage(base, att, effective_weakness(god_state, card, att))
            }
            _ => base,
        }
    };

    let mut died = false;
    let mut loss = 0;
    if let Some(god_state) = state.player_mut(owner).god_mut(target) {
        let absorbed = god_state.absorb_with_shield(amount);
        loss = amount - absorbed;
        god_state.health -= loss;
        if god_state.health <= 0 {
            god_state.health = 0;
            god_state.dead = true;
            died = true;
        }
        trace!(god = %target, amount, absorbed, loss, "damage applied");
    }

    if died {
        debug!(god = %target, "god died");
        purge_dead_god_cards(state.player_mut(owner), catalog, target);
        check_victory(state);
    }
    loss
}

/// Heal a god: strip poison stacks 1:1 up to the amount AND separately
/// restore health clamped to max. Each half happens regardless of the other.
pub(crate) fn apply_heal(state: &mut MatchState, catalog: &CardCatalog, target: GodId, amount: i32) {
    if amount <= 0 {
        return;
    }
    let Some(owner) = state.owner_of(target) else {
        return;
    };
    let max_health = catalog.god(target).map(|g| g.max_health);
    let Some(god_state) = state.player_mut(owner).god_mut(target) else {
        return;
    };
    if god_state.dead {
        return;
    }

    let poison = god_state.status_stacks(StatusKind::Poison);
    if poison > 0 {
        let stripped = poison.min(amount);
        if stripped == poison {
            god_state.remove_status(StatusKind::Poison);
        } else if let Some(entry) = god_state
            .statuses
            .iter_mut()
            .find(|s| s.kind == StatusKind::Poison)
        {
            entry.stacks -= stripped;
        }
    }

    let restored = god_state.health + amount;
    god_state.health = match max_health {
        Some(max) => restored.min(max),
        None => restored,
    };
}

/// Apply a status to a living god.
pub(crate) fn apply_status_to(
    state: &mut MatchState,
    target: GodId,
    kind: StatusKind,
    stacks: i32,
    duration: Option<u32>,
) {
    let Some(owner) = state.owner_of(target) else {
        return;
    };
    if let Some(god) = state.player_mut(owner).god_mut(target) {
        if god.is_alive() {
            god.apply_status(kind, stacks, duration);
        }
    }
}

/// Remove a status from a god.
pub(crate) fn remove_status_from(state: &mut MatchState, target: GodId, kind: StatusKind) {
    let Some(owner) = state.owner_of(target) else {
        return;
    };
    if let Some(god) = state.player_mut(owner).god_mut(target) {
        god.remove_status(kind);
    }
}

/// Purge every card of a dead god from its owner's hand, deck and discard.
pub(crate) fn purge_dead_god_cards(player: &mut PlayerState, catalog: &CardCatalog, god: GodId) {
    let belongs = |card: CardId| catalog.spell(card).is_some_and(|s| s.god == god);
    player.hand.retain(|&c| !belongs(c));
    player.deck.retain(|&c| !belongs(c));
    player.discard.retain(|&c| !belongs(c));
    player.hidden_cards.retain(|&c| !belongs(c));
    player.revealed_cards.retain(|&c| !belongs(c));
}

/// Finish the match if a side has no living gods. The first winner sticks.
pub(crate) fn check_victory(state: &mut MatchState) {
    if !state.is_playing() {
        return;
    }
    for player in [PlayerId::FIRST, PlayerId::SECOND] {
        if !state.player(player).has_living_gods() {
            let winner = player.opponent();
            debug!(%winner, "match finished");
            state.finish(winner);
            return;
        }
    }
}

/// Draw up to `count` cards from a player's deck into their hand, capped at
/// the hand limit. No recycle happens on card-driven draws.
pub(crate) fn draw_cards(
    state: &mut MatchState,
    hand_limit: usize,
    player: PlayerId,
    count: u32,
) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        let p = state.player_mut(player);
        if p.hand.len() >= hand_limit {
            break;
        }
        let Some(card) = p.deck.pop_back() else {
            break;
        };
        p.clear_card_visibility(card);
        p.hand.push_back(card);
        drawn += 1;
    }
    drawn
}

/// Move up to `count` cards from a player's deck to their discard.
pub(crate) fn mill_cards(state: &mut MatchState, player: PlayerId, count: u32) -> usize {
    let p = state.player_mut(player);
    let mut milled = 0;
    for _ in 0..count {
        let Some(card) = p.deck.pop_back() else {
            break;
        };
        p.discard.push_back(card);
        milled += 1;
    }
    milled
}

/// Discard up to `count` random cards from a player's hand.
pub(crate) fn random_discard(
    state: &mut MatchState,
    rng: &mut MatchRng,
    player: PlayerId,
    count: u32,
) {
    for _ in 0..count {
        let p = state.player_mut(player);
        if p.hand.is_empty() {
            break;
        }
        let index = rng.gen_range_usize(0..p.hand.len());
        let card = p.hand.remove(index);
        p.clear_card_visibility(card);
        p.discard.push_back(card);
    }
}

/// Resolve a card's effect list strictly in order.
///
/// Resolution never stops early: a card that finishes the match keeps
/// resolving (the winner is latched), and unresolvable sub-effects are
/// silent no-ops.
pub(crate) fn resolve_spell(
    state: &mut MatchState,
    rng: &mut MatchRng,
    ctx: &CastContext<'_>,
    primary: Option<GodId>,
    target_ids: &[GodId],
) {
    // A provoker hijacks single-enemy picks; cards addressing several
    // enemy targets are instead validated upstream to include it.
    let single_enemy_effects = ctx
        .spell
        .effects
        .iter()
        .filter(|e| e.target == Some(TargetKind::EnemyGod))
        .count();
    let forced = if single_enemy_effects <= 1 {
        provoking_god(state, ctx.caster)
    } else {
        None
    };
    let mut cursor = TargetCursor::new(primary, target_ids).with_forced_enemy(forced);

    for spec in &ctx.spell.effects {
        let targets = resolve_targets(state, ctx.caster, ctx.caster_god, spec.target, &mut cursor);

        match &spec.kind {
            EffectKind::Damage { amount } => {
                for &target in &targets {
                    apply_damage(state, ctx.catalog, Some(ctx.spell.element), target, *amount);
                }
            }
            EffectKind::Heal { amount } => {
                for &target in &targets {
                    apply_heal(state, ctx.catalog, target, *amount);
                }
            }
            EffectKind::Shield { amount } => {
                for &target in &targets {
                    apply_status_to(state, target, StatusKind::Shield, *amount, None);
                }
            }
            EffectKind::Status {
                status,
                stacks,
                duration,
            } => {
                for &target in &targets {
                    apply_status_to(state, target, *status, *stacks, *duration);
                }
            }
            EffectKind::RemoveStatus { status } => {
                for &target in &targets {
                    remove_status_from(state, target, *status);
                }
            }
            EffectKind::Energy { amount } => {
                state.player_mut(ctx.caster).gain_energy(*amount);
            }
            EffectKind::Draw { count } => {
                draw_cards(state, ctx.hand_limit, ctx.caster, *count);
            }
            EffectKind::Mill { count } => {
                mill_cards(state, ctx.caster.opponent(), *count);
            }
            EffectKind::Discard { count } => {
                random_discard(state, rng, ctx.caster.opponent(), *count);
            }
            EffectKind::Custom { id, value } => {
                let Some(handler) = ctx.customs.get(id) else {
                    trace!(%id, "no handler registered; skipping");
                    continue;
                };
                let custom_ctx = CustomContext {
                    caster: ctx.caster,
                    caster_god: ctx.caster_god,
                    card: ctx.spell.id,
                    card_element: ctx.spell.element,
                    value: *value,
                    targets: SmallVec::from_slice(&targets),
                    lightning: ctx.lightning,
                    chosen_element: ctx.chosen_element,
                };
                match (handler.begin)(state, rng, ctx.catalog, &custom_ctx) {
                    Resolution::Resolved => {}
                    Resolution::AwaitingChoice(spec) => {
                        if state.pending.is_none() {
                            trace!(effect = %id, "custom effect awaiting choice");
                            state.pending = Some(PendingChoice {
                                player: ctx.caster,
                                caster_god: ctx.caster_god,
                                card: ctx.spell.id,
                                effect: id.clone(),
                                value: *value,
                                targets: targets.to_vec(),
                                spec,
                            });
                        }
                    }
                }
            }
        }
    }
}
