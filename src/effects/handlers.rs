//! Built-in god-specific mechanics.
//!
//! Every handler that deals damage goes through
//! [`apply_damage`](super::resolver::apply_damage), so shield absorption
//! and the death/win checks behave exactly as they do for built-in damage.
//! Handlers that pause validate their [`Choice`] completely before mutating
//! anything, so a bad completion leaves the match untouched and the choice
//! still pending.

use tracing::trace;

use crate::cards::{CardCatalog, CustomEffectId};
use crate::core::{
    ActionOutcome, CardId, Choice, ChoiceSpec, Element, GodId, LightningMode, MatchParams,
    MatchRng,
};
use crate::state::{MatchState, PendingChoice, StatusKind, WeaknessOverride};

use super::custom::{BeginFn, CustomContext, CustomHandler, CustomRegistry, Resolution};
use super::resolver::{apply_damage, apply_heal, apply_status_to, mill_cards};

/// Ids of the built-in custom effects.
pub mod ids {
    pub const LIFESTEAL: &str = "lifesteal";
    pub const PLAGUE_HARVEST: &str = "plague_harvest";
    pub const RAISE_DEAD: &str = "raise_dead";
    pub const CHOSEN_WEAKNESS: &str = "chosen_weakness";
    pub const LIGHTNING_TOGGLE: &str = "lightning_toggle";
    pub const MILL_BURN: &str = "mill_burn";
    pub const BLIND_REDRAW: &str = "blind_redraw";
    pub const GRAVE_RECALL: &str = "grave_recall";
    pub const ENERGY_DRAIN: &str = "energy_drain";
    pub const BLOOD_PRICE: &str = "blood_price";
    pub const DESPERATION: &str = "desperation";
    pub const MEND_SPREAD: &str = "mend_spread";
    pub const HAND_PIERCE: &str = "hand_pierce";
}

/// Register every built-in handler.
pub fn register_builtin(registry: &mut CustomRegistry) {
    let sync = |begin: BeginFn| CustomHandler {
        begin,
        complete: None,
    };

    registry.register(CustomEffectId::new(ids::LIFESTEAL), sync(lifesteal));
    registry.register(CustomEffectId::new(ids::PLAGUE_HARVEST), sync(plague_harvest));
    registry.register(CustomEffectId::new(ids::RAISE_DEAD), sync(raise_dead));
    registry.register(
        CustomEffectId::new(ids::CHOSEN_WEAKNESS),
        CustomHandler {
            begin: chosen_weakness,
            complete: Some(complete_chosen_weakness),
        },
    );
    registry.register(CustomEffectId::new(ids::LIGHTNING_TOGGLE), sync(lightning_toggle));
    registry.register(CustomEffectId::new(ids::MILL_BURN), sync(mill_burn));
    registry.register(CustomEffectId::new(ids::BLIND_REDRAW), sync(blind_redraw));
    registry.register(
        CustomEffectId::new(ids::GRAVE_RECALL),
        CustomHandler {
            begin: grave_recall,
            complete: Some(complete_grave_recall),
        },
    );
    registry.register(CustomEffectId::new(ids::ENERGY_DRAIN), sync(energy_drain));
    registry.register(CustomEffectId::new(ids::BLOOD_PRICE), sync(blood_price));
    registry.register(CustomEffectId::new(ids::DESPERATION), sync(desperation));
    registry.register(
        CustomEffectId::new(ids::MEND_SPREAD),
        CustomHandler {
            begin: mend_spread,
            complete: Some(complete_mend_spread),
        },
    );
    registry.register(
        CustomEffectId::new(ids::HAND_PIERCE),
        CustomHandler {
            begin: hand_pierce,
            complete: Some(complete_hand_pierce),
        },
    );
}

/// Damage the target and heal the casting god by the health actually lost.
/// Shielded damage steals nothing.
fn lifesteal(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    for &target in &ctx.targets {
        let stolen = apply_damage(state, catalog, Some(ctx.card_element), target, ctx.value);
        apply_heal(state, catalog, ctx.caster_god, stolen);
    }
    Resolution::Resolved
}

/// Heal the target by the total poison stacks across all living enemy gods.
fn plague_harvest(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let total: i32 = state
        .player(ctx.caster.opponent())
        .living_gods()
        .map(|g| g.status_stacks(StatusKind::Poison))
        .sum();

    if ctx.targets.is_empty() {
        apply_heal(state, catalog, ctx.caster_god, total);
    } else {
        for &target in &ctx.targets {
            apply_heal(state, catalog, target, total);
        }
    }
    Resolution::Resolved
}

/// Resurrect a dead ally at a fixed health, flag it as a zombie and shuffle
/// its spellbook back into the deck.
fn raise_dead(
    state: &mut MatchState,
    rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let Some(&target) = ctx.targets.first() else {
        return Resolution::Resolved;
    };

    {
        let Some(god) = state.player_mut(ctx.caster).god_mut(target) else {
            return Resolution::Resolved;
        };
        if !god.dead {
            return Resolution::Resolved;
        }
        god.dead = false;
        god.health = ctx.value.max(1);
        god.zombie = true;
        god.clear_statuses();
    }
    trace!(god = %target, "god resurrected");

    // The death purge removed the god's spellbook; deal it back in.
    let spellbook: Vec<CardId> = catalog.spells_of(target).map(|s| s.id).collect();
    let player = state.player_mut(ctx.caster);
    for card in spellbook {
        player.deck.push_back(card);
    }
    let mut deck: Vec<CardId> = player.deck.iter().copied().collect();
    rng.shuffle(&mut deck);
    player.deck = deck.into_iter().collect();

    Resolution::Resolved
}

/// Replace the target's weakness with a player-chosen element. Resolves
/// synchronously when the action already carries the element pick.
fn chosen_weakness(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let Some(element) = ctx.chosen_element else {
        return Resolution::AwaitingChoice(ChoiceSpec::PickElement);
    };

    let remaining = (ctx.value > 0).then_some(ctx.value as u32);
    for &target in &ctx.targets {
        set_weakness(state, target, element, remaining);
    }
    Resolution::Resolved
}

fn complete_chosen_weakness(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    _params: &MatchParams,
    pending: &PendingChoice,
    choice: &Choice,
) -> ActionOutcome {
    let Choice::Element(element) = choice else {
        return ActionOutcome::rejected("expected an element choice");
    };

    let remaining = (pending.value > 0).then_some(pending.value as u32);
    for &target in &pending.targets {
        set_weakness(state, target, *element, remaining);
    }
    ActionOutcome::accepted(format!("weakness set to {element}"))
}

fn set_weakness(state: &mut MatchState, target: GodId, element: Element, remaining: Option<u32>) {
    let Some(owner) = state.owner_of(target) else {
        return;
    };
    if let Some(god) = state.player_mut(owner).god_mut(target) {
        if god.is_alive() {
            god.weakness_override = Some(WeaknessOverride { element, remaining });
        }
    }
}

/// Charge the target with a lightning stack, or detonate: base damage plus
/// a weakness-checked bonus of 2 per stack, stacks reset to zero.
fn lightning_toggle(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let mode = ctx.lightning.unwrap_or(LightningMode::Charge);

    for &target in &ctx.targets {
        match mode {
            LightningMode::Charge => {
                apply_status_to(state, target, StatusKind::Lightning, 1, None);
            }
            LightningMode::Detonate => {
                let stacks = state
                    .owner_of(target)
                    .and_then(|p| state.player(p).god(target))
                    .map_or(0, |g| g.status_stacks(StatusKind::Lightning));
                if let Some(owner) = state.owner_of(target) {
                    if let Some(god) = state.player_mut(owner).god_mut(target) {
                        god.remove_status(StatusKind::Lightning);
                    }
                }
                apply_damage(
                    state,
                    catalog,
                    Some(ctx.card_element),
                    target,
                    ctx.value + 2 * stacks,
                );
            }
        }
    }
    Resolution::Resolved
}

/// Mill `value` opponent cards, then deal damage equal to the number
/// actually milled.
fn mill_burn(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let milled = mill_cards(state, ctx.caster.opponent(), ctx.value.max(0) as u32);
    for &target in &ctx.targets {
        apply_damage(state, catalog, Some(ctx.card_element), target, milled as i32);
    }
    Resolution::Resolved
}

/// Shuffle the opponent's hand into their deck and redraw the same count;
/// the redrawn cards are hidden from their owner and revealed to the caster.
fn blind_redraw(
    state: &mut MatchState,
    rng: &mut MatchRng,
    _catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let opponent = ctx.caster.opponent();
    let player = state.player_mut(opponent);
    let count = player.hand.len();
    if count == 0 {
        return Resolution::Resolved;
    }

    while let Some(card) = player.hand.pop_back() {
        player.clear_card_visibility(card);
        player.deck.push_back(card);
    }

    let mut deck: Vec<CardId> = player.deck.iter().copied().collect();
    rng.shuffle(&mut deck);
    player.deck = deck.into_iter().collect();

    for _ in 0..count {
        if let Some(card) = player.deck.pop_back() {
            player.hand.push_back(card);
            player.hidden_cards.insert(card);
            player.revealed_cards.insert(card);
        }
    }
    Resolution::Resolved
}

/// Pick up to two cards from the caster's discard pile to return to hand.
fn grave_recall(
    _state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    _ctx: &CustomContext,
) -> Resolution {
    Resolution::AwaitingChoice(ChoiceSpec::PickDiscardCards { count: 2 })
}

fn complete_grave_recall(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    params: &MatchParams,
    pending: &PendingChoice,
    choice: &Choice,
) -> ActionOutcome {
    let Choice::DiscardCards(cards) = choice else {
        return ActionOutcome::rejected("expected discard-pile cards");
    };
    if cards.len() > 2 {
        return ActionOutcome::rejected("at most two cards may be returned");
    }
    {
        let player = state.player(pending.player);
        for &card in cards {
            if !player.discard.contains(&card) {
                return ActionOutcome::rejected(format!("{card} is not in the discard pile"));
            }
        }
    }

    let hand_limit = params.hand_limit;
    let player = state.player_mut(pending.player);
    let mut returned = 0;
    for &card in cards {
        if player.hand.len() >= hand_limit {
            break;
        }
        if let Some(pos) = player.discard.iter().position(|&c| c == card) {
            player.discard.remove(pos);
            player.hand.push_back(card);
            returned += 1;
        }
    }
    ActionOutcome::accepted(format!("{returned} card(s) returned to hand"))
}

/// Drain up to `value` energy from the opponent and credit the caster with
/// the amount actually drained.
fn energy_drain(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let (caster, opponent) = state.pair_mut(ctx.caster);
    let drained = opponent.energy.min(ctx.value.max(0));
    opponent.energy -= drained;
    caster.gain_energy(drained);
    Resolution::Resolved
}

/// The casting god bleeds `value` through the normal damage path and the
/// caster banks two energy.
fn blood_price(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    apply_damage(state, catalog, None, ctx.caster_god, ctx.value);
    state.player_mut(ctx.caster).gain_energy(2);
    Resolution::Resolved
}

/// Damage the target equal to the casting god's missing health.
fn desperation(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    let max_health = catalog.god(ctx.caster_god).map_or(0, |g| g.max_health);
    let current = state
        .player(ctx.caster)
        .god(ctx.caster_god)
        .map_or(0, |g| g.health);
    let missing = (max_health - current).max(0);

    for &target in &ctx.targets {
        apply_damage(state, catalog, Some(ctx.card_element), target, missing);
    }
    Resolution::Resolved
}

/// Split `value` healing among living allies, as the player directs.
fn mend_spread(
    _state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    ctx: &CustomContext,
) -> Resolution {
    Resolution::AwaitingChoice(ChoiceSpec::DistributeHealing { amount: ctx.value })
}

fn complete_mend_spread(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    catalog: &CardCatalog,
    _params: &MatchParams,
    pending: &PendingChoice,
    choice: &Choice,
) -> ActionOutcome {
    let Choice::Healing(splits) = choice else {
        return ActionOutcome::rejected("expected a healing distribution");
    };
    if splits.iter().any(|&(_, amount)| amount < 0) {
        return ActionOutcome::rejected("healing amounts must not be negative");
    }
    let total: i32 = splits.iter().map(|&(_, amount)| amount).sum();
    if total > pending.value {
        return ActionOutcome::rejected("healing exceeds the allotted amount");
    }
    {
        let player = state.player(pending.player);
        for &(god, _) in splits {
            if !player.god(god).is_some_and(|g| g.is_alive()) {
                return ActionOutcome::rejected(format!("{god} is not a living ally"));
            }
        }
    }

    for &(god, amount) in splits {
        apply_heal(state, catalog, god, amount);
    }
    ActionOutcome::accepted(format!("{total} healing distributed"))
}

/// Pick up to two cards from the opposing hand to discard.
fn hand_pierce(
    _state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    _ctx: &CustomContext,
) -> Resolution {
    Resolution::AwaitingChoice(ChoiceSpec::PickOpposingHandCards { count: 2 })
}

fn complete_hand_pierce(
    state: &mut MatchState,
    _rng: &mut MatchRng,
    _catalog: &CardCatalog,
    _params: &MatchParams,
    pending: &PendingChoice,
    choice: &Choice,
) -> ActionOutcome {
    let Choice::OpposingHandCards(cards) = choice else {
        return ActionOutcome::rejected("expected opposing hand cards");
    };
    if cards.len() > 2 {
        return ActionOutcome::rejected("at most two cards may be discarded");
    }
    let opponent = pending.player.opponent();
    {
        let player = state.player(opponent);
        for &card in cards {
            if !player.hand_contains(card) {
                return ActionOutcome::rejected(format!("{card} is not in the opposing hand"));
            }
        }
    }

    let player = state.player_mut(opponent);
    for &card in cards {
        player.discard_from_hand(card);
        player.clear_card_visibility(card);
    }
    ActionOutcome::accepted(format!("{} card(s) discarded", cards.len()))
}
