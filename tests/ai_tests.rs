//! Scripted AI behavior: candidate filtering, per-difficulty selection,
//! targeting, and the one-action-per-call contract.

use std::sync::Arc;

use god_arena::{
    custom_ids, Action, AiPlayer, Archetype, CardCatalog, CardId, Difficulty, Element, EffectSpec,
    GodCard, GodId, MatchEngine, MatchId, MatchParams, MatchSetup, PlayerId, PlayerSetup,
    SpellCard, StatusKind, TargetKind,
};

const CASTER: GodId = GodId(1);
const HALE: GodId = GodId(2);
const FRAIL: GodId = GodId(3);

const ZAP: CardId = CardId(1);
const NOVA: CardId = CardId(2);
const FONT: CardId = CardId(3);
const BLOOD_RITE: CardId = CardId(4);
const STORM_COIL: CardId = CardId(5);
const WISP: CardId = CardId(10);

/// One caster god against two enemies with distinct health totals, so
/// target picks are observable.
fn catalog() -> Arc<CardCatalog> {
    let mut c = CardCatalog::new();
    c.register_god(GodCard::new(CASTER, "Caster", Element::Fire, 20, Element::Water));
    c.register_god(GodCard::new(HALE, "Hale", Element::Earth, 20, Element::Water));
    c.register_god(GodCard::new(FRAIL, "Frail", Element::Air, 8, Element::Water));

    c.register_spell(
        SpellCard::new(ZAP, "Zap", Element::Fire, CASTER, Archetype::Competence)
            .with_cost(1)
            .with_effect(EffectSpec::damage(1).at(TargetKind::EnemyGod)),
    );
    c.register_spell(
        SpellCard::new(NOVA, "Nova", Element::Fire, CASTER, Archetype::Competence)
            .with_cost(1)
            .with_effect(EffectSpec::damage(6).at(TargetKind::EnemyGod)),
    );
    c.register_spell(
        SpellCard::new(FONT, "Font", Element::Fire, CASTER, Archetype::Generator)
            .with_gain(2)
            .with_effect(EffectSpec::energy(1)),
    );
    c.register_spell(
        SpellCard::new(BLOOD_RITE, "Blood Rite", Element::Fire, CASTER, Archetype::Generator)
            .with_effect(EffectSpec::custom(custom_ids::BLOOD_PRICE, 6)),
    );
    c.register_spell(
        SpellCard::new(STORM_COIL, "Storm Coil", Element::Lightning, CASTER, Archetype::Competence)
            .with_cost(1)
            .with_effect(EffectSpec::custom(custom_ids::LIGHTNING_TOGGLE, 4).at(TargetKind::EnemyGod)),
    );

    c.register_spell(
        SpellCard::new(WISP, "Wisp", Element::Earth, HALE, Archetype::Utility)
            .with_effect(EffectSpec::shield(1).at(TargetKind::Self_)),
    );
    Arc::new(c)
}

fn engine_with_deck(deck: &[CardId], starting_energy: i32, seed: u64) -> MatchEngine {
    let setup = MatchSetup {
        id: MatchId::new("ai-match"),
        players: [
            PlayerSetup::new("bot", vec![CASTER], deck.to_vec()),
            PlayerSetup::new("dummy", vec![HALE, FRAIL], vec![WISP]),
        ],
        starting_player: PlayerId::FIRST,
        seed,
        params: MatchParams {
            starting_energy,
            ..MatchParams::default()
        },
    };
    MatchEngine::new(catalog(), setup).unwrap()
}

#[test]
fn ai_executes_at_most_one_action_per_call() {
    let ai = AiPlayer::new(Difficulty::Easy);
    let mut engine = engine_with_deck(&[ZAP, NOVA, FONT], 5, 42);

    let first = ai.act(&mut engine);
    assert!(first.success);
    assert!(engine.state().player(PlayerId::FIRST).played_card);

    // The turn is still the AI's: it never ends the turn itself, and the
    // play lockout leaves it nothing to do.
    assert_eq!(engine.state().active_player, PlayerId::FIRST);
    let second = ai.act(&mut engine);
    assert!(!second.success);
}

#[test]
fn ai_discards_when_nothing_is_playable() {
    let ai = AiPlayer::new(Difficulty::Easy);
    // Every playable card costs 1; zero energy forces the discard path.
    let mut engine = engine_with_deck(&[ZAP, NOVA], 0, 42);

    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);

    let p = engine.state().player(PlayerId::FIRST);
    assert!(p.discarded_for_energy);
    assert!(!p.played_card);
    assert_eq!(p.energy, 1);
    assert_eq!(p.discard.len(), 1);
}

#[test]
fn ai_targets_the_lowest_health_enemy() {
    let ai = AiPlayer::new(Difficulty::Hard);
    let mut engine = engine_with_deck(&[NOVA], 5, 42);

    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);

    // Frail (8 hp) over Hale (20 hp).
    assert_eq!(engine.state().player(PlayerId::SECOND).god(FRAIL).unwrap().health, 2);
    assert_eq!(engine.state().player(PlayerId::SECOND).god(HALE).unwrap().health, 20);
}

#[test]
fn blood_rite_is_playable_while_healthy() {
    let ai = AiPlayer::new(Difficulty::Easy);
    let mut engine = engine_with_deck(&[BLOOD_RITE], 5, 42);

    // At 20 health a 6-point self-hit is a legal candidate.
    let outcome = ai.act(&mut engine);
    assert!(outcome.success);
    assert!(engine.state().player(PlayerId::FIRST).played_card);

    assert_eq!(engine.state().player(PlayerId::FIRST).god(CASTER).unwrap().health, 14);
}

#[test]
fn ai_skips_suicidal_cards_and_discards_instead() {
    let ai = AiPlayer::new(Difficulty::Easy);
    let mut engine = engine_with_deck(&[BLOOD_RITE], 5, 42);

    // Bleed the caster down to where the rite would be lethal. Each round
    // trip also recycles the one-card deck, so fatigue joins in.
    ai.act(&mut engine); // rite: 20 -> 14
    engine.submit(&Action::EndTurn);
    engine.submit(&Action::EndTurn); // fatigue 1: 13
    ai.act(&mut engine); // rite: 13 -> 7
    engine.submit(&Action::EndTurn);
    engine.submit(&Action::EndTurn); // fatigue 2: 5

    assert_eq!(engine.state().player(PlayerId::FIRST).god(CASTER).unwrap().health, 5);

    // At 5 health a 6-point self-hit is suicide; the AI discards instead.
    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);
    let p = engine.state().player(PlayerId::FIRST);
    assert!(!p.played_card);
    assert!(p.discarded_for_energy);
}

#[test]
fn medium_prefers_generators_while_energy_is_short() {
    let ai = AiPlayer::new(Difficulty::Medium);
    let mut engine = engine_with_deck(&[ZAP, FONT], 1, 42);

    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);

    // Energy 1: the generator wins over the competence card.
    assert!(engine.state().player(PlayerId::FIRST).discard.contains(&FONT));
}

#[test]
fn medium_prefers_competence_once_funded() {
    let ai = AiPlayer::new(Difficulty::Medium);
    let mut engine = engine_with_deck(&[ZAP, FONT], 4, 42);

    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);

    assert!(engine.state().player(PlayerId::FIRST).discard.contains(&ZAP));
}

#[test]
fn hard_picks_the_best_score() {
    let ai = AiPlayer::new(Difficulty::Hard);
    // Zap scores 1 - 1 = 0; Nova scores 6 - 1 = 5.
    let mut engine = engine_with_deck(&[ZAP, NOVA], 5, 42);

    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);

    assert!(engine.state().player(PlayerId::FIRST).discard.contains(&NOVA));
}

#[test]
fn ai_charges_then_detonates_lightning() {
    let ai = AiPlayer::new(Difficulty::Hard);
    let mut engine = engine_with_deck(&[STORM_COIL], 9, 42);

    // No stacks anywhere: the AI charges.
    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);
    let charged = engine
        .state()
        .player(PlayerId::SECOND)
        .god(FRAIL)
        .unwrap()
        .status_stacks(StatusKind::Lightning);
    assert_eq!(charged, 1);

    engine.submit(&Action::EndTurn);
    engine.submit(&Action::EndTurn);

    // A stack is out: the AI detonates it on the charged god.
    let outcome = ai.act(&mut engine);
    assert!(outcome.success, "{}", outcome.message);

    let frail = engine.state().player(PlayerId::SECOND).god(FRAIL).unwrap();
    assert_eq!(frail.status_stacks(StatusKind::Lightning), 0);
    // Base 4 + 2 per stack, no multiplier for lightning vs water-weak.
    assert_eq!(frail.health, 2);
}

#[test]
fn easy_ai_is_deterministic_per_seed() {
    let run = |seed: u64| -> String {
        let ai = AiPlayer::new(Difficulty::Easy);
        let mut engine = engine_with_deck(&[ZAP, NOVA, FONT, BLOOD_RITE, STORM_COIL], 3, seed);
        for _ in 0..6 {
            ai.act(&mut engine);
            engine.submit(&Action::EndTurn);
            engine.submit(&Action::EndTurn);
        }
        serde_json::to_string(engine.state()).unwrap()
    };

    assert_eq!(run(7), run(7));
}
