//! # god-arena
//!
//! A deterministic rules engine for a two-player, turn-based god
//! card-battle game: each side controls up to four gods, each with a
//! five-card spellbook, and wins by reducing every enemy god to zero
//! health.
//!
//! ## Design Principles
//!
//! 1. **Explicit engine values**: one [`MatchEngine`] per match, no ambient
//!    globals — a process can host any number of concurrent matches.
//!
//! 2. **Deterministic**: every random decision flows through one seedable
//!    RNG per match, so two engine copies fed the same action sequence
//!    reach bit-identical state (multiplayer fairness, replays).
//!
//! 3. **Snapshots over events**: the full [`MatchState`] is the sole
//!    observation surface, backed by persistent data structures so clones
//!    are cheap.
//!
//! 4. **Rule violations are data**: expected violations return
//!    `{success: false, message}`; nothing past match construction panics
//!    on caller input.
//!
//! ## Modules
//!
//! - `core`: ids, elements, actions, RNG, match configuration
//! - `cards`: god/spell templates, effect descriptors, the content catalog
//! - `state`: runtime god/player/match records and the status ledger
//! - `effects`: targeting, built-in effect resolution, custom dispatch
//! - `engine`: the match engine — validation, turn and resource management
//! - `ai`: the scripted AI opponent

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use crate::core::{
    calculate_damage, Action, ActionOutcome, CardId, Choice, ChoiceSpec, Element, GodId,
    LightningMode, MatchId, MatchParams, MatchRng, MatchRngState, MatchSetup, PlayerId,
    PlayerSetup, SetupError,
};

pub use crate::cards::{
    Archetype, CardCatalog, CustomEffectId, EffectKind, EffectSpec, GodCard, SpellCard, TargetKind,
};

pub use crate::state::{
    GodState, MatchState, MatchStatus, PendingChoice, PlayerState, StatusEntry, StatusKind,
    WeaknessOverride,
};

pub use crate::effects::{
    custom_ids, CustomContext, CustomHandler, CustomRegistry, Resolution,
};

pub use crate::engine::MatchEngine;

pub use crate::ai::{ActingGuard, ActingToken, AiPlayer, Difficulty};
