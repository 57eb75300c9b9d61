//! Core vocabulary: ids, elements, actions, RNG, and match configuration.

pub mod action;
pub mod config;
pub mod element;
pub mod ids;
pub mod rng;

pub use action::{Action, ActionOutcome, Choice, ChoiceSpec, LightningMode};
pub use config::{MatchParams, MatchSetup, PlayerSetup, SetupError, MAX_ROSTER};
pub use element::{calculate_damage, Element};
pub use ids::{CardId, GodId, MatchId, PlayerId};
pub use rng::{MatchRng, MatchRngState};
