//! Effect resolution: targeting, built-in effects and custom dispatch.

pub mod custom;
pub mod handlers;
pub mod resolver;
pub mod targeting;

pub use custom::{BeginFn, CompleteFn, CustomContext, CustomHandler, CustomRegistry, Resolution};
pub use handlers::ids as custom_ids;

pub(crate) use resolver::{
    apply_damage, check_victory, purge_dead_god_cards, resolve_spell, CastContext,
};
pub(crate) use targeting::provoking_god;
