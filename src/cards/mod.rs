//! Card templates and the content catalog.

pub mod catalog;
pub mod effect;
pub mod god;
pub mod spell;

pub use catalog::CardCatalog;
pub use effect::{CustomEffectId, EffectKind, EffectSpec, TargetKind};
pub use god::GodCard;
pub use spell::{Archetype, SpellCard};
