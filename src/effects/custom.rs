//! Custom effect dispatch.
//!
//! God-specific mechanics live in a [`CustomRegistry`]: a table of handlers
//! keyed by [`CustomEffectId`], each independently testable. Resolution is
//! two-phase — `begin` performs everything immediately computable and either
//! finishes ([`Resolution::Resolved`]) or parks the match behind a
//! [`ChoiceSpec`] ([`Resolution::AwaitingChoice`]); the orchestrator later
//! supplies a [`Choice`](crate::core::Choice) through
//! [`MatchEngine::complete_choice`](crate::engine::MatchEngine::complete_choice),
//! which runs the handler's `complete` half.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{CardCatalog, CustomEffectId};
use crate::core::{
    ActionOutcome, CardId, Choice, ChoiceSpec, Element, GodId, LightningMode, MatchParams,
    MatchRng, PlayerId,
};
use crate::state::{MatchState, PendingChoice};

/// What `begin` produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The effect finished synchronously.
    Resolved,
    /// The effect needs an external decision before the turn can end.
    AwaitingChoice(ChoiceSpec),
}

/// Per-cast inputs handed to a handler's `begin`.
#[derive(Clone, Debug)]
pub struct CustomContext {
    /// The casting player.
    pub caster: PlayerId,
    /// The god whose spellbook the card belongs to.
    pub caster_god: GodId,
    /// The card being played.
    pub card: CardId,
    /// The card's element, used for weakness-checked damage.
    pub card_element: Element,
    /// The effect descriptor's numeric value.
    pub value: i32,
    /// Targets resolved for this effect, in order.
    pub targets: SmallVec<[GodId; 4]>,
    /// Charge-or-detonate selector, when the action carried one.
    pub lightning: Option<LightningMode>,
    /// Element pick, when the action carried one.
    pub chosen_element: Option<Element>,
}

/// First phase of a custom effect.
pub type BeginFn =
    fn(&mut MatchState, &mut MatchRng, &CardCatalog, &CustomContext) -> Resolution;

/// Second phase, run when the orchestrator supplies the missing choice.
///
/// A rejection leaves the pending choice in place; the handler must
/// validate the choice before mutating anything.
pub type CompleteFn = fn(
    &mut MatchState,
    &mut MatchRng,
    &CardCatalog,
    &MatchParams,
    &PendingChoice,
    &Choice,
) -> ActionOutcome;

/// One registered custom mechanic.
#[derive(Clone, Copy)]
pub struct CustomHandler {
    /// Synchronous phase.
    pub begin: BeginFn,
    /// Completion phase for handlers that can pause.
    pub complete: Option<CompleteFn>,
}

/// Handler table keyed by effect id.
#[derive(Clone, Default)]
pub struct CustomRegistry {
    handlers: FxHashMap<CustomEffectId, CustomHandler>,
}

impl CustomRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in handler registered.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        super::handlers::register_builtin(&mut registry);
        registry
    }

    /// Register a handler.
    ///
    /// Panics if the id is already registered — duplicate mechanics are a
    /// content bug.
    pub fn register(&mut self, id: CustomEffectId, handler: CustomHandler) {
        if self.handlers.contains_key(&id) {
            panic!("custom effect {id} already registered");
        }
        self.handlers.insert(id, handler);
    }

    /// Look up a handler.
    #[must_use]
    pub fn get(&self, id: &CustomEffectId) -> Option<&CustomHandler> {
        self.handlers.get(id)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CustomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_begin(
        _state: &mut MatchState,
        _rng: &mut MatchRng,
        _catalog: &CardCatalog,
        _ctx: &CustomContext,
    ) -> Resolution {
        Resolution::Resolved
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CustomRegistry::new();
        assert!(registry.is_empty());

        registry.register(
            CustomEffectId::new("noop"),
            CustomHandler {
                begin: noop_begin,
                complete: None,
            },
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.get(&CustomEffectId::new("noop")).is_some());
        assert!(registry.get(&CustomEffectId::new("missing")).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = CustomRegistry::new();
        let handler = CustomHandler {
            begin: noop_begin,
            complete: None,
        };
        registry.register(CustomEffectId::new("noop"), handler);
        registry.register(CustomEffectId::new("noop"), handler);
    }

    #[test]
    fn test_builtin_registry_is_populated() {
        let registry = CustomRegistry::builtin();
        assert!(registry.get(&CustomEffectId::new("lifesteal")).is_some());
        assert!(registry.get(&CustomEffectId::new("raise_dead")).is_some());
        assert!(registry.len() >= 13);
    }
}
