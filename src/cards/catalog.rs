//! The immutable card/content catalog.
//!
//! The engine only ever reads the catalog; building it is the content
//! layer's job. Registration panics on duplicate ids — that is a content
//! bug, not a runtime condition.

use rustc_hash::FxHashMap;

use crate::core::{CardId, GodId};

use super::god::GodCard;
use super::spell::SpellCard;

/// Registry of god and spell templates, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    gods: FxHashMap<GodId, GodCard>,
    spells: FxHashMap<CardId, SpellCard>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a god template.
    ///
    /// Panics if a god with the same id already exists.
    pub fn register_god(&mut self, god: GodCard) {
        if self.gods.contains_key(&god.id) {
            panic!("god {} already registered", god.id);
        }
        self.gods.insert(god.id, god);
    }

    /// Register a spell template.
    ///
    /// Panics if a spell with the same id already exists.
    pub fn register_spell(&mut self, spell: SpellCard) {
        if self.spells.contains_key(&spell.id) {
            panic!("spell {} already registered", spell.id);
        }
        self.spells.insert(spell.id, spell);
    }

    /// Get a god template.
    #[must_use]
    pub fn god(&self, id: GodId) -> Option<&GodCard> {
        self.gods.get(&id)
    }

    /// Get a spell template.
    #[must_use]
    pub fn spell(&self, id: CardId) -> Option<&SpellCard> {
        self.spells.get(&id)
    }

    /// Iterate over a god's spellbook, in id order.
    pub fn spells_of(&self, god: GodId) -> impl Iterator<Item = &SpellCard> {
        let mut spells: Vec<&SpellCard> = self.spells.values().filter(|s| s.god == god).collect();
        spells.sort_by_key(|s| s.id);
        spells.into_iter()
    }

    /// Number of registered gods.
    #[must_use]
    pub fn god_count(&self) -> usize {
        self.gods.len()
    }

    /// Number of registered spells.
    #[must_use]
    pub fn spell_count(&self) -> usize {
        self.spells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::spell::Archetype;
    use crate::core::Element;

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register_god(GodCard::new(
            GodId::new(1),
            "Vulcan",
            Element::Fire,
            20,
            Element::Water,
        ));
        catalog.register_spell(SpellCard::new(
            CardId::new(10),
            "Pyre Lash",
            Element::Fire,
            GodId::new(1),
            Archetype::Competence,
        ));
        catalog.register_spell(SpellCard::new(
            CardId::new(11),
            "Cinder Veil",
            Element::Fire,
            GodId::new(1),
            Archetype::Utility,
        ));
        catalog
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.god(GodId::new(1)).unwrap().name, "Vulcan");
        assert!(catalog.god(GodId::new(9)).is_none());
        assert_eq!(catalog.spell(CardId::new(10)).unwrap().name, "Pyre Lash");
        assert_eq!(catalog.god_count(), 1);
        assert_eq!(catalog.spell_count(), 2);
    }

    #[test]
    fn test_spells_of_in_id_order() {
        let catalog = catalog();
        let book: Vec<_> = catalog.spells_of(GodId::new(1)).map(|s| s.id).collect();
        assert_eq!(book, vec![CardId::new(10), CardId::new(11)]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_spell_panics() {
        let mut catalog = catalog();
        catalog.register_spell(SpellCard::new(
            CardId::new(10),
            "Dup",
            Element::Fire,
            GodId::new(1),
            Archetype::Utility,
        ));
    }
}
