//! Identifier newtypes for players, gods, cards and matches.
//!
//! Every runtime record is addressed by one of these ids. Templates and
//! runtime state never hold references to each other; lookups go through
//! the [`CardCatalog`](crate::cards::CardCatalog) or [`MatchState`]
//! accessors instead.
//!
//! [`MatchState`]: crate::state::MatchState

use serde::{Deserialize, Serialize};

/// Player identifier for a two-player match.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The second player.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID. Only 0 and 1 are meaningful in a match.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player of a two-player match.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Unique identifier for a god template and its runtime state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GodId(pub u32);

impl GodId {
    /// Create a new god ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "God({})", self.0)
    }
}

/// Unique identifier for a spell card template.
///
/// This identifies the card as content ("Pyre Lash"), not a physical copy;
/// decks in this game never contain duplicates of the same spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Match identifier assigned by the hosting layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(String);

impl MatchId {
    /// Create a new match ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
        assert_eq!(PlayerId::FIRST.opponent().opponent(), PlayerId::FIRST);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PlayerId::new(1)), "Player 1");
        assert_eq!(format!("{}", GodId::new(7)), "God(7)");
        assert_eq!(format!("{}", CardId::new(42)), "Card(42)");
        assert_eq!(format!("{}", MatchId::new("m-1")), "m-1");
    }

    #[test]
    fn test_id_serialization() {
        let id = GodId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        let back: GodId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
