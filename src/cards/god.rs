//! Static god templates.

use serde::{Deserialize, Serialize};

use crate::core::{Element, GodId};

/// Immutable template for one god.
///
/// Runtime health and statuses live in
/// [`GodState`](crate::state::GodState); the template only carries the
/// unchanging content data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodCard {
    /// Unique id.
    pub id: GodId,
    /// Display name.
    pub name: String,
    /// The god's own element; spells usually share it.
    pub element: Element,
    /// Health the god starts the match with.
    pub max_health: i32,
    /// The element this god natively takes double damage from.
    pub weakness: Element,
}

impl GodCard {
    /// Create a god template.
    #[must_use]
    pub fn new(
        id: GodId,
        name: impl Into<String>,
        element: Element,
        max_health: i32,
        weakness: Element,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            max_health,
            weakness,
        }
    }
}
