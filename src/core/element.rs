//! The elemental weakness system.
//!
//! Seven elements form two independent cycles:
//!
//! - A five-element main cycle: fire → air → earth → lightning → water → fire,
//!   where the arrow points at the element a god of that element is weak to.
//! - A two-element mutual pair: light and darkness are each other's weakness.
//!
//! [`Element::weakness`] and [`Element::strength`] invert each other over
//! both cycles. Damage is doubled exactly when the attacking element matches
//! the defender's weakness; everything else passes through unchanged.

use serde::{Deserialize, Serialize};

/// One of the seven elements a god or spell can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Air,
    Earth,
    Lightning,
    Water,
    Light,
    Darkness,
}

impl Element {
    /// All elements, main cycle first.
    pub const ALL: [Element; 7] = [
        Element::Fire,
        Element::Air,
        Element::Earth,
        Element::Lightning,
        Element::Water,
        Element::Light,
        Element::Darkness,
    ];

    /// The element this element is weak to.
    #[must_use]
    pub const fn weakness(self) -> Element {
        match self {
            Element::Fire => Element::Air,
            Element::Air => Element::Earth,
            Element::Earth => Element::Lightning,
            Element::Lightning => Element::Water,
            Element::Water => Element::Fire,
            Element::Light => Element::Darkness,
            Element::Darkness => Element::Light,
        }
    }

    /// The element this element is strong against.
    ///
    /// Inverse of [`Element::weakness`]: `e.weakness().strength() == e`.
    #[must_use]
    pub const fn strength(self) -> Element {
        match self {
            Element::Fire => Element::Water,
            Element::Air => Element::Fire,
            Element::Earth => Element::Air,
            Element::Lightning => Element::Earth,
            Element::Water => Element::Lightning,
            Element::Light => Element::Darkness,
            Element::Darkness => Element::Light,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Fire => "fire",
            Element::Air => "air",
            Element::Earth => "earth",
            Element::Lightning => "lightning",
            Element::Water => "water",
            Element::Light => "light",
            Element::Darkness => "darkness",
        };
        f.write_str(name)
    }
}

/// Apply the weakness multiplier: `base * 2` when the attacking element
/// matches the defender's weakness, `base` otherwise.
#[must_use]
pub const fn calculate_damage(base: i32, attack: Element, defender_weakness: Element) -> i32 {
    if attack as u8 == defender_weakness as u8 {
        base * 2
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_main_cycle() {
        assert_eq!(Element::Fire.weakness(), Element::Air);
        assert_eq!(Element::Air.weakness(), Element::Earth);
        assert_eq!(Element::Earth.weakness(), Element::Lightning);
        assert_eq!(Element::Lightning.weakness(), Element::Water);
        assert_eq!(Element::Water.weakness(), Element::Fire);
    }

    #[test]
    fn test_light_darkness_pair() {
        assert_eq!(Element::Light.weakness(), Element::Darkness);
        assert_eq!(Element::Darkness.weakness(), Element::Light);
        assert_eq!(Element::Light.strength(), Element::Darkness);
        assert_eq!(Element::Darkness.strength(), Element::Light);
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(calculate_damage(3, Element::Fire, Element::Fire), 6);
        assert_eq!(calculate_damage(3, Element::Fire, Element::Water), 3);
        assert_eq!(calculate_damage(0, Element::Air, Element::Air), 0);
    }

    #[test]
    fn test_no_fixed_points() {
        // No element is its own weakness, so a substituted
        // `attack.weakness()` can never re-trigger the multiplier.
        for e in Element::ALL {
            assert_ne!(e.weakness(), e);
        }
    }

    fn any_element() -> impl Strategy<Value = Element> {
        prop::sample::select(Element::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_cycle_closure(e in any_element()) {
            prop_assert_eq!(e.weakness().strength(), e);
            prop_assert_eq!(e.strength().weakness(), e);
        }

        #[test]
        fn prop_multiplier_laws(base in 0i32..1000, a in any_element(), w in any_element()) {
            let dealt = calculate_damage(base, a, w);
            if a == w {
                prop_assert_eq!(dealt, base * 2);
            } else {
                prop_assert_eq!(dealt, base);
            }
        }
    }
}
