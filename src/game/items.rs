//! # Item Drops
//!
//! The closed set of everything a drop roll can produce: nothing, the two
//! unlimited consumables, and the eight unique gear pieces the player is
//! trying to recover.

use serde::{Deserialize, Serialize};

/// One outcome of a drop roll.
///
/// `Shield`, `Sword`, and the six armor pieces are unique gear: each can drop
/// at most once per run, which the [`DropEngine`](crate::DropEngine) tracks.
/// Potions and scrolls are unlimited consumables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DropKind {
    NoItem,
    HealthPotion,
    EscapeScroll,
    Shield,
    Sword,
    Helm,
    Pauldrons,
    Cuirass,
    Gauntlets,
    LegGuards,
    Boots,
}

impl DropKind {
    /// The six wearable armor pieces, in canonical order.
    pub const ARMOR_PIECES: [DropKind; 6] = [
        DropKind::Helm,
        DropKind::Pauldrons,
        DropKind::Cuirass,
        DropKind::Gauntlets,
        DropKind::LegGuards,
        DropKind::Boots,
    ];

    /// All unique gear, in canonical order: shield, sword, then armor.
    pub const UNIQUE_GEAR: [DropKind; 8] = [
        DropKind::Shield,
        DropKind::Sword,
        DropKind::Helm,
        DropKind::Pauldrons,
        DropKind::Cuirass,
        DropKind::Gauntlets,
        DropKind::LegGuards,
        DropKind::Boots,
    ];

    /// Whether this drop is a wearable armor piece.
    ///
    /// # Examples
    ///
    /// ```
    /// use sanctum::DropKind;
    ///
    /// assert!(DropKind::Helm.is_armor());
    /// assert!(!DropKind::Shield.is_armor());
    /// assert!(!DropKind::HealthPotion.is_armor());
    /// ```
    pub fn is_armor(self) -> bool {
        Self::ARMOR_PIECES.contains(&self)
    }

    /// Whether this drop is one of the eight once-per-run gear pieces.
    pub fn is_unique_gear(self) -> bool {
        Self::UNIQUE_GEAR.contains(&self)
    }

    /// Display name used in menus and fallback narration.
    pub fn display_name(self) -> &'static str {
        match self {
            DropKind::NoItem => "nothing",
            DropKind::HealthPotion => "Health Potion",
            DropKind::EscapeScroll => "Escape Scroll",
            DropKind::Shield => "Shield",
            DropKind::Sword => "Sword",
            DropKind::Helm => "Helm",
            DropKind::Pauldrons => "Pauldrons",
            DropKind::Cuirass => "Cuirass",
            DropKind::Gauntlets => "Gauntlets",
            DropKind::LegGuards => "Leg Guards",
            DropKind::Boots => "Boots",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_gear_covers_shield_sword_and_armor() {
        assert_eq!(DropKind::UNIQUE_GEAR.len(), 8);
        assert!(DropKind::UNIQUE_GEAR.contains(&DropKind::Shield));
        assert!(DropKind::UNIQUE_GEAR.contains(&DropKind::Sword));
        for piece in DropKind::ARMOR_PIECES {
            assert!(DropKind::UNIQUE_GEAR.contains(&piece));
            assert!(piece.is_armor());
            assert!(piece.is_unique_gear());
        }
    }

    #[test]
    fn test_consumables_are_not_unique_gear() {
        assert!(!DropKind::NoItem.is_unique_gear());
        assert!(!DropKind::HealthPotion.is_unique_gear());
        assert!(!DropKind::EscapeScroll.is_unique_gear());
    }
}
