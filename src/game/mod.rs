//! # Game Module
//!
//! Core combat state and rules for a run:
//! - Actor types (player, monster) with shared damage math
//! - The closed action vocabulary and its weakness mapping
//! - Per-turn combat resolution
//! - The session loop that alternates exploration and combat

pub mod actor;
pub mod combat;
pub mod items;
pub mod session;

pub use actor::*;
pub use combat::*;
pub use items::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Player intents during an encounter.
///
/// A closed enumeration fixes the set of valid actions at compile time; the
/// combat engine branches over it explicitly instead of dispatching through a
/// runtime ability map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    HolySmite,
    SwordSlash,
    ShieldBash,
    UsePotion,
    Flee,
}

impl Action {
    /// Human-readable label shown in combat menus.
    pub fn label(self) -> &'static str {
        match self {
            Action::HolySmite => "Holy Smite",
            Action::SwordSlash => "Sword Slash",
            Action::ShieldBash => "Shield Bash",
            Action::UsePotion => "Use Potion",
            Action::Flee => "Flee",
        }
    }

    /// The monster weakness this action exploits, if it deals damage.
    ///
    /// # Examples
    ///
    /// ```
    /// use sanctum::{Action, Weakness};
    ///
    /// assert_eq!(Action::ShieldBash.weakness(), Some(Weakness::ShieldBash));
    /// assert_eq!(Action::Flee.weakness(), None);
    /// ```
    pub fn weakness(self) -> Option<Weakness> {
        match self {
            Action::HolySmite => Some(Weakness::HolySmite),
            Action::SwordSlash => Some(Weakness::SwordSlash),
            Action::ShieldBash => Some(Weakness::ShieldBash),
            Action::UsePotion | Action::Flee => None,
        }
    }

    /// Whether this action deals damage to the monster.
    pub fn is_attack(self) -> bool {
        self.weakness().is_some()
    }
}

/// Monster susceptibility traits.
///
/// Kept separate from [`Action`] so combat rules stay declarative: each
/// damage action maps onto exactly one weakness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weakness {
    HolySmite,
    SwordSlash,
    ShieldBash,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_weakness_is_identity_mapping() {
        assert_eq!(Action::HolySmite.weakness(), Some(Weakness::HolySmite));
        assert_eq!(Action::SwordSlash.weakness(), Some(Weakness::SwordSlash));
        assert_eq!(Action::ShieldBash.weakness(), Some(Weakness::ShieldBash));
        assert_eq!(Action::UsePotion.weakness(), None);
        assert_eq!(Action::Flee.weakness(), None);
    }

    #[test]
    fn test_attack_classification() {
        assert!(Action::HolySmite.is_attack());
        assert!(Action::SwordSlash.is_attack());
        assert!(Action::ShieldBash.is_attack());
        assert!(!Action::UsePotion.is_attack());
        assert!(!Action::Flee.is_attack());
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::HolySmite.label(), "Holy Smite");
        assert_eq!(Action::UsePotion.label(), "Use Potion");
    }
}
