//! # Actors
//!
//! The battle participants and the damage math they share. [`Actor`] captures
//! the one invariant everything else leans on: health never leaves
//! `[0, max_health]`, no matter what sequence of hits and heals arrives.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::{Action, DropKind, Weakness};

/// Shared capability set for battle participants.
///
/// Damage application and aliveness live here so the player and monsters
/// cannot drift apart on the core arithmetic.
pub trait Actor {
    /// Maximum health; fixed for the actor's lifetime.
    fn max_health(&self) -> i32;

    /// Current health in `[0, max_health]`.
    fn health(&self) -> i32;

    /// Replaces current health. Implementations clamp into `[0, max_health]`.
    fn set_health(&mut self, health: i32);

    /// Strength added to this actor's outgoing damage.
    fn strength(&self) -> i32;

    /// Applies incoming damage reduced by defense, returning the damage
    /// actually taken. Negative inputs are clamped, not rejected.
    fn take_damage(&mut self, raw_damage: i32, defense: i32) -> i32 {
        let reduced = (raw_damage - defense.max(0)).max(0);
        self.set_health(self.health() - reduced);
        reduced
    }

    /// An actor is alive while it has health left.
    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

/// Consumable counts, with mutation rules in one place so counts can never
/// go negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    potions: u32,
    escape_scrolls: u32,
}

impl Inventory {
    pub fn potions(&self) -> u32 {
        self.potions
    }

    pub fn escape_scrolls(&self) -> u32 {
        self.escape_scrolls
    }

    pub fn add_potion(&mut self) {
        self.potions += 1;
    }

    /// Removes one potion if any is held. Returns whether one was consumed.
    pub fn remove_potion(&mut self) -> bool {
        if self.potions > 0 {
            self.potions -= 1;
            true
        } else {
            false
        }
    }

    pub fn add_escape_scroll(&mut self) {
        self.escape_scrolls += 1;
    }

    /// Removes one escape scroll if any is held. Returns whether one was
    /// consumed.
    pub fn remove_escape_scroll(&mut self) -> bool {
        if self.escape_scrolls > 0 {
            self.escape_scrolls -= 1;
            true
        } else {
            false
        }
    }
}

/// The player character: an [`Actor`] plus defense, consumables, and the
/// equipment unlocks that gate abilities.
///
/// Created once at run start (injured by the opening ambush) and mutated for
/// the whole run; the run ends on death or victory, never by replacing the
/// player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub max_health: i32,
    pub strength: i32,
    pub health: i32,
    pub base_defense: i32,
    pub inventory: Inventory,
    pub owned_armor: BTreeSet<DropKind>,
    pub has_shield: bool,
    pub has_sword: bool,
}

impl Player {
    /// Creates the player for a new run, starting at the configured ambush
    /// health rather than full.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            max_health: config.player_max_health,
            strength: config.player_strength,
            health: config.player_starting_health.min(config.player_max_health),
            base_defense: config.player_base_defense,
            inventory: Inventory::default(),
            owned_armor: BTreeSet::new(),
            has_shield: false,
            has_sword: false,
        }
    }

    /// Effective defense: base plus a bonus per owned armor piece. The shield
    /// unlocks Shield Bash but grants no defense.
    pub fn defense(&self, config: &GameConfig) -> i32 {
        self.base_defense + self.owned_armor.len() as i32 * config.armor_defense_per_piece
    }

    /// Equips an armor piece. Non-armor drops and duplicates are ignored.
    pub fn add_armor_piece(&mut self, piece: DropKind) {
        if piece.is_armor() {
            self.owned_armor.insert(piece);
        }
    }

    /// Drinks a potion for a full heal. Returns whether a potion was consumed.
    pub fn use_potion(&mut self) -> bool {
        if self.inventory.remove_potion() {
            self.health = self.max_health;
            true
        } else {
            false
        }
    }

    /// Full heal outside of combat (praying at a quiet moment).
    pub fn restore_full(&mut self) {
        self.health = self.max_health;
    }

    /// Damage abilities currently unlocked, in menu order. Holy Smite is
    /// always available; the others are gated on recovered equipment.
    pub fn unlocked_abilities(&self) -> Vec<Action> {
        let mut abilities = vec![Action::HolySmite];
        if self.has_sword {
            abilities.push(Action::SwordSlash);
        }
        if self.has_shield {
            abilities.push(Action::ShieldBash);
        }
        abilities
    }

    /// Whether every stolen gear piece has been recovered.
    pub fn has_all_gear(&self) -> bool {
        self.has_shield && self.has_sword && self.owned_armor.len() == DropKind::ARMOR_PIECES.len()
    }
}

impl Actor for Player {
    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    fn strength(&self) -> i32 {
        self.strength
    }
}

/// A single adversary, alive for one combat phase only.
///
/// Weaknesses are owned per instance (copied out of the template table), and
/// `item_drop` is pre-assigned at encounter time so the narrator can foreshadow
/// it before the fight resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub description: String,
    pub max_health: i32,
    pub strength: i32,
    pub health: i32,
    pub weaknesses: Vec<Weakness>,
    pub is_boss: bool,
    pub item_drop: Option<DropKind>,
}

impl Monster {
    pub fn new(
        name: String,
        description: String,
        max_health: i32,
        strength: i32,
        weaknesses: Vec<Weakness>,
        is_boss: bool,
    ) -> Self {
        Self {
            name,
            description,
            max_health,
            strength,
            health: max_health,
            weaknesses,
            is_boss,
            item_drop: None,
        }
    }

    /// Whether the given weakness is among this monster's susceptibilities.
    pub fn is_weak_to(&self, weakness: Weakness) -> bool {
        self.weaknesses.contains(&weakness)
    }
}

impl Actor for Monster {
    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    fn strength(&self) -> i32 {
        self.strength
    }
}
