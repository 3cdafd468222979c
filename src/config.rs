//! # Game Configuration
//!
//! All tunable numbers for a run live here. No engine logic depends on the
//! specific values beyond their relative ordering; everything is validated
//! once, up front, when a session is created.

use serde::{Deserialize, Serialize};

use crate::{SanctumError, SanctumResult};

/// Relative weights for the room category drawn on each exploration step.
///
/// Weights need not sum to 1; selection normalizes by the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomWeights {
    pub empty: f64,
    pub loot: f64,
    pub monster: f64,
}

/// Relative weights for the loot buckets rolled by the drop engine.
///
/// When no armor piece remains in the run, the armor weight is folded into
/// `no_item` so the total probability mass is conserved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropWeights {
    pub no_item: f64,
    pub health_potion: f64,
    pub escape_scroll: f64,
    pub armor: f64,
}

/// Tuning constants for a single run.
///
/// # Examples
///
/// ```
/// use sanctum::GameConfig;
///
/// let config = GameConfig::default();
/// assert!(config.validate().is_ok());
/// assert!(config.player_starting_health <= config.player_max_health);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player maximum health
    pub player_max_health: i32,
    /// Player strength added to every ability's base damage
    pub player_strength: i32,
    /// Player defense before armor bonuses
    pub player_base_defense: i32,
    /// Health the player wakes up with after the opening ambush
    pub player_starting_health: i32,
    /// Inclusive health range for monsters without fixed stats
    pub monster_health_range: (i32, i32),
    /// Inclusive strength range for monsters without fixed stats
    pub monster_strength_range: (i32, i32),
    /// Holy Smite base damage
    pub holy_smite_damage: i32,
    /// Sword Slash base damage
    pub sword_slash_damage: i32,
    /// Shield Bash base damage
    pub shield_bash_damage: i32,
    /// Extra damage when an ability matches a monster weakness
    pub weakness_bonus: i32,
    /// Defense gained per owned armor piece
    pub armor_defense_per_piece: i32,
    /// Chance a flee attempt succeeds without an escape scroll
    pub flee_success_chance: f64,
    /// Boss health (fixed, never randomized)
    pub boss_health: i32,
    /// Boss strength (fixed, never randomized)
    pub boss_strength: i32,
    /// Minimum defeated monsters before the boss can appear
    pub boss_spawn_threshold: u32,
    /// Chance per monster room, once past the threshold, that the boss appears
    pub boss_spawn_chance: f64,
    /// Room category weights
    pub room_weights: RoomWeights,
    /// Loot bucket weights
    pub drop_weights: DropWeights,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_max_health: 20,
            player_strength: 5,
            player_base_defense: 1,
            player_starting_health: 10,
            monster_health_range: (16, 26),
            monster_strength_range: (3, 7),
            holy_smite_damage: 6,
            sword_slash_damage: 8,
            shield_bash_damage: 5,
            weakness_bonus: 5,
            armor_defense_per_piece: 2,
            flee_success_chance: 0.5,
            boss_health: 45,
            boss_strength: 9,
            boss_spawn_threshold: 3,
            boss_spawn_chance: 0.2,
            room_weights: RoomWeights {
                empty: 0.1,
                loot: 0.1,
                monster: 0.8,
            },
            drop_weights: DropWeights {
                no_item: 0.4,
                health_potion: 0.25,
                escape_scroll: 0.05,
                armor: 0.3,
            },
        }
    }
}

impl GameConfig {
    /// Creates a configuration for testing with short, decisive fights.
    ///
    /// Monsters die to a single unboosted hit, the boss appears right after
    /// the first kill, and every room holds a monster.
    pub fn for_testing() -> Self {
        Self {
            player_max_health: 30,
            player_starting_health: 30,
            monster_health_range: (5, 5),
            monster_strength_range: (1, 1),
            boss_health: 10,
            boss_strength: 2,
            boss_spawn_threshold: 1,
            boss_spawn_chance: 1.0,
            room_weights: RoomWeights {
                empty: 0.0,
                loot: 0.0,
                monster: 1.0,
            },
            ..Self::default()
        }
    }

    /// Base damage for a damage-dealing action, before strength and weakness
    /// bonuses. Returns `None` for non-damage actions.
    pub fn ability_damage(&self, action: crate::game::Action) -> Option<i32> {
        use crate::game::Action;
        match action {
            Action::HolySmite => Some(self.holy_smite_damage),
            Action::SwordSlash => Some(self.sword_slash_damage),
            Action::ShieldBash => Some(self.shield_bash_damage),
            Action::UsePotion | Action::Flee => None,
        }
    }

    /// Validates the configuration, failing fast on values no run could make
    /// sense of. Weight sets are allowed to sum to anything positive.
    pub fn validate(&self) -> SanctumResult<()> {
        if self.player_max_health <= 0 {
            return Err(SanctumError::InvalidConfig(format!(
                "player_max_health must be positive, got {}",
                self.player_max_health
            )));
        }
        if self.player_starting_health <= 0 || self.player_starting_health > self.player_max_health
        {
            return Err(SanctumError::InvalidConfig(format!(
                "player_starting_health must be in 1..={}, got {}",
                self.player_max_health, self.player_starting_health
            )));
        }
        if self.player_strength < 0 || self.player_base_defense < 0 {
            return Err(SanctumError::InvalidConfig(
                "player strength and base defense must be non-negative".to_string(),
            ));
        }
        let (health_min, health_max) = self.monster_health_range;
        if health_min <= 0 || health_min > health_max {
            return Err(SanctumError::InvalidConfig(format!(
                "monster_health_range must be a positive inclusive range, got ({health_min}, {health_max})"
            )));
        }
        let (strength_min, strength_max) = self.monster_strength_range;
        if strength_min < 0 || strength_min > strength_max {
            return Err(SanctumError::InvalidConfig(format!(
                "monster_strength_range must be a non-negative inclusive range, got ({strength_min}, {strength_max})"
            )));
        }
        if self.holy_smite_damage < 0 || self.sword_slash_damage < 0 || self.shield_bash_damage < 0
        {
            return Err(SanctumError::InvalidConfig(
                "ability base damage must be non-negative".to_string(),
            ));
        }
        if self.weakness_bonus < 0 || self.armor_defense_per_piece < 0 {
            return Err(SanctumError::InvalidConfig(
                "weakness bonus and armor defense must be non-negative".to_string(),
            ));
        }
        if self.boss_health <= 0 || self.boss_strength < 0 {
            return Err(SanctumError::InvalidConfig(format!(
                "boss stats must be positive health and non-negative strength, got ({}, {})",
                self.boss_health, self.boss_strength
            )));
        }
        for (name, chance) in [
            ("flee_success_chance", self.flee_success_chance),
            ("boss_spawn_chance", self.boss_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(SanctumError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {chance}"
                )));
            }
        }
        let weights = [
            ("room_weights.empty", self.room_weights.empty),
            ("room_weights.loot", self.room_weights.loot),
            ("room_weights.monster", self.room_weights.monster),
            ("drop_weights.no_item", self.drop_weights.no_item),
            ("drop_weights.health_potion", self.drop_weights.health_potion),
            ("drop_weights.escape_scroll", self.drop_weights.escape_scroll),
            ("drop_weights.armor", self.drop_weights.armor),
        ];
        for (name, weight) in weights {
            if weight < 0.0 || !weight.is_finite() {
                return Err(SanctumError::InvalidConfig(format!(
                    "{name} must be a finite non-negative weight, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_rejects_nonpositive_max_health() {
        let config = GameConfig {
            player_max_health: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_starting_health_above_max() {
        let config = GameConfig {
            player_starting_health: 21,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = GameConfig::default();
        config.drop_weights.armor = -0.3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let config = GameConfig {
            flee_success_chance: 1.5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
