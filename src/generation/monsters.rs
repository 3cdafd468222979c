//! # Monster Generation
//!
//! Builds fully-formed [`Monster`] instances from a small in-memory template
//! table, and decides when the single end-of-run boss appears instead.

use crate::config::GameConfig;
use crate::game::{Monster, Weakness};
use crate::utils::RandomSource;

/// A catalog entry for a regular foe. Stats left `None` are rolled from the
/// configured ranges at encounter time.
#[derive(Debug, Clone, Copy)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub weaknesses: &'static [Weakness],
    pub description: &'static str,
    pub health: Option<i32>,
    pub strength: Option<i32>,
}

const TEMPLATES: &[MonsterTemplate] = &[
    MonsterTemplate {
        name: "Skeleton",
        weaknesses: &[Weakness::HolySmite],
        description: "A humanoid frame of loose bones held by brittle bindings; light, rattling steps and hollow gaze.",
        health: None,
        strength: None,
    },
    MonsterTemplate {
        name: "Goblin Bandit",
        weaknesses: &[Weakness::SwordSlash],
        description: "A small, agile greenskin with oversized ears and quick hands; favors scavenged gear and sudden lunges.",
        health: None,
        strength: None,
    },
    MonsterTemplate {
        name: "Giant Rat",
        weaknesses: &[Weakness::ShieldBash],
        description: "An oversized rat with patchy fur and prominent incisors; jittery, low to the ground, always testing distance.",
        health: None,
        strength: None,
    },
    MonsterTemplate {
        name: "Wraith",
        weaknesses: &[Weakness::HolySmite],
        description: "A dim, humanoid outline woven from chill mist; light fades and warmth thins in its presence.",
        health: None,
        strength: None,
    },
];

const BOSS_NAME: &str = "Grave Tyrant";
const BOSS_DESCRIPTION: &str = "An armored lich-king draped in funereal banners. A corroded crown sits on a skull carved with runes; a great blade of black iron rests across its lap. Plates of ornate mail are missing in places, revealing ribs choked with grave dust. Clutched in its skeletal grasp, the Heart of Radiance pulses with a faint, struggling light: the sacred relic you came to reclaim, its divine radiance dimmed but not extinguished by the creature's dark presence.";

/// Factory for adversaries.
///
/// Centralizes all the variability (template choice, stat rolls, boss gating)
/// so the session loop just asks for "the next monster".
pub struct MonsterGenerator {
    templates: &'static [MonsterTemplate],
}

impl Default for MonsterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MonsterGenerator {
    pub fn new() -> Self {
        Self {
            templates: TEMPLATES,
        }
    }

    /// Generates the monster for the next encounter.
    ///
    /// Once enough monsters have fallen, each monster room has a configured
    /// chance of holding the boss instead of a regular foe. Below the
    /// threshold the boss draw is never made, so the boss can never appear
    /// early no matter what the random source returns.
    pub fn generate(
        &self,
        defeated_count: u32,
        config: &GameConfig,
        rng: &mut dyn RandomSource,
    ) -> Monster {
        if defeated_count >= config.boss_spawn_threshold
            && rng.next_unit() < config.boss_spawn_chance
        {
            log::debug!("boss spawn after {defeated_count} defeats");
            return self.boss(config);
        }
        self.regular(config, rng)
    }

    fn regular(&self, config: &GameConfig, rng: &mut dyn RandomSource) -> Monster {
        let template = &self.templates[rng.pick_index(self.templates.len())];
        let (health_min, health_max) = config.monster_health_range;
        let max_health = template
            .health
            .unwrap_or_else(|| rng.int_in_range(health_min, health_max));
        let (strength_min, strength_max) = config.monster_strength_range;
        let strength = template
            .strength
            .unwrap_or_else(|| rng.int_in_range(strength_min, strength_max));
        log::debug!("generated {} ({max_health} hp, {strength} str)", template.name);
        Monster::new(
            template.name.to_string(),
            template.description.to_string(),
            max_health,
            strength,
            // Copied, never shared, so per-instance mutation cannot touch the table.
            template.weaknesses.to_vec(),
            false,
        )
    }

    /// The single end-of-run boss: fixed stats, no weaknesses.
    pub fn boss(&self, config: &GameConfig) -> Monster {
        Monster::new(
            BOSS_NAME.to_string(),
            BOSS_DESCRIPTION.to_string(),
            config.boss_health,
            config.boss_strength,
            Vec::new(),
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRandom;

    #[test]
    fn test_regular_monster_from_template() {
        let config = GameConfig::default();
        let generator = MonsterGenerator::new();
        let mut rng = ScriptedRandom::new();
        rng.queue_index(1); // Goblin Bandit
        rng.queue_int(20);
        rng.queue_int(5);
        let monster = generator.generate(0, &config, &mut rng);
        assert_eq!(monster.name, "Goblin Bandit");
        assert_eq!(monster.max_health, 20);
        assert_eq!(monster.health, 20);
        assert_eq!(monster.strength, 5);
        assert_eq!(monster.weaknesses, vec![Weakness::SwordSlash]);
        assert!(!monster.is_boss);
        assert!(monster.item_drop.is_none());
    }

    #[test]
    fn test_stats_stay_in_configured_ranges() {
        let config = GameConfig::default();
        let generator = MonsterGenerator::new();
        let mut rng = crate::utils::SeededRandom::new(99);
        for _ in 0..200 {
            let monster = generator.generate(0, &config, &mut rng);
            assert!((16..=26).contains(&monster.max_health));
            assert!((3..=7).contains(&monster.strength));
        }
    }

    #[test]
    fn test_boss_never_spawns_below_threshold() {
        let config = GameConfig {
            boss_spawn_chance: 1.0,
            ..GameConfig::default()
        };
        let generator = MonsterGenerator::new();
        // Unit draws of 0.0 would always pass the boss check if it were made.
        for defeated in 0..config.boss_spawn_threshold {
            let mut rng = ScriptedRandom::new().default_unit(0.0);
            let monster = generator.generate(defeated, &config, &mut rng);
            assert!(!monster.is_boss, "boss appeared after {defeated} defeats");
        }
    }

    #[test]
    fn test_boss_spawns_past_threshold_on_low_draw() {
        let config = GameConfig::default();
        let generator = MonsterGenerator::new();
        let mut rng = ScriptedRandom::with_units([0.1]); // below boss_spawn_chance 0.2
        let monster = generator.generate(config.boss_spawn_threshold, &config, &mut rng);
        assert!(monster.is_boss);
        assert_eq!(monster.max_health, config.boss_health);
        assert_eq!(monster.strength, config.boss_strength);
        assert!(monster.weaknesses.is_empty());
    }

    #[test]
    fn test_high_draw_past_threshold_stays_regular() {
        let config = GameConfig::default();
        let generator = MonsterGenerator::new();
        let mut rng = ScriptedRandom::with_units([0.9]);
        let monster = generator.generate(config.boss_spawn_threshold, &config, &mut rng);
        assert!(!monster.is_boss);
    }

    #[test]
    fn test_weakness_sets_are_per_instance() {
        let config = GameConfig::default();
        let generator = MonsterGenerator::new();
        let mut rng = ScriptedRandom::new();
        let mut first = generator.generate(0, &config, &mut rng);
        first.weaknesses.clear();
        let mut rng = ScriptedRandom::new();
        let second = generator.generate(0, &config, &mut rng);
        assert_eq!(second.weaknesses, vec![Weakness::HolySmite]);
    }
}
