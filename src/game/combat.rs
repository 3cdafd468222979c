//! # Combat Resolution
//!
//! One encounter turn at a time: action legality, damage arithmetic with
//! weakness bonuses, and the no-retaliation rules for potions, flees, and
//! lethal hits. The engine mutates actors and reports what happened; all
//! prompting and narration stays outside.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::{Action, Actor, Monster, Player};
use crate::utils::RandomSource;
use crate::{SanctumError, SanctumResult};

/// Upper bound of the small uniform variance added to monster retaliation.
const RETALIATION_VARIANCE: i32 = 2;

/// The monster's counterattack within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retaliation {
    /// Damage the player actually took after defense.
    pub damage_taken: i32,
    /// Player health once the retaliation landed.
    pub player_health: i32,
}

/// Everything that happened in one resolved combat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// A potion was drunk (or fizzled with none held); the monster does not
    /// get a free hit on a potion turn.
    PotionUsed { healed: bool },
    /// The player broke away; combat is over with no reward.
    FleeSucceeded { scroll_used: bool },
    /// The flee attempt failed. The turn is spent, but no damage lands in
    /// either direction.
    FleeFailed,
    /// A damage ability connected.
    Strike {
        action: Action,
        damage_dealt: i32,
        weakness_hit: bool,
        monster_defeated: bool,
        /// Present unless the strike was lethal.
        retaliation: Option<Retaliation>,
    },
}

/// Terminal result of a whole combat phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    MonsterDefeated {
        final_action: Action,
        weakness_hit: bool,
    },
    PlayerFled,
    PlayerDead,
}

/// Per-turn combat rules.
pub struct CombatEngine {
    config: GameConfig,
}

impl CombatEngine {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Actions the player may legally take this turn, in menu order:
    /// unlocked damage abilities, then Use Potion (only while injured with a
    /// potion in hand), then Flee.
    pub fn available_actions(&self, player: &Player) -> Vec<Action> {
        let mut actions = player.unlocked_abilities();
        if player.health < player.max_health && player.inventory.potions() > 0 {
            actions.push(Action::UsePotion);
        }
        actions.push(Action::Flee);
        actions
    }

    /// Resolves one combat turn.
    ///
    /// An action outside [`Self::available_actions`] is rejected without any
    /// state change; the presentation layer only offers legal actions, so
    /// hitting this is a caller bug, not a player mistake.
    pub fn resolve_turn(
        &self,
        player: &mut Player,
        monster: &mut Monster,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> SanctumResult<TurnOutcome> {
        if !self.available_actions(player).contains(&action) {
            return Err(SanctumError::InvalidAction(format!(
                "{} is not available this turn",
                action.label()
            )));
        }

        match action {
            Action::UsePotion => {
                let healed = player.use_potion();
                log::debug!("potion turn, healed={healed}, health={}", player.health);
                Ok(TurnOutcome::PotionUsed { healed })
            }
            Action::Flee => {
                if player.inventory.remove_escape_scroll() {
                    log::debug!("flee guaranteed by escape scroll");
                    return Ok(TurnOutcome::FleeSucceeded { scroll_used: true });
                }
                if rng.next_unit() < self.config.flee_success_chance {
                    Ok(TurnOutcome::FleeSucceeded { scroll_used: false })
                } else {
                    Ok(TurnOutcome::FleeFailed)
                }
            }
            Action::HolySmite | Action::SwordSlash | Action::ShieldBash => {
                self.resolve_strike(player, monster, action, rng)
            }
        }
    }

    fn resolve_strike(
        &self,
        player: &mut Player,
        monster: &mut Monster,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> SanctumResult<TurnOutcome> {
        let base = self
            .config
            .ability_damage(action)
            .ok_or_else(|| {
                SanctumError::InvalidAction(format!("{} deals no damage", action.label()))
            })?
            + player.strength;
        let matched = action
            .weakness()
            .map(|weakness| monster.is_weak_to(weakness))
            .unwrap_or(false);
        let final_damage = if matched {
            base + self.config.weakness_bonus
        } else {
            base
        };
        // A matched weakness only counts as a weakness hit when the bonus
        // actually raised the damage.
        let weakness_hit = matched && final_damage > base;

        // Monsters have no defense stat; the full amount lands.
        let damage_dealt = monster.take_damage(final_damage, 0);
        log::debug!(
            "{} hits {} for {damage_dealt} (weakness: {weakness_hit})",
            action.label(),
            monster.name
        );

        if !monster.is_alive() {
            // A lethal strike ends the turn; the dead get no retaliation.
            return Ok(TurnOutcome::Strike {
                action,
                damage_dealt,
                weakness_hit,
                monster_defeated: true,
                retaliation: None,
            });
        }

        let raw = monster.strength + rng.int_in_range(0, RETALIATION_VARIANCE);
        let defense = player.defense(&self.config);
        let damage_taken = player.take_damage(raw, defense);
        log::debug!(
            "{} retaliates for {damage_taken}, player at {}",
            monster.name,
            player.health
        );
        Ok(TurnOutcome::Strike {
            action,
            damage_dealt,
            weakness_hit,
            monster_defeated: false,
            retaliation: Some(Retaliation {
                damage_taken,
                player_health: player.health,
            }),
        })
    }
}
