//! # Game Session
//!
//! The run orchestrator. A session owns every piece of run state (player,
//! current monster, drop scarcity, progress counters) and alternates between
//! exploration and combat until the player dies or the boss falls. Narration
//! always happens after the state change it describes, so a storyteller
//! outage can never leave the run inconsistent.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::{
    Action, Actor, CombatEngine, CombatOutcome, DropKind, Monster, Player, TurnOutcome,
};
use crate::generation::{DropEngine, MonsterGenerator};
use crate::input::Prompter;
use crate::narrative::{fallback_text, Narrator, NarrativeEvent};
use crate::utils::{pick_weighted, RandomSource};
use crate::{SanctumError, SanctumResult};

/// Room categories drawn on each exploration step, in canonical selection
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    Empty,
    Loot,
    Monster,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy)]
enum ExplorationChoice {
    Proceed,
    Pray,
}

/// One playthrough from ambush to death or victory.
pub struct GameSession {
    config: GameConfig,
    combat: CombatEngine,
    monster_generator: MonsterGenerator,
    drop_engine: DropEngine,
    player: Player,
    current_monster: Option<Monster>,
    defeated_count: u32,
    game_won: bool,
    rng: Box<dyn RandomSource>,
    narrator: Box<dyn Narrator>,
    prompter: Box<dyn Prompter>,
}

impl GameSession {
    /// Creates a session, validating the configuration up front.
    pub fn new(
        config: GameConfig,
        rng: Box<dyn RandomSource>,
        narrator: Box<dyn Narrator>,
        prompter: Box<dyn Prompter>,
    ) -> SanctumResult<Self> {
        config.validate()?;
        let player = Player::new(&config);
        let combat = CombatEngine::new(config.clone());
        Ok(Self {
            config,
            combat,
            monster_generator: MonsterGenerator::new(),
            drop_engine: DropEngine::new(),
            player,
            current_monster: None,
            defeated_count: 0,
            game_won: false,
            rng,
            narrator,
            prompter,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn defeated_count(&self) -> u32 {
        self.defeated_count
    }

    pub fn drop_engine(&self) -> &DropEngine {
        &self.drop_engine
    }

    pub fn current_monster(&self) -> Option<&Monster> {
        self.current_monster.as_ref()
    }

    /// Runs the session to completion.
    pub fn run(&mut self) -> SanctumResult<RunOutcome> {
        log::info!("starting a new run");
        self.narrate(NarrativeEvent::opening());
        while self.player.is_alive() && !self.game_won {
            if self.current_monster.is_some() {
                self.combat_phase()?;
            } else {
                self.exploration_phase()?;
            }
        }
        let outcome = if self.game_won {
            RunOutcome::Victory
        } else {
            RunOutcome::Defeat
        };
        match outcome {
            RunOutcome::Victory => self.narrate(NarrativeEvent::game_victory()),
            RunOutcome::Defeat => self.narrate(NarrativeEvent::game_over()),
        }
        log::info!(
            "run ended in {outcome:?} after {} defeated monsters",
            self.defeated_count
        );
        Ok(outcome)
    }

    /// Status summary shown between turns.
    pub fn status_line(&self) -> String {
        let abilities: Vec<&str> = self
            .player
            .unlocked_abilities()
            .iter()
            .map(|action| action.label())
            .collect();
        format!(
            "HP {}/{} | Defense {} | Potions {} | Escape Scrolls {}\nAbilities: {}",
            self.player.health,
            self.player.max_health,
            self.player.defense(&self.config),
            self.player.inventory.potions(),
            self.player.inventory.escape_scrolls(),
            abilities.join(", ")
        )
    }

    fn exploration_phase(&mut self) -> SanctumResult<()> {
        let status = self.status_line();
        self.prompter.show(&status);

        let mut menu = vec![("Proceed onward", ExplorationChoice::Proceed)];
        if self.player.health < self.player.max_health {
            menu.push(("Pray for restoration (full heal)", ExplorationChoice::Pray));
        }
        let labels: Vec<String> = menu.iter().map(|(label, _)| label.to_string()).collect();
        let index = self.prompter.prompt_choice("Choose your course:", &labels)?;
        let (_, choice) = *menu.get(index).ok_or_else(|| {
            SanctumError::InvalidState(format!("choice index {index} out of range"))
        })?;
        match choice {
            ExplorationChoice::Proceed => self.explore_room(),
            ExplorationChoice::Pray => {
                self.player.restore_full();
                self.narrate(NarrativeEvent::pray());
                Ok(())
            }
        }
    }

    fn explore_room(&mut self) -> SanctumResult<()> {
        let weights = self.config.room_weights;
        let rooms = [
            (RoomKind::Empty, weights.empty),
            (RoomKind::Loot, weights.loot),
            (RoomKind::Monster, weights.monster),
        ];
        let room = pick_weighted(&rooms, self.rng.as_mut())?.0;
        log::debug!("entered a {room:?} room");
        match room {
            RoomKind::Empty => {
                self.narrate(NarrativeEvent::empty_room());
                Ok(())
            }
            RoomKind::Loot => {
                let drop = self
                    .drop_engine
                    .roll_item_drop(&self.config, self.rng.as_mut())?;
                self.apply_loot(drop);
                Ok(())
            }
            RoomKind::Monster => {
                let mut monster = self.monster_generator.generate(
                    self.defeated_count,
                    &self.config,
                    self.rng.as_mut(),
                );
                let drop = self.drop_engine.drop_for_monster(
                    self.defeated_count,
                    &self.player,
                    &self.config,
                    self.rng.as_mut(),
                )?;
                monster.item_drop = Some(drop);
                self.narrate(NarrativeEvent::encounter(&monster));
                self.current_monster = Some(monster);
                Ok(())
            }
        }
    }

    fn combat_phase(&mut self) -> SanctumResult<CombatOutcome> {
        let mut monster = self.current_monster.take().ok_or_else(|| {
            SanctumError::InvalidState("combat phase entered without a monster".to_string())
        })?;
        let outcome = loop {
            let actions = self.combat.available_actions(&self.player);
            let labels: Vec<String> = actions
                .iter()
                .map(|action| action.label().to_string())
                .collect();
            let index = self
                .prompter
                .prompt_choice("In battle, choose your action:", &labels)?;
            let action = *actions.get(index).ok_or_else(|| {
                SanctumError::InvalidState(format!("choice index {index} out of range"))
            })?;

            let turn =
                self.combat
                    .resolve_turn(&mut self.player, &mut monster, action, self.rng.as_mut())?;
            match turn {
                TurnOutcome::PotionUsed { healed } => {
                    self.narrate(NarrativeEvent::potion(healed));
                }
                TurnOutcome::FleeSucceeded { scroll_used } => {
                    self.narrate(NarrativeEvent::flee(true, scroll_used, &monster.name));
                    break CombatOutcome::PlayerFled;
                }
                TurnOutcome::FleeFailed => {
                    self.narrate(NarrativeEvent::flee(false, false, &monster.name));
                }
                TurnOutcome::Strike {
                    action,
                    weakness_hit,
                    monster_defeated: true,
                    ..
                } => {
                    self.defeated_count += 1;
                    self.narrate(NarrativeEvent::victory(&monster, action, weakness_hit));
                    if monster.is_boss {
                        self.game_won = true;
                    }
                    if let Some(drop) = monster.item_drop.take() {
                        self.apply_loot(drop);
                    }
                    break CombatOutcome::MonsterDefeated {
                        final_action: action,
                        weakness_hit,
                    };
                }
                TurnOutcome::Strike {
                    action,
                    damage_dealt,
                    weakness_hit,
                    retaliation,
                    ..
                } => {
                    self.narrate(NarrativeEvent::combat_turn(
                        action,
                        &monster.name,
                        damage_dealt,
                        weakness_hit,
                        retaliation,
                    ));
                    if !self.player.is_alive() {
                        break CombatOutcome::PlayerDead;
                    }
                    let status = self.status_line();
                    self.prompter.show(&status);
                }
            }
        };
        // The monster never outlives its combat phase.
        Ok(outcome)
    }

    fn apply_loot(&mut self, drop: DropKind) {
        match drop {
            DropKind::NoItem => {
                self.narrate(NarrativeEvent::loot(drop));
            }
            DropKind::HealthPotion => {
                self.player.inventory.add_potion();
                self.narrate(NarrativeEvent::loot(drop));
            }
            DropKind::EscapeScroll => {
                self.player.inventory.add_escape_scroll();
                self.narrate(NarrativeEvent::loot(drop));
            }
            DropKind::Shield => {
                self.player.has_shield = true;
                self.narrate(NarrativeEvent::unlock(drop, Action::ShieldBash));
            }
            DropKind::Sword => {
                self.player.has_sword = true;
                self.narrate(NarrativeEvent::unlock(drop, Action::SwordSlash));
            }
            armor => {
                let was_complete = self.player.has_all_gear();
                self.player.add_armor_piece(armor);
                self.narrate(NarrativeEvent::loot(armor));
                if !was_complete && self.player.has_all_gear() {
                    self.narrate(NarrativeEvent::gear_recovered());
                }
            }
        }
    }

    /// Decorates and displays an event. The mutation the event describes has
    /// already committed, so a narrator failure only costs flavor text.
    fn narrate(&mut self, event: NarrativeEvent) {
        let text = match self.narrator.narrate(&event) {
            Ok(text) => text,
            Err(error) => {
                log::warn!(
                    "narrator failed on {} event: {error}; using fallback text",
                    event.kind
                );
                fallback_text(&event)
            }
        };
        self.prompter.show(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingNarrator, ScriptedPrompter, ScriptedRandom, SilentNarrator};

    fn session_with(
        config: GameConfig,
        rng: ScriptedRandom,
        choices: impl IntoIterator<Item = usize>,
    ) -> GameSession {
        GameSession::new(
            config,
            Box::new(rng),
            Box::new(SilentNarrator),
            Box::new(ScriptedPrompter::new(choices)),
        )
        .unwrap()
    }

    /// Unit draw that lands in the monster band of the default room weights.
    const MONSTER_ROOM: f64 = 0.9;
    /// Unit draw that lands in the empty band of the default room weights.
    const EMPTY_ROOM: f64 = 0.05;
    /// Unit draw that lands in the loot band of the default room weights.
    const LOOT_ROOM: f64 = 0.15;

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let config = GameConfig {
            player_max_health: 0,
            ..GameConfig::default()
        };
        let result = GameSession::new(
            config,
            Box::new(ScriptedRandom::new()),
            Box::new(SilentNarrator),
            Box::new(ScriptedPrompter::new([])),
        );
        assert!(matches!(result, Err(SanctumError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_room_changes_nothing() {
        let rng = ScriptedRandom::with_units([EMPTY_ROOM]);
        let mut session = session_with(GameConfig::default(), rng, [0]);
        session.exploration_phase().unwrap();
        assert!(session.current_monster().is_none());
        assert_eq!(session.defeated_count(), 0);
        assert_eq!(session.drop_engine().remaining_gear().len(), 8);
    }

    #[test]
    fn test_loot_room_applies_drop_immediately() {
        // Loot room, then a drop draw of 0.5 landing in the potion bucket.
        let rng = ScriptedRandom::with_units([LOOT_ROOM, 0.5]);
        let mut session = session_with(GameConfig::default(), rng, [0]);
        session.exploration_phase().unwrap();
        assert_eq!(session.player().inventory.potions(), 1);
    }

    #[test]
    fn test_pray_fully_heals() {
        let mut session = session_with(GameConfig::default(), ScriptedRandom::new(), [1]);
        assert!(session.player().health < session.player().max_health);
        session.exploration_phase().unwrap();
        assert_eq!(session.player().health, session.player().max_health);
    }

    #[test]
    fn test_first_encounter_carries_scripted_shield() {
        // Monster room; template index and stat draws fall back to defaults
        // (Skeleton at minimum stats). The drop must be the shield no matter
        // what the random source would have rolled.
        let rng = ScriptedRandom::with_units([MONSTER_ROOM]).default_unit(0.97);
        let mut session = session_with(GameConfig::default(), rng, [0]);
        session.exploration_phase().unwrap();
        let monster = session.current_monster().expect("monster room");
        assert_eq!(monster.name, "Skeleton");
        assert_eq!(monster.item_drop, Some(DropKind::Shield));
        assert_eq!(session.drop_engine().remaining_gear().len(), 7);
    }

    #[test]
    fn test_defeating_first_monster_unlocks_shield_bash() {
        // Skeleton at minimum health (16) dies to one weakness-boosted Holy
        // Smite (6 + 5 + 5 = 16): no retaliation, straight to victory.
        let rng = ScriptedRandom::with_units([MONSTER_ROOM]);
        let mut session = session_with(GameConfig::default(), rng, [0, 0]);
        let health_before = session.player().health;
        session.exploration_phase().unwrap();
        let outcome = session.combat_phase().unwrap();
        assert_eq!(
            outcome,
            CombatOutcome::MonsterDefeated {
                final_action: Action::HolySmite,
                weakness_hit: true,
            }
        );
        assert_eq!(session.defeated_count(), 1);
        assert!(session.player().has_shield);
        assert_eq!(session.player().health, health_before);
        assert!(session.current_monster().is_none());
        assert_eq!(session.drop_engine().remaining_gear().len(), 7);
        assert!(session
            .combat
            .available_actions(session.player())
            .contains(&Action::ShieldBash));
    }

    #[test]
    fn test_narrator_outage_never_corrupts_state() {
        let rng = ScriptedRandom::with_units([MONSTER_ROOM]);
        let mut session = GameSession::new(
            GameConfig::default(),
            Box::new(rng),
            Box::new(FailingNarrator),
            Box::new(ScriptedPrompter::new([0, 0])),
        )
        .unwrap();
        session.exploration_phase().unwrap();
        session.combat_phase().unwrap();
        // Same end state as with a working narrator.
        assert_eq!(session.defeated_count(), 1);
        assert!(session.player().has_shield);
        assert_eq!(session.drop_engine().remaining_gear().len(), 7);
        let player = session.player();
        assert!(player.health >= 0 && player.health <= player.max_health);
    }

    #[test]
    fn test_fleeing_discards_monster_without_reward() {
        let mut rng = ScriptedRandom::with_units([MONSTER_ROOM]);
        rng.queue_unit(0.1); // flee draw below flee_success_chance
        let mut session = session_with(GameConfig::default(), rng, [0, 1]);
        session.exploration_phase().unwrap();
        let outcome = session.combat_phase().unwrap();
        assert_eq!(outcome, CombatOutcome::PlayerFled);
        assert!(session.current_monster().is_none());
        assert_eq!(session.defeated_count(), 0);
        assert!(!session.player().has_shield);
        // The scripted shield left with the fled monster; unique gear only
        // ever decreases.
        assert_eq!(session.drop_engine().remaining_gear().len(), 7);
    }

    #[test]
    fn test_player_death_ends_combat() {
        // A fragile player against a regular monster: every action is Holy
        // Smite, monster at max stats survives and hits back until death.
        let config = GameConfig {
            player_max_health: 4,
            player_starting_health: 1,
            player_strength: 0,
            holy_smite_damage: 1,
            ..GameConfig::default()
        };
        let mut rng = ScriptedRandom::with_units([MONSTER_ROOM]);
        rng.queue_int(26); // monster health
        rng.queue_int(7); // monster strength
        let mut session = session_with(config, rng, [0, 0]);
        session.exploration_phase().unwrap();
        let outcome = session.combat_phase().unwrap();
        assert_eq!(outcome, CombatOutcome::PlayerDead);
        assert!(!session.player().is_alive());
        assert_eq!(session.player().health, 0);
    }
}
