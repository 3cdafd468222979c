//! # Narrative Module
//!
//! The storytelling boundary. The engine emits structured [`NarrativeEvent`]s
//! after each state change; a [`Narrator`] turns them into displayable text.
//! The shipped [`PlainNarrator`] uses fixed templates, and an LLM-backed
//! storyteller can implement the same trait externally. Because events are
//! emitted only after mutations have committed, a narrator failure can cost
//! the player flavor text but never game state.

use serde_json::{json, Value};

use crate::game::{Action, DropKind, Monster, Retaliation};
use crate::SanctumResult;

/// The scripted narration that opens every run.
pub const OPENING_TEXT: &str = "You awaken on the cold stone floor of a ruined hall, your head pounding and your armor gone. The air reeks of smoke, iron, and old blood.\n\nFaint torchlight flickers across toppled pillars and shattered glass, the remnants of the old sanctum where you had just retrieved the Heart of Radiance, a sacred relic.\n\nYou remember now: the attack came at dusk. A pack of goblin bandits ambushed you, stole your gear, shattered your enchanted map, and took the Heart of Radiance... then left you for dead.\n\nWithout the map's guiding spell, the sanctum's halls, once woven with radiant wards to conceal the relic, now twist and shift at random. Each step forward reshapes the labyrinth anew.\n\nEchoing goblin screams from the labyrinth below tell you where they fled to hide, but in doing so, they awakened creatures far worse.\n\nWeak but alive, you feel the quiet warmth of your connection to the Light. It has not abandoned you. Not yet.";

/// A structured narrative signal: a stable event tag plus a JSON payload.
///
/// The payload carries everything a storyteller needs to decorate the event;
/// the engine never depends on what comes back beyond it being text.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeEvent {
    pub kind: &'static str,
    pub payload: Value,
}

impl NarrativeEvent {
    pub fn opening() -> Self {
        Self {
            kind: "opening",
            payload: json!({ "text": OPENING_TEXT }),
        }
    }

    pub fn empty_room() -> Self {
        Self {
            kind: "empty-room",
            payload: json!({}),
        }
    }

    pub fn pray() -> Self {
        Self {
            kind: "pray",
            payload: json!({}),
        }
    }

    pub fn potion(healed: bool) -> Self {
        Self {
            kind: "potion",
            payload: json!({ "healed": healed }),
        }
    }

    pub fn loot(drop: DropKind) -> Self {
        Self {
            kind: "loot",
            payload: json!({ "item": drop.display_name(), "armor": drop.is_armor() }),
        }
    }

    pub fn unlock(item: DropKind, ability: Action) -> Self {
        Self {
            kind: "unlock",
            payload: json!({ "item": item.display_name(), "ability": ability.label() }),
        }
    }

    pub fn gear_recovered() -> Self {
        Self {
            kind: "gear-recovered",
            payload: json!({}),
        }
    }

    pub fn encounter(monster: &Monster) -> Self {
        Self {
            kind: "encounter",
            payload: json!({
                "monster": monster.name,
                "description": monster.description,
                "boss": monster.is_boss,
                "visible_item": monster
                    .item_drop
                    .filter(|drop| *drop != DropKind::NoItem)
                    .map(DropKind::display_name),
            }),
        }
    }

    pub fn flee(succeeded: bool, scroll_used: bool, monster_name: &str) -> Self {
        Self {
            kind: "flee",
            payload: json!({
                "succeeded": succeeded,
                "scroll_used": scroll_used,
                "monster": monster_name,
            }),
        }
    }

    pub fn combat_turn(
        action: Action,
        monster_name: &str,
        damage_dealt: i32,
        weakness_hit: bool,
        retaliation: Option<Retaliation>,
    ) -> Self {
        Self {
            kind: "combat-turn",
            payload: json!({
                "action": action.label(),
                "monster": monster_name,
                "damage_dealt": damage_dealt,
                "weakness_hit": weakness_hit,
                "retaliation_damage": retaliation.map(|r| r.damage_taken),
                "player_health": retaliation.map(|r| r.player_health),
            }),
        }
    }

    pub fn victory(monster: &Monster, final_action: Action, weakness_hit: bool) -> Self {
        Self {
            kind: "victory",
            payload: json!({
                "monster": monster.name,
                "boss": monster.is_boss,
                "final_action": final_action.label(),
                "weakness_hit": weakness_hit,
                "item": monster
                    .item_drop
                    .filter(|drop| *drop != DropKind::NoItem)
                    .map(DropKind::display_name),
            }),
        }
    }

    pub fn game_victory() -> Self {
        Self {
            kind: "game-victory",
            payload: json!({}),
        }
    }

    pub fn game_over() -> Self {
        Self {
            kind: "game-over",
            payload: json!({}),
        }
    }
}

/// Behavioral contract for narrative providers.
///
/// Implementations may call out to anything (templates, an LLM service); the
/// engine treats a returned error as a decoration failure only and falls back
/// to [`fallback_text`].
pub trait Narrator {
    fn narrate(&self, event: &NarrativeEvent) -> SanctumResult<String>;
}

/// Template-based narrator with no external dependencies.
#[derive(Debug, Default)]
pub struct PlainNarrator;

impl PlainNarrator {
    pub fn new() -> Self {
        Self
    }
}

impl Narrator for PlainNarrator {
    fn narrate(&self, event: &NarrativeEvent) -> SanctumResult<String> {
        Ok(fallback_text(event))
    }
}

fn payload_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

fn payload_bool(payload: &Value, key: &str) -> bool {
    payload.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn payload_int(payload: &Value, key: &str) -> Option<i64> {
    payload.get(key).and_then(Value::as_i64)
}

/// Plain templated text for any event. Used directly by [`PlainNarrator`]
/// and as the safety net when a fancier narrator fails mid-run.
pub fn fallback_text(event: &NarrativeEvent) -> String {
    let payload = &event.payload;
    match event.kind {
        "opening" => payload_str(payload, "text").unwrap_or(OPENING_TEXT).to_string(),
        "empty-room" => "A quiet space; no immediate threats or finds.".to_string(),
        "pray" => "You pause to recover; breath steadies and wounds close.".to_string(),
        "potion" => {
            if payload_bool(payload, "healed") {
                "You drink a potion and restore full health.".to_string()
            } else {
                "You reach for a potion, but there is none left.".to_string()
            }
        }
        "loot" => match payload_str(payload, "item") {
            None | Some("nothing") => "No notable items found.".to_string(),
            Some(item) if payload_bool(payload, "armor") => format!("Gained armor: {item}."),
            Some(item) => format!("Gained 1 {item}."),
        },
        "unlock" => {
            let item = payload_str(payload, "item").unwrap_or("gear");
            let ability = payload_str(payload, "ability").unwrap_or("a new ability");
            format!("{item} acquired. ({ability} unlocked)")
        }
        "gear-recovered" => {
            "Every piece of your stolen gear is yours again; you stand whole once more.".to_string()
        }
        "encounter" => {
            let monster = payload_str(payload, "monster").unwrap_or("something");
            let description = payload_str(payload, "description").unwrap_or("");
            let mut text = format!("You encounter a {monster}. {description}");
            if let Some(item) = payload_str(payload, "visible_item") {
                text.push_str(&format!(" It carries {item}."));
            }
            text
        }
        "flee" => {
            if payload_bool(payload, "succeeded") {
                "You disengage and escape.".to_string()
            } else {
                "You fail to break away.".to_string()
            }
        }
        "combat-turn" => {
            let action = payload_str(payload, "action").unwrap_or("attack");
            let damage = payload_int(payload, "damage_dealt").unwrap_or(0);
            let mut text = format!("Your {} strikes for {damage} damage.", action.to_lowercase());
            if payload_bool(payload, "weakness_hit") {
                text.push_str(" It exploits a weakness!");
            }
            if let Some(retaliation) = payload_int(payload, "retaliation_damage") {
                let monster = payload_str(payload, "monster").unwrap_or("enemy");
                text.push_str(&format!(" The {monster} retaliates for {retaliation} damage."));
            }
            text
        }
        "victory" => {
            let monster = payload_str(payload, "monster").unwrap_or("enemy");
            let mut text = format!("The {monster} is defeated.");
            if let Some(item) = payload_str(payload, "item") {
                text.push_str(&format!(" It leaves behind {item}."));
            }
            text
        }
        "game-victory" => "The last foe falls; somewhere, an exit reveals itself.".to_string(),
        "game-over" => "Your journey ends here; the dark grows still.".to_string(),
        // Unknown kinds stringify their payload so nothing is ever lost.
        _ => format!("{}: {}", event.kind, payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Weakness;

    fn sample_monster() -> Monster {
        let mut monster = Monster::new(
            "Skeleton".to_string(),
            "Loose bones.".to_string(),
            18,
            4,
            vec![Weakness::HolySmite],
            false,
        );
        monster.item_drop = Some(DropKind::HealthPotion);
        monster
    }

    #[test]
    fn test_plain_narrator_never_fails() {
        let narrator = PlainNarrator::new();
        let events = [
            NarrativeEvent::opening(),
            NarrativeEvent::empty_room(),
            NarrativeEvent::encounter(&sample_monster()),
            NarrativeEvent::game_victory(),
        ];
        for event in &events {
            assert!(!narrator.narrate(event).unwrap().is_empty());
        }
    }

    #[test]
    fn test_encounter_mentions_visible_item() {
        let text = fallback_text(&NarrativeEvent::encounter(&sample_monster()));
        assert!(text.contains("Skeleton"));
        assert!(text.contains("Health Potion"));
    }

    #[test]
    fn test_encounter_hides_no_item_drop() {
        let mut monster = sample_monster();
        monster.item_drop = Some(DropKind::NoItem);
        let event = NarrativeEvent::encounter(&monster);
        assert!(event.payload.get("visible_item").unwrap().is_null());
    }

    #[test]
    fn test_combat_turn_text_includes_retaliation() {
        let event = NarrativeEvent::combat_turn(
            Action::HolySmite,
            "Wraith",
            11,
            true,
            Some(Retaliation {
                damage_taken: 4,
                player_health: 6,
            }),
        );
        let text = fallback_text(&event);
        assert!(text.contains("11 damage"));
        assert!(text.contains("weakness"));
        assert!(text.contains("retaliates for 4"));
    }

    #[test]
    fn test_lethal_turn_text_has_no_retaliation() {
        let event = NarrativeEvent::combat_turn(Action::HolySmite, "Wraith", 11, false, None);
        let text = fallback_text(&event);
        assert!(!text.contains("retaliates"));
    }

    #[test]
    fn test_loot_templates() {
        assert_eq!(
            fallback_text(&NarrativeEvent::loot(DropKind::NoItem)),
            "No notable items found."
        );
        assert_eq!(
            fallback_text(&NarrativeEvent::loot(DropKind::HealthPotion)),
            "Gained 1 Health Potion."
        );
        assert_eq!(
            fallback_text(&NarrativeEvent::loot(DropKind::LegGuards)),
            "Gained armor: Leg Guards."
        );
    }

    #[test]
    fn test_unknown_kind_stringifies_payload() {
        let event = NarrativeEvent {
            kind: "mystery",
            payload: json!({ "detail": 3 }),
        };
        let text = fallback_text(&event);
        assert!(text.starts_with("mystery:"));
        assert!(text.contains("detail"));
    }
}
