//! # Sanctum
//!
//! A turn-based terminal dungeon crawler: a paladin crawls a shifting sanctum,
//! fights monsters with a small set of holy abilities, recovers stolen gear
//! piece by piece, and eventually faces the boss that hoards the relic.
//!
//! ## Architecture Overview
//!
//! The engine is built from small, injectable pieces:
//!
//! - **Game State**: player, monster, and inventory types with shared combat math
//! - **Combat Engine**: per-turn action resolution with weakness and defense rules
//! - **Generation System**: monster templates and the weighted loot/drop engine
//! - **Session**: the exploration/combat loop that owns all run state
//! - **Boundaries**: choice prompting and narrative decoration are traits, so the
//!   core runs identically under a terminal, a test script, or an LLM storyteller
//!
//! All randomness flows through the [`RandomSource`] trait; nothing in the
//! engine touches a global RNG, which keeps every probabilistic subsystem
//! replayable in tests.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod narrative;
pub mod testing;
pub mod utils;

// Explicit re-exports for the types most callers need.
pub use config::{DropWeights, GameConfig, RoomWeights};
pub use game::{
    Action, Actor, CombatEngine, CombatOutcome, DropKind, GameSession, Inventory, Monster, Player,
    Retaliation, RoomKind, RunOutcome, TurnOutcome, Weakness,
};
pub use generation::{DropEngine, MonsterGenerator, MonsterTemplate};
pub use input::{Prompter, StdioPrompter};
pub use narrative::{Narrator, NarrativeEvent, PlainNarrator};
pub use utils::{pick_weighted, RandomSource, SeededRandom};

/// Core error type for the Sanctum engine.
#[derive(thiserror::Error, Debug)]
pub enum SanctumError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Action cannot be performed in the current state
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Engine state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// The narrative collaborator failed
    #[error("Narration failed: {0}")]
    Narration(String),
}

/// Result type used throughout the Sanctum codebase.
pub type SanctumResult<T> = Result<T, SanctumError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
