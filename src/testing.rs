//! Testing utilities for the Sanctum engine.
//!
//! Deterministic doubles for the three injected boundaries:
//! - [`ScriptedRandom`] replaces the RNG with queued or constant draws
//! - [`ScriptedPrompter`] replays a fixed list of menu choices
//! - [`SilentNarrator`] stringifies events; [`FailingNarrator`] always errors,
//!   for exercising the narrator-outage fallback path

use std::collections::VecDeque;

use crate::input::Prompter;
use crate::narrative::{Narrator, NarrativeEvent};
use crate::utils::RandomSource;
use crate::{SanctumError, SanctumResult};

/// A random source that replays queued draws and falls back to fixed
/// defaults once a queue runs dry.
///
/// Defaults are chosen to keep engines on a boring, predictable path: unit
/// draws return `0.5`, ranged integer draws collapse to the low bound, and
/// index draws pick the first element.
#[derive(Debug)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    ints: VecDeque<i32>,
    indices: VecDeque<usize>,
    default_unit: f64,
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            units: VecDeque::new(),
            ints: VecDeque::new(),
            indices: VecDeque::new(),
            default_unit: 0.5,
        }
    }

    /// Creates a source whose first unit draws are exactly `units`.
    pub fn with_units(units: impl IntoIterator<Item = f64>) -> Self {
        let mut scripted = Self::new();
        scripted.units.extend(units);
        scripted
    }

    /// Queues the next unit draw.
    pub fn queue_unit(&mut self, value: f64) {
        self.units.push_back(value);
    }

    /// Queues the next ranged integer draw. Values outside the requested
    /// range are clamped into it at draw time.
    pub fn queue_int(&mut self, value: i32) {
        self.ints.push_back(value);
    }

    /// Queues the next index draw. Out-of-range indices are clamped.
    pub fn queue_index(&mut self, value: usize) {
        self.indices.push_back(value);
    }

    /// Changes the fallback unit draw used once the queue is empty.
    pub fn default_unit(mut self, value: f64) -> Self {
        self.default_unit = value;
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.default_unit)
    }

    fn int_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.ints
            .pop_front()
            .map(|value| value.clamp(low, high))
            .unwrap_or(low)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index over empty sequence");
        self.indices
            .pop_front()
            .map(|index| index.min(len.saturating_sub(1)))
            .unwrap_or(0)
    }
}

/// A prompter that replays a scripted list of choice indices and records
/// everything it was asked and shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    choices: VecDeque<usize>,
    /// Every `(title, options)` pair presented, in order.
    pub prompts: Vec<(String, Vec<String>)>,
    /// Every text displayed, in order.
    pub shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            prompts: Vec::new(),
            shown: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_choice(&mut self, title: &str, options: &[String]) -> SanctumResult<usize> {
        self.prompts.push((title.to_string(), options.to_vec()));
        let choice = self.choices.pop_front().ok_or_else(|| {
            SanctumError::InvalidState(format!("prompter script exhausted at \"{title}\""))
        })?;
        if choice >= options.len() {
            return Err(SanctumError::InvalidState(format!(
                "scripted choice {choice} out of range for {} options",
                options.len()
            )));
        }
        Ok(choice)
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

/// The trivial narrator: stringifies the structured payload. The engine must
/// behave identically under this and any production storyteller.
#[derive(Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn narrate(&self, event: &NarrativeEvent) -> SanctumResult<String> {
        Ok(format!("{}: {}", event.kind, event.payload))
    }
}

/// A narrator that always fails, for asserting that an outage never corrupts
/// game state.
#[derive(Debug, Default)]
pub struct FailingNarrator;

impl Narrator for FailingNarrator {
    fn narrate(&self, event: &NarrativeEvent) -> SanctumResult<String> {
        Err(SanctumError::Narration(format!(
            "storyteller unavailable for {} event",
            event.kind
        )))
    }
}
