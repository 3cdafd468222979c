//! # Generation Module
//!
//! Procedural content for a run: monsters rolled from a fixed template table,
//! and the weighted loot engine with its unique-gear scarcity tracking. Both
//! draw exclusively through the injected [`RandomSource`](crate::RandomSource).

pub mod drops;
pub mod monsters;

pub use drops::*;
pub use monsters::*;
