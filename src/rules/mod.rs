//! Rules engine trait for run implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each run state
//! - How actions modify state
//! - Victory and defeat conditions
//!
//! Sessions and tests drive play through `RulesEngine` and never reach
//! into game-specific rules directly.

mod engine;

pub use engine::{ActionOutcome, GameResult, RulesEngine};
