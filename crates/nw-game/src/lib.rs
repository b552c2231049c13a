//! Game rules for Nebelwelt.
//!
//! The command resolver turns player input into a small verb set or a
//! free-form sentence, the session applies each verb to the world, and the
//! renderer produces the plain text the harness prints. Synthesis is
//! reached only through [`nw_synth::Synthesizer`], so everything here runs
//! offline under test.

/// Command parsing for player input.
pub mod command;
/// Error types for the game layer.
pub mod error;
/// Plain-text rendering of world state.
pub mod render;
/// The turn-based game session.
pub mod session;

pub use command::{Command, clean_sentence, parse_command};
pub use error::{GameError, GameResult};
pub use session::{GameSession, Turn};
