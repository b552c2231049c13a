//! Content synthesis for Nebelwelt.
//!
//! Everything between the game session and the generative service lives
//! here: connection settings, the blocking HTTP client and its scripted
//! test double, the repair strategies for almost-JSON responses, and the
//! pipeline operations that turn service replies into committed world
//! state.

/// The [`Synthesizer`] trait, its HTTP implementation, and the scripted
/// test double.
pub mod client;
/// Connection settings for the synthesis service.
pub mod config;
/// Error types for transport, parsing, and consistency failures.
pub mod error;
/// The operations that turn service replies into committed world state.
pub mod pipeline;
/// Prompt builders for each synthesis operation.
pub mod prompt;
/// Repair strategies for almost-JSON responses.
pub mod repair;

pub use client::{HttpSynthesizer, ScriptedSynthesizer, Synthesizer};
pub use config::{Backend, SynthConfig};
pub use error::{SynthError, SynthResult};
pub use pipeline::{bootstrap_world, materialize_location, materialize_object, resolve_action};
