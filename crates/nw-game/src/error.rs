//! Error types used throughout the crate.

use nw_synth::SynthError;
use thiserror::Error;

/// A turn that could not be completed.
///
/// Rule violations ("You can't take that.") are not errors; they come back
/// as in-fiction text. What remains is the synthesis machinery failing
/// underneath a turn, which the harness reports and survives.
#[derive(Debug, Error)]
pub enum GameError {
    /// The synthesis client or pipeline failed.
    #[error(transparent)]
    Synthesis(#[from] SynthError),
}

/// Alias for `Result<T, GameError>`.
pub type GameResult<T> = Result<T, GameError>;
