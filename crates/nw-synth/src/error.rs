//! Error types used throughout the crate.

use nw_world::WorldError;
use thiserror::Error;

/// Failures of the synthesis client and pipeline.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The HTTP round-trip itself failed: connection refused, timeout, or a
    /// non-success status from the service.
    #[error("synthesis transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered, but not with a usable JSON object. The raw
    /// response travels along so the harness can show what came back.
    #[error("unparseable synthesis response: {reason}")]
    Parse {
        /// What made the response unusable.
        reason: String,
        /// The verbatim response text.
        raw: String,
    },

    /// The service returned a world that failed the consistency checks even
    /// after every deterministic repair.
    #[error("synthesized world rejected: {0}")]
    Consistency(#[from] WorldError),
}

/// Alias for `Result<T, SynthError>`.
pub type SynthResult<T> = Result<T, SynthError>;
