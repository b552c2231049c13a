//! Error types used throughout the crate.

use thiserror::Error;

/// Violations of the world invariants.
///
/// [`World::check_consistency`](crate::World::check_consistency) returns the
/// first violation it finds. The repairable ones are fixed beforehand by
/// [`World::normalize`](crate::World::normalize); whatever survives both is
/// grounds for rejecting a synthesized world outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The world contains no player entity.
    #[error("world has no player entity")]
    MissingPlayer,

    /// The world contains more than one player entity.
    #[error("world has {0} player entities, expected exactly one")]
    MultiplePlayers(usize),

    /// The world contains no locations at all.
    #[error("world has no locations")]
    NoLocations,

    /// Two entities of the same kind share a name.
    #[error("duplicate {kind} name \"{name}\"")]
    DuplicateName {
        /// Entity kind label, e.g. `"object"`.
        kind: String,
        /// The contested name.
        name: String,
    },

    /// An entity points at a location that does not exist.
    #[error("{entity} references unknown location \"{location}\"")]
    DanglingReference {
        /// Who holds the broken reference, e.g. `"player"` or an object name.
        entity: String,
        /// The location name that failed to resolve.
        location: String,
    },

    /// An object name is not all lowercase.
    #[error("object name \"{0}\" is not lowercase")]
    NotLowercase(String),
}

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;
