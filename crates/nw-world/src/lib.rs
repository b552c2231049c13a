//! Core world model for Nebelwelt.
//!
//! Everything here is pure data: the entity schema, the [`World`] aggregate
//! with its lookups and repairs, and the placeholder skeleton that seeds a
//! new game. No I/O and no randomness; the synthesis pipeline and the
//! command resolver drive all mutation through the accessors on [`World`].

/// Entity types and the serialized `type` tag.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// The placeholder skeleton that seeds a new game.
pub mod template;
/// The world aggregate: lookups, repairs, and consistency checks.
pub mod world;

pub use entity::{CARRIED, Entity, Location, Object, Player};
pub use error::{WorldError, WorldResult};
pub use world::{World, canonical_object_name};
