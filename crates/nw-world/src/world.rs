//! The world aggregate: metadata plus the entity collection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Location, Object, Player};
use crate::error::{WorldError, WorldResult};

/// The canonical in-memory world.
///
/// Entities live in a flat vector and are looked up by name with a linear
/// scan; a text-adventure world is small enough that no index pays for
/// itself, and the vector keeps serialization order stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct World {
    /// Game title shown at session start.
    #[serde(default)]
    pub title: String,
    /// Framing plot summary shown at session start.
    #[serde(default)]
    pub plot: String,
    /// Optional genre tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Optional objective for the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    /// Every entity in the world, in insertion order.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Scratch narration field the synthesis service fills during free-form
    /// resolution. Taken and cleared every turn, never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Collapses a synthesized object name to its final lowercase word.
///
/// Object names are single lowercase words; the service occasionally returns
/// `"rusty key"` anyway, and the last word is the noun.
pub fn canonical_object_name(name: &str) -> String {
    sanitize_name(name)
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_string()
}

/// Trims, strips `$` placeholder remnants, and lowercases a structural name.
fn sanitize_name(name: &str) -> String {
    name.replace('$', "").trim().to_ascii_lowercase()
}

/// Returns `base` unless `taken` claims it, else the first free suffixed
/// variant (`base2`, `base3`, ...).
fn disambiguate(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{base}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

impl World {
    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// First entity of any kind whose name matches, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// The location with the given name, case-insensitively.
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Location(location) if location.name.eq_ignore_ascii_case(name) => {
                Some(location)
            }
            _ => None,
        })
    }

    /// Mutable variant of [`World::location`].
    pub fn location_mut(&mut self, name: &str) -> Option<&mut Location> {
        self.entities.iter_mut().find_map(|entity| match entity {
            Entity::Location(location) if location.name.eq_ignore_ascii_case(name) => {
                Some(location)
            }
            _ => None,
        })
    }

    /// The object with the given name, case-insensitively.
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Object(object) if object.name.eq_ignore_ascii_case(name) => Some(object),
            _ => None,
        })
    }

    /// Mutable variant of [`World::object`].
    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.entities.iter_mut().find_map(|entity| match entity {
            Entity::Object(object) if object.name.eq_ignore_ascii_case(name) => Some(object),
            _ => None,
        })
    }

    /// The player entity, if present.
    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Player(player) => Some(player),
            _ => None,
        })
    }

    /// Mutable variant of [`World::player`].
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.entities.iter_mut().find_map(|entity| match entity {
            Entity::Player(player) => Some(player),
            _ => None,
        })
    }

    /// All objects whose `location` matches, sorted by name so listings and
    /// materialization order are deterministic.
    pub fn objects_at(&self, location: &str) -> Vec<&Object> {
        let mut objects: Vec<&Object> = self
            .entities
            .iter()
            .filter_map(|entity| match entity {
                Entity::Object(object) if object.location.eq_ignore_ascii_case(location) => {
                    Some(object)
                }
                _ => None,
            })
            .collect();
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        objects
    }

    /// The first location in entity order.
    pub fn first_location(&self) -> Option<&Location> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Location(location) => Some(location),
            _ => None,
        })
    }

    /// Total number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns `base` unless an object already claims it, else the first
    /// free suffixed variant (`key2`, `key3`, ...).
    pub fn unique_object_name(&self, base: &str) -> String {
        disambiguate(base, |candidate| self.object(candidate).is_some())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Appends an entity, rejecting name clashes within its kind and any
    /// second player.
    pub fn push_entity(&mut self, entity: Entity) -> WorldResult<()> {
        if matches!(entity, Entity::Player(_)) && self.player().is_some() {
            return Err(WorldError::MultiplePlayers(2));
        }
        if let Some(name) = entity.name() {
            let clash = self.entities.iter().any(|existing| {
                existing.kind() == entity.kind()
                    && existing.name().is_some_and(|n| n.eq_ignore_ascii_case(name))
            });
            if clash {
                return Err(WorldError::DuplicateName {
                    kind: entity.kind().to_string(),
                    name: name.to_string(),
                });
            }
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Replaces the location with the same name, or appends a new one.
    pub fn upsert_location(&mut self, location: Location) {
        match self.location_mut(&location.name) {
            Some(existing) => *existing = location,
            None => self.entities.push(Entity::Location(location)),
        }
    }

    /// Flips a location's `seen` flag, returning true when this call did the
    /// flipping. A repeated call on the same location returns false.
    pub fn mark_seen(&mut self, name: &str) -> bool {
        match self.location_mut(name) {
            Some(location) if !location.seen => {
                location.seen = true;
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the scratch narration field.
    pub fn take_output(&mut self) -> Option<String> {
        self.output.take()
    }

    // ------------------------------------------------------------------
    // Repair and validation
    // ------------------------------------------------------------------

    /// Applies every deterministic repair to a freshly synthesized world.
    ///
    /// Structural names are trimmed, stripped of `$` remnants, and
    /// lowercased; object names collapse to their final word. Nameless
    /// locations and objects are dropped, as is every player beyond the
    /// first. Name clashes within a kind get numeric suffixes. A player
    /// with an empty location is moved to the first location; dangling
    /// location references grow stub locations so later turns can
    /// materialize them. The scratch `output` field is cleared.
    ///
    /// Idempotent: a second pass changes nothing.
    pub fn normalize(&mut self) {
        for entity in &mut self.entities {
            match entity {
                Entity::Location(location) => {
                    location.name = sanitize_name(&location.name);
                    let exits = std::mem::take(&mut location.exits);
                    location.exits = exits
                        .into_iter()
                        .map(|(direction, target)| {
                            (sanitize_name(&direction), sanitize_name(&target))
                        })
                        .filter(|(direction, target)| {
                            !direction.is_empty() && !target.is_empty()
                        })
                        .collect();
                }
                Entity::Player(player) => {
                    player.location = sanitize_name(&player.location);
                }
                Entity::Object(object) => {
                    object.name = canonical_object_name(&object.name);
                    object.location = sanitize_name(&object.location);
                }
            }
        }

        let mut player_seen = false;
        self.entities.retain(|entity| match entity {
            Entity::Player(_) => {
                let keep = !player_seen;
                player_seen = true;
                keep
            }
            other => other.name().is_some_and(|name| !name.is_empty()),
        });

        let mut taken: BTreeSet<(&'static str, String)> = BTreeSet::new();
        for entity in &mut self.entities {
            let kind = entity.kind();
            let Some(name) = entity.name().map(str::to_string) else {
                continue;
            };
            let unique =
                disambiguate(&name, |candidate| taken.contains(&(kind, candidate.to_string())));
            if unique != name {
                match entity {
                    Entity::Location(location) => location.name = unique.clone(),
                    Entity::Object(object) => object.name = unique.clone(),
                    Entity::Player(_) => {}
                }
            }
            taken.insert((kind, unique));
        }

        if self.player().is_some_and(|player| player.location.is_empty()) {
            let fallback = self.first_location().map(|location| location.name.clone());
            if let Some(first) = fallback
                && let Some(player) = self.player_mut()
            {
                player.location = first;
            }
        }

        let homeless = self
            .player()
            .map(|player| player.location.clone())
            .unwrap_or_default();
        for entity in &mut self.entities {
            if let Entity::Object(object) = entity
                && object.location.is_empty()
            {
                object.location = homeless.clone();
            }
        }

        let mut missing: BTreeSet<String> = BTreeSet::new();
        for entity in &self.entities {
            let reference = match entity {
                Entity::Player(player) => Some(&player.location),
                Entity::Object(object) if !object.is_carried() => Some(&object.location),
                _ => None,
            };
            if let Some(target) = reference
                && !target.is_empty()
                && self.location(target).is_none()
            {
                missing.insert(target.clone());
            }
        }
        for name in missing {
            self.entities.push(Entity::Location(Location::stub(name)));
        }

        self.output = None;
    }

    /// Checks every unrepairable invariant, returning the first violation.
    ///
    /// Run after [`World::normalize`]: whatever this rejects could not be
    /// fixed deterministically and the synthesized world must be discarded.
    pub fn check_consistency(&self) -> WorldResult<()> {
        let players = self
            .entities
            .iter()
            .filter(|entity| matches!(entity, Entity::Player(_)))
            .count();
        if players == 0 {
            return Err(WorldError::MissingPlayer);
        }
        if players > 1 {
            return Err(WorldError::MultiplePlayers(players));
        }
        if self.first_location().is_none() {
            return Err(WorldError::NoLocations);
        }

        let mut taken: BTreeSet<(&'static str, String)> = BTreeSet::new();
        for entity in &self.entities {
            if let Some(name) = entity.name()
                && !taken.insert((entity.kind(), name.to_ascii_lowercase()))
            {
                return Err(WorldError::DuplicateName {
                    kind: entity.kind().to_string(),
                    name: name.to_string(),
                });
            }
        }

        for entity in &self.entities {
            match entity {
                Entity::Player(player) => {
                    if self.location(&player.location).is_none() {
                        return Err(WorldError::DanglingReference {
                            entity: "player".to_string(),
                            location: player.location.clone(),
                        });
                    }
                }
                Entity::Object(object) => {
                    if object.name.chars().any(|c| c.is_ascii_uppercase()) {
                        return Err(WorldError::NotLowercase(object.name.clone()));
                    }
                    if !object.is_carried() && self.location(&object.location).is_none() {
                        return Err(WorldError::DanglingReference {
                            entity: format!("object \"{}\"", object.name),
                            location: object.location.clone(),
                        });
                    }
                }
                Entity::Location(_) => {}
            }
        }
        Ok(())
    }

    /// Compact JSON encoding, the form embedded in synthesis prompts.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Pretty-printed JSON dump, used by the debug verb and crash reports.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{}"))
    }
}
