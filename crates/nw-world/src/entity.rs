//! Entity types: the tagged union the world is made of.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel `location` value meaning the player carries the object.
pub const CARRIED: &str = "player";

fn default_alive() -> bool {
    true
}

/// A place the player can stand in, keyed by its unique lowercase name.
///
/// A location enters the world either fully populated or as a *stub*: a bare
/// name left behind when some other part of the world referenced a place
/// nobody has described yet. Stubs are filled in on first entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier, compared case-insensitively.
    #[serde(default)]
    pub name: String,
    /// Direction word mapped to the name of the location it leads to.
    #[serde(default)]
    pub exits: BTreeMap<String, String>,
    /// One-line description.
    #[serde(default)]
    pub short_description: String,
    /// Full description shown on entry and by `look`.
    #[serde(default)]
    pub long_description: String,
    /// Whether the player has examined this location yet.
    ///
    /// Flips from `false` to `true` exactly once, on the first `look`; the
    /// flip is the trigger for one-shot object materialization.
    #[serde(default)]
    pub seen: bool,
}

impl Location {
    /// A bare stub carrying only a name.
    pub fn stub(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when nothing besides the name has been populated.
    pub fn is_stub(&self) -> bool {
        self.exits.is_empty()
            && self.short_description.is_empty()
            && self.long_description.is_empty()
    }
}

/// The player character. Every world holds exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Character class, e.g. `"wizard"`. Free-form resolution consults it
    /// when judging what the player can plausibly do.
    #[serde(default)]
    pub class: String,
    /// The session keeps running while this is true.
    #[serde(default = "default_alive")]
    pub alive: bool,
    /// Name of the location the player stands in.
    #[serde(default)]
    pub location: String,
    /// One-line description.
    #[serde(default)]
    pub short_description: String,
    /// Full description.
    #[serde(default)]
    pub long_description: String,
}

/// A takeable thing, keyed by its unique lowercase single-word name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier, stored lowercase.
    #[serde(default)]
    pub name: String,
    /// Flavor word the synthesis service attached to the object.
    #[serde(default)]
    pub adjective: String,
    /// One-line description used in listings.
    #[serde(default)]
    pub short_description: String,
    /// Full description shown by `look <name>`.
    #[serde(default)]
    pub long_description: String,
    /// Name of the containing location, or [`CARRIED`].
    #[serde(default)]
    pub location: String,
}

impl Object {
    /// True while the player carries this object.
    pub fn is_carried(&self) -> bool {
        self.location == CARRIED
    }
}

/// A world entity, discriminated by the serialized `type` field.
///
/// The serialized form is internally tagged, so a location reads as
/// `{"type": "location", "name": ...}` on the wire. Adding a variant forces
/// every `match` in the session and pipeline to say what the new kind means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    /// A place the player can occupy.
    Location(Location),
    /// The player character.
    Player(Player),
    /// A takeable object.
    Object(Object),
}

impl Entity {
    /// The entity's unique name, if its kind has one. Players are anonymous.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Location(location) => Some(&location.name),
            Self::Player(_) => None,
            Self::Object(object) => Some(&object.name),
        }
    }

    /// Lowercase kind label, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Location(_) => "location",
            Self::Player(_) => "player",
            Self::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_round_trips_with_type_tag() {
        let location = Location {
            name: "crypt".to_string(),
            exits: BTreeMap::from([("north".to_string(), "ossuary".to_string())]),
            short_description: "a damp crypt".to_string(),
            long_description: "You are in a damp crypt.".to_string(),
            seen: true,
        };
        let json = serde_json::to_string(&Entity::Location(location.clone())).unwrap();
        assert!(json.contains("\"type\":\"location\""));

        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Entity::Location(location));
    }

    #[test]
    fn player_alive_defaults_to_true() {
        let entity: Entity =
            serde_json::from_str(r#"{"type": "player", "location": "crypt"}"#).unwrap();
        match entity {
            Entity::Player(player) => {
                assert!(player.alive);
                assert_eq!(player.location, "crypt");
                assert!(player.class.is_empty());
            }
            other => panic!("expected a player, got {other:?}"),
        }
    }

    #[test]
    fn object_with_only_a_name_deserializes() {
        let entity: Entity =
            serde_json::from_str(r#"{"type": "object", "name": "lantern"}"#).unwrap();
        match entity {
            Entity::Object(object) => {
                assert_eq!(object.name, "lantern");
                assert!(!object.is_carried());
            }
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let result = serde_json::from_str::<Entity>(r#"{"type": "portal", "name": "rift"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn stub_detection() {
        let stub = Location::stub("ossuary");
        assert!(stub.is_stub());
        assert!(!stub.seen);

        let mut described = stub.clone();
        described.long_description = "Bones line the walls.".to_string();
        assert!(!described.is_stub());
    }

    #[test]
    fn carried_sentinel() {
        let object = Object {
            name: "key".to_string(),
            location: CARRIED.to_string(),
            ..Object::default()
        };
        assert!(object.is_carried());
    }

    #[test]
    fn entity_names_and_kinds() {
        let location = Entity::Location(Location::stub("crypt"));
        assert_eq!(location.name(), Some("crypt"));
        assert_eq!(location.kind(), "location");

        let player = Entity::Player(Player {
            class: "wizard".to_string(),
            alive: true,
            location: "crypt".to_string(),
            short_description: String::new(),
            long_description: String::new(),
        });
        assert_eq!(player.name(), None);
        assert_eq!(player.kind(), "player");
    }
}
