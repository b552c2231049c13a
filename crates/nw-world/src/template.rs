//! The placeholder skeleton that bootstrap sends to the synthesis service.

use std::collections::BTreeMap;

use crate::entity::{CARRIED, Entity, Location, Object, Player};
use crate::world::World;

/// Builds the skeleton world whose `$` placeholders the synthesis service
/// replaces with themed content.
///
/// The skeleton is structural as well as textual: the player starts at
/// `$start_location`, which already has a north exit toward
/// `$north_location`, one object is carried and one lies at the start. The
/// bootstrap prompt tells the service that placeholders naming a specific
/// thing must receive the same replacement everywhere they appear, while
/// generic ones (`$single_word`, `$short_description`) may differ per field.
pub fn skeleton() -> World {
    World {
        title: "$game_title".to_string(),
        plot: "$game_plot".to_string(),
        genre: Some("$genre".to_string()),
        objective: Some("$game_objective".to_string()),
        entities: vec![
            Entity::Player(Player {
                class: "$class".to_string(),
                alive: true,
                location: "$start_location".to_string(),
                short_description: "a $short_description".to_string(),
                long_description: "You are a $long_description".to_string(),
            }),
            Entity::Location(Location {
                name: "$start_location".to_string(),
                exits: BTreeMap::from([("north".to_string(), "$north_location".to_string())]),
                short_description: "a $short_description".to_string(),
                long_description: "You are in a $long_description".to_string(),
                seen: false,
            }),
            Entity::Object(Object {
                name: "$single_word".to_string(),
                adjective: "$single_word".to_string(),
                short_description: "a $short_description".to_string(),
                long_description: "It's a $long_description".to_string(),
                location: CARRIED.to_string(),
            }),
            Entity::Object(Object {
                name: "$single_word".to_string(),
                adjective: "$single_word".to_string(),
                short_description: "a $short_description".to_string(),
                long_description: "It's a $long_description".to_string(),
                location: "$start_location".to_string(),
            }),
        ],
        output: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_has_a_player_a_start_and_two_objects() {
        let world = skeleton();
        assert!(world.player().is_some());
        assert_eq!(world.entity_count(), 4);
        assert_eq!(world.objects_at(CARRIED).len(), 1);
        assert_eq!(
            world.player().map(|p| p.location.as_str()),
            world.first_location().map(|l| l.name.as_str()),
        );
    }

    #[test]
    fn skeleton_serializes_with_type_tags_and_placeholders() {
        let json = serde_json::to_string(&skeleton()).unwrap();
        assert!(json.contains("\"type\":\"player\""));
        assert!(json.contains("\"type\":\"location\""));
        assert!(json.contains("$start_location"));
        assert!(!json.contains("\"output\""));
    }
}
