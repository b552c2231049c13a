//! Plain-text rendering of world state.
//!
//! Everything here returns uncolored strings; terminal styling is the
//! harness's business. Prose is wrapped at a fixed width, listings lean on
//! the deterministic ordering the world model guarantees.

use nw_world::{CARRIED, Location, Object, World};

/// Column at which prose wraps.
pub const WRAP_WIDTH: usize = 78;

/// Greedy word-wrap, paragraph by paragraph. Words longer than the width
/// get a line of their own.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
            } else if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

fn object_line(object: &Object) -> &str {
    if object.short_description.is_empty() {
        &object.name
    } else {
        &object.short_description
    }
}

fn joined_object_lines(objects: &[&Object]) -> String {
    objects
        .iter()
        .map(|object| object_line(object))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The full `look` rendering of a location: prose, what lies there, and the
/// exits.
pub fn location_text(world: &World, location: &Location) -> String {
    let mut text = wrap(&location.long_description, WRAP_WIDTH);
    text.push_str("\nI see here:\n");
    let objects = world.objects_at(&location.name);
    if objects.is_empty() {
        text.push_str("Nothing special.");
    } else {
        text.push_str(&joined_object_lines(&objects));
    }
    let exits: Vec<&str> = location.exits.keys().map(String::as_str).collect();
    text.push_str(&format!("\n\nExits: {}", exits.join("; ")));
    text
}

/// The carried-objects listing.
pub fn inventory_text(world: &World) -> String {
    let carried = world.objects_at(CARRIED);
    let mut text = String::from("You are carrying:\n");
    if carried.is_empty() {
        text.push_str("Nothing special.");
    } else {
        text.push_str(&joined_object_lines(&carried));
    }
    text
}

/// The banner shown once at session start: title, framing, and the opening
/// prose of the start location.
pub fn intro_text(world: &World) -> String {
    let mut text = world.title.clone();
    if let Some(genre) = &world.genre {
        text.push_str(&format!("\nA {genre} adventure."));
    }
    text.push_str("\n\n");
    text.push_str(&wrap(&world.plot, WRAP_WIDTH));
    if let Some(objective) = &world.objective {
        text.push('\n');
        text.push_str(&wrap(&format!("Objective: {objective}"), WRAP_WIDTH));
    }
    if let Some(start) = world
        .player()
        .and_then(|player| world.location(&player.location))
    {
        text.push_str("\n\n");
        text.push_str(&wrap(&start.long_description, WRAP_WIDTH));
    }
    text.push_str("\n\nType \"help\" for the commands.");
    text
}

/// The verb list.
pub fn help_text() -> &'static str {
    "Commands:\n\
     \x20 look            describe where you are\n\
     \x20 look <thing>    examine something\n\
     \x20 go <exit>       move through an exit\n\
     \x20 take <thing>    pick something up\n\
     \x20 drop <thing>    put something down\n\
     \x20 inventory       list what you are carrying\n\
     \x20 help            this list\n\
     \x20 quit            leave the game\n\
     Anything else you type is attempted exactly as written."
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use nw_world::{Entity, Player};

    use super::*;

    fn crypt_world() -> World {
        let mut world = World {
            title: "The Hollow Spire".to_string(),
            plot: "Climb the spire before dawn.".to_string(),
            genre: Some("gothic fantasy".to_string()),
            ..World::default()
        };
        world.entities = vec![
            Entity::Player(Player {
                class: "wizard".to_string(),
                alive: true,
                location: "crypt".to_string(),
                short_description: String::new(),
                long_description: String::new(),
            }),
            Entity::Location(Location {
                name: "crypt".to_string(),
                exits: BTreeMap::from([
                    ("north".to_string(), "ossuary".to_string()),
                    ("west".to_string(), "stair".to_string()),
                ]),
                short_description: "a damp crypt".to_string(),
                long_description: "You are in a damp crypt. Water drips from the ceiling."
                    .to_string(),
                seen: true,
            }),
            Entity::Object(Object {
                name: "key".to_string(),
                adjective: "iron".to_string(),
                short_description: "an iron key".to_string(),
                long_description: "It's an iron key.".to_string(),
                location: "crypt".to_string(),
            }),
            Entity::Object(Object {
                name: "lantern".to_string(),
                adjective: "brass".to_string(),
                short_description: "a brass lantern".to_string(),
                long_description: "It's a brass lantern.".to_string(),
                location: CARRIED.to_string(),
            }),
        ];
        world
    }

    #[test]
    fn wrap_leaves_short_text_alone() {
        assert_eq!(wrap("a damp crypt", 78), "a damp crypt");
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let text = "one two three four five";
        insta::assert_snapshot!(wrap(text, 9), @r"
        one two
        three
        four five
        ");
    }

    #[test]
    fn wrap_gives_overlong_words_their_own_line() {
        assert_eq!(
            wrap("a incomprehensibilities b", 10),
            "a\nincomprehensibilities\nb"
        );
    }

    #[test]
    fn wrap_keeps_paragraph_breaks() {
        assert_eq!(wrap("one\n\ntwo", 78), "one\n\ntwo");
    }

    #[test]
    fn location_text_lists_objects_then_exits() {
        let world = crypt_world();
        let crypt = world.location("crypt").unwrap();
        insta::assert_snapshot!(location_text(&world, crypt), @r"
        You are in a damp crypt. Water drips from the ceiling.
        I see here:
        an iron key

        Exits: north; west
        ");
    }

    #[test]
    fn location_text_on_a_bare_location() {
        let world = crypt_world();
        let bare = Location {
            name: "cell".to_string(),
            long_description: "A bare cell.".to_string(),
            ..Location::default()
        };
        assert_eq!(
            location_text(&world, &bare),
            "A bare cell.\nI see here:\nNothing special.\n\nExits: "
        );
    }

    #[test]
    fn objects_share_one_line() {
        let mut world = crypt_world();
        world.entities.push(Entity::Object(Object {
            name: "amulet".to_string(),
            short_description: "a silver amulet".to_string(),
            location: "crypt".to_string(),
            ..Object::default()
        }));
        let crypt = world.location("crypt").unwrap();
        assert!(location_text(&world, crypt).contains("a silver amulet; an iron key"));
    }

    #[test]
    fn inventory_text_lists_carried_objects() {
        let world = crypt_world();
        insta::assert_snapshot!(inventory_text(&world), @r"
        You are carrying:
        a brass lantern
        ");
    }

    #[test]
    fn inventory_text_when_empty_handed() {
        let mut world = crypt_world();
        world.object_mut("lantern").unwrap().location = "crypt".to_string();
        assert_eq!(inventory_text(&world), "You are carrying:\nNothing special.");
    }

    #[test]
    fn objects_without_short_descriptions_fall_back_to_their_name() {
        let mut world = crypt_world();
        world.object_mut("key").unwrap().short_description = String::new();
        let crypt = world.location("crypt").unwrap();
        assert!(location_text(&world, crypt).contains("\nkey"));
    }

    #[test]
    fn intro_text_frames_the_game() {
        let intro = intro_text(&crypt_world());
        assert!(intro.starts_with("The Hollow Spire\nA gothic fantasy adventure."));
        assert!(intro.contains("Climb the spire before dawn."));
        assert!(intro.contains("You are in a damp crypt."));
        assert!(intro.ends_with("Type \"help\" for the commands."));
    }

    #[test]
    fn help_text_names_every_verb() {
        let help = help_text();
        for verb in ["look", "go", "take", "drop", "inventory", "help", "quit"] {
            assert!(help.contains(verb), "help is missing {verb}");
        }
    }
}
