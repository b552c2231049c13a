//! Prompt builders for each synthesis operation.
//!
//! Every prompt embeds the current world as compact single-line JSON so the
//! service answers in context. The builders keep their literals flush-left;
//! [`dedent`] runs over the final prompt anyway, so indented fragments from
//! callers cannot smuggle stray whitespace onto the wire.

/// Strips the common leading indentation from every line and trims
/// surrounding blank lines.
pub fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect();
    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Prompt that turns the placeholder skeleton into a fresh world.
pub fn bootstrap(skeleton_json: &str, theme: Option<&str>) -> String {
    let theme_line = match theme {
        Some(theme) => format!("Theme it as: {theme}."),
        None => "Invent an evocative theme and genre.".to_string(),
    };
    format!(
        "Below is the JSON skeleton of a text adventure game. Replace every $placeholder \
with fitting content. {theme_line}\n\
Placeholders that name a specific thing ($start_location, $north_location) must receive \
the same replacement everywhere they appear. Generic placeholders ($single_word, \
$short_description, $long_description) should differ from entity to entity. Object names \
must be single lowercase words; location names must be lowercase. Keep the JSON structure \
exactly as given and do not add or remove entities.\n\n{skeleton_json}"
    )
}

/// Prompt for describing one not-yet-materialized location.
pub fn location(world_json: &str, name: &str, from: &str) -> String {
    format!(
        "Below is the JSON state of a text adventure game. The location named \"{name}\" \
has not been described yet. Respond with one JSON object for it, with the keys \"name\", \
\"exits\", \"short_description\" and \"long_description\". At least one location in the \
game should have four exits (north, south, east and west), and one exit should usually \
lead back to \"{from}\". Exits may point at locations that do not exist yet. All names \
must be lowercase. Stay consistent with the game's theme.\n\n{world_json}"
    )
}

/// Prompt for inventing one object at a freshly examined location.
pub fn object(world_json: &str, location: &str) -> String {
    format!(
        "Below is the JSON state of a text adventure game. Invent one object the player \
discovers at \"{location}\". Respond with one JSON object with the keys \"name\", \
\"adjective\", \"short_description\" and \"long_description\". The name must be a single \
lowercase word that is not already taken, and the short description must mention the \
name. Stay consistent with the game's theme.\n\n{world_json}"
    )
}

/// Prompt for resolving a free-form player action against the whole world.
pub fn action(world_json: &str, sentence: &str) -> String {
    format!(
        "Below is the JSON state of a text adventure game. The player attempts: \
\"{sentence}\". Judge whether the action is plausible for the player's class, location \
and the object properties; you don't have to please the player. Respond with the \
complete updated world in exactly the same JSON schema, changing only what the action \
changes. Add a top-level \"output\" field holding the narration shown to the player. If \
the action kills the player, set the player's \"alive\" field to false. Entities that \
are destroyed or consumed are simply omitted from the response.\n\n{world_json}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_strips_the_common_indent() {
        let text = "\n    first line\n      indented more\n    last line\n";
        assert_eq!(dedent(text), "first line\n  indented more\nlast line");
    }

    #[test]
    fn dedent_keeps_interior_blank_lines() {
        let text = "  a\n\n  b";
        assert_eq!(dedent(text), "a\n\nb");
    }

    #[test]
    fn dedent_leaves_flush_left_text_alone() {
        let text = "a\nb";
        assert_eq!(dedent(text), text);
    }

    #[test]
    fn action_prompt_carries_the_sentence_verbatim() {
        let prompt = action("{\"title\":\"t\"}", "wave the amulet at the iron door");
        assert!(prompt.contains("\"wave the amulet at the iron door\""));
        assert!(prompt.ends_with("{\"title\":\"t\"}"));
    }

    #[test]
    fn bootstrap_prompt_mentions_the_theme_when_given() {
        let with = bootstrap("{}", Some("derelict space station"));
        assert!(with.contains("Theme it as: derelict space station."));

        let without = bootstrap("{}", None);
        assert!(without.contains("Invent an evocative theme"));
    }

    #[test]
    fn location_prompt_names_both_ends_of_the_move() {
        let prompt = location("{}", "ossuary", "crypt");
        assert!(prompt.contains("\"ossuary\""));
        assert!(prompt.contains("lead back to \"crypt\""));
    }
}
