//! Command parsing for player input.
//!
//! The resolver is deliberately tiny: a handful of built-in verbs with
//! strict arity, and everything else handed to the synthesis service as a
//! free-form sentence. Cleaning strips filler words before dispatch, so
//! "look at the altar" and "look altar" parse identically. The free-form
//! path always carries the player's original wording, not the cleaned one.

/// Filler words removed before dispatch.
const STOPWORDS: &[&str] = &["the", "a", "an", "at", "of", "to", "in", "on"];

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the game.
    Quit,
    /// Show the verb list.
    Help,
    /// Describe the current location.
    Look,
    /// Examine one visible entity.
    LookAt {
        /// The entity name.
        target: String,
    },
    /// List carried objects.
    Inventory,
    /// Move through an exit of the current location.
    Go {
        /// The exit direction.
        exit: String,
    },
    /// Pick up an object lying here.
    Take {
        /// The object name.
        item: String,
    },
    /// Put down a carried object.
    Drop {
        /// The object name.
        item: String,
    },
    /// Dump the raw world state.
    Debug,
    /// A built-in verb missing its required argument.
    Incomplete {
        /// What to ask the player.
        prompt: &'static str,
    },
    /// Anything the built-in verbs cannot express.
    Freeform {
        /// The original sentence, trimmed but otherwise untouched.
        sentence: String,
    },
}

/// Lowercase the input and drop filler words.
pub fn clean_sentence(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Parse one line of player input.
///
/// Dispatch is by cleaned word count: known verbs take exactly zero or one
/// argument, and a known verb buried in a longer sentence goes to the
/// free-form path along with everything else. "take key" is a `Take`;
/// "take the key from the altar" is the service's problem.
pub fn parse_command(input: &str) -> Command {
    let sentence = input.trim();
    if sentence.is_empty() {
        return Command::Look;
    }

    let words = clean_sentence(sentence);
    match words.len() {
        // The whole line was filler words.
        0 => Command::Look,
        1 => match words[0].as_str() {
            "quit" => Command::Quit,
            "help" => Command::Help,
            "look" => Command::Look,
            "inventory" => Command::Inventory,
            "?" => Command::Debug,
            "go" => Command::Incomplete { prompt: "Go where?" },
            "take" => Command::Incomplete { prompt: "Take what?" },
            "drop" => Command::Incomplete { prompt: "Drop what?" },
            _ => Command::Freeform {
                sentence: sentence.to_string(),
            },
        },
        2 => match words[0].as_str() {
            "look" => Command::LookAt {
                target: words[1].clone(),
            },
            "go" => Command::Go {
                exit: words[1].clone(),
            },
            "take" => Command::Take {
                item: words[1].clone(),
            },
            "drop" => Command::Drop {
                item: words[1].clone(),
            },
            _ => Command::Freeform {
                sentence: sentence.to_string(),
            },
        },
        _ => Command::Freeform {
            sentence: sentence.to_string(),
        },
    }
}
