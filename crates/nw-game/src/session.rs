//! The turn-based game session.
//!
//! A session owns one world and one synthesizer and advances strictly one
//! turn at a time. Built-in verbs mutate the world directly and never talk
//! to the service; movement and first examination trigger the lazy
//! materialization cascade; everything else becomes a free-form sentence
//! the service resolves against the whole world.

use nw_synth::{Synthesizer, pipeline};
use nw_world::{CARRIED, Object, World};

use crate::command::{Command, parse_command};
use crate::error::GameResult;
use crate::render;

/// One completed turn: what to print, and whether the session is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Text shown to the player.
    pub text: String,
    /// True when the game ends with this turn.
    pub ended: bool,
}

impl Turn {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ended: false,
        }
    }

    fn ending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ended: true,
        }
    }
}

/// A running game.
pub struct GameSession<S> {
    world: World,
    synth: S,
}

impl<S: Synthesizer> GameSession<S> {
    /// Starts a new game by synthesizing a fresh world.
    pub fn bootstrap(synth: S, theme: Option<&str>) -> GameResult<Self> {
        let world = pipeline::bootstrap_world(&synth, theme)?;
        Ok(Self { world, synth })
    }

    /// Builds a session around an already materialized world.
    pub fn with_world(world: World, synth: S) -> Self {
        Self { world, synth }
    }

    /// Read access to the world, mainly for the harness's crash dump.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The banner shown once at session start.
    pub fn intro(&self) -> String {
        render::intro_text(&self.world)
    }

    /// Executes one line of player input.
    ///
    /// Rule violations come back as ordinary turn text; an `Err` means the
    /// synthesis machinery failed and the world is unchanged.
    pub fn turn(&mut self, input: &str) -> GameResult<Turn> {
        match parse_command(input) {
            Command::Quit => Ok(Turn::ending(String::new())),
            Command::Help => Ok(Turn::text(render::help_text())),
            Command::Look => self.look(),
            Command::LookAt { target } => Ok(Turn::text(self.look_at(&target))),
            Command::Inventory => Ok(Turn::text(render::inventory_text(&self.world))),
            Command::Go { exit } => self.go(&exit),
            Command::Take { item } => Ok(Turn::text(self.take_item(&item))),
            Command::Drop { item } => Ok(Turn::text(self.drop_item(&item))),
            Command::Debug => Ok(Turn::text(self.world.to_pretty_json())),
            Command::Incomplete { prompt } => Ok(Turn::text(prompt)),
            Command::Freeform { sentence } => self.freeform(&sentence),
        }
    }

    fn here(&self) -> String {
        self.world
            .player()
            .map(|player| player.location.clone())
            .unwrap_or_default()
    }

    /// Describe the current location, stocking it on first examination.
    fn look(&mut self) -> GameResult<Turn> {
        let here = self.here();
        if self.world.mark_seen(&here) {
            pipeline::materialize_object(&self.synth, &mut self.world, &here)?;
        }
        let text = match self.world.location(&here) {
            Some(location) => render::location_text(&self.world, location),
            None => "You are nowhere.".to_string(),
        };
        Ok(Turn::text(text))
    }

    fn look_at(&self, target: &str) -> String {
        let here = self.here();
        let visible = self.world.object(target).filter(|object| {
            object.is_carried() || object.location.eq_ignore_ascii_case(&here)
        });
        if let Some(object) = visible {
            if object.long_description.is_empty() {
                return "Nothing special.".to_string();
            }
            return render::wrap(&object.long_description, render::WRAP_WIDTH);
        }
        if here.eq_ignore_ascii_case(target)
            && let Some(location) = self.world.location(target)
        {
            return render::location_text(&self.world, location);
        }
        "You don't see that here.".to_string()
    }

    /// Move through an exit, materializing the far side if nobody has been
    /// there yet. Arrival shows only the destination's prose and does not
    /// flip `seen`; only an explicit `look` stocks a location.
    fn go(&mut self, exit: &str) -> GameResult<Turn> {
        let here = self.here();
        let Some(target) = self
            .world
            .location(&here)
            .and_then(|location| location.exits.get(exit).cloned())
        else {
            return Ok(Turn::text("You can't go there."));
        };
        pipeline::materialize_location(&self.synth, &mut self.world, &target, &here)?;
        let arrived = target.to_ascii_lowercase();
        if let Some(player) = self.world.player_mut() {
            player.location = arrived.clone();
        }
        let text = match self.world.location(&arrived) {
            Some(location) => render::wrap(&location.long_description, render::WRAP_WIDTH),
            None => "You can't go there.".to_string(),
        };
        Ok(Turn::text(text))
    }

    fn take_item(&mut self, item: &str) -> String {
        let here = self.here();
        let takeable = self
            .world
            .object(item)
            .is_some_and(|object| object.location.eq_ignore_ascii_case(&here));
        if !takeable {
            return "You can't take that.".to_string();
        }
        if let Some(object) = self.world.object_mut(item) {
            object.location = CARRIED.to_string();
        }
        "Taken!".to_string()
    }

    fn drop_item(&mut self, item: &str) -> String {
        let here = self.here();
        let carried = self.world.object(item).is_some_and(Object::is_carried);
        if !carried {
            return "You are not carrying that.".to_string();
        }
        if let Some(object) = self.world.object_mut(item) {
            object.location = here;
        }
        "Dropped!".to_string()
    }

    fn freeform(&mut self, sentence: &str) -> GameResult<Turn> {
        let output = pipeline::resolve_action(&self.synth, &mut self.world, sentence)?;
        let mut text = if output.is_empty() {
            "Nothing happens.".to_string()
        } else {
            render::wrap(&output, render::WRAP_WIDTH)
        };
        let alive = self.world.player().is_none_or(|player| player.alive);
        if !alive {
            text.push_str("\n\nYou are dead!");
            return Ok(Turn::ending(text));
        }
        Ok(Turn::text(text))
    }
}
