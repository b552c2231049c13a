//! The synthesis pipeline: every operation that turns service JSON into
//! world state.
//!
//! Three shapes of synthesis exist. Bootstrap and free-form resolution
//! replace the whole world, so they run the full repair-and-check gauntlet.
//! Location and object materialization graft a single entity and only need
//! local stamping. All of them go through a [`Synthesizer`], which is how
//! the tests script the service.

use nw_world::{Entity, Location, Object, World, canonical_object_name, template};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::Synthesizer;
use crate::error::{SynthError, SynthResult};
use crate::prompt;

/// Builds a brand-new world by asking the service to fill in the
/// placeholder skeleton.
///
/// The reply is normalized and checked; an unrepairable world is an error,
/// there is nothing to fall back on at session start. The start location is
/// marked seen because the skeleton already stocks it with an object, so
/// the arrival `look` must not stock it again.
pub fn bootstrap_world(synth: &dyn Synthesizer, theme: Option<&str>) -> SynthResult<World> {
    let skeleton = template::skeleton();
    let raw = synth.synthesize(&prompt::bootstrap(&skeleton.to_json(), theme))?;
    let mut world = world_from_value(raw)?;
    world.normalize();
    world.check_consistency()?;
    let start = world
        .player()
        .map(|player| player.location.clone())
        .unwrap_or_default();
    world.mark_seen(&start);
    info!(title = %world.title, entities = world.entity_count(), "bootstrapped a new world");
    Ok(world)
}

/// Fills in the location the player is about to enter, if needed.
///
/// Fires when `target` is absent from the world or still a stub; a location
/// that already has content never costs a service call. The service sees
/// the whole world plus where the player came from and answers with one
/// location object. Whatever it calls the place, the stamped name is the
/// lowercased `target`, and `seen` starts false so the arrival `look` can
/// stock the room.
pub fn materialize_location(
    synth: &dyn Synthesizer,
    world: &mut World,
    target: &str,
    from: &str,
) -> SynthResult<()> {
    if world
        .location(target)
        .is_some_and(|location| !location.is_stub())
    {
        return Ok(());
    }
    let raw = synth.synthesize(&prompt::location(&world.to_json(), target, from))?;
    let text = raw.to_string();
    let mut location: Location =
        serde_json::from_value(raw).map_err(|err| SynthError::Parse {
            reason: err.to_string(),
            raw: text,
        })?;
    location.name = target.to_ascii_lowercase();
    location.seen = false;
    world.upsert_location(location);
    world.normalize();
    info!(name = %target, from = %from, "materialized location");
    Ok(())
}

/// Invents one object for a location the player examines for the first
/// time.
///
/// Called by the session when a `look` flips a location's `seen` flag. The
/// returned name is the inserted object's, already collapsed to a single
/// lowercase word and suffixed past any clash. `None` means the service
/// returned nothing usable, which is not an error; the room simply stays
/// empty.
pub fn materialize_object(
    synth: &dyn Synthesizer,
    world: &mut World,
    location: &str,
) -> SynthResult<Option<String>> {
    let raw = synth.synthesize(&prompt::object(&world.to_json(), location))?;
    let text = raw.to_string();
    let mut object: Object = serde_json::from_value(raw).map_err(|err| SynthError::Parse {
        reason: err.to_string(),
        raw: text,
    })?;
    object.name = canonical_object_name(&object.name);
    if object.name.is_empty() {
        warn!(location = %location, "object synthesis returned no usable name");
        return Ok(None);
    }
    object.name = world.unique_object_name(&object.name);
    object.location = location.to_ascii_lowercase();
    let name = object.name.clone();
    world.push_entity(Entity::Object(object))?;
    info!(name = %name, location = %location, "materialized object");
    Ok(Some(name))
}

/// Resolves a free-form sentence by letting the service rewrite the world.
///
/// The fragile path. The service receives the entire world and the
/// player's sentence verbatim, and answers with a complete replacement
/// world plus a top-level `output` narration. A reply that fails parsing or
/// the consistency checks is thrown away and asked for once more; a second
/// failure surfaces the error and leaves the current world exactly as it
/// was. Entities missing from a committed reply are thereby deleted, which
/// is how the service expresses destruction.
pub fn resolve_action(
    synth: &dyn Synthesizer,
    world: &mut World,
    sentence: &str,
) -> SynthResult<String> {
    let request = prompt::action(&world.to_json(), sentence);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match try_resolve(synth, world, &request) {
            Ok(output) => {
                info!(attempt, chars = output.len(), "free-form action resolved");
                return Ok(output);
            }
            Err(err @ SynthError::Transport(_)) => return Err(err),
            Err(err) if attempt < 2 => {
                warn!(attempt, error = %err, "rejected synthesized world, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

fn try_resolve(synth: &dyn Synthesizer, world: &mut World, request: &str) -> SynthResult<String> {
    let raw = synth.synthesize(request)?;
    let mut candidate = world_from_value(raw)?;
    let output = candidate.take_output().unwrap_or_default();
    candidate.normalize();
    candidate.check_consistency()?;
    *world = candidate;
    Ok(output)
}

fn world_from_value(raw: Value) -> SynthResult<World> {
    let text = raw.to_string();
    serde_json::from_value(raw).map_err(|err| SynthError::Parse {
        reason: err.to_string(),
        raw: text,
    })
}
