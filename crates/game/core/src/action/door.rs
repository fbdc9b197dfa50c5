//! Opening and closing doors.
//!
//! Adjacent door cells of the same kind form a gate and open or close
//! together. A null direction means "pick for me": with exactly one candidate
//! and `easy_door` set it is used directly, otherwise the player is asked.

use std::collections::BTreeSet;

use tracing::debug;

use crate::env::{DoorState, TerrainKind};
use crate::state::Position;

use super::effects::capitalise;
use super::escape;
use super::execute::TurnContext;
use super::{ActionKind, Delta, Outcome};

/// Door cells orthogonally connected to `start` with the same terrain.
pub fn connected_doors(ctx: &TurnContext<'_, '_>, start: Position) -> BTreeSet<Position> {
    let mut gate = BTreeSet::new();
    let Some(kind) = ctx.terrain(start) else {
        return gate;
    };

    let mut frontier = vec![start];
    while let Some(cell) = frontier.pop() {
        if ctx.terrain(cell) != Some(kind) || !gate.insert(cell) {
            continue;
        }
        for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
            frontier.push(cell.offset(dx, dy));
        }
    }
    gate
}

/// Counts adjacent doors matching `wanted`, counting each gate once.
/// Returns the count and the offset of the last one found.
fn count_adjacent(
    ctx: &TurnContext<'_, '_>,
    wanted: impl Fn(TerrainKind) -> bool,
) -> (usize, Delta) {
    let origin = ctx.player_position();
    let mut seen = BTreeSet::new();
    let mut count = 0;
    let mut last = Delta::NULL;

    for cell in origin.neighbours() {
        if seen.contains(&cell) || !ctx.terrain(cell).is_some_and(&wanted) {
            continue;
        }
        seen.extend(connected_doors(ctx, cell));
        count += 1;
        last = Delta::between(origin, cell);
    }
    (count, last)
}

/// Resolves a null direction into a door offset, or `None` if the command ends here.
fn pick_direction(
    ctx: &mut TurnContext<'_, '_>,
    delta: Delta,
    wanted: impl Fn(TerrainKind) -> bool,
    nothing_nearby: &str,
) -> Option<Delta> {
    if !delta.is_null() {
        return Some(delta);
    }

    let (count, only) = count_adjacent(ctx, wanted);
    if count == 0 {
        ctx.say(nothing_nearby);
        ctx.fail(ActionKind::None);
        return None;
    }
    if count == 1 && ctx.config.easy_door {
        return Some(only);
    }

    match ctx.services.prompts.choose_direction("In which direction?") {
        Some(chosen) if chosen.is_single_step() => Some(chosen),
        _ => {
            ctx.abort();
            None
        }
    }
}

fn gate_noun(cells: usize) -> &'static str {
    if cells > 1 { "gate" } else { "door" }
}

// ============================================================================
// Open
// ============================================================================

pub fn open_door(ctx: &mut TurnContext<'_, '_>, delta: Delta) {
    if ctx.state.player.held.is_some() {
        escape::struggle_free(ctx);
        return;
    }
    if ctx.state.player.is_confused() {
        ctx.say("You're too confused!");
        ctx.fail(ActionKind::OpenDoor);
        return;
    }

    let Some(delta) = pick_direction(
        ctx,
        delta,
        |terrain| matches!(terrain, TerrainKind::ClosedDoor | TerrainKind::RunedDoor),
        "There's nothing to open nearby.",
    ) else {
        return;
    };
    let door = delta.apply(ctx.player_position());

    if let Some(veto) = ctx.state.world.door_vetoes.get(&door) {
        let reason = veto.clone().unwrap_or_else(|| "The door is shut tight!".to_string());
        ctx.say(&reason);
        ctx.fail(ActionKind::OpenDoor);
        return;
    }

    match ctx.terrain(door).and_then(TerrainKind::door_state) {
        Some(DoorState::Closed | DoorState::Runed) => open_door_at(ctx, door),
        Some(DoorState::Open) => {
            ctx.say("It's already open!");
            ctx.fail(ActionKind::OpenDoor);
        }
        Some(DoorState::Sealed) => {
            ctx.say("That door is sealed shut!");
            ctx.fail(ActionKind::OpenDoor);
        }
        None => {
            ctx.say("There isn't anything that you can open there!");
            ctx.fail(ActionKind::OpenDoor);
        }
    }
}

fn open_door_at(ctx: &mut TurnContext<'_, '_>, door: Position) {
    if ctx.terrain(door) == Some(TerrainKind::RunedDoor)
        && !ctx.confirm(
            "This door is marked with runes of warning. Really open it?",
            false,
        )
    {
        ctx.canned_ok();
        ctx.abort();
        return;
    }

    let cells = connected_doors(ctx, door);
    for cell in &cells {
        ctx.state.set_terrain(*cell, TerrainKind::OpenDoor);
    }
    ctx.say(&format!("You open the {}.", gate_noun(cells.len())));
    debug!(?door, cells = cells.len(), "opened door");

    let delay = ctx.action_delay();
    ctx.end_turn(ActionKind::OpenDoor, Outcome::Success, delay);
}

// ============================================================================
// Close
// ============================================================================

pub fn close_door(ctx: &mut TurnContext<'_, '_>, delta: Delta) {
    if ctx.state.player.held.is_some() {
        ctx.say("You can't close doors while held in a net.");
        ctx.fail(ActionKind::CloseDoor);
        return;
    }
    if ctx.state.player.is_confused() {
        ctx.say("You're too confused!");
        ctx.fail(ActionKind::CloseDoor);
        return;
    }

    let Some(delta) = pick_direction(
        ctx,
        delta,
        |terrain| terrain == TerrainKind::OpenDoor,
        "There's nothing to close nearby.",
    ) else {
        return;
    };
    let door = delta.apply(ctx.player_position());

    match ctx.terrain(door).and_then(TerrainKind::door_state) {
        Some(DoorState::Open) => close_door_at(ctx, door),
        Some(DoorState::Closed | DoorState::Runed | DoorState::Sealed) => {
            ctx.say("It's already closed!");
            ctx.fail(ActionKind::CloseDoor);
        }
        None => {
            ctx.say("There isn't anything that you can close there!");
            ctx.fail(ActionKind::CloseDoor);
        }
    }
}

fn close_door_at(ctx: &mut TurnContext<'_, '_>, door: Position) {
    let cells = connected_doors(ctx, door);

    for cell in &cells {
        if let Some(monster) = ctx.state.monster_at(*cell) {
            let text = if monster.is_visible() {
                format!("{} is in the way!", capitalise(&monster.the_name()))
            } else {
                "Something is blocking the doorway.".to_string()
            };
            ctx.say(&text);
            ctx.fail(ActionKind::CloseDoor);
            return;
        }
    }

    for cell in &cells {
        ctx.state.set_terrain(*cell, TerrainKind::ClosedDoor);
    }
    ctx.say(&format!("You close the {}.", gate_noun(cells.len())));
    debug!(?door, cells = cells.len(), "closed door");

    let delay = ctx.action_delay();
    ctx.end_turn(ActionKind::CloseDoor, Outcome::Success, delay);
}
