//! Lunging: a free one-tile reposition toward a hostile further down the line.
//!
//! The lunge itself costs no time. Its cost is merged into whatever the
//! follow-up step does; if that step never commits, the pipeline charges a
//! plain move instead (see `finalize_cancelled_lunge` in the pipeline).

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::config::MoveConfig;
use crate::env::TerrainKind;
use crate::state::{EntityId, Position};

use super::effects;
use super::execute::TurnContext;
use super::gate::{self, GateVerdict};
use super::{Delta, Outcome};

pub type TracePath = ArrayVec<Position, { MoveConfig::MAX_TRACE_LENGTH }>;

/// Cells a straight ray from `origin` along `delta` passes through, up to
/// `range` cells. The ray stops after the first cell that is out of bounds
/// or solid; that cell is included if it is on the map.
pub fn trace_path(
    ctx: &TurnContext<'_, '_>,
    origin: Position,
    delta: Delta,
    range: usize,
) -> TracePath {
    let mut path = TracePath::new();
    let mut cell = origin;
    for _ in 0..range.min(MoveConfig::MAX_TRACE_LENGTH) {
        cell = delta.apply(cell);
        if !ctx.in_bounds(cell) {
            break;
        }
        path.push(cell);
        if ctx.is_solid(cell) {
            break;
        }
    }
    trace!(?origin, ?delta, len = path.len(), "lunge trace");
    path
}

/// First visible monster along the path, if it is a hostile worth lunging at.
fn find_target(ctx: &TurnContext<'_, '_>, path: &TracePath) -> Option<EntityId> {
    for cell in path {
        let terrain = ctx.terrain(*cell)?;
        if !terrain.is_traversable() && terrain != TerrainKind::ShallowWater {
            return None;
        }
        if terrain.is_solid() {
            return None;
        }
        let Some(monster) = ctx.state.monster_at(*cell) else {
            continue;
        };
        if !monster.is_visible() {
            continue;
        }
        if monster.is_friendly() || monster.is_neutral() || monster.kind.is_firewood() {
            return None;
        }
        return Some(monster.id);
    }
    None
}

/// Attempts a lunge in direction `delta`.
///
/// - `Success`: the player moved one tile and pre/post-move effects ran
/// - `Fail`: nothing happened; the plain step continues
/// - `Abort`: a prompt was declined; the whole command is discarded
pub fn lunge_forward(ctx: &mut TurnContext<'_, '_>, delta: Delta, repeating: bool) -> Outcome {
    if repeating {
        ctx.say("You can't repeat lunge.");
        ctx.outcome.cancel_repeat = true;
        return Outcome::Fail;
    }

    let player = &ctx.state.player;
    if player.is_nervous() || player.is_confused() || player.is_stationary() || player.is_constricted()
    {
        return Outcome::Fail;
    }

    let origin = ctx.player_position();
    let path = trace_path(ctx, origin, delta, ctx.config.tracer_range());
    let Some(target) = find_target(ctx, &path) else {
        return Outcome::Fail;
    };

    let destination = delta.apply(origin);

    if let Some(name) = ctx.state.beholder_blocking(destination).map(|m| m.the_name()) {
        ctx.say(&format!("You cannot lunge away from {name}!"));
        return Outcome::Fail;
    }
    if let Some(name) = ctx.state.fearmonger_blocking(destination).map(|m| m.the_name()) {
        ctx.say(&format!("You cannot lunge closer to {name}!"));
        return Outcome::Fail;
    }

    if let Some(monster) = ctx.state.monster_at(destination) {
        if !monster.is_visible() {
            ctx.say("Something unexpectedly blocked you, preventing you from lunging!");
        }
        return Outcome::Fail;
    }

    match ctx.terrain(destination) {
        None => return Outcome::Fail,
        Some(TerrainKind::Lava | TerrainKind::DeepWater | TerrainKind::ToxicBog) => {
            return Outcome::Fail;
        }
        Some(terrain) if terrain.is_solid() || terrain.is_transparent_wall() => {
            return Outcome::Fail;
        }
        Some(_) => {}
    }

    let verdict = gate::dangerous_destination(ctx, destination, "lunge")
        .and_then(|| gate::barbed_move(ctx, true));
    if verdict != GateVerdict::Continue {
        return Outcome::Abort;
    }

    let name = ctx.monster_name(target);
    effects::before_move(ctx);
    ctx.say(&format!("You lunge towards {name}!"));
    let old_position = origin;
    ctx.state.player.position = destination;
    effects::after_move(ctx, old_position, true);

    if ctx.state.turn.travel.is_running() {
        ctx.state.world.travel_trail.push(destination);
    }

    debug!(?origin, ?destination, %target, "lunged");
    Outcome::Success
}
