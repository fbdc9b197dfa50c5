//! Side effects around a positional change of the player.
//!
//! Order matters: [`before_move`] runs before anything is repositioned, then
//! a swapped occupant is relocated by [`swap_places`], then the player steps
//! and [`after_move`] runs for the vacated tile.

use tracing::{debug, trace, warn};

use crate::env::{MessageChannel, TerrainKind};
use crate::state::{Cloud, EntityId, MonsterFlags, MonsterKind, Position, StatusKind};

use super::execute::TurnContext;

// ============================================================================
// Pre-move
// ============================================================================

pub fn before_move(ctx: &mut TurnContext<'_, '_>) {
    release_water_hold(ctx);
    clear_constriction(ctx);
}

fn release_water_hold(ctx: &mut TurnContext<'_, '_>) {
    if !ctx.state.player.status.has(StatusKind::WaterHold) {
        return;
    }
    ctx.say("You slip free of the water engulfing you.");
    ctx.state.player.status.remove(StatusKind::WaterHold);
    ctx.state.player.water_holder = None;
}

/// Severs every constriction edge touching the player, on both sides.
fn clear_constriction(ctx: &mut TurnContext<'_, '_>) {
    let victims = std::mem::take(&mut ctx.state.player.constriction.constricting);
    for victim in victims {
        if let Some(monster) = ctx.state.monster_mut(victim) {
            monster.constricted_by = None;
        }
    }

    if let Some(constrictor) = ctx.state.player.constriction.constricted_by.take() {
        ctx.state.player.constriction.escape_attempts = 0;
        if let Some(monster) = ctx.state.monster_mut(constrictor) {
            monster.constricting.retain(|victim| *victim != EntityId::PLAYER);
        }
    }
}

// ============================================================================
// Post-move
// ============================================================================

/// Effects of having left `old_position`. Only call when the position changed.
pub fn after_move(ctx: &mut TurnContext<'_, '_>, old_position: Position, lunging: bool) {
    apply_barbs_damage(ctx, lunging);
    remove_icy_armour(ctx);
    apply_noxious_bog(ctx, old_position);
    apply_cloud_trail(ctx, old_position);
}

fn apply_barbs_damage(ctx: &mut TurnContext<'_, '_>, lunging: bool) {
    if !ctx.state.player.has_barbs() {
        return;
    }
    ctx.notify(
        "The barbed spikes dig painfully into your body as you move.",
        MessageChannel::Warning,
    );
    let damage = ctx.roll_dice(2, ctx.state.player.barbs_power);
    ctx.state.player.hp.drain(damage);
    let position = ctx.player_position();
    ctx.services.effects.bleed(position, 2);
    debug!(damage, "barbs damage");

    if ctx.one_chance_in(ctx.config.barbs_snap_chance) {
        ctx.say("The barbed spikes snap loose.");
        let player = &mut ctx.state.player;
        player.status.remove(StatusKind::Barbs);
        player.barbs_power = 0;
        player.barbs_move_confirmed = false;
    } else if !lunging {
        let elapsed = ctx.base_time;
        ctx.state.player.status.extend(StatusKind::Barbs, elapsed);
    }
}

fn remove_icy_armour(ctx: &mut TurnContext<'_, '_>) {
    if !ctx.state.player.status.has(StatusKind::IcyArmour) {
        return;
    }
    ctx.notify(
        "Your icy armour cracks and falls away as you move.",
        MessageChannel::Duration,
    );
    ctx.state.player.status.remove(StatusKind::IcyArmour);
}

fn apply_noxious_bog(ctx: &mut TurnContext<'_, '_>, old_position: Position) {
    if !ctx.state.player.status.has(StatusKind::NoxiousBog) {
        return;
    }
    match ctx.terrain(old_position) {
        Some(terrain) if terrain.is_traversable() && terrain != TerrainKind::ToxicBog => {
            ctx.state.set_terrain(old_position, TerrainKind::ToxicBog);
            trace!(?old_position, "bog spreads");
        }
        _ => {}
    }
}

fn apply_cloud_trail(ctx: &mut TurnContext<'_, '_>, old_position: Position) {
    if !ctx.state.player.status.has(StatusKind::CloudTrail) || ctx.is_solid(old_position) {
        return;
    }
    let Some(kind) = ctx.state.player.cloud_trail else {
        return;
    };
    let duration = ctx.random_range(
        ctx.config.cloud_trail_min_duration,
        ctx.config.cloud_trail_max_duration,
    );
    ctx.state.world.place_cloud(
        old_position,
        Cloud {
            kind,
            duration,
            source: Some(EntityId::PLAYER),
        },
    );
}

/// Moves the player and applies the post-move effects. Callers run
/// [`before_move`] first, ahead of any swap relocation.
pub fn step_player(ctx: &mut TurnContext<'_, '_>, destination: Position, lunging: bool) {
    let old_position = ctx.player_position();
    if old_position == destination {
        return;
    }
    ctx.state.player.position = destination;
    after_move(ctx, old_position, lunging);
}

/// Appends to the travel trail while automatic travel runs, clears it otherwise.
pub fn record_travel_trail(ctx: &mut TurnContext<'_, '_>) {
    let running = ctx.state.turn.travel.is_running();
    let position = ctx.player_position();
    let trail = &mut ctx.state.world.travel_trail;
    if !running {
        trail.clear();
    } else if trail.is_empty() {
        trail.push(position);
    }
}

// ============================================================================
// Swapping
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapResult {
    /// The occupant now stands on the player's old tile.
    Swapped,
    /// The occupant vanished instead of moving.
    Dissipated,
    /// Nothing moved.
    Blocked,
}

/// Whether the occupant can take the player's place. Returns the tile it
/// would move to.
pub fn swap_check(ctx: &mut TurnContext<'_, '_>, occupant: EntityId) -> Option<Position> {
    let destination = ctx.player_position();
    let Some(monster) = ctx.state.monster(occupant) else {
        return None;
    };

    let landing_in_water = matches!(
        ctx.terrain(destination),
        Some(TerrainKind::DeepWater | TerrainKind::ShallowWater)
    );
    let refuses = monster.is_stationary()
        || (monster.flags.contains(MonsterFlags::AQUATIC) && !landing_in_water);
    if refuses {
        let name = monster.the_name();
        ctx.say(&format!("You can't swap places with {name}."));
        return None;
    }
    Some(destination)
}

/// Relocates the occupant onto `destination` (the player's current tile)
/// without firing its arrival effects.
pub fn swap_places(
    ctx: &mut TurnContext<'_, '_>,
    occupant: EntityId,
    destination: Position,
) -> SwapResult {
    let Some(kind) = ctx.state.monster(occupant).map(|monster| monster.kind) else {
        return SwapResult::Blocked;
    };

    if let Some(other) = ctx.monster_id_at(destination).filter(|other| *other != occupant) {
        let other_kind = ctx.state.monster(other).map(|monster| monster.kind);
        if kind == MonsterKind::WanderingMushroom && other_kind == Some(MonsterKind::Toadstool) {
            return match ctx.state.swap_monsters(occupant, other) {
                Ok(()) => SwapResult::Swapped,
                Err(_) => SwapResult::Blocked,
            };
        }
        ctx.say("Something prevents you from swapping places.");
        return SwapResult::Blocked;
    }

    if kind == MonsterKind::Foxfire {
        let name = ctx.monster_name(occupant);
        ctx.notify(
            &format!("{} dissipates!", capitalise(&name)),
            MessageChannel::MonsterDamage,
        );
        ctx.state.remove_monster(occupant);
        return SwapResult::Dissipated;
    }

    ctx.say("You swap places.");
    match ctx.state.move_monster(occupant, destination) {
        Ok(()) => SwapResult::Swapped,
        Err(error) => {
            warn!(%error, "swap relocation failed");
            SwapResult::Blocked
        }
    }
}

/// Fires the swapped occupant's arrival effects, re-resolving it by id.
pub fn occupant_arrived(ctx: &mut TurnContext<'_, '_>, occupant: EntityId) {
    if let Some(position) = ctx.state.monster(occupant).map(|monster| monster.position) {
        ctx.services.effects.monster_arrived(occupant, position);
    }
}

pub(crate) fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
