//! Breaking free of nets and constrictors.

use tracing::{debug, trace};

use crate::state::EntityId;

use super::execute::TurnContext;
use super::{ActionKind, Outcome};

/// Sides of the die rolled against a net's strength on each struggle.
const NET_STRUGGLE_SIDES: u32 = 4;

/// Spends the turn struggling against the net the player is caught in.
pub fn struggle_free(ctx: &mut TurnContext<'_, '_>) {
    let Some(mut restraint) = ctx.state.player.held else {
        return;
    };

    let effort = ctx.roll_dice(1, NET_STRUGGLE_SIDES);
    if effort >= restraint.strength {
        ctx.state.player.held = None;
        ctx.say("You break free from the net!");
    } else {
        restraint.strength -= effort;
        ctx.state.player.held = Some(restraint);
        ctx.say("You struggle against the net.");
    }
    debug!(effort, still_held = ctx.state.player.held.is_some(), "net struggle");

    let delay = ctx.action_delay();
    ctx.end_turn(ActionKind::Escape, Outcome::Success, delay);
}

/// Tries to slip a constrictor's grip. Returns true when the player is free to
/// move, including when nothing was holding them.
pub fn attempt_escape(ctx: &mut TurnContext<'_, '_>) -> bool {
    let Some(constrictor) = ctx.state.player.constriction.constricted_by else {
        return true;
    };

    let attempts = ctx.state.player.constriction.escape_attempts;
    let chance = ctx
        .config
        .escape_base_chance
        .saturating_add(ctx.config.escape_chance_per_attempt.saturating_mul(attempts))
        .min(100);
    let name = ctx.monster_name(constrictor);

    if ctx.roll_d100() <= chance {
        release_from(ctx, constrictor);
        ctx.say(&format!("You escape {name}'s grip."));
        true
    } else {
        ctx.state.player.constriction.escape_attempts += 1;
        trace!(attempts = attempts + 1, "constriction escape failed");
        false
    }
}

fn release_from(ctx: &mut TurnContext<'_, '_>, constrictor: EntityId) {
    let constriction = &mut ctx.state.player.constriction;
    constriction.constricted_by = None;
    constriction.escape_attempts = 0;
    if let Some(monster) = ctx.state.monster_mut(constrictor) {
        monster.constricting.retain(|victim| *victim != EntityId::PLAYER);
    }
}
