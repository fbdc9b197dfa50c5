//! Precondition gate: ordered checks run before a step commits.
//!
//! Each check yields a [`GateVerdict`]. `Abort` discards the input at no
//! cost, `Cancel` ends the turn having spent the time already incurred.

use tracing::trace;

use crate::env::TerrainKind;
use crate::state::{Attitude, ExpiringProtection, MonsterFlags, Position};

use super::escape;
use super::execute::TurnContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVerdict {
    Continue,
    Cancel,
    Abort,
}

impl GateVerdict {
    pub fn is_continue(self) -> bool {
        self == GateVerdict::Continue
    }

    /// Runs the next check only if this one let the step through.
    pub fn and_then(self, next: impl FnOnce() -> GateVerdict) -> GateVerdict {
        match self {
            GateVerdict::Continue => next(),
            stopped => stopped,
        }
    }
}

/// Gates for a committing step (walk, swap, dig) after classification.
pub fn commit_checks(ctx: &mut TurnContext<'_, '_>, destination: Position, verb: &str) -> GateVerdict {
    let confused = ctx.state.player.is_confused();
    let verdict = if confused {
        stumble(ctx, destination).and_then(|| constriction(ctx))
    } else {
        dangerous_destination(ctx, destination, verb)
            .and_then(|| barbed_move(ctx, false))
            .and_then(|| beholder(ctx, destination))
            .and_then(|| fearmonger(ctx, destination))
            .and_then(|| constriction(ctx))
    };
    trace!(?destination, ?verdict, confused, "commit gates");
    verdict
}

/// Start-of-turn check for a confused player: warns about expiring protection
/// over adjacent hazards and about bumping into monsters it would be bad to hit.
pub fn confused_surroundings(ctx: &mut TurnContext<'_, '_>) -> GateVerdict {
    let origin = ctx.player_position();
    let warning = ctx.config.expiration_warning;

    let mut hazard: Option<(TerrainKind, ExpiringProtection)> = None;
    let mut bad_monster: Option<(String, bool)> = None;

    for cell in origin.neighbours() {
        if let Some(terrain) = ctx.terrain(cell)
            && let Some(protection) = ctx.state.player.expiring_protection(terrain, warning)
        {
            hazard = Some((terrain, protection));
            break;
        }

        let Some(monster) = ctx.state.monster_at(cell) else {
            continue;
        };
        let both_in_sanctuary =
            ctx.state.world.is_sanctuary(origin) && ctx.state.world.is_sanctuary(cell);
        let passable_plant = ctx.state.player.has_plant_passage()
            && monster.kind.is_firewood()
            && !monster.is_hostile();
        if both_in_sanctuary || passable_plant || !monster.angered_by_attacks() {
            continue;
        }

        let adjective = match monster.attitude {
            Attitude::Friendly => "your ",
            Attitude::Neutral | Attitude::GoodNeutral => "the neutral ",
            Attitude::Hostile => continue,
        };
        let penance = monster.flags.contains(MonsterFlags::SACRED);
        bad_monster = Some((format!("{adjective}{}", monster.name), penance));
        if penance {
            break;
        }
    }

    let mut prompt = String::from("Are you sure you want to stumble around while confused and next to ");
    let mut penance = false;
    match (hazard, bad_monster) {
        (Some((terrain, protection)), _) => {
            prompt.push_str(if terrain == TerrainKind::Lava {
                "lava"
            } else {
                "deep water"
            });
            prompt.push_str(match protection {
                ExpiringProtection::Buoyancy => " while you are losing your buoyancy",
                ExpiringProtection::Transformation => " while your transformation is expiring",
            });
        }
        (None, Some((name, sacred))) => {
            prompt.push_str(&name);
            penance = sacred;
        }
        (None, None) => return GateVerdict::Continue,
    }
    prompt.push('?');
    if penance {
        prompt.push_str(" This could place you under penance!");
    }

    if ctx.confirm(&prompt, false) {
        GateVerdict::Continue
    } else {
        ctx.canned_ok();
        GateVerdict::Abort
    }
}

/// Confirmation for known traps, harmful clouds, travel exclusions and
/// terrain whose protection is running out.
pub fn dangerous_destination(
    ctx: &mut TurnContext<'_, '_>,
    destination: Position,
    verb: &str,
) -> GateVerdict {
    let origin = ctx.player_position();
    let mut prompts: Vec<String> = Vec::new();

    if let Some(terrain) = ctx.terrain(destination)
        && let Some(protection) = ctx
            .state
            .player
            .expiring_protection(terrain, ctx.config.expiration_warning)
    {
        let reason = match protection {
            ExpiringProtection::Buoyancy => "you are losing your buoyancy",
            ExpiringProtection::Transformation => "your transformation is expiring",
        };
        prompts.push(format!(
            "Are you sure you want to {verb} into {} while {reason}?",
            terrain.description()
        ));
    }

    if let Some(cloud) = ctx.state.world.harmful_cloud_at(destination)
        && ctx.state.world.harmful_cloud_at(origin).map(|c| c.kind) != Some(cloud.kind)
    {
        prompts.push(format!("Really {verb} into that cloud of {}?", cloud.kind));
    }

    if ctx.state.world.known_traps.contains(&destination) {
        prompts.push(format!("Really {verb} into that trap?"));
    }

    let exclusions = &ctx.state.world.travel_exclusions;
    if exclusions.contains(&destination) && !exclusions.contains(&origin) {
        prompts.push(format!(
            "Are you sure you want to {verb} into a travel-excluded area?"
        ));
    }

    for prompt in prompts {
        if !ctx.confirm(&prompt, false) {
            ctx.canned_ok();
            return GateVerdict::Abort;
        }
    }
    GateVerdict::Continue
}

/// Barbs in the skin hurt on every step; ask once per barbs episode.
///
/// A lunge asks with a harsher warning and does not count as the episode's
/// confirmation.
pub fn barbed_move(ctx: &mut TurnContext<'_, '_>, lunging: bool) -> GateVerdict {
    let player = &ctx.state.player;
    if !player.has_barbs() || player.barbs_move_confirmed {
        return GateVerdict::Continue;
    }

    let prompt = if lunging {
        "The barbs in your skin will harm you if you move. Lunging like this could really hurt! Continue?"
    } else {
        "The barbs in your skin will harm you if you move. Continue?"
    };
    if !ctx.confirm(prompt, false) {
        ctx.canned_ok();
        return GateVerdict::Abort;
    }
    if !lunging {
        ctx.state.player.barbs_move_confirmed = true;
    }
    GateVerdict::Continue
}

pub fn beholder(ctx: &mut TurnContext<'_, '_>, destination: Position) -> GateVerdict {
    let Some(name) = ctx
        .state
        .beholder_blocking(destination)
        .map(|monster| monster.the_name())
    else {
        return GateVerdict::Continue;
    };
    ctx.say(&format!("You cannot move away from {name}!"));
    ctx.state.turn.travel.stop();
    GateVerdict::Abort
}

pub fn fearmonger(ctx: &mut TurnContext<'_, '_>, destination: Position) -> GateVerdict {
    let Some(name) = ctx
        .state
        .fearmonger_blocking(destination)
        .map(|monster| monster.the_name())
    else {
        return GateVerdict::Continue;
    };
    ctx.say(&format!("You cannot move closer to {name}!"));
    ctx.state.turn.travel.stop();
    GateVerdict::Abort
}

/// A constricted player must break free before stepping away. A failed
/// attempt blocks the move without ending the turn.
pub fn constriction(ctx: &mut TurnContext<'_, '_>) -> GateVerdict {
    if escape::attempt_escape(ctx) {
        return GateVerdict::Continue;
    }
    GateVerdict::Abort
}

/// A confused player lurching into terrain whose protection is running out
/// catches themselves, losing the turn.
pub fn stumble(ctx: &mut TurnContext<'_, '_>, destination: Position) -> GateVerdict {
    let Some(terrain) = ctx.terrain(destination) else {
        return GateVerdict::Continue;
    };
    if ctx
        .state
        .player
        .expiring_protection(terrain, ctx.config.expiration_warning)
        .is_none()
    {
        return GateVerdict::Continue;
    }
    ctx.say(&format!("You nearly stumble into {}!", terrain.description()));
    GateVerdict::Cancel
}
