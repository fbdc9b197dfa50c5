//! Player move orchestration.
//!
//! Flow:
//! 1. A netted player struggles instead of moving
//! 2. Confusion: start-of-turn warnings, then the direction may drift
//! 3. Optional lunge, which may reposition the player for free
//! 4. Classify the destination cell
//! 5. Run the gates for the chosen action and commit it
//! 6. Post-turn hooks (run mode, abyss, conduct, martial attacks, acrobat)
//!
//! Once a lunge has happened, every exit that does not commit the follow-up
//! goes through [`finalize_cancelled_lunge`] so the reposition is paid for.

use tracing::{debug, trace};

use crate::action::classify::{self, ActorView, CellView, OccupantView, Target};
use crate::action::effects::{self, SwapResult};
use crate::action::gate::{self, GateVerdict};
use crate::action::{ActionKind, Delta, MoveRequest, Outcome, door, escape, lunge, time};
use crate::env::{ConductKind, TerrainKind};
use crate::state::{Capabilities, Deity, EntityId, MonsterKind, Position, RunMode};

use super::context::TurnContext;

/// Resolves one directional move command.
pub fn move_player(ctx: &mut TurnContext<'_, '_>, request: MoveRequest) {
    // 1. Nets
    if ctx.state.player.held.is_some() {
        escape::struggle_free(ctx);
        return;
    }

    let mut delta = request.delta;

    // 2. Confusion
    if ctx.state.player.is_confused() {
        match confused_direction(ctx, delta) {
            Some(resolved) => delta = resolved,
            None => return,
        }
    } else if delta.is_null() {
        ctx.abort();
        return;
    }

    // 3. Lunge
    let mut lunged = false;
    if ctx.state.player.capabilities.contains(Capabilities::LUNGING) && delta.is_single_step()
    {
        match lunge::lunge_forward(ctx, delta, request.repeating) {
            Outcome::Abort => {
                ctx.abort();
                return;
            }
            Outcome::Success => {
                lunged = true;
                ctx.outcome.lunged = true;
                ctx.initial_position = ctx.player_position();
            }
            Outcome::Fail => {}
        }
    }

    // 4. Classification
    let destination = delta.apply(ctx.player_position());
    let Some(terrain) = ctx.terrain(destination) else {
        if ctx.state.player.is_digging() {
            ctx.say("This wall is too hard to dig through.");
        }
        ctx.outcome.cancel_repeat = true;
        if lunged {
            finalize_cancelled_lunge(ctx);
        } else {
            ctx.fail(ActionKind::Bump);
        }
        return;
    };

    classify::settle_digging(ctx, terrain);
    let target = classify::classify(&cell_view(ctx, destination, terrain), &actor_view(ctx));
    debug!(?destination, ?terrain, ?target, lunged, "classified move");

    if ctx.state.turn.travel.check_stop() {
        bail(ctx, lunged, GateVerdict::Abort);
        return;
    }

    // Stationary players may only attack.
    if ctx.state.player.is_stationary() && !matches!(target, Target::Attack(_)) {
        ctx.say("You cannot move.");
        ctx.state.turn.travel.stop();
        ctx.outcome.cancel_repeat = true;
        bail(ctx, lunged, GateVerdict::Abort);
        return;
    }

    if target.occupant().is_none()
        && ctx.state.player.is_nervous()
        && !ctx.state.player.is_confused()
    {
        ctx.say("You're too terrified to move while being watched!");
        ctx.state.turn.travel.stop();
        bail(ctx, lunged, GateVerdict::Cancel);
        return;
    }

    // 5. Commit
    let committed = match target {
        Target::Walk { through } => step(ctx, destination, terrain, Step::Walk { through }, lunged),
        Target::Dig => step(ctx, destination, terrain, Step::Dig, lunged),
        Target::Swap(occupant) => match effects::swap_check(ctx, occupant) {
            Some(landing) => step(
                ctx,
                destination,
                terrain,
                Step::Swap { occupant, landing },
                lunged,
            ),
            None => {
                ctx.state.turn.travel.stop();
                bail(ctx, lunged, GateVerdict::Cancel);
                false
            }
        },
        Target::Refused(occupant) => {
            let name = effects::capitalise(&ctx.monster_name(occupant));
            ctx.say(&format!(
                "{name} refuses to make way for you. (Use ctrl+direction or * direction to attack.)"
            ));
            bail(ctx, lunged, GateVerdict::Cancel);
            false
        }
        Target::Attack(occupant) => attack(ctx, destination, occupant, lunged),
        Target::OpenDoor => {
            door::open_door(ctx, delta);
            if lunged && !ctx.outcome.turn_is_over {
                finalize_cancelled_lunge(ctx);
            }
            return;
        }
        Target::EnterPortal => {
            enter_portal(ctx, lunged);
            return;
        }
        Target::Bump => {
            bump(ctx, terrain, lunged);
            return;
        }
    };

    // 6. Post-turn hooks
    if committed {
        after_turn(ctx, lunged);
    }
}

// ============================================================================
// Confusion
// ============================================================================

/// Runs the confused-move prelude. Returns the direction to continue with,
/// or `None` when the command is already resolved.
fn confused_direction(ctx: &mut TurnContext<'_, '_>, requested: Delta) -> Option<Delta> {
    if ctx.state.player.is_stationary() {
        ctx.say("You cannot move. (Use ctrl+direction or * direction to attack without moving.)");
        ctx.abort();
        return None;
    }

    let verdict = gate::confused_surroundings(ctx).and_then(|| gate::barbed_move(ctx, false));
    if verdict != GateVerdict::Continue {
        ctx.abort();
        return None;
    }

    let delta = classify::confuse_direction(ctx, requested);
    trace!(?requested, ?delta, "confusion");
    if delta.is_null() {
        ctx.say("You're too confused to move!");
        ctx.outcome.berserk_penalty_applies = true;
        let delay = ctx.action_delay();
        ctx.end_turn(ActionKind::None, Outcome::Fail, delay);
        return None;
    }

    let destination = delta.apply(ctx.player_position());
    let passable = ctx
        .terrain(destination)
        .is_some_and(|terrain| ctx.state.player.can_pass_through(terrain));
    if !passable {
        let description = ctx
            .terrain(destination)
            .map_or("the edge of the world", TerrainKind::description);
        if ctx.state.player.is_digging() {
            ctx.say(&format!("Your mandibles retract as you bump into {description}."));
            ctx.state.player.stop_digging();
        } else {
            ctx.say(&format!("You bump into {description}."));
        }
        ctx.outcome.berserk_penalty_applies = true;
        ctx.outcome.cancel_repeat = true;
        let delay = ctx.action_delay();
        ctx.end_turn(ActionKind::Bump, Outcome::Fail, delay);
        return None;
    }

    Some(delta)
}

// ============================================================================
// Views
// ============================================================================

fn actor_view(ctx: &TurnContext<'_, '_>) -> ActorView {
    let player = &ctx.state.player;
    let travel = &ctx.state.turn.travel;
    ActorView {
        confused: player.is_confused(),
        stationary: player.is_stationary(),
        digging: player.is_digging(),
        plant_passage: player.has_plant_passage(),
        in_sanctuary: ctx.state.world.is_sanctuary(player.position),
        avoid_doors: travel.is_running() && !ctx.config.travel_open_doors,
    }
}

fn cell_view(ctx: &TurnContext<'_, '_>, destination: Position, terrain: TerrainKind) -> CellView {
    let occupant = ctx.state.monster_at(destination).map(|monster| {
        OccupantView::of(monster, ctx.state.world.is_sanctuary(destination))
    });
    CellView {
        terrain,
        passable: ctx.state.player.can_pass_through(terrain),
        occupant,
    }
}

// ============================================================================
// Committing steps
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum Step {
    Walk { through: Option<EntityId> },
    Dig,
    Swap {
        occupant: EntityId,
        landing: Position,
    },
}

/// Gates and commits a step onto `destination`. Returns true if the turn was spent.
fn step(
    ctx: &mut TurnContext<'_, '_>,
    destination: Position,
    terrain: TerrainKind,
    kind: Step,
    lunged: bool,
) -> bool {
    let origin = ctx.player_position();
    let verb = ctx.state.player.walk_verb(ctx.terrain(origin).unwrap_or(TerrainKind::Floor));

    if let Step::Walk {
        through: Some(plant),
    } = kind
    {
        walk_through_plant(ctx, plant, verb);
    }

    match gate::commit_checks(ctx, destination, verb) {
        GateVerdict::Continue => {}
        GateVerdict::Cancel => {
            // The turn is lost but nobody moved.
            ctx.outcome.berserk_penalty_applies = true;
            if !ctx.outcome.turn_is_over {
                let delay = ctx.action_delay();
                ctx.end_turn(ActionKind::None, Outcome::Fail, delay);
            }
            return false;
        }
        GateVerdict::Abort => {
            ctx.state.turn.travel.stop();
            bail(ctx, lunged, GateVerdict::Abort);
            return false;
        }
    }

    // Restraints break before anything moves, the swapped occupant included.
    effects::before_move(ctx);

    let mut additional = 0;
    let action = match kind {
        Step::Walk { .. } => ActionKind::Walk,
        Step::Dig => {
            ctx.say(&format!("You dig through {}.", terrain.description()));
            ctx.state.set_terrain(destination, TerrainKind::Floor);
            ctx.services.effects.noise(ctx.config.dig_noise, origin);
            additional += ctx.config.dig_delay();
            ActionKind::Dig
        }
        Step::Swap { occupant, landing } => match effects::swap_places(ctx, occupant, landing) {
            SwapResult::Swapped | SwapResult::Dissipated => ActionKind::Swap,
            SwapResult::Blocked => {
                bail(ctx, lunged, GateVerdict::Cancel);
                return false;
            }
        },
    };

    effects::record_travel_trail(ctx);
    effects::step_player(ctx, destination, false);

    if let Step::Swap { occupant, .. } = kind {
        effects::occupant_arrived(ctx, occupant);
    }

    if ctx.state.turn.travel.is_running() {
        ctx.state.world.travel_trail.push(destination);
    }

    let time = time::apply_move_time(ctx, additional);
    ctx.end_turn(action, Outcome::Success, time);
    ctx.services.effects.request_autopickup();
    debug!(?action, ?destination, time, "step committed");
    true
}

fn walk_through_plant(ctx: &mut TurnContext<'_, '_>, plant: EntityId, verb: &str) {
    ctx.base_time = ctx.div_rand_round(
        ctx.base_time * ctx.config.plant_penalty_numerator,
        ctx.config.plant_penalty_denominator,
    );

    let standing_in_plants = ctx
        .state
        .monster_at(ctx.player_position())
        .is_some_and(|monster| monster.kind.is_firewood() && !monster.is_hostile());
    if standing_in_plants {
        return;
    }
    let growth = match ctx.state.monster(plant).map(|monster| monster.kind) {
        Some(MonsterKind::Fungus | MonsterKind::Toadstool) => "fungus",
        _ => "plants",
    };
    ctx.say(&format!("You {verb} carefully through the {growth}."));
}

fn attack(
    ctx: &mut TurnContext<'_, '_>,
    destination: Position,
    occupant: EntityId,
    lunged: bool,
) -> bool {
    let unseen = ctx
        .state
        .monster(occupant)
        .is_some_and(|monster| !monster.is_visible());
    if unseen && !ctx.state.player.is_confused() {
        let origin_terrain = ctx.terrain(ctx.player_position()).unwrap_or(TerrainKind::Floor);
        let verb = ctx.state.player.walk_verb(origin_terrain);
        if !gate::dangerous_destination(ctx, destination, verb).is_continue() {
            ctx.state.turn.travel.stop();
            bail(ctx, lunged, GateVerdict::Abort);
            return false;
        }
    }

    ctx.services.combat.resolve_melee(EntityId::PLAYER, occupant);
    let delay = ctx.action_delay();
    ctx.end_turn(ActionKind::Attack, Outcome::Success, delay);
    debug!(%occupant, "attacked");
    true
}

// ============================================================================
// Non-committing targets
// ============================================================================

fn enter_portal(ctx: &mut TurnContext<'_, '_>, lunged: bool) {
    let prompt = "Are you sure you wish to approach this portal? There's no telling what its \
                  forces would wreak upon your fragile self.";
    if !ctx.confirm(prompt, false) {
        ctx.canned_ok();
        bail(ctx, lunged, GateVerdict::Abort);
        return;
    }

    ctx.say("You are twisted violently and ejected from the portal!");
    let damage = ctx.roll_dice(ctx.config.portal_damage_dice, ctx.config.portal_damage_sides);
    ctx.state.player.hp.drain(damage);
    ctx.services.effects.ejected_from_portal(damage);

    let delay = ctx.action_delay();
    ctx.end_turn(ActionKind::EnterPortal, Outcome::Success, delay);
}

fn bump(ctx: &mut TurnContext<'_, '_>, terrain: TerrainKind, lunged: bool) {
    match terrain {
        TerrainKind::OpenSea => {
            ctx.say("The ferocious winds and tides of the open sea thwart your progress.");
        }
        TerrainKind::LavaSea => ctx.say("The endless sea of lava is not a nice place."),
        TerrainKind::Tree if ctx.state.player.deity == Deity::Fedhas => {
            ctx.say("You cannot walk through the dense trees.");
        }
        _ => {}
    }
    ctx.state.turn.travel.stop();
    ctx.outcome.cancel_repeat = true;

    if lunged {
        finalize_cancelled_lunge(ctx);
    } else {
        ctx.fail(ActionKind::Bump);
    }
}

/// Common exit for a step that did not commit.
///
/// After a lunge the reposition must still be paid for; otherwise an
/// `Abort` verdict discards the input and anything else fails without
/// spending the turn.
fn bail(ctx: &mut TurnContext<'_, '_>, lunged: bool, verdict: GateVerdict) {
    if lunged {
        finalize_cancelled_lunge(ctx);
        return;
    }
    match verdict {
        GateVerdict::Abort => ctx.abort(),
        GateVerdict::Cancel | GateVerdict::Continue => ctx.fail(ActionKind::None),
    }
}

/// Charges a plain move for a lunge whose follow-up never committed and runs
/// the post-move hooks.
fn finalize_cancelled_lunge(ctx: &mut TurnContext<'_, '_>) {
    let time = time::apply_move_time(ctx, 0);
    ctx.end_turn(ActionKind::Lunge, Outcome::Fail, time);
    ctx.outcome.lunged = true;

    if ctx.state.world.in_abyss {
        ctx.services.effects.shift_abyss();
    }
    ctx.outcome.berserk_penalty_applies = true;

    if ctx.state.player.deity == Deity::Cheibriados
        && ctx.one_chance_in(ctx.config.hasty_lunge_chance)
    {
        ctx.services.messages.notify_conduct(ConductKind::Hasty, 1);
    }

    let mut martial_attack = false;
    if ctx.state.player.deity == Deity::WuJian {
        martial_attack = ctx.services.effects.post_move_attacks(ctx.initial_position);
    }
    if !martial_attack {
        ctx.services.effects.update_acrobat();
    }
    debug!(time, "cancelled lunge finalized");
}

// ============================================================================
// Post-turn
// ============================================================================

fn after_turn(ctx: &mut TurnContext<'_, '_>, lunged: bool) {
    let attacking = ctx.outcome.action == ActionKind::Attack;

    if ctx.state.turn.travel.mode == RunMode::Start {
        ctx.state.turn.travel.mode = RunMode::Continue;
    }
    if ctx.state.world.in_abyss {
        ctx.services.effects.shift_abyss();
    }
    ctx.outcome.berserk_penalty_applies = !attacking;

    if !attacking && ctx.state.player.deity == Deity::Cheibriados {
        let running = ctx.state.turn.travel.is_running();
        let hasty = (running && ctx.one_chance_in(ctx.config.hasty_run_chance))
            || (lunged && ctx.one_chance_in(ctx.config.hasty_lunge_chance));
        if hasty {
            ctx.services.messages.notify_conduct(ConductKind::Hasty, 1);
        }
    }

    let mut martial_attack = false;
    if !attacking && ctx.state.player.deity == Deity::WuJian {
        martial_attack = ctx.services.effects.post_move_attacks(ctx.initial_position);
    }
    if !attacking && !martial_attack {
        ctx.services.effects.update_acrobat();
    }
}
