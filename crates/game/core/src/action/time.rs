//! Elapsed-time accounting for a committed step.

use crate::state::StatusKind;

use super::execute::TurnContext;

/// Lower bound automatic travel imposes on a step: `ceil(numerator / speed)`.
pub fn travel_floor(numerator: u32, travel_speed: u32) -> u32 {
    if travel_speed == 0 {
        return 0;
    }
    numerator.div_ceil(travel_speed)
}

/// Charges a move: the base cost scaled by movement speed (randomly rounded),
/// plus `additional` unscaled time, clamped up to the travel pace. No-hop
/// grows by the same amount. Returns the time charged.
pub fn apply_move_time(ctx: &mut TurnContext<'_, '_>, additional: u32) -> u32 {
    let scaled = ctx.base_time.saturating_mul(ctx.state.player.movement_speed);
    let mut time = ctx.div_rand_round(scaled, 10).saturating_add(additional);

    let travel = ctx.state.turn.travel;
    if travel.is_running()
        && let Some(speed) = travel.travel_speed
    {
        time = time.max(travel_floor(ctx.config.travel_pace_numerator, speed));
    }

    ctx.state.player.status.extend(StatusKind::NoHop, time);
    ctx.outcome.time_taken = time;
    time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_floor_rounds_up() {
        assert_eq!(travel_floor(100, 30), 4);
        assert_eq!(travel_floor(100, 10), 10);
        assert_eq!(travel_floor(100, 0), 0);
    }
}
