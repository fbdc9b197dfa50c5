/// Movement rules and tunable parameters.
///
/// Values mirror the classic roguelike balance: a normal action takes
/// `base_delay` (10) time units and a normal movement speed is 10.
/// Probabilities are expressed as "one chance in N"; `0` disables the roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveConfig {
    /// Baseline action delay. Digging adds `base_delay / dig_delay_divisor`.
    pub base_delay: u32,

    /// How far the lunge tracer looks for a hostile target. A lunge itself
    /// always lands exactly one tile away.
    pub lunge_tracer_range: u32,

    pub dig_delay_divisor: u32,
    /// Loudness of digging through a wall.
    pub dig_noise: u32,

    /// Time multiplier for wading through passable plants (numerator / denominator).
    pub plant_penalty_numerator: u32,
    pub plant_penalty_denominator: u32,

    /// A confused player keeps the requested direction one time in N.
    pub confusion_keep_chance: u32,

    /// Barbs snap loose on a move one time in N.
    pub barbs_snap_chance: u32,

    /// Inclusive range of the duration of a trailed cloud.
    pub cloud_trail_min_duration: u32,
    pub cloud_trail_max_duration: u32,

    /// Hasty conduct fires one time in N while running.
    pub hasty_run_chance: u32,
    /// Hasty conduct fires one time in N after a lunge.
    pub hasty_lunge_chance: u32,

    /// Automatic travel never moves faster than `travel_pace_numerator / travel_speed`.
    pub travel_pace_numerator: u32,

    /// Base percent chance to slip out of constriction.
    pub escape_base_chance: u32,
    /// Extra percent chance per previous failed attempt.
    pub escape_chance_per_attempt: u32,

    /// Remaining flight/transformation time at or below which the protection counts as expiring.
    pub expiration_warning: u32,

    /// Damage dice for being ejected from a malign gateway.
    pub portal_damage_dice: u32,
    pub portal_damage_sides: u32,

    /// Open the only adjacent door without asking for a direction.
    pub easy_door: bool,
    /// Automatic travel opens closed doors in its way.
    pub travel_open_doors: bool,
}

impl MoveConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_MONSTERS: usize = 128;
    pub const MAX_STATUS_EFFECTS: usize = 12;
    pub const MAX_CONSTRICTED: usize = 8;
    pub const MAX_BEHOLDERS: usize = 8;
    /// Longest ray the lunge tracer may record.
    pub const MAX_TRACE_LENGTH: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_DELAY: u32 = 10;
    pub const DEFAULT_LUNGE_TRACER_RANGE: u32 = 7;

    pub fn new() -> Self {
        Self {
            base_delay: Self::DEFAULT_BASE_DELAY,
            lunge_tracer_range: Self::DEFAULT_LUNGE_TRACER_RANGE,
            dig_delay_divisor: 5,
            dig_noise: 6,
            plant_penalty_numerator: 3,
            plant_penalty_denominator: 2,
            confusion_keep_chance: 3,
            barbs_snap_chance: 3,
            cloud_trail_min_duration: 3,
            cloud_trail_max_duration: 10,
            hasty_run_chance: 10,
            hasty_lunge_chance: 2,
            travel_pace_numerator: 100,
            escape_base_chance: 40,
            escape_chance_per_attempt: 20,
            expiration_warning: 5,
            portal_damage_dice: 2,
            portal_damage_sides: 4,
            easy_door: true,
            travel_open_doors: true,
        }
    }

    /// Extra delay added on top of the scaled move cost when digging.
    pub fn dig_delay(&self) -> u32 {
        if self.dig_delay_divisor == 0 {
            0
        } else {
            self.base_delay / self.dig_delay_divisor
        }
    }

    /// Lunge tracer range clamped to what a trace can record.
    pub fn tracer_range(&self) -> usize {
        (self.lunge_tracer_range as usize).min(Self::MAX_TRACE_LENGTH)
    }
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dig_delay_is_a_fifth_of_base() {
        assert_eq!(MoveConfig::default().dig_delay(), 2);
    }

    #[test]
    fn tracer_range_is_clamped() {
        let config = MoveConfig {
            lunge_tracer_range: 100,
            ..MoveConfig::default()
        };
        assert_eq!(config.tracer_range(), MoveConfig::MAX_TRACE_LENGTH);
    }
}
