//! Core action types.
//!
//! - `CardinalDirection`: the 8 compass steps a player can request
//! - `Delta`: a relative offset, possibly null, after confusion has been applied
//! - `MoveRequest`: one directional command as received from the input layer
//! - `ActionKind`, `Outcome`, `TurnOutcome`: what a resolution committed

use crate::state::Position;

// ============================================================================
// Direction
// ============================================================================

/// Compass direction for a single step.
///
/// Coordinate system: X increases eastward, Y increases southward (screen rows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 8] = [
        CardinalDirection::North,
        CardinalDirection::NorthEast,
        CardinalDirection::East,
        CardinalDirection::SouthEast,
        CardinalDirection::South,
        CardinalDirection::SouthWest,
        CardinalDirection::West,
        CardinalDirection::NorthWest,
    ];

    pub fn delta(self) -> Delta {
        let (dx, dy) = match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::NorthEast => (1, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::SouthEast => (1, 1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::SouthWest => (-1, 1),
            CardinalDirection::West => (-1, 0),
            CardinalDirection::NorthWest => (-1, -1),
        };
        Delta::new(dx, dy)
    }
}

// ============================================================================
// Delta
// ============================================================================

/// Relative offset with components in `-1..=1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const NULL: Delta = Delta { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub const fn is_null(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// True for one of the 8 compass steps.
    pub fn is_single_step(self) -> bool {
        !self.is_null() && self.dx.abs() <= 1 && self.dy.abs() <= 1
    }

    pub fn apply(self, origin: Position) -> Position {
        origin.offset(self.dx, self.dy)
    }

    pub fn between(from: Position, to: Position) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }
}

impl From<CardinalDirection> for Delta {
    fn from(direction: CardinalDirection) -> Self {
        direction.delta()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A directional command from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRequest {
    /// Requested offset. Null means "pick interactively" for door commands.
    pub delta: Delta,

    /// The command is being replayed by a repeat count.
    pub repeating: bool,
}

impl MoveRequest {
    pub fn new(delta: Delta) -> Self {
        Self {
            delta,
            repeating: false,
        }
    }

    pub fn step(direction: CardinalDirection) -> Self {
        Self {
            delta: direction.delta(),
            repeating: false,
        }
    }

    pub fn interactive() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeating = true;
        self
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// The single action a resolution committed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Walk,
    Attack,
    Swap,
    Dig,
    Bump,
    OpenDoor,
    CloseDoor,
    EnterPortal,
    Lunge,
    Escape,
    #[default]
    None,
}

/// Tagged result of a stage or of a whole resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Success,
    /// Player-facing failure; the turn may or may not have been spent.
    Fail,
    /// Input discarded: no mutation of position, no time charged.
    Abort,
}

/// Everything the caller needs to advance the clock after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub time_taken: u32,
    pub turn_is_over: bool,
    pub berserk_penalty_applies: bool,
    pub outcome: Outcome,
    pub action: ActionKind,
    pub lunged: bool,
    pub cancel_repeat: bool,
}

impl TurnOutcome {
    pub fn aborted() -> Self {
        Self {
            time_taken: 0,
            turn_is_over: false,
            berserk_penalty_applies: false,
            outcome: Outcome::Abort,
            action: ActionKind::None,
            lunged: false,
            cancel_repeat: false,
        }
    }

    pub fn is_abort(&self) -> bool {
        self.outcome == Outcome::Abort
    }
}

impl Default for TurnOutcome {
    fn default() -> Self {
        Self::aborted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_deltas_are_single_steps() {
        for direction in CardinalDirection::ALL {
            assert!(direction.delta().is_single_step());
        }
        assert!(!Delta::NULL.is_single_step());
        assert!(!Delta::new(2, 0).is_single_step());
    }

    #[test]
    fn delta_applies_and_measures() {
        let origin = Position::new(4, 4);
        let east = CardinalDirection::East.delta();
        assert_eq!(east.apply(origin), Position::new(5, 4));
        assert_eq!(Delta::between(origin, Position::new(3, 5)), Delta::new(-1, 1));
    }
}
