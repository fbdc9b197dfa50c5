//! Player movement actions.
//!
//! # Module Structure
//!
//! - `types`: directions, move requests and the turn outcome record
//! - `classify`: pure mapping from a destination cell to a [`Target`]
//! - `gate`: prompts and restrictions a step must clear before committing
//! - `lunge`: the free reposition towards a hostile in the travel line
//! - `effects`: pre/post-move effects, swaps and the travel trail
//! - `time`: move cost accounting
//! - `door`: open and close commands
//! - `escape`: nets and constriction
//! - `execute`: the turn context and the move orchestrator

pub mod classify;
pub mod door;
pub mod effects;
pub mod escape;
pub mod execute;
pub mod gate;
pub mod lunge;
pub mod time;
pub mod types;

pub use classify::{ActorView, CellView, OccupantView, Target, classify};
pub use effects::SwapResult;
pub use execute::{TurnContext, move_player};
pub use gate::GateVerdict;
pub use types::{ActionKind, CardinalDirection, Delta, MoveRequest, Outcome, TurnOutcome};
