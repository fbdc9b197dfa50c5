//! Turn execution.
//!
//! [`TurnContext`] carries state, oracles and collaborators through the
//! stages; [`move_player`] runs them in order for a directional command.

mod context;
mod pipeline;

pub use context::TurnContext;
pub use pipeline::move_player;
