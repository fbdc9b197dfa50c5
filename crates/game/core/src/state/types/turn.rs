/// Bookkeeping carried across player commands.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Sequential identifier that increments after every resolved command.
    /// Mixed into every random seed.
    pub nonce: u64,

    /// Skip confirmation prompts (scripted play, tests of the raw rules).
    pub disable_confirmations: bool,

    /// Monster-only arena mode; the player cannot act.
    pub arena: bool,

    pub travel: TravelState,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunMode {
    #[default]
    Idle,
    /// First step of a run; becomes `Continue` once a move resolves.
    Start,
    Continue,
}

/// Automatic travel and shift-running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelState {
    pub mode: RunMode,
    /// Declared travel pace; moves never take less than `100 / speed`.
    pub travel_speed: Option<u32>,
    /// Something interesting came into view; the next step stops the run.
    pub stop_requested: bool,
}

impl TravelState {
    pub fn is_running(&self) -> bool {
        self.mode != RunMode::Idle
    }

    /// Consumes a pending stop request, ending the run.
    pub fn check_stop(&mut self) -> bool {
        if self.is_running() && self.stop_requested {
            self.stop();
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        self.mode = RunMode::Idle;
        self.stop_requested = false;
    }
}
