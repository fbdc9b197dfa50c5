//! Collaborators the turn resolver calls out to.
//!
//! Unlike oracles these are stateful and side-effecting: they render text,
//! ask the player questions and resolve combat. The engine borrows them for
//! the duration of a single call through [`Services`].

use crate::action::Delta;
use crate::state::{EntityId, Position};

/// Resolves a melee exchange. Damage rules live outside this crate.
pub trait CombatResolver {
    fn resolve_melee(&mut self, attacker: EntityId, defender: EntityId);
}

/// Synchronous yes/no and direction prompts.
pub trait PromptService {
    /// Returns the player's answer, or `default` when they just hit enter.
    fn confirm(&mut self, text: &str, default: bool) -> bool;

    /// Asks for a compass direction. `None` or a null delta cancels.
    fn choose_direction(&mut self, text: &str) -> Option<Delta>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MessageChannel {
    Plain,
    Warning,
    Duration,
    MonsterDamage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ConductKind {
    /// Acting hastily while worshipping a god of patience.
    Hasty,
}

/// Player-facing text output plus conduct reports.
pub trait MessageSink {
    fn notify(&mut self, text: &str, channel: MessageChannel);

    fn notify_conduct(&mut self, kind: ConductKind, magnitude: u32);
}

/// Hooks into systems outside the movement rules.
///
/// Every hook defaults to a no-op so callers only implement what they track.
pub trait EffectBus {
    /// A monster finished arriving on `position` and its location effects apply.
    fn monster_arrived(&mut self, _monster: EntityId, _position: Position) {}

    fn noise(&mut self, _loudness: u32, _origin: Position) {}

    fn bleed(&mut self, _position: Position, _amount: u32) {}

    /// The player stepped into a malign gateway and was thrown back out.
    fn ejected_from_portal(&mut self, _damage: u32) {}

    fn shift_abyss(&mut self) {}

    /// Post-move martial attacks. Returns true if any attack happened.
    fn post_move_attacks(&mut self, _origin: Position) -> bool {
        false
    }

    fn update_acrobat(&mut self) {}

    fn request_autopickup(&mut self) {}
}

/// Mutable borrows of every collaborator, bundled for a single engine call.
pub struct Services<'a> {
    pub combat: &'a mut dyn CombatResolver,
    pub prompts: &'a mut dyn PromptService,
    pub messages: &'a mut dyn MessageSink,
    pub effects: &'a mut dyn EffectBus,
}

impl<'a> Services<'a> {
    pub fn new(
        combat: &'a mut dyn CombatResolver,
        prompts: &'a mut dyn PromptService,
        messages: &'a mut dyn MessageSink,
        effects: &'a mut dyn EffectBus,
    ) -> Self {
        Self {
            combat,
            prompts,
            messages,
            effects,
        }
    }
}
