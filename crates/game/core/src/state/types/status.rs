//! Timed status effects carried by the player.
//!
//! Durations are counted in game time (the same unit the time accountant
//! charges), so a status with duration `d` expires after `d` time has elapsed.
//! A duration of zero means the status is absent; the store never keeps
//! zero-duration entries around.
//!
//! The store holds no logic of its own. Other stages read and mutate it through
//! the accessors below.

use arrayvec::ArrayVec;

use crate::config::MoveConfig;

/// Active status effects on the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { MoveConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub duration: u32,
}

/// Types of status effects the movement pipeline cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    /// Movement direction may be randomised.
    Confusion,

    /// Barbed spikes in the skin hurt on every step.
    Barbs,

    /// Defensive ice that cracks as soon as the player moves.
    IcyArmour,

    /// Vacated floor turns into toxic bog.
    NoxiousBog,

    /// Vacated tiles receive a cloud of the remembered kind.
    CloudTrail,

    /// Engulfed by water; released before moving.
    WaterHold,

    /// Suppresses the hop ability; grows with every completed move.
    NoHop,

    /// Temporary flight. While present, flight expires when it runs out.
    Flight,

    /// Temporary transformation granting swimming.
    Transformation,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.duration(kind) > 0
    }

    /// Remaining duration of a status effect (zero when absent).
    pub fn duration(&self, kind: StatusKind) -> u32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.duration)
            .unwrap_or(0)
    }

    /// Sets the remaining duration, removing the effect when `duration` is zero.
    ///
    /// New effects are dropped silently when the store is full.
    pub fn set(&mut self, kind: StatusKind, duration: u32) {
        if duration == 0 {
            self.remove(kind);
            return;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.duration = duration;
            return;
        }

        let _ = self.effects.try_push(StatusEffect { kind, duration });
    }

    /// Extends an active effect by `amount`. Absent effects stay absent.
    pub fn extend(&mut self, kind: StatusKind, amount: u32) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.duration = existing.duration.saturating_add(amount);
        }
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Returns true if no status effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_query() {
        let mut status = StatusEffects::empty();
        status.set(StatusKind::Confusion, 30);
        assert!(status.has(StatusKind::Confusion));
        assert_eq!(status.duration(StatusKind::Confusion), 30);
        assert!(!status.has(StatusKind::Barbs));
    }

    #[test]
    fn zero_duration_removes() {
        let mut status = StatusEffects::empty();
        status.set(StatusKind::IcyArmour, 12);
        status.set(StatusKind::IcyArmour, 0);
        assert!(!status.has(StatusKind::IcyArmour));
        assert!(status.is_empty());
    }

    #[test]
    fn extend_only_touches_active_effects() {
        let mut status = StatusEffects::empty();
        status.extend(StatusKind::NoHop, 10);
        assert_eq!(status.duration(StatusKind::NoHop), 0);

        status.set(StatusKind::NoHop, 5);
        status.extend(StatusKind::NoHop, 10);
        assert_eq!(status.duration(StatusKind::NoHop), 15);
    }
}
