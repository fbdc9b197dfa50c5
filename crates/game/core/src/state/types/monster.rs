use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::MoveConfig;

use super::{EntityId, Position};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MonsterFlags: u16 {
        /// The player cannot see it.
        const INVISIBLE   = 1 << 0;
        /// Hidden under water; neither attacked nor swapped with by walking.
        const SUBMERGED   = 1 << 1;
        const STATIONARY  = 1 << 2;
        /// Attacking it angers a god.
        const SACRED      = 1 << 3;
        /// Proper name: no article in messages.
        const NAMED       = 1 << 4;
        /// Cannot leave water, so cannot be swapped onto dry land.
        const AQUATIC     = 1 << 5;
        /// Does not turn hostile when hit.
        const UNPROVOKABLE = 1 << 6;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attitude {
    #[default]
    Hostile,
    Neutral,
    GoodNeutral,
    Friendly,
}

/// Monster species the movement rules special-case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterKind {
    #[default]
    Ordinary,
    Plant,
    Fungus,
    Toadstool,
    WanderingMushroom,
    Foxfire,
}

impl MonsterKind {
    /// Plants and fungi: scenery that never counts as a lunge target.
    pub fn is_firewood(self) -> bool {
        matches!(
            self,
            MonsterKind::Plant | MonsterKind::Fungus | MonsterKind::Toadstool
        )
    }

    pub fn is_fungus(self) -> bool {
        matches!(self, MonsterKind::Fungus | MonsterKind::Toadstool)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub attitude: Attitude,
    pub kind: MonsterKind,
    pub flags: MonsterFlags,
    pub constricting: ArrayVec<EntityId, { MoveConfig::MAX_CONSTRICTED }>,
    pub constricted_by: Option<EntityId>,
}

impl MonsterState {
    pub fn new(id: EntityId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            attitude: Attitude::Hostile,
            kind: MonsterKind::Ordinary,
            flags: MonsterFlags::empty(),
            constricting: ArrayVec::new(),
            constricted_by: None,
        }
    }

    #[must_use]
    pub fn with_attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = attitude;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: MonsterKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MonsterFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_hostile(&self) -> bool {
        self.attitude == Attitude::Hostile
    }

    pub fn is_friendly(&self) -> bool {
        self.attitude == Attitude::Friendly
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self.attitude, Attitude::Neutral | Attitude::GoodNeutral)
    }

    /// Friendly or good neutral: will not attack the player.
    pub fn wont_attack(&self) -> bool {
        matches!(self.attitude, Attitude::Friendly | Attitude::GoodNeutral)
    }

    pub fn is_visible(&self) -> bool {
        !self.flags.contains(MonsterFlags::INVISIBLE)
    }

    pub fn is_submerged(&self) -> bool {
        self.flags.contains(MonsterFlags::SUBMERGED)
    }

    pub fn is_stationary(&self) -> bool {
        self.flags.contains(MonsterFlags::STATIONARY)
    }

    pub fn angered_by_attacks(&self) -> bool {
        !self.flags.contains(MonsterFlags::UNPROVOKABLE)
    }

    /// Name with a definite article unless the monster has a proper name.
    pub fn the_name(&self) -> String {
        if self.flags.contains(MonsterFlags::NAMED) {
            self.name.clone()
        } else {
            format!("the {}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_monsters_skip_the_article() {
        let goblin = MonsterState::new(EntityId(1), "goblin", Position::ORIGIN);
        assert_eq!(goblin.the_name(), "the goblin");

        let sigmund = MonsterState::new(EntityId(2), "Sigmund", Position::ORIGIN)
            .with_flags(MonsterFlags::NAMED);
        assert_eq!(sigmund.the_name(), "Sigmund");
    }

    #[test]
    fn good_neutrals_wont_attack() {
        let monster = MonsterState::new(EntityId(1), "priest", Position::ORIGIN)
            .with_attitude(Attitude::GoodNeutral);
        assert!(monster.wont_attack());
        assert!(monster.is_neutral());
        assert!(!monster.is_hostile());
    }
}
