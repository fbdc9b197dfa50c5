use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::MoveConfig;
use crate::env::TerrainKind;

use super::{EntityId, Position, ResourceMeter, StatusEffects, StatusKind};

bitflags! {
    /// Movement-relevant abilities and restrictions of the player.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u16 {
        /// Rooted in place (tree form and similar).
        const STATIONARY    = 1 << 0;
        /// Mandibles out: moving into rock digs through it.
        const DIGGING       = 1 << 1;
        const LUNGING       = 1 << 2;
        /// Too terrified to move while watched.
        const NERVOUS       = 1 << 3;
        /// Permanent flight, independent of the flight status.
        const FLYING        = 1 << 4;
        const SWIMMING      = 1 << 5;
        /// May walk through allied plants and fungi.
        const PLANT_PASSAGE = 1 << 6;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gait {
    #[default]
    Walk,
    Crawl,
    Slither,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deity {
    #[default]
    None,
    Cheibriados,
    WuJian,
    Fedhas,
}

/// Which temporary protection against dangerous terrain is about to run out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiringProtection {
    Buoyancy,
    Transformation,
}

/// Both directions of constriction the player takes part in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constriction {
    pub constricting: ArrayVec<EntityId, { MoveConfig::MAX_CONSTRICTED }>,
    pub constricted_by: Option<EntityId>,
    pub escape_attempts: u32,
}

/// Net or web the player is caught in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restraint {
    pub strength: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub hp: ResourceMeter,
    /// Base delay of a normal action, 10 at normal speed.
    pub action_delay: u32,
    /// Movement-speed multiplier, 10 = normal.
    pub movement_speed: u32,
    pub status: StatusEffects,
    pub capabilities: Capabilities,
    pub gait: Gait,
    pub constriction: Constriction,
    pub beholders: ArrayVec<EntityId, { MoveConfig::MAX_BEHOLDERS }>,
    pub fearmongers: ArrayVec<EntityId, { MoveConfig::MAX_BEHOLDERS }>,
    pub held: Option<Restraint>,
    pub barbs_power: u32,
    /// Set once the player agreed to move with barbs in; cleared when the barbs go.
    pub barbs_move_confirmed: bool,
    pub cloud_trail: Option<super::CloudKind>,
    pub water_holder: Option<EntityId>,
    pub deity: Deity,
    /// Debug override: the player was placed inside rock on purpose.
    pub wizmode_teleported_into_rock: bool,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            hp: ResourceMeter::new(30, 30),
            action_delay: MoveConfig::DEFAULT_BASE_DELAY,
            movement_speed: 10,
            status: StatusEffects::empty(),
            capabilities: Capabilities::empty(),
            gait: Gait::Walk,
            constriction: Constriction::default(),
            beholders: ArrayVec::new(),
            fearmongers: ArrayVec::new(),
            held: None,
            barbs_power: 0,
            barbs_move_confirmed: false,
            cloud_trail: None,
            water_holder: None,
            deity: Deity::None,
            wizmode_teleported_into_rock: false,
        }
    }

    pub fn is_confused(&self) -> bool {
        self.status.has(StatusKind::Confusion)
    }

    pub fn is_stationary(&self) -> bool {
        self.capabilities.contains(Capabilities::STATIONARY)
    }

    pub fn is_digging(&self) -> bool {
        self.capabilities.contains(Capabilities::DIGGING)
    }

    pub fn stop_digging(&mut self) {
        self.capabilities.remove(Capabilities::DIGGING);
    }

    pub fn is_nervous(&self) -> bool {
        self.capabilities.contains(Capabilities::NERVOUS)
    }

    pub fn is_flying(&self) -> bool {
        self.capabilities.contains(Capabilities::FLYING) || self.status.has(StatusKind::Flight)
    }

    pub fn can_swim(&self) -> bool {
        self.capabilities.contains(Capabilities::SWIMMING)
    }

    pub fn has_plant_passage(&self) -> bool {
        self.capabilities.contains(Capabilities::PLANT_PASSAGE)
    }

    pub fn is_constricted(&self) -> bool {
        self.constriction.constricted_by.is_some()
    }

    pub fn has_barbs(&self) -> bool {
        self.status.has(StatusKind::Barbs)
    }

    /// Whether the player's body can occupy `terrain` right now.
    pub fn can_pass_through(&self, terrain: TerrainKind) -> bool {
        if terrain.is_solid() {
            return false;
        }
        match terrain {
            TerrainKind::DeepWater => self.is_flying() || self.can_swim(),
            TerrainKind::Lava => self.is_flying(),
            _ => true,
        }
    }

    /// Returns the protection that keeps the player safe on `terrain` when it
    /// is about to run out (`warning` turns or fewer).
    pub fn expiring_protection(
        &self,
        terrain: TerrainKind,
        warning: u32,
    ) -> Option<ExpiringProtection> {
        if !terrain.is_dangerous() || self.capabilities.contains(Capabilities::FLYING) {
            return None;
        }

        let expiring = |duration: u32| duration > 0 && duration <= warning;
        let flight = self.status.duration(StatusKind::Flight);

        if terrain == TerrainKind::DeepWater && self.can_swim() {
            let form = self.status.duration(StatusKind::Transformation);
            if !expiring(form) || flight > warning {
                return None;
            }
            return Some(if expiring(flight) {
                ExpiringProtection::Buoyancy
            } else {
                ExpiringProtection::Transformation
            });
        }

        expiring(flight).then_some(ExpiringProtection::Buoyancy)
    }

    /// Verb used in prompts and plant messages for how the player gets around.
    pub fn walk_verb(&self, standing_on: TerrainKind) -> &'static str {
        if self.is_flying() {
            "fly"
        } else if self.can_swim() && standing_on == TerrainKind::DeepWater {
            "swim"
        } else {
            match self.gait {
                Gait::Crawl => "crawl",
                Gait::Slither => "slither",
                Gait::Walk => "walk",
            }
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Position::ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_water_needs_flight_or_swimming() {
        let mut player = PlayerState::default();
        assert!(!player.can_pass_through(TerrainKind::DeepWater));
        player.capabilities.insert(Capabilities::SWIMMING);
        assert!(player.can_pass_through(TerrainKind::DeepWater));
        assert!(!player.can_pass_through(TerrainKind::Lava));
        player.status.set(StatusKind::Flight, 20);
        assert!(player.can_pass_through(TerrainKind::Lava));
        assert!(!player.can_pass_through(TerrainKind::RockWall));
    }

    #[test]
    fn expiring_flight_warns_over_lava() {
        let mut player = PlayerState::default();
        player.status.set(StatusKind::Flight, 3);
        assert_eq!(
            player.expiring_protection(TerrainKind::Lava, 5),
            Some(ExpiringProtection::Buoyancy)
        );
        player.status.set(StatusKind::Flight, 40);
        assert_eq!(player.expiring_protection(TerrainKind::Lava, 5), None);
        assert_eq!(player.expiring_protection(TerrainKind::Floor, 5), None);
    }

    #[test]
    fn expiring_swim_form_warns_over_deep_water() {
        let mut player = PlayerState::default();
        player.capabilities.insert(Capabilities::SWIMMING);
        assert_eq!(player.expiring_protection(TerrainKind::DeepWater, 5), None);

        player.status.set(StatusKind::Transformation, 2);
        assert_eq!(
            player.expiring_protection(TerrainKind::DeepWater, 5),
            Some(ExpiringProtection::Transformation)
        );
    }

    #[test]
    fn walk_verb_follows_locomotion() {
        let mut player = PlayerState::default();
        assert_eq!(player.walk_verb(TerrainKind::Floor), "walk");
        player.gait = Gait::Slither;
        assert_eq!(player.walk_verb(TerrainKind::Floor), "slither");
        player.capabilities.insert(Capabilities::SWIMMING);
        assert_eq!(player.walk_verb(TerrainKind::DeepWater), "swim");
        player.capabilities.insert(Capabilities::FLYING);
        assert_eq!(player.walk_verb(TerrainKind::DeepWater), "fly");
    }
}
