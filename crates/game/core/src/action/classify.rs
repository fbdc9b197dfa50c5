//! Action classification: decides what a step onto a cell means.
//!
//! The classifier is pure. [`CellView`] and [`ActorView`] are snapshots built
//! by the pipeline; [`classify`] maps them to a [`Target`] without touching
//! state. Confusion drift is resolved before classification by
//! [`confuse_direction`].

use crate::env::TerrainKind;
use crate::state::{EntityId, MonsterKind, MonsterState};

use super::Delta;
use super::execute::TurnContext;

/// The player-side facts the classifier needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActorView {
    pub confused: bool,
    pub stationary: bool,
    pub digging: bool,
    pub plant_passage: bool,
    pub in_sanctuary: bool,
    /// Automatic travel is active and is not allowed to open doors.
    pub avoid_doors: bool,
}

/// The occupant-side facts the classifier needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupantView {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub hostile: bool,
    pub wont_attack: bool,
    pub neutral: bool,
    pub visible: bool,
    pub submerged: bool,
    pub in_sanctuary: bool,
}

impl OccupantView {
    pub fn of(monster: &MonsterState, in_sanctuary: bool) -> Self {
        Self {
            id: monster.id,
            kind: monster.kind,
            hostile: monster.is_hostile(),
            wont_attack: monster.wont_attack(),
            neutral: monster.is_neutral(),
            visible: monster.is_visible(),
            submerged: monster.is_submerged(),
            in_sanctuary,
        }
    }

    /// Allied plants and fungi the player may walk through.
    pub fn allows_passthrough(&self, actor: &ActorView) -> bool {
        actor.plant_passage && !actor.stationary && self.kind.is_firewood() && !self.hostile
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub terrain: TerrainKind,
    /// The player's body could stand on this terrain.
    pub passable: bool,
    pub occupant: Option<OccupantView>,
}

/// What stepping onto the cell amounts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Walk, possibly through an allied plant occupying the cell.
    Walk { through: Option<EntityId> },
    Dig,
    Swap(EntityId),
    Attack(EntityId),
    /// A visible neutral stands in the way and will not move.
    Refused(EntityId),
    OpenDoor,
    EnterPortal,
    Bump,
}

impl Target {
    pub fn occupant(self) -> Option<EntityId> {
        match self {
            Target::Swap(id) | Target::Attack(id) | Target::Refused(id) => Some(id),
            _ => None,
        }
    }
}

pub fn classify(cell: &CellView, actor: &ActorView) -> Target {
    let mut through = None;

    if let Some(occupant) = cell.occupant.filter(|occupant| !occupant.submerged) {
        if occupant.allows_passthrough(actor) {
            through = Some(occupant.id);
        } else {
            let try_to_swap = (occupant.wont_attack && !actor.confused)
                || (actor.in_sanctuary && occupant.in_sanctuary);
            if try_to_swap {
                return Target::Swap(occupant.id);
            }
            if occupant.neutral && !actor.confused && occupant.visible {
                return Target::Refused(occupant.id);
            }
            return Target::Attack(occupant.id);
        }
    }

    if actor.digging && cell.terrain.is_diggable() {
        return Target::Dig;
    }
    if cell.passable && !actor.stationary {
        return Target::Walk { through };
    }
    if cell.terrain.is_closed_door() && !actor.avoid_doors {
        return Target::OpenDoor;
    }
    if cell.terrain == TerrainKind::MalignGateway && !actor.stationary {
        return Target::EnterPortal;
    }
    Target::Bump
}

/// Replaces the requested direction with a random one unless the
/// `confusion_keep_chance` roll keeps it. The substitute is uniform over all
/// nine offsets, staying put included.
pub fn confuse_direction(ctx: &mut TurnContext<'_, '_>, requested: Delta) -> Delta {
    if ctx.one_chance_in(ctx.config.confusion_keep_chance) {
        return requested;
    }
    let dx = ctx.random2(3) as i32 - 1;
    let dy = ctx.random2(3) as i32 - 1;
    Delta::new(dx, dy)
}

/// Ends dig-mode when the destination cannot be dug.
pub fn settle_digging(ctx: &mut TurnContext<'_, '_>, terrain: TerrainKind) {
    if !ctx.state.player.is_digging() || terrain.is_diggable() {
        return;
    }
    ctx.state.player.stop_digging();
    if terrain.is_solid() {
        ctx.say("You can't dig through that.");
    } else {
        ctx.say("You retract your mandibles.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> CellView {
        CellView {
            terrain: TerrainKind::Floor,
            passable: true,
            occupant: None,
        }
    }

    fn occupant(id: u32) -> OccupantView {
        OccupantView {
            id: EntityId(id),
            kind: MonsterKind::Ordinary,
            hostile: true,
            wont_attack: false,
            neutral: false,
            visible: true,
            submerged: false,
            in_sanctuary: false,
        }
    }

    #[test]
    fn empty_floor_is_a_walk() {
        assert_eq!(
            classify(&floor(), &ActorView::default()),
            Target::Walk { through: None }
        );
    }

    #[test]
    fn hostile_occupant_is_attacked() {
        let cell = CellView {
            occupant: Some(occupant(3)),
            ..floor()
        };
        assert_eq!(classify(&cell, &ActorView::default()), Target::Attack(EntityId(3)));
    }

    #[test]
    fn friendly_swaps_unless_confused() {
        let ally = OccupantView {
            hostile: false,
            wont_attack: true,
            ..occupant(4)
        };
        let cell = CellView {
            occupant: Some(ally),
            ..floor()
        };
        assert_eq!(classify(&cell, &ActorView::default()), Target::Swap(EntityId(4)));

        let confused = ActorView {
            confused: true,
            ..ActorView::default()
        };
        assert_eq!(classify(&cell, &confused), Target::Attack(EntityId(4)));
    }

    #[test]
    fn sanctuary_lets_anyone_swap() {
        let hostile = OccupantView {
            in_sanctuary: true,
            ..occupant(5)
        };
        let cell = CellView {
            occupant: Some(hostile),
            ..floor()
        };
        let actor = ActorView {
            in_sanctuary: true,
            confused: true,
            ..ActorView::default()
        };
        assert_eq!(classify(&cell, &actor), Target::Swap(EntityId(5)));
    }

    #[test]
    fn visible_neutral_refuses() {
        let neutral = OccupantView {
            hostile: false,
            neutral: true,
            ..occupant(6)
        };
        let cell = CellView {
            occupant: Some(neutral),
            ..floor()
        };
        assert_eq!(classify(&cell, &ActorView::default()), Target::Refused(EntityId(6)));

        let unseen = CellView {
            occupant: Some(OccupantView {
                visible: false,
                ..neutral
            }),
            ..floor()
        };
        assert_eq!(classify(&unseen, &ActorView::default()), Target::Attack(EntityId(6)));
    }

    #[test]
    fn allied_plants_are_walked_through() {
        let plant = OccupantView {
            kind: MonsterKind::Plant,
            hostile: false,
            wont_attack: true,
            ..occupant(7)
        };
        let cell = CellView {
            occupant: Some(plant),
            ..floor()
        };
        let actor = ActorView {
            plant_passage: true,
            ..ActorView::default()
        };
        assert_eq!(
            classify(&cell, &actor),
            Target::Walk {
                through: Some(EntityId(7))
            }
        );
    }

    #[test]
    fn terrain_decides_without_occupant() {
        let actor = ActorView::default();
        let wall = CellView {
            terrain: TerrainKind::RockWall,
            passable: false,
            occupant: None,
        };
        assert_eq!(classify(&wall, &actor), Target::Bump);

        let digger = ActorView {
            digging: true,
            ..actor
        };
        assert_eq!(classify(&wall, &digger), Target::Dig);

        let door = CellView {
            terrain: TerrainKind::RunedDoor,
            ..wall
        };
        assert_eq!(classify(&door, &actor), Target::OpenDoor);

        let portal = CellView {
            terrain: TerrainKind::MalignGateway,
            ..wall
        };
        assert_eq!(classify(&portal, &actor), Target::EnterPortal);

        let water = CellView {
            terrain: TerrainKind::DeepWater,
            ..wall
        };
        assert_eq!(classify(&water, &actor), Target::Bump);
    }

    #[test]
    fn travel_can_be_told_to_leave_doors_alone() {
        let door = CellView {
            terrain: TerrainKind::ClosedDoor,
            passable: false,
            occupant: None,
        };
        let actor = ActorView {
            avoid_doors: true,
            ..ActorView::default()
        };
        assert_eq!(classify(&door, &actor), Target::Bump);
    }
}
