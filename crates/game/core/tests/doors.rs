mod common;

use common::World;
use move_core::state::{Restraint, StatusKind};
use move_core::{
    ActionKind, Delta, EntityId, MonsterState, Outcome, PlayerCommand, Position, TerrainKind,
};

const EAST: Delta = Delta { dx: 1, dy: 0 };

fn room_with_door() -> World {
    World::from_rows(&["XXXXX", "X.+.X", "XXXXX"], Position::new(1, 1))
}

#[test]
fn walking_into_a_closed_door_opens_it() {
    let mut world = room_with_door();

    let outcome = world.step(1, 0);

    assert_eq!(outcome.action, ActionKind::OpenDoor);
    assert!(outcome.turn_is_over);
    assert_eq!(outcome.time_taken, 10);
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::OpenDoor));
    assert_eq!(world.player(), Position::new(1, 1));
    assert!(world.messages.contains("You open the door."));

    world.step(1, 0);
    assert_eq!(world.player(), Position::new(2, 1));
}

#[test]
fn open_then_close() {
    let mut world = room_with_door();

    world.execute(PlayerCommand::OpenDoor(EAST));
    let outcome = world.execute(PlayerCommand::CloseDoor(EAST));

    assert_eq!(outcome.action, ActionKind::CloseDoor);
    assert_eq!(outcome.outcome, Outcome::Success);
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::ClosedDoor));
    assert!(world.messages.contains("You close the door."));
}

#[test]
fn connected_door_cells_open_as_a_gate() {
    let mut world = World::from_rows(&["XX+X", "X.+X", "XXXX"], Position::new(1, 1));

    let outcome = world.execute(PlayerCommand::OpenDoor(EAST));

    assert!(outcome.turn_is_over);
    assert!(world.messages.contains("You open the gate."));
    assert_eq!(world.terrain(Position::new(2, 0)), Some(TerrainKind::OpenDoor));
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::OpenDoor));
}

#[test]
fn easy_door_picks_the_only_door() {
    let mut world = room_with_door();

    let outcome = world.execute(PlayerCommand::OpenDoor(Delta::NULL));

    assert!(outcome.turn_is_over);
    assert!(world.prompts.asked.is_empty());
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::OpenDoor));
}

#[test]
fn several_doors_ask_for_a_direction() {
    let mut world = World::from_rows(&["X+X", "+.X", "XXX"], Position::new(1, 1));
    world.prompts.directions.push_back(Some(Delta::new(-1, 0)));

    let outcome = world.execute(PlayerCommand::OpenDoor(Delta::NULL));

    assert_eq!(world.prompts.asked, vec!["In which direction?".to_string()]);
    assert!(outcome.turn_is_over);
    assert_eq!(world.terrain(Position::new(0, 1)), Some(TerrainKind::OpenDoor));
    assert_eq!(world.terrain(Position::new(1, 0)), Some(TerrainKind::ClosedDoor));
}

#[test]
fn cancelled_direction_prompt_aborts() {
    let mut world = World::from_rows(&["X+X", "+.X", "XXX"], Position::new(1, 1));

    let outcome = world.execute(PlayerCommand::OpenDoor(Delta::NULL));

    assert!(outcome.is_abort());
}

#[test]
fn nothing_to_open() {
    let mut world = World::open(Position::new(5, 5));

    let outcome = world.execute(PlayerCommand::OpenDoor(Delta::NULL));

    assert!(world.messages.contains("There's nothing to open nearby."));
    assert!(!outcome.turn_is_over);

    world.execute(PlayerCommand::OpenDoor(EAST));
    assert!(world.messages.contains("There isn't anything that you can open there!"));
}

#[test]
fn runed_door_needs_confirmation() {
    let mut world = World::from_rows(&["XXXXX", "X.R.X", "XXXXX"], Position::new(1, 1));
    world.answer(&[false]);

    let outcome = world.execute(PlayerCommand::OpenDoor(EAST));

    assert!(outcome.is_abort());
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::RunedDoor));

    world.answer(&[true]);
    let outcome = world.execute(PlayerCommand::OpenDoor(EAST));
    assert!(outcome.turn_is_over);
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::OpenDoor));
}

#[test]
fn sealed_and_vetoed_doors_stay_shut() {
    let mut world = World::from_rows(&["XXXXX", "X.Z+X", "XXXXX"], Position::new(1, 1));

    world.execute(PlayerCommand::OpenDoor(EAST));
    assert!(world.messages.contains("That door is sealed shut!"));

    world.state.world.door_vetoes.insert(Position::new(3, 1), None);
    world.state.player.position = Position::new(2, 1);
    world.map.set(Position::new(2, 1), TerrainKind::Floor);
    let outcome = world.execute(PlayerCommand::OpenDoor(EAST));
    assert!(world.messages.contains("The door is shut tight!"));
    assert!(!outcome.turn_is_over);
}

#[test]
fn occupied_doorway_cannot_be_closed() {
    let mut world = World::from_rows(&["XXXXX", "X.'.X", "XXXXX"], Position::new(1, 1));
    world.spawn(MonsterState::new(EntityId(1), "rat", Position::new(2, 1)));

    let outcome = world.execute(PlayerCommand::CloseDoor(EAST));

    assert!(world.messages.contains("The rat is in the way!"));
    assert!(!outcome.turn_is_over);
    assert_eq!(world.terrain(Position::new(2, 1)), Some(TerrainKind::OpenDoor));
}

#[test]
fn confusion_and_nets_interfere() {
    let mut world = room_with_door();
    world.state.player.status.set(StatusKind::Confusion, 10);
    world.execute(PlayerCommand::OpenDoor(EAST));
    assert!(world.messages.contains("You're too confused!"));

    let mut world = room_with_door();
    world.state.player.held = Some(Restraint { strength: 50 });
    world.execute(PlayerCommand::CloseDoor(EAST));
    assert!(world.messages.contains("You can't close doors while held in a net."));

    let outcome = world.execute(PlayerCommand::OpenDoor(EAST));
    assert_eq!(outcome.action, ActionKind::Escape);
    assert!(outcome.turn_is_over);
}
