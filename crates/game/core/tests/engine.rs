mod common;

use common::World;
use move_core::env::{Env, GridMap};
use move_core::{
    ErrorSeverity, ExecuteError, GameEngine, GameError, GameState, MoveRequest, PlayerCommand,
    PlayerState, Position, Services, TerrainKind,
};

#[test]
fn nonce_advances_after_every_command() {
    let mut world = World::open(Position::new(5, 5));

    world.step(1, 0);
    world.step(0, 0);

    assert_eq!(world.state.turn.nonce, 2);
}

#[test]
fn same_seed_same_history() {
    let run = |seed: u64| {
        let mut world = World::open(Position::new(5, 5)).seeded(seed);
        world.state.player.status.set(move_core::state::StatusKind::Confusion, 50);
        (0..6)
            .map(|_| {
                let outcome = world.step(1, 0);
                (world.player(), outcome.time_taken, outcome.action)
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn arena_mode_is_rejected() {
    let mut world = World::open(Position::new(5, 5));
    world.state.turn.arena = true;

    let error = world.try_execute(PlayerCommand::Move(MoveRequest::interactive())).unwrap_err();

    assert!(matches!(error, ExecuteError::ArenaMode { .. }));
    assert_eq!(error.severity(), ErrorSeverity::Fatal);
    assert_eq!(world.state.turn.nonce, 0);
}

#[test]
fn player_inside_rock_is_rejected_unless_placed_there() {
    let mut world = World::open(Position::new(5, 5));
    world.map.set(Position::new(5, 5), TerrainKind::RockWall);

    let error = world.try_execute(PlayerCommand::Move(MoveRequest::interactive())).unwrap_err();
    assert_eq!(error.error_code(), "EXECUTE_PLAYER_IN_SOLID_TERRAIN");

    world.state.player.wizmode_teleported_into_rock = true;
    assert!(world.try_execute(PlayerCommand::Move(MoveRequest::interactive())).is_ok());
}

#[test]
fn player_off_the_map_is_rejected() {
    let mut world = World::open(Position::new(40, 40));

    let error = world.try_execute(PlayerCommand::Move(MoveRequest::interactive())).unwrap_err();

    assert!(matches!(error, ExecuteError::PlayerOutOfBounds { .. }));
}

#[test]
fn missing_rng_oracle_is_fatal() {
    let map = GridMap::filled(4, 4, TerrainKind::Floor);
    let mut state = GameState::new(PlayerState::new(Position::new(1, 1)));
    let mut world = World::open(Position::new(1, 1));
    let mut services = Services::new(
        &mut world.combat,
        &mut world.prompts,
        &mut world.messages,
        &mut world.effects,
    );

    let env = Env::<GridMap, move_core::MoveConfig, move_core::PcgRng>::new(Some(&map), None, None);
    let error = GameEngine::new(&mut state)
        .execute(
            env.as_game_env(),
            &mut services,
            PlayerCommand::Move(MoveRequest::interactive()),
        )
        .unwrap_err();

    assert_eq!(error.error_code(), "ORACLE_RNG_NOT_AVAILABLE");
    assert_eq!(error.severity(), ErrorSeverity::Fatal);
    assert_eq!(state.player.position, Position::new(1, 1));
}
