//! Fake collaborators and a small harness shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use move_core::env::{ConductKind, EffectBus, Env};
use move_core::{
    CombatResolver, Delta, EntityId, ExecuteError, GameEngine, GameState, GridMap, MessageChannel,
    MessageSink, MonsterState, MoveConfig, MoveRequest, PcgRng, PlayerCommand, PlayerState,
    Position, PromptService, Services, TerrainKind, TurnOutcome,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Fakes
// ============================================================================

#[derive(Debug, Default)]
pub struct RecordingCombat {
    pub attacks: Vec<(EntityId, EntityId)>,
}

impl CombatResolver for RecordingCombat {
    fn resolve_melee(&mut self, attacker: EntityId, defender: EntityId) {
        self.attacks.push((attacker, defender));
    }
}

/// Answers prompts from a script. Unscripted confirmations take the prompt's
/// default; unscripted direction requests cancel.
#[derive(Debug, Default)]
pub struct ScriptedPrompts {
    pub answers: VecDeque<bool>,
    pub directions: VecDeque<Option<Delta>>,
    pub asked: Vec<String>,
}

impl PromptService for ScriptedPrompts {
    fn confirm(&mut self, text: &str, default: bool) -> bool {
        self.asked.push(text.to_string());
        self.answers.pop_front().unwrap_or(default)
    }

    fn choose_direction(&mut self, text: &str) -> Option<Delta> {
        self.asked.push(text.to_string());
        self.directions.pop_front().flatten()
    }
}

#[derive(Debug, Default)]
pub struct RecordingMessages {
    pub lines: Vec<(String, MessageChannel)>,
    pub conducts: Vec<(ConductKind, u32)>,
}

impl RecordingMessages {
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|(line, _)| line == text)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|(line, _)| line.as_str()).collect()
    }
}

impl MessageSink for RecordingMessages {
    fn notify(&mut self, text: &str, channel: MessageChannel) {
        self.lines.push((text.to_string(), channel));
    }

    fn notify_conduct(&mut self, kind: ConductKind, magnitude: u32) {
        self.conducts.push((kind, magnitude));
    }
}

#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub arrivals: Vec<(EntityId, Position)>,
    pub noises: Vec<(u32, Position)>,
    pub bleeds: Vec<(Position, u32)>,
    pub portal_damage: Vec<u32>,
    pub abyss_shifts: u32,
    pub martial_origins: Vec<Position>,
    pub acrobat_updates: u32,
    pub autopickups: u32,
    /// Every hook in the order it fired.
    pub log: Vec<&'static str>,
}

impl EffectBus for RecordingEffects {
    fn monster_arrived(&mut self, monster: EntityId, position: Position) {
        self.arrivals.push((monster, position));
        self.log.push("arrived");
    }

    fn noise(&mut self, loudness: u32, origin: Position) {
        self.noises.push((loudness, origin));
        self.log.push("noise");
    }

    fn bleed(&mut self, position: Position, amount: u32) {
        self.bleeds.push((position, amount));
        self.log.push("bleed");
    }

    fn ejected_from_portal(&mut self, damage: u32) {
        self.portal_damage.push(damage);
    }

    fn shift_abyss(&mut self) {
        self.abyss_shifts += 1;
    }

    fn post_move_attacks(&mut self, origin: Position) -> bool {
        self.martial_origins.push(origin);
        false
    }

    fn update_acrobat(&mut self) {
        self.acrobat_updates += 1;
    }

    fn request_autopickup(&mut self) {
        self.autopickups += 1;
        self.log.push("autopickup");
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A map, a state and a full set of fakes.
pub struct World {
    pub state: GameState,
    pub map: GridMap,
    pub config: MoveConfig,
    pub rng: PcgRng,
    pub combat: RecordingCombat,
    pub prompts: ScriptedPrompts,
    pub messages: RecordingMessages,
    pub effects: RecordingEffects,
}

impl World {
    /// An open 12x12 floor with the player at `player`.
    pub fn open(player: Position) -> Self {
        Self::with_map(GridMap::filled(12, 12, TerrainKind::Floor), player)
    }

    /// A map drawn with terrain glyphs.
    pub fn from_rows(rows: &[&str], player: Position) -> Self {
        let map = GridMap::from_rows(rows).unwrap();
        Self::with_map(map, player)
    }

    pub fn with_map(map: GridMap, player: Position) -> Self {
        init_tracing();
        Self {
            state: GameState::new(PlayerState::new(player)),
            map,
            config: MoveConfig::default(),
            rng: PcgRng,
            combat: RecordingCombat::default(),
            prompts: ScriptedPrompts::default(),
            messages: RecordingMessages::default(),
            effects: RecordingEffects::default(),
        }
    }

    pub fn seeded(mut self, game_seed: u64) -> Self {
        self.state.game_seed = game_seed;
        self
    }

    pub fn spawn(&mut self, monster: MonsterState) -> EntityId {
        self.state.spawn_monster(monster).unwrap()
    }

    pub fn answer(&mut self, answers: &[bool]) {
        self.prompts.answers.extend(answers.iter().copied());
    }

    pub fn player(&self) -> Position {
        self.state.player.position
    }

    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        self.state.terrain_at(&self.map, position)
    }

    pub fn try_execute(&mut self, command: PlayerCommand) -> Result<TurnOutcome, ExecuteError> {
        let env = Env::with_all(&self.map, &self.config, &self.rng);
        let mut services = Services::new(
            &mut self.combat,
            &mut self.prompts,
            &mut self.messages,
            &mut self.effects,
        );
        GameEngine::new(&mut self.state).execute(env.as_game_env(), &mut services, command)
    }

    pub fn execute(&mut self, command: PlayerCommand) -> TurnOutcome {
        self.try_execute(command).unwrap()
    }

    pub fn step(&mut self, dx: i32, dy: i32) -> TurnOutcome {
        self.execute(PlayerCommand::Move(MoveRequest::new(Delta::new(dx, dy))))
    }
}
