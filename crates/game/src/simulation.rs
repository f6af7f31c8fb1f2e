//! Game simulation - the fixed-tick game loop.
//!
//! The simulation owns the clock. Every tick advances `now_ms` by one fixed
//! step, so timed effects (tag expiry, weapon switches) depend only on the
//! tick count and replay identically from the same inputs.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tactica_physics::{
    InputSnapshot, MovementEvents, PlayerController, Stance, ViewTransform,
};

use crate::config::GameConfig;
use crate::input::TickInput;
use crate::level::{Level, LevelError};
use crate::player::Player;
use crate::weapons::{Loadout, WeaponKind};

/// Everything collaborators read after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Index of the tick that produced this output.
    pub frame: u64,
    /// Simulation time of that tick.
    pub now_ms: u64,
    /// Camera transform for the renderer.
    pub view: ViewTransform,
    pub grounded: bool,
    pub stance: Stance,
    pub blocked_x: bool,
    pub blocked_z: bool,
    pub events: MovementEvents,
    /// Weapon in hand.
    pub weapon: WeaponKind,
    /// A weapon switch is in progress.
    pub switching: bool,
    /// Weapon that finished coming out this tick.
    pub weapon_switched: Option<WeaponKind>,
}

/// The main game simulation.
///
/// Holds the level, the local player and their loadout, and advances them
/// deterministically from per-tick inputs.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: GameConfig,

    /// Current level.
    pub level: Level,

    /// The local player.
    pub player: Player,

    /// The local player's weapons.
    pub loadout: Loadout,

    /// Movement physics controller.
    movement_controller: PlayerController,
}

impl Simulation {
    /// Create a new simulation and place the player at the level's first
    /// spawn point (or the origin if it has none).
    pub fn new(config: GameConfig, level: Level) -> Self {
        let movement_controller = PlayerController::new(config.movement.clone());

        let mut sim = Self {
            frame: 0,
            config,
            level,
            player: Player::new("Player"),
            loadout: Loadout::default(),
            movement_controller,
        };

        let (position, facing) = sim
            .level
            .default_spawn()
            .map(|spawn| (spawn.position, spawn.facing))
            .unwrap_or((Vec3::ZERO, 0.0));
        sim.place_player(position, facing);
        sim
    }

    /// Create a simulation with default configuration and the training arena.
    pub fn training() -> Self {
        Self::new(GameConfig::default(), Level::training_arena())
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }

    /// Simulation time at the start of the current frame.
    pub fn now_ms(&self) -> u64 {
        self.frame * 1000 / u64::from(self.config.tick_rate)
    }

    /// Pointer moved by `(dx, dy)` pixels. Applied immediately.
    pub fn on_pointer_move(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.config.mouse_sensitivity;
        self.player
            .movement
            .apply_look(-dx * sensitivity, -dy * sensitivity);
    }

    /// Damage the player. Any damage that lands tags them.
    ///
    /// Returns the damage dealt to health.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let dealt = self.player.take_damage(amount);
        if dealt > 0 {
            let now_ms = self.now_ms();
            self.movement_controller.tag(&mut self.player.movement, now_ms);
        }
        dealt
    }

    /// Respawn the player at a named spawn point with full vitals.
    pub fn respawn(&mut self, spawn_name: &str) -> Result<(), LevelError> {
        let spawn = self
            .level
            .spawn_point(spawn_name)
            .ok_or_else(|| LevelError::UnknownSpawn(spawn_name.to_string()))?;
        let (position, facing) = (spawn.position, spawn.facing);

        self.place_player(position, facing);
        log::info!("{} respawned at {:?}", self.player.name, spawn_name);
        Ok(())
    }

    fn place_player(&mut self, position: Vec3, facing: f32) {
        self.movement_controller.respawn(
            &mut self.player.movement,
            position,
            facing,
            &self.level.collision,
        );
        self.player.reset_vitals();
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, input: &TickInput) -> FrameOutput {
        let now_ms = self.now_ms();
        let delta_time = self.delta_time();
        let alive = self.player.is_alive();

        let weapon_switched = self.loadout.update(now_ms);
        if let Some(request) = input.weapon.filter(|_| alive) {
            self.loadout.request(request, now_ms);
        }

        // Dead players keep falling and colliding but ignore intents
        let movement = if alive {
            input.movement
        } else {
            InputSnapshot::default()
        };

        let events = self.movement_controller.update(
            &mut self.player.movement,
            &movement,
            &self.level.collision,
            delta_time,
            now_ms,
        );

        let state = &self.player.movement;
        let output = FrameOutput {
            frame: self.frame,
            now_ms,
            view: state.view_transform(&self.movement_controller.config),
            grounded: state.grounded(),
            stance: state.stance,
            blocked_x: state.flags.blocked_x(),
            blocked_z: state.flags.blocked_z(),
            events,
            weapon: self.loadout.current(),
            switching: self.loadout.is_switching(),
            weapon_switched,
        };

        self.frame += 1;
        output
    }
}

// ============================================================================
// Tests
// ============================================================================
