//! Player movement controller.
//!
//! This is the main entry point for player movement. It takes the sampled
//! input for a tick and updates the player state through the collision world.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionWorld, ContentFlags};

use super::config::MovementConfig;
use super::intent::{intent_direction, is_diagonal};
use super::resolve::resolve_horizontal;
use super::stance::{update_stance, Stance, StanceTransition};
use super::state::{InputSnapshot, MovementFlags, PlayerState};
use super::vertical::{resolve_vertical, try_jump};

/// Longest tick the controller will integrate (seconds).
const MAX_DELTA_TIME: f32 = 0.066;

/// How far above a spawn point the floor probe starts.
const SPAWN_PROBE_LIFT: f32 = 1.0;

/// How far down the spawn floor probe reaches.
const SPAWN_PROBE_LENGTH: f32 = 3.0;

/// Things that happened during one tick, for animation and audio listeners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEvents {
    pub jumped: bool,
    pub landed: bool,
    pub hit_ceiling: bool,
    pub stance_changed: bool,
    pub stand_refused: bool,
    pub blocked_x: bool,
    pub blocked_z: bool,
    pub tag_expired: bool,
}

/// Player movement controller.
///
/// Runs the fixed per-tick pipeline:
/// - stance update and stand-up gate
/// - input mapping and jump
/// - velocity integration
/// - vertical resolution
/// - axis-separated horizontal resolution
///
/// # Example
///
/// ```ignore
/// let controller = PlayerController::new(MovementConfig::default());
/// let mut state = PlayerState::default();
/// controller.respawn(&mut state, spawn_point, facing, &world);
///
/// // Each tick:
/// let events = controller.update(&mut state, &input, &world, delta_time, now_ms);
/// ```
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl PlayerController {
    /// Create a new player controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// Reset a player at a spawn point.
    ///
    /// `spawn_feet` is where the feet should go. The floor under it is probed
    /// so the body rests on it; with no floor, the feet stay at `spawn_feet`.
    pub fn respawn(
        &self,
        state: &mut PlayerState,
        spawn_feet: Vec3,
        facing: f32,
        world: &CollisionWorld,
    ) {
        let half = self.config.min_height(Stance::Standing);
        let probe_origin = spawn_feet + Vec3::Y * SPAWN_PROBE_LIFT;

        let center_y = match world.raycast(
            probe_origin,
            Vec3::NEG_Y,
            SPAWN_PROBE_LENGTH,
            ContentFlags::MASK_WALKABLE,
        ) {
            Some(hit) => hit.point.y + half,
            None => spawn_feet.y + half,
        };

        *state = PlayerState {
            position: Vec3::new(spawn_feet.x, center_y, spawn_feet.z),
            flags: MovementFlags(MovementFlags::CAN_JUMP),
            current_acceleration: self.config.initial_acceleration,
            ..Default::default()
        };
        state.apply_look(facing, 0.0);

        log::debug!("respawned at {:?} facing {:.3}", state.position, state.yaw);
    }

    /// Apply the movement-speed penalty for taking damage.
    ///
    /// A second tag while tagged restarts the timer.
    pub fn tag(&self, state: &mut PlayerState, now_ms: u64) {
        state.flags.set(MovementFlags::TAGGED, true);
        state.tagged_until_ms = now_ms.saturating_add(self.config.tag_duration_ms);
        log::debug!("tagged until {}ms", state.tagged_until_ms);
    }

    /// Update player movement for one tick.
    ///
    /// This is the main entry point that should be called each simulation tick.
    ///
    /// # Arguments
    ///
    /// * `state` - The player's state (will be modified)
    /// * `input` - Intent signals sampled at the start of this tick
    /// * `world` - The collision world
    /// * `delta_time` - Time step in seconds
    /// * `now_ms` - Simulation time of this tick, for timed effects
    pub fn update(
        &self,
        state: &mut PlayerState,
        input: &InputSnapshot,
        world: &CollisionWorld,
        delta_time: f32,
        now_ms: u64,
    ) -> MovementEvents {
        let mut events = MovementEvents::default();

        // Clamp delta time to prevent physics explosions
        let delta_time = if delta_time.is_finite() {
            delta_time.clamp(0.0, MAX_DELTA_TIME)
        } else {
            0.0
        };

        state.flags.set(MovementFlags::BLOCKED_X, false);
        state.flags.set(MovementFlags::BLOCKED_Z, false);

        self.update_timers(state, now_ms, &mut events);
        self.scrub_non_finite(state);

        match update_stance(&self.config, state, input.crouch_held, world) {
            StanceTransition::Crouched | StanceTransition::Stood => events.stance_changed = true,
            StanceTransition::StandRefused => events.stand_refused = true,
            StanceTransition::Unchanged => {}
        }

        let intent = intent_direction(input, state.yaw);

        if input.jump_pressed {
            events.jumped = try_jump(&self.config, state);
        }

        self.integrate_velocity(state, intent, input.run_held, is_diagonal(input), delta_time);

        let vertical = resolve_vertical(&self.config, state, world, delta_time);
        events.landed = vertical.landed;
        events.hit_ceiling = vertical.hit_ceiling;

        let blocked = resolve_horizontal(
            world,
            &mut state.position,
            &mut state.velocity,
            self.config.min_height(state.stance),
            delta_time,
            &self.config,
        );
        state.flags.set(MovementFlags::BLOCKED_X, blocked.x);
        state.flags.set(MovementFlags::BLOCKED_Z, blocked.z);
        events.blocked_x = blocked.x;
        events.blocked_z = blocked.z;

        events
    }

    // ========================================================================
    // Timers
    // ========================================================================

    fn update_timers(&self, state: &mut PlayerState, now_ms: u64, events: &mut MovementEvents) {
        if state.flags.tagged() && now_ms >= state.tagged_until_ms {
            state.flags.set(MovementFlags::TAGGED, false);
            events.tag_expired = true;
        }
    }

    fn scrub_non_finite(&self, state: &mut PlayerState) {
        if !state.velocity.is_finite() {
            log::warn!("discarding non-finite velocity {:?}", state.velocity);
            state.velocity = Vec3::ZERO;
        }
        if !state.current_acceleration.is_finite() {
            log::warn!("discarding non-finite acceleration {}", state.current_acceleration);
            state.current_acceleration = self.config.initial_acceleration;
        }
        if !state.last_move_direction.is_finite() {
            state.last_move_direction = Vec3::ZERO;
        }
    }

    // ========================================================================
    // Velocity
    // ========================================================================

    fn integrate_velocity(
        &self,
        state: &mut PlayerState,
        intent: Vec3,
        run_held: bool,
        diagonal: bool,
        delta_time: f32,
    ) {
        let config = &self.config;
        let grounded = state.grounded();
        let max_speed = config.max_speed(state.stance.is_crouching(), run_held, state.is_tagged());

        let mut horizontal = state.horizontal_velocity();

        if intent != Vec3::ZERO {
            let reversal = intent.dot(state.last_move_direction) < config.counter_strafe_threshold;

            if grounded && reversal {
                // Counter-strafe: kill momentum instead of coasting through it
                horizontal *= config.counter_strafe_damping;
                state.current_acceleration = config.initial_acceleration;
            } else if grounded {
                state.current_acceleration = (state.current_acceleration
                    + config.acceleration_ramp * delta_time)
                    .min(config.max_acceleration);
            }

            let mut acceleration = if grounded {
                state.current_acceleration
            } else {
                config.air_acceleration
            };
            if diagonal {
                acceleration *= config.diagonal_multiplier;
            }
            horizontal += intent * acceleration * delta_time;
            state.last_move_direction = intent;
        } else {
            state.current_acceleration = config.initial_acceleration;

            let deceleration = if grounded {
                config.stop_deceleration
            } else {
                config.deceleration * 0.5
            };
            horizontal *= 1.0 - deceleration;

            if horizontal.length() < config.stop_speed {
                horizontal = Vec3::ZERO;
            }
        }

        let speed = horizontal.length();
        if speed > max_speed {
            horizontal *= max_speed / speed;
        }

        state.velocity.x = horizontal.x;
        state.velocity.z = horizontal.z;

        if !grounded {
            state.velocity.y =
                (state.velocity.y - config.gravity * delta_time).max(-config.max_fall_speed);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
