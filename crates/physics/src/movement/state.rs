//! Player state and per-tick input structures.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::MovementConfig;
use super::stance::Stance;

/// Flags describing the player's current movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags(pub u16);

impl MovementFlags {
    /// The ground probe found a supporting floor this tick.
    pub const ON_GROUND: u16 = 1 << 0;

    /// A jump may be started.
    pub const CAN_JUMP: u16 = 1 << 1;

    /// Movement-speed penalty from taking damage is active.
    pub const TAGGED: u16 = 1 << 2;

    /// The X-axis move was stopped by a collider this tick.
    pub const BLOCKED_X: u16 = 1 << 3;

    /// The Z-axis move was stopped by a collider this tick.
    pub const BLOCKED_Z: u16 = 1 << 4;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u16, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[inline]
    pub fn on_ground(self) -> bool {
        self.has(Self::ON_GROUND)
    }

    #[inline]
    pub fn can_jump(self) -> bool {
        self.has(Self::CAN_JUMP)
    }

    #[inline]
    pub fn tagged(self) -> bool {
        self.has(Self::TAGGED)
    }

    #[inline]
    pub fn blocked_x(self) -> bool {
        self.has(Self::BLOCKED_X)
    }

    #[inline]
    pub fn blocked_z(self) -> bool {
        self.has(Self::BLOCKED_Z)
    }
}

/// Complete movement state for the player.
///
/// Owned by the simulation and mutated once per tick by the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Centre of the body in world space. The body spans
    /// `[position.y - height/2, position.y + height/2]`.
    pub position: Vec3,

    /// Velocity in world space (meters/second).
    pub velocity: Vec3,

    /// Heading in radians, wrapped to `(-PI, PI]`. Zero looks down -Z.
    pub yaw: f32,

    /// Look elevation in radians, clamped to `[-PI/2, PI/2]`.
    pub pitch: f32,

    /// Current stance.
    pub stance: Stance,

    /// Movement state flags.
    pub flags: MovementFlags,

    /// Simulation time at which the tag penalty expires (milliseconds).
    pub tagged_until_ms: u64,

    /// Ramping ground acceleration (m/s²).
    pub current_acceleration: f32,

    /// Last non-zero intent direction, for reversal detection.
    pub last_move_direction: Vec3,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            stance: Stance::Standing,
            flags: MovementFlags(MovementFlags::CAN_JUMP),
            tagged_until_ms: 0,
            current_acceleration: 0.0,
            last_move_direction: Vec3::ZERO,
        }
    }
}

impl PlayerState {
    /// Create a new state with the body centre at `position`.
    ///
    /// Use [`PlayerController::respawn`](super::PlayerController::respawn)
    /// to place a player on the floor with a fully reset state.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Height of the feet.
    pub fn feet_y(&self, config: &MovementConfig) -> f32 {
        self.position.y - config.min_height(self.stance)
    }

    /// Get the eye position (for camera placement).
    pub fn eye_position(&self, config: &MovementConfig) -> Vec3 {
        let eye_y = self.feet_y(config) + config.eye_offset(self.stance);
        Vec3::new(self.position.x, eye_y, self.position.z)
    }

    /// Camera transform handed to the rendering collaborator.
    pub fn view_transform(&self, config: &MovementConfig) -> ViewTransform {
        ViewTransform {
            position: self.eye_position(config),
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Apply a look delta. Takes effect immediately, outside the tick.
    ///
    /// Non-finite deltas are ignored.
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if yaw_delta.is_finite() {
            self.yaw = wrap_angle(self.yaw + yaw_delta);
        }
        if pitch_delta.is_finite() {
            self.pitch = (self.pitch + pitch_delta)
                .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
        }
    }

    /// Horizontal part of the velocity.
    #[inline]
    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    /// Get current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity().length()
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.flags.on_ground()
    }

    #[inline]
    pub fn is_tagged(&self) -> bool {
        self.flags.tagged()
    }
}

/// Wrap an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};

    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Camera/avatar transform produced every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Eye position in world space.
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Intent signals sampled once at the start of a tick.
///
/// Populated by the host event layer at the tick boundary; the movement code
/// never reads raw key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub move_forward: bool,
    pub move_back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub run_held: bool,
    pub crouch_held: bool,
    pub jump_pressed: bool,
}
