//! Movement configuration constants.
//!
//! All movement parameters are grouped here for easy tuning. The table is
//! loaded once at startup and is read-only afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::stance::Stance;

/// Errors reported when a movement table fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("crouching height {crouching} must be below standing height {standing}")]
    CrouchNotLower { standing: f32, crouching: f32 },

    #[error("{stance:?} eye offset {eye} must lie within the body height {height}")]
    EyeOutsideBody { stance: Stance, eye: f32, height: f32 },

    #[error("initial acceleration {initial} exceeds maximum acceleration {max}")]
    AccelerationRange { initial: f32, max: f32 },
}

/// Configuration for player movement physics.
///
/// Metric units throughout. Speeds are m/s, accelerations m/s² (applied per
/// tick as `value * delta_time`). Deceleration, damping and diagonal factors
/// are dimensionless and applied once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Player Dimensions
    // ========================================================================
    /// Standing body height (meters).
    pub standing_height: f32,

    /// Crouching body height (meters).
    pub crouching_height: f32,

    /// Eye height above the feet when standing (meters).
    pub eye_offset_standing: f32,

    /// Eye height above the feet when crouching (meters).
    pub eye_offset_crouching: f32,

    /// Horizontal collision radius (meters).
    pub collision_radius: f32,

    /// Extra clearance kept between the body and walls (meters).
    pub collision_margin: f32,

    // ========================================================================
    // Speed Caps
    // ========================================================================
    /// Default horizontal speed cap (meters/second).
    pub walk_speed: f32,

    /// Speed cap while the run modifier is held. The reference tuning makes
    /// the modifier a slower, quieter gait.
    pub run_speed: f32,

    /// Speed cap while crouching. Overrides the run modifier.
    pub crouch_speed: f32,

    /// Speed cap multiplier while tagged.
    pub tag_speed_multiplier: f32,

    /// How long a tag lasts (milliseconds).
    pub tag_duration_ms: u64,

    // ========================================================================
    // Acceleration
    // ========================================================================
    /// Ground acceleration right after starting to move (m/s²).
    pub initial_acceleration: f32,

    /// Ceiling for the ground acceleration ramp (m/s²).
    pub max_acceleration: f32,

    /// How fast ground acceleration ramps while input is held (m/s³).
    pub acceleration_ramp: f32,

    /// Fixed acceleration while airborne (m/s²). Never ramps.
    pub air_acceleration: f32,

    /// Per-tick velocity loss factor without input. Airborne uses half of it.
    pub deceleration: f32,

    /// Per-tick velocity loss factor without input while grounded.
    pub stop_deceleration: f32,

    /// Horizontal speed below which a coasting player snaps to rest (m/s).
    pub stop_speed: f32,

    /// Acceleration factor while moving diagonally (forward/back plus a strafe).
    pub diagonal_multiplier: f32,

    /// Intent/last-direction dot product below which input counts as a reversal.
    pub counter_strafe_threshold: f32,

    /// Horizontal velocity factor applied on a grounded reversal.
    pub counter_strafe_damping: f32,

    // ========================================================================
    // Vertical
    // ========================================================================
    /// Gravity (m/s²).
    pub gravity: f32,

    /// Upward velocity set by a jump (m/s).
    pub jump_velocity: f32,

    /// Terminal falling speed (m/s).
    pub max_fall_speed: f32,

    /// How far above the tentative position the ground probe starts (meters).
    pub ground_probe_lift: f32,

    /// Height above a floor at which a descending body snaps onto it (meters).
    pub ground_tolerance: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            // Player dimensions
            standing_height: 1.8,
            crouching_height: 1.2,
            eye_offset_standing: 1.7,
            eye_offset_crouching: 1.1,
            collision_radius: 0.35,
            collision_margin: 0.05,

            // Speed caps (tactical shooter feel)
            walk_speed: 5.4,
            run_speed: 3.6,
            crouch_speed: 2.25,
            tag_speed_multiplier: 0.6,
            tag_duration_ms: 500,

            // Acceleration
            initial_acceleration: 18.0,
            max_acceleration: 54.0,
            acceleration_ramp: 180.0,
            air_acceleration: 6.0,
            deceleration: 0.15,
            stop_deceleration: 0.25,
            stop_speed: 0.05,
            diagonal_multiplier: std::f32::consts::FRAC_1_SQRT_2,
            counter_strafe_threshold: -0.5,
            counter_strafe_damping: 0.1,

            // Vertical
            gravity: 18.0,
            jump_velocity: 5.2, // ~0.75m apex
            max_fall_speed: 20.0,
            ground_probe_lift: 0.1,
            ground_tolerance: 0.01,
        }
    }
}

impl MovementConfig {
    /// Get the speed cap for the current movement mode.
    ///
    /// Crouching overrides the run modifier; the tag penalty stacks on top.
    pub fn max_speed(&self, is_crouching: bool, is_running: bool, is_tagged: bool) -> f32 {
        let base = if is_crouching {
            self.crouch_speed
        } else if is_running {
            self.run_speed
        } else {
            self.walk_speed
        };

        if is_tagged {
            base * self.tag_speed_multiplier
        } else {
            base
        }
    }

    /// Body height for a stance.
    pub fn height(&self, stance: Stance) -> f32 {
        match stance {
            Stance::Standing => self.standing_height,
            Stance::Crouching => self.crouching_height,
        }
    }

    /// Eye height above the feet for a stance.
    pub fn eye_offset(&self, stance: Stance) -> f32 {
        match stance {
            Stance::Standing => self.eye_offset_standing,
            Stance::Crouching => self.eye_offset_crouching,
        }
    }

    /// Height of the body centre above the floor it rests on.
    #[inline]
    pub fn min_height(&self, stance: Stance) -> f32 {
        self.height(stance) * 0.5
    }

    /// Distance the body centre moves when switching stance.
    #[inline]
    pub fn stance_shift(&self) -> f32 {
        (self.standing_height - self.crouching_height) * 0.5
    }

    /// Horizontal distance kept between the body centre and a wall face.
    #[inline]
    pub fn wall_clearance(&self) -> f32 {
        self.collision_radius + self.collision_margin
    }

    /// Check the table for values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("standing_height", self.standing_height),
            ("crouching_height", self.crouching_height),
            ("collision_radius", self.collision_radius),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("initial_acceleration", self.initial_acceleration),
            ("max_acceleration", self.max_acceleration),
            ("air_acceleration", self.air_acceleration),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("max_fall_speed", self.max_fall_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let ranged = [
            ("collision_margin", self.collision_margin, 0.0, self.collision_radius),
            ("acceleration_ramp", self.acceleration_ramp, 0.0, f32::MAX),
            ("stop_speed", self.stop_speed, 0.0, self.walk_speed),
            ("deceleration", self.deceleration, 0.0, 1.0),
            ("stop_deceleration", self.stop_deceleration, 0.0, 1.0),
            ("tag_speed_multiplier", self.tag_speed_multiplier, 0.0, 1.0),
            ("diagonal_multiplier", self.diagonal_multiplier, 0.0, 1.0),
            ("counter_strafe_threshold", self.counter_strafe_threshold, -1.0, 0.0),
            ("counter_strafe_damping", self.counter_strafe_damping, 0.0, 1.0),
            ("ground_probe_lift", self.ground_probe_lift, 0.0, self.crouching_height),
            ("ground_tolerance", self.ground_tolerance, 0.0, self.ground_probe_lift),
        ];
        for (field, value, min, max) in ranged {
            if !(value >= min && value <= max) {
                return Err(ConfigError::OutOfRange { field, value, min, max });
            }
        }

        if self.crouching_height >= self.standing_height {
            return Err(ConfigError::CrouchNotLower {
                standing: self.standing_height,
                crouching: self.crouching_height,
            });
        }

        for stance in [Stance::Standing, Stance::Crouching] {
            let eye = self.eye_offset(stance);
            let height = self.height(stance);
            if !(eye > 0.0 && eye <= height) {
                return Err(ConfigError::EyeOutsideBody { stance, eye, height });
            }
        }

        if self.initial_acceleration > self.max_acceleration {
            return Err(ConfigError::AccelerationRange {
                initial: self.initial_acceleration,
                max: self.max_acceleration,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MovementConfig::default();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_max_speed() {
        let config = MovementConfig::default();

        assert_eq!(config.max_speed(false, false, false), config.walk_speed);
        assert_eq!(config.max_speed(false, true, false), config.run_speed);
        assert_eq!(config.max_speed(true, false, false), config.crouch_speed);
        // Crouching overrides the run modifier
        assert_eq!(config.max_speed(true, true, false), config.crouch_speed);
        // Tagging stacks on top
        assert_eq!(
            config.max_speed(false, false, true),
            config.walk_speed * config.tag_speed_multiplier
        );
    }

    #[test]
    fn test_stance_dimensions() {
        let config = MovementConfig::default();

        assert_eq!(config.min_height(Stance::Standing), 0.9);
        assert_eq!(config.min_height(Stance::Crouching), 0.6);
        assert!((config.stance_shift() - 0.3).abs() < 1e-6);
        assert!((config.wall_clearance() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_crouch_taller_than_standing() {
        let config = MovementConfig {
            crouching_height: 2.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::CrouchNotLower { .. })));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = MovementConfig {
            walk_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "walk_speed", value: 0.0 })
        );
    }

    #[test]
    fn test_rejects_nan_factor() {
        let config = MovementConfig {
            deceleration: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "deceleration", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_acceleration_range() {
        let config = MovementConfig {
            initial_acceleration: 100.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::AccelerationRange { .. })));
    }
}
