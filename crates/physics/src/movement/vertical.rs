//! Jumping, ground probing and the ceiling check.
//!
//! Vertical motion is resolved before horizontal motion and independently of
//! it. Gravity itself is accumulated by the velocity integrator; this module
//! only decides where the body ends up along Y.

use glam::Vec3;

use crate::collision::{CollisionWorld, ContentFlags};

use super::config::MovementConfig;
use super::state::{MovementFlags, PlayerState};

/// What the vertical resolver did this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalOutcome {
    /// Body settled onto a floor (or the fallback floor).
    pub grounded: bool,
    /// Body was airborne last tick and settled this tick.
    pub landed: bool,
    /// An upward move was stopped by geometry overhead.
    pub hit_ceiling: bool,
}

/// Start a jump if one is allowed.
///
/// Returns `true` when the impulse was applied.
pub fn try_jump(config: &MovementConfig, state: &mut PlayerState) -> bool {
    if !state.flags.can_jump() {
        return false;
    }

    state.velocity.y = config.jump_velocity;
    state.flags.set(MovementFlags::CAN_JUMP, false);
    state.flags.set(MovementFlags::ON_GROUND, false);
    log::debug!("jump at {:?}", state.position);
    true
}

/// Move the body along Y by `velocity.y * delta_time` and settle it on the
/// floor under it.
///
/// A descending body whose tentative centre comes within `ground_tolerance`
/// of `floor + min_height` snaps onto the floor with zero vertical velocity.
/// With no floor under it at all, the body is held at `min_height` above
/// `y = 0`.
pub fn resolve_vertical(
    config: &MovementConfig,
    state: &mut PlayerState,
    world: &CollisionWorld,
    delta_time: f32,
) -> VerticalOutcome {
    let half = config.min_height(state.stance);
    let was_grounded = state.grounded();
    let mut outcome = VerticalOutcome::default();

    let mut tentative = state.position.y + state.velocity.y * delta_time;

    // Ceiling
    if state.velocity.y > 0.0 {
        let head = Vec3::new(state.position.x, state.position.y + half, state.position.z);
        let rise = tentative - state.position.y;
        if let Some(hit) = world.raycast(head, Vec3::Y, rise, ContentFlags::MASK_PLAYER_SOLID) {
            tentative = hit.point.y - half;
            state.velocity.y = 0.0;
            outcome.hit_ceiling = true;
        }
    }

    // Ground
    let probe_origin = Vec3::new(
        state.position.x,
        state.position.y.max(tentative) + config.ground_probe_lift,
        state.position.z,
    );
    let probe_length = config.height(state.stance) * 2.0;

    // A probe starting inside a walkable volume (a body that walked into a
    // raised floor pad) stands on that volume's top.
    let floor_y = world
        .top_containing(probe_origin, ContentFlags::MASK_WALKABLE)
        .or_else(|| {
            world
                .raycast(probe_origin, Vec3::NEG_Y, probe_length, ContentFlags::MASK_WALKABLE)
                .map(|hit| hit.point.y)
        });

    let settle_y = if state.velocity.y <= 0.0 {
        match floor_y {
            Some(y) if tentative <= y + half + config.ground_tolerance => Some(y + half),
            None if tentative < half => Some(half),
            _ => None,
        }
    } else {
        None
    };

    match settle_y {
        Some(y) => {
            state.position.y = y;
            state.velocity.y = 0.0;
            state.flags.set(MovementFlags::ON_GROUND, true);
            state.flags.set(MovementFlags::CAN_JUMP, true);
            outcome.grounded = true;
            outcome.landed = !was_grounded;
            if outcome.landed {
                log::debug!("landed at {:?}", state.position);
            }
        }
        None => {
            state.position.y = tentative;
            state.flags.set(MovementFlags::ON_GROUND, false);
            state.flags.set(MovementFlags::CAN_JUMP, false);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn floor_world(top: f32) -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_aabb(
            Vec3::new(-50.0, top - 1.0, -50.0),
            Vec3::new(50.0, top, 50.0),
            ContentFlags::FLOOR,
        );
        world
    }

    #[test]
    fn test_jump_requires_can_jump() {
        let config = MovementConfig::default();
        let mut state = PlayerState::new(Vec3::new(0.0, 0.9, 0.0));

        assert!(try_jump(&config, &mut state));
        assert_eq!(state.velocity.y, config.jump_velocity);
        assert!(!state.flags.can_jump());
        assert!(!state.grounded());

        // No double jump
        state.velocity.y = 1.0;
        assert!(!try_jump(&config, &mut state));
        assert_eq!(state.velocity.y, 1.0);
    }

    #[test]
    fn test_ground_snap_while_falling() {
        let config = MovementConfig::default();
        let world = floor_world(0.0);

        let mut state = PlayerState::new(Vec3::new(0.0, 0.9 + 0.05, 0.0));
        state.velocity.y = -6.0;

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(outcome.grounded);
        assert!(outcome.landed);
        assert!(state.grounded());
        assert!(state.flags.can_jump());
        assert_eq!(state.velocity.y, 0.0);
        assert!((state.position.y - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_free_fall_above_floor() {
        let config = MovementConfig::default();
        let world = floor_world(0.0);

        let mut state = PlayerState::new(Vec3::new(0.0, 3.0, 0.0));
        state.velocity.y = -2.0;

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(!outcome.grounded);
        assert!(!state.grounded());
        assert!((state.position.y - (3.0 - 2.0 * DT)).abs() < 1e-6);
        assert_eq!(state.velocity.y, -2.0);
    }

    #[test]
    fn test_raised_floor_uses_hit_height() {
        let config = MovementConfig::default();
        let world = floor_world(1.5);

        let mut state = PlayerState::new(Vec3::new(0.0, 2.41, 0.0));
        state.velocity.y = -3.0;

        resolve_vertical(&config, &mut state, &world, DT);

        assert!(state.grounded());
        assert!((state.position.y - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_fallback_floor_without_geometry() {
        let config = MovementConfig::default();
        let world = CollisionWorld::new();

        let mut state = PlayerState::new(Vec3::new(0.0, 0.2, 0.0));
        state.velocity.y = -4.0;

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(outcome.grounded);
        assert_eq!(state.position.y, config.min_height(state.stance));
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_rising_body_is_airborne() {
        let config = MovementConfig::default();
        let world = floor_world(0.0);

        let mut state = PlayerState::new(Vec3::new(0.0, 0.9, 0.0));
        state.velocity.y = config.jump_velocity;

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(!outcome.grounded);
        assert!(state.position.y > 0.9);
    }

    #[test]
    fn test_ceiling_stops_ascent() {
        let config = MovementConfig::default();
        let mut world = floor_world(0.0);
        world.add_aabb(Vec3::new(-5.0, 1.85, -5.0), Vec3::new(5.0, 3.0, 5.0), ContentFlags::SOLID);

        let mut state = PlayerState::new(Vec3::new(0.0, 0.9, 0.0));
        state.velocity.y = config.jump_velocity;

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(outcome.hit_ceiling);
        assert_eq!(state.velocity.y, 0.0);
        assert!((state.position.y + 0.9 - 1.85).abs() < 1e-5);
    }

    #[test]
    fn test_inside_floor_volume_stands_on_top() {
        let config = MovementConfig::default();
        let mut world = floor_world(0.0);
        world.add_aabb(Vec3::new(-2.0, 0.0, -2.0), Vec3::new(2.0, 1.0, 2.0), ContentFlags::FLOOR);

        // Feet on the ground, centre already inside the pad
        let mut state = PlayerState::new(Vec3::new(0.0, 0.5, 0.0));
        state.flags.set(MovementFlags::ON_GROUND, true);

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(outcome.grounded);
        assert!((state.position.y - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_walking_off_ledge_clears_can_jump() {
        let config = MovementConfig::default();
        let world = floor_world(-5.0);

        let mut state = PlayerState::new(Vec3::new(0.0, 0.9, 0.0));
        state.flags.set(MovementFlags::ON_GROUND, true);

        let outcome = resolve_vertical(&config, &mut state, &world, DT);

        assert!(!outcome.grounded);
        assert!(!state.flags.can_jump());
    }
}
