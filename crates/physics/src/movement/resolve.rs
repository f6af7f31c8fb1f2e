//! Axis-separated horizontal collision response.
//!
//! The horizontal displacement for a tick is applied along X first and then
//! along Z, each as its own probe against every solid collider. A diagonal move
//! into a corner therefore becomes two perpendicular moves, one of which is
//! usually free, which gives wall sliding without any plane clipping.

use glam::Vec3;

use crate::collision::{CollisionWorld, ContentFlags, PushAxis};

use super::config::MovementConfig;

/// Displacements shorter than this are treated as no movement.
const MIN_AXIS_MOVE: f32 = 1e-6;

/// Maximum push-out sweeps over the collider set per substep.
///
/// One sweep can push the body into a neighbouring box; a few more settle it.
const MAX_PUSH_PASSES: usize = 4;

/// Upper bound on substeps for a single axis move.
const MAX_SUBSTEPS: u32 = 64;

/// Which horizontal axes were stopped by a collider this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedAxes {
    pub x: bool,
    pub z: bool,
}

impl BlockedAxes {
    #[inline]
    pub fn any(self) -> bool {
        self.x || self.z
    }

    fn mark(&mut self, axis: PushAxis) {
        match axis {
            PushAxis::X => self.x = true,
            PushAxis::Z => self.z = true,
        }
    }
}

/// Move the body horizontally by `velocity * delta_time`, X then Z, then
/// push it clear of anything it still overlaps.
///
/// `half_height` is half the current stance height; `position` is the body
/// centre. Every velocity component along a blocked axis is zeroed.
pub fn resolve_horizontal(
    world: &CollisionWorld,
    position: &mut Vec3,
    velocity: &mut Vec3,
    half_height: f32,
    delta_time: f32,
    config: &MovementConfig,
) -> BlockedAxes {
    let mut blocked = BlockedAxes::default();

    if world.is_empty() {
        position.x += finite_or_zero(velocity.x * delta_time);
        position.z += finite_or_zero(velocity.z * delta_time);
        return blocked;
    }

    for axis in [PushAxis::X, PushAxis::Z] {
        let distance = match axis {
            PushAxis::X => velocity.x * delta_time,
            PushAxis::Z => velocity.z * delta_time,
        };
        move_along_axis(world, position, axis, distance, half_height, config, &mut blocked);
    }

    // Falling past an edge or standing up can overlap a box with no sideways
    // move at all. Such a push only blocks an axis when it opposes the motion.
    let before = *position;
    let settled = push_out(world, position, half_height, config);
    if settled.x && opposes(position.x - before.x, velocity.x) {
        blocked.x = true;
    }
    if settled.z && opposes(position.z - before.z, velocity.z) {
        blocked.z = true;
    }

    if blocked.x {
        velocity.x = 0.0;
    }
    if blocked.z {
        velocity.z = 0.0;
    }

    blocked
}

/// Apply one axis of displacement in substeps no longer than half the radius.
fn move_along_axis(
    world: &CollisionWorld,
    position: &mut Vec3,
    axis: PushAxis,
    distance: f32,
    half_height: f32,
    config: &MovementConfig,
    blocked: &mut BlockedAxes,
) {
    if !distance.is_finite() || distance.abs() < MIN_AXIS_MOVE {
        return;
    }

    let max_step = config.collision_radius * 0.5;
    let steps = ((distance.abs() / max_step).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    let step = distance / steps as f32;

    for _ in 0..steps {
        match axis {
            PushAxis::X => position.x += step,
            PushAxis::Z => position.z += step,
        }

        let pushed = push_out(world, position, half_height, config);
        *blocked = BlockedAxes {
            x: blocked.x || pushed.x,
            z: blocked.z || pushed.z,
        };

        let stopped = match axis {
            PushAxis::X => pushed.x,
            PushAxis::Z => pushed.z,
        };
        if stopped {
            break;
        }
    }
}

/// Push the body out of every solid collider it overlaps.
///
/// Colliders are visited in registration order so overlapping obstacles are
/// always resolved the same way.
pub fn push_out(
    world: &CollisionWorld,
    position: &mut Vec3,
    half_height: f32,
    config: &MovementConfig,
) -> BlockedAxes {
    let mut pushed = BlockedAxes::default();
    let bottom = position.y - half_height;
    let top = position.y + half_height;

    for _ in 0..MAX_PUSH_PASSES {
        let mut moved = false;

        for collider in world.colliders_matching(ContentFlags::MASK_PLAYER_SOLID) {
            let Some(push) = collider.horizontal_push(
                *position,
                bottom,
                top,
                config.collision_radius,
                config.collision_margin,
            ) else {
                continue;
            };

            match push.axis {
                PushAxis::X => position.x = push.value,
                PushAxis::Z => position.z = push.value,
            }
            pushed.mark(push.axis);
            moved = true;
        }

        if !moved {
            break;
        }
    }

    pushed
}

#[inline]
fn opposes(push: f32, velocity: f32) -> bool {
    push * velocity < 0.0
}

#[inline]
fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: f32 = 0.9;
    const DT: f32 = 1.0 / 60.0;

    fn wall_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_aabb(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0), ContentFlags::SOLID);
        world
    }

    #[test]
    fn test_empty_world_accepts_move() {
        let world = CollisionWorld::new();
        let config = MovementConfig::default();

        let mut position = Vec3::new(0.0, HALF, 0.0);
        let mut velocity = Vec3::new(6.0, 0.0, -3.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, 1.0, &config);

        assert!(!blocked.any());
        assert_eq!(position, Vec3::new(6.0, HALF, -3.0));
        assert_eq!(velocity, Vec3::new(6.0, 0.0, -3.0));
    }

    #[test]
    fn test_zero_move_is_noop() {
        let world = wall_world();
        let config = MovementConfig::default();

        let mut position = Vec3::new(0.0, HALF, 0.0);
        let mut velocity = Vec3::ZERO;
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!(!blocked.any());
        assert_eq!(position, Vec3::new(0.0, HALF, 0.0));
    }

    #[test]
    fn test_wall_stops_at_clearance() {
        let world = wall_world();
        let config = MovementConfig::default();

        let mut position = Vec3::new(1.5, HALF, 0.0);
        let mut velocity = Vec3::new(30.0, 0.0, 0.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!(blocked.x);
        assert!(!blocked.z);
        assert!((position.x - 1.6).abs() < 1e-5, "x = {}", position.x);
        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn test_slides_along_wall() {
        let world = wall_world();
        let config = MovementConfig::default();

        // Pressed against the wall, moving diagonally into it
        let mut position = Vec3::new(1.6, HALF, 0.0);
        let mut velocity = Vec3::new(3.0, 0.0, 3.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!(blocked.x);
        assert!(!blocked.z);
        assert!(position.x <= 1.6 + 1e-5);
        assert!((position.z - 0.05).abs() < 1e-5);
        assert_eq!(velocity.z, 3.0);
    }

    #[test]
    fn test_fast_move_does_not_tunnel_thin_wall() {
        let mut world = CollisionWorld::new();
        world.add_aabb(Vec3::new(1.0, 0.0, -5.0), Vec3::new(1.05, 3.0, 5.0), ContentFlags::SOLID);
        let config = MovementConfig::default();

        let mut position = Vec3::new(0.0, HALF, 0.0);
        let mut velocity = Vec3::new(60.0, 0.0, 0.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, 0.05, &config);

        assert!(blocked.x);
        assert!(position.x < 1.0);
        assert!((position.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_floor_volumes_do_not_block() {
        let mut world = CollisionWorld::new();
        world.add_aabb(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0), ContentFlags::FLOOR);
        let config = MovementConfig::default();

        let mut position = Vec3::new(1.5, HALF, 0.0);
        let mut velocity = Vec3::new(6.0, 0.0, 0.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!(!blocked.any());
        assert!((position.x - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_body_above_box_is_not_pushed() {
        let world = wall_world();
        let config = MovementConfig::default();

        // Body bottom at 2.0 rests exactly on the box top
        let mut position = Vec3::new(1.5, 2.0 + HALF, 0.0);
        let mut velocity = Vec3::new(6.0, 0.0, 0.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!(!blocked.any());
    }

    #[test]
    fn test_overlap_without_moving_is_pushed_clear() {
        let world = wall_world();
        let config = MovementConfig::default();

        // Centre just past the +X face, e.g. after dropping down beside the box
        let mut position = Vec3::new(4.1, HALF, 0.0);
        let mut velocity = Vec3::ZERO;
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!((position.x - 4.4).abs() < 1e-5, "x = {}", position.x);
        assert!(!blocked.any());
    }

    #[test]
    fn test_settle_push_against_motion_blocks() {
        let world = wall_world();
        let config = MovementConfig::default();

        // Overlapping on the +X side while still moving toward the box
        let mut position = Vec3::new(4.1, HALF, 0.0);
        let mut velocity = Vec3::new(-1e-5, 0.0, 0.0);
        let blocked = resolve_horizontal(&world, &mut position, &mut velocity, HALF, DT, &config);

        assert!(blocked.x);
        assert_eq!(velocity.x, 0.0);
        assert!((position.x - 4.4).abs() < 1e-5);
    }

    #[test]
    fn test_push_out_between_two_boxes_is_deterministic() {
        let mut world = CollisionWorld::new();
        world.add_aabb(Vec3::new(-3.0, 0.0, -1.0), Vec3::new(-1.0, 2.0, 1.0), ContentFlags::SOLID);
        world.add_aabb(Vec3::new(1.0, 0.0, -1.0), Vec3::new(3.0, 2.0, 1.0), ContentFlags::SOLID);
        let config = MovementConfig::default();

        let mut first = Vec3::new(-0.8, HALF, 0.0);
        let mut second = first;
        push_out(&world, &mut first, HALF, &config);
        push_out(&world, &mut second, HALF, &config);

        assert_eq!(first, second);
        assert!((first.x + 0.6).abs() < 1e-5);
    }
}
