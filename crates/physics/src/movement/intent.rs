//! Directional input mapping.
//!
//! Turns the held movement keys and the current yaw into a world-space
//! intent direction of length exactly 1, or zero when nothing is held (or the
//! held keys cancel out).

use glam::Vec3;

use super::state::InputSnapshot;

/// Horizontal forward vector for a yaw. Yaw 0 faces -Z.
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(-sin_yaw, 0.0, -cos_yaw)
}

/// Horizontal right vector for a yaw.
#[inline]
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(cos_yaw, 0.0, -sin_yaw)
}

/// Whether the held keys move along both the forward and the strafe axis.
///
/// Opposite keys cancel, so forward + back + right is not diagonal. The
/// integrator scales acceleration by `diagonal_multiplier` for these inputs.
#[inline]
pub fn is_diagonal(input: &InputSnapshot) -> bool {
    input.move_forward != input.move_back && input.strafe_left != input.strafe_right
}

/// Map held movement keys to a unit world-space direction.
///
/// A sum that cannot be normalized (opposite keys, non-finite yaw) yields
/// [`Vec3::ZERO`].
pub fn intent_direction(input: &InputSnapshot, yaw: f32) -> Vec3 {
    let forward = forward_from_yaw(yaw);
    let right = right_from_yaw(yaw);

    let mut wish = Vec3::ZERO;
    if input.move_forward {
        wish += forward;
    }
    if input.move_back {
        wish -= forward;
    }
    if input.strafe_right {
        wish += right;
    }
    if input.strafe_left {
        wish -= right;
    }

    wish.normalize_or_zero()
}
