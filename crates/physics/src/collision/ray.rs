//! Ray probe results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// The closest collider a ray probe ran into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Id of the collider that was hit.
    pub collider_id: u32,

    /// Distance from the ray origin to the impact point.
    pub distance: f32,

    /// Impact point in world space.
    pub point: Vec3,

    /// Content flags of the collider that was hit.
    pub contents: ContentFlags,
}

/// Slab test of a ray against an axis-aligned box.
///
/// Returns the entry distance along `direction` (which must be normalized).
/// A ray whose origin lies strictly inside the box does not hit it.
pub(crate) fn ray_box_entry(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inside = (0..3).all(|axis| origin[axis] > min[axis] && origin[axis] < max[axis]);
    if inside {
        return None;
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < 1e-8 {
            // Parallel to this slab: must already be between its planes
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}
