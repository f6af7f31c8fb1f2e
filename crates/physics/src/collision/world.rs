//! Collider registry containing all static arena geometry.
//!
//! Colliders are built once from tagged level data and never mutated. The
//! registry has no writer after load, so it can be shared freely.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;
use super::ray::{ray_box_entry, RayHit};

/// Vertical overlap smaller than this is treated as touching, not overlapping.
///
/// A body resting exactly on a box top must not be pushed sideways by it.
const VERTICAL_CONTACT_EPSILON: f32 = 1e-4;

/// Horizontal clearance shortfall tolerated before a contact counts as a hit.
const HORIZONTAL_CONTACT_EPSILON: f32 = 1e-5;

/// A static axis-aligned box in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Unique identifier, assigned in registration order.
    pub id: u32,
    /// Minimum corner in world space.
    pub min: Vec3,
    /// Maximum corner in world space.
    pub max: Vec3,
    /// What kind of volume this is.
    pub contents: ContentFlags,
}

/// Axis along which a horizontal push-out moved the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushAxis {
    X,
    Z,
}

/// Correction that moves a body out of a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPush {
    /// Axis the body is pushed along.
    pub axis: PushAxis,
    /// New coordinate on that axis (`radius` outside the padded face).
    pub value: f32,
}

impl Collider {
    /// Centre of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size of the box in each axis.
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Whether the vertical span `[bottom, top]` strictly overlaps this box.
    #[inline]
    pub fn overlaps_vertically(&self, bottom: f32, top: f32) -> bool {
        top > self.min.y + VERTICAL_CONTACT_EPSILON && bottom < self.max.y - VERTICAL_CONTACT_EPSILON
    }

    /// XZ distance from `point` to this box grown by `margin` on X and Z.
    pub fn padded_distance_xz(&self, point: Vec3, margin: f32) -> f32 {
        let (min, max) = self.padded_xz(margin);
        let p = Vec2::new(point.x, point.z);
        p.distance(p.clamp(min, max))
    }

    /// Test a vertical body against this box and compute its push-out.
    ///
    /// The body is a cylinder of `radius` centred on `point` spanning
    /// `[bottom, top]`. It collides when it overlaps the box vertically and
    /// its centre is closer than `radius` to the box padded by `margin`, so
    /// the resting clearance from the real face is `radius + margin`.
    ///
    /// The push goes along the dominant penetration axis: the axis where the
    /// centre sits furthest out relative to the padded half-extents, which is
    /// the axis needing the smaller correction.
    pub fn horizontal_push(
        &self,
        point: Vec3,
        bottom: f32,
        top: f32,
        radius: f32,
        margin: f32,
    ) -> Option<HorizontalPush> {
        if !self.overlaps_vertically(bottom, top) {
            return None;
        }

        if self.padded_distance_xz(point, margin) >= radius - HORIZONTAL_CONTACT_EPSILON {
            return None;
        }

        let (min, max) = self.padded_xz(margin);
        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;

        let offset_x = point.x - center.x;
        let offset_z = point.z - center.y;
        let penetration_x = half.x + radius - offset_x.abs();
        let penetration_z = half.y + radius - offset_z.abs();

        let push = if penetration_x <= penetration_z {
            let value = if offset_x >= 0.0 { max.x + radius } else { min.x - radius };
            HorizontalPush { axis: PushAxis::X, value }
        } else {
            let value = if offset_z >= 0.0 { max.y + radius } else { min.y - radius };
            HorizontalPush { axis: PushAxis::Z, value }
        };

        Some(push)
    }

    fn padded_xz(&self, margin: f32) -> (Vec2, Vec2) {
        (
            Vec2::new(self.min.x - margin, self.min.z - margin),
            Vec2::new(self.max.x + margin, self.max.z + margin),
        )
    }
}

/// The collider registry.
///
/// # Thread Safety
///
/// The registry is immutable once the level is loaded and can be shared
/// across threads without locking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        let half_extents = half_extents.abs();
        self.add_aabb(center - half_extents, center + half_extents, contents)
    }

    /// Add a box given by its two corners. The corners may come in any order.
    pub fn add_aabb(&mut self, a: Vec3, b: Vec3, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.colliders.push(Collider {
            id,
            min: a.min(b),
            max: a.max(b),
            contents,
        });

        id
    }

    /// Get the number of colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// All colliders in registration order.
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Colliders whose contents intersect `mask`, in registration order.
    pub fn colliders_matching(&self, mask: ContentFlags) -> impl Iterator<Item = &Collider> + '_ {
        self.colliders
            .iter()
            .filter(move |collider| collider.contents.intersects(mask))
    }

    /// Cast a ray and return the closest collider it enters.
    ///
    /// Rays starting strictly inside a collider ignore that collider. Ties are
    /// broken by registration order so the result is deterministic.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum probe distance
    /// * `mask` - Content flags to collide with
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || !(max_distance >= 0.0) {
            return None;
        }

        let mut closest: Option<RayHit> = None;

        for collider in self.colliders_matching(mask) {
            let Some(distance) = ray_box_entry(origin, dir, collider.min, collider.max) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }

            let is_closer = closest.map_or(true, |hit| distance < hit.distance);
            if is_closer {
                closest = Some(RayHit {
                    collider_id: collider.id,
                    distance,
                    point: origin + dir * distance,
                    contents: collider.contents,
                });
            }
        }

        closest
    }

    /// Highest top face among colliders matching `mask` that contain `point`
    /// (boundary included).
    pub fn top_containing(&self, point: Vec3, mask: ContentFlags) -> Option<f32> {
        self.colliders_matching(mask)
            .filter(|collider| point.cmpge(collider.min).all() && point.cmple(collider.max).all())
            .map(|collider| collider.max.y)
            .reduce(f32::max)
    }

    /// Check whether a point lies inside any collider matching `mask`.
    pub fn point_in_solid(&self, point: Vec3, mask: ContentFlags) -> bool {
        self.colliders_matching(mask).any(|collider| {
            point.cmpge(collider.min).all() && point.cmple(collider.max).all()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
