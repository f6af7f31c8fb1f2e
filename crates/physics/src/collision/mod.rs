//! Static collision geometry for the arena.
//!
//! The level collaborator registers every obstacle once, at load time, as an
//! axis-aligned box tagged with [`ContentFlags`]. After that the registry is
//! read-only: the movement code only queries it.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: the collider registry
//! - [`Collider`]: one immutable AABB plus its content tag
//! - [`RayHit`]: result of a ray probe (ground, ceiling, stand-up clearance)

mod flags;
mod ray;
mod world;

pub use flags::ContentFlags;
pub use ray::RayHit;
pub use world::{Collider, CollisionWorld, HorizontalPush, PushAxis};
