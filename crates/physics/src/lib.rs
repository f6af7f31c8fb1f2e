//! Tactica Physics
//!
//! The movement-and-collision core of a first-person tactical shooter. It
//! turns sampled key intents and the camera yaw into a player trajectory
//! through a static arena of axis-aligned boxes.
//!
//! # Architecture
//!
//! The physics engine is split into two main systems:
//!
//! - **Collision**: a read-only registry of boxes answering ray probes and
//!   push-out queries
//! - **Movement**: uses those queries to implement player movement physics
//!
//! # Tick order
//!
//! 1. Stance update (crouch is instant, standing is gated)
//! 2. Input mapping and jump
//! 3. Velocity integration
//! 4. Vertical resolution (gravity, ceiling, floor snap)
//! 5. Horizontal resolution, X then Z

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{Collider, CollisionWorld, ContentFlags, RayHit};
pub use movement::{
    ConfigError, InputSnapshot, MovementConfig, MovementEvents, MovementFlags, PlayerController,
    PlayerState, Stance, ViewTransform,
};
