//! Tactica game logic
//!
//! Everything around the movement core that a local, single-player session
//! needs:
//!
//! - Host input collection (raw keys → per-tick snapshots)
//! - Level descriptions and the built-in training arena
//! - Player vitals and weapon-switch timing
//! - The fixed-tick simulation loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │  ┌───────────┐    ┌────────────┐    ┌─────────────────────┐  │
//! │  │ TickInput │───►│ Physics    │───►│ FrameOutput         │  │
//! │  │ (snapshot)│    │ (movement, │    │ (view, flags,       │  │
//! │  └───────────┘    │ collision) │    │  events, weapon)    │  │
//! │                   └────────────┘    └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod input;
pub mod level;
pub mod player;
pub mod simulation;
pub mod weapons;

// Re-export main types
pub use config::{GameConfig, GameConfigError};
pub use input::{InputCollector, KeyBindings, TickInput};
pub use level::{BoxDescription, ColliderKind, Level, LevelDescription, LevelError, SpawnPoint};
pub use player::Player;
pub use simulation::{FrameOutput, Simulation};
pub use weapons::{Loadout, Slot, WeaponKind, WeaponRequest, WeaponStats};

// Re-export physics types for convenience
pub use tactica_physics::{
    CollisionWorld, ContentFlags, InputSnapshot, MovementConfig, MovementEvents,
    PlayerController, PlayerState, Stance, ViewTransform,
};
