//! Player movement physics system.
//!
//! This module implements first-person tactical-shooter movement with:
//!
//! - Ramped ground acceleration and weak, fixed air control
//! - Counter-strafe damping on grounded direction reversals
//! - Crouching with an overhead clearance gate
//! - Gravity, jumping and floor snapping
//! - Axis-separated push-out against static boxes
//!
//! # Design
//!
//! Movement is controlled by the [`PlayerController`] which takes an
//! [`InputSnapshot`] each tick and updates the player's [`PlayerState`]
//! through the collision world.
//!
//! Every tick is a pure function of the state, the snapshot and the static
//! world, so replaying the same inputs gives the same trajectory.

mod config;
mod controller;
mod intent;
mod resolve;
mod stance;
mod state;
mod vertical;

pub use config::{ConfigError, MovementConfig};
pub use controller::{MovementEvents, PlayerController};
pub use intent::{forward_from_yaw, intent_direction, is_diagonal, right_from_yaw};
pub use resolve::{push_out, resolve_horizontal, BlockedAxes};
pub use stance::{can_stand_up, update_stance, Stance, StanceTransition};
pub use state::{InputSnapshot, MovementFlags, PlayerState, ViewTransform};
pub use vertical::{resolve_vertical, try_jump, VerticalOutcome};
