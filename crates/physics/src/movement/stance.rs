//! Crouch/stand stance machine.
//!
//! Crouching is unconditional and instant. Standing back up is gated by a
//! clearance probe above the head; a refused stand is simply retried on the
//! next tick while the crouch key stays released.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionWorld, ContentFlags};

use super::config::MovementConfig;
use super::state::PlayerState;

/// The two player stances, ordered by height (highest first).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    #[inline]
    pub fn is_crouching(self) -> bool {
        self == Stance::Crouching
    }
}

/// What the stance machine did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceTransition {
    /// Stance did not change.
    Unchanged,
    /// Went from standing to crouching.
    Crouched,
    /// Went from crouching to standing.
    Stood,
    /// Wanted to stand but something is overhead.
    StandRefused,
}

/// Advance the stance machine for one tick.
///
/// The feet stay where they are across a transition, so the body centre
/// moves by half the height difference and the camera follows.
pub fn update_stance(
    config: &MovementConfig,
    state: &mut PlayerState,
    crouch_held: bool,
    world: &CollisionWorld,
) -> StanceTransition {
    match (state.stance, crouch_held) {
        (Stance::Standing, true) => {
            state.stance = Stance::Crouching;
            state.position.y -= config.stance_shift();
            StanceTransition::Crouched
        }
        (Stance::Crouching, false) => {
            if !can_stand_up(config, state, world) {
                log::debug!("stand refused: overhead geometry at {:?}", state.position);
                return StanceTransition::StandRefused;
            }
            state.stance = Stance::Standing;
            state.position.y += config.stance_shift();
            StanceTransition::Stood
        }
        _ => StanceTransition::Unchanged,
    }
}

/// Probe upward from the crouched eye for the height the body would gain.
///
/// The probe covers the stance height difference plus the gap between the
/// crouched eye and crown, so it reaches the top of the standing head.
pub fn can_stand_up(config: &MovementConfig, state: &PlayerState, world: &CollisionWorld) -> bool {
    let eye = state.eye_position(config);
    let reach = (config.standing_height - config.crouching_height)
        + (config.crouching_height - config.eye_offset_crouching);

    world
        .raycast(eye, Vec3::Y, reach, ContentFlags::MASK_PLAYER_SOLID)
        .is_none()
}
