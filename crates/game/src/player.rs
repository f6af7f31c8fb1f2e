//! Player entity and vitals.

use serde::{Deserialize, Serialize};
use tactica_physics::PlayerState;

/// A player in the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player name/handle.
    pub name: String,

    /// Movement physics state.
    pub movement: PlayerState,

    /// Current health (0 = dead).
    pub health: i32,

    /// Maximum health.
    pub max_health: i32,

    /// Current shield.
    pub shield: i32,

    /// Deaths this session.
    pub deaths: u32,
}

impl Player {
    pub const MAX_HEALTH: i32 = 100;
    pub const STARTING_SHIELD: i32 = 50;

    /// Create a new player. Place it with `PlayerController::respawn`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            movement: PlayerState::default(),
            health: Self::MAX_HEALTH,
            max_health: Self::MAX_HEALTH,
            shield: Self::STARTING_SHIELD,
            deaths: 0,
        }
    }

    /// Check if the player is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage to the player.
    ///
    /// Returns the damage that reached health (after shield absorption).
    /// Non-positive amounts and hits on a dead player deal nothing.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || amount <= 0 {
            return 0;
        }

        // Shield absorbs two thirds of the hit, up to its value
        let absorbed = (self.shield.min(amount) * 2) / 3;
        self.shield = (self.shield - absorbed).max(0);

        let actual_damage = amount - absorbed;
        self.health = (self.health - actual_damage).max(0);

        if self.health == 0 {
            self.die();
        }

        actual_damage
    }

    /// Kill the player.
    fn die(&mut self) {
        self.health = 0;
        self.deaths += 1;
        log::debug!("{} died ({} deaths)", self.name, self.deaths);
    }

    /// Restore health and shield. Movement state is reset separately.
    pub fn reset_vitals(&mut self) {
        self.health = self.max_health;
        self.shield = Self::STARTING_SHIELD;
    }
}
