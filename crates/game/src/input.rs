//! Player input handling.
//!
//! The host event layer reports raw key identities (`"w"`, `"Shift"`, ...)
//! and wheel deltas as they arrive. [`InputCollector`] keeps the held set and
//! turns it into one [`TickInput`] at each tick boundary, so the movement
//! code only ever sees a snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tactica_physics::InputSnapshot;

use crate::weapons::{Slot, WeaponRequest};

/// Which raw keys drive which action. Each action accepts several keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub back: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub run: Vec<String>,
    pub crouch: Vec<String>,
    pub jump: Vec<String>,
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub knife: Vec<String>,
    pub quick_switch: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: keys(&["w"]),
            back: keys(&["s"]),
            left: keys(&["a"]),
            right: keys(&["d"]),
            run: keys(&["Shift"]),
            crouch: keys(&["Control", "c"]),
            jump: keys(&[" "]),
            primary: keys(&["1"]),
            secondary: keys(&["2"]),
            knife: keys(&["3"]),
            quick_switch: keys(&["q"]),
        }
    }
}

/// Normalize a raw key identity.
///
/// Single-character keys are case-folded so a held modifier (`"W"` while
/// Shift is down) still maps to the same action.
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Everything the simulation reads at a tick boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Level-triggered movement intents.
    pub movement: InputSnapshot,
    /// Edge-triggered weapon request since the previous tick (latest wins).
    pub weapon: Option<WeaponRequest>,
}

/// Collects raw host events between ticks.
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    bindings: KeyBindings,
    held: HashSet<String>,
    pending_weapon: Option<WeaponRequest>,
}

impl InputCollector {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            pending_weapon: None,
        }
    }

    /// A key went down. Auto-repeat of a key already held is ignored.
    pub fn key_down(&mut self, key: &str) {
        let key = normalize_key(key);
        if !self.held.insert(key.clone()) {
            return;
        }

        if let Some(request) = self.weapon_request_for(&key) {
            self.pending_weapon = Some(request);
        }
    }

    /// A key went up.
    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize_key(key));
    }

    /// The wheel turned. Positive `delta_y` cycles forward.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.pending_weapon = Some(WeaponRequest::Next);
        } else if delta_y < 0.0 {
            self.pending_weapon = Some(WeaponRequest::Previous);
        }
    }

    /// Forget all held keys (focus or pointer lock lost).
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pending_weapon = None;
    }

    /// Whether any key bound to `action` is held.
    fn action_held(&self, action: &[String]) -> bool {
        action.iter().any(|key| self.held.contains(&normalize_key(key)))
    }

    fn weapon_request_for(&self, key: &str) -> Option<WeaponRequest> {
        let bound = |action: &[String]| action.iter().any(|k| normalize_key(k) == key);

        if bound(&self.bindings.primary) {
            Some(WeaponRequest::Slot(Slot::Primary))
        } else if bound(&self.bindings.secondary) {
            Some(WeaponRequest::Slot(Slot::Secondary))
        } else if bound(&self.bindings.knife) {
            Some(WeaponRequest::Slot(Slot::Knife))
        } else if bound(&self.bindings.quick_switch) {
            Some(WeaponRequest::QuickSwitch)
        } else {
            None
        }
    }

    /// Sample the held keys for this tick and take the pending weapon request.
    pub fn snapshot(&mut self) -> TickInput {
        let bindings = &self.bindings;
        let movement = InputSnapshot {
            move_forward: self.action_held(&bindings.forward),
            move_back: self.action_held(&bindings.back),
            strafe_left: self.action_held(&bindings.left),
            strafe_right: self.action_held(&bindings.right),
            run_held: self.action_held(&bindings.run),
            crouch_held: self.action_held(&bindings.crouch),
            jump_pressed: self.action_held(&bindings.jump),
        };

        TickInput {
            movement,
            weapon: self.pending_weapon.take(),
        }
    }
}
