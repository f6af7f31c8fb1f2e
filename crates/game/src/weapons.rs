//! Weapon loadout and switch timing.
//!
//! Switching is modeled with a completion timestamp that the simulation
//! polls every tick, so a switch finishes on the first tick whose clock has
//! reached `switch_complete_at_ms`.

use serde::{Deserialize, Serialize};

/// Every weapon the loadout can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Classic,
    Vandal,
    Phantom,
    Operator,
    Knife,
}

/// Magazine and reserve sizes for a firearm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoStats {
    pub magazine: u32,
    pub reserve: u32,
}

/// Fixed per-weapon numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage per hit.
    pub damage: u32,
    /// Minimum time between shots (milliseconds). Melee weapons have none.
    pub fire_interval_ms: Option<u64>,
    /// Ammunition. Melee weapons have none.
    pub ammo: Option<AmmoStats>,
    /// Time from switch request to the weapon being ready (milliseconds).
    pub switch_time_ms: u64,
}

impl WeaponKind {
    /// Stats table.
    pub const fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::Classic => WeaponStats {
                damage: 26,
                fire_interval_ms: Some(400),
                ammo: Some(AmmoStats { magazine: 12, reserve: 36 }),
                switch_time_ms: 750,
            },
            WeaponKind::Vandal => WeaponStats {
                damage: 40,
                fire_interval_ms: Some(100),
                ammo: Some(AmmoStats { magazine: 25, reserve: 50 }),
                switch_time_ms: 1000,
            },
            WeaponKind::Phantom => WeaponStats {
                damage: 39,
                fire_interval_ms: Some(80),
                ammo: Some(AmmoStats { magazine: 30, reserve: 60 }),
                switch_time_ms: 1000,
            },
            WeaponKind::Operator => WeaponStats {
                damage: 150,
                fire_interval_ms: Some(600),
                ammo: Some(AmmoStats { magazine: 5, reserve: 10 }),
                switch_time_ms: 1250,
            },
            WeaponKind::Knife => WeaponStats {
                damage: 50,
                fire_interval_ms: None,
                ammo: None,
                switch_time_ms: 500,
            },
        }
    }
}

/// Loadout slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
    Knife,
}

/// A switch request coming from the host input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponRequest {
    Slot(Slot),
    QuickSwitch,
    Next,
    Previous,
}

/// A switch that has started but not finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSwitch {
    pub target: WeaponKind,
    pub switch_complete_at_ms: u64,
}

/// The weapons a player carries and which one is in hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    primary: Option<WeaponKind>,
    secondary: WeaponKind,
    knife: WeaponKind,
    current: WeaponKind,
    last_primary: Option<WeaponKind>,
    pending: Option<PendingSwitch>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Loadout {
    /// Standard loadout: Classic sidearm and knife, Classic in hand.
    pub fn new(primary: Option<WeaponKind>) -> Self {
        Self {
            primary,
            secondary: WeaponKind::Classic,
            knife: WeaponKind::Knife,
            current: WeaponKind::Classic,
            last_primary: None,
            pending: None,
        }
    }

    /// Weapon currently in hand.
    #[inline]
    pub fn current(&self) -> WeaponKind {
        self.current
    }

    /// Stats of the weapon in hand.
    pub fn current_stats(&self) -> WeaponStats {
        self.current.stats()
    }

    /// The switch in progress, if any.
    #[inline]
    pub fn pending(&self) -> Option<PendingSwitch> {
        self.pending
    }

    #[inline]
    pub fn is_switching(&self) -> bool {
        self.pending.is_some()
    }

    /// Weapon held in a slot.
    pub fn weapon_in(&self, slot: Slot) -> Option<WeaponKind> {
        match slot {
            Slot::Primary => self.primary,
            Slot::Secondary => Some(self.secondary),
            Slot::Knife => Some(self.knife),
        }
    }

    /// Put a weapon in the primary slot (a purchase or pickup).
    pub fn set_primary(&mut self, weapon: Option<WeaponKind>) {
        self.primary = weapon;
    }

    /// Handle a switch request at `now_ms`.
    ///
    /// Returns `true` if a switch started. Requests are ignored while another
    /// switch is in progress.
    pub fn request(&mut self, request: WeaponRequest, now_ms: u64) -> bool {
        if self.is_switching() {
            return false;
        }

        match request {
            WeaponRequest::Slot(slot) => self.switch_to(slot, now_ms),
            WeaponRequest::QuickSwitch => self.quick_switch(now_ms),
            WeaponRequest::Next => self.next_weapon(now_ms),
            WeaponRequest::Previous => self.previous_weapon(now_ms),
        }
    }

    /// Finish a pending switch whose time has come.
    ///
    /// Returns the weapon that just became current.
    pub fn update(&mut self, now_ms: u64) -> Option<WeaponKind> {
        let pending = self.pending?;
        if now_ms < pending.switch_complete_at_ms {
            return None;
        }

        self.current = pending.target;
        self.pending = None;
        log::debug!("weapon ready: {:?}", self.current);
        Some(self.current)
    }

    /// Start switching to a slot. Empty slots and the weapon already in hand
    /// are ignored.
    pub fn switch_to(&mut self, slot: Slot, now_ms: u64) -> bool {
        let Some(weapon) = self.weapon_in(slot) else {
            return false;
        };
        if weapon == self.current || self.is_switching() {
            return false;
        }

        if slot == Slot::Primary {
            self.last_primary = Some(weapon);
        }

        self.pending = Some(PendingSwitch {
            target: weapon,
            switch_complete_at_ms: now_ms.saturating_add(weapon.stats().switch_time_ms),
        });
        log::debug!("switching {:?} -> {:?}", self.current, weapon);
        true
    }

    fn holding(&self, slot: Slot) -> bool {
        self.weapon_in(slot) == Some(self.current)
    }

    fn quick_switch(&mut self, now_ms: u64) -> bool {
        if self.holding(Slot::Knife) {
            if self.last_primary.is_some() {
                self.switch_to(Slot::Primary, now_ms)
            } else {
                self.switch_to(Slot::Secondary, now_ms)
            }
        } else if self.holding(Slot::Primary) {
            self.switch_to(Slot::Secondary, now_ms)
        } else if self.primary.is_some() {
            self.switch_to(Slot::Primary, now_ms)
        } else {
            self.switch_to(Slot::Knife, now_ms)
        }
    }

    fn next_weapon(&mut self, now_ms: u64) -> bool {
        if self.holding(Slot::Primary) {
            self.switch_to(Slot::Secondary, now_ms)
        } else if self.holding(Slot::Secondary) {
            self.switch_to(Slot::Knife, now_ms)
        } else if self.primary.is_some() {
            self.switch_to(Slot::Primary, now_ms)
        } else {
            self.switch_to(Slot::Secondary, now_ms)
        }
    }

    fn previous_weapon(&mut self, now_ms: u64) -> bool {
        if self.holding(Slot::Knife) {
            self.switch_to(Slot::Secondary, now_ms)
        } else if self.holding(Slot::Secondary) {
            if self.primary.is_some() {
                self.switch_to(Slot::Primary, now_ms)
            } else {
                self.switch_to(Slot::Knife, now_ms)
            }
        } else {
            self.switch_to(Slot::Knife, now_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_sidearm() {
        let loadout = Loadout::default();
        assert_eq!(loadout.current(), WeaponKind::Classic);
        assert!(!loadout.is_switching());
        assert_eq!(loadout.weapon_in(Slot::Primary), None);
    }

    #[test]
    fn test_switch_completes_after_switch_time() {
        let mut loadout = Loadout::default();

        assert!(loadout.request(WeaponRequest::Slot(Slot::Knife), 1_000));
        assert_eq!(
            loadout.pending(),
            Some(PendingSwitch {
                target: WeaponKind::Knife,
                switch_complete_at_ms: 1_500,
            })
        );

        assert_eq!(loadout.update(1_499), None);
        assert_eq!(loadout.current(), WeaponKind::Classic);

        assert_eq!(loadout.update(1_500), Some(WeaponKind::Knife));
        assert_eq!(loadout.current(), WeaponKind::Knife);
        assert!(!loadout.is_switching());
    }

    #[test]
    fn test_requests_ignored_while_switching() {
        let mut loadout = Loadout::new(Some(WeaponKind::Vandal));

        assert!(loadout.request(WeaponRequest::Slot(Slot::Primary), 0));
        assert!(!loadout.request(WeaponRequest::Slot(Slot::Knife), 100));

        loadout.update(1_000);
        assert_eq!(loadout.current(), WeaponKind::Vandal);
    }

    #[test]
    fn test_empty_slot_and_current_weapon_ignored() {
        let mut loadout = Loadout::default();

        assert!(!loadout.request(WeaponRequest::Slot(Slot::Primary), 0));
        assert!(!loadout.request(WeaponRequest::Slot(Slot::Secondary), 0));
        assert!(!loadout.is_switching());
    }

    #[test]
    fn test_quick_switch_without_primary() {
        let mut loadout = Loadout::default();

        // Sidearm -> knife
        assert!(loadout.request(WeaponRequest::QuickSwitch, 0));
        loadout.update(500);
        assert_eq!(loadout.current(), WeaponKind::Knife);

        // Knife -> sidearm (no primary was ever drawn)
        assert!(loadout.request(WeaponRequest::QuickSwitch, 1_000));
        loadout.update(1_750);
        assert_eq!(loadout.current(), WeaponKind::Classic);
    }

    #[test]
    fn test_quick_switch_with_primary() {
        let mut loadout = Loadout::new(Some(WeaponKind::Phantom));

        // Sidearm -> primary
        loadout.request(WeaponRequest::QuickSwitch, 0);
        loadout.update(1_000);
        assert_eq!(loadout.current(), WeaponKind::Phantom);

        // Primary -> sidearm
        loadout.request(WeaponRequest::QuickSwitch, 2_000);
        loadout.update(2_750);
        assert_eq!(loadout.current(), WeaponKind::Classic);

        // Knife -> last primary
        loadout.request(WeaponRequest::Slot(Slot::Knife), 3_000);
        loadout.update(3_500);
        loadout.request(WeaponRequest::QuickSwitch, 4_000);
        loadout.update(5_000);
        assert_eq!(loadout.current(), WeaponKind::Phantom);
    }

    #[test]
    fn test_wheel_cycles_through_slots() {
        let mut loadout = Loadout::new(Some(WeaponKind::Operator));
        let mut now = 0;
        let mut cycle = |loadout: &mut Loadout, request| {
            loadout.request(request, now);
            now += 2_000;
            loadout.update(now);
            loadout.current()
        };

        assert_eq!(cycle(&mut loadout, WeaponRequest::Next), WeaponKind::Knife);
        assert_eq!(cycle(&mut loadout, WeaponRequest::Next), WeaponKind::Operator);
        assert_eq!(cycle(&mut loadout, WeaponRequest::Next), WeaponKind::Classic);
        assert_eq!(cycle(&mut loadout, WeaponRequest::Previous), WeaponKind::Operator);
        assert_eq!(cycle(&mut loadout, WeaponRequest::Previous), WeaponKind::Knife);
        assert_eq!(cycle(&mut loadout, WeaponRequest::Previous), WeaponKind::Classic);
    }

    #[test]
    fn test_stats_table() {
        assert_eq!(WeaponKind::Operator.stats().damage, 150);
        assert_eq!(WeaponKind::Vandal.stats().switch_time_ms, 1000);
        assert_eq!(WeaponKind::Knife.stats().ammo, None);
        assert_eq!(
            WeaponKind::Classic.stats().ammo,
            Some(AmmoStats { magazine: 12, reserve: 36 })
        );
    }
}
