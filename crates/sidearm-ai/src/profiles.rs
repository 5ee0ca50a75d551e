//! Weapon-family behavioral profiles.
//!
//! Consolidates per-family tuning for the weapon strategies. Every family
//! shares the same contract shape; only these numbers and policies differ.

use sidearm_core::enums::WeaponIdentity;

/// Forward/back component of the in-range strafe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForwardPolicy {
    /// Back off at strafe speed when closer than ideal, otherwise advance.
    BackOffBelowIdeal,
    /// No forward component; strafe only.
    Planted,
    /// Hold when closer than ideal, otherwise advance at `strafe * surge`.
    CloseIn { surge: f32 },
    /// Retreat at `strafe * retreat` below min, advance above max, hold between.
    HoldBand { retreat: f32 },
}

/// How a strategy derives its cooldown between shots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    /// Configured base interval ± configured variance, floored.
    Configured { floor: i32 },
    /// Weapon fire-rate metadata (or `default_rate`) ± `jitter`, floored.
    Rated { default_rate: i32, jitter: i32, floor: i32 },
    /// Fixed base ± `jitter`, floored. For items without rate metadata.
    Fixed { base: i32, jitter: i32, floor: i32 },
}

/// Behavioral profile for a weapon family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    /// Preferred engagement distance (blocks).
    pub ideal_distance: f32,
    /// Distance below which distance-keeping families back away (blocks).
    pub min_distance: f32,
    /// Engagement range; beyond it the entity navigates instead of firing (blocks).
    pub max_distance: f32,
    /// Lateral input magnitude while strafing.
    pub strafe_speed: f32,
    /// Speed modifier for navigation towards the target.
    pub approach_speed: f32,
    pub can_dual_wield: bool,
    /// Whether the family holds range (true) or closes in (false).
    pub maintains_distance: bool,
    pub forward: ForwardPolicy,
    pub cadence: Cadence,
    /// Strafe re-roll window after a shot: `base + U[0, spread)` ticks.
    pub strafe_window: (i32, i32),
}

/// Get the behavioral profile for a given weapon identity.
pub fn get_profile(identity: WeaponIdentity) -> WeaponProfile {
    match identity {
        WeaponIdentity::Generic => WeaponProfile {
            ideal_distance: 10.0,
            min_distance: 4.0,
            max_distance: 16.0,
            strafe_speed: 0.1,
            approach_speed: 0.6,
            can_dual_wield: false,
            maintains_distance: true,
            forward: ForwardPolicy::BackOffBelowIdeal,
            cadence: Cadence::Configured { floor: 20 },
            strafe_window: (20, 20),
        },
        WeaponIdentity::Flintlock => WeaponProfile {
            ideal_distance: 12.0,
            min_distance: 6.0,
            max_distance: 18.0,
            strafe_speed: 0.1,
            approach_speed: 0.6,
            can_dual_wield: true,
            maintains_distance: true,
            forward: ForwardPolicy::BackOffBelowIdeal,
            cadence: Cadence::Rated {
                default_rate: 40,
                jitter: 4,
                floor: 20,
            },
            strafe_window: (25, 25),
        },
        WeaponIdentity::Revolver => WeaponProfile {
            ideal_distance: 9.0,
            min_distance: 4.0,
            max_distance: 14.0,
            strafe_speed: 0.12,
            approach_speed: 0.6,
            can_dual_wield: true,
            maintains_distance: true,
            forward: ForwardPolicy::BackOffBelowIdeal,
            cadence: Cadence::Rated {
                default_rate: 6,
                jitter: 1,
                floor: 3,
            },
            strafe_window: (20, 20),
        },
        WeaponIdentity::Shotgun => WeaponProfile {
            ideal_distance: 6.0,
            min_distance: 3.0,
            max_distance: 10.0,
            strafe_speed: 0.12, // faster side-steps up close
            approach_speed: 0.7,
            can_dual_wield: false,
            maintains_distance: false,
            forward: ForwardPolicy::CloseIn { surge: 1.5 },
            cadence: Cadence::Rated {
                default_rate: 2,
                jitter: 1,
                floor: 1,
            },
            strafe_window: (15, 15),
        },
        WeaponIdentity::Nailgun => WeaponProfile {
            ideal_distance: 8.0,
            min_distance: 4.0,
            max_distance: 12.0,
            strafe_speed: 0.1,
            approach_speed: 0.6,
            can_dual_wield: true,
            maintains_distance: true,
            forward: ForwardPolicy::BackOffBelowIdeal,
            cadence: Cadence::Rated {
                default_rate: 3,
                jitter: 1,
                floor: 3,
            },
            strafe_window: (15, 15),
        },
        WeaponIdentity::Gatling => WeaponProfile {
            ideal_distance: 13.0,
            min_distance: 8.0,
            max_distance: 18.0,
            strafe_speed: 0.05, // feet planted while spinning up
            approach_speed: 0.5,
            can_dual_wield: false,
            maintains_distance: true,
            forward: ForwardPolicy::Planted,
            cadence: Cadence::Rated {
                default_rate: 5,
                jitter: 1,
                floor: 3,
            },
            strafe_window: (30, 30),
        },
        WeaponIdentity::Blazegun => WeaponProfile {
            ideal_distance: 5.0,
            min_distance: 2.0,
            max_distance: 8.0,
            strafe_speed: 0.12,
            approach_speed: 0.7,
            can_dual_wield: false,
            maintains_distance: false,
            forward: ForwardPolicy::CloseIn { surge: 1.5 },
            cadence: Cadence::Rated {
                default_rate: 4,
                jitter: 1,
                floor: 3,
            },
            strafe_window: (15, 15),
        },
        WeaponIdentity::Launcher => WeaponProfile {
            ideal_distance: 16.0,
            min_distance: 10.0,
            max_distance: 22.0,
            strafe_speed: 0.1,
            approach_speed: 0.6,
            can_dual_wield: false,
            maintains_distance: true,
            forward: ForwardPolicy::HoldBand { retreat: 1.5 },
            cadence: Cadence::Rated {
                default_rate: 4,
                jitter: 2,
                floor: 3,
            },
            strafe_window: (25, 25),
        },
        WeaponIdentity::Hammer => WeaponProfile {
            ideal_distance: 3.0,
            min_distance: 1.0,
            max_distance: 5.0,
            strafe_speed: 0.15,
            approach_speed: 0.8,
            can_dual_wield: false,
            maintains_distance: false,
            forward: ForwardPolicy::CloseIn { surge: 2.0 },
            // Melee items carry no rate metadata.
            cadence: Cadence::Fixed {
                base: 20,
                jitter: 5,
                floor: 15,
            },
            strafe_window: (15, 15),
        },
        WeaponIdentity::Grenade => WeaponProfile {
            ideal_distance: 10.0,
            min_distance: 6.0,
            max_distance: 14.0,
            strafe_speed: 0.1,
            approach_speed: 0.6,
            can_dual_wield: false,
            maintains_distance: true,
            forward: ForwardPolicy::HoldBand { retreat: 1.0 },
            cadence: Cadence::Fixed {
                base: 40,
                jitter: 10,
                floor: 30,
            },
            strafe_window: (20, 20),
        },
    }
}

impl WeaponProfile {
    /// Forward input while strafing at `distance` from the target.
    pub fn forward_input(&self, distance: f32) -> f32 {
        let s = self.strafe_speed;
        match self.forward {
            ForwardPolicy::BackOffBelowIdeal => {
                if distance < self.ideal_distance {
                    -s
                } else {
                    s
                }
            }
            ForwardPolicy::Planted => 0.0,
            ForwardPolicy::CloseIn { surge } => {
                if distance < self.ideal_distance {
                    0.0
                } else {
                    s * surge
                }
            }
            ForwardPolicy::HoldBand { retreat } => {
                if distance < self.min_distance {
                    -s * retreat
                } else if distance > self.max_distance {
                    s
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether `distance_sqr` lies inside the engagement range.
    pub fn in_range(&self, distance_sqr: f32) -> bool {
        distance_sqr <= self.max_distance * self.max_distance
    }
}
