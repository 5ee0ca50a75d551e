//! Enumeration types used throughout the combat AI.

use serde::{Deserialize, Serialize};

/// Weapon family recognized by the identity classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponIdentity {
    /// Single-shot muzzle loader.
    Flintlock,
    /// Six-shooter pistol.
    Revolver,
    /// Two-barrel close range spread gun.
    Shotgun,
    /// Rapid low-damage nail launcher.
    Nailgun,
    /// Crank-driven sustained-fire gun.
    Gatling,
    /// Short-range flame projector.
    Blazegun,
    /// Long-range explosive launcher.
    Launcher,
    /// Melee hammer.
    Hammer,
    /// Thrown fragmentation grenade.
    Grenade,
    /// Unrecognized or unresolvable weapon.
    #[default]
    Generic,
}

impl WeaponIdentity {
    /// Map a resolved family tag (registry path) to an identity.
    /// Unknown tags map to `Generic`.
    pub fn from_family_tag(tag: &str) -> Self {
        match tag {
            "flintlock" => Self::Flintlock,
            "revolver" => Self::Revolver,
            "shotgun" => Self::Shotgun,
            "nailgun" => Self::Nailgun,
            "gatling" => Self::Gatling,
            "blazegun" => Self::Blazegun,
            "launcher" => Self::Launcher,
            "hammer" => Self::Hammer,
            "frag_grenade" => Self::Grenade,
            _ => Self::Generic,
        }
    }

    /// The registry path this identity is recognized by, if any.
    pub fn family_tag(self) -> Option<&'static str> {
        match self {
            Self::Flintlock => Some("flintlock"),
            Self::Revolver => Some("revolver"),
            Self::Shotgun => Some("shotgun"),
            Self::Nailgun => Some("nailgun"),
            Self::Gatling => Some("gatling"),
            Self::Blazegun => Some("blazegun"),
            Self::Launcher => Some("launcher"),
            Self::Hammer => Some("hammer"),
            Self::Grenade => Some("frag_grenade"),
            Self::Generic => None,
        }
    }

    /// All identities, recognized families first.
    pub const fn all() -> [Self; 10] {
        [
            Self::Flintlock,
            Self::Revolver,
            Self::Shotgun,
            Self::Nailgun,
            Self::Gatling,
            Self::Blazegun,
            Self::Launcher,
            Self::Hammer,
            Self::Grenade,
            Self::Generic,
        ]
    }
}

/// Which hand holds (or fires) a weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    #[default]
    Main,
    Off,
}

/// Fire mode attached to a fire request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Primary,
    Secondary,
}

/// Behaviorally distinct phase of the attack controller on a given tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// No valid target or no weapon held; nothing ran.
    #[default]
    Inactive,
    /// Target and weapon present, but out of range or not seen long enough.
    Repositioning,
    /// Active hand is empty or a reload is in progress; firing blocked.
    Reloading,
    /// In range with sustained sight; fired or waiting out the cooldown.
    Engaging,
}

/// Host simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Nothing spawned yet.
    #[default]
    Setup,
    /// Ticking.
    Active,
    /// Frozen; commands still processed.
    Paused,
}
