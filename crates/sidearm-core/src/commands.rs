//! Commands sent from a host driver to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::Hand;
use crate::types::EntityId;

/// Static description of a weapon instance to put into a hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Namespaced registry name, e.g. `"cgs:gatling"`.
    pub registry_id: String,
    /// Magazine size. Zero marks an item that is not a weapon.
    pub capacity: u32,
    /// Whether the weapon can be wielded in one hand.
    pub one_handed: bool,
    /// Fire-rate metadata in ticks, if the weapon exposes one.
    pub fire_rate: Option<u32>,
    /// Reload duration in ticks.
    pub reload_ticks: u32,
}

/// All possible host actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Start ticking.
    StartMission,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Spawn a combatant. Controlled combatants run the attack controller.
    SpawnCombatant { position: Vec3, controlled: bool },
    /// Put a weapon into a hand, or empty the hand with `None`.
    Equip {
        entity: EntityId,
        hand: Hand,
        weapon: Option<WeaponSpec>,
    },
    /// Point a controlled entity at a target, or clear it.
    SetTarget {
        entity: EntityId,
        target: Option<EntityId>,
    },
    /// Force the line-of-sight query of an observer to fail (or restore it).
    SetSightBlocked { entity: EntityId, blocked: bool },
    /// Kill an entity without removing it.
    Kill { entity: EntityId },
    /// Remove an entity from the world.
    Despawn { entity: EntityId },
}

impl WeaponSpec {
    pub fn new(registry_id: impl Into<String>, capacity: u32, one_handed: bool) -> Self {
        Self {
            registry_id: registry_id.into(),
            capacity,
            one_handed,
            fire_rate: None,
            reload_ticks: crate::constants::DEFAULT_RELOAD_TICKS,
        }
    }

    pub fn with_fire_rate(mut self, rate: u32) -> Self {
        self.fire_rate = Some(rate);
        self
    }

    pub fn with_reload_ticks(mut self, ticks: u32) -> Self {
        self.reload_ticks = ticks;
        self
    }
}
