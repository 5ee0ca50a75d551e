//! Simulation snapshot: the visible state produced after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{EntityId, SimTime, ViewAngles};

/// Complete state of the host simulation after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// Combatants ordered by entity id.
    pub combatants: Vec<CombatantView>,
    pub events: Vec<CombatEvent>,
}

/// One combatant as seen from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: EntityId,
    pub alive: bool,
    pub position: Vec3,
    pub view: ViewAngles,
    pub aggressive: bool,
    pub target: Option<EntityId>,
    /// Present for controlled combatants.
    pub controller: Option<ControllerView>,
}

/// Attack controller state exposed for debugging and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerView {
    pub phase: AttackPhase,
    pub identity: WeaponIdentity,
    pub see_time: i32,
    pub attack_delay: i32,
    pub dual_wielding: bool,
    pub main_ammo: Option<u32>,
    pub off_ammo: Option<u32>,
}
