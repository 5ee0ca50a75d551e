//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Decisions live in the controller, not here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::Hand;
use crate::types::{EntityId, ItemHandle, ViewAngles};

/// A living body in the world that can be targeted or controlled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub alive: bool,
    pub position: Vec3,
    pub view: ViewAngles,
    pub sprinting: bool,
    /// Externally visible "aggressive" pose flag.
    pub aggressive: bool,
}

/// Items in the two hands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub main_hand: Option<ItemHandle>,
    pub off_hand: Option<ItemHandle>,
}

/// Current attack target of a controlled entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hostility {
    pub target: Option<EntityId>,
}

/// Marks an entity as driven by the attack controller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Controlled;

/// Movement requested by the controller, consumed by the movement system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MotionIntent {
    /// Forward input (positive advances along the view direction).
    pub forward: f32,
    /// Lateral input (positive strafes right).
    pub side: f32,
    /// Active navigation goal and speed modifier.
    pub navigation: Option<(EntityId, f32)>,
}

/// Host-side override of the line-of-sight query for one observer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SightBlocked(pub bool);

impl Combatant {
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            alive: true,
            position,
            view: ViewAngles::default(),
            sprinting: false,
            aggressive: false,
        }
    }
}

impl Loadout {
    pub fn in_hand(&self, hand: Hand) -> Option<&ItemHandle> {
        match hand {
            Hand::Main => self.main_hand.as_ref(),
            Hand::Off => self.off_hand.as_ref(),
        }
    }

    pub fn set(&mut self, hand: Hand, item: Option<ItemHandle>) {
        match hand {
            Hand::Main => self.main_hand = item,
            Hand::Off => self.off_hand = item,
        }
    }
}

impl MotionIntent {
    pub fn halt(&mut self) {
        self.forward = 0.0;
        self.side = 0.0;
        self.navigation = None;
    }
}
