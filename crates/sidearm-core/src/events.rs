//! Events emitted by the simulation for audio, animation and test feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{Hand, WeaponIdentity};
use crate::types::{EntityId, FireRequest};

/// Observable combat event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A fire request was accepted by the dispatch.
    ShotFired { request: FireRequest },
    /// A fire request was refused; the swing still plays.
    ShotDropped { entity: EntityId, hand: Hand },
    /// Swing animation cue.
    Swing { entity: EntityId, hand: Hand },
    /// A reload started.
    ReloadStarted { entity: EntityId, hand: Hand },
    /// A reload finished and the magazine was refilled.
    ReloadFinished { entity: EntityId, hand: Hand },
    /// The controller switched strategies after a weapon change.
    StrategyChanged {
        entity: EntityId,
        identity: WeaponIdentity,
    },
}
