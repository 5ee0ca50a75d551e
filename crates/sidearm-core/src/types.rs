//! Fundamental handle and geometry types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{FireMode, Hand};

/// Opaque id of a simulated entity, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Handle to an item held by an entity.
///
/// `instance` distinguishes individual item stacks; `registry_id` and
/// `description_id` are the metadata the identity resolver inspects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemHandle {
    pub instance: u64,
    /// Namespaced registry name, e.g. `"cgs:revolver"`. May be unavailable.
    pub registry_id: Option<String>,
    /// Translation key, e.g. `"item.cgs.revolver"`.
    pub description_id: String,
}

/// Equality token of a held weapon, used to detect weapon swaps.
///
/// Two handles of the same item kind yield equal tokens, so trading one
/// revolver for another does not rebuild the strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponToken(String);

/// Entity view direction in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    pub yaw: f32,
    pub pitch: f32,
}

/// Aim offset added to the view direction for one shot (degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AimOffset {
    pub yaw: f32,
    pub pitch: f32,
}

/// Fire request handed to the external dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireRequest {
    pub entity: EntityId,
    /// Final yaw including the offset.
    pub yaw: f32,
    /// Final pitch including the offset.
    pub pitch: f32,
    pub pitch_offset: f32,
    pub yaw_offset: f32,
    pub hand: Hand,
    pub mode: FireMode,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl ItemHandle {
    /// Item with a known registry name; the description id is derived from it.
    pub fn registered(instance: u64, registry_id: impl Into<String>) -> Self {
        let registry_id = registry_id.into();
        let description_id = format!("item.{}", registry_id.replace(':', "."));
        Self {
            instance,
            registry_id: Some(registry_id),
            description_id,
        }
    }

    /// Item whose registry name is unavailable; only the description id is known.
    pub fn unregistered(instance: u64, description_id: impl Into<String>) -> Self {
        Self {
            instance,
            registry_id: None,
            description_id: description_id.into(),
        }
    }

    /// Token identifying the kind of item this handle refers to.
    pub fn token(&self) -> WeaponToken {
        WeaponToken(
            self.registry_id
                .clone()
                .unwrap_or_else(|| self.description_id.clone()),
        )
    }
}

impl WeaponToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FireRequest {
    /// Build a primary-fire request from a view direction and an offset.
    pub fn aimed(entity: EntityId, view: ViewAngles, offset: AimOffset, hand: Hand) -> Self {
        Self {
            entity,
            yaw: view.yaw + offset.yaw,
            pitch: view.pitch + offset.pitch,
            pitch_offset: offset.pitch,
            yaw_offset: offset.yaw,
            hand,
            mode: FireMode::Primary,
        }
    }
}

impl ViewAngles {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// View angles that look from `from` towards `to`.
    /// Yaw 0 faces +Z, increasing clockwise seen from above; pitch is positive downward.
    pub fn looking_at(from: Vec3, to: Vec3) -> Self {
        let d = to - from;
        let horizontal = (d.x * d.x + d.z * d.z).sqrt();
        let yaw = (-d.x).atan2(d.z).to_degrees();
        let pitch = (-d.y).atan2(horizontal).to_degrees();
        Self { yaw, pitch }
    }

    /// Unit forward vector on the horizontal plane for this yaw.
    pub fn horizontal_forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(-yaw.sin(), 0.0, yaw.cos())
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
