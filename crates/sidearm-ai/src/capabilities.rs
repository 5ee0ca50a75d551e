//! Capabilities the controller consumes from its host.
//!
//! Every call happens on the simulation thread during a tick. The controller
//! only reads weapon and reload state and requests mutations through these
//! traits; it never touches ammunition directly.

use glam::Vec3;

use sidearm_core::enums::Hand;
use sidearm_core::error::DispatchError;
use sidearm_core::types::{EntityId, FireRequest, ItemHandle};

/// Weapon subsystem queries.
pub trait WeaponSystem {
    fn is_weapon(&self, item: &ItemHandle) -> bool;
    fn has_ammo(&self, item: &ItemHandle) -> bool;
    fn ammo_count(&self, item: &ItemHandle) -> u32;
    fn is_one_handed(&self, item: &ItemHandle) -> bool;
    /// Fire-rate metadata in ticks, if the weapon exposes one.
    fn fire_rate(&self, item: &ItemHandle) -> Option<u32>;
}

/// Per-entity reload bookkeeping. One reload at a time per entity.
pub trait ReloadTracker {
    fn is_reloading(&self, entity: EntityId) -> bool;
    fn start_reload(&mut self, entity: EntityId, hand: Hand);
}

/// Fire-and-forget shot dispatch.
pub trait FireDispatch {
    fn request_fire(&mut self, request: &FireRequest) -> Result<(), DispatchError>;
    /// Swing/animation cue for the given hand.
    fn swing(&mut self, entity: EntityId, hand: Hand);
}

/// Navigation, look and pose control of the controlled entity.
pub trait Navigation {
    fn stop_navigation(&mut self, entity: EntityId);
    fn navigate_to(&mut self, entity: EntityId, target: EntityId, speed: f32);
    fn is_navigation_idle(&self, entity: EntityId) -> bool;
    /// Relative movement input: `forward` along the view, `side` to the right.
    fn set_movement_input(&mut self, entity: EntityId, forward: f32, side: f32);
    fn look_at(&mut self, entity: EntityId, target: Vec3, max_yaw: f32, max_pitch: f32);
    fn set_sprinting(&mut self, entity: EntityId, sprinting: bool);
    fn set_aggressive(&mut self, entity: EntityId, aggressive: bool);
}

/// Registry metadata lookup of an item's weapon family.
///
/// Must not panic; any lookup failure is reported as `None`.
pub trait IdentityResolver {
    fn resolve_family(&self, item: &ItemHandle) -> Option<String>;
}

/// Everything the controller needs from a host except identity resolution.
pub trait CombatHost: WeaponSystem + ReloadTracker + FireDispatch + Navigation {}

impl<T> CombatHost for T where T: WeaponSystem + ReloadTracker + FireDispatch + Navigation {}
