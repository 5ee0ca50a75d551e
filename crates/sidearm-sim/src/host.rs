//! Capability implementations backing the controller inside the simulation.
//!
//! A `SimHost` is built per controlled entity per tick. Pose and motion
//! changes land in its [`Pose`] and are written back to the world by the
//! attack system; weapon, reload and fire calls go straight to the armory,
//! the reload book and the event buffer.

use glam::Vec3;
use tracing::trace;

use sidearm_core::components::{Loadout, MotionIntent};
use sidearm_core::enums::Hand;
use sidearm_core::error::DispatchError;
use sidearm_core::events::CombatEvent;
use sidearm_core::types::{EntityId, FireRequest, ItemHandle, ViewAngles};

use sidearm_ai::capabilities::{FireDispatch, Navigation, ReloadTracker, WeaponSystem};

use crate::armory::{Armory, ReloadBook};

/// Pose and motion of the entity being ticked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pose {
    pub view: ViewAngles,
    pub sprinting: bool,
    pub aggressive: bool,
    pub motion: MotionIntent,
}

pub struct SimHost<'a> {
    entity: EntityId,
    position: Vec3,
    loadout: Loadout,
    pose: Pose,
    armory: &'a mut Armory,
    reloads: &'a mut ReloadBook,
    events: &'a mut Vec<CombatEvent>,
}

impl<'a> SimHost<'a> {
    pub fn new(
        entity: EntityId,
        position: Vec3,
        loadout: Loadout,
        pose: Pose,
        armory: &'a mut Armory,
        reloads: &'a mut ReloadBook,
        events: &'a mut Vec<CombatEvent>,
    ) -> Self {
        Self {
            entity,
            position,
            loadout,
            pose,
            armory,
            reloads,
            events,
        }
    }

    pub fn into_pose(self) -> Pose {
        self.pose
    }

    fn held(&self, hand: Hand) -> Option<&ItemHandle> {
        self.loadout.in_hand(hand)
    }
}

/// Rotate `current` towards `desired`, at most `max_yaw`/`max_pitch` degrees.
pub fn turn_towards(current: ViewAngles, desired: ViewAngles, max_yaw: f32, max_pitch: f32) -> ViewAngles {
    let yaw_delta = wrap_degrees(desired.yaw - current.yaw).clamp(-max_yaw, max_yaw);
    let pitch_delta = (desired.pitch - current.pitch).clamp(-max_pitch, max_pitch);
    ViewAngles::new(
        wrap_degrees(current.yaw + yaw_delta),
        (current.pitch + pitch_delta).clamp(-90.0, 90.0),
    )
}

/// Wrap an angle into [-180, 180).
fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

impl WeaponSystem for SimHost<'_> {
    fn is_weapon(&self, item: &ItemHandle) -> bool {
        self.armory.is_weapon(item)
    }

    fn has_ammo(&self, item: &ItemHandle) -> bool {
        self.armory.ammo(item) > 0
    }

    fn ammo_count(&self, item: &ItemHandle) -> u32 {
        self.armory.ammo(item)
    }

    fn is_one_handed(&self, item: &ItemHandle) -> bool {
        self.armory
            .get(item)
            .is_some_and(|armament| armament.spec.one_handed)
    }

    fn fire_rate(&self, item: &ItemHandle) -> Option<u32> {
        self.armory.get(item).and_then(|armament| armament.spec.fire_rate)
    }
}

impl ReloadTracker for SimHost<'_> {
    fn is_reloading(&self, entity: EntityId) -> bool {
        self.reloads.is_reloading(entity)
    }

    fn start_reload(&mut self, entity: EntityId, hand: Hand) {
        let Some(armament) = self.held(hand).and_then(|item| self.armory.get(item)) else {
            return;
        };
        let ticks = armament.spec.reload_ticks;
        if self.reloads.start(entity, hand, ticks) {
            self.events.push(CombatEvent::ReloadStarted { entity, hand });
        }
    }
}

impl FireDispatch for SimHost<'_> {
    fn request_fire(&mut self, request: &FireRequest) -> Result<(), DispatchError> {
        if request.entity != self.entity {
            return Err(DispatchError::UnknownEntity(request.entity.0));
        }
        let result = match self.loadout.in_hand(request.hand) {
            Some(item) => self.armory.consume_round(item),
            None => Err(DispatchError::NoAmmo),
        };
        match &result {
            Ok(()) => {
                trace!(entity = request.entity.0, hand = ?request.hand, "shot fired");
                self.events.push(CombatEvent::ShotFired { request: *request });
            }
            Err(_) => self.events.push(CombatEvent::ShotDropped {
                entity: request.entity,
                hand: request.hand,
            }),
        }
        result
    }

    fn swing(&mut self, entity: EntityId, hand: Hand) {
        self.events.push(CombatEvent::Swing { entity, hand });
    }
}

impl Navigation for SimHost<'_> {
    fn stop_navigation(&mut self, _entity: EntityId) {
        self.pose.motion.navigation = None;
    }

    fn navigate_to(&mut self, _entity: EntityId, target: EntityId, speed: f32) {
        self.pose.motion.navigation = Some((target, speed));
    }

    fn is_navigation_idle(&self, _entity: EntityId) -> bool {
        self.pose.motion.navigation.is_none()
    }

    fn set_movement_input(&mut self, _entity: EntityId, forward: f32, side: f32) {
        self.pose.motion.forward = forward;
        self.pose.motion.side = side;
    }

    fn look_at(&mut self, _entity: EntityId, target: Vec3, max_yaw: f32, max_pitch: f32) {
        let desired = ViewAngles::looking_at(self.position, target);
        self.pose.view = turn_towards(self.pose.view, desired, max_yaw, max_pitch);
    }

    fn set_sprinting(&mut self, _entity: EntityId, sprinting: bool) {
        self.pose.sprinting = sprinting;
    }

    fn set_aggressive(&mut self, _entity: EntityId, aggressive: bool) {
        self.pose.aggressive = aggressive;
    }
}
