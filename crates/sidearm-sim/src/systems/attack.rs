//! Attack system: runs the attack controller for every controlled combatant.
//!
//! Entities are processed in ascending id order. Each one reads a frozen
//! view of the other bodies taken at the start of the system.

use std::collections::HashMap;

use glam::Vec3;
use hecs::{Entity, World};

use sidearm_core::components::*;
use sidearm_core::config::AttackConfig;
use sidearm_core::events::CombatEvent;
use sidearm_core::types::EntityId;

use sidearm_ai::capabilities::IdentityResolver;
use sidearm_ai::controller::{update, AttackControllerState, TargetInfo, TickContext};

use crate::armory::{Armory, ReloadBook};
use crate::host::{Pose, SimHost};
use crate::world_setup::{ControllerStatus, EntityRng};

/// Run the attack controller lifecycle for each controlled entity.
pub fn run<I: IdentityResolver + ?Sized>(
    world: &mut World,
    armory: &mut Armory,
    reloads: &mut ReloadBook,
    resolver: &I,
    config: &AttackConfig,
    events: &mut Vec<CombatEvent>,
) {
    let bodies: HashMap<EntityId, (bool, Vec3)> = world
        .query::<&Combatant>()
        .iter()
        .map(|(_, body)| (body.id, (body.alive, body.position)))
        .collect();

    // Collect inputs first to avoid borrow issues with hecs
    let mut inputs: Vec<(Entity, TickContext, Loadout, Pose)> = world
        .query::<(&Controlled, &Combatant, &Loadout, &Hostility, &MotionIntent, &SightBlocked)>()
        .iter()
        .map(|(entity, (_, body, loadout, hostility, motion, blocked))| {
            let target = hostility.target.and_then(|id| {
                bodies.get(&id).map(|&(alive, position)| TargetInfo { id, alive, position })
            });
            let ctx = TickContext {
                entity: body.id,
                alive: body.alive,
                position: body.position,
                view: body.view,
                main_hand: loadout.main_hand.clone(),
                off_hand: loadout.off_hand.clone(),
                target,
                line_of_sight: !blocked.0,
            };
            let pose = Pose {
                view: body.view,
                sprinting: body.sprinting,
                aggressive: body.aggressive,
                motion: *motion,
            };
            (entity, ctx, loadout.clone(), pose)
        })
        .collect();
    inputs.sort_by_key(|(_, ctx, _, _)| ctx.entity);

    for (entity, ctx, loadout, pose) in inputs {
        let (Ok(mut state), Ok(mut rng)) = (
            world.get::<&mut AttackControllerState>(entity),
            world.get::<&mut EntityRng>(entity),
        ) else {
            continue;
        };

        let mut host = SimHost::new(ctx.entity, ctx.position, loadout, pose, armory, reloads, events);
        let report = update(&mut state, &ctx, &mut host, resolver, &mut rng.0, config);
        let pose = host.into_pose();

        if report.strategy_changed {
            events.push(CombatEvent::StrategyChanged {
                entity: ctx.entity,
                identity: state.identity(),
            });
        }
        drop(state);
        drop(rng);

        if let Ok(mut body) = world.get::<&mut Combatant>(entity) {
            body.view = pose.view;
            body.sprinting = pose.sprinting;
            body.aggressive = pose.aggressive;
        }
        if let Ok(mut motion) = world.get::<&mut MotionIntent>(entity) {
            *motion = pose.motion;
        }
        if let Ok(mut status) = world.get::<&mut ControllerStatus>(entity) {
            status.phase = report.phase;
        }
    }
}
