//! Locomotion system.
//!
//! Applies the motion intents written by the controller: navigation goals
//! move the combatant towards its goal entity, relative inputs move it along
//! its view. Inputs last one tick; navigation lasts until arrival or stop.

use std::collections::HashMap;

use glam::Vec3;
use hecs::World;

use sidearm_core::components::{Combatant, MotionIntent};
use sidearm_core::constants::{INPUT_BLOCKS_PER_TICK, NAV_ARRIVAL_RADIUS, NAV_BLOCKS_PER_TICK};
use sidearm_core::types::EntityId;

/// Run locomotion for all entities with Combatant + MotionIntent.
pub fn run(world: &mut World) {
    let positions: HashMap<EntityId, Vec3> = world
        .query::<&Combatant>()
        .iter()
        .map(|(_, body)| (body.id, body.position))
        .collect();

    for (_entity, (body, intent)) in world.query_mut::<(&mut Combatant, &mut MotionIntent)>() {
        if !body.alive {
            intent.halt();
            continue;
        }

        if let Some((goal, speed)) = intent.navigation {
            match positions.get(&goal) {
                Some(goal_position) => {
                    let mut offset = *goal_position - body.position;
                    offset.y = 0.0;
                    let distance = offset.length();
                    if distance <= NAV_ARRIVAL_RADIUS {
                        intent.navigation = None;
                    } else {
                        let step = (NAV_BLOCKS_PER_TICK * speed).min(distance - NAV_ARRIVAL_RADIUS);
                        body.position += offset / distance * step;
                    }
                }
                None => intent.navigation = None,
            }
        }

        if intent.forward != 0.0 || intent.side != 0.0 {
            let forward = body.view.horizontal_forward();
            let right = Vec3::new(-forward.z, 0.0, forward.x);
            body.position += (forward * intent.forward + right * intent.side) * INPUT_BLOCKS_PER_TICK;
            intent.forward = 0.0;
            intent.side = 0.0;
        }
    }
}
