//! Cleanup system: removes despawned entities and dangling references to them.

use hecs::{Entity, World};

use sidearm_core::components::{Hostility, Loadout};

use crate::armory::{Armory, ReloadBook};
use crate::world_setup::{entity_id, entity_of};

/// Despawn the entities collected in `despawn_buffer`, retire their items and
/// reloads, then clear targets that no longer exist.
pub fn run(world: &mut World, armory: &mut Armory, reloads: &mut ReloadBook, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        if let Ok(loadout) = world.get::<&Loadout>(entity) {
            for item in [loadout.main_hand.as_ref(), loadout.off_hand.as_ref()].into_iter().flatten() {
                armory.retire(item);
            }
        }
        reloads.cancel(entity_id(entity));
        let _ = world.despawn(entity);
    }

    let mut dangling = Vec::new();
    for (entity, hostility) in world.query::<&Hostility>().iter() {
        if let Some(target) = hostility.target {
            if !entity_of(target).is_some_and(|handle| world.contains(handle)) {
                dangling.push(entity);
            }
        }
    }
    for entity in dangling {
        if let Ok(mut hostility) = world.get::<&mut Hostility>(entity) {
            hostility.target = None;
        }
    }
}
