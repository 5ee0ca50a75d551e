//! Reload system: counts reloads down and refills magazines when done.

use hecs::World;
use tracing::debug;

use sidearm_core::components::Loadout;
use sidearm_core::events::CombatEvent;

use crate::armory::{Armory, ReloadBook};
use crate::world_setup::entity_of;

/// Advance every pending reload by one tick.
pub fn run(world: &World, armory: &mut Armory, reloads: &mut ReloadBook, events: &mut Vec<CombatEvent>) {
    for (entity, hand) in reloads.advance() {
        let Some(handle) = entity_of(entity) else {
            continue;
        };
        let Ok(loadout) = world.get::<&Loadout>(handle) else {
            continue;
        };
        // The weapon may have been swapped out mid-reload.
        if let Some(item) = loadout.in_hand(hand) {
            armory.refill(item);
            debug!(entity = entity.0, ?hand, ammo = armory.ammo(item), "reload finished");
            events.push(CombatEvent::ReloadFinished { entity, hand });
        }
    }
}
