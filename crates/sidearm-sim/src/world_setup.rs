//! Entity spawn factories and id mapping.
//!
//! Creates combatant entities with the component bundle the systems expect.
//! Entity ids handed to the controller are the hecs entity bits.

use glam::Vec3;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sidearm_core::components::*;
use sidearm_core::enums::AttackPhase;
use sidearm_core::types::EntityId;

use sidearm_ai::controller::AttackControllerState;

/// Entity-scoped random source. Seeded from the engine RNG at spawn.
#[derive(Debug, Clone)]
pub struct EntityRng(pub ChaCha8Rng);

/// Result of the controller's last tick, kept for snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerStatus {
    pub phase: AttackPhase,
}

pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Spawn a combatant. Controlled combatants also get the controller bundle.
pub fn spawn_combatant(world: &mut World, rng: &mut ChaCha8Rng, position: Vec3, controlled: bool) -> EntityId {
    let entity = world.spawn((
        Combatant::new(EntityId(0), position),
        Loadout::default(),
        Hostility::default(),
        MotionIntent::default(),
        SightBlocked(false),
    ));
    let id = entity_id(entity);
    if let Ok(mut body) = world.get::<&mut Combatant>(entity) {
        body.id = id;
    }

    if controlled {
        let seed: u64 = rng.gen();
        let _ = world.insert(
            entity,
            (
                Controlled,
                AttackControllerState::new(),
                ControllerStatus::default(),
                EntityRng(ChaCha8Rng::seed_from_u64(seed)),
            ),
        );
    }
    id
}
