//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only.

use hecs::World;

use sidearm_core::components::*;
use sidearm_core::enums::SimPhase;
use sidearm_core::events::CombatEvent;
use sidearm_core::state::*;
use sidearm_core::types::SimTime;

use sidearm_ai::controller::AttackControllerState;

use crate::armory::Armory;
use crate::world_setup::ControllerStatus;

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    armory: &Armory,
    time: &SimTime,
    phase: SimPhase,
    events: Vec<CombatEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        combatants: build_combatants(world, armory),
        events,
    }
}

/// Build CombatantView list, ordered by entity id.
fn build_combatants(world: &World, armory: &Armory) -> Vec<CombatantView> {
    let mut combatants: Vec<CombatantView> = world
        .query::<(
            &Combatant,
            &Hostility,
            &Loadout,
            Option<&AttackControllerState>,
            Option<&ControllerStatus>,
        )>()
        .iter()
        .map(|(_, (body, hostility, loadout, state, status))| CombatantView {
            id: body.id,
            alive: body.alive,
            position: body.position,
            view: body.view,
            aggressive: body.aggressive,
            target: hostility.target,
            controller: state.map(|state| ControllerView {
                phase: status.map(|status| status.phase).unwrap_or_default(),
                identity: state.identity(),
                see_time: state.see_time,
                attack_delay: state.attack_delay,
                dual_wielding: state.is_dual_wielding,
                main_ammo: loadout.main_hand.as_ref().map(|item| armory.ammo(item)),
                off_ammo: loadout.off_hand.as_ref().map(|item| armory.ammo(item)),
            }),
        })
        .collect();

    combatants.sort_by_key(|view| view.id);
    combatants
}
