//! Simulation engine: a headless host for the attack controller.
//!
//! `SimulationEngine` owns the hecs ECS world, processes host commands,
//! runs all systems, and produces `SimSnapshot`s. Same seed and same
//! commands give the same snapshot sequence.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sidearm_core::commands::{HostCommand, WeaponSpec};
use sidearm_core::components::*;
use sidearm_core::config::AttackConfig;
use sidearm_core::enums::{Hand, SimPhase};
use sidearm_core::error::ConfigError;
use sidearm_core::events::CombatEvent;
use sidearm_core::state::SimSnapshot;
use sidearm_core::types::{EntityId, SimTime};

use sidearm_ai::identity::RegistryIdentityResolver;

use crate::armory::{Armory, ReloadBook};
use crate::systems;
use crate::world_setup::{self, entity_of};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Tuning shared by every controlled combatant.
    pub attack: AttackConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            attack: AttackConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON document; the attack section is corrected, not rejected.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: SimConfig = serde_json::from_str(text)?;
        Ok(Self {
            attack: raw.attack.sanitized(),
            ..raw
        })
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    attack: AttackConfig,
    resolver: RegistryIdentityResolver,
    armory: Armory,
    reloads: ReloadBook,
    command_queue: VecDeque<HostCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            attack: config.attack.sanitized(),
            resolver: RegistryIdentityResolver::default(),
            armory: Armory::new(),
            reloads: ReloadBook::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue a command received as JSON.
    pub fn queue_command_json(&mut self, text: &str) -> Result<(), serde_json::Error> {
        let command: HostCommand = serde_json::from_str(text)?;
        self.queue_command(command);
        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.armory, &self.time, self.phase, events)
    }

    /// Spawn a combatant immediately and return its id.
    pub fn spawn_combatant(&mut self, position: Vec3, controlled: bool) -> EntityId {
        world_setup::spawn_combatant(&mut self.world, &mut self.rng, position, controlled)
    }

    /// Get the current simulation phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The sanitized attack configuration in use.
    pub fn attack_config(&self) -> &AttackConfig {
        &self.attack
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    pub fn reloads(&self) -> &ReloadBook {
        &self.reloads
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::StartMission => {
                if self.phase == SimPhase::Setup {
                    info!(combatants = self.world.len(), "mission started");
                    self.phase = SimPhase::Active;
                    self.time = SimTime::default();
                }
            }
            HostCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.phase = SimPhase::Paused;
                }
            }
            HostCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Active;
                }
            }
            HostCommand::SpawnCombatant {
                position,
                controlled,
            } => {
                self.spawn_combatant(position, controlled);
            }
            HostCommand::Equip {
                entity,
                hand,
                weapon,
            } => self.equip(entity, hand, weapon),
            HostCommand::SetTarget { entity, target } => {
                match self.live_entity(entity) {
                    Some(handle) => {
                        if let Ok(mut hostility) = self.world.get::<&mut Hostility>(handle) {
                            hostility.target = target;
                        }
                    }
                    None => warn!(entity = entity.0, "SetTarget for unknown entity"),
                }
            }
            HostCommand::SetSightBlocked { entity, blocked } => {
                match self.live_entity(entity) {
                    Some(handle) => {
                        if let Ok(mut sight) = self.world.get::<&mut SightBlocked>(handle) {
                            sight.0 = blocked;
                        }
                    }
                    None => warn!(entity = entity.0, "SetSightBlocked for unknown entity"),
                }
            }
            HostCommand::Kill { entity } => match self.live_entity(entity) {
                Some(handle) => {
                    if let Ok(mut body) = self.world.get::<&mut Combatant>(handle) {
                        body.alive = false;
                    }
                    self.reloads.cancel(entity);
                }
                None => warn!(entity = entity.0, "Kill for unknown entity"),
            },
            HostCommand::Despawn { entity } => match self.live_entity(entity) {
                Some(handle) => self.despawn_buffer.push(handle),
                None => warn!(entity = entity.0, "Despawn for unknown entity"),
            },
        }
    }

    fn live_entity(&self, id: EntityId) -> Option<hecs::Entity> {
        entity_of(id).filter(|&handle| self.world.contains(handle))
    }

    /// Replace the item in one hand. The old instance is retired.
    fn equip(&mut self, entity: EntityId, hand: Hand, weapon: Option<WeaponSpec>) {
        let Some(handle) = self.live_entity(entity) else {
            warn!(entity = entity.0, "Equip for unknown entity");
            return;
        };
        let Ok(mut loadout) = self.world.get::<&mut Loadout>(handle) else {
            return;
        };
        if let Some(old) = loadout.in_hand(hand) {
            self.armory.retire(old);
        }
        let item = weapon.map(|spec| self.armory.issue(spec));
        loadout.set(hand, item);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Attack controller (movement intents, fire requests, reload starts)
        systems::attack::run(
            &mut self.world,
            &mut self.armory,
            &mut self.reloads,
            &self.resolver,
            &self.attack,
            &mut self.events,
        );
        // 2. Reload countdown and refill
        systems::reload::run(&self.world, &mut self.armory, &mut self.reloads, &mut self.events);
        // 3. Locomotion
        systems::movement::run(&mut self.world);
        // 4. Cleanup (despawns, dangling targets)
        systems::cleanup::run(
            &mut self.world,
            &mut self.armory,
            &mut self.reloads,
            &mut self.despawn_buffer,
        );
    }
}
