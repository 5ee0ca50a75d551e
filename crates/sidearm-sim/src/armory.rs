//! Weapon instances and reload bookkeeping owned by the simulation.
//!
//! The controller never touches these directly; it reads and requests
//! changes through the host capability traits.

use std::collections::{BTreeMap, HashMap};

use sidearm_core::commands::WeaponSpec;
use sidearm_core::enums::Hand;
use sidearm_core::error::DispatchError;
use sidearm_core::types::{EntityId, ItemHandle};

/// One issued weapon and its magazine.
#[derive(Debug, Clone, PartialEq)]
pub struct Armament {
    pub spec: WeaponSpec,
    pub ammo: u32,
}

/// Every weapon instance currently held by some combatant.
#[derive(Debug, Default)]
pub struct Armory {
    items: HashMap<u64, Armament>,
    next_instance: u64,
}

impl Armory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new instance with a full magazine.
    pub fn issue(&mut self, spec: WeaponSpec) -> ItemHandle {
        self.next_instance += 1;
        let item = ItemHandle::registered(self.next_instance, spec.registry_id.clone());
        let ammo = spec.capacity;
        self.items.insert(item.instance, Armament { spec, ammo });
        item
    }

    pub fn retire(&mut self, item: &ItemHandle) {
        self.items.remove(&item.instance);
    }

    pub fn get(&self, item: &ItemHandle) -> Option<&Armament> {
        self.items.get(&item.instance)
    }

    /// Items with no magazine are held but are not weapons.
    pub fn is_weapon(&self, item: &ItemHandle) -> bool {
        self.get(item).is_some_and(|armament| armament.spec.capacity > 0)
    }

    pub fn ammo(&self, item: &ItemHandle) -> u32 {
        self.get(item).map_or(0, |armament| armament.ammo)
    }

    pub fn consume_round(&mut self, item: &ItemHandle) -> Result<(), DispatchError> {
        let armament = self
            .items
            .get_mut(&item.instance)
            .ok_or(DispatchError::NoAmmo)?;
        if armament.ammo == 0 {
            return Err(DispatchError::NoAmmo);
        }
        armament.ammo -= 1;
        Ok(())
    }

    pub fn refill(&mut self, item: &ItemHandle) {
        if let Some(armament) = self.items.get_mut(&item.instance) {
            armament.ammo = armament.spec.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An in-flight reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReload {
    pub hand: Hand,
    pub remaining_ticks: u32,
}

/// At most one reload per entity, ordered by entity id.
#[derive(Debug, Default)]
pub struct ReloadBook {
    pending: BTreeMap<EntityId, PendingReload>,
}

impl ReloadBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_reloading(&self, entity: EntityId) -> bool {
        self.pending.contains_key(&entity)
    }

    pub fn get(&self, entity: EntityId) -> Option<&PendingReload> {
        self.pending.get(&entity)
    }

    /// Returns false if the entity is already reloading.
    pub fn start(&mut self, entity: EntityId, hand: Hand, ticks: u32) -> bool {
        if self.is_reloading(entity) {
            return false;
        }
        self.pending.insert(
            entity,
            PendingReload {
                hand,
                remaining_ticks: ticks.max(1),
            },
        );
        true
    }

    pub fn cancel(&mut self, entity: EntityId) {
        self.pending.remove(&entity);
    }

    /// Count every reload down by one tick and return those that finished.
    pub fn advance(&mut self) -> Vec<(EntityId, Hand)> {
        let mut finished = Vec::new();
        for (entity, reload) in self.pending.iter_mut() {
            reload.remaining_ticks = reload.remaining_ticks.saturating_sub(1);
            if reload.remaining_ticks == 0 {
                finished.push((*entity, reload.hand));
            }
        }
        for (entity, _) in &finished {
            self.pending.remove(entity);
        }
        finished
    }
}
