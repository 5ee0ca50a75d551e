//! Weapon to strategy selection.

use sidearm_core::types::ItemHandle;

use crate::capabilities::IdentityResolver;
use crate::identity::classify;
use crate::strategy::WeaponStrategy;

/// Build a fresh strategy for the held item. Empty or unrecognized ⇒ Generic.
pub fn select<I: IdentityResolver + ?Sized>(item: Option<&ItemHandle>, resolver: &I) -> WeaponStrategy {
    WeaponStrategy::new(classify(item, resolver))
}
