//! Weapon identity classification.
//!
//! Maps a held item to one of the recognized weapon families, degrading to
//! `Generic` whenever anything about the lookup fails.

use sidearm_core::constants::WEAPON_NAMESPACE;
use sidearm_core::enums::WeaponIdentity;
use sidearm_core::types::ItemHandle;

use crate::capabilities::IdentityResolver;

/// Classify an item. Empty hands, unresolved families and unknown tags are `Generic`.
pub fn classify<I: IdentityResolver + ?Sized>(item: Option<&ItemHandle>, resolver: &I) -> WeaponIdentity {
    item.and_then(|item| resolver.resolve_family(item))
        .map(|tag| WeaponIdentity::from_family_tag(&tag))
        .unwrap_or_default()
}

/// Resolver that reads the family from namespaced registry metadata.
///
/// Looks at `registry_id` first (`"cgs:revolver"`), then at the description
/// id (`"item.cgs.revolver"`). Items from other namespaces resolve to `None`.
#[derive(Debug, Clone)]
pub struct RegistryIdentityResolver {
    namespace: String,
}

impl Default for RegistryIdentityResolver {
    fn default() -> Self {
        Self::new(WEAPON_NAMESPACE)
    }
}

impl RegistryIdentityResolver {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    fn from_registry_id<'a>(&self, registry_id: &'a str) -> Option<&'a str> {
        let (namespace, path) = registry_id.split_once(':')?;
        (namespace == self.namespace && !path.is_empty()).then_some(path)
    }

    fn from_description_id<'a>(&self, description_id: &'a str) -> Option<&'a str> {
        let mut parts = description_id.split('.');
        let _kind = parts.next()?;
        if parts.next()? != self.namespace {
            return None;
        }
        parts.last().filter(|name| !name.is_empty())
    }
}

impl IdentityResolver for RegistryIdentityResolver {
    fn resolve_family(&self, item: &ItemHandle) -> Option<String> {
        let path = match item.registry_id.as_deref() {
            Some(registry_id) => self.from_registry_id(registry_id),
            None => self.from_description_id(&item.description_id),
        };
        path.map(str::to_owned)
    }
}
