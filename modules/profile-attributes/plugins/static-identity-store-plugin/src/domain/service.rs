//! Service implementation for the static identity store plugin.

use std::collections::{BTreeSet, HashMap};

use parking_lot::RwLock;
use profile_attributes_sdk::{AttributeMap, IdentityRef};

use crate::config::StaticIdentityStoreConfig;

/// In-memory identity store.
pub struct Service {
    read_only: bool,
    identities: RwLock<HashMap<IdentityRef, AttributeMap>>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticIdentityStoreConfig) -> Self {
        let identities = cfg
            .users
            .iter()
            .map(|u| {
                let attributes = u
                    .attributes
                    .iter()
                    .map(|(name, values)| (name.clone(), values.iter().cloned().collect()))
                    .collect();
                (IdentityRef::new(&u.username, &u.realm), attributes)
            })
            .collect();

        Self {
            read_only: cfg.read_only,
            identities: RwLock::new(identities),
        }
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Locate an identity. Returns `None` for unknown users.
    #[must_use]
    pub fn find(&self, username: &str, realm: &str) -> Option<IdentityRef> {
        let identity = IdentityRef::new(username, realm);
        self.identities
            .read()
            .contains_key(&identity)
            .then_some(identity)
    }

    /// Stored values for the requested names that have any.
    ///
    /// Returns `None` for unknown identities.
    #[must_use]
    pub fn attributes(
        &self,
        identity: &IdentityRef,
        names: &BTreeSet<String>,
    ) -> Option<AttributeMap> {
        let identities = self.identities.read();
        let stored = identities.get(identity)?;
        Some(
            stored
                .iter()
                .filter(|(name, values)| names.contains(*name) && !values.is_empty())
                .map(|(name, values)| (name.clone(), values.clone()))
                .collect(),
        )
    }

    /// Replace each given attribute. Returns `false` for unknown identities.
    pub fn replace(&self, identity: &IdentityRef, attributes: &AttributeMap) -> bool {
        let mut identities = self.identities.write();
        let Some(stored) = identities.get_mut(identity) else {
            return false;
        };
        for (name, values) in attributes {
            stored.insert(name.clone(), values.clone());
        }
        true
    }
}
