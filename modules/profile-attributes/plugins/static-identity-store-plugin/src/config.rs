//! Configuration for the static identity store plugin.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticIdentityStoreConfig {
    /// Reject every write with `Unavailable`.
    pub read_only: bool,

    /// Identities known to the store.
    pub users: Vec<UserConfig>,
}

/// A seeded identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub username: String,
    pub realm: String,
    /// Initial profile attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}
