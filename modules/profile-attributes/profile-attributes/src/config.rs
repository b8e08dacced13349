//! Configuration for the profile attributes step.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Step configuration.
///
/// ```yaml
/// properties:
///   mail: "\"fixed@example.com\""
///   nickname: uiLabel
/// transient_properties:
///   roles: roleList
/// add_attributes: false
/// on_persist_error: continue
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileAttributesConfig {
    /// Profile attribute name to value expression, resolved against shared state.
    ///
    /// An expression wrapped in double quotes is a literal; anything else
    /// names a shared state entry.
    pub properties: BTreeMap<String, String>,

    /// Profile attribute name to value expression, resolved against transient
    /// state. Entries here win over `properties` entries with the same name.
    pub transient_properties: BTreeMap<String, String>,

    /// Union resolved values with the values already stored for the same
    /// attributes instead of replacing them.
    pub add_attributes: bool,

    /// What to do when the identity store rejects the write.
    pub on_persist_error: PersistErrorPolicy,
}

/// Handling of identity store write failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistErrorPolicy {
    /// Log the failure and let the flow advance.
    #[default]
    Continue,
    /// Fail the step.
    Abort,
}
