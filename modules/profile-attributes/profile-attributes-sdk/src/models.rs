//! Domain models for the profile attributes module.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values of a single attribute. Duplicates collapse.
pub type AttributeValues = BTreeSet<String>;

/// Attribute write-set: attribute name to its values.
pub type AttributeMap = BTreeMap<String, AttributeValues>;

/// Shared state key holding the authenticating user's name.
pub const USERNAME: &str = "username";

/// Shared state key holding the realm the user authenticates in.
pub const REALM: &str = "realm";

/// A value held in an authentication state container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Scalar(String),
    List(Vec<String>),
}

impl StateValue {
    /// Convert into a value set. Lists collapse duplicates.
    #[must_use]
    pub fn into_values(self) -> AttributeValues {
        match self {
            Self::Scalar(s) => BTreeSet::from([s]),
            Self::List(items) => items.into_iter().collect(),
        }
    }

    /// Interpret a JSON node.
    ///
    /// Strings, numbers and booleans become scalars; arrays become lists of
    /// their scalar elements. `null` and objects have no attribute form.
    #[must_use]
    pub fn from_json(node: &Value) -> Option<Self> {
        match node {
            Value::Array(items) => Some(Self::List(items.iter().filter_map(scalar_text).collect())),
            other => scalar_text(other).map(Self::Scalar),
        }
    }
}

fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Read-only view over one layer of authentication state.
pub trait StateContainer {
    /// Look up the value stored under `key_path`.
    fn get(&self, key_path: &str) -> Option<StateValue>;

    /// Whether `key_path` holds a usable value.
    fn is_defined(&self, key_path: &str) -> bool {
        self.get(key_path).is_some()
    }
}

/// JSON state: the key path names a top-level member; a path starting with
/// `/` that is not itself a member is followed as a JSON Pointer.
impl StateContainer for Value {
    fn get(&self, key_path: &str) -> Option<StateValue> {
        let node = match Value::get(self, key_path) {
            Some(node) => node,
            None if key_path.starts_with('/') => self.pointer(key_path)?,
            None => return None,
        };
        let value = StateValue::from_json(node);
        if value.is_none() && !node.is_null() {
            tracing::warn!(key_path, "State entry has no attribute form, ignoring");
        }
        value
    }
}

impl StateContainer for BTreeMap<String, StateValue> {
    fn get(&self, key_path: &str) -> Option<StateValue> {
        BTreeMap::get(self, key_path).cloned()
    }
}

/// Authentication state handed to the step by the flow engine.
#[derive(Debug, Clone, Default)]
pub struct TreeContext {
    /// State carried across every step of the flow.
    pub shared_state: Value,
    /// State that lives only until the flow completes and is never persisted.
    pub transient_state: Value,
}

impl TreeContext {
    #[must_use]
    pub fn new(shared_state: Value, transient_state: Value) -> Self {
        Self {
            shared_state,
            transient_state,
        }
    }

    /// String entry from shared state.
    #[must_use]
    pub fn shared_string(&self, key: &str) -> Option<&str> {
        self.shared_state.get(key).and_then(Value::as_str)
    }
}

/// Reference to an identity located in the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityRef {
    pub username: String,
    pub realm: String,
}

impl IdentityRef {
    #[must_use]
    pub fn new(username: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            realm: realm.into(),
        }
    }
}

impl fmt::Display for IdentityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in realm {}", self.username, self.realm)
    }
}

/// Outcome of the step. The step has a single successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Next,
}
