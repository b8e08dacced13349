//! Domain errors for the profile attributes step.

use profile_attributes_sdk::{IdentityStoreError, ProfileAttributesError};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("unable to retrieve attributes for keys {keys:?}: {source}")]
    StateLookup {
        keys: Vec<String>,
        #[source]
        source: IdentityStoreError,
    },

    #[error("shared state entry '{key}' is missing or not a string")]
    MissingSharedState { key: String },

    #[error("identity lookup failed: {0}")]
    IdentityLookup(#[source] IdentityStoreError),

    #[error("unable to persist attributes: {0}")]
    Persist(#[source] IdentityStoreError),
}

impl DomainError {
    pub fn missing_shared_state(key: impl Into<String>) -> Self {
        Self::MissingSharedState { key: key.into() }
    }
}

impl From<DomainError> for ProfileAttributesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::StateLookup { keys, .. } => Self::StateLookup(keys.join(", ")),
            DomainError::MissingSharedState { key } => Self::MissingSharedState { key },
            DomainError::IdentityLookup(IdentityStoreError::NotFound(msg)) => {
                Self::IdentityNotFound(msg)
            }
            DomainError::IdentityLookup(e) => Self::Internal(e.to_string()),
            DomainError::Persist(e) => Self::Persist(e.to_string()),
        }
    }
}
