//! Error types for the profile attributes module.

use thiserror::Error;

/// Errors returned by the profile attributes step.
#[derive(Debug, Error)]
pub enum ProfileAttributesError {
    /// Existing attributes could not be read from the identity store.
    #[error("unable to retrieve attributes for keys: {0}")]
    StateLookup(String),

    /// A required shared state entry is missing or not a string.
    #[error("shared state entry '{key}' is missing")]
    MissingSharedState { key: String },

    /// The identity store does not know the user.
    #[error("identity not found: {0}")]
    IdentityNotFound(String),

    /// Writing the attributes failed and the step is configured to abort.
    #[error("unable to persist attributes: {0}")]
    Persist(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors reported by identity store plugins.
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    /// The identity does not exist.
    #[error("identity not found: {0}")]
    NotFound(String),

    /// The store could not be reached or refused the operation.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
