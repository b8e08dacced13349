//! Profile Attributes SDK
//!
//! This crate provides the public API for the `profile_attributes` module:
//!
//! - [`ProfileAttributesClient`] - Public API trait for the flow engine
//! - [`IdentityStoreClient`] - Plugin API trait for identity store implementations
//! - [`StateContainer`] / [`StateValue`] - Read-only views over authentication state
//! - [`TreeContext`] - Authentication state handed to the step
//! - [`ProfileAttributesError`] / [`IdentityStoreError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use profile_attributes_sdk::{ProfileAttributesClient, StepOutcome, TreeContext};
//!
//! let ctx = TreeContext::new(
//!     json!({ "username": "demo", "realm": "/alpha", "uiLabel": "Demo" }),
//!     json!({}),
//! );
//! let outcome = client.process(&ctx).await?;
//! assert_eq!(outcome, StepOutcome::Next);
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::ProfileAttributesClient;
pub use error::{IdentityStoreError, ProfileAttributesError};
pub use models::{
    AttributeMap, AttributeValues, IdentityRef, StateContainer, StateValue, StepOutcome,
    TreeContext,
};
pub use plugin_api::IdentityStoreClient;
