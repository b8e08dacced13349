//! Profile Attributes Step
//!
//! An authentication-flow step that resolves a configured attribute mapping
//! against the shared and transient authentication state and writes the
//! result to the user's identity record.
//!
//! Provides the `ProfileAttributesClient` implementation consumed by the
//! flow engine.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{PersistErrorPolicy, ProfileAttributesConfig};
pub use domain::{ProfileAttributesLocalClient, Service};
