//! Plugin API trait for identity store implementations.
//!
//! The identity store is the system of record for user profile attributes.
//! The step reads existing values through it (additive mode only) and hands
//! it the final write-set.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::IdentityStoreError;
use crate::models::{AttributeMap, IdentityRef};

/// Plugin API trait for identity stores.
#[async_trait]
pub trait IdentityStoreClient: Send + Sync {
    /// Locate the identity for `username` in `realm`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such identity exists
    /// - `Unavailable` if the store cannot be reached
    async fn get_identity(
        &self,
        username: &str,
        realm: &str,
    ) -> Result<IdentityRef, IdentityStoreError>;

    /// Read the stored values for exactly the given attribute names.
    ///
    /// Names with no stored value are omitted from the result.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the identity disappeared
    /// - `Unavailable` if the store cannot be reached
    async fn get_attributes(
        &self,
        identity: &IdentityRef,
        names: &BTreeSet<String>,
    ) -> Result<AttributeMap, IdentityStoreError>;

    /// Replace the stored values of every attribute in `attributes` and commit.
    ///
    /// Attributes not named in `attributes` are left untouched.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the identity disappeared
    /// - `Unavailable` if the store rejected the write
    async fn store_attributes(
        &self,
        identity: &IdentityRef,
        attributes: &AttributeMap,
    ) -> Result<(), IdentityStoreError>;
}
