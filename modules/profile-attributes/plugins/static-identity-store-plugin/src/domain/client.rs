//! Client implementation for the static identity store plugin.
//!
//! Implements `IdentityStoreClient` using the domain service.

use std::collections::BTreeSet;

use async_trait::async_trait;
use profile_attributes_sdk::{AttributeMap, IdentityRef, IdentityStoreClient, IdentityStoreError};

use super::service::Service;

fn not_found(identity: &IdentityRef) -> IdentityStoreError {
    IdentityStoreError::NotFound(identity.to_string())
}

#[async_trait]
impl IdentityStoreClient for Service {
    async fn get_identity(
        &self,
        username: &str,
        realm: &str,
    ) -> Result<IdentityRef, IdentityStoreError> {
        self.find(username, realm)
            .ok_or_else(|| IdentityStoreError::NotFound(format!("{username} in realm {realm}")))
    }

    async fn get_attributes(
        &self,
        identity: &IdentityRef,
        names: &BTreeSet<String>,
    ) -> Result<AttributeMap, IdentityStoreError> {
        self.attributes(identity, names)
            .ok_or_else(|| not_found(identity))
    }

    async fn store_attributes(
        &self,
        identity: &IdentityRef,
        attributes: &AttributeMap,
    ) -> Result<(), IdentityStoreError> {
        if self.is_read_only() {
            tracing::warn!(identity = %identity, "Rejecting write to read-only identity store");
            return Err(IdentityStoreError::Unavailable(
                "identity store is read-only".to_owned(),
            ));
        }
        if self.replace(identity, attributes) {
            Ok(())
        } else {
            Err(not_found(identity))
        }
    }
}
