//! Step service for the profile attributes step.

use std::sync::Arc;

use profile_attributes_sdk::models::{REALM, USERNAME};
use profile_attributes_sdk::{IdentityStoreClient, StepOutcome, TreeContext};
use tracing::{debug, error};

use super::error::DomainError;
use super::merger::{IdentityAttributesFetcher, build_attribute_map};
use crate::config::{PersistErrorPolicy, ProfileAttributesConfig};

/// Profile attributes step service.
///
/// Resolves the configured attributes for the authenticating user and
/// writes them to the identity store.
pub struct Service {
    config: ProfileAttributesConfig,
    store: Arc<dyn IdentityStoreClient>,
}

impl Service {
    #[must_use]
    pub fn new(config: ProfileAttributesConfig, store: Arc<dyn IdentityStoreClient>) -> Self {
        Self { config, store }
    }

    /// Run the step for one authentication attempt.
    ///
    /// A failed write is logged; the flow still advances unless the step is
    /// configured with [`PersistErrorPolicy::Abort`].
    ///
    /// # Errors
    ///
    /// - `MissingSharedState` if username or realm is absent from shared state
    /// - `IdentityLookup` if the identity store cannot locate the user
    /// - `StateLookup` if stored attributes cannot be read in additive mode
    /// - `Persist` if the write fails under the abort policy
    #[tracing::instrument(skip_all, fields(username, realm))]
    pub async fn process(&self, ctx: &TreeContext) -> Result<StepOutcome, DomainError> {
        let username = ctx
            .shared_string(USERNAME)
            .ok_or_else(|| DomainError::missing_shared_state(USERNAME))?;
        let realm = ctx
            .shared_string(REALM)
            .ok_or_else(|| DomainError::missing_shared_state(REALM))?;
        let span = tracing::Span::current();
        span.record("username", username);
        span.record("realm", realm);

        let identity = self
            .store
            .get_identity(username, realm)
            .await
            .map_err(DomainError::IdentityLookup)?;

        let fetcher = IdentityAttributesFetcher::new(self.store.as_ref(), &identity);
        let attributes = build_attribute_map(
            &ctx.shared_state,
            &ctx.transient_state,
            &self.config.properties,
            &self.config.transient_properties,
            self.config.add_attributes,
            &fetcher,
        )
        .await?;

        let names: Vec<&str> = attributes.keys().map(String::as_str).collect();
        match self.store.store_attributes(&identity, &attributes).await {
            Ok(()) => debug!(attributes = ?names, "Updated user attributes"),
            Err(e) => {
                error!(
                    username,
                    realm,
                    attributes = ?names,
                    error = %e,
                    "Unable to update user attributes"
                );
                if self.config.on_persist_error == PersistErrorPolicy::Abort {
                    return Err(DomainError::Persist(e));
                }
            }
        }

        Ok(StepOutcome::Next)
    }
}
