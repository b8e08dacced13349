//! Local (in-process) client for the profile attributes step.

use std::sync::Arc;

use async_trait::async_trait;
use profile_attributes_sdk::{
    ProfileAttributesClient, ProfileAttributesError, StepOutcome, TreeContext,
};

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Handed to the flow engine as `Arc<dyn ProfileAttributesClient>`.
pub struct ProfileAttributesLocalClient {
    svc: Arc<Service>,
}

impl ProfileAttributesLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> ProfileAttributesError {
    tracing::error!(operation = op, error = ?e, "profile_attributes call failed");
    e.into()
}

#[async_trait]
impl ProfileAttributesClient for ProfileAttributesLocalClient {
    async fn process(&self, ctx: &TreeContext) -> Result<StepOutcome, ProfileAttributesError> {
        self.svc
            .process(ctx)
            .await
            .map_err(|e| log_and_convert("process", e))
    }
}
