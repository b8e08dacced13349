//! Public API trait for the profile attributes step.
//!
//! The authentication-flow engine calls this trait when a user's
//! authentication attempt reaches the step.

use async_trait::async_trait;

use crate::error::ProfileAttributesError;
use crate::models::{StepOutcome, TreeContext};

/// Public API trait for the profile attributes step.
///
/// ```ignore
/// let outcome = step.process(&ctx).await?;
/// ```
#[async_trait]
pub trait ProfileAttributesClient: Send + Sync {
    /// Resolve the configured attributes against the authentication state and
    /// persist them to the user's identity record.
    ///
    /// # Errors
    ///
    /// - `MissingSharedState` if the username or realm is not in shared state
    /// - `IdentityNotFound` if the identity store cannot locate the user
    /// - `StateLookup` if existing attributes could not be read in additive mode
    /// - `Persist` if the write failed and the step is configured to abort
    async fn process(&self, ctx: &TreeContext) -> Result<StepOutcome, ProfileAttributesError>;
}
