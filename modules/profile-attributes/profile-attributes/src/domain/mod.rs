//! Domain layer for the profile attributes step.

pub mod error;
pub mod expression;
pub mod local_client;
pub mod merger;
pub mod service;

pub use error::DomainError;
pub use expression::ValueExpression;
pub use local_client::ProfileAttributesLocalClient;
pub use merger::{ExistingAttributesFetcher, IdentityAttributesFetcher, build_attribute_map};
pub use service::Service;
