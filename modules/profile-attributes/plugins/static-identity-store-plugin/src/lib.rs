#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Identity Store Plugin
//!
//! This plugin keeps identities and their profile attributes in memory,
//! seeded from configuration. Intended for development and tests.
//!
//! ## Configuration
//!
//! ```yaml
//! static_identity_store_plugin:
//!   read_only: false
//!   users:
//!     - username: demo
//!       realm: /alpha
//!       attributes:
//!         mail: ["demo@example.com"]
//!         roles: ["c"]
//! ```

pub mod config;
pub mod domain;

pub use config::StaticIdentityStoreConfig;
pub use domain::Service;
