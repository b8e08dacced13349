//! Domain layer for the static identity store plugin.

pub mod client;
pub mod service;

pub use service::Service;
