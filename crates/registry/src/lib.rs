//! Missing-persons registry client library.
//!
//! Provides the [`Registry`] abstraction, an HTTP implementation over the
//! public REST API, the registry wire schema, configuration loading, and an
//! in-memory registry for tests and local runs.

pub mod api;
pub mod config;
pub mod fixture;
pub mod registry;
pub mod wire;

pub use api::HttpRegistry;
pub use config::{ConfigError, RegistryConfig};
pub use fixture::StaticRegistry;
pub use registry::Registry;
