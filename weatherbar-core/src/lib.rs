//! Core library for the `weatherbar` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers (URL templates + normalization)
//! - The on-disk cache: verbatim provider responses and the normalized
//!   summary record a status-bar widget reads
//!
//! It is used by `weatherbar-cli`, but can also be reused by other binaries
//! or services.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod provider;

pub use cache::Cache;
pub use config::{Config, ProviderConfig};
pub use error::{Error, Result};
pub use model::{Credentials, Day, RawForecast, Summary, Today};
pub use provider::{Provider, ProviderId, provider};
