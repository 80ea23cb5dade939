//! Provider configuration.
//!
//! A [`ProviderConfig`] is the dictionary handed to a provider's init function.
//! The registry never looks inside it; each provider validates the keys it
//! needs through the typed getters. [`ProvidersConfig`] is the YAML document
//! listing all configured provider instances.

mod provider_config;
pub use provider_config::*;

mod providers_config;
pub use providers_config::*;
