//! `ProviderRegistry` maps provider names to the functions that build them.
//!
//! Standard and MVT providers share one name space: a name is registered at
//! most once, with exactly one flavor. Registration takes `&mut self` and
//! lookups take `&self`, so a registry filled at start-up and then shared
//! behind an `Arc` can be queried from any number of tasks.
//!
//! # Example
//!
//! ```rust
//! use tessella_provider::*;
//!
//! let mut registry = ProviderRegistry::new();
//! registry
//!     .register_mvt("tiles", |_config| anyhow::bail!("no database configured"), None)
//!     .unwrap();
//!
//! assert_eq!(registry.drivers(ProviderType::Mvt.filter()), vec!["tiles"]);
//! assert!(registry.drivers(filter_none()).is_empty());
//!
//! // initializer errors are passed through unchanged
//! let err = registry.mvt_for("tiles", &ProviderConfig::default()).unwrap_err();
//! assert_eq!(err.to_string(), "no database configured");
//! ```

use crate::{MvtTiler, ProviderError, ProviderFilter, ProviderType, StandardTiler, TilerUnion, filter_all};
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, error, info};
use std::{
	any::Any,
	collections::HashMap,
	fmt::{self, Debug},
	panic::{AssertUnwindSafe, catch_unwind},
	sync::Arc,
};
use tessella_core::{ProviderConfig, ProvidersConfig};

/// Builds a standard provider from its configuration.
pub type StandardInitFn = Arc<dyn Fn(&ProviderConfig) -> Result<Box<dyn StandardTiler>> + Send + Sync>;
/// Builds an MVT provider from its configuration.
pub type MvtInitFn = Arc<dyn Fn(&ProviderConfig) -> Result<Box<dyn MvtTiler>> + Send + Sync>;
/// Releases whatever a provider driver holds globally.
pub type CleanupFn = Arc<dyn Fn() + Send + Sync>;

/// The initializer of a registered name. Exactly one flavor per name.
#[derive(Clone)]
pub enum ProviderInit {
	Standard(StandardInitFn),
	Mvt(MvtInitFn),
}

impl ProviderInit {
	pub fn standard<F>(init: F) -> Self
	where
		F: Fn(&ProviderConfig) -> Result<Box<dyn StandardTiler>> + Send + Sync + 'static,
	{
		ProviderInit::Standard(Arc::new(init))
	}

	pub fn mvt<F>(init: F) -> Self
	where
		F: Fn(&ProviderConfig) -> Result<Box<dyn MvtTiler>> + Send + Sync + 'static,
	{
		ProviderInit::Mvt(Arc::new(init))
	}

	pub fn provider_type(&self) -> ProviderType {
		match self {
			ProviderInit::Standard(_) => ProviderType::Standard,
			ProviderInit::Mvt(_) => ProviderType::Mvt,
		}
	}
}

impl Debug for ProviderInit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ProviderInit({})", self.provider_type())
	}
}

#[derive(Clone)]
struct ProviderEntry {
	init: ProviderInit,
	cleanup: Option<CleanupFn>,
}

/// Registry of provider drivers, keyed by name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
	entries: HashMap<String, ProviderEntry>,
}

impl ProviderRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `name` with an initializer of either flavor.
	///
	/// Fails with [`ProviderError::NilInitFunc`] when `init` is `None` and with
	/// [`ProviderError::AlreadyRegistered`] when the name is taken. The registry
	/// is unchanged on failure.
	pub fn add(
		&mut self,
		name: &str,
		init: Option<ProviderInit>,
		cleanup: Option<CleanupFn>,
	) -> Result<(), ProviderError> {
		let Some(init) = init else {
			return Err(ProviderError::NilInitFunc { name: name.to_string() });
		};
		if let Some(entry) = self.entries.get(name) {
			return Err(ProviderError::AlreadyRegistered {
				name: name.to_string(),
				existing: entry.init.provider_type(),
			});
		}
		debug!("registering {} '{name}'", init.provider_type());
		self.entries.insert(name.to_string(), ProviderEntry { init, cleanup });
		Ok(())
	}

	/// Registers a standard provider.
	pub fn register<F>(&mut self, name: &str, init: F, cleanup: Option<CleanupFn>) -> Result<(), ProviderError>
	where
		F: Fn(&ProviderConfig) -> Result<Box<dyn StandardTiler>> + Send + Sync + 'static,
	{
		self.add(name, Some(ProviderInit::standard(init)), cleanup)
	}

	/// Registers an MVT provider.
	pub fn register_mvt<F>(&mut self, name: &str, init: F, cleanup: Option<CleanupFn>) -> Result<(), ProviderError>
	where
		F: Fn(&ProviderConfig) -> Result<Box<dyn MvtTiler>> + Send + Sync + 'static,
	{
		self.add(name, Some(ProviderInit::mvt(init)), cleanup)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Flavor of the provider registered as `name`, if any.
	pub fn provider_type(&self, name: &str) -> Option<ProviderType> {
		self.entries.get(name).map(|entry| entry.init.provider_type())
	}

	/// Names of all providers whose flavor is selected by `filter`.
	///
	/// The order of the returned names is unspecified.
	pub fn drivers(&self, filter: ProviderFilter) -> Vec<String> {
		self
			.entries
			.iter()
			.filter(|(_, entry)| filter.contains(entry.init.provider_type()))
			.map(|(name, _)| name.clone())
			.collect()
	}

	/// Builds the provider registered as `name`, whatever its flavor.
	pub fn provider_for(&self, name: &str, config: &ProviderConfig) -> Result<TilerUnion> {
		debug!("looking up provider '{name}'");
		let entry = self.entries.get(name).ok_or_else(|| ProviderError::UnknownProvider {
			name: name.to_string(),
			known_providers: self.drivers(filter_all()),
		})?;
		match &entry.init {
			ProviderInit::Standard(init) => init(config).map(TilerUnion::Standard),
			ProviderInit::Mvt(init) => init(config).map(TilerUnion::Mvt),
		}
	}

	/// Builds the standard provider registered as `name`.
	pub fn standard_for(&self, name: &str, config: &ProviderConfig) -> Result<Box<dyn StandardTiler>> {
		debug!("looking up standard provider '{name}'");
		match &self.lookup(name, ProviderType::Standard)?.init {
			ProviderInit::Standard(init) => init(config),
			ProviderInit::Mvt(_) => Err(self.invalid_type(name, ProviderType::Standard).into()),
		}
	}

	/// Builds the MVT provider registered as `name`.
	pub fn mvt_for(&self, name: &str, config: &ProviderConfig) -> Result<Box<dyn MvtTiler>> {
		debug!("looking up MVT provider '{name}'");
		match &self.lookup(name, ProviderType::Mvt)?.init {
			ProviderInit::Mvt(init) => init(config),
			ProviderInit::Standard(_) => Err(self.invalid_type(name, ProviderType::Mvt).into()),
		}
	}

	/// Builds the provider instance described by `config`.
	///
	/// The driver is `config.provider_type`; errors name the instance.
	pub fn instantiate(&self, config: &ProviderConfig) -> Result<TilerUnion> {
		self
			.provider_for(&config.provider_type, config)
			.with_context(|| format!("failed to instantiate provider '{}'", config.name))
	}

	/// Builds every provider instance of a configuration document, in document order.
	pub fn instantiate_all(&self, config: &ProvidersConfig) -> Result<Vec<(String, TilerUnion)>> {
		config
			.providers
			.iter()
			.map(|provider| Ok((provider.name.clone(), self.instantiate(provider)?)))
			.collect()
	}

	/// Runs every registered cleanup hook.
	///
	/// A panicking hook is logged and does not stop the others. Returns the
	/// sorted names of the providers whose hook panicked. Entries stay
	/// registered.
	pub fn cleanup(&self) -> Vec<String> {
		info!("cleaning up providers");
		let mut failed = Vec::new();
		for (name, entry) in self.entries.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
			let Some(hook) = &entry.cleanup else {
				continue;
			};
			debug!("running cleanup of provider '{name}'");
			if let Err(payload) = catch_unwind(AssertUnwindSafe(|| hook())) {
				error!("cleanup of provider '{name}' panicked: {}", panic_message(payload.as_ref()));
				failed.push(name.clone());
			}
		}
		failed
	}

	fn lookup(&self, name: &str, requested: ProviderType) -> Result<&ProviderEntry, ProviderError> {
		self.entries.get(name).ok_or_else(|| ProviderError::UnknownProvider {
			name: name.to_string(),
			known_providers: self.drivers(requested.filter()),
		})
	}

	fn invalid_type(&self, name: &str, requested: ProviderType) -> ProviderError {
		ProviderError::InvalidProviderType {
			name: name.to_string(),
			requested,
			known_providers: self.drivers(requested.filter()),
		}
	}
}

impl Debug for ProviderRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(
				self
					.entries
					.iter()
					.sorted_by(|a, b| a.0.cmp(b.0))
					.map(|(name, entry)| (name, entry.init.provider_type())),
			)
			.finish()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message
	} else {
		"unknown panic"
	}
}
