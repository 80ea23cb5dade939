use crate::ProviderType;
use itertools::Itertools;
use thiserror::Error;

/// Errors raised by the registry and by feature streaming.
///
/// Registry lookups return `anyhow::Result`; errors raised by the registry
/// itself are a `ProviderError` inside the `anyhow::Error`, errors raised by
/// a provider are returned as the provider produced them.
///
/// ```
/// use tessella_provider::{ProviderConfig, ProviderError, ProviderRegistry};
///
/// let registry = ProviderRegistry::new();
/// let err = registry
///     .provider_for("missing", &ProviderConfig::default())
///     .unwrap_err();
/// assert!(matches!(
///     err.downcast_ref::<ProviderError>(),
///     Some(ProviderError::UnknownProvider { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
	/// A registration was attempted without an init function.
	#[error("init function for provider '{name}' is missing")]
	NilInitFunc { name: String },

	/// The name is taken, by a provider of either flavor.
	#[error("provider '{name}' already exists as {existing}")]
	AlreadyRegistered { name: String, existing: ProviderType },

	/// No provider is registered under `name`.
	#[error("unknown provider '{name}', known providers: [{}]", list(.known_providers))]
	UnknownProvider { name: String, known_providers: Vec<String> },

	/// The provider exists, but not with the requested flavor.
	#[error("provider '{name}' is not a {requested}, known: [{}]", list(.known_providers))]
	InvalidProviderType {
		name: String,
		requested: ProviderType,
		known_providers: Vec<String>,
	},

	/// The caller stopped the feature stream or cancelled the context.
	#[error("provider: canceled")]
	Canceled,
}

impl ProviderError {
	/// Returns `true` if `err` is, or wraps, [`ProviderError::Canceled`].
	pub fn is_canceled(err: &anyhow::Error) -> bool {
		matches!(err.downcast_ref::<ProviderError>(), Some(ProviderError::Canceled))
	}

	/// Names listed for diagnostics, if this error carries any.
	pub fn known_providers(&self) -> Option<&[String]> {
		match self {
			ProviderError::UnknownProvider { known_providers, .. }
			| ProviderError::InvalidProviderType { known_providers, .. } => Some(known_providers),
			_ => None,
		}
	}
}

fn list(names: &[String]) -> String {
	names.iter().sorted().join(", ")
}
