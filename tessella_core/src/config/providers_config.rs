use super::ProviderConfig;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	collections::HashSet,
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

/// The list of configured provider instances.
///
/// ```yaml
/// providers:
///   - name: roads
///     type: postgis
///     host: localhost
///   - name: basemap
///     type: mvt_postgis
/// ```
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
	#[serde(default)]
	pub providers: Vec<ProviderConfig>,
}

impl ProvidersConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: ProvidersConfig = serde_yaml_ng::from_reader(reader)?;
		config.checked()
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: ProvidersConfig = serde_yaml_ng::from_str(text)?;
		config.checked()
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("Failed to open provider config {path:?}"))?;
		ProvidersConfig::from_reader(BufReader::new(file))
			.with_context(|| format!("Failed to parse provider config {path:?}"))
	}

	pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
		self.providers.iter().find(|p| p.name == name)
	}

	fn checked(self) -> Result<Self> {
		let mut names = HashSet::new();
		for provider in &self.providers {
			ensure!(!provider.name.is_empty(), "provider name must not be empty");
			ensure!(
				names.insert(provider.name.as_str()),
				"provider name '{}' is used more than once",
				provider.name
			);
		}
		Ok(self)
	}
}
