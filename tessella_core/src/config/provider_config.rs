use anyhow::{Result, anyhow, ensure};
use serde::{Deserialize, de::Error as _};
use std::{collections::HashMap, fmt::Debug, str::FromStr};

/// Configuration of one provider instance.
///
/// `name` identifies the instance, `provider_type` selects the registered
/// provider (YAML key `type`). All other keys are kept as string lists in
/// `properties`: a scalar becomes a list with one entry.
///
/// ```
/// use tessella_core::ProviderConfig;
///
/// let config = ProviderConfig::from(("roads", vec![("type", "postgis"), ("port", "5432")]));
/// assert_eq!(config.provider_type, "postgis");
/// assert_eq!(config.get_number::<u16>("port").unwrap(), Some(5432));
/// assert!(config.get_string_req("host").is_err());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct ProviderConfig {
	pub name: String,
	pub provider_type: String,
	pub properties: HashMap<String, Vec<String>>,
}

impl ProviderConfig {
	pub fn new(name: &str, provider_type: &str) -> Self {
		ProviderConfig {
			name: name.to_string(),
			provider_type: provider_type.to_string(),
			properties: HashMap::new(),
		}
	}

	/// Adds a single-valued property, replacing any previous value.
	pub fn with_property(mut self, key: &str, value: &str) -> Self {
		self.properties.insert(key.to_string(), vec![value.to_string()]);
		self
	}

	/// Adds a list-valued property, replacing any previous value.
	pub fn with_list(mut self, key: &str, values: &[&str]) -> Self {
		self
			.properties
			.insert(key.to_string(), values.iter().map(|v| (*v).to_string()).collect());
		self
	}

	pub fn has(&self, key: &str) -> bool {
		self.properties.contains_key(key)
	}

	/// Property keys, sorted.
	pub fn keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
		keys.sort_unstable();
		keys
	}

	fn get_property(&self, key: &str) -> Result<Option<&String>> {
		self.properties.get(key).map_or(Ok(None), |list| {
			ensure!(
				list.len() == 1,
				"In provider '{}' the parameter '{key}' must have exactly one entry.",
				self.name
			);
			Ok(list.first())
		})
	}

	pub fn get_string(&self, key: &str) -> Result<Option<String>> {
		Ok(self.get_property(key)?.cloned())
	}

	pub fn get_string_req(&self, key: &str) -> Result<String> {
		self.required(key, self.get_string(key))
	}

	/// A missing list is an empty list.
	pub fn get_string_list(&self, key: &str) -> Vec<String> {
		self.properties.get(key).cloned().unwrap_or_default()
	}

	/// Parses `1`, `true`, `yes`, `ok` as `true` and `0`, `false`, `no` as `false`, ignoring case.
	pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
		self.get_property(key)?.map_or(Ok(None), |v| {
			match v.trim().to_lowercase().as_str() {
				"1" | "true" | "yes" | "ok" => Ok(Some(true)),
				"0" | "false" | "no" => Ok(Some(false)),
				other => Err(anyhow!(
					"In provider '{}' the parameter '{key}' must be a boolean, but is '{other}'.",
					self.name
				)),
			}
		})
	}

	pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
		Ok(self.get_bool(key)?.unwrap_or(default))
	}

	pub fn get_number<T>(&self, key: &str) -> Result<Option<T>>
	where
		T: FromStr,
		<T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
	{
		self.get_property(key)?.map_or(Ok(None), |v| {
			v.trim().parse::<T>().map(Some).map_err(|e| {
				anyhow::Error::new(e).context(format!(
					"In provider '{}' the parameter '{key}' must be a number, but is '{v}'.",
					self.name
				))
			})
		})
	}

	pub fn get_number_req<T>(&self, key: &str) -> Result<T>
	where
		T: FromStr,
		<T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
	{
		self.required(key, self.get_number(key))
	}

	pub fn get_number_or<T>(&self, key: &str, default: T) -> Result<T>
	where
		T: FromStr,
		<T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
	{
		Ok(self.get_number(key)?.unwrap_or(default))
	}

	fn required<T>(&self, key: &str, result: Result<Option<T>>) -> Result<T> {
		result?.ok_or_else(|| anyhow!("In provider '{}' the parameter '{key}' is required.", self.name))
	}
}

/// Builds a config from a name and key/value pairs; the `type` key sets `provider_type`.
impl From<(&str, Vec<(&str, &str)>)> for ProviderConfig {
	fn from(input: (&str, Vec<(&str, &str)>)) -> Self {
		let mut config = ProviderConfig::new(input.0, "");
		for (key, value) in input.1 {
			if key == "type" {
				config.provider_type = value.to_string();
			} else {
				config = config.with_property(key, value);
			}
		}
		config
	}
}

impl Debug for ProviderConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("ProviderConfig");
		s.field("name", &self.name);
		s.field("type", &self.provider_type);
		if !self.properties.is_empty() {
			let mut properties: Vec<(&String, &Vec<String>)> = self.properties.iter().collect();
			properties.sort_unstable();
			s.field("properties", &properties);
		}
		s.finish()
	}
}

impl<'de> Deserialize<'de> for ProviderConfig {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct ProviderConfigHelper {
			name: String,
			#[serde(rename = "type")]
			provider_type: String,
			#[serde(flatten)]
			properties: HashMap<String, serde_yaml_ng::Value>,
		}

		let helper = ProviderConfigHelper::deserialize(deserializer)?;
		let mut properties = HashMap::with_capacity(helper.properties.len());
		for (key, value) in helper.properties {
			// a key without value counts as absent
			if value.is_null() {
				continue;
			}
			let list = yaml_to_strings(value)
				.map_err(|e| D::Error::custom(format!("provider '{}', key '{key}': {e}", helper.name)))?;
			properties.insert(key, list);
		}

		Ok(ProviderConfig {
			name: helper.name,
			provider_type: helper.provider_type,
			properties,
		})
	}
}

fn yaml_to_strings(value: serde_yaml_ng::Value) -> Result<Vec<String>> {
	use serde_yaml_ng::Value;
	match value {
		Value::Sequence(items) => items.into_iter().map(yaml_scalar_to_string).collect(),
		scalar => Ok(vec![yaml_scalar_to_string(scalar)?]),
	}
}

fn yaml_scalar_to_string(value: serde_yaml_ng::Value) -> Result<String> {
	use serde_yaml_ng::Value;
	match value {
		Value::Bool(b) => Ok(b.to_string()),
		Value::Number(n) => Ok(n.to_string()),
		Value::String(s) => Ok(s),
		other => Err(anyhow!("expected a scalar value, found {other:?}")),
	}
}
