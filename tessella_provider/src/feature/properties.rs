use super::FeatureValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Attributes of a feature, ordered by key.
#[derive(Clone, Default, PartialEq)]
pub struct FeatureProperties {
	properties: BTreeMap<String, FeatureValue>,
}

impl FeatureProperties {
	pub fn new() -> FeatureProperties {
		FeatureProperties::default()
	}
	pub fn insert(&mut self, key: String, value: FeatureValue) {
		self.properties.insert(key, value);
	}
	pub fn remove(&mut self, key: &str) -> Option<FeatureValue> {
		self.properties.remove(key)
	}
	pub fn get(&self, key: &str) -> Option<&FeatureValue> {
		self.properties.get(key)
	}
	pub fn len(&self) -> usize {
		self.properties.len()
	}
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
	pub fn iter(&self) -> btree_map::Iter<'_, String, FeatureValue> {
		self.properties.iter()
	}
}

impl IntoIterator for FeatureProperties {
	type Item = (String, FeatureValue);
	type IntoIter = btree_map::IntoIter<String, FeatureValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl From<Vec<(&str, FeatureValue)>> for FeatureProperties {
	fn from(value: Vec<(&str, FeatureValue)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}
}

impl FromIterator<(String, FeatureValue)> for FeatureProperties {
	fn from_iter<T: IntoIterator<Item = (String, FeatureValue)>>(iter: T) -> Self {
		FeatureProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for FeatureProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}
