//! Decoded features streamed by standard providers.

mod properties;
mod value;

pub use properties::*;
pub use value::*;

use geo_types::Geometry;
use tessella_core::mercator::WEB_MERCATOR_SRID;

/// A decoded feature: optional id, geometry, SRID of the geometry and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
	pub id: Option<u64>,
	pub geometry: Geometry<f64>,
	pub srid: u64,
	pub properties: FeatureProperties,
}

impl Feature {
	/// A feature without id or attributes, in Web Mercator.
	pub fn new(geometry: Geometry<f64>) -> Self {
		Self {
			id: None,
			geometry,
			srid: WEB_MERCATOR_SRID,
			properties: FeatureProperties::new(),
		}
	}

	pub fn with_id(mut self, id: u64) -> Self {
		self.id = Some(id);
		self
	}

	pub fn with_srid(mut self, srid: u64) -> Self {
		self.srid = srid;
		self
	}

	pub fn set_property<T>(&mut self, key: &str, value: T)
	where
		FeatureValue: From<T>,
	{
		self.properties.insert(key.to_string(), FeatureValue::from(value));
	}
}
