use anyhow::{Result, bail};
use geo_types::Geometry;
use std::{fmt::Display, str::FromStr};

/// Geometry type advertised by a layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeometryType {
	#[default]
	Unknown,
	Point,
	MultiPoint,
	LineString,
	MultiLineString,
	Polygon,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryType {
	/// Maps a geometry to the type a layer would advertise for it.
	///
	/// Lines map to `LineString`, rectangles and triangles to `Polygon`.
	pub fn from_geometry(geometry: &Geometry<f64>) -> GeometryType {
		match geometry {
			Geometry::Point(_) => GeometryType::Point,
			Geometry::MultiPoint(_) => GeometryType::MultiPoint,
			Geometry::Line(_) | Geometry::LineString(_) => GeometryType::LineString,
			Geometry::MultiLineString(_) => GeometryType::MultiLineString,
			Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => GeometryType::Polygon,
			Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
			Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			GeometryType::Unknown => "Unknown",
			GeometryType::Point => "Point",
			GeometryType::MultiPoint => "MultiPoint",
			GeometryType::LineString => "LineString",
			GeometryType::MultiLineString => "MultiLineString",
			GeometryType::Polygon => "Polygon",
			GeometryType::MultiPolygon => "MultiPolygon",
			GeometryType::GeometryCollection => "GeometryCollection",
		}
	}
}

impl FromStr for GeometryType {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s.to_lowercase().as_str() {
			"unknown" | "geometry" => GeometryType::Unknown,
			"point" => GeometryType::Point,
			"multipoint" => GeometryType::MultiPoint,
			"linestring" => GeometryType::LineString,
			"multilinestring" => GeometryType::MultiLineString,
			"polygon" => GeometryType::Polygon,
			"multipolygon" => GeometryType::MultiPolygon,
			"geometrycollection" => GeometryType::GeometryCollection,
			_ => bail!("unknown geometry type '{s}'"),
		})
	}
}

impl Display for GeometryType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A layer a provider can serve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerInfo {
	pub name: String,
	pub geometry_type: GeometryType,
	pub srid: u64,
}

impl LayerInfo {
	pub fn new(name: &str, geometry_type: GeometryType, srid: u64) -> LayerInfo {
		LayerInfo {
			name: name.to_string(),
			geometry_type,
			srid,
		}
	}
}

/// One output layer requested from an MVT provider.
///
/// `name` is the provider layer to read, `mvt_name` the layer name written
/// into the encoded tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MvtLayer {
	pub id: String,
	pub name: String,
	pub mvt_name: String,
}

impl MvtLayer {
	pub fn new(name: &str) -> MvtLayer {
		MvtLayer {
			id: String::new(),
			name: name.to_string(),
			mvt_name: String::new(),
		}
	}

	pub fn with_id(mut self, id: &str) -> MvtLayer {
		self.id = id.to_string();
		self
	}

	pub fn with_mvt_name(mut self, mvt_name: &str) -> MvtLayer {
		self.mvt_name = mvt_name.to_string();
		self
	}

	/// Name of the layer in the encoded tile.
	pub fn output_name(&self) -> &str {
		if self.mvt_name.is_empty() {
			&self.name
		} else {
			&self.mvt_name
		}
	}
}
