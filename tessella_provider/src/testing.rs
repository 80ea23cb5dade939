//! Stub providers for tests.
//!
//! Compiled for this crate's tests and, with the `test` feature, for
//! downstream crates that want a populated registry without a database.

use crate::{
	Blob, CancellationToken, Feature, FeatureSink, GeometryType, LayerInfo, LayerLister, MvtLayer, MvtTiler,
	ProviderConfig, ProviderError, ProviderRegistry, StandardTiler, TileRef, stream_features,
};
use anyhow::{Result, bail};
use async_trait::async_trait;
use geo_types::Point;
use itertools::Itertools;
use tessella_core::mercator::WEB_MERCATOR_SRID;

/// Name under which [`stub_registry`] registers [`StubStandardTiler`].
pub const STUB_STANDARD: &str = "stub";
/// Name under which [`stub_registry`] registers [`StubMvtTiler`].
pub const STUB_MVT: &str = "mvt_stub";

/// Serves one point layer; every tile holds `features` points at its center.
#[derive(Debug)]
pub struct StubStandardTiler {
	layer: String,
	features: u64,
}

impl StubStandardTiler {
	pub fn new(layer: &str, features: u64) -> Self {
		Self {
			layer: layer.to_string(),
			features,
		}
	}

	/// Reads `layer` (default `features`) and `features` (default 1).
	pub fn from_config(config: &ProviderConfig) -> Result<Self> {
		Ok(Self {
			layer: config.get_string("layer")?.unwrap_or_else(|| String::from("features")),
			features: config.get_number_or("features", 1)?,
		})
	}
}

#[async_trait]
impl LayerLister for StubStandardTiler {
	async fn layers(&self) -> Result<Vec<LayerInfo>> {
		Ok(vec![LayerInfo::new(&self.layer, GeometryType::Point, WEB_MERCATOR_SRID)])
	}
}

#[async_trait]
impl StandardTiler for StubStandardTiler {
	async fn tile_features(
		&self,
		ctx: &CancellationToken,
		layer: &str,
		tile: &TileRef,
		emit: &mut FeatureSink<'_>,
	) -> Result<()> {
		if layer != self.layer {
			bail!("layer '{layer}' not found");
		}
		let [x, y] = tile.extent().0.center();
		let features = (0..self.features).map(|id| {
			let mut feature = Feature::new(Point::new(x, y).into()).with_id(id);
			feature.set_property("tile", tile.to_string());
			Ok(feature)
		});
		stream_features(ctx, features, emit)
	}
}

/// Encodes the requested layer names as text, `z/x/y:name,name`.
#[derive(Debug)]
pub struct StubMvtTiler {
	layers: Vec<String>,
}

impl StubMvtTiler {
	pub fn new(layers: &[&str]) -> Self {
		Self {
			layers: layers.iter().map(|l| (*l).to_string()).collect(),
		}
	}

	/// Reads the `layers` list (default `["features"]`).
	pub fn from_config(config: &ProviderConfig) -> Self {
		let layers = config.get_string_list("layers");
		if layers.is_empty() {
			Self::new(&["features"])
		} else {
			Self { layers }
		}
	}
}

#[async_trait]
impl LayerLister for StubMvtTiler {
	async fn layers(&self) -> Result<Vec<LayerInfo>> {
		Ok(self
			.layers
			.iter()
			.map(|name| LayerInfo::new(name, GeometryType::Unknown, WEB_MERCATOR_SRID))
			.collect())
	}
}

#[async_trait]
impl MvtTiler for StubMvtTiler {
	async fn mvt_for_layers(&self, ctx: &CancellationToken, tile: &TileRef, layers: &[MvtLayer]) -> Result<Blob> {
		if ctx.is_cancelled() {
			return Err(ProviderError::Canceled.into());
		}
		if let Some(layer) = layers.iter().find(|l| !self.layers.contains(&l.name)) {
			bail!("layer '{}' not found", layer.name);
		}
		let names = layers.iter().map(MvtLayer::output_name).join(",");
		Ok(Blob::from(format!("{tile}:{names}").as_str()))
	}
}

/// A registry holding [`StubStandardTiler`] as `stub` and [`StubMvtTiler`] as `mvt_stub`.
pub fn stub_registry() -> Result<ProviderRegistry, ProviderError> {
	let mut registry = ProviderRegistry::new();
	registry.register(
		STUB_STANDARD,
		|config| Ok(Box::new(StubStandardTiler::from_config(config)?)),
		None,
	)?;
	registry.register_mvt(STUB_MVT, |config| Ok(Box::new(StubMvtTiler::from_config(config))), None)?;
	Ok(registry)
}
