//! Tessella Provider: a registry of pluggable tile data sources.
//!
//! Providers are registered under a unique name in a [`ProviderRegistry`] and
//! come in two flavors that share one name space:
//! - **standard** providers implement [`StandardTiler`] and stream decoded
//!   [`Feature`]s for a tile,
//! - **MVT** providers implement [`MvtTiler`] and return a pre-encoded tile.
//!
//! The serving layer resolves a provider by name, either as a [`TilerUnion`]
//! holding whichever flavor was registered, or as one specific flavor.
//!
//! # Quick start
//! ```rust
//! use std::ops::ControlFlow;
//! use tessella_provider::*;
//!
//! #[derive(Debug)]
//! struct Cities;
//!
//! #[async_trait::async_trait]
//! impl LayerLister for Cities {
//!     async fn layers(&self) -> anyhow::Result<Vec<LayerInfo>> {
//!         Ok(vec![LayerInfo::new("cities", GeometryType::Point, 3857)])
//!     }
//! }
//!
//! #[async_trait::async_trait]
//! impl StandardTiler for Cities {
//!     async fn tile_features(
//!         &self,
//!         ctx: &CancellationToken,
//!         _layer: &str,
//!         tile: &TileRef,
//!         emit: &mut FeatureSink<'_>,
//!     ) -> anyhow::Result<()> {
//!         let [x, y] = tile.extent().0.center();
//!         let features = vec![Feature::new(geo_types::Point::new(x, y).into())];
//!         stream_features(ctx, features.into_iter().map(Ok), emit)
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut registry = ProviderRegistry::new();
//!     registry.register("cities", |_config| Ok(Box::new(Cities)), None)?;
//!
//!     let config = ProviderConfig::new("world_cities", "cities");
//!     let tiler = registry.standard_for("cities", &config)?;
//!
//!     let tile = TileRef::new(4, 8, 5, 64, 3857)?;
//!     let mut count = 0;
//!     tiler
//!         .tile_features(&CancellationToken::new(), "cities", &tile, &mut |_feature| {
//!             count += 1;
//!             ControlFlow::Continue(())
//!         })
//!         .await?;
//!     assert_eq!(count, 1);
//!
//!     registry.cleanup();
//!     Ok(())
//! }
//! ```
//!
//! # Features
//! - `test`: exposes the stub providers in [`testing`] to downstream crates.

mod error;
pub use error::*;

mod feature;
pub use feature::*;

mod layer;
pub use layer::*;

mod provider_type;
pub use provider_type::*;

mod registry;
pub use registry::*;

mod tiler_union;
pub use tiler_union::*;

mod traits;
pub use traits::*;

#[cfg(any(test, feature = "test"))]
pub mod testing;

pub use tessella_core::{Blob, Extent, ProviderConfig, ProvidersConfig, TileRef};
pub use tokio_util::sync::CancellationToken;
