//! Capability contracts implemented by tile providers.
//!
//! A provider implements [`LayerLister`] and exactly one of [`StandardTiler`]
//! (decoded features) or [`MvtTiler`] (pre-encoded tiles). All traits are
//! object safe and are used as `Box<dyn …>` by the registry.

use crate::{Feature, LayerInfo, MvtLayer, ProviderError};
use anyhow::Result;
use async_trait::async_trait;
use log::trace;
use std::{fmt::Debug, ops::ControlFlow};
use tessella_core::{Blob, TileRef};
use tokio_util::sync::CancellationToken;

/// Receives the features of one tile, one at a time.
///
/// Returning [`ControlFlow::Break`] tells the provider to stop; it then
/// returns [`ProviderError::Canceled`].
pub type FeatureSink<'a> = dyn FnMut(Feature) -> ControlFlow<()> + Send + 'a;

/// Lists the layers a provider can serve.
#[async_trait]
pub trait LayerLister: Debug + Send + Sync {
	async fn layers(&self) -> Result<Vec<LayerInfo>>;
}

/// A provider that streams decoded features.
#[async_trait]
pub trait StandardTiler: LayerLister {
	/// Pushes every feature of `layer` intersecting `tile` to `emit`, in
	/// provider order.
	///
	/// `ctx` is checked at least once per feature. A cancelled `ctx` or a
	/// `Break` from `emit` ends the call with [`ProviderError::Canceled`];
	/// retrieval errors are returned unchanged.
	async fn tile_features(
		&self,
		ctx: &CancellationToken,
		layer: &str,
		tile: &TileRef,
		emit: &mut FeatureSink<'_>,
	) -> Result<()>;
}

/// A provider that returns fully encoded vector tiles.
#[async_trait]
pub trait MvtTiler: LayerLister {
	/// Encodes `layers` of `tile` into one tile blob.
	async fn mvt_for_layers(&self, ctx: &CancellationToken, tile: &TileRef, layers: &[MvtLayer]) -> Result<Blob>;
}

/// Feeds `features` into `emit`, honouring cancellation and early stop.
///
/// The first error yielded by `features` is returned as is.
pub fn stream_features<I>(ctx: &CancellationToken, features: I, emit: &mut FeatureSink<'_>) -> Result<()>
where
	I: IntoIterator<Item = Result<Feature>>,
{
	if ctx.is_cancelled() {
		return Err(ProviderError::Canceled.into());
	}
	for (index, feature) in features.into_iter().enumerate() {
		if ctx.is_cancelled() {
			trace!("feature stream cancelled after {index} features");
			return Err(ProviderError::Canceled.into());
		}
		if emit(feature?).is_break() {
			trace!("feature stream stopped by consumer after {} features", index + 1);
			return Err(ProviderError::Canceled.into());
		}
	}
	Ok(())
}
