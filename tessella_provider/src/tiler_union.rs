use crate::{LayerInfo, LayerLister, MvtTiler, ProviderType, StandardTiler};
use anyhow::Result;
use async_trait::async_trait;

/// A provider instance of either flavor, as returned by
/// [`ProviderRegistry::provider_for`](crate::ProviderRegistry::provider_for).
///
/// Exactly one flavor is populated.
#[derive(Debug)]
pub enum TilerUnion {
	Standard(Box<dyn StandardTiler>),
	Mvt(Box<dyn MvtTiler>),
}

impl TilerUnion {
	pub fn provider_type(&self) -> ProviderType {
		match self {
			TilerUnion::Standard(_) => ProviderType::Standard,
			TilerUnion::Mvt(_) => ProviderType::Mvt,
		}
	}

	pub fn is_standard(&self) -> bool {
		matches!(self, TilerUnion::Standard(_))
	}

	pub fn is_mvt(&self) -> bool {
		matches!(self, TilerUnion::Mvt(_))
	}

	pub fn as_standard(&self) -> Option<&dyn StandardTiler> {
		match self {
			TilerUnion::Standard(tiler) => Some(tiler.as_ref()),
			TilerUnion::Mvt(_) => None,
		}
	}

	pub fn as_mvt(&self) -> Option<&dyn MvtTiler> {
		match self {
			TilerUnion::Mvt(tiler) => Some(tiler.as_ref()),
			TilerUnion::Standard(_) => None,
		}
	}

	pub fn into_standard(self) -> Option<Box<dyn StandardTiler>> {
		match self {
			TilerUnion::Standard(tiler) => Some(tiler),
			TilerUnion::Mvt(_) => None,
		}
	}

	pub fn into_mvt(self) -> Option<Box<dyn MvtTiler>> {
		match self {
			TilerUnion::Mvt(tiler) => Some(tiler),
			TilerUnion::Standard(_) => None,
		}
	}
}

#[async_trait]
impl LayerLister for TilerUnion {
	async fn layers(&self) -> Result<Vec<LayerInfo>> {
		match self {
			TilerUnion::Standard(tiler) => tiler.layers().await,
			TilerUnion::Mvt(tiler) => tiler.layers().await,
		}
	}
}
