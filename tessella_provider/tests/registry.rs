//! End-to-end tests for provider registration, lookup and tile math.

use anyhow::Result;
use approx::assert_relative_eq;
use async_trait::async_trait;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::{
	ops::ControlFlow,
	path::Path,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};
use tessella_core::mercator::MAX_EXTENT;
use tessella_provider::*;

#[derive(Debug)]
struct Demo {
	layer: String,
}

#[async_trait]
impl LayerLister for Demo {
	async fn layers(&self) -> Result<Vec<LayerInfo>> {
		Ok(vec![LayerInfo::new(&self.layer, GeometryType::Point, 3857)])
	}
}

#[async_trait]
impl StandardTiler for Demo {
	async fn tile_features(
		&self,
		ctx: &CancellationToken,
		_layer: &str,
		tile: &TileRef,
		emit: &mut FeatureSink<'_>,
	) -> Result<()> {
		let (extent, _) = tile.buffered_extent();
		let corners = [
			(extent.x_min, extent.y_min),
			(extent.x_max, extent.y_min),
			(extent.x_max, extent.y_max),
			(extent.x_min, extent.y_max),
		];
		let features = corners
			.into_iter()
			.enumerate()
			.map(|(i, (x, y))| Ok(Feature::new(geo_types::Point::new(x, y).into()).with_id(i as u64)));
		stream_features(ctx, features, emit)
	}
}

#[derive(Debug)]
struct DemoMvt;

#[async_trait]
impl LayerLister for DemoMvt {
	async fn layers(&self) -> Result<Vec<LayerInfo>> {
		Ok(vec![])
	}
}

#[async_trait]
impl MvtTiler for DemoMvt {
	async fn mvt_for_layers(&self, ctx: &CancellationToken, tile: &TileRef, _layers: &[MvtLayer]) -> Result<Blob> {
		if ctx.is_cancelled() {
			return Err(ProviderError::Canceled.into());
		}
		Ok(Blob::from(tile.to_string().as_str()))
	}
}

fn demo_init(config: &ProviderConfig) -> Result<Box<dyn StandardTiler>> {
	Ok(Box::new(Demo {
		layer: config.get_string("layer")?.unwrap_or_else(|| "demo".to_string()),
	}))
}

fn demo_mvt_init(_config: &ProviderConfig) -> Result<Box<dyn MvtTiler>> {
	Ok(Box::new(DemoMvt))
}

fn broken_cleanup() {
	panic!("socket already closed");
}

fn demo_registry() -> ProviderRegistry {
	let mut registry = ProviderRegistry::new();
	registry.register("demo", demo_init, None).unwrap();
	registry.register("postgis", demo_init, None).unwrap();
	registry.register_mvt("mvt_postgis", demo_mvt_init, None).unwrap();
	registry
}

fn sorted(names: Vec<String>) -> Vec<String> {
	names.into_iter().sorted().collect()
}

#[test]
fn every_name_listed_once_under_its_flavor() {
	let registry = demo_registry();
	let all = registry.drivers(filter_all());
	assert_eq!(all.len(), all.iter().sorted().dedup().count());
	assert_eq!(sorted(all), vec!["demo", "mvt_postgis", "postgis"]);

	let standard = registry.drivers(ProviderType::Standard.filter());
	let mvt = registry.drivers(ProviderType::Mvt.filter());
	assert_eq!(sorted(standard), vec!["demo", "postgis"]);
	assert_eq!(mvt, vec!["mvt_postgis"]);
}

#[test]
fn nil_init_leaves_registry_unchanged() {
	let mut registry = demo_registry();
	let before = format!("{registry:?}");
	assert_eq!(
		registry.add("fresh", None, None),
		Err(ProviderError::NilInitFunc { name: "fresh".into() })
	);
	assert_eq!(format!("{registry:?}"), before);
	assert!(!registry.contains("fresh"));
}

#[rstest]
#[case::standard_then_standard(ProviderType::Standard, ProviderType::Standard)]
#[case::standard_then_mvt(ProviderType::Standard, ProviderType::Mvt)]
#[case::mvt_then_standard(ProviderType::Mvt, ProviderType::Standard)]
#[case::mvt_then_mvt(ProviderType::Mvt, ProviderType::Mvt)]
fn second_registration_fails(#[case] first: ProviderType, #[case] second: ProviderType) {
	let init = |flavor| match flavor {
		ProviderType::Standard => ProviderInit::standard(demo_init),
		ProviderType::Mvt => ProviderInit::mvt(demo_mvt_init),
	};

	let mut registry = ProviderRegistry::new();
	registry.add("dup", Some(init(first)), None).unwrap();
	assert_eq!(
		registry.add("dup", Some(init(second)), None),
		Err(ProviderError::AlreadyRegistered {
			name: "dup".into(),
			existing: first
		})
	);
	assert_eq!(registry.provider_type("dup"), Some(first));
	assert_eq!(registry.len(), 1);
}

#[test]
fn unknown_lists_all_drivers_at_call_time() {
	let mut registry = demo_registry();
	registry.register_mvt("mvt_late", demo_mvt_init, None).unwrap();

	let err = registry.provider_for("missing", &ProviderConfig::default()).unwrap_err();
	let known = err
		.downcast_ref::<ProviderError>()
		.and_then(ProviderError::known_providers)
		.unwrap()
		.to_vec();
	assert_eq!(sorted(known), sorted(registry.drivers(filter_all())));
}

#[tokio::test]
async fn mvt_only_name() {
	let registry = demo_registry();
	let config = ProviderConfig::new("basemap", "mvt_postgis");

	let err = registry.standard_for("mvt_postgis", &config).unwrap_err();
	assert!(matches!(
		err.downcast_ref::<ProviderError>(),
		Some(ProviderError::InvalidProviderType {
			requested: ProviderType::Standard,
			..
		})
	));

	let tiler = registry.mvt_for("mvt_postgis", &config).unwrap();
	let tile = TileRef::new(2, 1, 3, 0, 3857).unwrap();
	let blob = tiler
		.mvt_for_layers(&CancellationToken::new(), &tile, &[MvtLayer::new("water")])
		.await
		.unwrap();
	assert!(!blob.is_empty());
	assert_eq!(blob.as_str().unwrap(), "2/1/3");
}

#[tokio::test]
async fn demo_end_to_end() {
	let registry = demo_registry();
	let config = ProviderConfig::new("demo_instance", "demo").with_property("layer", "pois");

	let union = registry.provider_for("demo", &config).unwrap();
	assert!(union.is_standard());
	assert!(union.as_mvt().is_none());
	assert_eq!(union.layers().await.unwrap()[0].name, "pois");

	let tiler = registry.standard_for("demo", &config).unwrap();
	assert_eq!(format!("{tiler:?}"), format!("{:?}", union.as_standard().unwrap()));

	let err = registry.mvt_for("demo", &config).unwrap_err();
	let Some(ProviderError::InvalidProviderType {
		name,
		requested,
		known_providers,
	}) = err.downcast_ref::<ProviderError>()
	else {
		panic!("unexpected error: {err}");
	};
	assert_eq!(name, "demo");
	assert_eq!(*requested, ProviderType::Mvt);
	assert!(!known_providers.contains(&"demo".to_string()));
}

#[tokio::test]
async fn features_cover_the_buffered_tile() {
	let registry = demo_registry();
	let tiler = registry.standard_for("demo", &ProviderConfig::default()).unwrap();
	let tile = TileRef::new(0, 0, 0, 64, 3857).unwrap();
	let (buffered, srid) = tile.buffered_extent();
	assert_eq!(srid, 3857);

	let mut xs = Vec::new();
	tiler
		.tile_features(&CancellationToken::new(), "demo", &tile, &mut |feature| {
			if let geo_types::Geometry::Point(point) = feature.geometry {
				xs.push(point.x());
			}
			ControlFlow::Continue(())
		})
		.await
		.unwrap();
	assert_eq!(xs, vec![buffered.x_min, buffered.x_max, buffered.x_max, buffered.x_min]);
}

#[tokio::test]
async fn consumer_can_stop_the_stream() {
	let registry = demo_registry();
	let tiler = registry.standard_for("demo", &ProviderConfig::default()).unwrap();
	let tile = TileRef::new(5, 10, 12, 0, 3857).unwrap();

	let mut received = 0;
	let err = tiler
		.tile_features(&CancellationToken::new(), "demo", &tile, &mut |_| {
			received += 1;
			ControlFlow::Break(())
		})
		.await
		.unwrap_err();
	assert_eq!(received, 1);
	assert!(ProviderError::is_canceled(&err));
}

#[tokio::test]
async fn cancelled_context_stops_both_flavors() {
	let registry = demo_registry();
	let ctx = CancellationToken::new();
	ctx.cancel();
	let tile = TileRef::new(1, 1, 1, 0, 3857).unwrap();

	let standard = registry.standard_for("demo", &ProviderConfig::default()).unwrap();
	let err = standard
		.tile_features(&ctx, "demo", &tile, &mut |_| ControlFlow::Continue(()))
		.await
		.unwrap_err();
	assert!(ProviderError::is_canceled(&err));

	let mvt = registry.mvt_for("mvt_postgis", &ProviderConfig::default()).unwrap();
	let err = mvt.mvt_for_layers(&ctx, &tile, &[]).await.unwrap_err();
	assert!(ProviderError::is_canceled(&err));
}

#[test]
fn world_tile() {
	let tile = TileRef::new(0, 0, 0, 0, 3857).unwrap();
	assert_eq!(tile.zxy(), (0, 0, 0));
	let (extent, srid) = tile.extent();
	assert_eq!(srid, 3857);
	assert_eq!(extent.as_array(), [-MAX_EXTENT, -MAX_EXTENT, MAX_EXTENT, MAX_EXTENT]);
	assert_eq!(tile.buffered_extent().0, extent);
}

#[rstest]
#[case(0, 1)]
#[case(3, 4)]
#[case(10, 18)]
fn buffer_shrinks_with_zoom(#[case] z1: u8, #[case] z2: u8) {
	let grow = |z: u8| {
		let tile = TileRef::new(z, 0, 0, 32, 3857).unwrap();
		tile.buffered_extent().0.width() - tile.extent().0.width()
	};
	assert!(grow(z2) < grow(z1));
	assert_relative_eq!(grow(z1) / grow(z2), f64::from(1u32 << (z2 - z1)), max_relative = 1e-6);
}

#[test]
fn instantiate_from_config_file() {
	let registry = demo_registry();
	let config = ProvidersConfig::from_path(Path::new("../testdata/providers.yml")).unwrap();
	let tilers = registry.instantiate_all(&config).unwrap();
	let summary: Vec<_> = tilers.iter().map(|(name, t)| (name.as_str(), t.provider_type())).collect();
	assert_eq!(
		summary,
		vec![("roads", ProviderType::Standard), ("basemap", ProviderType::Mvt)]
	);
}

#[test]
fn cleanup_is_isolated_per_driver() {
	let closed = Arc::new(AtomicBool::new(false));
	let mut registry = demo_registry();
	let flag = closed.clone();
	registry
		.register(
			"pool",
			demo_init,
			Some(Arc::new(move || flag.store(true, Ordering::SeqCst))),
		)
		.unwrap();
	registry
		.register_mvt("broken", demo_mvt_init, Some(Arc::new(broken_cleanup)))
		.unwrap();

	assert_eq!(registry.cleanup(), vec!["broken"]);
	assert!(closed.load(Ordering::SeqCst));
	assert!(registry.contains("broken"));
}
