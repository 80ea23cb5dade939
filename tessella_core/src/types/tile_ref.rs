//! The tile reference handed to providers.
//!
//! A [`TileRef`] is a validated zoom/x/y coordinate plus a buffer in tile
//! pixels. Providers use it to compute the area they have to query:
//! [`TileRef::extent`] for the tile itself and [`TileRef::buffered_extent`]
//! for the tile grown by the buffer, so geometries crossing the tile edge are
//! not clipped.
//!
//! Extents are always returned in Web Mercator (EPSG:3857), whatever SRID was
//! requested at construction.
//!
//! # Examples
//!
//! ```
//! use tessella_core::TileRef;
//!
//! let tile = TileRef::new(3, 4, 2, 64, 3857).unwrap();
//! assert_eq!(tile.zxy(), (3, 4, 2));
//!
//! let (extent, _) = tile.extent();
//! let (buffered, srid) = tile.buffered_extent();
//! assert_eq!(srid, 3857);
//! assert!(buffered.width() > extent.width());
//! ```

use crate::{
	Extent, TileCoord,
	mercator::{WEB_MERCATOR_SRID, pixels_to_meters, tile_extent},
};
use anyhow::{Context, Result};
use std::fmt::{self, Display};

/// Immutable reference to one tile of a tile request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRef {
	coord: TileCoord,
	buffer: u32,
	requested_srid: u64,
}

impl TileRef {
	/// Creates a tile reference.
	///
	/// * `zoom`, `x`, `y` - the tile in the slippy scheme.
	/// * `buffer` - margin around the tile, in tile pixels (see [`crate::mercator::TILE_PIXELS`]).
	/// * `srid` - the SRID the caller asked for. It is kept for inspection only;
	///   extents are always computed in EPSG:3857.
	///
	/// # Errors
	/// Fails if the coordinate is not valid for the zoom level.
	pub fn new(zoom: u8, x: u32, y: u32, buffer: u32, srid: u64) -> Result<TileRef> {
		let coord = TileCoord::new(zoom, x, y).with_context(|| format!("invalid tile {zoom}/{x}/{y}"))?;
		if srid != WEB_MERCATOR_SRID {
			log::debug!("tile {coord}: requested srid {srid} ignored, extents are EPSG:{WEB_MERCATOR_SRID}");
		}
		Ok(TileRef {
			coord,
			buffer,
			requested_srid: srid,
		})
	}

	/// Creates a tile reference in Web Mercator from an existing coordinate.
	#[must_use]
	pub fn from_coord(coord: TileCoord, buffer: u32) -> TileRef {
		TileRef {
			coord,
			buffer,
			requested_srid: WEB_MERCATOR_SRID,
		}
	}

	/// Returns the `(zoom, x, y)` triple as given at construction.
	#[must_use]
	pub fn zxy(&self) -> (u8, u32, u32) {
		(self.coord.level, self.coord.x, self.coord.y)
	}

	#[must_use]
	pub fn coord(&self) -> TileCoord {
		self.coord
	}

	/// The buffer in tile pixels.
	#[must_use]
	pub fn buffer(&self) -> u32 {
		self.buffer
	}

	#[must_use]
	pub fn requested_srid(&self) -> u64 {
		self.requested_srid
	}

	/// Bounds of the tile without buffer, and the SRID they are expressed in.
	#[must_use]
	pub fn extent(&self) -> (Extent, u64) {
		(tile_extent(&self.coord), WEB_MERCATOR_SRID)
	}

	/// Bounds of the tile grown on every side by the buffer, and the SRID they are expressed in.
	#[must_use]
	pub fn buffered_extent(&self) -> (Extent, u64) {
		let margin = pixels_to_meters(self.coord.level, self.buffer);
		(tile_extent(&self.coord).expanded_by(margin), WEB_MERCATOR_SRID)
	}
}

impl Display for TileRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.coord, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mercator::{MAX_EXTENT, world_extent};
	use approx::assert_relative_eq;
	use rstest::rstest;

	#[test]
	fn world_tile() {
		let tile = TileRef::new(0, 0, 0, 0, 3857).unwrap();
		assert_eq!(tile.zxy(), (0, 0, 0));
		assert_eq!(tile.extent(), (world_extent(), 3857));
		assert_eq!(tile.to_string(), "0/0/0");
	}

	#[test]
	fn invalid_coordinate() {
		let err = TileRef::new(2, 4, 0, 0, 3857).unwrap_err();
		assert_eq!(err.to_string(), "invalid tile 2/4/0");
	}

	#[rstest]
	#[case(0, 0, 0)]
	#[case(5, 10, 20)]
	#[case(18, 140_000, 90_000)]
	fn zero_buffer_matches_extent(#[case] z: u8, #[case] x: u32, #[case] y: u32) {
		let tile = TileRef::new(z, x, y, 0, 3857).unwrap();
		assert_eq!(tile.buffered_extent(), tile.extent());
	}

	#[test]
	fn buffer_grows_every_side() {
		let tile = TileRef::new(1, 0, 0, 64, 3857).unwrap();
		let (extent, _) = tile.extent();
		let (buffered, _) = tile.buffered_extent();
		let margin = MAX_EXTENT / 4096.0 * 64.0;
		assert_relative_eq!(extent.x_min - buffered.x_min, margin, max_relative = 1e-9);
		assert_relative_eq!(extent.y_min - buffered.y_min, margin, max_relative = 1e-9);
		assert_relative_eq!(buffered.x_max - extent.x_max, margin, max_relative = 1e-9);
		assert_relative_eq!(buffered.y_max - extent.y_max, margin, max_relative = 1e-9);
	}

	#[test]
	fn buffer_shrinks_with_zoom() {
		let growth = |z: u8| {
			let tile = TileRef::new(z, 0, 0, 64, 3857).unwrap();
			tile.buffered_extent().0.width() - tile.extent().0.width()
		};
		for z in 0..20 {
			assert!(growth(z + 1) < growth(z), "zoom {z}");
			assert_relative_eq!(growth(z), 2.0 * growth(z + 1), max_relative = 1e-6);
		}
	}

	#[test]
	fn requested_srid_does_not_change_extent() {
		let mercator = TileRef::new(4, 3, 5, 16, 3857).unwrap();
		let wgs84 = TileRef::new(4, 3, 5, 16, 4326).unwrap();
		assert_eq!(wgs84.requested_srid(), 4326);
		assert_eq!(wgs84.extent(), mercator.extent());
		assert_eq!(wgs84.buffered_extent(), mercator.buffered_extent());
	}

	#[test]
	fn from_coord() {
		let tile = TileRef::from_coord(TileCoord::new(3, 1, 2).unwrap(), 8);
		assert_eq!(tile.zxy(), (3, 1, 2));
		assert_eq!(tile.buffer(), 8);
		assert_eq!(tile.requested_srid(), WEB_MERCATOR_SRID);
	}
}
