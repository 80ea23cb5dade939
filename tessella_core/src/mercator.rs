//! Web Mercator (EPSG:3857) tile math.
//!
//! All extents are in meters. Tiles follow the slippy scheme: the world is a
//! square of `2 * MAX_EXTENT` meters, split into `2^z × 2^z` tiles with row 0
//! at the north edge.

use crate::{Extent, TileCoord};

/// Spatial reference identifier of Web Mercator.
pub const WEB_MERCATOR_SRID: u64 = 3857;

/// Half the width of the Web Mercator world square, in meters.
pub const MAX_EXTENT: f64 = 20_037_508.342_789_244;

/// Resolution of one tile in pixels, matching the default MVT grid.
///
/// Tile buffers are expressed in these pixels.
pub const TILE_PIXELS: f64 = 4096.0;

/// The full extent of the projection.
#[must_use]
pub fn world_extent() -> Extent {
	Extent {
		x_min: -MAX_EXTENT,
		y_min: -MAX_EXTENT,
		x_max: MAX_EXTENT,
		y_max: MAX_EXTENT,
	}
}

/// Width (and height) of a single tile at `level`, in meters.
#[must_use]
pub fn tile_width(level: u8) -> f64 {
	2.0 * MAX_EXTENT / 2f64.powi(i32::from(level))
}

/// Converts a number of tile pixels into meters at `level`.
///
/// The result halves with every zoom level.
#[must_use]
pub fn pixels_to_meters(level: u8, pixels: u32) -> f64 {
	tile_width(level) / TILE_PIXELS * f64::from(pixels)
}

/// Bounds of the tile at `coord`, in meters.
#[must_use]
pub fn tile_extent(coord: &TileCoord) -> Extent {
	let width = tile_width(coord.level);
	let x_min = -MAX_EXTENT + f64::from(coord.x) * width;
	let y_max = MAX_EXTENT - f64::from(coord.y) * width;
	Extent {
		x_min,
		y_min: y_max - width,
		x_max: x_min + width,
		y_max,
	}
}
