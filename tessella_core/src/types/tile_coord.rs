//! Validated zoom/x/y coordinates in the slippy tile pyramid.
//!
//! ```
//! use tessella_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.level, 5);
//! assert_eq!(coord.max_value(), 31);
//! assert!(TileCoord::new(2, 4, 0).is_err());
//! ```

use anyhow::{Result, ensure};
use std::{
	cmp::Ordering,
	fmt::{self, Debug, Display},
};

/// Highest zoom level a `TileCoord` can address.
pub const MAX_LEVEL: u8 = 31;

/// A tile coordinate with zoom level, column (`x`) and row (`y`).
///
/// Row 0 is the northernmost row, as in the XYZ/slippy scheme.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile.
	pub x: u32,
	/// The y index of the tile.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at zoom `level` with indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or if `x`/`y` fall outside `0..2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		let max = 1u64 << level;
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Number of tiles along one axis at this level (`2^level`).
	#[must_use]
	pub fn size(&self) -> u64 {
		1u64 << self.level
	}

	/// Get the maximum valid x or y index for this tile's zoom level (`2^level - 1`).
	#[must_use]
	pub fn max_value(&self) -> u32 {
		((1u64 << self.level) - 1) as u32
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

/// Ordered by zoom `level`, then `y`, then `x`.
impl Ord for TileCoord {
	fn cmp(&self, other: &Self) -> Ordering {
		self
			.level
			.cmp(&other.level)
			.then(self.y.cmp(&other.y))
			.then(self.x.cmp(&other.x))
	}
}

impl PartialOrd for TileCoord {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
