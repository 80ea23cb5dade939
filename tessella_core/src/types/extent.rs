use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An axis-aligned bounding box in projected coordinates.
///
/// Unlike a geographic bounding box the values are not limited to degrees;
/// for Web Mercator they are meters in the range `±20037508.342789244`.
///
/// # Examples
///
/// ```
/// use tessella_core::Extent;
///
/// let extent = Extent::new(-10.0, -5.0, 10.0, 5.0).unwrap();
/// assert_eq!(extent.width(), 20.0);
/// assert_eq!(extent.expanded_by(1.0).as_tuple(), (-11.0, -6.0, 11.0, 6.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Extent {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl Extent {
	/// Creates a new `Extent` from `x_min, y_min, x_max, y_max`.
	///
	/// # Errors
	/// Fails if a value is not finite or if a minimum exceeds its maximum.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Extent> {
		Extent {
			x_min,
			y_min,
			x_max,
			y_max,
		}
		.checked()
	}

	#[must_use]
	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	#[must_use]
	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	#[must_use]
	pub fn center(&self) -> [f64; 2] {
		[(self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0]
	}

	/// Returns `[x_min, y_min, x_max, y_max]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Boundaries are inclusive.
	#[must_use]
	pub fn contains_point(&self, x: f64, y: f64) -> bool {
		x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
	}

	/// Returns `true` if both extents share at least one point, edges included.
	#[must_use]
	pub fn intersects(&self, other: &Extent) -> bool {
		self.x_min <= other.x_max && other.x_min <= self.x_max && self.y_min <= other.y_max && other.y_min <= self.y_max
	}

	/// Grows every side of the extent by `distance` in place.
	///
	/// A negative `distance` shrinks the extent. If it would shrink past the
	/// center on an axis, that axis collapses to the center.
	pub fn expand_by(&mut self, distance: f64) {
		let [cx, cy] = self.center();
		self.x_min = (self.x_min - distance).min(cx);
		self.y_min = (self.y_min - distance).min(cy);
		self.x_max = (self.x_max + distance).max(cx);
		self.y_max = (self.y_max + distance).max(cy);
	}

	/// Non-mutating version of [`expand_by`](Self::expand_by).
	#[must_use]
	pub fn expanded_by(mut self, distance: f64) -> Extent {
		self.expand_by(distance);
		self
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			self.as_array().iter().all(|v| v.is_finite()),
			"extent values must be finite: {self:?}"
		);
		ensure!(
			self.x_min <= self.x_max,
			"x_min ({}) must be <= x_max ({})",
			self.x_min,
			self.x_max
		);
		ensure!(
			self.y_min <= self.y_max,
			"y_min ({}) must be <= y_max ({})",
			self.y_min,
			self.y_max
		);
		Ok(self)
	}
}

impl Debug for Extent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Extent({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

impl TryFrom<[f64; 4]> for Extent {
	type Error = anyhow::Error;

	fn try_from(input: [f64; 4]) -> Result<Self> {
		Extent::new(input[0], input[1], input[2], input[3])
	}
}
