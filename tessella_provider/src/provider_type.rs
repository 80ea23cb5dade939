use enumset::{EnumSet, EnumSetType};
use std::fmt::{self, Display};

/// The two provider flavors sharing one registry name space.
///
/// * **`Standard`** – streams decoded features through [`crate::StandardTiler`].
/// * **`Mvt`** – returns pre-encoded vector tiles through [`crate::MvtTiler`].
#[derive(EnumSetType, Debug, Hash)]
pub enum ProviderType {
	Standard,
	Mvt,
}

/// Selects provider flavors when listing registered names.
///
/// Combine flavors with `|`:
///
/// ```
/// use tessella_provider::{ProviderFilter, ProviderType};
///
/// let all: ProviderFilter = ProviderType::Standard | ProviderType::Mvt;
/// assert_eq!(all, ProviderFilter::all());
/// assert!(ProviderFilter::empty().is_empty());
/// ```
pub type ProviderFilter = EnumSet<ProviderType>;

/// Selects no flavor at all.
pub fn filter_none() -> ProviderFilter {
	EnumSet::empty()
}

/// Selects every flavor.
pub fn filter_all() -> ProviderFilter {
	EnumSet::all()
}

impl ProviderType {
	/// Conventional prefix for names registered with this flavor.
	pub fn prefix(self) -> &'static str {
		match self {
			ProviderType::Standard => "",
			ProviderType::Mvt => "mvt_",
		}
	}

	/// A filter selecting only this flavor.
	pub fn filter(self) -> ProviderFilter {
		EnumSet::only(self)
	}
}

impl Display for ProviderType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ProviderType::Standard => "Standard Provider",
			ProviderType::Mvt => "MVT Provider",
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefix_and_display() {
		assert_eq!(ProviderType::Standard.prefix(), "");
		assert_eq!(ProviderType::Mvt.prefix(), "mvt_");
		assert_eq!(ProviderType::Standard.to_string(), "Standard Provider");
		assert_eq!(ProviderType::Mvt.to_string(), "MVT Provider");
	}

	#[test]
	fn filters() {
		let standard = ProviderType::Standard.filter();
		assert!(standard.contains(ProviderType::Standard));
		assert!(!standard.contains(ProviderType::Mvt));
		assert_eq!(standard | ProviderType::Mvt.filter(), ProviderFilter::all());
		assert_eq!(ProviderFilter::all().len(), 2);
		assert_eq!(filter_all(), ProviderFilter::all());
		assert!(filter_none().is_empty());
	}
}
