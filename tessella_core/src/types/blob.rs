//! Encoded tile payloads.
//!
//! ```rust
//! use tessella_core::Blob;
//!
//! let blob = Blob::from(vec![0x1a, 0x02, 0x78, 0x02]);
//! assert_eq!(blob.len(), 4);
//! assert!(!blob.is_empty());
//! assert_eq!(format!("{blob:?}"), "Blob(4): 1a 02 78 02");
//! ```

use anyhow::Result;
use std::fmt::Debug;

/// Number of leading bytes shown by `Debug`.
const DEBUG_PREVIEW: usize = 16;

/// Bytes of a fully encoded tile, as returned by MVT providers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Interprets the bytes as UTF-8.
	///
	/// # Errors
	/// Fails if the content is not valid UTF-8.
	pub fn as_str(&self) -> Result<&str> {
		Ok(std::str::from_utf8(&self.0)?)
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({})", self.0.len())?;
		if self.0.is_empty() {
			return Ok(());
		}
		f.write_str(":")?;
		for byte in self.0.iter().take(DEBUG_PREVIEW) {
			write!(f, " {byte:02x}")?;
		}
		if self.0.len() > DEBUG_PREVIEW {
			f.write_str(" …")?;
		}
		Ok(())
	}
}
