//! Contains tile references, projected extents, the Web Mercator tile math and
//! the provider configuration dictionary.
//!
//! # Examples
//!
//! ```
//! use tessella_core::{TileRef, mercator::WEB_MERCATOR_SRID};
//!
//! let tile = TileRef::new(0, 0, 0, 0, 3857).unwrap();
//! let (extent, srid) = tile.extent();
//! assert_eq!(srid, WEB_MERCATOR_SRID);
//! assert_eq!(extent.as_array(), tessella_core::mercator::world_extent().as_array());
//! ```

pub mod config;
pub use config::*;

pub mod mercator;

pub mod types;
pub use types::*;
