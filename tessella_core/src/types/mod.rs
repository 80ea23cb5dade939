//! Contains tile coordinates, tile references, extents and byte payloads.

mod blob;
pub use blob::*;

mod extent;
pub use extent::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_ref;
pub use tile_ref::*;
