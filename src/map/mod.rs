//! Object, layer and map binary format
//!
//! Maps are persisted as self-describing blobs whose object records are laid
//! out by an external [`ObjectTypeTable`]. This module converts between blobs
//! and the structured [`LevelMap`] and locates map boundaries inside larger
//! buffers.

mod layer;
mod object;
mod reader;
mod schema;
mod writer;

pub use layer::{Layer, LayerKind, LevelMap};
pub use object::MapObject;
pub use reader::{
    bytes_to_map, map_byte_len, split_maps, walk_map, MapReader, MapVisitor, ReadState,
};
pub use schema::{FieldSpec, ObjectType, ObjectTypeTable};
pub use writer::map_to_bytes;
