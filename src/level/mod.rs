//! Levels and save files
//!
//! A level record carries a Huffman-coded name, a goal and its map blobs; a
//! save file is the packed tileset followed by level records.

mod goal;
mod record;
mod save;

pub use goal::{Goal, GoalTable, GoalTemplate};
pub use record::{
    decode_levels, encode_level, encode_levels, load_level_from_data, GameSchema, Level,
};
pub use save::SaveFile;
