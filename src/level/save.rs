//! Save-file assembler
//!
//! A save file is the packed tileset followed by level records until the end of
//! the data. The level count is not stored: decoding reads levels until the
//! input runs out and fills the rest of the layout's slots with blank levels.

use super::record::{encode_levels, load_level_from_data, GameSchema, Level};
use crate::common::SaveFileLayout;
use crate::graphics::Tileset;
use crate::primitives::ByteReader;
use crate::Result;
use log::{debug, warn};

/// Decoded contents of a save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    /// Shared tileset graphics
    pub tileset: Tileset,
    /// Levels in play order
    pub levels: Vec<Level>,
}

impl SaveFile {
    /// A save file with a transparent tileset and blank levels
    pub fn blank(layout: &SaveFileLayout) -> Result<Self> {
        Ok(Self {
            tileset: Tileset::blank(layout)?,
            levels: vec![Level::blank(); layout.level_count],
        })
    }

    /// Decode a save file
    pub fn decode(data: &[u8], layout: &SaveFileLayout, schema: &GameSchema) -> Result<Self> {
        Self::decode_with_progress(data, layout, schema, |_| {})
    }

    /// Decode a save file, calling `on_level` with the running level count
    pub fn decode_with_progress<F>(
        data: &[u8],
        layout: &SaveFileLayout,
        schema: &GameSchema,
        mut on_level: F,
    ) -> Result<Self>
    where
        F: FnMut(usize),
    {
        let mut reader = ByteReader::new(data);
        let tileset = Tileset::from_bytes(layout, reader.take(layout.tileset_byte_len()?)?)?;
        debug!(
            "tileset occupies {} bytes, {} bytes of level data follow",
            reader.position(),
            reader.remaining()
        );

        let mut levels = Vec::with_capacity(layout.level_count);
        let mut rest = reader.rest();
        while !rest.is_empty() {
            let (level, tail) = load_level_from_data(rest, schema)?;
            levels.push(level);
            rest = tail;
            on_level(levels.len());
        }

        if levels.len() > layout.level_count {
            warn!(
                "save file holds {} levels, layout expects {}",
                levels.len(),
                layout.level_count
            );
        } else if levels.len() < layout.level_count {
            debug!(
                "padding {} stored levels with {} blank levels",
                levels.len(),
                layout.level_count - levels.len()
            );
            levels.resize(layout.level_count, Level::blank());
        }

        Ok(Self { tileset, levels })
    }

    /// Encode the save file
    pub fn encode(&self, schema: &GameSchema) -> Result<Vec<u8>> {
        let mut output = self.tileset.to_bytes()?;
        output.extend(encode_levels(&self.levels, schema)?);
        debug!(
            "encoded save file: {} levels, {} bytes",
            self.levels.len(),
            output.len()
        );
        Ok(output)
    }
}
