//! Map decoding state machine
//!
//! A map blob is `Uint16 width, Uint16 height, Uint8 layerCount` followed by
//! the layers. Each layer is a `Float32` scroll speed, then tagged objects, then
//! a `0xFFFF` terminator tag.
//!
//! The same machine drives full decoding and the skip-only walks used to find
//! where a map ends inside a larger buffer. Only the visitor differs, so split
//! boundaries always agree with what a full decode consumes.

use super::layer::{Layer, LevelMap};
use super::object::MapObject;
use super::schema::ObjectTypeTable;
use crate::common::LAYER_TERMINATOR;
use crate::primitives::{ByteReader, WireValue};
use crate::{LevelCodecError, Result};
use log::trace;
use std::collections::BTreeMap;

/// Receives the contents of a map as the reader walks it
///
/// Every method has an empty default; `()` is the skip-only visitor.
pub trait MapVisitor {
    /// Map header
    fn header(&mut self, _width: u16, _height: u16, _layer_count: u8) {}
    /// Start of a layer
    fn begin_layer(&mut self, _scroll_x: f32) {}
    /// Start of an object
    fn begin_object(&mut self, _type_tag: u16) {}
    /// One field of the current object, in schema order
    fn field(&mut self, _key: &str, _value: WireValue) {}
    /// End of the current object
    fn end_object(&mut self) {}
    /// End of the current layer
    fn end_layer(&mut self) {}
}

impl MapVisitor for () {}

/// State of the map reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Next comes a layer's scroll speed
    ReadingLayerOptions,
    /// Next comes an object tag or the layer terminator
    ReadingType,
    /// Next come the fields of an object with this tag
    ReadingObjectData {
        /// Tag read in the previous state
        type_tag: u16,
    },
    /// All layers have been read
    Done,
}

/// Streaming reader over one map blob
#[derive(Debug)]
pub struct MapReader<'a, 't> {
    reader: ByteReader<'a>,
    table: &'t ObjectTypeTable,
    state: ReadState,
    layer_count: u8,
    layers_read: u8,
}

impl<'a, 't> MapReader<'a, 't> {
    /// Read the header and position the reader at the first layer
    pub fn new<V: MapVisitor>(
        data: &'a [u8],
        table: &'t ObjectTypeTable,
        visitor: &mut V,
    ) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;
        let layer_count = reader.read_u8()?;
        visitor.header(width, height, layer_count);
        trace!("map header {width}x{height}, {layer_count} layers");

        let state = if layer_count == 0 {
            ReadState::Done
        } else {
            ReadState::ReadingLayerOptions
        };
        Ok(Self {
            reader,
            table,
            state,
            layer_count,
            layers_read: 0,
        })
    }

    /// Current state
    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Bytes consumed so far, header included
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Perform one transition and return the new state
    pub fn step<V: MapVisitor>(&mut self, visitor: &mut V) -> Result<ReadState> {
        self.state = match self.state {
            ReadState::ReadingLayerOptions => {
                let scroll_x = self.reader.read_f32()?;
                visitor.begin_layer(scroll_x);
                ReadState::ReadingType
            }
            ReadState::ReadingType => {
                let type_tag = self.reader.read_u16()?;
                if type_tag == LAYER_TERMINATOR {
                    visitor.end_layer();
                    self.layers_read += 1;
                    trace!(
                        "layer {}/{} ends at byte {}",
                        self.layers_read,
                        self.layer_count,
                        self.reader.position()
                    );
                    if self.layers_read == self.layer_count {
                        ReadState::Done
                    } else {
                        ReadState::ReadingLayerOptions
                    }
                } else {
                    ReadState::ReadingObjectData { type_tag }
                }
            }
            ReadState::ReadingObjectData { type_tag } => {
                let object_type = self.table.get(type_tag)?;
                visitor.begin_object(type_tag);
                for field in &object_type.fields {
                    let value = self.reader.read(field.wire)?;
                    visitor.field(&field.key, value);
                }
                visitor.end_object();
                ReadState::ReadingType
            }
            ReadState::Done => ReadState::Done,
        };
        Ok(self.state)
    }

    /// Run to the end of the map and return the number of bytes it occupies
    pub fn finish<V: MapVisitor>(mut self, visitor: &mut V) -> Result<usize> {
        while self.state != ReadState::Done {
            self.step(visitor)?;
        }
        Ok(self.reader.position())
    }
}

/// Walk one map at the front of `data`, returning its length in bytes
pub fn walk_map<V: MapVisitor>(
    data: &[u8],
    table: &ObjectTypeTable,
    visitor: &mut V,
) -> Result<usize> {
    MapReader::new(data, table, visitor)?.finish(visitor)
}

/// Visitor that materializes a [`LevelMap`]
#[derive(Debug, Default)]
struct MapBuilder {
    width: u16,
    height: u16,
    layers: Vec<Layer>,
    scroll_x: f32,
    objects: Vec<MapObject>,
    type_tag: u16,
    fields: BTreeMap<String, WireValue>,
}

impl MapVisitor for MapBuilder {
    fn header(&mut self, width: u16, height: u16, layer_count: u8) {
        self.width = width;
        self.height = height;
        self.layers = Vec::with_capacity(layer_count as usize);
    }

    fn begin_layer(&mut self, scroll_x: f32) {
        self.scroll_x = scroll_x;
    }

    fn begin_object(&mut self, type_tag: u16) {
        self.type_tag = type_tag;
    }

    fn field(&mut self, key: &str, value: WireValue) {
        self.fields.insert(key.to_string(), value);
    }

    fn end_object(&mut self) {
        let fields = std::mem::take(&mut self.fields);
        self.objects.push(MapObject::new(self.type_tag, fields));
    }

    fn end_layer(&mut self) {
        let objects = std::mem::take(&mut self.objects);
        self.layers.push(Layer::with_objects(self.scroll_x, objects));
    }
}

/// Decode the map at the front of `data`
///
/// Bytes after the end of the map are ignored; use [`map_byte_len`] to find
/// where it ends.
pub fn bytes_to_map(data: &[u8], table: &ObjectTypeTable) -> Result<LevelMap> {
    let mut builder = MapBuilder::default();
    walk_map(data, table, &mut builder)?;
    Ok(LevelMap::with_layers(
        builder.width,
        builder.height,
        builder.layers,
    ))
}

/// Length of the map at the front of `data`, without building it
pub fn map_byte_len(data: &[u8], table: &ObjectTypeTable) -> Result<usize> {
    walk_map(data, table, &mut ())
}

/// Carve `count` consecutive maps off the front of `data`
///
/// Returns the map blobs and the bytes that follow the last one.
pub fn split_maps<'a>(
    data: &'a [u8],
    count: usize,
    table: &ObjectTypeTable,
) -> Result<(Vec<&'a [u8]>, &'a [u8])> {
    let mut maps = Vec::with_capacity(count);
    let mut rest = data;
    for index in 0..count {
        let len = map_byte_len(rest, table).map_err(|err| match err {
            LevelCodecError::BufferUnderrun {
                offset,
                needed,
                available,
            } => LevelCodecError::BufferUnderrun {
                offset: offset + (data.len() - rest.len()),
                needed,
                available,
            },
            other => other,
        })?;
        trace!("map {index} spans {len} bytes");
        let (map, tail) = rest.split_at(len);
        maps.push(map);
        rest = tail;
    }
    Ok((maps, rest))
}
