//! Layers and maps
//!
//! Both are plain values. Every edit returns a new `Layer` or `LevelMap` and
//! leaves the original untouched, which is what the editor's history relies on.

use super::object::MapObject;
use crate::{LevelCodecError, Result};
use serde::Serialize;

/// Kind of layer; only block layers exist today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LayerKind {
    /// Layer of placed block objects
    #[default]
    Block,
}

/// An ordered list of objects with a scroll speed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layer {
    kind: LayerKind,
    scroll_x: f32,
    objects: Vec<MapObject>,
}

fn out_of_range(what: &str, index: usize, len: usize) -> LevelCodecError {
    LevelCodecError::ValueOutOfRange(format!("{what} index {index} (length {len})"))
}

impl Layer {
    /// An empty block layer scrolling at full speed
    pub fn new() -> Self {
        Self {
            kind: LayerKind::Block,
            scroll_x: 1.0,
            objects: Vec::new(),
        }
    }

    /// A block layer with the given scroll speed and objects
    pub fn with_objects(scroll_x: f32, objects: Vec<MapObject>) -> Self {
        Self {
            kind: LayerKind::Block,
            scroll_x,
            objects,
        }
    }

    /// Layer kind
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Horizontal scroll speed relative to the camera
    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    /// Objects in draw order
    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    /// Copy with a different scroll speed
    pub fn with_scroll_x(&self, scroll_x: f32) -> Self {
        Self {
            scroll_x,
            ..self.clone()
        }
    }

    /// Copy with `object` appended
    pub fn with_object(&self, object: MapObject) -> Self {
        let mut next = self.clone();
        next.objects.push(object);
        next
    }

    /// Copy with `object` inserted before `index`
    pub fn with_object_inserted(&self, index: usize, object: MapObject) -> Result<Self> {
        if index > self.objects.len() {
            return Err(out_of_range("object", index, self.objects.len()));
        }
        let mut next = self.clone();
        next.objects.insert(index, object);
        Ok(next)
    }

    /// Copy with the object at `index` replaced
    pub fn with_object_replaced(&self, index: usize, object: MapObject) -> Result<Self> {
        if index >= self.objects.len() {
            return Err(out_of_range("object", index, self.objects.len()));
        }
        let mut next = self.clone();
        next.objects[index] = object;
        Ok(next)
    }

    /// Copy without the object at `index`
    pub fn without_object(&self, index: usize) -> Result<Self> {
        if index >= self.objects.len() {
            return Err(out_of_range("object", index, self.objects.len()));
        }
        let mut next = self.clone();
        next.objects.remove(index);
        Ok(next)
    }

    /// Copy with the object at `from` moved to position `to`
    pub fn with_object_moved(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.objects.len();
        if from >= len {
            return Err(out_of_range("object", from, len));
        }
        if to >= len {
            return Err(out_of_range("object", to, len));
        }
        let mut next = self.clone();
        let object = next.objects.remove(from);
        next.objects.insert(to, object);
        Ok(next)
    }
}

/// A map: dimensions in blocks and a stack of layers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelMap {
    width: u16,
    height: u16,
    layers: Vec<Layer>,
}

impl LevelMap {
    /// A map with a single empty layer
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            layers: vec![Layer::new()],
        }
    }

    /// A map with the given layers
    pub fn with_layers(width: u16, height: u16, layers: Vec<Layer>) -> Self {
        Self {
            width,
            height,
            layers,
        }
    }

    /// Width in blocks
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in blocks
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Layers, back to front
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Total number of objects across all layers
    pub fn object_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.objects().len()).sum()
    }

    /// Copy with new dimensions
    pub fn resized(&self, width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            layers: self.layers.clone(),
        }
    }

    /// Copy with `layer` inserted before `index`
    pub fn with_layer_inserted(&self, index: usize, layer: Layer) -> Result<Self> {
        if index > self.layers.len() {
            return Err(out_of_range("layer", index, self.layers.len()));
        }
        let mut next = self.clone();
        next.layers.insert(index, layer);
        Ok(next)
    }

    /// Copy with the layer at `index` replaced
    pub fn with_layer_replaced(&self, index: usize, layer: Layer) -> Result<Self> {
        if index >= self.layers.len() {
            return Err(out_of_range("layer", index, self.layers.len()));
        }
        let mut next = self.clone();
        next.layers[index] = layer;
        Ok(next)
    }

    /// Copy without the layer at `index`
    pub fn without_layer(&self, index: usize) -> Result<Self> {
        if index >= self.layers.len() {
            return Err(out_of_range("layer", index, self.layers.len()));
        }
        let mut next = self.clone();
        next.layers.remove(index);
        Ok(next)
    }
}
