//! Object type table
//!
//! The game defines which objects exist and what each one stores. The codec
//! only consumes that definition: an ordered list of object types, where a
//! type's position is its wire tag and its field list fixes the byte layout
//! that follows the tag.

use super::object::MapObject;
use crate::common::LAYER_TERMINATOR;
use crate::primitives::{WireType, WireValue};
use crate::{LevelCodecError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One field of an object or goal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Wire encoding of the field
    pub wire: WireType,
    /// Field name
    pub key: String,
}

impl FieldSpec {
    /// Create a field spec
    pub fn new(wire: WireType, key: &str) -> Self {
        Self {
            wire,
            key: key.to_string(),
        }
    }
}

/// Field layout of one object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Human-readable type name
    pub name: String,
    /// Fields in wire order
    pub fields: Vec<FieldSpec>,
}

impl ObjectType {
    /// Create an object type
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    /// Encoded size of an object of this type, excluding its tag
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(|field| field.wire.size()).sum()
    }

    /// Field spec for `key`
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }
}

/// Ordered object types; the index of a type is its tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ObjectType>", into = "Vec<ObjectType>")]
pub struct ObjectTypeTable {
    types: Vec<ObjectType>,
}

impl ObjectTypeTable {
    /// Create a table; the terminator value cannot be a tag
    pub fn new(types: Vec<ObjectType>) -> Result<Self> {
        if types.len() > LAYER_TERMINATOR as usize {
            return Err(LevelCodecError::ValueOutOfRange(format!(
                "{} object types (maximum {})",
                types.len(),
                LAYER_TERMINATOR
            )));
        }
        Ok(Self { types })
    }

    /// Number of object types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are defined
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type for a tag
    pub fn get(&self, type_tag: u16) -> Result<&ObjectType> {
        self.types
            .get(type_tag as usize)
            .ok_or(LevelCodecError::UnknownObjectType(type_tag))
    }

    /// Tag of the type with the given name
    pub fn tag_of(&self, name: &str) -> Option<u16> {
        self.types
            .iter()
            .position(|object_type| object_type.name == name)
            .map(|index| index as u16)
    }

    /// Iterate over `(tag, type)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ObjectType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, object_type)| (index as u16, object_type))
    }

    /// Default-construct an object of the given type at a position
    ///
    /// `x` and `y` are set when the type declares them; every other field is
    /// zero.
    pub fn instantiate(&self, type_tag: u16, x: f64, y: f64) -> Result<MapObject> {
        let object_type = self.get(type_tag)?;
        let mut fields = BTreeMap::new();
        for field in &object_type.fields {
            let value = match field.key.as_str() {
                "x" => WireValue::from_f64(field.wire, x, "x")?,
                "y" => WireValue::from_f64(field.wire, y, "y")?,
                _ => WireValue::zero(field.wire),
            };
            fields.insert(field.key.clone(), value);
        }
        Ok(MapObject::new(type_tag, fields))
    }
}

impl TryFrom<Vec<ObjectType>> for ObjectTypeTable {
    type Error = LevelCodecError;

    fn try_from(types: Vec<ObjectType>) -> Result<Self> {
        Self::new(types)
    }
}

impl From<ObjectTypeTable> for Vec<ObjectType> {
    fn from(table: ObjectTypeTable) -> Self {
        table.types
    }
}
