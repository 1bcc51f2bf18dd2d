//! Placed map objects

use crate::primitives::WireValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// An object instance: a type tag and the values of its fields
///
/// Objects are values; edits produce a new object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapObject {
    type_tag: u16,
    fields: BTreeMap<String, WireValue>,
}

impl MapObject {
    /// Create an object from its fields
    pub fn new(type_tag: u16, fields: BTreeMap<String, WireValue>) -> Self {
        Self { type_tag, fields }
    }

    /// Tag selecting the object's type
    pub fn type_tag(&self) -> u16 {
        self.type_tag
    }

    /// Value of a field
    pub fn get(&self, key: &str) -> Option<WireValue> {
        self.fields.get(key).copied()
    }

    /// All fields by name
    pub fn fields(&self) -> &BTreeMap<String, WireValue> {
        &self.fields
    }

    /// Horizontal position, if the type has one
    pub fn x(&self) -> Option<f64> {
        self.get("x").map(|value| value.as_f64())
    }

    /// Vertical position, if the type has one
    pub fn y(&self) -> Option<f64> {
        self.get("y").map(|value| value.as_f64())
    }

    /// Copy of this object with `updates` merged over its fields
    pub fn with_fields<I, K>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (K, WireValue)>,
        K: Into<String>,
    {
        let mut next = self.clone();
        next.fields
            .extend(updates.into_iter().map(|(key, value)| (key.into(), value)));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fields_leaves_original() {
        let object = MapObject::new(
            0,
            BTreeMap::from([
                ("x".to_string(), WireValue::U16(1)),
                ("y".to_string(), WireValue::U16(2)),
            ]),
        );
        let moved = object.with_fields([("x", WireValue::U16(10))]);

        assert_eq!(object.x(), Some(1.0));
        assert_eq!(moved.x(), Some(10.0));
        assert_eq!(moved.y(), Some(2.0));
        assert_eq!(moved.type_tag(), 0);
    }
}
