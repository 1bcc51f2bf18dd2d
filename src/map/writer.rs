//! Map encoding
//!
//! The structural inverse of the reader: header, then for each layer its scroll
//! speed, its objects as tag plus fields in schema order, and the terminator.

use super::layer::LevelMap;
use super::object::MapObject;
use super::schema::ObjectTypeTable;
use crate::common::LAYER_TERMINATOR;
use crate::primitives::ByteWriter;
use crate::{LevelCodecError, Result};
use log::trace;

fn write_object(
    writer: &mut ByteWriter,
    object: &MapObject,
    table: &ObjectTypeTable,
) -> Result<()> {
    let type_tag = object.type_tag();
    if type_tag == LAYER_TERMINATOR {
        return Err(LevelCodecError::UnknownObjectType(type_tag));
    }
    let object_type = table.get(type_tag)?;

    writer.write_u16(type_tag);
    for field in &object_type.fields {
        let value = object
            .get(&field.key)
            .ok_or_else(|| LevelCodecError::MissingField {
                type_tag,
                key: field.key.clone(),
            })?;
        writer.write(value.coerce(field.wire, &field.key)?);
    }
    Ok(())
}

/// Encode a map blob
pub fn map_to_bytes(map: &LevelMap, table: &ObjectTypeTable) -> Result<Vec<u8>> {
    let layer_count = u8::try_from(map.layers().len()).map_err(|_| {
        LevelCodecError::ValueOutOfRange(format!(
            "{} layers (maximum 255)",
            map.layers().len()
        ))
    })?;

    let mut writer = ByteWriter::new();
    writer.write_u16(map.width());
    writer.write_u16(map.height());
    writer.write_u8(layer_count);

    for layer in map.layers() {
        writer.write_f32(layer.scroll_x());
        for object in layer.objects() {
            write_object(&mut writer, object, table)?;
        }
        writer.write_u16(LAYER_TERMINATOR);
    }

    trace!(
        "encoded {}x{} map with {} objects into {} bytes",
        map.width(),
        map.height(),
        map.object_count(),
        writer.len()
    );
    Ok(writer.into_inner())
}
