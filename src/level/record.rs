//! Level records
//!
//! Layout: encoded name, `Uint8` goal id, the goal template's exported options,
//! `Uint8` map count, then that many map blobs back to back.

use super::goal::{Goal, GoalTable};
use crate::map::{
    bytes_to_map, map_byte_len, map_to_bytes, split_maps, LevelMap, ObjectTypeTable,
};
use crate::primitives::{ByteReader, ByteWriter};
use crate::text::{decode_text, encode_text, test_characters};
use crate::{LevelCodecError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Game definitions the level format depends on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSchema {
    /// Object types, indexed by tag
    pub objects: ObjectTypeTable,
    /// Goal templates, indexed by goal id
    pub goals: GoalTable,
}

/// A level: name, goal and persisted maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    name: String,
    goal: Goal,
    maps: Vec<Vec<u8>>,
}

impl Level {
    /// Create a level; the name must be encodable
    pub fn new(name: &str, goal: Goal, maps: Vec<Vec<u8>>) -> Result<Self> {
        if !test_characters(name) {
            return Err(LevelCodecError::InvalidFieldValue {
                key: "name".to_string(),
                value: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_uppercase(),
            goal,
            maps,
        })
    }

    /// Create a level from structured maps
    pub fn from_maps(
        name: &str,
        goal: Goal,
        maps: &[LevelMap],
        table: &ObjectTypeTable,
    ) -> Result<Self> {
        let blobs = maps
            .iter()
            .map(|map| map_to_bytes(map, table))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, goal, blobs)
    }

    /// Unnamed level with goal 0 and no maps, used to fill a save file
    pub fn blank() -> Self {
        Self::default()
    }

    /// Name as stored (uppercase)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The level's goal
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Persisted map blobs
    pub fn maps(&self) -> &[Vec<u8>] {
        &self.maps
    }

    /// Decode every map
    pub fn decode_maps(&self, table: &ObjectTypeTable) -> Result<Vec<LevelMap>> {
        self.maps.iter().map(|map| bytes_to_map(map, table)).collect()
    }

    /// Copy under a new name
    pub fn with_name(&self, name: &str) -> Result<Self> {
        Self::new(name, self.goal.clone(), self.maps.clone())
    }

    /// Copy with a different goal
    pub fn with_goal(&self, goal: Goal) -> Self {
        Self {
            goal,
            ..self.clone()
        }
    }

    /// Copy with map `index` replaced by an encoded `map`
    pub fn with_map(
        &self,
        index: usize,
        map: &LevelMap,
        table: &ObjectTypeTable,
    ) -> Result<Self> {
        let blob = map_to_bytes(map, table)?;
        let mut next = self.clone();
        match index {
            i if i < next.maps.len() => next.maps[i] = blob,
            i if i == next.maps.len() => next.maps.push(blob),
            i => {
                return Err(LevelCodecError::ValueOutOfRange(format!(
                    "map index {i} (length {})",
                    self.maps.len()
                )))
            }
        }
        Ok(next)
    }
}

/// Decode one level from the front of `data`
///
/// Returns the level and the bytes following it.
pub fn load_level_from_data<'a>(
    data: &'a [u8],
    schema: &GameSchema,
) -> Result<(Level, &'a [u8])> {
    let name = decode_text(data)?;
    let mut reader = ByteReader::new(name.remaining);

    let goal_id = reader.read_u8()?;
    let template = schema.goals.get(goal_id)?;
    let options = template.read_options(&mut reader)?;

    let map_count = reader.read_u8()?;
    let (maps, rest) = split_maps(reader.rest(), map_count as usize, &schema.objects)?;

    debug!(
        "level {:?}: goal {}, {} maps, {} bytes",
        name.text,
        goal_id,
        map_count,
        data.len() - rest.len()
    );

    let level = Level {
        name: name.text,
        goal: Goal::with_options(goal_id, options),
        maps: maps.into_iter().map(<[u8]>::to_vec).collect(),
    };
    Ok((level, rest))
}

/// Encode one level record
pub fn encode_level(level: &Level, schema: &GameSchema) -> Result<Vec<u8>> {
    let mut writer = ByteWriter::new();
    writer.write_bytes(&encode_text(&level.name)?);

    let template = schema.goals.get(level.goal.id())?;
    writer.write_u8(level.goal.id());
    template.write_options(&mut writer, level.goal.options())?;

    let map_count = u8::try_from(level.maps.len()).map_err(|_| {
        LevelCodecError::ValueOutOfRange(format!("{} maps (maximum 255)", level.maps.len()))
    })?;
    writer.write_u8(map_count);
    for (index, map) in level.maps.iter().enumerate() {
        // A blob that is not exactly one map would shift every later field
        if map_byte_len(map, &schema.objects)? != map.len() {
            return Err(LevelCodecError::ValueOutOfRange(format!(
                "map {index} of level {:?} has trailing bytes",
                level.name
            )));
        }
        writer.write_bytes(map);
    }
    Ok(writer.into_inner())
}

/// Encode levels back to back
pub fn encode_levels(levels: &[Level], schema: &GameSchema) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    for level in levels {
        output.extend(encode_level(level, schema)?);
    }
    Ok(output)
}

/// Decode levels until `data` is exhausted
pub fn decode_levels(data: &[u8], schema: &GameSchema) -> Result<Vec<Level>> {
    let mut levels = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let (level, tail) = load_level_from_data(rest, schema)?;
        levels.push(level);
        rest = tail;
    }
    Ok(levels)
}
