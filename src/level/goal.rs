//! Level goals
//!
//! A goal is an id into the game's ordered goal-template list plus the option
//! values the template exports. Options are kept as strings so the editor can
//! hold them uniformly; they are parsed against the template's wire types on
//! encode.

use crate::map::FieldSpec;
use crate::primitives::{ByteReader, ByteWriter, WireValue};
use crate::{LevelCodecError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the goal-template list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTemplate {
    /// Human-readable goal name
    pub name: String,
    /// Options persisted with the goal, in wire order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl GoalTemplate {
    /// Create a goal template
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    /// Encoded size of the exported options
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(|field| field.wire.size()).sum()
    }

    /// Read this template's options from the front of `reader`
    pub(crate) fn read_options(
        &self,
        reader: &mut ByteReader<'_>,
    ) -> Result<BTreeMap<String, String>> {
        let mut options = BTreeMap::new();
        for field in &self.fields {
            let value = reader.read(field.wire)?;
            options.insert(field.key.clone(), value.to_string());
        }
        Ok(options)
    }

    /// Write `options` in this template's layout
    ///
    /// Every declared option must be present in the form decoding produces it
    /// (`"7"`, not `"007"`), and no undeclared option may be set, so that
    /// decoding the output yields exactly `options`.
    pub(crate) fn write_options(
        &self,
        writer: &mut ByteWriter,
        options: &BTreeMap<String, String>,
    ) -> Result<()> {
        if let Some((slug, text)) = options
            .iter()
            .find(|(slug, _)| !self.fields.iter().any(|field| &field.key == *slug))
        {
            return Err(LevelCodecError::InvalidFieldValue {
                key: slug.clone(),
                value: text.clone(),
            });
        }

        for field in &self.fields {
            let text = options
                .get(&field.key)
                .ok_or_else(|| LevelCodecError::InvalidFieldValue {
                    key: field.key.clone(),
                    value: String::new(),
                })?;
            let value = WireValue::parse(field.wire, text, &field.key)?;
            if value.to_string() != *text {
                return Err(LevelCodecError::InvalidFieldValue {
                    key: field.key.clone(),
                    value: text.clone(),
                });
            }
            writer.write(value);
        }
        Ok(())
    }

    /// Options with every declared field set to zero
    pub fn default_options(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.key.clone(), WireValue::zero(field.wire).to_string()))
            .collect()
    }
}

/// Ordered goal templates; the index of a template is its goal id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GoalTemplate>", into = "Vec<GoalTemplate>")]
pub struct GoalTable {
    templates: Vec<GoalTemplate>,
}

impl GoalTable {
    /// Create a goal table; ids are a single byte
    pub fn new(templates: Vec<GoalTemplate>) -> Result<Self> {
        if templates.len() > u8::MAX as usize + 1 {
            return Err(LevelCodecError::ValueOutOfRange(format!(
                "{} goal templates (maximum 256)",
                templates.len()
            )));
        }
        Ok(Self { templates })
    }

    /// Template for a goal id
    pub fn get(&self, id: u8) -> Result<&GoalTemplate> {
        self.templates
            .get(id as usize)
            .ok_or(LevelCodecError::UnknownGoal(id))
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if no templates are defined
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TryFrom<Vec<GoalTemplate>> for GoalTable {
    type Error = LevelCodecError;

    fn try_from(templates: Vec<GoalTemplate>) -> Result<Self> {
        Self::new(templates)
    }
}

impl From<GoalTable> for Vec<GoalTemplate> {
    fn from(table: GoalTable) -> Self {
        table.templates
    }
}

/// A level's goal: template id and option values by slug
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Goal {
    id: u8,
    options: BTreeMap<String, String>,
}

impl Goal {
    /// A goal with no options set
    pub fn new(id: u8) -> Self {
        Self {
            id,
            options: BTreeMap::new(),
        }
    }

    /// A goal with the given options
    pub fn with_options(id: u8, options: BTreeMap<String, String>) -> Self {
        Self { id, options }
    }

    /// Index into the goal-template list
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Option values by slug
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Value of one option
    pub fn option(&self, slug: &str) -> Option<&str> {
        self.options.get(slug).map(String::as_str)
    }

    /// Copy with one option set
    pub fn with_option(&self, slug: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.options.insert(slug.to_string(), value.to_string());
        next
    }
}
