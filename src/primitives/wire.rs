//! Wire types and typed values
//!
//! Every field of the map and goal formats is one of a closed set of
//! fixed-width numeric encodings, named the way the editor's schema files name
//! them (`Uint16`, `Float32`, ...).

use crate::{LevelCodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte width of a wire type name of the form `<Letters><BitWidth>`
///
/// The name does not have to denote a supported [`WireType`]; only its shape
/// is checked. The bit width must be a positive multiple of 8.
pub fn size_of(type_name: &str) -> Result<usize> {
    let invalid = || LevelCodecError::InvalidType(type_name.to_string());

    let split = type_name
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = type_name.split_at(split);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let bits: usize = digits.parse().map_err(|_| invalid())?;
    if bits == 0 || bits % 8 != 0 {
        return Err(invalid());
    }
    Ok(bits / 8)
}

/// Fixed-width numeric encoding of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// Unsigned 8-bit integer
    Uint8,
    /// Unsigned 16-bit integer
    Uint16,
    /// Unsigned 32-bit integer
    Uint32,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// IEEE 754 single precision float
    Float32,
    /// IEEE 754 double precision float
    Float64,
}

impl WireType {
    /// Every supported wire type
    pub const ALL: [WireType; 8] = [
        WireType::Uint8,
        WireType::Uint16,
        WireType::Uint32,
        WireType::Int8,
        WireType::Int16,
        WireType::Int32,
        WireType::Float32,
        WireType::Float64,
    ];

    /// Schema name of this type
    pub fn name(&self) -> &'static str {
        match self {
            WireType::Uint8 => "Uint8",
            WireType::Uint16 => "Uint16",
            WireType::Uint32 => "Uint32",
            WireType::Int8 => "Int8",
            WireType::Int16 => "Int16",
            WireType::Int32 => "Int32",
            WireType::Float32 => "Float32",
            WireType::Float64 => "Float64",
        }
    }

    /// Encoded width in bytes
    pub fn size(&self) -> usize {
        match self {
            WireType::Uint8 | WireType::Int8 => 1,
            WireType::Uint16 | WireType::Int16 => 2,
            WireType::Uint32 | WireType::Int32 | WireType::Float32 => 4,
            WireType::Float64 => 8,
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            WireType::Uint8 => (0.0, u8::MAX as f64),
            WireType::Uint16 => (0.0, u16::MAX as f64),
            WireType::Uint32 => (0.0, u32::MAX as f64),
            WireType::Int8 => (i8::MIN as f64, i8::MAX as f64),
            WireType::Int16 => (i16::MIN as f64, i16::MAX as f64),
            WireType::Int32 => (i32::MIN as f64, i32::MAX as f64),
            WireType::Float32 => (f32::MIN as f64, f32::MAX as f64),
            WireType::Float64 => (f64::MIN, f64::MAX),
        }
    }

    fn is_integer(&self) -> bool {
        !matches!(self, WireType::Float32 | WireType::Float64)
    }
}

impl FromStr for WireType {
    type Err = LevelCodecError;

    fn from_str(name: &str) -> Result<Self> {
        // Shape errors take precedence over unknown-but-well-formed names
        size_of(name)?;
        WireType::ALL
            .into_iter()
            .find(|wire| wire.name() == name)
            .ok_or_else(|| LevelCodecError::InvalidType(name.to_string()))
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value tagged with its wire type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireValue {
    /// `Uint8` value
    U8(u8),
    /// `Uint16` value
    U16(u16),
    /// `Uint32` value
    U32(u32),
    /// `Int8` value
    I8(i8),
    /// `Int16` value
    I16(i16),
    /// `Int32` value
    I32(i32),
    /// `Float32` value
    F32(f32),
    /// `Float64` value
    F64(f64),
}

impl WireValue {
    /// Zero of the given type
    pub fn zero(wire: WireType) -> Self {
        match wire {
            WireType::Uint8 => WireValue::U8(0),
            WireType::Uint16 => WireValue::U16(0),
            WireType::Uint32 => WireValue::U32(0),
            WireType::Int8 => WireValue::I8(0),
            WireType::Int16 => WireValue::I16(0),
            WireType::Int32 => WireValue::I32(0),
            WireType::Float32 => WireValue::F32(0.0),
            WireType::Float64 => WireValue::F64(0.0),
        }
    }

    /// Wire type this value encodes as
    pub fn wire_type(&self) -> WireType {
        match self {
            WireValue::U8(_) => WireType::Uint8,
            WireValue::U16(_) => WireType::Uint16,
            WireValue::U32(_) => WireType::Uint32,
            WireValue::I8(_) => WireType::Int8,
            WireValue::I16(_) => WireType::Int16,
            WireValue::I32(_) => WireType::Int32,
            WireValue::F32(_) => WireType::Float32,
            WireValue::F64(_) => WireType::Float64,
        }
    }

    /// Numeric value widened to `f64`
    pub fn as_f64(&self) -> f64 {
        match *self {
            WireValue::U8(v) => v as f64,
            WireValue::U16(v) => v as f64,
            WireValue::U32(v) => v as f64,
            WireValue::I8(v) => v as f64,
            WireValue::I16(v) => v as f64,
            WireValue::I32(v) => v as f64,
            WireValue::F32(v) => v as f64,
            WireValue::F64(v) => v,
        }
    }

    /// Convert a number to the given type
    ///
    /// Integer types reject fractional and out-of-range values; `key` names the
    /// field in the returned error.
    pub fn from_f64(wire: WireType, value: f64, key: &str) -> Result<Self> {
        let invalid = || LevelCodecError::InvalidFieldValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let (min, max) = wire.range();
        if wire.is_integer() {
            if !value.is_finite() || value.fract() != 0.0 || value < min || value > max {
                return Err(invalid());
            }
        } else if value.is_finite() && (value < min || value > max) {
            return Err(invalid());
        }

        Ok(match wire {
            WireType::Uint8 => WireValue::U8(value as u8),
            WireType::Uint16 => WireValue::U16(value as u16),
            WireType::Uint32 => WireValue::U32(value as u32),
            WireType::Int8 => WireValue::I8(value as i8),
            WireType::Int16 => WireValue::I16(value as i16),
            WireType::Int32 => WireValue::I32(value as i32),
            WireType::Float32 => WireValue::F32(value as f32),
            WireType::Float64 => WireValue::F64(value),
        })
    }

    /// Parse a textual number into the given type
    pub fn parse(wire: WireType, text: &str, key: &str) -> Result<Self> {
        let invalid = || LevelCodecError::InvalidFieldValue {
            key: key.to_string(),
            value: text.to_string(),
        };

        let text = text.trim();
        Ok(match wire {
            WireType::Uint8 => WireValue::U8(text.parse().map_err(|_| invalid())?),
            WireType::Uint16 => WireValue::U16(text.parse().map_err(|_| invalid())?),
            WireType::Uint32 => WireValue::U32(text.parse().map_err(|_| invalid())?),
            WireType::Int8 => WireValue::I8(text.parse().map_err(|_| invalid())?),
            WireType::Int16 => WireValue::I16(text.parse().map_err(|_| invalid())?),
            WireType::Int32 => WireValue::I32(text.parse().map_err(|_| invalid())?),
            WireType::Float32 => WireValue::F32(text.parse().map_err(|_| invalid())?),
            WireType::Float64 => WireValue::F64(text.parse().map_err(|_| invalid())?),
        })
    }

    /// Re-type this value, keeping its numeric value
    pub fn coerce(self, wire: WireType, key: &str) -> Result<Self> {
        if self.wire_type() == wire {
            return Ok(self);
        }
        WireValue::from_f64(wire, self.as_f64(), key)
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::U8(v) => write!(f, "{v}"),
            WireValue::U16(v) => write!(f, "{v}"),
            WireValue::U32(v) => write!(f, "{v}"),
            WireValue::I8(v) => write!(f, "{v}"),
            WireValue::I16(v) => write!(f, "{v}"),
            WireValue::I32(v) => write!(f, "{v}"),
            WireValue::F32(v) => write!(f, "{v}"),
            WireValue::F64(v) => write!(f, "{v}"),
        }
    }
}
