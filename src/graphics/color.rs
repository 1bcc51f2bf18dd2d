//! High-color packing
//!
//! A persisted color is 16 bits: 5 bits each of red, green and blue followed by
//! a single alpha bit, MSB first. Channels are held pre-quantized to multiples
//! of 8, so decoding never reproduces the low 3 bits of a true-color input.

use crate::common::{CHANNEL_BITS, MAX_CHANNEL_BITS_VALUE};
use crate::primitives::{bits_to_color_channel, color_channel_to_bits, quantize_channel};
use crate::{LevelCodecError, Result};
use serde::Serialize;
use std::fmt;

/// A quantized palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    alpha: bool,
}

impl Color {
    /// Fully transparent black, the implicit color 0 of every palette
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        alpha: false,
    };

    /// Create a color, quantizing each channel
    pub fn new(r: u8, g: u8, b: u8, alpha: bool) -> Self {
        Self {
            r: quantize_channel(r),
            g: quantize_channel(g),
            b: quantize_channel(b),
            alpha,
        }
    }

    /// Create an opaque color
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, true)
    }

    /// Red channel
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green channel
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue channel
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Alpha flag; `false` is fully transparent
    pub fn alpha(&self) -> bool {
        self.alpha
    }

    /// Pack into the 16-bit wire layout
    pub fn to_bits(&self) -> u16 {
        let mut packed = 0u16;
        for channel in [self.r, self.g, self.b] {
            for bit in color_channel_to_bits(channel) {
                packed = (packed << 1) | bit as u16;
            }
        }
        (packed << 1) | self.alpha as u16
    }

    /// Unpack from the 16-bit wire layout
    pub fn from_bits(packed: u16) -> Result<Self> {
        let channel = |index: usize| -> Result<u8> {
            let shift = 16 - CHANNEL_BITS * (index + 1);
            let level = (packed >> shift) & MAX_CHANNEL_BITS_VALUE as u16;
            let bits: Vec<u8> = (0..CHANNEL_BITS)
                .map(|i| ((level >> (CHANNEL_BITS - 1 - i)) & 1) as u8)
                .collect();
            bits_to_color_channel(&bits)
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(1)?,
            b: channel(2)?,
            alpha: packed & 1 == 1,
        })
    }

    /// Encode as two big-endian bytes
    pub fn to_bytes(&self) -> [u8; 2] {
        self.to_bits().to_be_bytes()
    }

    /// Decode from two big-endian bytes
    pub fn from_bytes(bytes: [u8; 2]) -> Result<Self> {
        Self::from_bits(u16::from_be_bytes(bytes))
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; any non-zero alpha byte is opaque
    pub fn from_hex(text: &str) -> Result<Self> {
        let invalid = || LevelCodecError::InvalidFieldValue {
            key: "color".to_string(),
            value: text.to_string(),
        };
        let digits = text.strip_prefix('#').unwrap_or(text);
        if (digits.len() != 6 && digits.len() != 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let byte = |index: usize| {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16).map_err(|_| invalid())
        };
        let alpha = if digits.len() == 8 { byte(3)? != 0 } else { true };
        Ok(Self::new(byte(0)?, byte(1)?, byte(2)?, alpha))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.alpha {
            f.write_str("00")?;
        }
        Ok(())
    }
}
