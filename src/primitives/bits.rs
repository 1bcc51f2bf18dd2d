//! MSB-first bit packing
//!
//! The text, pixel and color codecs all pack sub-byte fields starting at the
//! most significant bit of each byte and pad the final byte with zero bits.

use crate::common::{CHANNEL_BITS, MAX_CHANNEL_BITS_VALUE};
use crate::{LevelCodecError, Result};

/// Split a byte into its 8 bits, MSB first
pub fn byte_to_bits(byte: u8) -> [u8; 8] {
    let mut bits = [0u8; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> (7 - i)) & 1;
    }
    bits
}

/// Join 8 bits, MSB first, into a byte
pub fn bits_to_byte(bits: &[u8; 8]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}

/// Quantize a true-color channel to the nearest multiple of 8, capped at 255
pub fn quantize_channel(value: u8) -> u8 {
    let rounded = ((value as u32 + 4) / 8) * 8;
    rounded.min(u8::MAX as u32) as u8
}

/// Pack a channel as 5 bits, MSB first
///
/// The channel is quantized first, so the low 3 bits of the input are lost.
pub fn color_channel_to_bits(value: u8) -> [u8; CHANNEL_BITS] {
    let level = quantize_channel(value) / 8;
    let mut bits = [0u8; CHANNEL_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (level >> (CHANNEL_BITS - 1 - i)) & 1;
    }
    bits
}

/// Rebuild a channel from its bits; the result is always a multiple of 8
pub fn bits_to_color_channel(bits: &[u8]) -> Result<u8> {
    let level = bits
        .iter()
        .fold(0u32, |acc, &bit| (acc << 1) | (bit & 1) as u32);
    if level > MAX_CHANNEL_BITS_VALUE as u32 {
        return Err(LevelCodecError::InvalidColor {
            value: level,
            max: MAX_CHANNEL_BITS_VALUE as u32,
        });
    }
    Ok((level * 8) as u8)
}

/// Accumulates bits MSB first into a byte vector
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far
    pub fn bits_written(&self) -> usize {
        self.bit_len
    }

    /// Append one bit
    pub fn write_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Zero-pad to the next byte boundary and return the bytes
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads bits MSB first from a byte slice
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader at the first bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Number of bits consumed so far
    pub fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Number of unread bits
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Number of bytes at least one bit has been read from
    pub fn bytes_consumed(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// Read one bit, or `None` at the end of the data
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.bit_pos / 8)?;
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1;
        self.bit_pos += 1;
        Some(bit == 1)
    }

    /// Read `count` bits as an integer, or `None` if fewer remain
    pub fn read_bits(&mut self, count: usize) -> Option<u32> {
        debug_assert!(count <= 32);
        if count > self.bits_remaining() {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_bits_round_trip() {
        assert_eq!(byte_to_bits(0x80), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(byte_to_bits(0x33), [0, 0, 1, 1, 0, 0, 1, 1]);
        for byte in 0..=u8::MAX {
            assert_eq!(bits_to_byte(&byte_to_bits(byte)), byte);
        }
    }

    #[test]
    fn test_quantize_channel() {
        assert_eq!(quantize_channel(0), 0);
        assert_eq!(quantize_channel(3), 0);
        assert_eq!(quantize_channel(4), 8);
        assert_eq!(quantize_channel(100), 104);
        assert_eq!(quantize_channel(251), 248);
        // Rounds up to 256 and is capped
        assert_eq!(quantize_channel(252), 255);
        assert_eq!(quantize_channel(255), 255);
    }

    #[test]
    fn test_channel_bits() {
        assert_eq!(color_channel_to_bits(0), [0, 0, 0, 0, 0]);
        assert_eq!(color_channel_to_bits(8), [0, 0, 0, 0, 1]);
        assert_eq!(color_channel_to_bits(255), [1, 1, 1, 1, 1]);
        assert_eq!(bits_to_color_channel(&[1, 1, 1, 1, 1]).unwrap(), 248);
        assert_eq!(bits_to_color_channel(&color_channel_to_bits(104)).unwrap(), 104);
    }

    #[test]
    fn test_channel_bits_out_of_range() {
        let err = bits_to_color_channel(&[1, 0, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            LevelCodecError::InvalidColor { value: 32, max: 31 }
        ));
    }

    #[test]
    fn test_bit_writer_pads_with_zeros() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        assert_eq!(writer.bits_written(), 3);
        assert_eq!(writer.finish(), vec![0b1010_0000]);

        let mut writer = BitWriter::new();
        writer.write_bits(0xABC, 12);
        assert_eq!(writer.finish(), vec![0xAB, 0xC0]);

        assert!(BitWriter::new().finish().is_empty());
    }

    #[test]
    fn test_bit_reader() {
        let data = [0b1011_0000, 0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(3), Some(0b101));
        assert_eq!(reader.bytes_consumed(), 1);
        assert_eq!(reader.read_bits(6), Some(0b1_0000_1));
        assert_eq!(reader.bytes_consumed(), 2);
        assert_eq!(reader.bits_remaining(), 7);
        assert_eq!(reader.read_bits(8), None);
        assert_eq!(reader.read_bits(7), Some(0x7F));
        assert_eq!(reader.read_bit(), None);
    }
}
