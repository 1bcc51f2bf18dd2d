//! Big-endian byte cursors
//!
//! `ByteReader` is the only way the map and level decoders touch a buffer, so
//! every read is bounds-checked in one place and never wraps or zero-fills.

use super::wire::{WireType, WireValue};
use crate::{LevelCodecError, Result};

/// Bounds-checked big-endian reader over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The unread part of the buffer
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consume `len` bytes and return them
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(LevelCodecError::BufferUnderrun {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    /// Read a `Uint8`
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a big-endian `Uint16`
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `Uint32`
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `Float32`
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.take_array()?))
    }

    /// Read one value of the given wire type
    pub fn read(&mut self, wire: WireType) -> Result<WireValue> {
        Ok(match wire {
            WireType::Uint8 => WireValue::U8(self.read_u8()?),
            WireType::Uint16 => WireValue::U16(self.read_u16()?),
            WireType::Uint32 => WireValue::U32(self.read_u32()?),
            WireType::Int8 => WireValue::I8(i8::from_be_bytes(self.take_array()?)),
            WireType::Int16 => WireValue::I16(i16::from_be_bytes(self.take_array()?)),
            WireType::Int32 => WireValue::I32(i32::from_be_bytes(self.take_array()?)),
            WireType::Float32 => WireValue::F32(self.read_f32()?),
            WireType::Float64 => WireValue::F64(f64::from_be_bytes(self.take_array()?)),
        })
    }
}

/// Growable big-endian writer
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a `Uint8`
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a big-endian `Uint16`
    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Write a big-endian `Uint32`
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Write a big-endian `Float32`
    pub fn write_f32(&mut self, value: f32) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Write a value using its own wire type
    pub fn write(&mut self, value: WireValue) {
        match value {
            WireValue::U8(v) => self.write_u8(v),
            WireValue::U16(v) => self.write_u16(v),
            WireValue::U32(v) => self.write_u32(v),
            WireValue::I8(v) => self.write_bytes(&v.to_be_bytes()),
            WireValue::I16(v) => self.write_bytes(&v.to_be_bytes()),
            WireValue::I32(v) => self.write_bytes(&v.to_be_bytes()),
            WireValue::F32(v) => self.write_f32(v),
            WireValue::F64(v) => self.write_bytes(&v.to_be_bytes()),
        }
    }

    /// Finish writing and return the buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_layout() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x1234);
        writer.write_u32(0xDEADBEEF);
        writer.write_f32(1.0);
        assert_eq!(
            writer.into_inner(),
            vec![0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF, 0x3F, 0x80, 0x00, 0x00]
        );
    }

    #[test]
    fn test_read_every_wire_type() {
        let values = [
            WireValue::U8(200),
            WireValue::U16(0xFFFE),
            WireValue::U32(70_000),
            WireValue::I8(-3),
            WireValue::I16(-300),
            WireValue::I32(-70_000),
            WireValue::F32(0.25),
            WireValue::F64(-2.5),
        ];

        let mut writer = ByteWriter::new();
        for value in values {
            writer.write(value);
        }
        let bytes = writer.into_inner();
        let expected_len: usize = values.iter().map(|v| v.wire_type().size()).sum();
        assert_eq!(bytes.len(), expected_len);

        let mut reader = ByteReader::new(&bytes);
        for value in values {
            assert_eq!(reader.read(value.wire_type()).unwrap(), value);
        }
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_underrun_is_fatal() {
        let bytes = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u16().unwrap(), 0x0102);

        let err = reader.read_u16().unwrap_err();
        match err {
            LevelCodecError::BufferUnderrun {
                offset,
                needed,
                available,
            } => {
                assert_eq!(offset, 2);
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        // A failed read does not move the cursor
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.rest(), &[0x03]);
    }
}
