//! Bit and byte primitives
//!
//! Typed fixed-width accessors over byte buffers, MSB-first bit packing, and
//! the channel helpers used by the color codec. All multi-byte values are
//! big-endian on the wire.

mod bits;
mod cursor;
mod wire;

pub use bits::{
    bits_to_byte, bits_to_color_channel, byte_to_bits, color_channel_to_bits, quantize_channel,
    BitReader, BitWriter,
};
pub use cursor::{ByteReader, ByteWriter};
pub use wire::{size_of, WireType, WireValue};
