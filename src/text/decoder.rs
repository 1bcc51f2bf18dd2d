//! Text decoding
//!
//! Walks the code trie one bit at a time. Input bytes are consumed whole, so a
//! name embedded in a larger buffer ends at the first byte boundary after its
//! terminal code.

use super::trie::{CodeBook, CodeTrie, Symbol};
use crate::primitives::BitReader;
use crate::{LevelCodecError, Result};

/// Result of decoding a text field from the front of a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText<'a> {
    /// Decoded, uppercase text
    pub text: String,
    /// Number of input bytes the text occupied
    pub bytes_used: usize,
    /// Bytes following the text
    pub remaining: &'a [u8],
}

/// Decode text with the standard code book
pub fn decode_text(data: &[u8]) -> Result<DecodedText<'_>> {
    decode_text_with(CodeBook::standard(), data)
}

/// Decode text with an explicit code book
pub fn decode_text_with<'a>(book: &CodeBook, data: &'a [u8]) -> Result<DecodedText<'a>> {
    if data.is_empty() {
        return Err(LevelCodecError::TextDecode("empty input".to_string()));
    }

    let mut reader = BitReader::new(data);
    let mut text = String::new();
    let mut node = book.root();

    loop {
        let bit = reader.read_bit().ok_or_else(|| {
            LevelCodecError::TextDecode(format!(
                "input ended after {} bytes without a terminal code",
                data.len()
            ))
        })?;

        node = node.child(bit).ok_or_else(|| {
            LevelCodecError::TextDecode(format!(
                "no code continues at bit {}",
                reader.bit_position() - 1
            ))
        })?;

        match node {
            CodeTrie::Leaf(Symbol::Terminal) => break,
            CodeTrie::Leaf(Symbol::Char(character)) => {
                text.push(*character);
                node = book.root();
            }
            CodeTrie::Branch { .. } => {}
        }
    }

    let bytes_used = reader.bytes_consumed();
    Ok(DecodedText {
        text,
        bytes_used,
        remaining: &data[bytes_used..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::encode_text;

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            decode_text(&[]).unwrap_err(),
            LevelCodecError::TextDecode(_)
        ));
    }

    #[test]
    fn test_terminal_only() {
        let decoded = decode_text(&[0b0100_0000, 0xAA]).unwrap();
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.bytes_used, 1);
        assert_eq!(decoded.remaining, &[0xAA]);
    }

    #[test]
    fn test_unterminated_input() {
        // "E" is 1111; a run of ones never reaches the terminal
        let err = decode_text(&[0xFF, 0xFF]).unwrap_err();
        assert!(matches!(err, LevelCodecError::TextDecode(_)));
    }

    #[test]
    fn test_dead_end_in_partial_book() {
        let book = CodeBook::from_table(&[('A', "00")], "11").unwrap();
        let err = decode_text_with(&book, &[0b0100_0000]).unwrap_err();
        assert!(matches!(err, LevelCodecError::TextDecode(_)));
    }

    #[test]
    fn test_consecutive_names() {
        let mut data = encode_text("World 1").unwrap();
        let first_len = data.len();
        data.extend(encode_text("World 2").unwrap());

        let first = decode_text(&data).unwrap();
        assert_eq!(first.text, "WORLD 1");
        assert_eq!(first.bytes_used, first_len);

        let second = decode_text(first.remaining).unwrap();
        assert_eq!(second.text, "WORLD 2");
        assert!(second.remaining.is_empty());
    }
}
