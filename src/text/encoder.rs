//! Text encoding
//!
//! Level and palette names are uppercased, mapped through the code book, ended
//! with the terminal code and zero-padded to a whole byte.

use super::trie::CodeBook;
use crate::primitives::BitWriter;
use crate::{LevelCodecError, Result};

/// Encode text with the standard code book
pub fn encode_text(text: &str) -> Result<Vec<u8>> {
    encode_text_with(CodeBook::standard(), text)
}

/// Encode text with an explicit code book
pub fn encode_text_with(book: &CodeBook, text: &str) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new();
    for character in text.to_uppercase().chars() {
        let code = book
            .code(character)
            .ok_or(LevelCodecError::UnsupportedCharacter(character))?;
        writer.write_bits(code.bits, code.len);
    }
    let terminal = book.terminal();
    writer.write_bits(terminal.bits, terminal.len);
    Ok(writer.finish())
}

/// Returns `true` if every character of the uppercased text can be encoded
pub fn test_characters(text: &str) -> bool {
    let book = CodeBook::standard();
    text.to_uppercase()
        .chars()
        .all(|character| book.code(character).is_some())
}
