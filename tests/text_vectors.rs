//! Level-name text codec reference vectors
//!
//! These byte sequences come from save files written by the editor. They pin
//! the fixed code table bit for bit.

use levelcodec::tables::{CHARACTER_CODES, TERMINAL_CODE};
use levelcodec::text::CodeBook;
use levelcodec::{decode_text, encode_text, test_characters, LevelCodecError};

const MANHATTAN: &str = "1ST WE TAKE MANHATTAN…";
const MANHATTAN_HEX: &str = "3358b87d87edf7a72dbc43963540";

#[test]
fn test_encode_reference_vector() -> Result<(), Box<dyn std::error::Error>> {
    let expected = hex::decode(MANHATTAN_HEX)?;
    assert_eq!(encode_text(MANHATTAN)?, expected);
    assert_eq!(
        expected,
        vec![
            0x33, 0x58, 0xB8, 0x7D, 0x87, 0xED, 0xF7, 0xA7, 0x2D, 0xBC, 0x43, 0x96, 0x35, 0x40
        ]
    );
    Ok(())
}

#[test]
fn test_encode_uppercases_input() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        encode_text("1st We Take Manhattan…")?,
        hex::decode(MANHATTAN_HEX)?
    );
    Ok(())
}

#[test]
fn test_decode_reference_vector_with_trailing_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let data = hex::decode(format!("{MANHATTAN_HEX}2284f3a2"))?;
    let decoded = decode_text(&data)?;

    assert_eq!(decoded.text, MANHATTAN);
    assert_eq!(decoded.bytes_used, 14);
    assert_eq!(decoded.remaining, &[0x22, 0x84, 0xF3, 0xA2]);
    Ok(())
}

#[test]
fn test_character_validation() {
    assert!(test_characters("1st We Take Manhattan…"));
    assert!(!test_characters("1st We Take Manhattan… べ"));
    assert!(test_characters(""));
}

#[test]
fn test_unsupported_character() {
    let err = encode_text("TOKYO べ").unwrap_err();
    assert!(matches!(err, LevelCodecError::UnsupportedCharacter('べ')));
}

#[test]
fn test_empty_text() -> Result<(), Box<dyn std::error::Error>> {
    // Only the terminal symbol, padded to one byte
    let bytes = encode_text("")?;
    assert_eq!(bytes, vec![0x40]);

    let decoded = decode_text(&bytes)?;
    assert_eq!(decoded.text, "");
    assert_eq!(decoded.bytes_used, 1);
    assert!(decoded.remaining.is_empty());
    Ok(())
}

#[test]
fn test_decode_failures() {
    assert!(matches!(
        decode_text(&[]).unwrap_err(),
        LevelCodecError::TextDecode(_)
    ));

    // Stream ends in the middle of a code without reaching the terminal
    let truncated = &hex::decode(MANHATTAN_HEX).unwrap()[..6];
    assert!(matches!(
        decode_text(truncated).unwrap_err(),
        LevelCodecError::TextDecode(_)
    ));
}

#[test]
fn test_code_book_matches_table() {
    let book = CodeBook::standard();
    assert_eq!(book.len(), CHARACTER_CODES.len() + 1);
    assert_eq!(book.terminal().len, TERMINAL_CODE.len());
    assert!(book.root().is_complete());

    for (symbol, code) in CHARACTER_CODES {
        let found = book.code(symbol).unwrap();
        assert_eq!(found.len, code.len(), "length of {symbol:?}");
    }
}
