//! Level-name text codec
//!
//! A fixed prefix code over an uppercase alphabet of letters, digits,
//! punctuation and a handful of typographic symbols, plus a terminal symbol
//! that ends each string. The code table lives in [`crate::tables`].

mod decoder;
mod encoder;
mod trie;

pub use decoder::{decode_text, decode_text_with, DecodedText};
pub use encoder::{encode_text, encode_text_with, test_characters};
pub use trie::{Code, CodeBook, CodeTrie, Symbol};
