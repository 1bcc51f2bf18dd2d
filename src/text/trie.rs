//! Prefix-code trie and symbol lookup
//!
//! The trie is built once from [`crate::tables`] and shared read-only for the
//! lifetime of the process.

use crate::tables::{CHARACTER_CODES, TERMINAL_CODE};
use crate::{LevelCodecError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A decoded text symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A printable character
    Char(char),
    /// End of text
    Terminal,
}

/// A variable-length bit code, MSB first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Code bits, right-aligned
    pub bits: u32,
    /// Number of significant bits
    pub len: usize,
}

impl Code {
    /// Parse a code written as a string of `0` and `1`
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() || text.len() > 32 {
            return Err(LevelCodecError::TextDecode(format!(
                "invalid code length in {text:?}"
            )));
        }
        let mut bits = 0u32;
        for digit in text.chars() {
            let bit = match digit {
                '0' => 0,
                '1' => 1,
                _ => {
                    return Err(LevelCodecError::TextDecode(format!(
                        "invalid code digit {digit:?} in {text:?}"
                    )))
                }
            };
            bits = (bits << 1) | bit;
        }
        Ok(Self {
            bits,
            len: text.len(),
        })
    }

    /// Bit at `index`, counted from the most significant end
    pub fn bit(&self, index: usize) -> bool {
        (self.bits >> (self.len - 1 - index)) & 1 == 1
    }
}

/// Binary decode tree; left is bit 0, right is bit 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeTrie {
    /// A symbol reached by the path from the root
    Leaf(Symbol),
    /// An inner node; a missing child marks a code that is never emitted
    Branch {
        /// Child for bit 0
        zero: Option<Box<CodeTrie>>,
        /// Child for bit 1
        one: Option<Box<CodeTrie>>,
    },
}

impl CodeTrie {
    fn empty() -> Self {
        CodeTrie::Branch {
            zero: None,
            one: None,
        }
    }

    fn insert(&mut self, code: Code, symbol: Symbol) -> Result<()> {
        let conflict = || {
            LevelCodecError::TextDecode(format!("code for {symbol:?} collides with another code"))
        };

        let mut node = self;
        for index in 0..code.len {
            let (zero, one) = match node {
                CodeTrie::Leaf(_) => return Err(conflict()),
                CodeTrie::Branch { zero, one } => (zero, one),
            };
            let slot = if code.bit(index) { one } else { zero };
            let last = index + 1 == code.len;
            if last {
                if slot.is_some() {
                    return Err(conflict());
                }
                *slot = Some(Box::new(CodeTrie::Leaf(symbol)));
                return Ok(());
            }
            node = &mut **slot.get_or_insert_with(|| Box::new(CodeTrie::empty()));
        }
        Err(conflict())
    }

    /// Child reached by following `bit`, if that code exists
    pub fn child(&self, bit: bool) -> Option<&CodeTrie> {
        match self {
            CodeTrie::Leaf(_) => None,
            CodeTrie::Branch { zero, one } => {
                if bit {
                    one.as_deref()
                } else {
                    zero.as_deref()
                }
            }
        }
    }

    /// Returns `true` if every branch has both children
    pub fn is_complete(&self) -> bool {
        match self {
            CodeTrie::Leaf(_) => true,
            CodeTrie::Branch {
                zero: Some(zero),
                one: Some(one),
            } => zero.is_complete() && one.is_complete(),
            CodeTrie::Branch { .. } => false,
        }
    }
}

/// Code table in both directions: symbol to code and bits to symbol
#[derive(Debug)]
pub struct CodeBook {
    root: CodeTrie,
    codes: HashMap<char, Code>,
    terminal: Code,
}

impl CodeBook {
    /// Build a code book from a character table and the terminal code
    pub fn from_table(characters: &[(char, &str)], terminal: &str) -> Result<Self> {
        let mut root = CodeTrie::empty();
        let mut codes = HashMap::with_capacity(characters.len());

        let terminal = Code::parse(terminal)?;
        root.insert(terminal, Symbol::Terminal)?;

        for &(character, text) in characters {
            let code = Code::parse(text)?;
            root.insert(code, Symbol::Char(character))?;
            if codes.insert(character, code).is_some() {
                return Err(LevelCodecError::TextDecode(format!(
                    "duplicate code table entry for {character:?}"
                )));
            }
        }

        Ok(Self {
            root,
            codes,
            terminal,
        })
    }

    /// The code book every save file uses
    pub fn standard() -> &'static CodeBook {
        static STANDARD: OnceLock<CodeBook> = OnceLock::new();
        STANDARD.get_or_init(|| {
            CodeBook::from_table(&CHARACTER_CODES, TERMINAL_CODE)
                .expect("built-in text code table is a valid prefix code")
        })
    }

    /// Root of the decode trie
    pub fn root(&self) -> &CodeTrie {
        &self.root
    }

    /// Code for a character, if it is in the alphabet
    pub fn code(&self, character: char) -> Option<Code> {
        self.codes.get(&character).copied()
    }

    /// Code of the end-of-text symbol
    pub fn terminal(&self) -> Code {
        self.terminal
    }

    /// Number of symbols, including the terminal
    pub fn len(&self) -> usize {
        self.codes.len() + 1
    }

    /// Always `false`: the terminal symbol is always present
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_book_is_complete() {
        let book = CodeBook::standard();
        assert!(book.root().is_complete());
        assert_eq!(book.len(), CHARACTER_CODES.len() + 1);
        assert_eq!(book.terminal(), Code::parse(TERMINAL_CODE).unwrap());
    }

    #[test]
    fn test_lookup() {
        let book = CodeBook::standard();
        assert_eq!(book.code(' '), Some(Code { bits: 0b101, len: 3 }));
        assert_eq!(book.code('T'), Some(Code { bits: 0b1000, len: 4 }));
        assert_eq!(book.code('t'), None);
        assert_eq!(book.code('べ'), None);
    }

    #[test]
    fn test_walk_reaches_terminal() {
        let book = CodeBook::standard();
        let terminal = book.terminal();
        let mut node = book.root();
        for index in 0..terminal.len {
            node = node.child(terminal.bit(index)).unwrap();
        }
        assert_eq!(node, &CodeTrie::Leaf(Symbol::Terminal));
    }

    #[test]
    fn test_prefix_collision_rejected() {
        assert!(CodeBook::from_table(&[('A', "01"), ('B', "011")], "1").is_err());
        assert!(CodeBook::from_table(&[('A', "011"), ('B', "01")], "1").is_err());
        assert!(CodeBook::from_table(&[('A', "0"), ('A', "10")], "11").is_err());
    }

    #[test]
    fn test_partial_table_is_incomplete() {
        let book = CodeBook::from_table(&[('A', "00")], "1").unwrap();
        assert!(!book.root().is_complete());
        assert!(book.root().child(false).unwrap().child(true).is_none());
    }

    #[test]
    fn test_code_parse() {
        assert_eq!(Code::parse("0101").unwrap(), Code { bits: 5, len: 4 });
        assert!(Code::parse("").is_err());
        assert!(Code::parse("012").is_err());
    }
}
