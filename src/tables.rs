//! Static code tables for the level-name text codec
//!
//! The codes are fixed data, not derived from symbol statistics. The entries
//! used by the known level name "1ST WE TAKE MANHATTAN…" are checked against
//! its stored bytes; the remaining entries complete the prefix code and have
//! not yet been checked against other stored names.

/// Bit code of the end-of-text symbol
pub const TERMINAL_CODE: &str = "0100";

/// Character codes, MSB first, ordered by code length
///
/// Together with [`TERMINAL_CODE`] these form a complete prefix code: every
/// branch of the decode trie has both children.
pub const CHARACTER_CODES: [(char, &str); 88] = [
    (' ', "101"),
    ('N', "0010"),
    ('S', "0101"),
    ('A', "0111"),
    ('T', "1000"),
    ('E', "1111"),
    ('O', "00000"),
    ('I', "00001"),
    ('R', "00010"),
    ('D', "00011"),
    ('Y', "00111"),
    ('L', "01100"),
    ('C', "01101"),
    ('U', "10010"),
    ('F', "10011"),
    ('G', "11001"),
    ('P', "11010"),
    ('H', "11011"),
    ('W', "110000"),
    ('B', "111000"),
    ('V', "111001"),
    ('M', "111010"),
    ('K', "1110110"),
    ('5', "00110000"),
    ('6', "00110001"),
    ('1', "00110011"),
    ('0', "00110100"),
    ('2', "00110101"),
    ('3', "00110110"),
    ('4', "00110111"),
    ('7', "110001000"),
    ('8', "110001001"),
    ('9', "110001010"),
    ('J', "110001011"),
    ('X', "1110111000"),
    ('Q', "1110111001"),
    ('Z', "1110111010"),
    ('.', "1110111011"),
    (',', "1110111100"),
    ('!', "1110111101"),
    ('?', "1110111110"),
    ('\'', "1110111111"),
    (':', "00110010001"),
    (')', "00110010011"),
    ('+', "00110010101"),
    ('%', "00110010111"),
    ('…', "11000110101"),
    (']', "11000111011"),
    ('”', "11000111111"),
    ('"', "001100100000"),
    ('-', "001100100001"),
    (';', "001100100100"),
    ('(', "001100100101"),
    ('&', "001100101000"),
    ('/', "001100101001"),
    ('*', "001100101100"),
    ('#', "001100101101"),
    ('–', "110001100000"),
    ('—', "110001100001"),
    ('•', "110001100010"),
    ('·', "110001100011"),
    ('×', "110001100100"),
    ('÷', "110001100101"),
    ('°', "110001100110"),
    ('¡', "110001100111"),
    ('®', "110001101101"),
    ('☆', "110001101111"),
    ('@', "110001110000"),
    ('=', "110001110001"),
    ('<', "110001110010"),
    ('>', "110001110011"),
    ('_', "110001110100"),
    ('[', "110001110101"),
    ('~', "110001111000"),
    ('^', "110001111001"),
    ('$', "110001111010"),
    ('‘', "110001111011"),
    ('’', "110001111100"),
    ('“', "110001111101"),
    ('♣', "1100011010001"),
    ('♠', "1100011010010"),
    ('♪', "1100011010011"),
    ('¿', "1100011011000"),
    ('©', "1100011011001"),
    ('™', "1100011011100"),
    ('★', "1100011011101"),
    ('♥', "11000110100000"),
    ('♦', "11000110100001"),
];
