//! Lexer splitting an encoded polyline into signed values using logos
//!
//! Every value is a run of 5-bit chunks, each offset by 63 into printable
//! ASCII. Chunks with the continuation bit set fall in `_`..=`~`; the final
//! chunk of a value falls in `?`..=`^`. One regex therefore matches exactly
//! one value.

use logos::Logos;

/// A 32-bit value never needs more than seven 5-bit chunks
const MAX_CHUNKS: usize = 7;

/// Reasons the lexer stops
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// Byte outside the polyline alphabet, or input ending mid-value
    #[default]
    Unrecognized,
    /// More chunks than a 32-bit value can use
    Overflow,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
pub enum Token {
    /// One zig-zag decoded value
    #[regex(r"[\x5F-\x7E]*[\x3F-\x5E]", decode_value)]
    Value(i64),
}

/// Whether `byte` is a chunk with the continuation bit set
pub fn is_continuation(byte: u8) -> bool {
    (0x5F..=0x7E).contains(&byte)
}

fn decode_value(lex: &mut logos::Lexer<Token>) -> Result<i64, LexError> {
    let chunks = lex.slice().as_bytes();
    if chunks.len() > MAX_CHUNKS {
        return Err(LexError::Overflow);
    }

    let raw = chunks
        .iter()
        .enumerate()
        .fold(0i64, |acc, (i, b)| acc | (i64::from((b - 63) & 0x1F) << (5 * i)));

    Ok(if raw & 1 == 1 { !(raw >> 1) } else { raw >> 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<Result<Token, LexError>> {
        Token::lexer(input).collect()
    }

    #[test]
    fn test_single_chunk_values() {
        // '?' is zero; '@' is -1 after zig-zag; 'A' is 1.
        assert_eq!(
            values("?@A"),
            vec![Ok(Token::Value(0)), Ok(Token::Value(-1)), Ok(Token::Value(1))]
        );
    }

    #[test]
    fn test_multi_chunk_values() {
        assert_eq!(
            values("_p~iF~ps|U"),
            vec![Ok(Token::Value(3_850_000)), Ok(Token::Value(-12_020_000))]
        );
    }

    #[test]
    fn test_spans_cover_each_value() {
        let spans: Vec<_> = Token::lexer("_ulLnnqC").spanned().map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..4, 4..8]);
    }

    #[test]
    fn test_oversized_value() {
        assert_eq!(values("~~~~~~~?"), vec![Err(LexError::Overflow)]);
    }

    #[test]
    fn test_unrecognized_byte() {
        assert_eq!(values(" ").first(), Some(&Err(LexError::Unrecognized)));
    }

    #[test]
    fn test_continuation_range() {
        assert!(is_continuation(b'_'));
        assert!(is_continuation(b'~'));
        assert!(!is_continuation(b'^'));
        assert!(!is_continuation(b'?'));
    }
}
