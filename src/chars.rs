//! Byte classification predicates used by the lexer.
//!
//! The scanner works on raw bytes, not decoded characters; all classes are
//! ASCII. Bytes above 0x7F never match any class and therefore always lex as
//! single-byte symbol tokens.

/// Whitespace: space, tab, newline, carriage return, form feed.
pub fn is_space(c: u8) -> bool {
    c.is_ascii_whitespace()
}

/// ASCII control characters (includes `\n` and `\t`; the lexer checks for
/// newlines before consulting this).
pub fn is_control(c: u8) -> bool {
    c.is_ascii_control()
}

/// ASCII letter.
pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII letter or decimal digit.
pub fn is_alnum(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Decimal digit.
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Hexadecimal digit.
pub fn is_xdigit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert!(is_space(b' ') && is_space(b'\t') && is_space(b'\n'));
        assert!(!is_space(b'a'));
        assert!(is_control(b'\x07') && !is_control(b'A'));
        assert!(is_alpha(b'z') && is_alpha(b'A') && !is_alpha(b'_'));
        assert!(is_alnum(b'9') && is_alnum(b'q') && !is_alnum(b'-'));
        assert!(is_digit(b'0') && !is_digit(b'a'));
        assert!(is_xdigit(b'f') && is_xdigit(b'B') && !is_xdigit(b'g'));
    }

    #[test]
    fn test_high_bytes_match_nothing() {
        for c in 0x80u8..=0xFF {
            assert!(!is_space(c) && !is_alpha(c) && !is_digit(c));
        }
    }
}
