//! Shared expression semantics used by both the runtime and the CLI.
//!
//! This crate centralizes the generic token character class and the
//! well-known evaluation variable names to avoid drift between the runtime
//! (`exprenv`) and tooling (`exprenv-cli`).

use unicode_general_category::{GeneralCategory, get_general_category};

pub mod names;

/// Characters that always terminate a generic token.
///
/// These delimit constructs of the full expression grammar (calls, literals,
/// operators, variable and message expressions), so a string containing any
/// of them must be handed to the grammar parser.
pub const TOKEN_DELIMITERS: &[char] = &[
    ' ', '\n', '(', ')', '\'', '"', '<', '>', '{', '}', '=', ',', ';', ':', '+', '*', '$', '%',
    '&', '#',
];

/// Punctuation that is always part of a generic token.
pub const TOKEN_PUNCTUATION: &[char] = &['[', ']', '.', '_'];

/// Classification of a single character in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCharClass {
    /// Always token material.
    Token,
    /// Token material only after a non-numeric token character (`-`).
    Hyphen,
    /// Never token material.
    Delimiter,
}

/// Classify a character without looking at its neighbours.
///
/// Resolution order:
/// 1. ASCII letters and digits
/// 2. Explicit delimiters
/// 3. Token punctuation and the hyphen
/// 4. Any other letter (`L*`) or decimal digit (`Nd`) in the Basic
///    Multilingual Plane
pub fn char_class(c: char) -> TokenCharClass {
    if c.is_ascii_alphanumeric() {
        return TokenCharClass::Token;
    }
    if TOKEN_DELIMITERS.contains(&c) {
        return TokenCharClass::Delimiter;
    }
    if TOKEN_PUNCTUATION.contains(&c) {
        return TokenCharClass::Token;
    }
    if c == '-' {
        return TokenCharClass::Hyphen;
    }
    if is_bmp_letter_or_digit(c) {
        TokenCharClass::Token
    } else {
        TokenCharClass::Delimiter
    }
}

/// Letters and decimal digits, judged one UTF-16 unit at a time.
///
/// Characters outside the BMP never qualify, nor do other numerics such as
/// `²`, `½` or `①`, nor combining marks.
fn is_bmp_letter_or_digit(c: char) -> bool {
    if u32::from(c) > 0xFFFF {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Find the byte offset of the first character that disqualifies `input`
/// from being a generic token.
///
/// Returns `None` when every character is token material. A hyphen counts as
/// token material only when some earlier character is neither an ASCII digit
/// nor `.`, so `data-id` is a token while `-3` and `3-4` are not. The empty
/// string trivially passes.
///
/// # Examples
///
/// ```
/// use exprenv_semantics::find_invalid_token_char;
///
/// assert_eq!(find_invalid_token_char("abc123"), None);
/// assert_eq!(find_invalid_token_char("a(b)"), Some(1));
/// assert_eq!(find_invalid_token_char("3-4"), Some(1));
/// ```
pub fn find_invalid_token_char(input: &str) -> Option<usize> {
    let mut seen_non_numeric = false;
    for (offset, c) in input.char_indices() {
        match char_class(c) {
            TokenCharClass::Token => {}
            TokenCharClass::Hyphen if seen_non_numeric => {}
            TokenCharClass::Hyphen | TokenCharClass::Delimiter => return Some(offset),
        }
        if !(c.is_ascii_digit() || c == '.') {
            seen_non_numeric = true;
        }
    }
    None
}

/// Returns true if the whole of `input` is a generic token.
pub fn scan_token(input: &str) -> bool {
    find_invalid_token_char(input).is_none()
}
