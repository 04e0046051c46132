//! Holds functions to determine if a character belongs to a specific character set.

use std::sync::LazyLock;

use regex::Regex;

/// Check whether the character is nil (`\0`).
///
/// The cursor reports `\0` once it has run past the end of the input.
#[inline]
#[must_use]
pub fn is_z(c: char) -> bool {
    c == '\0'
}

/// Check whether the character is a line break (`\r` or `\n`).
#[inline]
#[must_use]
pub fn is_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Check whether the character is a whitespace (` ` or `\t`).
#[inline]
#[must_use]
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Check whether the character is a linebreak or a whitespace.
///
/// ` `, `\t`, `\n`, `\r`
#[inline]
#[must_use]
pub fn is_blank_or_break(c: char) -> bool {
    is_blank(c) || is_break(c)
}

/// Check whether the character is a YAML flow character (one of `,[]{}`).
#[inline]
#[must_use]
pub fn is_flow(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// Check whether the character is the BOM character.
#[inline]
#[must_use]
pub fn is_bom(c: char) -> bool {
    c == '\u{FEFF}'
}

/// Convert the hexadecimal digit to an integer.
///
/// Returns [`None`] if `c` is not a hexadecimal digit (case insensitive).
#[inline]
#[must_use]
pub fn as_hex(c: char) -> Option<u32> {
    c.to_digit(16)
}

/// Check whether the character may not start a plain scalar.
///
/// This covers every indicator character except `-`, `?` and `:`, which only end up being
/// indicators depending on what follows them.
#[inline]
#[must_use]
pub fn is_plain_forbidden_start(c: char) -> bool {
    is_blank_or_break(c)
        || is_flow(c)
        || matches!(
            c,
            '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`'
        )
}

/// Check whether the character is allowed anywhere in a YAML stream.
///
/// Rejects the C0 control block (save for tab and line breaks), `DEL`, the C1 control block
/// (save for `NEL`) and the two non-characters `U+FFFE` / `U+FFFF`.
#[inline]
#[must_use]
pub fn is_printable(c: char) -> bool {
    !matches!(
        c,
        '\0'..='\x08'
            | '\x0B'
            | '\x0C'
            | '\x0E'..='\x1F'
            | '\x7F'..='\u{84}'
            | '\u{86}'..='\u{9F}'
            | '\u{FFFE}'
            | '\u{FFFF}'
    )
}

/// Check whether the character may appear in a quoted scalar that must stay JSON-compatible.
#[inline]
#[must_use]
pub fn is_json_char(c: char) -> bool {
    c == '\t' || c >= ' '
}

/// Check whether the character is a line break YAML 1.1 used to recognize (`NEL`, `LS`, `PS`).
#[inline]
#[must_use]
pub fn is_non_ascii_break(c: char) -> bool {
    matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Return the value of a single-character escape sequence in a double-quoted scalar.
///
/// `c` is the character following the backslash.
#[must_use]
pub fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        't' | '\t' => '\t',
        'n' => '\n',
        'v' => '\x0B',
        'f' => '\x0C',
        'r' => '\r',
        'e' => '\x1B',
        ' ' => ' ',
        '"' => '"',
        '/' => '/',
        '\\' => '\\',
        'N' => '\u{85}',
        '_' => '\u{A0}',
        'L' => '\u{2028}',
        'P' => '\u{2029}',
        _ => return None,
    })
}

/// Return the number of hexadecimal digits a `\x`, `\u` or `\U` escape sequence expects.
#[must_use]
pub fn hex_escape_len(c: char) -> Option<usize> {
    match c {
        'x' => Some(2),
        'u' => Some(4),
        'U' => Some(8),
        _ => None,
    }
}

static TAG_HANDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:!|!!|![a-z\-]+!)$").expect("tag handle pattern is valid")
});

static TAG_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:!|[^,\[\]{}])(?:%[0-9a-f]{2}|[0-9a-z\-#;/?:@&=+$,_.!~*'()\[\]])*$")
        .expect("tag URI pattern is valid")
});

/// Check whether `handle` is a well-formed tag handle (`!`, `!!` or `!name!`).
#[must_use]
pub fn is_tag_handle(handle: &str) -> bool {
    TAG_HANDLE.is_match(handle)
}

/// Check whether `uri` is a well-formed tag prefix or tag suffix.
#[must_use]
pub fn is_tag_uri(uri: &str) -> bool {
    TAG_URI.is_match(uri)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tag_handles() {
        assert!(is_tag_handle("!"));
        assert!(is_tag_handle("!!"));
        assert!(is_tag_handle("!e-x!"));
        assert!(is_tag_handle("!Ex!"));
        assert!(!is_tag_handle("!e_x!"));
        assert!(!is_tag_handle("!ex"));
        assert!(!is_tag_handle("ex!"));
    }

    #[test]
    fn tag_uris() {
        assert!(is_tag_uri("tag:yaml.org,2002:"));
        assert!(is_tag_uri("!my-tag"));
        assert!(is_tag_uri("foo%21bar"));
        assert!(!is_tag_uri("foo%2"));
        assert!(!is_tag_uri("{foo"));
        assert!(!is_tag_uri("foo bar"));
    }

    #[test]
    fn printable() {
        assert!(is_printable('a'));
        assert!(is_printable('\t'));
        assert!(is_printable('\n'));
        assert!(is_printable('\u{85}'));
        assert!(is_printable('é'));
        assert!(!is_printable('\x01'));
        assert!(!is_printable('\x7F'));
        assert!(!is_printable('\u{FFFE}'));
    }

    #[test]
    fn escapes() {
        assert_eq!(simple_escape('0'), Some('\0'));
        assert_eq!(simple_escape('_'), Some('\u{A0}'));
        assert_eq!(simple_escape('q'), None);
        assert_eq!(hex_escape_len('U'), Some(8));
        assert_eq!(as_hex('f'), Some(15));
        assert_eq!(as_hex('G'), None);
    }
}
