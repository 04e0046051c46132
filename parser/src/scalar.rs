//! Readers for the four scalar styles.
//!
//! Every reader returns `Ok(None)` without moving the cursor when the input does not start a
//! scalar of its style.

use crate::{
    char_traits::{
        as_hex, hex_escape_len, is_blank, is_blank_or_break, is_break, is_flow,
        is_plain_forbidden_start, simple_escape,
    },
    state::{write_folded_lines, State},
    ErrorKind, ScanError,
};

/// How trailing line breaks of a block scalar are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Chomping {
    /// Keep a single trailing line break (default).
    Clip,
    /// Remove every trailing line break (`-`).
    Strip,
    /// Keep every trailing line break (`+`).
    Keep,
}

/// Read a plain scalar.
///
/// Continuation lines must be indented at least `node_indent` spaces. `within_flow` enables the
/// flow indicators as terminators.
pub(crate) fn read_plain_scalar(
    state: &mut State,
    node_indent: isize,
    within_flow: bool,
) -> Result<Option<String>, ScanError> {
    if is_plain_forbidden_start(state.ch) {
        return Ok(None);
    }
    if (state.ch == '?' || state.ch == '-')
        && (state.following_is_separator() || within_flow && is_flow(state.following()))
    {
        return Ok(None);
    }

    let mut out = String::new();
    let mut capture_start = state.position;
    let mut capture_end = state.position;
    // Line at which the pending line breaks started.
    let mut pending_from: Option<usize> = None;

    while !state.is_eof() {
        let ch = state.ch;
        if ch == ':' {
            if state.following_is_separator() || within_flow && is_flow(state.following()) {
                break;
            }
        } else if ch == '#' {
            if is_blank_or_break(state.preceding()) {
                break;
            }
        } else if state.test_document_separator() || within_flow && is_flow(ch) {
            break;
        } else if is_break(ch) {
            let (line, line_start, line_indent) = (state.line, state.line_start, state.line_indent);
            state.skip_separation_space(false, -1)?;
            if state.line_indent >= node_indent {
                pending_from = Some(line);
                continue;
            }
            state.line = line;
            state.line_start = line_start;
            state.line_indent = line_indent;
            state.seek(capture_end);
            break;
        }

        if let Some(line) = pending_from.take() {
            state.capture_segment(&mut out, capture_start, capture_end, false)?;
            write_folded_lines(&mut out, state.line - line);
            capture_start = state.position;
            capture_end = state.position;
        }
        if !is_blank(ch) {
            capture_end = state.position + ch.len_utf8();
        }
        state.advance();
    }

    state.capture_segment(&mut out, capture_start, capture_end, false)?;
    Ok((!out.is_empty()).then_some(out))
}

/// Read a single-quoted scalar.
pub(crate) fn read_single_quoted_scalar(
    state: &mut State,
    node_indent: isize,
) -> Result<Option<String>, ScanError> {
    if state.ch != '\'' {
        return Ok(None);
    }

    let mut out = String::new();
    state.advance();
    let mut capture_start = state.position;
    let mut capture_end = state.position;

    while !state.is_eof() {
        if state.ch == '\'' {
            state.capture_segment(&mut out, capture_start, state.position, true)?;
            state.advance();
            if state.ch != '\'' {
                return Ok(Some(out));
            }
            // `''` is an escaped quote: keep the second one.
            capture_start = state.position;
            state.advance();
            capture_end = state.position;
        } else if is_break(state.ch) {
            state.capture_segment(&mut out, capture_start, capture_end, true)?;
            let breaks = state.skip_separation_space(false, node_indent)?;
            write_folded_lines(&mut out, breaks);
            capture_start = state.position;
            capture_end = state.position;
        } else if state.test_document_separator() {
            return Err(state.error(
                ErrorKind::Scalar,
                "unexpected end of the document within a single quoted scalar",
            ));
        } else {
            let ch = state.ch;
            state.advance();
            if !is_blank(ch) {
                capture_end = state.position;
            }
        }
    }

    Err(state.error(
        ErrorKind::Scalar,
        "unexpected end of the stream within a single quoted scalar",
    ))
}

/// Read a double-quoted scalar, decoding its escape sequences.
pub(crate) fn read_double_quoted_scalar(
    state: &mut State,
    node_indent: isize,
) -> Result<Option<String>, ScanError> {
    if state.ch != '"' {
        return Ok(None);
    }

    let mut out = String::new();
    state.advance();
    let mut capture_start = state.position;
    let mut capture_end = state.position;

    while !state.is_eof() {
        if state.ch == '"' {
            state.capture_segment(&mut out, capture_start, state.position, true)?;
            state.advance();
            return Ok(Some(out));
        } else if state.ch == '\\' {
            state.capture_segment(&mut out, capture_start, state.position, true)?;
            state.advance();
            read_escape(state, &mut out, node_indent)?;
            capture_start = state.position;
            capture_end = state.position;
        } else if is_break(state.ch) {
            state.capture_segment(&mut out, capture_start, capture_end, true)?;
            let breaks = state.skip_separation_space(false, node_indent)?;
            write_folded_lines(&mut out, breaks);
            capture_start = state.position;
            capture_end = state.position;
        } else if state.test_document_separator() {
            return Err(state.error(
                ErrorKind::Scalar,
                "unexpected end of the document within a double quoted scalar",
            ));
        } else {
            let ch = state.ch;
            state.advance();
            if !is_blank(ch) {
                capture_end = state.position;
            }
        }
    }

    Err(state.error(
        ErrorKind::Scalar,
        "unexpected end of the stream within a double quoted scalar",
    ))
}

/// Decode the escape sequence following a backslash.
fn read_escape(state: &mut State, out: &mut String, node_indent: isize) -> Result<(), ScanError> {
    if is_break(state.ch) {
        // Escaped line break: the break and the indentation are dropped.
        state.skip_separation_space(false, node_indent)?;
    } else if let Some(c) = simple_escape(state.ch) {
        out.push(c);
        state.advance();
    } else if let Some(len) = hex_escape_len(state.ch) {
        let mut code = 0u32;
        for _ in 0..len {
            state.advance();
            let Some(digit) = as_hex(state.ch) else {
                return Err(state.error(ErrorKind::Scalar, "expected hexadecimal character"));
            };
            code = (code << 4) | digit;
        }
        let Some(c) = char::from_u32(code) else {
            return Err(state.error(
                ErrorKind::Scalar,
                format!("escaped code point U+{code:X} is not a valid Unicode scalar value"),
            ));
        };
        out.push(c);
        state.advance();
    } else {
        return Err(state.error(ErrorKind::Scalar, "unknown escape sequence"));
    }
    Ok(())
}

/// Read a literal (`|`) or folded (`>`) block scalar.
///
/// `node_indent` is the indentation of the enclosing node plus one.
pub(crate) fn read_block_scalar(
    state: &mut State,
    node_indent: isize,
) -> Result<Option<String>, ScanError> {
    let folding = match state.ch {
        '|' => false,
        '>' => true,
        _ => return Ok(None),
    };

    let mut chomping = Chomping::Clip;
    let mut indent_known = false;
    let mut text_indent = node_indent;

    loop {
        state.advance();
        match state.ch {
            '+' | '-' => {
                if chomping != Chomping::Clip {
                    return Err(state.error(
                        ErrorKind::Scalar,
                        "repeat of a chomping mode identifier",
                    ));
                }
                chomping = if state.ch == '+' {
                    Chomping::Keep
                } else {
                    Chomping::Strip
                };
            }
            '0' => {
                return Err(state.error(
                    ErrorKind::Indentation,
                    "bad explicit indentation width of a block scalar; it cannot be less than one",
                ));
            }
            '1'..='9' => {
                if indent_known {
                    return Err(state.error(
                        ErrorKind::Indentation,
                        "repeat of an indentation width identifier",
                    ));
                }
                let digit = state.ch as isize - '1' as isize;
                text_indent = node_indent + digit;
                indent_known = true;
            }
            _ => break,
        }
    }

    if is_blank(state.ch) {
        state.skip_while(is_blank);
        if state.ch == '#' {
            state.skip_to_line_end();
        }
    }

    let mut out = String::new();
    let mut empty_lines = 0;
    let mut has_content = false;
    let mut at_more_indented = false;
    let breaks = |n: usize| "\n".repeat(n);

    while !state.is_eof() {
        state.read_line_break()?;
        state.line_indent = 0;
        while (!indent_known || state.line_indent < text_indent) && state.ch == ' ' {
            state.line_indent += 1;
            state.advance();
        }
        if !indent_known && state.line_indent > text_indent {
            text_indent = state.line_indent;
        }

        if is_break(state.ch) {
            empty_lines += 1;
            continue;
        }

        if state.line_indent < text_indent || state.is_eof() || state.test_document_separator() {
            match chomping {
                Chomping::Keep if has_content => out.push_str(&breaks(empty_lines + 1)),
                Chomping::Keep => out.push_str(&breaks(empty_lines)),
                Chomping::Clip if has_content => out.push('\n'),
                Chomping::Clip | Chomping::Strip => {}
            }
            break;
        }

        // Line breaks preceding a content line, before any content, are kept as they are.
        let leading = if has_content {
            empty_lines + 1
        } else {
            empty_lines
        };
        if !folding {
            out.push_str(&breaks(leading));
        } else if is_blank(state.ch) {
            // More-indented lines are not folded.
            at_more_indented = true;
            out.push_str(&breaks(leading));
        } else if at_more_indented {
            at_more_indented = false;
            out.push_str(&breaks(empty_lines + 1));
        } else if empty_lines == 0 {
            if has_content {
                out.push(' ');
            }
        } else {
            out.push_str(&breaks(empty_lines));
        }

        has_content = true;
        indent_known = true;
        empty_lines = 0;
        let start = state.position;
        state.skip_to_line_end();
        state.capture_segment(&mut out, start, state.position, false)?;
    }

    Ok(Some(out))
}
