//! The cursor walking over the input, and the scratch data of the document being loaded.

use std::{collections::HashMap, rc::Rc};

use hashlink::LinkedHashMap;

use crate::{
    char_traits::{is_blank, is_blank_or_break, is_break, is_json_char, is_z},
    ErrorKind, Marker, Node, Options, ScanError, Schema, Warning,
};

/// The context a node is composed in.
///
/// Block collections and block scalars are only allowed in block contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    /// Inside a flow collection.
    FlowIn,
    /// An implicit key of a block mapping.
    FlowOut,
    /// An entry of a block sequence.
    BlockIn,
    /// A document root, or the key or value of a block mapping.
    BlockOut,
}

impl Context {
    pub(crate) fn is_block(self) -> bool {
        matches!(self, Context::BlockIn | Context::BlockOut)
    }

    pub(crate) fn is_flow(self) -> bool {
        !self.is_block()
    }
}

/// The loading state of a YAML stream.
///
/// `position` is a byte offset into `input`, and `ch` the character starting there (`\0` past the
/// end). `line` and `line_start` always agree with `position`. `line_indent` is the number of
/// spaces the current line starts with, and may be `-1` before the first line was measured.
pub(crate) struct State<'input, 'a> {
    pub(crate) input: &'input str,
    pub(crate) options: &'a Options,
    pub(crate) schema: &'a Schema,

    pub(crate) position: usize,
    pub(crate) line: usize,
    pub(crate) line_start: usize,
    pub(crate) line_indent: isize,
    pub(crate) ch: char,

    /// The version given by the `%YAML` directive of the current document.
    pub(crate) version: Option<String>,
    /// Whether non-ASCII line breaks in the current document deserve a warning.
    pub(crate) check_line_breaks: bool,
    /// Handles declared with `%TAG` in the current document.
    pub(crate) tag_map: LinkedHashMap<String, String>,
    /// Anchored nodes of the current document.
    pub(crate) anchor_map: HashMap<String, Rc<Node>>,
    /// The number of nodes currently being composed.
    pub(crate) depth: usize,
}

impl<'input, 'a> State<'input, 'a> {
    pub(crate) fn new(input: &'input str, schema: &'a Schema, options: &'a Options) -> Self {
        Self {
            input,
            options,
            schema,
            position: 0,
            line: 0,
            line_start: 0,
            line_indent: 0,
            ch: char_at(input, 0),
            version: None,
            check_line_breaks: options.is_legacy(),
            tag_map: LinkedHashMap::new(),
            anchor_map: HashMap::new(),
            depth: 0,
        }
    }

    /// Forget the directives and anchors of the previous document.
    pub(crate) fn reset_document(&mut self) {
        self.version = None;
        self.check_line_breaks = self.options.is_legacy();
        self.tag_map.clear();
        self.anchor_map.clear();
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Return the character starting at the byte `index`, or `\0` past the end.
    #[inline]
    pub(crate) fn char_at(&self, index: usize) -> char {
        char_at(self.input, index)
    }

    /// Return the character following the current one.
    #[inline]
    pub(crate) fn following(&self) -> char {
        self.char_at(self.position + self.ch.len_utf8())
    }

    /// Return the character preceding the current one, or `\0` at the start of the input.
    #[inline]
    pub(crate) fn preceding(&self) -> char {
        self.input[..self.position].chars().next_back().unwrap_or('\0')
    }

    /// Move to the next character.
    #[inline]
    pub(crate) fn advance(&mut self) {
        if !self.is_eof() {
            self.position += self.ch.len_utf8();
        }
        self.ch = self.char_at(self.position);
    }

    /// Move the cursor to the given byte `position` of the current line.
    #[inline]
    pub(crate) fn seek(&mut self, position: usize) {
        self.position = position;
        self.ch = self.char_at(position);
    }

    /// Move past every character matching `f`.
    pub(crate) fn skip_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.ch) {
            self.advance();
        }
    }

    /// Move to the end of the current line, leaving the cursor on the line break.
    pub(crate) fn skip_to_line_end(&mut self) {
        self.skip_while(|c| !is_break(c));
    }

    /// Return the column of the cursor, in characters.
    pub(crate) fn column(&self) -> isize {
        let col = self.input[self.line_start..self.position].chars().count();
        isize::try_from(col).unwrap_or(isize::MAX)
    }

    /// Return a [`Marker`] at the cursor.
    pub(crate) fn mark(&self) -> Marker {
        Marker::new(
            self.input,
            self.position,
            self.line,
            self.line_start,
            self.options.get_filename(),
        )
    }

    /// Return a [`ScanError`] at the cursor.
    pub(crate) fn error(&self, kind: ErrorKind, info: impl Into<String>) -> ScanError {
        ScanError::new(kind, self.mark(), info)
    }

    /// Raise a warning at the cursor.
    ///
    /// # Errors
    /// Returns the warning as an error in strict mode.
    pub(crate) fn warn(&self, kind: ErrorKind, info: impl Into<String>) -> Result<(), ScanError> {
        let warning = Warning::new(kind, self.mark(), info);
        if self.options.is_strict() {
            return Err(warning.into());
        }
        match self.options.warning_sink() {
            Some(sink) => sink(&warning),
            None => tracing::warn!(
                line = warning.marker().line() + 1,
                column = warning.marker().col() + 1,
                "{}",
                warning
            ),
        }
        Ok(())
    }

    /// Consume a line break (`\n`, `\r` or `\r\n`).
    ///
    /// # Errors
    /// Returns an error if the cursor is not on a line break.
    pub(crate) fn read_line_break(&mut self) -> Result<(), ScanError> {
        match self.ch {
            '\n' => self.position += 1,
            '\r' => {
                self.position += if self.following() == '\n' { 2 } else { 1 };
            }
            _ => return Err(self.error(ErrorKind::Stream, "a line break is expected")),
        }
        self.line += 1;
        self.line_start = self.position;
        self.ch = self.char_at(self.position);
        Ok(())
    }

    /// Consume the spaces starting the current line, updating `line_indent`.
    pub(crate) fn read_indent(&mut self) {
        self.line_indent = 0;
        while self.ch == ' ' {
            self.line_indent += 1;
            self.advance();
        }
    }

    /// Skip blanks, line breaks and, if `allow_comments`, comments.
    ///
    /// On every new line, `line_indent` is updated and a warning is raised if it is lower than
    /// `check_indent`.
    ///
    /// # Return
    /// Returns the number of line breaks consumed.
    ///
    /// # Errors
    /// Returns an error if a deficient indentation warning is raised in strict mode.
    pub(crate) fn skip_separation_space(
        &mut self,
        allow_comments: bool,
        check_indent: isize,
    ) -> Result<usize, ScanError> {
        let mut line_breaks = 0;
        while !self.is_eof() {
            self.skip_while(is_blank);
            if allow_comments && self.ch == '#' {
                self.skip_to_line_end();
            }

            if !is_break(self.ch) {
                break;
            }
            self.read_line_break()?;
            line_breaks += 1;
            self.read_indent();
            if self.line_indent < check_indent {
                self.warn(ErrorKind::Indentation, "deficient indentation")?;
            }
        }
        Ok(line_breaks)
    }

    /// Check whether `---` or `...` starts at the cursor.
    ///
    /// The marker must be at the start of a line, and followed by a blank, a line break or the end
    /// of the input.
    pub(crate) fn test_document_separator(&self) -> bool {
        self.position == self.line_start
            && (self.next_is_document_start() || self.next_is_document_end())
    }

    /// Check whether `---` starts at the cursor, followed by a blank, a line break or the end of
    /// the input.
    pub(crate) fn next_is_document_start(&self) -> bool {
        next_is_marker(&self.input[self.position..], "---")
    }

    /// Check whether `...` starts at the cursor, followed by a blank, a line break or the end of
    /// the input.
    pub(crate) fn next_is_document_end(&self) -> bool {
        next_is_marker(&self.input[self.position..], "...")
    }

    /// Check whether the current character, followed by a blank, a line break or the end of the
    /// input, makes an indicator.
    pub(crate) fn following_is_separator(&self) -> bool {
        let following = self.following();
        is_z(following) || is_blank_or_break(following)
    }

    /// Append `input[start..end]` to `out`.
    ///
    /// # Errors
    /// When `check_json` is set and validation is enabled, returns an error if the segment
    /// contains a character that is neither a tab nor at least a space.
    pub(crate) fn capture_segment(
        &self,
        out: &mut String,
        start: usize,
        end: usize,
        check_json: bool,
    ) -> Result<(), ScanError> {
        if start >= end {
            return Ok(());
        }
        let segment = &self.input[start..end];
        if check_json
            && self.options.is_validating()
            && segment.chars().any(|c| !is_json_char(c))
        {
            return Err(self.error(ErrorKind::Scalar, "expected valid JSON character"));
        }
        out.push_str(segment);
        Ok(())
    }
}

/// Append the folded representation of `count` line breaks to `out`.
///
/// A single break becomes a space; `n` breaks become `n - 1` newlines.
pub(crate) fn write_folded_lines(out: &mut String, count: usize) {
    match count {
        0 => {}
        1 => out.push(' '),
        n => out.push_str(&"\n".repeat(n - 1)),
    }
}

#[inline]
fn char_at(input: &str, index: usize) -> char {
    input
        .get(index..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or('\0')
}

fn next_is_marker(rest: &str, marker: &str) -> bool {
    rest.strip_prefix(marker)
        .is_some_and(|after| after.chars().next().map_or(true, is_blank_or_break))
}

#[cfg(test)]
mod test {
    use crate::{Options, Schema};

    use super::*;

    fn with_state(input: &str, f: impl FnOnce(&mut State)) {
        let schema = Schema::default();
        let options = Options::default();
        let mut state = State::new(input, &schema, &options);
        f(&mut state);
    }

    #[test]
    pub fn is_document_start() {
        with_state("---\n", |s| {
            assert!(s.next_is_document_start());
            assert!(s.test_document_separator());
        });
        with_state("---", |s| assert!(s.next_is_document_start()));
        with_state("--- ", |s| assert!(s.next_is_document_start()));
        with_state("...\n", |s| {
            assert!(!s.next_is_document_start());
            assert!(s.test_document_separator());
        });
        with_state("---x", |s| {
            assert!(!s.next_is_document_start());
            assert!(!s.test_document_separator());
        });
    }

    #[test]
    pub fn is_document_end() {
        with_state("...\n", |s| assert!(s.next_is_document_end()));
        with_state("...", |s| assert!(s.next_is_document_end()));
        with_state("... ", |s| assert!(s.next_is_document_end()));
        with_state("---\n", |s| assert!(!s.next_is_document_end()));
        with_state(" ...", |s| {
            s.advance();
            assert!(s.next_is_document_end());
            assert!(!s.test_document_separator());
        });
    }

    #[test]
    fn line_breaks() {
        with_state("a\r\n  b\rc", |s| {
            assert!(s.read_line_break().is_err());
            s.advance();
            s.read_line_break().unwrap();
            assert_eq!((s.line, s.line_start, s.ch), (1, 3, ' '));
            s.read_indent();
            assert_eq!((s.line_indent, s.ch, s.column()), (2, 'b', 2));
            s.advance();
            s.read_line_break().unwrap();
            assert_eq!((s.line, s.ch), (2, 'c'));
        });
    }

    #[test]
    fn separation_space() {
        with_state("  # comment\n\n   x", |s| {
            assert_eq!(s.skip_separation_space(true, -1).unwrap(), 2);
            assert_eq!((s.line, s.line_indent, s.ch), (2, 3, 'x'));
        });
        with_state("# comment\nx", |s| {
            assert_eq!(s.skip_separation_space(false, -1).unwrap(), 0);
            assert_eq!(s.ch, '#');
        });
    }

    #[test]
    fn deficient_indentation_is_fatal_when_strict() {
        let schema = Schema::default();
        let options = Options::default().strict(true);
        let mut state = State::new("a\nb", &schema, &options);
        state.advance();
        let error = state.skip_separation_space(false, 1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Indentation);
        assert_eq!(error.info(), "deficient indentation");
    }

    #[test]
    fn folded_lines() {
        let mut out = String::from("a");
        write_folded_lines(&mut out, 1);
        write_folded_lines(&mut out, 0);
        out.push('b');
        write_folded_lines(&mut out, 3);
        assert_eq!(out, "a b\n\n");
    }

    #[test]
    fn json_segments() {
        with_state("a\u{1}b", |s| {
            let mut out = String::new();
            assert!(s.capture_segment(&mut out, 0, 1, true).is_ok());
            assert!(s.capture_segment(&mut out, 0, 3, true).is_err());
            assert!(s.capture_segment(&mut out, 0, 3, false).is_ok());
            assert_eq!(out, "aa\u{1}b");
        });
    }
}
