//! Errors and warnings raised while loading a YAML stream.

use std::fmt;

use thiserror::Error;

/// Maximum width of the input excerpt rendered in a [`Marker`] snippet.
const SNIPPET_MAX_LENGTH: usize = 75;
/// Number of spaces the snippet is indented with.
const SNIPPET_INDENT: usize = 4;

/// A location in the YAML input.
///
/// Markers are only built when an error or a warning is raised. Besides the position, they carry
/// the name of the file being loaded (if any was given) and an excerpt of the line the position
/// points to.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Marker {
    /// The index (in bytes) in the input string.
    index: usize,
    /// The line (0-indexed).
    line: usize,
    /// The column (0-indexed, in characters).
    col: usize,
    filename: Option<String>,
    snippet: String,
}

impl Marker {
    /// Create a new [`Marker`] at the given byte `index` of `input`.
    ///
    /// `line_start` is the byte index at which the line containing `index` starts.
    #[must_use]
    pub fn new(
        input: &str,
        index: usize,
        line: usize,
        line_start: usize,
        filename: Option<&str>,
    ) -> Marker {
        let index = floor_char_boundary(input, index);
        let line_start = floor_char_boundary(input, line_start.min(index));
        Marker {
            index,
            line,
            col: input[line_start..index].chars().count(),
            filename: filename.map(ToOwned::to_owned),
            snippet: render_snippet(input, index),
        }
    }

    /// Create a new [`Marker`] at the given byte `index` of `input`, computing its line.
    #[must_use]
    pub fn at(input: &str, index: usize, filename: Option<&str>) -> Marker {
        let index = floor_char_boundary(input, index);
        let mut line = 0;
        let mut line_start = 0;
        let mut chars = input[..index].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let is_line_end = match c {
                '\n' => true,
                '\r' => chars.peek().map_or(true, |&(_, next)| next != '\n'),
                _ => false,
            };
            if is_line_end {
                line += 1;
                line_start = i + 1;
            }
        }
        Marker::new(input, index, line, line_start, filename)
    }

    /// Return the index (in bytes) of the marker in the source.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the line of the marker in the source (0-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the column of the marker in the source (0-indexed).
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Return the name of the file the marker points into, if one was given.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Return the excerpt of the input around the marker, with a caret under the marked column.
    #[must_use]
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filename) = &self.filename {
            write!(f, "in \"{filename}\" ")?;
        }
        write!(f, "at line {}, column {}", self.line + 1, self.col + 1)
    }
}

/// Render the line around `index`, cut down to [`SNIPPET_MAX_LENGTH`] characters.
fn render_snippet(input: &str, index: usize) -> String {
    let is_line_end = |c: char| matches!(c, '\0' | '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}');
    let half = SNIPPET_MAX_LENGTH / 2 - 1;

    let mut head = "";
    let mut before: Vec<char> = input[..index]
        .chars()
        .rev()
        .take_while(|c| !is_line_end(*c))
        .collect();
    if before.len() > half {
        head = " ... ";
        before.truncate(half - head.len());
    }
    before.reverse();

    let mut tail = "";
    let mut after: Vec<char> = input[index..]
        .chars()
        .take_while(|c| !is_line_end(*c))
        .collect();
    if after.len() > half {
        tail = " ... ";
        after.truncate(half - tail.len());
    }

    let indent = " ".repeat(SNIPPET_INDENT);
    let excerpt: String = before.iter().chain(after.iter()).collect();
    let caret_offset = head.len() + before.len();
    format!(
        "{indent}{head}{excerpt}{tail}\n{indent}{}^",
        " ".repeat(caret_offset)
    )
}

/// Move `index` back to the closest UTF-8 character boundary of `input`.
fn floor_char_boundary(input: &str, index: usize) -> usize {
    let mut index = index.min(input.len());
    while !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// The family an error or a warning belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed, duplicate or unsupported `%YAML` / `%TAG` directive.
    Directive,
    /// Unterminated scalar, invalid escape sequence or invalid character in a scalar.
    Scalar,
    /// Deficient or bad indentation.
    Indentation,
    /// Malformed tag, undeclared handle, duplicate tag or failed tag resolution.
    Tag,
    /// Duplicate or empty anchor.
    Anchor,
    /// Empty, undefined or decorated alias.
    Alias,
    /// Structural error in the stream (missing comma, unexpected end of stream, ...).
    Stream,
    /// Document-level error (missing document separator, unexpected number of documents, ...).
    Document,
    /// A configured resource limit was exceeded.
    Limit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Directive => "directive error",
            ErrorKind::Scalar => "scalar error",
            ErrorKind::Indentation => "indentation error",
            ErrorKind::Tag => "tag error",
            ErrorKind::Anchor => "anchor error",
            ErrorKind::Alias => "alias error",
            ErrorKind::Stream => "stream error",
            ErrorKind::Document => "document error",
            ErrorKind::Limit => "limit exceeded",
        })
    }
}

/// An error that aborted the loading of a YAML stream.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("{info} {mark}")]
pub struct ScanError {
    /// The kind of the error.
    kind: ErrorKind,
    /// The position at which the error happened in the source.
    mark: Marker,
    /// Human-readable details about the error.
    info: String,
}

impl ScanError {
    /// Create a new error from a location and an error string.
    #[must_use]
    pub fn new(kind: ErrorKind, mark: Marker, info: impl Into<String>) -> ScanError {
        ScanError {
            kind,
            mark,
            info: info.into(),
        }
    }

    /// Return the kind of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the marker pointing to the error in the source.
    #[must_use]
    pub fn marker(&self) -> &Marker {
        &self.mark
    }

    /// Return the information string describing the error that happened.
    #[must_use]
    pub fn info(&self) -> &str {
        self.info.as_ref()
    }

    /// Render the error along with the excerpt of the input it points to.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{self}:\n{}", self.mark.snippet())
    }
}

/// A non-fatal problem found while loading a YAML stream.
///
/// Warnings are reported through [`Options::on_warning`], or logged with [`tracing`] if no
/// handler is set. In [`Options::strict`] mode, they are turned into [`ScanError`]s instead.
///
/// [`Options::on_warning`]: crate::Options::on_warning
/// [`Options::strict`]: crate::Options::strict
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Warning {
    kind: ErrorKind,
    mark: Marker,
    info: String,
}

impl Warning {
    /// Create a new warning.
    #[must_use]
    pub fn new(kind: ErrorKind, mark: Marker, info: impl Into<String>) -> Warning {
        Warning {
            kind,
            mark,
            info: info.into(),
        }
    }

    /// Return the kind of the warning.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the marker pointing to the warning in the source.
    #[must_use]
    pub fn marker(&self) -> &Marker {
        &self.mark
    }

    /// Return the information string describing the warning.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.info, self.mark)
    }
}

impl From<Warning> for ScanError {
    fn from(warning: Warning) -> Self {
        ScanError::new(warning.kind, warning.mark, warning.info)
    }
}

/// The reason a document callback gave to stop loading the stream.
///
/// The loader turns it into a [`ScanError`] of kind [`ErrorKind::Document`].
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("{reason}")]
pub struct Abort {
    reason: String,
}

impl Abort {
    /// Create a new [`Abort`].
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Return the reason loading was stopped for.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn marker_position() {
        let input = "a: 1\nbé: [x, y\n";
        let index = input.find('[').unwrap();
        let mark = Marker::new(input, index, 1, 5, Some("conf.yaml"));
        assert_eq!(mark.line(), 1);
        assert_eq!(mark.col(), 4);
        assert_eq!(mark.index(), index);
        assert_eq!(mark.to_string(), "in \"conf.yaml\" at line 2, column 5");
        assert_eq!(mark.snippet(), "    bé: [x, y\n        ^");
    }

    #[test]
    fn marker_lines() {
        let input = "a\r\nb\rc\nd";
        let mark = Marker::at(input, input.len() - 1, None);
        assert_eq!((mark.line(), mark.col()), (3, 0));
        let mark = Marker::at(input, 4, None);
        assert_eq!((mark.line(), mark.col()), (1, 1));
    }

    #[test]
    fn long_lines_are_cut() {
        let input = format!("{}X{}", "a".repeat(100), "b".repeat(100));
        let mark = Marker::new(&input, 100, 0, 0, None);
        let mut lines = mark.snippet().lines();
        let excerpt = lines.next().unwrap();
        let caret = lines.next().unwrap();
        assert!(excerpt.starts_with("     ... "));
        assert!(excerpt.ends_with(" ... "));
        assert_eq!(excerpt.chars().nth(caret.len() - 1), Some('X'));
    }

    #[test]
    fn error_display() {
        let mark = Marker::new("[a, b", 5, 0, 0, None);
        let error = ScanError::new(
            ErrorKind::Stream,
            mark,
            "unexpected end of the stream within a flow collection",
        );
        assert_eq!(
            error.to_string(),
            "unexpected end of the stream within a flow collection at line 1, column 6"
        );
        assert_eq!(error.kind(), ErrorKind::Stream);
        assert!(error.render().ends_with("    [a, b\n         ^"));
    }
}
