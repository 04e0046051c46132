//! The document driver: directives, document markers and the loading entry points.

use std::{rc::Rc, sync::LazyLock};

use regex::Regex;

use crate::{
    char_traits::{
        is_blank, is_blank_or_break, is_bom, is_break, is_non_ascii_break, is_printable,
        is_tag_handle, is_tag_uri,
    },
    composer::compose_node,
    properties::decode_uri_escapes,
    state::{Context, State},
    Abort, ErrorKind, Marker, Node, Options, ScanError, Schema,
};

static YAML_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)$").expect("version pattern is valid")
});

/// Load every document of a YAML stream.
///
/// `on_document` is called with the root node of each document, in order, as soon as the
/// document is complete. Returning an [`Abort`] from it stops the loading.
///
/// # Errors
/// Returns an error if the stream is not valid YAML, if a warning is raised in strict mode, or
/// if `on_document` aborts. Documents preceding the error have already been handed to
/// `on_document`.
///
/// # Examples
///
/// ```
/// # use tessera_parser::{load_all_with, Options, Schema};
/// let mut documents = vec![];
/// load_all_with("a\n---\nb\n", &Schema::new(), &Options::default(), |node| {
///     documents.push(node.as_str().unwrap_or_default().to_owned());
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(documents, ["a", "b"]);
/// ```
pub fn load_all_with<F>(
    input: &str,
    schema: &Schema,
    options: &Options,
    mut on_document: F,
) -> Result<(), ScanError>
where
    F: FnMut(Rc<Node>) -> Result<(), Abort>,
{
    if options.is_validating() {
        if let Some((index, _)) = input.char_indices().find(|&(_, c)| !is_printable(c)) {
            return Err(ScanError::new(
                ErrorKind::Stream,
                Marker::at(input, index, options.get_filename()),
                "the stream contains non-printable characters",
            ));
        }
    }

    let mut state = State::new(input, schema, options);
    if is_bom(state.ch) {
        state.advance();
        state.line_start = state.position;
    }
    state.read_indent();

    let mut count = 0;
    while !state.is_eof() {
        if let Some(document) = read_document(&mut state)? {
            count += 1;
            tracing::debug!(document = count, line = state.line + 1, "document loaded");
            if let Err(abort) = on_document(document) {
                return Err(state.error(ErrorKind::Document, abort.reason()));
            }
        }
    }
    Ok(())
}

/// Load a YAML stream made of exactly one document.
///
/// # Errors
/// Returns an error if the stream is not valid YAML, if a warning is raised in strict mode, or if
/// the stream holds no document or more than one.
///
/// # Examples
///
/// ```
/// # use tessera_parser::{load_with, Options, Schema};
/// let node = load_with("[a, b]", &Schema::new(), &Options::default()).unwrap();
/// assert_eq!(node.get_index(1).and_then(|n| n.as_str()), Some("b"));
///
/// let error = load_with("a\n---\nb\n", &Schema::new(), &Options::default()).unwrap_err();
/// assert_eq!(error.info(), "expected a single document in the stream, but found more");
/// ```
pub fn load_with(input: &str, schema: &Schema, options: &Options) -> Result<Rc<Node>, ScanError> {
    let mut root = None;
    load_all_with(input, schema, options, |document| {
        if root.is_some() {
            return Err(Abort::new(
                "expected a single document in the stream, but found more",
            ));
        }
        root = Some(document);
        Ok(())
    })?;
    root.ok_or_else(|| {
        ScanError::new(
            ErrorKind::Document,
            Marker::at(input, input.len(), options.get_filename()),
            "expected a single document in the stream, but found none",
        )
    })
}

/// Read the next document of the stream.
///
/// # Return
/// Returns [`None`] if the document has no directive, no start marker and no content.
fn read_document(state: &mut State) -> Result<Option<Rc<Node>>, ScanError> {
    let document_start = state.position;
    state.reset_document();

    let mut has_directives = false;
    while !state.is_eof() {
        state.skip_separation_space(true, -1)?;
        if state.line_indent > 0 || state.ch != '%' {
            break;
        }
        has_directives = true;
        read_directive(state)?;
    }

    state.skip_separation_space(true, -1)?;
    let mut explicit_start = false;
    if state.line_indent == 0 && state.position == state.line_start && state.next_is_document_start()
    {
        explicit_start = true;
        for _ in 0..3 {
            state.advance();
        }
        state.skip_separation_space(true, -1)?;
    } else if has_directives {
        return Err(state.error(ErrorKind::Document, "directives end mark is expected"));
    }
    tracing::trace!(line = state.line + 1, explicit_start, "document start");

    let root = compose_node(state, state.line_indent - 1, Context::BlockOut, false, true)?;
    state.skip_separation_space(true, -1)?;

    if state.options.is_validating()
        && state.check_line_breaks
        && state.input[document_start..state.position].contains(is_non_ascii_break)
    {
        state.warn(
            ErrorKind::Stream,
            "non-ASCII line breaks are interpreted as content",
        )?;
    }

    let document = (has_directives || explicit_start || root.is_some())
        .then(|| root.unwrap_or_else(Node::null));

    if state.test_document_separator() {
        if state.next_is_document_end() {
            for _ in 0..3 {
                state.advance();
            }
            state.skip_separation_space(true, -1)?;
        }
    } else if !state.is_eof() {
        return Err(state.error(
            ErrorKind::Document,
            "end of the stream or a document separator is expected",
        ));
    }
    Ok(document)
}

/// Read a `%` directive line and apply it.
fn read_directive(state: &mut State) -> Result<(), ScanError> {
    state.advance();
    let input = state.input;
    let start = state.position;
    state.skip_while(|c| !is_blank_or_break(c));
    let name = &input[start..state.position];
    if name.is_empty() {
        return Err(state.error(
            ErrorKind::Directive,
            "directive name must not be less than one character in length",
        ));
    }

    let mut args = vec![];
    while !state.is_eof() {
        state.skip_while(is_blank);
        if state.ch == '#' {
            state.skip_to_line_end();
            break;
        }
        if is_break(state.ch) {
            break;
        }
        let start = state.position;
        state.skip_while(|c| !is_blank_or_break(c));
        args.push(&input[start..state.position]);
    }
    if !state.is_eof() {
        state.read_line_break()?;
        state.read_indent();
    }
    tracing::trace!(name, ?args, "directive");

    match name {
        "YAML" => yaml_directive(state, &args),
        "TAG" => tag_directive(state, &args),
        _ => state.warn(
            ErrorKind::Directive,
            format!("unknown document directive \"{name}\""),
        ),
    }
}

fn yaml_directive(state: &mut State, args: &[&str]) -> Result<(), ScanError> {
    if state.version.is_some() {
        return Err(state.error(ErrorKind::Directive, "duplication of %YAML directive"));
    }
    let [version] = args else {
        return Err(state.error(
            ErrorKind::Directive,
            "YAML directive accepts exactly one argument",
        ));
    };
    let Some(captures) = YAML_VERSION.captures(version) else {
        return Err(state.error(
            ErrorKind::Directive,
            "ill-formed argument of the YAML directive",
        ));
    };
    let major = captures[1].parse::<u32>().ok();
    let minor = captures[2].parse::<u32>().ok();
    if major != Some(1) {
        return Err(state.error(
            ErrorKind::Directive,
            "unacceptable YAML version of the document",
        ));
    }

    state.version = Some((*version).to_owned());
    state.check_line_breaks = minor.is_some_and(|minor| minor < 2);
    if !matches!(minor, Some(1 | 2)) {
        state.warn(
            ErrorKind::Directive,
            "unsupported YAML version of the document",
        )?;
    }
    Ok(())
}

fn tag_directive(state: &mut State, args: &[&str]) -> Result<(), ScanError> {
    let [handle, prefix] = args else {
        return Err(state.error(
            ErrorKind::Directive,
            "TAG directive accepts exactly two arguments",
        ));
    };
    if !is_tag_handle(handle) {
        return Err(state.error(
            ErrorKind::Directive,
            "ill-formed tag handle (first argument) of the TAG directive",
        ));
    }
    if state.tag_map.contains_key(*handle) {
        return Err(state.error(
            ErrorKind::Directive,
            format!("there is a previously declared suffix for \"{handle}\" tag handle"),
        ));
    }
    if !is_tag_uri(prefix) {
        return Err(state.error(
            ErrorKind::Directive,
            "ill-formed tag prefix (second argument) of the TAG directive",
        ));
    }
    let Some(decoded) = decode_uri_escapes(prefix) else {
        return Err(state.error(
            ErrorKind::Directive,
            format!("tag prefix is malformed: {prefix}"),
        ));
    };
    state.tag_map.insert((*handle).to_owned(), decoded);
    Ok(())
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::*;

    fn load_all(input: &str) -> Result<Vec<Rc<Node>>, ScanError> {
        let mut documents = vec![];
        load_all_with(input, &Schema::new(), &Options::default(), |document| {
            documents.push(document);
            Ok(())
        })?;
        Ok(documents)
    }

    fn strings(input: &str) -> Vec<String> {
        load_all(input)
            .unwrap()
            .iter()
            .map(|node| node.to_key_string())
            .collect()
    }

    #[test]
    fn document_boundaries() {
        assert!(load_all("").unwrap().is_empty());
        assert!(load_all("# only a comment\n\n").unwrap().is_empty());
        assert_eq!(strings("a"), ["a"]);
        assert_eq!(strings("---\na\n...\n---\nb\n"), ["a", "b"]);
        assert_eq!(strings("---\n---\n"), ["null", "null"]);
        assert_eq!(strings("a\n...\n"), ["a"]);
        assert_eq!(strings("--- a\n--- b"), ["a", "b"]);
        assert_eq!(strings("\u{FEFF}a: 1"), ["{a: 1}"]);
    }

    #[test]
    fn block_scalars_end_at_document_markers() {
        assert_eq!(strings("--- |\nfoo\n---\nbar\n"), ["foo\n", "bar"]);
        assert_eq!(strings("--- >-\nfoo\nbar\n...\n"), ["foo bar"]);
        assert_eq!(strings("--- |+\nfoo\n\n--- x\n"), ["foo\n\n", "x"]);
    }

    #[test]
    fn trailing_content() {
        let error = load_all("[a]\n]").unwrap_err();
        assert_eq!(
            error.info(),
            "end of the stream or a document separator is expected"
        );
        assert_eq!((error.marker().line(), error.marker().col()), (1, 0));
    }

    #[test]
    fn directives() {
        let docs = load_all("%YAML 1.2\n%TAG !e! tag:example.com,2000:\n--- !e!x a\n").unwrap();
        assert_eq!(docs[0].tag(), Some("tag:example.com,2000:x"));

        let info = |input| load_all(input).unwrap_err().info().to_owned();
        assert_eq!(info("%YAML 1.2\na"), "directives end mark is expected");
        assert_eq!(info("%YAML 1.2\n%YAML 1.2\n---"), "duplication of %YAML directive");
        assert_eq!(info("%YAML 2.0\n---"), "unacceptable YAML version of the document");
        assert_eq!(info("%YAML 1\n---"), "ill-formed argument of the YAML directive");
        assert_eq!(info("%YAML\n---"), "YAML directive accepts exactly one argument");
        assert_eq!(info("%TAG !a!\n---"), "TAG directive accepts exactly two arguments");
        assert_eq!(
            info("%TAG !a! x:\n%TAG !a! y:\n---"),
            "there is a previously declared suffix for \"!a!\" tag handle"
        );
        assert_eq!(
            info("% x\n---"),
            "directive name must not be less than one character in length"
        );
    }

    #[test]
    fn tags_do_not_leak_across_documents() {
        let error = load_all("%TAG !e! tag:e,2000:\n--- !e!x a\n---\n!e!y b\n").unwrap_err();
        assert_eq!(error.info(), "undeclared tag handle \"!e!\"");
    }

    #[test]
    fn warnings() {
        let warnings = Rc::new(RefCell::new(vec![]));
        let sink = warnings.clone();
        let options = Options::default().on_warning(move |w| sink.borrow_mut().push(w.info().to_owned()));
        let input = "%YAML 1.3\n%FOO bar\n--- a\u{2028}b\n";
        load_all_with(input, &Schema::new(), &options, |_| Ok(())).unwrap();
        assert_eq!(
            *warnings.borrow(),
            [
                "unsupported YAML version of the document",
                "unknown document directive \"FOO\"",
            ]
        );

        warnings.borrow_mut().clear();
        let input = "%YAML 1.1\n--- a\u{2028}b\n";
        load_all_with(input, &Schema::new(), &options, |_| Ok(())).unwrap();
        assert_eq!(
            *warnings.borrow(),
            ["non-ASCII line breaks are interpreted as content"]
        );

        let strict = Options::default().strict(true);
        let error = load_all_with(input, &Schema::new(), &strict, |_| Ok(())).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Stream);

        warnings.borrow_mut().clear();
        let unchecked = options.clone().validate(false);
        load_all_with(input, &Schema::new(), &unchecked, |_| Ok(())).unwrap();
        assert!(warnings.borrow().is_empty());
    }

    #[test]
    fn non_printable_characters() {
        let error = load_all("a: b\nc: \u{1}").unwrap_err();
        assert_eq!(error.info(), "the stream contains non-printable characters");
        assert_eq!((error.marker().line(), error.marker().col()), (1, 3));

        let options = Options::default().validate(false);
        assert!(load_with("a: \u{1}", &Schema::new(), &options).is_ok());
    }

    #[test]
    fn aborting() {
        let mut seen = 0;
        let error = load_all_with("a\n---\nb\n---\nc\n", &Schema::new(), &Options::default(), |_| {
            seen += 1;
            if seen == 2 {
                return Err(Abort::new("enough"));
            }
            Ok(())
        })
        .unwrap_err();
        assert_eq!(seen, 2);
        assert_eq!(error.kind(), ErrorKind::Document);
        assert_eq!(error.info(), "enough");
    }

    #[test]
    fn single_document() {
        let schema = Schema::new();
        let options = Options::default().filename("empty.yaml");
        let error = load_with("# nothing", &schema, &options).unwrap_err();
        assert_eq!(
            error.info(),
            "expected a single document in the stream, but found none"
        );
        assert_eq!(error.marker().filename(), Some("empty.yaml"));
        assert!(load_with("---", &schema, &options).unwrap().is_null());
    }
}
