use tessera_parser::{load_with, ErrorKind, Marker, Options, ScanError, Schema};

fn load_error(input: &str) -> ScanError {
    load_with(input, &Schema::new(), &Options::default()).unwrap_err()
}

/// Return the 0-indexed line and column of the error raised when loading `input`.
fn error_position(input: &str) -> (usize, usize) {
    let error = load_error(input);
    (error.marker().line(), error.marker().col())
}

#[test]
fn test_unterminated_scalars() {
    assert_eq!(error_position("a: 'unterminated"), (0, 16));
    assert_eq!(error_position("a: \"unterminated\n\n"), (2, 0));
    assert_eq!(error_position("[a, b"), (0, 5));
}

#[test]
fn test_escape_position() {
    let error = load_error(r#"key: "bad \q""#);
    assert_eq!(error.info(), "unknown escape sequence");
    assert_eq!((error.marker().line(), error.marker().col()), (0, 11));
    assert_eq!(error.marker().index(), 11);
}

#[test]
fn test_indentation_positions() {
    assert_eq!(error_position("a: 1\n b: 2"), (1, 2));
    assert_eq!(error_position("a:\n  - b\n - c"), (2, 1));
}

#[test]
fn test_columns_count_characters() {
    // `é` is two bytes long, but a single column.
    let error = load_error("é: [b");
    assert_eq!(error.marker().col(), 5);
    assert_eq!(error.marker().index(), 6);
}

#[test]
fn test_filename_in_display() {
    let options = Options::default().filename("config.yaml");
    let error = load_with("a: [b", &Schema::new(), &options).unwrap_err();
    assert_eq!(error.marker().filename(), Some("config.yaml"));
    assert_eq!(
        error.to_string(),
        "unexpected end of the stream within a flow collection in \"config.yaml\" at line 1, column 6"
    );
}

#[test]
fn test_render_snippet() {
    let error = load_error("a: [b");
    assert!(error
        .render()
        .ends_with(":\n    a: [b\n         ^"));
}

#[test]
fn test_marker_at() {
    let input = "a\r\nb\rc\nd";
    let marker = Marker::at(input, 7, None);
    assert_eq!((marker.line(), marker.col()), (3, 0));
    let marker = Marker::at(input, 5, None);
    assert_eq!((marker.line(), marker.col()), (2, 0));
}

#[test]
fn test_alias_position() {
    let error = load_error("a: 1\nb: *undefined\n");
    assert_eq!(error.kind(), ErrorKind::Alias);
    assert_eq!(error.marker().line(), 1);
}
