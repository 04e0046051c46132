use std::{cell::RefCell, rc::Rc};

use tessera::{load, load_with_options, safe_load, ErrorKind, Options, SafelyIndex, Scalar};

#[test]
fn test_explicit_scalars() {
    let root = load(
        "
str: !!str 12
int: !!int '7'
float: !!float 1
null: !!null ''
bool: !!bool 'false'
",
    )
    .unwrap();
    assert_eq!(root.get("str").unwrap().as_str(), Some("12"));
    assert_eq!(root.get("int").unwrap().as_integer(), Some(7));
    assert_eq!(root.get("float").unwrap().as_floating_point(), Some(1.0));
    assert!(root.get("null").unwrap().is_null());
    assert_eq!(root.get("bool").unwrap().as_bool(), Some(false));
    assert_eq!(root.get("str").unwrap().tag(), Some("tag:yaml.org,2002:str"));
}

#[test]
fn test_binary() {
    let root = safe_load("inline: !!binary aGVsbG8=\nblock: !!binary |\n  aGVs\n  bG8=\n").unwrap();
    assert_eq!(root.get("inline").unwrap().as_binary(), Some(&b"hello"[..]));
    assert_eq!(root.get("block").unwrap().as_binary(), Some(&b"hello"[..]));

    let error = safe_load("!!binary not*base64").unwrap_err();
    assert_eq!(
        error.info(),
        "cannot resolve a node with !<tag:yaml.org,2002:binary> explicit tag"
    );
}

#[test]
fn test_collections() {
    let root = load("set: !!set {a, b}\nomap: !!omap [a: 1, b: 2]\npairs: !!pairs [a: 1, a: 2]\n")
        .unwrap();
    assert_eq!(root.get("set").unwrap().to_key_string(), "{a: null, b: null}");
    assert_eq!(root.get("omap").unwrap().to_key_string(), "[{a: 1}, {b: 2}]");
    assert_eq!(root.get("omap").unwrap().tag(), Some("tag:yaml.org,2002:omap"));
    assert_eq!(root.get("pairs").unwrap().to_key_string(), "[[a, 1], [a, 2]]");

    let error = load("!!omap [a: 1, a: 2]").unwrap_err();
    assert_eq!(
        error.info(),
        "cannot resolve a node with !<tag:yaml.org,2002:omap> explicit tag"
    );
    assert!(load("!!set {a: 1}").is_err());
}

#[test]
fn test_empty_tagged_nodes() {
    let root = load("seq: !!seq\nmap: !!map\nstr: !!str\n").unwrap();
    assert_eq!(root.get("seq").unwrap().as_sequence().map(Vec::len), Some(0));
    assert_eq!(root.get("map").unwrap().to_key_string(), "{}");
    assert_eq!(root.get("str").unwrap().as_str(), Some(""));
}

#[test]
fn test_tag_forms() {
    let root = load("- !<tag:yaml.org,2002:int> 5\n- !!int 6\n").unwrap();
    assert_eq!(root.get(0_usize).unwrap().as_integer(), Some(5));
    assert_eq!(root.get(1_usize).unwrap().as_integer(), Some(6));

    let root = load("%TAG !y! tag:yaml.org,2002:\n--- !y!int 5\n").unwrap();
    assert_eq!(root.as_integer(), Some(5));
    assert_eq!(root.tag(), Some("tag:yaml.org,2002:int"));

    // The non-specific tag keeps plain scalars as strings.
    let root = load("! 12").unwrap();
    assert_eq!(root.as_str(), Some("12"));
    assert_eq!(root.tag(), Some("!"));
}

#[test]
fn test_unknown_tags() {
    let warnings = Rc::new(RefCell::new(vec![]));
    let sink = warnings.clone();
    let options =
        Options::default().on_warning(move |warning| sink.borrow_mut().push(warning.info().to_owned()));
    let root = load_with_options("!local value", &options).unwrap();
    assert_eq!(root.as_str(), Some("value"));
    assert_eq!(root.tag(), Some("!local"));
    assert_eq!(*warnings.borrow(), ["unknown tag !<!local>"]);

    let error = load_with_options("!local value", &Options::default().strict(true)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Tag);
    assert_eq!(error.info(), "unknown tag !<!local>");
}

#[test]
fn test_tag_errors() {
    let error = load("!!int x").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Tag);
    assert_eq!(
        error.info(),
        "cannot resolve a node with !<tag:yaml.org,2002:int> explicit tag"
    );

    let error = load("!!map [a]").unwrap_err();
    assert_eq!(
        error.info(),
        "unacceptable node kind for !<tag:yaml.org,2002:map> tag; it should be \"mapping\", not \"sequence\""
    );

    let error = load("!!timestamp 2001-13-01").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Tag);
}

#[test]
fn test_explicit_tags_skip_implicit_resolution() {
    let root = load("!!str 0x1F").unwrap();
    assert_eq!(root.as_scalar(), Some(&Scalar::String("0x1F".into())));
}
