//! Readers for flow and block collections.

use std::rc::Rc;

use crate::{
    char_traits::{is_blank, is_blank_or_break},
    composer::{compose, compose_node, finish, Composed, Content},
    state::{Context, State},
    ErrorKind, Mapping, Node, ScanError, Sequence, Yaml,
};

/// The tag of keys splicing another mapping into the one they belong to.
pub const MERGE_TAG: &str = "tag:yaml.org,2002:merge";

/// Read a flow sequence (`[...]`) or flow mapping (`{...}`).
pub(crate) fn read_flow_collection(
    state: &mut State,
    node_indent: isize,
) -> Result<Option<Yaml>, ScanError> {
    let (terminator, is_mapping) = match state.ch {
        '[' => (']', false),
        '{' => ('}', true),
        _ => return Ok(None),
    };

    let mut sequence = Sequence::new();
    let mut mapping = Mapping::new();
    let mut read_next = true;
    state.advance();

    while !state.is_eof() {
        state.skip_separation_space(true, node_indent)?;
        if state.ch == terminator {
            state.advance();
            return Ok(Some(if is_mapping {
                Yaml::Mapping(mapping)
            } else {
                Yaml::Sequence(sequence)
            }));
        } else if !read_next {
            return Err(state.error(
                ErrorKind::Stream,
                "missed comma between flow collection entries",
            ));
        } else if state.ch == ',' {
            return Err(state.error(
                ErrorKind::Stream,
                "expected the node content, but found ','",
            ));
        }

        let mut is_pair = false;
        let mut is_explicit_pair = false;
        if state.ch == '?' && state.following_is_separator() {
            is_pair = true;
            is_explicit_pair = true;
            state.advance();
            state.skip_separation_space(true, node_indent)?;
        }

        let line = state.line;
        let key = compose_node(state, node_indent, Context::FlowIn, false, true)?;
        state.skip_separation_space(true, node_indent)?;

        let mut value = None;
        if (is_explicit_pair || state.line == line) && state.ch == ':' {
            is_pair = true;
            state.advance();
            state.skip_separation_space(true, node_indent)?;
            value = compose_node(state, node_indent, Context::FlowIn, false, true)?;
        }

        if is_mapping {
            store_mapping_pair(state, &mut mapping, key, value)?;
        } else if is_pair {
            let mut pair = Mapping::new();
            store_mapping_pair(state, &mut pair, key, value)?;
            sequence.push(Rc::new(Node::new(None, Yaml::Mapping(pair))));
        } else {
            sequence.push(key.unwrap_or_else(Node::null));
        }

        state.skip_separation_space(true, node_indent)?;
        if state.ch == ',' {
            read_next = true;
            state.advance();
        } else {
            read_next = false;
        }
    }

    Err(state.error(
        ErrorKind::Stream,
        "unexpected end of the stream within a flow collection",
    ))
}

/// Read a block sequence whose `-` indicators are at column `node_indent`.
pub(crate) fn read_block_sequence(
    state: &mut State,
    node_indent: isize,
) -> Result<Option<Yaml>, ScanError> {
    let mut sequence = Sequence::new();
    let mut detected = false;

    while !state.is_eof() {
        if state.ch != '-' || !state.following_is_separator() {
            break;
        }
        detected = true;
        state.advance();

        if state.skip_separation_space(true, -1)? > 0 && state.line_indent <= node_indent {
            sequence.push(Node::null());
            if state.line_indent < node_indent {
                break;
            }
            continue;
        }

        let line = state.line;
        let entry = compose_node(state, node_indent, Context::BlockIn, false, true)?;
        sequence.push(entry.unwrap_or_else(Node::null));
        state.skip_separation_space(true, -1)?;

        if (state.line == line || state.line_indent > node_indent) && !state.is_eof() {
            return Err(state.error(
                ErrorKind::Indentation,
                "bad indentation of a sequence entry",
            ));
        } else if state.line_indent < node_indent {
            break;
        }
    }

    Ok(detected.then_some(Yaml::Sequence(sequence)))
}

/// Read a block mapping whose keys start at column `node_indent`.
///
/// Implicit keys are composed at `flow_indent`.
///
/// # Return
/// If the first implicit key is not followed by a colon, the node read as that key is returned
/// as-is: it was not a mapping after all.
pub(crate) fn read_block_mapping(
    state: &mut State,
    node_indent: isize,
    flow_indent: isize,
) -> Result<Option<Composed>, ScanError> {
    let mut mapping = Mapping::new();
    let mut key: Option<Rc<Node>> = None;
    let mut at_explicit_key = false;
    let mut detected = false;

    while !state.is_eof() {
        let line = state.line;
        let allow_compact;

        if matches!(state.ch, '?' | ':') && state.following_is_separator() {
            if state.ch == '?' {
                if at_explicit_key {
                    store_mapping_pair(state, &mut mapping, key.take(), None)?;
                }
                detected = true;
                at_explicit_key = true;
            } else if at_explicit_key {
                at_explicit_key = false;
            } else {
                return Err(state.error(
                    ErrorKind::Stream,
                    "incomplete explicit mapping pair; a key node is missed",
                ));
            }
            allow_compact = true;
            state.advance();
        } else {
            let composed = compose(state, flow_indent, Context::FlowOut, false, true)?;
            if composed.is_empty() {
                break;
            }

            if state.line != line {
                if detected {
                    return Err(state.error(
                        ErrorKind::Stream,
                        "can not read a block mapping entry; a multiline key may not be an implicit key",
                    ));
                }
                return Ok(Some(composed));
            }

            state.skip_while(is_blank);
            if state.ch != ':' {
                if detected {
                    return Err(state.error(
                        ErrorKind::Stream,
                        "can not read an implicit mapping pair; a colon is missed",
                    ));
                }
                return Ok(Some(composed));
            }

            state.advance();
            if !state.is_eof() && !is_blank_or_break(state.ch) {
                return Err(state.error(
                    ErrorKind::Stream,
                    "a whitespace character is expected after the key-value separator within a block mapping",
                ));
            }
            if at_explicit_key {
                store_mapping_pair(state, &mut mapping, key.take(), None)?;
            }
            detected = true;
            at_explicit_key = false;
            allow_compact = false;
            key = finish(state, composed)?;
        }

        if state.line == line || state.line_indent > node_indent {
            let node = compose_node(state, node_indent, Context::BlockOut, true, allow_compact)?;
            if at_explicit_key {
                key = node;
            } else {
                store_mapping_pair(state, &mut mapping, key.take(), node)?;
            }
            state.skip_separation_space(true, -1)?;
        }

        if (state.line == line || state.line_indent > node_indent) && !state.is_eof() {
            return Err(state.error(
                ErrorKind::Indentation,
                "bad indentation of a mapping entry",
            ));
        } else if state.line_indent < node_indent {
            break;
        }
    }

    if at_explicit_key {
        store_mapping_pair(state, &mut mapping, key.take(), None)?;
    }

    Ok(detected.then(|| Composed {
        tag: None,
        anchor: None,
        content: Some(Content::Value(Yaml::Mapping(mapping))),
    }))
}

/// Store a key/value pair into `mapping`, expanding merge keys.
///
/// Missing keys and values are nulls. A key already present is overwritten but keeps its
/// position.
pub(crate) fn store_mapping_pair(
    state: &State,
    mapping: &mut Mapping,
    key: Option<Rc<Node>>,
    value: Option<Rc<Node>>,
) -> Result<(), ScanError> {
    let key = key.unwrap_or_else(Node::null);
    let value = value.unwrap_or_else(Node::null);

    if key.tag() == Some(MERGE_TAG) {
        match &value.yaml {
            Yaml::Sequence(sources) => {
                for source in sources {
                    merge_mappings(state, mapping, source)?;
                }
            }
            _ => merge_mappings(state, mapping, &value)?,
        }
    } else {
        let limit = state.options.get_max_key_length();
        let Some(key) = key.yaml.to_key_string_within(limit) else {
            return Err(state.error(
                ErrorKind::Limit,
                format!("mapping key is longer than {limit} bytes"),
            ));
        };
        mapping.replace(key, value);
    }
    Ok(())
}

/// Copy the entries of `source` whose key is absent from `destination`.
fn merge_mappings(state: &State, destination: &mut Mapping, source: &Node) -> Result<(), ScanError> {
    let Some(source) = source.as_mapping() else {
        return Err(state.error(
            ErrorKind::Stream,
            "cannot merge mappings; the provided source object is unacceptable",
        ));
    };
    for (key, value) in source {
        if !destination.contains_key(key) {
            destination.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::{Options, Scalar, Schema};

    use super::*;

    fn string(v: &str) -> Rc<Node> {
        Rc::new(Node::new(None, Yaml::Value(Scalar::String(v.into()))))
    }

    fn mapping_of(pairs: &[(&str, &str)]) -> Rc<Node> {
        let mut mapping = Mapping::new();
        for (k, v) in pairs {
            mapping.insert((*k).into(), string(v));
        }
        Rc::new(Node::new(None, Yaml::Mapping(mapping)))
    }

    #[test]
    fn duplicate_keys_keep_their_position() {
        let schema = Schema::default();
        let options = Options::default();
        let state = State::new("", &schema, &options);
        let mut mapping = Mapping::new();
        store_mapping_pair(&state, &mut mapping, Some(string("a")), Some(string("1"))).unwrap();
        store_mapping_pair(&state, &mut mapping, Some(string("b")), None).unwrap();
        store_mapping_pair(&state, &mut mapping, Some(string("a")), Some(string("2"))).unwrap();
        store_mapping_pair(&state, &mut mapping, None, Some(string("3"))).unwrap();
        let entries: Vec<_> = mapping
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_key_string()))
            .collect();
        assert_eq!(entries, [("a", "2".into()), ("b", "null".into()), ("null", "3".into())]);
    }

    #[test]
    fn merge_keys() {
        let schema = Schema::default();
        let options = Options::default();
        let state = State::new("", &schema, &options);
        let merge = Rc::new(Node::new(
            Some(MERGE_TAG.into()),
            Yaml::Value(Scalar::String("<<".into())),
        ));

        let mut mapping = Mapping::new();
        mapping.insert("x".into(), string("2"));
        let sources = Rc::new(Node::new(
            None,
            Yaml::Sequence(vec![
                mapping_of(&[("x", "1"), ("y", "1")]),
                mapping_of(&[("y", "2"), ("z", "2")]),
            ]),
        ));
        store_mapping_pair(&state, &mut mapping, Some(merge.clone()), Some(sources)).unwrap();
        let entries: Vec<_> = mapping
            .iter()
            .map(|(k, v)| format!("{k}={}", v.to_key_string()))
            .collect();
        assert_eq!(entries, ["x=2", "y=1", "z=2"]);

        let error =
            store_mapping_pair(&state, &mut mapping, Some(merge), Some(string("oops"))).unwrap_err();
        assert_eq!(
            error.info(),
            "cannot merge mappings; the provided source object is unacceptable"
        );
    }
}
