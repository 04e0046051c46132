//! Node properties (tags and anchors) and aliases.

use std::rc::Rc;

use crate::{
    char_traits::{as_hex, is_blank_or_break, is_flow, is_tag_handle, is_tag_uri},
    state::State,
    ErrorKind, Node, ScanError,
};

/// The prefix the `!!` handle expands to when no `%TAG` directive overrides it.
pub(crate) const DEFAULT_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Read a tag property (`!<uri>`, `!suffix`, `!!suffix` or `!handle!suffix`) into `tag`.
///
/// # Return
/// Returns `false` if the cursor is not on a tag.
pub(crate) fn read_tag_property(
    state: &mut State,
    tag: &mut Option<String>,
) -> Result<bool, ScanError> {
    if state.ch != '!' {
        return Ok(false);
    }
    if tag.is_some() {
        return Err(state.error(ErrorKind::Tag, "duplication of a tag property"));
    }
    state.advance();

    let input = state.input;
    let mut verbatim = false;
    let mut named = false;
    let mut handle = "!";
    match state.ch {
        '<' => {
            verbatim = true;
            state.advance();
        }
        '!' => {
            named = true;
            handle = "!!";
            state.advance();
        }
        _ => {}
    }

    let mut start = state.position;
    let name = if verbatim {
        while !state.is_eof() && state.ch != '>' {
            state.advance();
        }
        if state.is_eof() {
            return Err(state.error(
                ErrorKind::Tag,
                "unexpected end of the stream within a verbatim tag",
            ));
        }
        let name = &input[start..state.position];
        state.advance();
        name
    } else {
        while !state.is_eof() && !is_blank_or_break(state.ch) {
            if state.ch == '!' {
                if named {
                    return Err(state.error(
                        ErrorKind::Tag,
                        "tag suffix cannot contain exclamation marks",
                    ));
                }
                // The handle spans from the first `!` to this one.
                handle = &input[start - 1..=state.position];
                if state.options.is_validating() && !is_tag_handle(handle) {
                    return Err(state.error(
                        ErrorKind::Tag,
                        "named tag handle cannot contain such characters",
                    ));
                }
                named = true;
                start = state.position + 1;
            }
            state.advance();
        }
        let name = &input[start..state.position];
        if state.options.is_validating() && name.contains(is_flow) {
            return Err(state.error(
                ErrorKind::Tag,
                "tag suffix cannot contain flow indicator characters",
            ));
        }
        name
    };

    if state.options.is_validating() && !name.is_empty() && !is_tag_uri(name) {
        return Err(state.error(
            ErrorKind::Tag,
            format!("tag name cannot contain such characters: {name}"),
        ));
    }
    let Some(name) = decode_uri_escapes(name) else {
        return Err(state.error(ErrorKind::Tag, format!("tag name is malformed: {name}")));
    };

    *tag = Some(if verbatim {
        name
    } else if let Some(prefix) = state.tag_map.get(handle) {
        format!("{prefix}{name}")
    } else if handle == "!" {
        format!("!{name}")
    } else if handle == "!!" {
        format!("{DEFAULT_TAG_PREFIX}{name}")
    } else {
        return Err(state.error(
            ErrorKind::Tag,
            format!("undeclared tag handle \"{handle}\""),
        ));
    });
    Ok(true)
}

/// Decode the `%XX` escapes of a tag.
///
/// Returns [`None`] if an escape is truncated or the decoded bytes are not valid UTF-8.
pub(crate) fn decode_uri_escapes(name: &str) -> Option<String> {
    if !name.contains('%') {
        return Some(name.to_owned());
    }
    let mut bytes = Vec::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let high = as_hex(chars.next()?)?;
            let low = as_hex(chars.next()?)?;
            bytes.push(u8::try_from((high << 4) | low).ok()?);
        } else {
            let mut buf = [0; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    String::from_utf8(bytes).ok()
}

/// Read the name of an anchor or an alias, after its indicator.
fn read_anchor_name<'input>(state: &mut State<'input, '_>) -> &'input str {
    let input = state.input;
    let start = state.position;
    while !state.is_eof() && !is_blank_or_break(state.ch) && !is_flow(state.ch) {
        state.advance();
    }
    &input[start..state.position]
}

/// Read an anchor property (`&name`) into `anchor`.
///
/// # Return
/// Returns `false` if the cursor is not on an anchor.
pub(crate) fn read_anchor_property(
    state: &mut State,
    anchor: &mut Option<String>,
) -> Result<bool, ScanError> {
    if state.ch != '&' {
        return Ok(false);
    }
    if anchor.is_some() {
        return Err(state.error(ErrorKind::Anchor, "duplication of an anchor property"));
    }
    state.advance();
    let name = read_anchor_name(state);
    if name.is_empty() {
        return Err(state.error(
            ErrorKind::Anchor,
            "name of an anchor node must contain at least one character",
        ));
    }
    *anchor = Some(name.to_owned());
    Ok(true)
}

/// Read an alias (`*name`) and return the node its anchor names.
///
/// # Return
/// Returns [`None`] if the cursor is not on an alias.
pub(crate) fn read_alias(state: &mut State) -> Result<Option<Rc<Node>>, ScanError> {
    if state.ch != '*' {
        return Ok(None);
    }
    state.advance();
    let name = read_anchor_name(state);
    if name.is_empty() {
        return Err(state.error(
            ErrorKind::Alias,
            "name of an alias node must contain at least one character",
        ));
    }
    let Some(node) = state.anchor_map.get(name).cloned() else {
        return Err(state.error(ErrorKind::Alias, format!("unidentified alias \"{name}\"")));
    };
    state.skip_separation_space(true, -1)?;
    Ok(Some(node))
}
