//! Composition of a single node: properties, dispatch to the readers and tag resolution.

use std::{cmp::Ordering, rc::Rc};

use crate::{
    collection::{read_block_mapping, read_block_sequence, read_flow_collection},
    properties::{read_alias, read_anchor_property, read_tag_property},
    scalar::{
        read_block_scalar, read_double_quoted_scalar, read_plain_scalar,
        read_single_quoted_scalar,
    },
    state::{Context, State},
    ErrorKind, Kind, Node, Scalar, ScanError, Yaml,
};

/// The content of a node before its tag is resolved.
pub(crate) enum Content {
    /// Content read from the input.
    Value(Yaml),
    /// An already composed node, shared with an anchor or read with properties of its own.
    Node(Rc<Node>),
}

/// A node whose properties and content are read, but whose tag is not resolved yet.
pub(crate) struct Composed {
    pub(crate) tag: Option<String>,
    pub(crate) anchor: Option<String>,
    pub(crate) content: Option<Content>,
}

impl Composed {
    /// Return whether nothing at all was read.
    pub(crate) fn is_empty(&self) -> bool {
        self.tag.is_none() && self.anchor.is_none() && self.content.is_none()
    }
}

/// Compose the node at the cursor and resolve its tag.
///
/// # Return
/// Returns [`None`] if there is no node at the cursor: no property and no content.
pub(crate) fn compose_node(
    state: &mut State,
    parent_indent: isize,
    context: Context,
    allow_to_seek: bool,
    allow_compact: bool,
) -> Result<Option<Rc<Node>>, ScanError> {
    let composed = compose(state, parent_indent, context, allow_to_seek, allow_compact)?;
    finish(state, composed)
}

/// Read the properties and the content of the node at the cursor.
///
/// `parent_indent` is the indentation of the enclosing node. When `allow_to_seek` is set, the
/// node may start on a following line. When `allow_compact` is set, a block collection may start
/// on the current line (e.g.: `- - a`).
pub(crate) fn compose(
    state: &mut State,
    parent_indent: isize,
    context: Context,
    allow_to_seek: bool,
    allow_compact: bool,
) -> Result<Composed, ScanError> {
    state.depth += 1;
    if state.depth > state.options.get_max_depth() {
        return Err(state.error(ErrorKind::Limit, "maximum nesting depth exceeded"));
    }
    let composed = compose_inner(state, parent_indent, context, allow_to_seek, allow_compact);
    state.depth -= 1;
    composed
}

fn compose_inner(
    state: &mut State,
    parent_indent: isize,
    context: Context,
    allow_to_seek: bool,
    allow_compact: bool,
) -> Result<Composed, ScanError> {
    let allow_block_styles = context.is_block();
    let mut allow_block_collections = allow_block_styles;
    let mut indent_status = Ordering::Greater;
    let mut at_new_line = false;

    if allow_to_seek && state.skip_separation_space(true, -1)? > 0 {
        at_new_line = true;
        indent_status = state.line_indent.cmp(&parent_indent);
    }

    let mut tag = None;
    let mut anchor = None;
    // Properties followed by a line that is not more indented make a node of their own.
    while indent_status == Ordering::Greater
        && (read_tag_property(state, &mut tag)? || read_anchor_property(state, &mut anchor)?)
    {
        if state.skip_separation_space(true, -1)? > 0 {
            at_new_line = true;
            allow_block_collections = allow_block_styles;
            indent_status = state.line_indent.cmp(&parent_indent);
        } else {
            allow_block_collections = false;
        }
    }
    allow_block_collections &= at_new_line || allow_compact;

    let mut content = None;
    if indent_status == Ordering::Greater || context == Context::BlockOut {
        let flow_indent = if context.is_flow() {
            parent_indent
        } else {
            parent_indent + 1
        };
        let block_indent = state.column();

        if indent_status == Ordering::Greater {
            if allow_block_collections {
                if let Some(sequence) = read_block_sequence(state, block_indent)? {
                    content = Some(Content::Value(sequence));
                } else if let Some(inner) = read_block_mapping(state, block_indent, flow_indent)? {
                    content = absorb(state, &mut tag, inner)?;
                }
            }
            if content.is_none() {
                if let Some(collection) = read_flow_collection(state, flow_indent)? {
                    content = Some(Content::Value(collection));
                }
            }
            if content.is_none() {
                content =
                    read_scalar_or_alias(state, context, flow_indent, &mut tag, anchor.is_some())?;
            }
        } else if indent_status == Ordering::Equal && allow_block_collections {
            // A block sequence may be as indented as the mapping key it is the value of.
            if let Some(sequence) = read_block_sequence(state, block_indent)? {
                content = Some(Content::Value(sequence));
            }
        }
    }

    Ok(Composed {
        tag,
        anchor,
        content,
    })
}

/// Read any scalar style or an alias.
///
/// Plain scalars get the non-specific tag `?` when they have no tag.
fn read_scalar_or_alias(
    state: &mut State,
    context: Context,
    flow_indent: isize,
    tag: &mut Option<String>,
    has_anchor: bool,
) -> Result<Option<Content>, ScanError> {
    let string = |s: String| Content::Value(Yaml::Value(Scalar::String(s)));

    if context.is_block() {
        if let Some(s) = read_block_scalar(state, flow_indent)? {
            return Ok(Some(string(s)));
        }
    }
    if let Some(s) = read_single_quoted_scalar(state, flow_indent)? {
        return Ok(Some(string(s)));
    }
    if let Some(s) = read_double_quoted_scalar(state, flow_indent)? {
        return Ok(Some(string(s)));
    }
    if let Some(node) = read_alias(state)? {
        if tag.is_some() || has_anchor {
            return Err(state.error(
                ErrorKind::Alias,
                "alias node should not have any properties",
            ));
        }
        return Ok(Some(Content::Node(node)));
    }
    if let Some(s) = read_plain_scalar(state, flow_indent, context == Context::FlowIn)? {
        tag.get_or_insert_with(|| "?".to_owned());
        return Ok(Some(string(s)));
    }
    Ok(None)
}

/// Merge the node a block mapping reader gave back into the node being composed.
///
/// Untagged content is taken as-is, so that a tag on a line of its own applies to the text of the
/// node on the following line. A node with properties of its own is composed first.
fn absorb(
    state: &mut State,
    tag: &mut Option<String>,
    inner: Composed,
) -> Result<Option<Content>, ScanError> {
    if inner.anchor.is_none() && inner.tag.as_deref().map_or(true, |t| t == "?") {
        if tag.is_none() {
            *tag = inner.tag;
        }
        Ok(inner.content)
    } else {
        Ok(finish(state, inner)?.map(Content::Node))
    }
}

/// Resolve the tag of a composed node and register its anchor.
pub(crate) fn finish(state: &mut State, composed: Composed) -> Result<Option<Rc<Node>>, ScanError> {
    if composed.is_empty() {
        return Ok(None);
    }
    let Composed {
        tag,
        anchor,
        content,
    } = composed;

    let node = match (tag, content) {
        (None, Some(Content::Node(node))) => node,
        (tag, content) => {
            let has_content = content.is_some();
            let yaml = match content {
                None => Yaml::Value(Scalar::Null),
                Some(Content::Value(yaml)) => yaml,
                Some(Content::Node(node)) => node.yaml.clone(),
            };
            Rc::new(resolve(state, tag, yaml, has_content)?)
        }
    };

    if let Some(anchor) = anchor {
        state.anchor_map.insert(anchor, node.clone());
    }
    Ok(Some(node))
}

/// Resolve `yaml` against the schema according to `tag`.
///
/// `has_content` is unset for nodes made only of properties. Their kind is not checked against
/// the one of an explicit tag.
fn resolve(
    state: &State,
    tag: Option<String>,
    yaml: Yaml,
    has_content: bool,
) -> Result<Node, ScanError> {
    let Some(tag) = tag else {
        return Ok(Node::new(None, yaml));
    };

    match tag.as_str() {
        "!" => Ok(Node::new(Some(tag), yaml)),
        "?" => {
            if has_content && yaml.kind() != Kind::Scalar {
                return Err(unacceptable_kind(state, &tag, Kind::Scalar, yaml.kind()));
            }
            if state.options.is_resolving() {
                for ty in state.schema.implicit() {
                    if let Some(value) = ty.resolve(&yaml, false) {
                        return Ok(Node::new(Some(ty.tag.to_string()), value));
                    }
                }
            }
            Ok(Node::new(Some(tag), yaml))
        }
        name => {
            let Some(ty) = state.schema.explicit(name) else {
                state.warn(ErrorKind::Tag, format!("unknown tag !<{name}>"))?;
                return Ok(Node::new(Some(tag), yaml));
            };
            if has_content && yaml.kind() != ty.kind {
                return Err(unacceptable_kind(state, name, ty.kind, yaml.kind()));
            }
            match ty.resolve(&yaml, true) {
                Some(value) => Ok(Node::new(Some(tag), value)),
                None => Err(state.error(
                    ErrorKind::Tag,
                    format!("cannot resolve a node with !<{name}> explicit tag"),
                )),
            }
        }
    }
}

fn unacceptable_kind(state: &State, tag: &str, expected: Kind, found: Kind) -> ScanError {
    state.error(
        ErrorKind::Tag,
        format!("unacceptable node kind for !<{tag}> tag; it should be \"{expected}\", not \"{found}\""),
    )
}

#[cfg(test)]
mod test {
    use crate::{load_with, Options, Schema, YamlType};

    use super::*;

    fn int(yaml: &Yaml, _: bool) -> Option<Yaml> {
        let value = yaml.as_scalar()?.as_str()?.parse().ok()?;
        Some(Yaml::Value(Scalar::Integer(value)))
    }

    fn schema() -> Schema {
        Schema::new()
            .with_implicit(YamlType::new("tag:yaml.org,2002:int", Kind::Scalar, Some(int)))
            .with_explicit(YamlType::new("tag:yaml.org,2002:seq", Kind::Sequence, None))
    }

    fn load(input: &str) -> Result<Rc<Node>, ScanError> {
        load_with(input, &schema(), &Options::default())
    }

    #[test]
    fn implicit_resolution() {
        let node = load("[12, '12', x]").unwrap();
        let items = node.as_sequence().unwrap();
        assert_eq!(items[0].as_integer(), Some(12));
        assert_eq!(items[0].tag(), Some("tag:yaml.org,2002:int"));
        assert_eq!(items[1].as_str(), Some("12"));
        assert_eq!(items[1].tag(), None);
        assert_eq!(items[2].as_str(), Some("x"));
        assert_eq!(items[2].tag(), Some("?"));

        let options = Options::default().resolve(false);
        let node = load_with("12", &schema(), &options).unwrap();
        assert_eq!(node.as_str(), Some("12"));
        assert_eq!(node.tag(), Some("?"));
    }

    #[test]
    fn explicit_tags() {
        assert_eq!(load("!!int '7'").unwrap().as_integer(), Some(7));
        assert_eq!(load("! 7").unwrap().as_str(), Some("7"));

        let error = load("!!int x").unwrap_err();
        assert_eq!(error.info(), "cannot resolve a node with !<tag:yaml.org,2002:int> explicit tag");
        let error = load("!!seq {a: b}").unwrap_err();
        assert_eq!(
            error.info(),
            "unacceptable node kind for !<tag:yaml.org,2002:seq> tag; it should be \"sequence\", not \"mapping\""
        );

        let node = load("!!seq").unwrap();
        assert!(node.is_null());
        assert_eq!(node.tag(), Some("tag:yaml.org,2002:seq"));
    }

    #[test]
    fn tag_on_its_own_line() {
        let node = load("key: !!int\n  '42'\n").unwrap();
        assert_eq!(node.get_key("key").unwrap().as_integer(), Some(42));
        let node = load("!!int\n42\n").unwrap();
        assert_eq!(node.as_integer(), Some(42));
    }

    #[test]
    fn unknown_tags_warn() {
        let node = load("!foo bar").unwrap();
        assert_eq!(node.tag(), Some("!foo"));
        assert_eq!(node.as_str(), Some("bar"));

        let options = Options::default().strict(true);
        let error = load_with("!foo bar", &schema(), &options).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Tag);
        assert_eq!(error.info(), "unknown tag !<!foo>");
    }

    #[test]
    fn alias_with_properties() {
        let error = load("- &a x\n- !!int *a\n").unwrap_err();
        assert_eq!(error.info(), "alias node should not have any properties");
        assert_eq!(error.kind(), ErrorKind::Alias);
    }

    #[test]
    fn nesting_limit() {
        let options = Options::default().max_depth(5);
        assert!(load_with("[[[1]]]", &schema(), &options).is_ok());
        let error = load_with("[[[[1]]]]", &schema(), &options).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Limit);
    }
}
