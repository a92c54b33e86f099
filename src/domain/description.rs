//! Hierarchy description grammar.
//!
//! Nested literals (JSON values) are normalized into one canonical
//! [`NodeDesc`] shape before any tree is built, so construction never
//! branches on runtime value types.
//!
//! Accepted literal forms:
//! - a bare string: instantiate the default scaffold template under that
//!   root name
//! - `[name, children]`: a named tree, `children` being a sibling run
//! - a mapping: one root per key, values are `null`, a mapping, a sibling
//!   run, or a single child name
//!
//! A *sibling run* is a flat sequence in which a string opens a node and a
//! nested sequence attaches its contents as children of the node opened
//! immediately before it:
//!
//! ```text
//! ["ROOT", ["A", ["B", "C"]]]   =>   ROOT -> A -> {B, C}
//! ```
//!
//! Anything else is a [`DomainError::MalformedDescription`]; nothing is
//! silently dropped.

use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};

/// Canonical description of one scaffold node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDesc {
    pub name: String,
    pub children: Vec<NodeDesc>,
}

impl NodeDesc {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<NodeDesc>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(NodeDesc::node_count)
            .sum::<usize>()
    }
}

/// A fully normalized description, ready for tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// Bare-string literal: build the default scaffold template with its
    /// root renamed to the given name.
    TemplateRoot(String),
    /// Explicit forest, one tree per entry, in input order.
    Nodes(Vec<NodeDesc>),
}

impl Description {
    /// Parse a description from JSON text.
    pub fn from_json(text: &str) -> DomainResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::MalformedDescription(e.to_string()))?;
        Self::parse(&value)
    }

    /// Normalize a literal JSON value into canonical form.
    ///
    /// Fails fast on any unrecognized shape; no partial result is returned.
    pub fn parse(value: &Value) -> DomainResult<Self> {
        match value {
            Value::String(name) => Ok(Self::TemplateRoot(name.clone())),
            Value::Array(items) => Ok(Self::Nodes(vec![parse_tree(items)?])),
            Value::Object(map) => Ok(Self::Nodes(parse_mapping(map)?)),
            other => Err(DomainError::MalformedDescription(format!(
                "expected string, sequence, or mapping at top level, got {}",
                kind_of(other)
            ))),
        }
    }
}

/// Strict `[name, children]` form for a whole tree.
fn parse_tree(items: &[Value]) -> DomainResult<NodeDesc> {
    let (head, tail) = match items {
        [head, tail] => (head, tail),
        _ => {
            return Err(DomainError::MalformedDescription(format!(
                "expected [name, children] with exactly 2 elements, got {}",
                items.len()
            )))
        }
    };
    let name = head.as_str().ok_or_else(|| {
        DomainError::MalformedDescription(format!(
            "node name must be a string, got {}",
            kind_of(head)
        ))
    })?;
    let children = match tail {
        Value::Array(list) => parse_run(list)?,
        other => {
            return Err(DomainError::MalformedDescription(format!(
                "children of '{}' must be a sequence, got {}",
                name,
                kind_of(other)
            )))
        }
    };
    Ok(NodeDesc::branch(name, children))
}

/// Sibling run: strings open nodes, a nested sequence attaches to the node
/// opened right before it.
fn parse_run(items: &[Value]) -> DomainResult<Vec<NodeDesc>> {
    let mut nodes: Vec<NodeDesc> = Vec::new();
    // Set while the most recent entry was a name and may still take children.
    let mut open = false;

    for item in items {
        match item {
            Value::String(name) => {
                nodes.push(NodeDesc::leaf(name));
                open = true;
            }
            Value::Array(list) => {
                let target = match nodes.last_mut() {
                    Some(node) if open => node,
                    _ => {
                        return Err(DomainError::MalformedDescription(
                            "child sequence has no preceding node name".to_string(),
                        ))
                    }
                };
                target.children = parse_run(list)?;
                open = false;
            }
            Value::Object(map) => {
                nodes.extend(parse_mapping(map)?);
                open = false;
            }
            other => {
                return Err(DomainError::MalformedDescription(format!(
                    "unsupported entry in description: {}",
                    kind_of(other)
                )))
            }
        }
    }
    Ok(nodes)
}

/// Mapping form: one node per key, in insertion order.
fn parse_mapping(map: &serde_json::Map<String, Value>) -> DomainResult<Vec<NodeDesc>> {
    let mut nodes = Vec::with_capacity(map.len());
    for (name, value) in map {
        let children = match value {
            Value::Null => Vec::new(),
            Value::Object(inner) => parse_mapping(inner)?,
            Value::Array(list) => parse_run(list)?,
            Value::String(child) => vec![NodeDesc::leaf(child)],
            other => {
                return Err(DomainError::MalformedDescription(format!(
                    "children of '{}' must be null, a mapping, a sequence, or a name, got {}",
                    name,
                    kind_of(other)
                )))
            }
        };
        nodes.push(NodeDesc::branch(name, children));
    }
    Ok(nodes)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_run_into_canonical_tree() {
        let desc = Description::parse(&json!(["ROOT", ["A", ["B", "C"]]])).unwrap();
        let Description::Nodes(roots) = desc else {
            panic!("expected explicit nodes");
        };
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "ROOT");
        assert_eq!(roots[0].children.len(), 1);
        let a = &roots[0].children[0];
        assert_eq!(a.name, "A");
        let names: Vec<_> = a.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn bare_string_is_a_template_root() {
        let desc = Description::parse(&json!("MyRig")).unwrap();
        assert_eq!(desc, Description::TemplateRoot("MyRig".to_string()));
    }

    #[test]
    fn three_element_form_is_rejected() {
        let err = Description::parse(&json!(["X", ["Y"], "extra"])).unwrap_err();
        assert!(matches!(err, DomainError::MalformedDescription(_)));
    }

    #[test]
    fn orphan_child_sequence_is_rejected() {
        let err = Description::parse(&json!(["X", [["Y"]]])).unwrap_err();
        assert!(matches!(err, DomainError::MalformedDescription(_)));
    }

    #[test]
    fn node_count_covers_whole_subtree() {
        let desc = NodeDesc::branch(
            "a",
            vec![NodeDesc::leaf("b"), NodeDesc::branch("c", vec![NodeDesc::leaf("d")])],
        );
        assert_eq!(desc.node_count(), 4);
    }
}
