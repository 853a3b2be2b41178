//! HTML Abstract Syntax Tree
//!
//! The compiler builds a tree of [`HtmlNode`]s bottom-up from inline spans and
//! never mutates it afterwards. Rendering is a depth-first, in-order walk that
//! concatenates every node's HTML.

use indexmap::IndexMap;

use crate::{MdsiteError, Result};

/// Attribute mapping, serialized in insertion order
pub type Attributes = IndexMap<String, String>;

/// The only self-closing tag; its leaf value is never rendered
const SELF_CLOSING_TAG: &str = "img";

/// A node of the HTML tree
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    /// A node without children. An untagged leaf renders as raw text and
    /// ignores its attributes.
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Attributes,
    },

    /// An element wrapping an ordered (possibly empty) list of children
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Attributes,
    },
}

impl HtmlNode {
    /// Create an untagged text leaf
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    /// Create a tagged leaf without attributes
    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    /// Create a tagged leaf with attributes, kept in the given order
    pub fn leaf_with_attrs(tag: &str, value: impl Into<String>, attrs: Vec<(&str, &str)>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attrs: collect_attrs(attrs),
        }
    }

    /// Create a parent element
    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.to_string(),
            children,
            attrs: Attributes::new(),
        }
    }

    /// Get the tag name, if any
    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
            HtmlNode::Parent { tag, .. } => Some(tag.as_str()),
        }
    }

    /// Get the attributes
    pub fn attrs(&self) -> &Attributes {
        match self {
            HtmlNode::Leaf { attrs, .. } | HtmlNode::Parent { attrs, .. } => attrs,
        }
    }

    /// Get the children (always empty for a leaf)
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Parent { children, .. } => children,
        }
    }

    /// Render this node and its descendants to an HTML string
    pub fn render(&self) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.render_into(&mut output)?;
        Ok(output)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf { tag: None, value, .. } => {
                if value.is_empty() {
                    return Err(MdsiteError::EmptyValue);
                }
                out.push_str(value);
            }

            HtmlNode::Leaf {
                tag: Some(tag),
                value,
                attrs,
            } => {
                if tag.is_empty() {
                    return Err(MdsiteError::MissingTag);
                }
                open_tag(tag, attrs, out);
                if tag != SELF_CLOSING_TAG {
                    out.push_str(value);
                    close_tag(tag, out);
                }
            }

            HtmlNode::Parent {
                tag,
                children,
                attrs,
            } => {
                if tag.is_empty() {
                    return Err(MdsiteError::MissingTag);
                }
                open_tag(tag, attrs, out);
                for child in children {
                    child.render_into(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

/// Serialize attributes as ` key="value"` pairs; empty for no attributes
pub fn attributes_string(attrs: &Attributes) -> String {
    let mut result = String::new();
    for (name, value) in attrs {
        result.push(' ');
        result.push_str(name);
        result.push_str("=\"");
        result.push_str(value);
        result.push('"');
    }
    result
}

fn collect_attrs(attrs: Vec<(&str, &str)>) -> Attributes {
    attrs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn open_tag(tag: &str, attrs: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attributes_string(attrs));
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
