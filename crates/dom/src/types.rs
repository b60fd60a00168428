//! Core type definitions for the parsed document tree
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Use SmallVec for small arrays (avoid heap allocation)
//! 3. Node payload is a tagged variant, navigation data lives beside it

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::path::{ElementPath, COMMENT_STEP};

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any webpage
pub type NodeId = u32;

/// Single attribute on an element, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Most elements carry fewer than four attributes
pub type Attributes = SmallVec<[Attribute; 4]>;

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Element { tag: String, attributes: Attributes },
    Text { value: String },
    Comment { value: String },
}

/// The main DOM tree node structure
///
/// - Navigation via indices, never pointers
/// - `parent_id` is set once when the node is appended and never changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children
    pub data: NodeData,
}

impl DomNode {
    pub fn new(node_id: NodeId, data: NodeData) -> Self {
        Self {
            node_id,
            parent_id: None,
            children_ids: SmallVec::new(),
            data,
        }
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    /// Attributes of an element, empty for every other node
    pub fn attributes(&self) -> &[Attribute] {
        match &self.data {
            NodeData::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Tag used for this node in a positional path; text nodes are not addressable
    pub fn step_tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Comment { .. } => Some(COMMENT_STEP),
            NodeData::Text { .. } => None,
        }
    }

    /// Character data of a text or comment node
    pub fn value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { value } | NodeData::Comment { value } => Some(value),
            NodeData::Element { .. } => None,
        }
    }
}

/// One catalog entry: a scrape-relevant element, detached from the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementRecord {
    pub content: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub attributes: RecordAttributes,
    #[serde(rename = "xpath")]
    pub path: ElementPath,
}

/// Allow-listed attributes of a record, in the element's attribute order.
/// Serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordAttributes(Vec<(String, String)>);

impl RecordAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RecordAttributes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Elements that never have content and close immediately
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is raw character data up to the matching end tag
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "textarea", "title",
];

/// Raw text elements in which character references are still decoded
pub const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Block-level tags: they close an open paragraph, and their presence makes a
/// synthetic wrapper a `div` rather than a `span`
pub const BLOCK_LEVEL_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "main",
    "menu",
    "nav",
    "noscript",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "ul",
];

/// Tags a scraper would target
pub const DEFAULT_RELEVANT_TAGS: &[&str] =
    &["div", "span", "a", "p", "ul", "li", "button", "input"];

/// Attributes copied into each record
pub const DEFAULT_INCLUDE_ATTRIBUTES: &[&str] = &["id", "class", "name", "href"];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

pub fn is_escapable_raw_text_element(tag: &str) -> bool {
    ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag)
}

pub fn is_block_level(tag: &str) -> bool {
    BLOCK_LEVEL_TAGS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_lookup_keeps_first_and_verbatim() {
        let mut attributes = Attributes::new();
        attributes.push(Attribute::new("class", "  Big Red "));
        attributes.push(Attribute::new("id", ""));
        let node = DomNode::new(
            0,
            NodeData::Element {
                tag: "div".to_string(),
                attributes,
            },
        );

        assert_eq!(node.attr("class"), Some("  Big Red "));
        assert_eq!(node.attr("id"), Some(""));
        assert_eq!(node.attr("name"), None);
        assert_eq!(node.tag_name(), Some("div"));
    }

    #[test]
    fn test_non_element_has_no_attributes() {
        let node = DomNode::new(
            3,
            NodeData::Comment {
                value: " note ".to_string(),
            },
        );
        assert!(node.attributes().is_empty());
        assert!(node.tag_name().is_none());
        assert_eq!(node.step_tag(), Some(COMMENT_STEP));
        assert_eq!(node.value(), Some(" note "));
    }

    #[test]
    fn test_record_attributes_serialize_in_order() {
        let mut attrs = RecordAttributes::new();
        attrs.push("name", "q");
        attrs.push("href", "/x");
        attrs.push("id", "main");
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"name":"q","href":"/x","id":"main"}"#);
    }
}
