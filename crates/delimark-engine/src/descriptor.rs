use serde::Serialize;

use crate::nodes::{Node, NodeKind, Position, Size};
use crate::range::Range;

/// The generic export surface: a node's kind tag, every range it owns, and
/// its kind-specific payload. Lossless with respect to the node itself; this
/// is the only serialization the engine exposes to renderers, persistence,
/// and sync collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub kind: NodeKind,
    pub range: Range,
    pub enclosing_range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_prefix_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_range: Option<Range>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden_ranges: Vec<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl Node {
    /// Builds the generic descriptor for this node.
    #[must_use]
    pub fn descriptor(&self) -> NodeDescriptor {
        let mut d = NodeDescriptor {
            kind: self.kind(),
            range: self.range(),
            enclosing_range: self.enclosing_range(),
            native_prefix_range: self.native_prefix_range(),
            visible_range: self.visible_range(),
            hidden_ranges: if self.is_attachable() {
                self.hidden_ranges()
            } else {
                vec![]
            },
            position: self.position(),
            indent: None,
            number: None,
            checked: None,
            language: None,
            identifier: None,
            url: None,
            size: None,
        };
        match self {
            Node::UnorderedListItem(n) => d.indent = Some(n.indent),
            Node::OrderedListItem(n) => {
                d.indent = Some(n.indent);
                d.number = Some(n.number);
            }
            Node::ChecklistItem(n) => {
                d.indent = Some(n.indent);
                d.checked = Some(n.checked);
            }
            Node::CodeBlock(n) => d.language = n.language.clone(),
            Node::Image(n) => {
                d.identifier = Some(n.identifier.clone());
                d.url = n.url.clone();
                d.size = n.size;
            }
            _ => {}
        }
        d
    }
}
