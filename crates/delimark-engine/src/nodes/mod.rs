//! Parsed node kinds and their capability contracts.
//!
//! Each kind lives in its own file and owns its grammar knowledge: the struct,
//! its fallible `parse` constructor, and its range fields. The [`Node`] enum
//! is the tagged sum over all kinds; shared behavior (`offset`, range access,
//! hidden-range derivation) dispatches by match rather than open-ended
//! downcasting. The capability traits describe what a kind can do; hosts use
//! them to drive styling and return-key policy without knowing every kind.

pub mod blockquote;
pub mod checklist_item;
pub mod code_block;
pub mod delimiters;
pub mod heading;
pub mod horizontal_rule;
pub mod image;
pub mod ordered_list_item;
pub mod paragraph;
pub mod unordered_list_item;

pub use blockquote::Blockquote;
pub use checklist_item::ChecklistItem;
pub use code_block::CodeBlock;
pub use heading::Heading;
pub use horizontal_rule::HorizontalRule;
pub use image::{Image, Size};
pub use ordered_list_item::OrderedListItem;
pub use paragraph::Paragraph;
pub use unordered_list_item::UnorderedListItem;

use serde::{Deserialize, Serialize};

use crate::range::Range;

/// A node's role within a contiguous run of same-kind sibling lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Single,
    Top,
    Middle,
    Bottom,
}

/// Block kinds whose hidden region is a leading delimiter token (plus, for
/// some kinds, a visible-prefix literal).
pub trait NativePrefixable {
    fn native_prefix_range(&self) -> Range;
}

/// Multi-line block kinds whose rendering depends on their place in a run of
/// same-kind siblings. The position is assigned by the parser from adjacency,
/// never self-determined.
pub trait Positionable {
    fn position(&self) -> Position;
    fn set_position(&mut self, position: Position);
}

/// Atomic inline attachments: the node claims its whole span or fails to
/// parse, and collapses to a single placeholder unit in presentation.
pub trait Attachable: NativePrefixable {
    fn hidden_ranges(&self) -> Vec<Range> {
        vec![self.native_prefix_range()]
    }
}

/// Marker: the host may apply inline styling to this kind's visible text.
pub trait Annotatable {}

/// Marker: the host continues this kind on return (new sibling line).
pub trait ReturnCompletable {}

/// Payload-free tag identifying a node's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Heading,
    Paragraph,
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    ChecklistItem,
    CodeBlock,
    Image,
    HorizontalRule,
}

/// A parsed unit of the backing string: a block line or an inline attachment.
///
/// Nodes are owned by the [`Document`](crate::document::Document) and carry
/// only value state; offsetting produces shifted ranges in place with no
/// shared aliasing to worry about.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading(Heading),
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    UnorderedListItem(UnorderedListItem),
    OrderedListItem(OrderedListItem),
    ChecklistItem(ChecklistItem),
    CodeBlock(CodeBlock),
    Image(Image),
    HorizontalRule(HorizontalRule),
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading(_) => NodeKind::Heading,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::UnorderedListItem(_) => NodeKind::UnorderedListItem,
            Node::OrderedListItem(_) => NodeKind::OrderedListItem,
            Node::ChecklistItem(_) => NodeKind::ChecklistItem,
            Node::CodeBlock(_) => NodeKind::CodeBlock,
            Node::Image(_) => NodeKind::Image,
            Node::HorizontalRule(_) => NodeKind::HorizontalRule,
        }
    }

    /// The full span of the node in the backing string.
    #[must_use]
    pub fn range(&self) -> Range {
        match self {
            Node::Heading(n) => n.range,
            Node::Paragraph(n) => n.range,
            Node::Blockquote(n) => n.range,
            Node::UnorderedListItem(n) => n.range,
            Node::OrderedListItem(n) => n.range,
            Node::ChecklistItem(n) => n.range,
            Node::CodeBlock(n) => n.range,
            Node::Image(n) => n.range,
            Node::HorizontalRule(n) => n.range,
        }
    }

    /// The span plus the trailing structural characters the node owns. The
    /// enclosing ranges of the document's nodes tile the backing string.
    #[must_use]
    pub fn enclosing_range(&self) -> Range {
        match self {
            Node::Heading(n) => n.enclosing_range,
            Node::Paragraph(n) => n.enclosing_range,
            Node::Blockquote(n) => n.enclosing_range,
            Node::UnorderedListItem(n) => n.enclosing_range,
            Node::OrderedListItem(n) => n.enclosing_range,
            Node::ChecklistItem(n) => n.enclosing_range,
            Node::CodeBlock(n) => n.enclosing_range,
            Node::Image(n) => n.enclosing_range,
            Node::HorizontalRule(n) => n.enclosing_range,
        }
    }

    #[must_use]
    pub fn native_prefix_range(&self) -> Option<Range> {
        match self {
            Node::Heading(n) => Some(n.native_prefix_range),
            Node::Paragraph(_) => None,
            Node::Blockquote(n) => Some(n.native_prefix_range),
            Node::UnorderedListItem(n) => Some(n.native_prefix_range),
            Node::OrderedListItem(n) => Some(n.native_prefix_range),
            Node::ChecklistItem(n) => Some(n.native_prefix_range),
            Node::CodeBlock(n) => Some(n.native_prefix_range),
            Node::Image(n) => Some(n.native_prefix_range),
            Node::HorizontalRule(n) => Some(n.native_prefix_range),
        }
    }

    /// The sub-span surviving into the presentation string. Attachments have
    /// none; their contribution is the placeholder anchor unit.
    #[must_use]
    pub fn visible_range(&self) -> Option<Range> {
        match self {
            Node::Heading(n) => Some(n.visible_range),
            Node::Paragraph(n) => Some(n.visible_range()),
            Node::Blockquote(n) => Some(n.visible_range),
            Node::UnorderedListItem(n) => Some(n.visible_range),
            Node::OrderedListItem(n) => Some(n.visible_range),
            Node::ChecklistItem(n) => Some(n.visible_range),
            Node::CodeBlock(n) => Some(n.visible_range),
            Node::Image(_) | Node::HorizontalRule(_) => None,
        }
    }

    /// The sub-spans stripped from presentation.
    #[must_use]
    pub fn hidden_ranges(&self) -> Vec<Range> {
        match self {
            Node::Paragraph(_) => vec![],
            Node::Image(n) => n.hidden_ranges(),
            Node::HorizontalRule(n) => n.hidden_ranges(),
            _ => vec![self.native_prefix_range().expect("block kind has a prefix")],
        }
    }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Blockquote(n) => Some(n.position),
            Node::UnorderedListItem(n) => Some(n.position),
            Node::OrderedListItem(n) => Some(n.position),
            Node::ChecklistItem(n) => Some(n.position),
            Node::CodeBlock(n) => Some(n.position),
            _ => None,
        }
    }

    /// Sets the run position on positionable kinds; no-op otherwise.
    pub fn set_position(&mut self, position: Position) {
        match self {
            Node::Blockquote(n) => n.set_position(position),
            Node::UnorderedListItem(n) => n.set_position(position),
            Node::OrderedListItem(n) => n.set_position(position),
            Node::ChecklistItem(n) => n.set_position(position),
            Node::CodeBlock(n) => n.set_position(position),
            _ => {}
        }
    }

    #[must_use]
    pub fn is_attachable(&self) -> bool {
        matches!(self, Node::Image(_) | Node::HorizontalRule(_))
    }

    #[must_use]
    pub fn is_annotatable(&self) -> bool {
        matches!(
            self,
            Node::Heading(_)
                | Node::Paragraph(_)
                | Node::Blockquote(_)
                | Node::UnorderedListItem(_)
                | Node::OrderedListItem(_)
                | Node::ChecklistItem(_)
        )
    }

    #[must_use]
    pub fn is_return_completable(&self) -> bool {
        matches!(
            self,
            Node::Blockquote(_)
                | Node::UnorderedListItem(_)
                | Node::OrderedListItem(_)
                | Node::ChecklistItem(_)
        )
    }

    /// Shifts every range the node owns by `delta`, preserving lengths.
    /// Composes additively: offsetting by `d1` then `d2` equals offsetting
    /// once by `d1 + d2`.
    pub fn offset(&mut self, delta: isize) {
        match self {
            Node::Heading(n) => n.offset(delta),
            Node::Paragraph(n) => n.offset(delta),
            Node::Blockquote(n) => n.offset(delta),
            Node::UnorderedListItem(n) => n.offset(delta),
            Node::OrderedListItem(n) => n.offset(delta),
            Node::ChecklistItem(n) => n.offset(delta),
            Node::CodeBlock(n) => n.offset(delta),
            Node::Image(n) => n.offset(delta),
            Node::HorizontalRule(n) => n.offset(delta),
        }
    }
}

/// List keywords encode their indent level as a single-digit suffix, capped
/// at three levels of nesting.
pub(crate) fn parse_indent_suffix(suffix: &str) -> Option<u8> {
    match suffix {
        "0" => Some(0),
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        _ => None,
    }
}
