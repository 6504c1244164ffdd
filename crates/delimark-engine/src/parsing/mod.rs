//! Line-oriented block parsing.
//!
//! Parsing is two-phase: the backing string is split into line candidates
//! (each owning its trailing newline through `enclosing_range`), then every
//! candidate runs through [`parse_block`] dispatch. Dispatch order is a
//! contract: most specific prefix kinds first, attachments next, paragraph as
//! the unconditional fallback. The result is total; every code unit of the
//! backing string lands in exactly one node.

use crate::backing::utf16_len;
use crate::nodes::{
    Blockquote, ChecklistItem, CodeBlock, Heading, HorizontalRule, Image, Node, OrderedListItem,
    Paragraph, Position, UnorderedListItem,
};
use crate::range::Range;

/// A single line of the backing string with its spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCandidate<'a> {
    /// Line text without the trailing newline.
    pub text: &'a str,
    /// Span of `text` in UTF-16 units, relative to the scanned string.
    pub range: Range,
    /// `range` plus the trailing newline, if present.
    pub enclosing_range: Range,
}

/// Splits `text` into line candidates. A final newline is owned by the last
/// line; it does not produce an empty trailing candidate.
pub fn lines_with_ranges(text: &str) -> Vec<LineCandidate<'_>> {
    let mut out = Vec::new();
    let mut location = 0usize;
    for piece in text.split_inclusive('\n') {
        let has_newline = piece.ends_with('\n');
        let line = if has_newline {
            &piece[..piece.len() - 1]
        } else {
            piece
        };
        let line_len = utf16_len(line);
        let enclosing_len = line_len + usize::from(has_newline);
        out.push(LineCandidate {
            text: line,
            range: Range::new(location, line_len),
            enclosing_range: Range::new(location, enclosing_len),
        });
        location += enclosing_len;
    }
    out
}

/// Runs block dispatch over one candidate. The priority order below is
/// observable behavior; changing it changes which kind claims ambiguous
/// spans.
pub fn parse_block(line: &str, range: Range, enclosing_range: Range) -> Node {
    if let Some(n) = Heading::parse(line, range, enclosing_range) {
        return Node::Heading(n);
    }
    if let Some(n) = Blockquote::parse(line, range, enclosing_range) {
        return Node::Blockquote(n);
    }
    if let Some(n) = ChecklistItem::parse(line, range, enclosing_range) {
        return Node::ChecklistItem(n);
    }
    if let Some(n) = UnorderedListItem::parse(line, range, enclosing_range) {
        return Node::UnorderedListItem(n);
    }
    if let Some(n) = OrderedListItem::parse(line, range, enclosing_range) {
        return Node::OrderedListItem(n);
    }
    if let Some(n) = CodeBlock::parse(line, range, enclosing_range) {
        return Node::CodeBlock(n);
    }
    if let Some(n) = Image::parse(line, range, enclosing_range) {
        return Node::Image(n);
    }
    if let Some(n) = HorizontalRule::parse(line, range, enclosing_range) {
        return Node::HorizontalRule(n);
    }
    Node::Paragraph(Paragraph::parse(line, range, enclosing_range))
}

/// Parses a whole backing string into positioned nodes.
pub fn parse_document_nodes(backing: &str) -> Vec<Node> {
    let mut nodes: Vec<Node> = lines_with_ranges(backing)
        .into_iter()
        .map(|lc| parse_block(lc.text, lc.range, lc.enclosing_range))
        .collect();
    assign_positions(&mut nodes);
    nodes
}

/// Assigns Single/Top/Middle/Bottom over maximal runs of consecutive
/// positionable nodes of the same kind. Any node of a different kind,
/// including the blank-line paragraph, terminates a run. Returns the indices
/// whose position actually changed.
pub fn assign_positions(nodes: &mut [Node]) -> Vec<usize> {
    let mut changed = Vec::new();
    let mut i = 0;
    while i < nodes.len() {
        if nodes[i].position().is_none() {
            i += 1;
            continue;
        }
        let kind = nodes[i].kind();
        let mut j = i + 1;
        while j < nodes.len() && nodes[j].kind() == kind {
            j += 1;
        }
        for k in i..j {
            let position = if j - i == 1 {
                Position::Single
            } else if k == i {
                Position::Top
            } else if k == j - 1 {
                Position::Bottom
            } else {
                Position::Middle
            };
            if nodes[k].position() != Some(position) {
                nodes[k].set_position(position);
                changed.push(k);
            }
        }
        i = j;
    }
    changed
}
