use crate::backing::BackingBuffer;
use crate::nodes::Node;
use crate::parsing::parse_document_nodes;
use crate::range::Range;

/// The parsed text model: the backing string plus the ordered node sequence
/// whose enclosing ranges tile it exactly.
///
/// A `Document` is built once by [`Document::parse`] and thereafter mutated
/// only through the controller's incremental edit pipeline. The presentation
/// string, the hidden-range list, and both range translations are derived
/// from the nodes, never stored independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) backing: BackingBuffer,
    pub(crate) nodes: Vec<Node>,
}

impl Document {
    /// One-time full parse of a backing string.
    pub fn parse(backing: &str) -> Self {
        let doc = Self {
            backing: BackingBuffer::new(backing),
            nodes: parse_document_nodes(backing),
        };
        doc.check_partition();
        doc
    }

    #[must_use]
    pub fn backing_string(&self) -> &str {
        self.backing.as_str()
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn len_utf16(&self) -> usize {
        self.backing.len_utf16()
    }

    /// Every hidden sub-span, in backing order. Sorted and disjoint because
    /// nodes tile the string and each hides only within its own span.
    #[must_use]
    pub fn hidden_ranges(&self) -> Vec<Range> {
        self.nodes.iter().flat_map(Node::hidden_ranges).collect()
    }

    /// The user-visible text: the backing string with all hidden ranges
    /// removed. Attachments keep exactly their final code unit, the anchor
    /// the host renders a placeholder over.
    #[must_use]
    pub fn presentation_string(&self) -> String {
        let hidden = self.backing.byte_ranges(&self.hidden_ranges());
        let text = self.backing.as_str();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for range in hidden {
            out.push_str(&text[cursor..range.start]);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    /// Maps a backing-string range into presentation coordinates. Offsets
    /// inside a hidden span clamp to the span's presentation point.
    #[must_use]
    pub fn presentation_range(&self, backing_range: Range) -> Range {
        let hidden = self.hidden_ranges();
        let start = presentation_offset(&hidden, backing_range.location);
        let end = presentation_offset(&hidden, backing_range.end());
        Range::new(start, end - start)
    }

    /// Maps a presentation range back into backing coordinates. Exact inverse
    /// of [`Self::presentation_range`] on visible positions; a presentation
    /// offset at a collapsed hidden span lands just past it, so a caret at a
    /// line start addresses the text after the hidden prefix.
    #[must_use]
    pub fn backing_range(&self, presentation_range: Range) -> Range {
        let hidden = self.hidden_ranges();
        let start = backing_offset(&hidden, presentation_range.location);
        let end = backing_offset(&hidden, presentation_range.end());
        Range::new(start, end - start)
    }

    /// Asserts the structural invariants: enclosing ranges tile `[0, len)`
    /// with no gaps or overlaps, and every node's sub-ranges nest correctly.
    /// A violation is a programming error, not a recoverable condition.
    pub fn check_partition(&self) {
        let mut cursor = 0usize;
        for (i, node) in self.nodes.iter().enumerate() {
            let enclosing = node.enclosing_range();
            assert_eq!(
                enclosing.location, cursor,
                "node {i} leaves a gap or overlap at offset {cursor}"
            );
            let range = node.range();
            assert!(
                enclosing.contains_range(range),
                "node {i} range {range:?} escapes enclosing {enclosing:?}"
            );
            if let Some(native) = node.native_prefix_range() {
                assert!(
                    range.contains_range(native),
                    "node {i} native prefix {native:?} escapes range {range:?}"
                );
            }
            if let Some(visible) = node.visible_range() {
                assert!(
                    range.contains_range(visible),
                    "node {i} visible range {visible:?} escapes range {range:?}"
                );
                if let Some(native) = node.native_prefix_range() {
                    assert!(
                        !visible.intersects(native),
                        "node {i} visible range overlaps its hidden prefix"
                    );
                }
            }
            cursor = enclosing.end();
        }
        assert_eq!(
            cursor,
            self.backing.len_utf16(),
            "nodes do not cover the full backing string"
        );
    }
}

fn presentation_offset(hidden: &[Range], offset: usize) -> usize {
    let mut hidden_before = 0usize;
    for h in hidden {
        if h.end() <= offset {
            hidden_before += h.length;
        } else if h.location < offset {
            // Inside a hidden span: clamp to its presentation point.
            hidden_before += offset - h.location;
        } else {
            break;
        }
    }
    offset - hidden_before
}

fn backing_offset(hidden: &[Range], offset: usize) -> usize {
    let mut shift = 0usize;
    for h in hidden {
        // Presentation point this hidden span collapsed to.
        let point = h.location - shift;
        if point <= offset {
            shift += h.length;
        } else {
            break;
        }
    }
    offset + shift
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::nodes::NodeKind;

    use super::*;

    const MIXED: &str = "⧙doc-heading⧘Title\n⧙blockquote⧘> quote\nplain\n---";

    #[test]
    fn presentation_strips_hidden_prefixes() {
        let doc = Document::parse("⧙doc-heading⧘Title\nOne\nTwo");
        assert_eq!(doc.presentation_string(), "Title\nOne\nTwo");
    }

    #[test]
    fn presentation_keeps_attachment_anchor() {
        let doc = Document::parse(MIXED);
        assert_eq!(doc.presentation_string(), "Title\nquote\nplain\n-");
    }

    #[test]
    fn presentation_of_empty_document() {
        let doc = Document::parse("");
        assert!(doc.nodes().is_empty());
        assert_eq!(doc.presentation_string(), "");
    }

    #[test]
    fn parse_assigns_kinds_in_order() {
        let doc = Document::parse(MIXED);
        let kinds: Vec<NodeKind> = doc.nodes().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Heading,
                NodeKind::Blockquote,
                NodeKind::Paragraph,
                NodeKind::HorizontalRule,
            ]
        );
    }

    #[test]
    fn partition_holds_for_varied_documents() {
        for backing in [
            "",
            "\n",
            "a",
            "a\n",
            "⧙doc-heading⧘T\n\n⧙blockquote⧘> q\n---\n⧙image⧘http://x/a.png",
            MIXED,
        ] {
            // check_partition panics on violation.
            Document::parse(backing);
        }
    }

    #[test]
    fn presentation_range_collapses_hidden_prefix() {
        let doc = Document::parse("⧙doc-heading⧘Title\nOne");
        // "Title" spans backing [13, 18) and presentation [0, 5).
        assert_eq!(doc.presentation_range(Range::new(13, 5)), Range::new(0, 5));
        // Offsets inside the hidden token clamp to presentation zero.
        assert_eq!(doc.presentation_range(Range::new(4, 0)), Range::new(0, 0));
        // "One" starts at presentation 6, backing 19.
        assert_eq!(doc.presentation_range(Range::new(19, 3)), Range::new(6, 3));
    }

    #[test]
    fn backing_range_lands_after_hidden_prefix() {
        let doc = Document::parse("⧙doc-heading⧘Title\nOne");
        assert_eq!(doc.backing_range(Range::new(0, 5)), Range::new(13, 5));
        assert_eq!(doc.backing_range(Range::new(6, 0)), Range::new(19, 0));
    }

    #[test]
    fn range_translation_round_trips_visible_offsets() {
        let doc = Document::parse("⧙doc-heading⧘Title\n⧙blockquote⧘> q\nOne");
        for offset in 0..=doc.presentation_string().encode_utf16().count() {
            let backing = doc.backing_range(Range::new(offset, 0));
            let back = doc.presentation_range(backing);
            assert_eq!(back, Range::new(offset, 0), "offset {offset}");
        }
    }

    #[test]
    fn backing_round_trip_is_presentation_equivalent() {
        let doc = Document::parse("⧙doc-heading⧘Title\nOne");
        for offset in 0..=doc.len_utf16() {
            let p = doc.presentation_range(Range::new(offset, 0));
            let b = doc.backing_range(p);
            // The round trip may normalize into the visible region, but the
            // presentation image must agree.
            assert_eq!(doc.presentation_range(b), p, "offset {offset}");
        }
    }
}
