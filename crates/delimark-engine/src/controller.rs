use crate::backing::utf16_len;
use crate::document::Document;
use crate::error::EditError;
use crate::nodes::NodeKind;
use crate::parsing::{assign_positions, lines_with_ranges, parse_block};
use crate::range::Range;

/// Receives the results of every applied edit: the fresh presentation string
/// and which blocks changed, so the host re-renders only what it must.
///
/// The callback runs synchronously at the end of a successful edit, after all
/// invariants have been re-checked. It must not re-enter the controller;
/// ownership makes that impossible without interior mutability.
pub trait DocumentDelegate {
    fn document_did_change(&mut self, change: &DocumentChange<'_>);
}

/// One notification's worth of state.
#[derive(Debug, Clone, Copy)]
pub struct DocumentChange<'a> {
    pub presentation_string: &'a str,
    pub changed_blocks: &'a [ChangedBlock],
    pub version: u64,
}

/// A block whose content, kind, or run position changed in an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedBlock {
    pub index: usize,
    pub kind: NodeKind,
}

/// Result of a successfully applied edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Node-index range of the freshly parsed blocks.
    pub replaced_blocks: Range,
    /// Length delta the edit applied to the backing string.
    pub delta: isize,
    /// Document version after the edit; increments once per applied edit.
    pub version: u64,
}

/// The incremental engine. Owns the [`Document`] exclusively; all mutation
/// flows through [`Self::replace_characters`], which runs to completion
/// synchronously. An edit is atomic from the caller's point of view, and
/// `&mut self` serializes callers.
pub struct DocumentController<D: DocumentDelegate> {
    document: Document,
    delegate: D,
    version: u64,
}

impl<D: DocumentDelegate> DocumentController<D> {
    /// Parses `backing` once and reports the initial state to the delegate.
    pub fn new(backing: &str, delegate: D) -> Self {
        let mut controller = Self {
            document: Document::parse(backing),
            delegate,
            version: 0,
        };
        controller.notify_all();
        controller
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn backing_string(&self) -> &str {
        self.document.backing_string()
    }

    #[must_use]
    pub fn presentation_string(&self) -> String {
        self.document.presentation_string()
    }

    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    #[must_use]
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Translates a host selection into backing coordinates.
    #[must_use]
    pub fn backing_range(&self, presentation_range: Range) -> Range {
        self.document.backing_range(presentation_range)
    }

    /// Translates a backing range into presentation coordinates.
    #[must_use]
    pub fn presentation_range(&self, backing_range: Range) -> Range {
        self.document.presentation_range(backing_range)
    }

    /// Replaces the whole backing string. The one wholesale rewrite the model
    /// permits; everything else goes through [`Self::replace_characters`].
    pub fn replace_backing_string(&mut self, backing: &str) {
        self.document = Document::parse(backing);
        self.version += 1;
        self.notify_all();
    }

    /// The node-index range an edit over `range` would reparse, widened to
    /// whole same-kind runs. A zero-length result means the edit opens a new
    /// block at that index without touching existing ones.
    #[must_use]
    pub fn block_range_for_edit(&self, range: Range) -> Range {
        self.affected_block_range(range)
    }

    /// Applies one edit: splice `replacement` over `range` in the backing
    /// string, reparse the minimal affected span, shift everything after it,
    /// and notify the delegate.
    ///
    /// Validation happens before any state changes, so a returned error
    /// leaves the document untouched.
    pub fn replace_characters(
        &mut self,
        range: Range,
        replacement: &str,
    ) -> Result<Patch, EditError> {
        let len = self.document.len_utf16();
        if range.end() > len {
            return Err(EditError::OutOfBounds { range, len });
        }
        self.check_attachment_interior(range)?;

        let delta = utf16_len(replacement) as isize - range.length as isize;
        let affected = self.affected_block_range(range);
        log::debug!(
            "edit at {range:?} (delta {delta}) reparses blocks {affected:?} of {}",
            self.document.nodes.len()
        );

        // Reparse window, in pre-edit coordinates.
        let (window_start, window_old_end) = if affected.is_empty() {
            (range.location, range.location)
        } else {
            let nodes = self.document.nodes();
            (
                nodes[affected.location].enclosing_range().location,
                nodes[affected.end() - 1].enclosing_range().end(),
            )
        };

        self.document.backing.replace_range(range, replacement);
        let new_len = self.document.backing.len_utf16();

        // If the edit removed the separator before the next block, that block
        // now shares a line with the window; widen until the window ends at a
        // line boundary.
        let mut old_tail_start = affected.end();
        let mut window_end = (window_old_end as isize + delta) as usize;
        loop {
            if window_end >= new_len {
                window_end = new_len;
                break;
            }
            if window_end == 0
                || self.document.backing.slice(Range::new(window_end - 1, 1)) == "\n"
            {
                break;
            }
            let merged = self.document.nodes[old_tail_start].enclosing_range();
            window_end = (merged.end() as isize + delta) as usize;
            old_tail_start += 1;
        }

        let window_range = Range::new(window_start, window_end - window_start);
        let window_text = self.document.backing.slice(window_range).to_string();
        let new_nodes: Vec<_> = lines_with_ranges(&window_text)
            .into_iter()
            .map(|lc| {
                parse_block(
                    lc.text,
                    lc.range.shifted(window_start as isize),
                    lc.enclosing_range.shifted(window_start as isize),
                )
            })
            .collect();
        let inserted = Range::new(affected.location, new_nodes.len());
        log::trace!("window {window_range:?} parsed into {} blocks", new_nodes.len());

        let mut tail = self.document.nodes.split_off(old_tail_start);
        for node in &mut tail {
            node.offset(delta);
        }
        self.document.nodes.truncate(affected.location);
        self.document.nodes.extend(new_nodes);
        self.document.nodes.append(&mut tail);

        // Runs only ever change by joining or splitting at the edit boundary,
        // but the pass is document-wide so positions stay a pure function of
        // the node sequence.
        let mut changed: Vec<usize> = (inserted.location..inserted.end()).collect();
        for index in assign_positions(&mut self.document.nodes) {
            if !inserted.contains(index) {
                changed.push(index);
            }
        }
        changed.sort_unstable();

        self.document.check_partition();
        self.version += 1;

        let changed_blocks: Vec<ChangedBlock> = changed
            .into_iter()
            .map(|index| ChangedBlock {
                index,
                kind: self.document.nodes[index].kind(),
            })
            .collect();
        self.notify(&changed_blocks);

        Ok(Patch {
            replaced_blocks: inserted,
            delta,
            version: self.version,
        })
    }

    /// Rejects edits that land strictly inside an attachment's hidden span.
    /// The host is expected to replace or delete attachments wholesale, by
    /// their full enclosing range.
    fn check_attachment_interior(&self, range: Range) -> Result<(), EditError> {
        for node in self.document.nodes() {
            if !node.is_attachable() {
                continue;
            }
            for hidden in node.hidden_ranges() {
                let interior = if range.is_empty() {
                    range.location > hidden.location && range.location < hidden.end()
                } else {
                    hidden.contains_range(range)
                };
                if interior {
                    return Err(EditError::AttachmentInterior { range });
                }
            }
        }
        Ok(())
    }

    /// The contiguous node-index range whose enclosing ranges the edit
    /// touches, widened to full same-kind positionable runs so Top/Middle/
    /// Bottom stay correct after the reparse. Clamped to document bounds.
    fn affected_block_range(&self, range: Range) -> Range {
        let nodes = self.document.nodes();
        if nodes.is_empty() {
            return Range::new(0, 0);
        }
        if range.is_empty() {
            let offset = range.location;
            if offset >= self.document.len_utf16() {
                // Insertion at the very end: after a trailing newline it opens
                // a new block, otherwise it extends the last line.
                if self.document.backing_string().ends_with('\n') {
                    return Range::new(nodes.len(), 0);
                }
                return self.widen(Range::new(nodes.len() - 1, 1));
            }
            let index = nodes
                .iter()
                .position(|n| n.enclosing_range().contains(offset))
                .expect("partition covers every offset");
            return self.widen(Range::new(index, 1));
        }
        let lo = nodes
            .iter()
            .position(|n| n.enclosing_range().intersects(range))
            .expect("non-empty edit range touches at least one block");
        let hi = nodes
            .iter()
            .rposition(|n| n.enclosing_range().intersects(range))
            .expect("non-empty edit range touches at least one block");
        self.widen(Range::new(lo, hi - lo + 1))
    }

    /// Expands a node-index range to cover the whole same-kind run at each
    /// boundary.
    fn widen(&self, range: Range) -> Range {
        if range.is_empty() {
            return range;
        }
        let nodes = self.document.nodes();
        let mut lo = range.location;
        let mut hi = range.end();
        if nodes[lo].position().is_some() {
            let kind = nodes[lo].kind();
            while lo > 0 && nodes[lo - 1].kind() == kind {
                lo -= 1;
            }
        }
        if nodes[hi - 1].position().is_some() {
            let kind = nodes[hi - 1].kind();
            while hi < nodes.len() && nodes[hi].kind() == kind {
                hi += 1;
            }
        }
        Range::new(lo, hi - lo)
    }

    fn notify_all(&mut self) {
        let changed: Vec<ChangedBlock> = self
            .document
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| ChangedBlock {
                index,
                kind: node.kind(),
            })
            .collect();
        self.notify(&changed);
    }

    fn notify(&mut self, changed_blocks: &[ChangedBlock]) {
        let presentation = self.document.presentation_string();
        self.delegate.document_did_change(&DocumentChange {
            presentation_string: &presentation,
            changed_blocks,
            version: self.version,
        });
    }
}
