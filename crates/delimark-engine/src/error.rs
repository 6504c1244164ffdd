use crate::range::Range;

/// Why an edit request was refused before any state changed.
///
/// Parse failure is never an error: block dispatch always falls back to a
/// paragraph. Invariant violations after an applied edit are programming
/// errors and panic instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit range {range:?} exceeds backing length {len}")]
    OutOfBounds { range: Range, len: usize },
    #[error("edit range {range:?} falls inside an attachment's hidden region")]
    AttachmentInterior { range: Range },
}
