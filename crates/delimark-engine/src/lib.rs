//! # delimark-engine
//!
//! A dual-representation text model for plain-text-backed rich editing.
//!
//! The **backing string** is ordinary text interleaved with hidden delimiter
//! tokens (`⧙keyword⧘`) that mark block and inline structure. Parsing turns it
//! into a sequence of typed [`Node`]s whose enclosing ranges tile the string
//! exactly; the **presentation string**, the text the user actually sees, is
//! derived by stripping every hidden range.
//!
//! The [`DocumentController`] keeps the two representations consistent under
//! editing: each edit is localized to the smallest span of blocks that could
//! be affected, only those are reparsed, and everything downstream is shifted
//! by the length delta. All offsets are UTF-16 code units, the coordinate
//! space host editors address text in.
//!
//! ```rust
//! use delimark_engine::{DocumentChange, DocumentController, DocumentDelegate, Range};
//!
//! struct View(String);
//!
//! impl DocumentDelegate for View {
//!     fn document_did_change(&mut self, change: &DocumentChange<'_>) {
//!         self.0 = change.presentation_string.to_string();
//!     }
//! }
//!
//! let mut controller = DocumentController::new("⧙doc-heading⧘Title\nBody", View(String::new()));
//! controller.replace_characters(Range::new(23, 0), "!").unwrap();
//! assert_eq!(controller.delegate().0, "Title\nBody!");
//! ```

pub mod backing;
pub mod controller;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod nodes;
pub mod parsing;
pub mod range;

// Re-export key types for easier usage
pub use controller::{ChangedBlock, DocumentChange, DocumentController, DocumentDelegate, Patch};
pub use descriptor::NodeDescriptor;
pub use document::Document;
pub use error::EditError;
pub use nodes::{
    Annotatable, Attachable, NativePrefixable, Node, NodeKind, Position, Positionable,
    ReturnCompletable,
};
pub use range::Range;
