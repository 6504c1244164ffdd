use std::sync::LazyLock;

use regex::Regex;

use crate::range::Range;

use super::{Attachable, NativePrefixable};

// Runs of at least three `*`, `-`, or `_`, each optionally preceded by one
// space; up to two leading spaces and trailing blanks on the variants that
// allow them. Anchored: a rule embedded in a longer line is not a rule.
static RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s{0,2}(?:(?:\s?\*\s*?){3,})|(?:(?:\s?-\s*?){3,})|(?:(?:\s?_\s*?){3,})[ \t]*)$")
        .unwrap()
});

/// A thematic-break attachment, recognized from plain rule text rather than a
/// native token. All but the final code unit is hidden; that unit anchors the
/// presentation placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalRule {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
}

impl HorizontalRule {
    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        if range.is_empty() || !RULE.is_match(line) {
            return None;
        }
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: Range::new(range.location, range.length - 1),
        })
    }

    #[must_use]
    pub fn native_representation() -> String {
        "---".to_string()
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
    }
}

impl NativePrefixable for HorizontalRule {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Attachable for HorizontalRule {}
