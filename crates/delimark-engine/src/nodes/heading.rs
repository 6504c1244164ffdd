use crate::range::Range;

use super::delimiters::{native_token, parse_block_prefix};
use super::{Annotatable, NativePrefixable};

/// The document heading line: a `doc-heading` token with no visible prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
}

impl Heading {
    pub const KEYWORD: &'static str = "doc-heading";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let prefix = parse_block_prefix(line, range, Self::KEYWORD, "")?;
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: prefix.native_prefix_range,
            visible_range: prefix.visible_range,
        })
    }

    /// The backing text a host inserts to create a heading.
    #[must_use]
    pub fn native_representation() -> String {
        native_token(Self::KEYWORD)
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
        self.visible_range = self.visible_range.shifted(delta);
    }
}

impl NativePrefixable for Heading {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Annotatable for Heading {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backing::utf16_len;

    #[test]
    fn parse_heading_line() {
        let line = "⧙doc-heading⧘Title";
        let len = utf16_len(line);
        let h = Heading::parse(line, Range::new(0, len), Range::new(0, len + 1)).unwrap();
        assert_eq!(h.native_prefix_range, Range::new(0, 13));
        assert_eq!(h.visible_range, Range::new(13, 5));
    }

    #[test]
    fn reject_other_keyword() {
        let line = "⧙blockquote⧘> x";
        assert!(Heading::parse(line, Range::new(0, 15), Range::new(0, 16)).is_none());
    }

    #[test]
    fn reject_plain_text() {
        assert!(Heading::parse("Title", Range::new(0, 5), Range::new(0, 5)).is_none());
    }

    #[test]
    fn native_representation_round_trips() {
        let backing = format!("{}New", Heading::native_representation());
        let len = utf16_len(&backing);
        assert!(Heading::parse(&backing, Range::new(0, len), Range::new(0, len)).is_some());
    }
}
