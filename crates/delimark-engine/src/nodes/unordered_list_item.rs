use crate::backing::utf16_len;
use crate::range::Range;

use super::delimiters::{native_token, scan_native_token};
use super::{Annotatable, NativePrefixable, Position, Positionable, ReturnCompletable, parse_indent_suffix};

/// A bulleted list line: `unordered-list-N` token (N = indent level) followed
/// by the visible `"- "` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnorderedListItem {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub position: Position,
    pub indent: u8,
}

impl UnorderedListItem {
    pub const KEYWORD_PREFIX: &'static str = "unordered-list-";
    pub const VISIBLE_PREFIX: &'static str = "- ";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let token = scan_native_token(line)?;
        let indent = parse_indent_suffix(token.keyword.strip_prefix(Self::KEYWORD_PREFIX)?)?;
        let rest = &line[token.byte_len..];
        if !rest.starts_with(Self::VISIBLE_PREFIX) {
            return None;
        }
        let hidden_len = token.utf16_len + utf16_len(Self::VISIBLE_PREFIX);
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: Range::new(range.location, hidden_len),
            visible_range: Range::new(range.location + hidden_len, range.length - hidden_len),
            position: Position::Single,
            indent,
        })
    }

    #[must_use]
    pub fn native_representation(indent: u8) -> String {
        format!(
            "{}{}",
            native_token(&format!("{}{indent}", Self::KEYWORD_PREFIX)),
            Self::VISIBLE_PREFIX
        )
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
        self.visible_range = self.visible_range.shifted(delta);
    }
}

impl NativePrefixable for UnorderedListItem {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Positionable for UnorderedListItem {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Annotatable for UnorderedListItem {}
impl ReturnCompletable for UnorderedListItem {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<UnorderedListItem> {
        let len = utf16_len(line);
        UnorderedListItem::parse(line, Range::new(0, len), Range::new(0, len + 1))
    }

    #[test]
    fn parse_item_with_indent() {
        let item = parse("⧙unordered-list-2⧘- point").unwrap();
        assert_eq!(item.indent, 2);
        // Token (18 units) plus "- ".
        assert_eq!(item.native_prefix_range, Range::new(0, 20));
        assert_eq!(item.visible_range, Range::new(20, 5));
    }

    #[test]
    fn reject_indent_out_of_range() {
        assert!(parse("⧙unordered-list-4⧘- point").is_none());
        assert!(parse("⧙unordered-list-⧘- point").is_none());
        assert!(parse("⧙unordered-list-10⧘- point").is_none());
    }

    #[test]
    fn reject_missing_bullet() {
        assert!(parse("⧙unordered-list-0⧘point").is_none());
    }

    #[test]
    fn native_representation_parses_back() {
        let line = format!("{}item", UnorderedListItem::native_representation(1));
        let len = utf16_len(&line);
        let item = UnorderedListItem::parse(&line, Range::new(0, len), Range::new(0, len)).unwrap();
        assert_eq!(item.indent, 1);
    }
}
