use crate::range::Range;

use super::delimiters::{native_token, parse_block_prefix};
use super::{Annotatable, NativePrefixable, Position, Positionable, ReturnCompletable};

/// A quoted line: `blockquote` token followed by the visible `"> "` marker.
/// Both are stripped from presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blockquote {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub position: Position,
}

impl Blockquote {
    pub const KEYWORD: &'static str = "blockquote";
    pub const VISIBLE_PREFIX: &'static str = "> ";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let prefix = parse_block_prefix(line, range, Self::KEYWORD, Self::VISIBLE_PREFIX)?;
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: prefix.native_prefix_range,
            visible_range: prefix.visible_range,
            position: Position::Single,
        })
    }

    #[must_use]
    pub fn native_representation() -> String {
        format!("{}{}", native_token(Self::KEYWORD), Self::VISIBLE_PREFIX)
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
        self.visible_range = self.visible_range.shifted(delta);
    }
}

impl NativePrefixable for Blockquote {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Positionable for Blockquote {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Annotatable for Blockquote {}
impl ReturnCompletable for Blockquote {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backing::utf16_len;

    #[test]
    fn parse_blockquote_line() {
        let line = "⧙blockquote⧘> quoted";
        let len = utf16_len(line);
        let q = Blockquote::parse(line, Range::new(20, len), Range::new(20, len + 1)).unwrap();
        // Hidden prefix absorbs the token and the "> " marker.
        assert_eq!(q.native_prefix_range, Range::new(20, 14));
        assert_eq!(q.visible_range, Range::new(34, 6));
        assert_eq!(q.position, Position::Single);
    }

    #[test]
    fn reject_missing_marker() {
        let line = "⧙blockquote⧘quoted";
        let len = utf16_len(line);
        assert!(Blockquote::parse(line, Range::new(0, len), Range::new(0, len)).is_none());
    }

    #[test]
    fn native_representation_parses_back() {
        let line = Blockquote::native_representation();
        let len = utf16_len(&line);
        assert!(Blockquote::parse(&line, Range::new(0, len), Range::new(0, len)).is_some());
    }
}
