use std::sync::LazyLock;

use regex::Regex;

use crate::backing::utf16_len;
use crate::range::Range;

use super::delimiters::{native_token, scan_native_token};
use super::{Annotatable, NativePrefixable, Position, Positionable, ReturnCompletable, parse_indent_suffix};

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\. ").unwrap());

/// A numbered list line: `ordered-list-N` token followed by a visible
/// `"<number>. "` marker. The number is host-maintained text, not derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedListItem {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub position: Position,
    pub indent: u8,
    pub number: u32,
}

impl OrderedListItem {
    pub const KEYWORD_PREFIX: &'static str = "ordered-list-";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let token = scan_native_token(line)?;
        let indent = parse_indent_suffix(token.keyword.strip_prefix(Self::KEYWORD_PREFIX)?)?;
        let rest = &line[token.byte_len..];
        let m = NUMBER_PREFIX.captures(rest)?;
        let number: u32 = m[1].parse().ok()?;
        let hidden_len = token.utf16_len + utf16_len(&m[0]);
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: Range::new(range.location, hidden_len),
            visible_range: Range::new(range.location + hidden_len, range.length - hidden_len),
            position: Position::Single,
            indent,
            number,
        })
    }

    #[must_use]
    pub fn native_representation(indent: u8, number: u32) -> String {
        format!(
            "{}{number}. ",
            native_token(&format!("{}{indent}", Self::KEYWORD_PREFIX))
        )
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
        self.visible_range = self.visible_range.shifted(delta);
    }
}

impl NativePrefixable for OrderedListItem {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Positionable for OrderedListItem {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Annotatable for OrderedListItem {}
impl ReturnCompletable for OrderedListItem {}
