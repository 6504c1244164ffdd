use crate::backing::utf16_len;
use crate::range::Range;

use super::delimiters::{native_token, scan_native_token};
use super::{Annotatable, NativePrefixable, Position, Positionable, ReturnCompletable, parse_indent_suffix};

/// A checklist line: `checklist-N` token followed by `"- [ ] "` or `"- [x] "`.
/// The checkbox state lives inside the hidden prefix; toggling it is an
/// ordinary backing edit that reparses to the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub position: Position,
    pub indent: u8,
    pub checked: bool,
}

impl ChecklistItem {
    pub const KEYWORD_PREFIX: &'static str = "checklist-";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let token = scan_native_token(line)?;
        let indent = parse_indent_suffix(token.keyword.strip_prefix(Self::KEYWORD_PREFIX)?)?;
        let rest = line[token.byte_len..].strip_prefix("- [")?;
        let checked = match rest.as_bytes().first()? {
            b' ' => false,
            b'x' | b'X' => true,
            _ => return None,
        };
        rest[1..].strip_prefix("] ")?;
        let hidden_len = token.utf16_len + utf16_len("- [ ] ");
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: Range::new(range.location, hidden_len),
            visible_range: Range::new(range.location + hidden_len, range.length - hidden_len),
            position: Position::Single,
            indent,
            checked,
        })
    }

    #[must_use]
    pub fn native_representation(indent: u8, checked: bool) -> String {
        let state = if checked { 'x' } else { ' ' };
        format!(
            "{}- [{state}] ",
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

impl NativePrefixable for ChecklistItem {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Positionable for ChecklistItem {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Annotatable for ChecklistItem {}
impl ReturnCompletable for ChecklistItem {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<ChecklistItem> {
        let len = utf16_len(line);
        ChecklistItem::parse(line, Range::new(0, len), Range::new(0, len + 1))
    }

    #[test]
    fn parse_unchecked_item() {
        let item = parse("⧙checklist-0⧘- [ ] Todo").unwrap();
        assert!(!item.checked);
        // Token (13 units) plus "- [ ] ".
        assert_eq!(item.native_prefix_range, Range::new(0, 19));
        assert_eq!(item.visible_range, Range::new(19, 4));
    }

    #[test]
    fn parse_checked_item() {
        assert!(parse("⧙checklist-1⧘- [x] Done").unwrap().checked);
        assert!(parse("⧙checklist-1⧘- [X] Done").unwrap().checked);
    }

    #[test]
    fn reject_malformed_checkbox() {
        assert!(parse("⧙checklist-0⧘- [] Todo").is_none());
        assert!(parse("⧙checklist-0⧘- [y] Todo").is_none());
        assert!(parse("⧙checklist-0⧘- [ ]Todo").is_none());
    }

    #[test]
    fn native_representation_parses_back() {
        let line = format!("{}Todo", ChecklistItem::native_representation(0, true));
        let len = utf16_len(&line);
        let item = ChecklistItem::parse(&line, Range::new(0, len), Range::new(0, len)).unwrap();
        assert!(item.checked);
    }
}
