use crate::range::Range;

use super::delimiters::{native_token, scan_native_token};
use super::{NativePrefixable, Position, Positionable};

/// A code line: `code` token, or `code-<language>` carrying the language tag
/// in the keyword the way uploaded images carry their payload. No visible
/// prefix; the rest of the line is the code itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub position: Position,
    pub language: Option<String>,
}

impl CodeBlock {
    pub const KEYWORD: &'static str = "code";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let token = scan_native_token(line)?;
        let language = if token.keyword == Self::KEYWORD {
            None
        } else {
            let lang = token.keyword.strip_prefix("code-")?;
            if lang.is_empty() {
                return None;
            }
            Some(lang.to_string())
        };
        Some(Self {
            range,
            enclosing_range,
            native_prefix_range: Range::new(range.location, token.utf16_len),
            visible_range: Range::new(
                range.location + token.utf16_len,
                range.length - token.utf16_len,
            ),
            position: Position::Single,
            language,
        })
    }

    #[must_use]
    pub fn native_representation(language: Option<&str>) -> String {
        match language {
            Some(lang) => native_token(&format!("{}-{lang}", Self::KEYWORD)),
            None => native_token(Self::KEYWORD),
        }
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
        self.visible_range = self.visible_range.shifted(delta);
    }
}

impl NativePrefixable for CodeBlock {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Positionable for CodeBlock {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
