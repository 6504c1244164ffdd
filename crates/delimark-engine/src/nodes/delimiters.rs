use crate::backing::utf16_len;
use crate::range::Range;

/// Reserved character opening a native token. Never appears in user content;
/// the host editor is responsible for keeping it out of typed text. The engine
/// documents this as an assumption rather than policing every edit.
pub const LEAD: char = '⧙';

/// Reserved character closing a native token.
pub const TRAIL: char = '⧘';

/// Builds the hidden token for `keyword`, e.g. `⧙blockquote⧘`.
#[must_use]
pub fn native_token(keyword: &str) -> String {
    format!("{LEAD}{keyword}{TRAIL}")
}

/// A native token found at the start of a candidate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeToken<'a> {
    /// The text between the lead and trail markers.
    pub keyword: &'a str,
    /// Token length in UTF-16 code units, markers included.
    pub utf16_len: usize,
    /// Token length in bytes, markers included.
    pub byte_len: usize,
}

/// Scans `⧙keyword⧘` from the start of `line`.
#[must_use]
pub fn scan_native_token(line: &str) -> Option<NativeToken<'_>> {
    let rest = line.strip_prefix(LEAD)?;
    let end = rest.find(TRAIL)?;
    let keyword = &rest[..end];
    Some(NativeToken {
        keyword,
        utf16_len: 2 + utf16_len(keyword),
        byte_len: LEAD.len_utf8() + end + TRAIL.len_utf8(),
    })
}

/// Ranges produced by the shared block-prefix grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPrefix {
    /// The hidden region: delimiter token plus the visible-prefix literal.
    pub native_prefix_range: Range,
    /// The remainder of the candidate span.
    pub visible_range: Range,
}

/// The grammar every fixed-prefix block kind shares: the span must open with
/// the token wrapping exactly `keyword`, immediately followed by
/// `visible_prefix`. Returns `None` if either part is missing.
///
/// `range` is the candidate span of `line` in the backing string; `line` must
/// cover exactly that span.
#[must_use]
pub fn parse_block_prefix(
    line: &str,
    range: Range,
    keyword: &str,
    visible_prefix: &str,
) -> Option<BlockPrefix> {
    let token = scan_native_token(line)?;
    if token.keyword != keyword {
        return None;
    }
    let rest = &line[token.byte_len..];
    if !rest.starts_with(visible_prefix) {
        return None;
    }
    let hidden_len = token.utf16_len + utf16_len(visible_prefix);
    Some(BlockPrefix {
        native_prefix_range: Range::new(range.location, hidden_len),
        visible_range: Range::new(range.location + hidden_len, range.length - hidden_len),
    })
}
