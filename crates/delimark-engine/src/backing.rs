use crate::range::Range;

/// Returns the UTF-16 length of `s` in code units.
#[must_use]
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// The backing string plus its cached UTF-16 length.
///
/// The engine addresses text exclusively in UTF-16 code units (the coordinate
/// space host editors use); this type owns the translation to the byte offsets
/// Rust strings are sliced by. Offsets landing inside a surrogate pair are a
/// caller bug and clamp to the following character boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingBuffer {
    text: String,
    len_utf16: usize,
}

impl BackingBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len_utf16 = utf16_len(&text);
        Self { text, len_utf16 }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len_utf16(&self) -> usize {
        self.len_utf16
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of the character containing UTF-16 offset `offset`.
    ///
    /// Offsets at or past the end map to the byte length.
    #[must_use]
    pub fn byte_offset(&self, offset: usize) -> usize {
        debug_assert!(offset <= self.len_utf16, "offset {offset} out of bounds");
        let mut units = 0usize;
        for (byte, ch) in self.text.char_indices() {
            if units >= offset {
                return byte;
            }
            units += ch.len_utf16();
        }
        self.text.len()
    }

    /// Slices the backing text by a UTF-16 range.
    #[must_use]
    pub fn slice(&self, range: Range) -> &str {
        let start = self.byte_offset(range.location);
        let end = self.byte_offset(range.end());
        &self.text[start..end]
    }

    /// Splices `replacement` over `range` and updates the cached length.
    pub fn replace_range(&mut self, range: Range, replacement: &str) {
        let start = self.byte_offset(range.location);
        let end = self.byte_offset(range.end());
        self.text.replace_range(start..end, replacement);
        self.len_utf16 = self.len_utf16 - range.length + utf16_len(replacement);
    }

    /// Converts sorted, disjoint UTF-16 ranges to byte ranges in one pass.
    #[must_use]
    pub fn byte_ranges(&self, ranges: &[Range]) -> Vec<std::ops::Range<usize>> {
        let mut bounds = Vec::with_capacity(ranges.len() * 2);
        for r in ranges {
            bounds.push(r.location);
            bounds.push(r.end());
        }
        let bytes = self.byte_offsets(&bounds);
        bytes.chunks(2).map(|pair| pair[0]..pair[1]).collect()
    }

    /// Maps a non-decreasing list of UTF-16 offsets to byte offsets in a
    /// single scan of the text.
    fn byte_offsets(&self, offsets: &[usize]) -> Vec<usize> {
        let mut out = Vec::with_capacity(offsets.len());
        let mut next = offsets.iter().copied().peekable();
        let mut units = 0usize;
        for (byte, ch) in self.text.char_indices() {
            while next.peek().is_some_and(|&o| o <= units) {
                next.next();
                out.push(byte);
            }
            units += ch.len_utf16();
        }
        for _ in next {
            out.push(self.text.len());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_len_counts_code_units() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("⧙x⧘"), 3); // BMP characters are one unit
        assert_eq!(utf16_len("🦀"), 2); // astral characters are two
    }

    #[test]
    fn byte_offset_tracks_multibyte_characters() {
        let buf = BackingBuffer::new("⧙ab⧘");
        assert_eq!(buf.byte_offset(0), 0);
        assert_eq!(buf.byte_offset(1), 3);
        assert_eq!(buf.byte_offset(3), 5);
        assert_eq!(buf.byte_offset(4), 8);
    }

    #[test]
    fn slice_by_utf16_range() {
        let buf = BackingBuffer::new("⧙blockquote⧘> hi");
        assert_eq!(buf.slice(Range::new(1, 10)), "blockquote");
        assert_eq!(buf.slice(Range::new(14, 2)), "hi");
    }

    #[test]
    fn replace_range_updates_length() {
        let mut buf = BackingBuffer::new("one two");
        buf.replace_range(Range::new(4, 3), "三");
        assert_eq!(buf.as_str(), "one 三");
        assert_eq!(buf.len_utf16(), 5);
    }

    #[test]
    fn replace_empty_range_inserts() {
        let mut buf = BackingBuffer::new("ab");
        buf.replace_range(Range::new(1, 0), "x");
        assert_eq!(buf.as_str(), "axb");
        assert_eq!(buf.len_utf16(), 3);
    }

    #[test]
    fn byte_ranges_single_pass_matches_individual_conversion() {
        let buf = BackingBuffer::new("⧙q⧘> a\n⧙q⧘> b");
        let ranges = [Range::new(0, 5), Range::new(7, 5)];
        let got = buf.byte_ranges(&ranges);
        assert_eq!(got.len(), 2);
        for (r, byte) in ranges.iter().zip(&got) {
            assert_eq!(byte.start, buf.byte_offset(r.location));
            assert_eq!(byte.end, buf.byte_offset(r.end()));
        }
    }

    #[test]
    fn byte_ranges_at_end_of_text() {
        let buf = BackingBuffer::new("ab");
        let got = buf.byte_ranges(&[Range::new(2, 0)]);
        assert_eq!(got, vec![2..2]);
    }
}
