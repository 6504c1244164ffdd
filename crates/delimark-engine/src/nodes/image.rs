use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::range::Range;

use super::delimiters::{native_token, scan_native_token};
use super::{Attachable, NativePrefixable};

/// Pixel dimensions reported by an uploaded image's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u64,
    pub height: u64,
}

/// An inline image attachment. Two backing forms:
///
/// - URL form: `⧙image⧘https://...`, where the rest of the span is the URL.
/// - Upload form: `⧙image-{...}⧘`, a JSON object embedded in the token with
///   optional `url`, `ci`, `width`, `height` keys.
///
/// Everything but the final code unit is hidden; that unit anchors the
/// placeholder the presentation layer renders.
#[derive(Debug, Clone, Eq)]
pub struct Image {
    pub range: Range,
    pub enclosing_range: Range,
    pub native_prefix_range: Range,
    pub identifier: String,
    pub url: Option<String>,
    pub size: Option<Size>,
}

impl Image {
    pub const KEYWORD: &'static str = "image";

    pub fn parse(line: &str, range: Range, enclosing_range: Range) -> Option<Self> {
        let token = scan_native_token(line)?;
        let native_prefix_range = Range::new(range.location, range.length.checked_sub(1)?);

        if token.keyword == Self::KEYWORD {
            let url = escape_spaces(&line[token.byte_len..]);
            if url.is_empty() {
                return None;
            }
            return Some(Self {
                range,
                enclosing_range,
                native_prefix_range,
                identifier: url.clone(),
                url: Some(url),
                size: None,
            });
        }

        // Upload form: the payload lives inside the token, and an attachment
        // claims its whole span or nothing.
        let payload = token.keyword.strip_prefix("image-")?;
        if token.byte_len != line.len() {
            return None;
        }
        let value: serde_json::Value = serde_json::from_str(payload).ok()?;
        let map = value.as_object()?;

        let url = map
            .get("url")
            .and_then(serde_json::Value::as_str)
            .map(escape_spaces);
        let ci = map.get("ci").and_then(serde_json::Value::as_str);

        // Some identifier is required.
        let identifier = ci.map(str::to_string).or_else(|| url.clone())?;

        let size = match (
            map.get("width").and_then(serde_json::Value::as_u64),
            map.get("height").and_then(serde_json::Value::as_u64),
        ) {
            (Some(width), Some(height)) => Some(Size { width, height }),
            _ => None,
        };

        Some(Self {
            range,
            enclosing_range,
            native_prefix_range,
            identifier,
            url,
            size,
        })
    }

    /// The backing text for the URL form.
    #[must_use]
    pub fn native_representation(url: &str) -> String {
        format!("{}{url}", native_token(Self::KEYWORD))
    }

    pub(crate) fn offset(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        self.enclosing_range = self.enclosing_range.shifted(delta);
        self.native_prefix_range = self.native_prefix_range.shifted(delta);
    }
}

fn escape_spaces(s: &str) -> String {
    s.replace(' ', "%20")
}

impl NativePrefixable for Image {
    fn native_prefix_range(&self) -> Range {
        self.native_prefix_range
    }
}

impl Attachable for Image {}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range
            && self.native_prefix_range == other.native_prefix_range
            && self.identifier == other.identifier
            && self.url == other.url
            && self.size == other.size
    }
}

/// Hashes the identifier alone. Weak by intent: images differing only in
/// `url` or `size` collide, which equality then distinguishes.
impl Hash for Image {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{DefaultHasher, Hash, Hasher};

    use crate::backing::utf16_len;

    use super::*;

    fn parse(line: &str) -> Option<Image> {
        let len = utf16_len(line);
        Image::parse(line, Range::new(0, len), Range::new(0, len + 1))
    }

    fn hash_of(image: &Image) -> u64 {
        let mut hasher = DefaultHasher::new();
        image.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn parse_url_form() {
        let image = parse("⧙image⧘https://example.com/a.png").unwrap();
        assert_eq!(image.identifier, "https://example.com/a.png");
        assert_eq!(image.url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(image.size, None);
        assert_eq!(image.native_prefix_range.length, image.range.length - 1);
    }

    #[test]
    fn url_form_escapes_spaces() {
        let image = parse("⧙image⧘http://x/y z.png").unwrap();
        assert_eq!(image.identifier, "http://x/y%20z.png");
    }

    #[test]
    fn reject_url_form_without_url() {
        assert!(parse("⧙image⧘").is_none());
    }

    #[test]
    fn upload_form_prefers_content_identifier() {
        let image = parse(r#"⧙image-{"ci": "abc"}⧘"#).unwrap();
        assert_eq!(image.identifier, "abc");
        assert_eq!(image.url, None);
    }

    #[test]
    fn upload_form_falls_back_to_escaped_url() {
        let image = parse(r#"⧙image-{"url": "http://x/y z.png"}⧘"#).unwrap();
        assert_eq!(image.identifier, "http://x/y%20z.png");
        assert_eq!(image.url.as_deref(), Some("http://x/y%20z.png"));
    }

    #[test]
    fn upload_form_without_identifier_fails() {
        assert!(parse("⧙image-{}⧘").is_none());
    }

    #[test]
    fn upload_form_with_undecodable_payload_fails() {
        assert!(parse("⧙image-not json⧘").is_none());
        assert!(parse(r#"⧙image-["list"]⧘"#).is_none());
    }

    #[test]
    fn upload_form_size_requires_both_dimensions() {
        let image = parse(r#"⧙image-{"ci": "a", "width": 10, "height": 20}⧘"#).unwrap();
        assert_eq!(
            image.size,
            Some(Size {
                width: 10,
                height: 20
            })
        );

        let missing = parse(r#"⧙image-{"ci": "a", "width": 10}⧘"#).unwrap();
        assert_eq!(missing.size, None);

        // Wrong-typed dimensions degrade to no size, they do not fail the parse.
        let stringy = parse(r#"⧙image-{"ci": "a", "width": "10", "height": 20}⧘"#).unwrap();
        assert_eq!(stringy.size, None);

        let negative = parse(r#"⧙image-{"ci": "a", "width": -1, "height": 20}⧘"#).unwrap();
        assert_eq!(negative.size, None);
    }

    #[test]
    fn upload_form_must_consume_whole_span() {
        assert!(parse(r#"⧙image-{"ci": "a"}⧘trailing"#).is_none());
    }

    #[test]
    fn equal_images_share_a_hash() {
        let a = parse(r#"⧙image-{"ci": "abc", "width": 1, "height": 2}⧘"#).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn size_breaks_equality_but_not_hash() {
        let a = parse(r#"⧙image-{"ci": "abc", "width": 1, "height": 2}⧘"#).unwrap();
        let mut b = a.clone();
        b.size = None;
        assert_ne!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
