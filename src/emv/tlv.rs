//! Tag-length-value segments in the EMVCo merchant QR text layout
//!
//! Each segment is a 2-digit numeric tag, a 2-digit zero-padded decimal
//! length, then exactly that many bytes of value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value length expressible in a 2-digit length field
pub const MAX_VALUE_LEN: usize = 99;

/// A single tag-length-value segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Two-digit tag, e.g. `"26"`
    pub tag: String,
    /// Segment value; nested templates carry their serialised sub-segments here
    pub value: String,
}

impl Segment {
    /// Create a segment from a tag and a value.
    ///
    /// The caller guarantees a two-digit tag and a value of at most
    /// [`MAX_VALUE_LEN`] bytes; longer values produce a length field the
    /// stream cannot carry. Use [`Segment::try_new`] for unchecked input.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        let segment = Self {
            tag: tag.into(),
            value: value.into(),
        };
        debug_assert_eq!(segment.tag.len(), 2, "TLV tags are two digits");
        debug_assert!(segment.value.len() <= MAX_VALUE_LEN, "TLV value too long");
        segment
    }

    /// Create a segment, rejecting tags that are not two ASCII digits and
    /// values longer than [`MAX_VALUE_LEN`] bytes.
    pub fn try_new(tag: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        let value = value.into();
        if tag.len() != 2 || !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Tlv(format!("tag '{tag}' is not two digits")));
        }
        if value.len() > MAX_VALUE_LEN {
            return Err(Error::Tlv(format!(
                "segment {tag} value is {} bytes, limit is {MAX_VALUE_LEN}",
                value.len()
            )));
        }
        Ok(Self { tag, value })
    }

    /// Create a template segment whose value is the concatenation of `children`.
    pub fn template(tag: impl Into<String>, children: &[Segment]) -> Self {
        Self::new(tag, serialize(children))
    }

    /// Two-digit, zero-padded length field for this segment's value.
    pub fn length_field(&self) -> String {
        format!("{:02}", self.value.len())
    }

    /// Parse this segment's value as a nested TLV stream.
    pub fn children(&self) -> Result<Vec<Segment>> {
        parse(&self.value)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.tag, self.length_field(), self.value)
    }
}

/// Concatenate segments into their wire form.
pub fn serialize(segments: &[Segment]) -> String {
    segments.iter().map(Segment::to_string).collect()
}

/// Parse a TLV stream into its segments, in order.
///
/// Fails when a tag or length is not two ASCII digits or when a declared
/// length runs past the end of the input.
pub fn parse(input: &str) -> Result<Vec<Segment>> {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let header = bytes
            .get(pos..pos + 4)
            .ok_or_else(|| Error::Tlv(format!("truncated segment header at offset {pos}")))?;
        if !header.iter().all(u8::is_ascii_digit) {
            return Err(Error::Tlv(format!(
                "non-numeric tag or length at offset {pos}"
            )));
        }

        let tag = &input[pos..pos + 2];
        let len = usize::from(header[2] - b'0') * 10 + usize::from(header[3] - b'0');
        let start = pos + 4;
        let end = start + len;

        let value = input.get(start..end).ok_or_else(|| {
            Error::Tlv(format!(
                "segment {tag} declares {len} bytes but only {} remain",
                bytes.len().saturating_sub(start)
            ))
        })?;

        segments.push(Segment::new(tag, value));
        pos = end;
    }

    Ok(segments)
}

/// Find the first segment with `tag`.
pub fn find<'a>(segments: &'a [Segment], tag: &str) -> Option<&'a Segment> {
    segments.iter().find(|segment| segment.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::new("00", "01").to_string(), "000201");
        assert_eq!(Segment::new("58", "BD").to_string(), "5802BD");
        assert_eq!(Segment::new("05", "").to_string(), "0500");
    }

    #[test]
    fn test_try_new_enforces_limits() {
        let segment = Segment::try_new("62", "x".repeat(MAX_VALUE_LEN)).unwrap();
        assert_eq!(segment.length_field(), "99");

        assert!(matches!(
            Segment::try_new("62", "x".repeat(MAX_VALUE_LEN + 1)),
            Err(Error::Tlv(_))
        ));
        assert!(matches!(Segment::try_new("6", "BD"), Err(Error::Tlv(_))));
        assert!(matches!(Segment::try_new("5A", "BD"), Err(Error::Tlv(_))));
    }

    #[test]
    fn test_template_length_covers_children() {
        let template = Segment::template(
            "26",
            &[
                Segment::new("00", "com.bkash"),
                Segment::new("01", "01712345678"),
            ],
        );
        assert_eq!(template.value, "0009com.bkash011101712345678");
        assert_eq!(template.length_field(), "28");
    }

    #[test]
    fn test_parse_stream() {
        let segments = parse("0002010102125802BD").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new("00", "01"),
                Segment::new("01", "12"),
                Segment::new("58", "BD"),
            ]
        );
        assert_eq!(find(&segments, "58").map(|s| s.value.as_str()), Some("BD"));
        assert!(find(&segments, "54").is_none());
    }

    #[test]
    fn test_parse_nested() {
        let outer = parse("26280009com.bkash011101712345678").unwrap();
        let children = outer[0].children().unwrap();
        assert_eq!(children[0].value, "com.bkash");
        assert_eq!(children[1].tag, "01");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated() {
        assert!(matches!(parse("0002"), Err(Error::Tlv(_))));
        assert!(matches!(parse("00050"), Err(Error::Tlv(_))));
        assert!(matches!(parse("000201X"), Err(Error::Tlv(_))));
    }

    #[test]
    fn test_parse_non_numeric_header() {
        assert!(matches!(parse("AB0201"), Err(Error::Tlv(_))));
    }
}
