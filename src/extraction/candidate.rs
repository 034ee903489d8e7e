// Wed Oct 14 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where a candidate's text came from: one of the text decodings of the
/// buffer, or the printable-byte view used by the raw scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceEncoding {
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-16")]
    Utf16,
    #[serde(rename = "CP949")]
    Cp949,
    #[serde(rename = "LATIN-1")]
    Latin1,
    #[serde(rename = "BINARY")]
    Binary,
}

impl SourceEncoding {
    /// Text decodings tried on every buffer, in order.
    pub const TEXT_ENCODINGS: [SourceEncoding; 4] = [
        SourceEncoding::Utf8,
        SourceEncoding::Utf16,
        SourceEncoding::Cp949,
        SourceEncoding::Latin1,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Cp949 => "CP949",
            Self::Latin1 => "LATIN-1",
            Self::Binary => "BINARY",
        }
    }

    pub fn is_text(self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown encoding tag: {0}")]
pub struct ParseEncodingError(pub String);

impl FromStr for SourceEncoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "UTF8" => Ok(Self::Utf8),
            "UTF16" | "UTF16LE" => Ok(Self::Utf16),
            "CP949" | "EUCKR" => Ok(Self::Cp949),
            "LATIN1" | "ISO88591" => Ok(Self::Latin1),
            "BINARY" => Ok(Self::Binary),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

/// A substring suspected of being a SQL statement, as produced by one scan pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub text: String,
    pub encoding: SourceEncoding,
    pub origin_offset: Option<u64>,
}

impl RawCandidate {
    pub fn new(text: impl Into<String>, encoding: SourceEncoding) -> Self {
        Self {
            text: text.into(),
            encoding,
            origin_offset: None,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.origin_offset = Some(offset);
        self
    }
}

/// A numbered statement as it appears in a report: freshly deduplicated, or
/// parsed back from a previously rendered extraction report. The encoding is
/// unknown when a report block carried no recognisable tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub ordinal: usize,
    pub text: String,
    pub encoding: Option<SourceEncoding>,
    pub origin_offset: Option<u64>,
}

impl Statement {
    pub fn new(ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            text: text.into(),
            encoding: None,
            origin_offset: None,
        }
    }

    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.origin_offset = Some(offset);
        self
    }

    pub fn encoding_tag(&self) -> &'static str {
        self.encoding.map(SourceEncoding::tag).unwrap_or("UNKNOWN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_tags_parse_loosely() {
        assert_eq!("UTF-8".parse::<SourceEncoding>(), Ok(SourceEncoding::Utf8));
        assert_eq!("utf8".parse::<SourceEncoding>(), Ok(SourceEncoding::Utf8));
        assert_eq!("utf-16".parse::<SourceEncoding>(), Ok(SourceEncoding::Utf16));
        assert_eq!("cp949".parse::<SourceEncoding>(), Ok(SourceEncoding::Cp949));
        assert_eq!("latin-1".parse::<SourceEncoding>(), Ok(SourceEncoding::Latin1));
        assert_eq!(" BINARY ".parse::<SourceEncoding>(), Ok(SourceEncoding::Binary));
        assert!("EBCDIC".parse::<SourceEncoding>().is_err());
    }

    #[test]
    fn test_tag_round_trips() {
        for encoding in SourceEncoding::TEXT_ENCODINGS.iter().chain([SourceEncoding::Binary].iter()) {
            assert_eq!(encoding.tag().parse::<SourceEncoding>().unwrap(), *encoding);
        }
    }

    #[test]
    fn test_unknown_encoding_tag() {
        assert_eq!(Statement::new(1, "x").encoding_tag(), "UNKNOWN");
        assert_eq!(
            Statement::new(1, "x").with_encoding(SourceEncoding::Cp949).encoding_tag(),
            "CP949"
        );
    }
}
