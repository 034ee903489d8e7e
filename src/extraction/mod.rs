// Wed Oct 14 2026 - Alex

pub mod candidate;
pub mod decoder;
pub mod text;
pub mod raw;
pub mod dedup;

pub use candidate::{ParseEncodingError, RawCandidate, SourceEncoding, Statement};
pub use decoder::{decode_lossy, decode_report, DecodedText, MultiEncodingDecoder};
pub use text::TextExtractor;
pub use raw::{printable_window, RawScanner, RAW_KEYWORDS};
pub use dedup::{dedup, number, Deduplicator, UniqueStatement};

use crate::config::Config;

/// Which scan produced a batch of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    Text,
    RawBytes,
}

/// Runs both scan modes over one buffer: the text patterns once per decoded
/// stream, and the raw keyword scan over the bytes themselves.
pub struct PatternExtractor {
    decoder: MultiEncodingDecoder,
    text: TextExtractor,
    raw: RawScanner,
}

impl PatternExtractor {
    pub fn new(config: &Config) -> Self {
        Self {
            decoder: MultiEncodingDecoder::with_encodings(config.encodings.clone()),
            text: TextExtractor::new(config.min_candidate_length),
            raw: RawScanner::new(config.window_before, config.window_after),
        }
    }

    pub fn extract(&self, data: &[u8], base: u64, mode: ExtractMode) -> Vec<RawCandidate> {
        match mode {
            ExtractMode::Text => self
                .decoder
                .decode(data)
                .iter()
                .flat_map(|decoded| self.text.extract(decoded))
                .collect(),
            ExtractMode::RawBytes => self.raw.scan(data, base),
        }
    }

    pub fn extract_all(&self, data: &[u8], base: u64) -> Vec<RawCandidate> {
        let mut candidates = self.extract(data, base, ExtractMode::Text);
        candidates.extend(self.extract(data, base, ExtractMode::RawBytes));
        candidates
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_raw_modes_disagree_on_unterminated_tail() {
        let data = b"\x00\x01UPDATE PERSON SET PNAME = 'A'";
        let extractor = PatternExtractor::default();

        let text = extractor.extract(data, 0, ExtractMode::Text);
        assert!(text.iter().any(|c| c.text == "UPDATE PERSON SET PNAME = 'A'"));

        let raw = extractor.extract(data, 0, ExtractMode::RawBytes);
        assert!(raw.is_empty());
    }

    #[test]
    fn test_every_text_encoding_contributes() {
        let candidates = PatternExtractor::default().extract_all(b"DELETE FROM VAX2 WHERE A = 1;", 0);
        for encoding in [SourceEncoding::Utf8, SourceEncoding::Latin1, SourceEncoding::Cp949, SourceEncoding::Binary] {
            assert!(
                candidates.iter().any(|c| c.encoding == encoding),
                "missing {}",
                encoding
            );
        }
    }
}
