// Wed Oct 14 2026 - Alex

use crate::extraction::{DecodedText, RawCandidate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword-anchored statement shapes. Bodies are lazy and stop at the first
/// kind-specific terminator; `$` is a line end.
const TEXT_PATTERNS: [(&str, &str); 9] = [
    ("SELECT", r"(?ism)SELECT\s+.*?(?:FROM|WHERE|ORDER|GROUP|LIMIT|UNION)"),
    ("INSERT", r"(?ism)INSERT\s+INTO\s+.*?(?:VALUES|SELECT)"),
    ("UPDATE", r"(?ism)UPDATE\s+.*?SET\s+.*?(?:WHERE|$)"),
    ("DELETE", r"(?ism)DELETE\s+FROM\s+.*?(?:WHERE|$)"),
    ("CREATE TABLE", r"(?ism)CREATE\s+TABLE\s+.*?(?:\(|$)"),
    ("ALTER TABLE", r"(?ism)ALTER\s+TABLE\s+.*?(?:\(|$)"),
    ("DROP TABLE", r"(?ism)DROP\s+TABLE\s+.*?(?:\(|$)"),
    ("CREATE INDEX", r"(?ism)CREATE\s+INDEX\s+.*?(?:\(|$)"),
    ("PRAGMA", r"(?ism)PRAGMA\s+.*?(?:\(|$)"),
];

static COMPILED_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    TEXT_PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("statement pattern")))
        .collect()
});

pub struct TextExtractor {
    min_length: usize,
}

impl TextExtractor {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Runs every statement pattern over one decoded stream. Matches shorter
    /// than the minimum length (in characters) are keyword-only noise.
    pub fn extract(&self, decoded: &DecodedText) -> Vec<RawCandidate> {
        let mut candidates = Vec::new();

        for (kind, regex) in COMPILED_PATTERNS.iter() {
            let before = candidates.len();
            for m in regex.find_iter(&decoded.text) {
                let text = m.as_str().trim();
                if text.chars().count() >= self.min_length {
                    candidates.push(RawCandidate::new(text, decoded.encoding));
                }
            }
            if candidates.len() > before {
                log::trace!(
                    "{} {} candidates in {} text",
                    candidates.len() - before,
                    kind,
                    decoded.encoding
                );
            }
        }

        candidates
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::SourceEncoding;

    fn extract(text: &str) -> Vec<String> {
        let decoded = DecodedText {
            encoding: SourceEncoding::Utf8,
            text: text.to_string(),
        };
        TextExtractor::default()
            .extract(&decoded)
            .into_iter()
            .map(|c| c.text)
            .collect()
    }

    #[test]
    fn test_select_stops_at_first_terminator() {
        let found = extract("\0\0SELECT PCODE, PNAME FROM PERSON WHERE PCODE = 1\0");
        assert_eq!(found, vec!["SELECT PCODE, PNAME FROM".to_string()]);
    }

    #[test]
    fn test_update_runs_to_where() {
        let found = extract("UPDATE PERSON SET PNAME = :P WHERE PCODE = :C");
        assert_eq!(found, vec!["UPDATE PERSON SET PNAME = :P WHERE".to_string()]);
    }

    #[test]
    fn test_unterminated_update_runs_to_line_end() {
        let found = extract("junk UPDATE PERSON SET PNAME = 'A'\nnext line");
        assert_eq!(found, vec!["UPDATE PERSON SET PNAME = 'A'".to_string()]);
    }

    #[test]
    fn test_create_table_stops_at_paren() {
        let found = extract("create table CHECKPERSON (PCODE INTEGER)");
        assert_eq!(found, vec!["create table CHECKPERSON (".to_string()]);
    }

    #[test]
    fn test_short_matches_are_discarded() {
        assert!(extract("PRAGMA x").is_empty());
        assert_eq!(extract("PRAGMA abcd"), vec!["PRAGMA abcd".to_string()]);
    }

    #[test]
    fn test_no_keywords_no_candidates() {
        assert!(extract("TStringGrid1.Cells[0,0]").is_empty());
    }
}
