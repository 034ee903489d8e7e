// Wed Oct 14 2026 - Alex

use crate::extraction::{RawCandidate, SourceEncoding};
use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;

pub const RAW_KEYWORDS: [&[u8]; 10] = [
    b"SELECT",
    b"INSERT",
    b"UPDATE",
    b"DELETE",
    b"CREATE TABLE",
    b"ALTER TABLE",
    b"DROP TABLE",
    b"FROM",
    b"WHERE",
    b"PRAGMA",
];

/// `.` stays on one line here: a raw statement must end with `;` on the line
/// it started on.
static TERMINATED_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER|DROP|PRAGMA).*?;")
        .expect("terminated statement pattern")
});

/// Encoding-agnostic scan straight over the bytes. Every keyword hit opens a
/// window around it, which is flattened to printable ASCII and searched for a
/// `;`-terminated statement.
pub struct RawScanner {
    window_before: usize,
    window_after: usize,
}

impl RawScanner {
    pub fn new(window_before: usize, window_after: usize) -> Self {
        Self {
            window_before,
            window_after,
        }
    }

    /// `base` is the absolute address of `data[0]`, used for candidate offsets.
    pub fn scan(&self, data: &[u8], base: u64) -> Vec<RawCandidate> {
        let mut candidates = Vec::new();

        for keyword in RAW_KEYWORDS.iter() {
            let finder = memmem::Finder::new(keyword);
            let mut idx = 0;

            while idx < data.len() {
                let hit = match finder.find(&data[idx..]) {
                    Some(pos) => idx + pos,
                    None => break,
                };

                let start = hit.saturating_sub(self.window_before);
                let end = data.len().min(hit + self.window_after);
                let window = printable_window(&data[start..end]);

                if let Some(m) = TERMINATED_STATEMENT.find(&window) {
                    let text = m.as_str().trim();
                    if !text.is_empty() {
                        candidates.push(
                            RawCandidate::new(text, SourceEncoding::Binary)
                                .with_offset(base + (start + m.start()) as u64),
                        );
                    }
                }

                // One byte, not the keyword length: overlapping hits are
                // part of the observed behaviour.
                idx = hit + 1;
            }
        }

        candidates
    }
}

impl Default for RawScanner {
    fn default() -> Self {
        Self::new(50, 500)
    }
}

/// Maps each byte to itself when printable ASCII (TAB, LF and CR included)
/// and to a space otherwise, so byte and character offsets coincide.
pub fn printable_window(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if (32..127).contains(&b) || b == b'\t' || b == b'\n' || b == b'\r' {
                b as char
            } else {
                ' '
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_window() {
        assert_eq!(printable_window(b"A\x00B\tC\xff\n"), "A B\tC \n");
    }

    #[test]
    fn test_terminated_statement_is_found_with_offset() {
        let mut data = vec![0u8; 16];
        data.extend_from_slice(b"SELECT PNAME FROM PERSON;");
        data.extend_from_slice(&[0u8; 8]);

        let found = RawScanner::default().scan(&data, 0x1000);
        assert!(!found.is_empty());
        for candidate in &found {
            assert_eq!(candidate.text, "SELECT PNAME FROM PERSON;");
            assert_eq!(candidate.encoding, SourceEncoding::Binary);
            assert_eq!(candidate.origin_offset, Some(0x1000 + 16));
        }
        // SELECT and FROM both hit the same statement.
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_unterminated_statement_yields_nothing() {
        let found = RawScanner::default().scan(b"\x00UPDATE PERSON SET PNAME = 'A'", 0);
        assert!(found.is_empty());
    }

    #[test]
    fn test_terminator_must_be_on_same_line() {
        let found = RawScanner::default().scan(b"DELETE FROM VAX2\nWHERE X = 1;", 0);
        // WHERE opens windows too, but is not a statement keyword itself.
        assert!(found.is_empty());
    }

    #[test]
    fn test_window_is_bounded_after_hit() {
        let mut data = b"SELECT ".to_vec();
        data.extend(std::iter::repeat(b'x').take(600));
        data.push(b';');
        let found = RawScanner::default().scan(&data, 0);
        assert!(found.is_empty());
    }
}
