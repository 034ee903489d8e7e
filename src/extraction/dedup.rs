// Wed Oct 14 2026 - Alex

use crate::extraction::{RawCandidate, SourceEncoding, Statement};
use indexmap::IndexMap;
use serde::Serialize;

/// A candidate after collapsing identical text. The first occurrence decides
/// the encoding and offset that get reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueStatement {
    pub text: String,
    pub encoding: SourceEncoding,
    pub origin_offset: Option<u64>,
    pub occurrences: usize,
}

#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: IndexMap<String, UniqueStatement>,
    total: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the text had not been seen before.
    pub fn push(&mut self, candidate: RawCandidate) -> bool {
        self.total += 1;
        if let Some(existing) = self.seen.get_mut(&candidate.text) {
            existing.occurrences += 1;
            return false;
        }
        self.seen.insert(
            candidate.text.clone(),
            UniqueStatement {
                text: candidate.text,
                encoding: candidate.encoding,
                origin_offset: candidate.origin_offset,
                occurrences: 1,
            },
        );
        true
    }

    pub fn extend<I: IntoIterator<Item = RawCandidate>>(&mut self, candidates: I) {
        for candidate in candidates {
            self.push(candidate);
        }
    }

    /// Folds an already deduplicated statement back in, keeping its counts.
    pub fn merge(&mut self, statement: UniqueStatement) {
        self.total += statement.occurrences;
        match self.seen.get_mut(&statement.text) {
            Some(existing) => existing.occurrences += statement.occurrences,
            None => {
                self.seen.insert(statement.text.clone(), statement);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Number of candidates pushed, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn into_statements(self) -> Vec<UniqueStatement> {
        self.seen.into_values().collect()
    }
}

pub fn dedup<I: IntoIterator<Item = RawCandidate>>(candidates: I) -> Vec<UniqueStatement> {
    let mut dedup = Deduplicator::new();
    dedup.extend(candidates);
    dedup.into_statements()
}

/// Assigns 1-based ordinals in first-occurrence order.
pub fn number(statements: Vec<UniqueStatement>) -> Vec<Statement> {
    statements
        .into_iter()
        .enumerate()
        .map(|(i, s)| Statement {
            ordinal: i + 1,
            text: s.text,
            encoding: Some(s.encoding),
            origin_offset: s.origin_offset,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<RawCandidate> {
        vec![
            RawCandidate::new("SELECT A FROM", SourceEncoding::Utf16),
            RawCandidate::new("SELECT A FROM", SourceEncoding::Utf8),
            RawCandidate::new("DELETE FROM VAX2;", SourceEncoding::Binary).with_offset(0x40),
            RawCandidate::new("SELECT A FROM", SourceEncoding::Binary),
        ]
    }

    #[test]
    fn test_identical_text_collapses_across_encodings() {
        let unique = dedup(candidates());
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].text, "SELECT A FROM");
        assert_eq!(unique[0].encoding, SourceEncoding::Utf16);
        assert_eq!(unique[0].occurrences, 3);
        assert_eq!(unique[1].origin_offset, Some(0x40));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = dedup(candidates());
        let mut again = Deduplicator::new();
        for statement in once.clone() {
            again.merge(statement);
        }
        assert_eq!(again.into_statements(), once);
    }

    #[test]
    fn test_push_reports_novelty() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.push(RawCandidate::new("PRAGMA foo_bar", SourceEncoding::Utf8)));
        assert!(!dedup.push(RawCandidate::new("PRAGMA foo_bar", SourceEncoding::Cp949)));
        assert_eq!(dedup.len(), 1);
        assert_eq!(dedup.total(), 2);
    }

    #[test]
    fn test_numbering_is_one_based() {
        let numbered = number(dedup(candidates()));
        assert_eq!(numbered[0].ordinal, 1);
        assert_eq!(numbered[1].ordinal, 2);
        assert_eq!(numbered[1].encoding, Some(SourceEncoding::Binary));
    }
}
