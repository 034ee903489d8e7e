// Thu Oct 15 2026 - Alex

use crate::classify::{CategorizedStatement, ClassifiedStatement, Disposition, StatementKind};
use crate::extraction::Statement;
use indexmap::IndexMap;
use serde::Serialize;

/// One batch of statements partitioned by disposition. Valid statements
/// are categorized on the way in; order within each list is input order.
#[derive(Debug, Default, Clone)]
pub struct Review {
    total: usize,
    valid: Vec<CategorizedStatement>,
    broken: Vec<ClassifiedStatement>,
    invalid: Vec<ClassifiedStatement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewStatistics {
    pub total: usize,
    pub valid: usize,
    pub broken: usize,
    pub invalid: usize,
    pub valid_percent: f64,
    pub broken_percent: f64,
    pub invalid_percent: f64,
    pub categories: IndexMap<StatementKind, usize>,
}

impl Review {
    pub fn run<I>(statements: I) -> Self
    where
        I: IntoIterator<Item = Statement>,
    {
        let mut review = Self::default();
        for statement in statements {
            review.push(statement);
        }
        log::debug!(
            "Reviewed {} statements: {} valid, {} broken, {} invalid",
            review.total,
            review.valid.len(),
            review.broken.len(),
            review.invalid.len()
        );
        review
    }

    pub fn push(&mut self, statement: Statement) {
        self.total += 1;
        let classified = ClassifiedStatement::new(statement);
        log::trace!("Query #{} -> {} ({})", classified.ordinal(), classified.disposition, classified.rule);
        match classified.disposition {
            Disposition::Valid => self.valid.push(CategorizedStatement::new(classified)),
            Disposition::Broken => self.broken.push(classified),
            Disposition::Invalid => self.invalid.push(classified),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn valid(&self) -> &[CategorizedStatement] {
        &self.valid
    }

    pub fn broken(&self) -> &[ClassifiedStatement] {
        &self.broken
    }

    pub fn invalid(&self) -> &[ClassifiedStatement] {
        &self.invalid
    }

    pub fn into_valid(self) -> Vec<CategorizedStatement> {
        self.valid
    }

    pub fn count(&self, disposition: Disposition) -> usize {
        match disposition {
            Disposition::Valid => self.valid.len(),
            Disposition::Broken => self.broken.len(),
            Disposition::Invalid => self.invalid.len(),
        }
    }

    pub fn percent(&self, disposition: Disposition) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(disposition) as f64 / self.total as f64 * 100.0
    }

    /// Valid statements per kind, in export order. Kinds with no
    /// statements are left out.
    pub fn by_kind(&self) -> IndexMap<StatementKind, Vec<&CategorizedStatement>> {
        let mut groups = IndexMap::new();
        for kind in StatementKind::REPORT_ORDER {
            let members: Vec<_> = self.valid.iter().filter(|s| s.kind == kind).collect();
            if !members.is_empty() {
                groups.insert(kind, members);
            }
        }
        groups
    }

    pub fn category_counts(&self) -> IndexMap<StatementKind, usize> {
        self.by_kind().into_iter().map(|(kind, members)| (kind, members.len())).collect()
    }

    pub fn statistics(&self) -> ReviewStatistics {
        ReviewStatistics {
            total: self.total,
            valid: self.valid.len(),
            broken: self.broken.len(),
            invalid: self.invalid.len(),
            valid_percent: self.percent(Disposition::Valid),
            broken_percent: self.percent(Disposition::Broken),
            invalid_percent: self.percent(Disposition::Invalid),
            categories: self.category_counts(),
        }
    }
}
