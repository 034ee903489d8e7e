// Fri Oct 16 2026 - Alex

use crate::classify::{CategorizedStatement, Review};
use crate::config::Config;
use crate::extraction::{number, Deduplicator, PatternExtractor, Statement};
use crate::mapping::{correlate, Mapping, UiFieldMap};
use crate::memory::{binary, BinaryImage, BinarySection, ByteSource, MemoryError, MemoryScanner, ScanStats};
use crate::output::ExtractionSummary;
use crate::utils::ScopedTimer;
use indexmap::IndexMap;

/// Everything one scan of a byte source produced.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub source: String,
    pub format: Option<String>,
    pub statements: Vec<Statement>,
    pub stats: ScanStats,
    pub candidates: usize,
    pub sections: IndexMap<String, usize>,
}

impl Extraction {
    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            source: self.source.clone(),
            format: self.format.clone(),
            regions_scanned: self.stats.regions_scanned,
            regions_failed: self.stats.regions_failed,
            bytes_scanned: self.stats.bytes_scanned,
            candidates: self.candidates,
            sections: self.sections.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Source bytes to numbered unique statements: scan every region, run both
/// extraction modes over it, and deduplicate across all of them.
pub struct ExtractionPipeline {
    extractor: PatternExtractor,
    scanner: MemoryScanner,
}

impl ExtractionPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: PatternExtractor::new(config),
            scanner: MemoryScanner::new().with_progress(config.enable_progress_bars),
        }
    }

    pub fn run<S: ByteSource + ?Sized>(&self, source: &S) -> Result<Extraction, MemoryError> {
        self.run_with_sections(source, &[])
    }

    pub fn run_binary(&self, image: &BinaryImage) -> Result<Extraction, MemoryError> {
        let mut extraction = self.run_with_sections(image, image.sections())?;
        extraction.format = Some(image.format().to_string());
        Ok(extraction)
    }

    fn run_with_sections<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        sections: &[BinarySection],
    ) -> Result<Extraction, MemoryError> {
        let _timer = ScopedTimer::new("extraction");
        let mut dedup = Deduplicator::new();

        let stats = self.scanner.scan(source, |region, data| {
            let candidates = self.extractor.extract_all(data, region.start().as_u64());
            log::debug!("{}: {} raw candidates", region, candidates.len());
            dedup.extend(candidates);
        })?;

        let candidates = dedup.total();
        let statements = number(dedup.into_statements());

        let mut section_counts: IndexMap<String, usize> = IndexMap::new();
        if !sections.is_empty() {
            for offset in statements.iter().filter_map(|s| s.origin_offset) {
                if let Some(name) = binary::section_for(sections, offset) {
                    *section_counts.entry(name.to_string()).or_insert(0) += 1;
                }
            }
        }

        log::info!(
            "{}: {} candidates, {} unique statements",
            source.name(),
            candidates,
            statements.len()
        );

        Ok(Extraction {
            source: source.name().to_string(),
            format: None,
            statements,
            stats,
            candidates,
            sections: section_counts,
        })
    }
}

/// Classifies and categorizes a batch of statements.
pub fn review(statements: Vec<Statement>) -> Review {
    let _timer = ScopedTimer::new("review");
    Review::run(statements)
}

pub fn map<'a>(ui_map: &'a UiFieldMap, statements: &'a [CategorizedStatement]) -> Vec<Mapping<'a>> {
    let _timer = ScopedTimer::new("mapping");
    correlate(ui_map, statements)
}
