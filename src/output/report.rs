// Fri Oct 16 2026 - Alex

use crate::classify::{clean_query, Disposition, Review};
use crate::config::Config;
use crate::extraction::Statement;
use crate::output::ReportError;
use crate::utils::{format_bytes, preview};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub(crate) const RULE_WIDTH: usize = 80;

pub(crate) fn banner() -> String {
    "=".repeat(RULE_WIDTH)
}

pub(crate) fn divider() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Where an extraction came from, printed above the recovered statements.
#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    pub source: String,
    pub format: Option<String>,
    pub regions_scanned: usize,
    pub regions_failed: usize,
    pub bytes_scanned: u64,
    pub candidates: usize,
    pub sections: IndexMap<String, usize>,
}

/// Renders the plain-text artifacts: the extraction report, the review
/// report and the valid-statement export.
pub struct ReportRenderer {
    broken_sample_limit: usize,
    broken_preview_chars: usize,
    pub(crate) mapping_preview_chars: usize,
    pub(crate) detail_preview_chars: usize,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            broken_sample_limit: config.broken_sample_limit,
            broken_preview_chars: config.broken_preview_chars,
            mapping_preview_chars: config.mapping_preview_chars,
            detail_preview_chars: config.detail_preview_chars,
        }
    }

    pub fn with_broken_samples(mut self, limit: usize) -> Self {
        self.broken_sample_limit = limit;
        self
    }

    pub fn extraction_report(&self, statements: &[Statement], summary: Option<&ExtractionSummary>) -> String {
        let mut report = String::new();
        report.push_str(&banner());
        report.push_str("\nRecovered SQL statements\n");
        report.push_str(&banner());
        report.push_str("\n\n");

        if let Some(summary) = summary {
            report.push_str(&Self::summary_block(summary, statements.len()));
            report.push('\n');
        }

        if statements.is_empty() {
            report.push_str("No SQL queries found.\n");
            return report;
        }

        for statement in statements {
            report.push_str(&format!("\n[Query #{}] (encoding: {})", statement.ordinal, statement.encoding_tag()));
            if let Some(offset) = statement.origin_offset {
                report.push_str(&format!(" @ 0x{:x}", offset));
            }
            report.push('\n');
            Self::push_body(&mut report, &statement.text);
        }

        report
    }

    fn summary_block(summary: &ExtractionSummary, unique: usize) -> String {
        let mut block = String::new();
        block.push_str(&format!("Source:             {}\n", summary.source));
        if let Some(format) = &summary.format {
            block.push_str(&format!("Format:             {}\n", format));
        }
        block.push_str(&format!(
            "Regions scanned:    {} ({} failed)\n",
            summary.regions_scanned, summary.regions_failed
        ));
        block.push_str(&format!("Bytes scanned:      {}\n", format_bytes(summary.bytes_scanned)));
        block.push_str(&format!("Raw candidates:     {}\n", summary.candidates));
        block.push_str(&format!("Unique statements:  {}\n", unique));
        if !summary.sections.is_empty() {
            block.push_str("Statements by section:\n");
            for (section, count) in &summary.sections {
                block.push_str(&format!("  {}: {}\n", section, count));
            }
        }
        block
    }

    pub fn review_report(&self, review: &Review) -> String {
        let mut report = String::new();
        report.push_str(&banner());
        report.push_str("\nSQL review report\n");
        report.push_str(&banner());
        report.push_str("\n\n");

        report.push_str("## Statistics\n");
        report.push_str(&format!("Total statements: {}\n", review.total()));
        for disposition in [Disposition::Valid, Disposition::Broken, Disposition::Invalid] {
            report.push_str(&format!(
                "{:<8} {} ({:.1}%)\n",
                format!("{}:", disposition),
                review.count(disposition),
                review.percent(disposition)
            ));
        }
        report.push('\n');

        report.push_str("## Categories\n");
        for (kind, count) in review.category_counts() {
            report.push_str(&format!("  {}: {}\n", kind, count));
        }
        report.push('\n');

        report.push_str(&banner());
        report.push_str("\n## Valid statements\n");
        report.push_str(&banner());
        report.push_str("\n\n");

        for (i, statement) in review.valid().iter().enumerate() {
            report.push_str(&format!(
                "\n[Valid #{}] (source: Query #{}, encoding: {})\n",
                i + 1,
                statement.ordinal(),
                statement.classified.statement.encoding_tag()
            ));
            Self::push_body(&mut report, &clean_query(statement.text()));
        }

        report.push_str("\n\n");
        report.push_str(&banner());
        report.push_str(&format!("\n## Broken statements (first {})\n", self.broken_sample_limit));
        report.push_str(&banner());
        report.push_str("\n\n");

        for (i, statement) in review.broken().iter().take(self.broken_sample_limit).enumerate() {
            report.push_str(&format!(
                "\n[Broken #{}] (source: Query #{}, rule: {})\n",
                i + 1,
                statement.ordinal(),
                statement.rule
            ));
            Self::push_body(&mut report, &preview(statement.text(), self.broken_preview_chars));
        }

        report
    }

    /// Valid statements grouped by kind; the mapping step reads this back.
    pub fn valid_export(&self, review: &Review) -> String {
        let mut report = String::new();
        report.push_str(&banner());
        report.push_str("\nValid SQL statements\n");
        report.push_str(&banner());
        report.push_str("\n\n");

        for (kind, members) in review.by_kind() {
            report.push_str(&format!("\n{}\n", banner()));
            report.push_str(&format!("## {} ({})\n", kind, members.len()));
            report.push_str(&banner());
            report.push_str("\n\n");

            for (i, statement) in members.iter().enumerate() {
                report.push_str(&format!("\n[{} #{}]\n", kind, i + 1));
                Self::push_body(&mut report, &clean_query(statement.text()));
            }
        }

        report
    }

    pub(crate) fn push_body(report: &mut String, text: &str) {
        report.push_str(&divider());
        report.push('\n');
        report.push_str(text);
        report.push('\n');
        report.push_str(&divider());
        report.push('\n');
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, content: &str, path: P) -> Result<(), ReportError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::SourceEncoding;

    fn sample() -> Vec<Statement> {
        vec![
            Statement::new(1, "SELECT PCODE, PNAME FROM PERSON WHERE PNAME LIKE '%A%'")
                .with_encoding(SourceEncoding::Utf8)
                .with_offset(0x40),
            Statement::new(2, "SELECT").with_encoding(SourceEncoding::Binary),
            Statement::new(3, "TStringGrid1.Cells[0,0]").with_encoding(SourceEncoding::Latin1),
            Statement::new(4, "UPDATE PERSON SET PNAME = 'X',  SEX = 'M' WHERE PCODE = 1")
                .with_encoding(SourceEncoding::Cp949),
        ]
    }

    #[test]
    fn test_extraction_block_layout() {
        let report = ReportRenderer::new().extraction_report(&sample()[..1], None);
        let expected = format!(
            "\n[Query #1] (encoding: UTF-8) @ 0x40\n{d}\nSELECT PCODE, PNAME FROM PERSON WHERE PNAME LIKE '%A%'\n{d}\n",
            d = "-".repeat(80)
        );
        assert!(report.starts_with(&"=".repeat(80)));
        assert!(report.ends_with(&expected));
    }

    #[test]
    fn test_empty_extraction() {
        let report = ReportRenderer::new().extraction_report(&[], None);
        assert!(report.contains("No SQL queries found."));
        assert!(!report.contains("[Query #"));
    }

    #[test]
    fn test_summary_lists_sections() {
        let mut summary = ExtractionSummary {
            source: "DeskPro.exe".to_string(),
            regions_scanned: 1,
            ..Default::default()
        };
        summary.sections.insert(".rdata".to_string(), 3);
        let report = ReportRenderer::new().extraction_report(&sample(), Some(&summary));
        assert!(report.contains("Source:             DeskPro.exe"));
        assert!(report.contains("  .rdata: 3"));
        assert!(report.contains("Unique statements:  4"));
    }

    #[test]
    fn test_review_report_sections() {
        let review = Review::run(sample());
        let report = ReportRenderer::new().review_report(&review);
        assert!(report.contains("Total statements: 4"));
        assert!(report.contains("VALID:   2 (50.0%)"));
        assert!(report.contains("[Valid #2] (source: Query #4, encoding: CP949)"));
        assert!(report.contains("UPDATE PERSON SET PNAME = 'X', SEX = 'M' WHERE PCODE = 1"));
        assert!(report.contains("[Broken #1] (source: Query #2, rule: broken.bare_keyword)"));
        assert!(!report.contains("TStringGrid"));
    }

    #[test]
    fn test_broken_samples_are_capped_and_cut() {
        let statements: Vec<_> = (1..=3)
            .map(|i| Statement::new(i, format!("SELECT {} FROM", "X".repeat(600))))
            .collect();
        let review = Review::run(statements);
        let report = ReportRenderer::new().with_broken_samples(2).review_report(&review);
        assert!(report.contains("[Broken #2]"));
        assert!(!report.contains("[Broken #3]"));
        assert!(report.contains(&format!("SELECT {}...", "X".repeat(493))));
    }

    #[test]
    fn test_valid_export_groups_in_report_order() {
        let review = Review::run(vec![
            Statement::new(1, "SELECT A FROM PERSON"),
            Statement::new(2, "CREATE TABLE CARD ("),
            Statement::new(3, "SELECT B FROM CARD"),
        ]);
        let export = ReportRenderer::new().valid_export(&review);
        let create = export.find("## CREATE (1)").unwrap();
        let select = export.find("## SELECT (2)").unwrap();
        assert!(create < select);
        assert!(export.contains("[SELECT #2]\n"));
    }
}
