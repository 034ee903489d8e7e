// Fri Oct 16 2026 - Alex

use crate::classify::{CategorizedStatement, ClassifiedStatement, Review, ReviewStatistics};
use crate::output::ReportError;
use serde::Serialize;
use serde_json::{to_string, to_string_pretty};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ReviewSummary<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub source: &'a str,
    pub statistics: ReviewStatistics,
    pub valid: &'a [CategorizedStatement],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broken: Option<&'a [ClassifiedStatement]>,
}

impl<'a> ReviewSummary<'a> {
    pub fn new(source: &'a str, review: &'a Review) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            source,
            statistics: review.statistics(),
            valid: review.valid(),
            broken: None,
        }
    }

    pub fn with_broken(mut self, review: &'a Review) -> Self {
        self.broken = Some(review.broken());
        self
    }
}

pub struct JsonSerializer {
    pretty_print: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty_print {
            to_string_pretty(value)?
        } else {
            to_string(value)?
        };
        Ok(json)
    }

    pub fn serialize_to_file<T: Serialize, P: AsRef<Path>>(&self, value: &T, path: P) -> Result<(), ReportError> {
        let json = self.serialize(value)?;
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}
