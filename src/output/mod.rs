// Fri Oct 16 2026 - Alex

pub mod error;
pub mod report;
pub mod parser;
pub mod mapping;
pub mod json;

pub use error::ReportError;
pub use report::{ExtractionSummary, ReportRenderer};
pub use parser::{
    parse_extraction_report, parse_valid_export, read_extraction_report, read_valid_export, ExportEntry,
};
pub use json::{JsonSerializer, ReviewSummary};
