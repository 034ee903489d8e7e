// Fri Oct 16 2026 - Alex

pub mod config;
pub mod memory;
pub mod extraction;
pub mod classify;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use memory::{BinaryImage, ByteSource, MemoryScanner, ProcessMemory, SliceSource};
pub use extraction::{PatternExtractor, SourceEncoding, Statement};
pub use classify::{CategorizedStatement, ClassifiedStatement, Disposition, Review, StatementKind};
pub use mapping::{correlate, Mapping, UiFieldMap};
pub use output::{JsonSerializer, ReportRenderer};
pub use pipeline::{Extraction, ExtractionPipeline};
