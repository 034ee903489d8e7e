// Thu Oct 15 2026 - Alex

pub mod error;
pub mod ui_map;
pub mod correlate;

pub use error::MappingError;
pub use ui_map::{UiElement, UiElementKind, UiFieldMap};
pub use correlate::{by_table, correlate, Mapping, MatchReason};
