// Thu Oct 15 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid UI map JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid UI map: {0}")]
    Invalid(String),
}
