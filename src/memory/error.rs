// Tue Oct 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Process not found: {0}")]
    ProcessNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Read failed at address 0x{0:x}")]
    ReadFailed(u64),
    #[error("Invalid memory range")]
    InvalidRange,
    #[error("Malformed region map entry: {0}")]
    MalformedMap(String),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
