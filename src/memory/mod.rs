// Tue Oct 13 2026 - Alex

pub mod scanner;
pub mod process;
pub mod binary;
pub mod region;
pub mod error;
pub mod traits;
pub mod address;
pub mod protection;
pub mod range;

pub use scanner::{MemoryScanner, ScanStats};
pub use process::ProcessMemory;
pub use binary::{BinaryImage, BinarySection};
pub use region::MemoryRegion;
pub use error::MemoryError;
pub use traits::{ByteSource, SliceSource};
pub use address::Address;
pub use protection::Protection;
pub use range::MemoryRange;
