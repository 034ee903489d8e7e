// Wed Oct 14 2026 - Alex

use crate::memory::{MemoryError, MemoryRegion};
use std::borrow::Cow;

/// Anything that can hand out contiguous byte buffers to scan: a whole file
/// or the readable regions of a live process.
pub trait ByteSource {
    fn name(&self) -> &str;

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError>;

    /// Reads one region. Failures only concern that region; callers skip it
    /// and move on.
    fn read_region(&self, region: &MemoryRegion) -> Result<Cow<'_, [u8]>, MemoryError>;
}

/// In-memory source, handy for buffers that did not come from disk.
pub struct SliceSource<'a> {
    name: String,
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(name: &str, data: &'a [u8]) -> Self {
        Self {
            name: name.to_string(),
            data,
        }
    }
}

impl ByteSource for SliceSource<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        Ok(vec![super::binary::whole_file_region(self.data.len() as u64, &self.name)])
    }

    fn read_region(&self, region: &MemoryRegion) -> Result<Cow<'_, [u8]>, MemoryError> {
        let start = region.start().as_u64() as usize;
        let end = region.end().as_u64() as usize;
        self.data
            .get(start..end)
            .map(Cow::Borrowed)
            .ok_or(MemoryError::ReadFailed(region.start().as_u64()))
    }
}
