// Tue Oct 13 2026 - Alex

use crate::memory::{Address, MemoryError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRange {
    start: Address,
    end: Address,
}

impl MemoryRange {
    pub fn new(start: Address, end: Address) -> Result<Self, MemoryError> {
        if end < start {
            return Err(MemoryError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn from_start_size(start: Address, size: u64) -> Self {
        Self {
            start,
            end: start + size,
        }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> Address {
        self.end
    }

    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.is_within_range(self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(MemoryRange::new(Address::new(0x20), Address::new(0x10)).is_err());
    }

    #[test]
    fn test_range_contains_is_half_open() {
        let range = MemoryRange::from_start_size(Address::new(0x1000), 0x100);
        assert_eq!(range.size(), 0x100);
        assert!(range.contains(Address::new(0x1000)));
        assert!(range.contains(Address::new(0x10ff)));
        assert!(!range.contains(Address::new(0x1100)));
    }
}
