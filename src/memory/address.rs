// Tue Oct 13 2026 - Alex

use std::fmt;
use std::ops::{Add, Sub};

/// Absolute position inside a byte source: a file offset for binaries, a
/// virtual address for process snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u64,
}

impl Address {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn is_within_range(&self, start: Self, end: Self) -> bool {
        self.value >= start.value && self.value < end.value
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.value)
    }
}

impl Add<u64> for Address {
    type Output = Self;
    fn add(self, rhs: u64) -> Self::Output {
        Self { value: self.value.saturating_add(rhs) }
    }
}

impl Sub<Address> for Address {
    type Output = u64;
    fn sub(self, rhs: Address) -> Self::Output {
        self.value.saturating_sub(rhs.value)
    }
}
