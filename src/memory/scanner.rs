// Tue Oct 13 2026 - Alex

use crate::memory::{ByteSource, MemoryError, MemoryRegion};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub regions_total: usize,
    pub regions_scanned: usize,
    pub regions_failed: usize,
    pub bytes_scanned: u64,
}

/// Walks every region of a [`ByteSource`] in order and hands each snapshot to
/// a visitor. Unreadable regions are logged and skipped.
pub struct MemoryScanner {
    show_progress: bool,
}

impl MemoryScanner {
    pub fn new() -> Self {
        Self { show_progress: false }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn scan<S, F>(&self, source: &S, mut visit: F) -> Result<ScanStats, MemoryError>
    where
        S: ByteSource + ?Sized,
        F: FnMut(&MemoryRegion, &[u8]),
    {
        let regions = source.regions()?;
        let mut stats = ScanStats {
            regions_total: regions.len(),
            ..Default::default()
        };

        let progress = self.progress_bar(regions.len() as u64);

        for region in &regions {
            match source.read_region(region) {
                Ok(data) => {
                    log::trace!("Scanning {} ({} bytes)", region, data.len());
                    visit(region, &data);
                    stats.regions_scanned += 1;
                    stats.bytes_scanned += data.len() as u64;
                }
                Err(e) => {
                    log::warn!("Skipping region {}: {}", region, e);
                    stats.regions_failed += 1;
                }
            }
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        log::info!(
            "Scanned {}/{} regions of {} ({} bytes, {} failed)",
            stats.regions_scanned,
            stats.regions_total,
            source.name(),
            stats.bytes_scanned,
            stats.regions_failed
        );

        Ok(stats)
    }

    fn progress_bar(&self, len: u64) -> Option<ProgressBar> {
        if !self.show_progress || len <= 1 {
            return None;
        }
        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} regions")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        Some(pb)
    }
}

impl Default for MemoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Address, MemoryRange, Protection};
    use std::borrow::Cow;

    struct FlakySource;

    impl ByteSource for FlakySource {
        fn name(&self) -> &str {
            "flaky"
        }

        fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
            Ok((0..3)
                .map(|i| {
                    MemoryRegion::new(
                        MemoryRange::from_start_size(Address::new(i * 0x1000), 4),
                        Protection::ReadWrite,
                        format!("r{}", i),
                    )
                })
                .collect())
        }

        fn read_region(&self, region: &MemoryRegion) -> Result<Cow<'_, [u8]>, MemoryError> {
            if region.name() == "r1" {
                return Err(MemoryError::ReadFailed(region.start().as_u64()));
            }
            Ok(Cow::Owned(vec![b'A'; 4]))
        }
    }

    #[test]
    fn test_failed_region_is_skipped() {
        let mut seen = Vec::new();
        let stats = MemoryScanner::new()
            .scan(&FlakySource, |region, data| {
                seen.push((region.name().to_string(), data.len()));
            })
            .unwrap();

        assert_eq!(seen, vec![("r0".to_string(), 4), ("r2".to_string(), 4)]);
        assert_eq!(stats.regions_total, 3);
        assert_eq!(stats.regions_scanned, 2);
        assert_eq!(stats.regions_failed, 1);
        assert_eq!(stats.bytes_scanned, 8);
    }
}
