// Tue Oct 13 2026 - Alex

use crate::memory::{Address, ByteSource, MemoryError, MemoryRange, MemoryRegion, Protection};
use libc::pid_t;
use std::borrow::Cow;

const DEFAULT_MAX_REGION_SIZE: u64 = 0x1000_0000;

/// Pseudo-mappings the kernel exposes but refuses to hand over.
const SKIPPED_MAPPINGS: [&str; 2] = ["[vvar]", "[vsyscall]"];

/// Read-only view of a running process, scanned one mapped region at a time.
pub struct ProcessMemory {
    pid: pid_t,
    name: String,
    max_region_size: u64,
}

impl ProcessMemory {
    pub fn attach(pid: pid_t, name: &str) -> Result<Self, MemoryError> {
        if !cfg!(target_os = "linux") {
            return Err(MemoryError::NotSupported(
                "process memory scanning is only implemented for Linux".to_string(),
            ));
        }
        if !std::path::Path::new(&format!("/proc/{}", pid)).exists() {
            return Err(MemoryError::ProcessNotFound(format!("pid {} is not running", pid)));
        }
        Ok(Self {
            pid,
            name: name.to_string(),
            max_region_size: DEFAULT_MAX_REGION_SIZE,
        })
    }

    /// Attaches to the first process (lowest pid) whose name contains `name`.
    pub fn attach_by_name(name: &str) -> Result<Self, MemoryError> {
        let processes = Self::find_processes_by_name(name)?;
        match processes.into_iter().next() {
            Some((pid, process_name)) => {
                log::info!("Found process {} (pid {})", process_name, pid);
                Self::attach(pid, &process_name)
            }
            None => Err(MemoryError::ProcessNotFound(format!("Process '{}' not found", name))),
        }
    }

    pub fn with_max_region_size(mut self, max_region_size: u64) -> Self {
        self.max_region_size = max_region_size;
        self
    }

    pub fn pid(&self) -> pid_t {
        self.pid
    }

    #[cfg(target_os = "linux")]
    pub fn find_processes_by_name(name: &str) -> Result<Vec<(pid_t, String)>, MemoryError> {
        let needle = name.to_lowercase();
        let mut found = Vec::new();

        for entry in std::fs::read_dir("/proc")? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let pid: pid_t = match entry.file_name().to_string_lossy().parse() {
                Ok(pid) => pid,
                Err(_) => continue,
            };

            // Processes can exit between listing and reading.
            for candidate in process_names(pid) {
                if candidate.to_lowercase().contains(&needle) {
                    found.push((pid, candidate));
                    break;
                }
            }
        }

        found.sort_by_key(|(pid, _)| *pid);
        Ok(found)
    }

    #[cfg(not(target_os = "linux"))]
    pub fn find_processes_by_name(_name: &str) -> Result<Vec<(pid_t, String)>, MemoryError> {
        Err(MemoryError::NotSupported(
            "process enumeration is only implemented for Linux".to_string(),
        ))
    }

    pub fn enumerate_regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        let maps = std::fs::read_to_string(format!("/proc/{}/maps", self.pid)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                MemoryError::PermissionDenied(format!("cannot read maps of pid {}", self.pid))
            } else {
                MemoryError::Io(e)
            }
        })?;

        let mut regions = Vec::new();
        for line in maps.lines().filter(|l| !l.trim().is_empty()) {
            match parse_maps_line(line) {
                Ok(region) => regions.push(region),
                Err(e) => log::debug!("Skipping map entry: {}", e),
            }
        }
        Ok(regions)
    }

    #[cfg(target_os = "linux")]
    pub fn read_memory(&self, address: u64, size: usize) -> Result<Vec<u8>, MemoryError> {
        let mut buffer = vec![0u8; size];
        let local = libc::iovec {
            iov_base: buffer.as_mut_ptr() as *mut libc::c_void,
            iov_len: size,
        };
        let remote = libc::iovec {
            iov_base: address as *mut libc::c_void,
            iov_len: size,
        };

        let read = unsafe { libc::process_vm_readv(self.pid, &local, 1, &remote, 1, 0) };
        if read < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::PermissionDenied {
                return Err(MemoryError::PermissionDenied(format!(
                    "pid {} at 0x{:x}: {}",
                    self.pid, address, err
                )));
            }
            return Err(MemoryError::ReadFailed(address));
        }

        buffer.truncate(read as usize);
        Ok(buffer)
    }

    #[cfg(not(target_os = "linux"))]
    pub fn read_memory(&self, address: u64, _size: usize) -> Result<Vec<u8>, MemoryError> {
        Err(MemoryError::ReadFailed(address))
    }
}

impl ByteSource for ProcessMemory {
    fn name(&self) -> &str {
        &self.name
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        let regions = self
            .enumerate_regions()?
            .into_iter()
            .filter(|r| r.is_data())
            .filter(|r| !SKIPPED_MAPPINGS.contains(&r.name()))
            .filter(|r| r.size() > 0 && r.size() <= self.max_region_size)
            .collect();
        Ok(regions)
    }

    fn read_region(&self, region: &MemoryRegion) -> Result<Cow<'_, [u8]>, MemoryError> {
        self.read_memory(region.start().as_u64(), region.size() as usize)
            .map(Cow::Owned)
    }
}

#[cfg(target_os = "linux")]
fn process_names(pid: pid_t) -> Vec<String> {
    let mut names = Vec::new();
    if let Ok(comm) = std::fs::read_to_string(format!("/proc/{}/comm", pid)) {
        names.push(comm.trim().to_string());
    }
    // comm is truncated to 15 bytes; argv[0] keeps the full image name
    // (Wine shows `C:\...\DeskPro.exe` here).
    if let Ok(cmdline) = std::fs::read(format!("/proc/{}/cmdline", pid)) {
        if let Some(argv0) = cmdline.split(|&b| b == 0).next() {
            let argv0 = String::from_utf8_lossy(argv0);
            if let Some(base) = argv0.rsplit(['/', '\\']).next() {
                if !base.is_empty() {
                    names.push(base.to_string());
                }
            }
        }
    }
    names
}

fn next_field<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (field, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(field)
}

/// Parses one `/proc/<pid>/maps` line:
/// `00400000-00452000 r-xp 00000000 08:02 173521 /usr/bin/app`.
/// The path is everything after the inode and may contain spaces.
pub fn parse_maps_line(line: &str) -> Result<MemoryRegion, MemoryError> {
    let malformed = || MemoryError::MalformedMap(line.to_string());
    let mut rest = line;
    let range = next_field(&mut rest).ok_or_else(malformed)?;
    let perms = next_field(&mut rest).ok_or_else(malformed)?;

    let (start, end) = range.split_once('-').ok_or_else(malformed)?;
    let start = u64::from_str_radix(start, 16).map_err(|_| malformed())?;
    let end = u64::from_str_radix(end, 16).map_err(|_| malformed())?;

    // offset, device, inode
    for _ in 0..3 {
        next_field(&mut rest);
    }
    let path = rest.trim();
    let name = if path.is_empty() {
        format!("region_{:016x}", start)
    } else {
        path.to_string()
    };

    let range = MemoryRange::new(Address::new(start), Address::new(end))?;
    Ok(MemoryRegion::new(range, Protection::from_perms(perms), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maps_line_with_path() {
        let region =
            parse_maps_line("00400000-00452000 r-xp 00000000 08:02 173521 /usr/bin/dbus-daemon")
                .unwrap();
        assert_eq!(region.start().as_u64(), 0x400000);
        assert_eq!(region.size(), 0x52000);
        assert_eq!(region.name(), "/usr/bin/dbus-daemon");
        assert!(region.is_executable());
        assert!(!region.is_data());
    }

    #[test]
    fn test_parse_maps_line_path_with_spaces() {
        let region = parse_maps_line(
            "7f1c2a000000-7f1c2a021000 r--p 00000000 08:02 99120      /opt/Desk Pro/lib/clinic data.so (deleted)",
        )
        .unwrap();
        assert_eq!(region.name(), "/opt/Desk Pro/lib/clinic data.so (deleted)");
    }

    #[test]
    fn test_parse_maps_line_anonymous() {
        let region = parse_maps_line("7f0000001000-7f0000003000 rw-p 00000000 00:00 0").unwrap();
        assert_eq!(region.name(), "region_00007f0000001000");
        assert!(region.is_data());
    }

    #[test]
    fn test_parse_maps_line_rejects_garbage() {
        assert!(parse_maps_line("not a map line").is_err());
        assert!(parse_maps_line("2000-1000 r--p 0 0:0 0").is_err());
    }
}
