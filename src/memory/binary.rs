// Tue Oct 13 2026 - Alex

use crate::memory::{Address, ByteSource, MemoryError, MemoryRange, MemoryRegion, Protection};
use goblin::mach::Mach;
use goblin::Object;
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

enum Backing {
    Mapped(Mmap),
    Empty,
}

/// A binary image on disk, scanned as one contiguous buffer.
pub struct BinaryImage {
    backing: Backing,
    path: PathBuf,
    name: String,
    sections: Vec<BinarySection>,
    format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySection {
    pub name: String,
    pub offset: u64,
    pub size: u64,
}

impl BinarySection {
    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.offset && offset < self.offset.saturating_add(self.size)
    }
}

impl BinaryImage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let path_buf = path.as_ref().to_path_buf();
        let file = File::open(&path_buf)?;
        let len = file.metadata()?.len();

        let backing = if len == 0 {
            Backing::Empty
        } else {
            let mmap = unsafe { Mmap::map(&file) }?;
            Backing::Mapped(mmap)
        };

        let name = path_buf
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_buf.display().to_string());

        let mut image = Self {
            backing,
            path: path_buf,
            name,
            sections: Vec::new(),
            format: "raw",
        };
        let (format, sections) = parse_sections(image.as_slice());
        image.format = format;
        image.sections = sections;

        log::debug!(
            "Loaded {} ({} bytes, {} format, {} sections)",
            image.path.display(),
            image.len(),
            image.format,
            image.sections.len()
        );

        Ok(image)
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => mmap.as_ref(),
            Backing::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &'static str {
        self.format
    }

    pub fn sections(&self) -> &[BinarySection] {
        &self.sections
    }

    pub fn section_for(&self, offset: u64) -> Option<&str> {
        section_for(&self.sections, offset)
    }
}

impl ByteSource for BinaryImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        Ok(vec![whole_file_region(self.len() as u64, &self.name)])
    }

    fn read_region(&self, region: &MemoryRegion) -> Result<Cow<'_, [u8]>, MemoryError> {
        let start = region.start().as_u64() as usize;
        let end = region.end().as_u64() as usize;
        self.as_slice()
            .get(start..end)
            .map(Cow::Borrowed)
            .ok_or(MemoryError::ReadFailed(region.start().as_u64()))
    }
}

pub(crate) fn whole_file_region(len: u64, name: &str) -> MemoryRegion {
    MemoryRegion::new(
        MemoryRange::from_start_size(Address::new(0), len),
        Protection::Read,
        name.to_string(),
    )
}

pub fn section_for(sections: &[BinarySection], offset: u64) -> Option<&str> {
    sections
        .iter()
        .find(|s| s.contains(offset))
        .map(|s| s.name.as_str())
}

/// Lists file-backed sections of PE, ELF and Mach-O images. Anything goblin
/// cannot parse is scanned as a flat blob with no sections.
pub fn parse_sections(data: &[u8]) -> (&'static str, Vec<BinarySection>) {
    let object = match Object::parse(data) {
        Ok(object) => object,
        Err(e) => {
            log::debug!("Not a recognised executable container: {}", e);
            return ("raw", Vec::new());
        }
    };

    match object {
        Object::PE(pe) => {
            let sections = pe
                .sections
                .iter()
                .filter(|s| s.size_of_raw_data > 0)
                .map(|s| BinarySection {
                    name: s.name().unwrap_or("?").to_string(),
                    offset: s.pointer_to_raw_data as u64,
                    size: s.size_of_raw_data as u64,
                })
                .collect();
            ("pe", sections)
        }
        Object::Elf(elf) => {
            let sections = elf
                .section_headers
                .iter()
                .filter(|sh| sh.sh_type != goblin::elf::section_header::SHT_NOBITS && sh.sh_size > 0)
                .map(|sh| BinarySection {
                    name: elf.shdr_strtab.get_at(sh.sh_name).unwrap_or("?").to_string(),
                    offset: sh.sh_offset,
                    size: sh.sh_size,
                })
                .collect();
            ("elf", sections)
        }
        Object::Mach(Mach::Binary(macho)) => {
            let mut sections = Vec::new();
            for segment in &macho.segments {
                let segname = std::str::from_utf8(&segment.segname)
                    .unwrap_or("")
                    .trim_end_matches('\0');
                if segment.filesize == 0 {
                    continue;
                }
                sections.push(BinarySection {
                    name: segname.to_string(),
                    offset: segment.fileoff,
                    size: segment.filesize,
                });
            }
            ("mach-o", sections)
        }
        _ => ("raw", Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_blob_has_no_sections() {
        let (format, sections) = parse_sections(b"SELECT * FROM PERSON;");
        assert_eq!(format, "raw");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_section_lookup() {
        let sections = vec![
            BinarySection { name: ".text".to_string(), offset: 0x400, size: 0x200 },
            BinarySection { name: ".rdata".to_string(), offset: 0x600, size: 0x100 },
        ];
        assert_eq!(section_for(&sections, 0x400), Some(".text"));
        assert_eq!(section_for(&sections, 0x650), Some(".rdata"));
        assert_eq!(section_for(&sections, 0x700), None);
        assert_eq!(section_for(&sections, 0x10), None);
    }
}
