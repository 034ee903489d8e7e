// Tue Oct 13 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    None = 0,
    Read = 1,
    Write = 2,
    Execute = 4,
    ReadWrite = 3,
    ReadExecute = 5,
    ReadWriteExecute = 7,
}

impl Protection {
    pub fn from_flags(flags: u32) -> Self {
        match flags & 7 {
            1 => Self::Read,
            2 => Self::Write,
            3 => Self::ReadWrite,
            4 => Self::Execute,
            5 => Self::ReadExecute,
            7 => Self::ReadWriteExecute,
            _ => Self::None,
        }
    }

    /// Parses the permission column of a `/proc/<pid>/maps` line (`rw-p`).
    pub fn from_perms(perms: &str) -> Self {
        let bytes = perms.as_bytes();
        let mut flags = 0;
        if bytes.first() == Some(&b'r') {
            flags |= 1;
        }
        if bytes.get(1) == Some(&b'w') {
            flags |= 2;
        }
        if bytes.get(2) == Some(&b'x') {
            flags |= 4;
        }
        Self::from_flags(flags)
    }

    pub fn can_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite | Self::ReadExecute | Self::ReadWriteExecute)
    }

    pub fn can_execute(self) -> bool {
        matches!(self, Self::Execute | Self::ReadExecute | Self::ReadWriteExecute)
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "---"),
            Self::Read => write!(f, "r--"),
            Self::Write => write!(f, "-w-"),
            Self::Execute => write!(f, "--x"),
            Self::ReadWrite => write!(f, "rw-"),
            Self::ReadExecute => write!(f, "r-x"),
            Self::ReadWriteExecute => write!(f, "rwx"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_perms() {
        assert_eq!(Protection::from_perms("r--p"), Protection::Read);
        assert_eq!(Protection::from_perms("rw-p"), Protection::ReadWrite);
        assert_eq!(Protection::from_perms("r-xp"), Protection::ReadExecute);
        assert_eq!(Protection::from_perms("---p"), Protection::None);
        assert_eq!(Protection::from_perms(""), Protection::None);
    }
}
