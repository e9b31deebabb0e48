//! Permission policy value object
//!
//! Modes and ownership applied to every file and implicitly created
//! directory the committer writes.

/// Unix mode bits for promoted files and created directories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileModes {
    pub file: u32,
    pub dir: u32,
}

impl Default for FileModes {
    fn default() -> Self {
        Self {
            file: 0o664,
            dir: 0o755,
        }
    }
}

impl FileModes {
    /// Parse an octal mode string such as `664` or `0o755`
    pub fn parse_octal(value: &str) -> Option<u32> {
        let digits = value
            .trim()
            .trim_start_matches("0o")
            .trim_start_matches('0');
        if digits.is_empty() {
            return Some(0);
        }
        let mode = u32::from_str_radix(digits, 8).ok()?;
        (mode <= 0o7777).then_some(mode)
    }
}

/// Numeric owner/group to apply; `None` leaves that id untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ownership {
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

impl Ownership {
    pub fn is_noop(&self) -> bool {
        self.uid.is_none() && self.gid.is_none()
    }
}

/// Everything the committer applies to a promoted path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionPolicy {
    pub modes: FileModes,
    pub ownership: Ownership,
}
