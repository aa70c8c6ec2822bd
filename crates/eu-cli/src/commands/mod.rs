//! CLI command implementations

pub mod info;
pub mod ramp;
pub mod render;

use anyhow::{Context, Result};
use eu_io::PfmFile;
use std::path::Path;

/// Map a PFM file
pub fn open_pfm(path: &Path) -> Result<PfmFile> {
    PfmFile::open(path).with_context(|| format!("Failed to open: {}", path.display()))
}

/// Format file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
