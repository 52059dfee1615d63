//! Output file naming by the `.xz` suffix convention.
//!
//! Compressing `name` writes `name.xz`; decompressing `name.xz` writes
//! `name`. Paths that would break the convention are rejected before any
//! file is opened.

use crate::config::Direction;
use crate::error::{Result, XzarcError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Suffix of compressed files.
pub const XZ_SUFFIX: &str = ".xz";

/// Whether the final path component ends in `.xz`.
pub fn has_xz_suffix(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("xz")) || path.file_name() == Some(OsStr::new(XZ_SUFFIX))
}

/// Output path for compressing `input`.
pub fn compressed_path(input: &Path) -> Result<PathBuf> {
    if has_xz_suffix(input) {
        return Err(XzarcError::suffix(input, "already has .xz suffix"));
    }
    if input.file_name().is_none() {
        return Err(XzarcError::suffix(input, "is not a file name"));
    }
    let mut name = input.as_os_str().to_os_string();
    name.push(XZ_SUFFIX);
    Ok(PathBuf::from(name))
}

/// Output path for decompressing `input`.
pub fn decompressed_path(input: &Path) -> Result<PathBuf> {
    // A bare ".xz" has no extension, so it lands here too.
    if input.extension() != Some(OsStr::new("xz")) {
        return Err(XzarcError::suffix(input, "has no .xz suffix"));
    }
    Ok(input.with_extension(""))
}

/// Output path for `input` in the given direction.
pub fn output_path(direction: Direction, input: &Path) -> Result<PathBuf> {
    match direction {
        Direction::Compress => compressed_path(input),
        Direction::Decompress => decompressed_path(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusKind;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("notes.txt")).unwrap(),
            PathBuf::from("notes.txt.xz")
        );
        assert_eq!(
            compressed_path(Path::new("dir/archive.tar")).unwrap(),
            PathBuf::from("dir/archive.tar.xz")
        );
    }

    #[test]
    fn test_compress_rejects_suffix() {
        let err = compressed_path(Path::new("notes.txt.xz")).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Input);
        assert!(compressed_path(Path::new("dir/.xz")).is_err());
        assert!(compressed_path(Path::new("..")).is_err());
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("notes.txt.xz")).unwrap(),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("dir/data.xz")).unwrap(),
            PathBuf::from("dir/data")
        );
    }

    #[test]
    fn test_decompress_rejects_missing_suffix() {
        assert!(decompressed_path(Path::new("notes.txt")).is_err());
        assert!(decompressed_path(Path::new("notes.XZ")).is_err());
        assert!(decompressed_path(Path::new("notes.xz.bak")).is_err());
        assert!(decompressed_path(Path::new(".xz")).is_err());
    }

    #[test]
    fn test_output_path_direction() {
        assert_eq!(
            output_path(Direction::Compress, Path::new("a")).unwrap(),
            PathBuf::from("a.xz")
        );
        assert_eq!(
            output_path(Direction::Decompress, Path::new("a.xz")).unwrap(),
            PathBuf::from("a")
        );
        assert!(has_xz_suffix(Path::new("a.xz")));
        assert!(!has_xz_suffix(Path::new("a.xzz")));
    }
}
