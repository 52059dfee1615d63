//! Single-file compress/decompress.

use crate::config::ArchiverConfig;
use crate::utils::{create_progress_bar, describe_owner};
use filetime::FileTime;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};
use xzarc_core::config::Direction;
use xzarc_core::error::{Result, XzarcError};
use xzarc_core::report::{FileSummary, ReportSummary, report};
use xzarc_core::suffix::output_path;

/// Result of one successfully transformed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Paths and sizes.
    pub summary: FileSummary,
    /// Reported ratio and removal.
    pub report: ReportSummary,
}

/// Transform `input` according to `config`, writing human-readable progress
/// and the session report to `out`.
///
/// The output path is derived and validated before any file is opened.
pub fn process_file<W: Write>(
    input: &Path,
    config: &ArchiverConfig,
    out: &mut W,
) -> Result<FileRecord> {
    let output = output_path(config.mode, input)?;

    let meta = fs::metadata(input).map_err(XzarcError::input)?;
    if !meta.is_file() {
        return Err(XzarcError::input(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", input.display()),
        )));
    }
    let input_size = meta.len();

    let reader = File::open(input).map_err(XzarcError::input)?;
    let mut writer = File::create(&output).map_err(XzarcError::output)?;

    if config.mode == Direction::Compress {
        writeln!(
            out,
            "Using compression level {}, extreme mode {}",
            config.compress.level.level(),
            config.compress.extreme
        )
        .map_err(XzarcError::output)?;
    }
    write!(
        out,
        "{} file {}, size {} bytes...",
        config.mode.verb(),
        input.display(),
        input_size
    )
    .map_err(XzarcError::output)?;
    out.flush().map_err(XzarcError::output)?;

    info!(input = %input.display(), output = %output.display(), mode = ?config.mode, "transforming");

    let pb = create_progress_bar(input_size, config.progress);
    let outcome = xzarc_xz::run_session(&config.session(), pb.wrap_read(reader), &mut writer);
    pb.finish_and_clear();
    drop(writer);

    let output_meta = fs::metadata(&output).ok();
    let output_size = output_meta
        .as_ref()
        .map(|m| m.len())
        .unwrap_or(outcome.bytes_out);

    if outcome.is_ok() {
        let mtime = FileTime::from_last_modification_time(&meta);
        if let Err(e) = filetime::set_file_mtime(&output, mtime) {
            warn!(output = %output.display(), error = %e, "cannot preserve modification time");
        }
    }

    let summary = FileSummary {
        input_path: input.to_path_buf(),
        output_path: output,
        input_size,
        output_size,
    };
    let report_summary =
        report(out, &outcome, &summary, config.remove_input).map_err(XzarcError::output)?;

    if config.verbose && outcome.is_ok() {
        if let Some(meta) = &output_meta {
            writeln!(out, "{}", describe_owner(meta)).map_err(XzarcError::output)?;
        }
    }

    outcome.result?;
    Ok(FileRecord {
        summary,
        report: report_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xzarc_core::config::CompressionLevel;
    use xzarc_core::error::StatusKind;

    fn text(len: usize) -> Vec<u8> {
        b"0123456789abcdef".iter().copied().cycle().take(len).collect()
    }

    #[test]
    fn test_compress_then_decompress() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.txt");
        let data = text(50_000);
        fs::write(&input, &data).unwrap();

        let mut config = ArchiverConfig::new(Direction::Compress);
        config.remove_input = true;
        let mut out = Vec::new();
        let record = process_file(&input, &config, &mut out).unwrap();

        let packed = dir.path().join("data.txt.xz");
        assert_eq!(record.summary.output_path, packed);
        assert_eq!(record.summary.input_size, 50_000);
        assert!(record.report.removed);
        assert!(!input.exists());
        assert!(record.report.ratio.unwrap() > 90);

        let text_out = String::from_utf8(out).unwrap();
        assert!(text_out.contains("Using compression level 5, extreme mode false"));
        assert!(text_out.contains("Compressing file"));
        assert!(text_out.contains("...Ok\n"));

        let config = ArchiverConfig::new(Direction::Decompress);
        let mut out = Vec::new();
        let record = process_file(&packed, &config, &mut out).unwrap();
        assert_eq!(record.summary.output_path, input);
        assert!(packed.exists());
        assert_eq!(fs::read(&input).unwrap(), data);
        assert!(String::from_utf8(out).unwrap().contains("decompression ratio +"));
    }

    #[test]
    fn test_extreme_level() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("level9");
        fs::write(&input, text(10_000)).unwrap();

        let config =
            ArchiverConfig::new(Direction::Compress).with_level(CompressionLevel::new(9));
        let mut out = Vec::new();
        process_file(&input, &config, &mut out).unwrap();
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("Using compression level 9, extreme mode true")
        );
        assert!(dir.path().join("level9.xz").exists());
    }

    #[test]
    fn test_suffix_rejected_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("already.xz");
        fs::write(&input, b"whatever").unwrap();

        let config = ArchiverConfig::new(Direction::Compress);
        let mut out = Vec::new();
        let err = process_file(&input, &config, &mut out).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Input);
        assert!(out.is_empty());
        assert!(!dir.path().join("already.xz.xz").exists());

        let plain = dir.path().join("plain.txt");
        fs::write(&plain, b"whatever").unwrap();
        let config = ArchiverConfig::new(Direction::Decompress);
        let err = process_file(&plain, &config, &mut out).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Input);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArchiverConfig::new(Direction::Compress);
        let mut out = Vec::new();
        let err = process_file(&dir.path().join("nope"), &config, &mut out).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Input);
        assert!(!dir.path().join("nope.xz").exists());
    }

    #[test]
    fn test_corrupt_archive_keeps_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.xz");
        fs::write(&input, b"this is not xz data").unwrap();

        let mut config = ArchiverConfig::new(Direction::Decompress);
        config.remove_input = true;
        let mut out = Vec::new();
        let err = process_file(&input, &config, &mut out).unwrap_err();

        assert_eq!(err.kind(), StatusKind::Decompress);
        assert!(input.exists());
        assert!(String::from_utf8(out).unwrap().ends_with("...Failed decompress\n"));
    }
}
