//! Session reporting: ratios, summary lines and input removal.

use crate::config::Direction;
use crate::pump::TransformOutcome;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Size ratio of a finished transform, in whole percent.
///
/// Compression: `100 - round(100 * output / input)`, the size reduction.
/// Decompression: `100 - round(100 * input / output)`, the expansion.
///
/// Returns `None` when the denominator is zero.
pub fn ratio_percent(direction: Direction, input_size: u64, output_size: u64) -> Option<i64> {
    let (num, den) = match direction {
        Direction::Compress => (output_size, input_size),
        Direction::Decompress => (input_size, output_size),
    };
    if den == 0 {
        return None;
    }

    let (num, den) = (u128::from(num), u128::from(den));
    // Round half up without going through floating point.
    let scaled = (200 * num + den) / (2 * den);
    let ratio = 100i128 - scaled as i128;
    Some(i64::try_from(ratio).unwrap_or(i64::MIN))
}

/// Render a ratio with the sign convention of its direction.
///
/// A compression that shrank the data by 60% prints `-60%`; a decompression
/// that grew it back prints `+60%`.
pub fn format_ratio(direction: Direction, ratio: Option<i64>) -> String {
    let Some(ratio) = ratio else {
        return "n/a".to_string();
    };
    let shrink = match direction {
        Direction::Compress => ratio >= 0,
        Direction::Decompress => ratio < 0,
    };
    let sign = if shrink { '-' } else { '+' };
    format!("{}{}%", sign, ratio.unsigned_abs())
}

/// Paths and on-disk sizes of one transformed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Source path.
    pub input_path: PathBuf,
    /// Destination path.
    pub output_path: PathBuf,
    /// Source size in bytes.
    pub input_size: u64,
    /// Destination size in bytes.
    pub output_size: u64,
}

/// What [`report`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Ratio that was reported, if computable.
    pub ratio: Option<i64>,
    /// Whether the input file was deleted.
    pub removed: bool,
}

/// Write the status and size summary of a session to `out`, then remove the
/// input file if requested and the session succeeded.
///
/// Removal failures are written to `out` and logged; they do not fail the
/// report.
pub fn report<W: Write>(
    out: &mut W,
    outcome: &TransformOutcome,
    summary: &FileSummary,
    remove_input: bool,
) -> io::Result<ReportSummary> {
    writeln!(out, "{}", outcome.kind())?;

    if !outcome.is_ok() {
        return Ok(ReportSummary {
            ratio: None,
            removed: false,
        });
    }

    let ratio = ratio_percent(outcome.direction, summary.input_size, summary.output_size);
    writeln!(
        out,
        "Output file {}, size {} bytes, {} ratio {}",
        summary.output_path.display(),
        summary.output_size,
        outcome.direction.ratio_label(),
        format_ratio(outcome.direction, ratio)
    )?;

    let removed = remove_input && remove_file(out, &summary.input_path)?;

    Ok(ReportSummary { ratio, removed })
}

fn remove_file<W: Write>(out: &mut W, path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            writeln!(out, "Input file {} removed.", path.display())?;
            Ok(true)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove input file");
            writeln!(out, "Failed to remove input file {}: {}", path.display(), e)?;
            Ok(false)
        }
    }
}
