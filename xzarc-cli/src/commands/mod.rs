//! Per-file driver for the XZarc CLI.

pub mod transform;

pub use transform::{FileRecord, process_file};

use crate::config::ArchiverConfig;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use tracing::error;
use xzarc_core::config::Direction;
use xzarc_core::error::{StatusKind, XzarcError};

/// JSON summary of one file.
#[derive(Debug, Serialize, Deserialize)]
struct FileReportJson {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    mode: String,
    status: String,
    exit_code: i32,
    input_size: u64,
    output_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<i64>,
    removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReportJson {
    fn from_record(mode: Direction, record: &FileRecord) -> Self {
        Self {
            input: record.summary.input_path.display().to_string(),
            output: Some(record.summary.output_path.display().to_string()),
            mode: mode.ratio_label().to_string(),
            status: StatusKind::Ok.to_string(),
            exit_code: 0,
            input_size: record.summary.input_size,
            output_size: record.summary.output_size,
            ratio: record.report.ratio,
            removed: record.report.removed,
            error: None,
        }
    }

    fn from_error(mode: Direction, input: &Path, err: &XzarcError) -> Self {
        Self {
            input: input.display().to_string(),
            output: None,
            mode: mode.ratio_label().to_string(),
            status: err.kind().to_string(),
            exit_code: err.exit_code(),
            input_size: 0,
            output_size: 0,
            ratio: None,
            removed: false,
            error: Some(err.to_string()),
        }
    }
}

/// Process `files` one after another.
///
/// Stops at the first failure unless `config.keep_going` is set. Returns the
/// exit code of the first failure, or 0.
pub fn run_batch<W: Write>(files: &[impl AsRef<Path>], config: &ArchiverConfig, out: &mut W) -> i32 {
    let mut exit_code = 0;
    let mut json_reports = Vec::new();

    for file in files {
        let path = file.as_ref();
        let result = if config.json {
            process_file(path, config, &mut io::sink())
        } else {
            process_file(path, config, out)
        };

        match result {
            Ok(record) => {
                if config.json {
                    json_reports.push(FileReportJson::from_record(config.mode, &record));
                }
            }
            Err(e) => {
                error!(input = %path.display(), error = %e, "file failed");
                if config.json {
                    json_reports.push(FileReportJson::from_error(config.mode, path, &e));
                } else {
                    eprintln!("Error: {}: {}", path.display(), e);
                }
                if exit_code == 0 {
                    exit_code = e.exit_code();
                }
                if !config.keep_going {
                    break;
                }
            }
        }
    }

    if config.json {
        match serde_json::to_string_pretty(&json_reports) {
            Ok(text) => {
                if let Err(e) = writeln!(out, "{}", text) {
                    error!(error = %e, "cannot write report");
                    if exit_code == 0 {
                        exit_code = XzarcError::output(e).exit_code();
                    }
                }
            }
            Err(e) => error!(error = %e, "cannot serialize report"),
        }
    }

    exit_code
}
