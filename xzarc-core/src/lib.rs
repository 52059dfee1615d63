//! # XZarc Core
//!
//! Core components for the XZarc file compressor.
//!
//! This crate provides everything between the command line and the codec:
//!
//! - [`pump`]: Bounded-memory stream pump driving a codec engine
//! - [`traits`]: The codec engine interface
//! - [`config`]: Session configuration (levels, checks, decoder flags, buffer size)
//! - [`report`]: Ratio computation, summary lines and input removal
//! - [`suffix`]: `.xz` output naming rules
//! - [`error`]: Error and status types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI (xzarc-cli)                                         │
//! │     flags, suffix rules, per-file loop, exit status     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Session (this crate)                                    │
//! │     PumpSession: read ▸ step ▸ drain ▸ write, Reporter  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec engine (xzarc-xz)                                 │
//! │     liblzma stream encoder/decoder behind CodecEngine   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use xzarc_core::config::Direction;
//! use xzarc_core::report::{format_ratio, ratio_percent};
//!
//! let ratio = ratio_percent(Direction::Compress, 1000, 400);
//! assert_eq!(ratio, Some(60));
//! assert_eq!(format_ratio(Direction::Compress, ratio), "-60%");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod pump;
pub mod report;
pub mod suffix;
pub mod traits;

// Re-exports for convenience
pub use config::{
    CodecConfig, CompressOptions, CompressionLevel, DEFAULT_BUFFER_SIZE, DecoderFlags,
    DecompressOptions, Direction, IntegrityCheck, SessionConfig,
};
pub use error::{EngineError, Result, StatusKind, XzarcError};
pub use pump::{PumpSession, TransformOutcome, run_session_with};
pub use report::{FileSummary, ReportSummary, format_ratio, ratio_percent, report};
pub use suffix::{XZ_SUFFIX, compressed_path, decompressed_path, has_xz_suffix, output_path};
pub use traits::{Action, CodecEngine, StepStatus};
