//! # XZarc XZ
//!
//! `.xz` codec engine for XZarc, backed by liblzma through the `xz2` crate.
//!
//! The compression algorithm itself (LZMA2 match finding, range coding,
//! container framing and integrity checks) is liblzma's. This crate adapts
//! it to [`xzarc_core::CodecEngine`] and wires it into the stream pump.
//!
//! ## Usage
//!
//! ### Streaming a file
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//! use xzarc_core::{CompressOptions, SessionConfig};
//!
//! let input = BufReader::new(File::open("data.bin")?);
//! let output = BufWriter::new(File::create("data.bin.xz")?);
//! let config = SessionConfig::compress(CompressOptions::default());
//!
//! let outcome = xzarc_xz::run_session(&config, input, output);
//! println!("{} -> {} bytes: {}", outcome.bytes_in, outcome.bytes_out, outcome.kind());
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ### In memory
//!
//! ```
//! use xzarc_core::CompressOptions;
//!
//! let data = vec![0u8; 10_000];
//! let packed = xzarc_xz::compress(&data, CompressOptions::default()).unwrap();
//! assert!(packed.len() < 200);
//! assert_eq!(xzarc_xz::decompress(&packed).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;

pub use engine::XzEngine;

use std::io::{Read, Write};
use xzarc_core::config::{CompressOptions, DecompressOptions, SessionConfig};
use xzarc_core::error::Result;
use xzarc_core::pump::{TransformOutcome, run_session_with};

/// Run one transform from `reader` to `writer` with an engine built from
/// `config`.
///
/// An engine that cannot be created yields an init failure without touching
/// either stream.
pub fn run_session<R: Read, W: Write>(
    config: &SessionConfig,
    reader: R,
    writer: W,
) -> TransformOutcome {
    run_session_with(config, XzEngine::open, reader, writer)
}

/// Compress a byte slice into a new `.xz` stream.
pub fn compress(data: &[u8], options: CompressOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    run_session(&SessionConfig::compress(options), data, &mut output).into_result()?;
    Ok(output)
}

/// Decompress one or more concatenated `.xz` streams.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    run_session(
        &SessionConfig::decompress(DecompressOptions::default()),
        data,
        &mut output,
    )
    .into_result()?;
    Ok(output)
}
