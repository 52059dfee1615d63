//! XZarc CLI - streaming .xz compressor/decompressor
//!
//! Compresses each input file to `<file>.xz` or decompresses `<file>.xz` back
//! to `<file>`, one file at a time, with bounded memory.
//!
//! # Exit codes
//!
//! | Code | Meaning                     |
//! |------|-----------------------------|
//! | 0    | Success                     |
//! | 1    | Codec initialization failed |
//! | 2    | Input error                 |
//! | 3    | Output error                |
//! | 4    | Compression failed          |
//! | 5    | No mode selected            |
//! | 6    | Decompression failed        |
//! | 64   | Invalid command line        |
//!
//! Conflicting `-c`/`-d` flags report code 5, like a missing mode.

mod commands;
mod config;
mod utils;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use commands::run_batch;
use config::ArchiverConfig;
use std::path::PathBuf;
use xzarc_core::config::{CompressionLevel, Direction, IntegrityCheck};
use xzarc_core::error::XzarcError;

/// Exit code for command lines that cannot be parsed.
const USAGE_EXIT_CODE: i32 = 64;

#[derive(Parser)]
#[command(name = "xzarc")]
#[command(
    author,
    version,
    disable_version_flag = true,
    about = "XZarc - streaming .xz compressor/decompressor"
)]
#[command(long_about = "
XZarc compresses files into the .xz format and decompresses them back.
One of -c or -d is required.

Examples:
  xzarc -c notes.txt            writes notes.txt.xz
  xzarc -c -l9 -r big.log       level 9 (extreme), removes big.log afterwards
  xzarc -d notes.txt.xz         writes notes.txt
  xzarc -d --keep-going *.xz    continues past broken archives

Set XZARC_LOG=debug for diagnostic logging.
")]
struct Cli {
    /// Compression mode
    #[arg(short = 'c', long, conflicts_with = "decompress")]
    compress: bool,

    /// Decompression mode
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Compression level (0..9); levels above 5 enable extreme mode
    #[arg(
        short = 'l',
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    level: u8,

    /// Remove input files after success
    #[arg(short = 'r', long)]
    remove: bool,

    /// Integrity check stored when compressing
    #[arg(short = 'C', long, value_enum, default_value = "crc64")]
    check: CheckArg,

    /// Decoder memory limit in bytes
    #[arg(short = 'M', long)]
    memlimit: Option<u64>,

    /// Continue with remaining files after a failure
    #[arg(long)]
    keep_going: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,

    /// Print owner and mode of output files
    #[arg(long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'v', long)]
    version: bool,

    /// Input files
    #[arg(required_unless_present = "version")]
    files: Vec<PathBuf>,
}

/// Integrity check selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CheckArg {
    /// No check
    None,
    /// CRC-32
    Crc32,
    /// CRC-64 (default)
    Crc64,
    /// SHA-256
    Sha256,
}

impl From<CheckArg> for IntegrityCheck {
    fn from(check: CheckArg) -> Self {
        match check {
            CheckArg::None => IntegrityCheck::None,
            CheckArg::Crc32 => IntegrityCheck::Crc32,
            CheckArg::Crc64 => IntegrityCheck::Crc64,
            CheckArg::Sha256 => IntegrityCheck::Sha256,
        }
    }
}

impl Cli {
    fn mode(&self) -> Option<Direction> {
        match (self.compress, self.decompress) {
            (true, false) => Some(Direction::Compress),
            (false, true) => Some(Direction::Decompress),
            _ => None,
        }
    }

    fn archiver_config(&self, mode: Direction) -> ArchiverConfig {
        let mut config = ArchiverConfig::new(mode)
            .with_level(CompressionLevel::new(self.level))
            .with_check(self.check.into());
        if let Some(memlimit) = self.memlimit {
            config.decompress = config.decompress.with_memlimit(memlimit);
        }
        config.remove_input = self.remove;
        config.keep_going = self.keep_going;
        config.progress = self.progress;
        config.json = self.json;
        config.verbose = self.verbose;
        config
    }
}

/// Exit code for a command line clap rejected; 0 for help output.
fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::ArgumentConflict => XzarcError::Mode.exit_code(),
        _ => USAGE_EXIT_CODE,
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = usage_exit_code(&e);
            if code == 0 {
                e.exit();
            }
            let _ = e.print();
            std::process::exit(code);
        }
    };
    if cli.version {
        println!("XZarc ver. {}", env!("CARGO_PKG_VERSION"));
        return;
    }
    utils::init_logging();

    let Some(mode) = cli.mode() else {
        let err = XzarcError::Mode;
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    };

    let config = cli.archiver_config(mode);
    let stdout = std::io::stdout();
    let code = run_batch(&cli.files, &config, &mut stdout.lock());
    std::process::exit(code);
}
