//! Run-wide settings built once from the command line.

use xzarc_core::config::{
    CompressOptions, CompressionLevel, DEFAULT_BUFFER_SIZE, DecompressOptions, Direction,
    IntegrityCheck, SessionConfig,
};

/// Settings shared by every file of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiverConfig {
    /// Transform direction.
    pub mode: Direction,
    /// Encoder settings, used when compressing.
    pub compress: CompressOptions,
    /// Decoder settings, used when decompressing.
    pub decompress: DecompressOptions,
    /// Delete each input after a successful transform.
    pub remove_input: bool,
    /// Continue with the remaining files after a failure.
    pub keep_going: bool,
    /// Show a progress bar per file.
    pub progress: bool,
    /// Print a JSON summary instead of text.
    pub json: bool,
    /// Print ownership and mode of each output file.
    pub verbose: bool,
    /// Staging buffer capacity.
    pub buffer_size: usize,
}

impl ArchiverConfig {
    /// Defaults for `mode`: level 5, CRC-64, unlimited decoder memory.
    pub fn new(mode: Direction) -> Self {
        Self {
            mode,
            compress: CompressOptions::from_level(CompressionLevel::DEFAULT),
            decompress: DecompressOptions::default(),
            remove_input: false,
            keep_going: false,
            progress: false,
            json: false,
            verbose: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the compression level; levels above 5 also select extreme mode.
    pub fn with_level(mut self, level: CompressionLevel) -> Self {
        let check = self.compress.check;
        self.compress = CompressOptions::from_level(level).with_check(check);
        self
    }

    /// Set the integrity check.
    pub fn with_check(mut self, check: IntegrityCheck) -> Self {
        self.compress.check = check;
        self
    }

    /// Session configuration for one file.
    pub fn session(&self) -> SessionConfig {
        let config = match self.mode {
            Direction::Compress => SessionConfig::compress(self.compress),
            Direction::Decompress => SessionConfig::decompress(self.decompress),
        };
        config.with_buffer_size(self.buffer_size)
    }
}
