//! liblzma stream engine.
//!
//! [`XzEngine`] wraps an `xz2` [`Stream`] configured either as an easy
//! encoder or as a stream decoder, and exposes it through [`CodecEngine`].
//! The underlying `lzma_stream` is freed when the engine is released or
//! dropped, whichever comes first.

use tracing::debug;
use xz2::stream::{Action as LzmaAction, Check, Status, Stream};
use xzarc_core::config::{
    CodecConfig, CompressOptions, DecompressOptions, Direction, IntegrityCheck, SessionConfig,
};
use xzarc_core::error::{EngineError, Result, XzarcError};
use xzarc_core::traits::{Action, CodecEngine, StepStatus};

/// An `.xz` encoder or decoder.
pub struct XzEngine {
    stream: Option<Stream>,
    direction: Direction,
}

impl XzEngine {
    /// Create an encoder producing a single `.xz` stream.
    pub fn encoder(options: &CompressOptions) -> Result<Self> {
        let stream = Stream::new_easy_encoder(options.preset(), lzma_check(options.check))
            .map_err(|e| XzarcError::init(format!("cannot create encoder: {e}")))?;
        debug!(
            level = options.level.level(),
            extreme = options.extreme,
            check = options.check.name(),
            "xz encoder ready"
        );
        Ok(Self {
            stream: Some(stream),
            direction: Direction::Compress,
        })
    }

    /// Create a decoder for one or more concatenated `.xz` streams.
    pub fn decoder(options: &DecompressOptions) -> Result<Self> {
        let stream = Stream::new_stream_decoder(options.memlimit, options.flags.bits())
            .map_err(|e| XzarcError::init(format!("cannot create decoder: {e}")))?;
        debug!(
            memlimit = options.memlimit,
            flags = options.flags.bits(),
            "xz decoder ready"
        );
        Ok(Self {
            stream: Some(stream),
            direction: Direction::Decompress,
        })
    }

    /// Create the engine matching a session configuration.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        match &config.codec {
            CodecConfig::Compress(options) => Self::encoder(options),
            CodecConfig::Decompress(options) => Self::decoder(options),
        }
    }

    /// Direction this engine transforms in.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl CodecEngine for XzEngine {
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        action: Action,
    ) -> std::result::Result<(usize, usize, StepStatus), EngineError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(EngineError::released());
        };

        let before_in = stream.total_in();
        let before_out = stream.total_out();

        let status = stream
            .process(input, output, lzma_action(action))
            .map_err(|e| EngineError::new(e.to_string()))?;

        let consumed = (stream.total_in() - before_in) as usize;
        let produced = (stream.total_out() - before_out) as usize;

        match status {
            Status::Ok | Status::GetCheck => Ok((consumed, produced, StepStatus::Progress)),
            Status::StreamEnd => Ok((consumed, produced, StepStatus::StreamEnd)),
            // liblzma's LZMA_BUF_ERROR: two calls in a row without progress.
            Status::MemNeeded => Err(EngineError::new(match self.direction {
                Direction::Compress => "no progress possible",
                Direction::Decompress => "unexpected end of input",
            })),
        }
    }

    fn release(&mut self) {
        if self.stream.take().is_some() {
            debug!(direction = ?self.direction, "xz engine released");
        }
    }

    fn is_released(&self) -> bool {
        self.stream.is_none()
    }
}

fn lzma_action(action: Action) -> LzmaAction {
    match action {
        Action::Continue => LzmaAction::Run,
        Action::Finish => LzmaAction::Finish,
    }
}

fn lzma_check(check: IntegrityCheck) -> Check {
    match check {
        IntegrityCheck::None => Check::None,
        IntegrityCheck::Crc32 => Check::Crc32,
        IntegrityCheck::Crc64 => Check::Crc64,
        IntegrityCheck::Sha256 => Check::Sha256,
    }
}
