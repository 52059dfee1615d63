//! Bounded-memory streaming pump.
//!
//! A [`PumpSession`] moves one whole stream through a [`CodecEngine`] using
//! exactly two staging buffers of fixed capacity, one for input and one for
//! output, no matter how large the stream is:
//!
//! ```text
//!   reader ──read──▶ [ in_buf ] ──step──▶ engine ──▶ [ out_buf ] ──write──▶ writer
//!                                           ▲              │
//!                                           └── drain ─────┘
//! ```
//!
//! Each input chunk is fed with [`Action::Continue`]; the zero-length read
//! at end of input is fed with [`Action::Finish`]. After every step the
//! produced bytes are written out, and the step is repeated while the engine
//! filled the whole output buffer, since it may still hold output for the
//! same chunk.

use crate::config::{Direction, SessionConfig};
use crate::error::{EngineError, Result, StatusKind, XzarcError};
use crate::report::ratio_percent;
use crate::traits::{Action, CodecEngine, StepStatus};
use std::io::{self, Read, Write};
use tracing::{debug, trace};

/// Final result of one session.
#[derive(Debug)]
pub struct TransformOutcome {
    /// Direction of the session.
    pub direction: Direction,
    /// `Ok` or the error that terminated the session.
    pub result: Result<()>,
    /// Bytes read from the input stream.
    pub bytes_in: u64,
    /// Bytes written to the output stream.
    pub bytes_out: u64,
}

impl TransformOutcome {
    /// Outcome of a session that failed before touching its streams.
    pub fn failed(direction: Direction, err: XzarcError) -> Self {
        Self {
            direction,
            result: Err(err),
            bytes_in: 0,
            bytes_out: 0,
        }
    }

    /// Whether the session completed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Terminal status kind.
    pub fn kind(&self) -> StatusKind {
        match &self.result {
            Ok(()) => StatusKind::Ok,
            Err(e) => e.kind(),
        }
    }

    /// The terminating error, if any.
    pub fn error(&self) -> Option<&XzarcError> {
        self.result.as_ref().err()
    }

    /// Exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        self.kind().code()
    }

    /// Ratio computed from the streamed byte counts.
    pub fn ratio(&self) -> Option<i64> {
        ratio_percent(self.direction, self.bytes_in, self.bytes_out)
    }

    /// Convert into a plain result carrying (bytes in, bytes out).
    pub fn into_result(self) -> Result<(u64, u64)> {
        self.result.map(|()| (self.bytes_in, self.bytes_out))
    }
}

/// What happened to one input chunk.
enum Feed {
    /// The engine took all input and stopped filling the output buffer.
    Drained { produced: usize },
    /// The engine reported end of stream; `leftover` input bytes were not consumed.
    StreamEnd { leftover: usize },
}

/// One file transform: an engine, two streams and two staging buffers.
pub struct PumpSession<E: CodecEngine, R: Read, W: Write> {
    direction: Direction,
    engine: E,
    reader: R,
    writer: W,
    in_buf: Box<[u8]>,
    out_buf: Box<[u8]>,
    bytes_in: u64,
    bytes_out: u64,
    eof: bool,
}

impl<E: CodecEngine, R: Read, W: Write> PumpSession<E, R, W> {
    /// Create a session with both buffers of `buffer_size` bytes (at least one).
    pub fn new(direction: Direction, engine: E, reader: R, writer: W, buffer_size: usize) -> Self {
        let capacity = buffer_size.max(1);
        Self {
            direction,
            engine,
            reader,
            writer,
            in_buf: vec![0u8; capacity].into_boxed_slice(),
            out_buf: vec![0u8; capacity].into_boxed_slice(),
            bytes_in: 0,
            bytes_out: 0,
            eof: false,
        }
    }

    /// Capacity of each staging buffer.
    pub fn capacity(&self) -> usize {
        self.in_buf.len()
    }

    /// Run the session to completion or first failure.
    ///
    /// The engine is released before this returns, on every path.
    pub fn run(mut self) -> TransformOutcome {
        debug!(
            direction = ?self.direction,
            capacity = self.capacity(),
            "session started"
        );

        let result = self
            .drive()
            .and_then(|()| self.writer.flush().map_err(XzarcError::output));
        self.engine.release();

        match &result {
            Ok(()) => debug!(
                bytes_in = self.bytes_in,
                bytes_out = self.bytes_out,
                "session finished"
            ),
            Err(e) => debug!(
                error = %e,
                bytes_in = self.bytes_in,
                bytes_out = self.bytes_out,
                "session failed"
            ),
        }

        TransformOutcome {
            direction: self.direction,
            result,
            bytes_in: self.bytes_in,
            bytes_out: self.bytes_out,
        }
    }

    fn drive(&mut self) -> Result<()> {
        // Finish passes in a row that produced nothing.
        let mut idle_finishes = 0u32;

        loop {
            let len = if self.eof { 0 } else { self.read_chunk()? };
            let action = if self.eof {
                Action::Finish
            } else {
                Action::Continue
            };

            match self.feed(len, action)? {
                Feed::StreamEnd { leftover } => {
                    if leftover > 0 || !self.at_end_of_input()? {
                        return Err(self.transform_error(EngineError::new(
                            "trailing data after end of stream",
                        )));
                    }
                    return Ok(());
                }
                Feed::Drained { produced } if action == Action::Finish => {
                    if produced > 0 {
                        idle_finishes = 0;
                        continue;
                    }
                    idle_finishes += 1;
                    if idle_finishes >= 2 {
                        return Err(self.transform_error(EngineError::new(
                            "unexpected end of input",
                        )));
                    }
                }
                Feed::Drained { .. } => {}
            }
        }
    }

    /// Read up to one buffer of input. Returns 0 at end of input.
    fn read_chunk(&mut self) -> Result<usize> {
        loop {
            match self.reader.read(&mut self.in_buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(0);
                }
                Ok(n) => {
                    self.bytes_in += n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(XzarcError::input(e)),
            }
        }
    }

    /// Whether the input stream holds no more bytes.
    fn at_end_of_input(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(true);
        }
        Ok(self.read_chunk()? == 0)
    }

    /// Feed `in_buf[..len]` to the engine and drain everything it produces.
    fn feed(&mut self, len: usize, action: Action) -> Result<Feed> {
        let direction = self.direction;
        let capacity = self.out_buf.len();
        let mut input = &self.in_buf[..len];
        let mut produced_total = 0usize;

        loop {
            let (consumed, produced, status) = self
                .engine
                .step(input, &mut self.out_buf, action)
                .map_err(|e| transform_error(direction, e))?;

            if consumed > input.len() || produced > capacity {
                return Err(transform_error(
                    direction,
                    EngineError::new("engine reported more bytes than it was given"),
                ));
            }
            input = &input[consumed..];

            trace!(consumed, produced, ?status, ?action, "engine step");

            if produced > 0 {
                self.writer
                    .write_all(&self.out_buf[..produced])
                    .map_err(XzarcError::output)?;
                self.bytes_out += produced as u64;
                produced_total += produced;
            }

            if status == StepStatus::StreamEnd {
                return Ok(Feed::StreamEnd {
                    leftover: input.len(),
                });
            }
            if produced == capacity {
                continue;
            }
            if input.is_empty() {
                return Ok(Feed::Drained {
                    produced: produced_total,
                });
            }
            if consumed == 0 && produced == 0 {
                return Err(transform_error(
                    direction,
                    EngineError::new("engine made no progress"),
                ));
            }
        }
    }

    fn transform_error(&self, err: EngineError) -> XzarcError {
        transform_error(self.direction, err)
    }
}

/// Attribute an engine failure to the session direction.
fn transform_error(direction: Direction, err: EngineError) -> XzarcError {
    match direction {
        Direction::Compress => XzarcError::Compress(err),
        Direction::Decompress => XzarcError::Decompress(err),
    }
}

/// Run a session with an engine built by `init`.
///
/// If `init` fails the outcome is an init failure and neither stream is
/// touched.
pub fn run_session_with<E, F, R, W>(
    config: &SessionConfig,
    init: F,
    reader: R,
    writer: W,
) -> TransformOutcome
where
    E: CodecEngine,
    F: FnOnce(&SessionConfig) -> Result<E>,
    R: Read,
    W: Write,
{
    let direction = config.direction();
    match init(config) {
        Ok(engine) => PumpSession::new(direction, engine, reader, writer, config.buffer_size).run(),
        Err(e) => {
            debug!(error = %e, "engine initialization failed");
            TransformOutcome::failed(direction, e)
        }
    }
}
