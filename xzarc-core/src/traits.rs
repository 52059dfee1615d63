//! Codec engine interface driven by the stream pump.
//!
//! An engine is a stateful transform: it is handed a slice of input and a
//! slice of output space, and reports how much of each it used. The pump
//! never looks inside the engine beyond these counts and the
//! [`Action`]/[`StepStatus`] vocabulary.

use crate::error::EngineError;

/// Whether more input will follow the current chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// More input chunks will follow.
    #[default]
    Continue,
    /// This is the last input; flush all pending state and end the stream.
    Finish,
}

/// Outcome of a successful engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step made whatever progress it could; call again with more input
    /// or more output space.
    Progress,
    /// The stream is complete; no further output will be produced.
    StreamEnd,
}

/// A streaming encoder or decoder.
pub trait CodecEngine {
    /// Run one transform step.
    ///
    /// # Arguments
    ///
    /// * `input` - Input bytes available to the engine
    /// * `output` - Output space available to the engine
    /// * `action` - Whether `input` is the last data of the stream
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status)
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        action: Action,
    ) -> Result<(usize, usize, StepStatus), EngineError>;

    /// Free the engine's internal state.
    ///
    /// Must be idempotent. Steps after release fail with
    /// [`EngineError::released`].
    fn release(&mut self);

    /// Whether [`release`](Self::release) has been called.
    fn is_released(&self) -> bool;
}

impl<E: CodecEngine + ?Sized> CodecEngine for Box<E> {
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        action: Action,
    ) -> Result<(usize, usize, StepStatus), EngineError> {
        (**self).step(input, output, action)
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn is_released(&self) -> bool {
        (**self).is_released()
    }
}

impl<E: CodecEngine + ?Sized> CodecEngine for &mut E {
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        action: Action,
    ) -> Result<(usize, usize, StepStatus), EngineError> {
        (**self).step(input, output, action)
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn is_released(&self) -> bool {
        (**self).is_released()
    }
}
