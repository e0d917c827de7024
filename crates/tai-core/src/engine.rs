//! Conversion-engine boundary.
//!
//! The dispatch controller drives an `Engine` with single-character feeds and
//! control commands, synchronously; each call returns a fresh [`Response`]
//! snapshot. No call is issued while a previous one for the same session is
//! outstanding.

use crate::modes::{InputMode, OutputMode};
use crate::response::Response;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    #[error("engine rejected command: {0}")]
    Command(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
}

/// Stateful conversion engine consumed by the dispatch controller.
///
/// Errors are terminal for the keystroke, not the session: the controller
/// reports the key unhandled so the host's native behavior is preserved, and
/// the next keystroke starts over.
pub trait Engine {
    /// Feed one character into the composition buffer.
    fn feed_char(&mut self, ch: char) -> Result<Response, EngineError>;

    /// Delete backward in the composition buffer.
    fn backspace(&mut self) -> Result<Response, EngineError>;

    /// Accept the focused candidate (or the buffer itself where there is
    /// none). In Classic mode the remainder of the buffer stays composing.
    fn enter(&mut self) -> Result<Response, EngineError>;

    /// Space control: next candidate, or previous when shifted.
    fn space(&mut self, shifted: bool) -> Result<Response, EngineError>;

    /// Tab control: next candidate page, or previous when shifted.
    fn tab(&mut self, shifted: bool) -> Result<Response, EngineError>;

    /// Move candidate focus.
    fn arrow(&mut self, direction: ArrowDirection) -> Result<Response, EngineError>;

    /// Commit the entire remaining buffer and reset the engine session.
    fn commit_all(&mut self) -> Result<Response, EngineError>;

    /// Drop all composition state without committing.
    fn reset(&mut self);

    fn set_input_mode(&mut self, mode: InputMode);

    fn set_output_mode(&mut self, mode: OutputMode);

    fn mode(&self) -> (InputMode, OutputMode);

    /// Re-read external configuration. Default: nothing to reload.
    fn reload_settings(&mut self) {}
}
