//! Stateful IME session managing key classification, mode-aware dispatch, and
//! the composition lifecycle.
//!
//! [`DispatchController`] owns the current editing state and processes each
//! keystroke, returning a [`DispatchResult`] that the host front end
//! translates into mark / insert / clear calls on its text client.

pub mod classifier;
pub mod client;
pub mod display;

mod commit;
mod key_handlers;
mod punctuation;
mod types;

#[cfg(test)]
mod tests;

use tai_core::settings::settings;
use tai_core::{Engine, InputMode, OutputMode, Response};

pub use classifier::classify;
pub use client::{CursorAnchor, TextClient};
pub use display::{render, render_with, PlainStyler, SegmentStyler};
pub use types::{
    key, DispatchResult, HostOp, KeyEvent, Modifiers, FLAG_CAPS_LOCK, FLAG_COMMAND, FLAG_OPTION,
    FLAG_SHIFT,
};

/// Per-session composition state: the three state axes plus the cached last
/// engine response. The response is replaced wholesale after every engine
/// call, never mutated.
pub(crate) struct CompositionState {
    pub(crate) input_mode: InputMode,
    pub(crate) output_mode: OutputMode,
    pub(crate) last: Response,
}

/// Keystroke dispatch state machine for one host session.
///
/// Single-threaded: each keystroke is fully processed before the next is
/// accepted, and exactly one engine call chain runs per keystroke.
pub struct DispatchController<E: Engine> {
    engine: E,
    state: CompositionState,

    // Configured at session start
    hyphen_key: char,
    khin_key: char,
}

impl<E: Engine> DispatchController<E> {
    pub fn new(engine: E) -> Self {
        let (input_mode, output_mode) = engine.mode();
        let keys = &settings().keys;
        Self {
            engine,
            state: CompositionState {
                input_mode,
                output_mode,
                last: Response::default(),
            },
            hyphen_key: keys.hyphen_key(),
            khin_key: keys.khin_key(),
        }
    }

    /// Construct with explicit modes, pushing them to the engine.
    pub fn with_modes(mut engine: E, input_mode: InputMode, output_mode: OutputMode) -> Self {
        engine.set_input_mode(input_mode);
        engine.set_output_mode(output_mode);
        let mut controller = Self::new(engine);
        controller.state.input_mode = input_mode;
        controller.state.output_mode = output_mode;
        controller
    }

    /// Override the configured hyphen/khin keys for this session.
    pub fn with_keys(mut self, hyphen_key: char, khin_key: char) -> Self {
        self.hyphen_key = hyphen_key;
        self.khin_key = khin_key;
        self
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.input_mode
    }

    pub fn output_mode(&self) -> OutputMode {
        self.state.output_mode
    }

    pub fn is_composing(&self) -> bool {
        self.state.last.is_composing()
    }

    /// Flat rendering of the current preedit, empty when idle.
    pub fn display_text(&self) -> String {
        display::render(&self.state.last.preedit)
    }

    /// The cached last engine response.
    pub fn last_response(&self) -> &Response {
        &self.state.last
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Classify a raw host key and dispatch it.
    pub fn handle_key(&mut self, key_code: u16, text: &str, flags: u8) -> DispatchResult {
        let event = classifier::classify(key_code, text);
        self.dispatch(event, Modifiers::from_flags(flags))
    }

    /// Session activation: fresh engine and composition state.
    pub fn activate(&mut self) {
        self.engine.set_input_mode(self.state.input_mode);
        self.engine.set_output_mode(self.state.output_mode);
        self.reset_all();
    }

    /// Session deactivation: flush everything, clear the preview.
    pub fn deactivate(&mut self) -> DispatchResult {
        self.commit_all()
    }

    /// External reset trigger (host focus change, pointer click outside the
    /// composition). Flushes pending state before the next keystroke.
    pub fn force_reset(&mut self) -> DispatchResult {
        self.commit_all()
    }

    /// Ask the engine to re-read its configuration.
    pub fn reload_settings(&mut self) {
        self.engine.reload_settings();
    }

    pub(crate) fn reset_all(&mut self) {
        self.engine.reset();
        self.state.last = Response::default();
    }
}
