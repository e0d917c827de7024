//! The mode-aware dispatch state machine.
//!
//! One canonical ordered dispatch: global hot-keys, Classic punctuation
//! remaps, alphabet/digit feeds, then the idle passthrough and the composing
//! transition tables. Every branch either consumes the cached last response
//! or replaces it with a fresh one; two engine calls are never in flight.

use tracing::{debug, debug_span, warn};

use tai_core::settings::settings;
use tai_core::{EditState, Engine, InputMode, OutputMode, Response};

use crate::display;
use crate::punctuation;
use crate::types::{DispatchResult, HostOp, KeyEvent, Modifiers};
use crate::DispatchController;

const FULL_WIDTH_SPACE: &str = "\u{3000}";

/// Khin (neutral tone) marker as it appears in rendered preedit text.
const KHIN_MARKER: char = '·';

impl<E: Engine> DispatchController<E> {
    /// Process one classified key event. Returns what the host should do
    /// with the key and with its text.
    pub fn dispatch(&mut self, event: KeyEvent, mods: Modifiers) -> DispatchResult {
        let _span = debug_span!("dispatch", ?event).entered();

        // 1. Global hot-keys, checked before anything else in any mode
        if mods.option {
            match event {
                KeyEvent::Punctuation('`') => return self.switch_input_mode(),
                KeyEvent::Alphabet('h') | KeyEvent::Alphabet('s') => {
                    return self.switch_output_mode(OutputMode::HanjiFirst)
                }
                KeyEvent::Alphabet('l') => {
                    return self.switch_output_mode(OutputMode::LomajiFirst)
                }
                KeyEvent::Space => {
                    let next = self.state.output_mode.toggle();
                    return self.switch_output_mode(next);
                }
                _ => {}
            }
        }
        if mods.host_reserved() {
            // Unmatched Option/Command combination: flush, then let the host
            // process the key natively
            let ops = self.commit_all_ops();
            return DispatchResult::pass_through().with_ops(ops);
        }

        match event {
            KeyEvent::Punctuation(ch) if self.state.input_mode == InputMode::Classic => {
                // 2. Classic literal punctuation remap
                if let Some(mapped) = punctuation::classic_literal_remap(ch, mods.shift) {
                    return self.punctuation_insert(mapped);
                }
                // 5. Classic direct punctuation
                if !mods.shift && punctuation::CLASSIC_DIRECT_PUNCTUATION.contains(&ch) {
                    return self.punctuation_insert(ch);
                }
                self.dispatch_special(event, mods)
            }
            // 3. Alphabetic
            KeyEvent::Alphabet(ch) => self.dispatch_alphabet(ch, mods),
            // 4. Digit
            KeyEvent::Digit(digit) => self.dispatch_digit(digit, mods),
            // 6./7. Idle passthrough or the composing tables
            _ => self.dispatch_special(event, mods),
        }
    }

    fn switch_input_mode(&mut self) -> DispatchResult {
        let mut ops = self.commit_all_ops();
        let next = self.state.input_mode.cycle();
        debug!(?next, "switching input mode");
        self.state.input_mode = next;
        self.engine.set_input_mode(next);
        self.reset_all();
        ops.push(HostOp::ClearMarked);
        DispatchResult::handled().with_ops(ops)
    }

    fn switch_output_mode(&mut self, target: OutputMode) -> DispatchResult {
        let mut ops = self.commit_all_ops();
        debug!(?target, "switching output mode");
        self.state.output_mode = target;
        self.engine.set_output_mode(target);
        self.reset_all();
        ops.push(HostOp::ClearMarked);
        DispatchResult::handled().with_ops(ops)
    }

    fn dispatch_alphabet(&mut self, ch: char, mods: Modifiers) -> DispatchResult {
        let ch = if mods.uppercase() {
            ch.to_ascii_uppercase()
        } else {
            ch
        };

        let mut ops = Vec::new();
        match self.state.input_mode {
            InputMode::Manual => {
                // A trailing join marker must not silently absorb an
                // unrelated letter
                let display = self.display_text();
                let at_boundary =
                    display.ends_with('-') || display.ends_with(KHIN_MARKER);
                let exempt = ch.eq_ignore_ascii_case(&self.hyphen_key)
                    || ch.eq_ignore_ascii_case(&self.khin_key);
                if at_boundary && !exempt && self.state.last.edit_state != EditState::Illegal {
                    ops = self.boundary_commit_ops();
                }
            }
            InputMode::Classic => {
                // Punctuation always terminates a word
                let terminated = self
                    .display_text()
                    .chars()
                    .last()
                    .is_some_and(|last| settings().classic.is_terminator(last));
                if terminated {
                    ops = self.boundary_commit_ops();
                }
            }
            InputMode::Continuous => {}
        }

        match self.engine.feed_char(ch) {
            Ok(response) => {
                if response.committed && !response.committed_text.is_empty() {
                    ops.push(HostOp::Insert(response.committed_text.clone()));
                    self.reset_all();
                } else {
                    ops.push(HostOp::Mark(display::render(&response.preedit)));
                    self.state.last = response;
                }
                DispatchResult::handled().with_ops(ops)
            }
            Err(err) => {
                warn!(%err, "engine feed failed");
                DispatchResult::pass_through().with_ops(ops)
            }
        }
    }

    fn dispatch_digit(&mut self, digit: u8, mods: Modifiers) -> DispatchResult {
        if self.state.input_mode == InputMode::Classic && mods.shift {
            if let Some(mapped) = punctuation::classic_digit_remap(digit) {
                return self.punctuation_insert(mapped);
            }
        }
        if mods.uppercase() {
            // Digits with uppercase modifiers are not composed
            let ops = self.commit_all_ops();
            return DispatchResult::pass_through().with_ops(ops);
        }

        let ch = (b'0' + digit) as char;
        let response = match self.engine.feed_char(ch) {
            Ok(response) => response,
            Err(err) => {
                warn!(%err, "engine feed failed");
                return DispatchResult::pass_through();
            }
        };

        match self.state.input_mode {
            InputMode::Manual => {
                if response.committed && !response.committed_text.is_empty() {
                    let text = response.committed_text.clone();
                    self.reset_all();
                    DispatchResult::handled().with(HostOp::Insert(text))
                } else {
                    let marked = display::render(&response.preedit);
                    self.state.last = response;
                    DispatchResult::handled().with(HostOp::Mark(marked))
                }
            }
            InputMode::Classic => {
                // A prior commit may still be pending; flush it first
                let mut result = DispatchResult::handled();
                if response.committed && !response.committed_text.is_empty() {
                    result = result.with(HostOp::Insert(response.committed_text.clone()));
                }
                let marked = display::render(&response.preedit);
                self.state.last = response;
                result.with(HostOp::Mark(marked))
            }
            InputMode::Continuous => {
                let marked = display::render(&response.preedit);
                self.state.last = response;
                DispatchResult::handled().with(HostOp::Mark(marked))
            }
        }
    }

    fn dispatch_special(&mut self, event: KeyEvent, mods: Modifiers) -> DispatchResult {
        // 6. No composition in progress: the normal passthrough path for an
        // idle IME
        if !self.is_composing() {
            if event == KeyEvent::Space
                && mods.shift
                && self.state.input_mode == InputMode::Classic
                && self.state.output_mode == OutputMode::HanjiFirst
            {
                return DispatchResult::handled()
                    .with(HostOp::Insert(FULL_WIDTH_SPACE.to_string()));
            }
            return DispatchResult::pass_through();
        }

        // 7. Composition in progress
        if self.state.input_mode == InputMode::Manual {
            self.dispatch_composing_manual(event)
        } else {
            self.dispatch_composing_candidates(event, mods)
        }
    }

    fn dispatch_composing_manual(&mut self, event: KeyEvent) -> DispatchResult {
        match event {
            KeyEvent::Backspace => match self.engine.backspace() {
                Ok(response) => self.unify(response),
                Err(err) => {
                    warn!(%err, "engine backspace failed");
                    DispatchResult::pass_through()
                }
            },
            KeyEvent::Escape => {
                self.reset_all();
                DispatchResult::handled().with(HostOp::ClearMarked)
            }
            // Commit, then let the host insert its own whitespace or
            // punctuation after the committed word
            _ => {
                let ops = self.commit_all_ops();
                DispatchResult::pass_through().with_ops(ops)
            }
        }
    }

    fn dispatch_composing_candidates(&mut self, event: KeyEvent, mods: Modifiers) -> DispatchResult {
        let response = match event {
            KeyEvent::Enter => self.engine.enter(),
            KeyEvent::Backspace => self.engine.backspace(),
            KeyEvent::Escape => {
                self.reset_all();
                return DispatchResult::handled().with(HostOp::ClearMarked);
            }
            KeyEvent::Space => self.engine.space(mods.shift),
            KeyEvent::Tab => self.engine.tab(mods.shift),
            KeyEvent::Arrow(direction) => self.engine.arrow(direction),
            _ => {
                let ops = self.commit_all_ops();
                return DispatchResult::pass_through().with_ops(ops);
            }
        };
        match response {
            Ok(response) => self.unify(response),
            Err(err) => {
                warn!(%err, "engine control failed");
                DispatchResult::pass_through()
            }
        }
    }

    /// Post-control unification: flush any commit exactly once, then re-mark
    /// the updated composition or clear when the buffer emptied.
    fn unify(&mut self, response: Response) -> DispatchResult {
        let mut result = DispatchResult::handled();

        if response.committed && !response.committed_text.is_empty() {
            result = result.with(HostOp::Insert(response.committed_text.clone()));
            if self.state.input_mode == InputMode::Classic && response.is_composing() {
                // Classic pipelines sequential word commits
                result = result.with(HostOp::Mark(display::render(&response.preedit)));
                self.state.last = response;
            } else {
                self.reset_all();
                result = result.with(HostOp::ClearMarked);
            }
            return result;
        }

        if response.is_composing() {
            result = result.with(HostOp::Mark(display::render(&response.preedit)));
            self.state.last = response;
        } else {
            self.reset_all();
            result = result.with(HostOp::ClearMarked);
        }
        result
    }
}
