mod classic;

use std::collections::{HashMap, VecDeque};

use tai_core::{
    ArrowDirection, Candidate, CandidateList, EditState, Engine, EngineError, InputMode,
    OutputMode, Preedit, Response, Segment, SegmentStatus,
};

use super::types::{key, FLAG_SHIFT};
use super::{DispatchController, DispatchResult, HostOp};

/// Deterministic in-memory engine for driving the dispatch state machine.
///
/// Keystroke characters accumulate in a raw buffer rendered as a single
/// preedit segment; candidates come from a fixed lookup table. The configured
/// hyphen/khin keys render as the join markers `-` and `·`. Standalone
/// punctuation in Classic mode commits instantly, like the real engine.
/// Tests can override the next response with `script`, or force an error
/// with `fail_next`.
pub(super) struct FakeEngine {
    input_mode: InputMode,
    output_mode: OutputMode,
    raw: String,
    focused: i32,
    candidates: HashMap<String, Vec<String>>,
    scripted: VecDeque<Response>,
    fail_next: bool,
    pub(super) calls: Vec<String>,
}

pub(super) const TEST_HYPHEN_KEY: char = 'q';
pub(super) const TEST_KHIN_KEY: char = 'v';

impl FakeEngine {
    pub(super) fn new() -> Self {
        Self {
            input_mode: InputMode::Continuous,
            output_mode: OutputMode::LomajiFirst,
            raw: String::new(),
            focused: -1,
            candidates: HashMap::new(),
            scripted: VecDeque::new(),
            fail_next: false,
            calls: Vec::new(),
        }
    }

    pub(super) fn with_candidates(entries: &[(&str, &[&str])]) -> Self {
        let mut engine = Self::new();
        for (raw, values) in entries {
            engine.candidates.insert(
                (*raw).to_string(),
                values.iter().map(|v| (*v).to_string()).collect(),
            );
        }
        engine
    }

    /// Queue a response returned verbatim by the next engine call.
    pub(super) fn script(&mut self, response: Response) {
        self.scripted.push_back(response);
    }

    pub(super) fn fail_next(&mut self) {
        self.fail_next = true;
    }

    fn take_scripted(&mut self) -> Option<Response> {
        let response = self.scripted.pop_front()?;
        // Keep internal state coherent with what the caller now sees
        self.raw = response
            .preedit
            .segments
            .iter()
            .map(|s| s.value.as_str())
            .collect();
        self.focused = response.candidate_list.focused;
        Some(response)
    }

    fn check_fail(&mut self) -> Result<(), EngineError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(EngineError::Unavailable("scripted failure".to_string()));
        }
        Ok(())
    }

    fn current_candidates(&self) -> Vec<String> {
        self.candidates.get(&self.raw).cloned().unwrap_or_default()
    }

    fn snapshot(&self) -> Response {
        if self.raw.is_empty() {
            return Response::default();
        }
        let candidates = self.current_candidates();
        let status = if self.focused >= 0 {
            SegmentStatus::Focused
        } else {
            SegmentStatus::Composing
        };
        Response {
            edit_state: EditState::Composing,
            committed: false,
            committed_text: String::new(),
            candidate_list: CandidateList {
                candidates: candidates.into_iter().map(Candidate::new).collect(),
                focused: self.focused,
            },
            preedit: Preedit {
                segments: vec![Segment::new(self.raw.clone(), status)],
                caret: self.raw.chars().count(),
            },
        }
    }

    fn commit_response(&mut self, text: String) -> Response {
        self.raw.clear();
        self.focused = -1;
        Response {
            edit_state: EditState::Empty,
            committed: true,
            committed_text: text,
            ..Response::default()
        }
    }

    fn committable_text(&self) -> String {
        let candidates = self.current_candidates();
        if candidates.is_empty() {
            return self.raw.clone();
        }
        let idx = if self.focused < 0 {
            0
        } else {
            self.focused as usize
        };
        candidates
            .get(idx)
            .cloned()
            .unwrap_or_else(|| self.raw.clone())
    }

    fn move_focus(&mut self, delta: i32) {
        let count = self.current_candidates().len() as i32;
        if count == 0 {
            return;
        }
        self.focused = (self.focused + delta).rem_euclid(count);
    }
}

impl Engine for FakeEngine {
    fn feed_char(&mut self, ch: char) -> Result<Response, EngineError> {
        self.calls.push(format!("feed:{ch}"));
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }

        // Standalone punctuation commits instantly in Classic mode
        if self.input_mode == InputMode::Classic && self.raw.is_empty() && ch.is_ascii_punctuation()
        {
            return Ok(self.commit_response(ch.to_string()));
        }

        match ch {
            TEST_HYPHEN_KEY => self.raw.push('-'),
            TEST_KHIN_KEY => self.raw.push('·'),
            _ => self.raw.push(ch),
        }
        self.focused = -1;
        Ok(self.snapshot())
    }

    fn backspace(&mut self) -> Result<Response, EngineError> {
        self.calls.push("backspace".to_string());
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }
        self.raw.pop();
        self.focused = -1;
        Ok(self.snapshot())
    }

    fn enter(&mut self) -> Result<Response, EngineError> {
        self.calls.push("enter".to_string());
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }
        let text = self.committable_text();
        Ok(self.commit_response(text))
    }

    fn space(&mut self, shifted: bool) -> Result<Response, EngineError> {
        self.calls.push(format!("space:{shifted}"));
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }
        self.move_focus(if shifted { -1 } else { 1 });
        Ok(self.snapshot())
    }

    fn tab(&mut self, shifted: bool) -> Result<Response, EngineError> {
        self.calls.push(format!("tab:{shifted}"));
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }
        self.move_focus(if shifted { -1 } else { 1 });
        Ok(self.snapshot())
    }

    fn arrow(&mut self, direction: ArrowDirection) -> Result<Response, EngineError> {
        self.calls.push(format!("arrow:{direction:?}"));
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }
        self.move_focus(match direction {
            ArrowDirection::Up => -1,
            ArrowDirection::Down => 1,
        });
        Ok(self.snapshot())
    }

    fn commit_all(&mut self) -> Result<Response, EngineError> {
        self.calls.push("commit_all".to_string());
        self.check_fail()?;
        if let Some(r) = self.take_scripted() {
            return Ok(r);
        }
        let text = self.committable_text();
        Ok(self.commit_response(text))
    }

    fn reset(&mut self) {
        self.calls.push("reset".to_string());
        self.raw.clear();
        self.focused = -1;
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.calls.push(format!("set_input_mode:{mode:?}"));
        self.input_mode = mode;
        self.raw.clear();
        self.focused = -1;
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.calls.push(format!("set_output_mode:{mode:?}"));
        self.output_mode = mode;
        self.raw.clear();
        self.focused = -1;
    }

    fn mode(&self) -> (InputMode, OutputMode) {
        (self.input_mode, self.output_mode)
    }
}

// --- Shared helpers ---

pub(super) fn controller(
    input_mode: InputMode,
    output_mode: OutputMode,
) -> DispatchController<FakeEngine> {
    controller_with(FakeEngine::new(), input_mode, output_mode)
}

pub(super) fn controller_with(
    engine: FakeEngine,
    input_mode: InputMode,
    output_mode: OutputMode,
) -> DispatchController<FakeEngine> {
    let mut controller = DispatchController::with_modes(engine, input_mode, output_mode)
        .with_keys(TEST_HYPHEN_KEY, TEST_KHIN_KEY);
    // Setup pushes modes into the engine; keystroke assertions want a clean log
    controller.engine_mut().calls.clear();
    controller
}

/// Simulate typing a string one character at a time, no modifiers.
pub(super) fn type_str(
    controller: &mut DispatchController<FakeEngine>,
    s: &str,
) -> Vec<DispatchResult> {
    s.chars()
        .map(|ch| controller.handle_key(0, &ch.to_string(), 0))
        .collect()
}

/// A scripted composing response with a single preedit segment.
pub(super) fn composing_response(preedit: &str, edit_state: EditState) -> Response {
    Response {
        edit_state,
        committed: false,
        committed_text: String::new(),
        candidate_list: CandidateList::default(),
        preedit: Preedit {
            segments: vec![Segment::new(preedit, SegmentStatus::Composing)],
            caret: preedit.chars().count(),
        },
    }
}

/// A scripted response committing `text` while `remainder` stays composing.
pub(super) fn pipelined_commit_response(text: &str, remainder: &str) -> Response {
    Response {
        edit_state: if remainder.is_empty() {
            EditState::Empty
        } else {
            EditState::Composing
        },
        committed: true,
        committed_text: text.to_string(),
        candidate_list: CandidateList::default(),
        preedit: Preedit {
            segments: if remainder.is_empty() {
                Vec::new()
            } else {
                vec![Segment::new(remainder, SegmentStatus::Composing)]
            },
            caret: remainder.chars().count(),
        },
    }
}

pub(super) fn inserts(result: &DispatchResult) -> Vec<String> {
    result
        .ops
        .iter()
        .filter_map(|op| match op {
            HostOp::Insert(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}
