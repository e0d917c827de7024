//! Built-in demo engine.
//!
//! A deliberately small [`Engine`] implementation over a static syllable
//! table, just enough to exercise every controller path end to end: greedy
//! syllable segmentation, a candidate list ordered by output mode, focus
//! navigation, and Classic-mode remainder pipelining. Not a real conversion
//! engine.

use tai_core::{
    ArrowDirection, Candidate, CandidateList, EditState, Engine, EngineError, InputMode,
    OutputMode, Preedit, Response, Segment, SegmentStatus,
};

/// Syllable → hanji conversions, best first.
static LEXICON: &[(&str, &[&str])] = &[
    ("tai", &["臺", "台", "代"]),
    ("gi", &["語", "義"]),
    ("oan", &["灣", "員"]),
    ("ho", &["好", "號"]),
    ("bo", &["無", "帽"]),
    ("li", &["你", "利"]),
    ("goa", &["我"]),
    ("e", &["的", "會"]),
    ("si", &["是", "時"]),
    ("lang", &["人"]),
    ("chiah", &["食"]),
    ("png", &["飯"]),
];

const CANDIDATE_PAGE_SIZE: i32 = 9;

fn lookup(syllable: &str) -> Option<&'static [&'static str]> {
    LEXICON
        .iter()
        .find(|(key, _)| *key == syllable)
        .map(|(_, values)| *values)
}

/// Greedy longest-match segmentation: recognized syllables plus the
/// unrecognized trailing rest.
fn segment(raw: &str) -> (Vec<&str>, &str) {
    let mut syllables = Vec::new();
    let mut rest = raw;
    'outer: while !rest.is_empty() {
        for len in (1..=rest.len()).rev() {
            if !rest.is_char_boundary(len) {
                continue;
            }
            let head = &rest[..len];
            if lookup(head).is_some() {
                syllables.push(head);
                rest = &rest[len..];
                continue 'outer;
            }
        }
        break;
    }
    (syllables, rest)
}

pub struct DemoEngine {
    input_mode: InputMode,
    output_mode: OutputMode,
    raw: String,
    focused: i32,
}

impl DemoEngine {
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Classic,
            output_mode: OutputMode::LomajiFirst,
            raw: String::new(),
            focused: -1,
        }
    }

    fn candidates(&self) -> Vec<String> {
        if self.raw.is_empty() || self.input_mode == InputMode::Manual {
            return Vec::new();
        }
        let (syllables, rest) = segment(&self.raw);
        if syllables.is_empty() {
            return Vec::new();
        }

        let mut hanji = Vec::new();
        if rest.is_empty() {
            if let [only] = syllables.as_slice() {
                // Single syllable: every conversion is a candidate
                if let Some(values) = lookup(only) {
                    hanji.extend(values.iter().map(|v| (*v).to_string()));
                }
            } else {
                // Phrase: best conversion per syllable, joined
                hanji.push(
                    syllables
                        .iter()
                        .filter_map(|s| lookup(s).and_then(|v| v.first()))
                        .copied()
                        .collect::<String>(),
                );
            }
        }

        let mut candidates = Vec::new();
        match self.output_mode {
            OutputMode::HanjiFirst => {
                candidates.extend(hanji);
                candidates.push(self.raw.clone());
            }
            OutputMode::LomajiFirst => {
                candidates.push(self.raw.clone());
                candidates.extend(hanji);
            }
        }
        candidates
    }

    fn snapshot(&self) -> Response {
        if self.raw.is_empty() {
            return Response::default();
        }

        let (syllables, rest) = segment(&self.raw);
        let edit_state = if self.input_mode != InputMode::Manual && syllables.is_empty() {
            EditState::Illegal
        } else {
            EditState::Composing
        };

        let mut segments = Vec::new();
        if self.input_mode == InputMode::Manual {
            segments.push(Segment::new(self.raw.clone(), SegmentStatus::Composing));
        } else {
            for syllable in &syllables {
                segments.push(Segment::new(*syllable, SegmentStatus::Converted));
            }
            if !rest.is_empty() {
                segments.push(Segment::new(rest, SegmentStatus::Composing));
            }
        }

        let candidates = self.candidates();
        Response {
            edit_state,
            committed: false,
            committed_text: String::new(),
            candidate_list: CandidateList {
                candidates: candidates.into_iter().map(Candidate::new).collect(),
                focused: self.focused,
            },
            preedit: Preedit {
                caret: self.raw.chars().count(),
                segments,
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
        let candidates = self.candidates();
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
        let count = self.candidates().len() as i32;
        if count == 0 {
            return;
        }
        self.focused = (self.focused + delta).rem_euclid(count);
    }
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for DemoEngine {
    fn feed_char(&mut self, ch: char) -> Result<Response, EngineError> {
        // Standalone punctuation converts and commits immediately
        if self.raw.is_empty() && ch.is_ascii_punctuation() {
            return Ok(self.commit_response(ch.to_string()));
        }
        self.raw.push(ch);
        self.focused = -1;
        Ok(self.snapshot())
    }

    fn backspace(&mut self) -> Result<Response, EngineError> {
        self.raw.pop();
        self.focused = -1;
        Ok(self.snapshot())
    }

    fn enter(&mut self) -> Result<Response, EngineError> {
        if self.raw.is_empty() {
            return Ok(Response::default());
        }

        if self.input_mode == InputMode::Classic && self.focused < 0 {
            // Accept the first word and keep the remainder composing
            let first = segment(&self.raw).0.first().map(|s| (*s).to_string());
            if let Some(first) = first {
                let text = match self.output_mode {
                    OutputMode::HanjiFirst => lookup(&first)
                        .and_then(|v| v.first())
                        .map(|v| (*v).to_string())
                        .unwrap_or_else(|| first.clone()),
                    OutputMode::LomajiFirst => first.clone(),
                };
                self.raw = self.raw[first.len()..].to_string();
                self.focused = -1;
                let mut response = self.snapshot();
                response.committed = true;
                response.committed_text = text;
                return Ok(response);
            }
        }

        let text = self.committable_text();
        Ok(self.commit_response(text))
    }

    fn space(&mut self, shifted: bool) -> Result<Response, EngineError> {
        self.move_focus(if shifted { -1 } else { 1 });
        Ok(self.snapshot())
    }

    fn tab(&mut self, shifted: bool) -> Result<Response, EngineError> {
        self.move_focus(if shifted {
            -CANDIDATE_PAGE_SIZE
        } else {
            CANDIDATE_PAGE_SIZE
        });
        Ok(self.snapshot())
    }

    fn arrow(&mut self, direction: ArrowDirection) -> Result<Response, EngineError> {
        self.move_focus(match direction {
            ArrowDirection::Up => -1,
            ArrowDirection::Down => 1,
        });
        Ok(self.snapshot())
    }

    fn commit_all(&mut self) -> Result<Response, EngineError> {
        if self.raw.is_empty() {
            return Ok(Response::default());
        }
        let text = match self.output_mode {
            OutputMode::LomajiFirst => self.raw.clone(),
            OutputMode::HanjiFirst => {
                let (syllables, rest) = segment(&self.raw);
                let mut text: String = syllables
                    .iter()
                    .map(|&s| lookup(s).and_then(|v| v.first()).copied().unwrap_or(s))
                    .collect();
                text.push_str(rest);
                text
            }
        };
        Ok(self.commit_response(text))
    }

    fn reset(&mut self) {
        self.raw.clear();
        self.focused = -1;
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.reset();
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
        self.reset();
    }

    fn mode(&self) -> (InputMode, OutputMode) {
        (self.input_mode, self.output_mode)
    }
}
