//! Engine response snapshot.
//!
//! One `Response` is "live" at a time: the controller consumes the cached
//! snapshot to decide an action, then replaces it wholesale with the value
//! returned by the next engine call. It is never mutated in place.

/// Edit state of the engine's composition buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Empty,
    Composing,
    /// The buffer cannot currently be converted. Recoverable; suppresses the
    /// Manual-mode boundary commit but is otherwise treated as composing.
    Illegal,
}

/// Display status of one preedit segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentStatus {
    #[default]
    Unmarked,
    Composing,
    Converted,
    Focused,
}

/// A contiguous styled sub-range of the composition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub value: String,
    pub status: SegmentStatus,
}

impl Segment {
    pub fn new(value: impl Into<String>, status: SegmentStatus) -> Self {
        Self {
            value: value.into(),
            status,
        }
    }
}

/// Ordered preedit segments plus the engine's caret position in characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preedit {
    pub segments: Vec<Segment>,
    pub caret: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidate {
    pub value: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Ordered candidates with the focused index, `-1` when nothing is focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
    pub focused: i32,
}

impl Default for CandidateList {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            focused: -1,
        }
    }
}

impl CandidateList {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Value of the focused candidate, falling back to index 0 when no
    /// candidate is focused. `None` when the list is empty.
    pub fn focused_or_first(&self) -> Option<&str> {
        let idx = if self.focused < 0 {
            0
        } else {
            self.focused as usize
        };
        self.candidates.get(idx).map(|c| c.value.as_str())
    }
}

/// Immutable snapshot returned by every engine feed/control call.
///
/// `committed == true` implies `committed_text` is non-empty and must be
/// flushed to the host exactly once before any further feed call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub edit_state: EditState,
    pub committed: bool,
    pub committed_text: String,
    pub candidate_list: CandidateList,
    pub preedit: Preedit,
}

impl Response {
    pub fn is_composing(&self) -> bool {
        self.edit_state != EditState::Empty
    }
}
