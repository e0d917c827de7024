//! Shared vocabulary for the input method: mode enums, the engine response
//! snapshot, the conversion-engine boundary trait, and TOML settings.
//!
//! The keystroke dispatch state machine itself lives in `tai-session`; this
//! crate only defines what flows across its two external boundaries (the
//! conversion engine below it and the host text service above it).

pub mod engine;
pub mod modes;
pub mod response;
pub mod settings;

pub use engine::{ArrowDirection, Engine, EngineError};
pub use modes::{InputMode, OutputMode};
pub use response::{
    Candidate, CandidateList, EditState, Preedit, Response, Segment, SegmentStatus,
};
