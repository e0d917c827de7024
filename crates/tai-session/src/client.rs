//! Host text-client boundary.
//!
//! The controller itself only emits [`DispatchResult`] values; applying them
//! to a live client is a thin, separate step so the state machine stays pure
//! and testable.

use crate::types::{DispatchResult, HostOp};

/// Cursor anchor reported by the host, in host screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorAnchor {
    pub x: f64,
    pub y: f64,
}

/// The host text-input service as seen by the controller.
pub trait TextClient {
    /// Show `text` as an uncommitted preview at the cursor.
    fn mark(&mut self, text: &str);

    /// Commit `text` into the document.
    fn insert(&mut self, text: &str);

    /// Remove the uncommitted preview.
    fn clear_marked_text(&mut self);

    /// Current cursor anchor, if the host can report one.
    fn cursor_anchor(&self) -> Option<CursorAnchor> {
        None
    }
}

impl DispatchResult {
    /// Apply this result's host ops in order. Returns `false` (nothing
    /// applied) when no client is bound; the caller should then report the
    /// key as not handled upstream.
    pub fn apply_to(&self, client: Option<&mut dyn TextClient>) -> bool {
        let Some(client) = client else {
            return false;
        };
        for op in &self.ops {
            match op {
                HostOp::Mark(text) => client.mark(text),
                HostOp::Insert(text) => client.insert(text),
                HostOp::ClearMarked => client.clear_marked_text(),
            }
        }
        true
    }
}
