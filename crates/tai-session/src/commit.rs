//! The two whole-buffer commit protocols.
//!
//! `commit_current` flushes only the focused candidate/segment and leaves the
//! engine session for the remaining text intact (Classic pipelining);
//! `commit_all` flushes every remaining text and fully resets. Both are
//! no-ops when the resulting text is empty.

use tracing::warn;

use tai_core::{Engine, InputMode};

use crate::types::{DispatchResult, HostOp};
use crate::DispatchController;

impl<E: Engine> DispatchController<E> {
    /// Flush the whole remaining composition and fully reset engine and
    /// composition state. Used for mode switches, host focus loss, and
    /// defocus events.
    pub fn commit_all(&mut self) -> DispatchResult {
        let was_composing = self.is_composing();
        let ops = self.commit_all_ops();
        let mut result = DispatchResult::handled().with_ops(ops);
        if was_composing {
            result = result.with(HostOp::ClearMarked);
        }
        result
    }

    /// Flush only the currently focused candidate/segment. In Classic mode
    /// the remainder stays composing and is re-marked.
    pub fn commit_current(&mut self) -> DispatchResult {
        let was_composing = self.is_composing();
        let ops = self.commit_current_ops();
        let mut result = DispatchResult::handled().with_ops(ops);
        if !was_composing {
            return result;
        }
        if self.is_composing() {
            result = result.with(HostOp::Mark(self.display_text()));
        } else {
            result = result.with(HostOp::ClearMarked);
        }
        result
    }

    pub(crate) fn commit_all_ops(&mut self) -> Vec<HostOp> {
        if !self.is_composing() {
            return Vec::new();
        }
        let text = match self.state.input_mode {
            InputMode::Manual => self.display_text(),
            InputMode::Classic => match self.engine.commit_all() {
                Ok(response) => response.committed_text,
                Err(err) => {
                    warn!(%err, "engine commit failed, dropping composition");
                    String::new()
                }
            },
            InputMode::Continuous => self
                .state
                .last
                .candidate_list
                .focused_or_first()
                .unwrap_or_default()
                .to_string(),
        };
        self.reset_all();
        if text.is_empty() {
            Vec::new()
        } else {
            vec![HostOp::Insert(text)]
        }
    }

    pub(crate) fn commit_current_ops(&mut self) -> Vec<HostOp> {
        if !self.is_composing() {
            return Vec::new();
        }
        let text = match self.state.input_mode {
            InputMode::Manual => {
                let text = self.display_text();
                self.reset_all();
                text
            }
            InputMode::Classic => match self.engine.enter() {
                Ok(response) => {
                    let text = response.committed_text.clone();
                    // Remaining session state stays live for pipelining
                    self.state.last = response;
                    text
                }
                Err(err) => {
                    warn!(%err, "engine accept failed, dropping composition");
                    self.reset_all();
                    String::new()
                }
            },
            InputMode::Continuous => {
                let text = self
                    .state
                    .last
                    .candidate_list
                    .focused_or_first()
                    .unwrap_or_default()
                    .to_string();
                self.reset_all();
                text
            }
        };
        if text.is_empty() {
            Vec::new()
        } else {
            vec![HostOp::Insert(text)]
        }
    }

    /// Commit-and-reset used by the composition boundary rules: whatever was
    /// pending is flushed and the next keystroke starts a fresh composition.
    pub(crate) fn boundary_commit_ops(&mut self) -> Vec<HostOp> {
        let ops = self.commit_current_ops();
        self.reset_all();
        ops
    }
}
