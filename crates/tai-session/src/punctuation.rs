//! Classic-mode punctuation tables and the punctuation-insert protocol.

use tracing::warn;

use tai_core::Engine;

use crate::display;
use crate::types::{DispatchResult, HostOp};
use crate::DispatchController;

/// Literal remap table: Classic mode substitutes these before any other
/// punctuation handling. Keyed on the unshifted character plus shift state.
pub(crate) fn classic_literal_remap(ch: char, shifted: bool) -> Option<char> {
    match (ch, shifted) {
        ('\'', false) => Some('\''),
        ('\'', true) => Some('"'),
        (';', true) => Some(':'),
        (',', true) => Some('<'),
        ('.', true) => Some('>'),
        ('=', true) => Some('+'),
        ('-', true) => Some('_'),
        ('/', true) => Some('?'),
        _ => None,
    }
}

/// Shifted digits remapped to punctuation in Classic mode.
pub(crate) fn classic_digit_remap(digit: u8) -> Option<char> {
    match digit {
        1 => Some('!'),
        9 => Some('('),
        0 => Some(')'),
        _ => None,
    }
}

/// Unshifted punctuation that Classic mode inserts directly.
pub(crate) const CLASSIC_DIRECT_PUNCTUATION: &[char] = &['.', ',', '\'', '=', '[', ']', ';'];

impl<E: Engine> DispatchController<E> {
    /// Punctuation-insert protocol: commit all pending composition, feed the
    /// substituted character as a fresh one-character composition, then flush
    /// immediately. Punctuation never merges with a prior word.
    pub(crate) fn punctuation_insert(&mut self, ch: char) -> DispatchResult {
        let mut ops = self.commit_all_ops();
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
                warn!(%err, "engine feed failed during punctuation insert");
                DispatchResult::pass_through().with_ops(ops)
            }
        }
    }
}
