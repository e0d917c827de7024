//! Key classification: raw host key → semantic [`KeyEvent`].
//!
//! Pure and total; every raw key maps to exactly one event, with `Other` as
//! the catch-all for unrecognized and function keys. Letters are classified
//! case-insensitively — the dispatcher reapplies case from modifier state.

use tai_core::ArrowDirection;

use crate::types::{key, KeyEvent};

/// Classify a raw key. `text` is the unshifted character string reported by
/// the host for printable keys; it is ignored for special key codes.
pub fn classify(key_code: u16, text: &str) -> KeyEvent {
    match key_code {
        key::ENTER => return KeyEvent::Enter,
        key::TAB => return KeyEvent::Tab,
        key::SPACE => return KeyEvent::Space,
        key::BACKSPACE => return KeyEvent::Backspace,
        key::ESCAPE => return KeyEvent::Escape,
        key::UP => return KeyEvent::Arrow(ArrowDirection::Up),
        key::DOWN => return KeyEvent::Arrow(ArrowDirection::Down),
        _ => {}
    }

    match text.chars().next() {
        Some(' ') => KeyEvent::Space,
        Some(c) if c.is_ascii_alphabetic() => KeyEvent::Alphabet(c.to_ascii_lowercase()),
        Some(c) if c.is_ascii_digit() => KeyEvent::Digit(c as u8 - b'0'),
        Some(c) if c.is_ascii_punctuation() => KeyEvent::Punctuation(c),
        _ => KeyEvent::Other,
    }
}
