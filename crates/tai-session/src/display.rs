//! Preedit rendering.
//!
//! `render` concatenates segment values with no separators. `render_with`
//! takes a [`SegmentStyler`] so a front end can decorate segments by status
//! (underline weights, attribute ribbons); the default styler applies none.

use tai_core::{Preedit, SegmentStatus};

/// Per-segment styling hook: status + value → displayed text.
pub trait SegmentStyler {
    fn style(&self, status: SegmentStatus, value: &str) -> String;
}

/// Identity styler: plain text, no decoration.
pub struct PlainStyler;

impl SegmentStyler for PlainStyler {
    fn style(&self, _status: SegmentStatus, value: &str) -> String {
        value.to_string()
    }
}

/// Flatten a preedit into the string to mark at the cursor.
pub fn render(preedit: &Preedit) -> String {
    render_with(preedit, &PlainStyler)
}

pub fn render_with(preedit: &Preedit, styler: &dyn SegmentStyler) -> String {
    preedit
        .segments
        .iter()
        .map(|seg| styler.style(seg.status, &seg.value))
        .collect()
}
