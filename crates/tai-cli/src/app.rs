//! Alternate-screen terminal UI driving the dispatch controller.

use std::io::{Stdout, Write};

use anyhow::Result;
use crossterm::cursor::{MoveTo, SetCursorStyle, Show};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthStr;

use tai_core::{CandidateList, InputMode, OutputMode, SegmentStatus};
use tai_session::{key, DispatchController, HostOp, TextClient, FLAG_COMMAND, FLAG_OPTION, FLAG_SHIFT};

use crate::demo::DemoEngine;

const PAGE_SIZE: usize = 9;

/// The "document" of the demo host: committed text plus the marked preview.
#[derive(Default)]
struct TerminalDoc {
    committed: String,
    marked: String,
}

impl TextClient for TerminalDoc {
    fn mark(&mut self, text: &str) {
        self.marked = text.to_string();
    }

    fn insert(&mut self, text: &str) {
        self.committed.push_str(text);
    }

    fn clear_marked_text(&mut self) {
        self.marked.clear();
    }
}

/// Shifted symbol → the unshifted key it lives on. The controller expects
/// unshifted characters plus the shift flag.
fn unshifted(ch: char) -> char {
    match ch {
        '<' => ',',
        '>' => '.',
        '?' => '/',
        '"' => '\'',
        ':' => ';',
        '+' => '=',
        '_' => '-',
        '~' => '`',
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        _ => ch,
    }
}

/// Translate a crossterm key event into the host key triple.
fn host_key(event: &KeyEvent) -> Option<(u16, String, u8)> {
    let mut flags = 0u8;
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        flags |= FLAG_SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        flags |= FLAG_OPTION;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        flags |= FLAG_COMMAND;
    }

    match event.code {
        KeyCode::Enter => Some((key::ENTER, String::new(), flags)),
        KeyCode::Tab => Some((key::TAB, String::new(), flags)),
        KeyCode::BackTab => Some((key::TAB, String::new(), flags | FLAG_SHIFT)),
        KeyCode::Backspace => Some((key::BACKSPACE, String::new(), flags)),
        KeyCode::Esc => Some((key::ESCAPE, String::new(), flags)),
        KeyCode::Up => Some((key::UP, String::new(), flags)),
        KeyCode::Down => Some((key::DOWN, String::new(), flags)),
        KeyCode::Char(' ') => Some((key::SPACE, " ".to_string(), flags)),
        KeyCode::Char(ch) => {
            let base = unshifted(ch);
            if base != ch || ch.is_ascii_uppercase() {
                flags |= FLAG_SHIFT;
            }
            Some((0, base.to_string(), flags))
        }
        _ => None,
    }
}

/// What the host does natively with a key the IME did not consume.
fn apply_native(doc: &mut TerminalDoc, event: &KeyEvent) {
    match event.code {
        KeyCode::Char(ch) => doc.committed.push(ch),
        KeyCode::Tab => doc.committed.push('\t'),
        _ => {}
    }
}

pub fn run(stdout: &mut Stdout, input_mode: InputMode, output_mode: OutputMode) -> Result<()> {
    execute!(stdout, EnterAlternateScreen)?;
    enable_raw_mode()?;

    let mut controller =
        DispatchController::with_modes(DemoEngine::new(), input_mode, output_mode);
    controller.activate();
    let result = event_loop(stdout, &mut controller);

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    result
}

fn event_loop(
    stdout: &mut Stdout,
    controller: &mut DispatchController<DemoEngine>,
) -> Result<()> {
    let mut doc = TerminalDoc::default();
    let mut raw_input = String::new();
    draw(stdout, controller, &doc, &raw_input)?;

    loop {
        let event = match read()? {
            Event::Key(event) if event.kind == KeyEventKind::Press => event,
            _ => continue,
        };

        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }
        let Some((code, text, flags)) = host_key(&event) else {
            continue;
        };

        if let KeyCode::Char(ch) = event.code {
            raw_input.push(ch);
        }

        let result = controller.handle_key(code, &text, flags);
        result.apply_to(Some(&mut doc));
        if !result.handled {
            apply_native(&mut doc, &event);
        }
        if result
            .ops
            .iter()
            .any(|op| matches!(op, HostOp::Insert(_)))
        {
            raw_input.clear();
        }

        draw(stdout, controller, &doc, &raw_input)?;
    }

    clear(stdout)
}

fn clear(stdout: &mut Stdout) -> Result<()> {
    queue!(stdout, Clear(ClearType::All), MoveTo(1, 1))?;
    stdout.flush()?;
    Ok(())
}

fn attr_char(status: SegmentStatus) -> char {
    match status {
        SegmentStatus::Unmarked => ' ',
        SegmentStatus::Composing => '┄',
        SegmentStatus::Converted => '─',
        SegmentStatus::Focused => '━',
    }
}

fn page_range(item_count: usize, page_size: usize, index: usize) -> (usize, usize) {
    let start = (index / page_size) * page_size;
    let end = std::cmp::min(start + page_size, item_count);
    (start, end)
}

fn candidate_page(list: &CandidateList) -> Vec<String> {
    let item_count = list.candidates.len();
    let (start, end) = if list.focused < 0 {
        (0, std::cmp::min(item_count, PAGE_SIZE))
    } else {
        page_range(item_count, PAGE_SIZE, list.focused as usize)
    };

    (start..end)
        .map(|i| {
            let marker = if i as i32 == list.focused { '*' } else { ' ' };
            let number = (i % PAGE_SIZE) + 1;
            format!("{}{}. {}", marker, number, list.candidates[i].value)
        })
        .collect()
}

fn draw(
    stdout: &mut Stdout,
    controller: &DispatchController<DemoEngine>,
    doc: &TerminalDoc,
    raw_input: &str,
) -> Result<()> {
    let response = controller.last_response();

    // Marked display plus the per-segment attribute ribbon
    let mut display = String::new();
    let mut attrs = String::new();
    let mut caret = 0;
    let mut char_count = 0;
    for segment in &response.preedit.segments {
        if response.preedit.caret == char_count {
            caret = display.width();
        }
        char_count += segment.value.chars().count();
        attrs.push_str(
            &attr_char(segment.status)
                .to_string()
                .repeat(segment.value.width()),
        );
        display.push_str(&segment.value);
    }
    if response.preedit.caret >= char_count {
        caret = display.width();
    }

    let candidates = candidate_page(&response.candidate_list);

    clear(stdout)?;
    execute!(
        stdout,
        MoveTo(2, 2),
        Print("Tâi-gí phah-jī demo"),
        MoveTo(2, 4),
        Print(format!("Input mode:  {}", controller.input_mode().label())),
        MoveTo(2, 6),
        Print(format!("Output mode: {}", controller.output_mode().label())),
        MoveTo(2, 8),
        Print(format!("Raw input:  {}", raw_input)),
        MoveTo(2, 10),
        Print(format!("Committed:  {}", doc.committed)),
        MoveTo(2, 12),
        Print(format!("User sees:  {}", display)),
        MoveTo(14, 13),
        Print(&attrs),
        MoveTo(2, 14),
        Print("Candidates:"),
    )?;

    for (i, cand) in candidates.iter().enumerate() {
        execute!(stdout, MoveTo(15, 15 + i as u16), Print(cand))?;
    }

    draw_footer(stdout)?;
    execute!(
        stdout,
        MoveTo(14 + caret as u16, 12),
        Show,
        SetCursorStyle::BlinkingBar
    )?;
    stdout.flush()?;
    Ok(())
}

fn draw_footer(stdout: &mut Stdout) -> Result<()> {
    let (_, rows) = size()?;

    let help = [
        "<Ctrl+C>: Quit",
        "<Alt+`>: Switch mode",
        "<Alt+Space>: Switch output",
        "<Esc>: Cancel",
    ];

    let max_len = help.iter().map(|s| s.chars().count()).max().unwrap_or(0) + 4;
    let formatted: Vec<String> = help
        .iter()
        .map(|s| format!("{:>width$}", s, width = max_len))
        .collect();

    execute!(stdout, MoveTo(2, rows - 1), Print(formatted.join("")))?;
    Ok(())
}
