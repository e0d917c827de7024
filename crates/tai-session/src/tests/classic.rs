use super::*;

fn classic_controller() -> DispatchController<FakeEngine> {
    controller_with(
        FakeEngine::with_candidates(&[("tai", &["臺"]), ("gi", &["語"])]),
        InputMode::Classic,
        OutputMode::LomajiFirst,
    )
}

// --- Punctuation-insert protocol ---

#[test]
fn word_then_period_inserts_word_and_period_separately() {
    let mut c = classic_controller();

    type_str(&mut c, "tai");
    assert!(c.is_composing());

    let result = c.handle_key(0, ".", 0);
    assert!(result.handled);
    // One insert for the word, one for the period, in that order, never
    // combined into a single call
    assert_eq!(inserts(&result), vec!["臺", "."]);
    assert!(!c.is_composing());
}

#[test]
fn period_alone_inserts_immediately() {
    let mut c = classic_controller();

    let result = c.handle_key(0, ".", 0);
    assert!(result.handled);
    assert_eq!(inserts(&result), vec!["."]);
    assert!(!c.is_composing());
}

#[test]
fn shifted_comma_remaps_to_angle_bracket() {
    let mut c = classic_controller();

    type_str(&mut c, "tai");
    let result = c.handle_key(0, ",", FLAG_SHIFT);
    assert!(result.handled);
    assert_eq!(inserts(&result), vec!["臺", "<"]);
}

#[test]
fn shifted_quote_remaps_to_double_quote() {
    let mut c = classic_controller();

    let result = c.handle_key(0, "'", FLAG_SHIFT);
    assert_eq!(inserts(&result), vec!["\""]);
}

#[test]
fn direct_punctuation_table_members_insert() {
    for punct in [".", ",", "'", "=", "[", "]", ";"] {
        let mut c = classic_controller();
        let result = c.handle_key(0, punct, 0);
        assert!(result.handled, "{punct} should be handled");
        assert_eq!(inserts(&result), vec![punct]);
    }
}

#[test]
fn unmatched_punctuation_idle_passes_through() {
    let mut c = classic_controller();

    // Not in either classic table, nothing composing
    let result = c.handle_key(0, "\\", 0);
    assert!(!result.handled);
    assert!(result.ops.is_empty());
}

// --- Digit remaps ---

#[test]
fn shifted_digit_remaps_to_punctuation() {
    for (digit, expected) in [("1", "!"), ("9", "("), ("0", ")")] {
        let mut c = classic_controller();
        type_str(&mut c, "tai");
        let result = c.handle_key(0, digit, FLAG_SHIFT);
        assert!(result.handled);
        assert_eq!(inserts(&result), vec!["臺", expected]);
    }
}

#[test]
fn other_shifted_digit_flushes_and_passes_through() {
    let mut c = classic_controller();

    type_str(&mut c, "tai");
    let result = c.handle_key(0, "5", FLAG_SHIFT);
    assert!(!result.handled);
    assert_eq!(inserts(&result), vec!["臺"]);
    assert!(!c.is_composing());
}

#[test]
fn plain_digit_marks_composition() {
    let mut c = classic_controller();

    let result = c.handle_key(0, "2", 0);
    assert!(result.handled);
    assert!(inserts(&result).is_empty());
    assert_eq!(result.marked(), Some("2"));
}

#[test]
fn digit_flushes_prior_pending_commit_before_marking() {
    let mut c = classic_controller();

    type_str(&mut c, "tai");
    c.engine_mut().script(pipelined_commit_response("臺", "2"));
    let result = c.handle_key(0, "2", 0);
    assert!(result.handled);
    assert_eq!(inserts(&result), vec!["臺"]);
    assert_eq!(result.marked(), Some("2"));
    assert!(c.is_composing());
}

// --- Full-width space ---

#[test]
fn shift_space_idle_hanji_first_inserts_full_width_space() {
    let mut c = controller(InputMode::Classic, OutputMode::HanjiFirst);

    let result = c.handle_key(key::SPACE, "", FLAG_SHIFT);
    assert!(result.handled);
    assert_eq!(inserts(&result), vec!["\u{3000}"]);
}

#[test]
fn shift_space_idle_lomaji_first_passes_through() {
    let mut c = controller(InputMode::Classic, OutputMode::LomajiFirst);

    let result = c.handle_key(key::SPACE, "", FLAG_SHIFT);
    assert!(!result.handled);
    assert!(result.ops.is_empty());
}

// --- Word boundary ---

#[test]
fn letter_after_trailing_punctuation_commits_first() {
    let mut c = classic_controller();

    type_str(&mut c, "ta");
    // Engine reports a composition whose rendered text ends in punctuation
    c.engine_mut().script(composing_response("tai.", EditState::Composing));
    c.handle_key(0, "i", 0);
    assert_eq!(c.display_text(), "tai.");

    let result = c.handle_key(0, "g", 0);
    assert!(result.handled);
    // Punctuation terminates the word: committed before the letter is fed
    assert_eq!(inserts(&result), vec!["tai."]);
    assert_eq!(result.marked(), Some("g"));
}

// --- Pipelined commits ---

#[test]
fn enter_commit_remarks_remaining_composition() {
    let mut c = classic_controller();

    type_str(&mut c, "taigi");
    c.engine_mut().script(pipelined_commit_response("臺", "gi"));
    let result = c.handle_key(key::ENTER, "", 0);
    assert!(result.handled);
    assert_eq!(inserts(&result), vec!["臺"]);
    assert_eq!(result.marked(), Some("gi"));
    assert!(c.is_composing());
}

#[test]
fn space_forwards_shift_flag_to_engine() {
    let mut c = classic_controller();

    type_str(&mut c, "tai");
    c.handle_key(key::SPACE, "", FLAG_SHIFT);
    assert!(c.engine().calls.contains(&"space:true".to_string()));
}
