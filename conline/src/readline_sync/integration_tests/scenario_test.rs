// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AliasTable, EditMode, InputEvent, LineEnding, ModifierKeysMask, Pos,
            ReadControl, ReadlineConfig, ReadlineContext, SpecialKey, SurfaceMock,
            TestClipboard, WakeMask, assert_eq2, keypress, lock_history, type_text};

fn special(key: SpecialKey) -> InputEvent { InputEvent::from(keypress! { @special key }) }

fn ctrl_special(key: SpecialKey) -> InputEvent {
    InputEvent::from(keypress! { @special ModifierKeysMask::new().with_ctrl(), key })
}

fn enter() -> InputEvent { special(SpecialKey::Enter) }

fn context(mode: EditMode) -> ReadlineContext {
    ReadlineContext::new(
        ReadlineConfig::default()
            .with_program_name("shell")
            .with_initial_edit_mode(mode),
    )
    .with_clipboard(Box::new(TestClipboard::default()))
}

/// A mock showing "> " followed by `seed`, with the cursor after the whole seed.
fn seeded_surface(seed: &str) -> (SurfaceMock, ReadControl) {
    let mock = SurfaceMock::new(40, 6).with_prompt("> ").with_prompt(seed);
    let control = ReadControl {
        initial_chars: seed.to_string(),
        initial_cursor: seed.chars().count(),
        wake_mask: WakeMask::NONE,
    };
    (mock, control)
}

#[test]
fn test_word_left_from_end_of_hello_world() {
    let (mock, control) = seeded_surface("hello world");
    let mut mock = mock.with_input(
        [ctrl_special(SpecialKey::Left), ctrl_special(SpecialKey::Left)]
            .into_iter()
            .chain(type_text(">"))
            .chain([enter()]),
    );
    let mut context = context(EditMode::Insert);

    let output = context.read_line(&mut mock, 64, Some(&control)).unwrap();
    assert_eq2!(output.text, ">hello world\r\n");
    assert_eq2!(mock.row_text(0), "> >hello world");
}

#[test]
fn test_alias_with_positional_argument() {
    let mut mock = SurfaceMock::new(40, 6)
        .with_prompt("> ")
        .with_input(type_text("go /tmp").chain([enter()]));
    let mut context = context(EditMode::Insert)
        .with_aliases(Box::new(AliasTable::new().with_alias("shell", "go", "cd $1")));

    let output = context.read_line(&mut mock, 64, None).unwrap();
    assert_eq2!(output.text, "cd /tmp\r\n");
    assert_eq2!(output.len, 9);
    // History keeps what was typed.
    assert_eq2!(lock_history(&context.history).get(0), Some("go /tmp"));
}

#[test]
fn test_alias_with_all_arguments() {
    let mut mock = SurfaceMock::new(40, 6)
        .with_prompt("> ")
        .with_input(type_text("ls a b c").chain([enter()]));
    let mut context = context(EditMode::Overwrite)
        .with_aliases(Box::new(AliasTable::new().with_alias("shell", "ls", "list $*")));

    let output = context.read_line(&mut mock, 64, None).unwrap();
    assert_eq2!(output.text, "list a b c\r\n");
}

#[test]
fn test_aliases_are_scoped_by_program() {
    let mut mock = SurfaceMock::new(40, 6)
        .with_prompt("> ")
        .with_input(type_text("go /tmp").chain([enter()]));
    let mut context = context(EditMode::Insert)
        .with_aliases(Box::new(AliasTable::new().with_alias("other", "go", "cd $1")));

    let output = context.read_line(&mut mock, 64, None).unwrap();
    assert_eq2!(output.text, "go /tmp\r\n");
}

#[test]
fn test_history_older_stops_at_oldest() {
    let mut context = context(EditMode::Insert);
    {
        let mut history = lock_history(&context.history);
        history.push_front("first");
        history.push_front("second");
        history.push_front("third");
    }

    let up = special(SpecialKey::Up);
    let mut mock = SurfaceMock::new(40, 6).with_prompt("> ").with_input([
        up.clone(),
        up.clone(),
        up.clone(),
        up,
        enter(),
    ]);

    let output = context.read_line(&mut mock, 64, None).unwrap();
    assert_eq2!(output.text, "first\r\n");
    assert_eq2!(mock.row_text(0), "> first");
    // Re-submitting an entry records it again.
    assert_eq2!(lock_history(&context.history).get(0), Some("first"));
    assert_eq2!(lock_history(&context.history).len(), 4);
}

#[test]
fn test_full_buffer_rejects_insert() {
    let (mock, control) = seeded_surface("abcdefghij");
    let mut mock = mock.with_input(type_text("k").chain([enter()]));
    let mut context = context(EditMode::Insert);

    // Ten units to edit plus two for the terminator.
    let output = context.read_line(&mut mock, 12, Some(&control)).unwrap();
    assert_eq2!(output.text, "abcdefghij\r\n");
    assert_eq2!(output.len, 12);
    assert_eq2!(mock.row_text(0), "> abcdefghij");
}

#[test]
fn test_long_line_wraps_and_edits_across_rows() {
    let mut mock = SurfaceMock::new(10, 6)
        .with_prompt("> ")
        .with_input(type_text("abcdefghijkl"));
    let mut context = context(EditMode::Insert);
    mock.push_input([special(SpecialKey::Home)]);
    mock.push_input(type_text("XY"));
    mock.push_input([enter()]);

    let output = context.read_line(&mut mock, 64, None).unwrap();
    assert_eq2!(output.text, "XYabcdefghijkl\r\n");
    assert_eq2!(mock.row_text(0), "> XYabcdef");
    assert_eq2!(mock.row_text(1), "ghijkl");
    // The terminator goes after the end of the line, not after the cursor position
    // where typing stopped.
    assert_eq2!(mock.cursor, Pos::new(2, 0));
}

#[test]
fn test_insert_at_bottom_row_scrolls_and_keeps_cursor_in_place() {
    // Two rows, with the prompt on the bottom one.
    let mut mock = SurfaceMock::new(6, 2).with_prompt("\r\n> ab");
    mock.push_input([special(SpecialKey::Left)]);
    mock.push_input(type_text("XYZ"));
    let control = ReadControl {
        initial_chars: "ab".to_string(),
        initial_cursor: 2,
        wake_mask: WakeMask::NONE.with_unit('\u{4}'),
    };
    mock.push_input([InputEvent::from(keypress! {
        @char ModifierKeysMask::new().with_ctrl(), 'd'
    })]);
    let mut context = context(EditMode::Insert);

    let output = context.read_line(&mut mock, 64, Some(&control)).unwrap();
    assert_eq2!(output.ending, LineEnding::EarlyReturn);
    // The wake unit lands on the "b" under the cursor, the padding goes at the end.
    assert_eq2!(output.text, "aXYZ\u{4} ");
    assert_eq2!(mock.scroll_count, 1);
    assert_eq2!(mock.row_text(0), "> aXYZ");
    assert_eq2!(mock.row_text(1), "b");
    assert_eq2!(mock.cursor, Pos::new(1, 0));
}

#[test]
fn test_wake_mask_padding_is_not_normalized() {
    // A caller sees one extra unit in the length, and when the cursor is not at the
    // end, the unit under it is replaced rather than shifted.
    let (mock, mut control) = seeded_surface("cmd arg");
    control.initial_cursor = 3;
    control.wake_mask = WakeMask::NONE.with_unit('\t');
    let mut mock = mock.with_input([special(SpecialKey::Tab)]);
    let mut context = context(EditMode::Insert);

    let output = context.read_line(&mut mock, 64, Some(&control)).unwrap();
    assert_eq2!(output.ending, LineEnding::EarlyReturn);
    assert_eq2!(output.text, "cmd\targ ");
    assert_eq2!(output.len, 8);
    // The screen is left as it was.
    assert_eq2!(mock.row_text(0), "> cmd arg");
}

#[test]
fn test_control_units_render_in_caret_notation() {
    let mut mock = SurfaceMock::new(40, 6).with_prompt("> ").with_input([
        InputEvent::BracketedPaste("a\u{1}b".to_string()),
        special(SpecialKey::Left),
        special(SpecialKey::Left),
        special(SpecialKey::Backspace),
        enter(),
    ]);
    let mut context = context(EditMode::Insert);

    // Check the screen mid way with a second context on a copy of the script.
    let mut midway = mock.clone();
    midway.input.truncate(1);
    midway.push_input([enter()]);
    context.read_line(&mut midway, 64, None).unwrap();
    assert_eq2!(midway.row_text(0), "> a^Ab");

    let output = context.read_line(&mut mock, 64, None).unwrap();
    assert_eq2!(output.text, "\u{1}b\r\n");
    assert_eq2!(mock.row_text(0), "> ^Ab");
}
