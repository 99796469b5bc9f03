// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cursor motion: margin stops, auto-wrap, tabs, backspace, and the
//! past-the-end column.

use panelterm_emulator::state::{cursor::CursorPos, internal::TerminalState};
use panelterm_panel::SimPanel;

fn terminal() -> TerminalState<SimPanel> {
    let (tx, _rx) = crossbeam_channel::unbounded();
    // The receiver is dropped; responses are logged and discarded.
    TerminalState::new(SimPanel::new(240, 320), tx).unwrap()
}

#[test]
fn printing_without_wrap_parks_at_the_right_margin() {
    for (count, expected_col) in [(10_usize, 10_usize), (39, 39), (40, 40), (45, 40)] {
        let mut term = terminal();
        for _ in 0..count {
            term.feed(b'x');
        }
        assert_eq!(term.cursor, CursorPos::new(0, expected_col), "count {count}");
    }
}

#[test]
fn printing_one_past_the_width_wraps_to_the_next_row() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?7h");
    for _ in 0..41 {
        term.feed(b'x');
    }
    assert_eq!(term.cursor, CursorPos::new(1, 0));
}

#[test]
fn glyphs_never_draw_in_the_past_the_end_column() {
    let mut term = terminal();
    for _ in 0..45 {
        term.feed(b'x');
    }
    // Only the 40 real columns hold glyphs.
    let row = &term.display().visible_text()[0];
    assert_eq!(row.chars().filter(|&c| c == 'x').count(), 40);
}

#[test]
fn backspace_after_writing_returns_to_the_start() {
    let mut term = terminal();
    term.handle_incoming_data(b"abc\x08\x08\x08");
    assert_eq!(term.cursor, CursorPos::new(0, 0));
    // Backspace moves; it does not erase.
    assert_eq!(term.display().glyph_at(0, 0), Some(b'a'));
}

#[test]
fn tab_pads_with_spaces_to_the_next_stop() {
    let mut term = terminal();
    term.feed(b'\t');
    assert_eq!(term.cursor.col, 4);

    let mut term = terminal();
    term.handle_incoming_data(b"ab\t");
    assert_eq!(term.cursor.col, 4);
    assert_eq!(term.display().glyph_at(12, 0), Some(b' '));

    // A tab at a stop advances a full stop.
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[1;5H\t");
    assert_eq!(term.cursor.col, 8);
}

#[test]
fn delete_blanks_the_cell_under_the_cursor() {
    let mut term = terminal();
    term.handle_incoming_data(b"ab\x7f");
    assert_eq!(term.cursor.col, 2);
    assert_eq!(term.display().glyph_at(12, 0), Some(b' '));
    assert_eq!(term.display().glyph_at(0, 0), Some(b'a'));
}

#[test]
fn carriage_return_and_newline() {
    let mut term = terminal();
    term.handle_incoming_data(b"hello\r");
    assert_eq!(term.cursor, CursorPos::new(0, 0));
    term.handle_incoming_data(b"hello\n");
    assert_eq!(term.cursor, CursorPos::new(1, 0));
}

#[test]
fn next_line_matches_cr_lf() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[3;7H\x1bE");
    assert_eq!(term.cursor, CursorPos::new(3, 0));
}

#[test]
fn explicit_cursor_commands_stop_at_margins() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[99A");
    assert_eq!(term.cursor.row, 0);

    term.handle_incoming_data(b"\x1b[999B");
    assert_eq!(term.cursor.row, 40);

    term.handle_incoming_data(b"\x1b[999C");
    assert_eq!(term.cursor.col, 40);

    term.handle_incoming_data(b"\x1b[999D");
    assert_eq!(term.cursor.col, 0);
}

#[test]
fn cursor_commands_never_scroll() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[40;1H\x1b[5B");
    assert_eq!(term.scroll_value, 0);
    term.handle_incoming_data(b"\x1b[1;1H\x1b[5A");
    assert_eq!(term.scroll_value, 0);
}

#[test]
fn out_of_range_position_clamps_to_the_grid() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[99;99H");
    assert_eq!(term.cursor, CursorPos::new(40, 40));
}

#[test]
fn missing_position_arguments_default_to_one() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[5;5H\x1b[H");
    assert_eq!(term.cursor, CursorPos::new(0, 0));

    term.handle_incoming_data(b"\x1b[7H");
    assert_eq!(term.cursor, CursorPos::new(6, 0));
}

#[test]
fn leading_separator_does_not_open_an_empty_argument() {
    // Separators outside the accumulator are ignored, so the 9 lands in the
    // first slot and addresses the row.
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[;9H");
    assert_eq!(term.cursor, CursorPos::new(8, 0));
}

#[test]
fn zero_position_arguments_mean_one() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[5;5H\x1b[0;0H");
    assert_eq!(term.cursor, CursorPos::new(0, 0));
}

#[test]
fn hvp_is_an_alias_for_cup() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[12;8f");
    assert_eq!(term.cursor, CursorPos::new(11, 7));
}

#[test]
fn unprintable_bytes_render_as_hex_pairs() {
    let mut term = terminal();
    term.feed(0xff);
    let row = &term.display().visible_text()[0];
    assert!(row.starts_with("0xff"));
    assert_eq!(term.cursor.col, 4);

    term.feed(0x02);
    let row = &term.display().visible_text()[0];
    assert!(row.starts_with("0xff0x02"));
}

#[test]
fn writing_at_the_bottom_right_with_wrap_scrolls() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?7h\x1b[40;40H");
    term.feed(b'x');
    // The glyph lands in the last cell, then the wrap crosses the bottom
    // margin and scrolls one line.
    term.feed(b'y');
    assert_eq!(term.scroll_value, 1);
    assert_eq!(term.cursor.row, 39);
}
