// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! DEC private mode set/reset: origin mode, auto-wrap, and the recognised
//! but inert mode numbers.

use panelterm_emulator::ansi_components::{
    mode::TerminalModes,
    modes::{decawm::Decawm, decom::Decom},
};
use panelterm_emulator::state::internal::TerminalState;
use panelterm_panel::SimPanel;

fn terminal() -> TerminalState<SimPanel> {
    let (tx, _rx) = crossbeam_channel::unbounded();
    TerminalState::new(SimPanel::new(240, 320), tx).unwrap()
}

#[test]
fn modes_default_to_absolute_addressing_without_wrap() {
    let term = terminal();
    assert_eq!(term.modes, TerminalModes::default());
    assert_eq!(term.modes.origin_mode, Decom::Absolute);
    assert_eq!(term.modes.auto_wrap, Decawm::NoAutoWrap);
}

#[test]
fn origin_mode_set_and_reset() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?6h");
    assert_eq!(term.modes.origin_mode, Decom::WithinMargins);
    term.handle_incoming_data(b"\x1b[?6l");
    assert_eq!(term.modes.origin_mode, Decom::Absolute);
}

#[test]
fn auto_wrap_set_and_reset_change_margin_behavior() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?7h");
    assert_eq!(term.modes.auto_wrap, Decawm::AutoWrap);

    term.handle_incoming_data(b"\x1b[1;40H");
    term.feed(b'a');
    term.feed(b'b');
    assert_eq!(term.cursor.row, 1);

    term.handle_incoming_data(b"\x1b[?7l\x1b[1;40H");
    term.feed(b'a');
    term.feed(b'b');
    term.feed(b'c');
    assert_eq!(term.cursor.row, 0);
    assert_eq!(term.cursor.col, 40);
}

#[test]
fn recognised_mode_numbers_are_consumed_without_state_change() {
    let mut term = terminal();
    for sequence in [
        b"\x1b[?1h".as_slice(),
        b"\x1b[?2l",
        b"\x1b[?3h",
        b"\x1b[?4l",
        b"\x1b[?5h",
        b"\x1b[?8l",
        b"\x1b[?9h",
    ] {
        term.handle_incoming_data(sequence);
    }
    assert_eq!(term.modes, TerminalModes::default());
}

#[test]
fn unknown_mode_numbers_are_consumed_without_state_change() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?25l\x1b[?1049h\x1b[?2004h");
    assert_eq!(term.modes, TerminalModes::default());
    // The stream stays aligned: following text prints normally.
    term.handle_incoming_data(b"ok");
    assert_eq!(term.display().glyph_at(0, 0), Some(b'o'));
}

#[test]
fn dec_private_finals_other_than_h_l_are_consumed() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?5n\x1b[?1ix");
    // Only the trailing 'x' printed.
    assert_eq!(term.display().glyph_at(0, 0), Some(b'x'));
    assert_eq!(term.cursor.col, 1);
}

#[test]
fn modes_reset_with_the_terminal() {
    let mut term = terminal();
    term.handle_incoming_data(b"\x1b[?6h\x1b[?7h\x1bc");
    assert_eq!(term.modes, TerminalModes::default());
}
