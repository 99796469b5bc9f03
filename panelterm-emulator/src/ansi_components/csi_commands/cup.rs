// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, TerminalOutput};

/// Cursor Position
///
/// CUP moves the cursor to an absolute 1-based position. Missing or zero
/// coordinates mean line/column 1. When origin mode is set, the row is
/// relative to the top of the scroll region; that translation happens where
/// the margins are known.
///
/// ESC [ Pl ; Pc H  (also ESC [ Pl ; Pc f)
pub fn ansi_parser_inner_csi_finished_set_position_h(
    args: &[u16],
    _narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    output.push(TerminalOutput::SetCursorPos {
        row: args[0],
        col: args[1],
    });
    ParserOutcome::Finished
}
