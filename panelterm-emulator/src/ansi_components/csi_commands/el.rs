// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, TerminalOutput};

/// Erase in Line
///
/// Ps = 0 (or absent): erase from the cursor to the end of the line.
/// Ps = 1: erase from the start of the line through the cursor.
/// Ps = 2: erase the whole line.
///
/// ESC [ Ps K
pub fn ansi_parser_inner_csi_finished_set_position_k(
    args: &[u16],
    narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let selector = if narg > 0 { args[0] } else { 0 };

    let command = match selector {
        0 => TerminalOutput::ClearLineForwards,
        1 => TerminalOutput::ClearLineBackwards,
        2 => TerminalOutput::ClearLine,
        _ => {
            debug!("Ignoring erase-line selector {selector}");
            TerminalOutput::Skipped
        }
    };

    output.push(command);
    ParserOutcome::Finished
}
