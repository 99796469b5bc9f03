// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, TerminalOutput};

/// Erase in Display
///
/// Ps = 0 (or absent): erase from the cursor line to the end of the screen.
/// Ps = 1: erase from the top of the screen through the cursor line.
/// Ps = 2: erase the whole screen and reset the scroll rotation.
///
/// ESC [ Ps J
pub fn ansi_parser_inner_csi_finished_set_position_j(
    args: &[u16],
    narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let selector = if narg > 0 { args[0] } else { 0 };

    let command = match selector {
        0 => TerminalOutput::ClearDisplayForwards,
        1 => TerminalOutput::ClearDisplayBackwards,
        2 => TerminalOutput::ClearDisplay,
        _ => {
            debug!("Ignoring erase-display selector {selector}");
            TerminalOutput::Skipped
        }
    };

    output.push(command);
    ParserOutcome::Finished
}
