// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::count_or_one;
use crate::ansi::{ParserOutcome, TerminalOutput};

/// Cursor Down
///
/// CUD moves the cursor down Pn lines, stopping at the bottom margin.
///
/// ESC [ Pn B
pub fn ansi_parser_inner_csi_finished_move_down(
    args: &[u16],
    narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    output.push(TerminalOutput::CursorDown(count_or_one(args, narg)));
    ParserOutcome::Finished
}
