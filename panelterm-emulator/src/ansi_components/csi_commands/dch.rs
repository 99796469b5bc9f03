// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::count_or_one;
use crate::ansi::{ParserOutcome, TerminalOutput};

/// Delete Character
///
/// DCH removes Pn characters behind the cursor. With a write-only
/// framebuffer there is nothing to shift left, so the terminal backs up and
/// overwrites with blanks.
///
/// ESC [ Pn P
pub fn ansi_parser_inner_csi_finished_delete_p(
    args: &[u16],
    narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    output.push(TerminalOutput::Delete(count_or_one(args, narg)));
    ParserOutcome::Finished
}
