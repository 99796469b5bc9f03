// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, TerminalOutput};
use panelterm_common::sgr::SelectGraphicRendition;

/// Select Graphic Rendition
///
/// SGR sets the colors used for the following characters. Several codes can
/// be combined by separating them with a semicolon; they apply in the order
/// received. An empty parameter list resets both colors.
///
/// ESC [ Ps ; ... m
pub fn ansi_parser_inner_csi_finished_sgr(
    args: &[u16],
    narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    if narg == 0 {
        output.push(TerminalOutput::Sgr(SelectGraphicRendition::Reset));
        return ParserOutcome::Finished;
    }

    for &arg in args.iter().take(narg) {
        output.push(TerminalOutput::Sgr(SelectGraphicRendition::from_u16(arg)));
    }

    ParserOutcome::Finished
}
