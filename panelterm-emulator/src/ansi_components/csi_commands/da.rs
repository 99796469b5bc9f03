// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, TerminalOutput};

/// Send Device Attributes
///
/// DA asks the terminal to identify itself; the reply is a VT100 with no
/// options regardless of the parameter.
///
/// ESC [ Ps c
pub fn ansi_parser_inner_csi_finished_send_da(
    _args: &[u16],
    _narg: usize,
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    output.push(TerminalOutput::DeviceAttributes);
    ParserOutcome::Finished
}
