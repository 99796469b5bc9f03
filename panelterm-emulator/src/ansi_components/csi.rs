// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, TerminalOutput};
use crate::ansi_components::mode::{Mode, SetMode};

use super::csi_commands::{
    cub::ansi_parser_inner_csi_finished_move_left,
    cud::ansi_parser_inner_csi_finished_move_down,
    cuf::ansi_parser_inner_csi_finished_move_right,
    cup::ansi_parser_inner_csi_finished_set_position_h,
    cuu::ansi_parser_inner_csi_finished_move_up, da::ansi_parser_inner_csi_finished_send_da,
    dch::ansi_parser_inner_csi_finished_delete_p, decstbm::ansi_parser_inner_csi_finished_margins_r,
    ed::ansi_parser_inner_csi_finished_set_position_j,
    el::ansi_parser_inner_csi_finished_set_position_k,
    sgr::ansi_parser_inner_csi_finished_sgr,
};

/// Maximum number of numeric parameters a control sequence can carry.
/// Additional separators keep writing into the last slot so the sequence
/// stays aligned without growing state.
pub const MAX_ARGS: usize = 4;

/// Whether the sequence is a plain CSI or the DEC private (`CSI ?`) flavor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CsiKind {
    #[default]
    Standard,
    DecPrivate,
}

/// Parser for everything between `ESC [` and the final byte.
///
/// Numeric parameters accumulate into fixed slots. A digit switches the
/// parser into the accumulator; any byte that is neither a digit nor `;`
/// closes the open parameter and is *re-processed*, so the final byte both
/// terminates the argument list and dispatches the command.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct AnsiCsiParser {
    pub kind: CsiKind,
    pub args: [u16; MAX_ARGS],
    pub narg: usize,
    accumulating: bool,
}

impl AnsiCsiParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: CsiKind::Standard,
            args: [0; MAX_ARGS],
            narg: 0,
            accumulating: false,
        }
    }

    /// Push a byte into the parser, appending any completed command to
    /// `output`.
    pub fn push(&mut self, b: u8, output: &mut Vec<TerminalOutput>) -> ParserOutcome {
        if self.accumulating {
            return match b {
                b'0'..=b'9' => {
                    self.args[self.narg] = self.args[self.narg]
                        .saturating_mul(10)
                        .saturating_add(u16::from(b - b'0'));
                    ParserOutcome::Continue
                }
                b';' => {
                    self.narg = (self.narg + 1).min(MAX_ARGS - 1);
                    ParserOutcome::Continue
                }
                _ => {
                    // Close the open argument and re-process the byte so the
                    // final byte still dispatches.
                    self.narg = (self.narg + 1).min(MAX_ARGS);
                    self.accumulating = false;
                    self.push(b, output)
                }
            };
        }

        match b {
            b'0'..=b'9' => {
                self.accumulating = true;
                self.push(b, output)
            }
            // Arguments are zero-initialised; a separator with no open
            // argument has nothing to do.
            b';' => ParserOutcome::Continue,
            b'?' => {
                self.kind = CsiKind::DecPrivate;
                ParserOutcome::Continue
            }
            _ => match self.kind {
                CsiKind::Standard => self.dispatch_standard(b, output),
                CsiKind::DecPrivate => self.dispatch_dec_private(b, output),
            },
        }
    }

    fn dispatch_standard(&self, b: u8, output: &mut Vec<TerminalOutput>) -> ParserOutcome {
        match b {
            b'A' => ansi_parser_inner_csi_finished_move_up(&self.args, self.narg, output),
            b'B' => ansi_parser_inner_csi_finished_move_down(&self.args, self.narg, output),
            b'C' => ansi_parser_inner_csi_finished_move_right(&self.args, self.narg, output),
            b'D' => ansi_parser_inner_csi_finished_move_left(&self.args, self.narg, output),
            b'H' | b'f' => {
                ansi_parser_inner_csi_finished_set_position_h(&self.args, self.narg, output)
            }
            b'J' => ansi_parser_inner_csi_finished_set_position_j(&self.args, self.narg, output),
            b'K' => ansi_parser_inner_csi_finished_set_position_k(&self.args, self.narg, output),
            b'P' => ansi_parser_inner_csi_finished_delete_p(&self.args, self.narg, output),
            b'm' => ansi_parser_inner_csi_finished_sgr(&self.args, self.narg, output),
            b'r' => ansi_parser_inner_csi_finished_margins_r(&self.args, self.narg, output),
            b'c' => ansi_parser_inner_csi_finished_send_da(&self.args, self.narg, output),
            b's' => {
                output.push(TerminalOutput::SaveCursor);
                ParserOutcome::Finished
            }
            b'u' => {
                output.push(TerminalOutput::RestoreCursor);
                ParserOutcome::Finished
            }
            // Line insert/delete, tab clear, ECH-family, printing, self
            // test, screen-mode arguments and the ANSI h/l modes are
            // consumed without effect.
            b'L' | b'M' | b'g' | b'x' | b'@' | b'i' | b'y' | b'=' | b'h' | b'l' => {
                debug!(
                    "Consuming CSI final byte {:?} without effect",
                    char::from(b)
                );
                output.push(TerminalOutput::Skipped);
                ParserOutcome::Finished
            }
            _ => {
                debug!("Ignoring unknown CSI final byte {:?}", char::from(b));
                output.push(TerminalOutput::Skipped);
                ParserOutcome::Finished
            }
        }
    }

    fn dispatch_dec_private(&self, b: u8, output: &mut Vec<TerminalOutput>) -> ParserOutcome {
        match b {
            b'h' => {
                output.push(TerminalOutput::Mode(Mode::from_dec_params(
                    self.args[0],
                    SetMode::Set,
                )));
                ParserOutcome::Finished
            }
            b'l' => {
                output.push(TerminalOutput::Mode(Mode::from_dec_params(
                    self.args[0],
                    SetMode::Reset,
                )));
                ParserOutcome::Finished
            }
            _ => {
                debug!(
                    "Ignoring DEC private final byte {:?}",
                    char::from(b)
                );
                output.push(TerminalOutput::Skipped);
                ParserOutcome::Finished
            }
        }
    }
}
