// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

use crate::ansi_components::{
    charset::{CharsetKind, CharsetParser},
    csi::AnsiCsiParser,
    mode::Mode,
    trace::SequenceTrace,
};
use panelterm_common::sgr::SelectGraphicRendition;

/// Represents the high-level result of feeding one byte to a sub-parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserOutcome {
    /// The byte was consumed and the sequence is still in progress.
    Continue,
    /// The byte completed the sequence; the parser returns to ground state.
    Finished,
}

/// Normalized terminal effects produced by the parser.
///
/// Printable runs are coalesced into `Data`; everything else is one variant
/// per completed control function. Sequences that are recognised but have no
/// visible effect come out as `Skipped` so the stream stays aligned.
#[derive(Debug, Eq, PartialEq)]
pub enum TerminalOutput {
    Data(Vec<u8>),
    AnswerBack,
    Bell,
    Backspace,
    HorizontalTab,
    Newline,
    CarriageReturn,
    DeleteChar,
    Index,
    ReverseIndex,
    NextLine,
    SaveCursor,
    RestoreCursor,
    IdentifyTerminal,
    ResetDevice,
    CursorUp(u16),
    CursorDown(u16),
    CursorForward(u16),
    CursorBack(u16),
    /// 1-based coordinates as sent by the host; 0 means "default".
    SetCursorPos {
        row: u16,
        col: u16,
    },
    ClearDisplayForwards,
    ClearDisplayBackwards,
    ClearDisplay,
    ClearLineForwards,
    ClearLineBackwards,
    ClearLine,
    Delete(u16),
    Sgr(SelectGraphicRendition),
    Mode(Mode),
    /// 1-based margin rows as sent by the host, already checked for order.
    SetScrollRegion {
        top: u16,
        bottom: u16,
    },
    ResetScrollRegion,
    DeviceAttributes,
    Skipped,
}

impl fmt::Display for TerminalOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(data) => write!(f, "Data({})", String::from_utf8_lossy(data)),
            Self::AnswerBack => write!(f, "AnswerBack"),
            Self::Bell => write!(f, "Bell"),
            Self::Backspace => write!(f, "Backspace"),
            Self::HorizontalTab => write!(f, "HorizontalTab"),
            Self::Newline => write!(f, "Newline"),
            Self::CarriageReturn => write!(f, "CarriageReturn"),
            Self::DeleteChar => write!(f, "DeleteChar"),
            Self::Index => write!(f, "Index"),
            Self::ReverseIndex => write!(f, "ReverseIndex"),
            Self::NextLine => write!(f, "NextLine"),
            Self::SaveCursor => write!(f, "SaveCursor"),
            Self::RestoreCursor => write!(f, "RestoreCursor"),
            Self::IdentifyTerminal => write!(f, "IdentifyTerminal"),
            Self::ResetDevice => write!(f, "ResetDevice"),
            Self::CursorUp(n) => write!(f, "CursorUp({n})"),
            Self::CursorDown(n) => write!(f, "CursorDown({n})"),
            Self::CursorForward(n) => write!(f, "CursorForward({n})"),
            Self::CursorBack(n) => write!(f, "CursorBack({n})"),
            Self::SetCursorPos { row, col } => write!(f, "SetCursorPos: row: {row}, col: {col}"),
            Self::ClearDisplayForwards => write!(f, "ClearDisplayForwards"),
            Self::ClearDisplayBackwards => write!(f, "ClearDisplayBackwards"),
            Self::ClearDisplay => write!(f, "ClearDisplay"),
            Self::ClearLineForwards => write!(f, "ClearLineForwards"),
            Self::ClearLineBackwards => write!(f, "ClearLineBackwards"),
            Self::ClearLine => write!(f, "ClearLine"),
            Self::Delete(n) => write!(f, "Delete({n})"),
            Self::Sgr(sgr) => write!(f, "Sgr({sgr})"),
            Self::Mode(mode) => write!(f, "SetMode({mode})"),
            Self::SetScrollRegion { top, bottom } => {
                write!(f, "SetScrollRegion({top}, {bottom})")
            }
            Self::ResetScrollRegion => write!(f, "ResetScrollRegion"),
            Self::DeviceAttributes => write!(f, "DeviceAttributes"),
            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

fn push_data_if_non_empty(data: &mut Vec<u8>, output: &mut Vec<TerminalOutput>) {
    if !data.is_empty() {
        output.push(TerminalOutput::Data(std::mem::take(data)));
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum ParserInner {
    Idle,
    Escape,
    Csi(AnsiCsiParser),
    Charset(CharsetParser),
}

#[derive(Debug)]
pub struct PaneltermAnsiParser {
    pub inner: ParserInner,
    // Accumulates plain text between control sequences, reducing per-call
    // allocations and enabling coalesced Data emissions.
    pending_data: Vec<u8>,
    seq_trace: SequenceTrace,
}

impl PartialEq for PaneltermAnsiParser {
    // The diagnostic byte trace does not participate: two parsers that will
    // behave identically compare equal regardless of input history.
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.pending_data == other.pending_data
    }
}

impl Eq for PaneltermAnsiParser {}

impl Default for PaneltermAnsiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneltermAnsiParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: ParserInner::Idle,
            pending_data: Vec::new(),
            seq_trace: SequenceTrace::new(),
        }
    }

    /// Ground-state handling of a single byte. `Err` means the byte was fully
    /// consumed here (control function or state change); `Ok` means it is
    /// plain data for the glyph path.
    fn ansi_parser_inner_idle(
        &mut self,
        b: u8,
        data_output: &mut Vec<u8>,
        output: &mut Vec<TerminalOutput>,
    ) -> Result<(), ()> {
        let consumed = match b {
            0x1b => {
                self.inner = ParserInner::Escape;
                return Err(());
            }
            0x05 => TerminalOutput::AnswerBack,
            0x07 => TerminalOutput::Bell,
            0x08 => TerminalOutput::Backspace,
            0x09 => TerminalOutput::HorizontalTab,
            b'\n' => TerminalOutput::Newline,
            b'\r' => TerminalOutput::CarriageReturn,
            0x7f => TerminalOutput::DeleteChar,
            _ => return Ok(()),
        };

        push_data_if_non_empty(data_output, output);
        output.push(consumed);
        Err(())
    }

    fn ansi_parser_inner_escape(
        &mut self,
        b: u8,
        data_output: &mut Vec<u8>,
        output: &mut Vec<TerminalOutput>,
    ) {
        // ESC inside an escape restarts the sequence.
        if b == 0x1b {
            self.inner = ParserInner::Escape;
            return;
        }

        push_data_if_non_empty(data_output, output);

        match b {
            b'[' => {
                self.inner = ParserInner::Csi(AnsiCsiParser::new());
                return;
            }
            b'(' => {
                self.inner = ParserInner::Charset(CharsetParser::new(CharsetKind::G0));
                return;
            }
            b')' => {
                self.inner = ParserInner::Charset(CharsetParser::new(CharsetKind::G1));
                return;
            }
            b'#' => {
                self.inner = ParserInner::Charset(CharsetParser::new(CharsetKind::AlignmentTest));
                return;
            }
            _ => (),
        }

        let command = match b {
            b'D' => TerminalOutput::Index,
            b'M' => TerminalOutput::ReverseIndex,
            b'E' => TerminalOutput::NextLine,
            b'7' | b's' => TerminalOutput::SaveCursor,
            b'8' | b'u' => TerminalOutput::RestoreCursor,
            b'c' => TerminalOutput::ResetDevice,
            b'Z' => TerminalOutput::IdentifyTerminal,
            // DCS introducer, keypad modes, tab set, single shifts, vt52 exit
            b'P' | b'=' | b'>' | b'H' | b'N' | b'O' | b'<' => TerminalOutput::Skipped,
            _ => {
                debug!(
                    "Ignoring unknown escape byte {:?}; recent={}",
                    char::from(b),
                    self.seq_trace.as_printable()
                );
                TerminalOutput::Skipped
            }
        };

        output.push(command);
        self.inner = ParserInner::Idle;
    }

    /// Feed a chunk of host bytes and collect the completed effects, in
    /// stream order. Feeding byte-by-byte produces the same effects as
    /// feeding one large chunk, apart from `Data` batching.
    pub fn push(&mut self, incoming: &[u8]) -> Vec<TerminalOutput> {
        // Take the pending buffer out temporarily
        let mut data_output = std::mem::take(&mut self.pending_data);
        let mut output = Vec::new();

        for &b in incoming {
            self.seq_trace.push(b);

            match &mut self.inner {
                ParserInner::Idle => {
                    if self
                        .ansi_parser_inner_idle(b, &mut data_output, &mut output)
                        .is_err()
                    {
                        continue;
                    }

                    data_output.push(b);
                }
                ParserInner::Escape => {
                    self.ansi_parser_inner_escape(b, &mut data_output, &mut output);
                }
                ParserInner::Csi(parser) => {
                    if parser.push(b, &mut output) == ParserOutcome::Finished {
                        self.inner = ParserInner::Idle;
                    }
                }
                ParserInner::Charset(parser) => {
                    if parser.push(b, &mut output) == ParserOutcome::Finished {
                        self.inner = ParserInner::Idle;
                    }
                }
            }
        }

        // Flush any accumulated data
        if !data_output.is_empty() {
            output.push(TerminalOutput::Data(std::mem::take(&mut data_output)));
        }

        // Put the buffer back into self (no allocations, same Vec reused)
        self.pending_data = data_output;

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_data_if_non_empty_behavior() {
        let mut data = vec![b'a', b'b'];
        let mut output = Vec::new();
        push_data_if_non_empty(&mut data, &mut output);
        assert_eq!(data.len(), 0);
        assert_eq!(output.len(), 1);
        push_data_if_non_empty(&mut data, &mut output);
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn idle_control_bytes_emit_their_outputs() {
        let mut p = PaneltermAnsiParser::new();
        let mut out = vec![];
        let mut data = vec![];

        assert!(p.ansi_parser_inner_idle(0x1b, &mut data, &mut out).is_err());
        assert_eq!(p.inner, ParserInner::Escape);

        p.inner = ParserInner::Idle;
        for &(b, ref expected) in &[
            (0x05, TerminalOutput::AnswerBack),
            (0x07, TerminalOutput::Bell),
            (0x08, TerminalOutput::Backspace),
            (0x09, TerminalOutput::HorizontalTab),
            (b'\n', TerminalOutput::Newline),
            (b'\r', TerminalOutput::CarriageReturn),
            (0x7f, TerminalOutput::DeleteChar),
        ] {
            out.clear();
            data.clear();
            assert!(p.ansi_parser_inner_idle(b, &mut data, &mut out).is_err());
            assert_eq!(out.last(), Some(expected));
        }

        // Plain data path
        out.clear();
        data.clear();
        assert!(p.ansi_parser_inner_idle(b'A', &mut data, &mut out).is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn escape_branches_cover_all_introducers() {
        let mut p = PaneltermAnsiParser::new();
        let mut out = Vec::new();
        let mut data = Vec::new();

        p.inner = ParserInner::Escape;
        p.ansi_parser_inner_escape(b'[', &mut data, &mut out);
        assert!(matches!(p.inner, ParserInner::Csi(_)));

        for b in [b'(', b')', b'#'] {
            p.inner = ParserInner::Escape;
            p.ansi_parser_inner_escape(b, &mut data, &mut out);
            assert!(matches!(p.inner, ParserInner::Charset(_)));
        }

        // ESC ESC stays in escape
        p.inner = ParserInner::Escape;
        p.ansi_parser_inner_escape(0x1b, &mut data, &mut out);
        assert_eq!(p.inner, ParserInner::Escape);
    }

    #[test]
    fn escape_single_byte_commands() {
        for (b, expected) in [
            (b'D', TerminalOutput::Index),
            (b'M', TerminalOutput::ReverseIndex),
            (b'E', TerminalOutput::NextLine),
            (b'7', TerminalOutput::SaveCursor),
            (b'8', TerminalOutput::RestoreCursor),
            (b'c', TerminalOutput::ResetDevice),
            (b'Z', TerminalOutput::IdentifyTerminal),
            (b'P', TerminalOutput::Skipped),
            (b'q', TerminalOutput::Skipped),
        ] {
            let mut p = PaneltermAnsiParser::new();
            let out = p.push(&[0x1b, b]);
            assert_eq!(out, vec![expected]);
            assert_eq!(p.inner, ParserInner::Idle);
        }
    }

    #[test]
    fn printable_runs_coalesce_into_one_data() {
        let mut parser = PaneltermAnsiParser::new();
        let out = parser.push(b"hello world");
        assert_eq!(
            out,
            vec![TerminalOutput::Data(b"hello world".to_vec())]
        );
    }

    #[test]
    fn data_flushes_before_control_output() {
        let mut parser = PaneltermAnsiParser::new();
        let out = parser.push(b"ab\x1bDcd");
        assert_eq!(
            out,
            vec![
                TerminalOutput::Data(b"ab".to_vec()),
                TerminalOutput::Index,
                TerminalOutput::Data(b"cd".to_vec()),
            ]
        );
    }

    #[test]
    fn sequences_split_across_pushes_still_complete() {
        let mut parser = PaneltermAnsiParser::new();
        assert!(parser.push(b"\x1b").is_empty());
        assert!(parser.push(b"[12;").is_empty());
        let out = parser.push(b"8H");
        assert_eq!(out, vec![TerminalOutput::SetCursorPos { row: 12, col: 8 }]);
    }
}
