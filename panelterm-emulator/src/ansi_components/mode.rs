// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

use crate::ansi_components::modes::{decawm::Decawm, decom::Decom};

/// Whether a DEC private mode is being set (`h`) or reset (`l`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetMode {
    Set,
    Reset,
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "Set"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

/// A decoded DEC private mode command.
///
/// Modes 6 (origin) and 7 (auto-wrap) change behavior. Modes 1-5, 8 and 9
/// (cursor keys, vt52, column width, scroll style, screen video, auto
/// repeat, interlace) are recognised so their sequences stay aligned, but
/// the panel has nothing to do for them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Decom(Decom),
    Decawm(Decawm),
    Ignored(u16),
    Unknown(u16),
}

impl Mode {
    #[must_use]
    pub const fn from_dec_params(number: u16, mode: SetMode) -> Self {
        match number {
            6 => Self::Decom(Decom::new(mode)),
            7 => Self::Decawm(Decawm::new(mode)),
            1 | 2 | 3 | 4 | 5 | 8 | 9 => Self::Ignored(number),
            _ => Self::Unknown(number),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decom(decom) => write!(f, "{decom}"),
            Self::Decawm(decawm) => write!(f, "{decawm}"),
            Self::Ignored(number) => write!(f, "Ignored DEC mode {number}"),
            Self::Unknown(number) => write!(f, "Unknown DEC mode {number}"),
        }
    }
}

/// The mode flags the terminal actually tracks.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct TerminalModes {
    pub origin_mode: Decom,
    pub auto_wrap: Decawm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_and_wrap_modes_decode() {
        assert_eq!(
            Mode::from_dec_params(6, SetMode::Set),
            Mode::Decom(Decom::WithinMargins)
        );
        assert_eq!(
            Mode::from_dec_params(7, SetMode::Reset),
            Mode::Decawm(Decawm::NoAutoWrap)
        );
    }

    #[test]
    fn recognised_but_inert_modes() {
        for number in [1, 2, 3, 4, 5, 8, 9] {
            assert_eq!(
                Mode::from_dec_params(number, SetMode::Set),
                Mode::Ignored(number)
            );
        }
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(Mode::from_dec_params(25, SetMode::Set), Mode::Unknown(25));
        assert_eq!(
            Mode::from_dec_params(1049, SetMode::Reset),
            Mode::Unknown(1049)
        );
    }
}
