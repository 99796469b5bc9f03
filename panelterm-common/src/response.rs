// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

/// Bytes the terminal sends back to the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TerminalResponse {
    /// Reply to ENQ (0x05).
    AnswerBack,
    /// Reply to ESC Z and to CSI c: primary device attributes, VT100 with
    /// no options.
    PrimaryDeviceAttributes,
}

impl TerminalResponse {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnswerBack => "X",
            Self::PrimaryDeviceAttributes => "\x1b[?1;0c",
        }
    }
}

impl fmt::Display for TerminalResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnswerBack => write!(f, "AnswerBack"),
            Self::PrimaryDeviceAttributes => write!(f, "PrimaryDeviceAttributes"),
        }
    }
}
