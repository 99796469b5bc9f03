// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

use crate::ansi_components::mode::SetMode;

/// Origin Mode (DECOM) ?6
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Decom {
    /// Normal (Reset) Mode
    /// Cursor addressing is absolute over the whole screen.
    #[default]
    Absolute,
    /// Alternate (Set) Mode
    /// Cursor row addressing is relative to the top of the scroll region
    /// and clamped inside it.
    WithinMargins,
}

impl Decom {
    #[must_use]
    pub const fn new(mode: SetMode) -> Self {
        match mode {
            SetMode::Set => Self::WithinMargins,
            SetMode::Reset => Self::Absolute,
        }
    }

    #[must_use]
    pub const fn relative(self) -> bool {
        matches!(self, Self::WithinMargins)
    }
}

impl fmt::Display for Decom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "Origin Mode (DECOM) Disabled"),
            Self::WithinMargins => write!(f, "Origin Mode (DECOM) Enabled"),
        }
    }
}
