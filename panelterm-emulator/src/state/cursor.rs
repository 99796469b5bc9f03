// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

/// A 0-based grid position. Both coordinates may legally sit one past the
/// last cell ("past-the-end"); glyph drawing checks the writable range
/// separately so the margin-stop behavior is preserved.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

impl CursorPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CursorPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row: {}, col: {})", self.row, self.col)
    }
}
