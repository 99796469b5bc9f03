// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum EmulatorError {
    #[error(
        "panel of {width}x{height} px cannot hold a single {char_width}x{char_height} px character cell"
    )]
    PanelTooSmall {
        width: u16,
        height: u16,
        char_width: u16,
        char_height: u16,
    },
}
