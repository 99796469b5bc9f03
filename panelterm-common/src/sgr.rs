// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

use crate::colors::{Rgb565, lookup_ansi_color_by_index};

/// Select Graphic Rendition
///
/// The panel renders the classic 8-color palette only; attribute codes
/// outside the color ranges are carried as `Unknown` so the terminal can log
/// and discard them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectGraphicRendition {
    Reset,
    Foreground(Rgb565),
    Background(Rgb565),
    Unknown(u16),
}

impl SelectGraphicRendition {
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Reset,
            30..=37 => Self::Foreground(lookup_ansi_color_by_index((value - 30) as usize)),
            40..=47 => Self::Background(lookup_ansi_color_by_index((value - 40) as usize)),
            _ => Self::Unknown(value),
        }
    }
}

impl fmt::Display for SelectGraphicRendition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "Reset"),
            Self::Foreground(color) => write!(f, "Foreground({color})"),
            Self::Background(color) => write!(f, "Background({color})"),
            Self::Unknown(code) => write!(f, "Unknown({code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ranges_map_to_palette() {
        assert_eq!(
            SelectGraphicRendition::from_u16(31),
            SelectGraphicRendition::Foreground(Rgb565::RED)
        );
        assert_eq!(
            SelectGraphicRendition::from_u16(47),
            SelectGraphicRendition::Background(Rgb565::WHITE)
        );
        assert_eq!(
            SelectGraphicRendition::from_u16(0),
            SelectGraphicRendition::Reset
        );
    }

    #[test]
    fn attribute_codes_are_unknown() {
        // Bold, underline, blink and friends are recognized but not rendered.
        for code in [1_u16, 4, 5, 7, 22, 38, 48, 90, 107] {
            assert_eq!(
                SelectGraphicRendition::from_u16(code),
                SelectGraphicRendition::Unknown(code)
            );
        }
    }

    proptest::proptest! {
        #[test]
        fn every_code_decodes_to_exactly_one_bucket(code in proptest::prelude::any::<u16>()) {
            let decoded = SelectGraphicRendition::from_u16(code);
            match code {
                0 => proptest::prop_assert_eq!(decoded, SelectGraphicRendition::Reset),
                30..=37 | 40..=47 => proptest::prop_assert!(matches!(
                    decoded,
                    SelectGraphicRendition::Foreground(_) | SelectGraphicRendition::Background(_)
                )),
                _ => proptest::prop_assert_eq!(decoded, SelectGraphicRendition::Unknown(code)),
            }
        }
    }
}
