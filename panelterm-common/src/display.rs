// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::colors::Rgb565;

/// The drawing primitives the terminal requires from a panel driver.
///
/// Coordinates are pixels with (0, 0) at the top-left corner. The driver is
/// expected to clip writes that fall outside the panel; the terminal never
/// relies on out-of-bounds pixels being visible.
///
/// The two scroll registers mirror what display controllers in the ILI93xx
/// family provide in hardware: a pair of fixed margins and a vertical scroll
/// origin. Scrolling the terminal is a register write plus one row clear,
/// never a blit.
pub trait DisplayAdapter {
    /// Panel width in pixels.
    fn screen_width(&self) -> u16;

    /// Panel height in pixels.
    fn screen_height(&self) -> u16;

    /// Render one glyph with its cell background, using the persistent
    /// foreground/background colors.
    fn draw_char(&mut self, x: u16, y: u16, ch: u8);

    /// Opaque rectangle fill.
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565);

    /// Set the persistent foreground color used by [`Self::draw_char`].
    fn set_fg(&mut self, color: Rgb565);

    /// Set the persistent background color used by [`Self::draw_char`].
    fn set_bg(&mut self, color: Rgb565);

    /// Define the fixed (non-scrolling) areas at the top and bottom of the
    /// panel, in pixels. `(0, 0)` makes the whole panel scrollable.
    fn set_scroll_margins(&mut self, top_px: u16, bottom_px: u16);

    /// Set the vertical scroll origin: the framebuffer y that the panel
    /// displays at the top of the scrollable area.
    fn set_scroll_start(&mut self, y_px: u16);
}
