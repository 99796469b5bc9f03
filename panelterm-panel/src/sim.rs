// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A software stand-in for an ILI934x-class panel.
//!
//! `SimPanel` keeps a full RGB565 framebuffer plus a glyph overlay so tests
//! and the demo driver can observe both pixel state and readable text. The
//! vertical-scroll registers behave like the hardware ones: the framebuffer
//! never moves, the readout rotates.

use conv2::ConvUtil;
use rustc_hash::FxHashMap;

use panelterm_common::{
    colors::Rgb565,
    display::DisplayAdapter,
    geometry::{CHAR_HEIGHT, CHAR_WIDTH},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimPanel {
    width: u16,
    height: u16,
    fb: Vec<Rgb565>,
    /// Glyphs by cell-origin pixel position in framebuffer space.
    glyphs: FxHashMap<(u16, u16), u8>,
    fg: Rgb565,
    bg: Rgb565,
    top_margin: u16,
    bottom_margin: u16,
    scroll_start: u16,
}

impl SimPanel {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            fb: vec![Rgb565::BLACK; usize::from(width) * usize::from(height)],
            glyphs: FxHashMap::default(),
            fg: Rgb565::WHITE,
            bg: Rgb565::BLACK,
            top_margin: 0,
            bottom_margin: 0,
            scroll_start: 0,
        }
    }

    /// The framebuffer pixel at (x, y), or `None` outside the panel.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.fb[usize::from(y) * usize::from(self.width) + usize::from(x)])
    }

    /// True when every pixel of the framebuffer row band `[y, y + h)` holds
    /// `color`.
    #[must_use]
    pub fn rows_filled_with(&self, y: u16, h: u16, color: Rgb565) -> bool {
        (y..y.saturating_add(h).min(self.height)).all(|row| {
            (0..self.width).all(|x| self.pixel(x, row) == Some(color))
        })
    }

    /// The glyph stored at the framebuffer cell with origin (x, y), if any.
    #[must_use]
    pub fn glyph_at(&self, x: u16, y: u16) -> Option<u8> {
        self.glyphs.get(&(x, y)).copied()
    }

    #[must_use]
    pub const fn scroll_start(&self) -> u16 {
        self.scroll_start
    }

    #[must_use]
    pub const fn scroll_margins(&self) -> (u16, u16) {
        (self.top_margin, self.bottom_margin)
    }

    /// The framebuffer y the hardware shows at display y, per the vertical
    /// scroll registers: rows inside the scroll area rotate around the
    /// scroll origin, the margin bands are fixed.
    #[must_use]
    pub fn displayed_fb_row(&self, display_y: u16) -> u16 {
        let tfa = i32::from(self.top_margin);
        let area = i32::from(self.height) - tfa - i32::from(self.bottom_margin);
        let y = i32::from(display_y);

        if area <= 0 || y < tfa || y >= tfa + area {
            return display_y;
        }

        let offset = (y - tfa + i32::from(self.scroll_start) - tfa).rem_euclid(area);
        (tfa + offset).value_as::<u16>().unwrap_or(display_y)
    }

    /// Render the panel as the user would see it: one string per character
    /// row, after applying the scroll rotation. Cells without a glyph come
    /// out as spaces.
    #[must_use]
    pub fn visible_text(&self) -> Vec<String> {
        let rows = self.height / CHAR_HEIGHT;
        let cols = self.width / CHAR_WIDTH;

        (0..rows)
            .map(|row| {
                let fb_y = self.displayed_fb_row(row * CHAR_HEIGHT);
                (0..cols)
                    .map(|col| {
                        self.glyph_at(col * CHAR_WIDTH, fb_y)
                            .map_or(' ', char::from)
                    })
                    .collect()
            })
            .collect()
    }

    fn drop_glyphs_under(&mut self, x: u16, y: u16, w: u16, h: u16) {
        self.glyphs.retain(|&(gx, gy), _| {
            !(gx + CHAR_WIDTH > x && gx < x + w && gy + CHAR_HEIGHT > y && gy < y + h)
        });
    }
}

impl DisplayAdapter for SimPanel {
    fn screen_width(&self) -> u16 {
        self.width
    }

    fn screen_height(&self) -> u16 {
        self.height
    }

    fn draw_char(&mut self, x: u16, y: u16, ch: u8) {
        if x + CHAR_WIDTH > self.width || y + CHAR_HEIGHT > self.height {
            debug!("Clipping draw_char at ({x}, {y})");
            return;
        }

        // The cell background is painted; glyph pixels are tracked in the
        // overlay since there is no font here.
        let bg = self.bg;
        self.fill_rect(x, y, CHAR_WIDTH, CHAR_HEIGHT, bg);
        self.glyphs.insert((x, y), ch);
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);

        if x >= x_end || y >= y_end {
            return;
        }

        self.drop_glyphs_under(x, y, x_end - x, y_end - y);

        for row in y..y_end {
            let base = usize::from(row) * usize::from(self.width);
            for col in x..x_end {
                self.fb[base + usize::from(col)] = color;
            }
        }
    }

    fn set_fg(&mut self, color: Rgb565) {
        self.fg = color;
    }

    fn set_bg(&mut self, color: Rgb565) {
        self.bg = color;
    }

    fn set_scroll_margins(&mut self, top_px: u16, bottom_px: u16) {
        self.top_margin = top_px;
        self.bottom_margin = bottom_px;
    }

    fn set_scroll_start(&mut self, y_px: u16) {
        self.scroll_start = y_px;
    }
}
