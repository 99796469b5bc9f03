// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use conv2::ConvUtil;
use crossbeam_channel::Sender;

use panelterm_common::{
    colors::Rgb565,
    display::DisplayAdapter,
    geometry::{CHAR_HEIGHT, CHAR_WIDTH, cell_x, cell_y, grid_height, grid_width},
    response::TerminalResponse,
    sgr::SelectGraphicRendition,
};

use crate::{
    ansi::{PaneltermAnsiParser, TerminalOutput},
    ansi_components::mode::{Mode, TerminalModes},
    error::EmulatorError,
};

use super::cursor::CursorPos;

/// Tab stops are fixed every four columns.
const TAB_STOP: usize = 4;

#[inline]
fn px_u16(value: usize) -> u16 {
    value.value_as::<u16>().unwrap_or(u16::MAX)
}

#[inline]
fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[inline]
fn clamp_to_usize(value: i64, max: usize) -> usize {
    usize::try_from(value.max(0)).unwrap_or(0).min(max)
}

/// The whole terminal: parser, cursor and color state, the scroll rotation,
/// and the panel it draws on.
///
/// The host addresses a stable logical grid; the panel sees that grid
/// through a rotation of the rows inside the scroll region. Scrolling never
/// copies pixels: it updates the panel's scroll-origin register and clears
/// the one row that rotated into view.
#[derive(Debug)]
pub struct TerminalState<D: DisplayAdapter> {
    pub parser: PaneltermAnsiParser,
    pub cursor: CursorPos,
    pub saved_cursor: CursorPos,
    pub fg: Rgb565,
    pub bg: Rgb565,
    /// First row of the scroll region.
    pub scroll_start_row: usize,
    /// First row below the scroll region (half-open).
    pub scroll_end_row: usize,
    /// Rotation offset of the rows inside the scroll region, in
    /// `[0, scroll_end_row - scroll_start_row)`.
    pub scroll_value: usize,
    pub modes: TerminalModes,
    width: usize,
    height: usize,
    screen_width_px: u16,
    screen_height_px: u16,
    display: D,
    response_tx: Sender<TerminalResponse>,
}

impl<D: DisplayAdapter> PartialEq for TerminalState<D> {
    fn eq(&self, other: &Self) -> bool {
        self.parser == other.parser
            && self.cursor == other.cursor
            && self.saved_cursor == other.saved_cursor
            && self.fg == other.fg
            && self.bg == other.bg
            && self.scroll_start_row == other.scroll_start_row
            && self.scroll_end_row == other.scroll_end_row
            && self.scroll_value == other.scroll_value
            && self.modes == other.modes
            && self.width == other.width
            && self.height == other.height
    }
}

impl<D: DisplayAdapter> TerminalState<D> {
    /// Build a terminal over the given panel, deriving the character grid
    /// from the panel's pixel dimensions, and perform a full reset.
    ///
    /// Responses (ENQ answer-back, device attributes) are delivered through
    /// `response_tx`; they are produced synchronously while feeding bytes.
    ///
    /// # Errors
    /// Fails if the panel cannot hold a single character cell.
    pub fn new(display: D, response_tx: Sender<TerminalResponse>) -> Result<Self, EmulatorError> {
        let screen_width_px = display.screen_width();
        let screen_height_px = display.screen_height();
        let width = usize::from(grid_width(screen_width_px));
        let height = usize::from(grid_height(screen_height_px));

        if width == 0 || height == 0 {
            return Err(EmulatorError::PanelTooSmall {
                width: screen_width_px,
                height: screen_height_px,
                char_width: CHAR_WIDTH,
                char_height: CHAR_HEIGHT,
            });
        }

        let mut state = Self {
            parser: PaneltermAnsiParser::new(),
            cursor: CursorPos::default(),
            saved_cursor: CursorPos::default(),
            fg: Rgb565::WHITE,
            bg: Rgb565::BLACK,
            scroll_start_row: 0,
            scroll_end_row: height,
            scroll_value: 0,
            modes: TerminalModes::default(),
            width,
            height,
            screen_width_px,
            screen_height_px,
            display,
            response_tx,
        };

        state.reset();
        Ok(state)
    }

    /// Grid width in columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    pub const fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Feed one host byte. Runs to completion before returning and never
    /// blocks; all drawing and any response happen synchronously.
    pub fn feed(&mut self, byte: u8) {
        self.handle_incoming_data(&[byte]);
    }

    /// Feed a chunk of host bytes in arrival order.
    pub fn handle_incoming_data(&mut self, incoming: &[u8]) {
        let parsed = self.parser.push(incoming);

        for segment in parsed {
            match segment {
                TerminalOutput::Data(data) => self.handle_data(&data),
                TerminalOutput::AnswerBack => self.send_response(TerminalResponse::AnswerBack),
                TerminalOutput::Bell => debug!("Bell"),
                TerminalOutput::Backspace => self.move_cursor(-1, 0),
                TerminalOutput::HorizontalTab => self.horizontal_tab(),
                TerminalOutput::Newline | TerminalOutput::NextLine => self.new_line(),
                TerminalOutput::CarriageReturn => self.carriage_return(),
                TerminalOutput::DeleteChar => self.delete_char(),
                TerminalOutput::Index => self.move_cursor(0, 1),
                TerminalOutput::ReverseIndex => self.move_cursor(0, -1),
                TerminalOutput::SaveCursor => self.save_cursor(),
                TerminalOutput::RestoreCursor => self.restore_cursor(),
                TerminalOutput::IdentifyTerminal | TerminalOutput::DeviceAttributes => {
                    self.send_response(TerminalResponse::PrimaryDeviceAttributes);
                }
                TerminalOutput::ResetDevice => self.reset(),
                TerminalOutput::CursorUp(count) => self.cursor_up(count),
                TerminalOutput::CursorDown(count) => self.cursor_down(count),
                TerminalOutput::CursorForward(count) => self.cursor_forward(count),
                TerminalOutput::CursorBack(count) => self.cursor_back(count),
                TerminalOutput::SetCursorPos { row, col } => self.set_cursor_pos(row, col),
                TerminalOutput::ClearDisplayForwards => {
                    self.clear_rows(self.cursor.row, self.height);
                }
                TerminalOutput::ClearDisplayBackwards => {
                    self.clear_rows(0, self.cursor.row + 1);
                }
                TerminalOutput::ClearDisplay => {
                    self.clear_rows(0, self.height);
                    self.reset_scroll();
                }
                TerminalOutput::ClearLineForwards => self.clear_line_forwards(),
                TerminalOutput::ClearLineBackwards => self.clear_line_backwards(),
                TerminalOutput::ClearLine => self.clear_line(),
                TerminalOutput::Delete(count) => self.delete_chars(count),
                TerminalOutput::Sgr(sgr) => self.sgr(sgr),
                TerminalOutput::Mode(mode) => self.set_mode(mode),
                TerminalOutput::SetScrollRegion { top, bottom } => {
                    self.set_scroll_region(top, bottom);
                }
                TerminalOutput::ResetScrollRegion => self.reset_scroll(),
                TerminalOutput::Skipped => trace!("Skipped sequence without effect"),
            }
        }
    }

    /// Translate a logical row to the physical framebuffer row the panel
    /// stores it in. Rows outside the scroll region map to themselves; rows
    /// inside go through the rotation.
    #[must_use]
    pub const fn phys_row(&self, row: usize) -> usize {
        if row < self.scroll_start_row || row >= self.scroll_end_row {
            return row;
        }

        let region_height = self.scroll_end_row - self.scroll_start_row;
        let mut rotated = row + self.scroll_value;
        if rotated >= self.scroll_end_row {
            rotated -= region_height;
        }

        rotated
    }

    /// Draw one byte at the cursor and advance.
    ///
    /// Unprintable bytes render as `0xNN` so framing bugs show up on the
    /// panel instead of being silently swallowed. A glyph is only drawn
    /// while the cursor is inside the writable grid; a cursor parked at the
    /// right margin still advances (and wraps or sticks) without drawing.
    pub fn putc(&mut self, ch: u8) {
        if !(0x20..=0x7e).contains(&ch) {
            const HEX: &[u8; 16] = b"0123456789abcdef";
            self.putc(b'0');
            self.putc(b'x');
            self.putc(HEX[usize::from(ch >> 4)]);
            self.putc(HEX[usize::from(ch & 0x0f)]);
            return;
        }

        if self.cursor.col < self.width && self.cursor.row < self.height {
            let x = cell_x(px_u16(self.cursor.col));
            let y = cell_y(px_u16(self.phys_row(self.cursor.row)));
            self.display.set_fg(self.fg);
            self.display.set_bg(self.bg);
            self.display.draw_char(x, y, ch);
        }

        self.move_cursor(1, 0);
    }

    pub fn handle_data(&mut self, data: &[u8]) {
        for &b in data {
            self.putc(b);
        }
    }

    /// Move the cursor relative to its current position.
    ///
    /// Horizontal overflow either wraps onto following lines (auto-wrap) or
    /// parks the cursor at the right margin. Vertical motion that crosses
    /// the scroll region boundary scrolls the region instead of clamping;
    /// that is what makes LF, index and reverse index shift content while
    /// the explicit cursor commands stop at the margins.
    pub fn move_cursor(&mut self, dx: i64, mut dy: i64) {
        let width = to_i64(self.width);

        let new_x = to_i64(self.cursor.col) + dx;
        if new_x > width {
            if self.modes.auto_wrap.enabled() {
                dy += new_x / width;
                self.cursor.col = clamp_to_usize(new_x % width - 1, self.width);
            } else {
                self.cursor.col = self.width;
            }
        } else if new_x < 0 {
            dy += new_x / width - 1;
            self.cursor.col = clamp_to_usize(width - (new_x.abs() % width) + 1, self.width);
        } else {
            self.cursor.col = clamp_to_usize(new_x, self.width);
        }

        if dy != 0 {
            let new_y = to_i64(self.cursor.row) + dy;
            let start = to_i64(self.scroll_start_row);
            let end = to_i64(self.scroll_end_row);

            if new_y >= end {
                self.cursor.row = self.scroll_end_row - 1;
                self.scroll(new_y - end + 1);
            } else if new_y < start {
                self.cursor.row = self.scroll_start_row;
                self.scroll(new_y - start);
            } else {
                self.cursor.row = clamp_to_usize(new_y, self.height);
            }
        }
    }

    /// Scroll the region up (`lines > 0`, new blank row at the bottom) or
    /// down (`lines < 0`, new blank row at the top).
    ///
    /// The rows that rotate into view are cleared through the *current*
    /// mapping, then the rotation advances and the panel's scroll-origin
    /// register is rewritten. No pixel data ever moves.
    pub fn scroll(&mut self, lines: i64) {
        if lines == 0 {
            return;
        }

        let region_height = self.scroll_end_row - self.scroll_start_row;

        if lines > 0 {
            let requested = usize::try_from(lines).unwrap_or(usize::MAX);
            let count = requested.min(region_height);
            self.clear_rows(self.scroll_start_row, self.scroll_start_row + count);
            self.scroll_value = (self.scroll_value + requested % region_height) % region_height;
        } else {
            let requested = usize::try_from(lines.unsigned_abs()).unwrap_or(usize::MAX);
            let count = requested.min(region_height);
            self.clear_rows(self.scroll_end_row - count, self.scroll_end_row);
            // The extra region_height keeps the subtraction positive.
            self.scroll_value =
                (self.scroll_value + region_height - requested % region_height) % region_height;
        }

        let origin_row = self.scroll_start_row + self.scroll_value;
        self.display.set_scroll_start(cell_y(px_u16(origin_row)));
    }

    /// Clear the logical rows `[from, to)` to the background color, through
    /// the current rotation.
    fn clear_rows(&mut self, from: usize, to: usize) {
        for row in from..to.min(self.height) {
            let y = cell_y(px_u16(self.phys_row(row)));
            self.display
                .fill_rect(0, y, self.screen_width_px, CHAR_HEIGHT, self.bg);
        }
    }

    fn horizontal_tab(&mut self) {
        let count = TAB_STOP - (self.cursor.col % TAB_STOP);
        for _ in 0..count {
            self.putc(b' ');
        }
    }

    fn new_line(&mut self) {
        self.move_cursor(0, 1);
        self.cursor.col = 0;
    }

    const fn carriage_return(&mut self) {
        self.cursor.col = 0;
    }

    /// DEL blanks the cell under the cursor without moving it. There is no
    /// line storage to shift left.
    fn delete_char(&mut self) {
        self.putc(b' ');
        self.move_cursor(-1, 0);
    }

    const fn save_cursor(&mut self) {
        self.saved_cursor = self.cursor;
    }

    const fn restore_cursor(&mut self) {
        self.cursor = self.saved_cursor;
    }

    fn cursor_up(&mut self, count: u16) {
        self.cursor.row = self.cursor.row.saturating_sub(usize::from(count));
    }

    fn cursor_down(&mut self, count: u16) {
        self.cursor.row = (self.cursor.row + usize::from(count)).min(self.height);
    }

    fn cursor_forward(&mut self, count: u16) {
        self.cursor.col = (self.cursor.col + usize::from(count)).min(self.width);
    }

    fn cursor_back(&mut self, count: u16) {
        self.cursor.col = self.cursor.col.saturating_sub(usize::from(count));
    }

    /// CUP/HVP. Coordinates arrive 1-based with 0 meaning "default"; origin
    /// mode makes the row relative to the scroll region and confines it
    /// there.
    fn set_cursor_pos(&mut self, row: u16, col: u16) {
        let mut new_row = usize::from(row.saturating_sub(1));
        let new_col = usize::from(col.saturating_sub(1));

        if self.modes.origin_mode.relative() {
            new_row += self.scroll_start_row;
            if new_row >= self.scroll_end_row {
                new_row = self.scroll_end_row - 1;
            }
        }

        self.cursor.col = new_col.min(self.width);
        self.cursor.row = new_row.min(self.height);
    }

    fn clear_line_forwards(&mut self) {
        let x = cell_x(px_u16(self.cursor.col)).min(self.screen_width_px);
        let y = cell_y(px_u16(self.phys_row(self.cursor.row)));
        self.display
            .fill_rect(x, y, self.screen_width_px - x, CHAR_HEIGHT, self.bg);
    }

    fn clear_line_backwards(&mut self) {
        let y = cell_y(px_u16(self.phys_row(self.cursor.row)));
        let width =
            px_u16((self.cursor.col + 1) * usize::from(CHAR_WIDTH)).min(self.screen_width_px);
        self.display.fill_rect(0, y, width, CHAR_HEIGHT, self.bg);
    }

    fn clear_line(&mut self) {
        let y = cell_y(px_u16(self.phys_row(self.cursor.row)));
        self.display
            .fill_rect(0, y, self.screen_width_px, CHAR_HEIGHT, self.bg);
    }

    /// DCH. Back up over the deleted cells and overwrite them with blanks.
    fn delete_chars(&mut self, count: u16) {
        self.move_cursor(-i64::from(count), 0);
        for _ in 0..count {
            self.putc(b' ');
        }
    }

    fn sgr(&mut self, sgr: SelectGraphicRendition) {
        match sgr {
            SelectGraphicRendition::Reset => {
                self.fg = Rgb565::WHITE;
                self.bg = Rgb565::BLACK;
                self.display.set_fg(self.fg);
                self.display.set_bg(self.bg);
            }
            SelectGraphicRendition::Foreground(color) => {
                self.fg = color;
                self.display.set_fg(color);
            }
            SelectGraphicRendition::Background(color) => {
                self.bg = color;
                self.display.set_bg(color);
            }
            SelectGraphicRendition::Unknown(code) => {
                warn!("Unhandled SGR code {code}");
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        match mode {
            Mode::Decom(decom) => self.modes.origin_mode = decom,
            Mode::Decawm(decawm) => self.modes.auto_wrap = decawm,
            Mode::Ignored(number) => debug!("Ignoring DEC mode {number}"),
            Mode::Unknown(number) => warn!("Unknown DEC mode {number}"),
        }
    }

    /// DECSTBM. `top`/`bottom` are the 1-based first scrolling row and first
    /// static row below the region, already checked for order. A region that
    /// does not fit the grid resets to the whole screen.
    ///
    /// The rotation offset deliberately survives a margin change; it is
    /// folded into the new region height so it stays a valid offset.
    fn set_scroll_region(&mut self, top: u16, bottom: u16) {
        let start = usize::from(top) - 1;
        let end = usize::from(bottom) - 1;

        if end > self.height || start >= end {
            self.reset_scroll();
            return;
        }

        self.scroll_start_row = start;
        self.scroll_end_row = end;
        let region_height = end - start;
        self.scroll_value %= region_height;

        let top_px = cell_y(px_u16(start));
        let bottom_px = self.screen_height_px - cell_y(px_u16(end)).min(self.screen_height_px);
        self.display.set_scroll_margins(top_px, bottom_px);
        self.display
            .set_scroll_start(cell_y(px_u16(start + self.scroll_value)));
    }

    /// Reset the scroll region to the whole screen and zero the rotation.
    pub fn reset_scroll(&mut self) {
        self.scroll_start_row = 0;
        self.scroll_end_row = self.height;
        self.scroll_value = 0;
        self.display.set_scroll_margins(0, 0);
        self.display.set_scroll_start(0);
    }

    /// Full terminal reset (RIS): default colors, home cursor, cleared saved
    /// cursor, modes off, whole-screen scroll region, scroll registers
    /// zeroed. The screen contents are left alone.
    pub fn reset(&mut self) {
        self.fg = Rgb565::WHITE;
        self.bg = Rgb565::BLACK;
        self.cursor = CursorPos::default();
        self.saved_cursor = CursorPos::default();
        self.modes = TerminalModes::default();
        self.display.set_fg(self.fg);
        self.display.set_bg(self.bg);
        self.reset_scroll();
    }

    fn send_response(&self, response: TerminalResponse) {
        debug!("Sending response {response}");

        if let Err(e) = self.response_tx.send(response) {
            error!("Failed to send terminal response: {e}");
        }
    }
}
