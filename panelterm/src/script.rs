// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The built-in exercise fed to the terminal when no replay capture is
//! given. It walks through colors, absolute and relative cursor motion,
//! save/restore, full-screen scrolling, and a fixed-border scroll region,
//! so the final panel dump makes regressions obvious at a glance.

fn push(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
}

/// Build the demo byte stream for a grid of `width` x `height` cells.
#[must_use]
pub fn demo_script(width: usize, height: usize) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();

    // Known state: identify, clear, default colors, whole-screen margins,
    // absolute addressing, home.
    push(&mut out, "\x1b[c\x1b[2J\x1b[m\x1b[r\x1b[?6l\x1b[1;1H");

    // Background and foreground color bars.
    for color in 0..8 {
        push(&mut out, &format!("\x1b[{}m  ", 40 + color));
    }
    push(&mut out, "\x1b[m\r\n");
    for color in 0..8 {
        push(&mut out, &format!("\x1b[{}m##", 30 + color));
    }
    push(&mut out, "\x1b[m\r\n");

    // Corner markers around a box drawn with absolute and relative moves.
    push(&mut out, "\x1b[10;6HE\x1b[10;35HE");
    push(&mut out, "\x1b[12;6HE\x1b[28CE");
    push(&mut out, "\x1b[30D\x1b[BE\x1b[28CE");
    push(&mut out, "\x1b[15;6H\x1b[AE\x1b[28CE");

    // Save the cursor, jump away, restore, and mark the restored spot.
    push(&mut out, "\x1b[16;6H\x1b7\x1b[35;10H\x1b8E");

    // Alternating E/F columns drawn purely with relative motion.
    push(&mut out, "\x1b[20;19H");
    for _ in 0..4 {
        push(&mut out, "E\x1b[1CF\x1b[3D\x1b[B");
    }

    // Tabs and a deliberate unprintable byte (renders as hex).
    push(&mut out, "\x1b[24;1Ha\tb\tc");
    out.push(0x01);
    push(&mut out, "\r\n");

    // Scroll stress: index off the bottom, then reverse index off the top.
    push(&mut out, &format!("\x1b[{height};1H"));
    for _ in 0..3 {
        push(&mut out, "\x1bD");
    }
    push(&mut out, "\x1b[1;1H");
    for _ in 0..3 {
        push(&mut out, "\x1bM");
    }

    // A scroll region with fixed borders above and below; the hash rows
    // must stay put while the region rotates.
    push(&mut out, "\x1b[2J\x1b[4;36r");
    push(&mut out, "\x1b[1;1H");
    for _ in 0..width {
        push(&mut out, "#");
    }
    push(&mut out, &format!("\x1b[{height};1H"));
    for _ in 0..width {
        push(&mut out, "#");
    }
    push(&mut out, "\x1b[4;1Hscroll region content");
    push(&mut out, "\x1b[35;1H");
    for _ in 0..2 {
        push(&mut out, "\x1bD");
    }
    push(&mut out, "\x1b[r\x1b[?6l");

    out
}
