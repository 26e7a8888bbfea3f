//! MatrixView: maps a palette-indexed pixel frame onto terminal cells.
//!
//! Every terminal cell shows two matrix pixels stacked vertically using the
//! upper half block: foreground is the upper pixel, background the lower one.
//! Terminal glyphs are about twice as tall as wide, so pixels come out square.
//!
//! This module is pure (no I/O).

use crate::core::PixelBuffer;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Rgb;

pub const UPPER_HALF_BLOCK: char = '▀';

const HINT: &str = "↑/↓ or W/S move · I/K tilt · R spin · Q quit";
const TOO_SMALL: &str = "terminal too small";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the matrix lands inside the viewport, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left cell of the matrix area (inside the frame).
    pub origin_x: u16,
    pub origin_y: u16,
    pub cols: u16,
    pub rows: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixView {
    show_hint: bool,
}

impl Default for MatrixView {
    fn default() -> Self {
        Self { show_hint: true }
    }
}

impl MatrixView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_hint(mut self) -> Self {
        self.show_hint = false;
        self
    }

    /// Centre a `width × height` pixel matrix (plus a one-cell frame) in `viewport`.
    ///
    /// Returns `None` when the viewport cannot hold it.
    pub fn layout(&self, width: u16, height: u16, viewport: Viewport) -> Option<Layout> {
        let cols = width;
        let rows = height.div_ceil(2);
        let frame_w = cols + 2;
        let frame_h = rows + 2;
        if viewport.width < frame_w || viewport.height < frame_h {
            return None;
        }
        Some(Layout {
            origin_x: (viewport.width - frame_w) / 2 + 1,
            origin_y: (viewport.height - frame_h) / 2 + 1,
            cols,
            rows,
        })
    }

    /// Render `frame` into `fb`, resizing it to the viewport first.
    pub fn render_into(
        &self,
        frame: &PixelBuffer,
        colors: &[Rgb],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let Some(layout) = self.layout(frame.width(), frame.height(), viewport) else {
            let x = viewport.width.saturating_sub(TOO_SMALL.len() as u16) / 2;
            fb.put_str(x, viewport.height / 2, TOO_SMALL, CellStyle::default());
            return;
        };

        let lookup = |index: Option<u8>| -> Rgb {
            index
                .and_then(|i| colors.get(i as usize).copied())
                .or_else(|| colors.first().copied())
                .unwrap_or(Rgb::BLACK)
        };

        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let upper = lookup(frame.get(col, row * 2));
                let lower = lookup(frame.get(col, row * 2 + 1));
                fb.set(
                    layout.origin_x + col,
                    layout.origin_y + row,
                    Cell {
                        ch: UPPER_HALF_BLOCK,
                        style: CellStyle::new(upper, lower),
                    },
                );
            }
        }

        self.draw_frame(fb, layout);

        let hint_y = layout.origin_y + layout.rows + 1;
        if self.show_hint && hint_y < viewport.height {
            let len = HINT.chars().count() as u16;
            let x = viewport.width.saturating_sub(len) / 2;
            let style = CellStyle::new(Rgb::new(120, 120, 130), Rgb::BLACK);
            fb.put_str(x, hint_y, HINT, style);
        }
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, layout: Layout) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), Rgb::BLACK);
        let left = layout.origin_x - 1;
        let top = layout.origin_y - 1;
        let right = layout.origin_x + layout.cols;
        let bottom = layout.origin_y + layout.rows;

        let mut put = |x, y, ch| fb.set(x, y, Cell { ch, style });
        put(left, top, '┌');
        put(right, top, '┐');
        put(left, bottom, '└');
        put(right, bottom, '┘');
        for x in layout.origin_x..right {
            put(x, top, '─');
            put(x, bottom, '─');
        }
        for y in layout.origin_y..bottom {
            put(left, y, '│');
            put(right, y, '│');
        }
    }
}
