//! TerminalRenderer: the matrix display, implemented on a real terminal.
//!
//! Frames arrive as palette-indexed pixels through [`DisplaySink::present`],
//! get mapped into a [`FrameBuffer`] by [`MatrixView`], and only the cells that
//! changed since the previous frame are written out.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{DisplayError, DisplaySink, Palette, PaletteSink, PixelBuffer};
use crate::fb::{CellStyle, FrameBuffer};
use crate::matrix_view::{MatrixView, Viewport};
use crate::types::Rgb;

/// Palette entries the terminal accepts; plenty for 7 shapes + background + text.
pub const MAX_PALETTE_COLORS: usize = 16;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    width: u16,
    height: u16,
    colors: Vec<Rgb>,
    view: MatrixView,
    frame: FrameBuffer,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    /// A renderer for a `width × height` pixel matrix.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            stdout: io::stdout(),
            width,
            height,
            colors: Vec::new(),
            view: MatrixView::new(),
            frame: FrameBuffer::new(0, 0),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    fn draw(&mut self, frame: &PixelBuffer, viewport: Viewport) -> io::Result<()> {
        self.view
            .render_into(frame, &self.colors, viewport, &mut self.frame);

        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if prev.width() == self.frame.width() && prev.height() == self.frame.height() => {
                encode_diff_into(prev, &self.frame, &mut self.buf)?;
            }
            _ => {
                encode_full_into(&self.frame, &mut self.buf)?;
            }
        }
        self.flush_buf()?;

        // Keep the drawn frame for the next diff; reuse the old allocation.
        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut prev, &mut self.frame);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl PaletteSink for TerminalRenderer {
    fn load_palette(&mut self, palette: &Palette) -> Result<(), DisplayError> {
        if palette.len() > MAX_PALETTE_COLORS {
            return Err(DisplayError::PaletteTooLarge {
                got: palette.len(),
                max: MAX_PALETTE_COLORS,
            });
        }
        self.colors.clear();
        self.colors.extend_from_slice(palette.colors());
        // Every visible color may have changed.
        self.invalidate();
        log::debug!("loaded {} palette colors", self.colors.len());
        Ok(())
    }
}

impl DisplaySink for TerminalRenderer {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DisplayError::FrameSize {
                got_w: frame.width(),
                got_h: frame.height(),
                want_w: self.width,
                want_h: self.height,
            });
        }
        let (cols, rows) = terminal::size()?;
        self.draw(frame, Viewport::new(cols, rows))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the changed runs between two equally sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let mut current_style: Option<CellStyle> = None;
    let mut wrote = false;

    for_each_changed_run(prev, next, |x, y, len| {
        wrote = true;
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    if wrote {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> io::Result<()>,
) -> io::Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
