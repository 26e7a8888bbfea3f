//! Frame buffers - palette-indexed pixels and double buffering
//!
//! Frames are drawn into the *next* buffer only; the display only ever reads
//! the *current* one. [`RenderBuffer::swap`] exchanges the two roles once a
//! frame is complete, so a presented frame is never half-drawn.

use crate::board::Board;
use crate::font;
use crate::piece::ActivePiece;
use crate::shapes::Shape;
use crate::types::{Cell, Rgb};

/// Palette slot reserved for the background.
pub const BACKGROUND: u8 = 0;

/// Color of on-matrix messages
pub const TEXT_COLOR: Rgb = Rgb::from_hex(0xFF0000);

/// Row the game over message is drawn at
pub const MESSAGE_Y: u16 = 12;

pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// Ordered display colors: background, one per shape, then the text color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn for_catalog(catalog: &[Shape]) -> Self {
        let mut colors = Vec::with_capacity(catalog.len() + 2);
        colors.push(Rgb::BLACK);
        colors.extend(catalog.iter().map(|s| s.color));
        colors.push(TEXT_COLOR);
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color for a palette index; unknown indices fall back to the background.
    pub fn get(&self, index: u8) -> Rgb {
        self.colors
            .get(index as usize)
            .copied()
            .unwrap_or(self.colors[BACKGROUND as usize])
    }

    /// Index of the message color (last slot)
    pub fn text_index(&self) -> u8 {
        (self.colors.len() - 1) as u8
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// A `width × height` grid of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<u8> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel; out-of-range writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, color: u8) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Signed-coordinate variant of [`PixelBuffer::set`] for board positions.
    pub fn set_signed(&mut self, x: i16, y: i16, color: u8) {
        if x >= 0 && y >= 0 {
            self.set(x as u16, y as u16, color);
        }
    }

    pub fn fill(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Number of non-background pixels
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != BACKGROUND).count()
    }
}

/// Draw committed cells with their shape color, then the active piece on top.
pub fn draw_board_and_piece(buf: &mut PixelBuffer, board: &Board, piece: Option<&ActivePiece>) {
    for y in 0..board.height() as i16 {
        for x in 0..board.width() as i16 {
            if let Some(Cell::Filled(id)) = board.get(x, y) {
                buf.set_signed(x, y, id.palette_index());
            }
        }
    }

    if let Some(piece) = piece {
        let color = piece.shape_id().palette_index();
        for (x, y) in piece.cells() {
            buf.set_signed(x, y, color);
        }
    }
}

/// Two pixel buffers with swappable current/next roles.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    buffers: [PixelBuffer; 2],
    current: usize,
}

impl RenderBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffers: [PixelBuffer::new(width, height), PixelBuffer::new(width, height)],
            current: 0,
        }
    }

    /// The visible buffer
    pub fn current(&self) -> &PixelBuffer {
        &self.buffers[self.current]
    }

    /// The buffer being drawn into
    pub fn next(&self) -> &PixelBuffer {
        &self.buffers[1 - self.current]
    }

    pub fn next_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffers[1 - self.current]
    }

    /// Which slot (0 or 1) is currently visible
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn clear_next(&mut self) {
        self.next_mut().fill(BACKGROUND);
    }

    pub fn draw_board_and_piece(&mut self, board: &Board, piece: Option<&ActivePiece>) {
        draw_board_and_piece(self.next_mut(), board, piece);
    }

    /// Make the just-drawn buffer visible.
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Decorative frame: top, right, bottom, left edges in the first four shape colors.
    pub fn draw_borders(&mut self) {
        let buf = self.next_mut();
        let (w, h) = (buf.width(), buf.height());
        if w == 0 || h == 0 {
            return;
        }
        for x in 0..w {
            buf.set(x, 0, 1);
        }
        for y in 0..h {
            buf.set(w - 1, y, 2);
        }
        for x in 0..w {
            buf.set(x, h - 1, 3);
        }
        for y in 0..h {
            buf.set(0, y, 4);
        }
    }

    /// Clear the next buffer and draw `text` centred at [`MESSAGE_Y`].
    pub fn draw_message(&mut self, text: &str, color: u8) {
        self.clear_next();
        let buf = self.next_mut();
        let x = buf.width().saturating_sub(font::text_width(text) + 1) / 2;
        font::draw_text(buf, x, MESSAGE_Y, text, color);
    }
}
