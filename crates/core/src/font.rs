//! Tiny bitmap font for the matrix.
//!
//! Glyphs are at most 4×5 pixels and vary in size (`M` is 4×4, `V` 4×5).
//! Only the glyphs needed for on-matrix messages are defined; unknown
//! characters (including space) advance the cursor without drawing.

use crate::frame::PixelBuffer;

/// Widest glyph; also the fallback width for characters without a glyph.
pub const MAX_GLYPH_W: u16 = 4;
pub const MAX_GLYPH_H: u16 = 5;
/// Horizontal distance between glyph origins
pub const ADVANCE: u16 = 4;

/// Rows of lit (`1`) and dark (`0`) pixels, top to bottom.
type Glyph = &'static [&'static [u8]];

const A: Glyph = &[&[0, 1, 0], &[1, 0, 1], &[1, 1, 1], &[1, 0, 1], &[1, 0, 1]];
const E: Glyph = &[&[1, 1, 1], &[1, 0, 0], &[1, 1, 0], &[1, 0, 0], &[1, 1, 1]];
const G: Glyph = &[&[0, 1, 1], &[1, 0, 0], &[1, 1, 1], &[1, 0, 1], &[0, 1, 1]];
const M: Glyph = &[&[1, 0, 0, 1], &[1, 1, 1, 1], &[1, 0, 1, 1], &[1, 0, 0, 1]];
const O: Glyph = &[&[0, 1, 0], &[1, 0, 1], &[1, 0, 1], &[1, 0, 1], &[0, 1, 0]];
const R: Glyph = &[&[1, 1, 0], &[1, 0, 1], &[1, 1, 0], &[1, 0, 1], &[1, 0, 1]];
const V: Glyph = &[
    &[1, 0, 0, 1],
    &[1, 0, 0, 1],
    &[0, 1, 0, 1],
    &[0, 1, 0, 1],
    &[0, 0, 1, 0],
];

fn glyph(ch: char) -> Option<Glyph> {
    match ch.to_ascii_uppercase() {
        'A' => Some(A),
        'E' => Some(E),
        'G' => Some(G),
        'M' => Some(M),
        'O' => Some(O),
        'R' => Some(R),
        'V' => Some(V),
        _ => None,
    }
}

fn glyph_width(g: Glyph) -> u16 {
    g.iter().map(|row| row.len() as u16).max().unwrap_or(0)
}

/// Width in pixels `text` occupies when drawn: every advance but the last,
/// plus the width of the last glyph.
pub fn text_width(text: &str) -> u16 {
    let Some(last) = text.chars().last() else {
        return 0;
    };
    let n = text.chars().count() as u16;
    let last_w = glyph(last).map(glyph_width).unwrap_or(MAX_GLYPH_W);
    (n - 1) * ADVANCE + last_w
}

/// Draw `text` with its top-left corner at `(x, y)`; pixels off the buffer are dropped.
pub fn draw_text(buf: &mut PixelBuffer, x: u16, y: u16, text: &str, color: u8) {
    for (i, ch) in text.chars().enumerate() {
        let Some(g) = glyph(ch) else { continue };
        let gx = x.saturating_add(i as u16 * ADVANCE);
        for (dy, row) in g.iter().enumerate() {
            for (dx, &on) in row.iter().enumerate() {
                if on != 0 {
                    buf.set(gx.saturating_add(dx as u16), y.saturating_add(dy as u16), color);
                }
            }
        }
    }
}
