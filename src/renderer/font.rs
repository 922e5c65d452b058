use std::fmt;
use std::path::Path;

use crate::error::AssetError;
use crate::geometry::{Point, Rect};

use super::Renderer;
use super::canvas::Canvas;
use super::tilegrid::TileGrid;

/// Width and height of one glyph cell in the font sheet, in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// First character stored in the font sheet (`'!'`); glyph 0 is this code.
pub const FIRST_GLYPH: u8 = 33;

/// Tab stops are four glyphs wide.
const TAB_GLYPHS: i32 = 4;

const BACKSPACE: u8 = 0x08;

// ── Layout output ────────────────────────────────────────────────────────────

/// A glyph positioned by [`GlyphRenderer::layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedGlyph {
    /// Flat tile index in the font sheet.
    pub index: u32,
    /// Source region in the font sheet; [`Rect::ZERO`] when the sheet has no
    /// such tile.
    pub src: Rect,
    /// Destination on screen.
    pub dst: Rect,
}

/// Result of laying out a string.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Box spanning everything the cursor passed over.
    pub bounds: Rect,
}

// ── GlyphRenderer ────────────────────────────────────────────────────────────

/// Fixed-width bitmap font backed by a sheet of 8×8 glyphs covering ASCII
/// `'!'..='~'` in reading order, drawn at an integer scale.
pub struct GlyphRenderer {
    grid: TileGrid,
    scale: u32,
}

impl GlyphRenderer {
    /// Wrap an existing sheet.  A scale of zero is treated as one.
    pub fn new(grid: TileGrid, scale: u32) -> Self {
        Self { grid, scale: scale.max(1) }
    }

    /// Load the font sheet at `path` and upload it.
    pub fn load(renderer: &mut Renderer, path: &Path, scale: u32) -> Result<Self, AssetError> {
        let grid = renderer.load_tile_grid(path, GLYPH_SIZE, GLYPH_SIZE, false)?;
        Ok(Self::new(grid, scale))
    }

    /// Free the sheet's texture.  Safe to call more than once.
    pub fn release(&mut self, renderer: &mut Renderer) {
        renderer.release_tile_grid(&mut self.grid);
    }

    pub fn grid(&self) -> &TileGrid { &self.grid }
    pub fn scale(&self) -> u32 { self.scale }

    /// On-screen size of one glyph cell.
    pub fn cell(&self) -> i32 {
        (GLYPH_SIZE * self.scale) as i32
    }

    /// Sheet index for a printable byte, `None` for control codes, space,
    /// DEL and anything outside 7-bit ASCII.
    pub fn glyph_index(byte: u8) -> Option<u32> {
        (FIRST_GLYPH..=b'~').contains(&byte).then(|| (byte - FIRST_GLYPH) as u32)
    }

    /// Position every glyph of `text`, starting at `origin` (`None` = `(0, 0)`).
    ///
    /// Control bytes move the cursor instead of drawing:
    /// - `\b` steps back one cell, `\t` forward four, space forward one
    /// - `\n` moves down one row and then behaves like `\r`
    /// - `\r` returns to `origin.x`
    ///
    /// Other control codes are ignored.  The bounds' width reaches the
    /// furthest x the cursor stood at when a line ended (or at the end of the
    /// text); the height covers every row visited.
    pub fn layout(&self, text: &str, origin: Option<Point>) -> TextLayout {
        let origin = origin.unwrap_or(Point::ORIGIN);
        let cell = self.cell();
        let mut cursor = origin;
        let mut max_x = origin.x;
        let mut glyphs = Vec::with_capacity(text.len());

        for byte in text.bytes() {
            match byte {
                BACKSPACE => cursor.x -= cell,
                b'\t' => cursor.x += TAB_GLYPHS * cell,
                b' ' => cursor.x += cell,
                b'\n' | b'\r' => {
                    if byte == b'\n' {
                        cursor.y += cell;
                    }
                    max_x = max_x.max(cursor.x);
                    cursor.x = origin.x;
                }
                _ => {
                    let Some(index) = Self::glyph_index(byte) else { continue };
                    glyphs.push(PlacedGlyph {
                        index,
                        src: self.grid.tile_rect(index),
                        dst: Rect::new(cursor.x, cursor.y, cell, cell),
                    });
                    cursor.x += cell;
                }
            }
        }
        max_x = max_x.max(cursor.x);

        TextLayout {
            glyphs,
            bounds: Rect::new(origin.x, origin.y, max_x - origin.x, cursor.y - origin.y + cell),
        }
    }

    /// Lay out `text` and queue its glyphs on `canvas`.  Returns the bounds.
    pub fn render(&self, canvas: &mut Canvas, text: &str, origin: Option<Point>) -> Rect {
        let layout = self.layout(text, origin);
        for glyph in &layout.glyphs {
            canvas.draw_tile(&self.grid, glyph.index, glyph.dst);
        }
        layout.bounds
    }

    /// [`GlyphRenderer::render`] for `format_args!` output.
    pub fn render_fmt(&self, canvas: &mut Canvas, origin: Option<Point>, args: fmt::Arguments<'_>) -> Rect {
        match args.as_str() {
            Some(text) => self.render(canvas, text, origin),
            None => self.render(canvas, &fmt::format(args), origin),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_index_covers_printable_ascii_only() {
        assert_eq!(GlyphRenderer::glyph_index(b'!'), Some(0));
        assert_eq!(GlyphRenderer::glyph_index(b'A'), Some(32));
        assert_eq!(GlyphRenderer::glyph_index(b'~'), Some(93));
        assert_eq!(GlyphRenderer::glyph_index(b' '), None);
        assert_eq!(GlyphRenderer::glyph_index(b'\n'), None);
        assert_eq!(GlyphRenderer::glyph_index(0x7F), None);
        assert_eq!(GlyphRenderer::glyph_index(0xC3), None);
    }

    #[test]
    fn zero_scale_is_clamped() {
        let font = GlyphRenderer::new(TileGrid::new(128, 48, 8, 8), 0);
        assert_eq!(font.scale(), 1);
    }
}
