use std::ops::Range;

use crate::engine::Color;
use crate::geometry::Rect;

use super::TextureId;
use super::pipeline::SpriteVertex;
use super::tilegrid::TileGrid;

// ── DrawCommand ──────────────────────────────────────────────────────────────

/// One queued draw, in logical pixels.  Commands are drawn in queue order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Copy the `src` region of a texture into `dst`.
    Sprite { texture: TextureId, src: Rect, dst: Rect },
    /// Stretch a whole texture over `dst`.
    Image { texture: TextureId, dst: Rect },
    /// Solid rectangle.
    Fill { rect: Rect, color: Color },
}

// ── Canvas ───────────────────────────────────────────────────────────────────

/// Per-frame draw queue.  Game code records into it; the renderer turns it
/// into vertex batches once per frame.
#[derive(Debug)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
    clear_color: Color,
}

impl Default for Canvas {
    fn default() -> Self { Self::new() }
}

impl Canvas {
    pub fn new() -> Self {
        Self { commands: Vec::new(), clear_color: Color::BLACK }
    }

    /// Drop all queued commands and set the color the frame is cleared to.
    pub fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> Color { self.clear_color }
    pub fn commands(&self) -> &[DrawCommand] { &self.commands }
    pub fn len(&self) -> usize { self.commands.len() }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Queue tile `index` of `grid` at `dst`.
    ///
    /// Nothing is queued when the grid has no texture or the index is past
    /// the last tile.
    pub fn draw_tile(&mut self, grid: &TileGrid, index: u32, dst: Rect) {
        let Some(texture) = grid.texture() else { return };
        let src = grid.tile_rect(index);
        if src.is_empty() || dst.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Sprite { texture, src, dst });
    }

    pub fn draw_image(&mut self, texture: TextureId, dst: Rect) {
        if !dst.is_empty() {
            self.commands.push(DrawCommand::Image { texture, dst });
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !rect.is_empty() {
            self.commands.push(DrawCommand::Fill { rect, color });
        }
    }
}

// ── Batching ─────────────────────────────────────────────────────────────────

/// A run of consecutive vertices sharing one texture.
/// `texture == None` means the solid-fill texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub texture: Option<TextureId>,
    pub vertices: Range<u32>,
}

/// Convert `commands` into a vertex list and draw batches.
///
/// `texture_size` reports the pixel size of a live texture; commands naming a
/// texture it does not know (released or never created) are skipped.
/// Consecutive commands on the same texture share one batch so draw order is
/// preserved exactly.
pub fn build_batches(
    commands: &[DrawCommand],
    texture_size: impl Fn(TextureId) -> Option<(u32, u32)>,
) -> (Vec<SpriteVertex>, Vec<Batch>) {
    let mut vertices: Vec<SpriteVertex> = Vec::with_capacity(commands.len() * 6);
    let mut batches: Vec<Batch> = Vec::new();

    for cmd in commands {
        let (texture, dst, uv_min, uv_max, color) = match *cmd {
            DrawCommand::Sprite { texture, src, dst } => {
                let Some((tw, th)) = texture_size(texture) else { continue };
                if tw == 0 || th == 0 { continue; }
                let (tw, th) = (tw as f32, th as f32);
                let uv_min = [src.x as f32 / tw, src.y as f32 / th];
                let uv_max = [src.right() as f32 / tw, src.bottom() as f32 / th];
                (Some(texture), dst, uv_min, uv_max, Color::WHITE)
            }
            DrawCommand::Image { texture, dst } => {
                if texture_size(texture).is_none() { continue; }
                (Some(texture), dst, [0.0, 0.0], [1.0, 1.0], Color::WHITE)
            }
            DrawCommand::Fill { rect, color } => (None, rect, [0.0, 0.0], [1.0, 1.0], color),
        };

        let start = vertices.len() as u32;
        push_quad(&mut vertices, dst, uv_min, uv_max, color);
        let end = vertices.len() as u32;

        match batches.last_mut() {
            Some(last) if last.texture == texture => last.vertices.end = end,
            _ => batches.push(Batch { texture, vertices: start..end }),
        }
    }

    (vertices, batches)
}

fn push_quad(out: &mut Vec<SpriteVertex>, dst: Rect, uv_min: [f32; 2], uv_max: [f32; 2], color: Color) {
    let x0 = dst.x as f32;
    let y0 = dst.y as f32;
    let x1 = dst.right() as f32;
    let y1 = dst.bottom() as f32;
    let c = color.0;

    let tl = SpriteVertex { position: [x0, y0], uv: uv_min,               color: c };
    let tr = SpriteVertex { position: [x1, y0], uv: [uv_max[0], uv_min[1]], color: c };
    let bl = SpriteVertex { position: [x0, y1], uv: [uv_min[0], uv_max[1]], color: c };
    let br = SpriteVertex { position: [x1, y1], uv: uv_max,               color: c };
    out.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
}
