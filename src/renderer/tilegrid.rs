use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::AssetError;
use crate::geometry::Rect;

use super::TextureId;

/// Pixels of this color become fully transparent when a sheet is loaded.
pub const COLOR_KEY: [u8; 3] = [0x00, 0xFF, 0x00];

/// Returned by [`TileGrid::pixel_at`] when no pixel is available.
pub const NO_PIXEL: u32 = 0;

/// Replace every [`COLOR_KEY`] pixel with transparent black.
pub fn apply_color_key(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        if px.0[..3] == COLOR_KEY {
            *px = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Decode the image at `path` and apply the color key.
pub fn load_keyed_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let mut img = image::open(path)
        .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?
        .to_rgba8();
    apply_color_key(&mut img);
    Ok(img)
}

/// A single image divided into a regular grid of `tile_w × tile_h` cells,
/// addressed left-to-right, top-to-bottom by a flat index.
///
/// The grid itself is pure bookkeeping; the GPU copy of the image lives in the
/// renderer's texture arena and is referenced through [`TileGrid::texture`].
/// A CPU copy of the pixels is kept only when asked for at creation, for
/// [`TileGrid::pixel_at`].
#[derive(Debug)]
pub struct TileGrid {
    tile_w: u32,
    tile_h: u32,
    /// Width of the sheet in tiles.
    cols: u32,
    /// Height of the sheet in tiles.
    rows: u32,
    pixels: Option<RgbaImage>,
    texture: Option<TextureId>,
}

impl TileGrid {
    /// Grid over an image of `image_w × image_h` pixels. Partial cells on the
    /// right and bottom edges are not addressable. A zero tile dimension
    /// yields an empty grid.
    pub fn new(image_w: u32, image_h: u32, tile_w: u32, tile_h: u32) -> Self {
        let (cols, rows) = if tile_w == 0 || tile_h == 0 {
            (0, 0)
        } else {
            (image_w / tile_w, image_h / tile_h)
        };
        Self { tile_w, tile_h, cols, rows, pixels: None, texture: None }
    }

    /// Grid over `img`; with `retain_pixels` a copy of the image is kept for
    /// [`TileGrid::pixel_at`].
    pub fn from_image(img: &RgbaImage, tile_w: u32, tile_h: u32, retain_pixels: bool) -> Self {
        let (w, h) = img.dimensions();
        let mut grid = Self::new(w, h, tile_w, tile_h);
        if retain_pixels {
            grid.pixels = Some(img.clone());
        }
        grid
    }

    /// Bind the GPU copy of this sheet.
    pub fn attach_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }

    /// Hand the texture handle back to the caller for release.
    pub(crate) fn detach_texture(&mut self) -> Option<TextureId> {
        self.texture.take()
    }

    pub fn texture(&self) -> Option<TextureId> { self.texture }
    pub fn tile_width(&self) -> u32 { self.tile_w }
    pub fn tile_height(&self) -> u32 { self.tile_h }
    pub fn columns(&self) -> u32 { self.cols }
    pub fn rows(&self) -> u32 { self.rows }
    pub fn has_pixels(&self) -> bool { self.pixels.is_some() }

    /// Number of addressable tiles.
    pub fn len(&self) -> u32 {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source rectangle of tile `index`, or [`Rect::ZERO`] past the last tile.
    pub fn tile_rect(&self, index: u32) -> Rect {
        if index >= self.len() {
            return Rect::ZERO;
        }
        let col = index % self.cols;
        let row = index / self.cols;
        Rect::new(
            (col * self.tile_w) as i32,
            (row * self.tile_h) as i32,
            self.tile_w as i32,
            self.tile_h as i32,
        )
    }

    /// Packed `0xRRGGBBAA` color of the tile-local pixel `(x, y)` in tile
    /// `index`.
    ///
    /// Returns [`NO_PIXEL`] when pixels were not retained, the index is past
    /// the last tile, or `(x, y)` falls outside the tile.
    pub fn pixel_at(&self, index: u32, x: u32, y: u32) -> u32 {
        let Some(pixels) = &self.pixels else { return NO_PIXEL };
        if index >= self.len() || x >= self.tile_w || y >= self.tile_h {
            return NO_PIXEL;
        }
        let tile = self.tile_rect(index);
        let px = pixels.get_pixel(tile.x as u32 + x, tile.y as u32 + y);
        u32::from_be_bytes(px.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
