#![forbid(unsafe_code)]

//! Glyph rasterization + atlas cache (monospace-first).
//!
//! Scope is intentionally narrow:
//! - Deterministic glyph keys (codepoint + pixel size).
//! - A single R8 coverage atlas backing store, shelf-packed.
//! - Procedural rasterization: glyph bitmaps are deterministic hash
//!   patterns, so identical keys produce identical pixels across runs.
//!
//! There is no eviction. The decode animation draws from a 54-symbol noise
//! pool plus a handful of layout strings, which sits far below any
//! realistic atlas budget; running out degrades to [`GlyphAtlasError::AtlasFull`]
//! and the caller skips the glyph.

use std::collections::HashMap;
use std::fmt;

/// Deterministic glyph key: unicode scalar value + target pixel box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub codepoint: u32,
    pub px_w: u16,
    pub px_h: u16,
}

impl GlyphKey {
    #[must_use]
    pub fn from_char(ch: char, px_w: u16, px_h: u16) -> Self {
        Self {
            codepoint: ch as u32,
            px_w,
            px_h,
        }
    }
}

/// Rect within the atlas (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Glyph raster output: an R8 coverage bitmap (0 = empty, 255 = full ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRaster {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
}

/// Atlas insertion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphAtlasError {
    /// Glyph (with padding) does not fit in the configured atlas dimensions.
    GlyphTooLarge,
    /// No shelf space left for this glyph.
    AtlasFull,
    /// Rasterizer returned a bitmap whose size does not match its header.
    InvalidRaster,
}

impl fmt::Display for GlyphAtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlyphTooLarge => write!(f, "glyph too large for atlas"),
            Self::AtlasFull => write!(f, "atlas allocation failed (full)"),
            Self::InvalidRaster => write!(f, "invalid raster (bitmap size mismatch)"),
        }
    }
}

impl std::error::Error for GlyphAtlasError {}

/// Padding around each packed glyph, in pixels.
const SLOT_PADDING: u16 = 1;

/// Shelf-packed R8 glyph atlas with a key → rect index.
///
/// Packing walks left-to-right along the current shelf and opens a new
/// shelf below when a glyph does not fit horizontally. Shelf height is the
/// tallest glyph on that shelf.
pub struct GlyphAtlas {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
    slots: HashMap<GlyphKey, AtlasRect>,
    cursor_x: u16,
    cursor_y: u16,
    shelf_h: u16,
}

impl GlyphAtlas {
    /// Create an empty atlas of the given dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; usize::from(width) * usize::from(height)],
            slots: HashMap::new(),
            cursor_x: 0,
            cursor_y: 0,
            shelf_h: 0,
        }
    }

    /// Atlas width in pixels (also the row stride of [`Self::pixels`]).
    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Full backing store, row-major R8.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Backing-store slice starting at the top-left pixel of `rect`.
    ///
    /// Rows within the returned slice are [`Self::width`] apart.
    #[must_use]
    pub fn rect_data(&self, rect: AtlasRect) -> &[u8] {
        let start = usize::from(rect.y) * self.width() + usize::from(rect.x);
        &self.pixels[start..]
    }

    /// Number of cached glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up `key`, rasterizing and packing it on a miss.
    ///
    /// `rasterize` is only invoked on a miss. The raster must match the
    /// dimensions it declares or the insert is rejected.
    pub fn get_or_insert_with(
        &mut self,
        key: GlyphKey,
        rasterize: impl FnOnce(GlyphKey) -> GlyphRaster,
    ) -> Result<AtlasRect, GlyphAtlasError> {
        if let Some(&rect) = self.slots.get(&key) {
            return Ok(rect);
        }

        let raster = rasterize(key);
        let expected = usize::from(raster.width) * usize::from(raster.height);
        if raster.pixels.len() != expected || raster.width == 0 || raster.height == 0 {
            return Err(GlyphAtlasError::InvalidRaster);
        }

        let rect = self.allocate(raster.width, raster.height)?;
        self.upload(rect, &raster);
        self.slots.insert(key, rect);
        Ok(rect)
    }

    fn allocate(&mut self, w: u16, h: u16) -> Result<AtlasRect, GlyphAtlasError> {
        let padded_w = w.saturating_add(SLOT_PADDING);
        let padded_h = h.saturating_add(SLOT_PADDING);
        if padded_w > self.width || padded_h > self.height {
            return Err(GlyphAtlasError::GlyphTooLarge);
        }

        // Wrap to a new shelf when the current one runs out of width.
        if self.cursor_x.saturating_add(padded_w) > self.width {
            self.cursor_x = 0;
            self.cursor_y = self.cursor_y.saturating_add(self.shelf_h);
            self.shelf_h = 0;
        }
        if self.cursor_y.saturating_add(padded_h) > self.height {
            return Err(GlyphAtlasError::AtlasFull);
        }

        let rect = AtlasRect {
            x: self.cursor_x,
            y: self.cursor_y,
            w,
            h,
        };
        self.cursor_x += padded_w;
        self.shelf_h = self.shelf_h.max(padded_h);
        Ok(rect)
    }

    fn upload(&mut self, rect: AtlasRect, raster: &GlyphRaster) {
        let stride = self.width();
        for row in 0..usize::from(rect.h) {
            let src_start = row * usize::from(rect.w);
            let dst_start = (usize::from(rect.y) + row) * stride + usize::from(rect.x);
            self.pixels[dst_start..dst_start + usize::from(rect.w)]
                .copy_from_slice(&raster.pixels[src_start..src_start + usize::from(rect.w)]);
        }
    }
}

impl fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("glyphs", &self.slots.len())
            .field("cursor", &(self.cursor_x, self.cursor_y))
            .finish()
    }
}

/// Procedurally rasterize a monospace glyph box.
///
/// Glyph shapes are deterministic functions of the codepoint: a hash picks
/// which columns carry vertical strokes and which rows carry crossbars, so
/// distinct codepoints read as distinct dense shapes at terminal sizes.
/// Whitespace codepoints rasterize fully empty.
#[must_use]
pub fn rasterize_glyph(codepoint: u32, width: u16, height: u16) -> GlyphRaster {
    let w = width.max(1);
    let h = height.max(1);
    let mut pixels = vec![0u8; usize::from(w) * usize::from(h)];

    let blank = match char::from_u32(codepoint) {
        Some(ch) => ch.is_whitespace(),
        None => true,
    };

    if !blank {
        let seed = codepoint
            .wrapping_mul(0x9E37_79B9)
            .rotate_left(13)
            .wrapping_add(u32::from(w) << 8 | u32::from(h));
        for y in 0..h {
            for x in 0..w {
                let stroke_bit = (seed >> (u32::from(x) % 29)) & 1 == 1;
                let bar_bit = (seed >> ((u32::from(y) + 7) % 31)) & 1 == 1;
                let vertical = stroke_bit && x > 0 && x + 1 < w;
                let horizontal = bar_bit && (y == 1 || y == h / 2 || y + 2 == h);
                let speck = (u32::from(x) * 5 + u32::from(y) * 3 + seed) % 19 == 0;
                if vertical || horizontal || speck {
                    pixels[usize::from(y) * usize::from(w) + usize::from(x)] = 0xFF;
                }
            }
        }
    }

    GlyphRaster {
        width: w,
        height: h,
        pixels,
    }
}
