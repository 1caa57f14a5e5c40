#![forbid(unsafe_code)]

//! RGBA8 software surface.
//!
//! The surface is a plain row-major framebuffer with the handful of
//! compositing primitives the decode animation needs: full clears, glyph
//! blits (R8 coverage × foreground alpha, SourceOver), and a horizontal
//! gradient band for the sweep glow. All draws clip at the surface edges;
//! out-of-range coordinates are dropped pixel by pixel, never panic.

use crate::color::PackedRgba;
use crate::glyph::GlyphRaster;

/// Bytes per pixel (RGBA8).
const BPP: usize = 4;

/// An RGBA8 framebuffer.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a surface filled with transparent black.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height * BPP],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel. Out-of-range coordinates read as transparent.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> PackedRgba {
        if x >= self.width || y >= self.height {
            return PackedRgba::TRANSPARENT;
        }
        let i = (y * self.width + x) * BPP;
        PackedRgba::rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: PackedRgba) {
        for px in self.pixels.chunks_exact_mut(BPP) {
            px[0] = color.r();
            px[1] = color.g();
            px[2] = color.b();
            px[3] = color.a();
        }
    }

    /// SourceOver-blend one pixel. Off-surface coordinates are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, src: PackedRgba) {
        if src.a() == 0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * BPP;
        let dst = PackedRgba::rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        );
        let out = src.over(dst);
        self.pixels[i] = out.r();
        self.pixels[i + 1] = out.g();
        self.pixels[i + 2] = out.b();
        self.pixels[i + 3] = out.a();
    }

    /// Full-height vertical strip colored by a left-to-right gradient.
    ///
    /// Column `x0` takes `from`, column `x1 - 1` takes `to`; each column's
    /// color is SourceOver-composited over the existing pixels. Used for the
    /// sweep glow band trailing the frontier.
    pub fn gradient_band_h(&mut self, x0: i32, x1: i32, from: PackedRgba, to: PackedRgba) {
        if x1 <= x0 {
            return;
        }
        let span = (x1 - x0 - 1).max(1) as f32;
        for x in x0..x1 {
            let t = (x - x0) as f32 / span;
            let color = from.lerp(to, t);
            if color.a() == 0 {
                continue;
            }
            for y in 0..self.height as i32 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Blit an R8 coverage bitmap with rows `stride` apart.
    ///
    /// Each coverage byte scales the foreground alpha; zero-coverage pixels
    /// cost nothing. Clips at all four surface edges.
    pub fn blit_coverage(
        &mut self,
        coverage: &[u8],
        stride: usize,
        w: usize,
        h: usize,
        x: i32,
        y: i32,
        fg: PackedRgba,
    ) {
        for row in 0..h {
            let line = row * stride;
            for col in 0..w {
                let cov = coverage[line + col];
                if cov == 0 {
                    continue;
                }
                let a = (u32::from(fg.a()) * u32::from(cov) / 255) as u8;
                if a == 0 {
                    continue;
                }
                let src = PackedRgba::rgba(fg.r(), fg.g(), fg.b(), a);
                self.blend_pixel(x + col as i32, y + row as i32, src);
            }
        }
    }

    /// Blit a standalone glyph raster (stride == width).
    pub fn blit_glyph(&mut self, raster: &GlyphRaster, x: i32, y: i32, fg: PackedRgba) {
        self.blit_coverage(
            &raster.pixels,
            usize::from(raster.width),
            usize::from(raster.width),
            usize::from(raster.height),
            x,
            y,
            fg,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::rasterize_glyph;

    #[test]
    fn clear_fills_every_pixel() {
        let mut s = Surface::new(4, 3);
        let bg = PackedRgba::rgb(9, 9, 11);
        s.clear(bg);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(s.pixel(x, y), bg);
            }
        }
    }

    #[test]
    fn blend_pixel_clips_out_of_range() {
        let mut s = Surface::new(2, 2);
        s.blend_pixel(-1, 0, PackedRgba::WHITE);
        s.blend_pixel(0, -1, PackedRgba::WHITE);
        s.blend_pixel(2, 0, PackedRgba::WHITE);
        s.blend_pixel(0, 2, PackedRgba::WHITE);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn gradient_band_endpoints() {
        let mut s = Surface::new(10, 1);
        s.clear(PackedRgba::BLACK);
        let from = PackedRgba::rgba(255, 255, 255, 0);
        let to = PackedRgba::rgba(255, 255, 255, 255);
        s.gradient_band_h(0, 10, from, to);
        // Leftmost column transparent → black survives; rightmost is white.
        assert_eq!(s.pixel(0, 0), PackedRgba::BLACK);
        assert_eq!(s.pixel(9, 0), PackedRgba::WHITE);
    }

    #[test]
    fn gradient_band_empty_range_is_noop() {
        let mut s = Surface::new(4, 2);
        s.gradient_band_h(3, 3, PackedRgba::WHITE, PackedRgba::WHITE);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn glyph_blit_clips_at_edges() {
        let mut s = Surface::new(5, 5);
        s.clear(PackedRgba::BLACK);
        let raster = rasterize_glyph('M' as u32, 7, 12);
        // Partially off every edge; must not panic.
        s.blit_glyph(&raster, -3, -3, PackedRgba::WHITE);
        s.blit_glyph(&raster, 3, 3, PackedRgba::WHITE);
    }

    #[test]
    fn blit_scales_alpha_by_coverage() {
        let mut s = Surface::new(2, 1);
        s.clear(PackedRgba::BLACK);
        let cov = [128u8, 0u8];
        s.blit_coverage(&cov, 2, 2, 1, 0, 0, PackedRgba::WHITE);
        // Half coverage over black → mid gray; zero coverage untouched.
        assert_eq!(s.pixel(0, 0).r(), 128);
        assert_eq!(s.pixel(1, 0), PackedRgba::BLACK);
    }
}
