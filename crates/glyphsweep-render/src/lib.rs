#![forbid(unsafe_code)]

//! Software raster kernel for Glyphsweep.
//!
//! This crate owns everything pixel-shaped and nothing animation-shaped:
//!
//! - [`PackedRgba`]: a 4-byte straight-alpha color with exact-rational
//!   SourceOver compositing.
//! - [`Surface`]: an RGBA8 framebuffer with clear / blend / gradient-band /
//!   glyph-blit primitives.
//! - [`glyph`]: monospace glyph rasterization plus a shelf-packed R8 atlas
//!   cache keyed by codepoint and pixel size.
//!
//! The animation engine (`glyphsweep-engine`) drives these primitives once
//! per frame; hosts read the finished surface and present it however they
//! like (the demo binary encodes PNG frames).

pub mod color;
pub mod glyph;
pub mod surface;

pub use color::PackedRgba;
pub use glyph::{AtlasRect, GlyphAtlas, GlyphAtlasError, GlyphKey, GlyphRaster, rasterize_glyph};
pub use surface::Surface;
