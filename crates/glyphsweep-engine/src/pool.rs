#![forbid(unsafe_code)]

//! Noise-glyph alphabet and RNG.
//!
//! Unresolved cells show uniformly random glyphs from a fixed pool of
//! uppercase letters, digits, and symbols. Reproducibility is not a goal
//! for the animation itself, but the generator steps deterministically from
//! its seed so tests can pin exact frames via [`GlyphRng::from_seed`].

use std::time::{SystemTime, UNIX_EPOCH};

/// The fixed noise alphabet (54 ASCII symbols).
pub const GLYPH_POOL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%&*[]{}|<>?~=+";

/// Splitmix-style 64-bit generator.
///
/// One multiply-xorshift finalizer per step; plenty for visual noise and
/// cheap enough to call per cell per frame.
#[derive(Debug, Clone)]
pub struct GlyphRng {
    state: u64,
}

impl GlyphRng {
    /// Seed explicitly (tests, reproducible captures).
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from wall-clock entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED_5EED);
        Self::from_seed(nanos ^ 0x9E37_79B9_7F4A_7C15)
    }

    /// Next raw 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, bound)`. Returns 0 for `bound == 0`.
    #[inline]
    pub fn next_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % bound as u64) as usize
    }

    /// Uniform float in `[0.0, 1.0)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits.
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// One random glyph from [`GLYPH_POOL`].
    #[inline]
    pub fn glyph(&mut self) -> char {
        GLYPH_POOL[self.next_below(GLYPH_POOL.len())] as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_has_expected_symbols() {
        assert_eq!(GLYPH_POOL.len(), 54);
        assert!(GLYPH_POOL.iter().all(u8::is_ascii));
        assert!(GLYPH_POOL.contains(&b'A'));
        assert!(GLYPH_POOL.contains(&b'9'));
        assert!(GLYPH_POOL.contains(&b'+'));
        assert!(!GLYPH_POOL.contains(&b' '));
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = GlyphRng::from_seed(42);
        let mut b = GlyphRng::from_seed(42);
        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn glyphs_come_from_pool() {
        let mut rng = GlyphRng::from_seed(7);
        for _ in 0..512 {
            let g = rng.glyph();
            assert!(GLYPH_POOL.contains(&(g as u8)), "glyph {g:?} not in pool");
        }
    }

    #[test]
    fn next_f32_in_unit_interval() {
        let mut rng = GlyphRng::from_seed(99);
        for _ in 0..512 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn next_below_respects_bound() {
        let mut rng = GlyphRng::from_seed(3);
        for _ in 0..256 {
            assert!(rng.next_below(6) < 6);
        }
        assert_eq!(rng.next_below(0), 0);
    }
}
