#![forbid(unsafe_code)]

//! The decode engine.
//!
//! [`DecodeEngine`] is the single object owning all animation state: the
//! cell grid, the sweep frontier, the current layout lines, the RNG, the
//! cycle scheduler, the glyph atlas, and the output surface. Hosts drive it
//! through exactly two operations:
//!
//! - [`DecodeEngine::on_input_changed`] whenever the pipeline phase or any
//!   display value changes, and
//! - [`DecodeEngine::tick`] once per display frame with the elapsed time.
//!
//! Time is injected rather than read from a clock, so frames are exactly
//! reproducible under test. The engine has no failure path: bad input
//! degrades to a blank layout, and a full atlas degrades to skipping the
//! affected glyph.

use std::collections::HashSet;
use std::time::Duration;

use glyphsweep_render::{GlyphAtlas, GlyphKey, PackedRgba, Surface, rasterize_glyph};
use tracing::{debug, trace};

use crate::cycle::CycleState;
use crate::grid::CellGrid;
use crate::layout::{self, Line, Phase, center_col};
use crate::pool::GlyphRng;
use crate::sweep::SweepState;

// Paint opacities (over the dark background, white foreground).
const ALPHA_BRIGHT: f32 = 0.88;
const ALPHA_RESOLVED: f32 = 0.50;
const ALPHA_NOISE: f32 = 0.09;
const ALPHA_NOISE_FLICKER: f32 = 0.06;
/// Per-frame probability threshold for a noise cell to flicker brighter.
const FLICKER_THRESHOLD: f32 = 0.97;

/// Glow band geometry, in pixels (trailing the frontier).
const GLOW_TRAIL_PX: i32 = 40;
const GLOW_LEAD_PX: i32 = 4;

/// Engine construction parameters.
///
/// Defaults match the reference look: 9×14 px character cells over a
/// zinc-950 background.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Character cell width in pixels.
    pub cell_width: usize,
    /// Character cell height in pixels.
    pub cell_height: usize,
    /// Surface clear color.
    pub background: PackedRgba,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_width: 9,
            cell_height: 14,
            background: PackedRgba::rgb(0x09, 0x09, 0x0b),
        }
    }
}

/// Everything the engine consumes from the outside world.
///
/// `top_theme` is required for researching/generating, `recommendation`
/// for complete; a missing required value renders a blank frame rather
/// than erroring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineInput {
    pub phase: Phase,
    pub top_theme: Option<String>,
    pub arr_at_risk: Option<f64>,
    pub recommendation: Option<String>,
}

/// The character-scramble decode animation engine.
pub struct DecodeEngine {
    config: EngineConfig,
    surface: Surface,
    atlas: GlyphAtlas,
    grid: CellGrid,
    sweep: SweepState,
    lines: Vec<Line>,
    /// Flat `row * cols + col` indices covered by bright lines. Rebuilt
    /// each frame from `lines`; reused to avoid reallocating.
    bright: HashSet<usize>,
    rng: GlyphRng,
    cycle: CycleState,
}

impl DecodeEngine {
    /// Engine sized to a drawing surface of `width_px × height_px`, with
    /// the default cell metrics. The grid is sized once here; later surface
    /// resizes are not supported.
    #[must_use]
    pub fn new(width_px: usize, height_px: usize) -> Self {
        Self::with_config(width_px, height_px, EngineConfig::default())
    }

    /// Engine with explicit configuration and entropy-seeded noise.
    #[must_use]
    pub fn with_config(width_px: usize, height_px: usize, config: EngineConfig) -> Self {
        Self::build(width_px, height_px, config, GlyphRng::from_entropy())
    }

    /// Engine with a pinned noise seed (reproducible frames for tests and
    /// captures).
    #[must_use]
    pub fn with_seed(width_px: usize, height_px: usize, config: EngineConfig, seed: u64) -> Self {
        Self::build(width_px, height_px, config, GlyphRng::from_seed(seed))
    }

    fn build(width_px: usize, height_px: usize, config: EngineConfig, mut rng: GlyphRng) -> Self {
        let cols = width_px / config.cell_width;
        let rows = height_px / config.cell_height;
        let grid = CellGrid::new(cols, rows, &mut rng);
        let sweep = SweepState::new(cols);
        debug!(cols, rows, speed = sweep.speed, "engine created");
        Self {
            surface: Surface::new(width_px, height_px),
            atlas: GlyphAtlas::new(512, 128),
            grid,
            sweep,
            lines: Vec::new(),
            bright: HashSet::new(),
            rng,
            cycle: CycleState::for_phase(Phase::Idle),
            config,
        }
    }

    /// React to a phase or display-value change: recompute the layout,
    /// restart the cycle scheduler for the new phase, and fire a sweep.
    pub fn on_input_changed(&mut self, input: &EngineInput) {
        debug!(phase = input.phase.as_str(), "engine input changed");
        let lines = layout::build_lines(
            input.phase,
            self.grid.cols(),
            self.grid.rows(),
            input.top_theme.as_deref(),
            input.arr_at_risk,
            input.recommendation.as_deref(),
        );
        self.cycle = CycleState::for_phase(input.phase);
        self.trigger(lines);
    }

    /// The single sweep entry point: reset every cell, write the new
    /// targets, rewind the frontier. Both phase changes and the cycle
    /// scheduler land here, so only one sweep is ever in flight — a new
    /// trigger unconditionally supersedes the old one.
    pub fn trigger(&mut self, lines: Vec<Line>) {
        trace!(lines = lines.len(), "sweep trigger");
        self.grid.reset_for_sweep(&mut self.rng);
        for line in &lines {
            self.grid.write_targets(line);
        }
        self.lines = lines;
        self.sweep.retrigger();
    }

    /// Advance the engine by `dt` and paint one frame.
    ///
    /// The cycle timer runs first (so a due busy-message swap is fully
    /// applied before this frame is drawn), then the sweep advances, cells
    /// update, and the surface repaints.
    pub fn tick(&mut self, dt: Duration) {
        if let Some([top, bottom]) = self.cycle.tick(dt) {
            trace!(top, bottom, "cycle advance");
            let lines = self.synthetic_pair(top, bottom);
            self.trigger(lines);
        }
        self.render_frame();
    }

    /// Two centered non-bright lines flanking the vertical middle, used by
    /// the cycle scheduler (bypasses the phase layout on purpose).
    fn synthetic_pair(&self, top: &str, bottom: &str) -> Vec<Line> {
        let rows = self.grid.rows() as i64;
        let cols = self.grid.cols();
        let mid = rows / 2;
        [(top, mid - 1), (bottom, mid + 1)]
            .into_iter()
            .filter(|&(_, row)| row >= 0 && row < rows)
            .map(|(text, row)| Line {
                row: row as usize,
                col: center_col(text, cols),
                text: text.to_string(),
                bright: false,
            })
            .collect()
    }

    /// One frame: advance the sweep, resolve/flicker cells, repaint.
    pub fn render_frame(&mut self) {
        let cols = self.grid.cols();
        let rows = self.grid.rows();

        self.sweep.advance(cols);
        let front = self.sweep.front;

        for row in 0..rows {
            for col in 0..cols {
                let cell = self.grid.cell_mut(row, col);
                if cell.resolved {
                    continue;
                }
                if col <= front {
                    // Instant reveal, no fade.
                    cell.resolved = true;
                    cell.current = cell.target;
                    continue;
                }
                cell.timer += 1;
                if cell.timer >= cell.speed {
                    cell.timer = 0;
                    cell.current = self.rng.glyph();
                }
            }
        }

        self.paint();
    }

    fn paint(&mut self) {
        let cols = self.grid.cols();
        let rows = self.grid.rows();
        let cw = self.config.cell_width;

        self.surface.clear(self.config.background);

        self.bright.clear();
        for line in &self.lines {
            if !line.bright {
                continue;
            }
            // Clamp to the right edge, matching target truncation.
            let len = line
                .text
                .chars()
                .count()
                .min(cols.saturating_sub(line.col));
            for i in 0..len {
                self.bright.insert(line.row * cols + line.col + i);
            }
        }

        for row in 0..rows {
            for col in 0..cols {
                let cell = *self.grid.cell(row, col);
                // Blank cells are never painted, resolved or not.
                if cell.current == ' ' {
                    continue;
                }
                let alpha = if cell.resolved {
                    if self.bright.contains(&(row * cols + col)) {
                        ALPHA_BRIGHT
                    } else {
                        ALPHA_RESOLVED
                    }
                } else if self.rng.next_f32() > FLICKER_THRESHOLD {
                    ALPHA_NOISE + ALPHA_NOISE_FLICKER
                } else {
                    ALPHA_NOISE
                };
                self.draw_glyph(cell.current, col, row, alpha);
            }
        }

        // Glow band trailing the frontier while the sweep is moving.
        if self.sweep.active && self.sweep.front > 0 {
            let gx = (self.sweep.front * cw) as i32;
            self.surface.gradient_band_h(
                gx - GLOW_TRAIL_PX,
                gx + GLOW_LEAD_PX,
                PackedRgba::rgba(255, 255, 255, 0),
                PackedRgba::WHITE.with_opacity(ALPHA_NOISE),
            );
        }
    }

    fn draw_glyph(&mut self, glyph: char, col: usize, row: usize, alpha: f32) {
        let gw = self.config.cell_width.saturating_sub(2).max(1) as u16;
        let gh = self.config.cell_height.saturating_sub(3).max(1) as u16;
        let key = GlyphKey::from_char(glyph, gw, gh);
        let rect = match self
            .atlas
            .get_or_insert_with(key, |k| rasterize_glyph(k.codepoint, gw, gh))
        {
            Ok(rect) => rect,
            Err(err) => {
                trace!(%err, %glyph, "glyph skipped");
                return;
            }
        };
        let x = (col * self.config.cell_width + 1) as i32;
        let y = (row * self.config.cell_height + 1) as i32;
        let fg = PackedRgba::WHITE.with_opacity(alpha);
        let stride = self.atlas.width();
        self.surface.blit_coverage(
            self.atlas.rect_data(rect),
            stride,
            usize::from(rect.w),
            usize::from(rect.h),
            x,
            y,
            fg,
        );
    }

    /// The raster output, repainted by every [`DecodeEngine::tick`].
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    #[must_use]
    pub fn sweep(&self) -> &SweepState {
        &self.sweep
    }

    /// Lines from the most recent trigger.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether the current phase swaps busy messages periodically.
    #[must_use]
    pub fn is_cycling(&self) -> bool {
        self.cycle.is_cycling()
    }
}
