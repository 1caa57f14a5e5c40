#![forbid(unsafe_code)]

//! Grid-based character-scramble "decode" animation engine.
//!
//! The engine renders pipeline progress as a terminal-style animation: a
//! grid of monospaced glyph cells flickers with random noise characters and
//! resolves left-to-right behind a moving sweep frontier, revealing the
//! layout for the current pipeline phase. A trailing glow band follows the
//! frontier.
//!
//! # Architecture
//!
//! - [`pool`]: the fixed noise-glyph alphabet and a small deterministic-step
//!   RNG.
//! - [`grid`]: the cell matrix ([`grid::Cell`], [`grid::CellGrid`]).
//! - [`layout`]: pure phase → text-line layout ([`layout::build_lines`]).
//! - [`sweep`]: the reveal frontier ([`sweep::SweepState`]).
//! - [`cycle`]: periodic busy-message swaps during long-running phases.
//! - [`engine`]: [`engine::DecodeEngine`], the single object owning grid,
//!   sweep, lines, and the raster surface; hosts call
//!   [`engine::DecodeEngine::on_input_changed`] and
//!   [`engine::DecodeEngine::tick`].
//! - [`driver`]: optional real-time playback on a background thread with a
//!   present callback and cancellable lifecycle.
//!
//! All engine state mutation happens on whichever thread owns the engine;
//! there is no internal locking. Time is injected ([`engine::DecodeEngine::tick`]
//! takes a delta), so every frame is reproducible under test.

pub mod cycle;
pub mod driver;
pub mod engine;
pub mod grid;
pub mod layout;
pub mod pool;
pub mod sweep;

pub use driver::{DriverHandle, EngineDriver};
pub use engine::{DecodeEngine, EngineConfig, EngineInput};
pub use layout::{Line, Phase};
