//! Property tests for sweep and layout invariants.

use std::time::Duration;

use glyphsweep_engine::engine::EngineConfig;
use glyphsweep_engine::layout::{Phase, build_lines};
use glyphsweep_engine::sweep::SweepState;
use glyphsweep_engine::{DecodeEngine, EngineInput};
use proptest::prelude::*;

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Extracting),
        Just(Phase::Researching),
        Just(Phase::Generating),
        Just(Phase::Complete),
        Just(Phase::Idle),
    ]
}

proptest! {
    /// The frontier never decreases, never exceeds the column count, and
    /// once inactive stays inactive until retriggered.
    #[test]
    fn sweep_is_monotone(cols in 0usize..500, ticks in 0usize..600) {
        let mut sweep = SweepState::new(cols);
        sweep.retrigger();
        let mut prev = sweep.front;
        let mut went_inactive = false;
        for _ in 0..ticks {
            sweep.advance(cols);
            prop_assert!(sweep.front >= prev);
            prop_assert!(sweep.front <= cols);
            if went_inactive {
                prop_assert!(!sweep.active);
            }
            went_inactive |= !sweep.active;
            prev = sweep.front;
        }
    }

    /// Exactly ceil(cols / speed) ticks finish a sweep.
    #[test]
    fn sweep_finishes_on_schedule(cols in 1usize..500) {
        let mut sweep = SweepState::new(cols);
        sweep.retrigger();
        let need = cols.div_ceil(sweep.speed);
        for i in 0..need {
            prop_assert!(sweep.active, "deactivated early at tick {i}");
            sweep.advance(cols);
        }
        prop_assert!(!sweep.active);
        prop_assert_eq!(sweep.front, cols);
    }

    /// Layout output is pure and always lands inside the grid.
    #[test]
    fn layout_is_pure_and_in_bounds(
        phase in arb_phase(),
        cols in 0usize..250,
        rows in 0usize..80,
        theme in proptest::option::of("[a-zA-Z0-9 ]{0,40}"),
        arr in proptest::option::of(0.0f64..10_000_000.0),
        rec in proptest::option::of("[a-zA-Z0-9:+$ \n]{0,120}"),
    ) {
        let a = build_lines(phase, cols, rows, theme.as_deref(), arr, rec.as_deref());
        let b = build_lines(phase, cols, rows, theme.as_deref(), arr, rec.as_deref());
        prop_assert_eq!(&a, &b);
        for line in &a {
            prop_assert!(line.row < rows);
            prop_assert!(line.col <= cols.max(1));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// After ceil(cols/speed) frames every cell is resolved onto its
    /// target, whatever the grid size or phase.
    #[test]
    fn engine_converges(
        width_px in 9usize..300,
        height_px in 14usize..140,
        phase in arb_phase(),
    ) {
        let mut engine = DecodeEngine::with_seed(width_px, height_px, EngineConfig::default(), 0xBEEF);
        engine.on_input_changed(&EngineInput {
            phase,
            top_theme: Some("retention".into()),
            arr_at_risk: Some(1_300_000.0),
            recommendation: Some("STOP: x\nBUILD: y".into()),
        });
        let cols = engine.grid().cols();
        let speed = engine.sweep().speed;
        for _ in 0..cols.div_ceil(speed) {
            engine.tick(Duration::from_millis(16));
        }
        prop_assert!(!engine.sweep().active);
        for (_, _, cell) in engine.grid().iter() {
            prop_assert!(cell.resolved);
            prop_assert_eq!(cell.current, cell.target);
        }
    }
}
