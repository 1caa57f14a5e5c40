//! Benchmarks for the per-frame decode path.
//!
//! Performance budgets:
//! - Full frame tick at 80x24 cells: < 1ms
//! - Full frame tick at 200x60 cells: < 5ms
//! - Settled repaint (sweep finished, no flicker churn): < 500us at 80x24
//!
//! Run with: cargo bench -p glyphsweep-engine --bench frame_bench

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glyphsweep_engine::engine::EngineConfig;
use glyphsweep_engine::{DecodeEngine, EngineInput, Phase};

const FRAME: Duration = Duration::from_millis(16);

/// Pixel dimensions for common cell-grid sizes (9x14 px cells).
const SIZES: &[(usize, usize, &str)] = &[
    (720, 336, "80x24"),
    (1080, 560, "120x40"),
    (1800, 840, "200x60"),
];

fn generating_input() -> EngineInput {
    EngineInput {
        phase: Phase::Generating,
        top_theme: Some("integration gaps".into()),
        arr_at_risk: Some(1_300_000.0),
        recommendation: None,
    }
}

fn researching_input() -> EngineInput {
    EngineInput {
        phase: Phase::Researching,
        top_theme: Some("integration gaps".into()),
        arr_at_risk: None,
        recommendation: None,
    }
}

fn bench_frame_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/frame_tick");

    for &(width, height, name) in SIZES {
        let cells = (width / 9) * (height / 14);
        group.throughput(Throughput::Elements(cells as u64));

        // Mid-sweep: flicker, resolution, and glow all active.
        group.bench_with_input(
            BenchmarkId::new("mid_sweep", name),
            &(width, height),
            |b, &(w, h)| {
                let mut engine = DecodeEngine::with_seed(w, h, EngineConfig::default(), 0xB16B);
                engine.on_input_changed(&generating_input());
                engine.tick(FRAME);

                b.iter(|| {
                    // Re-arm whenever the sweep runs out so every
                    // iteration measures the busy path.
                    if !engine.sweep().active {
                        engine.on_input_changed(&generating_input());
                    }
                    engine.tick(black_box(FRAME));
                    black_box(engine.surface());
                });
            },
        );

        // Settled: every cell resolved, paint is the only work left.
        // Researching does not cycle, so the sweep never re-arms mid-run.
        group.bench_with_input(
            BenchmarkId::new("settled", name),
            &(width, height),
            |b, &(w, h)| {
                let mut engine = DecodeEngine::with_seed(w, h, EngineConfig::default(), 0xB16B);
                engine.on_input_changed(&researching_input());
                let ticks = engine.grid().cols().div_ceil(engine.sweep().speed);
                for _ in 0..ticks {
                    engine.tick(FRAME);
                }

                b.iter(|| {
                    engine.tick(black_box(Duration::from_millis(1)));
                    black_box(engine.surface());
                });
            },
        );
    }

    group.finish();
}

fn bench_input_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/input_change");

    for &(width, height, name) in SIZES {
        let cells = (width / 9) * (height / 14);
        group.throughput(Throughput::Elements(cells as u64));

        // Layout rebuild + grid reset + retrigger, no frame render.
        group.bench_with_input(
            BenchmarkId::new("retrigger", name),
            &(width, height),
            |b, &(w, h)| {
                let mut engine = DecodeEngine::with_seed(w, h, EngineConfig::default(), 0xB16B);
                let input = generating_input();

                b.iter(|| {
                    engine.on_input_changed(black_box(&input));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_frame_tick, bench_input_change);
criterion_main!(benches);
