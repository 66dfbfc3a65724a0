//! Benchmarks for the transition engine.
//!
//! Run with: cargo bench -p fstack-engine --bench engine_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fstack_engine::{FrameController, SwitchStrategy};
use kurbo::Size;
use std::hint::black_box;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn controller(panels: usize, strategy: SwitchStrategy) -> FrameController {
    let mut c = FrameController::new();
    c.set_switch_animation(strategy, true);
    c.set_surface_size(Size::new(1280.0, 720.0));
    for _ in 0..panels {
        c.add_panel();
    }
    c
}

// =============================================================================
// Full stepped switches
// =============================================================================

fn bench_stepped_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/stepped_switch");

    for strategy in [
        SwitchStrategy::Scale,
        SwitchStrategy::Swipe,
        SwitchStrategy::MoveRight,
        SwitchStrategy::ScrollVertical,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{strategy:?}")),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    let mut c = controller(8, strategy);
                    c.go_to(7);
                    while !c.is_idle() {
                        c.tick(FRAME);
                    }
                    black_box(c.current_position())
                })
            },
        );
    }

    group.finish();
}

// =============================================================================
// Frame output
// =============================================================================

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/frames");

    for panels in [4usize, 32, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(panels), &panels, |b, &n| {
            let mut c = controller(n, SwitchStrategy::Swipe);
            c.go_to(n - 1);
            c.tick(Duration::from_millis(100));
            b.iter(|| black_box(c.frames()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stepped_switch, bench_frames);

criterion_main!(benches);
