//! Benchmarks for per-frame work: formatting and animator ticks.
//!
//! A count-up formats one string per frame, so these stay well under a
//! frame budget even for the compact and currency paths.

use campaignkit_core::{format_value, DisplayFormat, Easing, FrameLoop, ValueAnimator};
use campaignkit_core::{CountUp, CountUpOptions, StatValue};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// =============================================================================
// Formatting Benchmarks
// =============================================================================

fn bench_format_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_value");

    for format in DisplayFormat::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(format), &format, |b, &format| {
            b.iter(|| format_value(black_box(1_234_567.891), format));
        });
    }

    group.finish();
}

// =============================================================================
// Animator Benchmarks
// =============================================================================

fn bench_animator_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("animator_tick");

    for easing in [Easing::Linear, Easing::CubicOut, Easing::CubicInOut] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{easing:?}")),
            &easing,
            |b, &easing| {
                let mut animator = ValueAnimator::new(0.0).with_easing(easing);
                let _ = animator.set_target(1_000_000.0, 0.0);
                let mut now = 0.0;
                b.iter(|| {
                    now = (now + 1.0) % 999.0;
                    animator.tick(black_box(now))
                });
            },
        );
    }

    group.finish();
}

fn bench_count_up_full_run(c: &mut Criterion) {
    c.bench_function("count_up_full_run_60fps", |b| {
        b.iter(|| {
            let mut frames = FrameLoop::new();
            let count_up = CountUp::mount(
                StatValue::Number(black_box(2_500_000.0)),
                CountUpOptions::default().with_format(DisplayFormat::Compact),
                |_: &str| {},
                0.0,
                &mut frames,
            );
            frames.run_until_idle(0.0, 1000.0 / 60.0, 120);
            count_up
        });
    });
}

// =============================================================================
// Groups
// =============================================================================

criterion_group!(
    benches,
    bench_format_value,
    bench_animator_tick,
    bench_count_up_full_run,
);
criterion_main!(benches);
