//! Performance benchmarks for nyan-reporter.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - A single draw cycle at several terminal widths
//! - A full run driven from libtest JSON events

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::{self, Cursor};

use nyan_reporter::events;
use nyan_reporter::{ColorChoice, NyanReporter, ReporterOptions, RunCounters, Terminal};

fn colored_options() -> ReporterOptions {
    ReporterOptions {
        color: ColorChoice::Always,
        ..ReporterOptions::default()
    }
}

/// Helper to build a libtest event stream with N passing tests.
fn event_stream(num_tests: usize) -> String {
    let mut stream = format!(
        "{{\"type\":\"suite\",\"event\":\"started\",\"test_count\":{num_tests}}}\n"
    );
    for i in 0..num_tests {
        stream.push_str(&format!(
            "{{\"type\":\"test\",\"name\":\"tests::case_{i}\",\"event\":\"ok\"}}\n"
        ));
    }
    stream
}

fn bench_draw_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_frame");
    let counters = RunCounters {
        num_passed_tests: 40,
        num_failed_tests: 1,
        num_pending_tests: 2,
        num_total_tests: 43,
        start_time: 0,
    };

    for width in [80u16, 200, 400] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            let mut reporter =
                NyanReporter::new(io::sink(), Terminal::new(true, true, width), colored_options());
            b.iter(|| reporter.draw_frame(black_box(&counters)).unwrap());
        });
    }
    group.finish();
}

fn bench_event_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_run");
    for num_tests in [10usize, 500] {
        let stream = event_stream(num_tests);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_tests),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let reporter = NyanReporter::new(
                        io::sink(),
                        Terminal::new(true, true, 120),
                        colored_options(),
                    )
                    .with_clock(|| 0);
                    events::run(Cursor::new(black_box(stream.as_bytes())), reporter, || 0)
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_draw_frame, bench_event_run);
criterion_main!(benches);
