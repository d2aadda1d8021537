//! Ingestion and navigation benchmarks.
//!
//! Measures batch ingestion of large result sets and the cost of single-step
//! and page navigation deep inside a loaded store.
//!
//! Run with: cargo bench --bench navigation_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use happygrep::session::Session;
use happygrep::source::LineSource;
use happygrep::view::{GrepFormat, GridSurface};
use happygrep::view_state::{NavRequest, Viewport};
use std::io::Cursor;

const VIEWPORT_HEIGHT: usize = 60;
const VIEWPORT_WIDTH: usize = 200;

fn grep_output(count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| {
            format!(
                "./src/module_{}/file_{i}.rs:{}:    let value = compute(input, {i});\t// note\n",
                i % 40,
                i + 1
            )
        })
        .collect::<String>()
        .into_bytes()
}

fn loaded_session(data: &[u8]) -> (Session<GrepFormat>, GridSurface) {
    let source = LineSource::from_reader(Cursor::new(data.to_vec()));
    let mut session = Session::new(
        GrepFormat::default(),
        source,
        Viewport::new(VIEWPORT_HEIGHT, VIEWPORT_WIDTH),
    );
    let mut surface = GridSurface::new(VIEWPORT_HEIGHT, VIEWPORT_WIDTH);
    while session.is_loading() {
        session.fetch(&mut surface);
    }
    (session, surface)
}

fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");

    for count in [1_000usize, 30_000] {
        let data = grep_output(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| {
                let (session, _) = loaded_session(black_box(data));
                black_box(session.total())
            });
        });
    }

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let data = grep_output(30_000);
    let mut group = c.benchmark_group("navigation");

    let requests = [
        ("move_down", NavRequest::MoveDown),
        ("page_down", NavRequest::PageDown),
        ("page_up", NavRequest::PageUp),
    ];

    for (name, request) in requests {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let (mut session, mut surface) = loaded_session(&data);
                    for _ in 0..200 {
                        session.dispatch(NavRequest::PageDown, &mut surface);
                    }
                    (session, surface)
                },
                |(mut session, mut surface)| {
                    for _ in 0..100 {
                        black_box(session.dispatch(request, &mut surface));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.bench_function("resize", |b| {
        let (mut session, mut surface) = loaded_session(&data);
        let mut tall = false;
        b.iter(|| {
            tall = !tall;
            let height = if tall { VIEWPORT_HEIGHT } else { VIEWPORT_HEIGHT / 2 };
            session.dispatch(
                NavRequest::Resize {
                    height,
                    width: VIEWPORT_WIDTH,
                },
                &mut surface,
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_ingestion, bench_navigation);
criterion_main!(benches);
