//! Render benchmark: cost of applying entries to a surface.
//!
//! Target: a full 120-entry batch well under one drain interval

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use outview::{CarriageReturn, MemorySurface, Renderer, TextSurface};

fn append_line(c: &mut Criterion) {
    c.bench_function("render_append_line", |b| {
        let mut surface = MemorySurface::new();
        let mut renderer = Renderer::new(true);
        b.iter(|| {
            renderer
                .append(&mut surface, black_box("compiling crate v0.1.0\n"))
                .unwrap();
        });
    });
}

fn progress_overwrite(c: &mut Criterion) {
    c.bench_function("render_progress_overwrite", |b| {
        let mut surface = MemorySurface::new();
        let mut renderer = Renderer::new(true);
        renderer.append(&mut surface, "header\n").unwrap();
        let mut pct = 0u32;
        b.iter(|| {
            pct = (pct + 1) % 100;
            renderer
                .append(&mut surface, black_box(&format!("\rdownloading {pct}%")))
                .unwrap();
        });
    });
}

fn carriage_scrollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("carriage_scrollback");

    for lines in [100, 1_000, 10_000] {
        let history: String = (0..lines).map(|i| format!("line {i}\n")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(lines), &history, |b, history| {
            let mut surface = MemorySurface::new();
            surface.set_editable(true);
            let mut carriage = CarriageReturn::new();
            carriage.write_text(&mut surface, history).unwrap();
            b.iter(|| {
                carriage
                    .write_text(&mut surface, black_box("step 1\rstep 2\rstep 3"))
                    .unwrap();
            });
        });
    }

    group.finish();
}

fn batch(c: &mut Criterion) {
    c.bench_function("render_batch_120", |b| {
        let lines: Vec<String> = (0..120).map(|i| format!("entry {i}\n")).collect();
        b.iter(|| {
            let mut surface = MemorySurface::with_viewport(50);
            let mut renderer = Renderer::new(true);
            for line in &lines {
                renderer.append(&mut surface, line).unwrap();
            }
            black_box(surface.char_count())
        });
    });
}

criterion_group!(
    benches,
    append_line,
    progress_overwrite,
    carriage_scrollback,
    batch
);
criterion_main!(benches);
