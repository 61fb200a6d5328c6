#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use scanvas::math::Transform;
use scanvas::path::{approximate, ApproximationOptions, Subpath};
use scanvas::raster::{FillOptions, Image, ScanlineFill, StrokeOptions, StrokeRenderer};
use scanvas_tests::*;

fn sample_subpaths() -> Vec<Vec<Subpath>> {
    sample_commands()
        .iter()
        .map(|commands| approximate(commands, &Transform::identity(), &ApproximationOptions::DEFAULT))
        .collect()
}

fn fill(c: &mut Criterion) {
    let paths = sample_subpaths();
    let mut image = Image::new(512, 512, 0u32);
    let mut rasterizer = ScanlineFill::new();

    let mut g = c.benchmark_group("fill");
    for (name, options) in &[
        ("non-zero", FillOptions::non_zero()),
        ("even-odd", FillOptions::even_odd()),
    ] {
        g.bench_with_input(BenchmarkId::new("samples", *name), options, |b, options| {
            b.iter(|| {
                for subpaths in &paths {
                    rasterizer.fill(&mut image, subpaths, 0xff00ff00, options);
                }
            })
        });
    }
}

fn stroke(c: &mut Criterion) {
    let paths = sample_subpaths();
    let mut image = Image::new(512, 512, 0u32);
    let mut stroker = StrokeRenderer::new();

    let mut g = c.benchmark_group("stroke");
    for width in &[1.0, 4.0, 16.0] {
        let options = StrokeOptions::line_width(*width);
        g.bench_with_input(BenchmarkId::new("samples", width), &options, |b, options| {
            b.iter(|| {
                for subpaths in &paths {
                    stroker.stroke_subpaths(&mut image, subpaths, 0xff0000ff, options);
                }
            })
        });
    }
}

criterion_group!(rasterization, fill, stroke);
criterion_main!(rasterization);
