#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use scanvas::math::Transform;
use scanvas::path::{ApproximationOptions, PathApproximator};
use scanvas_tests::*;

static ACCURACIES: [f64; 6] = [0.05, 0.1, 0.25, 0.5, 1.0, 2.0];

fn parse(c: &mut Criterion) {
    c.bench_function("parse sample paths", |b| {
        b.iter(|| {
            for d in &SAMPLE_PATHS {
                criterion::black_box(scanvas::svg::parse(d));
            }
        })
    });
}

fn curves(c: &mut Criterion) {
    let cubics = generate_cubic_curves(500);
    let quadratics = generate_quadratic_curves(500);

    let mut g = c.benchmark_group("curves");
    for accuracy in &ACCURACIES {
        g.bench_with_input(BenchmarkId::new("cubic", accuracy), accuracy, |b, accuracy| {
            b.iter(|| {
                for curve in &cubics {
                    criterion::black_box(curve.approximate(*accuracy));
                }
            })
        });
        g.bench_with_input(BenchmarkId::new("quadratic", accuracy), accuracy, |b, accuracy| {
            b.iter(|| {
                for curve in &quadratics {
                    criterion::black_box(curve.approximate(*accuracy));
                }
            })
        });
    }
}

fn paths(c: &mut Criterion) {
    let commands = sample_commands();
    let mut transform = Transform::identity();
    transform.scale(2.0, 2.0);
    transform.rotate(0.3);

    let mut g = c.benchmark_group("paths");
    for accuracy in &ACCURACIES {
        let options = ApproximationOptions::accuracy(*accuracy);
        g.bench_with_input(BenchmarkId::new("approximate", accuracy), &options, |b, options| {
            b.iter(|| {
                let mut approximator = PathApproximator::with_options(&transform, *options);
                for path in &commands {
                    approximator.approximate(path);
                }
                criterion::black_box(approximator.into_subpaths());
            })
        });
    }
}

criterion_group!(approximation, parse, curves, paths);
criterion_main!(approximation);
