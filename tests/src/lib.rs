//! Inputs shared by the benchmarks, and tests that go through several crates.

use scanvas::geom::{CubicBezierSegment, QuadraticBezierSegment};
use scanvas::math::point;
use scanvas::path::Command;

/// Path data exercising every command kind.
pub static SAMPLE_PATHS: [&str; 4] = [
    // Heart.
    "M 256 96 C 216 16 96 32 96 144 C 96 240 192 304 256 400 \
     C 320 304 416 240 416 144 C 416 32 296 16 256 96 Z",
    // Rounded badge with a hole.
    "M 64 32 H 448 A 32 32 0 0 1 480 64 V 448 A 32 32 0 0 1 448 480 \
     H 64 A 32 32 0 0 1 32 448 V 64 A 32 32 0 0 1 64 32 Z \
     M 256 128 a 128 128 0 1 0 0.1 0 Z",
    // Star.
    "M 256 16 L 397 450 L 28 182 L 484 182 L 115 450 Z",
    // Waves.
    "M 16 256 Q 80 128 144 256 T 272 256 T 400 256 T 496 256 L 496 496 L 16 496 Z \
     M 16 64 c 40 -40 80 40 120 0 s 80 40 120 0 s 80 40 120 0",
];

pub fn sample_commands() -> Vec<Vec<Command>> {
    SAMPLE_PATHS.iter().map(|d| scanvas::svg::parse(d)).collect()
}

// Deterministic so that benchmark runs compare the same work.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 % 10_000) as f64 * 0.05
    }
}

pub fn generate_cubic_curves(count: usize) -> Vec<CubicBezierSegment<f64>> {
    let mut rng = XorShift(0x2545_f491_4f6c_dd1d);
    (0..count)
        .map(|_| CubicBezierSegment {
            from: point(rng.next(), rng.next()),
            ctrl1: point(rng.next(), rng.next()),
            ctrl2: point(rng.next(), rng.next()),
            to: point(rng.next(), rng.next()),
        })
        .collect()
}

pub fn generate_quadratic_curves(count: usize) -> Vec<QuadraticBezierSegment<f64>> {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
    (0..count)
        .map(|_| QuadraticBezierSegment {
            from: point(rng.next(), rng.next()),
            ctrl: point(rng.next(), rng.next()),
            to: point(rng.next(), rng.next()),
        })
        .collect()
}

#[cfg(test)]
use scanvas::math::{Point, Transform};
#[cfg(test)]
use scanvas::path::{approximate, shapes, ApproximationOptions, ArcFlags};
#[cfg(test)]
use scanvas::raster::{FillOptions, Image, StrokeOptions};
#[cfg(test)]
use scanvas::{fill_path_data, stroke_path_data, RenderOptions, Renderer};

#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
fn assert_close(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

#[test]
fn sample_paths_parse() {
    init_logger();
    for d in &SAMPLE_PATHS {
        let (commands, error) = scanvas::svg::parse_with_error(d);
        assert_eq!(error, None, "{}", d);
        assert!(!commands.is_empty());
    }
}

#[test]
fn two_subpaths_end_to_end() {
    init_logger();
    let d = "M 10 10 h 20 Z M 200 200 h 20";
    let commands = scanvas::svg::parse(d);
    let subpaths = approximate(&commands, &Transform::identity(), &ApproximationOptions::DEFAULT);

    assert_eq!(
        subpaths,
        vec![
            vec![point(10.0, 10.0), point(30.0, 10.0), point(10.0, 10.0)],
            vec![point(200.0, 200.0), point(220.0, 200.0)],
        ]
    );

    // Both subpaths are flat: filling them paints nothing, stroking them paints
    // two 21 pixels long lines.
    let mut image = Image::new(256, 256, 0u8);
    fill_path_data(&mut image, d, &Transform::identity(), 1, &RenderOptions::DEFAULT);
    assert_eq!(image.count(|p| p == 1), 0);

    stroke_path_data(&mut image, d, &Transform::identity(), 1, &RenderOptions::DEFAULT);
    assert_eq!(image.count(|p| p == 1), 42);
    assert_eq!(image.get(30, 10), Some(1));
    assert_eq!(image.get(220, 200), Some(1));
}

#[test]
fn composed_transform_regression() {
    init_logger();
    let mut transform = Transform::identity();
    transform.translate(10.0, 20.0);
    transform.scale(3.0, 7.0);
    transform.rotate(90f64.to_radians());

    let parsed = scanvas::svg::parse_transform("translate(10,20) scale(3,7) rotate(90)").unwrap();
    assert_eq!(parsed, transform);

    let subpaths = approximate(
        &scanvas::svg::parse("M 100 100 h 10"),
        &transform,
        &ApproximationOptions::DEFAULT,
    );
    assert_close(subpaths[0][0], point(-290.0, 720.0));
    assert_close(subpaths[0][1], point(-290.0, 790.0));
}

#[test]
fn bezier_approximation_commutes_with_the_transform() {
    init_logger();
    let mut transform = Transform::identity();
    transform.translate(30.0, -5.0);
    transform.rotate(0.4);
    transform.scale(2.5, 0.75);
    transform.skew_x(0.2);

    let p = [
        point(0.0, 0.0),
        point(40.0, -10.0),
        point(60.0, 70.0),
        point(100.0, 20.0),
        point(120.0, 60.0),
    ];
    let in_user_space = vec![
        Command::move_to(p[0].x, p[0].y),
        Command::cubic_curve_to(p[1].x, p[1].y, p[2].x, p[2].y, p[3].x, p[3].y),
        Command::quadratic_curve_to(p[2].x, p[2].y, p[4].x, p[4].y),
    ];
    let q: Vec<Point> = p.iter().map(|p| transform.map_point(*p)).collect();
    let in_device_space = vec![
        Command::move_to(q[0].x, q[0].y),
        Command::cubic_curve_to(q[1].x, q[1].y, q[2].x, q[2].y, q[3].x, q[3].y),
        Command::quadratic_curve_to(q[2].x, q[2].y, q[4].x, q[4].y),
    ];

    // Curves are approximated after their control points are transformed.
    let options = ApproximationOptions::DEFAULT;
    assert_eq!(
        approximate(&in_user_space, &transform, &options),
        approximate(&in_device_space, &Transform::identity(), &options),
    );
}

#[test]
fn arcs_are_sampled_in_user_space() {
    init_logger();
    let flags = ArcFlags {
        large_arc: false,
        sweep: true,
    };

    // A half circle stretched horizontally by the transform...
    let stretched = approximate(
        &[
            Command::move_to(0.0, 0.0),
            Command::arc_to(10.0, 10.0, 0.0, flags, 0.0, 20.0),
        ],
        &Transform::scaling(4.0, 1.0),
        &ApproximationOptions::DEFAULT,
    );
    // ...and the same half ellipse described directly in device space.
    let direct = approximate(
        &[
            Command::move_to(0.0, 0.0),
            Command::arc_to(40.0, 10.0, 0.0, flags, 0.0, 20.0),
        ],
        &Transform::identity(),
        &ApproximationOptions::DEFAULT,
    );

    // Unlike curves, arcs are sampled before the transform, with a step count
    // based on the largest scale factor, so the two don't match point for point.
    assert_eq!(stretched[0].len(), 253);
    assert_eq!(direct[0].len(), 64);

    for subpath in &[&stretched[0], &direct[0]] {
        assert_close(subpath[0], point(0.0, 0.0));
        assert_close(*subpath.last().unwrap(), point(0.0, 20.0));
        for p in subpath.iter() {
            let (x, y) = (p.x / 40.0, (p.y - 10.0) / 10.0);
            assert!((x * x + y * y - 1.0).abs() < 1e-6, "{:?}", p);
            assert!(p.x > -1e-6);
        }
    }
}

#[test]
fn star_fill_rules() {
    init_logger();
    let d = SAMPLE_PATHS[2];
    let transform = Transform::scaling(0.25, 0.25);

    let mut renderer = Renderer::new();
    let mut non_zero = Image::new(128, 128, 0u8);
    renderer.fill_path_data(&mut non_zero, d, &transform, 1, &RenderOptions::DEFAULT);
    let mut even_odd = Image::new(128, 128, 0u8);
    let options = RenderOptions::DEFAULT.with_fill(FillOptions::even_odd());
    renderer.fill_path_data(&mut even_odd, d, &transform, 1, &options);

    // The pentagon in the middle.
    assert_eq!(non_zero.get(64, 64), Some(1));
    assert_eq!(even_odd.get(64, 64), Some(0));
    // A branch of the star.
    assert_eq!(non_zero.get(64, 20), Some(1));
    assert_eq!(even_odd.get(64, 20), Some(1));

    assert!(non_zero.count(|p| p == 1) > even_odd.count(|p| p == 1));
}

#[test]
fn points_attribute_to_pixels() {
    init_logger();
    let points = scanvas::svg::parse_points("0,0 10,0 10,10 0,10 5");
    assert_eq!(points.len(), 4);

    let mut image = Image::new(16, 16, 0u8);
    Renderer::new().fill_commands(
        &mut image,
        &shapes::polygon(&points),
        &Transform::identity(),
        1,
        &RenderOptions::DEFAULT,
    );
    assert_eq!(image.count(|p| p == 1), 100);

    let mut outline = Image::new(16, 16, 0u8);
    Renderer::new().stroke_commands(
        &mut outline,
        &shapes::polygon(&points),
        &Transform::identity(),
        1,
        &RenderOptions::DEFAULT,
    );
    assert_eq!(outline.count(|p| p == 1), 40);
}

#[test]
fn circle_area() {
    init_logger();
    let mut image = Image::new(64, 64, 0u8);
    Renderer::new().fill_commands(
        &mut image,
        &shapes::circle(32.0, 32.0, 20.0),
        &Transform::identity(),
        1,
        &RenderOptions::DEFAULT,
    );

    let area = core::f64::consts::PI * 20.0 * 20.0;
    let count = image.count(|p| p == 1) as f64;
    assert!((count - area).abs() < 40.0, "{} vs {}", count, area);
    assert_eq!(image.get(32, 32), Some(1));
    assert_eq!(image.get(32, 10), Some(0));
}

#[test]
fn wide_strokes_scale_with_the_transform() {
    init_logger();
    let options = RenderOptions::DEFAULT.with_stroke(StrokeOptions::line_width(1.0));

    let mut thin = Image::new(64, 64, 0u8);
    stroke_path_data(&mut thin, "M 4 8 H 28", &Transform::identity(), 1, &options);
    let mut thick = Image::new(64, 64, 0u8);
    stroke_path_data(&mut thick, "M 4 8 H 28", &Transform::scaling(2.0, 2.0), 1, &options);

    assert_eq!(thin.count(|p| p == 1), 25);
    // 2 pixels wide from x = 8 to x = 56.
    assert_eq!(thick.count(|p| p == 1), 2 * 48);
}

#[test]
fn malformed_data_is_truncated() {
    init_logger();
    let (commands, error) = scanvas::svg::parse_with_error("M10,10 L30,30 C 5 z");
    assert_eq!(
        commands,
        vec![Command::move_to(10.0, 10.0), Command::line_to(30.0, 30.0)]
    );
    assert!(error.is_some());
}

#[test]
fn generators_are_deterministic() {
    assert_eq!(generate_cubic_curves(10), generate_cubic_curves(10));
    assert_eq!(generate_quadratic_curves(3).len(), 3);
}
