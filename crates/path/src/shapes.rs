//! Command lists for the SVG basic shapes.
//!
//! Every shape is expressed with path commands so that it goes through the same
//! transform and approximation code as a `<path>` element. Shapes that SVG
//! disables (null or negative sizes) produce an empty list.

use crate::commands::Command;
use crate::geom::ArcFlags;
use crate::math::Point;

const CLOCKWISE: ArcFlags = ArcFlags {
    large_arc: false,
    sweep: true,
};

/// `<rect>` without rounded corners.
pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Vec<Command> {
    if !(width > 0.0 && height > 0.0) {
        return Vec::new();
    }

    vec![
        Command::move_to(x, y),
        Command::horizontal_line_to(x + width),
        Command::vertical_line_to(y + height),
        Command::horizontal_line_to(x),
        Command::close(),
    ]
}

/// `<rect>` with the `rx` and `ry` attributes.
///
/// A missing radius takes the value of the other one, and both are clamped to half
/// of the size of the rectangle. Without any radius this is a plain rectangle.
pub fn rounded_rectangle(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rx: Option<f64>,
    ry: Option<f64>,
) -> Vec<Command> {
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.max(0.0).min(width * 0.5);
    let ry = ry.max(0.0).min(height * 0.5);

    if rx <= 0.0 || ry <= 0.0 {
        return rectangle(x, y, width, height);
    }

    let right = x + width;
    let bottom = y + height;

    vec![
        Command::move_to(x + rx, y),
        Command::horizontal_line_to(right - rx),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, right, y + ry),
        Command::vertical_line_to(bottom - ry),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, right - rx, bottom),
        Command::horizontal_line_to(x + rx),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, x, bottom - ry),
        Command::vertical_line_to(y + ry),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, x + rx, y),
        Command::close(),
    ]
}

/// `<ellipse>`, as four quarter arcs starting at the rightmost point.
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<Command> {
    if !(rx > 0.0 && ry > 0.0) {
        return Vec::new();
    }

    vec![
        Command::move_to(cx + rx, cy),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, cx, cy + ry),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, cx - rx, cy),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, cx, cy - ry),
        Command::arc_to(rx, ry, 0.0, CLOCKWISE, cx + rx, cy),
        Command::close(),
    ]
}

/// `<circle>`.
pub fn circle(cx: f64, cy: f64, r: f64) -> Vec<Command> {
    ellipse(cx, cy, r, r)
}

/// `<line>`.
pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Command> {
    vec![Command::move_to(x1, y1), Command::line_to(x2, y2)]
}

/// `<polyline>`.
pub fn polyline(points: &[Point]) -> Vec<Command> {
    let mut commands = Vec::with_capacity(points.len());
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        commands.push(Command::move_to(first.x, first.y));
    }
    for p in iter {
        commands.push(Command::line_to(p.x, p.y));
    }

    commands
}

/// `<polygon>`: a closed polyline.
pub fn polygon(points: &[Point]) -> Vec<Command> {
    let mut commands = polyline(points);
    if !commands.is_empty() {
        commands.push(Command::close());
    }

    commands
}

#[cfg(test)]
use crate::approximator::approximate;
#[cfg(test)]
use crate::math::{point, Transform};
#[cfg(test)]
use crate::ApproximationOptions;

#[cfg(test)]
fn flatten(commands: &[Command]) -> Vec<Point> {
    let mut subpaths = approximate(commands, &Transform::identity(), &ApproximationOptions::DEFAULT);
    assert_eq!(subpaths.len(), 1);
    subpaths.pop().unwrap()
}

#[test]
fn rectangle_points() {
    assert_eq!(
        flatten(&rectangle(1.0, 2.0, 10.0, 5.0)),
        vec![
            point(1.0, 2.0),
            point(11.0, 2.0),
            point(11.0, 7.0),
            point(1.0, 7.0),
            point(1.0, 2.0),
        ]
    );
}

#[test]
fn empty_shapes() {
    assert!(rectangle(0.0, 0.0, 0.0, 10.0).is_empty());
    assert!(rectangle(0.0, 0.0, 10.0, -1.0).is_empty());
    assert!(rounded_rectangle(0.0, 0.0, -5.0, 10.0, Some(1.0), None).is_empty());
    assert!(ellipse(0.0, 0.0, 0.0, 10.0).is_empty());
    assert!(circle(0.0, 0.0, -1.0).is_empty());
    assert!(polyline(&[]).is_empty());
    assert!(polygon(&[]).is_empty());
}

#[test]
fn rounded_rectangle_radii() {
    // Missing ry copies rx, and radii are clamped to half the size.
    let commands = rounded_rectangle(0.0, 0.0, 20.0, 10.0, Some(8.0), None);
    assert_eq!(commands[0], Command::move_to(8.0, 0.0));
    assert_eq!(commands[1], Command::horizontal_line_to(12.0));
    assert_eq!(commands[2].args()[..2], [8.0, 5.0]);

    let plain = rounded_rectangle(0.0, 0.0, 20.0, 10.0, None, None);
    assert_eq!(plain, rectangle(0.0, 0.0, 20.0, 10.0));
}

#[test]
fn rounded_rectangle_stays_in_bounds() {
    let points = flatten(&rounded_rectangle(10.0, 10.0, 40.0, 20.0, Some(5.0), Some(5.0)));
    assert_eq!(points.first(), points.last());
    for p in &points {
        assert!(p.x >= 10.0 - 1e-9 && p.x <= 50.0 + 1e-9, "{:?}", p);
        assert!(p.y >= 10.0 - 1e-9 && p.y <= 30.0 + 1e-9, "{:?}", p);
    }
}

#[test]
fn circle_points_are_on_the_circle() {
    let points = flatten(&circle(50.0, 50.0, 20.0));
    assert_eq!(points[0], point(70.0, 50.0));
    assert_eq!(*points.last().unwrap(), point(70.0, 50.0));
    assert!(points.len() > 8);
    for p in &points {
        assert!(((*p - point(50.0, 50.0)).length() - 20.0).abs() < 1e-6);
    }
}

#[test]
fn polygon_is_closed() {
    let triangle = [point(0.0, 0.0), point(10.0, 0.0), point(0.0, 10.0)];

    assert_eq!(
        flatten(&polyline(&triangle)),
        triangle.to_vec()
    );
    assert_eq!(
        flatten(&polygon(&triangle)),
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(0.0, 10.0),
            point(0.0, 0.0)
        ]
    );
    assert_eq!(
        flatten(&line(1.0, 1.0, 2.0, 2.0)),
        vec![point(1.0, 1.0), point(2.0, 2.0)]
    );
}
