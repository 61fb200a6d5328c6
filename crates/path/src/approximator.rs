//! Conversion of path commands into device space polylines.
//!
//! Straight segments and bézier curves are transformed before being approximated:
//! béziers are affine-invariant so approximating the transformed control points
//! gives an accuracy that is relative to the output resolution. Elliptic arcs are
//! not, so they are approximated in path space with a step count scaled by the
//! transform and each resulting point is transformed afterwards.

use crate::commands::{Command, CommandKind};
use crate::geom::{approximate_arc, approximate_cubic, approximate_quadratic};
use crate::math::{point, Point, Transform, Vector};
use crate::polygon::PolygonBuilder;
use crate::{ApproximationOptions, Subpath};

/// Walks path commands and accumulates the resulting subpaths.
///
/// Each call to [`approximate`](PathApproximator::approximate) starts from a fresh
/// walker state (current position at the origin, no previous control point) and
/// appends the subpaths it produces to the ones already collected.
pub struct PathApproximator<'l> {
    transform: &'l Transform,
    options: ApproximationOptions,
    subpaths: Vec<Subpath>,
}

struct WalkState {
    // Path space.
    position: Point,
    start: Point,
    prev_cubic_ctrl: Option<Point>,
    prev_quadratic_ctrl: Option<Point>,
    // Device space.
    polygon: PolygonBuilder,
}

impl WalkState {
    fn new() -> Self {
        WalkState {
            position: Point::origin(),
            start: Point::origin(),
            prev_cubic_ctrl: None,
            prev_quadratic_ctrl: None,
            polygon: PolygonBuilder::new(),
        }
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            self.position + Vector::new(x, y)
        } else {
            point(x, y)
        }
    }

    // Reflection of the previous control point through the current position, or the
    // current position when the previous command was not of the same family.
    fn reflect(&self, ctrl: Option<Point>) -> Point {
        match ctrl {
            Some(ctrl) => self.position + (self.position - ctrl),
            None => self.position,
        }
    }
}

impl<'l> PathApproximator<'l> {
    pub fn new(transform: &'l Transform) -> Self {
        Self::with_options(transform, ApproximationOptions::DEFAULT)
    }

    pub fn with_options(transform: &'l Transform, options: ApproximationOptions) -> Self {
        PathApproximator {
            transform,
            options,
            subpaths: Vec::new(),
        }
    }

    pub fn options(&self) -> &ApproximationOptions {
        &self.options
    }

    /// Approximates a command list, appending one subpath per run of commands
    /// started by a move-to.
    pub fn approximate(&mut self, commands: &[Command]) {
        let mut state = WalkState::new();

        for cmd in commands {
            self.approximate_command(&mut state, cmd);
        }

        self.flush(&mut state);
    }

    /// The subpaths produced so far.
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn into_subpaths(self) -> Vec<Subpath> {
        self.subpaths
    }

    fn approximate_command(&mut self, state: &mut WalkState, cmd: &Command) {
        let relative = cmd.is_relative();
        let args = cmd.args();
        let kind = cmd.kind();

        match kind {
            CommandKind::MoveTo => {
                let to = state.resolve(relative, args[0], args[1]);
                if cmd.is_implicit() && !state.polygon.is_empty() {
                    self.line_to(state, to);
                } else {
                    self.flush(state);
                    state.start = to;
                    state.position = to;
                    state.polygon.move_to(self.transform.map_point(to));
                }
            }
            CommandKind::LineTo => {
                let to = state.resolve(relative, args[0], args[1]);
                self.line_to(state, to);
            }
            CommandKind::HorizontalLineTo => {
                let x = if relative {
                    state.position.x + args[0]
                } else {
                    args[0]
                };
                self.line_to(state, point(x, state.position.y));
            }
            CommandKind::VerticalLineTo => {
                let y = if relative {
                    state.position.y + args[0]
                } else {
                    args[0]
                };
                self.line_to(state, point(state.position.x, y));
            }
            CommandKind::CubicCurveTo => {
                let ctrl1 = state.resolve(relative, args[0], args[1]);
                let ctrl2 = state.resolve(relative, args[2], args[3]);
                let to = state.resolve(relative, args[4], args[5]);
                self.cubic_to(state, ctrl1, ctrl2, to);
                state.prev_cubic_ctrl = Some(ctrl2);
            }
            CommandKind::SmoothCubicCurveTo => {
                let ctrl1 = state.reflect(state.prev_cubic_ctrl);
                let ctrl2 = state.resolve(relative, args[0], args[1]);
                let to = state.resolve(relative, args[2], args[3]);
                self.cubic_to(state, ctrl1, ctrl2, to);
                state.prev_cubic_ctrl = Some(ctrl2);
            }
            CommandKind::QuadraticCurveTo => {
                let ctrl = state.resolve(relative, args[0], args[1]);
                let to = state.resolve(relative, args[2], args[3]);
                self.quadratic_to(state, ctrl, to);
                state.prev_quadratic_ctrl = Some(ctrl);
            }
            CommandKind::SmoothQuadraticCurveTo => {
                let ctrl = state.reflect(state.prev_quadratic_ctrl);
                let to = state.resolve(relative, args[0], args[1]);
                self.quadratic_to(state, ctrl, to);
                state.prev_quadratic_ctrl = Some(ctrl);
            }
            CommandKind::ArcTo => {
                let to = state.resolve(relative, args[5], args[6]);
                let large_arc = args[3] != 0.0;
                let sweep = args[4] != 0.0;
                self.arc_to(state, args[0], args[1], args[2].to_radians(), large_arc, sweep, to);
            }
            CommandKind::ClosePath => {
                state.polygon.close();
                state.position = state.start;
            }
        }

        // Smooth curves only reflect the control point of a curve of their own family
        // that immediately precedes them.
        if !kind.is_cubic() {
            state.prev_cubic_ctrl = None;
        }
        if !kind.is_quadratic() {
            state.prev_quadratic_ctrl = None;
        }
    }

    fn flush(&mut self, state: &mut WalkState) {
        if state.polygon.is_empty() {
            return;
        }

        let subpath = state.polygon.take();
        log::trace!(
            "subpath #{} with {} points",
            self.subpaths.len(),
            subpath.len()
        );
        self.subpaths.push(subpath);
    }

    // Segments drawn before any move-to start from the current position.
    fn current_device_point(&self, state: &mut WalkState) -> Point {
        match state.polygon.current() {
            Some(p) => p,
            None => {
                let p = self.transform.map_point(state.position);
                state.polygon.line_to(p);
                p
            }
        }
    }

    fn line_to(&self, state: &mut WalkState, to: Point) {
        self.current_device_point(state);
        state.polygon.line_to(self.transform.map_point(to));
        state.position = to;
    }

    fn cubic_to(&self, state: &mut WalkState, ctrl1: Point, ctrl2: Point, to: Point) {
        let from = self.current_device_point(state);
        let points = approximate_cubic(
            from,
            self.transform.map_point(ctrl1),
            self.transform.map_point(ctrl2),
            self.transform.map_point(to),
            self.options.accuracy,
        );

        for p in points.into_iter().skip(1) {
            state.polygon.line_to(p);
        }
        state.position = to;
    }

    fn quadratic_to(&self, state: &mut WalkState, ctrl: Point, to: Point) {
        let from = self.current_device_point(state);
        let points = approximate_quadratic(
            from,
            self.transform.map_point(ctrl),
            self.transform.map_point(to),
            self.options.accuracy,
        );

        for p in points.into_iter().skip(1) {
            state.polygon.line_to(p);
        }
        state.position = to;
    }

    #[allow(clippy::too_many_arguments)]
    fn arc_to(
        &self,
        state: &mut WalkState,
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) {
        self.current_device_point(state);
        let points = approximate_arc(
            state.position,
            to,
            large_arc,
            sweep,
            rx,
            ry,
            x_rotation,
            self.transform.max_scale(),
        );

        // The first point is the current position, already in the polygon.
        for p in points.into_iter().skip(1) {
            state.polygon.line_to(self.transform.map_point(p));
        }
        state.position = to;
    }
}

/// Approximates a command list in one go.
pub fn approximate(
    commands: &[Command],
    transform: &Transform,
    options: &ApproximationOptions,
) -> Vec<Subpath> {
    let mut approximator = PathApproximator::with_options(transform, *options);
    approximator.approximate(commands);
    approximator.into_subpaths()
}

#[cfg(test)]
use crate::geom::{ArcFlags, CubicBezierSegment};

#[cfg(test)]
fn approximate_identity(commands: &[Command]) -> Vec<Subpath> {
    approximate(commands, &Transform::identity(), &ApproximationOptions::DEFAULT)
}

#[test]
fn two_subpaths() {
    // M 10 10 h 20 Z M 200 200 h 20
    let commands = vec![
        Command::move_to(10.0, 10.0),
        Command::horizontal_line_to(20.0).relative(),
        Command::close(),
        Command::move_to(200.0, 200.0),
        Command::horizontal_line_to(20.0).relative(),
    ];

    assert_eq!(
        approximate_identity(&commands),
        vec![
            vec![point(10.0, 10.0), point(30.0, 10.0), point(10.0, 10.0)],
            vec![point(200.0, 200.0), point(220.0, 200.0)],
        ]
    );
}

#[test]
fn close_path_is_idempotent() {
    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::line_to(10.0, 0.0),
        Command::line_to(10.0, 10.0),
        Command::line_to(0.0, 0.0),
        Command::close(),
    ];

    let subpaths = approximate_identity(&commands);
    assert_eq!(subpaths.len(), 1);
    let points = &subpaths[0];
    assert_eq!(points.len(), 5);
    assert_eq!(points[3], point(0.0, 0.0));
    assert_eq!(points[4], point(0.0, 0.0));
}

#[test]
fn close_resets_position() {
    let commands = vec![
        Command::move_to(5.0, 5.0),
        Command::line_to(15.0, 5.0),
        Command::close(),
        Command::line_to(0.0, 10.0).relative(),
    ];

    // Without a move-to the commands following a close continue the subpath.
    assert_eq!(
        approximate_identity(&commands),
        vec![vec![
            point(5.0, 5.0),
            point(15.0, 5.0),
            point(5.0, 5.0),
            point(5.0, 15.0)
        ]]
    );
}

#[test]
fn relative_and_absolute_lines() {
    let commands = vec![
        Command::move_to(1.0, 2.0).relative(),
        Command::vertical_line_to(3.0).relative(),
        Command::horizontal_line_to(-1.0),
        Command::vertical_line_to(0.0),
        Command::line_to(2.0, 2.0).relative(),
    ];

    assert_eq!(
        approximate_identity(&commands),
        vec![vec![
            point(1.0, 2.0),
            point(1.0, 5.0),
            point(-1.0, 5.0),
            point(-1.0, 0.0),
            point(1.0, 2.0),
        ]]
    );
}

#[test]
fn implicit_move_to_continues_the_subpath() {
    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::move_to(10.0, 0.0).implicit(),
        Command::move_to(0.0, 10.0).relative().implicit(),
    ];

    assert_eq!(
        approximate_identity(&commands),
        vec![vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]]
    );
}

#[test]
fn line_without_move_to_starts_at_origin() {
    let commands = vec![Command::line_to(10.0, 10.0), Command::line_to(20.0, 20.0)];

    assert_eq!(
        approximate_identity(&commands),
        vec![vec![point(0.0, 0.0), point(10.0, 10.0), point(20.0, 20.0)]]
    );
}

#[test]
fn transform_is_applied() {
    let mut transform = Transform::identity();
    transform.translate(100.0, 0.0);
    transform.scale(2.0, 2.0);

    let commands = vec![
        Command::move_to(1.0, 1.0),
        Command::line_to(2.0, 0.0).relative(),
    ];

    let subpaths = approximate(&commands, &transform, &ApproximationOptions::DEFAULT);
    assert_eq!(subpaths, vec![vec![point(102.0, 2.0), point(106.0, 2.0)]]);
}

#[test]
fn cubic_curve_does_not_duplicate_the_start() {
    let commands = vec![
        Command::move_to(10.0, 10.0),
        Command::cubic_curve_to(10.0, 110.0, 110.0, 110.0, 110.0, 10.0),
    ];

    let subpaths = approximate_identity(&commands);
    let points = &subpaths[0];

    assert_eq!(points[0], point(10.0, 10.0));
    assert_ne!(points[1], point(10.0, 10.0));
    assert_eq!(*points.last().unwrap(), point(110.0, 10.0));
    for pair in points.windows(2) {
        assert!((pair[1] - pair[0]).square_length() <= 1.0);
    }
}

#[test]
fn cubic_is_approximated_in_device_space() {
    let mut transform = Transform::identity();
    transform.translate(8.0, 16.0);
    transform.scale(4.0, 4.0);

    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::cubic_curve_to(4.0, 16.0, 24.0, -8.0, 32.0, 8.0),
    ];
    let subpaths = approximate(&commands, &transform, &ApproximationOptions::DEFAULT);

    let expected = CubicBezierSegment {
        from: transform.map_point(point(0.0, 0.0)),
        ctrl1: transform.map_point(point(4.0, 16.0)),
        ctrl2: transform.map_point(point(24.0, -8.0)),
        to: transform.map_point(point(32.0, 8.0)),
    }
    .approximate(1.0);

    assert_eq!(subpaths, vec![expected]);
}

#[test]
fn smooth_cubic_reflects_previous_control_point() {
    let explicit = vec![
        Command::move_to(0.0, 0.0),
        Command::cubic_curve_to(0.0, 50.0, 50.0, 50.0, 50.0, 0.0),
        Command::cubic_curve_to(50.0, -50.0, 100.0, -50.0, 100.0, 0.0),
    ];
    let smooth = vec![
        Command::move_to(0.0, 0.0),
        Command::cubic_curve_to(0.0, 50.0, 50.0, 50.0, 50.0, 0.0),
        Command::smooth_cubic_curve_to(100.0, -50.0, 100.0, 0.0),
    ];

    assert_eq!(approximate_identity(&explicit), approximate_identity(&smooth));
}

#[test]
fn smooth_cubic_without_previous_cubic_uses_current_point() {
    let explicit = vec![
        Command::move_to(0.0, 0.0),
        Command::quadratic_curve_to(20.0, 40.0, 40.0, 0.0),
        Command::cubic_curve_to(40.0, 0.0, 80.0, 40.0, 80.0, 0.0),
    ];
    let smooth = vec![
        Command::move_to(0.0, 0.0),
        Command::quadratic_curve_to(20.0, 40.0, 40.0, 0.0),
        Command::smooth_cubic_curve_to(80.0, 40.0, 80.0, 0.0),
    ];

    assert_eq!(approximate_identity(&explicit), approximate_identity(&smooth));
}

#[test]
fn smooth_quadratic_chain() {
    let explicit = vec![
        Command::move_to(0.0, 0.0),
        Command::quadratic_curve_to(20.0, 40.0, 40.0, 0.0),
        Command::quadratic_curve_to(60.0, -40.0, 80.0, 0.0),
        Command::quadratic_curve_to(100.0, 40.0, 120.0, 0.0),
    ];
    let smooth = vec![
        Command::move_to(0.0, 0.0),
        Command::quadratic_curve_to(20.0, 40.0, 40.0, 0.0),
        Command::smooth_quadratic_curve_to(80.0, 0.0),
        Command::smooth_quadratic_curve_to(40.0, 0.0).relative(),
    ];

    assert_eq!(approximate_identity(&explicit), approximate_identity(&smooth));
}

#[test]
fn smooth_quadratic_after_line_is_a_line() {
    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::line_to(10.0, 0.0),
        Command::smooth_quadratic_curve_to(20.0, 0.0),
    ];

    let subpaths = approximate_identity(&commands);
    let points = &subpaths[0];
    assert_eq!(*points.last().unwrap(), point(20.0, 0.0));
    assert!(points.iter().all(|p| p.y == 0.0));
}

#[test]
fn arc_ends_on_its_endpoint() {
    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::arc_to(
            10.0,
            10.0,
            0.0,
            ArcFlags {
                large_arc: false,
                sweep: true,
            },
            20.0,
            0.0,
        ),
    ];

    let subpaths = approximate_identity(&commands);
    let points = &subpaths[0];
    assert_eq!(points[0], point(0.0, 0.0));
    assert_ne!(points[1], point(0.0, 0.0));
    assert_eq!(*points.last().unwrap(), point(20.0, 0.0));
    for p in points {
        assert!(((*p - point(10.0, 0.0)).length() - 10.0).abs() < 1e-6);
    }
}

#[test]
fn arcs_are_sampled_before_the_transform() {
    // Arcs are not approximated in device space: under a non-uniform scale the
    // result differs from sampling the transformed ellipse, but every point still
    // lies on it.
    let mut transform = Transform::identity();
    transform.scale(4.0, 1.0);

    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::arc_to(10.0, 10.0, 0.0, ArcFlags::default(), 20.0, 0.0),
    ];

    let subpaths = approximate(&commands, &transform, &ApproximationOptions::DEFAULT);
    let points = &subpaths[0];
    assert_eq!(*points.last().unwrap(), point(80.0, 0.0));
    for p in points {
        let x = p.x / 4.0 - 10.0;
        assert!((x * x + p.y * p.y - 100.0).abs() < 1e-6);
    }
}

#[test]
fn degenerate_arc_adds_nothing() {
    let commands = vec![
        Command::move_to(5.0, 5.0),
        Command::arc_to(10.0, 10.0, 0.0, ArcFlags::default(), 5.0, 5.0),
    ];

    assert_eq!(approximate_identity(&commands), vec![vec![point(5.0, 5.0)]]);
}

#[test]
fn approximate_appends() {
    let transform = Transform::identity();
    let mut approximator = PathApproximator::new(&transform);
    approximator.approximate(&[Command::move_to(1.0, 1.0)]);
    // Each call starts from a fresh state.
    approximator.approximate(&[Command::line_to(1.0, 1.0).relative()]);

    assert_eq!(
        approximator.subpaths(),
        &[
            vec![point(1.0, 1.0)],
            vec![point(0.0, 0.0), point(1.0, 1.0)]
        ]
    );
}

#[test]
fn accuracy_option() {
    let transform = Transform::identity();
    let commands = vec![
        Command::move_to(0.0, 0.0),
        Command::quadratic_curve_to(100.0, 200.0, 200.0, 0.0),
    ];

    let coarse = approximate(&commands, &transform, &ApproximationOptions::accuracy(16.0));
    let fine = approximate(&commands, &transform, &ApproximationOptions::accuracy(0.25));

    assert!(fine[0].len() > coarse[0].len());
}
