//! Elliptic arc related maths and tools.

use crate::scalar::{cast, Float, Scalar};
use crate::{point, vector, Angle, Point, Vector};

/// Upper bound on the number of steps of an arc approximation.
///
/// The step count grows with the size of the arc and with the output scale, this
/// keeps absurdly large inputs from allocating without bound.
pub const MAX_ARC_STEPS: usize = 1 << 16;

/// Flag parameters for arcs as described by the SVG specification.
///
/// For most situations using the SVG arc notation, there are four different arcs
/// (two different ellipses, each with two different arc sweeps) that satisfy the
/// arc parameters. The `large_arc` and `sweep` flags indicate which one of the
/// four arcs are drawn.
///
/// See more examples in the [SVG specification](https://svgwg.org/specs/paths/)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    /// Of the four candidate arc sweeps, two will represent an arc sweep of greater
    /// than or equal to 180 degrees (the "large-arc"), and two will represent an arc
    /// sweep of less than or equal to 180 degrees (the "small arc"). If `large_arc`
    /// is `true`, then one of the two larger arc sweeps will be chosen; otherwise, if
    /// `large_arc` is `false`, one of the smaller arc sweeps will be chosen.
    pub large_arc: bool,
    /// If `sweep` is `true`, then the arc will be drawn in a "positive-angle" direction
    /// (the ellipse formula `x=cx+rx*cos(theta)` and `y=cy+ry*sin(theta)` is evaluated
    /// such that theta starts at an angle corresponding to the current point and increases
    /// positively until the arc reaches the destination position).
    pub sweep: bool,
}

/// An elliptic arc curve segment using the SVG's end-point notation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc<S> {
    pub from: Point<S>,
    pub to: Point<S>,
    pub radii: Vector<S>,
    pub x_rotation: Angle<S>,
    pub flags: ArcFlags,
}

/// An elliptic arc curve segment in center parameterization.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc<S> {
    pub center: Point<S>,
    pub radii: Vector<S>,
    pub start_angle: Angle<S>,
    pub sweep_angle: Angle<S>,
    pub x_rotation: Angle<S>,
}

impl<S: Scalar> SvgArc<S> {
    /// Whether both endpoints coincide, in which case the arc is omitted entirely.
    pub fn is_degenerate(&self) -> bool {
        (self.from.x - self.to.x).abs() < S::ARC_EPSILON
            && (self.from.y - self.to.y).abs() < S::ARC_EPSILON
    }

    /// Whether one of the radii is null, in which case the arc is a straight line
    /// between its endpoints.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() < S::ARC_EPSILON || self.radii.y.abs() < S::ARC_EPSILON
    }

    /// Converts to the center parameterization.
    ///
    /// The arc must neither be degenerate nor a straight line. Radii that are too small
    /// to span the endpoints are scaled up uniformly.
    pub fn to_arc(&self) -> Arc<S> {
        debug_assert!(!self.is_degenerate());
        debug_assert!(!self.is_straight_line());

        let mut rx = self.radii.x.abs();
        let mut ry = self.radii.y.abs();

        let (sin_phi, cos_phi) = self.x_rotation.radians.sin_cos();
        let hd_x = (self.from.x - self.to.x) / S::TWO;
        let hd_y = (self.from.y - self.to.y) / S::TWO;
        let hs_x = (self.from.x + self.to.x) / S::TWO;
        let hs_y = (self.from.y + self.to.y) / S::TWO;

        // Endpoints in the ellipse-aligned space.
        let p = point(
            cos_phi * hd_x + sin_phi * hd_y,
            -sin_phi * hd_x + cos_phi * hd_y,
        );

        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > S::ONE {
            let factor = lambda.sqrt();
            rx *= factor;
            ry *= factor;
        }

        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;
        let rxry = rx * ry;

        let sign = if self.flags.large_arc == self.flags.sweep {
            -S::ONE
        } else {
            S::ONE
        };
        let coef = sign * ((rxry * rxry - sum_of_sq) / sum_of_sq).max(S::ZERO).sqrt();

        let transformed_cx = coef * rxpy / ry;
        let transformed_cy = -coef * rypx / rx;

        let center = point(
            cos_phi * transformed_cx - sin_phi * transformed_cy + hs_x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + hs_y,
        );

        let u = vector((p.x - transformed_cx) / rx, (p.y - transformed_cy) / ry);
        let v = vector((-p.x - transformed_cx) / rx, (-p.y - transformed_cy) / ry);

        let start_angle = vector_angle(vector(S::ONE, S::ZERO), u);
        let mut sweep_angle = vector_angle(u, v);

        let two_pi = S::TWO * S::PI();
        if !self.flags.sweep && sweep_angle > S::ZERO {
            sweep_angle -= two_pi;
        } else if self.flags.sweep && sweep_angle < S::ZERO {
            sweep_angle += two_pi;
        }

        Arc {
            center,
            radii: vector(rx, ry),
            start_angle: Angle::radians(start_angle),
            sweep_angle: Angle::radians(sweep_angle),
            x_rotation: self.x_rotation,
        }
    }

    /// Approximates the arc with a sequence of points.
    ///
    /// - Degenerate arcs produce no point at all.
    /// - Arcs with a null radius produce `[from, to]`.
    /// - Otherwise the arc is sampled with
    ///   `max(2, ceil(|sweep_angle| * (|Δx| + |Δy|) * scale))` steps, and the first and
    ///   last points are exactly `from` and `to`.
    ///
    /// The step count is capped at [`MAX_ARC_STEPS`], an infinite `scale` included.
    pub fn approximate(&self, scale: S) -> Vec<Point<S>> {
        if self.is_degenerate() {
            return Vec::new();
        }

        if self.is_straight_line() {
            return vec![self.from, self.to];
        }

        let arc = self.to_arc();
        let extent = (self.to.x - self.from.x).abs() + (self.to.y - self.from.y).abs();
        let steps = (arc.sweep_angle.radians.abs() * extent * scale).ceil();
        let steps = if steps.is_nan() {
            2
        } else if steps >= cast::<usize, S>(MAX_ARC_STEPS).unwrap_or_else(S::infinity) {
            MAX_ARC_STEPS
        } else {
            cast::<S, usize>(steps).unwrap_or(2).max(2)
        };

        let mut points = Vec::with_capacity(steps + 1);
        points.push(self.from);
        let step = arc.sweep_angle.radians / cast::<usize, S>(steps).unwrap_or(S::ONE);
        for i in 1..steps {
            let angle = arc.start_angle.radians + step * cast::<usize, S>(i).unwrap_or(S::ZERO);
            points.push(arc.sample_angle(angle));
        }
        points.push(self.to);

        points
    }
}

impl<S: Scalar> Arc<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.sample_angle(self.start_angle.radians + self.sweep_angle.radians * t)
    }

    /// Sample the ellipse at a given angle (in radians, before the x-rotation).
    pub fn sample_angle(&self, angle: S) -> Point<S> {
        let (sin_phi, cos_phi) = self.x_rotation.radians.sin_cos();
        let (sin, cos) = angle.sin_cos();
        let x = self.radii.x * cos;
        let y = self.radii.y * sin;

        point(
            self.center.x + x * cos_phi - y * sin_phi,
            self.center.y + x * sin_phi + y * cos_phi,
        )
    }

    #[inline]
    pub fn end_angle(&self) -> Angle<S> {
        Angle::radians(self.start_angle.radians + self.sweep_angle.radians)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.sample(S::ZERO)
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.sample(S::ONE)
    }
}

/// Approximates an SVG elliptic arc with a sequence of points.
///
/// `x_rotation` is in radians. See [`SvgArc::approximate`].
#[allow(clippy::too_many_arguments)]
pub fn approximate_arc<S: Scalar>(
    from: Point<S>,
    to: Point<S>,
    large_arc: bool,
    sweep: bool,
    radius_x: S,
    radius_y: S,
    x_rotation: S,
    scale: S,
) -> Vec<Point<S>> {
    SvgArc {
        from,
        to,
        radii: vector(radius_x, radius_y),
        x_rotation: Angle::radians(x_rotation),
        flags: ArcFlags { large_arc, sweep },
    }
    .approximate(scale)
}

// Signed angle from u to v.
fn vector_angle<S: Scalar>(u: Vector<S>, v: Vector<S>) -> S {
    Float::atan2(u.x * v.y - u.y * v.x, u.x * v.x + u.y * v.y)
}

#[cfg(test)]
use core::f64::consts::PI;

#[cfg(test)]
fn assert_close(a: Point<f64>, b: Point<f64>) {
    assert!((a - b).length() < 1e-6, "{:?} != {:?}", a, b);
}

#[test]
fn identical_endpoints_produce_nothing() {
    let p = point(10.0, 10.0);
    for &(large_arc, sweep) in &[(false, false), (false, true), (true, false), (true, true)] {
        assert!(approximate_arc(p, p, large_arc, sweep, 5.0, 3.0, 0.3, 1.0).is_empty());
        assert!(approximate_arc(p, p, large_arc, sweep, 0.0, 0.0, 0.0, 2.0).is_empty());
    }
}

#[test]
fn null_radius_is_a_straight_line() {
    let from = point(0.0, 0.0);
    let to = point(10.0, 5.0);

    assert_eq!(
        approximate_arc(from, to, false, true, 0.0, 10.0, 0.0, 1.0),
        vec![from, to]
    );
    assert_eq!(
        approximate_arc(from, to, true, false, 10.0, 1e-9, 0.0, 1.0),
        vec![from, to]
    );
    assert_eq!(
        approximate_arc(from, to, true, false, -1e-8, 4.0, 0.0, 1.0),
        vec![from, to]
    );
}

#[test]
fn half_circle() {
    let from = point(0.0, 0.0);
    let to = point(20.0, 0.0);
    let svg_arc = SvgArc {
        from,
        to,
        radii: vector(10.0, 10.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    };

    let arc = svg_arc.to_arc();
    assert_close(arc.center, point(10.0, 0.0));
    assert!((arc.sweep_angle.radians - PI).abs() < 1e-9);
    assert_close(arc.from(), from);
    assert_close(arc.to(), to);

    let points = svg_arc.approximate(1.0);
    // |π| * (20 + 0) * 1 rounds up to 63 steps.
    assert_eq!(points.len(), 64);
    assert_eq!(points[0], from);
    assert_eq!(*points.last().unwrap(), to);
    for p in &points {
        assert!(((*p - arc.center).length() - 10.0).abs() < 1e-9);
    }
}

#[test]
fn sweep_flag_picks_the_side() {
    let from = point(0.0, 0.0);
    let to = point(20.0, 0.0);

    let positive = approximate_arc(from, to, false, true, 10.0, 10.0, 0.0, 1.0);
    let negative = approximate_arc(from, to, false, false, 10.0, 10.0, 0.0, 1.0);

    // A positive-angle sweep from left to right goes through negative y.
    assert!(positive[positive.len() / 2].y < -9.0);
    assert!(negative[negative.len() / 2].y > 9.0);
}

#[test]
fn large_arc_flag_picks_the_ellipse() {
    let from = point(0.0, 0.0);
    let to = point(10.0, 0.0);

    let small = SvgArc {
        from,
        to,
        radii: vector(10.0, 10.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    }
    .to_arc();
    let large = SvgArc {
        flags: ArcFlags {
            large_arc: true,
            sweep: true,
        },
        ..SvgArc {
            from,
            to,
            radii: vector(10.0, 10.0),
            x_rotation: Angle::radians(0.0),
            flags: ArcFlags::default(),
        }
    }
    .to_arc();

    assert!(small.sweep_angle.radians.abs() < PI);
    assert!(large.sweep_angle.radians.abs() > PI);
    assert_close(small.to(), to);
    assert_close(large.to(), to);
}

#[test]
fn radii_too_small_are_scaled_up() {
    let from = point(0.0, 0.0);
    let to = point(100.0, 0.0);
    let svg_arc = SvgArc {
        from,
        to,
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    };

    let arc = svg_arc.to_arc();
    assert!((arc.radii.x - 50.0).abs() < 1e-9);
    assert!((arc.radii.y - 50.0).abs() < 1e-9);
    assert_close(arc.center, point(50.0, 0.0));
}

#[test]
fn rotated_ellipse_endpoints() {
    let from = point(3.0, -2.0);
    let to = point(-7.0, 11.0);
    let svg_arc = SvgArc {
        from,
        to,
        radii: vector(9.0, 4.0),
        x_rotation: Angle::radians(0.7),
        flags: ArcFlags {
            large_arc: true,
            sweep: false,
        },
    };

    let arc = svg_arc.to_arc();
    assert_close(arc.from(), from);
    assert_close(arc.to(), to);
    assert!(arc.sweep_angle.radians < 0.0);
}

#[test]
fn scale_increases_the_step_count() {
    let from = point(0.0, 0.0);
    let to = point(20.0, 0.0);
    let low = approximate_arc(from, to, false, true, 10.0, 10.0, 0.0, 1.0);
    let high = approximate_arc(from, to, false, true, 10.0, 10.0, 0.0, 4.0);
    assert!(high.len() > low.len());

    let tiny = approximate_arc(from, point(0.01, 0.0), false, true, 10.0, 10.0, 0.0, 1.0);
    assert_eq!(tiny.len(), 3);
}

#[test]
fn step_count_is_capped() {
    let from = point(0.0, 0.0);
    let to = point(20.0, 0.0);

    let huge = approximate_arc(from, to, false, true, 10.0, 10.0, 0.0, 1e12);
    assert_eq!(huge.len(), MAX_ARC_STEPS + 1);
    assert_eq!(huge[0], from);
    assert_eq!(huge[MAX_ARC_STEPS], to);

    let infinite = approximate_arc(from, to, false, true, 10.0, 10.0, 0.0, f64::INFINITY);
    assert_eq!(infinite.len(), MAX_ARC_STEPS + 1);

    // Below the cap the formula applies: ceil(pi * 20 * 100) steps.
    let large = approximate_arc(from, to, false, true, 10.0, 10.0, 0.0, 100.0);
    assert_eq!(large.len(), 6284 + 1);
}
