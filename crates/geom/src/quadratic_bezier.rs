use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::traits::Transformation;
use crate::{Point, Vector};
use num_traits::NumCast;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> QuadraticBezierSegment<NewS> {
        QuadraticBezierSegment {
            from: self.from.cast(),
            ctrl: self.ctrl.cast(),
            to: self.to.cast(),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2) = (S::TWO * t - S::TWO, -S::FOUR * t + S::TWO, S::TWO * t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Applies the transform to the three control points.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        QuadraticBezierSegment {
            from: transform.transform_point(self.from),
            ctrl: transform.transform_point(self.ctrl),
            to: transform.transform_point(self.to),
        }
    }

    /// Approximates the curve with a sequence of points at most `accuracy` apart
    /// in squared distance.
    ///
    /// The result always starts with `from` and ends with `to`.
    pub fn approximate(&self, accuracy: S) -> Vec<Point<S>> {
        Segment::approximate(self, accuracy)
    }

    /// Same as `approximate`, also reporting the curve parameter of each point.
    pub fn for_each_approximated_with_t<F: FnMut(Point<S>, S)>(&self, accuracy: S, callback: &mut F) {
        Segment::for_each_approximated_with_t(self, accuracy, callback);
    }
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    impl_segment!(S);
}

/// Approximates the quadratic bézier curve `p0, p1, p2` with the given accuracy.
pub fn approximate_quadratic<S: Scalar>(
    p0: Point<S>,
    p1: Point<S>,
    p2: Point<S>,
    accuracy: S,
) -> Vec<Point<S>> {
    QuadraticBezierSegment {
        from: p0,
        ctrl: p1,
        to: p2,
    }
    .approximate(accuracy)
}

#[cfg(test)]
use crate::point;

#[test]
fn quadratic_endpoints_are_exact() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };

    let points = curve.approximate(1.0);

    assert_eq!(points.first(), Some(&curve.from));
    assert_eq!(points.last(), Some(&curve.to));
    assert!(points.len() > 10);
}

#[test]
fn quadratic_points_respect_accuracy() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(100.0, 200.0),
        to: point(200.0, 0.0),
    };

    for accuracy in &[0.25, 1.0, 4.0] {
        let points = curve.approximate(*accuracy);
        for pair in points.windows(2) {
            assert!((pair[1] - pair[0]).square_length() <= *accuracy);
        }
    }
}

#[test]
fn quadratic_sample_matches_formula() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    assert_eq!(curve.sample(0.5), point(1.0, 0.5));
    assert_eq!(curve.derivative(0.5), crate::vector(2.0, 0.0));
}

#[test]
fn quadratic_accuracy_controls_density() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(100.0, 200.0),
        to: point(200.0, 0.0),
    };

    let coarse = curve.approximate(16.0);
    let fine = curve.approximate(0.25);

    assert!(fine.len() > coarse.len());
}

#[test]
fn degenerate_quadratic() {
    let p = point(3.0f64, 4.0);
    let points = approximate_quadratic(p, p, p, 1.0);

    assert_eq!(points.first(), Some(&p));
    assert_eq!(points.last(), Some(&p));
    assert!(points.iter().all(|q| *q == p));
}
