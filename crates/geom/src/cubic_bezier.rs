use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::traits::Transformation;
use crate::{Point, QuadraticBezierSegment, Vector};
use num_traits::NumCast;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> CubicBezierSegment<NewS> {
        CubicBezierSegment {
            from: self.from.cast(),
            ctrl1: self.ctrl1.cast(),
            ctrl2: self.ctrl2.cast(),
            to: self.to.cast(),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl1 - self.from) * (S::THREE * one_t * one_t)
            + (self.ctrl2 - self.ctrl1) * (S::value(6.0) * one_t * t)
            + (self.to - self.ctrl2) * (S::THREE * t * t)
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Applies the transform to the four control points.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        CubicBezierSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    /// Returns the quadratic curve the cubic curve degenerates to when both control
    /// points are placed at two thirds of a common quadratic control point.
    pub fn from_quadratic(quadratic: &QuadraticBezierSegment<S>) -> Self {
        let two_thirds = S::TWO / S::THREE;
        CubicBezierSegment {
            from: quadratic.from,
            ctrl1: quadratic.from.lerp(quadratic.ctrl, two_thirds),
            ctrl2: quadratic.to.lerp(quadratic.ctrl, two_thirds),
            to: quadratic.to,
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

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

/// Approximates the cubic bézier curve `p0, p1, p2, p3` with the given accuracy.
pub fn approximate_cubic<S: Scalar>(
    p0: Point<S>,
    p1: Point<S>,
    p2: Point<S>,
    p3: Point<S>,
    accuracy: S,
) -> Vec<Point<S>> {
    CubicBezierSegment {
        from: p0,
        ctrl1: p1,
        ctrl2: p2,
        to: p3,
    }
    .approximate(accuracy)
}

#[cfg(test)]
use crate::{euclid, point};

#[test]
fn cubic_endpoints_are_exact() {
    let curve = CubicBezierSegment {
        from: point(10.0f64, 10.0),
        ctrl1: point(10.0, 110.0),
        ctrl2: point(110.0, 110.0),
        to: point(110.0, 10.0),
    };

    let points = curve.approximate(1.0);

    assert_eq!(points[0], curve.from);
    assert_eq!(*points.last().unwrap(), curve.to);
    for pair in points.windows(2) {
        assert!((pair[1] - pair[0]).square_length() <= 1.0);
    }
}

#[test]
fn cubic_derivative() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 0.0),
        to: point(3.0, 0.0),
    };

    // Evenly spaced control points on a line give a constant derivative.
    for &t in &[0.0, 0.25, 0.5, 1.0] {
        let d = curve.derivative(t);
        assert!((d.x - 3.0).abs() < 1e-9, "{:?}", d);
        assert!(d.y.abs() < 1e-9);
    }
}

#[test]
fn cubic_from_quadratic_has_same_shape() {
    let quadratic = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(30.0, 60.0),
        to: point(90.0, 0.0),
    };
    let cubic = CubicBezierSegment::from_quadratic(&quadratic);

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let a = quadratic.sample(t);
        let b = cubic.sample(t);
        assert!((a - b).length() < 1e-9);
    }
}

#[test]
fn cubic_approximation_is_affine_invariant() {
    // Evaluating the transformed control points gives the transformed curve, so the
    // parameters found on the original curve land on the transformed one.
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(20.0, 80.0),
        ctrl2: point(90.0, -40.0),
        to: point(100.0, 30.0),
    };
    let transform = euclid::default::Transform2D::new(2.0, 0.5, -0.3, 1.5, 40.0, -7.0);
    let transformed = curve.transformed(&transform);

    curve.for_each_approximated_with_t(1.0, &mut |p, t| {
        let expected = transform.transform_point(p);
        let actual = transformed.sample(t);
        assert!((expected - actual).length() < 1e-9);
    });
}

#[test]
fn cubic_approximation_commutes_with_translation() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(16.0, 64.0),
        ctrl2: point(96.0, -32.0),
        to: point(128.0, 32.0),
    };
    let translation = euclid::default::Transform2D::translation(8.0, 16.0);

    let then_transformed: Vec<_> = curve
        .approximate(1.0)
        .into_iter()
        .map(|p| translation.transform_point(p))
        .collect();
    let pre_transformed = curve.transformed(&translation).approximate(1.0);

    assert_eq!(then_transformed.len(), pre_transformed.len());
    for (a, b) in then_transformed.iter().zip(pre_transformed.iter()) {
        assert!((*a - *b).length() < 1e-9);
    }
}
