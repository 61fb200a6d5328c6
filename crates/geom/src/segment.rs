use crate::scalar::{Float, Scalar};
use crate::Point;

/// Largest parameter step taken by the adaptive approximation.
const MAX_STEP: f32 = 0.5;
/// Step the adaptive approximation starts with.
const INITIAL_STEP: f32 = 0.125;
/// The step is never halved below this value, which bounds the number of
/// generated points to 1024 per segment.
const MIN_STEP: f32 = 1.0 / 1024.0;

/// Common APIs to the curve segment types.
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Walks the curve with an adaptive parameter step and reports each point
    /// of the approximation along with its parameter.
    ///
    /// Consecutive points are at most `accuracy` apart in squared distance unless
    /// the minimum step is reached. The first reported point is `from` at `t = 0`
    /// and the last one is exactly `to` at `t = 1`.
    fn for_each_approximated_with_t(
        &self,
        accuracy: Self::Scalar,
        callback: &mut dyn FnMut(Point<Self::Scalar>, Self::Scalar),
    ) {
        let min_step = Self::Scalar::value(MIN_STEP);
        let max_step = Self::Scalar::value(MAX_STEP);
        let one = Self::Scalar::ONE;

        let mut t = Self::Scalar::ZERO;
        let mut step = Self::Scalar::value(INITIAL_STEP);
        let mut last = self.from();
        callback(last, t);

        while t < one {
            let mut next_t = (t + step).min(one);
            let mut next = self.sample(next_t);
            while step > min_step && (next - last).square_length() > accuracy {
                step *= Self::Scalar::HALF;
                next_t = (t + step).min(one);
                next = self.sample(next_t);
            }

            if next_t >= one {
                next_t = one;
                next = self.to();
            }

            let distance = (next - last).square_length();
            callback(next, next_t);
            last = next;
            t = next_t;

            if distance * Self::Scalar::FOUR < accuracy && step < max_step {
                step *= Self::Scalar::TWO;
            }
        }
    }

    /// Approximates the curve with a sequence of points, see
    /// [`for_each_approximated_with_t`](Segment::for_each_approximated_with_t).
    fn approximate(&self, accuracy: Self::Scalar) -> Vec<Point<Self::Scalar>> {
        let mut points = Vec::new();
        self.for_each_approximated_with_t(accuracy, &mut |p, _| points.push(p));
        points
    }
}

macro_rules! impl_segment {
    ($S:ty) => {
        type Scalar = $S;
        fn from(&self) -> Point<$S> {
            self.from
        }
        fn to(&self) -> Point<$S> {
            self.to
        }
        fn sample(&self, t: $S) -> Point<$S> {
            self.sample(t)
        }
    };
}

#[cfg(test)]
fn approximate_segment<T: Segment>(segment: &T, accuracy: T::Scalar) -> Vec<Point<T::Scalar>> {
    let mut points = Vec::new();
    segment.for_each_approximated_with_t(accuracy, &mut |p, t| {
        assert!(t >= T::Scalar::ZERO && t <= T::Scalar::ONE);
        points.push(p);
    });
    points
}

#[test]
fn generic_walk_respects_accuracy() {
    use crate::math::point;
    use crate::QuadraticBezierSegment;

    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };

    let points = approximate_segment(&curve, 4.0);
    assert_eq!(points.first(), Some(&curve.from));
    assert_eq!(points.last(), Some(&curve.to));
    for pair in points.windows(2) {
        assert!((pair[1] - pair[0]).square_length() <= 4.0);
    }
    assert_eq!(points, Segment::approximate(&curve, 4.0));
}
