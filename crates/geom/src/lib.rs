#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [scanvas](https://docs.rs/scanvas/).
//!
//! # Overview.
//!
//! This crate implements the maths needed to turn SVG geometry into polylines:
//!
//! - affine transforms ([`Transform`]),
//! - quadratic and cubic bézier curves,
//! - elliptic arcs in SVG endpoint parameterization.
//!
//! # Approximation
//!
//! Approximating is the action of replacing a curve with a succession of points
//! joined by line segments.
//!
//! The accuracy threshold taken as input by the bézier approximators is the
//! maximum *squared* distance between two consecutive points of the approximation.
//! Béziers are affine-invariant, so curves are usually transformed into device
//! space first and approximated there with an accuracy of about one pixel.
//!
//! Elliptic arcs are not affine-invariant under general transforms. The arc
//! approximator works in the arc's own space and takes a `scale` factor that
//! ties the number of samples to the size of the output.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod arc;
pub mod cubic_bezier;
pub mod quadratic_bezier;
pub mod transform;

#[doc(inline)]
pub use crate::arc::{approximate_arc, Arc, ArcFlags, SvgArc};
#[doc(inline)]
pub use crate::cubic_bezier::{approximate_cubic, CubicBezierSegment};
#[doc(inline)]
pub use crate::quadratic_bezier::{approximate_quadratic, QuadraticBezierSegment};
#[doc(inline)]
pub use crate::segment::Segment;
#[doc(inline)]
pub use crate::transform::Transform;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use euclid::Trig;
    pub(crate) use num_traits::cast::cast;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + Trig
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const FOUR: Self;

        /// Threshold below which arc radii and endpoint distances are considered null.
        const ARC_EPSILON: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;

        const ARC_EPSILON: Self = 1e-7;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod math {
    //! Double precision aliases used by the rest of the workspace.

    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = crate::Point<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = crate::Vector<f64>;

    pub type Angle = crate::Angle<f64>;

    pub use crate::transform::Transform;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}

pub mod traits {
    pub use crate::segment::Segment;

    use crate::{Point, Scalar, Vector};

    pub trait Transformation<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S>;
        fn transform_vector(&self, v: Vector<S>) -> Vector<S>;
    }

    impl<S: Scalar> Transformation<S> for euclid::default::Transform2D<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            self.transform_vector(v)
        }
    }
}
