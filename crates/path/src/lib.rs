#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! SVG path commands and their approximation into polygons.
//!
//! This crate is reexported in [scanvas](https://docs.rs/scanvas/).
//!
//! # Examples
//!
//! ```
//! use scanvas_path::{Command, PathApproximator};
//! use scanvas_path::math::{point, Transform};
//!
//! let commands = vec![
//!     Command::move_to(10.0, 10.0),
//!     Command::horizontal_line_to(20.0).relative(),
//!     Command::close(),
//! ];
//!
//! let transform = Transform::identity();
//! let mut approximator = PathApproximator::new(&transform);
//! approximator.approximate(&commands);
//!
//! assert_eq!(
//!     approximator.subpaths(),
//!     &[vec![point(10.0, 10.0), point(30.0, 10.0), point(10.0, 10.0)]]
//! );
//! ```

pub use scanvas_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod approximator;
pub mod commands;
pub mod polygon;
pub mod shapes;

#[doc(inline)]
pub use crate::approximator::{approximate, PathApproximator};
#[doc(inline)]
pub use crate::commands::{Command, CommandError, CommandKind};
#[doc(inline)]
pub use crate::polygon::PolygonBuilder;

pub use crate::geom::ArcFlags;

pub mod math {
    //! f64 version of the geometry types used everywhere in the workspace.

    pub use crate::geom::math::*;
}

use crate::math::Point;

/// A polyline produced by the approximator.
///
/// Closed subpaths end with a repeat of their first point.
pub type Subpath = Vec<Point>;

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

/// Parameters of the curve approximation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct ApproximationOptions {
    /// Maximum squared distance between two consecutive points of an approximated
    /// bézier curve, in device space.
    ///
    /// Default value: `ApproximationOptions::DEFAULT_ACCURACY`.
    pub accuracy: f64,
}

impl ApproximationOptions {
    /// Default accuracy: one square pixel.
    pub const DEFAULT_ACCURACY: f64 = 1.0;

    pub const DEFAULT: Self = ApproximationOptions {
        accuracy: Self::DEFAULT_ACCURACY,
    };

    #[inline]
    pub fn accuracy(accuracy: f64) -> Self {
        Self::DEFAULT.with_accuracy(accuracy)
    }

    #[inline]
    pub const fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }
}

impl Default for ApproximationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn fill_rules() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(FillRule::EvenOdd.is_in(-1));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::EvenOdd.is_out(-2));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_in(-3));
    assert!(FillRule::NonZero.is_out(0));
}
