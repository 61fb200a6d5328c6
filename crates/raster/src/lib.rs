#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Rasterization of polygons into pixel buffers.
//!
//! This crate is reexported in [scanvas](https://docs.rs/scanvas/).
//!
//! # Overview
//!
//! The input of this crate is the output of the path approximation: a list of
//! device space polylines. [`ScanlineFill`] fills them with the even-odd or
//! non-zero rule and [`StrokeRenderer`] outlines them. Both write into anything
//! that implements [`PixelTarget`], for example an owned [`Image`] or a
//! [`MutableImageSlice`] over caller-owned memory.
//!
//! # Pixel coverage
//!
//! There is no anti-aliasing. A pixel is filled when its center is inside the
//! shape, with the usual half-open convention on both axes: a point lying exactly
//! on the top or left edge of a shape is inside, a point on its bottom or right
//! edge is outside. A 10 by 10 square with integer corners therefore fills
//! exactly 100 pixels.
//!
//! # Examples
//!
//! ```
//! use scanvas_raster::{FillOptions, Image, ScanlineFill};
//! use scanvas_raster::path::math::point;
//!
//! let mut image = Image::new(16, 16, 0u8);
//! let square = vec![
//!     point(2.0, 2.0),
//!     point(12.0, 2.0),
//!     point(12.0, 12.0),
//!     point(2.0, 12.0),
//! ];
//!
//! ScanlineFill::new().fill(&mut image, &[square], 255, &FillOptions::DEFAULT);
//!
//! assert_eq!(image.count(|p| p == 255), 100);
//! ```

pub use scanvas_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod fill;
pub mod image;
pub mod stroke;

#[doc(inline)]
pub use crate::fill::ScanlineFill;
#[doc(inline)]
pub use crate::image::{Image, MutableImageSlice};
#[doc(inline)]
pub use crate::stroke::StrokeRenderer;

pub use crate::path::FillRule;

use crate::path::math::Point;

/// Something pixels can be written into.
///
/// Only `width`, `height` and `set_pixel` are required. The provided methods are
/// expressed in terms of `set_pixel` and can be overridden when the target can do
/// better.
pub trait PixelTarget {
    type Pixel: Copy;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Writes a pixel. Coordinates outside of the target are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, pixel: Self::Pixel);

    /// Writes the pixels of row `y` from `x0` included to `x1` excluded.
    fn draw_horizontal_line(&mut self, x0: i32, x1: i32, y: i32, pixel: Self::Pixel) {
        if y < 0 || y as usize >= self.height() {
            return;
        }

        let start = x0.max(0);
        let end = (x1 as i64).min(self.width() as i64) as i32;
        for x in start..end {
            self.set_pixel(x, y, pixel);
        }
    }

    /// Draws a one pixel wide line between two points, both ends included.
    fn draw_line(&mut self, from: Point, to: Point, pixel: Self::Pixel) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            log::warn!("skipping line with non-finite endpoints {:?} {:?}", from, to);
            return;
        }

        let (mut x0, mut y0) = (from.x.round(), from.y.round());
        let (mut x1, mut y1) = (to.x.round(), to.y.round());

        let steep = (x1 - x0).abs() < (y1 - y0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let slope = if x1 > x0 { (y1 - y0) / (x1 - x0) } else { 0.0 };

        // Only walk the part of the major axis that overlaps the target.
        let extent = if steep { self.height() } else { self.width() } as f64;
        let mut x = x0.max(0.0);
        let end = x1.min(extent - 1.0);
        while x <= end {
            let y = (y0 + (x - x0) * slope).round();
            if steep {
                self.set_pixel(y as i32, x as i32, pixel);
            } else {
                self.set_pixel(x as i32, y as i32, pixel);
            }
            x += 1.0;
        }
    }
}

impl<'l, T: PixelTarget> PixelTarget for &'l mut T {
    type Pixel = T::Pixel;

    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn set_pixel(&mut self, x: i32, y: i32, pixel: Self::Pixel) {
        (**self).set_pixel(x, y, pixel);
    }

    fn draw_horizontal_line(&mut self, x0: i32, x1: i32, y: i32, pixel: Self::Pixel) {
        (**self).draw_horizontal_line(x0, x1, y, pixel);
    }

    fn draw_line(&mut self, from: Point, to: Point, pixel: Self::Pixel) {
        (**self).draw_line(from, to, pixel);
    }
}

/// Parameters for the fill rasterizer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Set the fill rule.
    ///
    /// See the [SVG specification](https://www.w3.org/TR/SVG/painting.html#FillRuleProperty).
    ///
    /// Default value: `NonZero`.
    pub fill_rule: FillRule,
}

impl FillOptions {
    /// Default Fill rule.
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::NonZero;

    pub const DEFAULT: Self = FillOptions {
        fill_rule: Self::DEFAULT_FILL_RULE,
    };

    #[inline]
    pub fn even_odd() -> Self {
        Self::DEFAULT.with_fill_rule(FillRule::EvenOdd)
    }

    #[inline]
    pub fn non_zero() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters for the stroke rasterizer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// Line width in device pixels.
    ///
    /// Widths up to one pixel are drawn as single pixel lines.
    ///
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f64,
}

impl StrokeOptions {
    pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

    pub const DEFAULT: Self = StrokeOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
    };

    #[inline]
    pub fn line_width(width: f64) -> Self {
        Self::DEFAULT.with_line_width(width)
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
use crate::path::math::point;

#[test]
fn horizontal_line_is_clipped() {
    let mut image = Image::new(8, 2, 0u8);
    image.draw_horizontal_line(-5, 3, 0, 1);
    image.draw_horizontal_line(6, 100, 1, 2);
    image.draw_horizontal_line(0, 8, 2, 3);
    image.draw_horizontal_line(0, 8, -1, 3);

    assert_eq!(image.pixels(), &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2]);
}

#[test]
fn lines() {
    let mut image = Image::new(10, 10, 0u8);
    image.draw_line(point(0.0, 5.0), point(9.0, 5.0), 1);
    assert_eq!(image.count(|p| p == 1), 10);

    let mut image = Image::new(10, 10, 0u8);
    image.draw_line(point(3.0, 9.0), point(3.0, 0.0), 1);
    assert_eq!(image.count(|p| p == 1), 10);
    for y in 0..10 {
        assert_eq!(image.get(3, y), Some(1));
    }

    let mut image = Image::new(10, 10, 0u8);
    image.draw_line(point(0.0, 0.0), point(9.0, 9.0), 1);
    for i in 0..10 {
        assert_eq!(image.get(i, i), Some(1));
    }
    assert_eq!(image.count(|p| p == 1), 10);
}

#[test]
fn line_outside_of_the_target() {
    let mut image = Image::new(4, 4, 0u8);
    image.draw_line(point(-1e9, 2.0), point(1e9, 2.0), 1);
    assert_eq!(image.count(|p| p == 1), 4);

    image.draw_line(point(0.0, 0.0), point(f64::NAN, 3.0), 2);
    assert_eq!(image.count(|p| p == 2), 0);
}

#[test]
fn options() {
    assert_eq!(FillOptions::default().fill_rule, FillRule::NonZero);
    assert_eq!(FillOptions::even_odd().fill_rule, FillRule::EvenOdd);
    assert_eq!(StrokeOptions::line_width(3.0).line_width, 3.0);
    assert_eq!(StrokeOptions::default(), StrokeOptions::DEFAULT);
}
