//! Outlines of polylines.

use crate::fill::ScanlineFill;
use crate::path::math::{Point, Vector};
use crate::path::{FillRule, Subpath};
use crate::{FillOptions, PixelTarget, StrokeOptions};

/// Draws the segments of polylines.
///
/// Thin lines (`line_width <= 1`) are drawn one pixel wide. Wider lines are drawn
/// as one rectangle per segment, filled with the non-zero rule so that the
/// rectangles of consecutive segments merge. There are no joins or caps.
#[derive(Default)]
pub struct StrokeRenderer {
    fill: ScanlineFill,
    quads: Vec<Subpath>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        StrokeRenderer::default()
    }

    /// Strokes a single polyline. When `closed` is true the last point is also
    /// connected back to the first one.
    pub fn stroke<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        subpath: &[Point],
        closed: bool,
        pixel: Target::Pixel,
        options: &StrokeOptions,
    ) {
        if subpath.len() < 2 {
            return;
        }

        let closing = match (subpath.first(), subpath.last()) {
            (Some(first), Some(last)) if closed && first != last => Some((*last, *first)),
            _ => None,
        };
        let segments = subpath
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing);

        if options.line_width <= 1.0 {
            for (from, to) in segments {
                target.draw_line(from, to, pixel);
            }
            return;
        }

        let half_width = options.line_width * 0.5;
        self.quads.clear();
        for (from, to) in segments {
            if let Some(quad) = segment_quad(from, to, half_width) {
                self.quads.push(quad);
            }
        }

        // All the quads have the same orientation, overlaps can't cancel out.
        self.fill.fill(
            target,
            &self.quads,
            pixel,
            &FillOptions::DEFAULT.with_fill_rule(FillRule::NonZero),
        );
    }

    /// Strokes the subpaths produced by the path approximator.
    ///
    /// Closed subpaths already end with a copy of their first point, no closing
    /// segment is added.
    pub fn stroke_subpaths<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        subpaths: &[Subpath],
        pixel: Target::Pixel,
        options: &StrokeOptions,
    ) {
        for subpath in subpaths {
            self.stroke(target, subpath, false, pixel, options);
        }
    }
}

// The rectangle of width `2 * half_width` centered on the segment.
fn segment_quad(from: Point, to: Point, half_width: f64) -> Option<Subpath> {
    let direction = to - from;
    let length = direction.length();
    if !(length > 0.0 && length.is_finite()) {
        return None;
    }

    let normal = Vector::new(-direction.y, direction.x) * (half_width / length);

    Some(vec![from + normal, to + normal, to - normal, from - normal])
}

#[cfg(test)]
use crate::image::Image;
#[cfg(test)]
use crate::path::math::point;

#[test]
fn thin_polyline() {
    let mut image = Image::new(10, 10, 0u8);
    let polyline = vec![point(0.0, 5.0), point(9.0, 5.0), point(9.0, 9.0)];
    StrokeRenderer::new().stroke(&mut image, &polyline, false, 1, &StrokeOptions::DEFAULT);

    // The corner pixel is shared.
    assert_eq!(image.count(|p| p == 1), 10 + 5 - 1);
    assert_eq!(image.get(9, 9), Some(1));
    assert_eq!(image.get(0, 9), Some(0));
}

#[test]
fn thin_closed_polyline() {
    let triangle = vec![point(0.0, 0.0), point(9.0, 0.0), point(0.0, 9.0)];

    let mut open = Image::new(10, 10, 0u8);
    StrokeRenderer::new().stroke(&mut open, &triangle, false, 1, &StrokeOptions::DEFAULT);
    let mut closed = Image::new(10, 10, 0u8);
    StrokeRenderer::new().stroke(&mut closed, &triangle, true, 1, &StrokeOptions::DEFAULT);

    assert_eq!(open.get(0, 5), Some(0));
    assert_eq!(closed.get(0, 5), Some(1));
    assert!(closed.count(|p| p == 1) > open.count(|p| p == 1));
}

#[test]
fn wide_segment() {
    let mut image = Image::new(20, 20, 0u8);
    let segment = vec![point(2.0, 10.0), point(12.0, 10.0)];
    StrokeRenderer::new().stroke(
        &mut image,
        &segment,
        false,
        1,
        &StrokeOptions::line_width(4.0),
    );

    // Rows 8 to 11, columns 2 to 11.
    assert_eq!(image.count(|p| p == 1), 40);
    assert_eq!(image.get(2, 8), Some(1));
    assert_eq!(image.get(11, 11), Some(1));
    assert_eq!(image.get(12, 10), Some(0));
    assert_eq!(image.get(5, 12), Some(0));
}

#[test]
fn wide_polyline_overlaps_merge() {
    // Going back and forth on the same segment must not erase anything.
    let mut image = Image::new(20, 20, 0u8);
    let polyline = vec![point(2.0, 10.0), point(12.0, 10.0), point(2.0, 10.0)];
    StrokeRenderer::new().stroke(
        &mut image,
        &polyline,
        false,
        1,
        &StrokeOptions::line_width(4.0),
    );

    assert_eq!(image.count(|p| p == 1), 40);
}

#[test]
fn degenerate_inputs() {
    let mut image = Image::new(10, 10, 0u8);
    let mut stroker = StrokeRenderer::new();
    stroker.stroke(&mut image, &[], true, 1, &StrokeOptions::DEFAULT);
    stroker.stroke(&mut image, &[point(1.0, 1.0)], true, 1, &StrokeOptions::DEFAULT);
    stroker.stroke(
        &mut image,
        &[point(1.0, 1.0), point(1.0, 1.0)],
        false,
        1,
        &StrokeOptions::line_width(3.0),
    );
    assert_eq!(image.count(|p| p == 1), 0);
}

#[test]
fn closed_subpaths() {
    let mut image = Image::new(10, 10, 0u8);
    let square = vec![
        point(1.0, 1.0),
        point(8.0, 1.0),
        point(8.0, 8.0),
        point(1.0, 8.0),
        point(1.0, 1.0),
    ];
    StrokeRenderer::new().stroke_subpaths(&mut image, &[square], 1, &StrokeOptions::DEFAULT);

    assert_eq!(image.count(|p| p == 1), 28);
    assert_eq!(image.get(1, 5), Some(1));
    assert_eq!(image.get(4, 4), Some(0));
}
