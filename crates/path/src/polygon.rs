//! Accumulation of the points of a subpath.

use crate::math::{Point, Vector};
use crate::Subpath;

/// Builds a single polyline out of absolute and relative points.
///
/// The builder tracks the current position so that relative segments can be
/// appended without the caller keeping its own copy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonBuilder {
    points: Vec<Point>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        PolygonBuilder { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PolygonBuilder {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Starts the polygon at `at`, discarding the points accumulated so far.
    pub fn move_to(&mut self, at: Point) {
        self.points.clear();
        self.points.push(at);
    }

    pub fn line_to(&mut self, to: Point) {
        self.points.push(to);
    }

    /// Appends the current position moved by `offset`.
    ///
    /// An empty polygon is treated as if it was positioned at the origin.
    pub fn line_to_relative(&mut self, offset: Vector) {
        let from = self.current().unwrap_or_else(Point::origin);
        self.points.push(from + offset);
    }

    /// The last point, if any.
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.points.first().cloned()
    }

    /// Appends a copy of the first point.
    ///
    /// Does nothing on an empty polygon.
    pub fn close(&mut self) {
        if let Some(first) = self.first() {
            self.points.push(first);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn build(self) -> Subpath {
        self.points
    }

    /// Returns the accumulated points and leaves the builder empty.
    pub(crate) fn take(&mut self) -> Subpath {
        core::mem::take(&mut self.points)
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn absolute_and_relative() {
    let mut polygon = PolygonBuilder::new();
    assert!(polygon.is_empty());
    assert_eq!(polygon.current(), None);

    polygon.move_to(point(1.0, 1.0));
    polygon.line_to(point(5.0, 1.0));
    polygon.line_to_relative(vector(0.0, 4.0));

    assert_eq!(polygon.len(), 3);
    assert_eq!(polygon.current(), Some(point(5.0, 5.0)));
    assert_eq!(polygon.first(), Some(point(1.0, 1.0)));

    polygon.close();
    assert_eq!(
        polygon.build(),
        vec![
            point(1.0, 1.0),
            point(5.0, 1.0),
            point(5.0, 5.0),
            point(1.0, 1.0)
        ]
    );
}

#[test]
fn relative_from_empty_starts_at_origin() {
    let mut polygon = PolygonBuilder::new();
    polygon.line_to_relative(vector(3.0, 4.0));
    assert_eq!(polygon.points(), &[point(3.0, 4.0)]);
}

#[test]
fn move_to_restarts() {
    let mut polygon = PolygonBuilder::with_capacity(4);
    polygon.move_to(point(0.0, 0.0));
    polygon.line_to(point(1.0, 0.0));
    polygon.move_to(point(7.0, 7.0));
    assert_eq!(polygon.points(), &[point(7.0, 7.0)]);
}

#[test]
fn close_empty() {
    let mut polygon = PolygonBuilder::new();
    polygon.close();
    assert!(polygon.is_empty());
}
