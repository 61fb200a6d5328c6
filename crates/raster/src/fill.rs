//! Scanline polygon fill.
//!
//! # Algorithm
//!
//! Every pair of consecutive points of a subpath is an edge, including the pair
//! formed by the last and the first point: subpaths are always filled as if they
//! were closed. Horizontal edges never cross a row center and are dropped.
//!
//! The edges are sorted by decreasing maximum y, and the rows are visited from
//! the bottom of the shape (largest y) to its top. A cursor into the sorted edge
//! list brings the edges into the active set as soon as the row center enters
//! them, and edges leave the active set when the row center moves past their
//! minimum y.
//!
//! On each row the active edges are sorted by decreasing x and walked from right
//! to left, accumulating the winding number. Between two consecutive edges the
//! span is filled if the fill rule considers the winding number to be inside.
//!
//! # Vertices on a row center
//!
//! An edge covers the rows whose center `c` satisfies `min_y <= c < max_y`. When a
//! row center goes exactly through a vertex, the two edges meeting there are
//! counted once if the outline goes through the row (one edge ends where the other
//! one starts) and zero or two times if the vertex is a local extremum, which
//! leaves the parity and the winding number right without any special case.

use crate::path::math::Point;
use crate::path::{FillRule, Subpath};
use crate::{FillOptions, PixelTarget};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Edge {
    min_y: f64,
    max_y: f64,
    // x at max_y.
    x_at_max_y: f64,
    // dx/dy.
    inv_slope: f64,
    // +1 when the edge goes towards larger y, -1 otherwise.
    direction: i32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ActiveEdge {
    x: f64,
    min_y: f64,
    inv_slope: f64,
    direction: i32,
}

impl Edge {
    fn new(from: Point, to: Point) -> Option<Self> {
        if from.y == to.y {
            return None;
        }

        let (top, bottom, direction) = if from.y < to.y {
            (from, to, 1)
        } else {
            (to, from, -1)
        };

        Some(Edge {
            min_y: top.y,
            max_y: bottom.y,
            x_at_max_y: bottom.x,
            inv_slope: (bottom.x - top.x) / (bottom.y - top.y),
            direction,
        })
    }

    fn activate(&self, y: f64) -> ActiveEdge {
        ActiveEdge {
            x: self.x_at_max_y + (y - self.max_y) * self.inv_slope,
            min_y: self.min_y,
            inv_slope: self.inv_slope,
            direction: self.direction,
        }
    }
}

/// Fills polygons with an active edge list.
///
/// The fill object keeps its edge buffers between calls so that filling many
/// shapes does not allocate every time.
#[derive(Default)]
pub struct ScanlineFill {
    edges: Vec<Edge>,
    active: Vec<ActiveEdge>,
}

impl ScanlineFill {
    pub fn new() -> Self {
        ScanlineFill::default()
    }

    /// Fills the area delimited by `subpaths` with `pixel`.
    ///
    /// Points with non-finite coordinates are skipped. Nothing is drawn when the
    /// subpaths contain fewer than three edges in total.
    pub fn fill<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        subpaths: &[Subpath],
        pixel: Target::Pixel,
        options: &FillOptions,
    ) {
        self.edges.clear();
        self.active.clear();

        let edge_count = self.build_edges(subpaths);
        if edge_count < 3 || self.edges.is_empty() {
            return;
        }

        self.edges.sort_by(|a, b| b.max_y.total_cmp(&a.max_y));

        let max_y = self.edges[0].max_y;
        let min_y = self
            .edges
            .iter()
            .map(|e| e.min_y)
            .fold(f64::INFINITY, f64::min);

        // Rows whose center lies in [min_y, max_y).
        let last_row = (max_y - 0.5).ceil() - 1.0;
        let first_row = (min_y - 0.5).ceil();
        let last_row = last_row.min(target.height() as f64 - 1.0);
        let first_row = first_row.max(0.0);

        log::trace!(
            "fill {} edges, rows {} to {}, {:?}",
            self.edges.len(),
            first_row,
            last_row,
            options.fill_rule
        );

        if last_row < first_row {
            return;
        }

        let mut cursor = 0;
        let mut row = last_row as i32;
        let first_row = first_row as i32;
        while row >= first_row {
            let y = row as f64 + 0.5;

            self.active.retain(|edge| edge.min_y <= y);

            while cursor < self.edges.len() && self.edges[cursor].max_y > y {
                let edge = &self.edges[cursor];
                if edge.min_y <= y {
                    self.active.push(edge.activate(y));
                }
                cursor += 1;
            }

            if !self.active.is_empty() {
                self.active.sort_by(|a, b| b.x.total_cmp(&a.x));
                fill_row(target, &self.active, row, pixel, options.fill_rule);
            }

            for edge in &mut self.active {
                edge.x -= edge.inv_slope;
            }

            row -= 1;
        }
    }

    // Returns the number of edges of the subpaths, horizontal ones included.
    fn build_edges(&mut self, subpaths: &[Subpath]) -> usize {
        let mut count = 0;
        let mut points = Vec::new();
        for subpath in subpaths {
            points.clear();
            points.extend(
                subpath
                    .iter()
                    .filter(|p| p.x.is_finite() && p.y.is_finite())
                    .cloned(),
            );

            if points.len() != subpath.len() {
                log::warn!(
                    "skipping {} non-finite points",
                    subpath.len() - points.len()
                );
            }

            if points.len() < 2 {
                continue;
            }

            for i in 0..points.len() {
                let from = points[i];
                let to = points[(i + 1) % points.len()];
                count += 1;
                if let Some(edge) = Edge::new(from, to) {
                    self.edges.push(edge);
                }
            }
        }

        count
    }
}

fn contribution(edge: &ActiveEdge, rule: FillRule) -> i32 {
    match rule {
        FillRule::EvenOdd => 1,
        FillRule::NonZero => edge.direction,
    }
}

// `active` is sorted by decreasing x.
fn fill_row<Target: PixelTarget>(
    target: &mut Target,
    active: &[ActiveEdge],
    row: i32,
    pixel: Target::Pixel,
    rule: FillRule,
) {
    let mut winding = contribution(&active[0], rule);
    for pair in active.windows(2) {
        let (right, left) = (&pair[0], &pair[1]);
        if rule.is_in(winding) {
            // Pixels whose center is in [left.x, right.x).
            let x0 = (left.x - 0.5).ceil();
            let x1 = (right.x - 0.5).ceil();
            if x0 < x1 {
                // Float to int casts saturate.
                target.draw_horizontal_line(x0 as i32, x1 as i32, row, pixel);
            }
        }
        winding += contribution(left, rule);
    }
}

/// Fills `subpaths` into `target` with a temporary [`ScanlineFill`].
pub fn fill_subpaths<Target: PixelTarget>(
    target: &mut Target,
    subpaths: &[Subpath],
    pixel: Target::Pixel,
    options: &FillOptions,
) {
    ScanlineFill::new().fill(target, subpaths, pixel, options);
}

#[cfg(test)]
use crate::image::Image;
#[cfg(test)]
use crate::path::math::point;

#[cfg(test)]
fn render(subpaths: &[Subpath], rule: FillRule) -> Image<u8> {
    let mut image = Image::new(100, 100, 0);
    ScanlineFill::new().fill(
        &mut image,
        subpaths,
        1,
        &FillOptions::DEFAULT.with_fill_rule(rule),
    );
    image
}

#[cfg(test)]
fn star() -> Subpath {
    (0..5)
        .map(|i| {
            let angle = (-90.0 + 144.0 * i as f64).to_radians();
            point(50.0 + 40.0 * angle.cos(), 50.0 + 40.0 * angle.sin())
        })
        .collect()
}

#[test]
fn square() {
    let square = vec![
        point(10.0, 10.0),
        point(20.0, 10.0),
        point(20.0, 20.0),
        point(10.0, 20.0),
    ];

    for &rule in &[FillRule::EvenOdd, FillRule::NonZero] {
        let image = render(&[square.clone()], rule);
        assert_eq!(image.count(|p| p == 1), 100);
        assert_eq!(image.get(10, 10), Some(1));
        assert_eq!(image.get(19, 19), Some(1));
        assert_eq!(image.get(20, 15), Some(0));
        assert_eq!(image.get(15, 20), Some(0));
        assert_eq!(image.get(9, 15), Some(0));
    }
}

#[test]
fn closed_and_open_subpaths_fill_the_same() {
    let open = vec![point(10.0, 10.0), point(30.0, 10.0), point(10.0, 30.0)];
    let mut closed = open.clone();
    closed.push(point(10.0, 10.0));

    let a = render(&[open], FillRule::NonZero);
    let b = render(&[closed], FillRule::NonZero);
    assert_eq!(a, b);
    assert!(a.count(|p| p == 1) > 150);
}

#[test]
fn star_overlap_depends_on_fill_rule() {
    let non_zero = render(&[star()], FillRule::NonZero);
    let even_odd = render(&[star()], FillRule::EvenOdd);

    // The center is covered twice.
    assert_eq!(non_zero.get(50, 50), Some(1));
    assert_eq!(even_odd.get(50, 50), Some(0));

    // The top branch is covered once.
    assert_eq!(non_zero.get(50, 20), Some(1));
    assert_eq!(even_odd.get(50, 20), Some(1));

    assert!(non_zero.count(|p| p == 1) > even_odd.count(|p| p == 1));
}

#[test]
fn bowtie() {
    // Left and right lobes with opposite orientations, no overlap.
    let bowtie = vec![
        point(10.0, 10.0),
        point(50.0, 50.0),
        point(50.0, 10.0),
        point(10.0, 50.0),
    ];

    let non_zero = render(&[bowtie.clone()], FillRule::NonZero);
    let even_odd = render(&[bowtie], FillRule::EvenOdd);
    assert_eq!(non_zero, even_odd);

    assert_eq!(non_zero.get(15, 30), Some(1));
    assert_eq!(non_zero.get(45, 30), Some(1));
    assert_eq!(non_zero.get(30, 15), Some(0));
    assert_eq!(non_zero.get(30, 45), Some(0));
}

#[test]
fn overlapping_squares() {
    let a = vec![
        point(10.0, 10.0),
        point(40.0, 10.0),
        point(40.0, 40.0),
        point(10.0, 40.0),
    ];
    let b: Subpath = a.iter().map(|p| point(p.x + 20.0, p.y + 20.0)).collect();
    let b_reversed: Subpath = b.iter().rev().cloned().collect();

    let same = render(&[a.clone(), b.clone()], FillRule::NonZero);
    assert_eq!(same.get(35, 35), Some(1));
    let same = render(&[a.clone(), b], FillRule::EvenOdd);
    assert_eq!(same.get(35, 35), Some(0));

    // With opposite orientations the overlap cancels out under both rules.
    let opposite = render(&[a.clone(), b_reversed.clone()], FillRule::NonZero);
    assert_eq!(opposite.get(35, 35), Some(0));
    assert_eq!(opposite.get(15, 15), Some(1));
    assert_eq!(opposite.get(45, 45), Some(1));
    let opposite = render(&[a, b_reversed], FillRule::EvenOdd);
    assert_eq!(opposite.get(35, 35), Some(0));
}

#[test]
fn vertices_on_row_centers() {
    // A diamond whose left and right vertices lie exactly on a row center, and whose
    // top and bottom vertices lie on pixel centers too.
    let diamond = vec![
        point(50.5, 10.5),
        point(70.5, 30.5),
        point(50.5, 50.5),
        point(30.5, 30.5),
    ];

    for &rule in &[FillRule::EvenOdd, FillRule::NonZero] {
        let image = render(&[diamond.clone()], rule);

        // The row through the side vertices is a single span.
        for x in 0..100 {
            let expected = if (30..70).contains(&x) { 1 } else { 0 };
            assert_eq!(image.get(x, 30), Some(expected), "x = {}", x);
        }

        // The top vertex is included, the bottom one is not.
        assert_eq!(image.get(50, 10), Some(0));
        assert_eq!(image.get(50, 11), Some(1));
        assert_eq!(image.get(50, 50), Some(0));
        assert_eq!(image.get(50, 49), Some(1));

        // Nothing leaks outside of the bounding box.
        for y in 0..100 {
            for x in 0..100 {
                if x < 30 || x > 70 || y < 10 || y > 50 {
                    assert_eq!(image.get(x, y), Some(0));
                }
            }
        }
    }
}

#[test]
fn horizontal_edges() {
    // A staircase made of horizontal and vertical edges.
    let stairs = vec![
        point(10.0, 10.0),
        point(20.0, 10.0),
        point(20.0, 20.0),
        point(30.0, 20.0),
        point(30.0, 30.0),
        point(10.0, 30.0),
    ];

    let image = render(&[stairs], FillRule::EvenOdd);
    assert_eq!(image.count(|p| p == 1), 10 * 10 + 20 * 10);
    assert_eq!(image.get(25, 15), Some(0));
    assert_eq!(image.get(25, 25), Some(1));
    assert_eq!(image.get(15, 15), Some(1));
}

#[test]
fn fewer_than_three_edges() {
    let mut image = Image::new(10, 10, 0u8);
    let mut fill = ScanlineFill::new();
    fill.fill(&mut image, &[], 1, &FillOptions::DEFAULT);
    fill.fill(&mut image, &[vec![point(1.0, 1.0)]], 1, &FillOptions::DEFAULT);
    fill.fill(
        &mut image,
        &[vec![point(1.0, 1.0), point(8.0, 8.0)]],
        1,
        &FillOptions::DEFAULT,
    );
    assert_eq!(image.count(|p| p == 1), 0);
}

#[test]
fn non_finite_points_are_skipped() {
    let square = vec![
        point(1.0, 1.0),
        point(5.0, 1.0),
        point(f64::NAN, 3.0),
        point(5.0, 5.0),
        point(1.0, 5.0),
        point(f64::INFINITY, 0.0),
    ];

    let image = render(&[square], FillRule::NonZero);
    assert_eq!(image.count(|p| p == 1), 16);
}

#[test]
fn shapes_are_clipped_to_the_target() {
    let huge = vec![
        point(-1e6, -1e6),
        point(1e6, -1e6),
        point(1e6, 1e6),
        point(-1e6, 1e6),
    ];
    let image = render(&[huge], FillRule::NonZero);
    assert_eq!(image.count(|p| p == 1), 100 * 100);

    // Only the top rows are visible, the edges must still be positioned right.
    let triangle = vec![point(0.0, -100.0), point(100.0, 100.0), point(0.0, 100.0)];
    let image = render(&[triangle], FillRule::NonZero);
    // On row 0 the hypotenuse is at x = 50.25.
    assert_eq!(image.get(49, 0), Some(1));
    assert_eq!(image.get(50, 0), Some(0));
}

#[test]
fn reuse_buffers() {
    let mut fill = ScanlineFill::new();
    let mut image = Image::new(100, 100, 0u8);
    fill.fill(&mut image, &[star()], 1, &FillOptions::even_odd());
    let first = image.clone();

    image.clear(0);
    fill.fill(&mut image, &[star()], 1, &FillOptions::even_odd());
    assert_eq!(first, image);
}
