//! Mutable 2D affine transform.

use crate::math::{point, Point, Vector};
use crate::traits::Transformation;
use euclid::default::Transform2D;

/// A 2D affine transform stored as the six coefficients `(a, b, c, d, e, f)` of the
/// matrix
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// Points are column vectors: `map(x, y) = (a*x + c*y + e, b*x + d*y + f)`.
///
/// All the mutators post-multiply the current matrix (`M := M × T`), so a sequence
/// like `translate` then `scale` maps points through the scale first and then the
/// translation, which is the order of an SVG `transform` attribute.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Transform {
    matrix: Transform2D<f64>,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Transform {
            matrix: Transform2D::identity(),
        }
    }

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        // euclid stores row vectors, the coefficients line up one to one.
        Transform {
            matrix: Transform2D::new(a, b, c, d, e, f),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by an angle in radians.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Skew along the x axis by an angle in radians.
    pub fn skewing_x(radians: f64) -> Self {
        Transform::new(1.0, 0.0, radians.tan(), 1.0, 0.0, 0.0)
    }

    /// Skew along the y axis by an angle in radians.
    pub fn skewing_y(radians: f64) -> Self {
        Transform::new(1.0, radians.tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Returns `[a, b, c, d, e, f]`.
    pub fn components(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m.m11, m.m12, m.m21, m.m22, m.m31, m.m32]
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Transform2D::identity()
    }

    /// Maps a point.
    #[inline]
    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.matrix.transform_point(point(x, y));
        (p.x, p.y)
    }

    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        self.matrix.transform_point(p)
    }

    /// Maps a point and pushes the result at the end of `destination`.
    #[inline]
    pub fn map_append(&self, x: f64, y: f64, destination: &mut Vec<Point>) {
        destination.push(self.matrix.transform_point(point(x, y)));
    }

    /// Scales an extent (radii, stroke widths) by the norms of the matrix columns,
    /// `hypot(a, b)` for the width and `hypot(c, d)` for the height.
    ///
    /// The translation is ignored.
    pub fn resize(&self, width: f64, height: f64) -> (f64, f64) {
        let m = &self.matrix;
        (width * m.m11.hypot(m.m12), height * m.m21.hypot(m.m22))
    }

    /// The largest scale factor applied along either axis.
    pub fn max_scale(&self) -> f64 {
        let (sx, sy) = self.resize(1.0, 1.0);
        sx.max(sy)
    }

    /// Post-multiplies this transform by `other`: `M := M × other`.
    ///
    /// Points mapped by the result go through `other` first.
    pub fn multiply(&mut self, other: &Transform) -> &mut Self {
        self.matrix = other.matrix.then(&self.matrix);
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.multiply(&Transform::translation(dx, dy))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.multiply(&Transform::scaling(sx, sy))
    }

    /// Rotates by an angle in radians.
    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        self.multiply(&Transform::rotation(radians))
    }

    /// Skews along the x axis by an angle in radians.
    pub fn skew_x(&mut self, radians: f64) -> &mut Self {
        self.multiply(&Transform::skewing_x(radians))
    }

    /// Skews along the y axis by an angle in radians.
    pub fn skew_y(&mut self, radians: f64) -> &mut Self {
        self.multiply(&Transform::skewing_y(radians))
    }

    pub fn to_euclid(&self) -> Transform2D<f64> {
        self.matrix
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl From<Transform2D<f64>> for Transform {
    fn from(matrix: Transform2D<f64>) -> Self {
        Transform { matrix }
    }
}

impl Transformation<f64> for Transform {
    fn transform_point(&self, p: Point) -> Point {
        self.matrix.transform_point(p)
    }

    fn transform_vector(&self, v: Vector) -> Vector {
        self.matrix.transform_vector(v)
    }
}

#[cfg(test)]
fn assert_maps_to(t: &Transform, from: (f64, f64), to: (f64, f64)) {
    let (x, y) = t.map(from.0, from.1);
    assert!(
        (x - to.0).abs() < 1e-9 && (y - to.1).abs() < 1e-9,
        "{:?} mapped to {:?}, expected {:?}",
        from,
        (x, y),
        to
    );
}

#[test]
fn identity_maps_to_itself() {
    let t = Transform::identity();
    for &(x, y) in &[(0.0, 0.0), (1.5, -3.25), (-1e9, 1e-9), (123456.789, 0.001)] {
        assert_eq!(t.map(x, y), (x, y));
    }
    assert!(t.is_identity());
}

#[test]
fn translate_scale_rotate() {
    let mut t = Transform::identity();
    t.translate(10.0, 20.0);
    t.scale(3.0, 7.0);
    t.rotate(90f64.to_radians());

    assert_maps_to(&t, (100.0, 100.0), (-290.0, 720.0));
}

#[test]
fn map_formula() {
    let t = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(t.map(10.0, 100.0), (1.0 * 10.0 + 3.0 * 100.0 + 5.0, 2.0 * 10.0 + 4.0 * 100.0 + 6.0));
    assert_eq!(t.components(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn map_append() {
    let mut t = Transform::identity();
    t.translate(1.0, 2.0);

    let mut points = vec![point(0.0, 0.0)];
    t.map_append(3.0, 4.0, &mut points);

    assert_eq!(points, vec![point(0.0, 0.0), point(4.0, 6.0)]);
}

#[test]
fn multiply_applies_the_argument_first() {
    let mut t = Transform::translation(100.0, 0.0);
    t.multiply(&Transform::scaling(2.0, 2.0));
    // Scaled first, then translated.
    assert_maps_to(&t, (1.0, 1.0), (102.0, 2.0));

    let mut t = Transform::scaling(2.0, 2.0);
    t.multiply(&Transform::translation(100.0, 0.0));
    assert_maps_to(&t, (1.0, 1.0), (202.0, 2.0));
}

#[test]
fn skews() {
    let mut t = Transform::identity();
    t.skew_x(45f64.to_radians());
    assert_maps_to(&t, (0.0, 10.0), (10.0, 10.0));

    let mut t = Transform::identity();
    t.skew_y(45f64.to_radians());
    assert_maps_to(&t, (10.0, 0.0), (10.0, 10.0));
}

#[test]
fn resize_ignores_translation() {
    let mut t = Transform::identity();
    t.translate(50.0, -20.0);
    t.scale(2.0, 3.0);
    assert_eq!(t.resize(5.0, 5.0), (10.0, 15.0));
    assert_eq!(t.max_scale(), 3.0);

    let mut t = Transform::identity();
    t.rotate(30f64.to_radians());
    t.scale(4.0, 4.0);
    let (w, h) = t.resize(1.0, 2.0);
    assert!((w - 4.0).abs() < 1e-9);
    assert!((h - 8.0).abs() < 1e-9);
}

#[test]
fn chained_mutators() {
    let mut a = Transform::identity();
    a.translate(1.0, 2.0).scale(2.0, 2.0);

    let mut b = Transform::identity();
    b.translate(1.0, 2.0);
    b.scale(2.0, 2.0);

    assert_eq!(a, b);
}
