//! The `transform` attribute.

use crate::path::math::Transform;
use crate::source::{NumberError, Source};
use core::str::FromStr;
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum TransformError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Unknown transform function {name:?}.")]
    Function { name: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Expected {expected:?}, got {src:?}.")]
    Syntax {
        expected: char,
        src: String,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: Invalid number of arguments for {name}: {count}.")]
    ArgumentCount {
        name: String,
        count: usize,
        line: i32,
        column: i32,
    },
}

fn number_error(e: NumberError) -> TransformError {
    TransformError::Number {
        src: e.src,
        line: e.line,
        column: e.column,
    }
}

/// Parses a list of transform functions and composes them from left to right.
///
/// Supports `matrix(a b c d e f)`, `translate(tx [ty])`, `scale(sx [sy])`,
/// `rotate(angle [cx cy])`, `skewX(angle)` and `skewY(angle)`, angles being in
/// degrees.
///
/// ```
/// use scanvas_svg::parse_transform;
///
/// let transform = parse_transform("translate(10, 20) scale(2)").unwrap();
/// assert_eq!(transform.map(1.0, 1.0), (12.0, 22.0));
/// ```
pub fn parse_transform(s: &str) -> Result<Transform, TransformError> {
    let mut src = Source::new(s);
    let mut buffer = String::new();
    let mut args = Vec::with_capacity(6);
    let mut transform = Transform::identity();

    src.skip_whitespace();
    while !src.is_finished() {
        let (line, column) = src.position();
        let name = src.identifier();
        if name.is_empty() {
            return Err(TransformError::Function {
                name: src.current().map(String::from).unwrap_or_default(),
                line,
                column,
            });
        }

        src.skip_spaces();
        expect(&mut src, '(')?;

        args.clear();
        loop {
            src.skip_whitespace();
            match src.current() {
                Some(')') => {
                    src.advance();
                    break;
                }
                None => {
                    return Err(syntax_error(&src, ')'));
                }
                _ => {
                    args.push(src.number(&mut buffer).map_err(number_error)?);
                }
            }
        }

        match (name.as_str(), args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => {
                transform.multiply(&Transform::new(a, b, c, d, e, f));
            }
            ("translate", &[tx]) => {
                transform.translate(tx, 0.0);
            }
            ("translate", &[tx, ty]) => {
                transform.translate(tx, ty);
            }
            ("scale", &[s]) => {
                transform.scale(s, s);
            }
            ("scale", &[sx, sy]) => {
                transform.scale(sx, sy);
            }
            ("rotate", &[angle]) => {
                transform.rotate(angle.to_radians());
            }
            ("rotate", &[angle, cx, cy]) => {
                transform
                    .translate(cx, cy)
                    .rotate(angle.to_radians())
                    .translate(-cx, -cy);
            }
            ("skewX", &[angle]) => {
                transform.skew_x(angle.to_radians());
            }
            ("skewY", &[angle]) => {
                transform.skew_y(angle.to_radians());
            }
            ("matrix", _) | ("translate", _) | ("scale", _) | ("rotate", _) | ("skewX", _)
            | ("skewY", _) => {
                return Err(TransformError::ArgumentCount {
                    name: name.clone(),
                    count: args.len(),
                    line,
                    column,
                });
            }
            _ => {
                return Err(TransformError::Function {
                    name: name.clone(),
                    line,
                    column,
                });
            }
        }

        src.skip_whitespace();
    }

    Ok(transform)
}

fn syntax_error(src: &Source, expected: char) -> TransformError {
    let (line, column) = src.position();
    TransformError::Syntax {
        expected,
        src: src.current().map(String::from).unwrap_or_default(),
        line,
        column,
    }
}

fn expect(src: &mut Source, expected: char) -> Result<(), TransformError> {
    if src.current() != Some(expected) {
        return Err(syntax_error(src, expected));
    }
    src.advance();

    Ok(())
}

/// A parsed `transform` attribute.
///
/// ```
/// use scanvas_svg::TransformList;
///
/// let list: TransformList = "rotate(90)".parse().unwrap();
/// let (x, y) = list.0.map(1.0, 0.0);
/// assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TransformList(pub Transform);

impl FromStr for TransformList {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_transform(s).map(TransformList)
    }
}

impl From<TransformList> for Transform {
    fn from(list: TransformList) -> Self {
        list.0
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
fn empty_list_is_identity() {
    assert_eq!(parse_transform(""), Ok(Transform::identity()));
    assert_eq!(parse_transform("  "), Ok(Transform::identity()));
}

#[test]
fn composed_left_to_right() {
    let t = parse_transform("translate(10,20) scale(3,7) rotate(90)").unwrap();
    assert_maps_to(&t, (100.0, 100.0), (-290.0, 720.0));

    let mut expected = Transform::identity();
    expected.translate(10.0, 20.0);
    expected.scale(3.0, 7.0);
    expected.rotate(90f64.to_radians());
    assert_eq!(t, expected);
}

#[test]
fn single_argument_forms() {
    let t = parse_transform("translate(5)").unwrap();
    assert_maps_to(&t, (0.0, 0.0), (5.0, 0.0));

    let t = parse_transform("scale(2)").unwrap();
    assert_maps_to(&t, (1.0, 3.0), (2.0, 6.0));
}

#[test]
fn rotate_around_center() {
    let t = parse_transform("rotate(90 10 10)").unwrap();
    assert_maps_to(&t, (20.0, 10.0), (10.0, 20.0));
    assert_maps_to(&t, (10.0, 10.0), (10.0, 10.0));
}

#[test]
fn matrix_and_skews() {
    let t = parse_transform("matrix(1 2 3 4 5 6)").unwrap();
    assert_eq!(t.components(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let t = parse_transform("skewX(45)").unwrap();
    assert_maps_to(&t, (0.0, 10.0), (10.0, 10.0));

    let t = parse_transform("skewY(45),translate(1 1)").unwrap();
    assert_maps_to(&t, (0.0, 0.0), (1.0, 2.0));
}

#[test]
fn errors() {
    assert!(matches!(
        parse_transform("translate(1 2) spin(3)"),
        Err(TransformError::Function { ref name, line: 1, column: 16 }) if name == "spin"
    ));
    assert!(matches!(
        parse_transform("scale(1 2 3)"),
        Err(TransformError::ArgumentCount { count: 3, .. })
    ));
    assert!(matches!(
        parse_transform("rotate(1 2)"),
        Err(TransformError::ArgumentCount { count: 2, .. })
    ));
    assert!(matches!(
        parse_transform("scale 2"),
        Err(TransformError::Syntax { expected: '(', .. })
    ));
    assert!(matches!(
        parse_transform("scale(2"),
        Err(TransformError::Syntax { expected: ')', .. })
    ));
    assert!(matches!(
        parse_transform("scale(x)"),
        Err(TransformError::Number { .. })
    ));
}

#[test]
fn from_str() {
    let list: TransformList = "translate(3 4)".parse().unwrap();
    let transform: Transform = list.into();
    assert_eq!(transform, Transform::translation(3.0, 4.0));
    assert!("nope".parse::<TransformList>().is_err());
}
