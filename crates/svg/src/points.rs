//! The `points` attribute of `<polyline>` and `<polygon>`.

use crate::path::math::{point, Point};
use crate::source::Source;

/// Reads coordinate pairs until the end of the text or the first invalid number.
///
/// A trailing odd coordinate is dropped.
pub fn parse_points(s: &str) -> Vec<Point> {
    let mut src = Source::new(s);
    let mut buffer = String::new();
    let mut coordinates = Vec::new();

    loop {
        src.skip_whitespace();
        if src.is_finished() {
            break;
        }

        match src.number(&mut buffer) {
            Ok(value) => coordinates.push(value),
            Err(e) => {
                log::debug!(
                    "points truncated at line {} column {}: unexpected {:?}",
                    e.line,
                    e.column,
                    e.src
                );
                break;
            }
        }
    }

    coordinates
        .chunks_exact(2)
        .map(|pair| point(pair[0], pair[1]))
        .collect()
}

#[test]
fn pairs() {
    assert_eq!(
        parse_points("0,0 10,0 10 10\n-5.5,1e1"),
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(-5.5, 10.0)
        ]
    );
}

#[test]
fn odd_coordinate_is_dropped() {
    assert_eq!(parse_points("1 2 3"), vec![point(1.0, 2.0)]);
    assert!(parse_points("").is_empty());
    assert!(parse_points("7").is_empty());
}

#[test]
fn stops_at_invalid_number() {
    assert_eq!(parse_points("1 2 3 4 x 5 6"), vec![point(1.0, 2.0), point(3.0, 4.0)]);
}
