#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Parsers for the SVG attributes that carry geometry.
//!
//! - path data (the `d` attribute) into [`Command`](path::Command) lists,
//! - the `transform` attribute into a [`Transform`](path::math::Transform),
//! - the `points` attribute of polylines and polygons.
//!
//! This crate is reexported in [scanvas](https://docs.rs/scanvas/).
//!
//! # Examples
//!
//! ```
//! use scanvas_svg::{parse, parse_transform};
//! use scanvas_svg::path::approximate;
//! use scanvas_svg::path::math::point;
//!
//! let commands = parse("M 10 10 h 20 Z M 200 200 h 20");
//! let transform = parse_transform("translate(1 1)").unwrap();
//! let subpaths = approximate(&commands, &transform, &Default::default());
//!
//! assert_eq!(subpaths.len(), 2);
//! assert_eq!(subpaths[1], vec![point(201.0, 201.0), point(221.0, 201.0)]);
//! ```

pub use scanvas_path as path;

pub mod parser;
pub mod points;
pub mod transform;

mod source;

#[doc(inline)]
pub use crate::parser::{parse, parse_with_error, ParseError};
#[doc(inline)]
pub use crate::points::parse_points;
#[doc(inline)]
pub use crate::transform::{parse_transform, TransformError, TransformList};
