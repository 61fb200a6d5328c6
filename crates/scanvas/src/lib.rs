#![deny(bare_trait_objects)]

//! Software rasterization of SVG path geometry.
//!
//! # Crates
//!
//! This meta-crate (`scanvas`) reexports the following sub-crates for convenience:
//!
//! * **scanvas_geom** - Affine transforms, bézier curves and elliptic arcs.
//! * **scanvas_path** - Path commands, basic shapes and their approximation into polygons.
//! * **scanvas_svg** - Parsers for the `d`, `transform` and `points` SVG attributes.
//! * **scanvas_raster** - Scanline fill and stroke into pixel buffers.
//!
//! Each `scanvas_<name>` crate is reexported as a `<name>` module in `scanvas`.
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Filling path data
//!
//! ```
//! use scanvas::{fill_path_data, RenderOptions};
//! use scanvas::math::Transform;
//! use scanvas::raster::Image;
//!
//! let mut image = Image::new(32, 32, 0u8);
//! let transform = Transform::scaling(2.0, 2.0);
//!
//! fill_path_data(&mut image, "M 1 1 h 4 v 4 h -4 Z", &transform, 255, &RenderOptions::DEFAULT);
//!
//! // The 4 by 4 square becomes 8 by 8 device pixels.
//! assert_eq!(image.count(|p| p == 255), 64);
//! ```
//!
//! ## Going through each stage
//!
//! ```
//! use scanvas::path::{shapes, PathApproximator};
//! use scanvas::raster::{FillOptions, Image, ScanlineFill};
//! use scanvas::svg::parse_transform;
//!
//! let transform = parse_transform("translate(16 16) scale(0.5)").unwrap();
//! let circle = shapes::circle(0.0, 0.0, 20.0);
//!
//! let mut approximator = PathApproximator::new(&transform);
//! approximator.approximate(&circle);
//!
//! let mut image = Image::new(32, 32, false);
//! ScanlineFill::new().fill(&mut image, approximator.subpaths(), true, &FillOptions::DEFAULT);
//!
//! assert_eq!(image.get(16, 16), Some(true));
//! assert_eq!(image.get(1, 1), Some(false));
//! ```

pub extern crate scanvas_geom;
pub extern crate scanvas_path;
pub extern crate scanvas_raster;
pub extern crate scanvas_svg;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub use scanvas_geom as geom;
pub use scanvas_path as path;
pub use scanvas_raster as raster;
pub use scanvas_svg as svg;

pub use crate::path::math;

use crate::math::Transform;
use crate::path::{ApproximationOptions, Command, PathApproximator};
use crate::raster::{FillOptions, PixelTarget, ScanlineFill, StrokeOptions, StrokeRenderer};

/// The options of every stage of the pipeline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct RenderOptions {
    pub approximation: ApproximationOptions,
    pub fill: FillOptions,
    /// The line width is expressed in user space. It is multiplied by the
    /// largest scale factor of the transform before rasterization.
    pub stroke: StrokeOptions,
}

impl RenderOptions {
    pub const DEFAULT: Self = RenderOptions {
        approximation: ApproximationOptions::DEFAULT,
        fill: FillOptions::DEFAULT,
        stroke: StrokeOptions::DEFAULT,
    };

    #[inline]
    pub const fn with_approximation(mut self, options: ApproximationOptions) -> Self {
        self.approximation = options;
        self
    }

    #[inline]
    pub const fn with_fill(mut self, options: FillOptions) -> Self {
        self.fill = options;
        self
    }

    #[inline]
    pub const fn with_stroke(mut self, options: StrokeOptions) -> Self {
        self.stroke = options;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Runs the whole pipeline: parsing, approximation and rasterization.
///
/// The renderer keeps the buffers of the rasterizers around so that rendering
/// many paths does not allocate every time.
///
/// Malformed path data is not an error at this level: everything before the
/// first malformed command is rendered. Use [`svg::parse_with_error`] to find
/// out what went wrong.
#[derive(Default)]
pub struct Renderer {
    fill: ScanlineFill,
    stroke: StrokeRenderer,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    pub fn fill_path_data<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        d: &str,
        transform: &Transform,
        pixel: Target::Pixel,
        options: &RenderOptions,
    ) {
        let commands = svg::parse(d);
        self.fill_commands(target, &commands, transform, pixel, options);
    }

    pub fn stroke_path_data<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        d: &str,
        transform: &Transform,
        pixel: Target::Pixel,
        options: &RenderOptions,
    ) {
        let commands = svg::parse(d);
        self.stroke_commands(target, &commands, transform, pixel, options);
    }

    /// Fills commands, for example the ones produced by [`path::shapes`].
    pub fn fill_commands<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        commands: &[Command],
        transform: &Transform,
        pixel: Target::Pixel,
        options: &RenderOptions,
    ) {
        let mut approximator = PathApproximator::with_options(transform, options.approximation);
        approximator.approximate(commands);

        self.fill
            .fill(target, approximator.subpaths(), pixel, &options.fill);
    }

    pub fn stroke_commands<Target: PixelTarget>(
        &mut self,
        target: &mut Target,
        commands: &[Command],
        transform: &Transform,
        pixel: Target::Pixel,
        options: &RenderOptions,
    ) {
        let mut approximator = PathApproximator::with_options(transform, options.approximation);
        approximator.approximate(commands);

        let line_width = options.stroke.line_width * transform.max_scale();
        log::trace!("stroke width {} in device space", line_width);

        self.stroke.stroke_subpaths(
            target,
            approximator.subpaths(),
            pixel,
            &options.stroke.with_line_width(line_width),
        );
    }
}

/// Parses, approximates and fills path data in one call.
///
/// See [`Renderer`] to reuse allocations across calls.
pub fn fill_path_data<Target: PixelTarget>(
    target: &mut Target,
    d: &str,
    transform: &Transform,
    pixel: Target::Pixel,
    options: &RenderOptions,
) {
    Renderer::new().fill_path_data(target, d, transform, pixel, options);
}

/// Parses, approximates and strokes path data in one call.
pub fn stroke_path_data<Target: PixelTarget>(
    target: &mut Target,
    d: &str,
    transform: &Transform,
    pixel: Target::Pixel,
    options: &RenderOptions,
) {
    Renderer::new().stroke_path_data(target, d, transform, pixel, options);
}

#[cfg(test)]
use crate::raster::Image;

#[test]
fn fill_scaled_square() {
    let mut image = Image::new(32, 32, 0u8);
    fill_path_data(
        &mut image,
        "M 1 1 h 4 v 4 h -4 Z",
        &Transform::scaling(2.0, 2.0),
        1,
        &RenderOptions::DEFAULT,
    );

    assert_eq!(image.count(|p| p == 1), 64);
    assert_eq!(image.get(2, 2), Some(1));
    assert_eq!(image.get(9, 9), Some(1));
    assert_eq!(image.get(10, 10), Some(0));
}

#[test]
fn stroke_width_follows_the_transform() {
    let mut image = Image::new(50, 50, 0u8);
    let options = RenderOptions::DEFAULT.with_stroke(StrokeOptions::line_width(2.0));
    stroke_path_data(
        &mut image,
        "M 0 10 H 20",
        &Transform::scaling(2.0, 2.0),
        1,
        &options,
    );

    // A 4 pixels wide line from (0, 20) to (40, 20).
    assert_eq!(image.count(|p| p == 1), 4 * 40);
    assert_eq!(image.get(0, 18), Some(1));
    assert_eq!(image.get(39, 21), Some(1));
    assert_eq!(image.get(10, 17), Some(0));
    assert_eq!(image.get(10, 22), Some(0));
}

#[test]
fn malformed_data_renders_the_valid_prefix() {
    let mut image = Image::new(20, 20, 0u8);
    fill_path_data(
        &mut image,
        "M 0 0 H 10 V 10 H 0 Z L",
        &Transform::identity(),
        1,
        &RenderOptions::DEFAULT,
    );

    assert_eq!(image.count(|p| p == 1), 100);
}

#[test]
fn renderer_reuse_and_fill_rules() {
    let d = "M 0 0 H 10 V 10 H 0 Z M 2 2 H 8 V 8 H 2 Z";
    let mut renderer = Renderer::new();

    let mut non_zero = Image::new(10, 10, 0u8);
    renderer.fill_path_data(&mut non_zero, d, &Transform::identity(), 1, &RenderOptions::DEFAULT);

    let mut even_odd = Image::new(10, 10, 0u8);
    let options = RenderOptions::DEFAULT.with_fill(FillOptions::even_odd());
    renderer.fill_path_data(&mut even_odd, d, &Transform::identity(), 1, &options);

    assert_eq!(non_zero.count(|p| p == 1), 100);
    assert_eq!(even_odd.count(|p| p == 1), 100 - 36);
    assert_eq!(even_odd.get(5, 5), Some(0));
}

#[test]
fn shapes_through_the_pipeline() {
    let mut image = Image::new(20, 20, 0u8);
    Renderer::new().fill_commands(
        &mut image,
        &path::shapes::rectangle(2.0, 3.0, 5.0, 4.0),
        &Transform::identity(),
        1,
        &RenderOptions::DEFAULT,
    );

    assert_eq!(image.count(|p| p == 1), 20);
}
