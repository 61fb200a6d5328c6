//! Pixel buffers.

use crate::PixelTarget;

/// An owned image stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<Pixel> {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl<Pixel: Copy> Image<Pixel> {
    /// Creates an image with every pixel set to `background`.
    pub fn new(width: usize, height: usize, background: Pixel) -> Self {
        Image {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[x + y * self.width])
    }

    /// Number of pixels for which `predicate` returns true.
    pub fn count<F: Fn(Pixel) -> bool>(&self, predicate: F) -> usize {
        self.pixels.iter().filter(|p| predicate(**p)).count()
    }

    /// Sets every pixel to `pixel`.
    pub fn clear(&mut self, pixel: Pixel) {
        for p in &mut self.pixels {
            *p = pixel;
        }
    }

    pub fn as_mut_slice(&mut self) -> MutableImageSlice<'_, Pixel> {
        MutableImageSlice::new(self.width, self.height, &mut self.pixels)
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}

impl<Pixel: Copy> PixelTarget for Image<Pixel> {
    type Pixel = Pixel;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }

        self.pixels[x as usize + y as usize * self.width] = pixel;
    }

    fn draw_horizontal_line(&mut self, x0: i32, x1: i32, y: i32, pixel: Pixel) {
        self.as_mut_slice().draw_horizontal_line(x0, x1, y, pixel);
    }
}

/// A view on a writable image in memory.
///
/// Rows are `stride` pixels apart, which lets the view cover a sub-rectangle of a
/// larger buffer.
pub struct MutableImageSlice<'l, Pixel: Copy> {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub pixels: &'l mut [Pixel],
}

impl<'l, Pixel: Copy> MutableImageSlice<'l, Pixel> {
    pub fn new(width: usize, height: usize, pixels: &'l mut [Pixel]) -> Self {
        MutableImageSlice::with_stride(width, height, width, pixels)
    }

    /// # Panics
    ///
    /// When `width > stride` or when `pixels` is too small for `height` rows.
    pub fn with_stride(width: usize, height: usize, stride: usize, pixels: &'l mut [Pixel]) -> Self {
        assert!(width <= stride);
        assert!(height == 0 || pixels.len() >= (height - 1) * stride + width);

        MutableImageSlice {
            width,
            height,
            stride,
            pixels,
        }
    }

    #[inline]
    pub fn pixel_offset(&self, x: usize, y: usize) -> usize {
        x + y * self.stride
    }

    #[inline]
    pub fn contains_pixel(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

impl<'l, Pixel: Copy> PixelTarget for MutableImageSlice<'l, Pixel> {
    type Pixel = Pixel;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        if !self.contains_pixel(x, y) {
            return;
        }

        let offset = self.pixel_offset(x as usize, y as usize);
        self.pixels[offset] = pixel;
    }

    fn draw_horizontal_line(&mut self, x0: i32, x1: i32, y: i32, pixel: Pixel) {
        if y < 0 || y as usize >= self.height {
            return;
        }

        let start = x0.max(0) as usize;
        let end = (x1.max(0) as usize).min(self.width);
        if start >= end {
            return;
        }

        let row = self.pixel_offset(0, y as usize);
        for p in &mut self.pixels[row + start..row + end] {
            *p = pixel;
        }
    }
}

#[test]
fn image_basics() {
    let mut image = Image::new(3, 2, '.');
    image.set_pixel(1, 1, '#');
    image.set_pixel(3, 0, '#');
    image.set_pixel(-1, 0, '#');

    assert_eq!(image.get(1, 1), Some('#'));
    assert_eq!(image.get(3, 0), None);
    assert_eq!(image.count(|p| p == '#'), 1);

    image.clear('x');
    assert_eq!(image.into_pixels(), vec!['x'; 6]);
}

#[test]
fn strided_slice() {
    // A 2x2 view into the middle of a 4x3 buffer.
    let mut buffer = vec![0u8; 12];
    {
        let mut view = MutableImageSlice::with_stride(2, 2, 4, &mut buffer[5..]);
        view.draw_horizontal_line(-3, 10, 0, 1);
        view.set_pixel(1, 1, 2);
        view.set_pixel(2, 1, 9);
    }

    assert_eq!(buffer, vec![0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 2, 0]);
}

#[test]
#[should_panic]
fn slice_too_small() {
    let mut buffer = vec![0u8; 5];
    MutableImageSlice::new(3, 2, &mut buffer);
}

#[test]
fn mutable_view_of_an_image() {
    let mut image = Image::new(4, 3, 0u8);
    {
        let mut view = image.as_mut_slice();
        assert_eq!((view.width, view.height, view.stride), (4, 3, 4));
        view.draw_horizontal_line(1, 3, 2, 7);
    }

    assert_eq!(image.get(1, 2), Some(7));
    assert_eq!(image.get(2, 2), Some(7));
    assert_eq!(image.count(|p| p == 7), 2);
}
