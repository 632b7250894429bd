//! In-memory raster images.
//!
//! [`Canvas`] is a mutable `DrawTarget` used while composing an image.
//! [`Canvas::into_bitmap`] freezes it into a [`Bitmap`], which can no longer be
//! modified and is drawn onto other targets through `Image::new`.

use core::convert::Infallible;

use embedded_graphics::image::ImageDrawable;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

/// Row-major pixel index of `point` in an image of `size`, if inside.
#[inline]
fn pixel_index(size: Size, point: Point) -> Option<usize> {
    let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
    if x < size.width && y < size.height {
        Some((y * size.width + x) as usize)
    } else {
        None
    }
}

/// Mutable drawing surface backed by a pixel vector.
///
/// Pixels drawn outside the canvas are silently dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl Canvas {
    /// Create a canvas of `size` filled with `color`.
    pub fn new(size: Size, color: Rgb888) -> Self {
        Self {
            size,
            pixels: vec![color; (size.width * size.height) as usize],
        }
    }

    /// Read a pixel, `None` outside the canvas.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        pixel_index(self.size, point).map(|i| self.pixels[i])
    }

    /// Freeze the canvas into an immutable bitmap.
    pub fn into_bitmap(self) -> Bitmap {
        Bitmap {
            size: self.size,
            pixels: self.pixels.into_boxed_slice(),
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = pixel_index(self.size, point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

/// Immutable raster image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Box<[Rgb888]>,
}

impl Bitmap {
    /// Read a pixel, `None` outside the bitmap.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        pixel_index(self.size, point).map(|i| self.pixels[i])
    }

    /// All pixels with their positions, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
        let width = self.size.width as usize;
        self.pixels.iter().enumerate().map(move |(i, &color)| {
            Pixel(Point::new((i % width) as i32, (i / width) as i32), color)
        })
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.size
    }
}

impl ImageDrawable for Bitmap {
    type Color = Rgb888;

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.fill_contiguous(&self.bounding_box(), self.pixels.iter().copied())
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = area.intersection(&self.bounding_box());
        target.draw_iter(area.points().filter_map(|p| {
            self.pixel(p).map(|color| Pixel(p - area.top_left, color))
        }))
    }
}
