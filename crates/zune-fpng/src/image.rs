/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Borrowed view over a float image
use crate::error::PngEncodeErrors;

/// Largest width or height png can represent
const PNG_MAX_DIMENSION: i64 = i32::MAX as i64;

/// Pixel bounds of an image, `x2` and `y2` are exclusive
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Rect {
        Rect { x1, y1, x2, y2 }
    }
    /// Bounds of a `width` x `height` image at the origin
    pub const fn from_dimensions(width: i32, height: i32) -> Rect {
        Rect::new(0, 0, width, height)
    }
    pub const fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }
    pub const fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }
}

/// A read only view of row major float samples
///
/// Rows are addressed bottom up, row 0 in memory is the bottom
/// row of the image. Rows may be padded, `row_bytes` is the distance
/// in bytes between the start of two consecutive rows.
///
/// The canonical sample range is `0.0..=1.0`, values outside
/// are clamped during quantization.
#[derive(Copy, Clone, Debug)]
pub struct FloatImage<'a> {
    data:         &'a [f32],
    bounds:       Rect,
    components:   usize,
    row_bytes:    usize,
    pixel_aspect: f32
}

impl<'a> FloatImage<'a> {
    /// Create a view over tightly packed rows
    pub fn new(data: &'a [f32], bounds: Rect, components: usize) -> FloatImage<'a> {
        let width = bounds.width().max(0) as usize;
        FloatImage {
            data,
            bounds,
            components,
            row_bytes: width * components * core::mem::size_of::<f32>(),
            pixel_aspect: 1.0
        }
    }
    /// Set the byte distance between two consecutive rows
    pub fn set_row_bytes(mut self, row_bytes: usize) -> Self {
        self.row_bytes = row_bytes;
        self
    }
    /// Set the pixel aspect ratio (pixel width / pixel height)
    pub fn set_pixel_aspect(mut self, ratio: f32) -> Self {
        self.pixel_aspect = ratio;
        self
    }

    pub const fn data(&self) -> &'a [f32] {
        self.data
    }
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }
    pub const fn components(&self) -> usize {
        self.components
    }
    pub const fn row_bytes(&self) -> usize {
        self.row_bytes
    }
    pub const fn pixel_aspect(&self) -> f32 {
        self.pixel_aspect
    }
    /// Width in pixels, valid after [`validate`](Self::validate)
    pub const fn width(&self) -> usize {
        self.bounds.width() as usize
    }
    /// Height in pixels, valid after [`validate`](Self::validate)
    pub const fn height(&self) -> usize {
        self.bounds.height() as usize
    }
    /// Distance between two rows in samples
    pub(crate) const fn row_stride(&self) -> usize {
        self.row_bytes / core::mem::size_of::<f32>()
    }

    /// Return the samples of row `y`, counted from the start of the buffer
    pub(crate) fn row(&self, y: usize) -> &'a [f32] {
        let start = y * self.row_stride();
        &self.data[start..start + self.width() * self.components]
    }

    /// Check that the geometry describes memory we can read
    pub fn validate(&self) -> Result<(), PngEncodeErrors> {
        let (width, height) = (self.bounds.width(), self.bounds.height());

        if width <= 0 || height <= 0 || width > PNG_MAX_DIMENSION || height > PNG_MAX_DIMENSION {
            return Err(PngEncodeErrors::InvalidDimensions(width, height));
        }
        if self.components == 0 {
            return Err(PngEncodeErrors::InvalidComponentStart(0, 0));
        }
        let packed_row = (width as usize)
            .checked_mul(self.components)
            .ok_or(PngEncodeErrors::InvalidDimensions(width, height))?;

        if self.row_bytes % core::mem::size_of::<f32>() != 0 || self.row_stride() < packed_row {
            return Err(PngEncodeErrors::InvalidStride(self.row_bytes));
        }
        let needed = self
            .row_stride()
            .checked_mul(height as usize - 1)
            .and_then(|x| x.checked_add(packed_row))
            .ok_or(PngEncodeErrors::InvalidDimensions(width, height))?;

        if self.data.len() < needed {
            return Err(PngEncodeErrors::TooSmallInput(needed, self.data.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_rows_validate() {
        let data = vec![0.0; 4 * 3 * 2];
        let image = FloatImage::new(&data, Rect::from_dimensions(4, 2), 3);
        assert_eq!(image.row_bytes(), 48);
        image.validate().unwrap();
        assert_eq!(image.row(1).len(), 12);
    }

    #[test]
    fn padded_rows_validate_without_trailing_padding() {
        // two rows of 2 RGB pixels padded to 8 samples, last row unpadded
        let data = vec![0.0; 8 + 6];
        let image = FloatImage::new(&data, Rect::new(10, 10, 12, 12), 3).set_row_bytes(32);
        image.validate().unwrap();
        assert_eq!(image.row(1).as_ptr(), data[8..].as_ptr());
    }

    #[test]
    fn bad_geometry_is_rejected() {
        let data = vec![0.0; 16];
        let empty = FloatImage::new(&data, Rect::new(3, 0, 3, 2), 1);
        assert!(matches!(
            empty.validate(),
            Err(PngEncodeErrors::InvalidDimensions(0, 2))
        ));

        let short_stride = FloatImage::new(&data, Rect::from_dimensions(4, 2), 1).set_row_bytes(8);
        assert!(matches!(
            short_stride.validate(),
            Err(PngEncodeErrors::InvalidStride(8))
        ));

        let odd_stride = FloatImage::new(&data, Rect::from_dimensions(1, 2), 1).set_row_bytes(6);
        assert!(matches!(
            odd_stride.validate(),
            Err(PngEncodeErrors::InvalidStride(6))
        ));

        let too_small = FloatImage::new(&data, Rect::from_dimensions(4, 4), 3);
        assert!(matches!(
            too_small.validate(),
            Err(PngEncodeErrors::TooSmallInput(48, 16))
        ));
    }
}
