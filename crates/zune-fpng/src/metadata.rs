/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Metadata embedded before the pixel data
//!
//! Colour metadata is decided from the name of the output colour space,
//! physical density from the pixel aspect ratio and the offset from the
//! image origin.
use crate::image::FloatImage;

/// sRGB rendering intent written in the sRGB chunk
pub const SRGB_INTENT_ABSOLUTE: u8 = 3;

/// Gamma values with an alias in the colour space table
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GammaPreset {
    /// Display gamma 1.8
    Gamma18,
    /// Display gamma 2.2
    Gamma22,
    /// Linear data
    Linear
}

impl GammaPreset {
    /// File gamma (the inverse of display gamma)
    pub fn file_gamma(self) -> f64 {
        match self {
            Self::Gamma18 => 1.0 / 1.8,
            Self::Gamma22 => 1.0 / 2.2,
            Self::Linear => 1.0
        }
    }
    /// Gamma as stored in a gAMA chunk, scaled by 100000
    pub fn scaled(self) -> u32 {
        scale_gamma(self.file_gamma())
    }
}

/// Scale a gamma value to its gAMA representation
pub fn scale_gamma(gamma: f64) -> u32 {
    (gamma * 100_000.0 + 0.5) as u32
}

/// Colour information embedded in the png
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorMetadata {
    /// Write an sRGB chunk plus the matching gAMA and cHRM chunks
    Srgb,
    /// Write a gAMA chunk
    Gamma(GammaPreset)
}

impl ColorMetadata {
    /// Map a colour space name to the metadata describing it
    ///
    /// Names are matched exactly, several config specific spellings map to the
    /// same metadata. Unknown names return `None`, in which case no colour metadata
    /// is written.
    ///
    /// # Example
    /// ```
    /// use zune_fpng::{ColorMetadata, GammaPreset};
    /// assert_eq!(ColorMetadata::from_colorspace_name("srgb8"), Some(ColorMetadata::Srgb));
    /// assert_eq!(
    ///     ColorMetadata::from_colorspace_name("lnf"),
    ///     Some(ColorMetadata::Gamma(GammaPreset::Linear))
    /// );
    /// assert_eq!(ColorMetadata::from_colorspace_name("Cineon"), None);
    /// ```
    pub fn from_colorspace_name(name: &str) -> Option<ColorMetadata> {
        match name {
            "sRGB" | "sRGB D65" | "sRGB (D60 sim.)" | "out_srgbd60sim" | "rrt_srgb" | "srgb8" => {
                Some(ColorMetadata::Srgb)
            }
            "Gamma1.8" => Some(ColorMetadata::Gamma(GammaPreset::Gamma18)),
            "Gamma2.2" | "vd8" | "vd10" | "vd16" | "VD16" => {
                Some(ColorMetadata::Gamma(GammaPreset::Gamma22))
            }
            "Linear" | "linear" | "ACES2065-1" | "aces" | "lnf" | "ln16" => {
                Some(ColorMetadata::Gamma(GammaPreset::Linear))
            }
            _ => None
        }
    }
}

/// Physical pixel density in pixels per metre
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PhysicalDensity {
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32
}

impl PhysicalDensity {
    /// Nominal horizontal resolution, in pixels per inch
    pub const REFERENCE_DPI: f32 = 100.0;

    /// Density for pixels with the given aspect ratio
    ///
    /// The horizontal density is the reference density, the vertical one
    /// is scaled by the aspect ratio. A ratio of zero is treated as square pixels.
    pub fn from_pixel_aspect(ratio: f32) -> PhysicalDensity {
        let inches_to_meters = 100.0_f32 / 2.54;
        let x_res = Self::REFERENCE_DPI;
        let y_res = x_res * if ratio != 0.0 { ratio } else { 1.0 };

        PhysicalDensity {
            x_pixels_per_meter: (x_res * inches_to_meters) as u32,
            y_pixels_per_meter: (y_res * inches_to_meters) as u32
        }
    }
}

/// Position of the image origin, in pixels
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32
}

/// Everything written ahead of the pixel data, apart from the header itself
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageMetadata {
    pub color:   Option<ColorMetadata>,
    pub density: PhysicalDensity,
    pub offset:  PixelOffset
}

impl ImageMetadata {
    /// Gather metadata for `image` written in colour space `colorspace`
    pub fn new(image: &FloatImage, colorspace: &str) -> ImageMetadata {
        let bounds = image.bounds();

        ImageMetadata {
            color:   ColorMetadata::from_colorspace_name(colorspace),
            density: PhysicalDensity::from_pixel_aspect(image.pixel_aspect()),
            offset:  PixelOffset {
                x: bounds.x1,
                y: bounds.y1
            }
        }
    }
}
