/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encoder options
//!
//! The options here control how float samples end up in the written
//! png, bit depth, dithering, compression and colour metadata.
use zune_core::bit_depth::BitDepth;

use crate::chunks::png_bit_depth;
use crate::error::PngEncodeErrors;

/// Strategy used by the deflate compressor
///
/// The strategy only affects the compression ratio,
/// output is valid png regardless of which one is used
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum CompressionStrategy {
    /// Use this for normal data
    #[default]
    Default,
    /// Use this for data produced by a filter (or predictor)
    Filtered,
    /// Forces huffman encoding only (no string match)
    HuffmanOnly,
    /// Limit match distances to one (run-length encoding)
    Rle,
    /// Prevents the use of dynamic huffman codes
    Fixed
}

impl CompressionStrategy {
    /// The numeric strategy value understood by zlib style compressors
    pub const fn to_int(self) -> i32 {
        match self {
            Self::Default => 0,
            Self::Filtered => 1,
            Self::HuffmanOnly => 2,
            Self::Rle => 3,
            Self::Fixed => 4
        }
    }
}

/// Default zlib compression level
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Default seed for the dither generator
pub const DEFAULT_DITHER_SEED: u32 = 1;

/// Options for encoding a float buffer to png
///
/// Options are set with builder style `set_*` functions
///
/// # Example
/// ```
/// use zune_fpng::zune_core::bit_depth::BitDepth;
/// use zune_fpng::{CompressionStrategy, EncodeOptions};
///
/// let options = EncodeOptions::default()
///     .set_depth(BitDepth::Sixteen)
///     .set_strategy(CompressionStrategy::Rle)
///     .set_compression_level(9)
///     .set_colorspace("Linear");
/// assert_eq!(options.depth(), BitDepth::Sixteen);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodeOptions {
    components:        usize,
    start_component:   usize,
    depth:             BitDepth,
    compression_level: u8,
    strategy:          CompressionStrategy,
    dither:            bool,
    dither_seed:       u32,
    colorspace:        String
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            components:        4,
            start_component:   0,
            depth:             BitDepth::Eight,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            strategy:          CompressionStrategy::Default,
            dither:            true,
            dither_seed:       DEFAULT_DITHER_SEED,
            colorspace:        String::new()
        }
    }
}

impl EncodeOptions {
    /// Number of components per pixel in the written png
    pub const fn components(&self) -> usize {
        self.components
    }
    /// Index of the first source component written to the png
    pub const fn start_component(&self) -> usize {
        self.start_component
    }
    /// Output sample depth
    pub const fn depth(&self) -> BitDepth {
        self.depth
    }
    /// Deflate compression level, between 0 and 9
    pub const fn compression_level(&self) -> u8 {
        self.compression_level
    }
    /// Deflate compression strategy
    pub const fn strategy(&self) -> CompressionStrategy {
        self.strategy
    }
    /// Whether dithering is requested.
    ///
    /// See [`dither_active`](Self::dither_active) for whether it will actually run
    pub const fn dither(&self) -> bool {
        self.dither
    }
    /// Whether dithering will be applied, it only runs for 8 bit output
    pub const fn dither_active(&self) -> bool {
        self.dither && matches!(self.depth, BitDepth::Eight)
    }
    /// Seed of the dither generator
    pub const fn dither_seed(&self) -> u32 {
        self.dither_seed
    }
    /// Name of the output colour space, may be empty
    pub fn colorspace(&self) -> &str {
        &self.colorspace
    }

    /// Set number of components of the written png
    ///
    /// 1 is grayscale, 2 grayscale with alpha, 3 RGB and 4 RGBA.
    /// Other values are rejected when encoding
    pub fn set_components(mut self, components: usize) -> Self {
        self.components = components;
        self
    }
    /// Set the source component that becomes the first png channel
    pub fn set_start_component(mut self, start: usize) -> Self {
        self.start_component = start;
        self
    }
    /// Set output depth
    ///
    /// Png stores 8 or 16 bit samples, other depths are rejected when encoding
    pub fn set_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }
    /// Set compression level
    ///
    /// 0 stores data uncompressed, 1 is fastest and 9 compresses best.
    /// Values above 9 are rejected when encoding
    pub fn set_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }
    /// Set compression strategy
    pub fn set_strategy(mut self, strategy: CompressionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
    /// Enable or disable dithering for 8 bit output
    pub fn set_dither(mut self, yes: bool) -> Self {
        self.dither = yes;
        self
    }
    /// Set seed used by the dither generator
    pub fn set_dither_seed(mut self, seed: u32) -> Self {
        self.dither_seed = seed;
        self
    }
    /// Set the name of the output colour space
    ///
    /// Known names result in gamma or sRGB chunks, see
    /// [`ColorMetadata::from_colorspace_name`](crate::ColorMetadata::from_colorspace_name)
    pub fn set_colorspace(mut self, name: &str) -> Self {
        self.colorspace = name.to_string();
        self
    }

    /// Check options that can be checked without an image
    pub(crate) fn validate(&self) -> Result<(), PngEncodeErrors> {
        if !(1..=4).contains(&self.components) {
            return Err(PngEncodeErrors::UnsupportedComponents(self.components));
        }
        png_bit_depth(self.depth)?;
        if self.compression_level > 9 {
            return Err(PngEncodeErrors::InvalidCompressionLevel(
                self.compression_level
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_defaults() {
        let options = EncodeOptions::default();
        assert_eq!(options.depth(), BitDepth::Eight);
        assert_eq!(options.compression_level(), 6);
        assert_eq!(options.strategy(), CompressionStrategy::Default);
        assert!(options.dither());
        assert!(options.dither_active());
        assert_eq!(options.dither_seed(), 1);
        assert_eq!(options.colorspace(), "");
    }

    #[test]
    fn dither_is_inactive_for_sixteen_bit() {
        let options = EncodeOptions::default().set_depth(BitDepth::Sixteen);
        assert!(options.dither());
        assert!(!options.dither_active());
    }

    #[test]
    fn validate_rejects_bad_components_and_levels() {
        for comps in [0, 5, 8] {
            let err = EncodeOptions::default()
                .set_components(comps)
                .validate()
                .unwrap_err();
            assert!(matches!(err, PngEncodeErrors::UnsupportedComponents(c) if c == comps));
        }
        for comps in 1..=4 {
            EncodeOptions::default()
                .set_components(comps)
                .validate()
                .unwrap();
        }
        let err = EncodeOptions::default()
            .set_compression_level(10)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PngEncodeErrors::InvalidCompressionLevel(10)));
    }

    #[test]
    fn validate_rejects_depths_png_cannot_store() {
        let err = EncodeOptions::default()
            .set_depth(BitDepth::Twelve)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PngEncodeErrors::UnsupportedDepth(BitDepth::Twelve)));
        assert!(!EncodeOptions::default()
            .set_depth(BitDepth::Twelve)
            .dither_active());
    }
}
