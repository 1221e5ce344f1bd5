/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors returned by the encoder
use core::fmt::{Debug, Display, Formatter};

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

/// Coarse outcome of a failed encode
///
/// Host applications usually only need to know whether
/// the caller handed us something we cannot write or whether
/// writing itself failed, this carries that distinction
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncodeStatus {
    /// The image geometry or the requested options are invalid.
    ///
    /// Nothing was written when this is returned
    BadParameters,
    /// An I/O or compressor fault occurred while writing
    Failed
}

/// Errors that may occur while encoding a png
pub enum PngEncodeErrors {
    /// Destination component count is not one of 1,2,3 or 4
    UnsupportedComponents(usize),
    /// Png samples can only be 8 or 16 bits deep
    UnsupportedDepth(BitDepth),
    /// Png has no colour type for this colour space
    UnsupportedColorspace(ColorSpace),
    /// Component start index does not select any source channel
    ///
    /// Contains the start index and the source component count
    InvalidComponentStart(usize, usize),
    /// Width or height is zero, negative or too large for png
    InvalidDimensions(i64, i64),
    /// Source buffer is smaller than its geometry demands
    ///
    /// Contains expected and found number of samples
    TooSmallInput(usize, usize),
    /// Row stride in bytes cannot address the rows of the image
    InvalidStride(usize),
    /// Compression level outside 0..=9
    InvalidCompressionLevel(u8),
    /// Session methods were called out of order
    InvalidState(&'static str),
    /// The session finished before every row was written
    ///
    /// Contains expected and written rows
    RowCountMismatch(usize, usize),
    /// The compressor reported an internal fault
    EncoderFault(&'static str),
    /// Writing to the sink failed
    IoErrors(std::io::Error)
}

impl PngEncodeErrors {
    /// Return the coarse status of this error
    pub const fn status(&self) -> EncodeStatus {
        match self {
            Self::UnsupportedComponents(_)
            | Self::UnsupportedDepth(_)
            | Self::UnsupportedColorspace(_)
            | Self::InvalidComponentStart(_, _)
            | Self::InvalidDimensions(_, _)
            | Self::TooSmallInput(_, _)
            | Self::InvalidStride(_)
            | Self::InvalidCompressionLevel(_) => EncodeStatus::BadParameters,
            Self::InvalidState(_)
            | Self::RowCountMismatch(_, _)
            | Self::EncoderFault(_)
            | Self::IoErrors(_) => EncodeStatus::Failed
        }
    }
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedComponents(comps) => {
                write!(
                    f,
                    "PNG can only write 1,2,3 or 4 component images, requested {comps} components"
                )
            }
            Self::UnsupportedDepth(depth) => {
                write!(f, "PNG can only write 8 or 16 bit samples, requested {depth:?}")
            }
            Self::UnsupportedColorspace(colorspace) => {
                write!(f, "PNG cannot write images in the {colorspace:?} colorspace")
            }
            Self::InvalidComponentStart(start, comps) => {
                write!(
                    f,
                    "Component start {start} is out of range for a source with {comps} components"
                )
            }
            Self::InvalidDimensions(width, height) => {
                write!(f, "Invalid image dimensions {width}x{height}")
            }
            Self::TooSmallInput(expected, found) => {
                write!(
                    f,
                    "Too small input, expected a buffer with at least {expected} samples but found {found}"
                )
            }
            Self::InvalidStride(stride) => {
                write!(f, "Invalid row stride of {stride} bytes")
            }
            Self::InvalidCompressionLevel(level) => {
                write!(f, "Compression level {level} is not in range 0..=9")
            }
            Self::InvalidState(msg) => write!(f, "Invalid encoder state: {msg}"),
            Self::RowCountMismatch(expected, found) => {
                write!(f, "Expected {expected} rows to be written but got {found}")
            }
            Self::EncoderFault(msg) => write!(f, "PNG library error: {msg}"),
            Self::IoErrors(err) => write!(f, "I/O error: {err}")
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for PngEncodeErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<std::io::Error> for PngEncodeErrors {
    fn from(err: std::io::Error) -> Self {
        Self::IoErrors(err)
    }
}
