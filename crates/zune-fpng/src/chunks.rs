/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Png chunk layout and the payloads of the chunks we write
//!
//! Every chunk is laid out as
//! `length - chunk type - [data] - crc`, with the crc covering
//! type and data.
use std::io::Write;

use log::trace;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::crc::calc_crc_with_bytes;
use crate::error::PngEncodeErrors;
use crate::metadata::{
    ColorMetadata, ImageMetadata, PhysicalDensity, PixelOffset, SRGB_INTENT_ABSOLUTE
};

/// The eight bytes starting every png
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Gamma written alongside an sRGB chunk
pub const SRGB_GAMMA: u32 = 45455;

/// Chromaticities of the sRGB primaries and D65 white point, scaled by 100000
///
/// Order is white x,y then red, green and blue x,y
pub const SRGB_CHROMATICITIES: [u32; 8] = [
    31270, 32900, 64000, 33000, 30000, 60000, 15000, 6000
];

/// Colour space of a png pixel with `components` components
pub fn colorspace_from_components(components: usize) -> Result<ColorSpace, PngEncodeErrors> {
    match components {
        1 => Ok(ColorSpace::Luma),
        2 => Ok(ColorSpace::LumaA),
        3 => Ok(ColorSpace::RGB),
        4 => Ok(ColorSpace::RGBA),
        _ => Err(PngEncodeErrors::UnsupportedComponents(components))
    }
}

/// Colour type stored in the IHDR chunk
pub fn png_color_type(colorspace: ColorSpace) -> Result<u8, PngEncodeErrors> {
    match colorspace {
        ColorSpace::Luma => Ok(0),
        ColorSpace::RGB => Ok(2),
        ColorSpace::LumaA => Ok(4),
        ColorSpace::RGBA => Ok(6),
        _ => Err(PngEncodeErrors::UnsupportedColorspace(colorspace))
    }
}

/// Bit depth stored in the IHDR chunk
pub fn png_bit_depth(depth: BitDepth) -> Result<u8, PngEncodeErrors> {
    match depth {
        BitDepth::Eight => Ok(8),
        BitDepth::Sixteen => Ok(16),
        _ => Err(PngEncodeErrors::UnsupportedDepth(depth))
    }
}

/// Contents of the IHDR chunk
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageHeader {
    pub width:      u32,
    pub height:     u32,
    pub depth:      BitDepth,
    pub colorspace: ColorSpace
}

impl ImageHeader {
    /// Check that png can store this depth and colour space
    pub fn validate(&self) -> Result<(), PngEncodeErrors> {
        png_bit_depth(self.depth)?;
        png_color_type(self.colorspace)?;
        Ok(())
    }
    /// Size of one unfiltered scanline in bytes
    pub fn scanline_size(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }
    /// Distance in bytes between a byte and the corresponding byte
    /// of the previous pixel, used by filters
    pub fn bytes_per_pixel(&self) -> usize {
        self.colorspace.num_components() * self.depth.size_of()
    }
}

/// Write a complete chunk, returning the number of bytes written
pub fn write_chunk<W: Write>(
    writer: &mut W, name: &[u8; 4], data: &[u8]
) -> Result<usize, PngEncodeErrors> {
    let length = u32::try_from(data.len())
        .map_err(|_| PngEncodeErrors::EncoderFault("chunk data too large"))?;

    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc
    let crc = calc_crc_with_bytes(name, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);

    writer.write_all(&length.to_be_bytes())?;
    writer.write_all(name)?;
    writer.write_all(data)?;
    writer.write_all(&crc.to_be_bytes())?;

    trace!(
        "Wrote {} chunk with {} bytes",
        String::from_utf8_lossy(name),
        data.len()
    );
    Ok(data.len() + 12)
}

pub fn ihdr_payload(header: &ImageHeader) -> Result<[u8; 13], PngEncodeErrors> {
    let mut out = [0; 13];
    out[0..4].copy_from_slice(&header.width.to_be_bytes());
    out[4..8].copy_from_slice(&header.height.to_be_bytes());
    out[8] = png_bit_depth(header.depth)?;
    out[9] = png_color_type(header.colorspace)?;
    // compression method, filter method and interlace method are all 0
    Ok(out)
}

pub fn gama_payload(scaled_gamma: u32) -> [u8; 4] {
    scaled_gamma.to_be_bytes()
}

pub fn chrm_payload(chromaticities: &[u32; 8]) -> [u8; 32] {
    let mut out = [0; 32];
    for (dst, value) in out.chunks_exact_mut(4).zip(chromaticities) {
        dst.copy_from_slice(&value.to_be_bytes());
    }
    out
}

pub fn phys_payload(density: &PhysicalDensity) -> [u8; 9] {
    let mut out = [0; 9];
    out[0..4].copy_from_slice(&density.x_pixels_per_meter.to_be_bytes());
    out[4..8].copy_from_slice(&density.y_pixels_per_meter.to_be_bytes());
    // unit is the metre
    out[8] = 1;
    out
}

pub fn offs_payload(offset: &PixelOffset) -> [u8; 9] {
    let mut out = [0; 9];
    out[0..4].copy_from_slice(&offset.x.to_be_bytes());
    out[4..8].copy_from_slice(&offset.y.to_be_bytes());
    // unit is the pixel
    out[8] = 0;
    out
}

/// Write the signature and the IHDR chunk
pub fn write_header<W: Write>(
    writer: &mut W, header: &ImageHeader
) -> Result<usize, PngEncodeErrors> {
    writer.write_all(&PNG_SIGNATURE)?;
    let written = write_chunk(writer, b"IHDR", &ihdr_payload(header)?)?;
    Ok(PNG_SIGNATURE.len() + written)
}

/// Write colour, offset and density chunks, in the order libpng writes them
pub fn write_metadata<W: Write>(
    writer: &mut W, metadata: &ImageMetadata
) -> Result<usize, PngEncodeErrors> {
    let mut written = 0;

    match metadata.color {
        Some(ColorMetadata::Srgb) => {
            written += write_chunk(writer, b"gAMA", &gama_payload(SRGB_GAMMA))?;
            written += write_chunk(writer, b"sRGB", &[SRGB_INTENT_ABSOLUTE])?;
            written += write_chunk(writer, b"cHRM", &chrm_payload(&SRGB_CHROMATICITIES))?;
        }
        Some(ColorMetadata::Gamma(preset)) => {
            written += write_chunk(writer, b"gAMA", &gama_payload(preset.scaled()))?;
        }
        None => ()
    }
    written += write_chunk(writer, b"oFFs", &offs_payload(&metadata.offset))?;
    written += write_chunk(writer, b"pHYs", &phys_payload(&metadata.density))?;

    Ok(written)
}
