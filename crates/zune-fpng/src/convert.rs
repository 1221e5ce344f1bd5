/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Float image to packed png sample conversion
//!
//! The converter walks the source rows in memory order, picks the
//! requested source components, optionally dithers them and quantizes
//! them into a tightly packed scratch buffer. The source is never written to,
//! dithering happens on the sample as it is read.
use log::trace;
use zune_core::bit_depth::BitDepth;

use crate::dither::{source_alpha_channel, ScanlineDither};
use crate::endian::normalize_to_big_endian;
use crate::error::PngEncodeErrors;
use crate::image::FloatImage;
use crate::options::EncodeOptions;
use crate::quantize::{quantize_u16, quantize_u8};

/// Storage for converted samples
#[derive(Clone, Debug)]
enum Samples {
    U8(Vec<u8>),
    /// Big endian samples, as png wants them
    U16(Vec<u16>)
}

/// Converted image, rows are in the same order as the source rows
#[derive(Clone, Debug)]
pub struct ScratchBuffer {
    samples:     Samples,
    row_samples: usize,
    height:      usize
}

impl ScratchBuffer {
    /// Number of rows held
    pub const fn height(&self) -> usize {
        self.height
    }
    /// Size of a single row in bytes
    pub fn row_bytes(&self) -> usize {
        match self.samples {
            Samples::U8(_) => self.row_samples,
            Samples::U16(_) => self.row_samples * 2
        }
    }
    /// All rows as bytes, in png byte order
    pub fn as_bytes(&self) -> &[u8] {
        match &self.samples {
            Samples::U8(data) => data,
            Samples::U16(data) => bytemuck::cast_slice(data)
        }
    }
    /// Bytes of row `row`, counted in source memory order
    pub fn scanline(&self, row: usize) -> &[u8] {
        let size = self.row_bytes();
        &self.as_bytes()[row * size..(row + 1) * size]
    }
}

/// How source components map to destination components
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ComponentMapping {
    /// Components per source pixel
    pub source:      usize,
    /// First source component copied
    pub start:       usize,
    /// Components per destination pixel
    pub destination: usize,
    /// Number of components copied from the source
    pub copied:      usize
}

impl ComponentMapping {
    pub fn new(
        source: usize, start: usize, destination: usize
    ) -> Result<ComponentMapping, PngEncodeErrors> {
        if !(1..=4).contains(&destination) {
            return Err(PngEncodeErrors::UnsupportedComponents(destination));
        }
        if start >= source {
            return Err(PngEncodeErrors::InvalidComponentStart(start, source));
        }
        let copied = destination.min(source - start);

        Ok(ComponentMapping {
            source,
            start,
            destination,
            copied
        })
    }
    /// Whether the destination layout carries alpha as its last channel
    pub const fn destination_has_alpha(&self) -> bool {
        matches!(self.destination, 2 | 4)
    }
}

/// Values for destination channels that have no source component.
///
/// Alpha is fully opaque, colour channels are zero
fn fill_pixel<T: Copy>(mapping: &ComponentMapping, zero: T, opaque: T) -> [T; 4] {
    let mut fill = [zero; 4];
    if mapping.destination_has_alpha() {
        fill[mapping.destination - 1] = opaque;
    }
    fill
}

fn convert_rows<T: Copy>(
    image: &FloatImage, mapping: &ComponentMapping, dither_seed: Option<u32>, out: &mut [T],
    fill: [T; 4], quantize: fn(f32) -> T
) {
    let width = image.width();
    let row_samples = width * mapping.destination;
    let alpha = source_alpha_channel(mapping.source);
    let copy_range = mapping.start..mapping.start + mapping.copied;

    for (y, out_row) in out
        .chunks_exact_mut(row_samples)
        .take(image.height())
        .enumerate()
    {
        let in_row = image.row(y);

        // unfed channels keep their fill value
        for out_px in out_row.chunks_exact_mut(mapping.destination) {
            out_px.copy_from_slice(&fill[..mapping.destination]);
        }

        match dither_seed {
            None => {
                for (in_px, out_px) in in_row
                    .chunks_exact(mapping.source)
                    .zip(out_row.chunks_exact_mut(mapping.destination))
                {
                    for (dst, sample) in out_px.iter_mut().zip(&in_px[copy_range.clone()]) {
                        *dst = quantize(*sample);
                    }
                }
            }
            Some(seed) => {
                let mut noise = ScanlineDither::new(y as u32, seed);

                for (in_px, out_px) in in_row
                    .chunks_exact(mapping.source)
                    .zip(out_row.chunks_exact_mut(mapping.destination))
                {
                    // the stream advances for every source channel,
                    // used or not, so noise only depends on position
                    for (c, sample) in in_px.iter().enumerate() {
                        let offset = noise.next_offset();

                        if copy_range.contains(&c) {
                            let value = if Some(c) == alpha {
                                *sample
                            } else {
                                *sample + offset
                            };
                            out_px[c - mapping.start] = quantize(value);
                        }
                    }
                }
            }
        }
    }
}

/// Convert `image` into packed png samples according to `options`
///
/// Rows keep the source memory order, 16 bit samples are already
/// big endian in the returned buffer.
pub fn convert(
    image: &FloatImage, options: &EncodeOptions
) -> Result<ScratchBuffer, PngEncodeErrors> {
    image.validate()?;

    let mapping = ComponentMapping::new(
        image.components(),
        options.start_component(),
        options.components()
    )?;
    let row_samples = image.width() * mapping.destination;
    let total = row_samples
        .checked_mul(image.height())
        .ok_or(PngEncodeErrors::InvalidDimensions(
            image.bounds().width(),
            image.bounds().height()
        ))?;

    let dither_seed = options.dither_active().then_some(options.dither_seed());

    trace!(
        "Converting {}x{} image, mapping {:?}, dither seed {:?}",
        image.width(),
        image.height(),
        mapping,
        dither_seed
    );

    let samples = match options.depth() {
        BitDepth::Eight => {
            let mut out = vec![0_u8; total];
            let fill = fill_pixel(&mapping, 0, u8::MAX);
            convert_rows(image, &mapping, dither_seed, &mut out, fill, quantize_u8);
            Samples::U8(out)
        }
        BitDepth::Sixteen => {
            let mut out = vec![0_u16; total];
            let fill = fill_pixel(&mapping, 0, u16::MAX);
            convert_rows(image, &mapping, None, &mut out, fill, quantize_u16);

            for scanline in out.chunks_exact_mut(row_samples) {
                normalize_to_big_endian(scanline);
            }
            Samples::U16(out)
        }
        depth => return Err(PngEncodeErrors::UnsupportedDepth(depth))
    };

    Ok(ScratchBuffer {
        samples,
        row_samples,
        height: image.height()
    })
}
