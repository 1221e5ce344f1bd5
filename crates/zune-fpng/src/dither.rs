/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Deterministic noise for ordered dithering of 8 bit output
//!
//! Noise comes from Bob Jenkins' `lookup3` mixing function (public domain),
//! see <http://burtleburtle.net/bob/c/lookup3.c>.
//!
//! Each scanline starts a new stream seeded from the row index and a global
//! seed, the stream is then advanced once per source channel of every pixel,
//! so the noise for a sample depends only on `(seed, row, column, channel)`.

/// Strength of the perturbation, the size of one 8 bit quantization step
pub const DITHER_AMPLITUDE: f32 = 1.0 / 255.0;

/// Map 32 random bits to `0.0..1.0`
///
/// Only the top 24 bits are kept, every one of them is exact in an `f32`
/// so the result never rounds up to `1.0`.
#[inline(always)]
fn unit_interval(bits: u32) -> f32 {
    (bits >> 8) as f32 * (1.0 / 16_777_216.0)
}

/// Mix up the bits of a, b and c
#[inline(always)]
fn bjmix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);

    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);

    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);

    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);

    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);

    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

/// Noise stream for one scanline
#[derive(Clone, Debug)]
pub struct ScanlineDither {
    a: u32,
    b: u32,
    c: u32
}

impl ScanlineDither {
    /// Start the stream for scanline `row`
    pub const fn new(row: u32, seed: u32) -> ScanlineDither {
        ScanlineDither {
            a: row,
            b: seed,
            c: 0
        }
    }

    /// Advance the stream by one sample, returning a value in `0.0..1.0`
    #[inline(always)]
    pub fn next_value(&mut self) -> f32 {
        bjmix(&mut self.a, &mut self.b, &mut self.c);
        let value = unit_interval(self.c);
        self.c = self.c.wrapping_add(1);
        value
    }

    /// Advance the stream and return the offset to add to a sample
    #[inline(always)]
    pub fn next_offset(&mut self) -> f32 {
        DITHER_AMPLITUDE * (self.next_value() - 0.5)
    }
}

/// Index of the alpha channel in a source pixel, if any
///
/// Only four component sources are treated as carrying alpha,
/// the alpha sample is never perturbed.
pub const fn source_alpha_channel(source_components: usize) -> Option<usize> {
    if source_components == 4 {
        Some(3)
    } else {
        None
    }
}
