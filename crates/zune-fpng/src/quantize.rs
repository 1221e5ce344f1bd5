/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Float to integer sample quantization

/// Convert a float sample to an integer in `0..LEVELS`
///
/// The sample is clamped to `0.0..=1.0`, scaled by `LEVELS - 1` and
/// rounded to the nearest integer. NaN maps to zero.
///
/// # Example
/// ```
/// use zune_fpng::quantize::quantize;
/// assert_eq!(quantize::<256>(0.0), 0);
/// assert_eq!(quantize::<256>(1.0), 255);
/// assert_eq!(quantize::<65536>(2.0), 65535);
/// ```
#[inline(always)]
pub fn quantize<const LEVELS: u32>(value: f32) -> u32 {
    let max = (LEVELS - 1) as f32;
    // float to int casts saturate and send NaN to zero
    (value.clamp(0.0, 1.0) * max + 0.5) as u32
}

/// Quantize a sample to eight bits
#[inline(always)]
pub fn quantize_u8(value: f32) -> u8 {
    quantize::<256>(value) as u8
}

/// Quantize a sample to sixteen bits
#[inline(always)]
pub fn quantize_u16(value: f32) -> u16 {
    quantize::<65536>(value) as u16
}
