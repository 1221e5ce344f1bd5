/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Picking a default output colour space
//!
//! Colour management configs name the same colour space differently, this
//! picks the first well known name a config provides for the written depth.
//! Applying the result is left to the caller.
use zune_core::bit_depth::BitDepth;

/// Preferred names for 8 bit output, in order of preference
pub const EIGHT_BIT_PREFERENCES: [&str; 4] = [
    "sRGB",     // nuke-default
    "sRGB D65", // blender-cycles
    "rrt_srgb", // aces
    "srgb8"     // spi-vfx
];

/// Preferred names for 16 bit output, in order of preference
pub const SIXTEEN_BIT_PREFERENCES: [&str; 7] = [
    "Rec709",                  // nuke-default
    "nuke_rec709",             // blender
    "Rec.709 - Full",          // aces 1.0.0
    "out_rec709full",          // aces 1.0.0
    "rrt_rec709_full_100nits", // aces 0.7.1
    "rrt_rec709",              // aces 0.1.1
    "hd10"                     // spi-anim and spi-vfx
];

/// Choose an output colour space for `depth` among `available` names
///
/// Returns `None` when no preferred name is available or png cannot
/// store `depth`, in which case the current colour space should be kept.
///
/// # Example
/// ```
/// use zune_fpng::choose_output_colorspace;
/// use zune_fpng::zune_core::bit_depth::BitDepth;
///
/// let config = ["linear", "srgb8", "rrt_srgb"];
/// assert_eq!(choose_output_colorspace(BitDepth::Eight, &config), Some("rrt_srgb"));
/// assert_eq!(choose_output_colorspace(BitDepth::Sixteen, &config), None);
/// ```
pub fn choose_output_colorspace<'a, S: AsRef<str>>(
    depth: BitDepth, available: &'a [S]
) -> Option<&'a str> {
    let preferences: &[&str] = match depth {
        BitDepth::Eight => &EIGHT_BIT_PREFERENCES,
        BitDepth::Sixteen => &SIXTEEN_BIT_PREFERENCES,
        _ => return None
    };
    preferences.iter().find_map(|wanted| {
        available
            .iter()
            .map(|name| name.as_ref())
            .find(|name| *name == *wanted)
    })
}
