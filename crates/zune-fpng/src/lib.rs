/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png writer for floating point images
//!
//! This crate takes a buffer of `f32` samples in the `0.0..=1.0` range,
//! as produced by renderers and compositors, and writes it as an 8 or 16 bit
//! png with one to four components.
//!
//! # Features
//! - 8 and 16 bit output, 16 bit samples are always written big endian
//! - Deterministic dithering for 8 bit output, the source is never modified
//! - Component subsets, e.g. write the alpha channel of an RGBA buffer as grey
//! - Padded source rows
//! - Colour space tagging (`sRGB`, `gAMA`, `cHRM`), pixel density (`pHYs`)
//!   and origin (`oFFs`) metadata
//! - Adaptive row filtering and configurable zlib compression
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! zune-fpng = "0.1"
//! ```
//!
//! #### Encode to a vector
//! Rows in the source buffer are bottom-up, the first row in memory is
//! the bottom row of the picture.
//!
//! ```
//! use zune_fpng::{EncodeOptions, FloatImage, PngEncoder, Rect};
//!
//! let pixels = vec![0.5_f32; 16 * 8 * 3];
//! let image = FloatImage::new(&pixels, Rect::from_dimensions(16, 8), 3);
//!
//! let options = EncodeOptions::default()
//!     .set_components(3)
//!     .set_colorspace("sRGB");
//!
//! let png = PngEncoder::new(image, options).encode_to_vec()?;
//! # Ok::<(), zune_fpng::PngEncodeErrors>(())
//! ```
//!
//! #### Encode to a file
//! If writing fails part way, the partially written file is removed.
//!
//! ```no_run
//! use zune_fpng::zune_core::bit_depth::BitDepth;
//! use zune_fpng::{encode_to_file, EncodeOptions, FloatImage, Rect};
//!
//! let pixels = vec![0.5_f32; 16 * 8 * 4];
//! let image = FloatImage::new(&pixels, Rect::from_dimensions(16, 8), 4);
//! let options = EncodeOptions::default().set_depth(BitDepth::Sixteen);
//!
//! encode_to_file("out.png", image, &options)?;
//! # Ok::<(), zune_fpng::PngEncodeErrors>(())
//! ```
//!
//! # Lower level access
//! [`session::EncodeSession`] writes a png from already packed scanlines,
//! and [`colorspace::choose_output_colorspace`] picks a default output
//! colour space for a bit depth.
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate

pub use colorspace::choose_output_colorspace;
pub use encoder::{encode_to_file, encode_to_writer, PngEncoder};
pub use error::{EncodeStatus, PngEncodeErrors};
pub use image::{FloatImage, Rect};
pub use metadata::{ColorMetadata, GammaPreset};
pub use options::{CompressionStrategy, EncodeOptions};
pub use session::FinishedSession;
pub use zune_core;

pub mod chunks;
pub mod colorspace;
mod convert;
mod crc;
mod deflate;
pub mod dither;
mod encoder;
mod endian;
pub mod error;
mod filters;
mod image;
pub mod metadata;
mod options;
pub mod quantize;
pub mod session;
