/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use zune_fpng::chunks::png_bit_depth;
use zune_fpng::{ColorMetadata, EncodeOptions, GammaPreset};

/// Summary of a written png, printed by `--probe`
pub struct EncodeSummary<'a> {
    file:          OsString,
    width:         usize,
    height:        usize,
    options:       &'a EncodeOptions,
    bytes_written: usize
}

impl<'a> EncodeSummary<'a> {
    pub fn new(
        file: OsString, width: usize, height: usize, options: &'a EncodeOptions,
        bytes_written: usize
    ) -> EncodeSummary<'a> {
        EncodeSummary {
            file,
            width,
            height,
            options,
            bytes_written
        }
    }
}

fn color_metadata_name(colorspace: &str) -> Option<&'static str> {
    ColorMetadata::from_colorspace_name(colorspace).map(|x| match x {
        ColorMetadata::Srgb => "sRGB",
        ColorMetadata::Gamma(GammaPreset::Gamma18) => "gamma 1.8",
        ColorMetadata::Gamma(GammaPreset::Gamma22) => "gamma 2.2",
        ColorMetadata::Gamma(GammaPreset::Linear) => "linear"
    })
}

impl<'a> Serialize for EncodeSummary<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("EncodeSummary", 10)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("components", &self.options.components())?;
        state.serialize_field("depth", &png_bit_depth(self.options.depth()).ok())?;
        state.serialize_field("dithered", &self.options.dither_active())?;
        state.serialize_field("compression_level", &self.options.compression_level())?;
        state.serialize_field("colorspace", &self.options.colorspace())?;
        state.serialize_field(
            "color_metadata",
            &color_metadata_name(self.options.colorspace())
        )?;
        state.serialize_field("bytes_written", &self.bytes_written)?;

        state.end()
    }
}
