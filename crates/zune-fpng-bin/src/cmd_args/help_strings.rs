/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub static COLORSPACE_HELP: &str = "Set the name of the output colour space

Names are matched exactly against well known colour config names.
sRGB names (sRGB, sRGB D65, rrt_srgb, srgb8 ...) write sRGB, gAMA and cHRM chunks,
gamma names (Gamma1.8, Gamma2.2, vd16, Linear, lnf ...) write a gAMA chunk.
Unknown names write no colour metadata.";

pub static AFTER_HELP: &str = "Input rows are read bottom to top, as PFM stores them.

Example:
    fpng -i render.pfm -o render.png --depth 16 --colorspace Linear";
