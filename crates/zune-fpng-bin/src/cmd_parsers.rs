/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::info;
use zune_fpng::zune_core::bit_depth::BitDepth;
use zune_fpng::{choose_output_colorspace, EncodeOptions};

use crate::cmd_args::arg_parsers::{IDepth, IStrategy};

pub mod global_options;

/// Build encoder options from the command line
///
/// The component count is left at its default, it depends on the input
pub fn get_encode_options(options: &ArgMatches) -> EncodeOptions {
    let depth = options
        .get_one::<IDepth>("depth")
        .map_or(BitDepth::Eight, |x| x.to_depth());

    let mut encode_options = EncodeOptions::default()
        .set_depth(depth)
        .set_dither(!options.get_flag("no-dither"));

    if let Some(strategy) = options.get_one::<IStrategy>("strategy") {
        encode_options = encode_options.set_strategy(strategy.to_strategy());
    }
    if let Some(level) = options.get_one::<u8>("level") {
        encode_options = encode_options.set_compression_level(*level);
    }
    if let Some(seed) = options.get_one::<u32>("seed") {
        encode_options = encode_options.set_dither_seed(*seed);
    }
    if let Some(start) = options.get_one::<usize>("start-channel") {
        encode_options = encode_options.set_start_component(*start);
    }

    if let Some(colorspace) = options.get_one::<String>("colorspace") {
        encode_options = encode_options.set_colorspace(colorspace);
    } else if let Some(available) = options.get_many::<String>("available-colorspaces") {
        let available: Vec<&String> = available.collect();

        match choose_output_colorspace(depth, &available) {
            Some(chosen) => {
                info!("Choosing {chosen:?} as output colour space");
                encode_options = encode_options.set_colorspace(chosen);
            }
            None => info!("No preferred colour space available, writing no colour metadata")
        }
    }
    encode_options
}
