/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::cmd_args::arg_parsers::{parse_origin, IChannels, IDepth, IStrategy};

pub mod arg_parsers;
pub mod help_strings;

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("fpng")
        .about("Write floating point images as 8 or 16 bit png files")
        .after_help(help_strings::AFTER_HELP)
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input PFM file to read data from")
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Png file to write the data to")
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the encoding options"))
        .arg(Arg::new("depth")
            .long("depth")
            .help_heading("ENCODING")
            .help("Bit depth of the written png")
            .value_parser(value_parser!(IDepth))
            .default_value("8"))
        .arg(Arg::new("strategy")
            .long("strategy")
            .help_heading("ENCODING")
            .help("Deflate compression strategy")
            .value_parser(value_parser!(IStrategy))
            .default_value("default"))
        .arg(Arg::new("level")
            .long("level")
            .help_heading("ENCODING")
            .help("Compression level, 0 stores and 9 compresses best")
            .value_parser(value_parser!(u8).range(0..=9))
            .default_value("6"))
        .arg(Arg::new("no-dither")
            .long("no-dither")
            .action(ArgAction::SetTrue)
            .help_heading("ENCODING")
            .help("Do not dither 8 bit output"))
        .arg(Arg::new("seed")
            .long("seed")
            .help_heading("ENCODING")
            .help("Seed of the dither generator")
            .value_parser(value_parser!(u32))
            .default_value("1"))
        .arg(Arg::new("channels")
            .long("channels")
            .help_heading("ENCODING")
            .help("Channel layout of the written png, defaults to the input layout")
            .value_parser(value_parser!(IChannels)))
        .arg(Arg::new("start-channel")
            .long("start-channel")
            .help_heading("ENCODING")
            .help("First input channel written to the png")
            .value_parser(value_parser!(usize))
            .default_value("0"))
        .arg(Arg::new("colorspace")
            .long("colorspace")
            .help_heading("METADATA")
            .help("Name of the output colour space, known names add gamma or sRGB chunks")
            .long_help(help_strings::COLORSPACE_HELP))
        .arg(Arg::new("available-colorspaces")
            .long("available-colorspaces")
            .help_heading("METADATA")
            .help("Comma separated colour spaces of the colour config, used to pick one when --colorspace is absent")
            .value_delimiter(',')
            .action(ArgAction::Append))
        .arg(Arg::new("pixel-aspect")
            .long("pixel-aspect")
            .help_heading("METADATA")
            .help("Pixel aspect ratio, pixel width divided by pixel height")
            .value_parser(value_parser!(f32))
            .default_value("1.0"))
        .arg(Arg::new("origin")
            .long("origin")
            .help_heading("METADATA")
            .help("Image origin in pixels as X,Y")
            .value_parser(parse_origin)
            .allow_hyphen_values(true)
            .default_value("0,0"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print a json summary of every written file"))
}
