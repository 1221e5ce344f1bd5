/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use zune_fpng::EncodeOptions;

use crate::cmd_args::arg_parsers::IChannels;
use crate::cmd_parsers::get_encode_options;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub encode:       EncodeOptions,
    /// Output channel layout, `None` keeps the input layout
    pub channels:     Option<IChannels>,
    pub pixel_aspect: f32,
    pub origin:       (i32, i32),
    pub probe:        bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            encode:       EncodeOptions::default(),
            channels:     None,
            pixel_aspect: 1.0,
            origin:       (0, 0),
            probe:        false
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    cmd_options.encode = get_encode_options(options);
    cmd_options.channels = options.get_one::<IChannels>("channels").copied();

    if let Some(ratio) = options.get_one::<f32>("pixel-aspect") {
        cmd_options.pixel_aspect = *ratio;
    }
    if let Some(origin) = options.get_one::<(i32, i32)>("origin") {
        cmd_options.origin = *origin;
    }
    if options.get_flag("probe") {
        info!("Printing summaries of written files");
        cmd_options.probe = true;
    }
    info!("Encode options: {:?}", cmd_options.encode);

    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn metadata_flags() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "fpng",
                "-i",
                "in.pfm",
                "-o",
                "out.png",
                "--channels",
                "luma-alpha",
                "--pixel-aspect",
                "2",
                "--origin",
                "-4,9",
                "--probe"
            ])
            .unwrap();
        let options = parse_options(&matches);

        assert_eq!(options.channels, Some(IChannels::LumaA));
        assert_eq!(options.pixel_aspect, 2.0);
        assert_eq!(options.origin, (-4, 9));
        assert!(options.probe);
    }

    #[test]
    fn metadata_defaults() {
        let matches = create_cmd_args()
            .try_get_matches_from(["fpng", "-i", "in.pfm", "-o", "out.png"])
            .unwrap();
        let options = parse_options(&matches);

        assert_eq!(options.channels, None);
        assert_eq!(options.pixel_aspect, 1.0);
        assert_eq!(options.origin, (0, 0));
        assert!(!options.probe);
    }
}
