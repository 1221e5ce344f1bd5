/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::ArgMatches;
use log::{debug, info};
use zune_fpng::{encode_to_file, EncodeOptions, FloatImage, PngEncodeErrors, Rect};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::file_io::{read_pfm, PfmDecodeErrors, PfmImage};
use crate::serde::EncodeSummary;

pub enum WorkflowErrors {
    Decode(PfmDecodeErrors),
    Encode(PngEncodeErrors),
    Json(serde_json::Error),
    Generic(String)
}

impl Debug for WorkflowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => writeln!(f, "Could not read input: {err:?}"),
            Self::Encode(err) => {
                writeln!(f, "Could not write png ({:?}): {err}", err.status())
            }
            Self::Json(err) => writeln!(f, "Could not serialize summary: {err}"),
            Self::Generic(val) => writeln!(f, "{val}")
        }
    }
}

impl From<PfmDecodeErrors> for WorkflowErrors {
    fn from(value: PfmDecodeErrors) -> Self {
        Self::Decode(value)
    }
}

impl From<PngEncodeErrors> for WorkflowErrors {
    fn from(value: PngEncodeErrors) -> Self {
        Self::Encode(value)
    }
}

impl From<serde_json::Error> for WorkflowErrors {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Bounds of `image` placed at `origin`
fn image_bounds(image: &PfmImage, origin: (i32, i32)) -> Result<Rect, WorkflowErrors> {
    let too_large = || {
        WorkflowErrors::Generic(format!(
            "Image of {}x{} at {:?} does not fit png coordinates",
            image.width, image.height, origin
        ))
    };
    let width = i32::try_from(image.width).map_err(|_| too_large())?;
    let height = i32::try_from(image.height).map_err(|_| too_large())?;

    let x2 = origin.0.checked_add(width).ok_or_else(too_large)?;
    let y2 = origin.1.checked_add(height).ok_or_else(too_large)?;

    Ok(Rect::new(origin.0, origin.1, x2, y2))
}

/// Options for one input, the output layout defaults to the input layout
fn options_for_image(image: &PfmImage, cmd_opts: &CmdOptions) -> EncodeOptions {
    let components = cmd_opts
        .channels
        .map_or(image.components, |x| x.num_components());

    cmd_opts.encode.clone().set_components(components)
}

fn encode_file(
    in_file: &Path, out_file: &Path, cmd_opts: &CmdOptions
) -> Result<(), WorkflowErrors> {
    let start = Instant::now();
    let image = read_pfm(in_file)?;
    debug!("Reading {:?} took {:?}", in_file, start.elapsed());

    let options = options_for_image(&image, cmd_opts);
    let bounds = image_bounds(&image, cmd_opts.origin)?;

    let float_image = FloatImage::new(&image.pixels, bounds, image.components)
        .set_pixel_aspect(cmd_opts.pixel_aspect);

    let start = Instant::now();
    let bytes_written = encode_to_file(out_file, float_image, &options)?;
    info!(
        "Wrote {} bytes to {:?} in {:?}",
        bytes_written,
        out_file,
        start.elapsed()
    );

    if cmd_opts.probe {
        let summary = EncodeSummary::new(
            out_file.as_os_str().to_os_string(),
            image.width,
            image.height,
            &options,
            bytes_written
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), WorkflowErrors> {
    info!("Creating workflows from input");

    let inputs: Vec<&PathBuf> = args.get_many::<PathBuf>("in").into_iter().flatten().collect();
    let outputs: Vec<&PathBuf> = args.get_many::<PathBuf>("out").into_iter().flatten().collect();

    if inputs.len() != outputs.len() {
        return Err(WorkflowErrors::Generic(format!(
            "Expected as many outputs as inputs, found {} inputs and {} outputs",
            inputs.len(),
            outputs.len()
        )));
    }
    for (in_file, out_file) in inputs.into_iter().zip(outputs) {
        debug!("Encoding {:?} to {:?}", in_file, out_file);
        encode_file(in_file, out_file, cmd_opts)?;
    }
    Ok(())
}
