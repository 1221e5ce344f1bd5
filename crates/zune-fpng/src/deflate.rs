/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Streaming zlib compression of filtered scanlines
use miniz_oxide::deflate::core::{
    compress, create_comp_flags_from_zip_params, CompressorOxide, TDEFLFlush, TDEFLStatus
};

use crate::error::PngEncodeErrors;
use crate::options::CompressionStrategy;

/// Window bits for a zlib wrapped stream with the maximum window
const ZLIB_WINDOW_BITS: i32 = 15;

/// Size of the intermediate output buffer
const OUTPUT_CHUNK: usize = 16 * 1024;

/// A zlib compressor that accumulates its output
///
/// Compressed bytes collect in an internal buffer which the
/// caller drains with [`take_output`](Self::take_output).
pub struct ZlibStream {
    compressor: Box<CompressorOxide>,
    scratch:    Vec<u8>,
    output:     Vec<u8>,
    finished:   bool
}

impl ZlibStream {
    /// Create a stream compressing at `level` (0-9) using `strategy`
    pub fn new(level: u8, strategy: CompressionStrategy) -> ZlibStream {
        let flags = create_comp_flags_from_zip_params(
            i32::from(level),
            ZLIB_WINDOW_BITS,
            strategy.to_int()
        );
        ZlibStream {
            compressor: Box::new(CompressorOxide::new(flags)),
            scratch:    vec![0; OUTPUT_CHUNK],
            output:     Vec::new(),
            finished:   false
        }
    }

    fn run(&mut self, mut input: &[u8], flush: TDEFLFlush) -> Result<(), PngEncodeErrors> {
        if self.finished {
            return Err(PngEncodeErrors::InvalidState(
                "compressor already finished"
            ));
        }
        loop {
            let (status, consumed, produced) =
                compress(&mut self.compressor, input, &mut self.scratch, flush);

            self.output.extend_from_slice(&self.scratch[..produced]);
            input = &input[consumed..];

            match status {
                TDEFLStatus::Done => {
                    self.finished = true;
                    return Ok(());
                }
                TDEFLStatus::Okay => {
                    // a full output buffer may hide more pending output,
                    // and finishing only ends with Done
                    let drained = input.is_empty() && produced < self.scratch.len();

                    if drained && !matches!(flush, TDEFLFlush::Finish) {
                        return Ok(());
                    }
                }
                TDEFLStatus::BadParam => {
                    return Err(PngEncodeErrors::EncoderFault("invalid compressor parameters"));
                }
                _ => {
                    return Err(PngEncodeErrors::EncoderFault("compressor output failed"));
                }
            }
        }
    }

    /// Compress `data`, output may be held back until later calls
    pub fn write(&mut self, data: &[u8]) -> Result<(), PngEncodeErrors> {
        self.run(data, TDEFLFlush::None)
    }

    /// Flush all pending data and write the stream trailer
    pub fn finish(&mut self) -> Result<(), PngEncodeErrors> {
        self.run(&[], TDEFLFlush::Finish)
    }

    /// Number of compressed bytes waiting to be taken
    pub fn pending(&self) -> usize {
        self.output.len()
    }

    /// Take compressed bytes produced so far
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.output)
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}
