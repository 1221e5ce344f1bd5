/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable float map reading
//!
//! A PFM file is `PF` (RGB) or `Pf` (grey), the width, the height and a
//! scale, followed by one whitespace byte and binary `f32` samples.
//! A negative scale means little endian samples. Rows are stored bottom to top.
use std::fmt::{Debug, Formatter};
use std::path::Path;

use log::{info, trace};

pub enum PfmDecodeErrors {
    Generic(String),
    GenericStatic(&'static str),
    InvalidHeader(String),
    /// Contains expected and found number of bytes
    TooShort(usize, usize),
    IoErrors(std::io::Error)
}

impl Debug for PfmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::InvalidHeader(val) => writeln!(f, "Invalid header, reason: {val}"),
            Self::TooShort(expected, found) => writeln!(
                f,
                "Too short pixel data, expected {expected} bytes but found {found}"
            ),
            Self::IoErrors(err) => writeln!(f, "I/O error: {err}")
        }
    }
}

impl From<std::io::Error> for PfmDecodeErrors {
    fn from(value: std::io::Error) -> Self {
        Self::IoErrors(value)
    }
}

/// A decoded float image, rows bottom to top
pub struct PfmImage {
    pub width:      usize,
    pub height:     usize,
    pub components: usize,
    pub pixels:     Vec<f32>
}

/// Read and decode the PFM file at `path`
pub fn read_pfm<P: AsRef<Path>>(path: P) -> Result<PfmImage, PfmDecodeErrors> {
    let data = std::fs::read(path.as_ref())?;
    trace!("Read {} bytes from {:?}", data.len(), path.as_ref());
    decode_pfm(&data)
}

struct PfmReader<'a> {
    data:     &'a [u8],
    position: usize
}

impl<'a> PfmReader<'a> {
    fn eof(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Skip whitespace and `#` comments
    fn skip_spaces(&mut self) {
        while let Some(byte) = self.data.get(self.position) {
            if *byte == b'#' {
                while !self.eof() && self.data[self.position] != b'\n' {
                    self.position += 1;
                }
            } else if byte.is_ascii_whitespace() {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Bytes up to the next whitespace
    fn get_token(&mut self) -> &'a [u8] {
        let start = self.position;
        while !self.eof() && !self.data[self.position].is_ascii_whitespace() {
            self.position += 1;
        }
        &self.data[start..self.position]
    }

    fn get_number<T: core::str::FromStr>(&mut self, what: &str) -> Result<T, PfmDecodeErrors> {
        self.skip_spaces();
        let token = self.get_token();

        core::str::from_utf8(token)
            .ok()
            .and_then(|x| x.parse::<T>().ok())
            .ok_or_else(|| {
                let msg = format!(
                    "Could not parse {what} from {:?}",
                    String::from_utf8_lossy(token)
                );
                PfmDecodeErrors::InvalidHeader(msg)
            })
    }
}

/// Decode an in memory PFM file
pub fn decode_pfm(data: &[u8]) -> Result<PfmImage, PfmDecodeErrors> {
    if data.len() < 3 {
        let msg = format!("Expected at least 3 bytes in header but stream has {}", data.len());
        return Err(PfmDecodeErrors::Generic(msg));
    }
    let components = match &data[..2] {
        b"PF" => 3,
        b"Pf" => 1,
        magic => {
            let msg = format!(
                "Expected PF or Pf as first bytes but found {:?}",
                String::from_utf8_lossy(magic)
            );
            return Err(PfmDecodeErrors::InvalidHeader(msg));
        }
    };
    let mut reader = PfmReader { data, position: 2 };

    let width = reader.get_number::<usize>("width")?;
    let height = reader.get_number::<usize>("height")?;
    let scale = reader.get_number::<f32>("scale")?;

    if width == 0 || height == 0 {
        return Err(PfmDecodeErrors::GenericStatic("Zero sized image"));
    }
    if scale == 0.0 || !scale.is_finite() {
        let msg = format!("Scale must be a non zero number, found {scale}");
        return Err(PfmDecodeErrors::InvalidHeader(msg));
    }
    // exactly one whitespace byte separates the header from the samples
    if reader.eof() {
        return Err(PfmDecodeErrors::GenericStatic("No pixel data after header"));
    }
    reader.position += 1;

    let little_endian = scale < 0.0;

    info!("Width: {}, height: {}", width, height);
    info!("Components: {components}, little endian samples: {little_endian}");

    let expected = width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(components))
        .and_then(|x| x.checked_mul(4))
        .ok_or(PfmDecodeErrors::GenericStatic("Image dimensions overflow"))?;

    let samples = &data[reader.position..];

    if samples.len() < expected {
        return Err(PfmDecodeErrors::TooShort(expected, samples.len()));
    }

    let pixels = samples[..expected]
        .chunks_exact(4)
        .map(|x| {
            let bytes = [x[0], x[1], x[2], x[3]];
            if little_endian {
                f32::from_le_bytes(bytes)
            } else {
                f32::from_be_bytes(bytes)
            }
        })
        .collect();

    Ok(PfmImage {
        width,
        height,
        components,
        pixels
    })
}
