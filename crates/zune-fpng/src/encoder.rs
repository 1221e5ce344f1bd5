/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The encode operation, float image in, png out
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::chunks::{colorspace_from_components, ImageHeader};
use crate::convert::{convert, ScratchBuffer};
use crate::error::PngEncodeErrors;
use crate::image::FloatImage;
use crate::metadata::ImageMetadata;
use crate::options::EncodeOptions;
use crate::session::{CompressionSettings, EncodeSession, FinishedSession};

/// A png encoder for float images
///
/// Source rows are bottom-up, the first row in memory is the bottom row
/// of the picture. The encoder writes them top-down as png requires.
///
/// # Example
/// ```
/// use zune_fpng::zune_core::bit_depth::BitDepth;
/// use zune_fpng::{EncodeOptions, FloatImage, PngEncoder, Rect};
///
/// // 2x2 grey image
/// let pixels = [0.0, 0.25, 0.5, 1.0];
/// let image = FloatImage::new(&pixels, Rect::from_dimensions(2, 2), 1);
/// let options = EncodeOptions::default()
///     .set_components(1)
///     .set_depth(BitDepth::Sixteen);
///
/// let png = PngEncoder::new(image, options).encode_to_vec()?;
/// assert_eq!(&png[1..4], b"PNG");
/// # Ok::<(), zune_fpng::PngEncodeErrors>(())
/// ```
pub struct PngEncoder<'a> {
    image:   FloatImage<'a>,
    options: EncodeOptions
}

impl<'a> PngEncoder<'a> {
    /// Create an encoder writing `image` as described by `options`
    pub fn new(image: FloatImage<'a>, options: EncodeOptions) -> PngEncoder<'a> {
        PngEncoder { image, options }
    }

    pub const fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Validate everything and convert the pixels, nothing is written yet
    fn prepare(&self) -> Result<(ScratchBuffer, ImageHeader, ImageMetadata), PngEncodeErrors> {
        self.options.validate()?;

        let scratch = convert(&self.image, &self.options)?;

        let header = ImageHeader {
            width:      u32::try_from(self.image.width())
                .map_err(|_| self.invalid_dimensions())?,
            height:     u32::try_from(self.image.height())
                .map_err(|_| self.invalid_dimensions())?,
            depth:      self.options.depth(),
            colorspace: colorspace_from_components(self.options.components())?
        };
        let metadata = ImageMetadata::new(&self.image, self.options.colorspace());

        Ok((scratch, header, metadata))
    }

    fn invalid_dimensions(&self) -> PngEncodeErrors {
        let bounds = self.image.bounds();
        PngEncodeErrors::InvalidDimensions(bounds.width(), bounds.height())
    }

    fn compression(&self) -> CompressionSettings {
        CompressionSettings {
            level:    self.options.compression_level(),
            strategy: self.options.strategy()
        }
    }

    /// Stream prepared rows through `session`
    fn write_prepared<W: Write>(
        &self, mut session: EncodeSession<W>, scratch: &ScratchBuffer, header: ImageHeader,
        metadata: &ImageMetadata
    ) -> Result<FinishedSession<W>, PngEncodeErrors> {
        session.write_header(header, metadata, self.compression())?;

        // the last row in memory is the top of the picture
        for row in (0..scratch.height()).rev() {
            session.write_row(scratch.scanline(row))?;
        }
        session.finish()
    }

    /// Encode into `sink`, returning the sink and the number of bytes written
    pub fn encode<W: Write>(&self, sink: W) -> Result<FinishedSession<W>, PngEncodeErrors> {
        let (scratch, header, metadata) = self.prepare()?;
        self.write_prepared(EncodeSession::open(sink), &scratch, header, &metadata)
    }

    /// Encode into a new vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, PngEncodeErrors> {
        Ok(self.encode(Vec::new())?.sink)
    }

    /// Encode into the file at `path`, returning the number of bytes written
    ///
    /// Conversion happens before the file is created. If writing fails
    /// and `path` is a regular file, the partially written file is removed.
    /// Symbolic links, devices and pipes are left in place.
    pub fn encode_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, PngEncodeErrors> {
        self.encode_to_path(path.as_ref(), |path| EncodeSession::create(path))
    }

    fn encode_to_path<W, F>(&self, path: &Path, open: F) -> Result<usize, PngEncodeErrors>
    where
        W: Write,
        F: FnOnce(&Path) -> Result<EncodeSession<W>, PngEncodeErrors>
    {
        let (scratch, header, metadata) = self.prepare()?;

        let session = open(path)?;
        let mut partial = PartialFile::new(path)?;

        let finished = self.write_prepared(session, &scratch, header, &metadata)?;

        partial.keep();
        debug!("Wrote {} bytes to {:?}", finished.bytes_written, path);
        Ok(finished.bytes_written)
    }
}

/// Removes a regular file on drop unless told to keep it
struct PartialFile {
    path:   PathBuf,
    remove: bool
}

impl PartialFile {
    /// Guard the file at `path`, which must already exist
    fn new(path: &Path) -> Result<PartialFile, PngEncodeErrors> {
        let regular = fs::symlink_metadata(path)?.file_type().is_file();
        if !regular {
            debug!("{:?} is not a regular file, it is kept if writing fails", path);
        }
        Ok(PartialFile {
            path:   path.to_path_buf(),
            remove: regular
        })
    }

    fn keep(&mut self) {
        self.remove = false;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.remove {
            return;
        }
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Could not remove partial file {:?}: {err}", self.path);
            }
        }
    }
}

/// Encode `image` into `sink`, see [`PngEncoder::encode`]
pub fn encode_to_writer<W: Write>(
    image: FloatImage, options: &EncodeOptions, sink: W
) -> Result<FinishedSession<W>, PngEncodeErrors> {
    PngEncoder::new(image, options.clone()).encode(sink)
}

/// Encode `image` into the file at `path`, see [`PngEncoder::encode_to_file`]
pub fn encode_to_file<P: AsRef<Path>>(
    path: P, image: FloatImage, options: &EncodeOptions
) -> Result<usize, PngEncodeErrors> {
    PngEncoder::new(image, options.clone()).encode_to_file(path)
}
