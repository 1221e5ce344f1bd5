/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Stateful png writing
//!
//! An [`EncodeSession`] owns the output sink and the row encoder for the
//! duration of one image. It moves through
//!
//! `Closed -> Opened -> HeaderWritten -> Streaming -> Finalized -> Closed`
//!
//! Any error returned by a session method releases everything the session
//! holds before it is returned, dropping a session that has not been
//! finished does the same. Release happens exactly once.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info, trace, warn};

use crate::chunks::{write_chunk, write_header, write_metadata, ImageHeader};
use crate::deflate::ZlibStream;
use crate::error::PngEncodeErrors;
use crate::filters::RowFilter;
use crate::metadata::ImageMetadata;
use crate::options::CompressionStrategy;

/// Compressed bytes collected before an IDAT chunk is written
pub const IDAT_CHUNK_SIZE: usize = 8192;

/// Where a session is in its life
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    /// Nothing is held
    Closed,
    /// The sink is held, nothing has been written
    Opened,
    /// Signature, header and metadata are written
    HeaderWritten,
    /// At least one row was written
    Streaming,
    /// The end of stream marker was written
    Finalized
}

/// Compression tuning of a session
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CompressionSettings {
    pub level:    u8,
    pub strategy: CompressionStrategy
}

/// Filters, compresses and counts scanlines
struct RowEncoder {
    header:       ImageHeader,
    zlib:         ZlibStream,
    filter:       RowFilter,
    previous:     Vec<u8>,
    rows_written: usize
}

/// Result of a finished session
#[derive(Debug)]
pub struct FinishedSession<W> {
    /// The sink, everything has been written to it
    pub sink:          W,
    /// Number of bytes of png data written
    pub bytes_written: usize
}

/// Writes one png to a sink
///
/// # Example
/// ```
/// use zune_fpng::chunks::ImageHeader;
/// use zune_fpng::metadata::{ImageMetadata, PhysicalDensity, PixelOffset};
/// use zune_fpng::session::{CompressionSettings, EncodeSession};
/// use zune_fpng::zune_core::bit_depth::BitDepth;
/// use zune_fpng::zune_core::colorspace::ColorSpace;
/// use zune_fpng::CompressionStrategy;
///
/// let header = ImageHeader {
///     width:      2,
///     height:     1,
///     depth:      BitDepth::Eight,
///     colorspace: ColorSpace::Luma
/// };
/// let metadata = ImageMetadata {
///     color:   None,
///     density: PhysicalDensity::from_pixel_aspect(1.0),
///     offset:  PixelOffset::default()
/// };
/// let compression = CompressionSettings {
///     level:    6,
///     strategy: CompressionStrategy::Default
/// };
///
/// let mut session = EncodeSession::open(Vec::new());
/// session.write_header(header, &metadata, compression)?;
/// session.write_row(&[0, 255])?;
/// let finished = session.finish()?;
/// assert_eq!(finished.bytes_written, finished.sink.len());
/// # Ok::<(), zune_fpng::PngEncodeErrors>(())
/// ```
pub struct EncodeSession<W: Write> {
    state:         SessionState,
    sink:          Option<W>,
    encoder:       Option<RowEncoder>,
    bytes_written: usize
}

impl EncodeSession<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and open a session on it
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, PngEncodeErrors> {
        let file = File::create(path.as_ref())?;
        debug!("Opened {:?} for writing", path.as_ref());
        Ok(EncodeSession::open(BufWriter::new(file)))
    }
}

impl<W: Write> EncodeSession<W> {
    /// Open a session writing to `sink`
    pub fn open(sink: W) -> EncodeSession<W> {
        EncodeSession {
            state:         SessionState::Opened,
            sink:          Some(sink),
            encoder:       None,
            bytes_written: 0
        }
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Number of bytes written to the sink so far
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Number of rows written so far
    pub fn rows_written(&self) -> usize {
        self.encoder.as_ref().map_or(0, |x| x.rows_written)
    }

    /// Drop sink and encoder, at most once
    fn release(&mut self) {
        if self.state != SessionState::Closed {
            trace!("Releasing encode session in state {:?}", self.state);
        }
        self.encoder = None;
        self.sink = None;
        self.state = SessionState::Closed;
    }

    /// Release the session if `result` is an error
    fn release_on_error<T>(
        &mut self, result: Result<T, PngEncodeErrors>
    ) -> Result<T, PngEncodeErrors> {
        if result.is_err() {
            self.release();
        }
        result
    }

    fn expect_state(&self, allowed: &[SessionState]) -> Result<(), PngEncodeErrors> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        Err(match self.state {
            SessionState::Closed => PngEncodeErrors::InvalidState("session is closed"),
            SessionState::Opened => PngEncodeErrors::InvalidState("header not written"),
            SessionState::HeaderWritten => PngEncodeErrors::InvalidState("header already written"),
            SessionState::Streaming => PngEncodeErrors::InvalidState("rows are being written"),
            SessionState::Finalized => PngEncodeErrors::InvalidState("session is finalized")
        })
    }

    /// Write the signature, header and metadata chunks
    pub fn write_header(
        &mut self, header: ImageHeader, metadata: &ImageMetadata,
        compression: CompressionSettings
    ) -> Result<(), PngEncodeErrors> {
        let result = self.write_header_inner(header, metadata, compression);
        self.release_on_error(result)
    }

    fn write_header_inner(
        &mut self, header: ImageHeader, metadata: &ImageMetadata,
        compression: CompressionSettings
    ) -> Result<(), PngEncodeErrors> {
        self.expect_state(&[SessionState::Opened])?;

        let max_dimension = i32::MAX as u32;

        if header.width == 0
            || header.height == 0
            || header.width > max_dimension
            || header.height > max_dimension
        {
            return Err(PngEncodeErrors::InvalidDimensions(
                i64::from(header.width),
                i64::from(header.height)
            ));
        }
        header.validate()?;

        if compression.level > 9 {
            return Err(PngEncodeErrors::InvalidCompressionLevel(compression.level));
        }
        let sink = self
            .sink
            .as_mut()
            .ok_or(PngEncodeErrors::InvalidState("sink released"))?;

        info!(
            "Writing {}x{} png, depth {:?}, colorspace {:?}",
            header.width, header.height, header.depth, header.colorspace
        );
        info!("Colour metadata: {:?}", metadata.color);

        self.bytes_written += write_header(sink, &header)?;
        self.bytes_written += write_metadata(sink, metadata)?;

        let scanline_size = header.scanline_size();

        self.encoder = Some(RowEncoder {
            header,
            zlib: ZlibStream::new(compression.level, compression.strategy),
            // stored data does not benefit from filtering
            filter: RowFilter::new(scanline_size, header.bytes_per_pixel(), compression.level > 0),
            previous: Vec::with_capacity(scanline_size),
            rows_written: 0
        });
        self.state = SessionState::HeaderWritten;
        Ok(())
    }

    /// Write the next scanline, top to bottom
    ///
    /// `row` must hold exactly one unfiltered scanline in png byte order
    pub fn write_row(&mut self, row: &[u8]) -> Result<(), PngEncodeErrors> {
        let result = self.write_row_inner(row);
        self.release_on_error(result)
    }

    fn write_row_inner(&mut self, row: &[u8]) -> Result<(), PngEncodeErrors> {
        self.expect_state(&[SessionState::HeaderWritten, SessionState::Streaming])?;

        let (Some(sink), Some(encoder)) = (self.sink.as_mut(), self.encoder.as_mut()) else {
            return Err(PngEncodeErrors::InvalidState("session released"));
        };
        if row.len() != encoder.header.scanline_size() {
            return Err(PngEncodeErrors::InvalidState("row has the wrong length"));
        }
        if encoder.rows_written == encoder.header.height as usize {
            return Err(PngEncodeErrors::RowCountMismatch(
                encoder.header.height as usize,
                encoder.rows_written + 1
            ));
        }
        self.state = SessionState::Streaming;

        let filtered = encoder.filter.filter(row, &encoder.previous);
        encoder.zlib.write(filtered)?;

        encoder.previous.clear();
        encoder.previous.extend_from_slice(row);
        encoder.rows_written += 1;

        if encoder.rows_written == encoder.header.height as usize {
            encoder.zlib.finish()?;
        }
        let last_row = encoder.zlib.is_finished();

        if last_row || encoder.zlib.pending() >= IDAT_CHUNK_SIZE {
            let data = encoder.zlib.take_output();

            for chunk in data.chunks(IDAT_CHUNK_SIZE) {
                self.bytes_written += write_chunk(sink, b"IDAT", chunk)?;
            }
        }
        if last_row {
            sink.flush()?;
            debug!("Wrote {} rows", encoder.rows_written);
        }
        Ok(())
    }

    /// Write the end of stream marker and release the session
    ///
    /// Faults while writing the marker are logged and ignored, the
    /// rows are already in the sink at this point.
    pub fn finish(mut self) -> Result<FinishedSession<W>, PngEncodeErrors> {
        let checked = self.check_complete();
        self.release_on_error(checked)?;

        let mut sink = self
            .sink
            .take()
            .ok_or(PngEncodeErrors::InvalidState("session released"))?;

        match write_chunk(&mut sink, b"IEND", &[]).and_then(|n| {
            sink.flush()?;
            Ok(n)
        }) {
            Ok(written) => self.bytes_written += written,
            Err(err) => warn!("Ignoring error while finalizing png: {err}")
        }
        self.state = SessionState::Finalized;

        let bytes_written = self.bytes_written;
        self.release();

        Ok(FinishedSession {
            sink,
            bytes_written
        })
    }

    fn check_complete(&self) -> Result<(), PngEncodeErrors> {
        self.expect_state(&[SessionState::Streaming])?;

        match &self.encoder {
            Some(encoder) if encoder.rows_written == encoder.header.height as usize => Ok(()),
            Some(encoder) => Err(PngEncodeErrors::RowCountMismatch(
                encoder.header.height as usize,
                encoder.rows_written
            )),
            None => Err(PngEncodeErrors::InvalidState("session released"))
        }
    }
}

impl<W: Write> Drop for EncodeSession<W> {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            debug!("Encode session dropped in state {:?}", self.state);
        }
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use zune_core::bit_depth::BitDepth;
    use zune_core::colorspace::ColorSpace;

    use super::*;
    use crate::metadata::{PhysicalDensity, PixelOffset};

    fn header(width: u32, height: u32) -> ImageHeader {
        ImageHeader {
            width,
            height,
            depth: BitDepth::Eight,
            colorspace: ColorSpace::Luma
        }
    }

    fn metadata() -> ImageMetadata {
        ImageMetadata {
            color:   None,
            density: PhysicalDensity::from_pixel_aspect(1.0),
            offset:  PixelOffset::default()
        }
    }

    const COMPRESSION: CompressionSettings = CompressionSettings {
        level:    6,
        strategy: CompressionStrategy::Default
    };

    /// Accepts `limit` bytes and then fails
    struct LimitedWriter {
        written: usize,
        limit:   usize
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written + buf.len() > self.limit {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
            }
            self.written += buf.len();
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn walks_through_every_state() {
        let mut session = EncodeSession::open(Vec::new());
        assert_eq!(session.state(), SessionState::Opened);

        session.write_header(header(3, 2), &metadata(), COMPRESSION).unwrap();
        assert_eq!(session.state(), SessionState::HeaderWritten);

        session.write_row(&[1, 2, 3]).unwrap();
        assert_eq!(session.state(), SessionState::Streaming);
        session.write_row(&[4, 5, 6]).unwrap();
        assert_eq!(session.rows_written(), 2);

        let finished = session.finish().unwrap();
        assert_eq!(finished.bytes_written, finished.sink.len());
        assert!(finished.sink.ends_with(&[0xAE, 0x42, 0x60, 0x82]));
    }

    #[test]
    fn rows_before_header_close_the_session() {
        let mut session = EncodeSession::open(Vec::new());
        assert!(matches!(
            session.write_row(&[0]),
            Err(PngEncodeErrors::InvalidState(_))
        ));
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(
            session.write_header(header(1, 1), &metadata(), COMPRESSION),
            Err(PngEncodeErrors::InvalidState("session is closed"))
        ));
    }

    #[test]
    fn headers_png_cannot_store_are_rejected() {
        let mut session = EncodeSession::open(Vec::new());
        let twelve_bit = ImageHeader {
            depth: BitDepth::Twelve,
            ..header(2, 2)
        };
        assert!(matches!(
            session.write_header(twelve_bit, &metadata(), COMPRESSION),
            Err(PngEncodeErrors::UnsupportedDepth(BitDepth::Twelve))
        ));
        assert_eq!(session.state(), SessionState::Closed);

        let mut session = EncodeSession::open(Vec::new());
        let cmyk = ImageHeader {
            colorspace: ColorSpace::CMYK,
            ..header(2, 2)
        };
        assert!(session.write_header(cmyk, &metadata(), COMPRESSION).is_err());
        assert_eq!(session.bytes_written(), 0);
    }

    #[test]
    fn wrong_row_length_is_rejected() {
        let mut session = EncodeSession::open(Vec::new());
        session.write_header(header(3, 1), &metadata(), COMPRESSION).unwrap();
        assert!(session.write_row(&[0; 4]).is_err());
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn too_many_rows_is_rejected() {
        let mut session = EncodeSession::open(Vec::new());
        session.write_header(header(1, 1), &metadata(), COMPRESSION).unwrap();
        session.write_row(&[0]).unwrap();
        assert!(matches!(
            session.write_row(&[0]),
            Err(PngEncodeErrors::RowCountMismatch(1, 2))
        ));
    }

    #[test]
    fn finishing_early_is_an_error() {
        let mut session = EncodeSession::open(Vec::new());
        session.write_header(header(1, 3), &metadata(), COMPRESSION).unwrap();
        session.write_row(&[0]).unwrap();
        assert!(matches!(
            session.finish(),
            Err(PngEncodeErrors::RowCountMismatch(3, 1))
        ));
    }

    #[test]
    fn sink_faults_release_the_session() {
        let sink = LimitedWriter {
            written: 0,
            limit:   100
        };
        let mut session = EncodeSession::open(sink);
        session.write_header(header(64, 64), &metadata(), COMPRESSION).unwrap();

        // incompressible rows, the IDAT data cannot fit in the sink
        let mut state = 12345_u32;
        let mut result = Ok(());
        for _ in 0..64 {
            let row: Vec<u8> = (0..64)
                .map(|_| {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
                    (state >> 16) as u8
                })
                .collect();
            result = session.write_row(&row);
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(result, Err(PngEncodeErrors::IoErrors(_))));
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.sink.is_none());
        assert!(session.encoder.is_none());
    }

    #[test]
    fn trailer_faults_are_swallowed() {
        let mut reference = EncodeSession::open(Vec::new());
        reference.write_header(header(2, 2), &metadata(), COMPRESSION).unwrap();
        reference.write_row(&[9, 9]).unwrap();
        reference.write_row(&[9, 9]).unwrap();
        let without_trailer = reference.bytes_written();

        // room for everything but the IEND chunk
        let sink = LimitedWriter {
            written: 0,
            limit:   without_trailer
        };
        let mut session = EncodeSession::open(sink);
        session.write_header(header(2, 2), &metadata(), COMPRESSION).unwrap();
        session.write_row(&[9, 9]).unwrap();
        session.write_row(&[9, 9]).unwrap();

        let finished = session.finish().unwrap();
        assert_eq!(finished.bytes_written, without_trailer);
        assert_eq!(finished.sink.written, without_trailer);
    }
}
