/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use png::{BitDepth as PngBitDepth, ColorType, Transformations};
use xxhash_rust::xxh3::xxh3_64;
use zune_fpng::zune_core::bit_depth::BitDepth;
use zune_fpng::{CompressionStrategy, EncodeOptions, FloatImage, PngEncoder, Rect};

struct Decoded {
    width:  u32,
    height: u32,
    color:  ColorType,
    depth:  PngBitDepth,
    pixels: Vec<u8>
}

fn decode_ref(data: &[u8]) -> Decoded {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(Transformations::IDENTITY);

    let mut reader = decoder.read_info().unwrap();

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());

    Decoded {
        width:  info.width,
        height: info.height,
        color:  info.color_type,
        depth:  info.bit_depth,
        pixels: buf
    }
}

/// A smooth ramp, prone to banding without dithering
fn gradient(width: usize, height: usize, components: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(width * height * components);
    for y in 0..height {
        for x in 0..width {
            for c in 0..components {
                let value = (x as f32 + y as f32 * 0.5 + c as f32 * 3.0) / (width as f32 * 2.0);
                out.push(value);
            }
        }
    }
    out
}

fn encode(pixels: &[f32], width: i32, height: i32, components: usize, options: EncodeOptions) -> Vec<u8> {
    let image = FloatImage::new(pixels, Rect::from_dimensions(width, height), components);
    PngEncoder::new(image, options).encode_to_vec().unwrap()
}

#[test]
fn dimensions_and_components_survive() {
    let pixels = gradient(7, 5, 4);

    for (components, color) in [
        (1, ColorType::Grayscale),
        (2, ColorType::GrayscaleAlpha),
        (3, ColorType::Rgb),
        (4, ColorType::Rgba)
    ] {
        for (depth, bits) in [(BitDepth::Eight, 8), (BitDepth::Sixteen, 16)] {
            let options = EncodeOptions::default()
                .set_components(components)
                .set_depth(depth);
            let decoded = decode_ref(&encode(&pixels, 7, 5, 4, options));

            assert_eq!((decoded.width, decoded.height), (7, 5));
            assert_eq!(decoded.color, color);
            assert_eq!(decoded.depth as u8, bits);
            assert_eq!(decoded.pixels.len(), 7 * 5 * components * depth.size_of());
        }
    }
}

#[test]
fn extremes_map_to_full_range() {
    let pixels = [0.0, 1.0, -4.0, 12.0];
    let options = EncodeOptions::default().set_components(1).set_dither(false);

    let decoded = decode_ref(&encode(&pixels, 4, 1, 1, options.clone()));
    assert_eq!(decoded.pixels, [0, 255, 0, 255]);

    let decoded = decode_ref(&encode(&pixels, 4, 1, 1, options.set_depth(BitDepth::Sixteen)));
    assert_eq!(decoded.pixels, [0, 0, 255, 255, 0, 0, 255, 255]);
}

#[test]
fn top_memory_row_is_written_first() {
    let (width, height) = (3, 4);
    let mut pixels = vec![0.0_f32; width * height];
    // last row in memory is the top of the picture
    pixels[(height - 1) * width..].fill(1.0);

    let options = EncodeOptions::default().set_components(1).set_dither(false);
    let decoded = decode_ref(&encode(&pixels, 3, 4, 1, options));

    let (top, rest) = decoded.pixels.split_at(width);
    assert!(top.iter().all(|x| *x == 255));
    assert!(rest.iter().all(|x| *x == 0));
}

#[test]
fn sixteen_bit_samples_are_big_endian() {
    let expected: [u16; 6] = [0, 1, 256, 4660, 43981, 65535];
    let pixels: Vec<f32> = expected.iter().map(|x| f32::from(*x) / 65535.0).collect();

    let options = EncodeOptions::default()
        .set_components(3)
        .set_depth(BitDepth::Sixteen);
    let decoded = decode_ref(&encode(&pixels, 2, 1, 3, options));

    let values: Vec<u16> = decoded
        .pixels
        .chunks_exact(2)
        .map(|x| u16::from_be_bytes([x[0], x[1]]))
        .collect();
    assert_eq!(values, expected);
}

#[test]
fn rgb_source_gets_opaque_alpha() {
    let pixels = gradient(6, 6, 3);
    let options = EncodeOptions::default().set_components(4);
    let decoded = decode_ref(&encode(&pixels, 6, 6, 3, options));

    assert_eq!(decoded.color, ColorType::Rgba);
    assert!(decoded.pixels.chunks_exact(4).all(|x| x[3] == 255));
}

#[test]
fn start_component_selects_channels() {
    // alpha channel of an RGBA source written as grey
    let pixels: Vec<f32> = (0..4).flat_map(|x| [0.0, 0.0, 0.0, x as f32 / 3.0]).collect();
    let options = EncodeOptions::default()
        .set_components(1)
        .set_start_component(3)
        .set_dither(false);
    let decoded = decode_ref(&encode(&pixels, 4, 1, 4, options));
    assert_eq!(decoded.pixels, [0, 85, 170, 255]);
}

#[test]
fn padded_rows_match_packed_rows() {
    let (width, height, components) = (5, 3, 3);
    let packed = gradient(width, height, components);

    let padding = 7;
    let stride = width * components + padding;
    let mut padded = vec![-1.0_f32; stride * height];
    for (dst, src) in padded.chunks_exact_mut(stride).zip(packed.chunks_exact(width * components)) {
        dst[..src.len()].copy_from_slice(src);
    }

    let options = EncodeOptions::default().set_components(3);
    let packed_png = encode(&packed, 5, 3, 3, options.clone());

    let image = FloatImage::new(&padded, Rect::from_dimensions(5, 3), 3).set_row_bytes(stride * 4);
    let padded_png = PngEncoder::new(image, options).encode_to_vec().unwrap();

    assert_eq!(decode_ref(&packed_png).pixels, decode_ref(&padded_png).pixels);
}

#[test]
fn dithering_is_deterministic() {
    let pixels = gradient(64, 16, 3);
    let options = EncodeOptions::default().set_components(3);

    let first = xxh3_64(&encode(&pixels, 64, 16, 3, options.clone()));
    let second = xxh3_64(&encode(&pixels, 64, 16, 3, options.clone()));
    assert_eq!(first, second);

    let reseeded = xxh3_64(&encode(&pixels, 64, 16, 3, options.clone().set_dither_seed(2)));
    assert_ne!(first, reseeded);

    let plain = encode(&pixels, 64, 16, 3, options.clone().set_dither(false));
    assert_eq!(
        xxh3_64(&plain),
        xxh3_64(&encode(&pixels, 64, 16, 3, options.set_dither(false)))
    );
    assert_ne!(first, xxh3_64(&plain));
}

#[test]
fn dithering_stays_within_one_step() {
    let pixels = gradient(32, 8, 4);
    let options = EncodeOptions::default();

    let dithered = decode_ref(&encode(&pixels, 32, 8, 4, options.clone()));
    let plain = decode_ref(&encode(&pixels, 32, 8, 4, options.set_dither(false)));

    for (i, (a, b)) in dithered.pixels.iter().zip(&plain.pixels).enumerate() {
        let diff = i16::from(*a) - i16::from(*b);
        assert!(diff.abs() <= 1, "sample {i} moved by {diff}");
        if i % 4 == 3 {
            assert_eq!(a, b, "alpha must not be dithered");
        }
    }
}

#[test]
fn sixteen_bit_ignores_dithering() {
    let pixels = gradient(16, 4, 3);
    let options = EncodeOptions::default()
        .set_components(3)
        .set_depth(BitDepth::Sixteen);

    let with = encode(&pixels, 16, 4, 3, options.clone().set_dither_seed(9));
    let without = encode(&pixels, 16, 4, 3, options.set_dither(false));
    assert_eq!(with, without);
}

#[test]
fn every_compression_setting_decodes() {
    let pixels = gradient(40, 12, 4);
    let reference = decode_ref(&encode(&pixels, 40, 12, 4, EncodeOptions::default())).pixels;

    for level in 0..=9 {
        for strategy in [
            CompressionStrategy::Default,
            CompressionStrategy::Filtered,
            CompressionStrategy::HuffmanOnly,
            CompressionStrategy::Rle,
            CompressionStrategy::Fixed
        ] {
            let options = EncodeOptions::default()
                .set_compression_level(level)
                .set_strategy(strategy);
            let decoded = decode_ref(&encode(&pixels, 40, 12, 4, options));
            assert_eq!(decoded.pixels, reference, "level {level} strategy {strategy:?}");
        }
    }
}

#[test]
fn large_images_span_many_data_chunks() {
    let (width, height) = (300, 200);
    // noise does not compress
    let pixels: Vec<f32> = (0..width * height * 4)
        .map(|i: usize| ((i.wrapping_mul(2_654_435_761) >> 7) % 1000) as f32 / 999.0)
        .collect();
    let options = EncodeOptions::default()
        .set_depth(BitDepth::Sixteen)
        .set_compression_level(0);
    let png = encode(&pixels, 300, 200, 4, options);

    let decoded = decode_ref(&png);
    assert_eq!(decoded.pixels.len(), width * height * 8);
    assert!(png.len() > 300 * 200 * 8);
}
