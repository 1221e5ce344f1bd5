/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::builder::PossibleValue;
use clap::ValueEnum;
use zune_fpng::zune_core::bit_depth::BitDepth;
use zune_fpng::CompressionStrategy;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IDepth {
    Eight,
    Sixteen
}

impl IDepth {
    pub const fn to_depth(self) -> BitDepth {
        match self {
            IDepth::Eight => BitDepth::Eight,
            IDepth::Sixteen => BitDepth::Sixteen
        }
    }
}

impl ValueEnum for IDepth {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Eight, Self::Sixteen]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Eight => PossibleValue::new("8"),
            Self::Sixteen => PossibleValue::new("16")
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IStrategy {
    Default,
    Filtered,
    HuffmanOnly,
    Rle,
    Fixed
}

impl IStrategy {
    pub const fn to_strategy(self) -> CompressionStrategy {
        match self {
            IStrategy::Default => CompressionStrategy::Default,
            IStrategy::Filtered => CompressionStrategy::Filtered,
            IStrategy::HuffmanOnly => CompressionStrategy::HuffmanOnly,
            IStrategy::Rle => CompressionStrategy::Rle,
            IStrategy::Fixed => CompressionStrategy::Fixed
        }
    }
}

impl ValueEnum for IStrategy {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Default,
            Self::Filtered,
            Self::HuffmanOnly,
            Self::Rle,
            Self::Fixed
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Default => PossibleValue::new("default"),
            Self::Filtered => PossibleValue::new("filtered"),
            Self::HuffmanOnly => PossibleValue::new("huffman-only").alias("huffman"),
            Self::Rle => PossibleValue::new("rle"),
            Self::Fixed => PossibleValue::new("fixed")
        })
    }
}

/// Channel layout of the written png
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IChannels {
    Luma,
    LumaA,
    RGB,
    RGBA
}

impl IChannels {
    pub const fn num_components(self) -> usize {
        match self {
            IChannels::Luma => 1,
            IChannels::LumaA => 2,
            IChannels::RGB => 3,
            IChannels::RGBA => 4
        }
    }
}

impl ValueEnum for IChannels {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::RGBA, Self::RGB, Self::LumaA, Self::Luma]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::RGBA => PossibleValue::new("rgba"),
            Self::RGB => PossibleValue::new("rgb"),
            Self::LumaA => PossibleValue::new("luma-alpha"),
            Self::Luma => PossibleValue::new("luma").alias("grayscale")
        })
    }
}

/// Parse an origin given as `X,Y`
pub fn parse_origin(value: &str) -> Result<(i32, i32), String> {
    let Some((x, y)) = value.split_once(',') else {
        return Err(format!("Expected origin as X,Y but found {value:?}"));
    };
    let parse = |coordinate: &str| {
        coordinate
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("Invalid origin coordinate {coordinate:?}: {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}
