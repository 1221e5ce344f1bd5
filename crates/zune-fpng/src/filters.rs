/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline filters applied before compression

/// Png filter types
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMethod {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod {
    pub const ALL: [FilterMethod; 5] = [
        FilterMethod::None,
        FilterMethod::Sub,
        FilterMethod::Up,
        FilterMethod::Average,
        FilterMethod::Paeth
    ];

    /// Value written as the first byte of a filtered scanline
    pub const fn to_int(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Sub => 1,
            Self::Up => 2,
            Self::Average => 3,
            Self::Paeth => 4
        }
    }
}

#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        return a as u8;
    }
    if pb <= pc {
        return b as u8;
    }
    c as u8
}

/// Filter `current` into `out`.
///
/// `out` must be one byte longer than `current`, the first byte receives
/// the filter type. `previous` is the unfiltered previous scanline, or
/// empty for the first scanline which is treated as a row of zeroes.
pub fn filter_scanline(
    filter: FilterMethod, current: &[u8], previous: &[u8], bpp: usize, out: &mut [u8]
) {
    debug_assert_eq!(out.len(), current.len() + 1);

    out[0] = filter.to_int();
    let out = &mut out[1..];

    let up = |i: usize| -> u8 { previous.get(i).copied().unwrap_or(0) };
    let left = |i: usize| -> u8 {
        if i >= bpp {
            current[i - bpp]
        } else {
            0
        }
    };
    let upper_left = |i: usize| -> u8 {
        if i >= bpp {
            up(i - bpp)
        } else {
            0
        }
    };

    match filter {
        FilterMethod::None => out.copy_from_slice(current),
        FilterMethod::Sub => {
            for (i, (dst, x)) in out.iter_mut().zip(current).enumerate() {
                *dst = x.wrapping_sub(left(i));
            }
        }
        FilterMethod::Up => {
            for (i, (dst, x)) in out.iter_mut().zip(current).enumerate() {
                *dst = x.wrapping_sub(up(i));
            }
        }
        FilterMethod::Average => {
            for (i, (dst, x)) in out.iter_mut().zip(current).enumerate() {
                let avg = ((u16::from(left(i)) + u16::from(up(i))) >> 1) as u8;
                *dst = x.wrapping_sub(avg);
            }
        }
        FilterMethod::Paeth => {
            for (i, (dst, x)) in out.iter_mut().zip(current).enumerate() {
                *dst = x.wrapping_sub(paeth(left(i), up(i), upper_left(i)));
            }
        }
    }
}

/// Sum of the filtered bytes taken as signed values, smaller
/// tends to compress better
fn filter_cost(filtered: &[u8]) -> u64 {
    filtered
        .iter()
        .map(|x| u64::from((*x as i8).unsigned_abs()))
        .sum()
}

/// Picks a filter per scanline
pub struct RowFilter {
    adaptive:  bool,
    bpp:       usize,
    best:      Vec<u8>,
    candidate: Vec<u8>
}

impl RowFilter {
    /// Create a filter for scanlines of `scanline_size` bytes.
    ///
    /// When `adaptive` is false every row uses [`FilterMethod::None`]
    pub fn new(scanline_size: usize, bpp: usize, adaptive: bool) -> RowFilter {
        RowFilter {
            adaptive,
            bpp,
            best: vec![0; scanline_size + 1],
            candidate: vec![0; scanline_size + 1]
        }
    }

    /// Filter `current`, returning the filtered scanline with its filter byte
    pub fn filter(&mut self, current: &[u8], previous: &[u8]) -> &[u8] {
        if !self.adaptive {
            filter_scanline(FilterMethod::None, current, previous, self.bpp, &mut self.best);
            return &self.best;
        }
        let mut best_cost = u64::MAX;

        for method in FilterMethod::ALL {
            filter_scanline(method, current, previous, self.bpp, &mut self.candidate);
            let cost = filter_cost(&self.candidate[1..]);

            if cost < best_cost {
                best_cost = cost;
                core::mem::swap(&mut self.best, &mut self.candidate);
            }
        }
        &self.best
    }
}
