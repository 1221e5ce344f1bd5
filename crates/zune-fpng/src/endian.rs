/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte order normalization of 16 bit samples
//!
//! PNG stores multi-byte samples big endian, the converter produces
//! native endian `u16`s which are swapped here before streaming.

/// Whether the host stores integers little endian.
///
/// This is the only place the crate decides host byte order
pub const HOST_IS_LITTLE_ENDIAN: bool = cfg!(target_endian = "little");

/// Convert native endian samples of one scanline to big endian in place
///
/// Does nothing on big endian hosts
#[inline]
pub fn normalize_to_big_endian(scanline: &mut [u16]) {
    if HOST_IS_LITTLE_ENDIAN {
        scanline.iter_mut().for_each(|x| *x = x.swap_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_end_up_big_endian() {
        let mut row = [0x1234_u16, 0xABCD, 0x00FF];
        normalize_to_big_endian(&mut row);
        let bytes: &[u8] = bytemuck::cast_slice(&row);
        assert_eq!(bytes, &[0x12, 0x34, 0xAB, 0xCD, 0x00, 0xFF]);
    }

    #[test]
    fn host_check_agrees_with_std() {
        assert_eq!(HOST_IS_LITTLE_ENDIAN, 1_u16.to_ne_bytes()[0] == 1);
    }
}
