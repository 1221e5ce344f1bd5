/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// A synthetic render, smooth gradients with some high frequency detail
///
/// Samples are in `0.0..=1.0`, rows are bottom to top.
pub fn synthetic_render(width: usize, height: usize, components: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(width * height * components);

    for y in 0..height {
        for x in 0..width {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let detail = ((x * 7 + y * 13) % 17) as f32 / 170.0;

            for c in 0..components {
                let value = match c {
                    0 => u,
                    1 => v,
                    2 => (u + v) * 0.5,
                    _ => 1.0
                };
                out.push((value + detail).min(1.0));
            }
        }
    }
    out
}
