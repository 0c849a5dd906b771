//! Square integer convolution kernels and the fixed kernels of the pipeline.
//!
//! Border policy: pixels closer than `size / 2` to any image edge are copied
//! from the input unchanged. There is no clamping or reflection.

use crate::buffer::{index, PixelBuffer};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A `size x size` integer kernel, row-major, whose weighted sum is divided by
/// `normalizer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kernel<'a> {
    values: &'a [i32],
    size: usize,
    normalizer: i32,
}

impl<'a> Kernel<'a> {
    /// Build a kernel. Panics if `size` is even, `values.len() != size * size`
    /// or `normalizer == 0`; in a `const` context this is a compile error.
    pub const fn new(values: &'a [i32], size: usize, normalizer: i32) -> Self {
        assert!(size % 2 == 1, "kernel size must be odd");
        assert!(values.len() == size * size, "kernel needs size * size values");
        assert!(normalizer != 0, "kernel normalizer must be nonzero");
        Self {
            values,
            size,
            normalizer,
        }
    }

    #[inline]
    pub fn values(&self) -> &'a [i32] {
        self.values
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn normalizer(&self) -> i32 {
        self.normalizer
    }

    /// Width of the unfiltered border band, `size / 2`.
    #[inline]
    pub fn gap(&self) -> usize {
        self.size / 2
    }
}

/// 5x5 Gaussian approximation (sigma ~ 1.4).
#[rustfmt::skip]
pub const GAUSSIAN_5X5: Kernel<'static> = Kernel::new(
    &[
        2,  4,  5,  4, 2,
        4,  9, 12,  9, 4,
        5, 12, 15, 12, 5,
        4,  9, 12,  9, 4,
        2,  4,  5,  4, 2,
    ],
    5,
    159,
);

/// Horizontal Sobel derivative.
#[rustfmt::skip]
pub const SOBEL_X: Kernel<'static> = Kernel::new(
    &[
        -1, 0, 1,
        -2, 0, 2,
        -1, 0, 1,
    ],
    3,
    1,
);

/// Vertical Sobel derivative.
#[rustfmt::skip]
pub const SOBEL_Y: Kernel<'static> = Kernel::new(
    &[
        -1, -2, -1,
         0,  0,  0,
         1,  2,  1,
    ],
    3,
    1,
);

#[inline]
fn convolve_row(input: &PixelBuffer<f64>, kernel: &Kernel<'_>, y: usize, out: &mut [f64]) {
    let w = input.width();
    let h = input.height();
    let gap = kernel.gap();
    let src = input.as_slice();
    let norm = kernel.normalizer() as f64;

    for (x, dst) in out.iter_mut().enumerate() {
        let i = index(x, y, w);
        if x < gap || y < gap || x + gap >= w || y + gap >= h {
            *dst = src[i];
            continue;
        }

        let mut sum = 0.0;
        let mut k = kernel.values().iter();
        for yy in y - gap..=y + gap {
            for xx in x - gap..=x + gap {
                if let Some(&weight) = k.next() {
                    sum += weight as f64 * src[index(xx, yy, w)];
                }
            }
        }
        *dst = sum / norm;
    }
}

/// Convolve `input` with `kernel`, returning a buffer of the same dimensions.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(input, kernel), fields(size = kernel.size()))
)]
pub fn convolve(input: &PixelBuffer<f64>, kernel: &Kernel<'_>) -> PixelBuffer<f64> {
    let (w, h) = input.dims();
    let mut out = PixelBuffer::<f64>::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    #[cfg(feature = "rayon")]
    out.as_mut_slice()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| convolve_row(input, kernel, y, row));

    #[cfg(not(feature = "rayon"))]
    for (y, row) in out.as_mut_slice().chunks_mut(w).enumerate() {
        convolve_row(input, kernel, y, row);
    }

    out
}
