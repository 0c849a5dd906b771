//! Gradient fusion: per-pixel magnitude and direction from two derivative maps.

use crate::buffer::PixelBuffer;
use crate::kernel::{convolve, SOBEL_X, SOBEL_Y};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gradient {
    /// Euclidean norm of `(dx, dy)`, never negative.
    pub magnitude: f64,
    /// `atan2(dy, dx)` in `(-pi, pi]`.
    pub direction: f64,
}

impl Gradient {
    #[inline]
    pub fn from_derivatives(dx: f64, dy: f64) -> Self {
        Self {
            magnitude: (dx * dx + dy * dy).sqrt(),
            direction: dy.atan2(dx),
        }
    }
}

/// Fuse horizontal and vertical derivatives into a gradient field.
///
/// Both inputs must share their dimensions; a mismatch is a caller bug.
pub fn combine_gradients(gx: &PixelBuffer<f64>, gy: &PixelBuffer<f64>) -> PixelBuffer<Gradient> {
    assert!(
        gx.same_dims(gy),
        "derivative maps differ in size: {:?} vs {:?}",
        gx.dims(),
        gy.dims()
    );
    let (w, h) = gx.dims();
    let mut out = PixelBuffer::<Gradient>::new(w, h);

    #[cfg(feature = "rayon")]
    out.as_mut_slice()
        .par_iter_mut()
        .zip(gx.as_slice().par_iter().zip(gy.as_slice().par_iter()))
        .for_each(|(g, (&dx, &dy))| *g = Gradient::from_derivatives(dx, dy));

    #[cfg(not(feature = "rayon"))]
    for (g, (&dx, &dy)) in out
        .as_mut_slice()
        .iter_mut()
        .zip(gx.as_slice().iter().zip(gy.as_slice()))
    {
        *g = Gradient::from_derivatives(dx, dy);
    }

    out
}

/// Sobel derivatives of a (blurred) image.
pub fn sobel_derivatives(img: &PixelBuffer<f64>) -> (PixelBuffer<f64>, PixelBuffer<f64>) {
    (convolve(img, &SOBEL_X), convolve(img, &SOBEL_Y))
}
