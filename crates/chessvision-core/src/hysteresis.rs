//! Hysteresis edge linking.
//!
//! Strong pixels (above `high`) seed regions that grow through 8-connected
//! weak pixels (within `[low, high]`). Region growth uses an explicit stack so
//! a component spanning the whole image cannot exhaust the call stack.

use crate::buffer::{index, PixelBuffer};
use crate::threshold::Threshold;

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Mark every pixel that belongs to a strong-seeded region.
pub fn keep_mask(img: &PixelBuffer<f64>, threshold: &Threshold) -> PixelBuffer<bool> {
    let (w, h) = img.dims();
    let values = img.as_slice();
    let mut keep = PixelBuffer::filled(w, h, false);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !threshold.is_strong(values[index(x, y, w)]) {
                continue;
            }
            keep.set(x, y, true);
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for (dx, dy) in NEIGHBORS_8 {
                    let (Some(nx), Some(ny)) =
                        (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= w || ny >= h || *keep.get(nx, ny) {
                        continue;
                    }
                    if threshold.is_weak(values[index(nx, ny, w)]) {
                        keep.set(nx, ny, true);
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    keep
}

/// Copy kept magnitudes through and zero everything else.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(img), fields(low = threshold.low, high = threshold.high))
)]
pub fn hysteresis(img: &PixelBuffer<f64>, threshold: &Threshold) -> PixelBuffer<f64> {
    let keep = keep_mask(img, threshold);
    let mut out = PixelBuffer::<f64>::new(img.width(), img.height());
    for ((dst, &v), &k) in out
        .as_mut_slice()
        .iter_mut()
        .zip(img.as_slice())
        .zip(keep.as_slice())
    {
        if k {
            *dst = v;
        }
    }
    out
}
