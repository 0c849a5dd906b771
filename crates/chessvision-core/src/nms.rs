//! Edge thinning by non-maximum suppression along the gradient direction.

use crate::buffer::{index, PixelBuffer};
use crate::gradient::Gradient;
use std::f64::consts::{FRAC_PI_4, PI};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Gradient direction folded onto one of four axes, pi/4 apart.
///
/// A direction and its opposite select the same axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectionClass {
    /// 0 rad: compare left and right.
    Horizontal,
    /// pi/4 rad (`/`): compare upper-right and lower-left.
    AntiDiagonal,
    /// pi/2 rad: compare above and below.
    Vertical,
    /// 3pi/4 rad (`\`): compare upper-left and lower-right.
    MainDiagonal,
}

impl DirectionClass {
    /// Offsets `(dx, dy)` of the two neighbours compared against.
    pub fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            DirectionClass::Horizontal => [(-1, 0), (1, 0)],
            DirectionClass::AntiDiagonal => [(1, -1), (-1, 1)],
            DirectionClass::Vertical => [(0, -1), (0, 1)],
            DirectionClass::MainDiagonal => [(-1, -1), (1, 1)],
        }
    }
}

/// Quantise a direction in `(-pi, pi]` to its [`DirectionClass`].
pub fn snap_direction(direction: f64) -> DirectionClass {
    let wrapped = if direction < 0.0 {
        direction + 2.0 * PI
    } else {
        direction
    };
    let nearest = (wrapped / FRAC_PI_4).round() as i64;
    match nearest.rem_euclid(4) {
        0 => DirectionClass::Horizontal,
        1 => DirectionClass::AntiDiagonal,
        2 => DirectionClass::Vertical,
        _ => DirectionClass::MainDiagonal,
    }
}

fn suppress_row(gradients: &PixelBuffer<Gradient>, y: usize, out: &mut [f64]) {
    let (w, h) = gradients.dims();
    let src = gradients.as_slice();

    for (x, dst) in out.iter_mut().enumerate() {
        let g = src[index(x, y, w)];
        if x < 1 || y < 1 || x + 1 >= w || y + 1 >= h {
            *dst = g.magnitude;
            continue;
        }

        let [(ax, ay), (bx, by)] = snap_direction(g.direction).neighbor_offsets();
        let a = src[index(x.wrapping_add_signed(ax), y.wrapping_add_signed(ay), w)];
        let b = src[index(x.wrapping_add_signed(bx), y.wrapping_add_signed(by), w)];

        // Strict on both sides: plateaus are suppressed.
        *dst = if g.magnitude > a.magnitude && g.magnitude > b.magnitude {
            g.magnitude
        } else {
            0.0
        };
    }
}

/// Keep only magnitudes that are strict local maxima along their gradient axis.
///
/// The one-pixel border carries its magnitude through unchanged.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(gradients), fields(w = gradients.width(), h = gradients.height()))
)]
pub fn non_maximum_suppression(gradients: &PixelBuffer<Gradient>) -> PixelBuffer<f64> {
    let (w, h) = gradients.dims();
    let mut out = PixelBuffer::<f64>::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    #[cfg(feature = "rayon")]
    out.as_mut_slice()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| suppress_row(gradients, y, row));

    #[cfg(not(feature = "rayon"))]
    for (y, row) in out.as_mut_slice().chunks_mut(w).enumerate() {
        suppress_row(gradients, y, row);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const FRAC_PI_16: f64 = PI / 16.0;

    fn grad(magnitude: f64, direction: f64) -> Gradient {
        Gradient {
            magnitude,
            direction,
        }
    }

    #[test]
    fn snaps_cardinal_directions() {
        assert_eq!(snap_direction(0.0), DirectionClass::Horizontal);
        assert_eq!(snap_direction(FRAC_PI_4), DirectionClass::AntiDiagonal);
        assert_eq!(snap_direction(FRAC_PI_2), DirectionClass::Vertical);
        assert_eq!(snap_direction(3.0 * FRAC_PI_4), DirectionClass::MainDiagonal);
        assert_eq!(snap_direction(PI), DirectionClass::Horizontal);
        assert_eq!(snap_direction(-FRAC_PI_2), DirectionClass::Vertical);
        assert_eq!(snap_direction(-FRAC_PI_4), DirectionClass::MainDiagonal);
    }

    #[test]
    fn opposite_directions_share_a_class() {
        // The 0.01 offset keeps samples off the odd multiples of pi/8.
        for i in 0..16 {
            let theta = -PI + 0.01 + i as f64 * FRAC_PI_16;
            assert_eq!(
                snap_direction(theta),
                snap_direction(theta + PI),
                "theta = {theta}"
            );
        }
    }

    #[test]
    fn snaps_to_nearest_axis() {
        assert_eq!(snap_direction(0.3), DirectionClass::Horizontal);
        assert_eq!(snap_direction(0.5), DirectionClass::AntiDiagonal);
        assert_eq!(snap_direction(1.4), DirectionClass::Vertical);
        assert_eq!(snap_direction(-0.3), DirectionClass::Horizontal);
        assert_eq!(snap_direction(-2.9), DirectionClass::Horizontal);
    }

    #[test]
    fn border_passes_through() {
        let g = PixelBuffer::from_fn(5, 4, |x, y| grad((x + 10 * y) as f64, 0.0));
        let out = non_maximum_suppression(&g);
        assert_eq!(out.dims(), (5, 4));
        for (x, y, &v) in out.enumerate() {
            if x == 0 || y == 0 || x == 4 || y == 3 {
                assert_eq!(v, g.get(x, y).magnitude);
            }
        }
    }

    #[test]
    fn keeps_ridge_and_suppresses_flanks() {
        // Vertical ridge at x = 2 with horizontal gradients.
        let profile = [1.0, 3.0, 7.0, 3.0, 1.0];
        let g = PixelBuffer::from_fn(5, 5, |x, _| grad(profile[x], 0.0));
        let out = non_maximum_suppression(&g);
        for y in 1..4 {
            assert_eq!(*out.get(1, y), 0.0);
            assert_eq!(*out.get(2, y), 7.0);
            assert_eq!(*out.get(3, y), 0.0);
        }
    }

    #[test]
    fn ties_are_suppressed() {
        let g = PixelBuffer::from_fn(5, 3, |x, _| {
            grad(if x == 2 || x == 3 { 5.0 } else { 1.0 }, 0.0)
        });
        let out = non_maximum_suppression(&g);
        assert_eq!(*out.get(2, 1), 0.0);
        assert_eq!(*out.get(3, 1), 0.0);
    }

    #[test]
    fn compares_along_direction_axis() {
        // Centre is a maximum vertically but not horizontally.
        let mut g = PixelBuffer::filled(3, 3, grad(1.0, FRAC_PI_2));
        g.set(1, 1, grad(4.0, FRAC_PI_2));
        g.set(0, 1, grad(9.0, FRAC_PI_2));
        assert_eq!(*non_maximum_suppression(&g).get(1, 1), 4.0);

        g.set(1, 1, grad(4.0, 0.0));
        assert_eq!(*non_maximum_suppression(&g).get(1, 1), 0.0);
    }

    #[test]
    fn diagonal_neighbors() {
        let mut g = PixelBuffer::filled(3, 3, grad(1.0, 0.0));
        g.set(1, 1, grad(4.0, 3.0 * FRAC_PI_4));
        g.set(2, 0, grad(9.0, 0.0));
        // Main diagonal ignores the upper-right neighbour.
        assert_eq!(*non_maximum_suppression(&g).get(1, 1), 4.0);

        g.set(1, 1, grad(4.0, FRAC_PI_4));
        assert_eq!(*non_maximum_suppression(&g).get(1, 1), 0.0);
    }
}
