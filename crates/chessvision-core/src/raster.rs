//! Raster input and luminance conversion.
//!
//! Capture backends hand over interleaved RGBA samples of whatever bit depth
//! they produce. The [`Raster`] trait normalises channel access to the 16-bit
//! range so that the grayscale result does not depend on the source depth.

use crate::buffer::{BufferError, PixelBuffer};

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Read access to an RGB(A) raster, origin at the top-left.
pub trait Raster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Red, green and blue at `(x, y)`, expanded to `0..=65535`. Alpha is not exposed.
    fn rgb(&self, x: usize, y: usize) -> [u16; 3];
}

fn check_len(width: usize, height: usize, got: usize) -> Result<(), BufferError> {
    let expected = width * height * 4;
    if got != expected {
        return Err(BufferError::LengthMismatch {
            width,
            height,
            expected,
            got,
        });
    }
    Ok(())
}

/// Borrowed view over interleaved 8-bit RGBA samples.
#[derive(Clone, Copy, Debug)]
pub struct RgbaView<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> RgbaView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, BufferError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl Raster for RgbaView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u16; 3] {
        let i = (y * self.width + x) * 4;
        let px = &self.data[i..i + 3];
        // 0xAB -> 0xABAB
        [
            px[0] as u16 * 257,
            px[1] as u16 * 257,
            px[2] as u16 * 257,
        ]
    }
}

/// Borrowed view over interleaved 16-bit RGBA samples.
#[derive(Clone, Copy, Debug)]
pub struct Rgba16View<'a> {
    width: usize,
    height: usize,
    data: &'a [u16],
}

impl<'a> Rgba16View<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u16]) -> Result<Self, BufferError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl Raster for Rgba16View<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u16; 3] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Weighted luminance of expanded RGB channels, truncated to 16 bits.
#[inline]
pub fn luminance([r, g, b]: [u16; 3]) -> u16 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u16
}

/// Convert a raster into a single-channel 16-bit luminance buffer.
pub fn grayscale<R: Raster + ?Sized>(img: &R) -> PixelBuffer<u16> {
    PixelBuffer::from_fn(img.width(), img.height(), |x, y| luminance(img.rgb(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_rejects_short_buffer() {
        let data = [0u8; 4 * 5];
        assert!(RgbaView::new(2, 3, &data).is_err());
        assert!(RgbaView::new(5, 1, &data).is_ok());
    }

    #[test]
    fn eight_bit_white_expands_to_full_range() {
        let data = [255u8, 255, 255, 255];
        let view = RgbaView::new(1, 1, &data).unwrap();
        assert_eq!(view.rgb(0, 0), [65535; 3]);
        let gray = grayscale(&view);
        // Weights sum to 1.0 up to rounding; truncation may drop one unit.
        assert!(*gray.get(0, 0) >= 65534);
    }

    #[test]
    fn alpha_does_not_contribute() {
        let opaque = [10u8, 20, 30, 255];
        let clear = [10u8, 20, 30, 0];
        let a = grayscale(&RgbaView::new(1, 1, &opaque).unwrap());
        let b = grayscale(&RgbaView::new(1, 1, &clear).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn sixteen_bit_samples_pass_through() {
        let data = [1000u16, 2000, 3000, 65535];
        let view = Rgba16View::new(1, 1, &data).unwrap();
        assert_eq!(view.rgb(0, 0), [1000, 2000, 3000]);
        let expected = (0.299 * 1000.0 + 0.587 * 2000.0 + 0.114 * 3000.0) as u16;
        assert_eq!(*grayscale(&view).get(0, 0), expected);
    }

    #[test]
    fn luminance_is_bounded_by_brightest_channel() {
        let samples = [
            [0u16, 0, 0],
            [65535, 0, 0],
            [0, 65535, 0],
            [0, 0, 65535],
            [12345, 54321, 777],
            [40000, 40000, 40000],
            [257, 514, 65535],
        ];
        for rgb in samples {
            let y = luminance(rgb);
            let max = *rgb.iter().max().unwrap();
            assert!(y <= max, "{rgb:?} -> {y} exceeds {max}");
        }
    }

    #[test]
    fn grayscale_preserves_dimensions() {
        let data = vec![128u8; 7 * 3 * 4];
        let gray = grayscale(&RgbaView::new(7, 3, &data).unwrap());
        assert_eq!(gray.dims(), (7, 3));
    }
}
