//! Conversion between `image` crate buffers and [`PixelBuffer`].

use chessvision_core::{grayscale, PixelBuffer, Raster};
use image::{DynamicImage, ImageBuffer, Luma, Pixel, Rgba};

/// 16-bit single-channel image, the format of debug snapshots and edge maps.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// [`Raster`] adapter over an `image` RGBA buffer.
pub struct ImageRaster<'a, P: Pixel>(pub &'a ImageBuffer<P, Vec<P::Subpixel>>);

impl Raster for ImageRaster<'_, Rgba<u8>> {
    fn width(&self) -> usize {
        self.0.width() as usize
    }

    fn height(&self) -> usize {
        self.0.height() as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u16; 3] {
        let [r, g, b, _] = self.0.get_pixel(x as u32, y as u32).0;
        [r as u16 * 257, g as u16 * 257, b as u16 * 257]
    }
}

impl Raster for ImageRaster<'_, Rgba<u16>> {
    fn width(&self) -> usize {
        self.0.width() as usize
    }

    fn height(&self) -> usize {
        self.0.height() as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u16; 3] {
        let [r, g, b, _] = self.0.get_pixel(x as u32, y as u32).0;
        [r, g, b]
    }
}

/// Luminance of an 8-bit RGBA frame.
pub fn grayscale_rgba8(img: &image::RgbaImage) -> PixelBuffer<u16> {
    grayscale(&ImageRaster(img))
}

/// Luminance of any decoded image, keeping 16-bit precision when present.
pub fn grayscale_dynamic(img: &DynamicImage) -> PixelBuffer<u16> {
    match img {
        DynamicImage::ImageRgba8(rgba) => grayscale(&ImageRaster(rgba)),
        other => grayscale(&ImageRaster(&other.to_rgba16())),
    }
}

/// Wrap a 16-bit buffer as an `image` grayscale image.
pub fn gray16_image(buf: &PixelBuffer<u16>) -> Gray16Image {
    ImageBuffer::from_fn(buf.width() as u32, buf.height() as u32, |x, y| {
        Luma([*buf.get(x as usize, y as usize)])
    })
}

/// Clamp a floating buffer to `0..=65535` and truncate to 16 bits.
pub fn to_gray16_image(buf: &PixelBuffer<f64>) -> Gray16Image {
    ImageBuffer::from_fn(buf.width() as u32, buf.height() as u32, |x, y| {
        let v = *buf.get(x as usize, y as usize);
        Luma([v.clamp(0.0, u16::MAX as f64) as u16])
    })
}
