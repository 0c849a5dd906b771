//! Display capture seam.
//!
//! Grabbing pixels from the OS is left to implementors of [`DisplayCapture`].
//! [`capture_all`] enforces the frame contract: one image per display, in
//! display order, or an error naming the first display that failed.

use image::RgbaImage;
use log::debug;
use std::path::PathBuf;

/// Error type returned by a single display grab.
pub type DisplayError = Box<dyn std::error::Error + Send + Sync>;

/// A source of per-display frames.
pub trait DisplayCapture {
    /// Number of active displays.
    fn display_count(&self) -> usize;

    /// Grab the full contents of `display` (`0..display_count()`).
    fn capture(&self, display: usize) -> Result<RgbaImage, DisplayError>;
}

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("capture failed for display {display}")]
    Display {
        display: usize,
        #[source]
        source: DisplayError,
    },
}

impl CaptureError {
    /// Index of the display that failed.
    pub fn display(&self) -> usize {
        match self {
            CaptureError::Display { display, .. } => *display,
        }
    }
}

/// Capture every display. Any failure fails the whole request so that
/// result indices keep matching display indices.
pub fn capture_all(source: &dyn DisplayCapture) -> Result<Vec<RgbaImage>, CaptureError> {
    let count = source.display_count();
    let mut frames = Vec::with_capacity(count);
    for display in 0..count {
        let img = source
            .capture(display)
            .map_err(|source| CaptureError::Display { display, source })?;
        debug!(
            "captured display {display}: {}x{}",
            img.width(),
            img.height()
        );
        frames.push(img);
    }
    Ok(frames)
}

/// Replays image files as displays, one file per display.
#[derive(Clone, Debug, Default)]
pub struct FileCapture {
    paths: Vec<PathBuf>,
}

impl FileCapture {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl DisplayCapture for FileCapture {
    fn display_count(&self) -> usize {
        self.paths.len()
    }

    fn capture(&self, display: usize) -> Result<RgbaImage, DisplayError> {
        let path = self
            .paths
            .get(display)
            .ok_or_else(|| format!("no display {display}"))?;
        Ok(image::open(path)?.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::error::Error;

    struct Fake {
        sizes: Vec<Option<u32>>,
    }

    impl DisplayCapture for Fake {
        fn display_count(&self) -> usize {
            self.sizes.len()
        }

        fn capture(&self, display: usize) -> Result<RgbaImage, DisplayError> {
            match self.sizes[display] {
                Some(side) => Ok(RgbaImage::from_pixel(side, side, Rgba([1, 2, 3, 255]))),
                None => Err("display asleep".into()),
            }
        }
    }

    #[test]
    fn captures_in_display_order() {
        let frames = capture_all(&Fake {
            sizes: vec![Some(2), Some(5), Some(3)],
        })
        .unwrap();
        let widths: Vec<u32> = frames.iter().map(|f| f.width()).collect();
        assert_eq!(widths, vec![2, 5, 3]);
    }

    #[test]
    fn zero_displays_is_empty() {
        assert!(capture_all(&Fake { sizes: vec![] }).unwrap().is_empty());
    }

    #[test]
    fn failure_names_the_display() {
        let err = capture_all(&Fake {
            sizes: vec![Some(2), None, Some(3)],
        })
        .unwrap_err();
        assert_eq!(err.display(), 1);
        assert_eq!(err.to_string(), "capture failed for display 1");
        assert_eq!(err.source().unwrap().to_string(), "display asleep");
    }

    #[test]
    fn missing_file_fails_capture() {
        let files = FileCapture::new(vec!["/nonexistent/frame.png".into()]);
        let err = capture_all(&files).unwrap_err();
        assert_eq!(err.display(), 0);
    }
}
