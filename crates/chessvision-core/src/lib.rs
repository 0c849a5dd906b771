//! Canny edge detection for on-screen chessboard recognition.
//!
//! This crate turns a captured RGB(A) raster into an edge map and nothing
//! else. It does not capture screens or read image files; see the
//! `chessvision` crate for that.
//!
//! ## Quickstart
//!
//! ```
//! use chessvision_core::{canny, grayscale, CannyParams, RgbaView};
//!
//! let (w, h) = (16, 16);
//! let pixels: Vec<u8> = (0..w * h)
//!     .flat_map(|i| if i % w < 8 { [0, 0, 0, 255] } else { [255, 255, 255, 255] })
//!     .collect();
//! let view = RgbaView::new(w, h, &pixels).unwrap();
//!
//! let gray = grayscale(&view);
//! let edges = canny(&gray, &CannyParams::default());
//! assert_eq!(edges.dims(), (w, h));
//! ```
//!
//! Stages, each returning a new buffer of the input's size:
//! 1. [`grayscale`]: `0.299 R + 0.587 G + 0.114 B` on 16-bit expanded channels.
//! 2. [`convolve`] with [`GAUSSIAN_5X5`].
//! 3. [`convolve`] with [`SOBEL_X`] / [`SOBEL_Y`], fused by [`combine_gradients`].
//! 4. [`non_maximum_suppression`] along the snapped gradient direction.
//! 5. [`compute_threshold`] from the median magnitude, then [`apply_threshold`].
//! 6. [`hysteresis`] linking weak edges to strong ones.
//!
//! Convolution and suppression copy a border band (`size / 2` pixels, resp.
//! one pixel) from their input unchanged, so the image frame shows up in the
//! edge map.
//!
//! # Features
//!
//! - `rayon` – convolution, gradient fusion and suppression run over rows in
//!   parallel. Results are identical to the sequential path.
//! - `tracing` – instruments the stages with `tracing` spans. Installing a
//!   subscriber is left to the application.

mod buffer;
mod canny;
mod gradient;
mod hysteresis;
mod kernel;
mod nms;
mod raster;
mod threshold;

pub use buffer::{index, BufferError, PixelBuffer};
pub use canny::{canny, canny_stages, CannyParams, CannyStages, EdgeStats};
pub use gradient::{combine_gradients, sobel_derivatives, Gradient};
pub use hysteresis::{hysteresis, keep_mask};
pub use kernel::{convolve, Kernel, GAUSSIAN_5X5, SOBEL_X, SOBEL_Y};
pub use nms::{non_maximum_suppression, snap_direction, DirectionClass};
pub use raster::{grayscale, luminance, Raster, Rgba16View, RgbaView};
pub use threshold::{
    apply_threshold, compute_threshold, median, Threshold, ThresholdParams,
};
