//! Front end for the `chessvision-core` edge detector.
//!
//! This crate provides:
//! - re-exports of the pipeline types from `chessvision-core`
//! - (feature `image`) conversion between `image` buffers and
//!   [`PixelBuffer`], the [`capture::DisplayCapture`] seam for screen
//!   grabbers, debug snapshots, and per-frame detection helpers
//! - (feature `cli`) the `chessvision` binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use chessvision::capture::FileCapture;
//! use chessvision::detect::process_frame;
//! use chessvision::CannyParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let displays = FileCapture::new(vec!["screen0.png".into()]);
//! let maps = process_frame(&displays, &CannyParams::default(), None)?;
//! for map in &maps {
//!     println!("display {}: {} edge pixels", map.display, map.stats.edge_pixels);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `chessvision::core`: the full pipeline crate.
//! - `chessvision::capture`: display capture seam and a file-backed source.
//! - `chessvision::convert`: `image` <-> [`PixelBuffer`] conversion.
//! - `chessvision::snapshot`: 16-bit PNG debug snapshots.
//! - `chessvision::detect`: grayscale + Canny per image or per frame.

pub use chessvision_core as core;

pub use chessvision_core::{
    canny, canny_stages, grayscale, CannyParams, CannyStages, EdgeStats, PixelBuffer, Threshold,
    ThresholdParams,
};

#[cfg(feature = "image")]
pub mod capture;
#[cfg(feature = "image")]
pub mod convert;
#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod snapshot;
