//! Canny pipeline: blur, Sobel gradients, thinning, adaptive threshold, hysteresis.

use crate::buffer::PixelBuffer;
use crate::gradient::{combine_gradients, sobel_derivatives, Gradient};
use crate::hysteresis::hysteresis;
use crate::kernel::{convolve, GAUSSIAN_5X5};
use crate::nms::non_maximum_suppression;
use crate::threshold::{apply_threshold, compute_threshold, Threshold, ThresholdParams};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Tunable parameters of the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub threshold: ThresholdParams,
}

/// Every intermediate buffer of one pipeline run.
#[derive(Clone, Debug)]
pub struct CannyStages {
    pub blurred: PixelBuffer<f64>,
    pub gradient_x: PixelBuffer<f64>,
    pub gradient_y: PixelBuffer<f64>,
    pub gradients: PixelBuffer<Gradient>,
    pub thinned: PixelBuffer<f64>,
    pub threshold: Threshold,
    pub thresholded: PixelBuffer<f64>,
    pub edges: PixelBuffer<f64>,
}

/// Summary of an edge map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeStats {
    /// Number of nonzero pixels.
    pub edge_pixels: usize,
    pub max_magnitude: f64,
}

impl EdgeStats {
    pub fn from_edges(edges: &PixelBuffer<f64>) -> Self {
        Self {
            edge_pixels: edges.as_slice().iter().filter(|&&v| v > 0.0).count(),
            max_magnitude: edges.max_value(),
        }
    }
}

/// Run the pipeline on a grayscale image and keep every stage.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(gray, params), fields(width = gray.width(), height = gray.height()))
)]
pub fn canny_stages(gray: &PixelBuffer<u16>, params: &CannyParams) -> CannyStages {
    let raw = gray.to_f64();
    let blurred = convolve(&raw, &GAUSSIAN_5X5);
    let (gradient_x, gradient_y) = sobel_derivatives(&blurred);
    let gradients = combine_gradients(&gradient_x, &gradient_y);

    let thinned = non_maximum_suppression(&gradients);
    let threshold = compute_threshold(&thinned, &params.threshold);
    debug!(
        "{}x{} thresholds low={:.1} high={:.1}",
        gray.width(),
        gray.height(),
        threshold.low,
        threshold.high
    );
    let thresholded = apply_threshold(&thinned, &threshold);
    let edges = hysteresis(&thresholded, &threshold);

    CannyStages {
        blurred,
        gradient_x,
        gradient_y,
        gradients,
        thinned,
        threshold,
        thresholded,
        edges,
    }
}

/// Run the pipeline and return only the edge map.
pub fn canny(gray: &PixelBuffer<u16>, params: &CannyParams) -> PixelBuffer<f64> {
    canny_stages(gray, params).edges
}
