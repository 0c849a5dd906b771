//! Adaptive double thresholding driven by the median edge strength.

use crate::buffer::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Low and high cutoffs derived from one image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub low: f64,
    pub high: f64,
}

/// How thresholds scale with the median thinned magnitude.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// `low = low_ratio * median`.
    pub low_ratio: f64,
    /// `high = high_ratio * median`.
    pub high_ratio: f64,
    /// Take the median over nonzero magnitudes only.
    ///
    /// Off by default: the median then runs over every pixel, suppressed
    /// ones included.
    pub ignore_zeros: bool,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            low_ratio: 2.0 / 3.0,
            high_ratio: 4.0 / 3.0,
            ignore_zeros: false,
        }
    }
}

impl Threshold {
    pub fn from_median(median: f64, params: &ThresholdParams) -> Self {
        Self {
            low: params.low_ratio * median,
            high: params.high_ratio * median,
        }
    }

    /// Value above `high`: seeds an edge.
    #[inline]
    pub fn is_strong(&self, value: f64) -> bool {
        value > self.high
    }

    /// Value in `[low, high]`: kept only when linked to a strong edge.
    #[inline]
    pub fn is_weak(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Median of `values`: the middle element for odd counts, the mean of the two
/// middle elements for even counts, `0.0` when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Derive the thresholds of a thinned magnitude buffer.
pub fn compute_threshold(thinned: &PixelBuffer<f64>, params: &ThresholdParams) -> Threshold {
    let m = if params.ignore_zeros {
        let nonzero: Vec<f64> = thinned
            .as_slice()
            .iter()
            .copied()
            .filter(|&v| v != 0.0)
            .collect();
        median(&nonzero)
    } else {
        median(thinned.as_slice())
    };
    Threshold::from_median(m, params)
}

/// Zero every value strictly below `threshold.low`; pass the rest through.
pub fn apply_threshold(thinned: &PixelBuffer<f64>, threshold: &Threshold) -> PixelBuffer<f64> {
    thinned.map(|&v| if v < threshold.low { 0.0 } else { v })
}
