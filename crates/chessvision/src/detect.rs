//! End-to-end helpers: frame in, edge map out.

use crate::capture::{capture_all, CaptureError, DisplayCapture};
use crate::convert::{gray16_image, grayscale_rgba8, to_gray16_image};
use crate::snapshot::SnapshotWriter;
use chessvision_core::{canny, CannyParams, EdgeStats, PixelBuffer};
use image::RgbaImage;
use log::{debug, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Edge map of one display.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    /// Display index within the frame.
    pub display: usize,
    pub edges: PixelBuffer<f64>,
    pub stats: EdgeStats,
}

/// Grayscale + Canny on one image.
///
/// With `snapshots`, `grayscale.png` and `canny.png` are written as 16-bit
/// PNGs. A failed write is logged and otherwise ignored.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params, snapshots), fields(width = img.width(), height = img.height()))
)]
pub fn detect_edges(
    img: &RgbaImage,
    params: &CannyParams,
    snapshots: Option<&SnapshotWriter>,
) -> PixelBuffer<f64> {
    let gray = grayscale_rgba8(img);
    if let Some(writer) = snapshots {
        if let Err(e) = writer.write("grayscale", &gray16_image(&gray)) {
            warn!("grayscale snapshot skipped: {e}");
        }
    }

    let edges = canny(&gray, params);
    if let Some(writer) = snapshots {
        if let Err(e) = writer.write("canny", &to_gray16_image(&edges)) {
            warn!("canny snapshot skipped: {e}");
        }
    }
    edges
}

/// Capture every display and detect edges on each, in display order.
///
/// Snapshots of display `i` get `display{i}_` appended to the writer's prefix.
pub fn process_frame(
    source: &dyn DisplayCapture,
    params: &CannyParams,
    snapshots: Option<&SnapshotWriter>,
) -> Result<Vec<EdgeMap>, CaptureError> {
    let frames = capture_all(source)?;
    let maps = frames
        .iter()
        .enumerate()
        .map(|(display, img)| {
            let writer = snapshots.map(|w| w.scoped(&format!("display{display}_")));
            let edges = detect_edges(img, params, writer.as_ref());
            let stats = EdgeStats::from_edges(&edges);
            debug!(
                "display {display}: {} edge pixels, max {:.1}",
                stats.edge_pixels, stats.max_magnitude
            );
            EdgeMap {
                display,
                edges,
                stats,
            }
        })
        .collect();
    Ok(maps)
}
