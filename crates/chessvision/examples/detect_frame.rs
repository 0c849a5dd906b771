use chessvision::convert::{grayscale_dynamic, to_gray16_image};
use chessvision::{canny_stages, CannyParams, EdgeStats};
use image::ImageReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_frame <image_path> [out.png]");
        return Ok(());
    };
    let out = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "canny.png".to_string());

    let img = ImageReader::open(&path)?.decode()?;
    let gray = grayscale_dynamic(&img);
    let stages = canny_stages(&gray, &CannyParams::default());
    let stats = EdgeStats::from_edges(&stages.edges);

    println!(
        "{}x{}: low={:.1} high={:.1}, {} edge pixels",
        gray.width(),
        gray.height(),
        stages.threshold.low,
        stages.threshold.high,
        stats.edge_pixels
    );
    to_gray16_image(&stages.edges).save(&out)?;
    Ok(())
}
