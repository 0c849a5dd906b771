use chessvision::capture::{CaptureError, FileCapture};
use chessvision::convert::to_gray16_image;
use chessvision::detect::process_frame;
use chessvision::snapshot::SnapshotWriter;
use chessvision::CannyParams;
use clap::Parser;
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run Canny edge detection on captured frames, one image file per display.
#[derive(Parser, Debug)]
#[command(name = "chessvision", version, about)]
struct Cli {
    /// Input frames; each file stands in for one display.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for `<stem>_edges.png` outputs.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON file with `CannyParams` overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write grayscale and edge snapshots to `<out-dir>/debug`.
    #[arg(long)]
    snapshots: bool,

    /// off, error, warn, info, debug or trace.
    #[arg(long, default_value = "warn", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level `{s}`"))
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("failed to read config {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("failed to create output directory {path}")]
    OutDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    WriteEdges {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn load_params(path: Option<&Path>) -> Result<CannyParams, CliError> {
    let Some(path) = path else {
        return Ok(CannyParams::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    out_dir.join(format!("{stem}_edges.png"))
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let params = load_params(cli.config.as_deref())?;
    std::fs::create_dir_all(&cli.out_dir).map_err(|source| CliError::OutDir {
        path: cli.out_dir.clone(),
        source,
    })?;

    let source = FileCapture::new(cli.inputs.clone());
    let snapshots = cli
        .snapshots
        .then(|| SnapshotWriter::new(cli.out_dir.join("debug")));
    let maps = process_frame(&source, &params, snapshots.as_ref())?;

    for (map, input) in maps.iter().zip(source.paths()) {
        let path = output_path(&cli.out_dir, input);
        to_gray16_image(&map.edges)
            .save(&path)
            .map_err(|source| CliError::WriteEdges {
                path: path.clone(),
                source,
            })?;
        info!("wrote {}", path.display());
        println!(
            "display {}: {}x{}, {} edge pixels, max {:.1} -> {}",
            map.display,
            map.edges.width(),
            map.edges.height(),
            map.stats.edge_pixels,
            map.stats.max_magnitude,
            path.display()
        );
    }
    Ok(())
}

/// `RUST_LOG` wins over `--log-level` when set.
#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// `RUST_LOG` wins over `--log-level` when set. Stage spans are reported on
/// close so their timings show up; `log` records are bridged into the
/// subscriber.
#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

fn report(err: &dyn std::error::Error) {
    eprintln!("error: {err}");
    let mut cause = err.source();
    while let Some(e) = cause {
        eprintln!("  caused by: {e}");
        cause = e.source();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
