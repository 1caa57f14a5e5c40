#![forbid(unsafe_code)]

//! Offline frame renderer for the decode animation.
//!
//! Walks the four pipeline phases with sample data at a fixed simulated
//! frame cadence and writes every painted frame to a PNG sequence. Frames
//! are deterministic when `--seed` is given, so the output is suitable for
//! capture pipelines and visual regression checks.

mod cli;

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glyphsweep_engine::engine::EngineConfig;
use glyphsweep_engine::{DecodeEngine, EngineInput, Phase};
use glyphsweep_render::Surface;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum DemoError {
    Io(io::Error),
    Encode(image::ImageError),
    /// Surface dimensions exceed what the PNG encoder can address.
    SurfaceTooLarge { width: usize, height: usize },
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Encode(e) => write!(f, "png encode error: {e}"),
            Self::SurfaceTooLarge { width, height } => {
                write!(f, "surface {width}x{height} too large to encode")
            }
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::SurfaceTooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for DemoError {
    fn from(e: image::ImageError) -> Self {
        Self::Encode(e)
    }
}

/// Sample inputs in pipeline order, as a host application would send them.
fn phase_script() -> [EngineInput; 4] {
    let theme = Some("integration gaps".to_string());
    [
        EngineInput {
            phase: Phase::Extracting,
            ..Default::default()
        },
        EngineInput {
            phase: Phase::Researching,
            top_theme: theme.clone(),
            ..Default::default()
        },
        EngineInput {
            phase: Phase::Generating,
            top_theme: theme,
            arr_at_risk: Some(1_300_000.0),
            ..Default::default()
        },
        EngineInput {
            phase: Phase::Complete,
            recommendation: Some(
                "STOP: Mobile Redesign\nBUILD: Enterprise SSO\n+$252K retained ARR".into(),
            ),
            ..Default::default()
        },
    ]
}

fn write_frame(surface: &Surface, path: &Path) -> Result<(), DemoError> {
    let (w, h) = (surface.width(), surface.height());
    let (Ok(w32), Ok(h32)) = (u32::try_from(w), u32::try_from(h)) else {
        return Err(DemoError::SurfaceTooLarge {
            width: w,
            height: h,
        });
    };
    let img = image::RgbaImage::from_raw(w32, h32, surface.pixels().to_vec()).ok_or(
        DemoError::SurfaceTooLarge {
            width: w,
            height: h,
        },
    )?;
    img.save(path)?;
    Ok(())
}

fn run(opts: &cli::Opts) -> Result<(), DemoError> {
    fs::create_dir_all(&opts.out_dir)?;
    let out_dir = PathBuf::from(&opts.out_dir);

    let mut engine = match opts.seed {
        Some(seed) => {
            DecodeEngine::with_seed(opts.width, opts.height, EngineConfig::default(), seed)
        }
        None => DecodeEngine::new(opts.width, opts.height),
    };

    let dt = Duration::from_secs(1) / opts.fps;
    let frames_per_phase = (opts.phase_ms * u64::from(opts.fps)).div_ceil(1000);
    let mut frame_no: u64 = 0;

    for input in phase_script() {
        info!(phase = input.phase.as_str(), frames_per_phase, "phase start");
        engine.on_input_changed(&input);
        for _ in 0..frames_per_phase {
            engine.tick(dt);
            let path = out_dir.join(format!("frame_{frame_no:05}.png"));
            write_frame(engine.surface(), &path)?;
            frame_no += 1;
        }
    }

    info!(frames = frame_no, out_dir = %out_dir.display(), "done");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = cli::Opts::parse();
    if let Err(e) = run(&opts) {
        eprintln!("glyphsweep-demo: {e}");
        std::process::exit(1);
    }
}
