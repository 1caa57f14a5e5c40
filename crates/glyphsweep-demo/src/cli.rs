#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo renderer.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `GLYPHSWEEP_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Glyphsweep Demo — offline frame renderer for the decode animation

USAGE:
    glyphsweep-demo [OPTIONS]

OPTIONS:
    --width=N       Surface width in pixels (default: 720)
    --height=N      Surface height in pixels (default: 336)
    --out=DIR       Output directory for PNG frames (default: frames)
    --fps=N         Frames per second of simulated time (default: 30)
    --phase-ms=N    Simulated milliseconds spent per phase (default: 4000)
    --seed=N        RNG seed for reproducible noise (default: wall clock)
    --help, -h      Show this help message
    --version, -V   Show version

The demo walks the four pipeline phases in order (extracting, researching,
generating, complete) with sample data, ticking the engine at a fixed
simulated frame interval and writing every painted frame as a PNG.

ENVIRONMENT VARIABLES:
    GLYPHSWEEP_DEMO_WIDTH       Override --width
    GLYPHSWEEP_DEMO_HEIGHT      Override --height
    GLYPHSWEEP_DEMO_OUT         Override --out
    GLYPHSWEEP_DEMO_FPS         Override --fps
    GLYPHSWEEP_DEMO_PHASE_MS    Override --phase-ms
    GLYPHSWEEP_DEMO_SEED        Override --seed
    RUST_LOG                    Tracing filter (e.g. glyphsweep_engine=debug)";

/// Parsed command-line options.
pub struct Opts {
    /// Surface width in pixels.
    pub width: usize,
    /// Surface height in pixels.
    pub height: usize,
    /// Output directory for PNG frames.
    pub out_dir: String,
    /// Simulated frames per second.
    pub fps: u32,
    /// Simulated milliseconds spent in each phase.
    pub phase_ms: u64,
    /// RNG seed; `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: 720,
            height: 336,
            out_dir: "frames".into(),
            fps: 30,
            phase_ms: 4000,
            seed: None,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Ok(val) = env::var("GLYPHSWEEP_DEMO_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = n;
        }
        if let Ok(val) = env::var("GLYPHSWEEP_DEMO_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.height = n;
        }
        if let Ok(val) = env::var("GLYPHSWEEP_DEMO_OUT") {
            opts.out_dir = val;
        }
        if let Ok(val) = env::var("GLYPHSWEEP_DEMO_FPS")
            && let Ok(n) = val.parse()
        {
            opts.fps = n;
        }
        if let Ok(val) = env::var("GLYPHSWEEP_DEMO_PHASE_MS")
            && let Ok(n) = val.parse()
        {
            opts.phase_ms = n;
        }
        if let Ok(val) = env::var("GLYPHSWEEP_DEMO_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = Some(n);
        }

        // Parse command-line args (override env vars)
        let args: Vec<String> = env::args().skip(1).collect();
        for arg in &args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("glyphsweep-demo {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = parse_or_die(val, "--width");
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = parse_or_die(val, "--height");
                    } else if let Some(val) = other.strip_prefix("--out=") {
                        opts.out_dir = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = parse_or_die(val, "--fps");
                    } else if let Some(val) = other.strip_prefix("--phase-ms=") {
                        opts.phase_ms = parse_or_die(val, "--phase-ms");
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_or_die(val, "--seed"));
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
        }

        if opts.width == 0 || opts.height == 0 || opts.fps == 0 {
            eprintln!("--width, --height and --fps must be nonzero");
            process::exit(1);
        }

        opts
    }
}

fn parse_or_die<T: std::str::FromStr>(val: &str, flag: &str) -> T {
    match val.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid {flag} value: {val}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.width, 720);
        assert_eq!(opts.height, 336);
        assert_eq!(opts.out_dir, "frames");
        assert_eq!(opts.fps, 30);
        assert_eq!(opts.phase_ms, 4000);
        assert!(opts.seed.is_none());
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_contains_env_vars() {
        assert!(HELP_TEXT.contains("GLYPHSWEEP_DEMO_WIDTH"));
        assert!(HELP_TEXT.contains("GLYPHSWEEP_DEMO_SEED"));
        assert!(HELP_TEXT.contains("RUST_LOG"));
    }
}
