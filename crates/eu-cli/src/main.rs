//! eu - render float images through the display pipeline without a window
//!
//! Drives the same ROI sampler and transform chain an interactive viewer
//! uses and writes the resulting frame to disk.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eu_color::{Channels, Curve, GamutMap, InputSpace, OutputSpace};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "eu")]
#[command(author, version, about = "Floating-point image viewer pipeline, headless")]
#[command(long_about = "
Maps a PFM file into memory, samples a region of interest, applies exposure,
color conversion, gamut mapping and a tone curve, and writes an 8-bit frame.

Examples:
  eu info render.pfm                          # Header and value range
  eu render render.pfm -o frame.png           # 512x512 at 1:1
  eu render render.pfm -o frame.png --fit --exposure -1.5
  eu render spectral.pfm -o frame.png --colorin xyz --colorout adobergb --gamut project
  eu render spectral.pfm -o frame.ppm --colorin xyz --colorout custom --profile rec2020
  eu render render.pfm -o zoom.png --x 120 --y 80 --scale 4 --curve viridis --channel green
  eu ramp -o ramp.pfm --width 256 --height 32
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one frame of a PFM file to PNG or PPM
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Show PFM header and per-channel statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Write a horizontal ramp as a PFM test image
    Ramp(RampArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Input PFM file
    input: PathBuf,

    /// Output frame (.png or .ppm)
    #[arg(short, long)]
    output: PathBuf,

    /// Frame width
    #[arg(long, default_value = "512")]
    width: u32,

    /// Frame height
    #[arg(long, default_value = "512")]
    height: u32,

    /// ROI left edge in input pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x: f32,

    /// ROI top edge in input pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    y: f32,

    /// Output pixels per input pixel
    #[arg(long, default_value = "1", conflicts_with = "fit")]
    scale: f32,

    /// Scale so the whole image fits the frame
    #[arg(long)]
    fit: bool,

    /// Exposure in stops
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    exposure: f32,

    /// Input interpretation: passthrough, xyz
    #[arg(long, default_value = "passthrough")]
    colorin: InputSpace,

    /// Output space: xyz, rec709, srgb, adobergb, custom
    #[arg(long, default_value = "srgb")]
    colorout: OutputSpace,

    /// Display profile for --colorout custom: srgb, rec2020, lenovo-e145
    #[arg(long)]
    profile: Option<String>,

    /// Out-of-gamut policy: clamp, project, mark
    #[arg(long, default_value = "clamp")]
    gamut: GamutMap,

    /// Tone curve: none, contrast, tonemap, isolines, viridis
    #[arg(long, default_value = "none")]
    curve: Curve,

    /// Channel preview: red, green, blue, rgb
    #[arg(long, default_value = "rgb")]
    channel: Channels,
}

#[derive(Args)]
struct InfoArgs {
    /// Input PFM file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Skip the value statistics pass
    #[arg(long)]
    header_only: bool,
}

#[derive(Args)]
struct RampArgs {
    /// Output PFM file
    #[arg(short, long)]
    output: PathBuf,

    /// Image width
    #[arg(long, default_value = "256")]
    width: u32,

    /// Image height
    #[arg(long, default_value = "32")]
    height: u32,

    /// Value at the right edge
    #[arg(long, default_value = "1")]
    max: f32,

    /// Write a single-channel file
    #[arg(long)]
    gray: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Ramp(args) => commands::ramp::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults() {
        let cli = Cli::try_parse_from(["eu", "render", "in.pfm", "-o", "out.png"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!((args.width, args.height), (512, 512));
        assert_eq!(args.colorin, InputSpace::Passthrough);
        assert_eq!(args.colorout, OutputSpace::Srgb);
        assert_eq!(args.gamut, GamutMap::Clamp);
        assert_eq!(args.curve, Curve::None);
        assert_eq!(args.channel, Channels::Rgb);
        assert!(!args.fit);
    }

    #[test]
    fn render_parses_enums_and_negatives() {
        let cli = Cli::try_parse_from([
            "eu", "render", "in.pfm", "-o", "out.png", "--exposure", "-2", "--colorin", "xyz",
            "--colorout", "adobergb", "--gamut", "mark", "--curve", "viridis", "--channel", "b",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.exposure, -2.0);
        assert_eq!(args.colorin, InputSpace::Xyz);
        assert_eq!(args.colorout, OutputSpace::AdobeRgb);
        assert_eq!(args.gamut, GamutMap::Mark);
        assert_eq!(args.curve, Curve::Viridis);
        assert_eq!(args.channel, Channels::Blue);
    }

    #[test]
    fn unknown_curve_rejected() {
        let res = Cli::try_parse_from(["eu", "render", "in.pfm", "-o", "o.png", "--curve", "gamma"]);
        assert!(res.is_err());
    }

    #[test]
    fn fit_conflicts_with_scale() {
        let res = Cli::try_parse_from([
            "eu", "render", "in.pfm", "-o", "o.png", "--fit", "--scale", "2",
        ]);
        assert!(res.is_err());
    }
}
