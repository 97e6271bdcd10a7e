//! harmony - hue harmonization for PNG and JPEG images
//!
//! Finds the harmonic template that best fits an image's hues and pulls
//! every hue toward it.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use harmony_core::{Rect, TemplateShape};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "harmony")]
#[command(author, version, about = "Color harmonization with hue templates")]
#[command(long_about = "
Fits one of seven harmonic hue templates (i, V, L, I, T, Y, X) to an image
and shifts each pixel's hue toward the nearest template sector. Saturation
and value are left untouched.

Examples:
  harmony templates                              # List template shapes
  harmony analyze photo.jpg                      # Best template and scores
  harmony analyze photo.jpg --region 0,0,200,100 --json
  harmony harmonize photo.jpg -o out.png         # Search and recolor
  harmony harmonize photo.jpg -o out.jpg -t V --degrees 30 -q 95
  harmony -vv -j 4 harmonize in.png -o out.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more: -v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List the template catalog
    #[command(visible_alias = "t")]
    Templates,

    /// Search the best template without writing anything
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Recolor an image toward a harmonic template
    #[command(visible_alias = "h")]
    Harmonize(HarmonizeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Input image
    input: PathBuf,

    /// Analyze only this region: x,y,w,h
    #[arg(short, long)]
    region: Option<Rect>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct HarmonizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image (.png or .jpg)
    #[arg(short, long)]
    output: PathBuf,

    /// Template shape: i, V, L, I, T, Y, X (default: search all)
    #[arg(short, long)]
    template: Option<TemplateShape>,

    /// Template rotation in hue steps, 0-255 (default: search)
    #[arg(short, long, requires = "template", conflicts_with = "degrees")]
    alpha: Option<u8>,

    /// Template rotation in degrees (wraps around the wheel)
    #[arg(short, long, requires = "template", allow_negative_numbers = true)]
    degrees: Option<f64>,

    /// Recolor only this region: x,y,w,h
    #[arg(short, long)]
    region: Option<Rect>,

    /// JPEG quality 1-100
    #[arg(short, long, default_value = "90", value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

impl Cli {
    /// Installs the global subscriber. `RUST_LOG` overrides `-v`.
    fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Templates => commands::templates::run(cli.verbose),
        Commands::Analyze(args) => commands::analyze::run(args, cli.verbose),
        Commands::Harmonize(args) => commands::harmonize::run(args, cli.verbose),
    }
}
