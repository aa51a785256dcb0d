use std::path::PathBuf;

use anyhow::Context;
use atlasc_core::config::AtlasConfig;
use atlasc_core::manifest::to_manifest_json;
use atlasc_core::pipeline::{self, Input};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "atlasc",
    about = "Pack sprite images into a texture atlas with optional per-sprite meshes",
    version,
    author
)]
struct Cli {
    /// Input image path; repeat to add more sprites.
    #[arg(short = 'i', long = "input")]
    input: Vec<PathBuf>,

    /// Output manifest path. The PNG is written alongside it with the same
    /// basename and a `.png` extension.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Sheet width cap.
    #[arg(short = 'W', long = "max-width", default_value_t = 2048)]
    max_width: u32,

    /// Sheet height cap.
    #[arg(short = 'H', long = "max-height", default_value_t = 2048)]
    max_height: u32,

    /// Transparent border between sprites.
    #[arg(short = 'B', long = "border", default_value_t = 2)]
    border: u32,

    /// Padding band inside each sprite's sheet slot.
    #[arg(short = 'P', long = "padding", default_value_t = 1)]
    padding: u32,

    /// Round the final sheet to a power of two.
    #[arg(short = '2', long = "pot")]
    pot: bool,

    /// Generate a triangulated mesh per sprite.
    #[arg(short = 'm', long = "mesh")]
    mesh: bool,

    /// Cap on the simplified outline vertex count.
    #[arg(short = 'M', long = "max-verts", default_value_t = 25)]
    max_verts: u32,

    /// Alpha threshold (0-255) above which a pixel is considered opaque.
    #[arg(short = 'A', long = "alpha-threshold", default_value_t = 20)]
    alpha_threshold: u8,

    /// Build the atlas in memory and log stats without writing any files.
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Increase verbosity (-v, -vv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (overrides verbose).
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);

    if let Err(err) = run(cli) {
        error!("{err:#}");
        std::process::exit(255);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.input.is_empty() {
        anyhow::bail!("at least one --input/-i path is required");
    }
    let output = cli
        .output
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--output/-o is required"))?;

    let cfg = AtlasConfig {
        max_width: cli.max_width,
        max_height: cli.max_height,
        border: cli.border,
        padding: cli.padding,
        pot: cli.pot,
        mesh: cli.mesh,
        max_verts: cli.max_verts,
        alpha_threshold: cli.alpha_threshold,
    };

    let inputs = cli
        .input
        .iter()
        .map(|path| {
            let name = path.to_string_lossy().replace('\\', "/");
            pipeline::load_input(path, name)
        })
        .collect::<atlasc_core::Result<Vec<Input>>>()?;

    let out = pipeline::make(inputs, &cfg)?;
    let stats = out.record.stats();
    info!(
        sprites = out.record.sprites.len(),
        width = out.record.width,
        height = out.record.height,
        occupancy = stats.occupancy(),
        "atlas built"
    );

    if cli.dry_run {
        info!("dry run: not writing output files");
        return Ok(());
    }

    let png_path = output.with_extension("png");
    let image_name = png_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "atlas.png".to_string());

    out.canvas
        .save(&png_path)
        .map_err(atlasc_core::AtlasError::from)
        .with_context(|| format!("writing atlas image to {}", png_path.display()))?;

    let manifest = to_manifest_json(&out.record, &image_name);
    let manifest_text =
        serde_json::to_string_pretty(&manifest).context("serializing manifest to JSON")?;
    std::fs::write(&output, manifest_text).map_err(|source| {
        atlasc_core::AtlasError::OutputWriteFailed {
            path: output.clone(),
            source,
        }
    })?;

    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
