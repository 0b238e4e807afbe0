//! PawnForge CLI
//!
//! Builds the revolved pawn mesh and, when source images are given, composes
//! its body texture.
//!
//! # Usage
//!
//! ```bash
//! # Build the default pawn and print mesh statistics
//! pawnforge
//!
//! # Use a configuration file and compose the texture
//! pawnforge --config pawn.json \
//!     --primary carpet_1.png --secondary carpet_2.png --logo logo.svg \
//!     --texture-out pawn_texture.png
//!
//! # Print the default configuration
//! pawnforge --print-config
//! ```

mod config;

use std::path::{Path, PathBuf};
use std::process;

use config::PawnConfig;
use pawn_core::{PawnError, Result};
use pawn_mesh::{build_pawn_mesh, TexRegion};
use pawn_render::prepare_mesh;
use pawn_texture::{compose_texture_seeded, ImageCrateDecoder, PixelCanvas, TextureSources};

fn print_usage() {
    eprintln!(
        r#"PawnForge

USAGE:
    pawnforge [OPTIONS]

OPTIONS:
    --config <file.json>      Load configuration (missing fields use defaults)
    --primary <image>         Primary tile image
    --secondary <image>       Secondary tile image
    --logo <file.svg>         Logo blended over the texture center
    --texture-out <file.png>  Where to write the composed texture
    --seed <u64>              Seed for tile selection (overrides config)
    --print-config            Print the effective configuration as JSON
    --help                    Show this help message
"#
    );
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    primary: Option<PathBuf>,
    secondary: Option<PathBuf>,
    logo: Option<PathBuf>,
    texture_out: Option<PathBuf>,
    seed: Option<u64>,
    print_config: bool,
}

fn parse_args(raw: &[String]) -> std::result::Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.iter().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", flag))
        };
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--primary" => args.primary = Some(PathBuf::from(value()?)),
            "--secondary" => args.secondary = Some(PathBuf::from(value()?)),
            "--logo" => args.logo = Some(PathBuf::from(value()?)),
            "--texture-out" => args.texture_out = Some(PathBuf::from(value()?)),
            "--seed" => {
                let text = value()?;
                args.seed = Some(
                    text.parse()
                        .map_err(|_| format!("--seed expects an unsigned integer, got '{}'", text))?,
                );
            }
            "--print-config" => args.print_config = true,
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(args)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let raw: Vec<String> = std::env::args().collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        process::exit(0);
    }
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}\n", msg);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PawnConfig::load(path)?,
        None => PawnConfig::default(),
    };
    if args.seed.is_some() {
        config.texture.seed = args.seed;
    }

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mesh = build_pawn_mesh(&config.mesh)?;
    let render_mesh = prepare_mesh(&mesh)?;
    let bounds = mesh.bounding_box();

    println!("Pawn mesh");
    println!("  vertices:      {}", mesh.vertex_count());
    println!("  triangles:     {}", mesh.triangle_count());
    println!("  cap vertices:  {}", mesh.region_count(TexRegion::Cap));
    println!(
        "  bounds:        ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    println!(
        "  gpu buffers:   {} vertex bytes, {} index bytes",
        render_mesh.vertex_buffer_bytes.len(),
        render_mesh.index_buffer_bytes.len()
    );

    match (&args.primary, &args.secondary, &args.logo) {
        (Some(primary), Some(secondary), Some(logo)) => {
            match build_texture(&config, primary, secondary, logo) {
                Ok(canvas) => {
                    println!("Texture {}x{}", canvas.width(), canvas.height());
                    if let Some(out) = &args.texture_out {
                        write_png(&canvas, out)?;
                        println!("  written to {}", out.display());
                    }
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "texture skipped");
                }
                Err(e) => return Err(e),
            }
        }
        (None, None, None) => {}
        _ => {
            return Err(PawnError::Config(
                "--primary, --secondary and --logo must be given together".into(),
            ))
        }
    }
    Ok(())
}

fn build_texture(config: &PawnConfig, primary: &Path, secondary: &Path, logo: &Path) -> Result<PixelCanvas> {
    let primary = std::fs::read(primary)?;
    let secondary = std::fs::read(secondary)?;
    let logo = std::fs::read(logo)?;
    let sources = TextureSources {
        primary: &primary,
        secondary: &secondary,
        logo_svg: &logo,
    };
    compose_texture_seeded(&config.texture, &sources, &ImageCrateDecoder::default())
}

fn write_png(canvas: &PixelCanvas, path: &Path) -> Result<()> {
    let color = match canvas.channels() {
        3 => image::ExtendedColorType::Rgb8,
        _ => image::ExtendedColorType::Rgba8,
    };
    image::save_buffer_with_format(
        path,
        canvas.pixels(),
        canvas.width(),
        canvas.height(),
        color,
        image::ImageFormat::Png,
    )
    .map_err(|e| PawnError::Canvas(format!("failed to write {}: {}", path.display(), e)))
}
