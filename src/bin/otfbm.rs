use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use otfbm::{Canvas, OtfbmError, PngOptions, RenderContext, SourceBlob, parse_color};

#[derive(Parser, Debug)]
#[command(name = "otfbm", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print a JSON summary of the written file to stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Favor encoding speed over output size.
    #[arg(long, global = true)]
    fast: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solid color image.
    Square(SquareArgs),
    /// Checkerboard image.
    Checkered(CheckeredArgs),
    /// Grayscale Perlin noise image.
    Perlin(PerlinArgs),
    /// Filled circle over a background.
    Circle(CircleArgs),
    /// Re-encode a PNG, JPEG or BMP file as PNG.
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct Size {
    /// Image width in pixels.
    #[arg(long)]
    width: u32,

    /// Image height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Parser, Debug)]
struct SquareArgs {
    #[command(flatten)]
    size: Size,

    /// Fill color, RRGGBBAA hex.
    #[arg(long)]
    color: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckeredArgs {
    #[command(flatten)]
    size: Size,

    /// Cell width in pixels.
    #[arg(long)]
    checks_x: u32,

    /// Cell height in pixels.
    #[arg(long)]
    checks_y: u32,

    /// Color of the top-left cell, RRGGBBAA hex.
    #[arg(long)]
    col1: String,

    /// Alternate cell color, RRGGBBAA hex.
    #[arg(long)]
    col2: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PerlinArgs {
    #[command(flatten)]
    size: Size,

    /// Horizontal noise offset in pixels.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset_x: i32,

    /// Vertical noise offset in pixels.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset_y: i32,

    /// Noise frequency across the image.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CircleArgs {
    #[command(flatten)]
    size: Size,

    /// Circle center, x.
    #[arg(long, allow_hyphen_values = true)]
    x: i32,

    /// Circle center, y.
    #[arg(long, allow_hyphen_values = true)]
    y: i32,

    /// Circle radius in pixels.
    #[arg(long)]
    radius: f64,

    /// Circle color, RRGGBBAA hex.
    #[arg(long)]
    color: String,

    /// Background color, RRGGBBAA hex.
    #[arg(long)]
    bg: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image (PNG, JPEG or BMP).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code_for(&err)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Caller mistakes exit with 2, pipeline failures with 1.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<OtfbmError>() {
        Some(e) if e.is_client_error() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = RenderContext::default();
    let opts = if cli.fast {
        PngOptions::fast()
    } else {
        PngOptions::default()
    };

    let (canvas, out) = match cli.cmd {
        Command::Square(args) => {
            let color = parse_color(&args.color)?;
            let canvas = otfbm::solid(&ctx, args.size.width, args.size.height, color)?;
            (canvas, args.out)
        }
        Command::Checkered(args) => {
            let col1 = parse_color(&args.col1)?;
            let col2 = parse_color(&args.col2)?;
            let canvas = otfbm::checkered(
                &ctx,
                args.size.width,
                args.size.height,
                args.checks_x,
                args.checks_y,
                col1,
                col2,
            )?;
            (canvas, args.out)
        }
        Command::Perlin(args) => {
            let canvas = otfbm::perlin(
                &ctx,
                args.size.width,
                args.size.height,
                args.offset_x,
                args.offset_y,
                args.scale,
            )?;
            (canvas, args.out)
        }
        Command::Circle(args) => {
            let color = parse_color(&args.color)?;
            let bg = parse_color(&args.bg)?;
            let canvas = otfbm::circle(
                &ctx,
                args.size.width,
                args.size.height,
                args.x,
                args.y,
                args.radius,
                color,
                bg,
            )?;
            (canvas, args.out)
        }
        Command::Convert(args) => {
            let blob = SourceBlob::read(&args.in_path)?;
            tracing::info!(format = %blob.format(), "loaded {}", args.in_path.display());
            let canvas = blob.load(&ctx)?;
            (canvas, args.out)
        }
    };

    write_png(canvas, opts, &out, cli.json)
}

fn write_png(canvas: Canvas<'_>, opts: PngOptions, out: &Path, json: bool) -> anyhow::Result<()> {
    let (width, height) = canvas.dimensions();
    let png = otfbm::encode_canvas_with(canvas, opts)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, &png).with_context(|| format!("write png '{}'", out.display()))?;

    if json {
        let summary = serde_json::json!({
            "out": out.display().to_string(),
            "width": width,
            "height": height,
            "bytes": png.len(),
        });
        println!("{summary}");
    } else {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
