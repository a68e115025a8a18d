use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dotfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Replay a scripted pointer session into a PNG sequence.
    Replay(ReplayArgs),
    /// Print the default grid config as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Grid config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display width in CSS pixels.
    #[arg(long)]
    width: f64,

    /// Display height in CSS pixels.
    #[arg(long)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Pointer position `x,y` in CSS pixels.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<dotfield::Point>,

    /// Trail points, head first, in CSS pixels: `x,y;x,y;...`. Requires `trailing` in the config.
    #[arg(long, value_delimiter = ';', value_parser = parse_point)]
    trail: Vec<dotfield::Point>,

    /// Opaque background color (`#rrggbb`). Transparent when omitted.
    #[arg(long)]
    background: Option<dotfield::Rgb8>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Replay script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn parse_point(s: &str) -> Result<dotfield::Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got \"{s}\""))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in \"{s}\": {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in \"{s}\": {e}"))?;
    Ok(dotfield::Point::new(x, y))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))?;
    Ok(value)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config: dotfield::DotGridConfig = match &args.config {
        Some(path) => read_json(path, "config")?,
        None => dotfield::DotGridConfig::default(),
    };
    config.validate()?;
    anyhow::ensure!(
        args.trail.is_empty() || config.trailing,
        "--trail needs a config with \"trailing\": true"
    );

    let size = dotfield::SurfaceSize::from_display(args.width, args.height, args.dpr);
    let pointer = args.pointer.map(|p| size.to_device(p));
    let trail = dotfield::Trail::from_points(
        args.trail.iter().map(|&p| size.to_device(p)),
        config.trail_length,
    );

    let list = dotfield::compose_frame(size, &config, pointer, &trail);
    let mut raster = dotfield::CpuRaster::new(dotfield::CpuRasterOpts {
        clear_rgba: args.background.map(dotfield::Rgb8::to_rgba8),
    });
    let frame = raster.rasterize(&list)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    dotfield::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} dots)",
        args.out.display(),
        frame.width,
        frame.height,
        list.dot_count()
    );
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script: dotfield::ReplayScript = read_json(&args.script, "replay script")?;
    let mut sink = dotfield::PngSequenceSink::new(&args.out_dir);
    let stats = dotfield::replay(&script, &mut sink)?;
    eprintln!(
        "wrote {} frames to {} ({} events, {} draws)",
        stats.frames,
        args.out_dir.display(),
        stats.events,
        stats.draws
    );
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&dotfield::DotGridConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}
