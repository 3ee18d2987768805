use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use remnant::SurfaceSink as _;

#[derive(Parser, Debug)]
#[command(name = "remnant", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one sketch pass to a JPEG or PNG.
    Render(RenderArgs),
    /// Render a numbered sequence of independent passes.
    Sequence(SequenceArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Outline source: an SVG document or a JSON outline manifest.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Partial JSON configuration merged onto the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file used for the word overlay.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Seed for jitter and palette choices (overrides the configuration).
    #[arg(long)]
    seed: Option<u64>,

    /// Letterbox the source figure into the canvas instead of using startFromX/Y and scale.
    #[arg(long)]
    fit: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output path (.jpg, .jpeg or .png).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of frames to render.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Output directory for `frame_NNNN.<ext>` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output format extension.
    #[arg(long, default_value = "jpg")]
    ext: String,

    /// Pace frames at the configured `refresh` rate.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct Prepared {
    config: remnant::RenderConfig,
    viewport: remnant::Viewport,
    outlines: Vec<remnant::SourceOutline>,
    font: Option<remnant::PreparedFont>,
}

fn read_config(path: Option<&Path>) -> anyhow::Result<remnant::RenderConfig> {
    let Some(path) = path else {
        return Ok(remnant::RenderConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    remnant::RenderConfig::from_json(&text)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn load_source(path: &Path) -> anyhow::Result<Box<dyn remnant::OutlineSource>> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let svg = remnant::SvgOutlines::from_path(path)
            .with_context(|| format!("load svg '{}'", path.display()))?;
        Ok(Box::new(svg))
    } else {
        let manifest = remnant::OutlineManifest::from_path(path)
            .with_context(|| format!("load outline manifest '{}'", path.display()))?;
        Ok(Box::new(manifest))
    }
}

fn prepare(args: &InputArgs) -> anyhow::Result<Prepared> {
    let mut config = read_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let source = load_source(&args.in_path)?;
    let outlines = source.list_outlines()?;

    let viewport = match (args.fit, source.source_size()) {
        (true, Some((w, h))) => config.fit_to_source(w, h)?,
        (true, None) => {
            tracing::warn!("source has no size; --fit ignored");
            config.viewport()?
        }
        (false, _) => config.viewport()?,
    };

    let font = match &args.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            Some(remnant::PreparedFont::new(bytes))
        }
        None => None,
    };

    Ok(Prepared {
        config,
        viewport,
        outlines,
        font,
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let p = prepare(&args.input)?;
    let mut sink = remnant::FileSink::new(&args.out, p.config.image_quality)?;

    let (frame, stats) =
        remnant::render_to_frame(&p.config, &p.viewport, &p.outlines, p.font.as_ref())?;
    sink.finish(&frame)?;

    eprintln!(
        "wrote {} ({} outlines, {} skipped, {} drawables)",
        args.out.display(),
        stats.outlines,
        stats.skipped,
        stats.drawables
    );
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if args.frames == 0 {
        anyhow::bail!("--frames must be > 0");
    }
    let p = prepare(&args.input)?;
    let format = remnant::ImageFormatChoice::from_path(Path::new(&format!("f.{}", args.ext)))?;

    let interval = match (args.realtime, p.config.refresh) {
        (true, Some(fps)) => Some(Duration::from_secs_f64(1.0 / f64::from(fps))),
        (true, None) => {
            tracing::warn!("refresh is not configured; --realtime ignored");
            None
        }
        (false, _) => None,
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for index in 1..=args.frames {
        let started = Instant::now();
        // Each frame is its own pass; seeded runs stay reproducible frame by frame.
        let mut config = p.config.clone();
        config.seed = p.config.seed.map(|s| s.wrapping_add(u64::from(index - 1)));

        let (frame, _) =
            remnant::render_to_frame(&config, &p.viewport, &p.outlines, p.font.as_ref())?;
        let path = args
            .out_dir
            .join(remnant::sequence_frame_name(index, format));
        remnant::FileSink::new(&path, config.image_quality)?.finish(&frame)?;

        if let Some(interval) = interval
            && let Some(rest) = interval.checked_sub(started.elapsed())
        {
            std::thread::sleep(rest);
        }
    }

    eprintln!(
        "wrote {} frames to {}",
        args.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&remnant::RenderConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}
