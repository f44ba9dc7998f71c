use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use thumbforge::batch::{self, BatchOpts};
use thumbforge::{Brander, FitMode, LogoConfig, Recipe, StyleId, ThumbConfig, Thumbnailer};

#[derive(Parser, Debug)]
#[command(name = "thumbforge", version)]
struct Cli {
    /// Log per-step and per-attempt details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp the title onto every input image in each selected style.
    Styles(StylesArgs),
    /// Glow-pad every input image to the canvas and add the logo. Needs no font.
    Resize(ResizeArgs),
    /// Print the built-in styles.
    ListStyles(ListArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Input directory (png, jpg, jpeg).
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output directory, created if missing.
    #[arg(long)]
    out: PathBuf,

    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Enable image-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct StylesArgs {
    #[command(flatten)]
    batch: BatchArgs,

    /// Font file used for both title lines.
    #[arg(long)]
    font: Option<PathBuf>,

    /// First title line.
    #[arg(long)]
    line1: Option<String>,

    /// Second title line, resized to match the first line's width.
    #[arg(long)]
    line2: Option<String>,

    /// Pixel size of the first line.
    #[arg(long)]
    font_size: Option<f32>,

    /// Style to render; repeat for several.
    #[arg(long = "style")]
    styles: Vec<StyleId>,

    /// How sources are brought to the canvas aspect.
    #[arg(long, value_enum)]
    fit: Option<FitArg>,

    /// Skip the vignette.
    #[arg(long, default_value_t = false)]
    no_vignette: bool,

    /// Seed for the pattern fill.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct ResizeArgs {
    #[command(flatten)]
    batch: BatchArgs,

    /// Watermark image placed bottom-right.
    #[arg(long)]
    logo: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Dump full recipes as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitArg {
    Crop,
    GlowPad,
}

impl From<FitArg> for FitMode {
    fn from(v: FitArg) -> Self {
        match v {
            FitArg::Crop => FitMode::Crop,
            FitArg::GlowPad => FitMode::GlowPad,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Styles(args) => cmd_styles(args),
        Command::Resize(args) => cmd_resize(args),
        Command::ListStyles(args) => cmd_list_styles(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn base_config(args: &BatchArgs) -> anyhow::Result<ThumbConfig> {
    let mut cfg = match &args.config {
        Some(path) => ThumbConfig::from_path(path)?,
        None => ThumbConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    Ok(cfg)
}

fn batch_opts(args: &BatchArgs) -> BatchOpts {
    BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    }
}

fn prepare_dirs(args: &BatchArgs) -> anyhow::Result<Vec<PathBuf>> {
    let inputs = batch::collect_inputs(&args.in_dir)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    Ok(inputs)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_styles(args: StylesArgs) -> anyhow::Result<()> {
    let mut cfg = base_config(&args.batch)?;
    if let Some(font) = args.font {
        cfg.font_path = font;
    }
    if let Some(l) = args.line1 {
        cfg.line1 = l;
    }
    if let Some(l) = args.line2 {
        cfg.line2 = l;
    }
    if let Some(size) = args.font_size {
        cfg.base_font_size = size;
    }
    if !args.styles.is_empty() {
        cfg.styles = args.styles;
    }
    if let Some(fit) = args.fit {
        cfg.fit = fit.into();
    }
    if args.no_vignette {
        cfg.vignette = false;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }

    let thumb = Thumbnailer::new(cfg).context("set up thumbnailer")?;
    let inputs = prepare_dirs(&args.batch)?;
    let out_dir = &args.batch.out;

    let report = batch::run_batch(&inputs, batch_opts(&args.batch), |n, path| {
        let src = thumbforge::load_image(path)?;
        let outputs = thumb.thumbnails(&src)?;
        for (k, (style, encoded)) in outputs.iter().enumerate() {
            let name = batch::styled_output_name(n, k + 1);
            write_output(&out_dir.join(&name), &encoded.bytes)?;
            tracing::info!(file = %name, %style, quality = encoded.quality, "saved");
        }
        Ok(outputs.len())
    })?;

    tracing::info!(
        images = report.images,
        written = report.written,
        skipped = report.skipped,
        "done"
    );
    Ok(())
}

fn cmd_resize(args: ResizeArgs) -> anyhow::Result<()> {
    let mut cfg = base_config(&args.batch)?;
    if let Some(logo) = args.logo {
        cfg.logo = Some(LogoConfig::new(logo));
    }

    let brander = Brander::new(&cfg).context("set up brander")?;
    let inputs = prepare_dirs(&args.batch)?;
    let out_dir = &args.batch.out;

    let report = batch::run_batch(&inputs, batch_opts(&args.batch), |n, path| {
        let src = thumbforge::load_image(path)?;
        let encoded = brander.brand(&src)?;
        let name = batch::brand_output_name(n);
        write_output(&out_dir.join(&name), &encoded.bytes)?;
        tracing::info!(file = %name, quality = encoded.quality, "saved");
        Ok(1)
    })?;

    tracing::info!(
        images = report.images,
        written = report.written,
        skipped = report.skipped,
        "done"
    );
    Ok(())
}

fn cmd_list_styles(args: ListArgs) -> anyhow::Result<()> {
    if args.json {
        let recipes: Vec<Recipe> = StyleId::ALL.iter().map(|id| id.recipe()).collect();
        let json = serde_json::to_string_pretty(&recipes).context("serialize recipes")?;
        println!("{json}");
    } else {
        for id in StyleId::ALL {
            println!("{id}");
        }
    }
    Ok(())
}
