use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use facemorph::{
    FfmpegSink, FfmpegSinkOpts, FrameIndex, FrameRGBA, FrameSink, LandmarkSet, MeshAnimation,
    MorphConfig, RenderThreading, SinkConfig,
};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "facemorph", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full morph as an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single morph frame as a PNG.
    Frame(FrameArgs),
    /// Draw the shared triangulation over the source image.
    Mesh(MeshArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Morph job JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output MP4 path (overrides the job's `output`).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Morph job JSON.
    #[arg(long)]
    config: PathBuf,

    /// Blend weight in [0, 1]; 0 is the source face, 1 the destination.
    #[arg(long)]
    alpha: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Build triangle patches in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct MeshArgs {
    /// Morph job JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write an MP4 showing the mesh after every landmark insertion.
    #[arg(long)]
    animate: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Mesh(args) => cmd_mesh(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<MorphConfig> {
    let cfg = MorphConfig::from_path(path)?;
    cfg.validate()
        .with_context(|| format!("invalid morph job '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let out = args
        .out
        .or_else(|| cfg.output_path())
        .context("no output path: pass --out or set 'output' in the job file")?;
    let job = cfg.load_job()?;

    let defaults = &cfg.threading;
    let threading = RenderThreading {
        parallel: args.parallel || defaults.parallel,
        chunk_size: args.chunk_size.unwrap_or(defaults.chunk_size),
        threads: args.threads.or(defaults.threads),
    };

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: out.clone(),
        overwrite: !args.no_overwrite,
        bg_rgba: [0, 0, 0, 255],
    });
    let frames = facemorph::render_to_sink(&job, &mut sink, cfg.fps()?, &threading)?;

    eprintln!("wrote {} ({frames} frames)", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let job = cfg.load_job()?;
    let frame = if args.parallel {
        job.render_alpha_parallel(args.alpha)?
    } else {
        job.render_alpha(args.alpha)?
    };
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_mesh(args: MeshArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let job = cfg.load_job()?;
    let (src_img, src_lm) = cfg.load_input(&cfg.source)?;

    let overlay = facemorph::draw_mesh(&src_img, &src_lm, job.triangles().as_slice())?;
    write_png(&args.out, &FrameRGBA::from_image(&overlay))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(anim_out) = args.animate {
        let reference = LandmarkSet::average(job.source_landmarks(), job.dest_landmarks())?;
        let canvas = job.canvas();
        let mut anim = MeshAnimation::new(&src_img, &src_lm);
        facemorph::triangulate_observed(canvas.width, canvas.height, &reference, &mut anim)?;
        let steps = anim.finish()?;

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&anim_out));
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: cfg.fps()?,
        })?;
        for (i, step) in steps.iter().enumerate() {
            sink.push_frame(FrameIndex(i as u64), &FrameRGBA::from_image(step))?;
        }
        sink.end()?;
        eprintln!("wrote {} ({} steps)", anim_out.display(), steps.len());
    }
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
