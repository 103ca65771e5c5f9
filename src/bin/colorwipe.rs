use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use colorwipe::{
    AnimatedWipe, CpuBackend, MaskClip, MaskLibrary, MediaFactory, Texture, TransitionSettings,
    WipeError, WipeOptions, WipeResult,
};

#[derive(Parser, Debug)]
#[command(name = "colorwipe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an image-mask transition between two still images as numbered PNGs.
    Preview(PreviewArgs),
    /// Print frame and loop information of a mask image.
    Inspect(InspectArgs),
    /// List the entries of a mask library file in order.
    Library(LibraryArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Outgoing source image.
    #[arg(long)]
    a: PathBuf,

    /// Incoming source image.
    #[arg(long)]
    b: PathBuf,

    /// Transition settings JSON. Defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Mask image path, overriding the mask in `--settings`.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Mask library used to resolve named image masks.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Effect file to load instead of the built-in one.
    #[arg(long)]
    effect: Option<PathBuf>,

    /// Number of frames to render, evenly spaced over the transition.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Mask image (GIF or any still image format).
    path: PathBuf,
}

#[derive(Parser, Debug)]
struct LibraryArgs {
    /// Mask library JSON (`{"name": "path", ...}`).
    path: PathBuf,
}

/// Video masks need a host media service, which the CLI does not have.
struct NoMedia;

impl MediaFactory for NoMedia {
    fn open_clip(&mut self, path: &Path) -> WipeResult<Box<dyn MaskClip>> {
        Err(WipeError::media(format!(
            "cannot play '{}': video masks need a host media service",
            path.display()
        )))
    }
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Library(args) => cmd_library(args),
    }
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<TransitionSettings> {
    let Some(path) = path else {
        return Ok(TransitionSettings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    Ok(TransitionSettings::from_json(&json)?)
}

fn read_still(path: &Path) -> anyhow::Result<Texture> {
    let image = colorwipe::open_animated_image(path)?;
    image
        .frames
        .into_iter()
        .next()
        .with_context(|| format!("image '{}' has no frames", path.display()))
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut settings = read_settings(args.settings.as_deref())?;
    if let Some(mask) = &args.mask {
        settings.mask = TransitionSettings::image_path(mask).mask;
    }
    let library = match &args.library {
        Some(path) => MaskLibrary::load(path)?,
        None => MaskLibrary::default(),
    };
    let options = WipeOptions {
        effect: args
            .effect
            .clone()
            .map_or(colorwipe::EffectSource::Builtin, colorwipe::EffectSource::File),
        library,
    };

    let a = read_still(&args.a)?;
    let b = read_still(&args.b)?;
    let (width, height) = (a.width, a.height);

    let mut backend = CpuBackend::new();
    let mut wipe = AnimatedWipe::create(&mut backend, &mut NoMedia, options, &settings)?;
    if wipe.mask().is_none() {
        anyhow::bail!("no usable mask configured (see log output)");
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let steps = args.frames.max(1);
    let mut written = 0usize;
    for i in 0..steps {
        let t = if steps == 1 {
            0.0
        } else {
            i as f32 / (steps - 1) as f32
        };
        if wipe
            .video_render(&mut backend, &a, &b, t, width, height)?
            .is_none()
        {
            eprintln!("frame {i}: no mask texture, skipped");
            continue;
        }
        let frame = backend
            .take_frame()
            .context("backend produced no frame after a blend draw")?;

        let mut rgba = frame.data;
        if frame.premultiplied {
            unpremultiply_in_place(&mut rgba);
        }
        let out = args.out.join(format!("frame_{i:04}.png"));
        image::save_buffer_with_format(
            &out,
            &rgba,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out.display()))?;
        written += 1;
    }

    eprintln!("wrote {written} of {steps} frames to {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let image = colorwipe::open_animated_image(&args.path)?;
    let loops = colorwipe::normalize_loop_count(image.loop_count);
    let first = image.frames.first().map(Texture::size).unwrap_or_default();

    println!("path:        {}", args.path.display());
    println!("size:        {}x{}", first.width, first.height);
    println!("frames:      {}", image.frame_count());
    if loops == 0 {
        println!("loops:       infinite");
    } else {
        println!("loops:       {loops}");
    }
    println!(
        "total_steps: {}",
        colorwipe::total_steps(image.frame_count(), loops)
    );
    Ok(())
}

fn cmd_library(args: LibraryArgs) -> anyhow::Result<()> {
    let library = MaskLibrary::load(&args.path)?;
    for (name, path) in library.entries() {
        println!("{name}\t{}", path.display());
    }
    Ok(())
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
