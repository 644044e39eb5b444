mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use film_strip::{FilmProject, FrameSettings, FrameStyle, LayoutOptions, Rotation};
use logger::CliLogger;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "filmt", about = "Film strip contact sheet CLI", version)]
struct Cli {
    /// Log debug output (orientation choice, per-page packing)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay photos out as film strips and export a PDF
    Layout {
        #[command(flatten)]
        source: SourceArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Render resolution (common choices: 300, 600, 1200, 2400, 3600) [default: 300]
        #[arg(long)]
        dpi: Option<u32>,

        #[command(flatten)]
        style: StyleArgs,

        /// Write the resolved project to this JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Render a single photo as a standalone frame with its own holes
    Frame {
        /// Input photo
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        style: StyleArgs,

        /// Render resolution
        #[arg(long, default_value = "300")]
        dpi: u32,
    },

    /// Render low-resolution PNG previews of the first pages
    Preview {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Preview resolution
        #[arg(long, default_value = "72")]
        dpi: u32,

        /// Number of pages to preview
        #[arg(long, default_value = "1")]
        max_pages: usize,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Input photos, in frame order; replaces the photos of --config
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Project JSON file to start from
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Page flags; unset flags keep the project's (or the default) value
#[derive(Args)]
struct LayoutArgs {
    /// Paper size [default: a4]
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page orientation [default: auto]
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Page margin in mm, 0 to 50 [default: 10]
    #[arg(long)]
    margin: Option<f64>,

    /// Gap between frames in mm, 0 to 20 [default: 2]
    #[arg(long)]
    gap: Option<f64>,
}

/// Frame flags, applied to every photo
#[derive(Args)]
struct StyleArgs {
    /// Crop mode [default: fill]
    #[arg(long, value_enum)]
    crop: Option<CropArg>,

    /// Color mode [default: color]
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Polarity [default: positive]
    #[arg(long, value_enum)]
    polarity: Option<PolarityArg>,

    /// Counter-clockwise rotation in degrees: 0, 90, 180 or 270 [default: 0]
    #[arg(long, value_parser = parse_rotation)]
    rotation: Option<Rotation>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    A6,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Auto,
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum CropArg {
    Fill,
    Fit,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Color,
    Mono,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolarityArg {
    Positive,
    Negative,
}

impl From<PaperArg> for film_strip::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::A6 => Self::A6,
        }
    }
}

impl From<OrientationArg> for film_strip::PageOrientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Auto => Self::Auto,
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<CropArg> for film_strip::CropMode {
    fn from(arg: CropArg) -> Self {
        match arg {
            CropArg::Fill => Self::Fill,
            CropArg::Fit => Self::Fit,
        }
    }
}

impl From<ColorArg> for film_strip::ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Color => Self::Color,
            ColorArg::Mono => Self::Monochrome,
        }
    }
}

impl From<PolarityArg> for film_strip::Polarity {
    fn from(arg: PolarityArg) -> Self {
        match arg {
            PolarityArg::Positive => Self::Positive,
            PolarityArg::Negative => Self::Negative,
        }
    }
}

fn parse_rotation(value: &str) -> std::result::Result<Rotation, String> {
    let degrees: u32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number of degrees", value))?;
    Rotation::from_degrees(degrees)
        .ok_or_else(|| format!("rotation must be 0, 90, 180 or 270, got {}", degrees))
}

impl LayoutArgs {
    fn apply(&self, layout: &mut LayoutOptions) {
        if let Some(paper) = self.paper {
            layout.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            layout.orientation = orientation.into();
        }
        if let Some(margin) = self.margin {
            layout.margin_mm = margin;
        }
        if let Some(gap) = self.gap {
            layout.gap_mm = gap;
        }
    }
}

impl StyleArgs {
    fn apply(&self, style: &mut FrameStyle) {
        if let Some(crop) = self.crop {
            style.crop_mode = crop.into();
        }
        if let Some(color) = self.color {
            style.color_mode = color.into();
        }
        if let Some(polarity) = self.polarity {
            style.polarity = polarity.into();
        }
        if let Some(rotation) = self.rotation {
            style.rotation = rotation;
        }
    }
}

/// Build the project from an optional config file plus command-line overrides
async fn resolve_project(
    source: &SourceArgs,
    layout: &LayoutArgs,
    style: &StyleArgs,
) -> Result<FilmProject> {
    let mut project = match &source.config {
        Some(path) => FilmProject::load(path)
            .await
            .with_context(|| format!("Failed to load project {}", path.display()))?,
        None => FilmProject::default(),
    };

    if !source.input.is_empty() {
        project.photos = source.input.iter().map(FrameSettings::new).collect();
    }
    layout.apply(&mut project.layout);
    for photo in &mut project.photos {
        style.apply(&mut photo.style);
    }

    project.validate()?;
    Ok(project)
}

fn print_statistics(stats: &film_strip::LayoutStatistics, layout: &LayoutOptions) {
    println!("Layout Statistics:");
    println!("  Photos: {}", stats.frame_count);
    println!(
        "  Paper: {} {:?} ({} x {} px at {} dpi)",
        layout.paper_size.name(),
        stats.orientation,
        stats.page_width_px,
        stats.page_height_px,
        layout.dpi
    );
    println!(
        "  Grid: {} x {} ({} frames per page)",
        stats.columns, stats.rows, stats.frames_per_page
    );
    println!("  Pages: {}", stats.page_count);
}

fn nothing_fits(layout: &LayoutOptions) -> anyhow::Error {
    anyhow::anyhow!(
        "Nothing fits: a 36x35mm frame does not fit on {} with {}mm margins",
        layout.paper_size.name(),
        layout.margin_mm
    )
}

fn report_degraded(logger: &CliLogger) {
    let degraded = logger.degraded_frames();
    if degraded > 0 {
        println!(
            "{} photo(s) could not be read and were left black",
            degraded
        );
    }
}

async fn run_layout(
    project: FilmProject,
    output: &Path,
    save_config: Option<&Path>,
    stats_only: bool,
    logger: &CliLogger,
) -> Result<()> {
    let stats = film_strip::calculate_statistics(project.photos.len(), &project.layout)?;
    print_statistics(&stats, &project.layout);

    if let Some(path) = save_config {
        project.save(path).await?;
        println!("Saved project → {}", path.display());
    }

    if stats_only {
        return Ok(());
    }
    if stats.frames_per_page == 0 {
        return Err(nothing_fits(&project.layout));
    }

    let pages = tokio::task::spawn_blocking(move || film_strip::compose(&project)).await??;
    let page_count = pages.len();
    film_strip::export_pdf(pages, output).await?;

    report_degraded(logger);
    println!("Exported {} page(s) → {}", page_count, output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = CliLogger::new(cli.verbose);
    logger.clone().init()?;

    match cli.command {
        Commands::Layout {
            source,
            output,
            layout,
            dpi,
            style,
            save_config,
            stats_only,
        } => {
            let mut project = resolve_project(&source, &layout, &style).await?;
            if let Some(dpi) = dpi {
                project.layout.dpi = dpi;
                project.layout.validate()?;
            }
            run_layout(project, &output, save_config.as_deref(), stats_only, &logger).await?;
        }

        Commands::Frame {
            input,
            output,
            style,
            dpi,
        } => {
            if dpi == 0 {
                bail!("DPI must be a positive integer");
            }
            let mut settings = FrameSettings::new(&input);
            style.apply(&mut settings.style);

            let frame = tokio::task::spawn_blocking(move || {
                film_strip::render_frame_from_path(&settings, true, dpi)
            })
            .await?;
            let (width, height) = (frame.width(), frame.height());
            film_strip::save_png(frame.into_image(), &output).await?;

            report_degraded(&logger);
            println!("Rendered {}x{} frame → {}", width, height, output.display());
        }

        Commands::Preview {
            source,
            output,
            layout,
            style,
            dpi,
            max_pages,
        } => {
            let project = resolve_project(&source, &layout, &style).await?;
            let options = project.layout.at_dpi(dpi);
            let stats = film_strip::calculate_statistics(project.photos.len(), &options)?;
            print_statistics(&stats, &options);
            if stats.frames_per_page == 0 {
                return Err(nothing_fits(&options));
            }

            let pages = tokio::task::spawn_blocking(move || {
                film_strip::generate_preview(&project, dpi, max_pages)
            })
            .await??;
            let written = film_strip::save_pages_png(pages, &output, "preview").await?;

            report_degraded(&logger);
            for path in &written {
                println!("Preview → {}", path.display());
            }
        }
    }

    Ok(())
}
