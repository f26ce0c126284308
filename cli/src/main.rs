//! repptx CLI - PowerPoint canvas resizing tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

use repptx::{read_file, write_file, GridSnap, ResizeOptions, ResizeSummary, ScaleMode, Transform};

#[derive(Parser)]
#[command(name = "repptx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rescale PowerPoint presentations to a new canvas size", long_about = None)]
struct Cli {
    /// Input .pptx file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to <input>_resized.pptx)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Target canvas width in inches
    #[arg(long, value_name = "INCHES", default_value = "36")]
    width: f64,

    /// Target canvas height in inches
    #[arg(long, value_name = "INCHES", default_value = "48")]
    height: f64,

    /// Scale mode
    #[arg(long, value_enum, default_value = "fit")]
    mode: Mode,

    /// Snap results to the layout grid (default for independent mode)
    #[arg(long, conflicts_with = "no_grid")]
    grid: bool,

    /// Never snap results to the layout grid
    #[arg(long)]
    no_grid: bool,

    /// Grid cell size in inches
    #[arg(long, value_name = "INCHES", default_value = "0.1")]
    grid_size: f64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show presentation information
    Info {
        /// Input .pptx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Uniform scale, whole slide visible, centered
    Fit,
    /// Uniform scale covering the whole canvas
    Fill,
    /// Per-axis scale filling the canvas exactly
    Stretch,
    /// Per-axis scale with grid alignment
    Independent,
}

impl From<Mode> for ScaleMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Fit => ScaleMode::Fit,
            Mode::Fill => ScaleMode::Fill,
            Mode::Stretch => ScaleMode::Stretch,
            Mode::Independent => ScaleMode::Independent,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: resize if input is provided
            if let Some(ref input) = cli.input {
                cmd_resize(input, cli.output.as_deref(), &cli)
            } else {
                println!("{}", "Usage: repptx <FILE> [OUTPUT]".yellow());
                println!("       repptx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_resize(
    input: &Path,
    output: Option<&Path>,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    let is_pptx = input
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("pptx"));
    if !is_pptx {
        warn!("input does not have a .pptx extension: {}", input.display());
    }

    let output_path = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_resized.pptx", stem))
    });

    let mode = ScaleMode::from(cli.mode);
    let grid = resolve_grid(cli)?;
    let mut options = ResizeOptions::new()
        .target_inches(cli.width, cli.height)
        .with_mode(mode);
    if let Some(grid) = grid {
        options = options.with_grid(grid);
    }

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Loading presentation...");
    let mut document = read_file(input)?;
    let source = document.canvas;
    pb.inc(1);

    pb.set_message("Computing transform...");
    let transform = Transform::compute(source, options.target, options.mode)?;
    pb.inc(1);

    pb.set_message("Transforming slides...");
    let stats = repptx::transform::apply(&mut document, &transform, options.target, options.grid)?;
    pb.inc(1);

    pb.set_message("Saving presentation...");
    write_file(&document, &output_path)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    let summary = ResizeSummary {
        source,
        target: options.target,
        mode: options.mode,
        transform,
        grid: options.grid,
        stats,
    };
    print_summary(&summary, &output_path);

    Ok(())
}

fn resolve_grid(cli: &Cli) -> Result<Option<GridSnap>, Box<dyn std::error::Error>> {
    let enabled = if cli.no_grid {
        false
    } else {
        cli.grid || cli.mode == Mode::Independent
    };
    if enabled {
        Ok(Some(GridSnap::from_inches(cli.grid_size)?))
    } else {
        Ok(None)
    }
}

fn print_summary(summary: &ResizeSummary, output: &Path) {
    let stats = &summary.stats;

    println!("\n{}", "Resize Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Source".bold(), summary.source);
    println!("{}: {}", "Target".bold(), summary.target);
    println!("{}: {}", "Mode".bold(), summary.mode);
    println!(
        "{}: {:.3} x {:.3}",
        "Scale".bold(),
        summary.transform.scale_x,
        summary.transform.scale_y
    );
    if let Some(grid) = summary.grid {
        println!(
            "{}: {:.2} in cells",
            "Grid".bold(),
            repptx::units::inches_from_emu(grid.cell())
        );
    }
    println!("{}: {}", "Slides".bold(), stats.slides);
    println!(
        "{}: {} moved, {} resized, {} text runs scaled",
        "Elements".bold(),
        stats.moved,
        stats.resized,
        stats.text_runs_scaled
    );
    if stats.skipped > 0 {
        println!("{}: {}", "Skipped".yellow().bold(), stats.skipped);
    }

    println!("\n{} {}", "Saved to".green(), output.display());
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }

    let info = repptx::inspect_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Presentation Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Canvas".bold(), info.canvas);
    println!("{}: {}", "Slides".bold(), info.slide_count);
    println!("{}: {}", "Elements".bold(), info.element_count);
    println!("{}: {}", "Text elements".bold(), info.text_element_count);
    println!("{}: {}", "Parts".bold(), info.part_count);

    if let Some(ref title) = info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref creator) = info.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref created) = info.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = info.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "repptx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PowerPoint canvas resizing tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/repptx".dimmed());
    println!("License: MIT");
}
