//! Main application entry point.

use clap::{Parser, Subcommand};
use kolam_app::{AppError, AppResult, Library, Script, parse_label, write_png};
use kolam_core::{
    Difficulty, KolamError, KolamMetadata, Occasion, PALETTE, ReferenceImage, Region,
    SymmetryMode,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kolam-studio",
    about = "Replay kolam drawing scripts and manage saved kolams"
)]
struct Cli {
    /// Directory of the kolam library (defaults to the platform data directory).
    #[arg(long, env = "KOLAM_LIBRARY")]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON drawing script and export the result as PNG.
    Replay {
        script: PathBuf,
        #[arg(short, long, default_value = "kolam.png")]
        output: PathBuf,
        /// Override the script's container width.
        #[arg(long)]
        width: Option<f64>,
        /// Reference image to show behind the drawing (not exported).
        #[arg(long)]
        reference: Option<PathBuf>,
        /// Save the drawing to the library under this title.
        #[arg(long)]
        save: Option<String>,
        /// Check the save against an in-memory library instead of the real one.
        #[arg(long, requires = "save")]
        dry_run: bool,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_label::<Region>, default_value = "tamil")]
        region: Region,
        #[arg(
            long,
            value_parser = parse_label::<Difficulty>,
            default_value = "beginner"
        )]
        difficulty: Difficulty,
        #[arg(long, value_parser = parse_label::<Occasion>, default_value = "daily")]
        occasion: Occasion,
    },
    /// List saved kolams.
    List,
    /// Delete a saved kolam.
    Delete { id: String },
    /// Write a saved kolam's image to a PNG file.
    Export {
        id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show the color palette and symmetry modes.
    Palette,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Command::Replay {
            script,
            output,
            width,
            reference,
            save,
            dry_run,
            description,
            region,
            difficulty,
            occasion,
        } => {
            let mut script = Script::load(&script)?;
            if let Some(width) = width {
                script.container_width = width;
            }
            log::info!("Replaying {} actions", script.actions.len());
            let mut whiteboard = script.replay()?;

            if let Some(path) = reference {
                let data =
                    std::fs::read(&path).map_err(|source| AppError::Read { path, source })?;
                let image = ReferenceImage::from_bytes(&data)?;
                println!(
                    "Reference image: {}x{} {}",
                    image.width,
                    image.height,
                    image.format.mime_type()
                );
                whiteboard.set_reference_image(Some(image));
            }

            let bytes = write_png(&whiteboard, &output)?;
            println!("Wrote {} ({} bytes)", output.display(), bytes);

            if let Some(title) = save {
                let metadata = KolamMetadata {
                    title,
                    description,
                    region,
                    difficulty,
                    occasion,
                };
                let library = if dry_run {
                    Library::in_memory()
                } else {
                    Library::open(cli.library)?
                };
                let record = library.save(&whiteboard, metadata)?;
                if dry_run {
                    println!(
                        "Would save \"{}\" ({}x{}, {})",
                        record.title, record.width, record.height, record.symmetry
                    );
                } else {
                    println!("Saved \"{}\" as {}", record.title, record.id);
                }
            }
        }
        Command::List => {
            let records = Library::open(cli.library)?.records()?;
            if records.is_empty() {
                println!("No saved kolams");
            }
            for record in records {
                println!(
                    "{}  {:30} {:?}/{:?}/{:?}  {}  {}x{}",
                    record.id,
                    record.title,
                    record.region,
                    record.difficulty,
                    record.occasion,
                    record.symmetry,
                    record.width,
                    record.height,
                );
            }
        }
        Command::Delete { id } => {
            if Library::open(cli.library)?.delete(&id)? {
                println!("Deleted {}", id);
            } else {
                println!("No kolam with id {}", id);
            }
        }
        Command::Export { id, output } => {
            let record = Library::open(cli.library)?.load(&id)?;
            let png = record.image_png().ok_or_else(|| {
                KolamError::InvalidRecord(format!("{} has no readable image", record.id))
            })?;
            std::fs::write(&output, &png).map_err(|source| AppError::Write {
                path: output.clone(),
                source,
            })?;
            println!("Wrote {} ({} bytes)", output.display(), png.len());
        }
        Command::Palette => {
            println!("\n=== Colors ===");
            for swatch in PALETTE {
                println!("  {:16} {}", swatch.name, swatch.color.to_hex());
            }
            println!("\n=== Symmetry ===");
            for mode in SymmetryMode::all() {
                println!("  {:12} {}", mode.id(), mode.description());
            }
            println!();
        }
    }
    Ok(())
}
