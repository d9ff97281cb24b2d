use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use darkstar::{classify, decode, encode, Destination, FixedPart, Generation, MessageShape, Patch};
use darkstar_editor::{load_patch, EditorError};

#[derive(Debug, Parser)]
#[clap(name = "darkstar-syx")]
#[clap(about = "Inspect, decode, and build Red Sound DarkStar SysEx files", long_about = None)]
#[clap(version)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the layout of a .syx file
    Info {
        /// The file to inspect
        file: PathBuf,
    },
    /// Decode a .syx file and print the patch as JSON
    Decode {
        /// The file to decode
        file: PathBuf,
        /// The part (1-5) to load a single voice into.{n}
        /// Required for single voice files.
        #[clap(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        part: Option<u8>,
        /// A JSON patch to decode over.{n}
        /// Values the file does not carry are taken from here.
        #[clap(long, value_name = "JSON")]
        over: Option<PathBuf>,
    },
    /// Build a .syx file from a JSON patch
    Encode {
        /// The JSON patch
        patch: PathBuf,
        /// Write the XP2 layout
        #[clap(long)]
        xp2: bool,
        /// Write a bulk performance addressed by the patch number
        #[clap(long)]
        bulk: bool,
        /// Where to write the .syx file
        #[clap(short, long)]
        output: PathBuf,
    },
}

fn describe(shape: MessageShape) -> String {
    match shape {
        MessageShape::SingleVoice => "Single voice".to_owned(),
        MessageShape::Performance(g) => format!("Performance ({})", g.to_str()),
        MessageShape::BulkPerformance(g) => format!("Bulk performance ({})", g.to_str()),
    }
}

fn run(command: Commands) -> Result<(), EditorError> {
    match command {
        Commands::Info { file } => {
            let bytes = fs::read(&file)?;
            let shape = classify(&bytes)?;
            println!("{}: {} bytes, {}", file.display(), bytes.len(), describe(shape));
            if !shape.needs_destination() {
                let decoded = decode(&Patch::default(), &bytes, &mut FixedPart(None))?;
                if shape.has_number() {
                    println!("Location: {}", decoded.patch.location_name());
                }
                println!("Edit part: {}", decoded.patch.edit_part + 1);
            }
        }
        Commands::Decode { file, part, over } => {
            let bytes = fs::read(&file)?;
            let current = match over {
                Some(path) => load_patch(&path)?,
                None => Patch::default(),
            };
            let mut resolver = FixedPart(part.map(|p| p as usize - 1));
            let decoded = decode(&current, &bytes, &mut resolver)?;
            println!("{}", serde_json::to_string_pretty(&decoded.patch)?);
        }
        Commands::Encode {
            patch,
            xp2,
            bulk,
            output,
        } => {
            let patch = load_patch(&patch)?;
            let destination = if bulk {
                Destination::Addressed
            } else {
                Destination::WorkingMemory
            };
            let bytes = encode(&patch, Generation::from_xp2(xp2), destination, false);
            fs::write(&output, &bytes)?;
            log::info!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    colog::init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
