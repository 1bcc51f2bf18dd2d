//! levelcodec-cli - Command-line interface for levelcodec
//!
//! Inspects and verifies level editor save files, decodes palette blocks and
//! converts level-name text to and from its packed form.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use levelcodec::common::{DEFAULT_LEVEL_COUNT, DEFAULT_TILESET_TILES, DEFAULT_TILE_SIZE};
use levelcodec::level::Goal;
use levelcodec::{
    decode_palettes, decode_text, encode_text, test_characters, GameSchema, LevelMap, SaveFile,
    SaveFileLayout,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "levelcodec-cli")]
#[command(about = "A CLI tool for level editor save files, palettes and level-name text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode, decode or check level-name text
    Text {
        #[command(subcommand)]
        action: TextAction,
    },

    /// Decode a save file and summarize its levels
    Inspect {
        /// Save file to read
        input: PathBuf,

        #[command(flatten)]
        save: SaveArgs,

        /// Print the decoded levels as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a save file, re-encode it and compare with the input
    Verify {
        /// Save file to read
        input: PathBuf,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Decode a palette block
    Palettes {
        /// File holding the palette block
        input: PathBuf,
    },
}

#[derive(Subcommand)]
enum TextAction {
    /// Print the packed bytes of a text as hex
    Encode {
        /// Text to encode
        text: String,
    },

    /// Decode hex bytes into text
    Decode {
        /// Packed bytes as hex
        bytes: String,
    },

    /// Exit with an error unless every character is encodable
    Check {
        /// Text to check
        text: String,
    },
}

#[derive(Args)]
struct SaveArgs {
    /// Game schema (object types and goal templates) as JSON
    #[arg(short, long)]
    schema: PathBuf,

    /// Number of levels the game expects
    #[arg(short, long, default_value_t = DEFAULT_LEVEL_COUNT)]
    levels: usize,

    /// Tileset width in tiles
    #[arg(long, default_value_t = DEFAULT_TILESET_TILES)]
    tileset_width: u32,

    /// Tileset height in tiles
    #[arg(long, default_value_t = DEFAULT_TILESET_TILES)]
    tileset_height: u32,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,
}

impl SaveArgs {
    fn layout(&self) -> SaveFileLayout {
        SaveFileLayout {
            tileset_width_tiles: self.tileset_width,
            tileset_height_tiles: self.tileset_height,
            tile_size: self.tile_size,
            level_count: self.levels,
        }
    }
}

#[derive(Serialize)]
struct SaveReport<'a> {
    tileset_width: u32,
    tileset_height: u32,
    levels: Vec<LevelReport<'a>>,
}

#[derive(Serialize)]
struct LevelReport<'a> {
    index: usize,
    name: &'a str,
    goal: &'a Goal,
    maps: Vec<LevelMap>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Text { action } => run_text(action, cli.quiet),
        Commands::Inspect { input, save, json } => inspect_save(&input, &save, json, cli.quiet),
        Commands::Verify { input, save } => verify_save(&input, &save, cli.quiet),
        Commands::Palettes { input } => show_palettes(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_text(action: TextAction, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TextAction::Encode { text } => {
            let bytes = encode_text(&text)?;
            println!("{}", hex::encode_upper(bytes));
        }
        TextAction::Decode { bytes } => {
            let bytes =
                hex::decode(bytes.trim()).map_err(|e| format!("Invalid hex input: {}", e))?;
            let decoded = decode_text(&bytes)?;
            println!("{}", decoded.text);
            if !quiet {
                println!("  Bytes used: {}", decoded.bytes_used);
                if !decoded.remaining.is_empty() {
                    println!("  Remaining:  {}", hex::encode_upper(decoded.remaining));
                }
            }
        }
        TextAction::Check { text } => {
            if !test_characters(&text) {
                return Err(
                    format!("'{}' contains characters that cannot be encoded", text).into(),
                );
            }
            if !quiet {
                println!("✓ All characters are encodable");
            }
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> Result<GameSchema, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read schema '{}': {}", path.display(), e))?;
    let schema = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid schema '{}': {}", path.display(), e))?;
    Ok(schema)
}

fn decode_save(
    input: &Path,
    save: &SaveArgs,
    quiet: bool,
) -> Result<(Vec<u8>, GameSchema, SaveFile), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let schema = load_schema(&save.schema)?;
    let layout = save.layout();
    let data = fs::read(input)?;

    let progress = if !quiet {
        let pb = ProgressBar::new(layout.level_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("Decoding levels...");
        Some(pb)
    } else {
        None
    };

    let decoded = SaveFile::decode_with_progress(&data, &layout, &schema, |count| {
        if let Some(ref pb) = progress {
            pb.set_position(count as u64);
        }
    })
    .map_err(|e| format!("Decoding failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.finish_and_clear();
    }

    Ok((data, schema, decoded))
}

fn inspect_save(
    input: &Path,
    save: &SaveArgs,
    json: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (data, schema, decoded) = decode_save(input, save, quiet || json)?;

    if json {
        let levels = decoded
            .levels
            .iter()
            .enumerate()
            .map(|(index, level)| -> levelcodec::Result<LevelReport<'_>> {
                Ok(LevelReport {
                    index,
                    name: level.name(),
                    goal: level.goal(),
                    maps: level.decode_maps(&schema.objects)?,
                })
            })
            .collect::<levelcodec::Result<Vec<_>>>()?;
        let report = SaveReport {
            tileset_width: decoded.tileset.pixel_width(),
            tileset_height: decoded.tileset.pixel_height(),
            levels,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Save File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!(
        "  Tileset: {}x{} px",
        decoded.tileset.pixel_width(),
        decoded.tileset.pixel_height()
    );
    println!("  Levels: {}", decoded.levels.len());

    for (index, level) in decoded.levels.iter().enumerate() {
        let name = if level.name().is_empty() {
            "(blank)"
        } else {
            level.name()
        };
        println!("  [{:2}] {} - goal {}", index, name, level.goal().id());
        for (blob, map) in level.maps().iter().zip(level.decode_maps(&schema.objects)?) {
            println!(
                "       map {}x{}: {} layers, {} objects, {} bytes",
                map.width(),
                map.height(),
                map.layers().len(),
                map.object_count(),
                blob.len()
            );
        }
    }

    Ok(())
}

fn verify_save(
    input: &Path,
    save: &SaveArgs,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let (data, schema, decoded) = decode_save(input, save, quiet)?;

    let encoded = decoded
        .encode(&schema)
        .map_err(|e| format!("Encoding failed: {}", e))?;

    if encoded != data {
        let first_difference = encoded
            .iter()
            .zip(&data)
            .position(|(a, b)| a != b)
            .unwrap_or(encoded.len().min(data.len()));
        return Err(format!(
            "Re-encoded save differs from input at byte {} ({} vs {} bytes)",
            first_difference,
            encoded.len(),
            data.len()
        )
        .into());
    }

    if !quiet {
        println!("✓ Save file round-trips byte for byte");
        println!("  Size:   {} bytes", data.len());
        println!("  Levels: {}", decoded.levels.len());
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn show_palettes(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let (palettes, rest) = decode_palettes(&data)?;

    println!("Palettes: {}", palettes.len());
    for palette in &palettes {
        let colors = palette.colors()[1..]
            .iter()
            .map(|color| color.to_string())
            .collect::<Vec<_>>();
        println!("  {}: {}", palette.name(), colors.join(" "));
    }

    if verbose && !rest.is_empty() {
        println!("  Trailing bytes: {}", rest.len());
    }

    Ok(())
}
