//! PunkForge CLI - Bridge interface
//!
//! Commands: palettes, traits, render
//! Outputs JSON to stdout
//! Returns non-zero on validation failure

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use base64::Engine as _;
use punkforge_core::{
    palette, ExportFormat, RenderPipeline, RenderRequest,
};

#[derive(Parser)]
#[command(name = "punkforge-cli")]
#[command(about = "PunkForge CLI - Deterministic Pixel Portrait Compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output-size ceiling for render requests
    #[arg(long, default_value_t = punkforge_core::pipeline::DEFAULT_MAX_SIZE)]
    max_size: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// List the trait palettes
    Palettes,

    /// Show the hash state and selected trait tuple for a seed
    Traits {
        /// Seed string (a creator handle in the observed catalog)
        #[arg(short, long)]
        seed: String,
    },

    /// Render an avatar and print its manifest
    Render {
        #[arg(short, long)]
        seed: String,

        /// Output edge in device pixels
        #[arg(long, default_value_t = punkforge_core::DEFAULT_OUTPUT_SIZE)]
        size: u32,

        /// Export format (repeatable; defaults to png)
        #[arg(short, long)]
        format: Vec<FormatArg>,

        /// Minimum engine version this render may run on
        #[arg(long)]
        require_engine: Option<String>,

        /// Directory to write decoded export files into
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Svg => ExportFormat::Svg,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let pipeline = RenderPipeline::with_max_size(cli.max_size);

    match cli.command {
        Commands::Palettes => {
            let tables = serde_json::json!([
                {
                    "table": "skin_tones",
                    "entries": palette::SKIN_TONES.len(),
                    "names": palette::SKIN_TONES.iter().map(|t| t.name).collect::<Vec<_>>(),
                },
                {
                    "table": "backgrounds",
                    "entries": palette::BACKGROUNDS.len(),
                    "colors": palette::BACKGROUNDS.iter().map(|c| c.hex_rgb()).collect::<Vec<_>>(),
                },
                {
                    "table": "hair_styles",
                    "entries": palette::HAIR_STYLES.len(),
                    "names": palette::HAIR_STYLES.iter().map(|s| s.name).collect::<Vec<_>>(),
                },
                {
                    "table": "hair_colors",
                    "entries": palette::HAIR_COLORS.len(),
                    "colors": palette::HAIR_COLORS.iter().map(|c| c.hex_rgb()).collect::<Vec<_>>(),
                },
                {
                    "table": "accessories",
                    "entries": palette::ACCESSORY_TABLE.len(),
                    "slots": palette::ACCESSORY_TABLE,
                },
                {
                    "table": "mouths",
                    "entries": palette::MOUTH_TABLE.len(),
                    "slots": palette::MOUTH_TABLE,
                },
                {
                    "table": "extras",
                    "entries": palette::EXTRA_TABLE.len(),
                    "slots": palette::EXTRA_TABLE,
                },
                {
                    "table": "eye_colors",
                    "entries": palette::EYE_COLORS.len(),
                    "colors": palette::EYE_COLORS.iter().map(|c| c.hex_rgb()).collect::<Vec<_>>(),
                },
            ]);

            println!("{}", serde_json::to_string_pretty(&tables).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Traits { seed } => {
            let traits = pipeline.preview_traits(&seed);
            let output = serde_json::json!({
                "seed": seed,
                "hash": punkforge_core::hash_seed(&seed),
                "traits": traits,
                "skin_tone_name": traits.skin().name,
                "hair_style_name": traits.hair().name,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Render {
            seed,
            size,
            format,
            require_engine,
            out,
        } => {
            let request = RenderRequest {
                seed,
                size,
                formats: format.into_iter().map(Into::into).collect(),
                engine_min_version: require_engine,
            };

            match pipeline.render(&request) {
                Ok(avatar) => {
                    if let Some(dir) = out {
                        if let Err(e) = write_exports(&dir, &avatar) {
                            eprintln!(r#"{{"error": "Failed to write exports: {}"}}"#, e);
                            return ExitCode::FAILURE;
                        }
                    }
                    let output = serde_json::json!({
                        "success": true,
                        "avatar": avatar,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2) // Validation / export failure
                }
            }
        }
    }
}

fn write_exports(
    dir: &PathBuf,
    avatar: &punkforge_core::RenderedAvatar,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for export in &avatar.exports {
        let data = base64::engine::general_purpose::STANDARD.decode(&export.data_base64)?;
        fs::write(dir.join(&export.filename), data)?;
    }
    Ok(())
}
