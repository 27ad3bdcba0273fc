//! svg2ivg
//!
//! Convert SVG icons to IconVG, either as raw `.ivg` files or as a Rust
//! module of byte-slice constants.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ivg_svg::{convert, ConvertOptions, SvgImage};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod codegen;
mod config;
mod sources;

use codegen::Icon;
use config::{IvgConfig, OutputFormat, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "svg2ivg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert SVG icons to IconVG", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert SVG files or directories
    Convert {
        /// SVG files or directories to search for them
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Output file (directory with --raw); the module goes to stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix for generated constant names
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// Write one .ivg file per icon instead of a Rust module
        #[arg(long)]
        raw: bool,

        /// Keep full coordinate precision
        #[arg(long)]
        high_res: bool,
    },

    /// Run every batch in ivg.toml
    Build {
        /// Directory containing ivg.toml
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Create a starter ivg.toml
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Where converted icons go
enum Output<'a> {
    Module(Option<&'a Path>),
    Raw(&'a Path),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Convert {
            sources,
            output,
            prefix,
            raw,
            high_res,
        } => {
            let target = if raw {
                let dir = output
                    .as_deref()
                    .context("--raw needs an output directory (-o)")?;
                Output::Raw(dir)
            } else {
                Output::Module(output.as_deref())
            };
            let options = ConvertOptions {
                high_resolution_coordinates: high_res,
            };
            cmd_convert(&sources, target, &prefix, options)
        }

        Commands::Build { dir } => cmd_build(&dir),

        Commands::Init { dir } => cmd_init(&dir),
    }
}

fn cmd_convert(
    sources: &[PathBuf],
    output: Output<'_>,
    prefix: &str,
    options: ConvertOptions,
) -> Result<()> {
    let files = sources::collect(sources)?;
    if files.is_empty() {
        anyhow::bail!("No SVG files found");
    }

    let mut icons = Vec::with_capacity(files.len());
    for file in &files {
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("{} has no usable file name", file.display()))?;
        icons.push(Icon {
            name: codegen::const_name(prefix, stem),
            source: file.display().to_string(),
            bytes: convert_file(file, options)?,
        });
    }

    match output {
        Output::Raw(dir) => write_raw(dir, &files, &icons)?,
        Output::Module(path) => {
            codegen::check_unique(&icons)?;
            let module = codegen::render_module(&icons);
            match path {
                Some(path) => write_file(path, module.as_bytes())?,
                None => std::io::stdout()
                    .write_all(module.as_bytes())
                    .context("Failed to write to stdout")?,
            }
        }
    }

    info!("Converted {} icon(s)", icons.len());
    Ok(())
}

fn convert_file(path: &Path, options: ConvertOptions) -> Result<Vec<u8>> {
    debug!("Converting {}", path.display());
    let image = SvgImage::from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    convert(&image, options).with_context(|| format!("Failed to convert {}", path.display()))
}

fn write_raw(dir: &Path, files: &[PathBuf], icons: &[Icon]) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(icons.len());
    for (file, icon) in files.iter().zip(icons) {
        let target = dir.join(file.with_extension("ivg").file_name().unwrap_or_default());
        if written.contains(&target) {
            anyhow::bail!("More than one source would be written to {}", target.display());
        }
        write_file(&target, &icon.bytes)?;
        written.push(target);
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn cmd_build(dir: &Path) -> Result<()> {
    let config = IvgConfig::load_from_dir(dir)?;
    if config.batch.is_empty() {
        anyhow::bail!("{} defines no [[batch]] entries", dir.join(CONFIG_FILE).display());
    }

    let options = ConvertOptions {
        high_resolution_coordinates: config.encoder.high_resolution_coordinates,
    };

    for (index, batch) in config.batch.iter().enumerate() {
        info!("Building batch {} -> {}", index, batch.output);
        let sources: Vec<PathBuf> = batch.sources.iter().map(|s| dir.join(s)).collect();
        let output = dir.join(&batch.output);
        let target = match batch.format {
            OutputFormat::Rust => Output::Module(Some(&output)),
            OutputFormat::Raw => Output::Raw(&output),
        };
        cmd_convert(&sources, target, &batch.prefix, options)
            .with_context(|| format!("Batch {} failed", index))?;
    }

    Ok(())
}

fn cmd_init(dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let toml = IvgConfig::starter().to_toml()?;
    write_file(&config_path, toml.as_bytes())?;

    info!("Created {}", config_path.display());
    info!("Put SVG files in {}/icons and run `svg2ivg build`", dir.display());
    Ok(())
}
