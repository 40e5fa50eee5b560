//! gddoc — generate cross-linked API docs from annotated GDScript sources.
//!
//! Scans a source tree for `class_name` and `func` declarations, parses the
//! `#` comment blocks above them (`@param`, `@return`, `Returns:`), and writes:
//!
//! - `generated.md`: every file with a short entry per function
//! - `classes/<path>.md`: one detail page per source file
//! - `index.md`: pages grouped by top-level directory
//!
//! Every run regenerates the whole output directory contents.

mod anchor;
mod discover;
mod model;
mod parser;
mod render;
mod xref;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gddoc",
    about = "Generate API documentation from annotated GDScript source files"
)]
struct Cli {
    /// Directory to scan (recursively)
    #[arg(default_value = "addons")]
    source: PathBuf,

    /// Output directory
    #[arg(short = 'o', long, default_value = "docs/api")]
    output: PathBuf,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Source file extension to scan
    #[arg(short = 'e', long, default_value = "gd")]
    extension: String,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Fail on a bad format before touching the filesystem
    let renderer = render::create_renderer(&cli.format)?;

    let files = discover::discover(&cli.source, &cli.extension)?;

    let mut sources: Vec<(String, String)> = Vec::with_capacity(files.len());
    for file in files {
        match fs::read_to_string(&file.path) {
            Ok(text) => sources.push((file.rel, text)),
            Err(e) => warn!(path = %file.path.display(), error = %e, "skipping unreadable file"),
        }
    }

    let units = parser::scan_all(sources.iter().map(|(p, t)| (p.as_str(), t.as_str())));
    let docs = render::render_all(renderer.as_ref(), &units)?;

    for doc in &docs {
        write_doc(&cli.output, doc)?;
    }

    info!(
        units = units.len(),
        documents = docs.len(),
        output = %cli.output.display(),
        "generated API docs"
    );
    Ok(())
}

/// Write one rendered document below `output_dir`, creating directories.
fn write_doc(output_dir: &Path, doc: &render::RenderedDoc) -> Result<()> {
    let out_path = output_dir.join(&doc.path);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(&out_path, &doc.contents)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    debug!(path = %out_path.display(), "wrote document");
    Ok(())
}
