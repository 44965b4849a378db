//! Galpick library crate
//!
//! This crate provides the core functionality for the `galpick` CLI: pick
//! pictures out of a numbered gallery and copy the chosen numbers to the
//! clipboard. It is organized into small modules:
//!
//! - `catalog` — numbered image entries, scanned from a directory or loaded
//!   from a JSON manifest.
//! - `selection` — the explicit per-entry selection state and the actions
//!   that change it.
//! - `summary` — the `#n: filename` lines and `"1, 3"` number string derived
//!   from a selection.
//! - `clipboard` — the clipboard exporter (`arboard`-backed) with distinct
//!   success and failure outcomes.
//! - `page` — a static HTML gallery page with the same click-to-select
//!   behavior.
//! - `session` — an interactive terminal driver.
//! - `config` — optional TOML config merged with CLI flags.
//!
//! The binary `src/main.rs` calls `galpick_lib::run()` to execute the CLI.

pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod page;
pub mod selection;
pub mod session;
pub mod summary;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::catalog::Catalog;
use crate::clipboard::{MemoryClipboard, SystemClipboard};
use crate::config::{CliOverrides, Config, FileConfig};
use crate::page::render_page;
use crate::selection::SelectionSurface;
use crate::session::Session;

pub use crate::error::{Error, Result};

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file (extensions, start, recursive, max_depth, title, inline)
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the gallery comes from, shared by every subcommand.
#[derive(Args, Debug)]
struct Source {
    /// Directory of images to number
    #[arg(required_unless_present = "manifest", conflicts_with = "manifest")]
    dir: Option<PathBuf>,

    /// JSON manifest with pre-assigned numbers instead of a directory
    #[arg(long = "manifest")]
    manifest: Option<PathBuf>,

    /// First display number for directory scans
    #[arg(long = "start")]
    start: Option<u32>,

    /// Descend into subdirectories
    #[arg(short = 'r', long = "recursive", action = ArgAction::SetTrue)]
    recursive: bool,

    /// Maximum directory depth when recursive
    #[arg(long = "max-depth")]
    max_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a static HTML page for selecting pictures in a browser
    Page {
        #[command(flatten)]
        source: Source,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long = "title")]
        title: Option<String>,

        /// Embed images as data: URIs so the page is self-contained
        #[arg(long = "inline", action = ArgAction::SetTrue)]
        inline: bool,
    },
    /// Select pictures interactively in the terminal
    ///
    /// On Linux the copied numbers live on the clipboard only while galpick
    /// runs unless a clipboard manager is active; the final selection is also
    /// printed to stdout on exit.
    Select {
        #[command(flatten)]
        source: Source,

        /// Keep the copy in-process instead of touching the system clipboard
        #[arg(long = "no-clipboard", action = ArgAction::SetTrue)]
        no_clipboard: bool,
    },
    /// Print the numbered gallery
    List {
        #[command(flatten)]
        source: Source,
    },
}

fn load_config(path: Option<&PathBuf>, overrides: CliOverrides) -> Result<Config> {
    let file = match path {
        Some(p) => FileConfig::load(p)?,
        None => FileConfig::default(),
    };
    Config::resolve(file, overrides)
}

fn overrides_for(source: &Source) -> CliOverrides {
    CliOverrides {
        start: source.start,
        recursive: source.recursive,
        max_depth: source.max_depth,
        ..CliOverrides::default()
    }
}

fn load_catalog(source: &Source, config: &Config) -> Result<Catalog> {
    match (&source.manifest, &source.dir) {
        (Some(manifest), _) => Catalog::load_manifest(manifest),
        (None, Some(dir)) => Catalog::scan(dir, &config.scan),
        // clap enforces one of the two
        (None, None) => Catalog::from_entries(Vec::new()),
    }
}

/// Run the Galpick CLI.
///
/// Parses CLI arguments and dispatches to module functions.
///
/// Behavior summary:
/// - `page` — render the gallery as a static HTML page with click-to-select
///   and a copy button.
/// - `select` — interactive terminal selection; copying writes the number
///   string to the clipboard and the final selection is printed on exit.
/// - `list` — print `#n: filename` for every entry.
///
/// # Errors
/// Any config, catalog, or I/O error. `main` prints it and exits non-zero.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Page {
            source,
            output,
            title,
            inline,
        } => {
            let overrides = CliOverrides {
                title,
                inline,
                ..overrides_for(&source)
            };
            let config = load_config(cli.config.as_ref(), overrides)?;
            let catalog = load_catalog(&source, &config)?;
            if catalog.is_empty() {
                log::warn!("gallery is empty; the page will have nothing to select");
            }
            let html = render_page(&catalog, &config.page)?;
            match output {
                Some(path) => {
                    fs::write(&path, html).map_err(|e| Error::io(&path, e))?;
                    eprintln!("wrote {} ({} images)", path.display(), catalog.len());
                }
                None => {
                    print!("{}", html);
                }
            }
        }
        Commands::Select {
            source,
            no_clipboard,
        } => {
            let config = load_config(cli.config.as_ref(), overrides_for(&source))?;
            let catalog = load_catalog(&source, &config)?;
            let surface = SelectionSurface::new(&catalog);

            // Session chatter goes to stderr so stdout carries only the result.
            let stdin = io::stdin();
            let mut stderr = io::stderr();
            let numbers = if no_clipboard {
                let mut sink = MemoryClipboard::default();
                Session::new(surface, &mut sink).run(stdin.lock(), &mut stderr)?
            } else {
                let mut sink = SystemClipboard::new();
                Session::new(surface, &mut sink).run(stdin.lock(), &mut stderr)?
            };

            if !numbers.is_empty() {
                println!("{}", numbers);
            }
        }
        Commands::List { source } => {
            let config = load_config(cli.config.as_ref(), overrides_for(&source))?;
            let catalog = load_catalog(&source, &config)?;
            let mut stdout = io::stdout().lock();
            for entry in catalog.entries() {
                writeln!(stdout, "#{}: {}", entry.number, entry.filename)
                    .map_err(|e| Error::io("<stdout>", e))?;
            }
        }
    }
    Ok(())
}
