//! Optional TOML configuration.
//!
//! Values resolve as: command line, then config file, then built-in defaults.
//!
//! ```toml
//! extensions = ["jpg", "png"]
//! start = 1
//! recursive = true
//! max_depth = 3
//! title = "Journey pictures"
//! inline = false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::ScanOptions;
use crate::error::{Error, Result};
use crate::page::PageOptions;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub start: Option<u32>,
    pub recursive: Option<bool>,
    pub max_depth: Option<usize>,
    pub title: Option<String>,
    pub inline: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Overrides taken from the command line. `None`/`false` defers to the file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub start: Option<u32>,
    pub recursive: bool,
    pub max_depth: Option<usize>,
    pub title: Option<String>,
    pub inline: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scan: ScanOptions,
    pub page: PageOptions,
}

impl Config {
    pub fn resolve(file: FileConfig, cli: CliOverrides) -> Result<Self> {
        let defaults = ScanOptions::default();

        let extensions: Vec<String> = file
            .extensions
            .map(|exts| {
                exts.into_iter()
                    .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.extensions);
        if extensions.is_empty() {
            return Err(Error::Config {
                key: "extensions",
                reason: "at least one image extension is required".into(),
            });
        }

        let start = cli.start.or(file.start).unwrap_or(defaults.start);
        if start == 0 {
            return Err(Error::Config {
                key: "start",
                reason: "numbering starts at 1 or higher".into(),
            });
        }

        let max_depth = cli.max_depth.or(file.max_depth);
        if max_depth == Some(0) {
            return Err(Error::Config {
                key: "max_depth",
                reason: "must be at least 1".into(),
            });
        }

        let page_defaults = PageOptions::default();
        Ok(Self {
            scan: ScanOptions {
                extensions,
                start,
                recursive: cli.recursive || file.recursive.unwrap_or(false),
                max_depth,
            },
            page: PageOptions {
                title: cli.title.or(file.title).unwrap_or(page_defaults.title),
                inline: cli.inline || file.inline.unwrap_or(page_defaults.inline),
            },
        })
    }
}
