//! Configuration loading
//!
//! Per-field resolution priority:
//! 1. Command-line flag (highest)
//! 2. `READALONG_*` environment variable
//! 3. `readalong.toml` config file
//! 4. Compiled default

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5750;
pub const DEFAULT_SHEET_URL: &str = "http://127.0.0.1:9790";
pub const DEFAULT_TABLE: &str = "FBBQ Onyx Storm Progress Tracker";
pub const DEFAULT_CREDENTIALS: &str = "credentials.json";
pub const DEFAULT_PHOTOS_DIR: &str = "photos";

/// Command-line arguments for readalong
#[derive(Parser, Debug, Default)]
#[command(name = "readalong")]
#[command(about = "Book-club progress tracker")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "READALONG_PORT")]
    pub port: Option<u16>,

    /// Base URL of the sheet service
    #[arg(long, env = "READALONG_SHEET_URL")]
    pub sheet_url: Option<String>,

    /// Sheet table holding the progress data
    #[arg(long, env = "READALONG_TABLE")]
    pub table: Option<String>,

    /// Path to the service-account credential file
    #[arg(long, env = "READALONG_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Directory of member photos, served under /photos
    #[arg(long, env = "READALONG_PHOTOS_DIR")]
    pub photos_dir: Option<PathBuf>,

    /// Path to an optional TOML config file
    #[arg(long, default_value = "readalong.toml", env = "READALONG_CONFIG")]
    pub config: PathBuf,
}

/// Optional overrides from `readalong.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub sheet_url: Option<String>,
    pub table: Option<String>,
    pub credentials: Option<PathBuf>,
    pub photos_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Read the config file. An absent file is normal; a malformed one is
    /// ignored with a warning rather than failing startup.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sheet_url: String,
    pub table: String,
    pub credentials: PathBuf,
    pub photos_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from parsed arguments (clap has already folded
    /// in the environment variables) plus the config file and defaults.
    pub fn resolve(args: &Args) -> Self {
        let file = FileConfig::load(&args.config);
        Self {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            sheet_url: args
                .sheet_url
                .clone()
                .or(file.sheet_url)
                .unwrap_or_else(|| DEFAULT_SHEET_URL.to_string()),
            table: args
                .table
                .clone()
                .or(file.table)
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            credentials: args
                .credentials
                .clone()
                .or(file.credentials)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS)),
            photos_dir: args
                .photos_dir
                .clone()
                .or(file.photos_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PHOTOS_DIR)),
        }
    }
}
