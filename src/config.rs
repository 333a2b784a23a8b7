//! Startup configuration. Everything has a sensible default so the binary
//! runs with no flags; flags and environment variables only override paths
//! and the log level.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use directories::BaseDirs;

use crate::models::Language;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".hymn-book";
/// SQLite file holding the preference store.
const DB_FILE_NAME: &str = "hymn-book.sqlite";
const LOG_FILE_NAME: &str = "hymn-book.log";
const HYMNS_FILE_NAME: &str = "hymns.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    En,
    Yo,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::English,
            LanguageArg::Yo => Language::Yoruba,
        }
    }
}

/// Browse, search and bookmark the hymn book from the terminal.
#[derive(Debug, Parser)]
#[command(name = "hymn-book", version, about)]
pub struct Cli {
    /// Hymn data file (JSON array of hymns).
    #[arg(long, env = "HYMN_BOOK_HYMNS")]
    pub hymns: Option<PathBuf>,

    /// Directory holding the preference database and the log file.
    #[arg(long, env = "HYMN_BOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Show hymns in this language for the session, ignoring the saved default.
    #[arg(long, value_enum)]
    pub hymn_language: Option<LanguageArg>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "HYMN_BOOK_LOG", default_value = "info")]
    pub log_level: String,
}

/// Concrete paths and overrides derived from [`Cli`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub hymns_path: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub hymn_language: Option<Language>,
    pub log_level: String,
}

impl Config {
    pub fn resolve(cli: Cli) -> Result<Self> {
        let data_dir = match cli.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self::with_data_dir(data_dir, cli.hymns, cli.hymn_language, cli.log_level))
    }

    fn with_data_dir(
        data_dir: PathBuf,
        hymns: Option<PathBuf>,
        hymn_language: Option<LanguageArg>,
        log_level: String,
    ) -> Self {
        Self {
            hymns_path: hymns.unwrap_or_else(|| data_dir.join(HYMNS_FILE_NAME)),
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            hymn_language: hymn_language.map(Language::from),
            log_level,
            data_dir,
        }
    }
}

/// Resolve `~/.hymn-book`.
fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
