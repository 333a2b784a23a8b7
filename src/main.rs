//! Binary entry point: resolve configuration, start logging, load the hymns
//! and the saved preferences, then drive the Ratatui event loop until the
//! user exits.
use anyhow::Context;
use clap::Parser;
use tracing::info;

use hymn_book::{ensure_schema, init_logging, run_app, App, Cli, Config, Hymnal, Preferences};

fn main() -> anyhow::Result<()> {
    let config = Config::resolve(Cli::parse())?;
    init_logging(&config.log_path, &config.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        hymns = %config.hymns_path.display(),
        db = %config.db_path.display(),
        "starting hymn book"
    );

    let hymnal = Hymnal::load(&config.hymns_path)
        .with_context(|| format!("failed to load hymns from {}", config.hymns_path.display()))?;
    let conn = ensure_schema(&config.db_path)?;
    let prefs = Preferences::load(conn);

    let mut app = App::new(
        hymnal,
        prefs,
        config.hymn_language,
        config.data_dir.join("shared"),
    );
    run_app(&mut app)
}
