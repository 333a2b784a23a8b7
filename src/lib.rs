//! Hymn book library: the catalog loader, the search/filter/sort/group engine,
//! the preference store and the terminal front end. The binary only wires
//! these together.
pub mod catalog;
pub mod config;
pub mod db;
pub mod library;
pub mod logging;
pub mod models;
pub mod prefs;
pub mod ui;

pub use catalog::{CatalogError, Hymnal};
pub use config::{Cli, Config};
pub use db::ensure_schema;
pub use library::{process, LibraryQuery, LibraryView};
pub use logging::init_logging;
pub use models::{Hymn, Language};
pub use prefs::Preferences;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
