//! Ratatui front end: screens for browsing, reading and bookmarking hymns.

mod app;
mod forms;
mod helpers;
mod labels;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
