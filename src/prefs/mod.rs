//! User preferences that survive restarts: languages, favorites, history,
//! recent searches and bookmarks. [`Preferences`] is loaded once at startup
//! and owned by the UI; every mutation is written straight through to the
//! store, so there is no separate save step.

mod bookmarks;
mod favorites;
mod history;
mod recent;
mod settings;

pub use bookmarks::Bookmarks;
pub use favorites::Favorites;
pub use history::{History, MAX_HISTORY};
pub use recent::{RecentSearches, MAX_RECENT_SEARCHES};
pub use settings::Settings;

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::db::{get_value, put_value};
use crate::models::{Bookmark, Language, ServiceSlot};

pub const KEY_APP_LANGUAGE: &str = "hymn-app-lang";
pub const KEY_DEFAULT_HYMN_LANGUAGE: &str = "hymn-default-lang";
pub const KEY_FAVORITES: &str = "hymn-favorites";
pub const KEY_HISTORY: &str = "hymn-history";
pub const KEY_RECENT_SEARCHES: &str = "hymn-recent-searches";
pub const KEY_BOOKMARKS: &str = "hymn-bookmarks";

/// Persistent application state.
pub struct Preferences {
    conn: Connection,
    settings: Settings,
    favorites: Favorites,
    history: History,
    recent_searches: RecentSearches,
    bookmarks: Bookmarks,
}

/// Read a stored value, falling back to `default` when it is absent or can
/// no longer be decoded. A broken value must not stop the app from starting.
fn load_or<T: DeserializeOwned>(conn: &Connection, key: &str, default: T) -> T {
    match get_value(conn, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(err) => {
            warn!(key, error = %format!("{err:#}"), "ignoring unreadable preference");
            default
        }
    }
}

impl Preferences {
    pub fn load(conn: Connection) -> Self {
        let defaults = Settings::default();
        let settings = Settings {
            app_language: load_or(&conn, KEY_APP_LANGUAGE, defaults.app_language),
            default_hymn_language: load_or(
                &conn,
                KEY_DEFAULT_HYMN_LANGUAGE,
                defaults.default_hymn_language,
            ),
        };
        let favorites = Favorites::from_ids(load_or(&conn, KEY_FAVORITES, Vec::new()));
        let history = History::from_ids(load_or(&conn, KEY_HISTORY, Vec::new()));
        let recent_searches =
            RecentSearches::from_terms(load_or::<Vec<String>>(&conn, KEY_RECENT_SEARCHES, Vec::new()));
        let bookmarks =
            Bookmarks::from_entries(load_or::<Vec<Bookmark>>(&conn, KEY_BOOKMARKS, Vec::new()));

        debug!(
            favorites = favorites.ids().len(),
            history = history.ids().len(),
            bookmarks = bookmarks.entries().len(),
            "preferences loaded"
        );

        Self {
            conn,
            settings,
            favorites,
            history,
            recent_searches,
            bookmarks,
        }
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        put_value(&self.conn, key, value)?;
        debug!(key, "preference saved");
        Ok(())
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn app_language(&self) -> Language {
        self.settings.app_language
    }

    pub fn set_app_language(&mut self, language: Language) -> Result<()> {
        self.settings.app_language = language;
        self.persist(KEY_APP_LANGUAGE, &language)
    }

    pub fn default_hymn_language(&self) -> Language {
        self.settings.default_hymn_language
    }

    pub fn set_default_hymn_language(&mut self, language: Language) -> Result<()> {
        self.settings.default_hymn_language = language;
        self.persist(KEY_DEFAULT_HYMN_LANGUAGE, &language)
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, hymn_id: u32) -> bool {
        self.favorites.contains(hymn_id)
    }

    /// Returns `true` when the hymn became a favorite.
    pub fn toggle_favorite(&mut self, hymn_id: u32) -> Result<bool> {
        let now_favorite = self.favorites.toggle(hymn_id);
        self.persist(KEY_FAVORITES, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn record_history(&mut self, hymn_id: u32) -> Result<()> {
        self.history.record(hymn_id);
        self.persist(KEY_HISTORY, &self.history)
    }

    pub fn recent_searches(&self) -> &RecentSearches {
        &self.recent_searches
    }

    pub fn record_search(&mut self, term: &str) -> Result<()> {
        if self.recent_searches.record(term) {
            self.persist(KEY_RECENT_SEARCHES, &self.recent_searches)?;
        }
        Ok(())
    }

    pub fn clear_recent_searches(&mut self) -> Result<()> {
        self.recent_searches.clear();
        self.persist(KEY_RECENT_SEARCHES, &self.recent_searches)
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    pub fn set_service_hymn(&mut self, slot: ServiceSlot, hymn_id: Option<u32>) -> Result<()> {
        self.bookmarks.set_service_hymn(slot, hymn_id, Self::now());
        self.persist(KEY_BOOKMARKS, &self.bookmarks)
    }

    pub fn set_custom_bookmark(&mut self, hymn_id: u32, description: &str) -> Result<()> {
        self.bookmarks
            .set_custom(hymn_id, description.trim().to_string(), Self::now());
        self.persist(KEY_BOOKMARKS, &self.bookmarks)
    }

    pub fn remove_custom_bookmark(&mut self, hymn_id: u32) -> Result<bool> {
        let removed = self.bookmarks.remove_custom(hymn_id);
        if removed {
            self.persist(KEY_BOOKMARKS, &self.bookmarks)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn defaults_when_store_is_empty() {
        let prefs = Preferences::load(open_in_memory().unwrap());
        assert_eq!(prefs.app_language(), Language::English);
        assert_eq!(prefs.default_hymn_language(), Language::Yoruba);
        assert!(prefs.favorites().is_empty());
        assert!(prefs.recent_searches().is_empty());
    }

    #[test]
    fn broken_value_falls_back_to_default() {
        let conn = open_in_memory().unwrap();
        put_value(&conn, KEY_FAVORITES, "oops").unwrap();
        put_value(&conn, KEY_APP_LANGUAGE, "fr").unwrap();
        let prefs = Preferences::load(conn);
        assert!(prefs.favorites().is_empty());
        assert_eq!(prefs.app_language(), Language::English);
    }

    #[test]
    fn mutations_are_written_through() {
        let mut prefs = Preferences::load(open_in_memory().unwrap());
        prefs.toggle_favorite(12).unwrap();
        prefs.record_search("  Grace ").unwrap();
        prefs.set_service_hymn(ServiceSlot::Opening, Some(3)).unwrap();

        assert_eq!(
            get_value::<Vec<u32>>(&prefs.conn, KEY_FAVORITES).unwrap(),
            Some(vec![12])
        );
        assert_eq!(
            get_value::<Vec<String>>(&prefs.conn, KEY_RECENT_SEARCHES).unwrap(),
            Some(vec!["Grace".to_string()])
        );
        let stored: Vec<Bookmark> = get_value(&prefs.conn, KEY_BOOKMARKS).unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].hymn_id(), 3);
    }
}
