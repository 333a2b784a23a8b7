use hymn_book::db::{ensure_schema, get_value, put_value};
use hymn_book::models::{Language, ServiceSlot};
use hymn_book::prefs::{Preferences, KEY_FAVORITES, KEY_HISTORY};
use tempfile::tempdir;

#[test]
fn preferences_survive_reopening_the_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("hymn-book.sqlite");

    {
        let mut prefs = Preferences::load(ensure_schema(&path).unwrap());
        prefs.set_app_language(Language::Yoruba).unwrap();
        prefs.set_default_hymn_language(Language::English).unwrap();
        prefs.toggle_favorite(12).unwrap();
        prefs.toggle_favorite(3).unwrap();
        prefs.record_history(3).unwrap();
        prefs.record_history(12).unwrap();
        prefs.record_search("grace").unwrap();
        prefs.set_service_hymn(ServiceSlot::Closing, Some(12)).unwrap();
        prefs.set_custom_bookmark(3, "wedding").unwrap();
    }

    let prefs = Preferences::load(ensure_schema(&path).unwrap());
    assert_eq!(prefs.app_language(), Language::Yoruba);
    assert_eq!(prefs.default_hymn_language(), Language::English);
    assert_eq!(prefs.favorites().ids(), [12, 3]);
    assert_eq!(prefs.history().ids(), [12, 3]);
    assert_eq!(prefs.recent_searches().terms(), ["grace"]);
    assert_eq!(prefs.bookmarks().service_hymn(ServiceSlot::Closing), Some(12));
    assert_eq!(prefs.bookmarks().custom_for(3), Some("wedding"));
}

#[test]
fn fresh_store_uses_defaults() {
    let dir = tempdir().unwrap();
    let prefs = Preferences::load(ensure_schema(&dir.path().join("prefs.sqlite")).unwrap());
    assert_eq!(prefs.app_language(), Language::English);
    assert_eq!(prefs.default_hymn_language(), Language::Yoruba);
    assert!(prefs.favorites().is_empty());
    assert!(prefs.bookmarks().entries().is_empty());
}

#[test]
fn unreadable_value_falls_back_without_touching_others() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.sqlite");
    let conn = ensure_schema(&path).unwrap();
    put_value(&conn, KEY_FAVORITES, "not a list").unwrap();
    put_value(&conn, KEY_HISTORY, &[4u32, 2]).unwrap();

    let prefs = Preferences::load(conn);
    assert!(prefs.favorites().is_empty());
    assert_eq!(prefs.history().ids(), [4, 2]);
}

#[test]
fn values_are_stored_as_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.sqlite");
    {
        let mut prefs = Preferences::load(ensure_schema(&path).unwrap());
        prefs.toggle_favorite(8).unwrap();
    }
    let conn = ensure_schema(&path).unwrap();
    let stored: Option<Vec<u32>> = get_value(&conn, KEY_FAVORITES).unwrap();
    assert_eq!(stored, Some(vec![8]));
}
