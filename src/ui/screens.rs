use std::collections::HashSet;

use crate::catalog::Hymnal;
use crate::library::{process, HymnFilter, LibraryQuery, LibraryView, ViewMode};
use crate::models::{Language, ServiceSlot};
use crate::prefs::Bookmarks;

/// Move a list cursor by `offset`, clamped to the list.
fn step(selected: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = selected as isize + offset;
    target.clamp(0, len as isize - 1) as usize
}

fn clamp(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.min(len - 1)
    }
}

/// One line of the library list. Screens keep hymn ids rather than borrowed
/// hymns so they can live alongside the catalog inside [`super::App`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LibraryRow {
    Header {
        label: String,
        count: usize,
        expanded: bool,
    },
    Hymn(u32),
}

/// State behind the library screen: the query the user has built up and the
/// rows it currently produces.
pub(crate) struct LibraryScreen {
    pub(crate) query: LibraryQuery,
    pub(crate) rows: Vec<LibraryRow>,
    /// Hymns matched by the query, including those hidden in collapsed groups.
    pub(crate) match_count: usize,
    pub(crate) selected: usize,
    pub(crate) expanded: HashSet<String>,
    pub(crate) categories: Vec<String>,
    categories_language: Option<Language>,
}

impl LibraryScreen {
    pub(crate) fn new(hymnal: &Hymnal, language: Language) -> Self {
        let mut screen = Self {
            query: LibraryQuery::default(),
            rows: Vec::new(),
            match_count: 0,
            selected: 0,
            expanded: HashSet::new(),
            categories: Vec::new(),
            categories_language: None,
        };
        screen.refresh(hymnal, language);
        screen
    }

    /// Recompute rows from the catalog. Called after every change to the
    /// query, the filter, the view or the hymn language.
    pub(crate) fn refresh(&mut self, hymnal: &Hymnal, language: Language) {
        if self.categories_language != Some(language) {
            self.categories = hymnal.categories(language);
            self.categories_language = Some(language);
        }

        let view = process(hymnal.hymns(), &self.query, language);
        self.match_count = view.len();
        self.rows = match view {
            LibraryView::List(hymns) => hymns.iter().map(|hymn| LibraryRow::Hymn(hymn.id)).collect(),
            LibraryView::Grouped(groups) => {
                let mut rows = Vec::new();
                for (label, hymns) in groups.iter() {
                    let expanded = self.expanded.contains(label);
                    rows.push(LibraryRow::Header {
                        label: label.to_string(),
                        count: hymns.len(),
                        expanded,
                    });
                    if expanded {
                        rows.extend(hymns.iter().map(|hymn| LibraryRow::Hymn(hymn.id)));
                    }
                }
                rows
            }
        };
        self.selected = clamp(self.selected, self.rows.len());
    }

    pub(crate) fn set_text(&mut self, text: String) {
        if text != self.query.text {
            self.query.text = text;
            self.selected = 0;
        }
    }

    pub(crate) fn set_filter(&mut self, filter: HymnFilter) {
        self.query.filter = filter;
        self.selected = 0;
    }

    /// Switch between the chorus filter and no filter.
    pub(crate) fn toggle_chorus(&mut self) -> bool {
        let next = if self.query.filter == HymnFilter::Chorus {
            HymnFilter::None
        } else {
            HymnFilter::Chorus
        };
        self.set_filter(next);
        self.query.filter == HymnFilter::Chorus
    }

    pub(crate) fn cycle_view(&mut self) -> ViewMode {
        self.query.view = self.query.view.next();
        self.selected = 0;
        self.query.view
    }

    pub(crate) fn toggle_group(&mut self, label: &str) {
        if !self.expanded.remove(label) {
            self.expanded.insert(label.to_string());
        }
    }

    pub(crate) fn current_row(&self) -> Option<&LibraryRow> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, self.rows.len(), offset);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }
}

/// A plain list of hymn ids, used by the favorites and history screens.
#[derive(Default)]
pub(crate) struct HymnListScreen {
    pub(crate) ids: Vec<u32>,
    pub(crate) selected: usize,
}

impl HymnListScreen {
    pub(crate) fn set_ids(&mut self, ids: Vec<u32>) {
        self.ids = ids;
        self.selected = clamp(self.selected, self.ids.len());
    }

    pub(crate) fn current(&self) -> Option<u32> {
        self.ids.get(self.selected).copied()
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, self.ids.len(), offset);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BookmarkRow {
    Slot {
        slot: ServiceSlot,
        hymn_id: Option<u32>,
    },
    Custom {
        hymn_id: u32,
        note: String,
    },
}

impl BookmarkRow {
    pub(crate) fn hymn_id(&self) -> Option<u32> {
        match self {
            BookmarkRow::Slot { hymn_id, .. } => *hymn_id,
            BookmarkRow::Custom { hymn_id, .. } => Some(*hymn_id),
        }
    }
}

/// Service slots first (always listed, possibly empty), then custom
/// bookmarks newest first.
#[derive(Default)]
pub(crate) struct BookmarksScreen {
    pub(crate) rows: Vec<BookmarkRow>,
    pub(crate) selected: usize,
}

impl BookmarksScreen {
    pub(crate) fn refresh(&mut self, bookmarks: &Bookmarks, hymnal: &Hymnal) {
        let mut rows: Vec<BookmarkRow> = ServiceSlot::ALL
            .iter()
            .map(|slot| BookmarkRow::Slot {
                slot: *slot,
                hymn_id: bookmarks
                    .service_hymn(*slot)
                    .filter(|id| hymnal.get(*id).is_some()),
            })
            .collect();
        rows.extend(
            bookmarks
                .custom_newest_first()
                .into_iter()
                .filter(|(hymn_id, _)| hymnal.get(*hymn_id).is_some())
                .map(|(hymn_id, note)| BookmarkRow::Custom {
                    hymn_id,
                    note: note.to_string(),
                }),
        );
        self.rows = rows;
        self.selected = clamp(self.selected, self.rows.len());
    }

    pub(crate) fn has_custom(&self) -> bool {
        self.rows
            .iter()
            .any(|row| matches!(row, BookmarkRow::Custom { .. }))
    }

    pub(crate) fn current(&self) -> Option<&BookmarkRow> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, self.rows.len(), offset);
    }
}

/// The hymn being read and how far it is scrolled.
pub(crate) struct DetailScreen {
    pub(crate) hymn_id: u32,
    pub(crate) scroll: u16,
}

impl DetailScreen {
    pub(crate) fn new(hymn_id: u32) -> Self {
        Self { hymn_id, scroll: 0 }
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        self.scroll = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingRow {
    AppLanguage,
    DefaultHymnLanguage,
}

impl SettingRow {
    pub(crate) const ALL: [SettingRow; 2] = [SettingRow::AppLanguage, SettingRow::DefaultHymnLanguage];
}

#[derive(Default)]
pub(crate) struct SettingsScreen {
    pub(crate) selected: usize,
}

impl SettingsScreen {
    pub(crate) fn current(&self) -> SettingRow {
        SettingRow::ALL[clamp(self.selected, SettingRow::ALL.len())]
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, SettingRow::ALL.len(), offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {"id": 3, "title_en": "Praise Him", "category": "Praise",
         "lyrics_en": [{"type": "stanza", "lines": ["a"]}, {"type": "chorus", "lines": ["b"]}]},
        {"id": 1, "title_en": "Abide", "category": "Evening",
         "lyrics_en": [{"type": "stanza", "lines": ["c"]}]},
        {"id": 2, "title_en": "Praise the Lord", "category": "Praise",
         "lyrics_en": [{"type": "stanza", "lines": ["d"]}]}
    ]"#;

    fn hymnal() -> Hymnal {
        Hymnal::from_json_str(DATA).unwrap()
    }

    #[test]
    fn library_rows_follow_query() {
        let hymnal = hymnal();
        let mut screen = LibraryScreen::new(&hymnal, Language::English);
        assert_eq!(
            screen.rows,
            vec![LibraryRow::Hymn(1), LibraryRow::Hymn(2), LibraryRow::Hymn(3)]
        );

        screen.set_text("praise".into());
        screen.refresh(&hymnal, Language::English);
        assert_eq!(screen.rows, vec![LibraryRow::Hymn(3), LibraryRow::Hymn(2)]);
        assert_eq!(screen.categories, vec!["Evening".to_string(), "Praise".to_string()]);
    }

    #[test]
    fn collapsed_groups_hide_members() {
        let hymnal = hymnal();
        let mut screen = LibraryScreen::new(&hymnal, Language::English);
        screen.cycle_view();
        screen.cycle_view();
        screen.refresh(&hymnal, Language::English);
        assert_eq!(screen.rows.len(), 2);
        assert_eq!(screen.match_count, 3);

        screen.toggle_group("Praise");
        screen.refresh(&hymnal, Language::English);
        assert_eq!(
            screen.rows[1..],
            [
                LibraryRow::Header {
                    label: "Praise".into(),
                    count: 2,
                    expanded: true,
                },
                LibraryRow::Hymn(2),
                LibraryRow::Hymn(3),
            ]
        );
    }

    #[test]
    fn chorus_toggle_round_trips() {
        let hymnal = hymnal();
        let mut screen = LibraryScreen::new(&hymnal, Language::English);
        assert!(screen.toggle_chorus());
        screen.refresh(&hymnal, Language::English);
        assert_eq!(screen.rows, vec![LibraryRow::Hymn(3)]);
        assert!(!screen.toggle_chorus());
    }

    #[test]
    fn bookmark_rows_list_every_slot() {
        let hymnal = hymnal();
        let mut bookmarks = Bookmarks::default();
        bookmarks.set_service_hymn(ServiceSlot::Sermon, Some(2), 1);
        bookmarks.set_custom(3, "choir".into(), 2);
        bookmarks.set_custom(99, "gone".into(), 3);

        let mut screen = BookmarksScreen::default();
        screen.refresh(&bookmarks, &hymnal);
        assert_eq!(screen.rows.len(), 4);
        assert_eq!(screen.rows[1].hymn_id(), Some(2));
        assert_eq!(screen.rows[0].hymn_id(), None);
        assert!(screen.has_custom());
    }
}
