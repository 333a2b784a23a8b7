use std::fs;
use std::mem;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::catalog::Hymnal;
use crate::library::{HymnFilter, ViewMode};
use crate::models::{Language, Lyrics, ServiceSlot};
use crate::prefs::Preferences;

use super::forms::{CategoryPicker, ConfirmClearRecent, NoteForm, SearchState};
use super::helpers::{centered_rect, hymn_item, surface_error};
use super::labels::{hymn_label, label, HymnLabel, Label};
use super::screens::{
    BookmarkRow, BookmarksScreen, DetailScreen, HymnListScreen, LibraryRow, LibraryScreen,
    SettingRow, SettingsScreen,
};

/// Tab bar at the top of the screen.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown in lists.
const PAGE: isize = 5;
/// Lines scrolled by PageUp/PageDown in the hymn text.
const TEXT_PAGE: i32 = 10;

/// Top-level screens reachable with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Library,
    Favorites,
    Bookmarks,
    History,
    Settings,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Library,
        Tab::Favorites,
        Tab::Bookmarks,
        Tab::History,
        Tab::Settings,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    fn offset(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[next as usize]
    }

    fn title(self, language: Language) -> &'static str {
        let key = match self {
            Tab::Library => Label::Library,
            Tab::Favorites => Label::Favorites,
            Tab::Bookmarks => Label::Bookmarks,
            Tab::History => Label::History,
            Tab::Settings => Label::Settings,
        };
        label(language, key)
    }
}

/// Fine-grained modes layered over the current screen.
enum Mode {
    Normal,
    Searching(SearchState),
    PickingCategory(CategoryPicker),
    EditingNote(NoteForm),
    ConfirmClearRecent(ConfirmClearRecent),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    hymnal: Hymnal,
    prefs: Preferences,
    /// Language hymns are shown in. Starts at the saved default and can be
    /// switched per session without touching the default.
    hymn_language: Language,
    export_dir: PathBuf,
    tab: Tab,
    detail: Option<DetailScreen>,
    library: LibraryScreen,
    favorites: HymnListScreen,
    history: HymnListScreen,
    bookmarks: BookmarksScreen,
    settings: SettingsScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        hymnal: Hymnal,
        prefs: Preferences,
        hymn_language: Option<Language>,
        export_dir: PathBuf,
    ) -> Self {
        let hymn_language = hymn_language.unwrap_or_else(|| prefs.default_hymn_language());
        let library = LibraryScreen::new(&hymnal, hymn_language);
        let mut app = Self {
            hymnal,
            prefs,
            hymn_language,
            export_dir,
            tab: Tab::Library,
            detail: None,
            library,
            favorites: HymnListScreen::default(),
            history: HymnListScreen::default(),
            bookmarks: BookmarksScreen::default(),
            settings: SettingsScreen::default(),
            mode: Mode::Normal,
            status: None,
        };
        app.refresh_lists();
        app
    }

    /// Route a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
            Mode::PickingCategory(picker) => self.handle_category_picker(code, picker),
            Mode::EditingNote(form) => self.handle_note_form(code, form)?,
            Mode::ConfirmClearRecent(confirm) => self.handle_confirm_clear_recent(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Show a failed action in the footer without leaving the app.
    pub(crate) fn report_error(&mut self, err: &anyhow::Error) {
        warn!(error = %format!("{err:#}"), "action failed");
        self.set_status(surface_error(err), StatusKind::Error);
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if self.detail.is_some() {
            return self.handle_detail_key(code, exit);
        }

        match code {
            KeyCode::Char('q') => {
                *exit = true;
                return Ok(Mode::Normal);
            }
            KeyCode::Tab => {
                self.switch_tab(self.tab.offset(1));
                return Ok(Mode::Normal);
            }
            KeyCode::BackTab => {
                self.switch_tab(self.tab.offset(-1));
                return Ok(Mode::Normal);
            }
            KeyCode::Char(digit @ '1'..='5') => {
                self.switch_tab(Tab::ALL[(digit as usize) - ('1' as usize)]);
                return Ok(Mode::Normal);
            }
            _ => {}
        }

        match self.tab {
            Tab::Library => self.handle_library_key(code),
            Tab::Favorites => {
                match code {
                    KeyCode::Up => self.favorites.move_selection(-1),
                    KeyCode::Down => self.favorites.move_selection(1),
                    KeyCode::PageUp => self.favorites.move_selection(-PAGE),
                    KeyCode::PageDown => self.favorites.move_selection(PAGE),
                    KeyCode::Enter => {
                        if let Some(id) = self.favorites.current() {
                            self.open_hymn(id)?;
                        }
                    }
                    KeyCode::Char('-') => {
                        if let Some(id) = self.favorites.current() {
                            self.prefs.toggle_favorite(id)?;
                            self.refresh_lists();
                            self.set_status("Removed from favorites.", StatusKind::Info);
                        } else {
                            self.set_status("No hymn selected.", StatusKind::Error);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Tab::History => {
                match code {
                    KeyCode::Up => self.history.move_selection(-1),
                    KeyCode::Down => self.history.move_selection(1),
                    KeyCode::PageUp => self.history.move_selection(-PAGE),
                    KeyCode::PageDown => self.history.move_selection(PAGE),
                    KeyCode::Enter => {
                        if let Some(id) = self.history.current() {
                            self.open_hymn(id)?;
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Tab::Bookmarks => {
                match code {
                    KeyCode::Up => self.bookmarks.move_selection(-1),
                    KeyCode::Down => self.bookmarks.move_selection(1),
                    KeyCode::Enter => {
                        if let Some(id) = self.bookmarks.current().and_then(BookmarkRow::hymn_id) {
                            self.open_hymn(id)?;
                        }
                    }
                    KeyCode::Char('-') => match self.bookmarks.current().cloned() {
                        Some(BookmarkRow::Slot {
                            slot,
                            hymn_id: Some(_),
                        }) => {
                            self.prefs.set_service_hymn(slot, None)?;
                            self.refresh_lists();
                            self.set_status(format!("{slot} hymn cleared."), StatusKind::Info);
                        }
                        Some(BookmarkRow::Custom { hymn_id, .. }) => {
                            self.prefs.remove_custom_bookmark(hymn_id)?;
                            self.refresh_lists();
                            self.set_status("Bookmark removed.", StatusKind::Info);
                        }
                        _ => self.set_status("Nothing to remove here.", StatusKind::Error),
                    },
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Tab::Settings => {
                match code {
                    KeyCode::Up => self.settings.move_selection(-1),
                    KeyCode::Down => self.settings.move_selection(1),
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                        self.toggle_setting(self.settings.current())?;
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_library_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Up => self.library.move_selection(-1),
            KeyCode::Down => self.library.move_selection(1),
            KeyCode::PageUp => self.library.move_selection(-PAGE),
            KeyCode::PageDown => self.library.move_selection(PAGE),
            KeyCode::Home => self.library.select_first(),
            KeyCode::End => self.library.select_last(),
            KeyCode::Char('/') | KeyCode::Char('f') => {
                return Ok(Mode::Searching(SearchState::with_query(
                    &self.library.query.text,
                )));
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.library.current_row().cloned() {
                Some(LibraryRow::Hymn(id)) if code == KeyCode::Enter => self.open_hymn(id)?,
                Some(LibraryRow::Header { label, .. }) => {
                    self.library.toggle_group(&label);
                    self.refresh_library();
                }
                _ => {}
            },
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.library.categories.is_empty() {
                    self.set_status("No categories to choose from.", StatusKind::Error);
                } else {
                    let active = match &self.library.query.filter {
                        HymnFilter::Category(label) => Some(label.as_str()),
                        _ => None,
                    };
                    let picker = CategoryPicker::new(self.library.categories.clone(), active);
                    return Ok(Mode::PickingCategory(picker));
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                let active = self.library.toggle_chorus();
                self.refresh_library();
                let message = if active {
                    "Showing hymns with a chorus."
                } else {
                    "Showing all hymns."
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.library.set_filter(HymnFilter::None);
                self.refresh_library();
                self.set_status("Filter cleared.", StatusKind::Info);
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                let view = self.library.cycle_view();
                self.refresh_library();
                let name = self.view_label(view);
                self.set_status(format!("View: {name}"), StatusKind::Info);
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.set_hymn_language(self.hymn_language.toggle());
                self.set_status(
                    format!("Hymns shown in {}.", self.hymn_language),
                    StatusKind::Info,
                );
            }
            KeyCode::Char('R') => {
                let count = self.prefs.recent_searches().len();
                if count == 0 {
                    self.set_status("No recent searches.", StatusKind::Info);
                } else {
                    return Ok(Mode::ConfirmClearRecent(ConfirmClearRecent { count }));
                }
            }
            KeyCode::Esc => {
                if !self.library.query.text.is_empty() {
                    self.library.set_text(String::new());
                    self.refresh_library();
                    self.clear_status();
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.library.set_text(String::new());
                self.refresh_library();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                if state.query.trim().is_empty() {
                    let recent = state
                        .recent_selected
                        .and_then(|index| self.prefs.recent_searches().terms().get(index))
                        .cloned();
                    if let Some(term) = recent {
                        self.prefs.record_search(&term)?;
                        self.library.set_text(term);
                        self.refresh_library();
                    }
                } else {
                    self.prefs.record_search(&state.query)?;
                    debug!(query = state.query.trim(), "search committed");
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Up | KeyCode::Down => {
                let offset = if code == KeyCode::Up { -1 } else { 1 };
                if state.query.is_empty() {
                    state.move_recent(offset, self.prefs.recent_searches().len());
                } else {
                    self.library.move_selection(offset);
                }
                return Ok(Mode::Searching(state));
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
            }
            _ => return Ok(Mode::Searching(state)),
        }

        state.recent_selected = None;
        self.library.set_text(state.query.clone());
        self.refresh_library();
        Ok(Mode::Searching(state))
    }

    fn handle_category_picker(&mut self, code: KeyCode, mut picker: CategoryPicker) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Up => {
                picker.move_selection(-1);
                Mode::PickingCategory(picker)
            }
            KeyCode::Down => {
                picker.move_selection(1);
                Mode::PickingCategory(picker)
            }
            KeyCode::PageUp => {
                picker.move_selection(-PAGE);
                Mode::PickingCategory(picker)
            }
            KeyCode::PageDown => {
                picker.move_selection(PAGE);
                Mode::PickingCategory(picker)
            }
            KeyCode::Enter => {
                if let Some(category) = picker.current() {
                    let category = category.to_string();
                    self.set_status(format!("Category: {category}"), StatusKind::Info);
                    self.library.set_filter(HymnFilter::Category(category));
                    self.refresh_library();
                }
                Mode::Normal
            }
            _ => Mode::PickingCategory(picker),
        }
    }

    fn handle_note_form(&mut self, code: KeyCode, mut form: NoteForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Note unchanged.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                form.backspace();
                Ok(Mode::EditingNote(form))
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Ok(Mode::EditingNote(form))
            }
            KeyCode::Enter => {
                match form.submitted() {
                    Some(note) => {
                        self.prefs.set_custom_bookmark(form.hymn_id, note)?;
                        self.set_status("Bookmark saved.", StatusKind::Info);
                    }
                    None if form.existing => {
                        self.prefs.remove_custom_bookmark(form.hymn_id)?;
                        self.set_status("Bookmark removed.", StatusKind::Info);
                    }
                    None => self.set_status("Empty note not saved.", StatusKind::Info),
                }
                self.refresh_lists();
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::EditingNote(form)),
        }
    }

    fn handle_confirm_clear_recent(
        &mut self,
        code: KeyCode,
        confirm: ConfirmClearRecent,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.prefs.clear_recent_searches()?;
                self.set_status("Recent searches cleared.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.clear_status();
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmClearRecent(confirm)),
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let Some(hymn_id) = self.detail.as_ref().map(|detail| detail.hymn_id) else {
            return Ok(Mode::Normal);
        };

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Backspace => {
                self.detail = None;
                self.refresh_lists();
                self.clear_status();
            }
            KeyCode::Up => self.scroll_detail(-1),
            KeyCode::Down => self.scroll_detail(1),
            KeyCode::PageUp => self.scroll_detail(-TEXT_PAGE),
            KeyCode::PageDown => self.scroll_detail(TEXT_PAGE),
            KeyCode::Home => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll = 0;
                }
            }
            KeyCode::Char('*') => {
                let now_favorite = self.prefs.toggle_favorite(hymn_id)?;
                let message = if now_favorite {
                    "Added to favorites."
                } else {
                    "Removed from favorites."
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                let current = self.prefs.bookmarks().custom_for(hymn_id);
                return Ok(Mode::EditingNote(NoteForm::for_hymn(hymn_id, current)));
            }
            KeyCode::Char(digit @ '1'..='3') => {
                let slot = ServiceSlot::ALL[(digit as usize) - ('1' as usize)];
                if self.prefs.bookmarks().service_hymn(slot) == Some(hymn_id) {
                    self.prefs.set_service_hymn(slot, None)?;
                    self.set_status(format!("{slot} hymn cleared."), StatusKind::Info);
                } else {
                    self.prefs.set_service_hymn(slot, Some(hymn_id))?;
                    self.set_status(format!("Set as {slot} hymn."), StatusKind::Info);
                }
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.set_hymn_language(self.hymn_language.toggle());
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll = 0;
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                let path = self.export_hymn(hymn_id)?;
                self.set_status(format!("Saved hymn text to {}", path.display()), StatusKind::Info);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT.min(area.height)),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        match (&self.detail, self.tab) {
            (Some(detail), _) => self.draw_detail(frame, chunks[1], detail),
            (None, Tab::Library) => self.draw_library(frame, chunks[1]),
            (None, Tab::Favorites) => self.draw_hymn_list(
                frame,
                chunks[1],
                &self.favorites,
                Label::Favorites,
                (Label::NoFavorites, Label::NoFavoritesHint),
            ),
            (None, Tab::History) => self.draw_hymn_list(
                frame,
                chunks[1],
                &self.history,
                Label::History,
                (Label::NoHistory, Label::NoHistoryHint),
            ),
            (None, Tab::Bookmarks) => self.draw_bookmarks(frame, chunks[1]),
            (None, Tab::Settings) => self.draw_settings(frame, chunks[1]),
        }

        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Searching(state) => self.draw_search_bar(frame, chunks[1], state),
            Mode::PickingCategory(picker) => self.draw_category_picker(frame, area, picker),
            Mode::EditingNote(form) => self.draw_note_form(frame, area, form),
            Mode::ConfirmClearRecent(confirm) => self.draw_confirm_clear(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let language = self.prefs.app_language();
        let mut spans = Vec::new();
        for tab in Tab::ALL {
            let style = if tab == self.tab && self.detail.is_none() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", tab.title(language)), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("  [{}]", self.hymn_language),
            Style::default().fg(Color::Cyan),
        ));

        let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect) {
        let language = self.prefs.app_language();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let filter_text = match &self.library.query.filter {
            HymnFilter::None => "-".to_string(),
            HymnFilter::Chorus => label(language, Label::HasChorus).to_string(),
            HymnFilter::Category(category) => {
                format!("{}: {category}", label(language, Label::Category))
            }
        };
        let mut summary = vec![
            Span::styled("Filter ", Style::default().fg(Color::DarkGray)),
            Span::raw(filter_text),
            Span::styled("   View ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.view_label(self.library.query.view).to_string()),
            Span::styled("   Hymns ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.library.match_count.to_string()),
        ];
        if self.library.query.is_searching() {
            summary.push(Span::styled("   Search ", Style::default().fg(Color::DarkGray)));
            summary.push(Span::styled(
                format!("\"{}\"", self.library.query.text.trim()),
                Style::default().fg(Color::Yellow),
            ));
        }
        let header = Paragraph::new(Line::from(summary)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label(language, Label::Library)),
        );
        frame.render_widget(header, chunks[0]);

        if self.hymnal.is_empty() {
            self.draw_empty(frame, chunks[1], label(language, Label::NoHymnsLoaded), "");
            return;
        }

        if self.library.rows.is_empty() {
            if self.library.query.is_searching() {
                let hint = format!(
                    "\"{}\" - {}",
                    self.library.query.text.trim(),
                    label(language, Label::TrySomethingElse)
                );
                self.draw_empty(frame, chunks[1], label(language, Label::NoResults), &hint);
            } else {
                self.draw_empty(
                    frame,
                    chunks[1],
                    label(language, Label::NoHymnsToDisplay),
                    label(language, Label::NoFilterMatches),
                );
            }
            return;
        }

        let items: Vec<ListItem> = self
            .library
            .rows
            .iter()
            .map(|row| match row {
                LibraryRow::Header {
                    label,
                    count,
                    expanded,
                } => {
                    let marker = if *expanded { "▾" } else { "▸" };
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{marker} {label}"),
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  ({count})"), Style::default().fg(Color::DarkGray)),
                    ]))
                }
                LibraryRow::Hymn(id) => self.hymn_list_item(*id),
            })
            .collect();

        self.render_list(frame, chunks[1], items, self.library.selected, None);
    }

    fn draw_hymn_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        screen: &HymnListScreen,
        title: Label,
        empty: (Label, Label),
    ) {
        let language = self.prefs.app_language();
        if screen.ids.is_empty() {
            self.draw_empty(frame, area, label(language, empty.0), label(language, empty.1));
            return;
        }
        let items = screen.ids.iter().map(|id| self.hymn_list_item(*id)).collect();
        self.render_list(frame, area, items, screen.selected, Some(label(language, title)));
    }

    fn draw_bookmarks(&self, frame: &mut Frame, area: Rect) {
        let language = self.prefs.app_language();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(area);

        let items: Vec<ListItem> = self
            .bookmarks
            .rows
            .iter()
            .map(|row| {
                let (prefix, detail) = match row {
                    BookmarkRow::Slot { slot, hymn_id } => {
                        let text = hymn_id
                            .and_then(|id| self.hymnal.get(id))
                            .map(|hymn| format!("{}  {}", hymn.id, hymn.title(self.hymn_language)))
                            .unwrap_or_else(|| label(language, Label::NotSet).to_string());
                        (
                            format!("{} · {slot}", label(language, Label::ServiceHymns)),
                            text,
                        )
                    }
                    BookmarkRow::Custom { hymn_id, note } => {
                        let title = self
                            .hymnal
                            .get(*hymn_id)
                            .map(|hymn| hymn.title(self.hymn_language).to_string())
                            .unwrap_or_default();
                        (
                            label(language, Label::MyBookmarks).to_string(),
                            format!("{hymn_id}  {title}  - {note}"),
                        )
                    }
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{prefix}: "), Style::default().fg(Color::Cyan)),
                    Span::raw(detail),
                ]))
            })
            .collect();

        self.render_list(
            frame,
            chunks[0],
            items,
            self.bookmarks.selected,
            Some(label(language, Label::Bookmarks)),
        );

        if !self.bookmarks.has_custom() {
            let hint = Paragraph::new(label(language, Label::NoBookmarks))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, chunks[1]);
        }
    }

    fn draw_settings(&self, frame: &mut Frame, area: Rect) {
        let settings = self.prefs.settings();
        let language = settings.app_language;
        let items = SettingRow::ALL
            .iter()
            .map(|row| {
                let (name, value) = match row {
                    SettingRow::AppLanguage => {
                        (label(language, Label::AppLanguage), settings.app_language)
                    }
                    SettingRow::DefaultHymnLanguage => (
                        label(language, Label::DefaultHymnLanguage),
                        settings.default_hymn_language,
                    ),
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{name}: ")),
                    Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
                ]))
            })
            .collect();
        self.render_list(
            frame,
            area,
            items,
            self.settings.selected,
            Some(label(language, Label::Settings)),
        );
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailScreen) {
        let language = self.hymn_language;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(label(self.prefs.app_language(), Label::Hymn));

        let Some(hymn) = self.hymnal.get(detail.hymn_id) else {
            let message = Paragraph::new(format!("Hymn {} is not in the hymn book.", detail.hymn_id))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{}. ", hymn.id),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                hymn.title(language).to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])];

        let mut meta = vec![Span::styled(
            hymn.category(language).to_string(),
            Style::default().fg(Color::Cyan),
        )];
        if !hymn.tune_code.trim().is_empty() {
            meta.push(Span::styled(
                format!("   Tune {}", hymn.tune_code),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.prefs.is_favorite(hymn.id) {
            meta.push(Span::styled("   ♥", Style::default().fg(Color::Red)));
        }
        if let Some(slot) = self.prefs.bookmarks().service_slot_for(hymn.id) {
            meta.push(Span::styled(format!("   [{slot}]"), Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(meta));
        if let Some(note) = self.prefs.bookmarks().custom_for(hymn.id) {
            lines.push(Line::from(Span::styled(
                format!("Note: {note}"),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(scripture) = hymn.scripture(language) {
            lines.push(Line::from(Span::styled(
                scripture.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::from(""));

        match hymn.lyrics_for(language) {
            Lyrics::Unavailable => {
                lines.push(Line::from(Span::styled(
                    hymn_label(language, HymnLabel::LyricsUnavailable),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Lyrics::Available(_) => {
                for verse in hymn.verses(language) {
                    match verse.number {
                        Some(number) => {
                            for (index, line) in verse.stanza.lines.iter().enumerate() {
                                let gutter = if index == 0 {
                                    format!("{number:>2}. ")
                                } else {
                                    "    ".to_string()
                                };
                                lines.push(Line::from(vec![
                                    Span::styled(gutter, Style::default().fg(Color::DarkGray)),
                                    Span::raw(line.clone()),
                                ]));
                            }
                        }
                        None => {
                            lines.push(Line::from(Span::styled(
                                format!("    {}:", hymn_label(language, HymnLabel::Chorus)),
                                Style::default()
                                    .fg(Color::Green)
                                    .add_modifier(Modifier::BOLD),
                            )));
                            for line in &verse.stanza.lines {
                                lines.push(Line::from(Span::styled(
                                    format!("    {line}"),
                                    Style::default().add_modifier(Modifier::ITALIC),
                                )));
                            }
                        }
                    }
                    lines.push(Line::from(""));
                }
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((detail.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let language = self.prefs.app_language();
        let recent = self.prefs.recent_searches().terms();
        let show_recent = state.query.is_empty() && !recent.is_empty();
        let wanted = if show_recent { 3 + recent.len() as u16 + 2 } else { 3 };
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: wanted.min(area.height),
        };
        frame.render_widget(Clear, popup_area);

        let search_area = Rect {
            height: 3u16.min(popup_area.height),
            ..popup_area
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(label(language, Label::SearchHymns));
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, search_area);

        let inner = block.inner(search_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));

        if show_recent && popup_area.height > search_area.height {
            let recent_area = Rect {
                y: search_area.y + search_area.height,
                height: popup_area.height - search_area.height,
                ..popup_area
            };
            let items: Vec<ListItem> = recent
                .iter()
                .map(|term| ListItem::new(Line::from(term.clone())))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(label(language, Label::RecentSearches)),
                )
                .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            let mut list_state = ListState::default();
            list_state.select(state.recent_selected);
            frame.render_stateful_widget(list, recent_area, &mut list_state);
        }
    }

    fn draw_category_picker(&self, frame: &mut Frame, area: Rect, picker: &CategoryPicker) {
        let popup_area = centered_rect(50, 60, area);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = picker
            .options
            .iter()
            .map(|option| ListItem::new(Line::from(option.clone())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label(self.prefs.app_language(), Label::SelectCategory)),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(picker.selected));
        frame.render_stateful_widget(list, popup_area, &mut state);
    }

    fn draw_note_form(&self, frame: &mut Frame, area: Rect, form: &NoteForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(label(self.prefs.app_language(), Label::AddNote))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let title = self
            .hymnal
            .get(form.hymn_id)
            .map(|hymn| format!("{}. {}", hymn.id, hymn.title(self.hymn_language)))
            .unwrap_or_default();
        let lines = vec![
            form.build_line("Note"),
            Line::from(""),
            Line::from(Span::styled(title, Style::default().fg(Color::Cyan))),
            Line::from(Span::styled(
                "Enter to save • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Note: ".len() as u16 + form.value_len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_clear(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmClearRecent) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let text = vec![
            Line::from(format!("Clear {} recent searches?", confirm.count)),
            Line::from(""),
            Line::from(Span::styled(
                "[y] Clear   [n] Keep",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label(self.prefs.app_language(), Label::RecentSearches)),
            );
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_empty(&self, frame: &mut Frame, area: Rect, title: &str, hint: &str) {
        let lines = vec![
            Line::from(Span::styled(
                title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let message = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, area);
    }

    fn render_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        items: Vec<ListItem>,
        selected: usize,
        title: Option<&str>,
    ) {
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(title) = title {
            block = block.title(title.to_string());
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn hymn_list_item(&self, id: u32) -> ListItem<'static> {
        match self.hymnal.get(id) {
            Some(hymn) => hymn_item(hymn, self.hymn_language, self.prefs.is_favorite(id)),
            None => ListItem::new(Line::from(format!("{id:>4}  ?"))),
        }
    }

    fn view_label(&self, view: ViewMode) -> &'static str {
        let language = self.prefs.app_language();
        match view {
            ViewMode::ListNumber => label(language, Label::ListByNumber),
            ViewMode::ListTitle => label(language, Label::ListByTitle),
            ViewMode::Category => label(language, Label::Category),
        }
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.mode, &self.detail, self.tab) {
            (Mode::Searching(_), _, _) => &[
                ("[type]", "Search"),
                ("[↑↓]", "Recent/Move"),
                ("[Enter]", "Commit"),
                ("[Esc]", "Clear"),
            ],
            (Mode::PickingCategory(_), _, _) => {
                &[("[↑↓]", "Navigate"), ("[Enter]", "Apply"), ("[Esc]", "Cancel")]
            }
            (Mode::EditingNote(_), _, _) => &[("[Enter]", "Save"), ("[Esc]", "Cancel")],
            (Mode::ConfirmClearRecent(_), _, _) => &[("[y]", "Clear"), ("[n]", "Keep")],
            (Mode::Normal, Some(_), _) => &[
                ("[↑↓]", "Scroll"),
                ("[*]", "Favorite"),
                ("[b]", "Note"),
                ("[1-3]", "Service Slot"),
                ("[l]", "Language"),
                ("[x]", "Export"),
                ("[Esc]", "Back"),
                ("[q]", "Quit"),
            ],
            (Mode::Normal, None, Tab::Library) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Open"),
                ("[/]", "Search"),
                ("[c]", "Category"),
                ("[h]", "Chorus"),
                ("[x]", "Clear Filter"),
                ("[v]", "View"),
                ("[l]", "Language"),
                ("[R]", "Clear Recent"),
                ("[Tab]", "Next"),
                ("[q]", "Quit"),
            ],
            (Mode::Normal, None, Tab::Favorites) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Open"),
                ("[-]", "Remove"),
                ("[Tab]", "Next"),
                ("[q]", "Quit"),
            ],
            (Mode::Normal, None, Tab::Bookmarks) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Open"),
                ("[-]", "Clear"),
                ("[Tab]", "Next"),
                ("[q]", "Quit"),
            ],
            (Mode::Normal, None, Tab::History) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Open"),
                ("[Tab]", "Next"),
                ("[q]", "Quit"),
            ],
            (Mode::Normal, None, Tab::Settings) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Change"),
                ("[Tab]", "Next"),
                ("[q]", "Quit"),
            ],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, action) in hints {
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.refresh_lists();
        self.clear_status();
    }

    fn open_hymn(&mut self, hymn_id: u32) -> Result<()> {
        self.prefs.record_history(hymn_id)?;
        self.detail = Some(DetailScreen::new(hymn_id));
        self.clear_status();
        debug!(hymn_id, "opened hymn");
        Ok(())
    }

    fn scroll_detail(&mut self, delta: i32) {
        if let Some(detail) = self.detail.as_mut() {
            detail.scroll_by(delta);
        }
    }

    fn set_hymn_language(&mut self, language: Language) {
        self.hymn_language = language;
        self.refresh_library();
    }

    fn toggle_setting(&mut self, row: SettingRow) -> Result<()> {
        match row {
            SettingRow::AppLanguage => {
                let next = self.prefs.app_language().toggle();
                self.prefs.set_app_language(next)?;
                info!(language = next.code(), "app language changed");
            }
            SettingRow::DefaultHymnLanguage => {
                let next = self.prefs.default_hymn_language().toggle();
                self.prefs.set_default_hymn_language(next)?;
                self.set_hymn_language(next);
                info!(language = next.code(), "default hymn language changed");
            }
        }
        Ok(())
    }

    /// Write the plain text of a hymn next to the data files so it can be
    /// pasted or printed elsewhere.
    fn export_hymn(&self, hymn_id: u32) -> Result<PathBuf> {
        let hymn = self
            .hymnal
            .get(hymn_id)
            .with_context(|| format!("hymn {hymn_id} not found"))?;
        fs::create_dir_all(&self.export_dir).context("failed to create export directory")?;
        let path = self
            .export_dir
            .join(format!("hymn-{}-{}.txt", hymn.id, self.hymn_language.code()));
        fs::write(&path, hymn.share_text(self.hymn_language))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "exported hymn text");
        Ok(path)
    }

    fn refresh_library(&mut self) {
        self.library.refresh(&self.hymnal, self.hymn_language);
    }

    /// Rebuild the favorites, history and bookmarks screens from the
    /// preferences.
    fn refresh_lists(&mut self) {
        let favorites = self
            .hymnal
            .resolve(self.prefs.favorites().ids())
            .iter()
            .map(|hymn| hymn.id)
            .collect();
        self.favorites.set_ids(favorites);

        let history = self
            .hymnal
            .resolve(self.prefs.history().ids())
            .iter()
            .map(|hymn| hymn.id)
            .collect();
        self.history.set_ids(history);

        self.bookmarks.refresh(self.prefs.bookmarks(), &self.hymnal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    const DATA: &str = r#"[
        {"id": 1, "title_en": "Amazing Grace", "title_yo": "Oore Ọ̀fẹ́", "category": "Grace",
         "lyrics_en": [{"type": "stanza", "lines": ["Amazing grace"]}]},
        {"id": 23, "title_en": "How Great Thou Art", "title_yo": "Iwọ Tobi", "category": "Praise",
         "lyrics_en": [{"type": "stanza", "lines": ["O Lord my God"]},
                       {"type": "chorus", "lines": ["Then sings my soul"]}]}
    ]"#;

    fn app() -> App {
        let hymnal = Hymnal::from_json_str(DATA).unwrap();
        let prefs = Preferences::load(open_in_memory().unwrap());
        App::new(
            hymnal,
            prefs,
            Some(Language::English),
            std::env::temp_dir().join("hymn-book-test-exports"),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    #[test]
    fn typing_searches_and_enter_records_recent() {
        let mut app = app();
        app.handle_key(KeyCode::Char('/')).unwrap();
        type_text(&mut app, "23");
        assert_eq!(app.library.rows, vec![LibraryRow::Hymn(23)]);
        assert!(app.prefs.recent_searches().is_empty());

        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.prefs.recent_searches().terms(), ["23"]);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.library.rows, vec![LibraryRow::Hymn(23)]);
    }

    #[test]
    fn recent_search_can_be_rerun() {
        let mut app = app();
        app.prefs.record_search("grace").unwrap();
        app.handle_key(KeyCode::Char('/')).unwrap();
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.library.query.text, "grace");
        assert_eq!(app.library.rows, vec![LibraryRow::Hymn(1)]);
    }

    #[test]
    fn opening_records_history_and_favorite_toggles() {
        let mut app = app();
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.detail.as_ref().map(|d| d.hymn_id), Some(23));
        assert_eq!(app.prefs.history().ids(), [23]);

        app.handle_key(KeyCode::Char('*')).unwrap();
        assert!(app.prefs.is_favorite(23));
        app.handle_key(KeyCode::Char('2')).unwrap();
        assert_eq!(
            app.prefs.bookmarks().service_hymn(ServiceSlot::Sermon),
            Some(23)
        );
        app.handle_key(KeyCode::Char('2')).unwrap();
        assert_eq!(app.prefs.bookmarks().service_hymn(ServiceSlot::Sermon), None);

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(app.detail.is_none());
        assert_eq!(app.favorites.ids, vec![23]);
    }

    #[test]
    fn note_form_saves_custom_bookmark() {
        let mut app = app();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Char('b')).unwrap();
        type_text(&mut app, "wedding");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.prefs.bookmarks().custom_for(1), Some("wedding"));
    }

    #[test]
    fn chorus_filter_from_keyboard() {
        let mut app = app();
        app.handle_key(KeyCode::Char('h')).unwrap();
        assert_eq!(app.library.rows, vec![LibraryRow::Hymn(23)]);
        app.handle_key(KeyCode::Char('x')).unwrap();
        assert_eq!(app.library.rows.len(), 2);
    }

    #[test]
    fn default_language_setting_switches_hymn_language() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        assert_eq!(app.tab, Tab::Settings);
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.prefs.default_hymn_language(), Language::English);
        assert_eq!(app.hymn_language, Language::English);
    }
}
