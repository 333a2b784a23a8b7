use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Longest note accepted on a custom bookmark.
const MAX_NOTE_LEN: usize = 120;

/// Text input for the note attached to a custom bookmark.
#[derive(Default, Clone)]
pub(crate) struct NoteForm {
    pub(crate) hymn_id: u32,
    pub(crate) note: String,
    /// Whether the hymn already had a note when the form opened.
    pub(crate) existing: bool,
}

impl NoteForm {
    /// Open the form for a hymn, prefilled with its current note.
    pub(crate) fn for_hymn(hymn_id: u32, current: Option<&str>) -> Self {
        Self {
            hymn_id,
            note: current.unwrap_or_default().to_string(),
            existing: current.is_some(),
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.note.chars().count() >= MAX_NOTE_LEN {
            return false;
        }
        self.note.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.note.pop();
    }

    /// The note to store, or `None` when the user cleared it.
    pub(crate) fn submitted(&self) -> Option<&str> {
        let trimmed = self.note.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub(crate) fn build_line(&self, field_name: &str) -> Line<'static> {
        let display = if self.note.is_empty() {
            "<empty removes the note>".to_string()
        } else {
            self.note.clone()
        };
        let style = if self.note.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self) -> usize {
        self.note.chars().count()
    }
}

/// Modal list of categories for the category filter.
pub(crate) struct CategoryPicker {
    pub(crate) options: Vec<String>,
    pub(crate) selected: usize,
}

impl CategoryPicker {
    /// Start on the currently active category when there is one.
    pub(crate) fn new(options: Vec<String>, active: Option<&str>) -> Self {
        let selected = active
            .and_then(|label| options.iter().position(|option| option == label))
            .unwrap_or(0);
        Self { options, selected }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        self.selected = (self.selected as isize + offset).clamp(0, len - 1) as usize;
    }

    pub(crate) fn current(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }
}

/// State for an active search bar on the library screen.
#[derive(Default)]
pub(crate) struct SearchState {
    pub(crate) query: String,
    /// Highlighted recent search while the query is still empty.
    pub(crate) recent_selected: Option<usize>,
}

impl SearchState {
    pub(crate) fn with_query(query: &str) -> Self {
        Self {
            query: query.to_string(),
            recent_selected: None,
        }
    }

    pub(crate) fn move_recent(&mut self, offset: isize, recent_len: usize) {
        if recent_len == 0 || !self.query.is_empty() {
            self.recent_selected = None;
            return;
        }
        let next = match self.recent_selected {
            None if offset > 0 => 0,
            None => recent_len - 1,
            Some(current) => (current as isize + offset).clamp(0, recent_len as isize - 1) as usize,
        };
        self.recent_selected = Some(next);
    }
}

/// Yes/no prompt before wiping the recent searches.
pub(crate) struct ConfirmClearRecent {
    pub(crate) count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_note_means_removal() {
        let mut form = NoteForm::for_hymn(4, Some("wedding"));
        assert!(form.existing);
        for _ in 0..7 {
            form.backspace();
        }
        form.push_char(' ');
        assert_eq!(form.submitted(), None);
    }

    #[test]
    fn picker_starts_on_active_category() {
        let picker = CategoryPicker::new(vec!["A".into(), "B".into()], Some("B"));
        assert_eq!(picker.current(), Some("B"));
    }

    #[test]
    fn recent_cursor_only_without_query() {
        let mut search = SearchState::default();
        search.move_recent(1, 3);
        assert_eq!(search.recent_selected, Some(0));
        search.move_recent(5, 3);
        assert_eq!(search.recent_selected, Some(2));

        let mut typed = SearchState::with_query("gr");
        typed.move_recent(1, 3);
        assert_eq!(typed.recent_selected, None);
    }
}
