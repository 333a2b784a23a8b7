use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Hymn, Language};

/// How the library presents hymns when no search is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Ascending hymn number.
    #[default]
    ListNumber,
    /// Alphabetical by title in the display language.
    ListTitle,
    /// Grouped under category headers, numbered order inside each group.
    Category,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::ListNumber => ViewMode::ListTitle,
            ViewMode::ListTitle => ViewMode::Category,
            ViewMode::Category => ViewMode::ListNumber,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::ListNumber => "list_number",
            ViewMode::ListTitle => "list_title",
            ViewMode::Category => "category",
        };
        write!(f, "{name}")
    }
}

/// Base letters only: decomposed, marks removed, lowercased.
fn primary_key(text: &str) -> String {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Letters and their marks, ignoring case.
fn secondary_key(text: &str) -> String {
    text.to_lowercase().nfd().collect()
}

/// Compare two strings the way a human-facing collation does: letters with
/// diacritics sort beside their base letter ("ẹ" next to "e", not after
/// "z"), then accents break ties, then case.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Order hymns for presentation. Only meaningful when no search is active;
/// relevance order must not be re-sorted.
pub fn sort<'a>(mut hymns: Vec<&'a Hymn>, mode: ViewMode, language: Language) -> Vec<&'a Hymn> {
    match mode {
        ViewMode::ListTitle => {
            hymns.sort_by(|a, b| locale_cmp(a.title(language), b.title(language)));
        }
        ViewMode::ListNumber | ViewMode::Category => hymns.sort_by_key(|hymn| hymn.id),
    }
    hymns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn hymn(id: u32, title_yo: &str) -> Hymn {
        Hymn {
            id,
            title_en: String::new(),
            title_yo: title_yo.to_string(),
            first_line_en: String::new(),
            first_line_yo: String::new(),
            lyrics_en: Vec::new(),
            lyrics_yo: Vec::new(),
            category: Category::default(),
            tune_code: String::new(),
            theme_scripture: None,
        }
    }

    #[test]
    fn accented_letters_sort_with_base_letter() {
        assert_eq!(locale_cmp("Ẹ ṣeun", "F"), Ordering::Less);
        assert_eq!(locale_cmp("Ọlọrun", "Pe"), Ordering::Less);
        assert_eq!(locale_cmp("Ọba", "Oba"), Ordering::Greater);
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn title_sort_uses_display_language() {
        let hymns = vec![hymn(1, "Ṣọ́ọ̀ṣì"), hymn(2, "Ẹ yin Olúwa"), hymn(3, "Tani")];
        let sorted: Vec<_> = sort(hymns.iter().collect(), ViewMode::ListTitle, Language::Yoruba)
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(sorted, vec![2, 1, 3]);
    }

    #[test]
    fn number_and_category_modes_sort_by_id() {
        let hymns = vec![hymn(30, "a"), hymn(4, "b"), hymn(12, "c")];
        for mode in [ViewMode::ListNumber, ViewMode::Category] {
            let ids: Vec<_> = sort(hymns.iter().collect(), mode, Language::Yoruba)
                .iter()
                .map(|h| h.id)
                .collect();
            assert_eq!(ids, vec![4, 12, 30]);
        }
    }
}
