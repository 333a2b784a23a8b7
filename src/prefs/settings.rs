use crate::models::Language;

/// Language choices. The interface starts in English; hymns start in Yoruba.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub app_language: Language,
    pub default_hymn_language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_language: Language::English,
            default_hymn_language: Language::Yoruba,
        }
    }
}
