//! Domain models for the hymn catalog and the per-device preferences. The
//! hymn types mirror the JSON file shipped with the application, so field
//! names follow the file format rather than Rust naming where the two differ.
//! Everything here is a light-weight data holder; search lives in
//! [`crate::library`] and persistence in [`crate::db`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages a hymn (and the interface) can be displayed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "yo")]
    Yoruba,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Yoruba];

    /// Short code used in the data file and the store.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Yoruba => "yo",
        }
    }

    /// The other language. Only two exist, so toggling is enough for the UI.
    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Yoruba,
            Language::Yoruba => Language::English,
        }
    }
}

impl fmt::Display for Language {
    /// Each language is shown under its own name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Yoruba => write!(f, "Yorùbá"),
        }
    }
}

/// A pair of strings, one per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub yo: String,
}

impl Localized {
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.en,
            Language::Yoruba => &self.yo,
        }
    }
}

/// Hymn category. Older data files carry a single label for both languages,
/// newer ones a per-language pair; both shapes deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Plain(String),
    Localized(Localized),
}

impl Category {
    pub fn label(&self, language: Language) -> &str {
        match self {
            Category::Plain(label) => label,
            Category::Localized(pair) => pair.get(language),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Plain(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanzaKind {
    Stanza,
    Chorus,
}

/// One block of lyric lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stanza {
    #[serde(rename = "type")]
    pub kind: StanzaKind,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Stanza {
    pub fn is_chorus(&self) -> bool {
        self.kind == StanzaKind::Chorus
    }
}

/// Lyrics of a hymn in one language. A hymn without a translation reports
/// `Unavailable` instead of silently falling back to the other language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lyrics<'a> {
    Available(&'a [Stanza]),
    Unavailable,
}

impl<'a> Lyrics<'a> {
    pub fn stanzas(self) -> &'a [Stanza] {
        match self {
            Lyrics::Available(stanzas) => stanzas,
            Lyrics::Unavailable => &[],
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Lyrics::Available(_))
    }
}

/// A stanza paired with the verse number printed next to it. Choruses are
/// not numbered and do not advance the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verse<'a> {
    pub number: Option<usize>,
    pub stanza: &'a Stanza,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single hymn as stored in the catalog file. Hymns are loaded once and
/// never mutated afterwards.
pub struct Hymn {
    /// Stable identifier, also the printed hymn number.
    pub id: u32,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub title_yo: String,
    #[serde(default)]
    pub first_line_en: String,
    #[serde(default)]
    pub first_line_yo: String,
    #[serde(default)]
    pub lyrics_en: Vec<Stanza>,
    #[serde(default)]
    pub lyrics_yo: Vec<Stanza>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tune_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_scripture: Option<Localized>,
}

impl Hymn {
    pub fn title(&self, language: Language) -> &str {
        match language {
            Language::English => &self.title_en,
            Language::Yoruba => &self.title_yo,
        }
    }

    pub fn first_line(&self, language: Language) -> &str {
        match language {
            Language::English => &self.first_line_en,
            Language::Yoruba => &self.first_line_yo,
        }
    }

    /// Raw stanza list for a language, possibly empty.
    pub fn stanzas(&self, language: Language) -> &[Stanza] {
        match language {
            Language::English => &self.lyrics_en,
            Language::Yoruba => &self.lyrics_yo,
        }
    }

    pub fn lyrics_for(&self, language: Language) -> Lyrics<'_> {
        let stanzas = self.stanzas(language);
        if stanzas.is_empty() {
            Lyrics::Unavailable
        } else {
            Lyrics::Available(stanzas)
        }
    }

    pub fn category(&self, language: Language) -> &str {
        self.category.label(language)
    }

    pub fn scripture(&self, language: Language) -> Option<&str> {
        self.theme_scripture
            .as_ref()
            .map(|pair| pair.get(language))
            .filter(|text| !text.trim().is_empty())
    }

    pub fn has_chorus(&self, language: Language) -> bool {
        self.stanzas(language).iter().any(Stanza::is_chorus)
    }

    /// Number the stanzas the way the printed hymn book does.
    pub fn verses(&self, language: Language) -> Vec<Verse<'_>> {
        let mut counter = 0;
        self.stanzas(language)
            .iter()
            .map(|stanza| {
                let number = if stanza.is_chorus() {
                    None
                } else {
                    counter += 1;
                    Some(counter)
                };
                Verse { number, stanza }
            })
            .collect()
    }

    /// Plain-text rendering used when copying a hymn out of the application:
    /// the title, then every stanza separated by a blank line.
    pub fn share_text(&self, language: Language) -> String {
        let body = self
            .stanzas(language)
            .iter()
            .map(|stanza| stanza.lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{}\n\n{}", self.title(language), body)
    }
}

/// Positions in a church service a hymn can be reserved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceSlot {
    Opening,
    Sermon,
    Closing,
}

impl ServiceSlot {
    pub const ALL: [ServiceSlot; 3] = [ServiceSlot::Opening, ServiceSlot::Sermon, ServiceSlot::Closing];
}

impl fmt::Display for ServiceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceSlot::Opening => "Opening",
            ServiceSlot::Sermon => "Sermon",
            ServiceSlot::Closing => "Closing",
        };
        write!(f, "{name}")
    }
}

/// A saved pointer to a hymn. Service bookmarks fill one of the service
/// slots; custom bookmarks carry a free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Bookmark {
    Service {
        #[serde(rename = "hymnId")]
        hymn_id: u32,
        slot: ServiceSlot,
        #[serde(rename = "createdAt")]
        created_at: i64,
    },
    Custom {
        #[serde(rename = "hymnId")]
        hymn_id: u32,
        description: String,
        #[serde(rename = "createdAt")]
        created_at: i64,
    },
}

impl Bookmark {
    pub fn hymn_id(&self) -> u32 {
        match self {
            Bookmark::Service { hymn_id, .. } | Bookmark::Custom { hymn_id, .. } => *hymn_id,
        }
    }

    pub fn created_at(&self) -> i64 {
        match self {
            Bookmark::Service { created_at, .. } | Bookmark::Custom { created_at, .. } => {
                *created_at
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stanza(kind: StanzaKind, lines: &[&str]) -> Stanza {
        Stanza {
            kind,
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }

    #[test]
    fn verse_numbers_skip_choruses() {
        let hymn = Hymn {
            id: 7,
            lyrics_en: vec![
                stanza(StanzaKind::Stanza, &["one"]),
                stanza(StanzaKind::Chorus, &["refrain"]),
                stanza(StanzaKind::Stanza, &["two"]),
                stanza(StanzaKind::Chorus, &["refrain"]),
                stanza(StanzaKind::Stanza, &["three"]),
            ],
            ..sample()
        };

        let numbers: Vec<_> = hymn
            .verses(Language::English)
            .iter()
            .map(|verse| verse.number)
            .collect();
        assert_eq!(numbers, vec![Some(1), None, Some(2), None, Some(3)]);
    }

    #[test]
    fn missing_translation_is_reported() {
        let hymn = Hymn {
            lyrics_en: vec![stanza(StanzaKind::Stanza, &["line"])],
            ..sample()
        };
        assert!(hymn.lyrics_for(Language::English).is_available());
        assert_eq!(hymn.lyrics_for(Language::Yoruba), Lyrics::Unavailable);
    }

    #[test]
    fn category_accepts_both_shapes() {
        let plain: Category = serde_json::from_str("\"Praise\"").unwrap();
        assert_eq!(plain.label(Language::Yoruba), "Praise");

        let pair: Category = serde_json::from_str(r#"{"en":"Praise","yo":"Ìyìn"}"#).unwrap();
        assert_eq!(pair.label(Language::English), "Praise");
        assert_eq!(pair.label(Language::Yoruba), "Ìyìn");
    }

    #[test]
    fn bookmark_uses_tagged_json_shape() {
        let bookmark = Bookmark::Service {
            hymn_id: 12,
            slot: ServiceSlot::Sermon,
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(json["type"], "service");
        assert_eq!(json["hymnId"], 12);
        assert_eq!(json["slot"], "sermon");

        let back: Bookmark = serde_json::from_value(json).unwrap();
        assert_eq!(back, bookmark);
    }

    #[test]
    fn share_text_joins_stanzas() {
        let hymn = Hymn {
            title_en: "Title".into(),
            lyrics_en: vec![
                stanza(StanzaKind::Stanza, &["a", "b"]),
                stanza(StanzaKind::Chorus, &["c"]),
            ],
            ..sample()
        };
        assert_eq!(hymn.share_text(Language::English), "Title\n\na\nb\n\nc");
    }

    fn sample() -> Hymn {
        Hymn {
            id: 1,
            title_en: String::new(),
            title_yo: String::new(),
            first_line_en: String::new(),
            first_line_yo: String::new(),
            lyrics_en: Vec::new(),
            lyrics_yo: Vec::new(),
            category: Category::default(),
            tune_code: String::new(),
            theme_scripture: None,
        }
    }
}
