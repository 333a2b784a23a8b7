use crate::models::{Hymn, Language};

/// The single filter active in a library view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HymnFilter {
    #[default]
    None,
    /// Only hymns with at least one chorus in the display language.
    Chorus,
    /// Only hymns whose category label equals this value.
    Category(String),
}

impl HymnFilter {
    pub fn matches(&self, hymn: &Hymn, language: Language) -> bool {
        match self {
            HymnFilter::None => true,
            HymnFilter::Chorus => hymn.has_chorus(language),
            HymnFilter::Category(label) => hymn.category(language) == label,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, HymnFilter::None)
    }
}

/// Remove the hymns the filter rejects. Order is preserved and nothing is
/// re-scored.
pub fn filter<'a, I>(hymns: I, active: &HymnFilter, language: Language) -> Vec<&'a Hymn>
where
    I: IntoIterator<Item = &'a Hymn>,
{
    hymns
        .into_iter()
        .filter(|hymn| active.matches(hymn, language))
        .collect()
}
