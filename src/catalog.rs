//! Loading the hymn collection from the JSON data file. The collection is
//! read once at startup and then only borrowed by the rest of the program.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::library::list_categories;
use crate::models::{Hymn, Language};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read hymn file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("hymn data is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("hymn number {0} appears more than once")]
    DuplicateId(u32),
    #[error("hymn numbers must be positive (found 0 at position {0})")]
    ZeroId(usize),
}

/// The loaded, validated hymn collection in file order.
#[derive(Debug, Clone, Default)]
pub struct Hymnal {
    hymns: Vec<Hymn>,
}

impl Hymnal {
    /// Validate and wrap an already deserialized collection.
    pub fn new(hymns: Vec<Hymn>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(hymns.len());
        for (position, hymn) in hymns.iter().enumerate() {
            if hymn.id == 0 {
                return Err(CatalogError::ZeroId(position));
            }
            if !seen.insert(hymn.id) {
                return Err(CatalogError::DuplicateId(hymn.id));
            }
        }
        Ok(Self { hymns })
    }

    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let hymns: Vec<Hymn> = serde_json::from_str(text)?;
        Self::new(hymns)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let hymnal = Self::from_json_str(&text)?;
        info!(path = %path.display(), count = hymnal.len(), "loaded hymns");
        Ok(hymnal)
    }

    pub fn hymns(&self) -> &[Hymn] {
        &self.hymns
    }

    pub fn len(&self) -> usize {
        self.hymns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hymns.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Hymn> {
        self.hymns.iter().find(|hymn| hymn.id == id)
    }

    /// Map stored ids back to hymns, in the order given. Ids no longer in the
    /// collection (a newer data file dropped them) are skipped.
    pub fn resolve(&self, ids: &[u32]) -> Vec<&Hymn> {
        let hymns: Vec<&Hymn> = ids.iter().filter_map(|id| self.get(*id)).collect();
        if hymns.len() != ids.len() {
            debug!(
                requested = ids.len(),
                found = hymns.len(),
                "skipped ids missing from the collection"
            );
        }
        hymns
    }

    pub fn categories(&self, language: Language) -> Vec<String> {
        list_categories(&self.hymns, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {"id": 1, "title_en": "Amazing Grace", "title_yo": "Oore Ọ̀fẹ́",
         "first_line_en": "Amazing grace", "first_line_yo": "Oore ọ̀fẹ́",
         "lyrics_en": [{"type": "stanza", "lines": ["Amazing grace"]}],
         "lyrics_yo": [],
         "category": {"en": "Grace", "yo": "Oore"},
         "tune_code": "C.M."},
        {"id": 23, "title_en": "How Great Thou Art", "title_yo": "Iwọ Tobi",
         "first_line_en": "O Lord my God", "first_line_yo": "Olúwa",
         "lyrics_en": [], "lyrics_yo": [],
         "category": "Praise", "tune_code": "11.10.11.10",
         "theme_scripture": {"en": "Psalm 8", "yo": "Orin Dafidi 8"}}
    ]"#;

    #[test]
    fn parses_both_category_shapes() {
        let hymnal = Hymnal::from_json_str(DATA).unwrap();
        assert_eq!(hymnal.len(), 2);
        assert_eq!(hymnal.get(1).unwrap().category(Language::Yoruba), "Oore");
        assert_eq!(hymnal.get(23).unwrap().category(Language::Yoruba), "Praise");
        assert_eq!(
            hymnal.get(23).unwrap().scripture(Language::Yoruba),
            Some("Orin Dafidi 8")
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let data = r#"[{"id": 4, "category": "A"}, {"id": 4, "category": "B"}]"#;
        assert!(matches!(
            Hymnal::from_json_str(data),
            Err(CatalogError::DuplicateId(4))
        ));
    }

    #[test]
    fn rejects_zero_id() {
        let data = r#"[{"id": 2, "category": "A"}, {"id": 0, "category": "B"}]"#;
        assert!(matches!(
            Hymnal::from_json_str(data),
            Err(CatalogError::ZeroId(1))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Hymnal::from_json_str("[{"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn resolve_skips_unknown_ids() {
        let hymnal = Hymnal::from_json_str(DATA).unwrap();
        let ids: Vec<_> = hymnal.resolve(&[23, 99, 1]).iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![23, 1]);
    }
}
