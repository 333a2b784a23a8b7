//! Search, filtering, ordering and grouping over the in-memory hymn
//! collection. Every function here is pure: it borrows the collection, never
//! mutates it, and returns a fresh view the UI can render. The UI simply calls
//! [`process`] again whenever the query, filter, view mode or language
//! changes.

mod filter;
mod group;
mod search;
mod sort;

pub use filter::{filter, HymnFilter};
pub use group::{group_by_category, list_categories, CategoryGroup, CategoryGroups};
pub use search::{
    normalize_query, score, search, ScoredHymn, SearchResults, CATEGORY_MATCH, FIRST_LINE_MATCH,
    FIRST_LINE_PREFIX_BONUS, ID_EXACT_BONUS, ID_MATCH, LYRICS_MATCH, TITLE_MATCH,
    TITLE_PREFIX_BONUS, TUNE_CODE_MATCH,
};
pub use sort::{locale_cmp, sort, ViewMode};

use crate::models::{Hymn, Language};

/// Everything the library screen lets the user change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryQuery {
    pub text: String,
    pub filter: HymnFilter,
    pub view: ViewMode,
}

impl LibraryQuery {
    pub fn is_searching(&self) -> bool {
        normalize_query(&self.text).is_some()
    }
}

/// The rendered shape of the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryView<'a> {
    List(Vec<&'a Hymn>),
    Grouped(CategoryGroups<'a>),
}

impl<'a> LibraryView<'a> {
    /// Number of hymns shown, summed across groups.
    pub fn len(&self) -> usize {
        match self {
            LibraryView::List(hymns) => hymns.len(),
            LibraryView::Grouped(groups) => groups.total(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hymns in display order, group by group when grouped.
    pub fn hymns(&self) -> Vec<&'a Hymn> {
        match self {
            LibraryView::List(hymns) => hymns.clone(),
            LibraryView::Grouped(groups) => groups
                .iter()
                .flat_map(|(_, hymns)| hymns.iter().copied())
                .collect(),
        }
    }
}

/// Run the whole pipeline: search, filter, then (without a query) sort, then
/// group when the category view is selected.
pub fn process<'a>(hymns: &'a [Hymn], query: &LibraryQuery, language: Language) -> LibraryView<'a> {
    let results = search(hymns, &query.text, language);
    let ranked = results.is_ranked();
    let mut selected = filter(results.into_hymns(), &query.filter, language);

    if !ranked {
        selected = sort(selected, query.view, language);
    }

    match query.view {
        ViewMode::Category => LibraryView::Grouped(group_by_category(selected, language)),
        ViewMode::ListNumber | ViewMode::ListTitle => LibraryView::List(selected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Stanza, StanzaKind};

    fn hymn(id: u32, title: &str, category: &str) -> Hymn {
        Hymn {
            id,
            title_en: title.to_string(),
            title_yo: String::new(),
            first_line_en: String::new(),
            first_line_yo: String::new(),
            lyrics_en: vec![Stanza {
                kind: StanzaKind::Stanza,
                lines: vec![format!("{title} line")],
            }],
            lyrics_yo: Vec::new(),
            category: Category::Plain(category.to_string()),
            tune_code: String::new(),
            theme_scripture: None,
        }
    }

    #[test]
    fn search_order_wins_over_title_sort() {
        let hymns = vec![
            hymn(1, "Grace Abounding", "Grace"),
            hymn(2, "Amazing Grace", "Grace"),
            hymn(3, "Great Is Thy Faithfulness", "Praise"),
        ];
        let query = LibraryQuery {
            text: "amazing".into(),
            view: ViewMode::ListTitle,
            ..LibraryQuery::default()
        };
        let LibraryView::List(hymns) = process(&hymns, &query, Language::English) else {
            panic!("expected a list");
        };
        assert_eq!(hymns.iter().map(|h| h.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn grouped_view_groups_search_results() {
        let hymns = vec![
            hymn(5, "Praise Him", "Praise"),
            hymn(2, "Evening Prayer", "Evening"),
            hymn(1, "Praise the Lord", "Praise"),
        ];
        let query = LibraryQuery {
            view: ViewMode::Category,
            ..LibraryQuery::default()
        };
        let LibraryView::Grouped(groups) = process(&hymns, &query, Language::English) else {
            panic!("expected groups");
        };
        let praise: Vec<_> = groups.get("Praise").unwrap().iter().map(|h| h.id).collect();
        assert_eq!(praise, vec![1, 5]);
        assert_eq!(groups.labels().collect::<Vec<_>>(), vec!["Praise", "Evening"]);
    }

    #[test]
    fn filter_applies_after_search() {
        let hymns = vec![
            hymn(1, "Praise Him", "Praise"),
            hymn(2, "Praise at Evening", "Evening"),
        ];
        let query = LibraryQuery {
            text: "praise".into(),
            filter: HymnFilter::Category("Evening".into()),
            view: ViewMode::ListNumber,
        };
        let view = process(&hymns, &query, Language::English);
        assert_eq!(view.hymns().iter().map(|h| h.id).collect::<Vec<_>>(), vec![2]);
    }
}
