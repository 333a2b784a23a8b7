use crate::models::{Hymn, Language};

/// Points awarded when the hymn number contains the query.
pub const ID_MATCH: u32 = 50;
/// Extra points when the hymn number is exactly the query.
pub const ID_EXACT_BONUS: u32 = 50;
pub const TITLE_MATCH: u32 = 40;
pub const TITLE_PREFIX_BONUS: u32 = 10;
pub const FIRST_LINE_MATCH: u32 = 20;
pub const FIRST_LINE_PREFIX_BONUS: u32 = 10;
pub const TUNE_CODE_MATCH: u32 = 15;
pub const CATEGORY_MATCH: u32 = 10;
pub const LYRICS_MATCH: u32 = 5;

/// A hymn that matched a query, with its relevance score (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredHymn<'a> {
    pub hymn: &'a Hymn,
    pub score: u32,
}

/// Outcome of [`search`]. A blank query does not search at all and hands the
/// collection back untouched, which callers need to tell apart from a query
/// that ranked everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults<'a> {
    Unscored(Vec<&'a Hymn>),
    Ranked(Vec<ScoredHymn<'a>>),
}

impl<'a> SearchResults<'a> {
    pub fn is_ranked(&self) -> bool {
        matches!(self, SearchResults::Ranked(_))
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Unscored(hymns) => hymns.len(),
            SearchResults::Ranked(scored) => scored.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the scores, keeping result order.
    pub fn into_hymns(self) -> Vec<&'a Hymn> {
        match self {
            SearchResults::Unscored(hymns) => hymns,
            SearchResults::Ranked(scored) => scored.into_iter().map(|item| item.hymn).collect(),
        }
    }
}

/// Trim and lowercase a raw query. `None` means there is nothing to search
/// for.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Tune codes are compared with spaces and periods removed, so "C.M." and
/// "CM" are the same tune.
fn strip_tune_punctuation(text: &str) -> String {
    text.chars().filter(|ch| *ch != ' ' && *ch != '.').collect()
}

/// Score one hymn against an already normalized (trimmed, lowercased) query.
pub fn score(hymn: &Hymn, needle: &str, language: Language) -> u32 {
    let mut score = 0;

    let id = hymn.id.to_string();
    if id.contains(needle) {
        score += ID_MATCH;
        if id == needle {
            score += ID_EXACT_BONUS;
        }
    }

    let title = hymn.title(language).to_lowercase();
    if title.contains(needle) {
        score += TITLE_MATCH;
        if title.starts_with(needle) {
            score += TITLE_PREFIX_BONUS;
        }
    }

    let first_line = hymn.first_line(language).to_lowercase();
    if first_line.contains(needle) {
        score += FIRST_LINE_MATCH;
        if first_line.starts_with(needle) {
            score += FIRST_LINE_PREFIX_BONUS;
        }
    }

    let tune = strip_tune_punctuation(&hymn.tune_code.to_lowercase());
    if tune.contains(&strip_tune_punctuation(needle)) {
        score += TUNE_CODE_MATCH;
    }

    if hymn.category(language).to_lowercase().contains(needle) {
        score += CATEGORY_MATCH;
    }

    let in_lyrics = hymn
        .stanzas(language)
        .iter()
        .flat_map(|stanza| stanza.lines.iter())
        .any(|line| line.to_lowercase().contains(needle));
    if in_lyrics {
        score += LYRICS_MATCH;
    }

    score
}

/// Rank `hymns` against `query`. Hymns scoring zero are dropped; the rest are
/// ordered by descending score, ties keeping their input order.
pub fn search<'a, I>(hymns: I, query: &str, language: Language) -> SearchResults<'a>
where
    I: IntoIterator<Item = &'a Hymn>,
{
    let Some(needle) = normalize_query(query) else {
        return SearchResults::Unscored(hymns.into_iter().collect());
    };

    let mut ranked: Vec<ScoredHymn<'a>> = hymns
        .into_iter()
        .filter_map(|hymn| {
            let score = score(hymn, &needle, language);
            (score > 0).then_some(ScoredHymn { hymn, score })
        })
        .collect();
    // `sort_by` is stable, which keeps equal scores in collection order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    SearchResults::Ranked(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Localized, Stanza, StanzaKind};

    fn hymn(id: u32, title: &str) -> Hymn {
        Hymn {
            id,
            title_en: title.to_string(),
            title_yo: String::new(),
            first_line_en: String::new(),
            first_line_yo: String::new(),
            lyrics_en: Vec::new(),
            lyrics_yo: Vec::new(),
            category: Category::Plain("Worship".into()),
            tune_code: String::new(),
            theme_scripture: None,
        }
    }

    #[test]
    fn exact_id_gets_both_id_signals() {
        let h = hymn(23, "How Great Thou Art");
        assert_eq!(score(&h, "23", Language::English), ID_MATCH + ID_EXACT_BONUS);
        assert_eq!(score(&h, "2", Language::English), ID_MATCH);
    }

    #[test]
    fn title_prefix_stacks_on_contains() {
        let h = hymn(1, "Amazing Grace");
        assert_eq!(score(&h, "amazing", Language::English), TITLE_MATCH + TITLE_PREFIX_BONUS);
        assert_eq!(score(&h, "grace", Language::English), TITLE_MATCH);
    }

    #[test]
    fn first_line_and_lyrics_add_up() {
        let h = Hymn {
            first_line_en: "Praise the Lord".into(),
            lyrics_en: vec![Stanza {
                kind: StanzaKind::Stanza,
                lines: vec!["Praise the Lord, ye heavens".into()],
            }],
            ..hymn(4, "Anthem")
        };
        assert_eq!(
            score(&h, "praise", Language::English),
            FIRST_LINE_MATCH + FIRST_LINE_PREFIX_BONUS + LYRICS_MATCH
        );
    }

    #[test]
    fn tune_code_ignores_spaces_and_periods() {
        let h = Hymn {
            tune_code: "C. M.".into(),
            ..hymn(9, "Hymn")
        };
        assert_eq!(score(&h, "cm", Language::English), TUNE_CODE_MATCH);
        assert_eq!(score(&h, "c.m", Language::English), TUNE_CODE_MATCH);
    }

    #[test]
    fn category_uses_selected_language() {
        let h = Hymn {
            category: Category::Localized(Localized {
                en: "Evening".into(),
                yo: "Alẹ́".into(),
            }),
            ..hymn(5, "Hymn")
        };
        assert_eq!(score(&h, "evening", Language::English), CATEGORY_MATCH);
        assert_eq!(score(&h, "evening", Language::Yoruba), 0);
    }

    #[test]
    fn blank_query_returns_everything_unscored() {
        let hymns = vec![hymn(2, "B"), hymn(1, "A")];
        let results = search(&hymns, "   ", Language::English);
        assert!(!results.is_ranked());
        let ids: Vec<_> = results.into_hymns().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn query_is_trimmed_before_scoring() {
        let hymns = vec![hymn(23, "How Great Thou Art")];
        let SearchResults::Ranked(ranked) = search(&hymns, "  23 ", Language::English) else {
            panic!("expected ranked results");
        };
        assert_eq!(ranked[0].score, ID_MATCH + ID_EXACT_BONUS);
    }

    #[test]
    fn equal_scores_keep_collection_order() {
        let hymns = vec![hymn(10, "Grace"), hymn(11, "Grace"), hymn(12, "Amazing Grace")];
        let ids: Vec<_> = search(&hymns, "grace", Language::English)
            .into_hymns()
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn no_match_is_an_empty_ranked_result() {
        let hymns = vec![hymn(1, "Amazing Grace")];
        let results = search(&hymns, "zzz", Language::English);
        assert!(results.is_ranked());
        assert!(results.is_empty());
    }
}
