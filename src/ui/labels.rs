use crate::models::Language;

/// Interface strings that follow the app language. Hymn text follows the
/// hymn language instead, see [`hymn_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Label {
    Library,
    Hymn,
    Favorites,
    Bookmarks,
    History,
    Settings,
    SearchHymns,
    RecentSearches,
    NoResults,
    TrySomethingElse,
    NoHymnsToDisplay,
    NoFilterMatches,
    NoHymnsLoaded,
    SelectCategory,
    HasChorus,
    Category,
    ListByNumber,
    ListByTitle,
    NoFavorites,
    NoFavoritesHint,
    NoHistory,
    NoHistoryHint,
    ServiceHymns,
    MyBookmarks,
    NotSet,
    NoBookmarks,
    AddNote,
    AppLanguage,
    DefaultHymnLanguage,
}

pub(crate) fn label(language: Language, label: Label) -> &'static str {
    use Label::*;
    match language {
        Language::English => match label {
            Library => "Hymn Library",
            Hymn => "Hymn",
            Favorites => "Favorites",
            Bookmarks => "Bookmarks",
            History => "History",
            Settings => "Settings",
            SearchHymns => "Search Hymns",
            RecentSearches => "Recent Searches",
            NoResults => "No Results Found",
            TrySomethingElse => "Try searching for something else.",
            NoHymnsToDisplay => "No Hymns to Display",
            NoFilterMatches => "There are no hymns matching your current filters.",
            NoHymnsLoaded => "Could not load hymn data.",
            SelectCategory => "Select a Category",
            HasChorus => "Has Chorus",
            Category => "Category",
            ListByNumber => "List (by Number)",
            ListByTitle => "List (by Title)",
            NoFavorites => "No Favorites Yet",
            NoFavoritesHint => "Press [*] on any hymn to add it to your favorites.",
            NoHistory => "No History Yet",
            NoHistoryHint => "Your recently viewed hymns will appear here.",
            ServiceHymns => "Service Hymns",
            MyBookmarks => "My Bookmarks",
            NotSet => "Not set",
            NoBookmarks => "No Bookmarks Yet",
            AddNote => "Add a Note",
            AppLanguage => "App Language",
            DefaultHymnLanguage => "Default Hymn Language",
        },
        Language::Yoruba => match label {
            Library => "Àkójọpọ̀ Orin",
            Hymn => "Orin",
            Favorites => "Àwọn Ayànfẹ́",
            Bookmarks => "Àwọn Àmì Ìwé",
            History => "Ìtàn",
            Settings => "Ètò",
            SearchHymns => "Ṣàwárí Orin",
            RecentSearches => "Àwọn Ìwárí Àìpẹ́",
            NoResults => "Kò Rí Àbájáde Kankan",
            TrySomethingElse => "Gbìyànjú wá nǹkan mìíràn.",
            NoHymnsToDisplay => "Kò Sí Orin Láti Fi Hàn",
            NoFilterMatches => "Kò sí orin kankan tó bá àwọn asẹ́ rẹ mu.",
            NoHymnsLoaded => "Kò lè gbé àwọn orin wọlé.",
            SelectCategory => "Yan Ẹ̀ka Kan",
            HasChorus => "Pẹ̀lú Egbe",
            Category => "Ẹ̀ka",
            ListByNumber => "Àkójọ (nípa Nọ́mbà)",
            ListByTitle => "Àkójọ (nípa Àkọlé)",
            NoFavorites => "Kò sí Àwọn Ayànfẹ́ Síbẹ̀",
            NoFavoritesHint => "Tẹ [*] lórí orin èyíkéyìí láti fi kún àwọn ayànfẹ́ rẹ.",
            NoHistory => "Kò sí Ìtàn Wíwò Síbẹ̀",
            NoHistoryHint => "Àwọn orin tí o wò láìpẹ́ yóò fara hàn níbí.",
            ServiceHymns => "Àwọn Orin Ìsìn",
            MyBookmarks => "Àwọn Àmì Ìwé Mi",
            NotSet => "Kò sí",
            NoBookmarks => "Kò sí Àwọn Àmì Ìwé Síbẹ̀",
            AddNote => "Fi Àkíyèsí Kún Un",
            AppLanguage => "Èdè Ìṣàfilọ́lẹ̀",
            DefaultHymnLanguage => "Èdè Orin Àkọ́kọ́",
        },
    }
}

/// Strings printed inside a hymn, which follow the hymn language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HymnLabel {
    Chorus,
    LyricsUnavailable,
}

pub(crate) fn hymn_label(language: Language, label: HymnLabel) -> &'static str {
    match (language, label) {
        (Language::English, HymnLabel::Chorus) => "Chorus",
        (Language::Yoruba, HymnLabel::Chorus) => "Egbe",
        (Language::English, HymnLabel::LyricsUnavailable) => "Lyrics not available in English.",
        (Language::Yoruba, HymnLabel::LyricsUnavailable) => "Ọ̀rọ̀ orin kò sí ní èdè Yorùbá.",
    }
}
