use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::models::{Hymn, Language};

/// Hymns sharing one category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub label: String,
    pub hymns: Vec<&'a Hymn>,
}

impl CategoryGroup<'_> {
    pub fn count(&self) -> usize {
        self.hymns.len()
    }
}

/// Category label to member hymns. Groups are kept in the order their first
/// member was encountered; members keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGroups<'a> {
    groups: IndexMap<String, Vec<&'a Hymn>>,
}

impl<'a> CategoryGroups<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&[&'a Hymn]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    pub fn count(&self, label: &str) -> usize {
        self.groups.get(label).map_or(0, Vec::len)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Hymn])> {
        self.groups
            .iter()
            .map(|(label, hymns)| (label.as_str(), hymns.as_slice()))
    }

    /// Number of hymns across all groups.
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn into_groups(self) -> Vec<CategoryGroup<'a>> {
        self.groups
            .into_iter()
            .map(|(label, hymns)| CategoryGroup { label, hymns })
            .collect()
    }
}

pub fn group_by_category<'a, I>(hymns: I, language: Language) -> CategoryGroups<'a>
where
    I: IntoIterator<Item = &'a Hymn>,
{
    let mut groups: IndexMap<String, Vec<&'a Hymn>> = IndexMap::new();
    for hymn in hymns {
        groups
            .entry(hymn.category(language).to_string())
            .or_default()
            .push(hymn);
    }
    CategoryGroups { groups }
}

/// Every distinct category label in the collection, sorted. Independent of
/// any search or filter, so it is computed from the full collection.
pub fn list_categories(hymns: &[Hymn], language: Language) -> Vec<String> {
    hymns
        .iter()
        .map(|hymn| hymn.category(language).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
