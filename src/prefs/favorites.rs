use serde::{Deserialize, Serialize};

/// Favorite hymn ids in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<u32>,
}

impl Favorites {
    pub fn from_ids(mut ids: Vec<u32>) -> Self {
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(*id));
        Self { ids }
    }

    /// Flip the favorite flag for a hymn. Returns `true` when the hymn is now
    /// a favorite.
    pub fn toggle(&mut self, hymn_id: u32) -> bool {
        if self.contains(hymn_id) {
            self.ids.retain(|id| *id != hymn_id);
            false
        } else {
            self.ids.push(hymn_id);
            true
        }
    }

    pub fn contains(&self, hymn_id: u32) -> bool {
        self.ids.contains(&hymn_id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
