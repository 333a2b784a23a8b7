use serde::{Deserialize, Serialize};

/// Hymns remembered in the viewing history.
pub const MAX_HISTORY: usize = 50;

/// Recently opened hymn ids, newest first, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    ids: Vec<u32>,
}

impl History {
    pub fn from_ids(ids: Vec<u32>) -> Self {
        let mut history = Self::default();
        for id in ids.into_iter().rev() {
            history.record(id);
        }
        history
    }

    pub fn record(&mut self, hymn_id: u32) {
        self.ids.retain(|id| *id != hymn_id);
        self.ids.insert(0, hymn_id);
        self.ids.truncate(MAX_HISTORY);
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_moves_to_front() {
        let mut history = History::default();
        history.record(1);
        history.record(2);
        history.record(1);
        assert_eq!(history.ids(), [1, 2]);
    }

    #[test]
    fn capped_at_fifty() {
        let mut history = History::default();
        for id in 1..=60 {
            history.record(id);
        }
        assert_eq!(history.ids().len(), MAX_HISTORY);
        assert_eq!(history.ids()[0], 60);
        assert_eq!(history.ids()[MAX_HISTORY - 1], 11);
    }
}
