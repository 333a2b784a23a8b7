use serde::{Deserialize, Serialize};

use crate::models::{Bookmark, ServiceSlot};

/// All saved bookmarks. Each service slot holds at most one hymn and each
/// hymn has at most one custom bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks {
    entries: Vec<Bookmark>,
}

impl Bookmarks {
    pub fn from_entries(entries: Vec<Bookmark>) -> Self {
        let mut bookmarks = Self::default();
        for entry in entries {
            match entry {
                Bookmark::Service {
                    hymn_id,
                    slot,
                    created_at,
                } => bookmarks.set_service_hymn(slot, Some(hymn_id), created_at),
                Bookmark::Custom {
                    hymn_id,
                    description,
                    created_at,
                } => bookmarks.set_custom(hymn_id, description, created_at),
            }
        }
        bookmarks
    }

    /// Put `hymn_id` in `slot`, replacing whatever was there, or empty the
    /// slot with `None`.
    pub fn set_service_hymn(&mut self, slot: ServiceSlot, hymn_id: Option<u32>, now: i64) {
        self.entries.retain(
            |entry| !matches!(entry, Bookmark::Service { slot: existing, .. } if *existing == slot),
        );
        if let Some(hymn_id) = hymn_id {
            self.entries.push(Bookmark::Service {
                hymn_id,
                slot,
                created_at: now,
            });
        }
    }

    /// Attach a note to a hymn, replacing any earlier note for it.
    pub fn set_custom(&mut self, hymn_id: u32, description: String, now: i64) {
        self.remove_custom(hymn_id);
        self.entries.push(Bookmark::Custom {
            hymn_id,
            description,
            created_at: now,
        });
    }

    /// Returns whether a custom bookmark was removed.
    pub fn remove_custom(&mut self, hymn_id: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(
            |entry| !matches!(entry, Bookmark::Custom { hymn_id: id, .. } if *id == hymn_id),
        );
        self.entries.len() != before
    }

    /// The note saved for a hymn, if any.
    pub fn custom_for(&self, hymn_id: u32) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            Bookmark::Custom {
                hymn_id: id,
                description,
                ..
            } if *id == hymn_id => Some(description.as_str()),
            _ => None,
        })
    }

    /// The service slot a hymn occupies, if any.
    pub fn service_slot_for(&self, hymn_id: u32) -> Option<ServiceSlot> {
        self.entries.iter().find_map(|entry| match entry {
            Bookmark::Service {
                hymn_id: id, slot, ..
            } if *id == hymn_id => Some(*slot),
            _ => None,
        })
    }

    pub fn service_hymn(&self, slot: ServiceSlot) -> Option<u32> {
        self.entries.iter().find_map(|entry| match entry {
            Bookmark::Service {
                hymn_id,
                slot: existing,
                ..
            } if *existing == slot => Some(*hymn_id),
            _ => None,
        })
    }

    pub fn is_bookmarked(&self, hymn_id: u32) -> bool {
        self.custom_for(hymn_id).is_some() || self.service_slot_for(hymn_id).is_some()
    }

    /// Custom bookmarks as `(hymn_id, note)`, most recently saved first.
    pub fn custom_newest_first(&self) -> Vec<(u32, &str)> {
        let mut custom: Vec<(i64, u32, &str)> = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Bookmark::Custom {
                    hymn_id,
                    description,
                    created_at,
                } => Some((*created_at, *hymn_id, description.as_str())),
                Bookmark::Service { .. } => None,
            })
            .collect();
        custom.sort_by(|a, b| b.0.cmp(&a.0));
        custom
            .into_iter()
            .map(|(_, hymn_id, note)| (hymn_id, note))
            .collect()
    }

    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_holds_one_hymn() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.set_service_hymn(ServiceSlot::Opening, Some(1), 10);
        bookmarks.set_service_hymn(ServiceSlot::Opening, Some(2), 20);
        assert_eq!(bookmarks.service_hymn(ServiceSlot::Opening), Some(2));
        assert_eq!(bookmarks.service_slot_for(1), None);
        assert_eq!(bookmarks.entries().len(), 1);

        bookmarks.set_service_hymn(ServiceSlot::Opening, None, 30);
        assert_eq!(bookmarks.service_hymn(ServiceSlot::Opening), None);
    }

    #[test]
    fn one_custom_note_per_hymn() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.set_custom(5, "wedding".into(), 1);
        bookmarks.set_custom(5, "funeral".into(), 2);
        assert_eq!(bookmarks.custom_for(5), Some("funeral"));
        assert_eq!(bookmarks.entries().len(), 1);
        assert!(bookmarks.remove_custom(5));
        assert!(!bookmarks.is_bookmarked(5));
    }

    #[test]
    fn custom_listing_is_newest_first() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.set_custom(1, "old".into(), 100);
        bookmarks.set_service_hymn(ServiceSlot::Closing, Some(3), 150);
        bookmarks.set_custom(2, "new".into(), 200);
        assert_eq!(bookmarks.custom_newest_first(), vec![(2, "new"), (1, "old")]);
    }

    #[test]
    fn hymn_can_hold_slot_and_note() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.set_service_hymn(ServiceSlot::Sermon, Some(8), 1);
        bookmarks.set_custom(8, "choir".into(), 2);
        assert_eq!(bookmarks.service_slot_for(8), Some(ServiceSlot::Sermon));
        assert_eq!(bookmarks.custom_for(8), Some("choir"));
    }
}
