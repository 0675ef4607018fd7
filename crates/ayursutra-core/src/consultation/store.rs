//! Session store: the recommendations accumulated during one run.

use super::recommendation::Recommendation;

/// Headline shown when no recommendation has been received yet.
pub const EMPTY_STATE_TITLE: &str = "No recommendations yet";
/// Hint shown under [`EMPTY_STATE_TITLE`].
pub const EMPTY_STATE_HINT: &str = "Submit the form to get personalized AI suggestions";

/// Append-only, newest-first list of recommendations.
///
/// Entries are never mutated or removed once added. There is no eviction and
/// no size cap; the store lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: Vec<Recommendation>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recommendation in front of every existing entry.
    pub fn prepend(&mut self, recommendation: Recommendation) {
        self.entries.insert(0, recommendation);
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[Recommendation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The id most recently handed out, if any.
    pub fn latest_id(&self) -> Option<i64> {
        self.entries.first().map(|r| r.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consultation::Priority;

    fn rec(id: i64) -> Recommendation {
        Recommendation {
            id,
            name: format!("patient-{}", id),
            problem: "headache".to_string(),
            therapy: "Shirodhara".to_string(),
            doctor_label: "Dr. Iyer (Panchakarma)".to_string(),
            schedule_label: "Tue | Available: Tue 10-2".to_string(),
            priority: Priority::Low,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.latest_id(), None);
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let mut store = SessionStore::new();
        store.prepend(rec(1));
        store.prepend(rec(2));
        store.prepend(rec(3));

        let ids: Vec<i64> = store.entries().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(store.latest_id(), Some(3));
    }
}
