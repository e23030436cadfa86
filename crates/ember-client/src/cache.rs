use tokio::sync::RwLock;
use tracing::debug;

use ember_types::models::{Streak, StreakId};

#[derive(Debug, Default)]
struct CacheState {
    streaks: Vec<Streak>,
    selected: Option<StreakId>,
}

/// Server-ordered list of the current user's streaks plus the selected id.
///
/// Entries are only ever replaced as a whole list. The selection is kept by
/// id and resolved on each read, so counters shown for it are always those
/// of the latest fetch.
#[derive(Debug, Default)]
pub struct StreakCache {
    state: RwLock<CacheState>,
}

impl StreakCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the list. A selection whose streak is gone is cleared.
    pub async fn replace_all(&self, streaks: Vec<Streak>) {
        let mut state = self.state.write().await;
        if let Some(id) = state.selected {
            if !streaks.iter().any(|s| s.id == id) {
                debug!("selected streak {} no longer listed, clearing selection", id);
                state.selected = None;
            }
        }
        state.streaks = streaks;
    }

    pub async fn streaks(&self) -> Vec<Streak> {
        self.state.read().await.streaks.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.streaks.is_empty()
    }

    pub async fn get(&self, id: StreakId) -> Option<Streak> {
        self.state
            .read()
            .await
            .streaks
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Select `id` and return its streak, or clear the selection if it is
    /// not in the list.
    pub async fn select(&self, id: StreakId) -> Option<Streak> {
        let mut state = self.state.write().await;
        let found = state.streaks.iter().find(|s| s.id == id).cloned();
        state.selected = found.as_ref().map(|s| s.id);
        found
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selected = None;
    }

    pub async fn selected_id(&self) -> Option<StreakId> {
        self.state.read().await.selected
    }

    /// The selected streak as of the latest refresh.
    pub async fn selected(&self) -> Option<Streak> {
        let state = self.state.read().await;
        let id = state.selected?;
        state.streaks.iter().find(|s| s.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_types::models::StreakStatus;

    fn streak(id: StreakId, days: u32) -> Streak {
        Streak {
            id,
            current_streak: days,
            last_activity_date: None,
            status: StreakStatus::Active,
            restore_count: 0,
            user1_username: "alice".into(),
            user1_name: "Alice".into(),
            user2_username: format!("friend{}", id),
            user2_name: format!("Friend {}", id),
            unread_count: 0,
        }
    }

    #[tokio::test]
    async fn replace_all_is_wholesale() {
        let cache = StreakCache::new();
        cache.replace_all(vec![streak(1, 1), streak(2, 2)]).await;
        cache.replace_all(vec![streak(3, 3)]).await;

        let ids: Vec<_> = cache.streaks().await.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3]);

        cache.replace_all(Vec::new()).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn selection_sees_fresh_counters() {
        let cache = StreakCache::new();
        cache.replace_all(vec![streak(1, 1)]).await;
        assert_eq!(cache.select(1).await.map(|s| s.current_streak), Some(1));

        cache.replace_all(vec![streak(1, 5)]).await;
        assert_eq!(cache.selected().await.map(|s| s.current_streak), Some(5));
    }

    #[tokio::test]
    async fn selection_cleared_when_streak_disappears() {
        let cache = StreakCache::new();
        cache.replace_all(vec![streak(1, 1), streak(2, 1)]).await;
        cache.select(2).await;

        cache.replace_all(vec![streak(1, 1)]).await;
        assert_eq!(cache.selected_id().await, None);
        assert!(cache.selected().await.is_none());
    }

    #[tokio::test]
    async fn selecting_unknown_id_clears() {
        let cache = StreakCache::new();
        cache.replace_all(vec![streak(1, 1)]).await;
        cache.select(1).await;

        assert!(cache.select(9).await.is_none());
        assert_eq!(cache.selected_id().await, None);
    }
}
