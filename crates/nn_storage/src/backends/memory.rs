use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nn_core::{PreferenceStore, PreferencesUpdate, Result, UserPreferences};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<String, UserPreferences>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> UserPreferences {
        self.users.get(user_id).cloned().unwrap_or_default()
    }

    pub fn put(&mut self, user_id: &str, preferences: UserPreferences) {
        self.users.insert(user_id.to_string(), preferences);
    }

    pub fn entry(&mut self, user_id: &str) -> &mut UserPreferences {
        self.users.entry(user_id.to_string()).or_default()
    }
}

/// Process-local preference store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get_preferences(&self, user_id: &str) -> Result<UserPreferences> {
        let store = self.store.read().await;
        Ok(store.get(user_id))
    }

    async fn put_preferences(&self, user_id: &str, preferences: &UserPreferences) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(user_id, preferences.clone());
        Ok(())
    }

    // Read-modify-write under one lock so concurrent edits are not lost.
    async fn update_preferences(&self, user_id: &str, update: PreferencesUpdate) -> Result<UserPreferences> {
        let mut store = self.store.write().await;
        let updated = update.apply(store.get(user_id));
        store.put(user_id, updated.clone());
        Ok(updated)
    }

    async fn mark_read(&self, user_id: &str, article_id: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.entry(user_id).mark_read(article_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nn_core::Category;

    #[tokio::test]
    async fn test_unknown_user_gets_empty_preferences() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get_preferences("ghost").await.unwrap(), UserPreferences::default());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryPreferenceStore::new();
        let prefs = UserPreferences {
            categories: vec![Category::Technology],
            interests: vec!["rust".to_string()],
            ..Default::default()
        };
        store.put_preferences("u1", &prefs).await.unwrap();
        assert_eq!(store.get_preferences("u1").await.unwrap(), prefs);
        assert!(store.get_preferences("u2").await.unwrap().interests.is_empty());
    }

    #[tokio::test]
    async fn test_update_preserves_read_history() {
        let store = MemoryPreferenceStore::new();
        store.mark_read("u1", "https://a").await.unwrap();

        let updated = store
            .update_preferences(
                "u1",
                PreferencesUpdate {
                    sources: Some(vec!["Reuters".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.sources, vec!["Reuters".to_string()]);
        assert_eq!(updated.read_articles, vec!["https://a".to_string()]);
        assert_eq!(store.get_preferences("u1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_mark_read_deduplicates() {
        let store = MemoryPreferenceStore::new();
        store.mark_read("u1", "https://a").await.unwrap();
        store.mark_read("u1", "https://a").await.unwrap();
        store.mark_read("u1", "https://b").await.unwrap();
        assert_eq!(
            store.read_articles("u1").await.unwrap(),
            vec!["https://a".to_string(), "https://b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_concurrent_marks_are_not_lost() {
        let store = MemoryPreferenceStore::new();
        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.mark_read("u1", &format!("https://{}", i)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(store.read_articles("u1").await.unwrap().len(), 32);
    }
}
