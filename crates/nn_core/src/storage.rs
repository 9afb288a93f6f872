use async_trait::async_trait;

use crate::types::{PreferencesUpdate, UserPreferences};
use crate::Result;

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Get a user's preferences, or an empty record if none were stored
    async fn get_preferences(&self, user_id: &str) -> Result<UserPreferences>;

    /// Replace a user's preferences
    async fn put_preferences(&self, user_id: &str, preferences: &UserPreferences) -> Result<()>;

    /// Apply a partial edit and return the stored result
    async fn update_preferences(&self, user_id: &str, update: PreferencesUpdate) -> Result<UserPreferences> {
        let current = self.get_preferences(user_id).await?;
        let updated = update.apply(current);
        self.put_preferences(user_id, &updated).await?;
        Ok(updated)
    }

    /// Append an article to the read history unless it is already there
    async fn mark_read(&self, user_id: &str, article_id: &str) -> Result<()> {
        let mut preferences = self.get_preferences(user_id).await?;
        if preferences.mark_read(article_id) {
            self.put_preferences(user_id, &preferences).await?;
        }
        Ok(())
    }

    async fn read_articles(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self.get_preferences(user_id).await?.read_articles)
    }
}
