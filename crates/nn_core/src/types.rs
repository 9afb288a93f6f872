use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The fixed set of news categories an article may be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::InvalidInput(format!("Unknown category: {}", s)))
    }
}

/// A normalized news article. Its identity is the source URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp exactly as delivered by the article source.
    pub published_at: String,
    pub source: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Article {
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Title and description joined by a single space.
    pub fn headline_text(&self) -> String {
        format!("{} {}", self.title, self.description_or_empty())
    }

    /// Parsed publication time, `None` when the source sent something unparseable.
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.published_at.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

/// A user's declared affinities plus read history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub categories: Vec<Category>,
    pub interests: Vec<String>,
    pub sources: Vec<String>,
    pub read_articles: Vec<String>,
}

impl UserPreferences {
    /// Records an article as read. Returns false if it was already recorded.
    pub fn mark_read(&mut self, article_id: &str) -> bool {
        if self.has_read(article_id) {
            return false;
        }
        self.read_articles.push(article_id.to_string());
        true
    }

    pub fn has_read(&self, article_id: &str) -> bool {
        self.read_articles.iter().any(|id| id == article_id)
    }
}

/// A partial preferences edit. Absent lists keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesUpdate {
    pub categories: Option<Vec<Category>>,
    pub interests: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
}

impl PreferencesUpdate {
    pub fn apply(self, current: UserPreferences) -> UserPreferences {
        UserPreferences {
            categories: self.categories.unwrap_or(current.categories),
            interests: self.interests.unwrap_or(current.interests),
            sources: self.sources.unwrap_or(current.sources),
            read_articles: current.read_articles,
        }
    }
}

/// An article augmented with its relevance score for the duration of one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub relevance_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: "https://example.com/a".to_string(),
            title: "Chips".to_string(),
            description: None,
            content: None,
            url: "https://example.com/a".to_string(),
            url_to_image: None,
            published_at: "2024-05-01T10:00:00Z".to_string(),
            source: "Wired".to_string(),
            author: None,
            category: Some(Category::Technology),
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("technology".parse::<Category>().unwrap(), Category::Technology);
        assert_eq!(" Sports ".parse::<Category>().unwrap(), Category::Sports);
        assert!("politics".parse::<Category>().is_err());
        assert_eq!(Category::Health.to_string(), "health");
    }

    #[test]
    fn test_article_wire_format() {
        let json = serde_json::to_value(article()).unwrap();
        assert_eq!(json["publishedAt"], "2024-05-01T10:00:00Z");
        assert_eq!(json["category"], "technology");
        assert!(json["urlToImage"].is_null());

        let parsed: Article = serde_json::from_value(serde_json::json!({
            "id": "x",
            "title": "T",
            "url": "x",
            "publishedAt": "not a date",
            "source": "S"
        }))
        .unwrap();
        assert!(parsed.category.is_none());
        assert!(parsed.published_at_utc().is_none());
    }

    #[test]
    fn test_headline_text_without_description() {
        assert_eq!(article().headline_text(), "Chips ");
    }

    #[test]
    fn test_scored_article_flattens() {
        let scored = ScoredArticle { article: article(), relevance_score: 4 };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["relevanceScore"], 4);
        assert_eq!(json["title"], "Chips");
    }

    #[test]
    fn test_preferences_update_keeps_absent_lists() {
        let current = UserPreferences {
            categories: vec![Category::Science],
            interests: vec!["space".to_string()],
            sources: vec!["NASA".to_string()],
            read_articles: vec!["a".to_string()],
        };
        let update = PreferencesUpdate {
            interests: Some(vec![]),
            ..Default::default()
        };

        let updated = update.apply(current);
        assert_eq!(updated.categories, vec![Category::Science]);
        assert!(updated.interests.is_empty());
        assert_eq!(updated.sources, vec!["NASA".to_string()]);
        assert_eq!(updated.read_articles, vec!["a".to_string()]);
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut prefs = UserPreferences::default();
        assert!(prefs.mark_read("a"));
        assert!(!prefs.mark_read("a"));
        assert!(prefs.has_read("a"));
        assert_eq!(prefs.read_articles.len(), 1);
    }
}
