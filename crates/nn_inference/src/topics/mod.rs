use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use nn_core::{Article, Error, RecommendationConfig, Result, TextGenerator};
use tracing::{debug, info, warn};

use crate::reply::parse_topic_reply;

/// Asks a language model for the main themes of a batch of articles.
pub struct TopicExtractor {
    generator: Arc<dyn TextGenerator>,
    limit: usize,
    char_budget: usize,
    timeout: Duration,
}

impl fmt::Debug for TopicExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicExtractor")
            .field("generator", &self.generator.name())
            .field("limit", &self.limit)
            .field("char_budget", &self.char_budget)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TopicExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &RecommendationConfig) -> Self {
        Self {
            generator,
            limit: config.topic_limit,
            char_budget: config.topic_char_budget,
            timeout: config.llm_timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns up to `limit` topics, or nothing if the model call fails in any way.
    pub async fn extract_topics(&self, articles: &[Article]) -> Vec<String> {
        if articles.is_empty() {
            return Vec::new();
        }

        match self.try_extract(articles).await {
            Ok(topics) => {
                info!("🏷️ Extracted {} topics from {} articles", topics.len(), articles.len());
                topics
            }
            Err(e) => {
                warn!("⚠️ Topic extraction failed, returning no topics: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_extract(&self, articles: &[Article]) -> Result<Vec<String>> {
        let digest = build_digest(articles, self.char_budget);
        debug!("Topic digest is {} characters", digest.chars().count());
        let prompt = format!(
            "Extract the top {} main topics/themes from these news articles. Return only a JSON array of topic strings.\n\nArticles: {}",
            self.limit, digest
        );

        let reply = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;
        let mut topics = parse_topic_reply(&reply)?.0;
        topics.truncate(self.limit);
        Ok(topics)
    }
}

/// `"title. description"` for every article, space separated, cut to `budget` characters.
pub fn build_digest(articles: &[Article], budget: usize) -> String {
    articles
        .iter()
        .map(|a| format!("{}. {}", a.title, a.description_or_empty()))
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(budget)
        .collect()
}
