use std::collections::HashSet;
use std::fmt;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use nn_core::{Article, Error, RecommendationConfig, Result, TextGenerator};
use tracing::{debug, info, warn};

use crate::reply::parse_ranking_reply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingOutcome {
    /// The model's ordering was applied.
    Ranked,
    /// The model call failed; the head of the input batch was returned unranked.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct SemanticRanking {
    pub articles: Vec<Article>,
    pub outcome: RankingOutcome,
}

/// Ranks a batch against a free-text query by asking a language model.
pub struct SemanticRanker {
    generator: Arc<dyn TextGenerator>,
    limit: usize,
    timeout: Duration,
}

impl fmt::Debug for SemanticRanker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticRanker")
            .field("generator", &self.generator.name())
            .field("limit", &self.limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SemanticRanker {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &RecommendationConfig) -> Self {
        Self {
            generator,
            limit: config.semantic_limit,
            timeout: config.llm_timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns at most `limit` articles from `articles`, most relevant first.
    ///
    /// Only a blank query is an error. Any failure talking to the model
    /// yields the first `limit` articles in input order instead.
    pub async fn rank_by_query(&self, articles: &[Article], query: &str) -> Result<Vec<Article>> {
        Ok(self.rank_by_query_detailed(articles, query).await?.articles)
    }

    pub async fn rank_by_query_detailed(&self, articles: &[Article], query: &str) -> Result<SemanticRanking> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("Query required".to_string()));
        }
        if articles.is_empty() {
            return Ok(SemanticRanking {
                articles: Vec::new(),
                outcome: RankingOutcome::Ranked,
            });
        }

        match self.try_rank(articles, query).await {
            Ok(ranked) => {
                info!("🧠 {} ranked {} of {} articles", self.generator.name(), ranked.len(), articles.len());
                Ok(SemanticRanking {
                    articles: ranked,
                    outcome: RankingOutcome::Ranked,
                })
            }
            Err(e) => {
                warn!("⚠️ Semantic ranking failed, returning unranked articles: {}", e);
                Ok(SemanticRanking {
                    articles: articles.iter().take(self.limit).cloned().collect(),
                    outcome: RankingOutcome::Fallback,
                })
            }
        }
    }

    async fn try_rank(&self, articles: &[Article], query: &str) -> Result<Vec<Article>> {
        let prompt = build_prompt(articles, query, self.limit);
        debug!("Semantic ranking prompt is {} bytes", prompt.len());

        let reply = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;
        let indices = parse_ranking_reply(&reply)?;

        Ok(select_articles(articles, &indices.indices(), self.limit))
    }
}

pub fn build_prompt(articles: &[Article], query: &str, limit: usize) -> String {
    let mut listing = String::new();
    for (i, article) in articles.iter().enumerate() {
        if i > 0 {
            listing.push('\n');
        }
        let _ = write!(listing, "{}. {} - {}", i, article.title, article.description_or_empty());
    }

    format!(
        "Given these news articles and user interest \"{query}\", rank them by relevance and return the top {limit} most relevant article indices (0-based).\n\nArticles:\n{listing}\n\nReturn only a JSON array of indices, e.g., [2, 5, 0, 8, 1, 3, 7, 4, 9, 6]"
    )
}

/// Maps reply indices onto the batch, keeping reply order. Out-of-range and repeated indices are skipped.
fn select_articles(articles: &[Article], indices: &[usize], limit: usize) -> Vec<Article> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .copied()
        .filter(|&i| i < articles.len() && seen.insert(i))
        .take(limit)
        .map(|i| articles[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DummyModel;
    use async_trait::async_trait;

    fn batch(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                id: format!("https://news.test/{}", i),
                title: format!("Title {}", i),
                description: if i % 2 == 0 { Some(format!("Description {}", i)) } else { None },
                content: None,
                url: format!("https://news.test/{}", i),
                url_to_image: None,
                published_at: "2024-04-01T00:00:00Z".to_string(),
                source: "Wire".to_string(),
                author: None,
                category: None,
            })
            .collect()
    }

    fn ranker(model: impl TextGenerator + 'static) -> SemanticRanker {
        SemanticRanker::new(Arc::new(model), &RecommendationConfig::default())
    }

    #[derive(Debug)]
    struct SlowModel;

    #[async_trait]
    impl TextGenerator for SlowModel {
        fn name(&self) -> &str {
            "Slow"
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("[1]".to_string())
        }
    }

    #[tokio::test]
    async fn test_reply_indices_map_back_in_order() {
        let articles = batch(6);
        let ranking = ranker(DummyModel::replying("[2, 0, 5]"))
            .rank_by_query_detailed(&articles, "elections")
            .await
            .unwrap();

        assert_eq!(ranking.outcome, RankingOutcome::Ranked);
        assert_eq!(ranking.articles, vec![articles[2].clone(), articles[0].clone(), articles[5].clone()]);
    }

    #[tokio::test]
    async fn test_out_of_range_indices_are_dropped() {
        let articles = batch(6);
        let ranked = ranker(DummyModel::replying("Ranking: [9, 1, 6, 3]"))
            .rank_by_query(&articles, "sports")
            .await
            .unwrap();

        assert_eq!(ranked, vec![articles[1].clone(), articles[3].clone()]);
    }

    #[tokio::test]
    async fn test_oversized_index_is_dropped_not_fatal() {
        let articles = batch(12);
        let ranking = ranker(DummyModel::replying("[2, 99999999999999999999999]"))
            .rank_by_query_detailed(&articles, "markets")
            .await
            .unwrap();

        assert_eq!(ranking.outcome, RankingOutcome::Ranked);
        assert_eq!(ranking.articles, vec![articles[2].clone()]);
    }

    #[tokio::test]
    async fn test_duplicate_indices_appear_once() {
        let articles = batch(4);
        let ranked = ranker(DummyModel::replying("[1, 1, 0]"))
            .rank_by_query(&articles, "q")
            .await
            .unwrap();
        assert_eq!(ranked, vec![articles[1].clone(), articles[0].clone()]);
    }

    #[tokio::test]
    async fn test_result_is_capped_at_limit() {
        let articles = batch(15);
        let ranked = ranker(DummyModel::replying("[14,13,12,11,10,9,8,7,6,5,4,3]"))
            .rank_by_query(&articles, "q")
            .await
            .unwrap();
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0], articles[14]);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back_to_first_ten() {
        let articles = batch(14);
        let ranking = ranker(DummyModel::new(None))
            .rank_by_query_detailed(&articles, "markets")
            .await
            .unwrap();

        assert_eq!(ranking.outcome, RankingOutcome::Fallback);
        assert_eq!(ranking.articles, articles[..10].to_vec());
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let articles = batch(3);
        let ranking = ranker(DummyModel::replying("I'd rather not say."))
            .rank_by_query_detailed(&articles, "markets")
            .await
            .unwrap();

        assert_eq!(ranking.outcome, RankingOutcome::Fallback);
        assert_eq!(ranking.articles, articles);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let articles = batch(12);
        let ranking = ranker(SlowModel)
            .with_timeout(Duration::from_millis(20))
            .rank_by_query_detailed(&articles, "weather")
            .await
            .unwrap();

        assert_eq!(ranking.outcome, RankingOutcome::Fallback);
        assert_eq!(ranking.articles, articles[..10].to_vec());
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let model = Arc::new(DummyModel::replying("[0]"));
        let ranker = SemanticRanker::new(model.clone(), &RecommendationConfig::default());

        let err = ranker.rank_by_query(&batch(3), "   ").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_lists_every_article() {
        let articles = batch(3);
        let model = Arc::new(DummyModel::replying("[0]"));
        let ranker = SemanticRanker::new(model.clone(), &RecommendationConfig::default());
        ranker.rank_by_query(&articles, "climate policy").await.unwrap();

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains("user interest \"climate policy\""));
        assert!(prompt.contains("0. Title 0 - Description 0\n1. Title 1 - \n2. Title 2 - Description 2"));
        assert!(prompt.contains("Return only a JSON array of indices"));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_the_model() {
        let model = Arc::new(DummyModel::replying("[0]"));
        let ranker = SemanticRanker::new(model.clone(), &RecommendationConfig::default());
        assert!(ranker.rank_by_query(&[], "anything").await.unwrap().is_empty());
        assert!(model.prompts().is_empty());
    }
}
