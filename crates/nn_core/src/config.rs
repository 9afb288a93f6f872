use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Additive weights used by the relevance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub category: u32,
    pub interest: u32,
    pub source: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            category: 3,
            interest: 2,
            source: 1,
        }
    }
}

/// Limits and batch sizes shared by the rankers and the HTTP layer.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub weights: ScoringWeights,
    /// Number of ranked articles shown per recommendation page.
    pub page_size: usize,
    /// Maximum articles returned by the semantic ranker, ranked or not.
    pub semantic_limit: usize,
    pub topic_limit: usize,
    /// Character budget of the article digest sent for topic extraction.
    pub topic_char_budget: usize,
    /// Deadline applied to every generative-service call.
    pub llm_timeout: Duration,
    pub recommendation_batch: u32,
    pub semantic_batch: u32,
    pub topic_batch: u32,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            page_size: 20,
            semantic_limit: 10,
            topic_limit: 10,
            topic_char_budget: 2000,
            llm_timeout: Duration::from_secs(30),
            recommendation_batch: 50,
            semantic_batch: 30,
            topic_batch: 50,
        }
    }
}
