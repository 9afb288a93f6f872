use chrono::{DateTime, Utc};

use crate::config::ScoringWeights;
use crate::scoring::RelevanceScorer;
use crate::types::{Article, ScoredArticle, UserPreferences};

/// Orders a batch by relevance score, newest first within equal scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicRanker {
    scorer: RelevanceScorer,
}

impl DeterministicRanker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            scorer: RelevanceScorer::new(weights),
        }
    }

    /// Returns every input article, scored and sorted. Never drops an article.
    ///
    /// Unparseable timestamps sort as the oldest possible instant. The sort is
    /// stable, so articles equal on both keys keep their input order.
    pub fn rank(&self, articles: &[Article], preferences: &UserPreferences) -> Vec<ScoredArticle> {
        let mut keyed: Vec<(DateTime<Utc>, ScoredArticle)> = articles
            .iter()
            .map(|article| {
                let published = article.published_at_utc().unwrap_or(DateTime::<Utc>::MIN_UTC);
                (published, self.scorer.score_article(article, preferences))
            })
            .collect();

        keyed.sort_by(|(a_time, a), (b_time, b)| {
            b.relevance_score
                .cmp(&a.relevance_score)
                .then_with(|| b_time.cmp(a_time))
        });

        tracing::debug!("Ranked {} articles", keyed.len());
        keyed.into_iter().map(|(_, scored)| scored).collect()
    }
}

/// Ranks with the default 3/2/1 weights.
pub fn rank(articles: &[Article], preferences: &UserPreferences) -> Vec<ScoredArticle> {
    DeterministicRanker::default().rank(articles, preferences)
}
