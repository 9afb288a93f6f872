use crate::config::ScoringWeights;
use crate::types::{Article, ScoredArticle, UserPreferences};

/// Scores an article against a user's preferences with fixed additive weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Category match, then one bonus per matching interest, then source match.
    ///
    /// Interests are matched case-insensitively as substrings of the title and
    /// description. Every matching interest counts, duplicates included.
    pub fn score(&self, article: &Article, preferences: &UserPreferences) -> u32 {
        let mut score = 0;

        if let Some(category) = article.category {
            if preferences.categories.contains(&category) {
                score += self.weights.category;
            }
        }

        if !preferences.interests.is_empty() {
            let text = article.headline_text().to_lowercase();
            let matches = preferences
                .interests
                .iter()
                .filter(|interest| text.contains(&interest.to_lowercase()))
                .count() as u32;
            score += matches * self.weights.interest;
        }

        if preferences.sources.iter().any(|source| *source == article.source) {
            score += self.weights.source;
        }

        score
    }

    pub fn score_article(&self, article: &Article, preferences: &UserPreferences) -> ScoredArticle {
        ScoredArticle {
            article: article.clone(),
            relevance_score: self.score(article, preferences),
        }
    }
}

/// Scores with the default 3/2/1 weights.
pub fn score(article: &Article, preferences: &UserPreferences) -> u32 {
    RelevanceScorer::default().score(article, preferences)
}
