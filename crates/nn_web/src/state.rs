use std::sync::Arc;

use nn_core::{ArticleSource, DeterministicRanker, PreferenceStore, RecommendationConfig, TextGenerator};
use nn_inference::{SemanticRanker, TopicExtractor};

pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub store: Arc<dyn PreferenceStore>,
    pub ranker: DeterministicRanker,
    pub semantic: SemanticRanker,
    pub topics: TopicExtractor,
    pub config: RecommendationConfig,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        store: Arc<dyn PreferenceStore>,
        generator: Arc<dyn TextGenerator>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            source,
            store,
            ranker: DeterministicRanker::new(config.weights),
            semantic: SemanticRanker::new(generator.clone(), &config),
            topics: TopicExtractor::new(generator, &config),
            config,
        }
    }
}
