pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod scoring;
pub mod source;
pub mod storage;
pub mod types;

pub use config::{RecommendationConfig, ScoringWeights};
pub use error::Error;
pub use models::TextGenerator;
pub use ranking::DeterministicRanker;
pub use scoring::RelevanceScorer;
pub use source::{ArticlePage, ArticleSource};
pub use storage::PreferenceStore;
pub use types::{Article, Category, PreferencesUpdate, ScoredArticle, UserPreferences};

pub type Result<T> = std::result::Result<T, Error>;
