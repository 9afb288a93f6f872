use std::fmt;
use std::time::Duration;

pub mod models;
pub mod reply;
pub mod semantic;
pub mod topics;

pub use models::{create_model, ModelKind};
pub use semantic::{RankingOutcome, SemanticRanker, SemanticRanking};
pub use topics::TopicExtractor;

/// Connection settings for a generative-text model.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    /// Overrides the provider's base URL, mostly useful for proxies and tests.
    pub model_url: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: None,
            model_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_model;
    pub use super::semantic::SemanticRanker;
    pub use super::topics::TopicExtractor;
    pub use nn_core::{Article, Error, Result, TextGenerator};
}
