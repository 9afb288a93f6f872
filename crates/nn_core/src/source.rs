use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Article, Category};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total_results: u64,
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns the name of the upstream feed
    fn name(&self) -> &str;

    /// Latest headlines across every category, newest first
    async fn latest(&self, page: u32, limit: u32) -> Result<ArticlePage>;

    /// Free-text search
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<ArticlePage>;

    /// Headlines for a single category
    async fn by_category(&self, category: Category, page: u32, limit: u32) -> Result<ArticlePage>;
}
