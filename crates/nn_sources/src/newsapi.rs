use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use nn_core::{Article, ArticlePage, ArticleSource, Category, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Clone)]
pub struct NewsApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub country: String,
    pub timeout: Duration,
}

impl NewsApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            country: "us".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("country", &self.country)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSourceRef>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceRef {
    name: Option<String>,
}

impl NewsApiArticle {
    /// Articles without a URL have no identity and are skipped.
    fn normalize(self, category: Option<Category>) -> Option<Article> {
        let url = self.url.filter(|u| !u.is_empty())?;
        Some(Article {
            id: url.clone(),
            title: self.title.unwrap_or_default(),
            description: self.description,
            content: self.content,
            url,
            url_to_image: self.url_to_image,
            published_at: self.published_at.unwrap_or_default(),
            source: self.source.and_then(|s| s.name).unwrap_or_default(),
            author: self.author,
            category,
        })
    }
}

/// Article source backed by the newsapi.org v2 REST API.
pub struct NewsApiSource {
    client: Client,
    base_url: Url,
    api_key: String,
    country: String,
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("country", &self.country)
            .finish()
    }
}

impl NewsApiSource {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Source("NewsAPI key is required".to_string()));
        }
        let client = Client::builder().timeout(config.timeout).build()?;

        // Url::join replaces the last segment unless the base ends with a slash.
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| Error::Source(format!("Invalid NewsAPI URL {}: {}", base, e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            country: config.country,
        })
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<NewsApiResponse> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| Error::Source(format!("Invalid NewsAPI endpoint {}: {}", endpoint, e)))?;

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<NewsApiResponse>()
            .await?;
        Ok(response)
    }

    async fn top_headlines(&self, category: Category, page: u32, page_size: u32) -> Result<NewsApiResponse> {
        self.get(
            "top-headlines",
            &[
                ("category", category.to_string()),
                ("country", self.country.clone()),
                ("pageSize", page_size.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }
}

fn normalize_all(articles: Vec<NewsApiArticle>, category: Option<Category>) -> Vec<Article> {
    articles
        .into_iter()
        .filter_map(|a| a.normalize(category))
        .collect()
}

/// Newest first; unparseable timestamps go last.
fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by_cached_key(|a| std::cmp::Reverse(a.published_at_utc().unwrap_or(DateTime::<Utc>::MIN_UTC)));
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn latest(&self, page: u32, limit: u32) -> Result<ArticlePage> {
        let per_category = limit.div_ceil(Category::ALL.len() as u32).max(1);

        let fetches = Category::ALL
            .iter()
            .map(|&category| async move { (category, self.top_headlines(category, page, per_category).await) });

        let mut articles = Vec::new();
        for (category, result) in join_all(fetches).await {
            match result {
                Ok(response) => articles.extend(normalize_all(response.articles, Some(category))),
                Err(e) => warn!("⚠️ Failed to fetch {} headlines: {}", category, e),
            }
        }

        sort_newest_first(&mut articles);
        articles.truncate(limit as usize);
        info!("📰 Fetched {} latest articles", articles.len());

        Ok(ArticlePage {
            total_results: articles.len() as u64,
            articles,
        })
    }

    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<ArticlePage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("Search query is required".to_string()));
        }

        let response = self
            .get(
                "everything",
                &[
                    ("q", query.to_string()),
                    ("pageSize", limit.to_string()),
                    ("page", page.to_string()),
                    ("sortBy", "relevancy".to_string()),
                ],
            )
            .await?;
        debug!("Search for {:?} matched {} articles", query, response.total_results);

        Ok(ArticlePage {
            total_results: response.total_results,
            articles: normalize_all(response.articles, None),
        })
    }

    async fn by_category(&self, category: Category, page: u32, limit: u32) -> Result<ArticlePage> {
        let response = self.top_headlines(category, page, limit).await?;
        Ok(ArticlePage {
            total_results: response.total_results,
            articles: normalize_all(response.articles, Some(category)),
        })
    }
}
