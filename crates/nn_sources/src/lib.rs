pub mod newsapi;

pub use newsapi::{NewsApiConfig, NewsApiSource};

pub mod prelude {
    pub use super::newsapi::{NewsApiConfig, NewsApiSource};
    pub use nn_core::{Article, ArticlePage, ArticleSource, Category, Error, Result};
}
