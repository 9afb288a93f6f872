use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiQuery};
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/news", get(handlers::latest_news))
        .route("/api/news/search", get(handlers::search_news))
        .route("/api/news/category/:category", get(handlers::news_by_category))
        .route("/api/recommendations", post(handlers::recommend))
        .route("/api/recommendations/ai", post(handlers::recommend_by_query))
        .route("/api/recommendations/topics", get(handlers::trending_topics))
        .route(
            "/api/user/preferences/:user_id",
            get(handlers::get_preferences).post(handlers::update_preferences),
        )
        .route(
            "/api/user/read/:user_id",
            get(handlers::read_articles).post(handlers::mark_read),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> nn_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Server running on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use nn_core::{Article, Error, Result};
}
