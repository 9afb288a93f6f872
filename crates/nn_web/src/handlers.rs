use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use nn_core::{Article, ArticlePage, Category, PreferencesUpdate, ScoredArticle, UserPreferences};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::AppState;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchParams {
    fn paging(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub user_preferences: Option<UserPreferences>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SemanticRequest {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRequest {
    pub article_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Recommendations<T> {
    pub recommendations: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: UserPreferences,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "NewsNexus API is running" }))
}

pub async fn latest_news(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<ArticlePage>> {
    let page = state.source.latest(params.page(), params.limit()).await?;
    Ok(Json(page))
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<ArticlePage>> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Search query is required"))?;
    let paging = params.paging();
    let page = state.source.search(query, paging.page(), paging.limit()).await?;
    Ok(Json(page))
}

pub async fn news_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<ArticlePage>> {
    let category: Category = category.parse()?;
    let page = state
        .source
        .by_category(category, params.page(), params.limit())
        .await?;
    Ok(Json(page))
}

pub async fn recommend(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> ApiResult<Json<Recommendations<ScoredArticle>>> {
    let preferences = match (request.user_preferences, request.user_id) {
        (Some(preferences), _) => preferences,
        (None, Some(user_id)) => state.store.get_preferences(&user_id).await?,
        (None, None) => return Err(ApiError::bad_request("User preferences required")),
    };

    let batch = state.source.latest(1, state.config.recommendation_batch).await?;
    let mut ranked = state.ranker.rank(&batch.articles, &preferences);
    ranked.truncate(state.config.page_size);
    info!("⭐ Recommending {} of {} articles", ranked.len(), batch.articles.len());

    Ok(Json(Recommendations { recommendations: ranked }))
}

pub async fn recommend_by_query(
    State(state): State<Arc<AppState>>,
    request: Option<ApiJson<SemanticRequest>>,
) -> ApiResult<Json<Recommendations<Article>>> {
    // A missing or unreadable body is reported the same way as a missing query.
    let query = request
        .and_then(|ApiJson(request)| request.query)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query required"))?;

    let batch = state.source.latest(1, state.config.semantic_batch).await?;
    let recommendations = state.semantic.rank_by_query(&batch.articles, &query).await?;

    Ok(Json(Recommendations { recommendations }))
}

pub async fn trending_topics(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let batch = state.source.latest(1, state.config.topic_batch).await?;
    let topics = state.topics.extract_topics(&batch.articles).await;
    Ok(Json(json!({ "topics": topics })))
}

pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<PreferencesResponse>> {
    let preferences = state.store.get_preferences(&user_id).await?;
    Ok(Json(PreferencesResponse { preferences }))
}

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(update): ApiJson<PreferencesUpdate>,
) -> ApiResult<Json<PreferencesResponse>> {
    let preferences = state.store.update_preferences(&user_id, update).await?;
    Ok(Json(PreferencesResponse { preferences }))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<ReadRequest>,
) -> ApiResult<Json<Value>> {
    let article_id = request
        .article_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Article id required"))?;
    state.store.mark_read(&user_id, &article_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn read_articles(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let read = state.store.read_articles(&user_id).await?;
    Ok(Json(json!({ "readArticles": read })))
}
