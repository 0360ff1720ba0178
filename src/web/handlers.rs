use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::core::{Article, ArticleDraft, ArticleUpdate, StoreError};
use crate::web::{ApiResponse, AppState, WebResult};

pub async fn index() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message_only(
        "Welcome to the article API. Use /articles for CRUD operations.",
    ))
}

pub async fn list_articles(State(state): State<AppState>) -> Json<ApiResponse<Vec<Article>>> {
    let articles = state.store.list().await;
    Json(ApiResponse::new("Articles retrieved successfully", articles))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> WebResult<Json<ApiResponse<Article>>> {
    let article = state.store.get(id).await?;
    Ok(Json(ApiResponse::new(
        "Article retrieved successfully",
        article,
    )))
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(draft): Json<ArticleDraft>,
) -> WebResult<(StatusCode, Json<ApiResponse<Article>>)> {
    let article = state.store.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Article created successfully", article)),
    ))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<ArticleUpdate>,
) -> WebResult<Json<ApiResponse<Article>>> {
    let article = state.store.update(id, patch).await?;
    Ok(Json(ApiResponse::new(
        "Article updated successfully",
        article,
    )))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> WebResult<Json<ApiResponse<()>>> {
    if !state.store.delete(id).await {
        return Err(StoreError::NotFound(id).into());
    }
    Ok(Json(ApiResponse::message_only("Article deleted successfully")))
}
