//! HTTP surface: router, response envelopes, and error mapping.

pub mod handlers;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::StoreError;
use crate::storage::ArticleStore;

/// Shared handler state. The store is injected explicitly, never global, so
/// tests can run against independent instances.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArticleStore>,
}

impl AppState {
    pub fn new(store: Arc<ArticleStore>) -> Self {
        Self { store }
    }
}

/// Success envelope used by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Transport-facing wrapper around the store error taxonomy.
#[derive(Debug)]
pub struct WebError(StoreError);

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            StoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Article not found".to_string()),
            StoreError::Corrupt(msg) | StoreError::Persistence(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type WebResult<T> = std::result::Result<T, WebError>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
