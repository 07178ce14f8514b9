//! # API REST
//!
//! REST API for the custom content endpoints.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! All content logic lives in `content-core`; handlers here only extract parameters and map
//! results onto HTTP responses.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CategoryPostsRes, ErrorData, ErrorRes, HealthRes, HealthService, MenuNode, MessageRes,
    ProjectedPost,
};
use content_core::{ContentError, ContentService};

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    content_service: Arc<ContentService>,
}

impl AppState {
    pub fn new(content_service: ContentService) -> Self {
        Self {
            content_service: Arc::new(content_service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, menu_with_submenus, search, category_posts),
    components(schemas(
        HealthRes,
        MenuNode,
        ProjectedPost,
        CategoryPostsRes,
        ErrorRes,
        ErrorData,
        MessageRes,
    ))
)]
pub struct ApiDoc;

/// Build the application router with CORS and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/custom-api/v1/menu/:id", get(menu_with_submenus))
        .route("/custom/v1/search", get(search))
        .route("/custom-api/v1/category-posts", get(category_posts))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(no_route)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Errors returned by the REST handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The path does not name any endpoint.
    NoRoute,
    Content(ContentError),
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        ApiError::Content(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::NoRoute => {
                let body = ErrorRes::new(
                    "rest_no_route",
                    "No route was found matching the URL and request method.",
                    StatusCode::NOT_FOUND.as_u16(),
                );
                return (StatusCode::NOT_FOUND, Json(body)).into_response();
            }
            ApiError::Content(err) => err,
        };

        let status =
            StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !err.is_client_error() {
            tracing::error!("content request failed: {:?}", err);
            let body = ErrorRes::new(err.code(), "Internal error", status.as_u16());
            return (status, Json(body)).into_response();
        }

        tracing::debug!("content request rejected: {}", err);

        // The search endpoint has always answered "no results" with a bare message body.
        if let ContentError::NoSearchResults = err {
            let body = MessageRes {
                message: err.to_string(),
            };
            return (status, Json(body)).into_response();
        }

        let body = ErrorRes::new(err.code(), err.to_string(), status.as_u16());
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Text the post title must contain.
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryPostsParams {
    /// Text the category name must contain.
    pub category_title: Option<String>,
    /// 1-based page number (default 1).
    pub paged: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/custom-api/v1/menu/{id}",
    params(
        ("id" = u64, Path, description = "Menu identifier")
    ),
    responses(
        (status = 200, description = "Menu entries with nested submenus", body = [MenuNode]),
        (status = 404, description = "Menu not found", body = ErrorRes),
        (status = 500, description = "Menu items do not form a tree", body = ErrorRes)
    )
)]
/// Fetch a navigation menu with its submenus
///
/// Only all-digit ids name a menu; any other path segment is answered as an unknown route.
///
/// # Errors
/// - `404 no_menu` if the menu has no items
/// - `404 rest_no_route` if `id` is not a number
/// - `500 menu_malformed` if the stored items loop or nest too deeply
async fn menu_with_submenus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MenuNode>>, ApiError> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NoRoute);
    }
    // All digits, so the only possible failure is overflow, which cannot name a stored menu.
    let menu_id = id.parse::<u64>().map_err(|_| ContentError::NoMenu)?;

    let tree = state.content_service.menu_with_submenus(menu_id)?;
    Ok(Json(tree))
}

#[utoipa::path(
    get,
    path = "/custom/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching published posts", body = [ProjectedPost]),
        (status = 400, description = "Missing or empty query", body = ErrorRes),
        (status = 404, description = "No results found", body = MessageRes)
    )
)]
/// Search published posts by title
///
/// # Errors
/// - `400 rest_missing_callback_param` if `query` is absent
/// - `400 rest_invalid_param` if `query` is empty after sanitising
/// - `404 {message}` if nothing matches
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProjectedPost>>, ApiError> {
    let posts = state.content_service.search(params.query.as_deref())?;
    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/custom-api/v1/category-posts",
    params(CategoryPostsParams),
    responses(
        (status = 200, description = "One page of posts in the category", body = CategoryPostsRes),
        (status = 400, description = "Category title is required", body = ErrorRes),
        (status = 404, description = "Category not found, or no posts on that page", body = ErrorRes)
    )
)]
/// Fetch posts by category title
///
/// # Errors
/// - `400 no_category_title` if `category_title` is absent or empty
/// - `404 category_not_found` if no category name contains the title
/// - `404 no_posts` if the requested page is empty
async fn category_posts(
    State(state): State<AppState>,
    Query(params): Query<CategoryPostsParams>,
) -> Result<Json<CategoryPostsRes>, ApiError> {
    let res = state
        .content_service
        .category_posts(params.category_title.as_deref(), params.paged.as_deref())?;
    Ok(Json(res))
}

async fn no_route() -> ApiError {
    ApiError::NoRoute
}
