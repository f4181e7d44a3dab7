use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::shared::{CollectionList, LogCollectionRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Collection,
    reports::Report,
    response::ApiResponse,
    routes::params::CollectionQuery,
    services::mitra_service,
    state::AppState,
    stores::shared::CollectionPatch,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/collections", get(list_collections).post(log_collection))
        .route("/collections/{id}", patch(update_collection))
        .route("/report", get(download_report))
}

#[utoipa::path(
    get,
    path = "/api/mitra/collections",
    operation_id = "mitra_list_collections",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search business, waste type and location"),
        ("status" = Option<String>, Query, description = "scheduled, in-progress, completed, cancelled")
    ),
    responses(
        (status = 200, description = "Collections logged by this mitra", body = ApiResponse<CollectionList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No mitra profile for the session email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mitra"
)]
pub async fn list_collections(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CollectionQuery>,
) -> AppResult<Json<ApiResponse<CollectionList>>> {
    let resp = mitra_service::list_collections(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/mitra/collections",
    request_body = LogCollectionRequest,
    responses(
        (status = 200, description = "Collection logged", body = ApiResponse<Collection>),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Business or mitra profile not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mitra"
)]
pub async fn log_collection(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<LogCollectionRequest>,
) -> AppResult<Json<ApiResponse<Collection>>> {
    let resp = mitra_service::log_collection(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/mitra/collections/{id}",
    params(
        ("id" = String, Path, description = "Collection ID")
    ),
    request_body = CollectionPatch,
    responses(
        (status = 200, description = "Collection updated", body = ApiResponse<Collection>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mitra"
)]
pub async fn update_collection(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CollectionPatch>,
) -> AppResult<Json<ApiResponse<Collection>>> {
    let resp = mitra_service::update_collection(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/mitra/report",
    operation_id = "mitra_report",
    responses(
        (status = 200, description = "Performance report download", body = String, content_type = "text/plain"),
        (status = 404, description = "No mitra profile for the session email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mitra"
)]
pub async fn download_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Report> {
    mitra_service::performance_report(&state, &user).await
}
