use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::shared::{AddContributionRequest, CertificateList, CollectionList, ContributionList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::WasteContribution,
    reports::Report,
    response::ApiResponse,
    routes::params::Pagination,
    services::business_service,
    state::AppState,
    stores::shared::ContributionPatch,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/contributions",
            get(list_contributions).post(add_contribution),
        )
        .route("/contributions/{id}", patch(update_contribution))
        .route("/collections", get(list_collections))
        .route("/certificates", get(list_certificates))
        .route("/certificates/{id}", get(download_certificate))
        .route("/report", get(download_report))
}

#[utoipa::path(
    get,
    path = "/api/business/contributions",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Waste contributions of this business", body = ApiResponse<ContributionList>),
        (status = 404, description = "No business profile for the session email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn list_contributions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ContributionList>>> {
    let resp = business_service::list_contributions(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/business/contributions",
    request_body = AddContributionRequest,
    responses(
        (status = 200, description = "Contribution recorded", body = ApiResponse<WasteContribution>),
        (status = 400, description = "Bad request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn add_contribution(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddContributionRequest>,
) -> AppResult<Json<ApiResponse<WasteContribution>>> {
    let resp = business_service::add_contribution(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/business/contributions/{id}",
    params(
        ("id" = String, Path, description = "Contribution ID")
    ),
    request_body = ContributionPatch,
    responses(
        (status = 200, description = "Contribution updated", body = ApiResponse<WasteContribution>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn update_contribution(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ContributionPatch>,
) -> AppResult<Json<ApiResponse<WasteContribution>>> {
    let resp = business_service::update_contribution(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/business/collections",
    operation_id = "business_list_collections",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Pickups at this business", body = ApiResponse<CollectionList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn list_collections(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CollectionList>>> {
    let resp = business_service::list_collections(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/business/certificates",
    responses(
        (status = 200, description = "Sustainability certificates", body = ApiResponse<CertificateList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn list_certificates(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CertificateList>>> {
    let resp = business_service::list_certificates(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/business/certificates/{id}",
    params(
        ("id" = String, Path, description = "Certificate ID")
    ),
    responses(
        (status = 200, description = "Certificate download", body = String, content_type = "text/plain"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn download_certificate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Report> {
    business_service::certificate_download(&state, &user, &id).await
}

#[utoipa::path(
    get,
    path = "/api/business/report",
    operation_id = "business_report",
    responses(
        (status = 200, description = "Sustainability summary download", body = String, content_type = "text/plain"),
        (status = 404, description = "No business profile for the session email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn download_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Report> {
    business_service::summary_report(&state, &user).await
}
