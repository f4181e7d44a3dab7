use axum::{Router, extract::State, routing::get};

use crate::{
    error::AppResult, middleware::auth::AuthUser, reports::Report, services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/report", get(download_report))
}

#[utoipa::path(
    get,
    path = "/api/customer/report",
    operation_id = "customer_report",
    responses(
        (status = 200, description = "Customer data report download", body = String, content_type = "text/plain"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Customer"
)]
pub async fn download_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Report> {
    report_service::customer_data(&state, &user).await
}
