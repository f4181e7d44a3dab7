use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, OrderList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Order,
    reports::Report,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::{order_service, report_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/checkout", post(checkout))
        .route("/last", get(last_order))
        .route("/{id}", get(get_order))
        .route("/{id}/invoice", get(download_invoice))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed from the cart", body = ApiResponse<Order>),
        (status = 400, description = "Invalid address or empty cart"),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::checkout(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/last",
    responses(
        (status = 200, description = "Most recently placed order", body = ApiResponse<Order>),
        (status = 404, description = "No order placed yet"),
    ),
    tag = "Orders"
)]
pub async fn last_order(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::last_order(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Orders shipped to the session email", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<Order>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::get_order(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/invoice",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Invoice as a text download", body = String, content_type = "text/plain"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn download_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Report> {
    report_service::invoice(&state, &user, &id).await
}
