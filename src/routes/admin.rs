use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::{
        orders::{OrderList, UpdateOrderStatusRequest},
        shared::{BusinessList, MitraList, UserList},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{BusinessProfile, MitraProfile, Order, SystemMetrics, SystemUser},
    response::ApiResponse,
    routes::params::{OrderListQuery, Pagination, UserQuery},
    services::admin_service,
    state::AppState,
    stores::shared::{
        BusinessDraft, BusinessPatch, MitraDraft, MitraPatch, SystemUserDraft, SystemUserPatch,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/metrics", get(system_metrics))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", patch(update_user))
        .route("/mitras", get(list_mitras).post(create_mitra))
        .route("/mitras/{id}", patch(update_mitra))
        .route("/businesses", get(list_businesses).post(create_business))
        .route("/businesses/{id}", patch(update_business))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "All orders (admin/team)", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Update order status", body = ApiResponse<Order>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/metrics",
    responses(
        (status = 200, description = "Platform-wide figures", body = ApiResponse<SystemMetrics>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn system_metrics(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SystemMetrics>>> {
    let resp = admin_service::metrics(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("role" = Option<String>, Query, description = "customer, team, mitra, business, admin")
    ),
    responses(
        (status = 200, description = "System users", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = admin_service::list_users(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = SystemUserDraft,
    responses(
        (status = 200, description = "Create system user", body = ApiResponse<SystemUser>),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SystemUserDraft>,
) -> AppResult<Json<ApiResponse<SystemUser>>> {
    let resp = admin_service::create_user(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = SystemUserPatch,
    responses(
        (status = 200, description = "Update system user", body = ApiResponse<SystemUser>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<SystemUserPatch>,
) -> AppResult<Json<ApiResponse<SystemUser>>> {
    let resp = admin_service::update_user(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/mitras",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Mitra profiles", body = ApiResponse<MitraList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_mitras(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<MitraList>>> {
    let resp = admin_service::list_mitras(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/mitras",
    request_body = MitraDraft,
    responses(
        (status = 200, description = "Create mitra profile", body = ApiResponse<MitraProfile>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_mitra(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<MitraDraft>,
) -> AppResult<Json<ApiResponse<MitraProfile>>> {
    let resp = admin_service::create_mitra(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/mitras/{id}",
    params(
        ("id" = String, Path, description = "Mitra ID")
    ),
    request_body = MitraPatch,
    responses(
        (status = 200, description = "Update mitra profile", body = ApiResponse<MitraProfile>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_mitra(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<MitraPatch>,
) -> AppResult<Json<ApiResponse<MitraProfile>>> {
    let resp = admin_service::update_mitra(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/businesses",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Business profiles", body = ApiResponse<BusinessList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_businesses(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<BusinessList>>> {
    let resp = admin_service::list_businesses(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/businesses",
    request_body = BusinessDraft,
    responses(
        (status = 200, description = "Create business profile", body = ApiResponse<BusinessProfile>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_business(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BusinessDraft>,
) -> AppResult<Json<ApiResponse<BusinessProfile>>> {
    let resp = admin_service::create_business(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/businesses/{id}",
    params(
        ("id" = String, Path, description = "Business ID")
    ),
    request_body = BusinessPatch,
    responses(
        (status = 200, description = "Update business profile", body = ApiResponse<BusinessProfile>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_business(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<BusinessPatch>,
) -> AppResult<Json<ApiResponse<BusinessProfile>>> {
    let resp = admin_service::update_business(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}
