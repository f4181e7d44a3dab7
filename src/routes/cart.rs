use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::cart::{AddToCartRequest, CartLineQuery, CartView, UpdateQuantityRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).post(add_to_cart).delete(clear_cart))
        .route(
            "/{product_id}",
            patch(update_quantity).delete(remove_from_cart),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines with totals", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view_cart(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add to cart, merging same product and payment method", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown or out-of-stock product, or bad quantity"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_to_cart(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity set; zero or below removes the line", body = ApiResponse<CartView>),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(&state, &product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID"),
        ("payment_method" = Option<String>, Query, description = "cash (default) or credits")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(query): Query<CartLineQuery>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_from_cart(&state, &product_id, query.payment_method).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state).await?;
    Ok(Json(resp))
}
