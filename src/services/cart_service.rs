//! The session cart. There is one visitor per process, so the cart is not
//! keyed by user and needs no session.

use crate::{
    audit::log_audit,
    dto::cart::{AddToCartRequest, CartView, UpdateQuantityRequest},
    error::{AppError, AppResult},
    models::PaymentMethod,
    stores::cart::MAX_LINE_QUANTITY,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::keys,
    stores::Cart,
};

fn view(cart: &Cart) -> CartView {
    CartView {
        items: cart.items().to_vec(),
        total_price: cart.total_price(),
        total_credits: cart.total_credits(),
        item_count: cart.item_count(),
    }
}

pub async fn view_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let cart = state.cart.read().await;
    Ok(ApiResponse::success("OK", view(&cart), Some(Meta::empty())))
}

pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    if !(1..=MAX_LINE_QUANTITY).contains(&payload.quantity) {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )));
    }

    let product = state
        .products
        .read()
        .await
        .get(&payload.product_id)
        .cloned()
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;
    if !product.in_stock {
        return Err(AppError::BadRequest("product is out of stock".to_string()));
    }

    let data = {
        let mut cart = state.cart.write().await;
        cart.add(product, payload.quantity, payload.payment_method)?;
        state.storage.save(keys::CART, cart.items()).await;
        view(&cart)
    };

    log_audit(
        None,
        "cart_add",
        Some("cart"),
        Some(serde_json::json!({
            "product_id": payload.product_id,
            "quantity": payload.quantity,
            "payment_method": payload.payment_method.label(),
        })),
    );
    Ok(ApiResponse::success("Added to cart", data, None))
}

/// Sets the quantity of one line; zero or below drops the line.
pub async fn update_quantity(
    state: &AppState,
    product_id: &str,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_LINE_QUANTITY}"
        )));
    }

    let data = {
        let mut cart = state.cart.write().await;
        cart.update_quantity(product_id, payload.payment_method, payload.quantity)?;
        state.storage.save(keys::CART, cart.items()).await;
        view(&cart)
    };

    log_audit(
        None,
        "cart_update",
        Some("cart"),
        Some(serde_json::json!({
            "product_id": product_id,
            "quantity": payload.quantity,
            "payment_method": payload.payment_method.label(),
        })),
    );
    Ok(ApiResponse::success("Cart updated", data, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    product_id: &str,
    method: PaymentMethod,
) -> AppResult<ApiResponse<CartView>> {
    let data = {
        let mut cart = state.cart.write().await;
        if !cart.remove(product_id, method) {
            return Err(AppError::NotFound);
        }
        state.storage.save(keys::CART, cart.items()).await;
        view(&cart)
    };

    log_audit(
        None,
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id, "payment_method": method.label() })),
    );
    Ok(ApiResponse::success(
        "Removed from cart",
        data,
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let data = {
        let mut cart = state.cart.write().await;
        cart.clear();
        state.storage.save(keys::CART, cart.items()).await;
        view(&cart)
    };

    log_audit(None, "cart_clear", Some("cart"), None);
    Ok(ApiResponse::success("Cart cleared", data, Some(Meta::empty())))
}
