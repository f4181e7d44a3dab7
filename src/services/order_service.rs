use crate::{
    audit::log_audit,
    dto::orders::{CheckoutRequest, OrderList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, ShippingAddress},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
    storage::keys,
    stores::OrderDraft,
};

/// Shallow checks mirroring the checkout form.
pub fn validate_address(address: &ShippingAddress) -> AppResult<()> {
    let required = [
        ("full_name", &address.full_name),
        ("email", &address.email),
        ("phone", &address.phone),
        ("address", &address.address),
        ("city", &address.city),
        ("state", &address.state),
        ("pincode", &address.pincode),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }
    if !(address.email.contains('@') && address.email.contains('.')) {
        return Err(AppError::BadRequest("email is invalid".to_string()));
    }
    let pincode = address.pincode.trim();
    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "pincode must be exactly 6 digits".to_string(),
        ));
    }
    Ok(())
}

/// Turns the cart into a pending order: the totals are fixed from the cart
/// as it stands when the request arrives, the configured processing delay
/// elapses, then the order is stored, remembered as the last order and the
/// cart is emptied.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<Order>> {
    let CheckoutRequest { shipping_address } = payload;
    validate_address(&shipping_address)?;

    let draft = {
        let cart = state.cart.read().await;
        if cart.is_empty() {
            return Err(AppError::BadRequest("Cart is empty".to_string()));
        }
        OrderDraft::from_cart(&cart, shipping_address)
    };

    if !state.config.checkout_delay.is_zero() {
        tracing::debug!(delay_ms = %state.config.checkout_delay.as_millis(), "processing order");
        tokio::time::sleep(state.config.checkout_delay).await;
    }

    let order = {
        let mut orders = state.orders.write().await;
        let order = orders.add(draft);
        state.storage.save(keys::ORDERS, orders.all()).await;
        order
    };
    {
        let mut last = state.last_order.write().await;
        *last = Some(order.clone());
        state.storage.save(keys::LAST_ORDER, &order).await;
    }
    {
        let mut cart = state.cart.write().await;
        cart.clear();
        state.storage.save(keys::CART, cart.items()).await;
    }

    log_audit(
        Some(&order.customer_email),
        "order_checkout",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order.id,
            "total_price": order.total_price,
            "total_credits": order.total_credits,
            "payment_method": order.payment_method,
        })),
    );

    Ok(ApiResponse::success(
        "Order placed",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn last_order(state: &AppState) -> AppResult<ApiResponse<Order>> {
    let order = state
        .last_order
        .read()
        .await
        .clone()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Last order", order, None))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let pagination = query.pagination();
    let orders: Vec<Order> = state
        .orders
        .read()
        .await
        .by_customer(&user.email)
        .into_iter()
        .filter(|order| query.status.is_none_or(|status| order.status == status))
        .cloned()
        .collect();

    let (items, meta) = pagination.slice(&orders);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    let order = find_visible_order(state, user, id).await?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

/// Staff see every order; everyone else only orders shipped to their email
/// or the order placed last in this session.
pub(crate) async fn find_visible_order(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<Order> {
    let order = state
        .orders
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let is_last = state
        .last_order
        .read()
        .await
        .as_ref()
        .is_some_and(|last| last.id == order.id);

    if user.role.is_staff() || order.customer_email == user.email || is_last {
        Ok(order)
    } else {
        Err(AppError::NotFound)
    }
}
