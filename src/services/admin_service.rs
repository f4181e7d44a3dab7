use crate::{
    audit::log_audit,
    dto::{
        orders::{OrderList, UpdateOrderStatusRequest},
        shared::{BusinessList, MitraList, UserList},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role, ensure_staff},
    models::{BusinessProfile, MitraProfile, Order, SystemMetrics, SystemUser, UserRole},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, Pagination, UserQuery},
    state::AppState,
    storage::keys,
    stores::shared::{
        BusinessDraft, BusinessPatch, MitraDraft, MitraPatch, SystemUserDraft, SystemUserPatch,
    },
};

fn ensure_admin(user: &AuthUser) -> AppResult<()> {
    ensure_role(user, &[UserRole::Admin])
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_staff(user)?;
    let pagination = query.pagination();
    let orders: Vec<Order> = state
        .orders
        .read()
        .await
        .all()
        .iter()
        .filter(|order| query.status.is_none_or(|status| order.status == status))
        .cloned()
        .collect();

    let (items, meta) = pagination.slice(&orders);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_staff(user)?;
    let order = {
        let mut orders = state.orders.write().await;
        let order = orders.update_status(id, payload.status)?.clone();
        state.storage.save(keys::ORDERS, orders.all()).await;
        order
    };

    // keep the thank-you view in step with the order book
    {
        let mut last = state.last_order.write().await;
        if let Some(last_order) = last.as_mut().filter(|o| o.id == order.id) {
            last_order.status = order.status;
            state.storage.save(keys::LAST_ORDER, &*last_order).await;
        }
    }

    log_audit(
        Some(&user.email),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status.as_str() })),
    );
    Ok(ApiResponse::success(
        "Order status updated",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn metrics(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<SystemMetrics>> {
    ensure_staff(user)?;
    let orders = state.orders.read().await;
    let metrics = state.shared.read().await.metrics(orders.all());
    Ok(ApiResponse::success("Metrics", metrics, Some(Meta::empty())))
}

// system users

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: UserQuery,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let pagination = query.pagination();
    let shared = state.shared.read().await;
    let users: Vec<SystemUser> = match query.role {
        Some(role) => shared.users_by_role(role).into_iter().cloned().collect(),
        None => shared.users().to_vec(),
    };

    let (items, meta) = pagination.slice(&users);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: SystemUserDraft,
) -> AppResult<ApiResponse<SystemUser>> {
    ensure_admin(user)?;
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".into()));
    }

    let created = {
        let mut shared = state.shared.write().await;
        if shared.user_by_email(&payload.email).is_some() {
            return Err(AppError::BadRequest("Email is already taken".to_string()));
        }
        let created = shared.add_user(payload);
        state
            .storage
            .save(keys::SYSTEM_USERS, shared.users())
            .await;
        created
    };

    log_audit(
        Some(&user.email),
        "user_create",
        Some("system_users"),
        Some(serde_json::json!({ "user_id": created.id, "role": created.role.as_str() })),
    );
    Ok(ApiResponse::success("User created", created, None))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: SystemUserPatch,
) -> AppResult<ApiResponse<SystemUser>> {
    ensure_admin(user)?;
    let updated = {
        let mut shared = state.shared.write().await;
        let updated = shared.update_user(id, payload)?.clone();
        state
            .storage
            .save(keys::SYSTEM_USERS, shared.users())
            .await;
        updated
    };

    log_audit(
        Some(&user.email),
        "user_update",
        Some("system_users"),
        Some(serde_json::json!({ "user_id": updated.id })),
    );
    Ok(ApiResponse::success("Updated", updated, Some(Meta::empty())))
}

// mitras

pub async fn list_mitras(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<MitraList>> {
    ensure_admin(user)?;
    let shared = state.shared.read().await;
    let (items, meta) = pagination.slice(shared.mitras());
    Ok(ApiResponse::success("Mitras", MitraList { items }, Some(meta)))
}

pub async fn create_mitra(
    state: &AppState,
    user: &AuthUser,
    payload: MitraDraft,
) -> AppResult<ApiResponse<MitraProfile>> {
    ensure_admin(user)?;
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".into()));
    }

    let mitra = {
        let mut shared = state.shared.write().await;
        let mitra = shared.add_mitra(payload);
        state.storage.save(keys::MITRAS, shared.mitras()).await;
        mitra
    };

    log_audit(
        Some(&user.email),
        "mitra_create",
        Some("mitras"),
        Some(serde_json::json!({ "mitra_id": mitra.id })),
    );
    Ok(ApiResponse::success("Mitra created", mitra, None))
}

pub async fn update_mitra(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: MitraPatch,
) -> AppResult<ApiResponse<MitraProfile>> {
    ensure_admin(user)?;
    let mitra = {
        let mut shared = state.shared.write().await;
        let mitra = shared.update_mitra(id, payload)?.clone();
        state.storage.save(keys::MITRAS, shared.mitras()).await;
        mitra
    };

    log_audit(
        Some(&user.email),
        "mitra_update",
        Some("mitras"),
        Some(serde_json::json!({ "mitra_id": mitra.id })),
    );
    Ok(ApiResponse::success("Updated", mitra, Some(Meta::empty())))
}

// businesses

pub async fn list_businesses(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<BusinessList>> {
    ensure_admin(user)?;
    let shared = state.shared.read().await;
    let (items, meta) = pagination.slice(shared.businesses());
    Ok(ApiResponse::success(
        "Businesses",
        BusinessList { items },
        Some(meta),
    ))
}

pub async fn create_business(
    state: &AppState,
    user: &AuthUser,
    payload: BusinessDraft,
) -> AppResult<ApiResponse<BusinessProfile>> {
    ensure_admin(user)?;
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".into()));
    }

    let business = {
        let mut shared = state.shared.write().await;
        let business = shared.add_business(payload);
        state
            .storage
            .save(keys::BUSINESSES, shared.businesses())
            .await;
        business
    };

    log_audit(
        Some(&user.email),
        "business_create",
        Some("businesses"),
        Some(serde_json::json!({ "business_id": business.id })),
    );
    Ok(ApiResponse::success("Business created", business, None))
}

pub async fn update_business(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: BusinessPatch,
) -> AppResult<ApiResponse<BusinessProfile>> {
    ensure_admin(user)?;
    let business = {
        let mut shared = state.shared.write().await;
        let business = shared.update_business(id, payload)?.clone();
        state
            .storage
            .save(keys::BUSINESSES, shared.businesses())
            .await;
        business
    };

    log_audit(
        Some(&user.email),
        "business_update",
        Some("businesses"),
        Some(serde_json::json!({ "business_id": business.id })),
    );
    Ok(ApiResponse::success("Updated", business, Some(Meta::empty())))
}
