use chrono::Utc;

use crate::{
    audit::log_audit,
    error::AppResult,
    middleware::auth::AuthUser,
    reports::{self, Report},
    services::order_service::find_visible_order,
    state::AppState,
};

pub async fn invoice(state: &AppState, user: &AuthUser, order_id: &str) -> AppResult<Report> {
    let order = find_visible_order(state, user, order_id).await?;
    let report = reports::invoice(&order, Utc::now());
    log_audit(
        Some(&user.email),
        "invoice_download",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    );
    Ok(report)
}

/// Everything the store holds about the signed-in visitor.
pub async fn customer_data(state: &AppState, user: &AuthUser) -> AppResult<Report> {
    let orders = state.orders.read().await;
    let mine = orders.by_customer(&user.email);
    let cart_items = state.cart.read().await.item_count();

    let report = reports::customer_data(&user.name, &user.email, &mine, cart_items, Utc::now());
    log_audit(
        Some(&user.email),
        "report_download",
        Some("customer_report"),
        Some(serde_json::json!({ "filename": report.filename })),
    );
    Ok(report)
}
