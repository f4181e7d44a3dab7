use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus, ShippingAddress};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
