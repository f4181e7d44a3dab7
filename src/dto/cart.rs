use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CartItem, PaymentMethod};

fn default_quantity() -> i64 {
    1
}

fn default_payment_method() -> PaymentMethod {
    PaymentMethod::Cash
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartLineQuery {
    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_price: i64,
    pub total_credits: i64,
    pub item_count: i64,
}
