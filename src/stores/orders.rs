use chrono::Utc;

use crate::models::{CartItem, Order, OrderStatus, PaymentMethod, ShippingAddress};

use super::{Cart, StoreError, next_id};

/// Everything an order carries except its id and creation time.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<CartItem>,
    pub total_price: i64,
    pub total_credits: i64,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub customer_email: String,
}

impl OrderDraft {
    /// Snapshot the cart into a pending order. Totals are fixed here and are
    /// never recomputed afterwards.
    pub fn from_cart(cart: &Cart, shipping_address: ShippingAddress) -> Self {
        let items = cart.items().to_vec();
        Self {
            total_price: cart.total_price(),
            total_credits: cart.total_credits(),
            payment_method: payment_label(&items).to_string(),
            customer_email: shipping_address.email.clone(),
            status: OrderStatus::Pending,
            items,
            shipping_address,
        }
    }
}

/// `COD` for cash-only carts, `Credits` for credit-only carts, `Mixed` otherwise.
pub fn payment_label(items: &[CartItem]) -> &'static str {
    let has_cash = items
        .iter()
        .any(|item| item.payment_method == PaymentMethod::Cash);
    let has_credits = items
        .iter()
        .any(|item| item.payment_method == PaymentMethod::Credits);
    match (has_cash, has_credits) {
        (true, true) => "Mixed",
        (false, true) => "Credits",
        _ => "COD",
    }
}

/// Placed orders, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn by_customer(&self, email: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.customer_email == email)
            .collect()
    }

    pub fn add(&mut self, draft: OrderDraft) -> Order {
        let id = next_id("ORD", self.orders.iter().map(|order| order.id.as_str()));
        let order = Order {
            id,
            items: draft.items,
            total_price: draft.total_price,
            total_credits: draft.total_credits,
            status: draft.status,
            created_at: Utc::now(),
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            customer_email: draft.customer_email,
        };
        self.orders.insert(0, order.clone());
        order
    }

    pub fn update_status(&mut self, id: &str, status: OrderStatus) -> Result<&Order, StoreError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| StoreError::not_found("order", id))?;
        order.status = status;
        Ok(order)
    }
}
