use crate::models::{CartItem, PaymentMethod, Product};

use super::StoreError;

/// Most units a single cart line can hold.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

fn line_amount(product: &Product, method: PaymentMethod, quantity: i64) -> Option<i64> {
    match method {
        PaymentMethod::Cash => product.price.checked_mul(quantity),
        PaymentMethod::Credits => product.credits.checked_mul(quantity),
    }
}

/// Session cart. A product can sit in the cart twice, once per payment
/// method; `(product id, payment method)` identifies a line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        // drop anything a hand-edited storage file might carry in
        let items = items
            .into_iter()
            .filter(|item| (1..=MAX_LINE_QUANTITY).contains(&item.quantity))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &str, method: PaymentMethod) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.id == product_id && item.payment_method == method)
    }

    pub fn get(&self, product_id: &str, method: PaymentMethod) -> Option<&CartItem> {
        self.position(product_id, method).map(|idx| &self.items[idx])
    }

    /// Adds `quantity` units, merging into an existing line for the same
    /// product and payment method. The cart is left untouched when the
    /// merged line would exceed [`MAX_LINE_QUANTITY`].
    pub fn add(
        &mut self,
        product: Product,
        quantity: i64,
        method: PaymentMethod,
    ) -> Result<&CartItem, StoreError> {
        if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
            return Err(StoreError::InvalidQuantity(quantity));
        }

        let idx = match self.position(&product.id, method) {
            Some(idx) => {
                let merged = self.items[idx]
                    .quantity
                    .checked_add(quantity)
                    .filter(|q| *q <= MAX_LINE_QUANTITY)
                    .ok_or(StoreError::InvalidQuantity(quantity))?;
                line_amount(&product, method, merged)
                    .ok_or(StoreError::TotalOverflow("cart line amount"))?;
                self.items[idx].quantity = merged;
                idx
            }
            None => {
                line_amount(&product, method, quantity)
                    .ok_or(StoreError::TotalOverflow("cart line amount"))?;
                self.items.push(CartItem {
                    product,
                    quantity,
                    payment_method: method,
                });
                self.items.len() - 1
            }
        };
        Ok(&self.items[idx])
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str, method: PaymentMethod) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| !(item.product.id == product_id && item.payment_method == method));
        self.items.len() != before
    }

    /// Sets a line's quantity. Zero or below removes the line and yields `None`.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        method: PaymentMethod,
        quantity: i64,
    ) -> Result<Option<&CartItem>, StoreError> {
        let Some(idx) = self.position(product_id, method) else {
            return Err(StoreError::not_found("cart item", product_id));
        };

        if quantity <= 0 {
            self.items.remove(idx);
            return Ok(None);
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        let item = &self.items[idx];
        line_amount(&item.product, method, quantity)
            .ok_or(StoreError::TotalOverflow("cart line amount"))?;

        self.items[idx].quantity = quantity;
        Ok(Some(&self.items[idx]))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_price(&self) -> i64 {
        self.items
            .iter()
            .map(CartItem::cash_amount)
            .fold(0, i64::saturating_add)
    }

    pub fn total_credits(&self) -> i64 {
        self.items
            .iter()
            .map(CartItem::credit_amount)
            .fold(0, i64::saturating_add)
    }

    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.quantity)
            .fold(0, i64::saturating_add)
    }
}
