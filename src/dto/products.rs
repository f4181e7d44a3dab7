use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<String>,
}
