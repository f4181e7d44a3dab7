use std::{cmp::Ordering, collections::BTreeMap};

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Product;

use super::{StoreError, next_id};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub credits: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlight: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub specifications: Option<BTreeMap<String, String>>,
}

fn default_in_stock() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub credits: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub highlight: Option<String>,
    pub rating: Option<f64>,
    pub in_stock: Option<bool>,
    pub specifications: Option<BTreeMap<String, String>>,
}

impl ProductPatch {
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(credits) = self.credits {
            product.credits = credits;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(highlight) = self.highlight {
            product.highlight = highlight;
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(specifications) = self.specifications {
            product.specifications = Some(specifications);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Rating,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: ProductSort,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    /// Shop listing: substring search over name, description and category,
    /// optional category filter (`All` means none), then sort.
    pub fn search(&self, filter: &ProductFilter) -> Vec<Product> {
        let query = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let category = filter
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "All");

        let mut found: Vec<Product> = self
            .products
            .iter()
            .filter(|product| match &query {
                Some(q) => {
                    product.name.to_lowercase().contains(q)
                        || product.description.to_lowercase().contains(q)
                        || product.category.to_lowercase().contains(q)
                }
                None => true,
            })
            .filter(|product| category.is_none_or(|c| product.category == c))
            .cloned()
            .collect();

        match filter.sort {
            ProductSort::Name => found.sort_by(|a, b| a.name.cmp(&b.name)),
            ProductSort::PriceLow => found.sort_by_key(|p| p.price),
            ProductSort::PriceHigh => found.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Rating => found.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
            }),
        }
        found
    }

    pub fn add(&mut self, draft: ProductDraft) -> Product {
        let id = next_id("prod", self.products.iter().map(|p| p.id.as_str()));
        let product = Product {
            id,
            name: draft.name,
            category: draft.category,
            price: draft.price,
            credits: draft.credits,
            image: draft.image,
            description: draft.description,
            highlight: draft.highlight,
            rating: draft.rating,
            in_stock: draft.in_stock,
            specifications: draft.specifications,
        };
        self.products.insert(0, product.clone());
        product
    }

    pub fn update(&mut self, id: &str, patch: ProductPatch) -> Result<&Product, StoreError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| StoreError::not_found("product", id))?;
        patch.apply(product);
        Ok(product)
    }

    pub fn delete(&mut self, id: &str) -> Result<Product, StoreError> {
        let idx = self
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| StoreError::not_found("product", id))?;
        Ok(self.products.remove(idx))
    }
}
