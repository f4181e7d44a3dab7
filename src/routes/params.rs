use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    models::{CollectionStatus, OrderStatus, UserRole},
    response::Meta,
    stores::ProductSort,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }

    /// Cut one page out of an in-memory list.
    pub fn slice<T: Clone>(&self, items: &[T]) -> (Vec<T>, Meta) {
        let (page, per_page, offset) = self.normalize();
        let page_items = items
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        (page_items, Meta::new(page, per_page, items.len() as i64))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<ProductSort>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<OrderStatus>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CollectionQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matches business name, waste type or location.
    pub q: Option<String>,
    pub status: Option<CollectionStatus>,
}

impl CollectionQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub role: Option<UserRole>,
}

impl UserQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}
