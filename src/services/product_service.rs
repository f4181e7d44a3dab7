use crate::{
    audit::log_audit,
    dto::products::{CategoryList, ProductList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
    storage::keys,
    stores::{ProductDraft, ProductFilter, ProductPatch},
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let pagination = query.pagination();
    let filter = ProductFilter {
        q: query.q,
        category: query.category,
        sort: query.sort_by.unwrap_or_default(),
    };

    let matches = state.products.read().await.search(&filter);
    let (items, meta) = pagination.slice(&matches);

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.products.read().await.categories();
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state
        .products
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductDraft,
) -> AppResult<ApiResponse<Product>> {
    ensure_staff(user)?;
    if payload.name.trim().is_empty() || payload.category.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and category are required".to_string(),
        ));
    }
    if payload.price < 0 || payload.credits < 0 {
        return Err(AppError::BadRequest(
            "price and credits must not be negative".to_string(),
        ));
    }

    let product = {
        let mut catalog = state.products.write().await;
        let product = catalog.add(payload);
        state.storage.save(keys::PRODUCTS, catalog.all()).await;
        product
    };

    log_audit(
        Some(&user.email),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: ProductPatch,
) -> AppResult<ApiResponse<Product>> {
    ensure_staff(user)?;
    if payload.price.is_some_and(|p| p < 0) || payload.credits.is_some_and(|c| c < 0) {
        return Err(AppError::BadRequest(
            "price and credits must not be negative".to_string(),
        ));
    }

    let product = {
        let mut catalog = state.products.write().await;
        let product = catalog.update(id, payload)?.clone();
        state.storage.save(keys::PRODUCTS, catalog.all()).await;
        product
    };

    log_audit(
        Some(&user.email),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );
    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    {
        let mut catalog = state.products.write().await;
        catalog.delete(id)?;
        state.storage.save(keys::PRODUCTS, catalog.all()).await;
    }

    log_audit(
        Some(&user.email),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    );
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
