mod common;

use reform_storefront::{
    error::AppError,
    models::UserRole,
    routes::params::{Pagination, ProductQuery},
    services::product_service,
    storage::keys,
    stores::{ProductDraft, ProductPatch, ProductSort},
};

fn sorted(sort_by: ProductSort) -> ProductQuery {
    ProductQuery {
        sort_by: Some(sort_by),
        per_page: Some(100),
        ..Default::default()
    }
}

fn draft(name: &str, price: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        category: "Tech Waste".to_string(),
        price,
        credits: 120,
        image: String::new(),
        description: "Lamp cast from shredded circuit boards".to_string(),
        highlight: "Upcycled".to_string(),
        rating: 4.2,
        in_stock: true,
        specifications: None,
    }
}

#[tokio::test]
async fn listing_sorts_by_each_key() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let by_name = product_service::list_products(&state, sorted(ProductSort::Name))
        .await?
        .data
        .expect("list")
        .items;
    assert_eq!(by_name.len(), 13);
    assert_eq!(by_name[0].id, "wr-003");
    assert_eq!(by_name[12].id, "ad-001");
    assert!(by_name.windows(2).all(|w| w[0].name <= w[1].name));

    let by_price = product_service::list_products(&state, sorted(ProductSort::PriceHigh))
        .await?
        .data
        .expect("list")
        .items;
    assert_eq!(by_price[0].id, "wr-001");
    assert_eq!(by_price[12].id, "rm-002");
    assert!(by_price.windows(2).all(|w| w[0].price >= w[1].price));

    let by_rating = product_service::list_products(&state, sorted(ProductSort::Rating))
        .await?
        .data
        .expect("list")
        .items;
    // ties keep catalog order
    assert_eq!(by_rating[0].id, "wr-001");
    assert_eq!(by_rating[1].id, "tw-005");
    assert!(by_rating.windows(2).all(|w| w[0].rating >= w[1].rating));
    Ok(())
}

#[tokio::test]
async fn text_search_covers_name_description_and_category() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let search = |q: &str| ProductQuery {
        q: Some(q.to_string()),
        sort_by: Some(ProductSort::PriceLow),
        ..Default::default()
    };

    let copper = product_service::list_products(&state, search("  COPPER "))
        .await?
        .data
        .expect("list")
        .items;
    let ids: Vec<&str> = copper.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["wr-002", "tw-005"]);

    let resp = product_service::list_products(&state, search("retail market")).await?;
    assert_eq!(resp.meta.expect("meta").total, Some(3));

    let resp = product_service::list_products(
        &state,
        ProductQuery {
            q: Some("copper".into()),
            category: Some("Tech Waste".into()),
            ..Default::default()
        },
    )
    .await?;
    let items = resp.data.expect("list").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "tw-005");
    Ok(())
}

#[tokio::test]
async fn huge_page_numbers_return_an_empty_page() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let (items, meta) = Pagination::new(Some(i64::MAX), Some(10)).slice(&[1, 2, 3]);
    assert!(items.is_empty());
    assert_eq!(meta.total, Some(3));

    let resp = product_service::list_products(
        &state,
        ProductQuery {
            page: Some(i64::MAX),
            per_page: Some(i64::MAX),
            ..Default::default()
        },
    )
    .await?;
    assert!(resp.data.expect("list").items.is_empty());
    assert_eq!(resp.meta.expect("meta").total, Some(13));
    Ok(())
}

#[tokio::test]
async fn staff_create_update_and_delete_products() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;
    let team = common::session(UserRole::Team, "team@reform.dev", "Team Lead");

    let created = product_service::create_product(&state, &team, draft("Circuit Lamp", 5499))
        .await?
        .data
        .expect("product");
    assert!(created.id.starts_with("prod-"));
    assert_eq!(state.products.read().await.all()[0].id, created.id);

    let updated = product_service::update_product(
        &state,
        &common::admin(),
        &created.id,
        ProductPatch {
            price: Some(4999),
            in_stock: Some(false),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(updated.price, 4999);
    assert!(!updated.in_stock);
    assert_eq!(updated.name, "Circuit Lamp");

    let stored = std::fs::read_to_string(dir.path().join(format!("{}.json", keys::PRODUCTS)))?;
    assert!(stored.contains("Circuit Lamp"));

    product_service::delete_product(&state, &team, &created.id).await?;
    let err = product_service::get_product(&state, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(state.products.read().await.all().len(), 13);

    let err = product_service::delete_product(&state, &team, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn catalog_edits_need_a_staff_session_and_sane_prices() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let customer = common::customer();

    let err = product_service::create_product(&state, &customer, draft("Circuit Lamp", 5499))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = product_service::update_product(&state, &customer, "tw-001", ProductPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let mitra = common::session(UserRole::Mitra, "raj@reform.dev", "Raj Kumar");
    let err = product_service::delete_product(&state, &mitra, "tw-001")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = product_service::create_product(&state, &common::admin(), draft("Circuit Lamp", -1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = product_service::update_product(
        &state,
        &common::admin(),
        "tw-001",
        ProductPatch {
            credits: Some(-5),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(state.products.read().await.all().len(), 13);
    Ok(())
}
