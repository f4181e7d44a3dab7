mod common;

use reform_storefront::{
    dto::cart::{AddToCartRequest, UpdateQuantityRequest},
    error::AppError,
    models::{PaymentMethod, Product},
    seed,
    services::cart_service,
    storage::keys,
    stores::{Cart, StoreError, cart::MAX_LINE_QUANTITY},
};

fn product(id: &str) -> anyhow::Result<Product> {
    seed::products()?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow::anyhow!("missing seed product {id}"))
}

#[test]
fn same_product_and_method_merges_into_one_line() -> anyhow::Result<()> {
    let jewelry = product("tw-001")?;
    let mut cart = Cart::default();

    cart.add(jewelry.clone(), 2, PaymentMethod::Cash)?;
    cart.add(jewelry.clone(), 3, PaymentMethod::Cash)?;

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 5);
    assert_eq!(cart.total_price(), 5 * 2499);
    Ok(())
}

#[test]
fn payment_methods_are_separate_lines() -> anyhow::Result<()> {
    let jewelry = product("tw-001")?;
    let mut cart = Cart::default();

    cart.add(jewelry.clone(), 2, PaymentMethod::Cash)?;
    cart.add(jewelry.clone(), 1, PaymentMethod::Credits)?;

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total_price(), 2 * 2499);
    assert_eq!(cart.total_credits(), 85);
    Ok(())
}

#[test]
fn item_count_is_sum_of_quantities() -> anyhow::Result<()> {
    let mut cart = Cart::default();
    cart.add(product("rm-002")?, 4, PaymentMethod::Cash)?;
    cart.add(product("rm-003")?, 1, PaymentMethod::Credits)?;
    cart.add(product("tw-003")?, 2, PaymentMethod::Cash)?;

    let sum: i64 = cart.items().iter().map(|item| item.quantity).sum();
    assert_eq!(cart.item_count(), sum);
    assert_eq!(cart.item_count(), 7);
    Ok(())
}

#[test]
fn zero_or_negative_quantity_removes_the_line() -> anyhow::Result<()> {
    let mut cart = Cart::default();
    cart.add(product("rm-002")?, 2, PaymentMethod::Cash)?;
    cart.add(product("rm-002")?, 2, PaymentMethod::Credits)?;

    assert!(cart.update_quantity("rm-002", PaymentMethod::Cash, 0)?.is_none());
    assert_eq!(cart.items().len(), 1);
    assert!(cart.update_quantity("rm-002", PaymentMethod::Credits, -3)?.is_none());
    assert!(cart.is_empty());
    Ok(())
}

#[test]
fn invalid_add_and_missing_line_are_rejected() -> anyhow::Result<()> {
    let mut cart = Cart::default();
    assert_eq!(
        cart.add(product("rm-002")?, 0, PaymentMethod::Cash).unwrap_err(),
        StoreError::InvalidQuantity(0)
    );
    assert!(matches!(
        cart.update_quantity("rm-002", PaymentMethod::Cash, 2),
        Err(StoreError::NotFound { .. })
    ));
    assert!(!cart.remove("rm-002", PaymentMethod::Cash));
    Ok(())
}

#[tokio::test]
async fn service_adds_updates_and_persists_the_cart() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;

    cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "tw-001".into(),
            quantity: 2,
            payment_method: PaymentMethod::Cash,
        },
    )
    .await?;
    let resp = cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "tw-001".into(),
            quantity: 1,
            payment_method: PaymentMethod::Credits,
        },
    )
    .await?;
    let view = resp.data.expect("cart view");
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.item_count, 3);
    assert_eq!(view.total_price, 4998);
    assert_eq!(view.total_credits, 85);

    let resp = cart_service::update_quantity(
        &state,
        "tw-001",
        UpdateQuantityRequest {
            payment_method: PaymentMethod::Cash,
            quantity: 0,
        },
    )
    .await?;
    let view = resp.data.expect("cart view");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].payment_method, PaymentMethod::Credits);

    let stored = std::fs::read_to_string(dir.path().join(format!("{}.json", keys::CART)))?;
    let stored: Vec<serde_json::Value> = serde_json::from_str(&stored)?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["payment_method"], "credits");
    Ok(())
}

#[tokio::test]
async fn unknown_or_out_of_stock_products_cannot_be_added() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let err = cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "nope".into(),
            quantity: 1,
            payment_method: PaymentMethod::Cash,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    state
        .products
        .write()
        .await
        .update(
            "rm-002",
            reform_storefront::stores::ProductPatch {
                in_stock: Some(false),
                ..Default::default()
            },
        )?;
    let err = cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "rm-002".into(),
            quantity: 1,
            payment_method: PaymentMethod::Cash,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(state.cart.read().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn removing_a_missing_line_is_not_found() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let err = cart_service::remove_from_cart(&state, "tw-001", PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[test]
fn oversized_quantities_leave_the_cart_untouched() -> anyhow::Result<()> {
    let tiles = product("rm-001")?;
    let mut cart = Cart::default();

    assert_eq!(
        cart.add(tiles.clone(), i64::MAX / 2, PaymentMethod::Cash).unwrap_err(),
        StoreError::InvalidQuantity(i64::MAX / 2)
    );
    assert!(cart.is_empty());

    cart.add(tiles.clone(), MAX_LINE_QUANTITY, PaymentMethod::Cash)?;
    assert_eq!(
        cart.add(tiles.clone(), 1, PaymentMethod::Cash).unwrap_err(),
        StoreError::InvalidQuantity(1)
    );
    assert!(cart.add(tiles, i64::MAX, PaymentMethod::Cash).is_err());
    assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);

    assert_eq!(
        cart.update_quantity("rm-001", PaymentMethod::Cash, MAX_LINE_QUANTITY + 1)
            .unwrap_err(),
        StoreError::InvalidQuantity(MAX_LINE_QUANTITY + 1)
    );
    assert_eq!(cart.total_price(), MAX_LINE_QUANTITY * 4999);
    Ok(())
}

#[test]
fn line_amounts_that_overflow_are_refused() -> anyhow::Result<()> {
    let mut priceless = product("rm-001")?;
    priceless.price = i64::MAX;
    let mut cart = Cart::default();

    assert!(matches!(
        cart.add(priceless.clone(), 2, PaymentMethod::Cash),
        Err(StoreError::TotalOverflow(_))
    ));
    assert!(cart.is_empty());

    // credits are priced separately, so the same product is fine on credits
    cart.add(priceless, 2, PaymentMethod::Credits)?;
    assert_eq!(cart.total_credits(), 330);
    assert_eq!(cart.total_price(), 0);
    Ok(())
}

#[test]
fn stored_lines_out_of_range_are_dropped_on_load() -> anyhow::Result<()> {
    let mut cart = Cart::default();
    cart.add(product("rm-002")?, 3, PaymentMethod::Cash)?;
    let mut items = cart.items().to_vec();
    let mut huge = items[0].clone();
    huge.quantity = i64::MAX;
    huge.payment_method = PaymentMethod::Credits;
    items.push(huge);

    let reloaded = Cart::new(items);
    assert_eq!(reloaded.items().len(), 1);
    assert_eq!(reloaded.item_count(), 3);
    Ok(())
}

#[tokio::test]
async fn huge_quantities_are_rejected_before_anything_is_saved() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;

    for quantity in [i64::MAX / 2, MAX_LINE_QUANTITY + 1] {
        let err = cart_service::add_to_cart(
            &state,
            AddToCartRequest {
                product_id: "rm-001".into(),
                quantity,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    let stored = std::fs::read_to_string(dir.path().join(format!("{}.json", keys::CART)))?;
    let stored: Vec<serde_json::Value> = serde_json::from_str(&stored)?;
    assert!(stored.is_empty());

    cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "rm-001".into(),
            quantity: 2,
            payment_method: PaymentMethod::Cash,
        },
    )
    .await?;
    let err = cart_service::update_quantity(
        &state,
        "rm-001",
        UpdateQuantityRequest {
            payment_method: PaymentMethod::Cash,
            quantity: i64::MAX,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let view = cart_service::view_cart(&state).await?.data.expect("cart view");
    assert_eq!(view.item_count, 2);
    assert_eq!(view.total_price, 2 * 4999);
    Ok(())
}
