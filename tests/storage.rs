mod common;

use reform_storefront::{
    config::AppConfig,
    dto::cart::AddToCartRequest,
    models::{PaymentMethod, Product},
    services::cart_service,
    state::AppState,
    storage::{LocalStorage, keys},
};

#[tokio::test]
async fn missing_and_corrupt_keys_load_as_none() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = LocalStorage::open(dir.path()).await?;

    assert!(storage.load::<Vec<Product>>(keys::PRODUCTS).await.is_none());

    std::fs::write(dir.path().join("reform-products.json"), "{ not json")?;
    assert!(storage.read::<Vec<Product>>(keys::PRODUCTS).await.is_err());
    assert!(storage.load::<Vec<Product>>(keys::PRODUCTS).await.is_none());

    storage.remove(keys::PRODUCTS).await?;
    storage.remove(keys::PRODUCTS).await?;
    Ok(())
}

#[tokio::test]
async fn first_start_writes_every_seed_key() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;

    for key in [
        keys::CART,
        keys::ORDERS,
        keys::PRODUCTS,
        keys::MITRAS,
        keys::BUSINESSES,
        keys::COLLECTIONS,
        keys::WASTE_CONTRIBUTIONS,
        keys::SYSTEM_USERS,
    ] {
        assert!(dir.path().join(format!("{key}.json")).exists(), "{key} missing");
    }
    // nothing to remember until an order is placed
    assert!(!dir.path().join(format!("{}.json", keys::LAST_ORDER)).exists());
    assert_eq!(state.products.read().await.all().len(), 13);
    Ok(())
}

#[tokio::test]
async fn state_survives_a_restart() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;
    cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "ad-001".into(),
            quantity: 2,
            payment_method: PaymentMethod::Credits,
        },
    )
    .await?;
    drop(state);

    let reloaded = AppState::load(AppConfig::local(dir.path())).await?;
    let cart = reloaded.cart.read().await;
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total_credits(), 900);
    Ok(())
}

#[tokio::test]
async fn corrupt_storage_falls_back_to_seed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("reform-orders.json"), "[{\"id\": 7}]")?;

    let state = AppState::load(AppConfig::local(dir.path())).await?;
    assert_eq!(state.orders.read().await.all().len(), 3);
    Ok(())
}

#[tokio::test]
async fn failed_writes_do_not_fail_the_operation() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;
    // a directory where the cart file should be makes every cart write fail
    let cart_file = dir.path().join(format!("{}.json", keys::CART));
    std::fs::remove_file(&cart_file)?;
    std::fs::create_dir(&cart_file)?;

    let resp = cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "rm-001".into(),
            quantity: 1,
            payment_method: PaymentMethod::Cash,
        },
    )
    .await?;
    assert_eq!(resp.data.expect("cart").item_count, 1);
    assert_eq!(state.cart.read().await.item_count(), 1);
    Ok(())
}
