use reform_storefront::{config::AppConfig, state::AppState, storage::LocalStorage, storage::keys};

/// Wipes every storage key under `DATA_DIR` and writes the demo records back.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let storage = LocalStorage::open(&config.data_dir).await?;
    for key in keys::ALL {
        storage.remove(key).await?;
        println!("Cleared {key}");
    }

    let state = AppState::load(config).await?;
    println!(
        "Seed completed in {}: {} products, {} orders, {} mitras, {} businesses",
        state.storage.dir().display(),
        state.products.read().await.all().len(),
        state.orders.read().await.all().len(),
        state.shared.read().await.mitras().len(),
        state.shared.read().await.businesses().len(),
    );
    Ok(())
}
