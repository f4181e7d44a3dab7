use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    models::{Certificate, Order},
    seed,
    storage::{LocalStorage, keys},
    stores::{Cart, Catalog, OrderBook, SharedData},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: LocalStorage,
    pub cart: Arc<RwLock<Cart>>,
    pub orders: Arc<RwLock<OrderBook>>,
    pub last_order: Arc<RwLock<Option<Order>>>,
    pub products: Arc<RwLock<Catalog>>,
    pub shared: Arc<RwLock<SharedData>>,
    pub certificates: Arc<Vec<Certificate>>,
}

impl AppState {
    /// Restore every store from local storage, falling back to the seed
    /// records for keys that are missing or unreadable, and write the
    /// resulting state back so the directory always reflects memory.
    pub async fn load(config: AppConfig) -> anyhow::Result<Self> {
        let storage = LocalStorage::open(&config.data_dir).await?;

        let cart_items = storage.load(keys::CART).await.unwrap_or_default();
        let orders = match storage.load(keys::ORDERS).await {
            Some(orders) => orders,
            None => seed::orders()?,
        };
        let last_order: Option<Order> = storage.load(keys::LAST_ORDER).await;
        let products = match storage.load(keys::PRODUCTS).await {
            Some(products) => products,
            None => seed::products()?,
        };
        let mitras = match storage.load(keys::MITRAS).await {
            Some(mitras) => mitras,
            None => seed::mitras()?,
        };
        let businesses = match storage.load(keys::BUSINESSES).await {
            Some(businesses) => businesses,
            None => seed::businesses()?,
        };
        let collections = match storage.load(keys::COLLECTIONS).await {
            Some(collections) => collections,
            None => seed::collections()?,
        };
        let contributions = match storage.load(keys::WASTE_CONTRIBUTIONS).await {
            Some(contributions) => contributions,
            None => seed::waste_contributions()?,
        };
        let users = match storage.load(keys::SYSTEM_USERS).await {
            Some(users) => users,
            None => seed::system_users()?,
        };

        let state = Self {
            config: Arc::new(config),
            storage,
            cart: Arc::new(RwLock::new(Cart::new(cart_items))),
            orders: Arc::new(RwLock::new(OrderBook::new(orders))),
            last_order: Arc::new(RwLock::new(last_order)),
            products: Arc::new(RwLock::new(Catalog::new(products))),
            shared: Arc::new(RwLock::new(SharedData::new(
                mitras,
                businesses,
                collections,
                contributions,
                users,
            ))),
            certificates: Arc::new(seed::certificates()?),
        };
        state.persist_all().await;
        Ok(state)
    }

    pub async fn persist_all(&self) {
        self.storage
            .save(keys::CART, self.cart.read().await.items())
            .await;
        self.storage
            .save(keys::ORDERS, self.orders.read().await.all())
            .await;
        self.storage
            .save(keys::PRODUCTS, self.products.read().await.all())
            .await;
        if let Some(order) = self.last_order.read().await.as_ref() {
            self.storage.save(keys::LAST_ORDER, order).await;
        }

        let shared = self.shared.read().await;
        self.storage.save(keys::MITRAS, shared.mitras()).await;
        self.storage
            .save(keys::BUSINESSES, shared.businesses())
            .await;
        self.storage
            .save(keys::COLLECTIONS, shared.collections())
            .await;
        self.storage
            .save(keys::WASTE_CONTRIBUTIONS, shared.contributions())
            .await;
        self.storage.save(keys::SYSTEM_USERS, shared.users()).await;
    }
}
