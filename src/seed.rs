//! Demo records the service starts from when local storage is empty.

use serde::de::DeserializeOwned;

use crate::models::{
    BusinessProfile, Certificate, Collection, MitraProfile, Order, Product, SystemUser,
    WasteContribution,
};

const PRODUCTS: &str = include_str!("../data/products.json");
const ORDERS: &str = include_str!("../data/orders.json");
const MITRAS: &str = include_str!("../data/mitras.json");
const BUSINESSES: &str = include_str!("../data/businesses.json");
const COLLECTIONS: &str = include_str!("../data/collections.json");
const WASTE_CONTRIBUTIONS: &str = include_str!("../data/waste_contributions.json");
const SYSTEM_USERS: &str = include_str!("../data/system_users.json");
const CERTIFICATES: &str = include_str!("../data/certificates.json");

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> anyhow::Result<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("invalid seed data {name}: {e}"))
}

pub fn products() -> anyhow::Result<Vec<Product>> {
    parse("products", PRODUCTS)
}

pub fn orders() -> anyhow::Result<Vec<Order>> {
    parse("orders", ORDERS)
}

pub fn mitras() -> anyhow::Result<Vec<MitraProfile>> {
    parse("mitras", MITRAS)
}

pub fn businesses() -> anyhow::Result<Vec<BusinessProfile>> {
    parse("businesses", BUSINESSES)
}

pub fn collections() -> anyhow::Result<Vec<Collection>> {
    parse("collections", COLLECTIONS)
}

pub fn waste_contributions() -> anyhow::Result<Vec<WasteContribution>> {
    parse("waste_contributions", WASTE_CONTRIBUTIONS)
}

pub fn system_users() -> anyhow::Result<Vec<SystemUser>> {
    parse("system_users", SYSTEM_USERS)
}

pub fn certificates() -> anyhow::Result<Vec<Certificate>> {
    parse("certificates", CERTIFICATES)
}
