#![allow(dead_code)]

use reform_storefront::{
    config::AppConfig,
    middleware::auth::AuthUser,
    models::{ShippingAddress, UserRole},
    state::AppState,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Fresh state over an empty temp directory, so every store starts from seed.
pub async fn seeded_state() -> anyhow::Result<(TempDir, AppState)> {
    let dir = tempfile::tempdir()?;
    let state = AppState::load(AppConfig::local(dir.path())).await?;
    Ok((dir, state))
}

pub fn session(role: UserRole, email: &str, name: &str) -> AuthUser {
    AuthUser {
        session_id: Uuid::new_v4(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        company: None,
    }
}

pub fn admin() -> AuthUser {
    session(UserRole::Admin, "admin@reform.dev", "Admin User")
}

pub fn customer() -> AuthUser {
    session(UserRole::Customer, "test@example.com", "Test User")
}

pub fn address(email: &str) -> ShippingAddress {
    ShippingAddress {
        full_name: "Test User".to_string(),
        email: email.to_string(),
        phone: "+91 98765 43210".to_string(),
        address: "42 Marine Drive".to_string(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        pincode: "400001".to_string(),
        landmark: None,
    }
}
