use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::UserRole;

fn default_role() -> UserRole {
    UserRole::Customer
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    /// Company for business accounts, department for team accounts.
    pub company: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub company: Option<String>,
    pub credits: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub company: Option<String>,
    pub exp: usize,
}
