use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError, models::UserRole, state::AppState};

/// The mock portal session. Any credentials produce one; it only records who
/// the visitor said they are and which portal they picked.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub company: Option<String>,
}

pub fn ensure_role(user: &AuthUser, roles: &[UserRole]) -> Result<(), AppError> {
    if !roles.contains(&user.role) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[UserRole::Admin, UserRole::Team])
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        let session_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::BadRequest("Invalid session id in token".into()))?;

        Ok(AuthUser {
            session_id,
            email: decoded.claims.email,
            name: decoded.claims.name,
            role: decoded.claims.role,
            company: decoded.claims.company,
        })
    }
}
