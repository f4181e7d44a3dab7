use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, SessionUser},
    error::{AppError, AppResult},
    models::{AccountStatus, UserRole},
    response::{ApiResponse, Meta},
    state::AppState,
    storage::keys,
    stores::shared::{SystemUserDraft, SystemUserPatch},
};

/// Any non-blank credentials open a session for the chosen portal. Known
/// users get their stored name and company and a fresh `last_login`.
pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest {
        email,
        password,
        role,
    } = payload;
    let email = email.trim().to_string();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let now = Utc::now();
    let session = {
        let mut shared = state.shared.write().await;
        let known = shared
            .user_by_email(&email)
            .map(|user| (user.id.clone(), user.name.clone(), user.company.clone(), user.credits));

        let (name, company, credits) = match known {
            Some((id, name, company, credits)) => {
                shared.update_user(
                    &id,
                    SystemUserPatch {
                        last_login: Some(now.format("%Y-%m-%d").to_string()),
                        ..Default::default()
                    },
                )?;
                (name, company, credits)
            }
            None => (display_name(&email), None, None),
        };
        let company = company.or_else(|| match role {
            UserRole::Business => shared.business_by_email(&email).map(|b| b.name.clone()),
            _ => None,
        });
        state
            .storage
            .save(keys::SYSTEM_USERS, shared.users())
            .await;

        SessionUser {
            name,
            email,
            role,
            company,
            credits,
        }
    };

    let resp = issue_session(state, session)?;
    log_audit(
        Some(&resp.user.email),
        "user_login",
        Some("session"),
        Some(serde_json::json!({ "role": role.as_str() })),
    );

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

/// Registers the visitor as a system user and opens a session for them.
pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let RegisterRequest {
        name,
        email,
        password,
        role,
        company,
    } = payload;
    let email = email.trim().to_string();
    let name = name.trim().to_string();
    if email.is_empty() || password.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest(
            "name, email and password are required".into(),
        ));
    }

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let user = {
        let mut shared = state.shared.write().await;
        if shared.user_by_email(&email).is_some() {
            return Err(AppError::BadRequest("Email is already taken".to_string()));
        }
        let user = shared.add_user(SystemUserDraft {
            name,
            email,
            role,
            status: AccountStatus::Active,
            joined_date: today.clone(),
            last_login: today,
            company,
            credits: None,
        });
        state
            .storage
            .save(keys::SYSTEM_USERS, shared.users())
            .await;
        user
    };

    log_audit(
        Some(&user.email),
        "user_register",
        Some("system_users"),
        Some(serde_json::json!({ "user_id": user.id, "role": user.role.as_str() })),
    );

    let resp = issue_session(
        state,
        SessionUser {
            name: user.name,
            email: user.email,
            role: user.role,
            company: user.company,
            credits: user.credits,
        },
    )?;
    Ok(ApiResponse::success("User created", resp, None))
}

fn issue_session(state: &AppState, user: SessionUser) -> AppResult<LoginResponse> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        company: user.company.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(LoginResponse {
        token: format!("Bearer {token}"),
        user,
    })
}

/// `jane.doe@example.com` -> `jane.doe`.
fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
