use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::shared::{AddContributionRequest, CertificateList, CollectionList, ContributionList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{BusinessProfile, Collection, ContributionStatus, UserRole, WasteContribution},
    reports::{self, Report},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    storage::keys,
    stores::{
        StoreError, rates,
        shared::{ContributionDraft, ContributionPatch},
    },
};

/// The business profile behind the session, matched by email.
pub(crate) async fn current_business(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<BusinessProfile> {
    ensure_role(user, &[UserRole::Business])?;
    state
        .shared
        .read()
        .await
        .business_by_email(&user.email)
        .cloned()
        .ok_or(AppError::NotFound)
}

pub async fn list_contributions(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ContributionList>> {
    let business = current_business(state, user).await?;
    let contributions: Vec<WasteContribution> = state
        .shared
        .read()
        .await
        .contributions_by_business(&business.id)
        .into_iter()
        .cloned()
        .collect();

    let (items, meta) = pagination.slice(&contributions);
    Ok(ApiResponse::success(
        "Waste contributions",
        ContributionList { items },
        Some(meta),
    ))
}

/// Records waste handed over by the business. Credits and CO₂ impact are
/// derived from the weight; the entry starts out pending verification.
pub async fn add_contribution(
    state: &AppState,
    user: &AuthUser,
    payload: AddContributionRequest,
) -> AppResult<ApiResponse<WasteContribution>> {
    let business = current_business(state, user).await?;
    let waste_type = payload.waste_type.trim().to_string();
    if waste_type.is_empty() {
        return Err(AppError::BadRequest("waste_type is required".to_string()));
    }
    if !rates::valid_weight(payload.weight) {
        return Err(StoreError::InvalidWeight.into());
    }

    let contribution = {
        let mut shared = state.shared.write().await;
        let contribution = shared.add_contribution(ContributionDraft {
            business_id: business.id.clone(),
            business_name: business.name.clone(),
            credits_earned: rates::contribution_credits(&waste_type, payload.weight),
            co2_impact: rates::co2_impact(payload.weight),
            waste_type,
            weight: payload.weight,
            date: Utc::now().format("%Y-%m-%d").to_string(),
            status: ContributionStatus::Pending,
        })?;
        state
            .storage
            .save(keys::WASTE_CONTRIBUTIONS, shared.contributions())
            .await;
        state
            .storage
            .save(keys::BUSINESSES, shared.businesses())
            .await;
        contribution
    };

    log_audit(
        Some(&user.email),
        "contribution_add",
        Some("waste_contributions"),
        Some(serde_json::json!({
            "contribution_id": contribution.id,
            "weight": contribution.weight,
            "credits_earned": contribution.credits_earned,
        })),
    );
    Ok(ApiResponse::success(
        "Waste contribution recorded",
        contribution,
        None,
    ))
}

pub async fn update_contribution(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: ContributionPatch,
) -> AppResult<ApiResponse<WasteContribution>> {
    let business = current_business(state, user).await?;
    let contribution = {
        let mut shared = state.shared.write().await;
        let owned = shared
            .contributions()
            .iter()
            .any(|c| c.id == id && c.business_id == business.id);
        if !owned {
            return Err(AppError::NotFound);
        }
        let contribution = shared.update_contribution(id, payload)?.clone();
        state
            .storage
            .save(keys::WASTE_CONTRIBUTIONS, shared.contributions())
            .await;
        contribution
    };

    log_audit(
        Some(&user.email),
        "contribution_update",
        Some("waste_contributions"),
        Some(serde_json::json!({ "contribution_id": contribution.id })),
    );
    Ok(ApiResponse::success(
        "Updated",
        contribution,
        Some(Meta::empty()),
    ))
}

pub async fn list_collections(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CollectionList>> {
    let business = current_business(state, user).await?;
    let collections: Vec<Collection> = state
        .shared
        .read()
        .await
        .collections_by_business(&business.id)
        .into_iter()
        .cloned()
        .collect();

    let (items, meta) = pagination.slice(&collections);
    Ok(ApiResponse::success(
        "Collections",
        CollectionList { items },
        Some(meta),
    ))
}

pub async fn list_certificates(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CertificateList>> {
    current_business(state, user).await?;
    let items = state.certificates.as_ref().clone();
    Ok(ApiResponse::success(
        "Certificates",
        CertificateList { items },
        Some(Meta::empty()),
    ))
}

pub async fn certificate_download(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<Report> {
    let business = current_business(state, user).await?;
    let cert = state
        .certificates
        .iter()
        .find(|c| c.certificate_id == id)
        .ok_or(AppError::NotFound)?;

    let report = reports::certificate(cert, &business, Utc::now());
    log_audit(
        Some(&user.email),
        "certificate_download",
        Some("certificates"),
        Some(serde_json::json!({ "certificate_id": cert.certificate_id })),
    );
    Ok(report)
}

pub async fn summary_report(state: &AppState, user: &AuthUser) -> AppResult<Report> {
    let business = current_business(state, user).await?;
    let shared = state.shared.read().await;
    let contributions = shared.contributions_by_business(&business.id);
    let collections = shared.collections_by_business(&business.id);

    let report = reports::business_summary(&business, &contributions, &collections, Utc::now());
    log_audit(
        Some(&user.email),
        "report_download",
        Some("business_report"),
        Some(serde_json::json!({ "filename": report.filename })),
    );
    Ok(report)
}
