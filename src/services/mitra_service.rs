use std::collections::HashMap;

use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::shared::{CollectionList, LogCollectionRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{BusinessProfile, Collection, CollectionStatus, MitraProfile, UserRole},
    reports::{self, Report},
    response::{ApiResponse, Meta},
    routes::params::CollectionQuery,
    state::AppState,
    storage::keys,
    stores::{
        StoreError, rates,
        shared::{CollectionDraft, CollectionPatch},
    },
};

/// The mitra profile behind the session, matched by email.
pub(crate) async fn current_mitra(state: &AppState, user: &AuthUser) -> AppResult<MitraProfile> {
    ensure_role(user, &[UserRole::Mitra])?;
    state
        .shared
        .read()
        .await
        .mitra_by_email(&user.email)
        .cloned()
        .ok_or(AppError::NotFound)
}

fn matches_query(collection: &Collection, query: &CollectionQuery) -> bool {
    if query.status.is_some_and(|status| collection.status != status) {
        return false;
    }
    match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let q = q.to_lowercase();
            collection.business_name.to_lowercase().contains(&q)
                || collection.waste_type.to_lowercase().contains(&q)
                || collection.location.to_lowercase().contains(&q)
        }
        None => true,
    }
}

pub async fn list_collections(
    state: &AppState,
    user: &AuthUser,
    query: CollectionQuery,
) -> AppResult<ApiResponse<CollectionList>> {
    let mitra = current_mitra(state, user).await?;
    let pagination = query.pagination();
    let collections: Vec<Collection> = state
        .shared
        .read()
        .await
        .collections_by_mitra(&mitra.id)
        .into_iter()
        .filter(|c| matches_query(c, &query))
        .cloned()
        .collect();

    let (items, meta) = pagination.slice(&collections);
    Ok(ApiResponse::success(
        "Collections",
        CollectionList { items },
        Some(meta),
    ))
}

fn resolve_business<'a>(
    businesses: &'a [BusinessProfile],
    payload: &LogCollectionRequest,
) -> AppResult<&'a BusinessProfile> {
    let by_id = payload
        .business_id
        .as_deref()
        .filter(|id| !id.trim().is_empty());
    let by_name = payload
        .business_name
        .as_deref()
        .filter(|name| !name.trim().is_empty());

    let found = match (by_id, by_name) {
        (Some(id), _) => businesses.iter().find(|b| b.id == id),
        (None, Some(name)) => businesses.iter().find(|b| b.name == name),
        (None, None) => {
            return Err(AppError::BadRequest(
                "business_id or business_name is required".to_string(),
            ));
        }
    };
    found.ok_or(AppError::NotFound)
}

/// Logs a completed pickup at a business. Earnings follow the per-kg rate
/// of the waste type; the mitra's running totals move with it.
pub async fn log_collection(
    state: &AppState,
    user: &AuthUser,
    payload: LogCollectionRequest,
) -> AppResult<ApiResponse<Collection>> {
    let mitra = current_mitra(state, user).await?;
    let waste_type = payload.waste_type.trim().to_string();
    if waste_type.is_empty() {
        return Err(AppError::BadRequest("waste_type is required".to_string()));
    }
    if !rates::valid_weight(payload.weight) {
        return Err(StoreError::InvalidWeight.into());
    }

    let now = Utc::now();
    let collection = {
        let mut shared = state.shared.write().await;
        let business = resolve_business(shared.businesses(), &payload)?.clone();
        let location = payload
            .location
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| business.address.clone());

        let collection = shared.add_collection(CollectionDraft {
            mitra_id: mitra.id.clone(),
            mitra_name: mitra.name.clone(),
            business_id: business.id,
            business_name: business.name,
            earnings: rates::collection_earnings(&waste_type, payload.weight),
            waste_type,
            weight: payload.weight,
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            location,
            status: CollectionStatus::Completed,
            notes: payload.notes.clone(),
        })?;
        state
            .storage
            .save(keys::COLLECTIONS, shared.collections())
            .await;
        state.storage.save(keys::MITRAS, shared.mitras()).await;
        collection
    };

    log_audit(
        Some(&user.email),
        "collection_log",
        Some("collections"),
        Some(serde_json::json!({
            "collection_id": collection.id,
            "business_id": collection.business_id,
            "weight": collection.weight,
            "earnings": collection.earnings,
        })),
    );
    Ok(ApiResponse::success("Collection logged", collection, None))
}

pub async fn update_collection(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: CollectionPatch,
) -> AppResult<ApiResponse<Collection>> {
    let mitra = current_mitra(state, user).await?;
    if payload.weight.is_some_and(|w| !rates::valid_weight(w)) {
        return Err(StoreError::InvalidWeight.into());
    }

    let collection = {
        let mut shared = state.shared.write().await;
        let owned = shared
            .collections()
            .iter()
            .any(|c| c.id == id && c.mitra_id == mitra.id);
        if !owned {
            return Err(AppError::NotFound);
        }
        let collection = shared.update_collection(id, payload)?.clone();
        state
            .storage
            .save(keys::COLLECTIONS, shared.collections())
            .await;
        collection
    };

    log_audit(
        Some(&user.email),
        "collection_update",
        Some("collections"),
        Some(serde_json::json!({
            "collection_id": collection.id,
            "status": collection.status,
        })),
    );
    Ok(ApiResponse::success(
        "Updated",
        collection,
        Some(Meta::empty()),
    ))
}

pub async fn performance_report(state: &AppState, user: &AuthUser) -> AppResult<Report> {
    let mitra = current_mitra(state, user).await?;
    let shared = state.shared.read().await;
    let collections = shared.collections_by_mitra(&mitra.id);

    let mut visits: HashMap<&str, usize> = HashMap::new();
    for c in &collections {
        *visits.entry(c.business_name.as_str()).or_default() += 1;
    }
    let top_partner = visits
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name);

    let report = reports::mitra_performance(&mitra, &collections, top_partner, Utc::now());
    log_audit(
        Some(&user.email),
        "report_download",
        Some("mitra_report"),
        Some(serde_json::json!({ "filename": report.filename })),
    );
    Ok(report)
}
