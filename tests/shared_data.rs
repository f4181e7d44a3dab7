mod common;

use reform_storefront::{
    dto::shared::{AddContributionRequest, LogCollectionRequest},
    error::AppError,
    models::{AccountStatus, CollectionStatus, ContributionStatus, UserRole},
    routes::params::{CollectionQuery, Pagination, UserQuery},
    services::{admin_service, business_service, mitra_service},
    storage::keys,
    stores::{
        rates,
        shared::{BusinessPatch, CollectionPatch, MitraPatch, SystemUserPatch},
    },
};

fn mitra() -> reform_storefront::middleware::auth::AuthUser {
    common::session(UserRole::Mitra, "raj@reform.dev", "Raj Kumar")
}

fn business() -> reform_storefront::middleware::auth::AuthUser {
    common::session(UserRole::Business, "contact@greencorp.com", "John Smith")
}

#[test]
fn rates_follow_the_waste_type() {
    assert_eq!(rates::collection_earnings("Electronic Waste", 10.0), 300.0);
    assert_eq!(rates::collection_earnings("Metal Waste", 2.0), 110.0);
    assert_eq!(rates::collection_earnings("Glass", 1.0), 20.0);
    assert_eq!(rates::contribution_credits("Electronic Waste", 45.0), 180);
    assert_eq!(rates::contribution_credits("Paper & Cardboard", 2.7), 2);
    assert_eq!(rates::co2_impact(45.0), 0.045);
    assert_eq!(rates::co2_impact(2.7), 0.003);
    assert_eq!(rates::co2_impact(1234.4), 1.234);
}

#[test]
fn weights_outside_the_accepted_range_are_invalid() {
    assert!(rates::valid_weight(0.5));
    assert!(rates::valid_weight(rates::MAX_WEIGHT_KG));
    for weight in [0.0, -1.0, rates::MAX_WEIGHT_KG + 1.0, 1e300, f64::NAN, f64::INFINITY] {
        assert!(!rates::valid_weight(weight), "{weight} accepted");
    }
}

#[tokio::test]
async fn logging_a_collection_bumps_the_mitra_totals() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let before = state.shared.read().await.mitra("mitra-001").cloned().expect("mitra");

    let collection = mitra_service::log_collection(
        &state,
        &mitra(),
        LogCollectionRequest {
            business_id: None,
            business_name: Some("EcoTech Solutions".into()),
            waste_type: "Metal Waste".into(),
            weight: 10.0,
            location: None,
            notes: Some("scrap frames".into()),
        },
    )
    .await?
    .data
    .expect("collection");

    assert_eq!(collection.business_id, "business-002");
    assert_eq!(collection.earnings, 550.0);
    assert_eq!(collection.status, CollectionStatus::Completed);
    assert!(collection.id.starts_with("col-"));

    let shared = state.shared.read().await;
    let after = shared.mitra("mitra-001").expect("mitra");
    assert_eq!(after.total_collections, before.total_collections + 1);
    assert_eq!(after.total_earnings, before.total_earnings + 550.0);
    assert_eq!(
        collection.location,
        shared.business("business-002").expect("business").address
    );
    assert_eq!(shared.collections()[0].id, collection.id);
    Ok(())
}

#[tokio::test]
async fn collection_listing_filters_by_query_and_status() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let all = mitra_service::list_collections(&state, &mitra(), CollectionQuery::default())
        .await?
        .data
        .expect("list");
    assert_eq!(all.items.len(), 2);
    assert!(all.items.iter().all(|c| c.mitra_id == "mitra-001"));

    let scheduled = mitra_service::list_collections(
        &state,
        &mitra(),
        CollectionQuery {
            status: Some(CollectionStatus::Scheduled),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("list");
    assert_eq!(scheduled.items.len(), 1);
    assert_eq!(scheduled.items[0].id, "col-005");

    let searched = mitra_service::list_collections(
        &state,
        &mitra(),
        CollectionQuery {
            q: Some("green corp".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("list");
    assert_eq!(searched.items.len(), 1);
    assert_eq!(searched.items[0].id, "col-001");
    Ok(())
}

#[tokio::test]
async fn editing_a_collection_leaves_profile_totals_alone() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let before = state.shared.read().await.mitra("mitra-001").cloned().expect("mitra");

    let updated = mitra_service::update_collection(
        &state,
        &mitra(),
        "col-005",
        CollectionPatch {
            status: Some(CollectionStatus::Completed),
            earnings: Some(9999.0),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("collection");
    assert_eq!(updated.status, CollectionStatus::Completed);

    let after = state.shared.read().await.mitra("mitra-001").cloned().expect("mitra");
    assert_eq!(after, before);

    // another mitra's pickup
    let err = mitra_service::update_collection(&state, &mitra(), "col-002", CollectionPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn unknown_sessions_and_bad_payloads_are_rejected() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let stranger = common::session(UserRole::Mitra, "ghost@reform.dev", "Ghost");
    let err = mitra_service::list_collections(&state, &stranger, CollectionQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = mitra_service::list_collections(&state, &common::customer(), CollectionQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = mitra_service::log_collection(
        &state,
        &mitra(),
        LogCollectionRequest {
            business_id: Some("business-001".into()),
            business_name: None,
            waste_type: "Plastic Waste".into(),
            weight: 0.0,
            location: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = mitra_service::log_collection(
        &state,
        &mitra(),
        LogCollectionRequest {
            business_id: None,
            business_name: None,
            waste_type: "Plastic Waste".into(),
            weight: 3.0,
            location: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn contributions_credit_the_business() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let before = state
        .shared
        .read()
        .await
        .business("business-001")
        .cloned()
        .expect("business");

    let contribution = business_service::add_contribution(
        &state,
        &business(),
        AddContributionRequest {
            waste_type: "Electronic Waste".into(),
            weight: 12.5,
        },
    )
    .await?
    .data
    .expect("contribution");

    assert_eq!(contribution.credits_earned, 50);
    assert_eq!(contribution.co2_impact, 0.013);
    assert_eq!(contribution.status, ContributionStatus::Pending);

    let after = state
        .shared
        .read()
        .await
        .business("business-001")
        .cloned()
        .expect("business");
    assert_eq!(after.green_credits, before.green_credits + 50);
    assert_eq!(after.total_waste_contributed, before.total_waste_contributed + 12.5);
    assert!((after.co2_saved - (before.co2_saved + 0.013)).abs() < 1e-9);

    let listed = business_service::list_contributions(&state, &business(), Pagination::default())
        .await?
        .data
        .expect("list");
    assert_eq!(listed.items.len(), 2);
    assert_eq!(listed.items[0].id, contribution.id);
    Ok(())
}

#[tokio::test]
async fn metrics_are_derived_from_the_records() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let admin = common::admin();

    let metrics = admin_service::metrics(&state, &admin).await?.data.expect("metrics");
    assert_eq!(metrics.total_users, 10);
    assert_eq!(metrics.total_mitras, 5);
    assert_eq!(metrics.total_businesses, 4);
    assert_eq!(metrics.total_waste_processed, 45.0 + 78.0 + 65.0 + 120.0);
    assert_eq!(metrics.active_collections, 3);
    assert_eq!(metrics.pending_orders, 1);
    assert_eq!(metrics.total_revenue, 2499 + 3999);

    business_service::add_contribution(
        &state,
        &business(),
        AddContributionRequest {
            waste_type: "Plastic Waste".into(),
            weight: 2.0,
        },
    )
    .await?;
    let metrics = admin_service::metrics(&state, &admin).await?.data.expect("metrics");
    assert_eq!(metrics.total_waste_processed, 310.0);
    Ok(())
}

#[tokio::test]
async fn admin_filters_users_by_role() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;

    let mitras = admin_service::list_users(
        &state,
        &common::admin(),
        UserQuery {
            role: Some(UserRole::Mitra),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("users");
    assert_eq!(mitras.items.len(), 2);
    assert!(mitras.items.iter().all(|u| u.role == UserRole::Mitra));

    let team = common::session(UserRole::Team, "team@reform.dev", "Team Lead");
    let err = admin_service::list_users(&state, &team, UserQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn absurd_weights_are_rejected_without_touching_totals() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let business_before = state
        .shared
        .read()
        .await
        .business("business-001")
        .cloned()
        .expect("business");
    let mitra_before = state.shared.read().await.mitra("mitra-001").cloned().expect("mitra");

    for weight in [1e300, f64::INFINITY, f64::NAN] {
        let err = business_service::add_contribution(
            &state,
            &business(),
            AddContributionRequest {
                waste_type: "Electronic Waste".into(),
                weight,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = mitra_service::log_collection(
            &state,
            &mitra(),
            LogCollectionRequest {
                business_id: Some("business-001".into()),
                business_name: None,
                waste_type: "Metal Waste".into(),
                weight,
                location: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    let err = mitra_service::update_collection(
        &state,
        &mitra(),
        "col-005",
        CollectionPatch {
            weight: Some(1e300),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let shared = state.shared.read().await;
    assert_eq!(shared.business("business-001"), Some(&business_before));
    assert_eq!(shared.mitra("mitra-001"), Some(&mitra_before));
    Ok(())
}

#[tokio::test]
async fn credit_balance_overflow_is_a_bad_request() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    admin_service::update_business(
        &state,
        &common::admin(),
        "business-001",
        BusinessPatch {
            green_credits: Some(i64::MAX - 10),
            ..Default::default()
        },
    )
    .await?;
    let contributions_before = state.shared.read().await.contributions().len();

    let err = business_service::add_contribution(
        &state,
        &business(),
        AddContributionRequest {
            waste_type: "Electronic Waste".into(),
            weight: 12.5,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let shared = state.shared.read().await;
    assert_eq!(shared.contributions().len(), contributions_before);
    assert_eq!(
        shared.business("business-001").map(|b| b.green_credits),
        Some(i64::MAX - 10)
    );
    Ok(())
}

#[tokio::test]
async fn admin_updates_mitras_businesses_and_users() -> anyhow::Result<()> {
    let (dir, state) = common::seeded_state().await?;
    let admin = common::admin();

    let mitra = admin_service::update_mitra(
        &state,
        &admin,
        "mitra-005",
        MitraPatch {
            status: Some(AccountStatus::Active),
            vehicle_type: Some("Mini Truck".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("mitra");
    assert_eq!(mitra.name, "Vikram Patel");
    assert_eq!(mitra.vehicle_type, "Mini Truck");
    assert_eq!(mitra.status, AccountStatus::Active);

    let business = admin_service::update_business(
        &state,
        &admin,
        "business-003",
        BusinessPatch {
            phone: Some("+91 22 4000 1234".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("business");
    assert_eq!(business.name, "Sustainable Industries");
    assert_eq!(business.phone, "+91 22 4000 1234");

    let user = admin_service::update_user(
        &state,
        &admin,
        "user-003",
        SystemUserPatch {
            name: Some("Robert Brown".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(user.name, "Robert Brown");
    assert_eq!(user.email, "bob@example.com");

    let stored = std::fs::read_to_string(dir.path().join(format!("{}.json", keys::SYSTEM_USERS)))?;
    assert!(stored.contains("Robert Brown"));

    let err = admin_service::update_mitra(&state, &admin, "mitra-404", MitraPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let team = common::session(UserRole::Team, "team@reform.dev", "Team Lead");
    let err = admin_service::update_business(&state, &team, "business-003", BusinessPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}
