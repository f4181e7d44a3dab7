use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    BusinessProfile, Certificate, Collection, MitraProfile, SystemUser, WasteContribution,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LogCollectionRequest {
    /// Either the business id or its exact name must be given.
    pub business_id: Option<String>,
    pub business_name: Option<String>,
    pub waste_type: String,
    pub weight: f64,
    /// Defaults to the business address.
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddContributionRequest {
    pub waste_type: String,
    pub weight: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionList {
    pub items: Vec<Collection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContributionList {
    pub items: Vec<WasteContribution>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MitraList {
    pub items: Vec<MitraProfile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BusinessList {
    pub items: Vec<BusinessProfile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<SystemUser>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateList {
    pub items: Vec<Certificate>,
}
