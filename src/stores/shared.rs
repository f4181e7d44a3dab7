//! Cross-role records: mitras, businesses, pickups, contributions, users.
//!
//! Profile running totals are bumped when a related collection or
//! contribution is added. They are never recomputed from the event lists,
//! so editing an event afterwards leaves the profile totals as they were.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{
    AccountStatus, BusinessProfile, Collection, CollectionStatus, ContributionStatus,
    MitraProfile, Order, OrderStatus, SubscriptionTier, SystemMetrics, SystemUser, UserRole,
    WasteContribution,
};

use super::{StoreError, next_id, rates};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MitraDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_collections: i64,
    #[serde(default)]
    pub total_earnings: f64,
    #[serde(default)]
    pub efficiency: i64,
    pub status: AccountStatus,
    pub joined_date: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MitraPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_type: Option<String>,
    pub rating: Option<f64>,
    pub total_collections: Option<i64>,
    pub total_earnings: Option<f64>,
    pub efficiency: Option<i64>,
    pub status: Option<AccountStatus>,
    pub location: Option<String>,
}

impl MitraPatch {
    fn apply(self, mitra: &mut MitraProfile) {
        if let Some(v) = self.name {
            mitra.name = v;
        }
        if let Some(v) = self.email {
            mitra.email = v;
        }
        if let Some(v) = self.phone {
            mitra.phone = v;
        }
        if let Some(v) = self.vehicle_type {
            mitra.vehicle_type = v;
        }
        if let Some(v) = self.rating {
            mitra.rating = v;
        }
        if let Some(v) = self.total_collections {
            mitra.total_collections = v;
        }
        if let Some(v) = self.total_earnings {
            mitra.total_earnings = v;
        }
        if let Some(v) = self.efficiency {
            mitra.efficiency = v;
        }
        if let Some(v) = self.status {
            mitra.status = v;
        }
        if let Some(v) = self.location {
            mitra.location = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BusinessDraft {
    pub name: String,
    pub email: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub industry: String,
    #[serde(default)]
    pub green_credits: i64,
    #[serde(default)]
    pub total_waste_contributed: f64,
    #[serde(default)]
    pub co2_saved: f64,
    pub joined_date: String,
    pub subscription_tier: SubscriptionTier,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BusinessPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub green_credits: Option<i64>,
    pub total_waste_contributed: Option<f64>,
    pub co2_saved: Option<f64>,
    pub subscription_tier: Option<SubscriptionTier>,
}

impl BusinessPatch {
    fn apply(self, business: &mut BusinessProfile) {
        if let Some(v) = self.name {
            business.name = v;
        }
        if let Some(v) = self.email {
            business.email = v;
        }
        if let Some(v) = self.contact_person {
            business.contact_person = v;
        }
        if let Some(v) = self.phone {
            business.phone = v;
        }
        if let Some(v) = self.address {
            business.address = v;
        }
        if let Some(v) = self.industry {
            business.industry = v;
        }
        if let Some(v) = self.green_credits {
            business.green_credits = v;
        }
        if let Some(v) = self.total_waste_contributed {
            business.total_waste_contributed = v;
        }
        if let Some(v) = self.co2_saved {
            business.co2_saved = v;
        }
        if let Some(v) = self.subscription_tier {
            business.subscription_tier = v;
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectionDraft {
    pub mitra_id: String,
    pub mitra_name: String,
    pub business_id: String,
    pub business_name: String,
    pub waste_type: String,
    pub weight: f64,
    pub date: String,
    pub time: String,
    pub location: String,
    pub status: CollectionStatus,
    pub earnings: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CollectionPatch {
    pub waste_type: Option<String>,
    pub weight: Option<f64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: Option<CollectionStatus>,
    pub earnings: Option<f64>,
    pub notes: Option<String>,
}

impl CollectionPatch {
    fn apply(self, collection: &mut Collection) {
        if let Some(v) = self.waste_type {
            collection.waste_type = v;
        }
        if let Some(v) = self.weight {
            collection.weight = v;
        }
        if let Some(v) = self.date {
            collection.date = v;
        }
        if let Some(v) = self.time {
            collection.time = v;
        }
        if let Some(v) = self.location {
            collection.location = v;
        }
        if let Some(v) = self.status {
            collection.status = v;
        }
        if let Some(v) = self.earnings {
            collection.earnings = v;
        }
        if let Some(v) = self.notes {
            collection.notes = Some(v);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContributionDraft {
    pub business_id: String,
    pub business_name: String,
    pub waste_type: String,
    pub weight: f64,
    pub date: String,
    pub credits_earned: i64,
    pub co2_impact: f64,
    pub status: ContributionStatus,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContributionPatch {
    pub waste_type: Option<String>,
    pub weight: Option<f64>,
    pub date: Option<String>,
    pub credits_earned: Option<i64>,
    pub co2_impact: Option<f64>,
    pub status: Option<ContributionStatus>,
}

impl ContributionPatch {
    fn apply(self, contribution: &mut WasteContribution) {
        if let Some(v) = self.waste_type {
            contribution.waste_type = v;
        }
        if let Some(v) = self.weight {
            contribution.weight = v;
        }
        if let Some(v) = self.date {
            contribution.date = v;
        }
        if let Some(v) = self.credits_earned {
            contribution.credits_earned = v;
        }
        if let Some(v) = self.co2_impact {
            contribution.co2_impact = v;
        }
        if let Some(v) = self.status {
            contribution.status = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SystemUserDraft {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub joined_date: String,
    pub last_login: String,
    pub company: Option<String>,
    pub credits: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SystemUserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<AccountStatus>,
    pub last_login: Option<String>,
    pub company: Option<String>,
    pub credits: Option<i64>,
}

impl SystemUserPatch {
    fn apply(self, user: &mut SystemUser) {
        if let Some(v) = self.name {
            user.name = v;
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.role {
            user.role = v;
        }
        if let Some(v) = self.status {
            user.status = v;
        }
        if let Some(v) = self.last_login {
            user.last_login = v;
        }
        if let Some(v) = self.company {
            user.company = Some(v);
        }
        if let Some(v) = self.credits {
            user.credits = Some(v);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedData {
    mitras: Vec<MitraProfile>,
    businesses: Vec<BusinessProfile>,
    collections: Vec<Collection>,
    contributions: Vec<WasteContribution>,
    users: Vec<SystemUser>,
}

impl SharedData {
    pub fn new(
        mitras: Vec<MitraProfile>,
        businesses: Vec<BusinessProfile>,
        collections: Vec<Collection>,
        contributions: Vec<WasteContribution>,
        users: Vec<SystemUser>,
    ) -> Self {
        Self {
            mitras,
            businesses,
            collections,
            contributions,
            users,
        }
    }

    // mitras

    pub fn mitras(&self) -> &[MitraProfile] {
        &self.mitras
    }

    pub fn mitra(&self, id: &str) -> Option<&MitraProfile> {
        self.mitras.iter().find(|m| m.id == id)
    }

    pub fn mitra_by_email(&self, email: &str) -> Option<&MitraProfile> {
        self.mitras.iter().find(|m| m.email == email)
    }

    pub fn add_mitra(&mut self, draft: MitraDraft) -> MitraProfile {
        let id = next_id("mitra", self.mitras.iter().map(|m| m.id.as_str()));
        let mitra = MitraProfile {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            vehicle_type: draft.vehicle_type,
            rating: draft.rating,
            total_collections: draft.total_collections,
            total_earnings: draft.total_earnings,
            efficiency: draft.efficiency,
            status: draft.status,
            joined_date: draft.joined_date,
            location: draft.location,
        };
        self.mitras.insert(0, mitra.clone());
        mitra
    }

    pub fn update_mitra(&mut self, id: &str, patch: MitraPatch) -> Result<&MitraProfile, StoreError> {
        let mitra = self
            .mitras
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("mitra", id))?;
        patch.apply(mitra);
        Ok(mitra)
    }

    // businesses

    pub fn businesses(&self) -> &[BusinessProfile] {
        &self.businesses
    }

    pub fn business(&self, id: &str) -> Option<&BusinessProfile> {
        self.businesses.iter().find(|b| b.id == id)
    }

    pub fn business_by_email(&self, email: &str) -> Option<&BusinessProfile> {
        self.businesses.iter().find(|b| b.email == email)
    }

    pub fn business_by_name(&self, name: &str) -> Option<&BusinessProfile> {
        self.businesses.iter().find(|b| b.name == name)
    }

    pub fn add_business(&mut self, draft: BusinessDraft) -> BusinessProfile {
        let id = next_id("business", self.businesses.iter().map(|b| b.id.as_str()));
        let business = BusinessProfile {
            id,
            name: draft.name,
            email: draft.email,
            contact_person: draft.contact_person,
            phone: draft.phone,
            address: draft.address,
            industry: draft.industry,
            green_credits: draft.green_credits,
            total_waste_contributed: draft.total_waste_contributed,
            co2_saved: draft.co2_saved,
            joined_date: draft.joined_date,
            subscription_tier: draft.subscription_tier,
        };
        self.businesses.insert(0, business.clone());
        business
    }

    pub fn update_business(
        &mut self,
        id: &str,
        patch: BusinessPatch,
    ) -> Result<&BusinessProfile, StoreError> {
        let business = self
            .businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found("business", id))?;
        patch.apply(business);
        Ok(business)
    }

    // collections

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collections_by_mitra(&self, mitra_id: &str) -> Vec<&Collection> {
        self.collections
            .iter()
            .filter(|c| c.mitra_id == mitra_id)
            .collect()
    }

    pub fn collections_by_business(&self, business_id: &str) -> Vec<&Collection> {
        self.collections
            .iter()
            .filter(|c| c.business_id == business_id)
            .collect()
    }

    /// Records a pickup and bumps the mitra's collection count and earnings.
    pub fn add_collection(&mut self, draft: CollectionDraft) -> Result<Collection, StoreError> {
        if !rates::valid_weight(draft.weight) {
            return Err(StoreError::InvalidWeight);
        }
        let mitra_idx = self.mitras.iter().position(|m| m.id == draft.mitra_id);
        if let Some(idx) = mitra_idx {
            self.mitras[idx]
                .total_collections
                .checked_add(1)
                .ok_or(StoreError::TotalOverflow("mitra collection count"))?;
        }
        let id = next_id("col", self.collections.iter().map(|c| c.id.as_str()));
        let collection = Collection {
            id,
            mitra_id: draft.mitra_id,
            mitra_name: draft.mitra_name,
            business_id: draft.business_id,
            business_name: draft.business_name,
            waste_type: draft.waste_type,
            weight: draft.weight,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            status: draft.status,
            earnings: draft.earnings,
            notes: draft.notes,
        };
        self.collections.insert(0, collection.clone());

        if let Some(idx) = mitra_idx {
            let mitra = &mut self.mitras[idx];
            mitra.total_collections += 1;
            mitra.total_earnings += collection.earnings;
        }
        Ok(collection)
    }

    pub fn update_collection(
        &mut self,
        id: &str,
        patch: CollectionPatch,
    ) -> Result<&Collection, StoreError> {
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("collection", id))?;
        if patch.weight.is_some_and(|w| !rates::valid_weight(w)) {
            return Err(StoreError::InvalidWeight);
        }
        patch.apply(collection);
        Ok(collection)
    }

    // waste contributions

    pub fn contributions(&self) -> &[WasteContribution] {
        &self.contributions
    }

    pub fn contributions_by_business(&self, business_id: &str) -> Vec<&WasteContribution> {
        self.contributions
            .iter()
            .filter(|c| c.business_id == business_id)
            .collect()
    }

    /// Records a contribution and credits the business's running totals.
    pub fn add_contribution(
        &mut self,
        draft: ContributionDraft,
    ) -> Result<WasteContribution, StoreError> {
        if !rates::valid_weight(draft.weight) {
            return Err(StoreError::InvalidWeight);
        }
        // running totals are checked before anything is recorded
        let credited = match self.businesses.iter().position(|b| b.id == draft.business_id) {
            Some(idx) => Some((
                idx,
                self.businesses[idx]
                    .green_credits
                    .checked_add(draft.credits_earned)
                    .ok_or(StoreError::TotalOverflow("green credit balance"))?,
            )),
            None => None,
        };
        let id = next_id("waste", self.contributions.iter().map(|c| c.id.as_str()));
        let contribution = WasteContribution {
            id,
            business_id: draft.business_id,
            business_name: draft.business_name,
            waste_type: draft.waste_type,
            weight: draft.weight,
            date: draft.date,
            credits_earned: draft.credits_earned,
            co2_impact: draft.co2_impact,
            status: draft.status,
        };
        self.contributions.insert(0, contribution.clone());

        if let Some((idx, green_credits)) = credited {
            let business = &mut self.businesses[idx];
            business.green_credits = green_credits;
            business.total_waste_contributed += contribution.weight;
            business.co2_saved += contribution.co2_impact;
        }
        Ok(contribution)
    }

    pub fn update_contribution(
        &mut self,
        id: &str,
        patch: ContributionPatch,
    ) -> Result<&WasteContribution, StoreError> {
        let contribution = self
            .contributions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("waste contribution", id))?;
        if patch.weight.is_some_and(|w| !rates::valid_weight(w)) {
            return Err(StoreError::InvalidWeight);
        }
        patch.apply(contribution);
        Ok(contribution)
    }

    // system users

    pub fn users(&self) -> &[SystemUser] {
        &self.users
    }

    pub fn users_by_role(&self, role: UserRole) -> Vec<&SystemUser> {
        self.users.iter().filter(|u| u.role == role).collect()
    }

    pub fn user_by_email(&self, email: &str) -> Option<&SystemUser> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn add_user(&mut self, draft: SystemUserDraft) -> SystemUser {
        let id = next_id("user", self.users.iter().map(|u| u.id.as_str()));
        let user = SystemUser {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
            joined_date: draft.joined_date,
            last_login: draft.last_login,
            company: draft.company,
            credits: draft.credits,
        };
        self.users.insert(0, user.clone());
        user
    }

    pub fn update_user(&mut self, id: &str, patch: SystemUserPatch) -> Result<&SystemUser, StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        patch.apply(user);
        Ok(user)
    }

    /// Platform-wide figures, derived from the current record lists.
    pub fn metrics(&self, orders: &[Order]) -> SystemMetrics {
        SystemMetrics {
            total_users: self.users.len(),
            total_mitras: self.mitras.len(),
            total_businesses: self.businesses.len(),
            total_waste_processed: self.contributions.iter().map(|c| c.weight).sum(),
            total_revenue: orders
                .iter()
                .filter(|o| o.status != OrderStatus::Cancelled)
                .map(|o| o.total_price)
                .fold(0, i64::saturating_add),
            total_co2_saved: self.contributions.iter().map(|c| c.co2_impact).sum(),
            active_collections: self
                .collections
                .iter()
                .filter(|c| c.status.is_active())
                .count(),
            pending_orders: orders
                .iter()
                .filter(|o| matches!(o.status, OrderStatus::Pending | OrderStatus::Processing))
                .count(),
        }
    }
}
