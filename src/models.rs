use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub credits: i64,
    pub image: String,
    pub description: String,
    pub highlight: String,
    pub rating: f64,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Credits,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Credits => "Credits",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
    pub payment_method: PaymentMethod,
}

impl CartItem {
    pub fn cash_amount(&self) -> i64 {
        match self.payment_method {
            PaymentMethod::Cash => self.product.price.saturating_mul(self.quantity),
            PaymentMethod::Credits => 0,
        }
    }

    pub fn credit_amount(&self) -> i64 {
        match self.payment_method {
            PaymentMethod::Credits => self.product.credits.saturating_mul(self.quantity),
            PaymentMethod::Cash => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingAddress {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Still on its way to the customer.
    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total_price: i64,
    pub total_credits: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub customer_email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl CollectionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CollectionStatus::Scheduled | CollectionStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Collection {
    pub id: String,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Pending,
    Processed,
    Verified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WasteContribution {
    pub id: String,
    pub business_id: String,
    pub business_name: String,
    pub waste_type: String,
    pub weight: f64,
    pub date: String,
    pub credits_earned: i64,
    pub co2_impact: f64,
    pub status: ContributionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MitraProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub rating: f64,
    pub total_collections: i64,
    pub total_earnings: f64,
    pub efficiency: i64,
    pub status: AccountStatus,
    pub joined_date: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Basic,
    Premium,
    Enterprise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub industry: String,
    pub green_credits: i64,
    pub total_waste_contributed: f64,
    pub co2_saved: f64,
    pub joined_date: String,
    pub subscription_tier: SubscriptionTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Team,
    Mitra,
    Business,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Team => "team",
            UserRole::Mitra => "mitra",
            UserRole::Business => "business",
            UserRole::Admin => "admin",
        }
    }

    /// Roles that see the back-office views (all orders, catalog edits).
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub joined_date: String,
    pub last_login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemMetrics {
    pub total_users: usize,
    pub total_mitras: usize,
    pub total_businesses: usize,
    pub total_waste_processed: f64,
    pub total_revenue: i64,
    pub total_co2_saved: f64,
    pub active_collections: usize,
    pub pending_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Certificate {
    pub certificate_id: String,
    pub certificate_type: String,
    pub issued_date: String,
    pub valid_until: String,
    pub waste_amount: String,
    pub co2_saved: String,
    pub status: String,
}
