use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for vendor records (the backend `_id`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub String);

impl VendorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VendorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pending, Self::Approved, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Owner account linked to the vendor (`userId` in the backend payload).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorOwner {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Raw vendor payload as returned by the marketplace backend.
///
/// Every field other than `_id` is optional; absent values fall back to falsy defaults so the
/// derivation pipeline never has to reject a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorRecord {
    #[serde(rename = "_id")]
    pub id: VendorId,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub business_description: Option<String>,
    #[serde(rename = "userId")]
    pub owner: Option<VendorOwner>,
    pub address: Option<VendorAddress>,
    pub verification_status: Option<VerificationStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub last_active_at: Option<DateTime<Utc>>,

    pub business_license: Option<String>,
    pub business_license_verified: Option<bool>,
    pub tax_id: Option<String>,
    pub bank_account_verified: Option<bool>,
    pub owner_identification: Option<String>,
    pub owner_identification_verified: Option<bool>,

    pub total_listings: Option<u32>,
    pub total_orders: Option<u32>,
    pub total_revenue: Option<f64>,
    pub average_rating: Option<f64>,
    pub total_ratings: Option<u32>,
    pub dispute_rate: Option<f64>,
    pub monthly_growth_rate: Option<f64>,
    pub returning_customers: Option<u32>,
    pub total_customers: Option<u32>,
    pub total_views: Option<u32>,

    pub is_suspended: Option<bool>,
    pub suspension_reason: Option<String>,
    pub rejection_reason: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl VendorRecord {
    pub fn verification_status(&self) -> VerificationStatus {
        self.verification_status.unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }

    pub fn is_suspended(&self) -> bool {
        self.is_suspended.unwrap_or(false)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn business_name(&self) -> &str {
        present(&self.business_name).unwrap_or("")
    }

    pub fn business_description(&self) -> &str {
        present(&self.business_description).unwrap_or("")
    }

    pub fn street(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|address| present(&address.street))
    }

    pub fn has_business_license(&self) -> bool {
        present(&self.business_license).is_some()
    }

    pub fn has_tax_id(&self) -> bool {
        present(&self.tax_id).is_some()
    }

    pub fn bank_account_verified(&self) -> bool {
        self.bank_account_verified.unwrap_or(false)
    }

    pub fn total_listings(&self) -> u32 {
        self.total_listings.unwrap_or(0)
    }

    pub fn total_orders(&self) -> u32 {
        self.total_orders.unwrap_or(0)
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue.unwrap_or(0.0)
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }

    pub fn total_ratings(&self) -> u32 {
        self.total_ratings.unwrap_or(0)
    }

    pub fn dispute_rate(&self) -> f64 {
        self.dispute_rate.unwrap_or(0.0)
    }
}
