use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{VendorAddress, VendorId, VendorRecord, VerificationStatus};

pub(crate) const MISSING_ADDRESS: &str = "Address not provided";
pub(crate) const NEVER_ACTIVE: &str = "Never";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat display model produced from a raw backend record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfileView {
    pub id: VendorId,
    pub business_name: String,
    pub business_type: String,
    pub business_description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub address: String,
    pub verification_status: VerificationStatus,
    pub verification_label: &'static str,
    pub is_active: bool,
    pub is_suspended: bool,
    pub created_on: String,
    pub last_active: String,
    pub documents: DocumentFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFlags {
    pub business_license: bool,
    pub business_license_verified: bool,
    pub tax_id: bool,
    pub bank_account_verified: bool,
    pub owner_identification: bool,
    pub owner_identification_verified: bool,
}

pub fn normalize(record: &VendorRecord) -> VendorProfileView {
    let owner = record.owner.clone().unwrap_or_default();
    let status = record.verification_status();

    VendorProfileView {
        id: record.id.clone(),
        business_name: collapse_whitespace(record.business_name()),
        business_type: text(&record.business_type),
        business_description: record.business_description().to_string(),
        owner_name: text(&owner.name),
        owner_email: text(&owner.email).to_ascii_lowercase(),
        owner_phone: text(&owner.phone),
        address: format_address(record.address.as_ref()),
        verification_status: status,
        verification_label: status.label(),
        is_active: record.is_active(),
        is_suspended: record.is_suspended(),
        created_on: format_date(record.created_at).unwrap_or_default(),
        last_active: format_date(record.last_active_at).unwrap_or_else(|| NEVER_ACTIVE.to_string()),
        documents: DocumentFlags {
            business_license: record.has_business_license(),
            business_license_verified: record.business_license_verified.unwrap_or(false),
            tax_id: record.has_tax_id(),
            bank_account_verified: record.bank_account_verified(),
            owner_identification: record
                .owner_identification
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty()),
            owner_identification_verified: record.owner_identification_verified.unwrap_or(false),
        },
    }
}

/// Renders `street, city, state zip`, skipping any part the backend left blank.
pub(crate) fn format_address(address: Option<&VendorAddress>) -> String {
    let Some(address) = address else {
        return MISSING_ADDRESS.to_string();
    };

    let region = [&address.state, &address.zip_code]
        .into_iter()
        .map(text)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let parts = [text(&address.street), text(&address.city), region]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

    if parts.is_empty() {
        MISSING_ADDRESS.to_string()
    } else {
        parts.join(", ")
    }
}

pub(crate) fn format_date(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|timestamp| timestamp.format(DATE_FORMAT).to_string())
}

fn text(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(collapse_whitespace)
        .unwrap_or_default()
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
