use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::derivation::{derive_view, UrgencyLevel, VendorViewModel};
use super::domain::{VendorRecord, VerificationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorSort {
    /// Oldest registration first; records without a creation date come last.
    #[default]
    Created,
    /// Most urgent verification first, oldest first within a tier.
    Urgency,
    /// Highest risk score first.
    Risk,
    Name,
}

/// Directory filters accepted by the admin vendor list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorQuery {
    pub verification_status: Option<VerificationStatus>,
    pub urgency: Option<UrgencyLevel>,
    pub min_risk: Option<u8>,
    pub active: Option<bool>,
    pub search: Option<String>,
    pub sort: Option<VendorSort>,
}

impl VendorQuery {
    fn matches(&self, view: &VendorViewModel) -> bool {
        if let Some(status) = self.verification_status {
            if view.profile.verification_status != status {
                return false;
            }
        }
        if let Some(urgency) = self.urgency {
            if view.urgency_level != urgency {
                return false;
            }
        }
        if let Some(min_risk) = self.min_risk {
            if view.risk_score < min_risk {
                return false;
            }
        }
        if let Some(active) = self.active {
            if view.profile.is_active != active {
                return false;
            }
        }

        match self.search_term() {
            Some(term) => [
                &view.profile.business_name,
                &view.profile.owner_name,
                &view.profile.owner_email,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// Derives views for every live record, then filters and orders them.
    pub fn apply(&self, records: &[VendorRecord], now: DateTime<Utc>) -> Vec<VendorViewModel> {
        let mut rows: Vec<(Option<DateTime<Utc>>, VendorViewModel)> = records
            .iter()
            .filter(|record| !record.is_deleted())
            .map(|record| (record.created_at, derive_view(record, now)))
            .filter(|(_, view)| self.matches(view))
            .collect();

        match self.sort.unwrap_or_default() {
            VendorSort::Created => rows.sort_by(|(a_created, a), (b_created, b)| {
                created_order(a_created, b_created)
                    .then_with(|| a.profile.id.cmp(&b.profile.id))
            }),
            VendorSort::Urgency => rows.sort_by(|(a_created, a), (b_created, b)| {
                b.urgency_level
                    .cmp(&a.urgency_level)
                    .then_with(|| created_order(a_created, b_created))
                    .then_with(|| a.profile.id.cmp(&b.profile.id))
            }),
            VendorSort::Risk => rows.sort_by(|(_, a), (_, b)| {
                b.risk_score
                    .cmp(&a.risk_score)
                    .then_with(|| a.profile.id.cmp(&b.profile.id))
            }),
            VendorSort::Name => rows.sort_by(|(_, a), (_, b)| {
                a.profile
                    .business_name
                    .to_lowercase()
                    .cmp(&b.profile.business_name.to_lowercase())
                    .then_with(|| a.profile.id.cmp(&b.profile.id))
            }),
        }

        rows.into_iter().map(|(_, view)| view).collect()
    }
}

fn created_order(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
