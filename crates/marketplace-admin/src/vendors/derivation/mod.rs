//! Derived vendor metrics consumed by the admin console.
//!
//! Every function here is pure: a raw [`VendorRecord`] and the evaluation instant go in, a fresh
//! [`VendorViewModel`] comes out. Missing inputs default to falsy values instead of failing, so
//! a sparse record still yields a complete view.

mod actions;
mod compliance;
mod metrics;
mod risk;
mod urgency;

pub use actions::{resolve_actions, ActionContext, VendorAction};
pub use compliance::{assess_compliance, ComplianceLevel, ComplianceStatus, MIN_DESCRIPTION_CHARS};
pub use metrics::{business_metrics, BusinessMetrics};
pub use risk::{
    score_risk, RiskAssessment, RiskFactor, RiskFactorKind, HIGH_RISK_THRESHOLD, MAX_RISK_SCORE,
};
pub use urgency::{classify_urgency, days_waiting, UrgencyLevel};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::VendorRecord;
use super::normalizer::{normalize, VendorProfileView};

/// Immutable snapshot rendered by the vendor management views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorViewModel {
    #[serde(flatten)]
    pub profile: VendorProfileView,
    pub days_waiting: Option<i64>,
    pub urgency_level: UrgencyLevel,
    pub risk_score: u8,
    pub risk_factors: Vec<RiskFactor>,
    pub business_metrics: BusinessMetrics,
    pub compliance_status: ComplianceStatus,
    pub available_actions: Vec<VendorAction>,
}

impl VendorViewModel {
    pub fn is_high_risk(&self) -> bool {
        self.risk_score > HIGH_RISK_THRESHOLD
    }
}

pub fn derive_view(record: &VendorRecord, now: DateTime<Utc>) -> VendorViewModel {
    let profile = normalize(record);
    let status = record.verification_status();

    let urgency_level = classify_urgency(record.created_at, status, now);
    let risk = score_risk(record, now);
    let compliance_status = assess_compliance(record, now);
    let available_actions = resolve_actions(&ActionContext {
        verification_status: status,
        is_active: record.is_active(),
        total_listings: record.total_listings(),
        risk_score: risk.score,
        compliance: compliance_status.status,
    });

    VendorViewModel {
        profile,
        days_waiting: record
            .created_at
            .map(|created| days_waiting(Some(created), now)),
        urgency_level,
        risk_score: risk.score,
        risk_factors: risk.factors,
        business_metrics: business_metrics(record),
        compliance_status,
        available_actions,
    }
}
