use serde::Serialize;

use super::derivation::{ComplianceLevel, UrgencyLevel, VendorViewModel};
use super::domain::VerificationStatus;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountEntry<T> {
    pub key: T,
    pub label: &'static str,
    pub count: usize,
}

/// Directory-wide rollup shown on the admin analytics panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub suspended: usize,
    pub verification: Vec<StatusCountEntry<VerificationStatus>>,
    pub urgency: Vec<StatusCountEntry<UrgencyLevel>>,
    pub compliance: Vec<StatusCountEntry<ComplianceLevel>>,
    pub high_risk: usize,
    pub average_risk_score: f64,
}

pub fn summarize(views: &[VendorViewModel]) -> DirectorySummary {
    let total = views.len();
    let active = views.iter().filter(|view| view.profile.is_active).count();
    let suspended = views.iter().filter(|view| view.profile.is_suspended).count();

    let verification = VerificationStatus::ordered()
        .into_iter()
        .map(|status| StatusCountEntry {
            key: status,
            label: status.label(),
            count: views
                .iter()
                .filter(|view| view.profile.verification_status == status)
                .count(),
        })
        .collect();

    let urgency = UrgencyLevel::ordered()
        .into_iter()
        .map(|level| StatusCountEntry {
            key: level,
            label: level.label(),
            count: views
                .iter()
                .filter(|view| view.urgency_level == level)
                .count(),
        })
        .collect();

    let compliance = ComplianceLevel::ordered()
        .into_iter()
        .map(|level| StatusCountEntry {
            key: level,
            label: level.label(),
            count: views
                .iter()
                .filter(|view| view.compliance_status.status == level)
                .count(),
        })
        .collect();

    let high_risk = views.iter().filter(|view| view.is_high_risk()).count();
    let average_risk_score = if total > 0 {
        let sum: u32 = views.iter().map(|view| u32::from(view.risk_score)).sum();
        ((f64::from(sum) / total as f64) * 10.0).round() / 10.0
    } else {
        0.0
    };

    DirectorySummary {
        total,
        active,
        inactive: total - active,
        suspended,
        verification,
        urgency,
        compliance,
        high_risk,
        average_risk_score,
    }
}

impl DirectorySummary {
    pub fn verification_count(&self, status: VerificationStatus) -> usize {
        self.verification
            .iter()
            .find(|entry| entry.key == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn urgency_count(&self, level: UrgencyLevel) -> usize {
        self.urgency
            .iter()
            .find(|entry| entry.key == level)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
