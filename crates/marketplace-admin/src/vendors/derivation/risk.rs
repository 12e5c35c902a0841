use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{VendorRecord, VerificationStatus};
use super::urgency::days_waiting;

pub const MAX_RISK_SCORE: u8 = 100;
/// Scores above this value unlock the review and audit actions.
pub const HIGH_RISK_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    MissingBusinessLicense,
    MissingAddress,
    MissingDescription,
    PendingVerification,
    RejectedVerification,
    NoRecordedActivity,
    InactiveOverThirtyDays,
    InactiveOverSevenDays,
    NoListings,
    LowOrderVolume,
    LowRating,
}

/// Discrete contribution to a risk score, kept so reviewers can audit the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: RiskFactorKind,
    pub weight: u8,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u8,
    pub raw_score: u32,
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    pub fn is_high_risk(&self) -> bool {
        self.score > HIGH_RISK_THRESHOLD
    }
}

struct RiskTally {
    factors: Vec<RiskFactor>,
    total: u32,
}

impl RiskTally {
    fn add(&mut self, factor: RiskFactorKind, weight: u8, note: impl Into<String>) {
        self.total += u32::from(weight);
        self.factors.push(RiskFactor {
            factor,
            weight,
            note: note.into(),
        });
    }
}

pub fn score_risk(record: &VendorRecord, now: DateTime<Utc>) -> RiskAssessment {
    let mut tally = RiskTally {
        factors: Vec::new(),
        total: 0,
    };

    if !record.has_business_license() {
        tally.add(
            RiskFactorKind::MissingBusinessLicense,
            25,
            "no business license on file",
        );
    }
    if record.street().is_none() {
        tally.add(RiskFactorKind::MissingAddress, 20, "street address missing");
    }
    if record.business_description().is_empty() {
        tally.add(
            RiskFactorKind::MissingDescription,
            15,
            "business description missing",
        );
    }

    match record.verification_status() {
        VerificationStatus::Pending => tally.add(
            RiskFactorKind::PendingVerification,
            20,
            "verification still pending",
        ),
        VerificationStatus::Rejected => tally.add(
            RiskFactorKind::RejectedVerification,
            50,
            "verification was rejected",
        ),
        VerificationStatus::Approved => {}
    }

    match record.last_active_at {
        None => tally.add(
            RiskFactorKind::NoRecordedActivity,
            30,
            "no recorded activity",
        ),
        Some(last_active) => {
            let idle_days = days_waiting(Some(last_active), now);
            if idle_days > 30 {
                tally.add(
                    RiskFactorKind::InactiveOverThirtyDays,
                    25,
                    format!("inactive for {idle_days} days"),
                );
            }
            if idle_days > 7 {
                tally.add(
                    RiskFactorKind::InactiveOverSevenDays,
                    15,
                    format!("inactive for {idle_days} days"),
                );
            }
        }
    }

    if record.total_listings() == 0 {
        tally.add(RiskFactorKind::NoListings, 20, "no active listings");
    }
    let orders = record.total_orders();
    if orders < 5 {
        tally.add(
            RiskFactorKind::LowOrderVolume,
            15,
            format!("{orders} order(s) fulfilled"),
        );
    }
    let rating = record.average_rating();
    if rating < 3.0 {
        tally.add(
            RiskFactorKind::LowRating,
            25,
            format!("average rating {rating:.1} below 3.0"),
        );
    }

    let RiskTally { factors, total } = tally;
    RiskAssessment {
        score: total.min(u32::from(MAX_RISK_SCORE)) as u8,
        raw_score: total,
        factors,
    }
}
