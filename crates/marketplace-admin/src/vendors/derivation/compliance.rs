use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::VendorRecord;

pub const MIN_DESCRIPTION_CHARS: usize = 50;
const LOW_RATING_THRESHOLD: f64 = 3.5;
const LOW_RATING_MIN_RATINGS: u32 = 10;
const MAX_DISPUTE_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    Compliant,
    MinorIssues,
    MajorIssues,
}

impl ComplianceLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Compliant, Self::MinorIssues, Self::MajorIssues]
    }

    pub const fn for_issue_count(count: usize) -> Self {
        match count {
            0 => Self::Compliant,
            1 | 2 => Self::MinorIssues,
            _ => Self::MajorIssues,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::MinorIssues => "Minor issues",
            Self::MajorIssues => "Major issues",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::MinorIssues => "minor_issues",
            Self::MajorIssues => "major_issues",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    pub status: ComplianceLevel,
    pub issues: Vec<String>,
    pub last_checked: DateTime<Utc>,
}

impl ComplianceStatus {
    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceLevel::Compliant
    }
}

/// Runs the documentation and policy checklist in a fixed order.
pub fn assess_compliance(record: &VendorRecord, checked_at: DateTime<Utc>) -> ComplianceStatus {
    let mut issues = Vec::new();

    if !record.has_business_license() {
        issues.push("Missing business license".to_string());
    }
    if !record.has_tax_id() {
        issues.push("Missing tax ID".to_string());
    }
    if !record.bank_account_verified() {
        issues.push("Bank account not verified".to_string());
    }
    if record.business_description().chars().count() < MIN_DESCRIPTION_CHARS {
        issues.push(format!(
            "Business description shorter than {MIN_DESCRIPTION_CHARS} characters"
        ));
    }
    if record.street().is_none() {
        issues.push("Missing business address".to_string());
    }

    let rating = record.average_rating();
    let ratings = record.total_ratings();
    if rating < LOW_RATING_THRESHOLD && ratings > LOW_RATING_MIN_RATINGS {
        issues.push(format!(
            "Average rating {rating:.1} below {LOW_RATING_THRESHOLD:.1} across {ratings} ratings"
        ));
    }

    let dispute_rate = record.dispute_rate();
    if dispute_rate > MAX_DISPUTE_RATE {
        issues.push(format!(
            "Dispute rate {:.1}% exceeds {:.0}%",
            dispute_rate * 100.0,
            MAX_DISPUTE_RATE * 100.0
        ));
    }

    ComplianceStatus {
        status: ComplianceLevel::for_issue_count(issues.len()),
        issues,
        last_checked: checked_at,
    }
}
