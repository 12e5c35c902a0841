use serde::Serialize;

use super::derivation::VendorViewModel;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv output: {0}")]
    Flush(String),
    #[error("csv output was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize)]
struct VendorExportRow<'a> {
    id: &'a str,
    business_name: &'a str,
    owner_name: &'a str,
    owner_email: &'a str,
    verification_status: &'static str,
    urgency_level: &'static str,
    risk_score: u8,
    compliance_status: &'static str,
    issue_count: usize,
    conversion_rate: f64,
    average_order_value: f64,
}

impl<'a> From<&'a VendorViewModel> for VendorExportRow<'a> {
    fn from(view: &'a VendorViewModel) -> Self {
        Self {
            id: view.profile.id.as_str(),
            business_name: &view.profile.business_name,
            owner_name: &view.profile.owner_name,
            owner_email: &view.profile.owner_email,
            verification_status: view.profile.verification_status.as_str(),
            urgency_level: view.urgency_level.as_str(),
            risk_score: view.risk_score,
            compliance_status: view.compliance_status.status.as_str(),
            issue_count: view.compliance_status.issues.len(),
            conversion_rate: view.business_metrics.conversion_rate,
            average_order_value: view.business_metrics.average_order_value,
        }
    }
}

pub const EXPORT_HEADER: [&str; 11] = [
    "id",
    "business_name",
    "owner_name",
    "owner_email",
    "verification_status",
    "urgency_level",
    "risk_score",
    "compliance_status",
    "issue_count",
    "conversion_rate",
    "average_order_value",
];

/// Renders the directory as CSV. The header is written even when no vendors match.
pub fn vendors_to_csv(views: &[VendorViewModel]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for view in views {
        writer.serialize(VendorExportRow::from(view))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
