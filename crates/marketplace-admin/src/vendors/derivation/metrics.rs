use serde::{Deserialize, Serialize};

use super::super::domain::VendorRecord;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    /// Orders per hundred listing views.
    pub conversion_rate: f64,
    pub average_order_value: f64,
    /// Orders per listing.
    pub listings_performance: f64,
    /// Share of customers who ordered more than once, as a percentage.
    pub customer_retention: f64,
    pub monthly_growth: f64,
}

pub fn business_metrics(record: &VendorRecord) -> BusinessMetrics {
    let orders = f64::from(record.total_orders());
    let views = f64::from(record.total_views.unwrap_or(0));
    let listings = f64::from(record.total_listings());
    let customers = f64::from(record.total_customers.unwrap_or(0));
    let returning = f64::from(record.returning_customers.unwrap_or(0));

    BusinessMetrics {
        conversion_rate: round2(ratio(orders, views) * 100.0),
        average_order_value: round2(ratio(record.total_revenue(), orders)),
        listings_performance: round2(ratio(orders, listings)),
        customer_retention: round2(ratio(returning, customers) * 100.0),
        monthly_growth: round2(record.monthly_growth_rate.unwrap_or(0.0)),
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && numerator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}
