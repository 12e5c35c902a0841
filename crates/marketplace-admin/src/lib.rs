//! Vendor insights for the marketplace admin console.
//!
//! The crate derives risk, urgency, and compliance views from raw vendor records, runs the
//! verification workflow behind an HTTP router, and carries the small client-side state helpers
//! (optimistic list cache, settings reducer) the console relies on.

pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod settings;
pub mod telemetry;
pub mod vendors;
