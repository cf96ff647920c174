use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An appointment-tracking event produced by the upstream checker.
///
/// All text fields come from scraped upstream data and are untrusted — they
/// must never reach a markup-enabled transport without escaping. Required
/// fields are enforced at deserialization time; an event missing any of them
/// is rejected at the process boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentEvent {
    /// Appointment slot status label (e.g., "active", "waitlist_open").
    pub status: String,

    /// Application center / location label (e.g., "Berlin").
    pub center: String,

    /// ISO country code of the applicant side (e.g., "tr").
    pub country_code: String,

    /// ISO country code of the destination mission (e.g., "de").
    pub mission_code: String,

    /// Visa category label (e.g., "tourism").
    pub visa_category: String,

    /// Visa type label (e.g., "short-stay").
    pub visa_type: String,

    /// Earliest available appointment date as reported upstream.
    /// `None` when the source publishes no availability information.
    pub last_available_date: Option<String>,

    /// Number of consecutive checks this slot has been tracked for.
    pub tracking_count: u64,

    /// When the upstream checker last inspected the slot.
    pub last_checked_at: DateTime<Utc>,
}
