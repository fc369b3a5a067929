use crate::people::CoPassenger;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A committed reservation. Immutable once stored; cancellation is out
/// of scope, so records are never deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking-code marker plus generated id, e.g. `KLM00000001`.
    pub id: String,
    pub customer_email: String,
    pub co_passengers: Vec<CoPassenger>,
    pub flight_number: String,
    /// `->`-joined airport codes between the booked endpoints.
    pub itinerary: String,
    pub departure_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
