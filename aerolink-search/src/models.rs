use chrono::{DateTime, Utc};
use serde::Serialize;

/// One bookable itinerary surfaced by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub flight_number: String,
    /// Departure from the searched source airport.
    pub departure_time: DateTime<Utc>,
    /// Arrival at the searched destination airport.
    pub arrival_time: DateTime<Utc>,
    /// `->`-joined airport codes in traversal order.
    pub itinerary: String,
    /// Edges traversed between source and destination.
    pub hops: u32,
}
