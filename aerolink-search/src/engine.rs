use crate::models::ItineraryResult;
use aerolink_network::{FlightNetwork, RouteError};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("No matching airport: {0}")]
    NoMatchingAirport(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Read-only itinerary search over the immutable flight network.
///
/// Safe to call from any number of threads alongside bookings; the
/// seat counts it never reads cannot go stale on it, and candidate
/// enumeration touches only load-time structures.
pub struct SearchEngine {
    network: Arc<FlightNetwork>,
}

impl SearchEngine {
    pub fn new(network: Arc<FlightNetwork>) -> Self {
        Self { network }
    }

    /// Enumerate flights whose routes pass through both airports and
    /// materialize itinerary details for each one departing `source`
    /// at or after `min_departure_time`.
    ///
    /// An empty result is a valid answer; only unknown airport codes
    /// are an error.
    pub fn search(
        &self,
        source: &str,
        destination: &str,
        min_departure_time: DateTime<Utc>,
    ) -> Result<Vec<ItineraryResult>, SearchError> {
        let src = self
            .network
            .airport(source)
            .ok_or_else(|| SearchError::NoMatchingAirport(source.to_string()))?;
        let dst = self
            .network
            .airport(destination)
            .ok_or_else(|| SearchError::NoMatchingAirport(destination.to_string()))?;

        // Direct routes, "source is a layover before the terminus",
        // "destination is a layover past the origin", and "both are
        // layovers". A BTreeSet dedupes flights landing in more than
        // one bucket and keeps the candidate order stable across
        // identical searches.
        let mut candidates: BTreeSet<&String> = BTreeSet::new();
        candidates.extend(src.originating_flights().intersection(dst.layover_flights()));
        candidates.extend(src.originating_flights().intersection(dst.terminating_flights()));
        candidates.extend(src.layover_flights().intersection(dst.terminating_flights()));
        candidates.extend(src.layover_flights().intersection(dst.layover_flights()));

        let mut results = Vec::new();
        for flight_number in candidates {
            let Some(flight) = self.network.flight(flight_number) else {
                continue;
            };

            // Time filter runs per candidate, before any traversal.
            // The terminal hop never departs, so a missing departure
            // time also drops the candidate.
            let hop = flight.route().get_hop(source)?;
            match hop.departure_time {
                Some(departure) if departure >= min_departure_time => {}
                _ => continue,
            }

            match flight.route().itinerary(source, destination) {
                Ok(details) => {
                    let (Some(departure_time), Some(arrival_time)) =
                        (details.departure_time, details.arrival_time)
                    else {
                        continue;
                    };
                    results.push(ItineraryResult {
                        flight_number: flight_number.clone(),
                        departure_time,
                        arrival_time,
                        itinerary: details.path,
                        hops: details.hops,
                    });
                }
                // The set arithmetic cannot see chain direction: a
                // flight where the destination physically precedes the
                // source still shows up as a candidate. The failed
                // forward walk is the rejection signal.
                Err(RouteError::UnreachableDestination { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        debug!(
            source,
            destination,
            results = results.len(),
            "itinerary search complete"
        );
        Ok(results)
    }
}
