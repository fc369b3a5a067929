use aerolink_booking::{
    Booking, BookingCoordinator, BookingError, Customer, CustomerDirectory, PartyMember,
    UserDescriptor,
};
use aerolink_network::{AirportDescriptor, FlightDescriptor, FlightNetwork, LoadError};
use aerolink_search::{ItineraryResult, SearchEngine, SearchError};
use aerolink_shared::{IdGenerator, UuidIdGenerator};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Embeddable facade over the flight network: load the static
/// descriptors once, then search and book from any thread.
///
/// Searches run lock-free against the immutable network; bookings
/// contend only on their own (flight, departure) key.
pub struct FlightBookingService {
    network: Arc<FlightNetwork>,
    search: SearchEngine,
    booking: BookingCoordinator,
}

impl FlightBookingService {
    /// Build from validated load-time descriptors with random ids.
    pub fn load(
        airports: Vec<AirportDescriptor>,
        flights: Vec<FlightDescriptor>,
        users: Vec<UserDescriptor>,
    ) -> Result<Self, LoadError> {
        Self::load_with_ids(airports, flights, users, Box::new(UuidIdGenerator))
    }

    /// Build with an injected id generator; tests hand in a sequential
    /// one for reproducible account and booking ids.
    pub fn load_with_ids(
        airports: Vec<AirportDescriptor>,
        flights: Vec<FlightDescriptor>,
        users: Vec<UserDescriptor>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, LoadError> {
        let network = Arc::new(FlightNetwork::build(airports, flights)?);
        let directory = CustomerDirectory::from_descriptors(users, ids.as_ref());
        let search = SearchEngine::new(Arc::clone(&network));
        let booking = BookingCoordinator::new(Arc::clone(&network), directory, ids);
        info!(
            airports = network.airports().count(),
            flights = network.flights().count(),
            "flight booking service loaded"
        );
        Ok(Self {
            network,
            search,
            booking,
        })
    }

    pub fn network(&self) -> &FlightNetwork {
        &self.network
    }

    /// Feasible itineraries from `source` to `destination` departing
    /// at or after `min_departure_time`.
    pub fn search(
        &self,
        source: &str,
        destination: &str,
        min_departure_time: DateTime<Utc>,
    ) -> Result<Vec<ItineraryResult>, SearchError> {
        self.search.search(source, destination, min_departure_time)
    }

    /// Reserve seats for the passenger party on a scheduled departure
    /// and return the generated booking id.
    pub fn book(
        &self,
        flight_number: &str,
        source: &str,
        destination: &str,
        passengers: &[PartyMember],
        departure_time: DateTime<Utc>,
    ) -> Result<String, BookingError> {
        self.booking
            .book(flight_number, source, destination, passengers, departure_time)
    }

    pub fn booking(&self, id: &str) -> Option<Booking> {
        self.booking.booking(id)
    }

    pub fn customer(&self, email: &str) -> Option<Customer> {
        self.booking.directory().get(email)
    }
}
