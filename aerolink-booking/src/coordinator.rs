use crate::directory::CustomerDirectory;
use crate::models::Booking;
use crate::people::{CoPassenger, PartyMember, PersonProfile};
use aerolink_network::{FlightNetwork, InventoryError, RouteError};
use aerolink_shared::IdGenerator;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Booking-code marker prefixed to every generated booking id.
pub const BOOKING_PREFIX: &str = "KLM";

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Passenger list is empty")]
    EmptyPassengerList,

    #[error("Unknown customer: {0}")]
    UnknownCustomer(String),

    #[error("Unknown flight: {0}")]
    UnknownFlight(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Validates a booking request, reserves seats, and records the
/// resulting booking against the paying customer.
pub struct BookingCoordinator {
    network: Arc<FlightNetwork>,
    directory: CustomerDirectory,
    bookings: RwLock<HashMap<String, Booking>>,
    ids: Box<dyn IdGenerator>,
}

impl BookingCoordinator {
    pub fn new(
        network: Arc<FlightNetwork>,
        directory: CustomerDirectory,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            network,
            directory,
            bookings: RwLock::new(HashMap::new()),
            ids,
        }
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }

    pub fn booking(&self, id: &str) -> Option<Booking> {
        self.bookings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Book seats for an ordered passenger party between two airports
    /// on a scheduled departure. The first entry is the paying
    /// customer and must be registered.
    ///
    /// Every fallible step runs before the seat decrement, so a
    /// rejected request leaves inventory, the booking store, and the
    /// customer's booking list untouched. The decrement itself is the
    /// single serialized step, scoped to the (flight, departure) key.
    pub fn book(
        &self,
        flight_number: &str,
        source: &str,
        destination: &str,
        passengers: &[PartyMember],
        departure_time: DateTime<Utc>,
    ) -> Result<String, BookingError> {
        let Some((lead, companions)) = passengers.split_first() else {
            return Err(BookingError::EmptyPassengerList);
        };
        let customer_email = match lead {
            PartyMember::Registered { email_id } if self.directory.contains(email_id) => {
                email_id.clone()
            }
            PartyMember::Registered { email_id } => {
                return Err(BookingError::UnknownCustomer(email_id.clone()));
            }
            PartyMember::Guest {
                first_name,
                last_name,
                ..
            } => {
                return Err(BookingError::UnknownCustomer(format!(
                    "{} {}",
                    first_name, last_name
                )));
            }
        };

        let co_passengers = self.resolve_co_passengers(companions)?;

        let flight = self
            .network
            .flight(flight_number)
            .ok_or_else(|| BookingError::UnknownFlight(flight_number.to_string()))?;

        // Re-derive the itinerary before touching inventory: an
        // unreachable destination must reject the request without a
        // seat decrement to roll back.
        let details = flight.route().itinerary(source, destination)?;

        let seats = passengers.len() as u32;
        let remaining = flight.inventory().reserve(departure_time, seats)?;

        // Nothing below can fail; the reservation is committed.
        let id = format!("{}{}", BOOKING_PREFIX, self.ids.next_id());
        let booking = Booking {
            id: id.clone(),
            customer_email: customer_email.clone(),
            co_passengers,
            flight_number: flight_number.to_string(),
            itinerary: details.path,
            departure_time,
            created_at: Utc::now(),
        };
        self.bookings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), booking);
        self.directory.record_booking(&customer_email, id.clone());

        info!(
            booking = %id,
            flight = flight_number,
            seats,
            remaining,
            "booking recorded"
        );
        Ok(id)
    }

    /// Entries after the lead become co-passenger records by value: a
    /// guest from its own fields, a registered traveller from the
    /// directory profile.
    fn resolve_co_passengers(
        &self,
        companions: &[PartyMember],
    ) -> Result<Vec<CoPassenger>, BookingError> {
        companions
            .iter()
            .map(|member| match member {
                PartyMember::Guest {
                    first_name,
                    last_name,
                    age,
                } => Ok(CoPassenger {
                    profile: PersonProfile {
                        first_name: first_name.clone(),
                        last_name: last_name.clone(),
                        age: *age,
                    },
                }),
                PartyMember::Registered { email_id } => self
                    .directory
                    .profile_of(email_id)
                    .map(|profile| CoPassenger { profile })
                    .ok_or_else(|| BookingError::UnknownCustomer(email_id.clone())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::UserDescriptor;
    use aerolink_network::{AirportDescriptor, FlightDescriptor};
    use aerolink_shared::SequentialIdGenerator;
    use chrono::TimeZone;
    use serde_json::json;

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap()
    }

    fn network() -> Arc<FlightNetwork> {
        let airports = ["AMS", "CDG", "FCO"]
            .iter()
            .map(|code| AirportDescriptor {
                code: code.to_string(),
                name: format!("{} International", code),
                address: format!("{} City", code),
            })
            .collect();
        let flight: FlightDescriptor = serde_json::from_value(json!({
            "flightNumber": "KL1001",
            "source": {
                "iata": "AMS",
                "departureTime": "2026-03-01T06:00:00Z",
                "destination": {
                    "iata": "CDG",
                    "arrivalTime": "2026-03-01T07:10:00Z",
                    "departureTime": "2026-03-01T08:00:00Z",
                    "destination": {
                        "iata": "FCO",
                        "arrivalTime": "2026-03-01T10:05:00Z"
                    }
                }
            },
            "instances": [
                { "departureTime": "2026-03-01T06:00:00Z", "seats": 2 }
            ]
        }))
        .unwrap();
        Arc::new(FlightNetwork::build(airports, vec![flight]).unwrap())
    }

    fn coordinator() -> BookingCoordinator {
        let network = network();
        let users = vec![UserDescriptor {
            first_name: "Ada".to_string(),
            last_name: "Vermeer".to_string(),
            email_id: "ada@example.com".to_string(),
        }];
        let ids = SequentialIdGenerator::new();
        let directory = CustomerDirectory::from_descriptors(users, &ids);
        BookingCoordinator::new(network, directory, Box::new(ids))
    }

    fn registered(email: &str) -> PartyMember {
        PartyMember::Registered {
            email_id: email.to_string(),
        }
    }

    fn guest(first: &str, last: &str) -> PartyMember {
        PartyMember::Guest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            age: Some(30),
        }
    }

    #[test]
    fn books_and_records_against_the_customer() {
        let coordinator = coordinator();
        let id = coordinator
            .book(
                "KL1001",
                "AMS",
                "FCO",
                &[registered("ada@example.com"), guest("Bram", "de Wit")],
                departure(),
            )
            .unwrap();

        assert!(id.starts_with(BOOKING_PREFIX));
        let booking = coordinator.booking(&id).unwrap();
        assert_eq!(booking.itinerary, "AMS->CDG->FCO");
        assert_eq!(booking.customer_email, "ada@example.com");
        assert_eq!(booking.co_passengers.len(), 1);
        assert_eq!(booking.co_passengers[0].profile.first_name, "Bram");

        let ada = coordinator.directory().get("ada@example.com").unwrap();
        assert_eq!(ada.bookings(), [id.as_str()]);
    }

    #[test]
    fn rejects_empty_passenger_lists() {
        let coordinator = coordinator();
        let err = coordinator
            .book("KL1001", "AMS", "FCO", &[], departure())
            .unwrap_err();
        assert!(matches!(err, BookingError::EmptyPassengerList));
    }

    #[test]
    fn lead_passenger_must_be_a_registered_customer() {
        let coordinator = coordinator();
        let err = coordinator
            .book(
                "KL1001",
                "AMS",
                "FCO",
                &[registered("carla@example.com")],
                departure(),
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::UnknownCustomer(_)));

        let err = coordinator
            .book(
                "KL1001",
                "AMS",
                "FCO",
                &[guest("Bram", "de Wit")],
                departure(),
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::UnknownCustomer(_)));
    }

    #[test]
    fn rejects_unknown_flights() {
        let coordinator = coordinator();
        let err = coordinator
            .book(
                "KL9999",
                "AMS",
                "FCO",
                &[registered("ada@example.com")],
                departure(),
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::UnknownFlight(_)));
    }

    #[test]
    fn rejects_unknown_departures() {
        let coordinator = coordinator();
        let other = Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
        let err = coordinator
            .book(
                "KL1001",
                "AMS",
                "FCO",
                &[registered("ada@example.com")],
                other,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Inventory(InventoryError::NoSuchDeparture(_))
        ));
    }

    #[test]
    fn oversized_party_fails_without_touching_state() {
        let coordinator = coordinator();
        let err = coordinator
            .book(
                "KL1001",
                "AMS",
                "FCO",
                &[
                    registered("ada@example.com"),
                    guest("Bram", "de Wit"),
                    guest("Carla", "Jansen"),
                ],
                departure(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Inventory(InventoryError::InsufficientSeats {
                requested: 3,
                available: 2,
            })
        ));

        let flight = coordinator.network.flight("KL1001").unwrap();
        assert_eq!(flight.inventory().seats_available(departure()), Some(2));
        assert_eq!(coordinator.booking_count(), 0);
        let ada = coordinator.directory().get("ada@example.com").unwrap();
        assert!(ada.bookings().is_empty());
    }

    #[test]
    fn unreachable_itinerary_fails_before_any_seat_decrement() {
        let coordinator = coordinator();
        let err = coordinator
            .book(
                "KL1001",
                "FCO",
                "AMS",
                &[registered("ada@example.com")],
                departure(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Route(RouteError::UnreachableDestination { .. })
        ));

        let flight = coordinator.network.flight("KL1001").unwrap();
        assert_eq!(flight.inventory().seats_available(departure()), Some(2));
    }

    #[test]
    fn selling_out_then_rebooking_fails_with_insufficient_seats() {
        let coordinator = coordinator();
        let party = [registered("ada@example.com"), guest("Bram", "de Wit")];

        coordinator
            .book("KL1001", "AMS", "FCO", &party, departure())
            .unwrap();
        let err = coordinator
            .book("KL1001", "AMS", "FCO", &party, departure())
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Inventory(InventoryError::InsufficientSeats {
                requested: 2,
                available: 0,
            })
        ));
    }

    #[test]
    fn booking_ids_are_deterministic_with_the_sequential_generator() {
        let coordinator = coordinator();
        let party = [registered("ada@example.com")];

        let first = coordinator
            .book("KL1001", "AMS", "CDG", &party, departure())
            .unwrap();
        let second = coordinator
            .book("KL1001", "AMS", "CDG", &party, departure())
            .unwrap();
        // Account id 00000001 went to Ada at load time.
        assert_eq!(first, "KLM00000002");
        assert_eq!(second, "KLM00000003");
    }
}
