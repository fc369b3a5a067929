use crate::route::RouteGraph;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Remaining seats per scheduled departure of one flight.
///
/// The departure key set is fixed at load time; only the counts behind
/// each per-departure lock change. Reserving against one departure
/// never blocks reservations against another departure or flight.
#[derive(Debug)]
pub struct FlightInventory {
    departures: HashMap<DateTime<Utc>, Mutex<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("No scheduled departure at {0}")]
    NoSuchDeparture(DateTime<Utc>),

    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: u32 },
}

impl FlightInventory {
    pub(crate) fn new(instances: impl IntoIterator<Item = (DateTime<Utc>, u32)>) -> Self {
        Self {
            departures: instances
                .into_iter()
                .map(|(departure_time, seats)| (departure_time, Mutex::new(seats)))
                .collect(),
        }
    }

    /// Check-and-decrement as one critical section on the departure's
    /// lock, so concurrent reservations cannot jointly oversell.
    /// Returns the seats remaining after the decrement.
    pub fn reserve(
        &self,
        departure_time: DateTime<Utc>,
        seats: u32,
    ) -> Result<u32, InventoryError> {
        let slot = self
            .departures
            .get(&departure_time)
            .ok_or(InventoryError::NoSuchDeparture(departure_time))?;
        let mut available = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if *available < seats {
            return Err(InventoryError::InsufficientSeats {
                requested: seats,
                available: *available,
            });
        }
        *available -= seats;
        Ok(*available)
    }

    /// Point-in-time seat count. May be stale by the time a booking is
    /// attempted; the booking path re-validates under the lock.
    pub fn seats_available(&self, departure_time: DateTime<Utc>) -> Option<u32> {
        self.departures
            .get(&departure_time)
            .map(|slot| *slot.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn departures(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.departures.keys().copied()
    }
}

/// A flight: its immutable route template plus per-departure seat
/// inventory.
#[derive(Debug)]
pub struct Flight {
    flight_number: String,
    route: RouteGraph,
    inventory: FlightInventory,
}

impl Flight {
    pub(crate) fn new(flight_number: String, route: RouteGraph, inventory: FlightInventory) -> Self {
        Self {
            flight_number,
            route,
            inventory,
        }
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn route(&self) -> &RouteGraph {
        &self.route
    }

    pub fn inventory(&self) -> &FlightInventory {
        &self.inventory
    }
}
