use crate::airport::Airport;
use crate::flight::{Flight, FlightInventory};
use crate::route::{ItineraryHop, RouteGraph};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Load-time airport record, validated upstream by the data feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportDescriptor {
    pub code: String,
    pub name: String,
    pub address: String,
}

/// Load-time flight record: number, the right-recursive route chain,
/// and the scheduled departure instances carrying seat inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDescriptor {
    pub flight_number: String,
    pub source: RouteLegDescriptor,
    #[serde(default)]
    pub instances: Vec<DepartureInstanceDescriptor>,
}

/// One node of the nested route chain. The chain terminates at the
/// node with no `destination`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLegDescriptor {
    pub iata: String,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    pub destination: Option<Box<RouteLegDescriptor>>,
}

/// A scheduled calendar departure of a flight's route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureInstanceDescriptor {
    pub departure_time: DateTime<Utc>,
    pub seats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Duplicate airport code: {0}")]
    DuplicateAirport(String),

    #[error("Duplicate flight number: {0}")]
    DuplicateFlight(String),

    #[error("Flight {flight_number} references unknown airport {code}")]
    UnknownAirport {
        flight_number: String,
        code: String,
    },

    #[error("Flight {flight_number} revisits airport {code}")]
    CyclicRoute {
        flight_number: String,
        code: String,
    },

    #[error("Flight {flight_number} needs at least two airports on its route")]
    RouteTooShort { flight_number: String },
}

/// The immutable flight network: airports with their classification
/// sets, and flights with their route graphs and inventories.
///
/// Built once from static descriptors. After `build` returns, nothing
/// here changes except the seat counts inside each flight's inventory.
#[derive(Debug)]
pub struct FlightNetwork {
    airports: HashMap<String, Airport>,
    flights: HashMap<String, Flight>,
}

impl FlightNetwork {
    pub fn build(
        airports: Vec<AirportDescriptor>,
        flights: Vec<FlightDescriptor>,
    ) -> Result<Self, LoadError> {
        let mut airport_map: HashMap<String, Airport> = HashMap::new();
        for descriptor in airports {
            if airport_map.contains_key(&descriptor.code) {
                return Err(LoadError::DuplicateAirport(descriptor.code));
            }
            airport_map.insert(
                descriptor.code.clone(),
                Airport::new(descriptor.code, descriptor.name, descriptor.address),
            );
        }

        let mut flight_map: HashMap<String, Flight> = HashMap::new();
        for descriptor in flights {
            let flight_number = descriptor.flight_number.clone();
            if flight_map.contains_key(&flight_number) {
                return Err(LoadError::DuplicateFlight(flight_number));
            }

            let hops = flatten_chain(&descriptor)?;
            classify_hops(&mut airport_map, &flight_number, &hops)?;

            let inventory = FlightInventory::new(
                descriptor
                    .instances
                    .iter()
                    .map(|instance| (instance.departure_time, instance.seats)),
            );
            let route = RouteGraph::new(hops);
            info!(
                flight = %flight_number,
                stops = route.hops().len(),
                departures = descriptor.instances.len(),
                "registered flight route"
            );
            flight_map.insert(
                flight_number.clone(),
                Flight::new(flight_number, route, inventory),
            );
        }

        Ok(Self {
            airports: airport_map,
            flights: flight_map,
        })
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn flight(&self, flight_number: &str) -> Option<&Flight> {
        self.flights.get(flight_number)
    }

    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.flights.values()
    }
}

/// Unroll the right-recursive descriptor chain into ordered hops,
/// rejecting revisited airports so a malformed feed cannot smuggle a
/// cycle into what must be a finite chain.
fn flatten_chain(descriptor: &FlightDescriptor) -> Result<Vec<ItineraryHop>, LoadError> {
    let mut hops = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut leg = &descriptor.source;

    loop {
        if !seen.insert(&leg.iata) {
            return Err(LoadError::CyclicRoute {
                flight_number: descriptor.flight_number.clone(),
                code: leg.iata.clone(),
            });
        }
        match &leg.destination {
            Some(next) => {
                hops.push(ItineraryHop {
                    code: leg.iata.clone(),
                    arrival_time: leg.arrival_time,
                    departure_time: leg.departure_time,
                });
                leg = next;
            }
            None => {
                // The terminal hop never advertises a departure.
                hops.push(ItineraryHop {
                    code: leg.iata.clone(),
                    arrival_time: leg.arrival_time,
                    departure_time: None,
                });
                break;
            }
        }
    }

    if hops.len() < 2 {
        return Err(LoadError::RouteTooShort {
            flight_number: descriptor.flight_number.clone(),
        });
    }
    Ok(hops)
}

/// First hop originates the flight, interior hops are layovers, the
/// last hop terminates it.
fn classify_hops(
    airports: &mut HashMap<String, Airport>,
    flight_number: &str,
    hops: &[ItineraryHop],
) -> Result<(), LoadError> {
    let last = hops.len() - 1;
    for (pos, hop) in hops.iter().enumerate() {
        let airport = airports
            .get_mut(&hop.code)
            .ok_or_else(|| LoadError::UnknownAirport {
                flight_number: flight_number.to_string(),
                code: hop.code.clone(),
            })?;
        if pos == 0 {
            airport.add_originating_flight(flight_number);
        } else if pos == last {
            airport.add_terminating_flight(flight_number);
        } else {
            airport.add_layover_flight(flight_number);
        }
    }
    Ok(())
}
