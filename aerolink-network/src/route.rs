use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One scheduled stop of a flight's physical route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryHop {
    pub code: String,
    /// Absent on the first hop of a route.
    pub arrival_time: Option<DateTime<Utc>>,
    /// Absent on the last hop of a route.
    pub departure_time: Option<DateTime<Utc>>,
}

/// The full ordered chain of hops composing one flight's itinerary
/// template, independent of any calendar departure.
///
/// Stored as a vector with a position index rather than a linked map,
/// so adjacency is fixed at construction and a traversal cannot loop.
/// Built once by the network loader and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    hops: Vec<ItineraryHop>,
    positions: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Airport not on route: {0}")]
    UnknownAirportInRoute(String),

    #[error("No forward path from {from} to {to}")]
    UnreachableDestination { from: String, to: String },
}

/// Itinerary details between two airports on a single flight's route.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// `->`-joined airport codes in traversal order.
    pub path: String,
    /// Edges traversed between source and destination.
    pub hops: u32,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
}

impl RouteGraph {
    /// Assemble a route from an ordered hop chain.
    ///
    /// The loader guarantees the chain holds at least two hops and
    /// never revisits an airport, so every code maps to one position.
    pub(crate) fn new(hops: Vec<ItineraryHop>) -> Self {
        let positions = hops
            .iter()
            .enumerate()
            .map(|(pos, hop)| (hop.code.clone(), pos))
            .collect();
        Self { hops, positions }
    }

    /// The hop record at `code`.
    pub fn get_hop(&self, code: &str) -> Result<&ItineraryHop, RouteError> {
        self.positions
            .get(code)
            .map(|&pos| &self.hops[pos])
            .ok_or_else(|| RouteError::UnknownAirportInRoute(code.to_string()))
    }

    /// The hop that follows `code` in the chain, or None at the
    /// terminal hop.
    pub fn hop_next(&self, code: &str) -> Result<Option<&ItineraryHop>, RouteError> {
        let &pos = self
            .positions
            .get(code)
            .ok_or_else(|| RouteError::UnknownAirportInRoute(code.to_string()))?;
        Ok(self.hops.get(pos + 1))
    }

    pub fn origin(&self) -> &ItineraryHop {
        &self.hops[0]
    }

    pub fn terminus(&self) -> &ItineraryHop {
        &self.hops[self.hops.len() - 1]
    }

    pub fn hops(&self) -> &[ItineraryHop] {
        &self.hops
    }

    /// Walk forward from `source` until `destination`, accumulating
    /// the path string, the edge count, and the boundary times.
    ///
    /// Reaching the terminal hop without matching `destination` fails
    /// with `UnreachableDestination`: the route does not offer that
    /// connection in that direction.
    pub fn itinerary(&self, source: &str, destination: &str) -> Result<Itinerary, RouteError> {
        let mut current = self.get_hop(source)?;
        let departure_time = current.departure_time;
        let mut path = current.code.clone();
        let mut hops = 0u32;

        while current.code != destination {
            current = self.hop_next(&current.code)?.ok_or_else(|| {
                RouteError::UnreachableDestination {
                    from: source.to_string(),
                    to: destination.to_string(),
                }
            })?;
            path.push_str("->");
            path.push_str(&current.code);
            hops += 1;
        }

        Ok(Itinerary {
            path,
            hops,
            departure_time,
            arrival_time: current.arrival_time,
        })
    }
}
