pub mod airport;
pub mod flight;
pub mod loader;
pub mod route;

pub use airport::Airport;
pub use flight::{Flight, FlightInventory, InventoryError};
pub use loader::{
    AirportDescriptor, DepartureInstanceDescriptor, FlightDescriptor, FlightNetwork, LoadError,
    RouteLegDescriptor,
};
pub use route::{Itinerary, ItineraryHop, RouteError, RouteGraph};
