pub mod service;

pub use service::FlightBookingService;

pub use aerolink_booking::{
    Booking, BookingError, Customer, PartyMember, UserDescriptor, BOOKING_PREFIX,
};
pub use aerolink_network::{
    AirportDescriptor, FlightDescriptor, FlightNetwork, InventoryError, LoadError, RouteError,
};
pub use aerolink_search::{ItineraryResult, SearchError};
pub use aerolink_shared::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
