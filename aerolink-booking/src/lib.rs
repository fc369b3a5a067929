pub mod coordinator;
pub mod directory;
pub mod models;
pub mod people;

pub use coordinator::{BookingCoordinator, BookingError, BOOKING_PREFIX};
pub use directory::CustomerDirectory;
pub use models::Booking;
pub use people::{
    Account, AccountStatus, CoPassenger, Customer, PartyMember, PersonProfile, UserDescriptor,
};
