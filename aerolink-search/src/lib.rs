pub mod engine;
pub mod models;

pub use engine::{SearchEngine, SearchError};
pub use models::ItineraryResult;
