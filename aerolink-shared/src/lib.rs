pub mod ids;
pub mod pii;

pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use pii::Masked;
