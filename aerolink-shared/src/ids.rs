use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of unique identifiers for accounts and bookings.
///
/// Injected into the constructors that mint ids so tests can swap in a
/// deterministic sequence instead of random UUIDs.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production generator backed by random v4 UUIDs.
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Monotonic counter. Collision-free within a process and fully
/// predictable, which is what test fixtures want.
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            counter: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{:08}", n)
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_deterministic() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(), "00000001");
        assert_eq!(ids.next_id(), "00000002");
        assert_eq!(ids.next_id(), "00000003");
    }

    #[test]
    fn sequential_ids_respect_starting_point() {
        let ids = SequentialIdGenerator::starting_at(500);
        assert_eq!(ids.next_id(), "00000500");
    }

    #[test]
    fn uuid_ids_do_not_collide() {
        let ids = UuidIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
