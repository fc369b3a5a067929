use std::collections::HashSet;

/// An airport plus the classification of every flight touching it.
///
/// The three sets partition the flights through this airport: a flight
/// number lands in exactly one of them depending on whether this
/// airport is the first, an interior, or the last hop of its route.
/// They grow only while the network loader walks route chains and are
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Airport {
    code: String,
    name: String,
    address: String,
    originating_flights: HashSet<String>,
    layover_flights: HashSet<String>,
    terminating_flights: HashSet<String>,
}

impl Airport {
    pub(crate) fn new(code: String, name: String, address: String) -> Self {
        Self {
            code,
            name,
            address,
            originating_flights: HashSet::new(),
            layover_flights: HashSet::new(),
            terminating_flights: HashSet::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn originating_flights(&self) -> &HashSet<String> {
        &self.originating_flights
    }

    pub fn layover_flights(&self) -> &HashSet<String> {
        &self.layover_flights
    }

    pub fn terminating_flights(&self) -> &HashSet<String> {
        &self.terminating_flights
    }

    pub(crate) fn add_originating_flight(&mut self, flight_number: &str) {
        self.originating_flights.insert(flight_number.to_string());
    }

    pub(crate) fn add_layover_flight(&mut self, flight_number: &str) {
        self.layover_flights.insert(flight_number.to_string());
    }

    pub(crate) fn add_terminating_flight(&mut self, flight_number: &str) {
        self.terminating_flights.insert(flight_number.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_sets_start_empty() {
        let airport = Airport::new(
            "AMS".to_string(),
            "Schiphol".to_string(),
            "Amsterdam, NL".to_string(),
        );
        assert_eq!(airport.code(), "AMS");
        assert!(airport.originating_flights().is_empty());
        assert!(airport.layover_flights().is_empty());
        assert!(airport.terminating_flights().is_empty());
    }

    #[test]
    fn repeated_inserts_dedupe_by_flight_number() {
        let mut airport = Airport::new(
            "CDG".to_string(),
            "Charles de Gaulle".to_string(),
            "Paris, FR".to_string(),
        );
        airport.add_layover_flight("KL1001");
        airport.add_layover_flight("KL1001");
        assert_eq!(airport.layover_flights().len(), 1);
    }
}
