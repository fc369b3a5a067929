use crate::people::{Account, Customer, PersonProfile, UserDescriptor};
use aerolink_shared::IdGenerator;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Registered customers keyed by email.
///
/// Records are created at load time; afterwards the only mutation is
/// appending booking ids to a customer's list, so the map sits behind
/// a read-mostly lock.
pub struct CustomerDirectory {
    customers: RwLock<HashMap<String, Customer>>,
}

impl CustomerDirectory {
    pub fn from_descriptors(users: Vec<UserDescriptor>, ids: &dyn IdGenerator) -> Self {
        let customers = users
            .into_iter()
            .map(|user| {
                let customer = Customer::new(
                    PersonProfile {
                        first_name: user.first_name,
                        last_name: user.last_name,
                        age: None,
                    },
                    Account::new(ids.next_id()),
                    user.email_id.clone(),
                );
                (user.email_id, customer)
            })
            .collect();
        Self {
            customers: RwLock::new(customers),
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(email)
    }

    pub fn get(&self, email: &str) -> Option<Customer> {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }

    pub fn profile_of(&self, email: &str) -> Option<PersonProfile> {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .map(|customer| customer.profile.clone())
    }

    /// Append a booking id to the owning customer's list. The caller
    /// has already resolved the customer, so a vanished entry is a
    /// programming error and is ignored rather than surfaced.
    pub(crate) fn record_booking(&self, email: &str, booking_id: String) {
        if let Some(customer) = self
            .customers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(email)
        {
            customer.add_booking(booking_id);
        }
    }
}
