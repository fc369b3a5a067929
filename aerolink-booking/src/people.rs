use aerolink_shared::Masked;
use serde::{Deserialize, Serialize};

/// Demographic record embedded by value wherever a person appears —
/// composition instead of a person-class hierarchy, since nothing ever
/// dispatches polymorphically on "kind of person".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Canceled,
    Blacklisted,
    Blocked,
}

/// Account state for a registered customer. Credential storage is an
/// external concern; only the generated id and status live here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub status: AccountStatus,
}

impl Account {
    pub fn new(id: String) -> Self {
        Self {
            id,
            status: AccountStatus::Active,
        }
    }
}

/// A registered customer: profile plus account by composition, and an
/// ordered list of booking ids appended as reservations land.
#[derive(Debug, Clone)]
pub struct Customer {
    pub profile: PersonProfile,
    pub account: Account,
    pub email: Masked<String>,
    bookings: Vec<String>,
}

impl Customer {
    pub fn new(profile: PersonProfile, account: Account, email: String) -> Self {
        Self {
            profile,
            account,
            email: Masked(email),
            bookings: Vec::new(),
        }
    }

    /// Booking ids in creation order.
    pub fn bookings(&self) -> &[String] {
        &self.bookings
    }

    pub(crate) fn add_booking(&mut self, booking_id: String) {
        self.bookings.push(booking_id);
    }
}

/// A co-traveller on a booking: demographic data by value, no account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoPassenger {
    pub profile: PersonProfile,
}

/// One entry of a booking's ordered passenger list. The lead entry
/// must be `Registered`; co-travellers are usually guests.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum PartyMember {
    Registered {
        email_id: String,
    },
    Guest {
        first_name: String,
        last_name: String,
        age: Option<u8>,
    },
}

/// Load-time user record, validated upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDescriptor {
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_debug_output_masks_the_email() {
        let customer = Customer::new(
            PersonProfile {
                first_name: "Ada".to_string(),
                last_name: "Vermeer".to_string(),
                age: None,
            },
            Account::new("00000001".to_string()),
            "ada@example.com".to_string(),
        );
        let rendered = format!("{:?}", customer);
        assert!(!rendered.contains("ada@example.com"));
        assert!(rendered.contains("********"));
    }

    #[test]
    fn party_members_deserialize_by_field_shape() {
        let registered: PartyMember =
            serde_json::from_str(r#"{ "emailId": "ada@example.com" }"#).unwrap();
        assert!(matches!(registered, PartyMember::Registered { .. }));

        let guest: PartyMember = serde_json::from_str(
            r#"{ "firstName": "Bram", "lastName": "de Wit", "age": 34 }"#,
        )
        .unwrap();
        match guest {
            PartyMember::Guest { first_name, age, .. } => {
                assert_eq!(first_name, "Bram");
                assert_eq!(age, Some(34));
            }
            PartyMember::Registered { .. } => panic!("expected a guest"),
        }
    }

    #[test]
    fn new_accounts_start_active() {
        let account = Account::new("00000007".to_string());
        assert_eq!(account.status, AccountStatus::Active);
    }
}
