use super::membership::Membership;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A registered library patron.
///
/// Field names follow the stored JSON layout (`membershipType`,
/// `registrationDate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub membership_type: Membership,
    pub registration_date: DateTime<Utc>,
}

impl Member {
    pub fn registration_date_local(&self) -> DateTime<Local> {
        self.registration_date.with_timezone(&Local)
    }

    /// Case-insensitive match on name, email or id.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.id.to_lowercase().contains(&needle)
    }
}
