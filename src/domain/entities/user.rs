//! User entity, the single record type managed by the service.

use chrono::NaiveDate;

/// A persisted user record.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i32,
        first_name: String,
        last_name: String,
        email: String,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            date_of_birth,
        }
    }
}

/// Input data for creating a new user. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

/// Replacement values for an existing user.
///
/// Every field overwrites the stored value; there is no partial patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}
