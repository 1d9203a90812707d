//! Core domain entities.
//!
//! The service manages a single entity, [`User`]. Following the "New Type"
//! pattern, separate structs carry input data:
//!
//! - [`NewUser`] - fields for creating a record (no id yet)
//! - [`UserChanges`] - full replacement values for an update

pub mod user;

pub use user::{NewUser, User, UserChanges};
