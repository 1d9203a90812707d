//! Repository trait for user data access.

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Filter and window for listing users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// Case-sensitive substring matched against first name, last name and email.
    pub search: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

impl UserQuery {
    /// Creates an unfiltered query for the given window.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            search: None,
            offset,
            limit,
        }
    }

    /// Adds a search filter to the query.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }
}

/// Repository interface for the user collection.
///
/// Every call is a single round trip to the store. Nothing is retried;
/// connectivity failures surface as [`AppError::Internal`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists users matching `query.search`, ordered by id, windowed by
    /// `offset` / `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, query: UserQuery) -> Result<Vec<User>, AppError>;

    /// Counts users matching the search filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Inserts a user and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Overwrites all mutable fields of a user.
    ///
    /// Returns `Ok(None)` if no user has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, AppError>;

    /// Removes a user.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if the id was absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
