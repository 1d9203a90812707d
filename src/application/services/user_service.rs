//! User listing and lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::domain::repositories::{UserQuery, UserRepository};
use crate::error::AppError;
use serde_json::json;

/// One page of users together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
}

/// Service for listing, reading and mutating users.
///
/// Translates absent records into [`AppError::NotFound`] and shapes list
/// queries. Works over any [`UserRepository`], including trait objects.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists one window of users, optionally filtered.
    ///
    /// A blank `search` means no filter. Otherwise the text is matched as a
    /// case-sensitive substring of first name, last name or email. The page
    /// and the total count are fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<UserPage, AppError> {
        let search = normalize_search(search);
        let query = UserQuery::new(offset, limit).with_search(search.clone());

        tracing::debug!(?query, "Listing users");

        let (users, total) = tokio::try_join!(
            self.repository.list(query),
            self.repository.count(search)
        )?;

        Ok(UserPage { users, total })
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user(&self, id: i32) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a user; the store assigns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = self.repository.create(new_user).await?;

        metrics::counter!("users_created_total").increment(1);
        tracing::info!(user_id = user.id, "User created");

        Ok(user)
    }

    /// Overwrites first name, last name, email and date of birth.
    ///
    /// Concurrent updates to the same id are last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_user(&self, id: i32, changes: UserChanges) -> Result<User, AppError> {
        let Some(user) = self.repository.update(id, changes).await? else {
            tracing::warn!(user_id = id, "Update of unknown user");
            return Err(not_found(id));
        };

        metrics::counter!("users_updated_total").increment(1);
        tracing::info!(user_id = id, "User updated");

        Ok(user)
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            tracing::warn!(user_id = id, "Delete of unknown user");
            return Err(not_found(id));
        }

        metrics::counter!("users_deleted_total").increment(1);
        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }

    /// Checks store connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store does not answer.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Drops search text that is absent or whitespace-only.
///
/// Non-blank text is kept verbatim, surrounding spaces included.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn not_found(id: i32) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::NaiveDate;

    fn create_test_user(id: i32, first: &str, last: &str) -> User {
        User::new(
            id,
            first.to_string(),
            last.to_string(),
            format!("{}@example.com", first.to_lowercase()),
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        )
    }

    fn changes() -> UserChanges {
        UserChanges {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
        }
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("")), None);
        assert_eq!(normalize_search(Some("  \t")), None);
        assert_eq!(normalize_search(Some("smith")), Some("smith".to_string()));
        assert_eq!(normalize_search(Some(" smith")), Some(" smith".to_string()));
    }

    #[tokio::test]
    async fn test_list_users_with_search() {
        let mut mock_repo = MockUserRepository::new();

        let users = vec![create_test_user(1, "John", "Smith")];
        mock_repo
            .expect_list()
            .withf(|q| q.search.as_deref() == Some("Smith") && q.offset == 10 && q.limit == 10)
            .times(1)
            .returning(move |_| Ok(users.clone()));

        mock_repo
            .expect_count()
            .withf(|search| search.as_deref() == Some("Smith"))
            .times(1)
            .returning(|_| Ok(11));

        let service = UserService::new(Arc::new(mock_repo));
        let page = service.list_users(Some("Smith"), 10, 10).await.unwrap();

        assert_eq!(page.total, 11);
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].last_name, "Smith");
    }

    #[tokio::test]
    async fn test_list_users_blank_search_is_unfiltered() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_list()
            .withf(|q| q.search.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));

        mock_repo
            .expect_count()
            .withf(|search| search.is_none())
            .times(1)
            .returning(|_| Ok(0));

        let service = UserService::new(Arc::new(mock_repo));
        let page = service.list_users(Some("   "), 0, 10).await.unwrap();

        assert_eq!(page.total, 0);
        assert!(page.users.is_empty());
    }

    #[tokio::test]
    async fn test_list_users_propagates_store_failure() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_list().returning(|_| Ok(vec![]));
        mock_repo
            .expect_count()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.list_users(None, 0, 10).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_get_user_found() {
        let mut mock_repo = MockUserRepository::new();

        let user = create_test_user(4, "Ada", "Lovelace");
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 4)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(mock_repo));
        let user = service.get_user(4).await.unwrap();

        assert_eq!(user.id, 4);
        assert_eq!(user.first_name, "Ada");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.get_user(404).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_user| new_user.first_name == "Ada")
            .times(1)
            .returning(|new_user| {
                Ok(User::new(
                    1,
                    new_user.first_name,
                    new_user.last_name,
                    new_user.email,
                    new_user.date_of_birth,
                ))
            });

        let service = UserService::new(Arc::new(mock_repo));
        let user = service
            .create_user(NewUser {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@x.com".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "ada@x.com");
    }

    #[tokio::test]
    async fn test_update_user_overwrites_all_fields() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_update()
            .withf(|id, c| *id == 2 && *c == changes())
            .times(1)
            .returning(|id, c| {
                Ok(Some(User::new(
                    id,
                    c.first_name,
                    c.last_name,
                    c.email,
                    c.date_of_birth,
                )))
            });

        let service = UserService::new(Arc::new(mock_repo));
        let user = service.update_user(2, changes()).await.unwrap();

        assert_eq!(user.id, 2);
        assert_eq!(user.last_name, "Hopper");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.update_user(9, changes()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(true));

        let service = UserService::new(Arc::new(mock_repo));
        assert!(service.delete_user(3).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.delete_user(3).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
