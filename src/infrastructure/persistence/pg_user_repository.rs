//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::domain::repositories::{UserQuery, UserRepository};
use crate::error::AppError;

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: NaiveDate,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            row.id,
            row.first_name,
            row.last_name,
            row.email,
            row.date_of_birth,
        )
    }
}

// `strpos` keeps the match case-sensitive and treats `%` / `_` literally.
const SEARCH_PREDICATE: &str = r#"
    ($1::text IS NULL
        OR strpos(first_name, $1) > 0
        OR strpos(last_name, $1) > 0
        OR strpos(email, $1) > 0)
"#;

/// PostgreSQL repository for user records.
///
/// Uses bound parameters for every value; each method is a single statement.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, query: UserQuery) -> Result<Vec<User>, AppError> {
        let sql = format!(
            r#"
            SELECT id, first_name, last_name, email, date_of_birth
            FROM users
            WHERE {SEARCH_PREDICATE}
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(query.search)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM users WHERE {SEARCH_PREDICATE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(search)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, date_of_birth
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (first_name, last_name, email, date_of_birth)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, date_of_birth
            "#,
        )
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.email)
        .bind(new_user.date_of_birth)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET first_name = $1,
                last_name = $2,
                email = $3,
                date_of_birth = $4
            WHERE id = $5
            RETURNING id, first_name, last_name, email, date_of_birth
            "#,
        )
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.email)
        .bind(changes.date_of_birth)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
