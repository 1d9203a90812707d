#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use user_management_api::api::routes::api_router;
use user_management_api::domain::entities::User;
use user_management_api::domain::repositories::UserRepository;
use user_management_api::infrastructure::persistence::PgUserRepository;
use user_management_api::state::AppState;

pub async fn create_test_user(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO users (first_name, last_name, email, date_of_birth) \
         VALUES ($1, $2, $3, DATE '1990-01-01') RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts `n` users named `User{i} Person{i}`, returning their ids in order.
pub async fn create_numbered_users(pool: &PgPool, n: usize) -> Vec<i32> {
    let mut ids = Vec::with_capacity(n);
    for i in 1..=n {
        let id = create_test_user(
            pool,
            &format!("User{i}"),
            &format!("Person{i}"),
            &format!("user{i}@example.com"),
        )
        .await;
        ids.push(id);
    }
    ids
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(Arc::new(pool)));
    AppState::new(repository)
}

pub fn make_server(pool: PgPool) -> TestServer {
    let app: Router = api_router(create_test_state(pool));
    TestServer::new(app).unwrap()
}

/// Case-sensitive substring test over first name, last name and email.
pub fn user_matches(user: &User, text: &str) -> bool {
    user.first_name.contains(text) || user.last_name.contains(text) || user.email.contains(text)
}
